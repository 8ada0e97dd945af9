//! Core types: errors and the renderable value model.

mod error;
mod value;

pub use error::{Error, Result};
pub use value::{Identity, Inspect, Record, Scalar, Shape};

pub(crate) use value::group_digits;
