//! Snapshot analyzers: projections of the raw snapshot into the summaries,
//! tables, and views the report renders.

pub mod heap;
pub mod memory;
pub mod runtime;
pub mod threads;
