//! snaplens: structured dumping and diagnostic reporting for process memory
//! snapshots.
//!
//! The heart of the crate is the [`dump`] module, a renderer for arbitrary
//! object graphs: any type implementing [`core::Inspect`] can be dumped as
//! indented text or HTML, with cycle detection and per-type handler
//! overrides. The [`snapshot`], [`analyzers`], and [`report`] modules build a
//! memory snapshot analyzer on top of it.
//!
//! ```
//! use snaplens::dump::{dump, Registry};
//! use snaplens::impl_composite;
//!
//! struct Job {
//!     name: String,
//!     retries: u32,
//! }
//! impl_composite!(Job { name, retries });
//!
//! let job = Job {
//!     name: "compact".to_string(),
//!     retries: 2,
//! };
//! let mut lines = Vec::new();
//! dump(&job, "Job", &Registry::new(), |line| {
//!     lines.push(line.to_string())
//! });
//! assert_eq!(lines[2], "name: compact");
//! assert_eq!(lines[3], "retries: 2");
//! ```

pub mod analyzers;
pub mod cli;
pub mod config;
pub mod core;
pub mod dump;
pub mod report;
pub mod snapshot;
