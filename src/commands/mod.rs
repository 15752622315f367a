//! CLI command implementations for cfmeta.
//!
//! - **extract**: read a source file, extract custom function metadata,
//!   write `functions.json` and report

pub mod extract;

pub use extract::{run_extract, RunStatus};
