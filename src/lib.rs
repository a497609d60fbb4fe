//! # Wordcrunch - Parallel Word Counting for Compressed Corpora
//!
//! Wordcrunch counts word occurrences across a directory of gzip-compressed
//! text files using a fixed pool of worker threads, then writes the result as
//! a table (global count plus one column per input file) in CSV, Parquet, or
//! Arrow IPC format.
//!
//! ## Quick Start
//!
//! ```bash
//! # Install wordcrunch
//! cargo install wordcrunch
//!
//! # Count words across a corpus with 8 workers
//! wordcrunch ./corpus counts.parquet 8
//! ```
//!
//! The engine entry point is [`engine::run`]; the CLI, benchmark drivers, and
//! integration tests all go through it.

pub mod cli;
pub mod engine;
pub mod error;
pub mod serializer;

pub use engine::{EngineOptions, RunSummary, SkippedFile};
pub use error::EngineError;

/// Version information
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
pub const PKG_NAME: &str = env!("CARGO_PKG_NAME");
pub const PKG_DESCRIPTION: &str = env!("CARGO_PKG_DESCRIPTION");
