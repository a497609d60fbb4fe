//! The concurrent word-counting engine.
//!
//! [`run`] is the single entry point shared by the CLI wrapper, benchmark
//! drivers, and tests: input directory in, formatted table out. Phases run
//! strictly in order: validate output format, enumerate files, process and
//! merge in parallel, join all workers, build sorted rows, serialize.

pub mod dispatcher;
pub mod table;
pub mod tokenizer;

use std::collections::HashSet;
use std::path::PathBuf;
use std::time::{Duration, Instant};

use tracing::info;

use crate::error::EngineError;
use crate::serializer::{self, OutputFormat};
use table::AggregateTable;

pub use dispatcher::{FileTask, SkippedFile};

/// Inputs to one engine run.
#[derive(Debug, Clone)]
pub struct EngineOptions {
    /// Directory containing `*.txt.gz` files.
    pub input_dir: PathBuf,
    /// Output table path; extension selects the format.
    pub output_path: PathBuf,
    /// Worker thread count, >= 1. Capped at the number of input files.
    pub threads: usize,
}

/// What a completed run produced, for the caller to report.
#[derive(Debug)]
pub struct RunSummary {
    pub files_processed: usize,
    /// Files excluded after a read error, in enumeration order.
    pub skipped: Vec<SkippedFile>,
    pub distinct_words: usize,
    pub duration: Duration,
}

/// Count words across the corpus and write the result table.
///
/// Fatal failures ([`EngineError::Input`], [`EngineError::Format`],
/// [`EngineError::Serialization`]) abort the run; per-file read errors are
/// returned in [`RunSummary::skipped`] instead.
pub fn run(options: &EngineOptions) -> Result<RunSummary, EngineError> {
    let start = Instant::now();

    // Reject a bad output extension before doing any work.
    let format = OutputFormat::from_path(&options.output_path)?;
    let tasks = dispatcher::enumerate_tasks(&options.input_dir)?;
    info!(
        files = tasks.len(),
        threads = options.threads,
        format = %format,
        "starting word count"
    );

    let aggregate = AggregateTable::new();
    let skipped = dispatcher::process(&tasks, &aggregate, options.threads);
    let records = aggregate.into_records();

    // Skipped files contribute no column; their counts were never merged.
    let skipped_indices: HashSet<usize> = skipped.iter().map(|s| s.index).collect();
    let processed: Vec<&FileTask> = tasks
        .iter()
        .filter(|t| !skipped_indices.contains(&t.index))
        .collect();

    let result = serializer::build_table(records, &processed);
    serializer::write_table(&result, &options.output_path, format)?;

    let summary = RunSummary {
        files_processed: processed.len(),
        skipped,
        distinct_words: result.rows.len(),
        duration: start.elapsed(),
    };
    info!(
        files = summary.files_processed,
        skipped = summary.skipped.len(),
        words = summary.distinct_words,
        elapsed_ms = summary.duration.as_millis() as u64,
        "word count complete"
    );
    Ok(summary)
}
