//! Command-line interface for wordcrunch.
//!
//! Mirrors the classic invocation `wordcrunch <INPUT_DIR> <OUTPUT_FILE>
//! <THREADS>`: count words in every `*.txt.gz` file under the input
//! directory and write the aggregate table to the output path, whose
//! extension selects CSV, Parquet, or Arrow output.

use std::path::PathBuf;
use std::process;

use anyhow::Result;
use clap::Parser;

mod output;

pub use output::Output;

use crate::engine::{self, EngineOptions};

/// Parallel word counting over gzip-compressed corpora
#[derive(Parser)]
#[command(author, version, long_about = None)]
pub struct Cli {
    /// Directory containing .txt.gz input files
    #[arg(value_name = "INPUT_DIR")]
    pub input_dir: PathBuf,

    /// Output table path; extension must be .csv, .parquet, or .arrow
    #[arg(value_name = "OUTPUT_FILE")]
    pub output: PathBuf,

    /// Number of worker threads; defaults to the available CPU cores
    /// (capped at the number of input files either way)
    #[arg(value_name = "THREADS", value_parser = clap::value_parser!(u32).range(1..))]
    pub threads: Option<u32>,

    /// Enable verbose output
    #[arg(short, long)]
    pub verbose: bool,

    /// Enable quiet output (minimal)
    #[arg(short, long, conflicts_with = "verbose")]
    pub quiet: bool,
}

impl Cli {
    pub fn run(self) -> Result<()> {
        let out = Output::new(self.verbose, self.quiet);

        let options = EngineOptions {
            input_dir: self.input_dir,
            output_path: self.output.clone(),
            threads: self
                .threads
                .map(|t| t as usize)
                .unwrap_or_else(num_cpus::get),
        };

        let summary = match engine::run(&options) {
            Ok(summary) => summary,
            Err(e) => {
                out.error(&e.to_string());
                process::exit(1);
            }
        };

        // Per-file failures are success-with-warnings, not fatal.
        for skip in &summary.skipped {
            out.warning(&format!("skipped {}: {}", skip.name, skip.reason));
        }

        out.success(&format!(
            "Wrote {} words to {}",
            summary.distinct_words,
            self.output.display()
        ));
        if out.is_verbose() {
            out.section_header("Run Statistics");
            out.summary_stats("Files processed:", &summary.files_processed.to_string());
            out.summary_stats("Files skipped:", &summary.skipped.len().to_string());
            out.summary_stats("Distinct words:", &summary.distinct_words.to_string());
            out.summary_stats(
                "Elapsed:",
                &format!("{}ms", summary.duration.as_millis()),
            );
        }

        Ok(())
    }
}
