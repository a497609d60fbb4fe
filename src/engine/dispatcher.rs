//! Task dispatch: file enumeration and the worker pool.
//!
//! Files are fanned out to a fixed pool of worker threads over crossbeam
//! channels in a producer/workers/collector arrangement. Each worker
//! tokenizes its file with no lock held, then merges the local counts into
//! the shared table. Per-file failures travel back over the result channel
//! and are collected as skipped files; they never abort the run.

use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};

use crossbeam::channel::{Receiver, Sender, bounded};
use tracing::debug;

use super::table::AggregateTable;
use super::tokenizer;
use crate::error::EngineError;

/// One unit of work: a single eligible input file.
///
/// Created once at enumeration time and handed to exactly one worker.
#[derive(Debug, Clone)]
pub struct FileTask {
    /// Position in enumeration order; doubles as the output column index.
    pub index: usize,
    pub path: PathBuf,
    pub name: String,
}

/// A file excluded from the run, with the reason it was skipped.
#[derive(Debug, Clone)]
pub struct SkippedFile {
    pub index: usize,
    pub name: String,
    pub reason: String,
}

/// Outcome of one file, reported by a worker to the collector.
struct FileOutcome {
    index: usize,
    error: Option<String>,
}

/// Enumerate eligible (`*.txt.gz`) files in `dir`, sorted by file name.
///
/// The sorted order is what fixes the output column order, so it must not
/// depend on directory iteration order. Zero eligible files is fatal.
pub fn enumerate_tasks(dir: &Path) -> Result<Vec<FileTask>, EngineError> {
    if !dir.is_dir() {
        return Err(EngineError::Input(format!(
            "input directory '{}' not found or is not a directory",
            dir.display()
        )));
    }

    let entries = std::fs::read_dir(dir).map_err(|e| {
        EngineError::Input(format!("cannot read directory '{}': {e}", dir.display()))
    })?;

    let mut files = Vec::new();
    for entry in entries {
        let entry = entry.map_err(|e| {
            EngineError::Input(format!("cannot read directory '{}': {e}", dir.display()))
        })?;
        let name = entry.file_name().to_string_lossy().into_owned();
        if name.ends_with(".txt.gz") && entry.path().is_file() {
            files.push((name, entry.path()));
        }
    }

    if files.is_empty() {
        return Err(EngineError::Input(format!(
            "no .txt.gz files found in '{}'",
            dir.display()
        )));
    }

    files.sort_by(|a, b| a.0.cmp(&b.0));
    Ok(files
        .into_iter()
        .enumerate()
        .map(|(index, (name, path))| FileTask { index, path, name })
        .collect())
}

/// Process every task exactly once using at most `requested_threads` workers.
///
/// Blocks until all workers have terminated. Returns the files that failed
/// with a read error, in enumeration order; the table holds the merged
/// counts of everything else.
pub fn process(
    tasks: &[FileTask],
    table: &AggregateTable,
    requested_threads: usize,
) -> Vec<SkippedFile> {
    let total_files = tasks.len();
    let workers = requested_threads.clamp(1, total_files.max(1));
    debug!(files = total_files, workers, "dispatching tasks");

    let (work_tx, work_rx): (Sender<usize>, Receiver<usize>) = bounded(workers * 2);
    let (result_tx, result_rx): (Sender<FileOutcome>, Receiver<FileOutcome>) =
        bounded(workers * 4);

    let progress = Arc::new(AtomicUsize::new(0));

    let outcomes = crossbeam::thread::scope(|s| {
        // Worker threads: tokenize outside any lock, then merge.
        for _ in 0..workers {
            let work_rx = work_rx.clone();
            let result_tx = result_tx.clone();
            let progress = progress.clone();

            s.spawn(move |_| {
                while let Ok(index) = work_rx.recv() {
                    let task = &tasks[index];
                    debug!(file = %task.name, "start");

                    let outcome = match tokenizer::tokenize_file(&task.path) {
                        Ok(local) => {
                            table.merge(task.index, local);
                            FileOutcome { index, error: None }
                        }
                        Err(e) => FileOutcome {
                            index,
                            error: Some(e.to_string()),
                        },
                    };

                    debug!(
                        file = %task.name,
                        done = progress.fetch_add(1, Ordering::Relaxed) + 1,
                        total = total_files,
                        "finish"
                    );
                    if result_tx.send(outcome).is_err() {
                        break; // Collector dropped
                    }
                }
            });
        }

        // Producer: feed file indices to the workers.
        let work_tx_clone = work_tx.clone();
        s.spawn(move |_| {
            for index in 0..total_files {
                if work_tx_clone.send(index).is_err() {
                    break; // Workers dropped
                }
            }
            drop(work_tx_clone);
        });

        // Drop the original senders so receivers know when work is done.
        drop(work_tx);
        drop(result_tx);

        collect_outcomes(result_rx, total_files)
    });

    let outcomes = match outcomes {
        Ok(outcomes) => outcomes,
        // A worker panic is a bug in the engine, not a per-file failure.
        Err(payload) => std::panic::resume_unwind(payload),
    };

    let mut skipped: Vec<SkippedFile> = outcomes
        .into_iter()
        .filter_map(|outcome| {
            outcome.error.map(|reason| SkippedFile {
                index: outcome.index,
                name: tasks[outcome.index].name.clone(),
                reason,
            })
        })
        .collect();
    skipped.sort_by_key(|s| s.index);

    for skip in &skipped {
        debug!(file = %skip.name, reason = %skip.reason, "skipped file");
    }
    skipped
}

/// Gather per-file outcomes until every task is accounted for.
fn collect_outcomes(result_rx: Receiver<FileOutcome>, total_files: usize) -> Vec<FileOutcome> {
    let mut outcomes = Vec::with_capacity(total_files);
    while let Ok(outcome) = result_rx.recv() {
        outcomes.push(outcome);
        if outcomes.len() >= total_files {
            break;
        }
    }
    outcomes
}
