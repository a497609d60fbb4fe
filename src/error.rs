//! Error taxonomy for the word-count engine.
//!
//! Fatal errors (`Input`, `Format`, `Serialization`) abort the run with a
//! non-zero exit status. `FileRead` is recoverable: the dispatcher records the
//! file as skipped and the run continues.

use std::path::PathBuf;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum EngineError {
    /// Input directory missing, unreadable, or containing zero eligible files.
    #[error("input error: {0}")]
    Input(String),

    /// One file could not be decompressed or decoded. Recoverable per file.
    #[error("failed to read {file}: {source}")]
    FileRead {
        file: String,
        #[source]
        source: std::io::Error,
    },

    /// Output path extension is not one of .csv / .parquet / .arrow.
    #[error("unsupported output format '{0}' (expected .csv, .parquet, or .arrow)")]
    Format(String),

    /// Writing the output table failed. Any partial file has been removed.
    #[error("failed to write {}: {reason}", path.display())]
    Serialization { path: PathBuf, reason: String },
}
