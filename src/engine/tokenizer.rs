//! Per-file tokenization: decompress one gzip archive and count its words.
//!
//! Tokenization is a pure function of the file contents. It holds no lock and
//! touches no shared state, so all I/O and CPU-bound parsing stays outside the
//! aggregate table's critical sections.

use std::collections::HashMap;
use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::Path;

use flate2::read::GzDecoder;

use crate::error::EngineError;

/// Word counts for a single file, keyed by normalized word.
pub type LocalCount = HashMap<String, u64>;

/// Decompress `path` and count its normalized words.
///
/// Words are split on any non-alphanumeric boundary and lower-cased, so
/// `"Cat,dog CAT"` yields `{cat: 2, dog: 1}`. A corrupt archive or a stream
/// that is not valid UTF-8 fails with [`EngineError::FileRead`]; the caller
/// treats that as a per-file skip, not a fatal error.
pub fn tokenize_file(path: &Path) -> Result<LocalCount, EngineError> {
    let file_read = |source: std::io::Error| EngineError::FileRead {
        file: path
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_else(|| path.display().to_string()),
        source,
    };

    let file = File::open(path).map_err(file_read)?;
    let mut reader = BufReader::new(GzDecoder::new(file));

    let mut counts = LocalCount::new();
    let mut line = String::new();
    loop {
        line.clear();
        // read_line surfaces both gzip corruption and invalid UTF-8
        let bytes = reader.read_line(&mut line).map_err(file_read)?;
        if bytes == 0 {
            break;
        }
        for token in line.split(|c: char| !c.is_alphanumeric()) {
            if token.is_empty() {
                continue;
            }
            *counts.entry(token.to_lowercase()).or_insert(0) += 1;
        }
    }

    Ok(counts)
}
