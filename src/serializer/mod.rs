//! Result serialization: sorted row building and the three table writers.
//!
//! The format is a closed enum selected once from the output path extension;
//! per-row dispatch never happens. Row order is fixed (total count
//! descending, ties by word ascending) so the output is deterministic no
//! matter how merges interleaved during the processing phase.

mod arrow;
mod csv;
mod parquet;

use std::fmt;
use std::path::Path;

use crate::engine::FileTask;
use crate::engine::table::WordRecord;
use crate::error::EngineError;

/// Supported output table formats.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OutputFormat {
    Csv,
    Parquet,
    Arrow,
}

impl OutputFormat {
    /// Select the format from the output path's extension, case-insensitively.
    pub fn from_path(path: &Path) -> Result<Self, EngineError> {
        let ext = path
            .extension()
            .and_then(|e| e.to_str())
            .map(str::to_ascii_lowercase);
        match ext.as_deref() {
            Some("csv") => Ok(Self::Csv),
            Some("parquet") => Ok(Self::Parquet),
            Some("arrow") => Ok(Self::Arrow),
            Some(other) => Err(EngineError::Format(format!(".{other}"))),
            None => Err(EngineError::Format(path.display().to_string())),
        }
    }
}

impl fmt::Display for OutputFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Csv => write!(f, "csv"),
            Self::Parquet => write!(f, "parquet"),
            Self::Arrow => write!(f, "arrow"),
        }
    }
}

/// One output row: word, global count, one count per processed file.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Row {
    pub word: String,
    pub total: u64,
    /// Parallel to [`ResultTable::file_names`]; 0 where the word is absent.
    pub per_file: Vec<u64>,
}

/// The frozen result table, ready for any of the writers.
#[derive(Debug)]
pub struct ResultTable {
    /// Column names for the per-file counts, in enumeration order.
    pub file_names: Vec<String>,
    /// Rows sorted by total descending, then word ascending.
    pub rows: Vec<Row>,
}

/// Project the aggregate records onto sorted rows with one column per
/// processed file. `processed` must be in enumeration order.
pub fn build_table(records: Vec<(String, WordRecord)>, processed: &[&FileTask]) -> ResultTable {
    let file_names: Vec<String> = processed.iter().map(|t| t.name.clone()).collect();

    let mut rows: Vec<Row> = records
        .into_iter()
        .map(|(word, record)| {
            let per_file = processed
                .iter()
                .map(|t| record.per_file.get(&t.index).copied().unwrap_or(0))
                .collect();
            Row {
                word,
                total: record.total,
                per_file,
            }
        })
        .collect();

    rows.sort_by(|a, b| b.total.cmp(&a.total).then_with(|| a.word.cmp(&b.word)));
    ResultTable { file_names, rows }
}

/// Write the table to `path` in the selected format.
///
/// On failure any partially written file is removed so nothing truncated but
/// readable is left behind.
pub fn write_table(
    table: &ResultTable,
    path: &Path,
    format: OutputFormat,
) -> Result<(), EngineError> {
    let result = match format {
        OutputFormat::Csv => csv::write(table, path),
        OutputFormat::Parquet => parquet::write(table, path),
        OutputFormat::Arrow => arrow::write(table, path),
    };
    result.map_err(|source| {
        let _ = std::fs::remove_file(path);
        EngineError::Serialization {
            path: path.to_path_buf(),
            reason: source.to_string(),
        }
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::PathBuf;

    fn task(index: usize, name: &str) -> FileTask {
        FileTask {
            index,
            path: PathBuf::from(name),
            name: name.to_string(),
        }
    }

    fn record(total: u64, per_file: &[(usize, u64)]) -> WordRecord {
        WordRecord {
            total,
            per_file: per_file.iter().copied().collect(),
        }
    }

    #[test]
    fn selects_format_by_extension_case_insensitively() {
        let from = |p: &str| OutputFormat::from_path(Path::new(p));
        assert_eq!(from("out.csv").unwrap(), OutputFormat::Csv);
        assert_eq!(from("out.PARQUET").unwrap(), OutputFormat::Parquet);
        assert_eq!(from("dir/out.Arrow").unwrap(), OutputFormat::Arrow);
        assert!(matches!(from("out.json"), Err(EngineError::Format(_))));
        assert!(matches!(from("no_extension"), Err(EngineError::Format(_))));
    }

    #[test]
    fn rows_sorted_by_total_desc_then_word_asc() {
        let f1 = task(0, "f1.txt.gz");
        let f2 = task(1, "f2.txt.gz");
        let records = vec![
            ("cat".to_string(), record(2, &[(0, 2)])),
            ("dog".to_string(), record(3, &[(0, 1), (1, 2)])),
            ("ant".to_string(), record(2, &[(1, 2)])),
        ];

        let table = build_table(records, &[&f1, &f2]);
        let order: Vec<_> = table.rows.iter().map(|r| r.word.as_str()).collect();
        assert_eq!(order, vec!["dog", "ant", "cat"]);
    }

    #[test]
    fn absent_words_get_zero_columns() {
        let f1 = task(0, "f1.txt.gz");
        let f2 = task(1, "f2.txt.gz");
        let records = vec![("cat".to_string(), record(2, &[(0, 2)]))];

        let table = build_table(records, &[&f1, &f2]);
        assert_eq!(table.file_names, vec!["f1.txt.gz", "f2.txt.gz"]);
        assert_eq!(table.rows[0].per_file, vec![2, 0]);
    }

    #[test]
    fn skipped_files_contribute_no_column() {
        // File index 1 was skipped: not in the processed list, so even its
        // index appearing nowhere in per_file maps is simply projected out.
        let f1 = task(0, "f1.txt.gz");
        let f3 = task(2, "f3.txt.gz");
        let records = vec![("cat".to_string(), record(5, &[(0, 2), (2, 3)]))];

        let table = build_table(records, &[&f1, &f3]);
        assert_eq!(table.file_names.len(), 2);
        assert_eq!(table.rows[0].per_file, vec![2, 3]);
    }

    #[test]
    fn row_totals_match_per_file_sums() {
        let f1 = task(0, "f1.txt.gz");
        let f2 = task(1, "f2.txt.gz");
        let records: Vec<(String, WordRecord)> = vec![
            ("a".to_string(), record(4, &[(0, 1), (1, 3)])),
            ("b".to_string(), record(2, &[(1, 2)])),
        ];

        let table = build_table(records, &[&f1, &f2]);
        for row in &table.rows {
            assert_eq!(row.total, row.per_file.iter().sum::<u64>());
        }
    }

    #[test]
    fn write_failure_maps_to_serialization_error() {
        let dir = tempfile::TempDir::new().unwrap();
        let blocker = dir.path().join("blocker");
        std::fs::write(&blocker, "in the way").unwrap();

        let table = ResultTable {
            file_names: vec![],
            rows: vec![],
        };
        let target = blocker.join("out.csv");
        let err = write_table(&table, &target, OutputFormat::Csv).unwrap_err();
        assert!(matches!(err, EngineError::Serialization { .. }));
        assert!(!target.exists());
    }
}
