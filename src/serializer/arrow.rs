//! Arrow IPC file output (memory-mappable, Feather-v2 compatible).

use std::fs::File;
use std::path::Path;
use std::sync::Arc;

use anyhow::Result;
use arrow::array::{ArrayRef, StringArray, UInt64Array};
use arrow::datatypes::{DataType, Field, Schema};
use arrow::ipc::writer::FileWriter;
use arrow::record_batch::RecordBatch;

use super::ResultTable;

/// Build the shared Arrow representation used by both the Arrow IPC and the
/// Parquet writers: `word: Utf8, count: UInt64, <file>: UInt64...`.
pub(super) fn record_batch(table: &ResultTable) -> Result<RecordBatch> {
    let mut fields = vec![
        Field::new("word", DataType::Utf8, false),
        Field::new("count", DataType::UInt64, false),
    ];
    for name in &table.file_names {
        fields.push(Field::new(name, DataType::UInt64, false));
    }
    let schema = Arc::new(Schema::new(fields));

    let words: StringArray = table.rows.iter().map(|r| Some(r.word.as_str())).collect();
    let totals = UInt64Array::from_iter_values(table.rows.iter().map(|r| r.total));

    let mut columns: Vec<ArrayRef> = vec![Arc::new(words), Arc::new(totals)];
    for file_column in 0..table.file_names.len() {
        let counts =
            UInt64Array::from_iter_values(table.rows.iter().map(|r| r.per_file[file_column]));
        columns.push(Arc::new(counts));
    }

    Ok(RecordBatch::try_new(schema, columns)?)
}

pub(super) fn write(table: &ResultTable, path: &Path) -> Result<()> {
    let batch = record_batch(table)?;
    let file = File::create(path)?;
    let mut writer = FileWriter::try_new(file, batch.schema_ref())?;
    writer.write(&batch)?;
    writer.finish()?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::super::Row;
    use super::*;
    use arrow::ipc::reader::FileReader;
    use tempfile::TempDir;

    fn sample() -> ResultTable {
        ResultTable {
            file_names: vec!["f1.txt.gz".to_string(), "f2.txt.gz".to_string()],
            rows: vec![
                Row {
                    word: "dog".to_string(),
                    total: 3,
                    per_file: vec![1, 2],
                },
                Row {
                    word: "cat".to_string(),
                    total: 2,
                    per_file: vec![2, 0],
                },
            ],
        }
    }

    #[test]
    fn round_trips_through_ipc_file() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("out.arrow");
        write(&sample(), &path).unwrap();

        let mut reader = FileReader::try_new(File::open(&path).unwrap(), None).unwrap();
        let batch = reader.next().unwrap().unwrap();

        let names: Vec<_> = batch
            .schema()
            .fields()
            .iter()
            .map(|f| f.name().clone())
            .collect();
        assert_eq!(names, vec!["word", "count", "f1.txt.gz", "f2.txt.gz"]);

        let words = batch
            .column(0)
            .as_any()
            .downcast_ref::<StringArray>()
            .unwrap();
        assert_eq!(words.value(0), "dog");
        assert_eq!(words.value(1), "cat");

        let f2 = batch
            .column(3)
            .as_any()
            .downcast_ref::<UInt64Array>()
            .unwrap();
        assert_eq!(f2.value(0), 2);
        assert_eq!(f2.value(1), 0);
    }
}
