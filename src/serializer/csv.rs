//! Plain delimited text output via the `csv` crate.

use std::fs::File;
use std::io::BufWriter;
use std::path::Path;

use anyhow::Result;

use super::ResultTable;

pub(super) fn write(table: &ResultTable, path: &Path) -> Result<()> {
    let mut writer = csv::Writer::from_writer(BufWriter::new(File::create(path)?));

    let mut header = Vec::with_capacity(2 + table.file_names.len());
    header.push("word".to_string());
    header.push("count".to_string());
    header.extend(table.file_names.iter().cloned());
    writer.write_record(&header)?;

    let mut record = Vec::with_capacity(header.len());
    for row in &table.rows {
        record.clear();
        record.push(row.word.clone());
        record.push(row.total.to_string());
        record.extend(row.per_file.iter().map(u64::to_string));
        writer.write_record(&record)?;
    }

    writer.flush()?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::super::Row;
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn writes_header_and_rows() {
        let table = ResultTable {
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
        };

        let dir = TempDir::new().unwrap();
        let path = dir.path().join("out.csv");
        write(&table, &path).unwrap();

        let contents = std::fs::read_to_string(&path).unwrap();
        assert_eq!(
            contents,
            "word,count,f1.txt.gz,f2.txt.gz\ndog,3,1,2\ncat,2,2,0\n"
        );
    }

    #[test]
    fn empty_table_still_gets_a_header() {
        let table = ResultTable {
            file_names: vec![],
            rows: vec![],
        };
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("out.csv");
        write(&table, &path).unwrap();
        assert_eq!(std::fs::read_to_string(&path).unwrap(), "word,count\n");
    }
}
