//! Parquet output: columnar binary with Snappy compression, same logical
//! schema as the other writers.

use std::fs::File;
use std::path::Path;

use anyhow::Result;
use parquet::arrow::ArrowWriter;
use parquet::basic::Compression;
use parquet::file::properties::WriterProperties;

use super::ResultTable;

pub(super) fn write(table: &ResultTable, path: &Path) -> Result<()> {
    let batch = super::arrow::record_batch(table)?;

    let props = WriterProperties::builder()
        .set_compression(Compression::SNAPPY)
        .build();
    let file = File::create(path)?;
    let mut writer = ArrowWriter::try_new(file, batch.schema(), Some(props))?;
    writer.write(&batch)?;
    writer.close()?;
    Ok(())
}
