//! CSV sink for harvested product records
//!
//! The file is created with its header, then every record is appended in
//! harvest order. An empty harvest still produces a header-only file.

use std::fs::File;
use std::path::Path;

use tracing::info;

use crate::domain::product::ProductRecord;
use crate::infrastructure::export_error::{ExportError, ExportResult};

pub const CSV_HEADERS: [&str; 4] = ["sku", "name", "link", "price"];

pub struct CsvSink {
    writer: csv::Writer<File>,
    rows: usize,
}

impl CsvSink {
    /// Create (or truncate) the file and write the header row
    pub fn create(path: &Path) -> ExportResult<Self> {
        if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
            std::fs::create_dir_all(parent).map_err(|e| ExportError::io(parent, e))?;
        }
        let file = File::create(path).map_err(|e| ExportError::io(path, e))?;
        let mut writer = csv::Writer::from_writer(file);
        writer.write_record(CSV_HEADERS)?;
        Ok(Self { writer, rows: 0 })
    }

    pub fn write_row(&mut self, record: &ProductRecord) -> ExportResult<()> {
        self.writer
            .write_record([&record.sku, &record.name, &record.link, &record.price])?;
        self.rows += 1;
        Ok(())
    }

    /// Flush buffered rows and return how many were written
    pub fn finish(mut self) -> ExportResult<usize> {
        self.writer.flush().map_err(csv::Error::from)?;
        Ok(self.rows)
    }
}

/// Write all records to `path`, returning the number of data rows
pub fn export_records(path: &Path, records: &[ProductRecord]) -> ExportResult<usize> {
    let mut sink = CsvSink::create(path)?;
    for record in records {
        sink.write_row(record)?;
    }
    let rows = sink.finish()?;
    info!("💾 Wrote {} records to {}", rows, path.display());
    Ok(rows)
}
