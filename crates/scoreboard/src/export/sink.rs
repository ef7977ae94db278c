//! Persistence seam for accepted records.

use std::fs::{self, OpenOptions};
use std::io::Write;
use std::path::{Path, PathBuf};

use tracing::debug;

use crate::error::Result;
use crate::record::GameRecord;

use super::format::ExportFormat;

/// Receives a batch of validated records
pub trait RecordSink {
    /// Store all records, returning how many were written
    fn insert_many(&mut self, records: &[GameRecord]) -> Result<usize>;
}

/// Appends records to a file in the given format.
///
/// The header, if the format has one, is written only when the file is new or
/// empty. A batch is formatted in full before anything is written.
pub struct FileSink {
    path: PathBuf,
    format: Box<dyn ExportFormat>,
}

impl FileSink {
    pub fn new<P: AsRef<Path>>(path: P, format: Box<dyn ExportFormat>) -> Self {
        Self {
            path: path.as_ref().to_path_buf(),
            format,
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl RecordSink for FileSink {
    fn insert_many(&mut self, records: &[GameRecord]) -> Result<usize> {
        if records.is_empty() {
            return Ok(0);
        }

        let needs_header = fs::metadata(&self.path)
            .map(|m| m.len() == 0)
            .unwrap_or(true);

        let mut content = String::new();
        if needs_header {
            if let Some(header) = self.format.header() {
                content.push_str(&header);
                content.push('\n');
            }
        }
        for record in records {
            content.push_str(&self.format.format_row(record)?);
            content.push('\n');
        }

        if let Some(parent) = self.path.parent() {
            if !parent.as_os_str().is_empty() {
                fs::create_dir_all(parent)?;
            }
        }
        let mut file = OpenOptions::new()
            .create(true)
            .append(true)
            .open(&self.path)?;
        file.write_all(content.as_bytes())?;

        debug!("Wrote {} records to {}", records.len(), self.path.display());
        Ok(records.len())
    }
}

/// Keeps records in memory
#[derive(Debug, Default)]
pub struct MemorySink {
    records: Vec<GameRecord>,
}

impl MemorySink {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn records(&self) -> &[GameRecord] {
        &self.records
    }
}

impl RecordSink for MemorySink {
    fn insert_many(&mut self, records: &[GameRecord]) -> Result<usize> {
        self.records.extend_from_slice(records);
        Ok(records.len())
    }
}
