//! ExportFormat trait definition

use crate::error::Result;
use crate::record::GameRecord;

/// Trait for export format implementations
///
/// Provides a common interface for different export formats (TSV, JSON, etc.)
pub trait ExportFormat {
    /// Returns the header line for the format (empty for formats without headers)
    fn header(&self) -> Option<String>;

    /// Format a single game record
    fn format_row(&self, record: &GameRecord) -> Result<String>;

    /// Format multiple records, header first
    fn format_rows(&self, records: &[GameRecord]) -> Result<String> {
        let mut output = String::new();
        if let Some(header) = self.header() {
            output.push_str(&header);
            output.push('\n');
        }
        for record in records {
            output.push_str(&self.format_row(record)?);
            output.push('\n');
        }
        Ok(output)
    }
}
