//! Record export and persistence.
//!
//! - **format**: the [`ExportFormat`] trait
//! - **json**: NDJSON, one record per line
//! - **tsv**: tab-separated summary table
//! - **sink**: the [`RecordSink`] seam and its file and in-memory implementations

mod format;
mod json;
mod sink;
mod tsv;

pub use format::ExportFormat;
pub use json::{JsonExporter, format_json_entry};
pub use sink::{FileSink, MemorySink, RecordSink};
pub use tsv::{TsvExporter, format_tsv_header, format_tsv_row};
