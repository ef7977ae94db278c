//! Prelude module for convenient imports
//!
//! ```ignore
//! use scoreboard::prelude::*;
//! ```
//!
//! This brings the following into scope:
//!
//! - Configuration: `ScoreboardConfig`, `SourceConfig`, `Tables`
//! - Parsing: `RawLogEntry`, `XlogReader`, `Field`
//! - Validation: `Validator`, `IngestContext`, `GameRecord`, `GameMode`
//! - Batches: `BatchPolicy`, `BatchReport`, `ingest_reader`
//! - Output: `ExportFormat`, `JsonExporter`, `TsvExporter`, `RecordSink`, `FileSink`
//! - Error handling: `Error`, `Result`

pub use crate::batch::{BatchPolicy, BatchReport, ingest_entries, ingest_reader};
pub use crate::classify::GameMode;
pub use crate::config::{ScoreboardConfig, SourceConfig};
pub use crate::error::{Error, Result};
pub use crate::export::{ExportFormat, FileSink, JsonExporter, RecordSink, TsvExporter};
pub use crate::record::{GameRecord, IngestContext};
pub use crate::tables::Tables;
pub use crate::validate::Validator;
pub use crate::xlog::{Field, RawLogEntry, XlogReader};
