//! # scoreboard
//!
//! Core library for the tournament scoreboard.
//!
//! This crate provides:
//! - xlog tokenizing with numeric auto-detection
//! - Bitmask decoding of conducts and achievements through external label tables
//! - Derivation of game mode, bonesless and win status
//! - Validation of one game record, and batch ingestion of many
//! - Export of accepted records to NDJSON or TSV
//!
//! ## Pipeline
//!
//! ```ignore
//! use scoreboard::prelude::*;
//!
//! let config = ScoreboardConfig::load("scoreboard.toml")?;
//! let tables = config.load_tables()?;
//! let validator = Validator::new(&tables);
//! let ctx = IngestContext::new("hdf", "tnnt");
//!
//! let file = std::io::BufReader::new(std::fs::File::open("xlogfile")?);
//! let report = ingest_reader(&validator, &ctx, file, config.batch_policy)?;
//! FileSink::new(&config.output_path, Box::new(JsonExporter)).insert_many(&report.records)?;
//! ```
//!
//! Tables are loaded once and only read afterwards, so one `Tables` value can
//! back any number of validators on different threads.

pub mod batch;
pub mod bitmask;
pub mod classify;
pub mod config;
pub mod error;
pub mod export;
pub mod prelude;
pub mod record;
pub mod tables;
pub mod validate;
pub mod xlog;

pub use batch::{BatchPolicy, BatchReport, Rejection, ingest_entries, ingest_reader};
pub use bitmask::{count_labels, join_labels};
pub use classify::{GameMode, derive_bonesless, derive_mode, derive_won};
pub use config::{ScoreboardConfig, ScoreboardConfigBuilder, SourceConfig};
pub use error::{Error, Result};
pub use export::{
    ExportFormat, FileSink, JsonExporter, MemorySink, RecordSink, TsvExporter, format_json_entry,
    format_tsv_header, format_tsv_row,
};
pub use record::{GameRecord, IngestContext};
pub use tables::{
    ACHIEVE_ASCENDED, BitEntry, BitTable, FieldTables, FlagBits, LabelSelector, Tables,
};
pub use validate::{Clock, FixedClock, SystemClock, Validator};
pub use xlog::{Field, FieldRole, RawLogEntry, XlogReader, XlogValue, parse_line};
