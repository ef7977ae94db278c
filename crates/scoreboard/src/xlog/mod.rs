//! xlog parsing.
//!
//! An xlog line is a tab-delimited list of `key=value` fields. Values made of
//! digits only, or `0x` followed by hex digits, become integers; everything
//! else stays text.
//!
//! - **value**: [`XlogValue`] and the numeric auto-detection
//! - **field**: the typed [`Field`] schema (required, stripped, decoded sources)
//! - **entry**: [`RawLogEntry`], one parsed line
//! - **tokenizer**: [`parse_line`] and the lazy [`XlogReader`]

mod entry;
mod field;
mod tokenizer;
mod value;

pub use entry::RawLogEntry;
pub use field::{Field, FieldRole};
pub use tokenizer::{DELIMITER, SEPARATOR, XlogReader, decode_line, parse_line};
pub use value::{XlogValue, parse_int_literal};
