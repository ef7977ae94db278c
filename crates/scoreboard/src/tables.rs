//! Read-only mapping tables used to decode bitmask fields.
//!
//! The conduct and achievement tables are JSON documents of the form
//! `{ field: { bit_pattern: label_spec, ... }, ... }` and are loaded once at
//! startup. Document order is kept so decoded label lists are stable.

use std::fs;
use std::path::Path;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value as JsonValue};
use tracing::{debug, info, warn};

use crate::error::{Error, Result};
use crate::xlog::{Field, parse_int_literal};

/// `achieve` bit set when the game was won
pub const ACHIEVE_ASCENDED: u64 = 0x100;

/// Bits of the xlog `flags` field
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct FlagBits {
    pub wizard: u64,
    pub explore: u64,
    pub bonesless: u64,
}

impl Default for FlagBits {
    fn default() -> Self {
        Self {
            wizard: 0x1,
            explore: 0x2,
            bonesless: 0x4,
        }
    }
}

/// Which side of an object label spec holds the labels
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LabelSelector {
    /// `{"label": "description"}` (achievement tables)
    Keys,
    /// `{"id": "label"}` (conduct tables)
    Values,
}

/// Labels reported when any bit of `pattern` is set
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BitEntry {
    pub pattern: u64,
    pub labels: Vec<String>,
}

/// Ordered bit pattern -> labels table for one field
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct BitTable {
    entries: Vec<BitEntry>,
}

impl BitTable {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push<S: Into<String>>(&mut self, pattern: u64, labels: impl IntoIterator<Item = S>) {
        self.entries.push(BitEntry {
            pattern,
            labels: labels.into_iter().map(Into::into).collect(),
        });
    }

    pub fn entries(&self) -> &[BitEntry] {
        &self.entries
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

/// Per-field bit tables, in document order
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FieldTables {
    tables: Vec<(Field, BitTable)>,
}

impl FieldTables {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add or replace the table for `field`
    pub fn insert(&mut self, field: Field, table: BitTable) {
        match self.tables.iter_mut().find(|(f, _)| *f == field) {
            Some((_, existing)) => *existing = table,
            None => self.tables.push((field, table)),
        }
    }

    pub fn get(&self, field: Field) -> Option<&BitTable> {
        self.tables
            .iter()
            .find(|(f, _)| *f == field)
            .map(|(_, t)| t)
    }

    pub fn fields(&self) -> impl Iterator<Item = Field> + '_ {
        self.tables.iter().map(|(f, _)| *f)
    }

    pub fn len(&self) -> usize {
        self.tables.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tables.is_empty()
    }

    /// Parse a table document held in memory
    pub fn from_json_str(json: &str, selector: LabelSelector) -> Result<Self> {
        let doc: JsonValue = serde_json::from_str(json).map_err(|e| table_error("<inline>", e))?;
        Self::from_json_value(doc, selector, "<inline>")
    }

    /// Load a table document from disk
    pub fn load<P: AsRef<Path>>(path: P, selector: LabelSelector) -> Result<Self> {
        let path = path.as_ref();
        let source = path.display().to_string();
        let content = fs::read_to_string(path).map_err(|e| table_error(&source, e))?;
        let doc: JsonValue = serde_json::from_str(&content).map_err(|e| table_error(&source, e))?;
        let tables = Self::from_json_value(doc, selector, &source)?;
        info!("Loaded {} bit tables from {}", tables.len(), source);
        Ok(tables)
    }

    fn from_json_value(doc: JsonValue, selector: LabelSelector, source: &str) -> Result<Self> {
        let JsonValue::Object(fields) = doc else {
            return Err(table_error(source, "top level must be an object"));
        };

        let mut out = Self::new();
        for (name, bits) in fields {
            let Ok(field) = Field::from_str(&name) else {
                warn!("Ignoring table for unknown xlog field {:?} in {}", name, source);
                continue;
            };
            let JsonValue::Object(bits) = bits else {
                return Err(table_error(
                    source,
                    format!("table for {} must be an object", name),
                ));
            };
            out.insert(field, parse_bit_table(bits, selector, source)?);
        }
        Ok(out)
    }
}

fn parse_bit_table(
    bits: Map<String, JsonValue>,
    selector: LabelSelector,
    source: &str,
) -> Result<BitTable> {
    let mut table = BitTable::new();
    for (pattern, spec) in bits {
        let bit = parse_int_literal(&pattern)
            .ok_or_else(|| table_error(source, format!("invalid bit pattern {:?}", pattern)))?;
        table.push(bit, parse_labels(spec, selector, source)?);
    }
    Ok(table)
}

fn parse_labels(spec: JsonValue, selector: LabelSelector, source: &str) -> Result<Vec<String>> {
    let not_a_label =
        |v: &JsonValue| table_error(source, format!("label must be a string, got {}", v));
    match spec {
        JsonValue::String(s) => Ok(vec![s]),
        JsonValue::Array(items) => items
            .into_iter()
            .map(|v| match v {
                JsonValue::String(s) => Ok(s),
                other => Err(not_a_label(&other)),
            })
            .collect(),
        JsonValue::Object(map) => match selector {
            LabelSelector::Keys => Ok(map.into_iter().map(|(k, _)| k).collect()),
            LabelSelector::Values => map
                .into_iter()
                .map(|(_, v)| match v {
                    JsonValue::String(s) => Ok(s),
                    other => Err(not_a_label(&other)),
                })
                .collect(),
        },
        other => Err(table_error(source, format!("unsupported label spec {}", other))),
    }
}

fn table_error(source: &str, message: impl ToString) -> Error {
    Error::TableLoad {
        path: source.to_string(),
        message: message.to_string(),
    }
}

/// All decoding configuration, shared read-only across validations
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Tables {
    pub flags: FlagBits,
    pub ascended_bit: u64,
    pub conducts: FieldTables,
    pub achievements: FieldTables,
}

impl Default for Tables {
    fn default() -> Self {
        Self::new(FieldTables::new(), FieldTables::new())
    }
}

impl Tables {
    pub fn new(conducts: FieldTables, achievements: FieldTables) -> Self {
        Self {
            flags: FlagBits::default(),
            ascended_bit: ACHIEVE_ASCENDED,
            conducts,
            achievements,
        }
    }

    /// Load both tables.
    ///
    /// With `strict` a missing or corrupt file is an error. Without it the
    /// problem is logged and that table stays empty, so no labels are decoded
    /// from it.
    pub fn load<P: AsRef<Path>, Q: AsRef<Path>>(
        conducts_path: P,
        achievements_path: Q,
        strict: bool,
    ) -> Result<Self> {
        let conducts = load_or_degrade(conducts_path.as_ref(), LabelSelector::Values, strict)?;
        let achievements =
            load_or_degrade(achievements_path.as_ref(), LabelSelector::Keys, strict)?;
        Ok(Self::new(conducts, achievements))
    }
}

fn load_or_degrade(path: &Path, selector: LabelSelector, strict: bool) -> Result<FieldTables> {
    match FieldTables::load(path, selector) {
        Ok(tables) => Ok(tables),
        Err(e) if strict => Err(e),
        Err(e) => {
            warn!("{}; continuing without it", e);
            debug!("No labels will be decoded from {}", path.display());
            Ok(FieldTables::new())
        }
    }
}
