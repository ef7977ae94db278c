use std::collections::BTreeMap;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};

use super::{Field, XlogValue};

/// One xlog line as field name -> value, before validation
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct RawLogEntry {
    fields: BTreeMap<String, XlogValue>,
}

impl RawLogEntry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert a value, returning the previous one for that key
    pub fn insert<K: Into<String>, V: Into<XlogValue>>(
        &mut self,
        key: K,
        value: V,
    ) -> Option<XlogValue> {
        self.fields.insert(key.into(), value.into())
    }

    pub fn get(&self, key: &str) -> Option<&XlogValue> {
        self.fields.get(key)
    }

    pub fn get_field(&self, field: Field) -> Option<&XlogValue> {
        self.fields.get(field.name())
    }

    pub fn contains(&self, field: Field) -> bool {
        self.fields.contains_key(field.name())
    }

    pub fn remove(&mut self, key: &str) -> Option<XlogValue> {
        self.fields.remove(key)
    }

    /// Signed integer value of a field; `None` when absent.
    ///
    /// Negative numbers such as `deathlev=-5` are not numeric literals and
    /// arrive as text, so they are parsed here.
    pub fn int(&self, field: Field) -> Result<Option<i64>> {
        match self.get_field(field) {
            None => Ok(None),
            Some(XlogValue::Int(v)) => i64::try_from(*v)
                .map(Some)
                .map_err(|_| invalid(field, format!("{} is out of range", v))),
            Some(XlogValue::Text(s)) if is_negative_literal(s) => s
                .parse::<i64>()
                .map(Some)
                .map_err(|_| invalid(field, format!("{} is out of range", s))),
            Some(XlogValue::Text(s)) => {
                Err(invalid(field, format!("expected an integer, got {:?}", s)))
            }
        }
    }

    /// Bitmask value of a field over the full 64 bits; an error when it is text.
    pub fn bits(&self, field: Field) -> Result<Option<u64>> {
        match self.get_field(field) {
            None => Ok(None),
            Some(XlogValue::Int(v)) => Ok(Some(*v)),
            Some(XlogValue::Text(s)) => {
                Err(invalid(field, format!("expected a bitmask, got {:?}", s)))
            }
        }
    }

    /// Text value of a field; integers are rendered back to decimal.
    pub fn text(&self, field: Field) -> Option<String> {
        self.get_field(field).map(XlogValue::to_string)
    }

    pub fn require_int(&self, field: Field) -> Result<i64> {
        self.int(field)?.ok_or(Error::MissingField(field))
    }

    pub fn require_text(&self, field: Field) -> Result<String> {
        self.text(field).ok_or(Error::MissingField(field))
    }

    /// Entries whose key is not a known [`Field`]
    pub fn unknown_fields(&self) -> impl Iterator<Item = (&str, &XlogValue)> {
        self.fields
            .iter()
            .filter(|(k, _)| Field::from_str(k).is_err())
            .map(|(k, v)| (k.as_str(), v))
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &XlogValue)> {
        self.fields.iter().map(|(k, v)| (k.as_str(), v))
    }

    pub fn len(&self) -> usize {
        self.fields.len()
    }

    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }
}

fn is_negative_literal(s: &str) -> bool {
    s.strip_prefix('-')
        .is_some_and(|digits| !digits.is_empty() && digits.bytes().all(|b| b.is_ascii_digit()))
}

fn invalid(field: Field, message: String) -> Error {
    Error::InvalidField { field, message }
}

impl<K: Into<String>, V: Into<XlogValue>> FromIterator<(K, V)> for RawLogEntry {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        let mut entry = Self::new();
        for (k, v) in iter {
            entry.insert(k, v);
        }
        entry
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> RawLogEntry {
        [
            ("name", XlogValue::from("Foo")),
            ("turns", XlogValue::Int(1000)),
            ("uid", XlogValue::Int(5)),
            ("role", XlogValue::from("Val")),
            ("mystery", XlogValue::from("x")),
        ]
        .into_iter()
        .collect()
    }

    #[test]
    fn test_typed_accessors() {
        let entry = sample();
        assert_eq!(entry.int(Field::Turns).unwrap(), Some(1000));
        assert_eq!(entry.int(Field::Flags).unwrap(), None);
        assert_eq!(entry.text(Field::Name).as_deref(), Some("Foo"));
        assert_eq!(entry.text(Field::Uid).as_deref(), Some("5"));
        assert!(entry.contains(Field::Role));
        assert!(!entry.contains(Field::Race));
    }

    #[test]
    fn test_int_rejects_text() {
        let entry = sample();
        let err = entry.int(Field::Name).unwrap_err();
        assert!(matches!(
            err,
            Error::InvalidField {
                field: Field::Name,
                ..
            }
        ));
    }

    #[test]
    fn test_int_accepts_negative_text() {
        let entry: RawLogEntry = [("deathlev", "-5"), ("maxlvl", "-"), ("hp", "--3")]
            .into_iter()
            .collect();
        assert_eq!(entry.int(Field::Deathlev).unwrap(), Some(-5));
        assert!(entry.int(Field::Maxlvl).is_err());
        assert!(entry.int(Field::Hp).is_err());
    }

    #[test]
    fn test_int_and_bits_ranges() {
        let entry: RawLogEntry = [
            ("tnntachieve0", XlogValue::Int(1 << 63)),
            ("turns", XlogValue::Int(u64::MAX)),
            ("conduct", XlogValue::from("none")),
        ]
        .into_iter()
        .collect();
        assert_eq!(entry.bits(Field::Tnntachieve0).unwrap(), Some(1 << 63));
        assert_eq!(entry.bits(Field::Achieve).unwrap(), None);
        assert!(entry.bits(Field::Conduct).is_err());
        assert!(matches!(
            entry.int(Field::Turns),
            Err(Error::InvalidField { field: Field::Turns, .. })
        ));
    }

    #[test]
    fn test_require_reports_missing_field() {
        let entry = sample();
        assert!(matches!(
            entry.require_int(Field::Starttime),
            Err(Error::MissingField(Field::Starttime))
        ));
        assert!(matches!(
            entry.require_text(Field::Death),
            Err(Error::MissingField(Field::Death))
        ));
    }

    #[test]
    fn test_unknown_fields() {
        let entry = sample();
        let unknown: Vec<&str> = entry.unknown_fields().map(|(k, _)| k).collect();
        assert_eq!(unknown, vec!["mystery"]);
    }

    #[test]
    fn test_insert_replaces() {
        let mut entry = sample();
        let old = entry.insert("turns", 7u64);
        assert_eq!(old, Some(XlogValue::Int(1000)));
        assert_eq!(entry.int(Field::Turns).unwrap(), Some(7));
        assert_eq!(entry.len(), 5);
    }
}
