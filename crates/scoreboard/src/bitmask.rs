//! Bitmask decoding against [`BitTable`]s.
//!
//! An entry matches when its pattern shares any bit with the value; it does
//! not need all of its bits set. Labels come out in field order, then table
//! order, then label order within an entry.

use crate::error::Result;
use crate::tables::{BitEntry, BitTable, FieldTables};
use crate::xlog::{Field, RawLogEntry};

impl BitTable {
    /// Entries overlapping `value`
    pub fn matches(&self, value: u64) -> impl Iterator<Item = &BitEntry> {
        self.entries()
            .iter()
            .filter(move |entry| entry.pattern & value != 0)
    }

    /// Flat label list for `value`
    pub fn decode(&self, value: u64) -> Vec<&str> {
        self.matches(value)
            .flat_map(|entry| entry.labels.iter().map(String::as_str))
            .collect()
    }
}

impl FieldTables {
    /// Decode several fields of `entry`, each against its own table.
    ///
    /// Fields absent from the entry or without a table contribute nothing. A
    /// field holding text instead of an integer is an error.
    pub fn decode_fields(&self, entry: &RawLogEntry, fields: &[Field]) -> Result<Vec<String>> {
        let mut labels = Vec::new();
        for &field in fields {
            let Some(value) = entry.bits(field)? else {
                continue;
            };
            if let Some(table) = self.get(field) {
                labels.extend(table.decode(value).into_iter().map(str::to_string));
            }
        }
        Ok(labels)
    }
}

/// Join labels the way they are persisted
pub fn join_labels(labels: &[String]) -> String {
    labels.join(",")
}

/// Number of labels in a persisted, comma-joined list; zero for an empty list
pub fn count_labels(joined: &str) -> usize {
    if joined.is_empty() {
        0
    } else {
        joined.split(',').count()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::Error;
    use crate::xlog::XlogValue;

    fn flag_table() -> BitTable {
        let mut table = BitTable::new();
        table.push(0x1, ["wizard"]);
        table.push(0x2, ["explore"]);
        table
    }

    #[test]
    fn test_decode_any_overlap() {
        let table = flag_table();
        assert_eq!(table.decode(0x3), vec!["wizard", "explore"]);
        assert_eq!(table.decode(0x2), vec!["explore"]);
        assert!(table.decode(0x4).is_empty());
        assert!(table.decode(0).is_empty());

        let mut wide = BitTable::new();
        wide.push(0x6, ["either"]);
        assert_eq!(wide.decode(0x4), vec!["either"]);
    }

    #[test]
    fn test_decode_is_stable() {
        let table = flag_table();
        let first = table.decode(0x3);
        for _ in 0..10 {
            assert_eq!(table.decode(0x3), first);
        }
    }

    #[test]
    fn test_decode_fields_flattens_in_order() {
        let mut conduct = BitTable::new();
        conduct.push(0x1, ["Foodless"]);
        conduct.push(0x4, ["Vegan", "Vegetarian"]);
        let mut achieve = BitTable::new();
        achieve.push(0x1000, ["Blind"]);

        let mut tables = FieldTables::new();
        tables.insert(Field::Achieve, achieve);
        tables.insert(Field::Conduct, conduct);

        let entry: RawLogEntry = [
            ("conduct", XlogValue::Int(0x5)),
            ("achieve", XlogValue::Int(0x1100)),
        ]
        .into_iter()
        .collect();

        let labels = tables.decode_fields(&entry, &Field::CONDUCT_SOURCES).unwrap();
        assert_eq!(labels, vec!["Foodless", "Vegan", "Vegetarian", "Blind"]);
        assert_eq!(join_labels(&labels), "Foodless,Vegan,Vegetarian,Blind");
    }

    #[test]
    fn test_decode_fields_missing_field_contributes_nothing() {
        let mut tables = FieldTables::new();
        tables.insert(Field::Conduct, flag_table());
        let entry = RawLogEntry::new();
        assert!(tables.decode_fields(&entry, &Field::CONDUCT_SOURCES).unwrap().is_empty());
        assert!(FieldTables::new().decode_fields(&entry, &[Field::Conduct]).unwrap().is_empty());
    }

    #[test]
    fn test_decode_fields_rejects_text() {
        let mut tables = FieldTables::new();
        tables.insert(Field::Conduct, flag_table());
        let entry: RawLogEntry = [("conduct", "lots")].into_iter().collect();
        let err = tables.decode_fields(&entry, &[Field::Conduct]).unwrap_err();
        assert!(matches!(err, Error::InvalidField { field: Field::Conduct, .. }));
    }

    #[test]
    fn test_count_labels() {
        assert_eq!(count_labels(""), 0);
        assert_eq!(count_labels("Foodless"), 1);
        assert_eq!(count_labels("Foodless,Vegan"), 2);
    }
}
