//! JSON export format implementation

use serde_json::Value as JsonValue;

use crate::error::Result;
use crate::record::GameRecord;

use super::format::ExportFormat;

/// JSON exporter (one object per line, NDJSON format)
#[derive(Debug, Clone, Copy, Default)]
pub struct JsonExporter;

impl ExportFormat for JsonExporter {
    fn header(&self) -> Option<String> {
        None // JSON doesn't need a header
    }

    fn format_row(&self, record: &GameRecord) -> Result<String> {
        Ok(format_json_entry(record)?.to_string())
    }
}

/// Generate the JSON object stored for one game.
///
/// This is the record's own serialization plus the display-only `character`.
pub fn format_json_entry(record: &GameRecord) -> Result<JsonValue> {
    let mut entry = serde_json::to_value(record)?;
    if let JsonValue::Object(map) = &mut entry {
        map.insert("character".to_string(), JsonValue::String(record.character()));
    }
    Ok(entry)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::record::tests::sample_record;
    use crate::xlog::XlogValue;

    #[test]
    fn test_format_json_entry() {
        let record = sample_record();
        let value = format_json_entry(&record).unwrap();
        assert_eq!(value["character"], "Val-Hum-Fem-Neu");
        assert_eq!(value["endtime"], 1_628_100_000);
        assert_eq!(value["realtime"], 50_000);
        assert_eq!(value["mode"], "normal");
        assert_eq!(value["won"], true);
        assert!(value.get("extra").is_none());
    }

    #[test]
    fn test_extra_fields_are_nested() {
        let mut record = sample_record();
        record.extra.insert("lostsoul".to_string(), XlogValue::Int(3));
        let value = format_json_entry(&record).unwrap();
        assert_eq!(value["extra"]["lostsoul"], 3);
    }

    #[test]
    fn test_rows_are_ndjson() {
        let records = vec![sample_record(), sample_record()];
        let out = JsonExporter.format_rows(&records).unwrap();
        let lines: Vec<&str> = out.lines().collect();
        assert_eq!(lines.len(), 2);
        for line in lines {
            let parsed: GameRecord = serde_json::from_str(line).unwrap();
            assert_eq!(parsed, sample_record());
        }
    }
}
