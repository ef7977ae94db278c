//! TSV export format implementation

use crate::error::Result;
use crate::record::GameRecord;

use super::format::ExportFormat;

/// TSV (Tab-Separated Values) exporter
#[derive(Debug, Clone, Copy, Default)]
pub struct TsvExporter;

impl ExportFormat for TsvExporter {
    fn header(&self) -> Option<String> {
        Some(format_tsv_header())
    }

    fn format_row(&self, record: &GameRecord) -> Result<String> {
        Ok(format_tsv_row(record))
    }
}

/// Generate TSV header
pub fn format_tsv_header() -> String {
    [
        "server",
        "variant",
        "version",
        "name",
        "character",
        "points",
        "turns",
        "realtime",
        "wallclock",
        "dlvl",
        "HP",
        "endtime",
        "death",
        "mode",
        "won",
        "nconducts",
        "conducts",
        "achievements",
    ]
    .join("\t")
}

/// Generate one TSV row; tabs and newlines inside values become spaces
pub fn format_tsv_row(record: &GameRecord) -> String {
    let values: Vec<String> = vec![
        record.server.clone(),
        record.variant.clone(),
        record.version.clone(),
        record.name.clone(),
        record.character(),
        record.points.map(|p| p.to_string()).unwrap_or_default(),
        record.turns.to_string(),
        record.realtime.num_seconds().to_string(),
        record.wallclock.num_seconds().to_string(),
        record.dlvl(),
        record.hit_points(),
        record.endtime.timestamp().to_string(),
        record.death.clone(),
        record
            .mode
            .map(|m| m.short_name().to_string())
            .unwrap_or_default(),
        record.won.to_string(),
        record.nconducts.to_string(),
        record.conducts.clone(),
        record.achievements.clone(),
    ];

    values
        .iter()
        .map(|v| v.replace(['\t', '\n', '\r'], " "))
        .collect::<Vec<_>>()
        .join("\t")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::record::tests::sample_record;

    #[test]
    fn test_header_and_row_have_same_width() {
        let header = format_tsv_header();
        let row = format_tsv_row(&sample_record());
        assert_eq!(header.split('\t').count(), row.split('\t').count());
    }

    #[test]
    fn test_row_values() {
        let row = format_tsv_row(&sample_record());
        let fields: Vec<&str> = row.split('\t').collect();
        assert_eq!(fields[4], "Val-Hum-Fem-Neu");
        assert_eq!(fields[9], "-5/53");
        assert_eq!(fields[10], "300/350");
        assert_eq!(fields[13], "normal");
        assert_eq!(fields[14], "true");
    }

    #[test]
    fn test_row_escapes_tabs() {
        let mut record = sample_record();
        record.death = "killed by\ta newt".to_string();
        record.mode = None;
        let row = format_tsv_row(&record);
        let fields: Vec<&str> = row.split('\t').collect();
        assert_eq!(fields.len(), 18);
        assert_eq!(fields[12], "killed by a newt");
        assert_eq!(fields[13], "");
    }

    #[test]
    fn test_format_rows_includes_header() {
        let out = TsvExporter.format_rows(&[sample_record()]).unwrap();
        let mut lines = out.lines();
        assert_eq!(lines.next(), Some(format_tsv_header().as_str()));
        assert!(lines.next().unwrap().starts_with("hdf\ttnnt\t3.6.6\tFoo"));
        assert!(lines.next().is_none());
    }
}
