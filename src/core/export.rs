// CullTracker - core/export.rs
//
// Plain-text summary, CSV, and JSON export of saved tournaments.
// Core layer: writes to any Write trait object; choosing the destination
// file is the caller's job.

use crate::core::model::TournamentRecord;
use crate::util::constants::{SUMMARY_FILE_SUFFIX, WEIGHT_UNIT_LABEL};
use crate::util::error::ExportError;
use std::io::Write;
use std::path::Path;

/// A formatted summary ready to be saved under its suggested name.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SummaryDocument {
    pub file_name: String,
    pub contents: String,
}

/// Suggested file name: spaces become underscores, then `_summary.txt`.
pub fn summary_file_name(tournament_name: &str) -> String {
    format!("{}{SUMMARY_FILE_SUFFIX}", tournament_name.replace(' ', "_"))
}

/// Five-line plain-text summary of a record.
pub fn summary_text(record: &TournamentRecord) -> String {
    let d = &record.draft;
    [
        format!("Tournament: {}", d.tournament_name),
        format!("Location: {}", d.location),
        format!("Date: {}", d.date),
        format!("Total Weight: {} {WEIGHT_UNIT_LABEL}", record.best_five_total),
        format!("Notes: {}", d.notes),
    ]
    .join("\n")
}

/// Build the summary document for a record.
pub fn summary_document(record: &TournamentRecord) -> SummaryDocument {
    SummaryDocument {
        file_name: summary_file_name(&record.draft.tournament_name),
        contents: summary_text(record),
    }
}

/// Write a record's plain-text summary. Returns the number of bytes written.
pub fn export_summary<W: Write>(
    record: &TournamentRecord,
    mut writer: W,
    export_path: &Path,
) -> Result<usize, ExportError> {
    let text = summary_text(record);
    writer
        .write_all(text.as_bytes())
        .and_then(|_| writer.flush())
        .map_err(|e| ExportError::Io {
            path: export_path.to_path_buf(),
            source: e,
        })?;
    Ok(text.len())
}

/// Export the tournament history to CSV, one row per record in save order.
///
/// Writes: tournament, location, date, unit, total_weight_lbs, fish_count,
/// cull_count, saved_at, notes
pub fn export_history_csv<W: Write>(
    records: &[TournamentRecord],
    writer: W,
    export_path: &Path,
) -> Result<usize, ExportError> {
    let mut csv_writer = csv::Writer::from_writer(writer);
    let csv_err = |e| ExportError::Csv {
        path: export_path.to_path_buf(),
        source: e,
    };

    csv_writer
        .write_record([
            "tournament",
            "location",
            "date",
            "unit",
            "total_weight_lbs",
            "fish_count",
            "cull_count",
            "saved_at",
            "notes",
        ])
        .map_err(csv_err)?;

    for record in records {
        let d = &record.draft;
        csv_writer
            .write_record([
                d.tournament_name.as_str(),
                d.location.as_str(),
                d.date.as_str(),
                d.unit.as_str(),
                record.best_five_total.as_str(),
                &record.fish_count().to_string(),
                &d.cull_count().to_string(),
                &record.saved_at.to_rfc3339(),
                d.notes.as_str(),
            ])
            .map_err(csv_err)?;
    }

    csv_writer.flush().map_err(|e| ExportError::Io {
        path: export_path.to_path_buf(),
        source: e,
    })?;

    Ok(records.len())
}

/// Export a single record, including tags, weights and culls, as JSON.
pub fn export_record_json<W: Write>(
    record: &TournamentRecord,
    writer: W,
    export_path: &Path,
) -> Result<(), ExportError> {
    serde_json::to_writer_pretty(writer, record).map_err(|e| ExportError::Json {
        path: export_path.to_path_buf(),
        source: e,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::model::{TagTemplate, TournamentDraft, UnitMode};
    use chrono::{TimeZone, Utc};

    fn make_record(name: &str, total: &str) -> TournamentRecord {
        let mut draft = TournamentDraft::new(&TagTemplate::default_roster(), UnitMode::Decimal);
        draft.tournament_name = name.to_string();
        draft.location = "Lake Fork".to_string();
        draft.date = "2025-04-12".to_string();
        draft.notes = "Windy, fish deep".to_string();
        let first = draft.tags[0].id;
        draft.fish_weights.insert(first, "4.2".to_string());
        draft.cull_history.insert(first, vec!["2.1".to_string()]);
        TournamentRecord {
            draft,
            best_five_total: total.to_string(),
            saved_at: Utc.with_ymd_and_hms(2025, 4, 12, 18, 30, 0).unwrap(),
        }
    }

    #[test]
    fn test_summary_text_has_five_lines_in_order() {
        let text = summary_text(&make_record("Spring Open", "16.00"));
        assert_eq!(
            text,
            "Tournament: Spring Open\n\
             Location: Lake Fork\n\
             Date: 2025-04-12\n\
             Total Weight: 16.00 lbs\n\
             Notes: Windy, fish deep"
        );
    }

    #[test]
    fn test_summary_file_name_replaces_every_space() {
        assert_eq!(summary_file_name("Spring  Bass Open"), "Spring__Bass_Open_summary.txt");
        assert_eq!(summary_file_name(""), "_summary.txt");
    }

    #[test]
    fn test_export_summary_writes_text() {
        let record = make_record("Spring Open", "4.20");
        let mut buf = Vec::new();
        let n = export_summary(&record, &mut buf, Path::new("out.txt")).unwrap();
        let output = String::from_utf8(buf).unwrap();
        assert_eq!(n, output.len());
        assert!(output.contains("Total Weight: 4.20 lbs"));
    }

    #[test]
    fn test_csv_export() {
        let records = vec![make_record("Spring Open", "4.20"), make_record("Fall Classic", "0.00")];
        let mut buf = Vec::new();
        let count = export_history_csv(&records, &mut buf, Path::new("out.csv")).unwrap();
        assert_eq!(count, 2);

        let output = String::from_utf8(buf).unwrap();
        let lines: Vec<_> = output.lines().collect();
        assert_eq!(lines.len(), 3);
        assert!(lines[0].starts_with("tournament,location,date,unit,total_weight_lbs"));
        assert!(lines[1].starts_with("Spring Open,Lake Fork,2025-04-12,decimal,4.20,1,1,"));
        // Notes contain a comma, so the field is quoted.
        assert!(lines[1].ends_with("\"Windy, fish deep\""));
        assert!(lines[2].starts_with("Fall Classic,"));
    }

    #[test]
    fn test_json_export() {
        let record = make_record("Spring Open", "4.20");
        let mut buf = Vec::new();
        export_record_json(&record, &mut buf, Path::new("out.json")).unwrap();

        let value: serde_json::Value = serde_json::from_slice(&buf).unwrap();
        assert_eq!(value["best_five_total"], "4.20");
        assert_eq!(value["draft"]["unit"], "decimal");
        assert_eq!(value["draft"]["tags"][0]["name"], "Orange");
        assert_eq!(value["draft"]["fish_weights"]["1"], "4.2");
    }
}
