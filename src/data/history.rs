use std::io::Write;
use std::path::Path;

use anyhow::{Context, Result};
use serde::Serialize;

use super::record::StudentRecord;
use crate::model::label::StatusLabel;

// ---------------------------------------------------------------------------
// Session history
// ---------------------------------------------------------------------------

/// One completed prediction, kept for the current session only.
#[derive(Debug, Clone, PartialEq)]
pub struct HistoryEntry {
    pub record: StudentRecord,
    pub label: StatusLabel,
    pub class_index: i64,
}

/// CSV row layout: the model's input column names, then the outcome.
#[derive(Serialize)]
struct HistoryRow {
    #[serde(rename = "Curricular_units_2nd_sem_grade")]
    sem2_grade: f64,
    #[serde(rename = "Curricular_units_2nd_sem_approved")]
    sem2_approved: u32,
    #[serde(rename = "Curricular_units_1st_sem_grade")]
    sem1_grade: f64,
    #[serde(rename = "Tuition_fees_up_to_date")]
    tuition_up_to_date: u8,
    #[serde(rename = "Curricular_units_1st_sem_approved")]
    sem1_approved: u32,
    #[serde(rename = "Age_at_enrollment")]
    age_at_enrollment: u32,
    predicted_class: i64,
    predicted_label: String,
}

impl From<&HistoryEntry> for HistoryRow {
    fn from(entry: &HistoryEntry) -> Self {
        let r = &entry.record;
        HistoryRow {
            sem2_grade: r.sem2_grade,
            sem2_approved: r.sem2_approved,
            sem1_grade: r.sem1_grade,
            tuition_up_to_date: r.tuition_code(),
            sem1_approved: r.sem1_approved,
            age_at_enrollment: r.age_at_enrollment,
            predicted_class: entry.class_index,
            predicted_label: entry.label.to_string(),
        }
    }
}

/// Write the history as CSV (with header) to any writer.
pub fn write_history<W: Write>(writer: W, entries: &[HistoryEntry]) -> Result<()> {
    let mut csv = csv::Writer::from_writer(writer);
    for (i, entry) in entries.iter().enumerate() {
        csv.serialize(HistoryRow::from(entry))
            .with_context(|| format!("writing history row {i}"))?;
    }
    csv.flush().context("flushing CSV output")?;
    Ok(())
}

/// Export the history to a CSV file.
pub fn export_history(path: &Path, entries: &[HistoryEntry]) -> Result<()> {
    let file = std::fs::File::create(path)
        .with_context(|| format!("creating {}", path.display()))?;
    write_history(file, entries)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn entry() -> HistoryEntry {
        HistoryEntry {
            record: StudentRecord {
                sem2_grade: 15.0,
                sem2_approved: 6,
                sem1_grade: 14.5,
                tuition_up_to_date: true,
                sem1_approved: 5,
                age_at_enrollment: 19,
            },
            label: StatusLabel::Graduate,
            class_index: 2,
        }
    }

    #[test]
    fn csv_has_header_and_row() {
        let mut buf = Vec::new();
        write_history(&mut buf, &[entry()]).unwrap();
        let text = String::from_utf8(buf).unwrap();
        let mut lines = text.lines();
        assert_eq!(
            lines.next().unwrap(),
            "Curricular_units_2nd_sem_grade,Curricular_units_2nd_sem_approved,\
             Curricular_units_1st_sem_grade,Tuition_fees_up_to_date,\
             Curricular_units_1st_sem_approved,Age_at_enrollment,predicted_class,predicted_label"
        );
        assert_eq!(lines.next().unwrap(), "15.0,6,14.5,1,5,19,2,Graduate");
        assert!(lines.next().is_none());
    }

    #[test]
    fn export_writes_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("history.csv");
        export_history(&path, &[entry(), entry()]).unwrap();
        let text = std::fs::read_to_string(&path).unwrap();
        assert_eq!(text.lines().count(), 3);
    }

    #[test]
    fn export_to_missing_directory_fails() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("no/such/dir/history.csv");
        assert!(export_history(&path, &[entry()]).is_err());
    }
}
