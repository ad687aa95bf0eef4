//! In-memory roster store backed by a JSON or CSV export.
//!
//! # JSON layout
//!
//! ```json
//! {
//!   "students": [{ "id": "s1", "name": "Ada", "card_number": "04:72:23:A0", "student_id": "2024-001" }],
//!   "teachers": [{ "id": "t1", "name": "Grace", "card_number": "A0237204" }]
//! }
//! ```
//!
//! # CSV layout
//!
//! One row per person with columns `collection,id,name,card_number,student_id`.
//! Empty cells are read as absent fields.

use std::fs::File;
use std::io::BufReader;
use std::path::Path;

use serde::{Deserialize, Serialize};

use super::{CandidateRecord, Collection, IdentifierField, RecordStore, StoreError};
use crate::error::CardmatchError;

/// A complete roster held in memory.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Roster {
    #[serde(default)]
    pub students: Vec<CandidateRecord>,

    #[serde(default)]
    pub teachers: Vec<CandidateRecord>,
}

/// A single row in the CSV roster layout.
#[derive(Debug, Serialize, Deserialize)]
struct RosterRow {
    collection: Collection,
    id: String,
    #[serde(default)]
    name: String,
    card_number: Option<String>,
    student_id: Option<String>,
}

impl Roster {
    /// Creates an empty roster.
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds a record to `collection`.
    pub fn push(&mut self, collection: Collection, record: CandidateRecord) {
        match collection {
            Collection::Students => self.students.push(record),
            Collection::Teachers => self.teachers.push(record),
        }
    }

    /// Returns the records of one collection.
    pub fn records(&self, collection: Collection) -> &[CandidateRecord] {
        match collection {
            Collection::Students => &self.students,
            Collection::Teachers => &self.teachers,
        }
    }

    /// Total number of records across collections.
    pub fn len(&self) -> usize {
        self.students.len() + self.teachers.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl RecordStore for Roster {
    fn find_by_field(
        &self,
        collection: Collection,
        field: IdentifierField,
        values: &[String],
    ) -> Result<Vec<CandidateRecord>, StoreError> {
        Ok(self
            .records(collection)
            .iter()
            .filter(|record| {
                record
                    .field(field)
                    .is_some_and(|stored| values.iter().any(|v| v == stored))
            })
            .cloned()
            .collect())
    }
}

/// Reads a roster, choosing JSON or CSV from the file extension.
///
/// # Errors
/// Returns an error if the extension is neither `.json` nor `.csv`, or if
/// the file cannot be read or parsed.
pub fn read_roster(path: &Path) -> Result<Roster, CardmatchError> {
    let extension = path
        .extension()
        .and_then(|ext| ext.to_str())
        .map(str::to_ascii_lowercase);

    match extension.as_deref() {
        Some("json") => read_roster_json(path),
        Some("csv") => read_roster_csv(path),
        _ => Err(CardmatchError::UnsupportedFormat(format!(
            "roster '{}' (expected a .json or .csv file)",
            path.display()
        ))),
    }
}

/// Reads a roster from a JSON file.
pub fn read_roster_json(path: &Path) -> Result<Roster, CardmatchError> {
    let file = File::open(path).map_err(CardmatchError::Io)?;
    let reader = BufReader::new(file);

    serde_json::from_reader(reader).map_err(|source| CardmatchError::RosterJsonParse {
        path: path.to_path_buf(),
        source,
    })
}

/// Reads a roster from a CSV file.
pub fn read_roster_csv(path: &Path) -> Result<Roster, CardmatchError> {
    let file = File::open(path).map_err(CardmatchError::Io)?;
    let reader = BufReader::new(file);

    rows_to_roster(csv::Reader::from_reader(reader)).map_err(|source| {
        CardmatchError::RosterCsvParse {
            path: path.to_path_buf(),
            source,
        }
    })
}

/// Parses a JSON roster from a string.
///
/// Useful for testing without file I/O.
pub fn from_roster_json_str(json: &str) -> Result<Roster, serde_json::Error> {
    serde_json::from_str(json)
}

/// Parses a CSV roster from a string.
///
/// Useful for testing without file I/O.
pub fn from_roster_csv_str(csv: &str) -> Result<Roster, csv::Error> {
    rows_to_roster(csv::Reader::from_reader(csv.as_bytes()))
}

fn rows_to_roster<R: std::io::Read>(mut reader: csv::Reader<R>) -> Result<Roster, csv::Error> {
    let mut roster = Roster::new();

    for result in reader.deserialize() {
        let row: RosterRow = result?;
        roster.push(
            row.collection,
            CandidateRecord {
                id: row.id,
                name: row.name,
                card_number: row.card_number,
                student_id: row.student_id,
            },
        );
    }

    Ok(roster)
}

#[cfg(test)]
mod tests {
    use super::*;

    const CSV: &str = "collection,id,name,card_number,student_id
students,s1,Ada,04:72:23:A0,2024-001
students,s2,Alan,,2024-002
teachers,t1,Grace,A0237204,
";

    #[test]
    fn test_csv_roster() {
        let roster = from_roster_csv_str(CSV).expect("parse csv");
        assert_eq!(roster.students.len(), 2);
        assert_eq!(roster.teachers.len(), 1);
        assert_eq!(roster.students[1].card_number, None);
        assert_eq!(roster.teachers[0].student_id, None);
    }

    #[test]
    fn test_json_roster_defaults_missing_collections() {
        let roster =
            from_roster_json_str(r#"{ "students": [{ "id": "s1", "name": "Ada" }] }"#).unwrap();
        assert_eq!(roster.len(), 1);
        assert!(roster.teachers.is_empty());
    }

    #[test]
    fn test_find_by_field_exact_match_only() {
        let roster = from_roster_csv_str(CSV).unwrap();
        let hits = roster
            .find_by_field(
                Collection::Students,
                IdentifierField::CardNumber,
                &["04:72:23:a0".to_string(), "04:72:23:A0".to_string()],
            )
            .unwrap();
        assert_eq!(hits.len(), 1);
        assert_eq!(hits[0].id, "s1");

        let none = roster
            .find_by_field(
                Collection::Teachers,
                IdentifierField::CardNumber,
                &["a0237204".to_string()],
            )
            .unwrap();
        assert!(none.is_empty());
    }

    #[test]
    fn test_empty_values_never_match() {
        let roster = from_roster_csv_str(CSV).unwrap();
        let hits = roster
            .find_by_field(
                Collection::Students,
                IdentifierField::CardNumber,
                &[String::new()],
            )
            .unwrap();
        assert!(hits.is_empty());
    }

    #[test]
    fn test_unknown_extension_rejected() {
        let err = read_roster(Path::new("roster.xml")).unwrap_err();
        assert!(matches!(err, CardmatchError::UnsupportedFormat(_)));
    }
}
