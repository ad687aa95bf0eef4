//! Attendance rows written after a successful match.
//!
//! The log format is CSV with one row per recorded scan. Rows are appended;
//! the header is written only when the file is new or empty.

use std::fs::{File, OpenOptions};
use std::path::{Path, PathBuf};

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::error::CardmatchError;
use crate::lookup::LookupMatch;
use crate::store::{Collection, IdentifierField};

/// What a scan records.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize, clap::ValueEnum)]
#[serde(rename_all = "snake_case")]
pub enum AttendanceAction {
    #[default]
    CheckIn,
    CheckOut,
}

/// One persisted attendance entry.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct AttendanceRow {
    pub recorded_at: DateTime<Utc>,
    pub collection: Collection,
    pub record_id: String,
    pub name: String,
    /// The scan as received (trimmed).
    pub identifier: String,
    pub matched_field: IdentifierField,
    pub matched_variant: String,
    pub action: AttendanceAction,
}

impl AttendanceRow {
    /// Builds the row for a matched scan.
    pub fn from_match(
        identifier: &str,
        record_match: &LookupMatch,
        action: AttendanceAction,
        recorded_at: DateTime<Utc>,
    ) -> Self {
        Self {
            recorded_at,
            collection: record_match.collection,
            record_id: record_match.record.id.clone(),
            name: record_match.record.name.clone(),
            identifier: identifier.to_string(),
            matched_field: record_match.matched_field,
            matched_variant: record_match.matched_variant.clone(),
            action,
        }
    }
}

/// Destination for attendance rows.
pub trait AttendanceSink {
    fn record(&mut self, row: &AttendanceRow) -> Result<(), CardmatchError>;
}

impl AttendanceSink for Vec<AttendanceRow> {
    fn record(&mut self, row: &AttendanceRow) -> Result<(), CardmatchError> {
        self.push(row.clone());
        Ok(())
    }
}

impl<K: AttendanceSink + ?Sized> AttendanceSink for &mut K {
    fn record(&mut self, row: &AttendanceRow) -> Result<(), CardmatchError> {
        (**self).record(row)
    }
}

impl<K: AttendanceSink + ?Sized> AttendanceSink for Box<K> {
    fn record(&mut self, row: &AttendanceRow) -> Result<(), CardmatchError> {
        (**self).record(row)
    }
}

/// Append-only CSV attendance log.
pub struct CsvAttendanceLog {
    path: PathBuf,
    writer: csv::Writer<File>,
}

impl CsvAttendanceLog {
    /// Opens (creating if needed) a log file for appending.
    pub fn open(path: &Path) -> Result<Self, CardmatchError> {
        let file = OpenOptions::new()
            .create(true)
            .append(true)
            .open(path)
            .map_err(CardmatchError::Io)?;
        let is_empty = file.metadata().map_err(CardmatchError::Io)?.len() == 0;

        let writer = csv::WriterBuilder::new()
            .has_headers(is_empty)
            .from_writer(file);

        Ok(Self {
            path: path.to_path_buf(),
            writer,
        })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl AttendanceSink for CsvAttendanceLog {
    fn record(&mut self, row: &AttendanceRow) -> Result<(), CardmatchError> {
        self.writer
            .serialize(row)
            .map_err(|source| CardmatchError::AttendanceWrite {
                path: self.path.clone(),
                source,
            })?;
        self.writer.flush().map_err(CardmatchError::Io)
    }
}

/// Reads every row of an attendance log.
pub fn read_attendance_log(path: &Path) -> Result<Vec<AttendanceRow>, CardmatchError> {
    let mut reader = csv::Reader::from_path(path).map_err(|source| {
        CardmatchError::AttendanceRead {
            path: path.to_path_buf(),
            source,
        }
    })?;

    reader
        .deserialize()
        .collect::<Result<Vec<AttendanceRow>, _>>()
        .map_err(|source| CardmatchError::AttendanceRead {
            path: path.to_path_buf(),
            source,
        })
}
