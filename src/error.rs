use std::path::PathBuf;
use thiserror::Error;

use crate::ident::NumeralError;
use crate::store::StoreError;

/// The main error type for cardmatch operations.
#[derive(Debug, Error)]
pub enum CardmatchError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Failed to parse roster JSON from {path}: {source}")]
    RosterJsonParse {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    #[error("Failed to parse roster CSV from {path}: {source}")]
    RosterCsvParse {
        path: PathBuf,
        #[source]
        source: csv::Error,
    },

    #[error("Failed to parse probe plan from {path}: {source}")]
    PlanParse {
        path: PathBuf,
        #[source]
        source: serde_yaml::Error,
    },

    #[error("Probe plan has no steps")]
    EmptyPlan,

    #[error("Failed to write attendance row to {path}: {source}")]
    AttendanceWrite {
        path: PathBuf,
        #[source]
        source: csv::Error,
    },

    #[error("Failed to read attendance log {path}: {source}")]
    AttendanceRead {
        path: PathBuf,
        #[source]
        source: csv::Error,
    },

    #[error("Invalid identifier '{input}': {source}")]
    InvalidIdentifier {
        input: String,
        #[source]
        source: NumeralError,
    },

    #[error("No record matched '{input}' after {probes} probe(s)")]
    NoMatch { input: String, probes: usize },

    #[error("Failed to serialize report: {0}")]
    ReportJson(#[source] serde_json::Error),

    #[error("Unsupported format: {0}")]
    UnsupportedFormat(String),

    #[error("{flag} value {value} is out of range")]
    DurationOutOfRange { flag: &'static str, value: u64 },

    #[error("No record store configured (pass --roster)")]
    MissingStore,

    #[error(transparent)]
    Store(#[from] StoreError),
}
