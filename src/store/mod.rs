//! Person records and the stores they are looked up in.
//!
//! Stores are read-only from this crate's point of view: a lookup only ever
//! asks "which records in this collection have this field equal to one of
//! these values".

#[cfg(feature = "remote")]
pub mod remote;
pub mod roster;

pub use roster::Roster;

use serde::{Deserialize, Serialize};
use std::fmt;
use thiserror::Error;

/// A roster collection.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Collection {
    Students,
    Teachers,
}

impl Collection {
    pub fn as_str(&self) -> &'static str {
        match self {
            Collection::Students => "students",
            Collection::Teachers => "teachers",
        }
    }
}

impl fmt::Display for Collection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A record field that may hold a card identifier.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum IdentifierField {
    /// The enrolled card number.
    CardNumber,
    /// The school-issued external student id.
    StudentId,
    /// The record's own primary key.
    Id,
}

impl IdentifierField {
    pub fn as_str(&self) -> &'static str {
        match self {
            IdentifierField::CardNumber => "card_number",
            IdentifierField::StudentId => "student_id",
            IdentifierField::Id => "id",
        }
    }
}

impl fmt::Display for IdentifierField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A student or teacher as stored in the roster.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct CandidateRecord {
    pub id: String,

    #[serde(default)]
    pub name: String,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub card_number: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub student_id: Option<String>,
}

impl CandidateRecord {
    /// Creates a record with no identifier fields set.
    pub fn new(id: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            card_number: None,
            student_id: None,
        }
    }

    /// Sets the card number.
    pub fn with_card_number(mut self, card_number: impl Into<String>) -> Self {
        self.card_number = Some(card_number.into());
        self
    }

    /// Sets the external student id.
    pub fn with_student_id(mut self, student_id: impl Into<String>) -> Self {
        self.student_id = Some(student_id.into());
        self
    }

    /// Returns the value of `field`, treating empty strings as absent.
    pub fn field(&self, field: IdentifierField) -> Option<&str> {
        let value = match field {
            IdentifierField::CardNumber => self.card_number.as_deref(),
            IdentifierField::StudentId => self.student_id.as_deref(),
            IdentifierField::Id => Some(self.id.as_str()),
        };
        value.filter(|v| !v.is_empty())
    }
}

/// Failure of a single store query.
#[derive(Debug, Error)]
pub enum StoreError {
    #[error("store unavailable: {0}")]
    Unavailable(String),

    #[error("request to {url} failed: {message}")]
    Request { url: String, message: String },

    #[error("failed to decode response from {url}: {message}")]
    Decode { url: String, message: String },

    #[error("invalid store URL '{url}': {message}")]
    InvalidUrl { url: String, message: String },
}

/// A read-only source of candidate records.
pub trait RecordStore {
    /// Returns the records in `collection` whose `field` equals any of
    /// `values` exactly.
    fn find_by_field(
        &self,
        collection: Collection,
        field: IdentifierField,
        values: &[String],
    ) -> Result<Vec<CandidateRecord>, StoreError>;
}

impl<S: RecordStore + ?Sized> RecordStore for &S {
    fn find_by_field(
        &self,
        collection: Collection,
        field: IdentifierField,
        values: &[String],
    ) -> Result<Vec<CandidateRecord>, StoreError> {
        (**self).find_by_field(collection, field, values)
    }
}

impl<S: RecordStore + ?Sized> RecordStore for Box<S> {
    fn find_by_field(
        &self,
        collection: Collection,
        field: IdentifierField,
        values: &[String],
    ) -> Result<Vec<CandidateRecord>, StoreError> {
        (**self).find_by_field(collection, field, values)
    }
}
