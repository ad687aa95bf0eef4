#![allow(dead_code)]

use std::cell::{Cell, RefCell};
use std::path::Path;

use cardmatch::store::roster::read_roster;
use cardmatch::store::{CandidateRecord, Collection, IdentifierField, RecordStore, Roster, StoreError};

pub fn fixture_roster() -> Roster {
    read_roster(Path::new("tests/fixtures/roster.json")).expect("read roster fixture")
}

/// Wraps a roster, counting queries and optionally failing one collection.
pub struct ScriptedStore {
    pub roster: Roster,
    pub fail_on: Option<Collection>,
    pub queries: Cell<usize>,
    pub log: RefCell<Vec<(Collection, IdentifierField)>>,
}

impl ScriptedStore {
    pub fn new(roster: Roster) -> Self {
        Self {
            roster,
            fail_on: None,
            queries: Cell::new(0),
            log: RefCell::new(Vec::new()),
        }
    }

    pub fn failing_on(mut self, collection: Collection) -> Self {
        self.fail_on = Some(collection);
        self
    }
}

impl RecordStore for ScriptedStore {
    fn find_by_field(
        &self,
        collection: Collection,
        field: IdentifierField,
        values: &[String],
    ) -> Result<Vec<CandidateRecord>, StoreError> {
        self.queries.set(self.queries.get() + 1);
        self.log.borrow_mut().push((collection, field));
        if self.fail_on == Some(collection) {
            return Err(StoreError::Unavailable(format!("{collection} offline")));
        }
        self.roster.find_by_field(collection, field, values)
    }
}
