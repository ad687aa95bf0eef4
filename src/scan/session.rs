use chrono::{DateTime, Utc};
use std::fmt;
use tracing::{debug, info};

use super::Debouncer;
use crate::attendance::{AttendanceAction, AttendanceRow, AttendanceSink};
use crate::error::CardmatchError;
use crate::lookup::{lookup, LookupReport, ProbePlan};
use crate::store::RecordStore;

/// What happened to one scan.
#[derive(Clone, Debug)]
pub enum ScanOutcome {
    /// Same card again inside the debounce window; nothing was done.
    Duplicate { identifier: String },
    /// Matched and written to the attendance sink.
    Recorded {
        report: LookupReport,
        row: AttendanceRow,
    },
    /// No record matched, or the identifier was unusable.
    Unmatched(LookupReport),
}

impl fmt::Display for ScanOutcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ScanOutcome::Duplicate { identifier } => {
                write!(f, "duplicate {} (ignored)", identifier)
            }
            ScanOutcome::Recorded { row, .. } => write!(
                f,
                "recorded {:?} for {}/{} ({}) via {} = '{}'",
                row.action,
                row.collection,
                row.record_id,
                row.name,
                row.matched_field,
                row.matched_variant
            ),
            ScanOutcome::Unmatched(report) => write!(
                f,
                "unmatched {} ({}, {} variant(s) tried)",
                report.expansion.input,
                report.expansion.classification,
                report.expansion.probe_order.len()
            ),
        }
    }
}

/// Drives scans from intake to attendance rows.
///
/// Each scan runs its probe chain to completion before the next is handled.
pub struct ScanSession<'s, S: ?Sized, K> {
    store: &'s S,
    sink: K,
    plan: ProbePlan,
    debouncer: Debouncer,
    action: AttendanceAction,
}

impl<'s, S, K> ScanSession<'s, S, K>
where
    S: RecordStore + ?Sized,
    K: AttendanceSink,
{
    pub fn new(store: &'s S, sink: K) -> Self {
        Self {
            store,
            sink,
            plan: ProbePlan::default(),
            debouncer: Debouncer::default(),
            action: AttendanceAction::default(),
        }
    }

    pub fn with_plan(mut self, plan: ProbePlan) -> Self {
        self.plan = plan;
        self
    }

    pub fn with_debouncer(mut self, debouncer: Debouncer) -> Self {
        self.debouncer = debouncer;
        self
    }

    pub fn with_action(mut self, action: AttendanceAction) -> Self {
        self.action = action;
        self
    }

    pub fn sink(&self) -> &K {
        &self.sink
    }

    pub fn into_sink(self) -> K {
        self.sink
    }

    /// Handles one raw scan received at `now`.
    ///
    /// # Errors
    /// Only a failing attendance write is an error; lookup misses and store
    /// failures are reported through [`ScanOutcome::Unmatched`].
    pub fn handle_scan(
        &mut self,
        raw: &str,
        now: DateTime<Utc>,
    ) -> Result<ScanOutcome, CardmatchError> {
        let identifier = raw.trim();

        if !self.debouncer.admit(identifier, now) {
            debug!(identifier, "duplicate scan inside debounce window");
            return Ok(ScanOutcome::Duplicate {
                identifier: identifier.to_string(),
            });
        }

        let report = lookup(self.store, identifier, &self.plan);
        let action = self.action;
        let row = report
            .matched()
            .map(|record_match| AttendanceRow::from_match(identifier, record_match, action, now));
        let Some(row) = row else {
            info!(identifier, probes = report.probes_attempted, "no record matched");
            return Ok(ScanOutcome::Unmatched(report));
        };

        self.sink.record(&row)?;
        info!(
            identifier,
            record = %row.record_id,
            collection = %row.collection,
            action = ?row.action,
            "attendance recorded"
        );

        Ok(ScanOutcome::Recorded { report, row })
    }
}
