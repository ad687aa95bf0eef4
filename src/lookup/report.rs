//! Lookup report types.
//!
//! A report always carries the full expansion of the scanned identifier, so
//! callers that fail to match can show what was tried and offer manual entry.

use serde::Serialize;
use std::fmt;

use crate::ident::Expansion;
use crate::store::{CandidateRecord, Collection, IdentifierField};

/// The result of looking up one scan.
#[derive(Clone, Debug, Serialize)]
pub struct LookupReport {
    pub result: LookupResult,

    /// Number of store queries actually issued.
    pub probes_attempted: usize,

    /// Probes whose store query failed; each counted as a non-match.
    pub failed_probes: Vec<ProbeFailure>,

    pub expansion: Expansion,
}

impl LookupReport {
    pub(crate) fn new(expansion: Expansion) -> Self {
        Self {
            result: LookupResult::NotFound,
            probes_attempted: 0,
            failed_probes: Vec::new(),
            expansion,
        }
    }

    /// Returns true if a record matched.
    pub fn is_match(&self) -> bool {
        matches!(self.result, LookupResult::Matched(_))
    }

    /// Returns the match, if any.
    pub fn matched(&self) -> Option<&LookupMatch> {
        match &self.result {
            LookupResult::Matched(m) => Some(m),
            _ => None,
        }
    }
}

/// Outcome of a probe chain.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum LookupResult {
    /// A record matched at some step.
    Matched(LookupMatch),
    /// Every step ran (or was skipped) without a match.
    NotFound,
    /// The identifier could not be expanded; nothing was probed.
    Invalid,
}

/// Where and how a record matched.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct LookupMatch {
    pub collection: Collection,
    pub matched_field: IdentifierField,
    pub matched_variant: String,
    /// Zero-based index of the plan step that matched.
    pub step: usize,
    pub record: CandidateRecord,
}

/// A probe whose store query returned an error.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct ProbeFailure {
    pub step: usize,
    pub collection: Collection,
    pub field: IdentifierField,
    pub message: String,
}

impl fmt::Display for LookupReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let input = &self.expansion.input;
        let class = self.expansion.classification;

        match &self.result {
            LookupResult::Matched(m) => {
                writeln!(
                    f,
                    "Matched {}/{} ({}) via {} = '{}' at step {}",
                    m.collection,
                    m.record.id,
                    m.record.name,
                    m.matched_field,
                    m.matched_variant,
                    m.step + 1
                )?;
            }
            LookupResult::NotFound => {
                writeln!(
                    f,
                    "No match for '{}' ({}) after {} probe(s)",
                    input, class, self.probes_attempted
                )?;
                writeln!(f, "Tried variants: {}", self.expansion.probe_order.join(", "))?;
            }
            LookupResult::Invalid => {
                let reason = self
                    .expansion
                    .error
                    .as_ref()
                    .map(ToString::to_string)
                    .unwrap_or_default();
                writeln!(f, "Invalid identifier '{}' ({}): {}", input, class, reason)?;
            }
        }

        if !self.failed_probes.is_empty() {
            writeln!(f, "{} probe(s) failed:", self.failed_probes.len())?;
            for failure in &self.failed_probes {
                writeln!(
                    f,
                    "  step {} {}.{}: {}",
                    failure.step + 1,
                    failure.collection,
                    failure.field,
                    failure.message
                )?;
            }
        }

        Ok(())
    }
}
