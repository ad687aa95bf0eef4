//! Candidate lookup.
//!
//! Walks a [`ProbePlan`] step by step, sending each step's variant set to the
//! store and stopping at the first step that returns a record. A store error
//! on one step is logged and treated as a miss; the chain carries on.

mod plan;
mod report;

pub use plan::{from_plan_yaml_str, read_plan_yaml, ProbePlan, ProbeStep};
pub use report::{LookupMatch, LookupReport, LookupResult, ProbeFailure};

use tracing::{debug, warn};

use crate::ident::{expand_variants, Expansion};
use crate::store::{CandidateRecord, RecordStore};

/// Expands `raw` and looks it up in `store` following `plan`.
pub fn lookup<S: RecordStore + ?Sized>(store: &S, raw: &str, plan: &ProbePlan) -> LookupReport {
    lookup_expansion(store, expand_variants(raw), plan)
}

/// Looks up an already expanded identifier.
pub fn lookup_expansion<S: RecordStore + ?Sized>(
    store: &S,
    expansion: Expansion,
    plan: &ProbePlan,
) -> LookupReport {
    let mut report = LookupReport::new(expansion);

    if let Some(error) = &report.expansion.error {
        debug!(input = %report.expansion.input, %error, "identifier not expandable; skipping lookup");
        report.result = LookupResult::Invalid;
        return report;
    }

    for (index, step) in plan.steps.iter().enumerate() {
        let values: Vec<String> = report
            .expansion
            .variant_set(step.variants)
            .iter()
            .filter(|v| !v.is_empty())
            .cloned()
            .collect();

        if values.is_empty() {
            debug!(step = index, "no variants to send; skipping step");
            continue;
        }

        report.probes_attempted += 1;
        debug!(
            step = index,
            collection = %step.collection,
            field = %step.field,
            variants = values.len(),
            "probing"
        );

        match store.find_by_field(step.collection, step.field, &values) {
            Ok(records) => {
                if let Some(record_match) = pick_match(records, &values, step, index) {
                    debug!(
                        step = index,
                        record = %record_match.record.id,
                        variant = %record_match.matched_variant,
                        "matched"
                    );
                    report.result = LookupResult::Matched(record_match);
                    return report;
                }
            }
            Err(error) => {
                warn!(
                    step = index,
                    collection = %step.collection,
                    field = %step.field,
                    %error,
                    "probe failed; treating as no match"
                );
                report.failed_probes.push(ProbeFailure {
                    step: index,
                    collection: step.collection,
                    field: step.field,
                    message: error.to_string(),
                });
            }
        }
    }

    report.result = LookupResult::NotFound;
    report
}

/// Chooses the record matching the earliest variant in `values`.
///
/// Falls back to the first record when the store matched on something other
/// than exact equality (e.g. a case-insensitive remote column).
fn pick_match(
    records: Vec<CandidateRecord>,
    values: &[String],
    step: &ProbeStep,
    index: usize,
) -> Option<LookupMatch> {
    let exact = values.iter().find_map(|value| {
        records
            .iter()
            .position(|r| r.field(step.field) == Some(value.as_str()))
            .map(|position| (position, value.clone()))
    });

    let (position, matched_variant) = match exact {
        Some(hit) => hit,
        None => {
            let first = records.first()?;
            let variant = first.field(step.field).unwrap_or(values[0].as_str());
            (0, variant.to_string())
        }
    };

    let record = records.into_iter().nth(position)?;
    Some(LookupMatch {
        collection: step.collection,
        matched_field: step.field,
        matched_variant,
        step: index,
        record,
    })
}
