//! Probe plans: the ordered `(collection, field, variant set)` steps a lookup
//! walks through.

use std::fs::File;
use std::io::BufReader;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::error::CardmatchError;
use crate::ident::VariantSet;
use crate::store::{Collection, IdentifierField};

/// One query in a probe plan.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProbeStep {
    pub collection: Collection,
    pub field: IdentifierField,
    pub variants: VariantSet,
}

impl ProbeStep {
    pub const fn new(collection: Collection, field: IdentifierField, variants: VariantSet) -> Self {
        Self {
            collection,
            field,
            variants,
        }
    }
}

/// An ordered list of probe steps; earlier steps win.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProbePlan {
    pub steps: Vec<ProbeStep>,
}

impl Default for ProbePlan {
    /// Student card numbers (reordered, then the full list), student ids,
    /// then teacher card numbers.
    fn default() -> Self {
        Self {
            steps: vec![
                ProbeStep::new(
                    Collection::Students,
                    IdentifierField::CardNumber,
                    VariantSet::ProbeOrder,
                ),
                ProbeStep::new(
                    Collection::Students,
                    IdentifierField::CardNumber,
                    VariantSet::All,
                ),
                ProbeStep::new(
                    Collection::Students,
                    IdentifierField::StudentId,
                    VariantSet::Original,
                ),
                ProbeStep::new(
                    Collection::Teachers,
                    IdentifierField::CardNumber,
                    VariantSet::ProbeOrder,
                ),
            ],
        }
    }
}

impl ProbePlan {
    /// Creates a plan from explicit steps.
    ///
    /// # Errors
    /// Returns [`CardmatchError::EmptyPlan`] if `steps` is empty.
    pub fn new(steps: Vec<ProbeStep>) -> Result<Self, CardmatchError> {
        let plan = Self { steps };
        plan.check()?;
        Ok(plan)
    }

    fn check(&self) -> Result<(), CardmatchError> {
        if self.steps.is_empty() {
            Err(CardmatchError::EmptyPlan)
        } else {
            Ok(())
        }
    }
}

/// Reads a probe plan from a YAML file.
///
/// ```yaml
/// steps:
///   - { collection: students, field: card_number, variants: probe_order }
///   - { collection: teachers, field: card_number, variants: all }
/// ```
pub fn read_plan_yaml(path: &Path) -> Result<ProbePlan, CardmatchError> {
    let file = File::open(path).map_err(CardmatchError::Io)?;
    let reader = BufReader::new(file);

    let plan: ProbePlan =
        serde_yaml::from_reader(reader).map_err(|source| CardmatchError::PlanParse {
            path: path.to_path_buf(),
            source,
        })?;
    plan.check()?;
    Ok(plan)
}

/// Parses a probe plan from a YAML string.
pub fn from_plan_yaml_str(yaml: &str) -> Result<ProbePlan, CardmatchError> {
    let plan: ProbePlan =
        serde_yaml::from_str(yaml).map_err(|source| CardmatchError::PlanParse {
            path: PathBuf::from("<string>"),
            source,
        })?;
    plan.check()?;
    Ok(plan)
}
