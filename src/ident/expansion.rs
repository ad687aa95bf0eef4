//! The expansion result type and its text rendering.

use serde::{Deserialize, Serialize};
use std::fmt;

use super::{CardKind, Classification, NumeralError};

/// Which of an expansion's variant lists a probe sends to the store.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum VariantSet {
    /// Variants reordered so the forms most often found in stored data
    /// come first.
    ProbeOrder,
    /// Every variant in generation order.
    All,
    /// Only the trimmed input, untransformed.
    Original,
}

impl fmt::Display for VariantSet {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            VariantSet::ProbeOrder => write!(f, "probe_order"),
            VariantSet::All => write!(f, "all"),
            VariantSet::Original => write!(f, "original"),
        }
    }
}

/// Everything derived from a single raw scan.
///
/// An expansion whose numeral conversion failed carries the error in
/// [`Expansion::error`] and empty variant lists; check [`Expansion::is_ok`]
/// before probing with it.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct Expansion {
    /// The scan with surrounding whitespace removed.
    pub input: String,

    pub classification: Classification,

    /// Canonical uppercase hex, whole bytes, no separators.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub hex: Option<String>,

    /// Decimal value of the identifier.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub decimal: Option<String>,

    /// Byte-reversed hex; only computed for 4-byte UIDs read as decimal.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub reversed_hex: Option<String>,

    /// Advisory tag family guess (decimal input only).
    #[serde(skip_serializing_if = "Option::is_none")]
    pub card_kind: Option<CardKind>,

    /// All variants in generation order, without duplicates.
    pub variants: Vec<String>,

    /// The same variants (plus none extra) in database probe order.
    pub probe_order: Vec<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<NumeralError>,
}

impl Expansion {
    pub(crate) fn failed(input: String, classification: Classification, error: NumeralError) -> Self {
        Self {
            input,
            classification,
            hex: None,
            decimal: None,
            reversed_hex: None,
            card_kind: None,
            variants: Vec::new(),
            probe_order: Vec::new(),
            error: Some(error),
        }
    }

    /// Returns true if the identifier was expanded without error.
    pub fn is_ok(&self) -> bool {
        self.error.is_none()
    }

    /// Returns the variants a probe using `set` should send.
    pub fn variant_set(&self, set: VariantSet) -> &[String] {
        match set {
            VariantSet::ProbeOrder => &self.probe_order,
            VariantSet::All => &self.variants,
            VariantSet::Original => std::slice::from_ref(&self.input),
        }
    }
}

impl fmt::Display for Expansion {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Input:          {}", self.input)?;
        writeln!(f, "Classification: {}", self.classification)?;

        if let Some(error) = &self.error {
            return writeln!(f, "Error:          {}", error);
        }

        if let Some(kind) = self.card_kind {
            writeln!(f, "Card kind:      {}", kind)?;
        }
        if let Some(hex) = &self.hex {
            writeln!(f, "Hex:            {}", hex)?;
        }
        if let Some(decimal) = &self.decimal {
            writeln!(f, "Decimal:        {}", decimal)?;
        }
        if let Some(reversed) = &self.reversed_hex {
            writeln!(f, "Reversed hex:   {}", reversed)?;
        }

        writeln!(f)?;
        writeln!(f, "Variants ({}):", self.variants.len())?;
        for variant in &self.variants {
            writeln!(f, "  - {}", variant)?;
        }

        writeln!(f)?;
        writeln!(f, "Probe order ({}):", self.probe_order.len())?;
        for (i, variant) in self.probe_order.iter().enumerate() {
            writeln!(f, "  {:>2}. {}", i + 1, variant)?;
        }

        Ok(())
    }
}
