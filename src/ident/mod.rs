//! Card identifier normalization.
//!
//! The same physical card UID ends up stored in many shapes depending on
//! which tool enrolled it: decimal, colon-separated hex, bare hex, either
//! case, or with its bytes reversed. This module classifies a raw scan and
//! expands it into every plausible stored form, plus a second ordering of
//! those forms tuned for probing a database.
//!
//! # Example
//!
//! ```
//! use cardmatch::ident::{expand_variants, Classification};
//!
//! let expansion = expand_variants("  2686677508 ");
//! assert_eq!(expansion.classification, Classification::Decimal);
//! assert_eq!(expansion.hex.as_deref(), Some("A0237204"));
//! assert_eq!(expansion.probe_order[0], "04:72:23:A0");
//! ```

mod card_kind;
mod expansion;
pub mod hex;
mod numeral;

pub use card_kind::CardKind;
pub use expansion::{Expansion, VariantSet};
pub use numeral::{decimal_to_hex, hex_to_decimal, NumeralError};

use serde::Serialize;
use std::fmt;

/// Width used for the zero-padded decimal variants.
pub const PADDED_DECIMAL_WIDTH: usize = 20;

/// The shape of a raw scan. Exactly one applies to any input.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Classification {
    /// ASCII digits only.
    Decimal,
    /// Hex digits, optionally colon-separated.
    Hex,
    /// Anything else, matched verbatim.
    Text,
}

impl fmt::Display for Classification {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Classification::Decimal => write!(f, "decimal"),
            Classification::Hex => write!(f, "hex"),
            Classification::Text => write!(f, "text"),
        }
    }
}

/// Classifies a raw scan after trimming surrounding whitespace.
///
/// Rules are tried in order: all digits is `Decimal`, hex digits and colons
/// is `Hex`, everything else (including the empty string) is `Text`.
pub fn classify(raw: &str) -> Classification {
    let value = raw.trim();

    if value.is_empty() {
        Classification::Text
    } else if value.chars().all(|c| c.is_ascii_digit()) {
        Classification::Decimal
    } else if value.chars().all(|c| c.is_ascii_hexdigit() || c == ':') {
        Classification::Hex
    } else {
        Classification::Text
    }
}

/// Expands a raw scan into its full variant list and database probe order.
///
/// Never fails outright: a numeral that cannot be converted yields an
/// [`Expansion`] with `error` set and no variants.
pub fn expand_variants(raw: &str) -> Expansion {
    let input = raw.trim().to_string();
    let classification = classify(&input);

    let result = match classification {
        Classification::Decimal => expand_decimal(&input),
        Classification::Hex => expand_hex(&input),
        Classification::Text => Ok(expand_text(&input)),
    };

    match result {
        Ok(expansion) => expansion,
        Err(error) => Expansion::failed(input, classification, error),
    }
}

fn expand_decimal(decimal: &str) -> Result<Expansion, NumeralError> {
    let hex = hex::pad_to_bytes(&decimal_to_hex(decimal)?);
    let formatted = hex::format_pairs(&hex);
    let hex_lower = hex.to_ascii_lowercase();
    let formatted_lower = formatted.to_ascii_lowercase();
    let padded_left = format!("{:0>width$}", decimal, width = PADDED_DECIMAL_WIDTH);
    let padded_right = format!("{:0<width$}", decimal, width = PADDED_DECIMAL_WIDTH);

    let reversed = if hex.len() == 8 {
        let reversed_hex = hex::reverse_byte_order(&hex);
        let reversed_decimal = hex_to_decimal(&reversed_hex)?;
        Some(Reversed {
            formatted: hex::format_pairs(&reversed_hex),
            hex: reversed_hex,
            decimal: reversed_decimal,
        })
    } else {
        None
    };

    let mut variants = VariantList::default();
    variants.extend(&[
        decimal,
        &hex,
        &formatted,
        &hex_lower,
        &formatted_lower,
        &padded_left,
        &padded_right,
    ]);
    if let Some(rev) = &reversed {
        variants.extend(&[
            &rev.formatted,
            &rev.hex,
            &rev.decimal,
            &rev.formatted.to_ascii_lowercase(),
            &rev.hex.to_ascii_lowercase(),
        ]);
    }

    // Stored data favours the reversed colon form, so it leads when present.
    let mut probe = VariantList::default();
    if let Some(rev) = &reversed {
        probe.extend(&[
            &rev.formatted,
            &rev.hex,
            &rev.formatted.to_ascii_lowercase(),
            &rev.hex.to_ascii_lowercase(),
            &rev.decimal,
        ]);
    }
    probe.extend(&[
        &formatted,
        &hex,
        &formatted_lower,
        &hex_lower,
        decimal,
        &padded_left,
        &padded_right,
    ]);
    let variants = variants.into_vec();
    for variant in &variants {
        probe.push(variant);
    }

    Ok(Expansion {
        input: decimal.to_string(),
        classification: Classification::Decimal,
        decimal: Some(decimal.to_string()),
        reversed_hex: reversed.map(|rev| rev.hex),
        card_kind: Some(CardKind::from_decimal(decimal)),
        hex: Some(hex),
        variants,
        probe_order: probe.into_vec(),
        error: None,
    })
}

fn expand_hex(input: &str) -> Result<Expansion, NumeralError> {
    let canonical = hex::strip_separators(input);
    let decimal = hex_to_decimal(&canonical)?;
    let formatted = hex::format_pairs(&canonical);
    let canonical_lower = canonical.to_ascii_lowercase();
    let formatted_lower = formatted.to_ascii_lowercase();

    let mut variants = VariantList::default();
    variants.extend(&[
        input,
        &formatted,
        &canonical,
        &decimal,
        &formatted_lower,
        &canonical_lower,
    ]);
    let variants = variants.into_vec();

    let mut probe = VariantList::default();
    probe.extend(&[
        &formatted,
        &formatted_lower,
        &canonical,
        &canonical_lower,
        &decimal,
    ]);
    for variant in &variants {
        probe.push(variant);
    }

    Ok(Expansion {
        input: input.to_string(),
        classification: Classification::Hex,
        hex: Some(hex::pad_to_bytes(&canonical)),
        decimal: Some(decimal),
        reversed_hex: None,
        card_kind: None,
        variants,
        probe_order: probe.into_vec(),
        error: None,
    })
}

fn expand_text(input: &str) -> Expansion {
    Expansion {
        input: input.to_string(),
        classification: Classification::Text,
        hex: None,
        decimal: None,
        reversed_hex: None,
        card_kind: None,
        variants: vec![input.to_string()],
        probe_order: vec![input.to_string()],
        error: None,
    }
}

struct Reversed {
    hex: String,
    formatted: String,
    decimal: String,
}

/// Insertion-ordered list that drops repeats.
#[derive(Default)]
struct VariantList(Vec<String>);

impl VariantList {
    fn push(&mut self, value: &str) {
        if !self.0.iter().any(|existing| existing == value) {
            self.0.push(value.to_string());
        }
    }

    fn extend(&mut self, values: &[&str]) {
        for value in values {
            self.push(value);
        }
    }

    fn into_vec(self) -> Vec<String> {
        self.0
    }
}
