use std::collections::BTreeSet;

use cardmatch::ident::{
    classify, decimal_to_hex, expand_variants, hex, hex_to_decimal, Classification,
};
use proptest::prelude::*;

mod proptest_helpers;

proptest! {
    #![proptest_config(proptest_helpers::proptest_config())]

    #[test]
    fn decimal_survives_conversion_through_hex(decimal in proptest_helpers::arb_decimal()) {
        let hex = decimal_to_hex(&decimal).expect("decimal to hex");
        prop_assert!(!hex.starts_with('0'));
        prop_assert_eq!(hex_to_decimal(&hex).expect("hex to decimal"), decimal);
    }

    #[test]
    fn conversions_agree_with_native_integers(value in any::<u64>()) {
        prop_assert_eq!(decimal_to_hex(&value.to_string()).unwrap(), format!("{:X}", value));
        prop_assert_eq!(hex_to_decimal(&format!("{:x}", value)).unwrap(), value.to_string());
    }

    #[test]
    fn byte_reversal_is_an_involution(hex_bytes in proptest_helpers::arb_hex_bytes()) {
        let once = hex::reverse_byte_order(&hex_bytes);
        prop_assert_eq!(once.len(), hex_bytes.len());
        prop_assert_eq!(hex::reverse_byte_order(&once), hex_bytes);
    }

    #[test]
    fn stripping_undoes_pair_formatting(raw in proptest_helpers::arb_hex()) {
        let formatted = hex::format_pairs(&raw);
        prop_assert_eq!(
            hex::strip_separators(&formatted),
            hex::pad_to_bytes(&raw.to_ascii_uppercase())
        );
        prop_assert_eq!(hex::format_pairs(&hex::strip_separators(&formatted)), formatted.to_ascii_uppercase());
    }

    #[test]
    fn separated_hex_strips_and_formats_idempotently(raw in proptest_helpers::arb_separated_hex()) {
        let stripped = hex::strip_separators(&raw);
        prop_assert_eq!(stripped.len() % 2, 0);
        prop_assert!(stripped.chars().all(|c| c.is_ascii_digit() || ('A'..='F').contains(&c)));

        let formatted = hex::format_pairs(&stripped);
        prop_assert_eq!(hex::format_pairs(&hex::strip_separators(&formatted)), formatted);
    }

    #[test]
    fn classification_matches_character_rules(raw in proptest_helpers::arb_raw_scan()) {
        let trimmed = raw.trim();
        let expected = if !trimmed.is_empty() && trimmed.chars().all(|c| c.is_ascii_digit()) {
            Classification::Decimal
        } else if !trimmed.is_empty()
            && trimmed.chars().all(|c| c.is_ascii_hexdigit() || c == ':')
        {
            Classification::Hex
        } else {
            Classification::Text
        };
        prop_assert_eq!(classify(&raw), expected);
        prop_assert_eq!(expand_variants(&raw).classification, expected);
    }

    #[test]
    fn probe_order_is_a_reordering_of_variants(raw in proptest_helpers::arb_raw_scan()) {
        let expansion = expand_variants(&raw);
        let variants: BTreeSet<&String> = expansion.variants.iter().collect();
        let probes: BTreeSet<&String> = expansion.probe_order.iter().collect();

        prop_assert_eq!(variants.len(), expansion.variants.len(), "variants repeat");
        prop_assert_eq!(probes.len(), expansion.probe_order.len(), "probe order repeats");
        prop_assert_eq!(variants, probes);
    }

    #[test]
    fn successful_expansion_keeps_trimmed_input_first(raw in proptest_helpers::arb_raw_scan()) {
        let expansion = expand_variants(&raw);
        prop_assert_eq!(&expansion.input, raw.trim());
        if expansion.is_ok() {
            prop_assert_eq!(expansion.variants.first(), Some(&expansion.input));
        }
    }

    #[test]
    fn failed_expansion_has_nothing_to_probe(raw in proptest_helpers::arb_raw_scan()) {
        let expansion = expand_variants(&raw);
        if expansion.error.is_some() {
            prop_assert!(expansion.variants.is_empty());
            prop_assert!(expansion.probe_order.is_empty());
            prop_assert!(expansion.hex.is_none());
        }
    }

    #[test]
    fn surrounding_whitespace_does_not_change_expansion(
        raw in proptest_helpers::arb_raw_scan(),
        before in proptest_helpers::arb_padding(),
        after in proptest_helpers::arb_padding(),
    ) {
        let padded = format!("{before}{raw}{after}");
        prop_assert_eq!(expand_variants(&padded), expand_variants(&raw));
    }

    #[test]
    fn four_byte_decimal_probes_reversed_colon_form_first(
        decimal in proptest_helpers::arb_four_byte_decimal()
    ) {
        let expansion = expand_variants(&decimal);
        let hex_value = expansion.hex.clone().expect("decimal input has hex");

        if hex_value.len() == 8 {
            let reversed = hex::reverse_byte_order(&hex_value);
            prop_assert_eq!(expansion.reversed_hex.as_deref(), Some(reversed.as_str()));
            prop_assert_eq!(&expansion.probe_order[0], &hex::format_pairs(&reversed));
        } else {
            prop_assert!(expansion.reversed_hex.is_none());
            prop_assert_eq!(&expansion.probe_order[0], &hex::format_pairs(&hex_value));
        }
    }

    #[test]
    fn hex_expansion_decimal_matches_canonical_value(hex_bytes in proptest_helpers::arb_hex_bytes()) {
        let expansion = expand_variants(&hex::format_pairs(&hex_bytes));
        // Pure-digit byte strings classify as decimal instead.
        if expansion.classification == Classification::Hex {
            prop_assert_eq!(expansion.hex.as_deref(), Some(hex_bytes.as_str()));
            prop_assert_eq!(
                expansion.decimal.clone().unwrap(),
                hex_to_decimal(&hex_bytes).unwrap()
            );
        }
    }
}
