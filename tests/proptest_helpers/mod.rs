#![allow(dead_code)]

use proptest::prelude::*;
use proptest::strategy::BoxedStrategy;
use proptest::test_runner::{Config as ProptestConfig, FileFailurePersistence};

pub fn proptest_config() -> ProptestConfig {
    let cases = std::env::var("PROPTEST_CASES")
        .ok()
        .and_then(|v| v.parse::<u32>().ok())
        .unwrap_or(256);

    let mut config = ProptestConfig::with_failure_persistence(FileFailurePersistence::WithSource(
        "proptest-regressions",
    ));
    config.cases = cases;
    config.max_shrink_iters = 1024;
    config
}

/// Decimal numerals without leading zeros, well past u128.
pub fn arb_decimal() -> BoxedStrategy<String> {
    "[1-9][0-9]{0,40}".prop_map(|s| s).boxed()
}

/// Decimal numerals that fit a 4-byte UID, including short ones.
pub fn arb_four_byte_decimal() -> BoxedStrategy<String> {
    (1u32..=u32::MAX).prop_map(|v| v.to_string()).boxed()
}

/// Bare hex of any case and parity.
pub fn arb_hex() -> BoxedStrategy<String> {
    "[0-9a-fA-F]{1,32}".prop_map(|s| s).boxed()
}

/// Whole-byte uppercase hex.
pub fn arb_hex_bytes() -> BoxedStrategy<String> {
    prop::collection::vec(any::<u8>(), 1..16)
        .prop_map(|bytes| bytes.iter().map(|b| format!("{:02X}", b)).collect())
        .boxed()
}

/// Hex with reader-style separators sprinkled between pairs.
pub fn arb_separated_hex() -> BoxedStrategy<String> {
    prop::collection::vec(
        (any::<u8>(), prop::sample::select(vec![":", "-", " ", ""])),
        1..10,
    )
    .prop_map(|pairs| {
        pairs
            .iter()
            .map(|(b, sep)| format!("{:02x}{}", b, sep))
            .collect()
    })
    .boxed()
}

/// Anything a reader or a person at a keyboard might produce.
pub fn arb_raw_scan() -> BoxedStrategy<String> {
    prop_oneof![
        arb_decimal(),
        arb_hex(),
        "[0-9A-Fa-f:]{0,24}",
        "[ -~]{0,24}",
        "\\PC{0,12}",
    ]
    .boxed()
}

/// Surrounding whitespace a terminal or wedge reader might add.
pub fn arb_padding() -> BoxedStrategy<String> {
    "[ \t\r\n]{0,3}".prop_map(|s| s).boxed()
}
