//! Fuzz target for identifier expansion.
//!
//! Any UTF-8 input must expand without panicking, and a successful
//! expansion must probe exactly the variants it lists.

#![no_main]

use cardmatch::ident::expand_variants;
use libfuzzer_sys::fuzz_target;

fuzz_target!(|data: &[u8]| {
    if data.len() > 4096 {
        return;
    }
    let Ok(raw) = std::str::from_utf8(data) else {
        return;
    };

    let expansion = expand_variants(raw);
    assert_eq!(expansion.variants.len(), expansion.probe_order.len());
    if expansion.error.is_some() {
        assert!(expansion.variants.is_empty());
    }
});
