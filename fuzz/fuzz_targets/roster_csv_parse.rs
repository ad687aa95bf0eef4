//! Fuzz target for CSV roster parsing.

#![no_main]

use cardmatch::store::roster::from_roster_csv_str;
use libfuzzer_sys::fuzz_target;

fuzz_target!(|data: &[u8]| {
    if data.len() > 1024 * 1024 {
        return;
    }
    if let Ok(text) = std::str::from_utf8(data) {
        let _ = from_roster_csv_str(text);
    }
});
