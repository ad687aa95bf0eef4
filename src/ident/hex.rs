//! Hex string shaping: separator stripping, byte-pair formatting and
//! byte-order reversal.

/// Removes `:`, `-` and whitespace separators and uppercases the result.
pub fn strip_separators(hex: &str) -> String {
    hex.chars()
        .filter(|c| !matches!(c, ':' | '-') && !c.is_whitespace())
        .map(|c| c.to_ascii_uppercase())
        .collect()
}

/// Left-pads with a single `0` when the string has an odd number of nibbles.
pub fn pad_to_bytes(hex: &str) -> String {
    if hex.chars().count() % 2 == 1 {
        format!("0{hex}")
    } else {
        hex.to_string()
    }
}

/// Groups an unseparated hex string into colon-separated byte pairs.
///
/// Odd-length input is treated as having an implicit leading zero nibble,
/// so `"ABC"` formats as `"0A:BC"`.
pub fn format_pairs(hex: &str) -> String {
    byte_pairs(&pad_to_bytes(hex)).join(":")
}

/// Reverses the byte order of an unseparated hex string.
///
/// `"A0237204"` becomes `"047223A0"`. Applying it twice to an even-length
/// string returns the original.
pub fn reverse_byte_order(hex: &str) -> String {
    let padded = pad_to_bytes(hex);
    let mut pairs = byte_pairs(&padded);
    pairs.reverse();
    pairs.concat()
}

fn byte_pairs(hex: &str) -> Vec<String> {
    let chars: Vec<char> = hex.chars().collect();
    chars.chunks(2).map(|pair| pair.iter().collect()).collect()
}
