use serde::Serialize;
use std::fmt;

/// Best guess at the tag family behind a decimal UID, from its digit count.
///
/// Display-only: nothing in the lookup path consults it.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum CardKind {
    /// 10 digits: a 4-byte UID, typically MIFARE Classic 1K/4K.
    FourByteUid,
    /// 18 digits: a 7-byte UID tag.
    SevenByteUid,
    /// 8 digits: an Ultralight-class tag.
    Ultralight,
    /// More than 18 digits.
    LongUid,
    Unknown,
}

impl CardKind {
    /// Classifies a decimal UID string by length.
    pub fn from_decimal(decimal: &str) -> Self {
        match decimal.len() {
            10 => CardKind::FourByteUid,
            18 => CardKind::SevenByteUid,
            8 => CardKind::Ultralight,
            n if n > 18 => CardKind::LongUid,
            _ => CardKind::Unknown,
        }
    }
}

impl fmt::Display for CardKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            CardKind::FourByteUid => "4-byte UID (MIFARE Classic)",
            CardKind::SevenByteUid => "7-byte UID",
            CardKind::Ultralight => "Ultralight-class tag",
            CardKind::LongUid => "long-UID tag",
            CardKind::Unknown => "unknown",
        };
        f.write_str(label)
    }
}
