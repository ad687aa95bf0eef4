use chrono::{DateTime, Duration, Utc};

/// Digits a wedge reader emits per card by default.
pub const DEFAULT_WEDGE_DIGITS: usize = 10;
/// Most digits a single wedge scan may carry.
pub const MAX_WEDGE_DIGITS: usize = 64;
/// Longest pause between keystrokes of one scan.
pub const DEFAULT_WEDGE_GAP_MS: u64 = 100;
/// Upper bound the CLI accepts for the keystroke gap.
pub const MAX_WEDGE_GAP_MS: u64 = 10_000;

/// Reassembles scans from an HID keyboard-wedge reader.
///
/// The reader "types" the card number; digits are buffered and released as
/// one scan once `digits` have arrived, or early on Enter. A pause longer
/// than `max_gap` means the buffered keys were not part of a scan and they
/// are dropped.
#[derive(Clone, Debug)]
pub struct WedgeBuffer {
    digits: usize,
    max_gap: Duration,
    buffer: String,
    last_key: Option<DateTime<Utc>>,
}

impl Default for WedgeBuffer {
    fn default() -> Self {
        Self::new(
            DEFAULT_WEDGE_DIGITS,
            Duration::milliseconds(DEFAULT_WEDGE_GAP_MS as i64),
        )
    }
}

impl WedgeBuffer {
    /// `digits` is clamped to `1..=MAX_WEDGE_DIGITS`; a negative `max_gap`
    /// is treated as zero.
    pub fn new(digits: usize, max_gap: Duration) -> Self {
        let digits = digits.clamp(1, MAX_WEDGE_DIGITS);
        Self {
            digits,
            max_gap: max_gap.max(Duration::zero()),
            buffer: String::with_capacity(digits),
            last_key: None,
        }
    }

    /// Feeds one keystroke; returns a complete scan when one is ready.
    pub fn push(&mut self, key: char, now: DateTime<Utc>) -> Option<String> {
        if let Some(last) = self.last_key {
            if now.signed_duration_since(last) > self.max_gap {
                self.buffer.clear();
            }
        }
        self.last_key = Some(now);

        match key {
            '\r' | '\n' => self.take(),
            c if c.is_ascii_digit() => {
                self.buffer.push(c);
                if self.buffer.len() >= self.digits {
                    self.take()
                } else {
                    None
                }
            }
            _ => None,
        }
    }

    /// Digits buffered so far.
    pub fn pending(&self) -> &str {
        &self.buffer
    }

    fn take(&mut self) -> Option<String> {
        if self.buffer.is_empty() {
            None
        } else {
            Some(std::mem::take(&mut self.buffer))
        }
    }
}
