use chrono::{DateTime, Duration, Utc};

/// Default window in which a repeat read of the same card is dropped.
pub const DEFAULT_DEBOUNCE_MS: u64 = 3_000;
/// Longest window the CLI accepts: one hour.
pub const MAX_DEBOUNCE_MS: u64 = 3_600_000;

/// Suppresses repeat reads of a card left lingering over the reader.
///
/// Only the most recent identifier is remembered; a different card always
/// passes and replaces it.
#[derive(Clone, Debug)]
pub struct Debouncer {
    window: Duration,
    last: Option<(String, DateTime<Utc>)>,
}

impl Default for Debouncer {
    fn default() -> Self {
        Self::new(Duration::milliseconds(DEFAULT_DEBOUNCE_MS as i64))
    }
}

impl Debouncer {
    /// Negative windows are treated as zero.
    pub fn new(window: Duration) -> Self {
        Self {
            window: window.max(Duration::zero()),
            last: None,
        }
    }

    pub fn window(&self) -> Duration {
        self.window
    }

    /// Returns false if `id` was the last identifier processed and `now`
    /// is still inside the window.
    pub fn should_process(&self, id: &str, now: DateTime<Utc>) -> bool {
        match &self.last {
            Some((last_id, at)) => last_id != id || now.signed_duration_since(*at) >= self.window,
            None => true,
        }
    }

    /// Remembers `id` as the last processed identifier.
    pub fn record_processed(&mut self, id: &str, now: DateTime<Utc>) {
        self.last = Some((id.to_string(), now));
    }

    /// Checks and records in one step; returns whether `id` should be processed.
    pub fn admit(&mut self, id: &str, now: DateTime<Utc>) -> bool {
        if !self.should_process(id, now) {
            return false;
        }
        self.record_processed(id, now);
        true
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn t0() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2026, 9, 1, 8, 0, 0).unwrap()
    }

    #[test]
    fn test_repeat_inside_window_is_dropped() {
        let mut debouncer = Debouncer::default();
        assert!(debouncer.admit("2686677508", t0()));
        assert!(!debouncer.admit("2686677508", t0() + Duration::seconds(1)));
    }

    #[test]
    fn test_repeat_after_window_passes() {
        let mut debouncer = Debouncer::default();
        assert!(debouncer.admit("2686677508", t0()));
        assert!(debouncer.admit("2686677508", t0() + Duration::seconds(4)));
    }

    #[test]
    fn test_suppressed_read_does_not_extend_window() {
        let mut debouncer = Debouncer::default();
        assert!(debouncer.admit("A", t0()));
        assert!(!debouncer.admit("A", t0() + Duration::seconds(2)));
        assert!(debouncer.admit("A", t0() + Duration::seconds(3)));
    }

    #[test]
    fn test_negative_window_is_clamped_to_zero() {
        let mut debouncer = Debouncer::new(Duration::milliseconds(-1));
        assert_eq!(debouncer.window(), Duration::zero());
        assert!(debouncer.admit("A", t0()));
        assert!(debouncer.admit("A", t0()));
    }

    #[test]
    fn test_different_card_always_passes() {
        let mut debouncer = Debouncer::default();
        assert!(debouncer.admit("A", t0()));
        assert!(debouncer.admit("B", t0() + Duration::milliseconds(200)));
        // B replaced A, so A passes again
        assert!(debouncer.admit("A", t0() + Duration::milliseconds(400)));
    }
}
