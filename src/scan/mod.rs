//! Scan intake: debouncing, keyboard-wedge reassembly, and the session that
//! turns scans into attendance rows.

mod debounce;
mod session;
mod wedge;

pub use debounce::{Debouncer, DEFAULT_DEBOUNCE_MS, MAX_DEBOUNCE_MS};
pub use session::{ScanOutcome, ScanSession};
pub use wedge::{
    WedgeBuffer, DEFAULT_WEDGE_DIGITS, DEFAULT_WEDGE_GAP_MS, MAX_WEDGE_DIGITS, MAX_WEDGE_GAP_MS,
};
