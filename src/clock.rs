//! The time source the engine consumes rather than owns.

use std::time::{SystemTime, UNIX_EPOCH};

/// A source of monotonically-nondecreasing milliseconds.
///
/// Injected rather than called directly (`SystemTime::now()`) so tests can
/// supply a deterministic, steppable clock instead of wall time.
pub trait Clock: Send + Sync + 'static {
    fn now_ms(&self) -> u64;
}

/// The real wall clock, backed by [`SystemTime`].
#[derive(Clone, Copy, Debug, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now_ms(&self) -> u64 {
        UNIX_EPOCH
            .elapsed()
            .map(|d| d.as_millis() as u64)
            .unwrap_or(0)
    }
}
