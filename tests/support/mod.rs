//! Shared scaffolding for the black-box scenario tests: a steppable fake
//! clock paired with `tokio::time`'s paused virtual timer, so a simulated
//! hour of conference activity runs in milliseconds of real wall time.

use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;
use std::time::Duration;

use dominant_speaker::Clock;

pub struct TestClock(AtomicU64);

impl TestClock {
    pub fn new(start_ms: u64) -> Arc<Self> {
        Arc::new(Self(AtomicU64::new(start_ms)))
    }

    pub fn bump(&self, ms: u64) {
        self.0.fetch_add(ms, Ordering::SeqCst);
    }

    pub fn set(&self, ms: u64) {
        self.0.store(ms, Ordering::SeqCst);
    }
}

impl Clock for TestClock {
    fn now_ms(&self) -> u64 {
        self.0.load(Ordering::SeqCst)
    }
}

/// Advance the fake clock and tokio's paused virtual timer by the same
/// amount, then yield so any worker tick that just became due gets to run.
pub async fn advance(clock: &TestClock, ms: u64) {
    clock.bump(ms);
    tokio::time::advance(Duration::from_millis(ms)).await;
    tokio::task::yield_now().await;
}

/// Jump the fake clock far ahead while only nudging tokio's virtual timer
/// enough to fire the worker's next pending sleep (which is always at most
/// a few hundred milliseconds). Used to simulate multi-hour windows (e.g.
/// the one-hour speaker idle timeout) without iterating every real tick.
pub async fn jump(clock: &TestClock, ms: u64) {
    clock.bump(ms);
    tokio::time::advance(Duration::from_millis(300)).await;
    tokio::task::yield_now().await;
}

/// Repeatedly call `advance` until `total_ms` of simulated time has passed.
pub async fn pump(clock: &TestClock, total_ms: u64, step_ms: u64) {
    let mut elapsed = 0;
    while elapsed < total_ms {
        advance(clock, step_ms).await;
        elapsed += step_ms;
    }
}
