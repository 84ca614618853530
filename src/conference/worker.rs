//! The decision worker's self-rescheduling loop.

use std::sync::Weak;
use std::time::Duration;

use super::Inner;

/// What a single `decision_tick` tells the worker loop to do next.
///
/// Corresponds to `spec.md`'s "return the number of milliseconds to sleep
/// before the next tick; return a negative number to terminate" — modeled as
/// a two-variant enum instead of a sentinel so termination can't be
/// expressed as an ordinary, valid sleep duration.
pub(super) enum TickOutcome {
    Continue(Duration),
    Exit,
}

/// Runs until the conference is dropped (weak upgrade fails) or a tick
/// reports `Exit`. Never holds a strong reference to `Inner` across an
/// `.await`, so it never extends the conference's lifetime.
pub(super) async fn run(inner: Weak<Inner>, generation: u64) {
    loop {
        let Some(strong) = inner.upgrade() else {
            tracing::debug!(generation, "conference dropped, decision worker exiting");
            return;
        };
        let outcome = strong.decision_tick(generation).await;
        drop(strong);

        match outcome {
            TickOutcome::Exit => {
                tracing::debug!(generation, "decision worker standing down");
                return;
            }
            TickOutcome::Continue(sleep) => {
                tokio::time::sleep(sleep).await;
            }
        }
    }
}
