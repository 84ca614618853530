//! Testable properties from §8 that are best exercised against the public
//! `Conference` surface rather than as in-module unit tests. History
//! geometry, score positivity, binomial correctness, level clamping, and
//! monotone-time drop (properties 1–5) are unit-tested alongside the code
//! that owns the relevant state (`speaker.rs`, `scoring.rs`); worker
//! quiescence and speaker eviction (9, 10) are exercised end-to-end in
//! `scenarios.rs` (S4, S5).

mod support;

use std::sync::Arc;

use dominant_speaker::{Conference, TokioSpawner};
use support::{advance, pump, TestClock};

fn conference(start_ms: u64) -> (Conference, Arc<TestClock>) {
    let clock = TestClock::new(start_ms);
    let conference = Conference::with_collaborators(clock.clone(), Arc::new(TokioSpawner));
    (conference, clock)
}

/// Property 6 — single-speaker dominance.
#[tokio::test(start_paused = true)]
async fn single_speaker_is_always_dominant() {
    let (conference, clock) = conference(1);
    conference.level_changed(0x1234, 64).await;
    pump(&clock, 400, 20).await;
    assert_eq!(conference.get_dominant_speaker().await, Some(0x1234));
}

/// Property 7 — no-speaker dominance.
#[tokio::test(start_paused = true)]
async fn empty_conference_never_has_a_dominant_speaker() {
    let (conference, clock) = conference(1);
    pump(&clock, 1_000, 50).await;
    assert_eq!(conference.get_dominant_speaker().await, None);
    assert_eq!(conference.speaker_count().await, 0);
}

/// Property 8 — dominance stickiness. Two speakers fed an identical,
/// unchanging pattern never produce a relative activity exceeding the
/// thresholds in either direction, so whichever becomes the provisional
/// incumbent keeps dominance across arbitrarily many further decisions.
#[tokio::test(start_paused = true)]
async fn dominance_is_sticky_without_a_qualifying_challenger() {
    let (conference, clock) = conference(1);

    for _ in 0..20 {
        conference.level_changed(0x1111, 70).await;
        conference.level_changed(0x2222, 70).await;
        advance(&clock, 20).await;
    }
    let incumbent = conference
        .get_dominant_speaker()
        .await
        .expect("a provisional incumbent is chosen once two speakers exist");

    for _ in 0..50 {
        conference.level_changed(0x1111, 70).await;
        conference.level_changed(0x2222, 70).await;
        advance(&clock, 20).await;
        assert_eq!(conference.get_dominant_speaker().await, Some(incumbent));
    }
}
