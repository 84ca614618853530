//! Mock conference runner: simulates a handful of participants reporting
//! audio levels and logs every dominant-speaker change.
//!
//! Configuration here is demonstration wiring, not part of the engine's
//! contract (`spec.md` §6 keeps the tuning constants compile-time) — it
//! mirrors how `vc-server`'s `main.rs` reads its own environment.

use std::env;
use std::time::Duration;

use dominant_speaker::Conference;
use tokio::time::sleep;

#[tokio::main]
async fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "dominant_speaker=debug,info".into()),
        )
        .json()
        .init();

    let participant_count: u32 = env::var("DEMO_PARTICIPANTS")
        .ok()
        .and_then(|v| v.parse().ok())
        .unwrap_or(3);

    let conference = Conference::new();

    conference.add_observer(|ssrc| match ssrc {
        Some(ssrc) => tracing::info!(ssrc, "dominant speaker changed"),
        None => tracing::info!("no dominant speaker"),
    });

    tracing::info!(participant_count, "starting mock conference");

    let ssrcs: Vec<u32> = (0..participant_count).map(|i| 0x1000 + i).collect();

    for round in 0..300u32 {
        // Round-robin a speaker into prominence every ~60 rounds (~1.2s at
        // the 20ms cadence below) so the demo visibly switches dominance.
        let active = ssrcs[(round / 60) as usize % ssrcs.len()];
        for &ssrc in &ssrcs {
            let level = if ssrc == active { 110 } else { 5 };
            conference.level_changed(ssrc, level).await;
        }
        sleep(Duration::from_millis(20)).await;
    }

    tracing::info!(
        final_dominant = ?conference.get_dominant_speaker().await,
        "mock conference finished"
    );
}
