//! Per-SSRC sliding history and the three cached speech-activity scores.

use tokio::sync::Mutex;

use crate::constants::{
    IMMEDIATES_LEN, IMMEDIATE, LONG, LONGS_LEN, LONG_COUNT, MAX_LEVEL, MEDIUM, MEDIUMS_LEN,
    MIN_LEVEL, MIN_SPEECH_ACTIVITY_SCORE, N1_MEDIUM_THRESHOLD, N2_LONG_THRESHOLD,
};
use crate::scoring::{compute_bigs, quantize_level, speech_activity_score};
use crate::Ssrc;

struct SpeakerState {
    /// Slot 0 is the freshest quantized level; new samples shift the rest
    /// toward higher indices.
    immediates: [u8; IMMEDIATES_LEN],
    /// `mediums[j]` counts how many of `immediates`'s matching block exceed
    /// [`N1_MEDIUM_THRESHOLD`].
    mediums: [u8; MEDIUMS_LEN],
    /// `longs[k]` counts how many of `mediums`'s matching block exceed
    /// [`N2_LONG_THRESHOLD`].
    longs: [u8; LONGS_LEN],
    immediate_score: f64,
    medium_score: f64,
    long_score: f64,
    last_level_changed_time: u64,
}

impl SpeakerState {
    fn new(now_ms: u64) -> Self {
        Self {
            immediates: [0; IMMEDIATES_LEN],
            mediums: [0; MEDIUMS_LEN],
            longs: [0; LONGS_LEN],
            immediate_score: MIN_SPEECH_ACTIVITY_SCORE,
            medium_score: MIN_SPEECH_ACTIVITY_SCORE,
            long_score: MIN_SPEECH_ACTIVITY_SCORE,
            last_level_changed_time: now_ms,
        }
    }
}

/// Tracks one conference participant's audio-level history and cached
/// speech-activity scores. Created lazily on first report for its SSRC;
/// all mutators are serialized through a single lock covering the history,
/// the scores, and the last-accepted timestamp together.
pub struct Speaker {
    ssrc: Ssrc,
    state: Mutex<SpeakerState>,
}

impl Speaker {
    pub(crate) fn new(ssrc: Ssrc, now_ms: u64) -> Self {
        Self {
            ssrc,
            state: Mutex::new(SpeakerState::new(now_ms)),
        }
    }

    #[must_use]
    pub fn ssrc(&self) -> Ssrc {
        self.ssrc
    }

    pub(crate) async fn last_level_changed_time(&self) -> u64 {
        self.state.lock().await.last_level_changed_time
    }

    /// Accept a new level report at `time_ms`. Discarded if `time_ms` is
    /// strictly earlier than the last accepted report (out-of-order late
    /// arrival); an equal timestamp is accepted, which is what lets
    /// [`Speaker::level_timed_out`] re-push a zero sample without advancing
    /// the clock.
    pub async fn level_changed(&self, level: i32, time_ms: u64) {
        let mut state = self.state.lock().await;
        if time_ms < state.last_level_changed_time {
            return;
        }
        state.last_level_changed_time = time_ms;

        let clamped = level.clamp(MIN_LEVEL, MAX_LEVEL) as u8;
        let quantized = quantize_level(clamped);

        state.immediates.copy_within(0..IMMEDIATES_LEN - 1, 1);
        state.immediates[0] = quantized;
    }

    /// Push a synthetic zero sample at the last-accepted timestamp, so an
    /// idle speaker's history fades toward silence instead of freezing.
    pub async fn level_timed_out(&self) {
        let time_ms = self.last_level_changed_time().await;
        self.level_changed(MIN_LEVEL, time_ms).await;
    }

    /// Recompute `immediate_score` unconditionally, then cascade into
    /// `medium_score` and `long_score` only when the coarser window
    /// actually changed — a speaker who hasn't newly crossed the medium
    /// threshold never re-runs the long evaluation.
    pub async fn evaluate_speech_activity_scores(&self) {
        let mut state = self.state.lock().await;

        state.immediate_score = speech_activity_score(state.immediates[0], IMMEDIATE);

        if compute_bigs(&state.immediates, &mut state.mediums, N1_MEDIUM_THRESHOLD) {
            state.medium_score = speech_activity_score(state.mediums[0], MEDIUM);

            if compute_bigs(&state.mediums, &mut state.longs, N2_LONG_THRESHOLD) {
                state.long_score = speech_activity_score(state.longs[0], LONG);
            }
        }
    }

    /// All three cached scores, `[immediate, medium, long]`, snapshotted
    /// under one lock acquisition.
    pub(crate) async fn scores(&self) -> [f64; 3] {
        let state = self.state.lock().await;
        [state.immediate_score, state.medium_score, state.long_score]
    }
}

const _: () = assert!(LONG_COUNT == 1, "spec fixes LONG_COUNT at 1");
