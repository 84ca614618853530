//! Volfin–Cohen tuning constants.
//!
//! These are compile-time by design (`spec.md` §6: "no runtime tuning
//! interface") — the engine exposes no way to change them.

/// Quantization sub-band count: `immediates[i]` is the bucket a 0..=127
/// audio level falls into, `level / N1`.
pub(crate) const N1: u8 = 13;

/// Block size when partitioning `immediates` into `mediums` (also the
/// binomial trial count for the medium-interval score).
pub(crate) const N2: usize = 5;

/// Number of medium windows (also the binomial trial count for the
/// long-interval score).
pub(crate) const N3: usize = 10;

/// Number of long windows. Fixed at 1 by `spec.md` §3.
pub(crate) const LONG_COUNT: usize = 1;

/// `immediates` length: `LONG_COUNT * N3 * N2`.
pub(crate) const IMMEDIATES_LEN: usize = LONG_COUNT * N3 * N2;

/// `mediums` length: `LONG_COUNT * N3`.
pub(crate) const MEDIUMS_LEN: usize = LONG_COUNT * N3;

/// `longs` length: `LONG_COUNT`.
pub(crate) const LONGS_LEN: usize = LONG_COUNT;

/// An `immediates` slot counts as "active" in its medium window when it
/// exceeds this threshold: `N1/2 - 1`.
pub(crate) const N1_MEDIUM_THRESHOLD: u8 = N1 / 2 - 1;

/// A `mediums` slot counts as "active" in the long window when it exceeds
/// this threshold: `N2 - 1`.
pub(crate) const N2_LONG_THRESHOLD: u8 = (N2 - 1) as u8;

/// Lowest accepted audio level; inputs below this are clamped.
pub(crate) const MIN_LEVEL: i32 = 0;

/// Highest accepted audio level; inputs above this are clamped.
pub(crate) const MAX_LEVEL: i32 = 127;

/// Speech-activity scores are never allowed below this floor, since they
/// are logarithm arguments and appear in denominators.
pub(crate) const MIN_SPEECH_ACTIVITY_SCORE: f64 = 1e-10;

/// Relative-activity threshold against the immediate-interval score.
pub(crate) const C1: f64 = 3.0;

/// Relative-activity threshold against the medium-interval score; also the
/// tie-break quantity among eligible challengers.
pub(crate) const C2: f64 = 2.0;

/// Relative-activity threshold against the long-interval score.
pub(crate) const C3: f64 = 0.0;

/// How often an idle speaker is fed a synthetic zero sample so its history
/// fades toward silence instead of freezing.
pub(crate) const LEVEL_IDLE_TIMEOUT_MS: u64 = 40;

/// A non-dominant speaker that hasn't reported a level in this long is
/// evicted from the conference.
pub(crate) const SPEAKER_IDLE_TIMEOUT_MS: u64 = 3_600_000;

/// Nominal cadence of the global decision rule.
pub(crate) const DECISION_INTERVAL_MS: u64 = 300;

/// The decision worker stands down after this long without any accepted
/// level report, measured as of the last time a decision actually ran.
pub(crate) const DECISION_MAKER_IDLE_TIMEOUT_MS: u64 = 15_000;

/// Parameters of one of the three binomial speech-activity scoring scales.
#[derive(Clone, Copy, Debug)]
pub(crate) struct IntervalConfig {
    /// Binomial trial count.
    pub n_r: u8,
    /// Per-trial success probability.
    pub p: f64,
    /// Exponential-decay rate term.
    pub lambda: f64,
}

pub(crate) const IMMEDIATE: IntervalConfig = IntervalConfig {
    n_r: 13,
    p: 0.5,
    lambda: 0.78,
};

pub(crate) const MEDIUM: IntervalConfig = IntervalConfig {
    n_r: 5,
    p: 0.5,
    lambda: 24.0,
};

pub(crate) const LONG: IntervalConfig = IntervalConfig {
    n_r: 10,
    p: 0.5,
    lambda: 47.0,
};
