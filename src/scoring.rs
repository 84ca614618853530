//! Binomial coefficient, speech-activity score, and the sliding-window
//! coarsening step shared by the immediate→medium and medium→long
//! transitions.

use crate::constants::{IntervalConfig, MIN_SPEECH_ACTIVITY_SCORE, N1};

/// `C(n, r)`, computed with the symmetric identity `C(n,r) = C(n, n-r)` so
/// only the smaller factor is iterated, multiplying then dividing at each
/// step so every intermediate value stays integral.
///
/// Callers guarantee `0 <= r <= n <= 50`.
pub(crate) fn binomial(n: u64, r: u64) -> u64 {
    debug_assert!(r <= n);
    let r = r.min(n - r);
    let mut t: u64 = 1;
    for i in 1..=r {
        t = t * (n - r + i) / i;
    }
    t
}

/// The Volfin–Cohen binomial log-likelihood speech-activity score,
/// `log C(nR, vL) + vL*log(p) + (nR-vL)*log(1-p) - log(λ) + λ*vL`, floored
/// at [`MIN_SPEECH_ACTIVITY_SCORE`] since it's a logarithm argument and
/// denominator elsewhere.
pub(crate) fn speech_activity_score(v_l: u8, cfg: IntervalConfig) -> f64 {
    let n = f64::from(cfg.n_r);
    let v = f64::from(v_l);
    let score = (binomial(u64::from(cfg.n_r), u64::from(v_l)) as f64).ln()
        + v * cfg.p.ln()
        + (n - v) * (1.0 - cfg.p).ln()
        - cfg.lambda.ln()
        + cfg.lambda * v;
    score.max(MIN_SPEECH_ACTIVITY_SCORE)
}

/// Quantize a clamped `0..=127` audio level into its `N1` sub-band.
pub(crate) fn quantize_level(level: u8) -> u8 {
    level / N1
}

/// Partition `littles` into `bigs.len()` equal blocks, count entries
/// strictly greater than `threshold` in each, and write the count into the
/// matching `bigs` slot. Returns `true` iff any slot changed.
pub(crate) fn compute_bigs(littles: &[u8], bigs: &mut [u8], threshold: u8) -> bool {
    debug_assert!(!bigs.is_empty() && littles.len() % bigs.len() == 0);
    let block = littles.len() / bigs.len();
    let mut changed = false;
    for (j, big) in bigs.iter_mut().enumerate() {
        let count = littles[j * block..j * block + block]
            .iter()
            .filter(|&&v| v > threshold)
            .count() as u8;
        if *big != count {
            *big = count;
            changed = true;
        }
    }
    changed
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::constants::{IMMEDIATE, LONG, MEDIUM};

    fn reference_binomial(n: u64, r: u64) -> u64 {
        // Straightforward factorial-ratio reference, fine for n <= 50 in f64
        // and then rounded, used only to cross-check the production path.
        let mut num: f64 = 1.0;
        let mut den: f64 = 1.0;
        let r = r.min(n - r);
        for i in 0..r {
            num *= (n - i) as f64;
            den *= (i + 1) as f64;
        }
        (num / den).round() as u64
    }

    #[test]
    fn binomial_matches_reference_across_the_callable_range() {
        for n in 0..=50u64 {
            for r in 0..=n {
                assert_eq!(
                    binomial(n, r),
                    reference_binomial(n, r),
                    "binomial({n}, {r})"
                );
            }
        }
    }

    #[test]
    fn binomial_is_symmetric() {
        for n in 0..=50u64 {
            for r in 0..=n {
                assert_eq!(binomial(n, r), binomial(n, n - r));
            }
        }
    }

    #[test]
    fn binomial_edges() {
        assert_eq!(binomial(0, 0), 1);
        assert_eq!(binomial(13, 0), 1);
        assert_eq!(binomial(13, 13), 1);
        assert_eq!(binomial(50, 25), 126_410_606_437_752);
    }

    #[test]
    fn quantize_level_buckets() {
        assert_eq!(quantize_level(0), 0);
        assert_eq!(quantize_level(12), 0);
        assert_eq!(quantize_level(13), 1);
        assert_eq!(quantize_level(127), 9);
    }

    #[test]
    fn speech_activity_score_never_below_floor() {
        for cfg in [IMMEDIATE, MEDIUM, LONG] {
            for v in 0..=cfg.n_r {
                assert!(speech_activity_score(v, cfg) >= MIN_SPEECH_ACTIVITY_SCORE);
            }
        }
    }

    #[test]
    fn compute_bigs_counts_entries_above_threshold() {
        let littles = [0u8, 6, 7, 2, 1, 9, 9, 9, 9, 9];
        let mut bigs = [0u8; 2];
        let changed = compute_bigs(&littles, &mut bigs, 5);
        assert!(changed);
        // Block 0: [0,6,7,2,1] -> 6,7 above 5 -> count 2
        // Block 1: [9,9,9,9,9] -> all above 5 -> count 5
        assert_eq!(bigs, [2, 5]);
    }

    #[test]
    fn compute_bigs_reports_no_change_when_stable() {
        let littles = [9u8, 9, 9, 9, 9, 0, 0, 0, 0, 0];
        let mut bigs = [5u8, 0];
        let changed = compute_bigs(&littles, &mut bigs, 5);
        assert!(!changed);
        assert_eq!(bigs, [5, 0]);
    }

    proptest::proptest! {
        #[test]
        fn binomial_is_symmetric_for_any_n_r(n in 0u64..=50, r_frac in 0.0f64..=1.0) {
            let r = (r_frac * n as f64).round() as u64;
            proptest::prop_assert_eq!(binomial(n, r), binomial(n, n - r));
        }

        #[test]
        fn speech_activity_score_is_never_below_the_floor(v_l in 0u8..=13) {
            for cfg in [IMMEDIATE, MEDIUM, LONG] {
                let v = v_l.min(cfg.n_r);
                proptest::prop_assert!(speech_activity_score(v, cfg) >= MIN_SPEECH_ACTIVITY_SCORE);
            }
        }
    }
}
