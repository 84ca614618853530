//! The global three-threshold decision rule with a medium-activity tie-break.
//!
//! Pure and synchronous: callers snapshot every candidate's scores first,
//! then call [`decide`] outside any lock.

use crate::constants::{C1, C2, C3};
use crate::Ssrc;

/// One candidate's cached scores, as snapshotted from a [`crate::speaker::Speaker`].
#[derive(Clone, Copy, Debug)]
pub(crate) struct Candidate {
    pub ssrc: Ssrc,
    pub immediate: f64,
    pub medium: f64,
    pub long: f64,
}

/// Evaluate the global decision rule over every current speaker, given the
/// previously-dominant SSRC (if any).
///
/// If there's no incumbent yet, or the incumbent is no longer among the
/// candidates, an arbitrary candidate (the one iteration happens to reach
/// first) becomes the provisional incumbent — and the challenge loop below
/// still runs against it in that same pass, rather than deferring the first
/// real comparison to the next tick.
///
/// For each non-incumbent candidate `s`, the three *relative activities*
/// `rᵢ = ln(s.scoreᵢ / incumbent.scoreᵢ)` are compared against `(C1, C2,
/// C3)`. A candidate is eligible when all three clear their threshold; among
/// eligible candidates, the one with the largest `r₁` (medium-interval
/// relative activity) wins, and must exceed the running best — seeded at
/// `C2` itself, so the winning margin is always strictly greater than the
/// bare eligibility bar. The incumbent keeps dominance when no candidate is
/// eligible.
pub(crate) fn decide(candidates: &[Candidate], dominant: Option<Ssrc>) -> Option<Ssrc> {
    if candidates.is_empty() {
        return None;
    }

    let incumbent_ssrc = dominant
        .filter(|ssrc| candidates.iter().any(|c| c.ssrc == *ssrc))
        .unwrap_or(candidates[0].ssrc);
    let incumbent = candidates
        .iter()
        .find(|c| c.ssrc == incumbent_ssrc)
        .expect("incumbent_ssrc was just resolved to a present candidate");

    let mut new_dominant = incumbent_ssrc;
    let mut best_c2 = C2;
    for c in candidates {
        if c.ssrc == incumbent_ssrc {
            continue;
        }
        let r0 = (c.immediate / incumbent.immediate).ln();
        let r1 = (c.medium / incumbent.medium).ln();
        let r2 = (c.long / incumbent.long).ln();

        if r0 > C1 && r1 > C2 && r2 > C3 && r1 > best_c2 {
            best_c2 = r1;
            new_dominant = c.ssrc;
        }
    }

    Some(new_dominant)
}
