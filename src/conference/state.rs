//! The fields a single conference lock protects together.

use std::collections::HashMap;
use std::sync::Arc;

use crate::speaker::Speaker;
use crate::Ssrc;

/// Everything `spec.md` §5 names as under one Conference lock: the speakers
/// map, the dominant SSRC, the three timestamps, and the decision worker's
/// association.
pub(super) struct ConferenceState {
    pub(super) speakers: HashMap<Ssrc, Arc<Speaker>>,
    pub(super) dominant_ssrc: Option<Ssrc>,
    pub(super) last_level_changed_time: u64,
    pub(super) last_decision_time: u64,
    /// Seeded from the clock at construction (never a bare `0`) so the
    /// first `decision_tick` sees a small, positive residual instead of a
    /// huge negative one that would otherwise read as "terminate".
    pub(super) last_level_idle_time: u64,
    /// Identifies which spawned worker, if any, currently owns this
    /// conference's decision loop. A worker whose generation no longer
    /// matches this field knows it has been superseded and exits.
    pub(super) worker_generation: Option<u64>,
    pub(super) next_generation: u64,
}

impl ConferenceState {
    pub(super) fn new(now_ms: u64) -> Self {
        Self {
            speakers: HashMap::new(),
            dominant_ssrc: None,
            last_level_changed_time: 0,
            last_decision_time: 0,
            last_level_idle_time: now_ms.max(1),
            worker_generation: None,
            next_generation: 0,
        }
    }
}
