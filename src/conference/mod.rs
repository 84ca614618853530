//! `Conference`: shared state plus the self-terminating decision loop.

mod state;
mod worker;

use std::sync::Arc;
use std::time::Duration;

use tokio::sync::Mutex;

use crate::clock::{Clock, SystemClock};
use crate::constants::{
    DECISION_INTERVAL_MS, DECISION_MAKER_IDLE_TIMEOUT_MS, LEVEL_IDLE_TIMEOUT_MS,
    SPEAKER_IDLE_TIMEOUT_MS,
};
use crate::decision::{decide, Candidate};
use crate::observer::{ObserverHandle, ObserverList};
use crate::spawner::{Spawner, TokioSpawner};
use crate::speaker::Speaker;
use crate::Ssrc;

use state::ConferenceState;
use worker::TickOutcome;

/// A single multipoint conference's dominant-speaker engine.
///
/// Cheap to clone: every clone shares the same underlying state, the same
/// way a `sfu::Room` handle would. Dropping every clone drops the
/// conference's state and, on its next tick, the decision worker observes
/// this through its weak back-reference and exits.
pub struct Conference {
    inner: Arc<Inner>,
}

struct Inner {
    state: Mutex<ConferenceState>,
    observers: ObserverList,
    clock: Arc<dyn Clock>,
    spawner: Arc<dyn Spawner>,
}

impl Conference {
    /// A conference using the real wall clock and the ambient Tokio runtime.
    #[must_use]
    pub fn new() -> Self {
        Self::with_collaborators(Arc::new(SystemClock), Arc::new(TokioSpawner))
    }

    /// A conference using injected collaborators — the production default is
    /// [`Conference::new`]; this constructor exists for hosts that run their
    /// own executor, and for tests that need a deterministic, steppable
    /// clock.
    #[must_use]
    pub fn with_collaborators(clock: Arc<dyn Clock>, spawner: Arc<dyn Spawner>) -> Self {
        let now = clock.now_ms();
        Self {
            inner: Arc::new(Inner {
                state: Mutex::new(ConferenceState::new(now)),
                observers: ObserverList::new(),
                clock,
                spawner,
            }),
        }
    }

    /// The only ingress point. Gets-or-creates the `Speaker` for `ssrc`,
    /// arms the decision worker if needed, then — outside the conference
    /// lock — records the level on the speaker itself.
    pub async fn level_changed(&self, ssrc: Ssrc, level: i32) {
        let now = self.inner.clock.now_ms();
        let speaker = {
            let mut state = self.inner.state.lock().await;
            let speaker = state
                .speakers
                .entry(ssrc)
                .or_insert_with(|| {
                    tracing::debug!(ssrc, "speaker created");
                    Arc::new(Speaker::new(ssrc, now))
                })
                .clone();
            if state.last_level_changed_time < now {
                state.last_level_changed_time = now;
            }
            self.inner.maybe_start_decision_maker(&mut state);
            speaker
        };
        speaker.level_changed(level, now).await;
    }

    /// The current dominant SSRC, or `None` if the conference has no
    /// dominant speaker (no speakers at all, or no decision has run yet).
    pub async fn get_dominant_speaker(&self) -> Option<Ssrc> {
        self.inner.state.lock().await.dominant_ssrc
    }

    /// Register a callback invoked on every dominant-speaker change. Returns
    /// a handle to later pass to [`Conference::remove_observer`].
    pub fn add_observer<F>(&self, callback: F) -> ObserverHandle
    where
        F: Fn(Option<Ssrc>) + Send + Sync + 'static,
    {
        self.inner.observers.subscribe(callback)
    }

    pub fn remove_observer(&self, handle: ObserverHandle) {
        self.inner.observers.unsubscribe(handle);
    }

    /// Number of speakers currently tracked (includes the dominant one).
    pub async fn speaker_count(&self) -> usize {
        self.inner.state.lock().await.speakers.len()
    }

    /// Whether `ssrc` currently has a tracked `Speaker`.
    pub async fn is_tracking(&self, ssrc: Ssrc) -> bool {
        self.inner.state.lock().await.speakers.contains_key(&ssrc)
    }
}

impl Clone for Conference {
    fn clone(&self) -> Self {
        Self {
            inner: self.inner.clone(),
        }
    }
}

impl Default for Conference {
    fn default() -> Self {
        Self::new()
    }
}

impl Inner {
    /// Spawn a decision worker if none is currently associated and there is
    /// at least one speaker to decide over. Idempotent: a worker generation
    /// already present means someone beat us to it (or already decided
    /// nothing needs doing). Spawn failure leaves the association absent,
    /// so the next `level_changed` retries — per §7, no error reaches the
    /// caller.
    fn maybe_start_decision_maker(self: &Arc<Self>, state: &mut ConferenceState) {
        if state.worker_generation.is_some() || state.speakers.is_empty() {
            return;
        }
        state.next_generation += 1;
        let generation = state.next_generation;
        let weak = Arc::downgrade(self);

        match self.spawner.spawn(Box::pin(worker::run(weak, generation))) {
            Ok(()) => {
                state.worker_generation = Some(generation);
                tracing::debug!(generation, "decision worker spawned");
            }
            Err(err) => {
                tracing::warn!(%err, "failed to spawn decision worker");
            }
        }
    }

    /// One pass of the decision worker. Holds the conference lock for the
    /// whole tick except while notifying observers, which happens after the
    /// lock guard returned by this function's inner block is dropped.
    async fn decision_tick(self: &Arc<Self>, generation: u64) -> TickOutcome {
        let now = self.clock.now_ms();
        let mut transition = None;

        let sleep_ms = {
            let mut state = self.state.lock().await;

            if state.worker_generation != Some(generation) {
                return TickOutcome::Exit;
            }

            if state.last_decision_time > 0
                && state
                    .last_decision_time
                    .saturating_sub(state.last_level_changed_time)
                    >= DECISION_MAKER_IDLE_TIMEOUT_MS
            {
                state.worker_generation = None;
                return TickOutcome::Exit;
            }

            let mut level_idle_timeout =
                LEVEL_IDLE_TIMEOUT_MS as i64 - (now as i64 - state.last_level_idle_time as i64);
            if level_idle_timeout <= 0 && state.last_level_idle_time != 0 {
                self.idle_sweep(&mut state, now).await;
                state.last_level_idle_time = now;
                level_idle_timeout = LEVEL_IDLE_TIMEOUT_MS as i64;
            }

            let mut decision_timeout =
                DECISION_INTERVAL_MS as i64 - (now as i64 - state.last_decision_time as i64);
            if decision_timeout <= 0 {
                state.last_decision_time = now;
                transition = self.make_decision(&mut state).await;
                let after = self.clock.now_ms();
                decision_timeout = DECISION_INTERVAL_MS as i64 - (after as i64 - now as i64);
            }

            level_idle_timeout.min(decision_timeout.max(0)).max(0) as u64
        };

        if let Some((_, new_dominant)) = transition {
            self.observers.notify(new_dominant);
        }

        TickOutcome::Continue(Duration::from_millis(sleep_ms))
    }

    /// For each speaker, push a synthetic zero sample if it has been idle
    /// past `LEVEL_IDLE_TIMEOUT_MS`, or evict it entirely once it has been
    /// idle past `SPEAKER_IDLE_TIMEOUT_MS` and is not the dominant speaker.
    async fn idle_sweep(&self, state: &mut ConferenceState, now: u64) {
        let mut evicted = Vec::new();
        for (&ssrc, speaker) in &state.speakers {
            let idle = now.saturating_sub(speaker.last_level_changed_time().await);
            if idle > SPEAKER_IDLE_TIMEOUT_MS && Some(ssrc) != state.dominant_ssrc {
                evicted.push(ssrc);
            } else if idle > LEVEL_IDLE_TIMEOUT_MS {
                speaker.level_timed_out().await;
            }
        }
        for ssrc in evicted {
            state.speakers.remove(&ssrc);
            tracing::debug!(ssrc, "evicted idle speaker");
        }
    }

    /// The global decision rule. Returns `Some((old, new))` only when the
    /// dominant SSRC actually changed, so the caller knows whether to fire
    /// an observer notification.
    async fn make_decision(
        &self,
        state: &mut ConferenceState,
    ) -> Option<(Option<Ssrc>, Option<Ssrc>)> {
        let ssrcs: Vec<Ssrc> = state.speakers.keys().copied().collect();

        let new_dominant = if ssrcs.is_empty() {
            None
        } else if ssrcs.len() == 1 {
            Some(ssrcs[0])
        } else {
            let mut candidates = Vec::with_capacity(ssrcs.len());
            for ssrc in ssrcs {
                let speaker = state.speakers[&ssrc].clone();
                speaker.evaluate_speech_activity_scores().await;
                let [immediate, medium, long] = speaker.scores().await;
                candidates.push(Candidate {
                    ssrc,
                    immediate,
                    medium,
                    long,
                });
            }
            decide(&candidates, state.dominant_ssrc)
        };

        if new_dominant == state.dominant_ssrc {
            return None;
        }
        let old = state.dominant_ssrc;
        state.dominant_ssrc = new_dominant;
        tracing::info!(old = ?old, new = ?new_dominant, "dominant speaker changed");
        Some((old, new_dominant))
    }
}
