//! Dominant-speaker-change observer registration and panic-isolated dispatch.

use std::panic::{catch_unwind, AssertUnwindSafe};
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Mutex;

use crate::Ssrc;

/// A callback invoked whenever the dominant speaker changes.
///
/// `None` means the conference has no dominant speaker (no active
/// participant at all). Callbacks are plain synchronous closures — dispatch
/// never holds the observer list lock across an `.await`, so an observer
/// that blocks only blocks other observers of the same change, not the
/// engine.
pub type DominantSpeakerChanged = dyn Fn(Option<Ssrc>) + Send + Sync + 'static;

/// A token returned by registration, used to unsubscribe later.
///
/// Deliberately opaque: the underlying ID is an implementation detail, not
/// something callers should construct or compare against anything but
/// another `ObserverHandle` from the same list.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct ObserverHandle(u64);

struct Entry {
    id: u64,
    callback: Box<DominantSpeakerChanged>,
}

/// A registry of dominant-speaker-change observers.
///
/// Registration and dispatch are both synchronous and serialized through a
/// single `std::sync::Mutex`, never a `tokio::sync::Mutex`: nothing here
/// ever awaits while holding the lock.
pub(crate) struct ObserverList {
    next_id: AtomicU64,
    entries: Mutex<Vec<Entry>>,
}

impl ObserverList {
    pub(crate) fn new() -> Self {
        Self {
            next_id: AtomicU64::new(0),
            entries: Mutex::new(Vec::new()),
        }
    }

    pub(crate) fn subscribe<F>(&self, callback: F) -> ObserverHandle
    where
        F: Fn(Option<Ssrc>) + Send + Sync + 'static,
    {
        let id = self.next_id.fetch_add(1, Ordering::Relaxed);
        self.entries.lock().unwrap_or_else(|e| e.into_inner()).push(Entry {
            id,
            callback: Box::new(callback),
        });
        ObserverHandle(id)
    }

    pub(crate) fn unsubscribe(&self, handle: ObserverHandle) {
        self.entries
            .lock()
            .unwrap_or_else(|e| e.into_inner())
            .retain(|entry| entry.id != handle.0);
    }

    /// Invoke every registered observer with `dominant`. A callback that
    /// panics is caught and logged; it does not stop the remaining
    /// observers from being notified, and it does not poison the list.
    pub(crate) fn notify(&self, dominant: Option<Ssrc>) {
        let entries = self.entries.lock().unwrap_or_else(|e| e.into_inner());
        for entry in entries.iter() {
            let result = catch_unwind(AssertUnwindSafe(|| (entry.callback)(dominant)));
            if let Err(payload) = result {
                let message = payload
                    .downcast_ref::<&str>()
                    .copied()
                    .or_else(|| payload.downcast_ref::<String>().map(String::as_str))
                    .unwrap_or("<non-string panic payload>");
                tracing::info!(observer_id = entry.id, panic = message, "observer panicked");
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::AtomicUsize;
    use std::sync::Arc;

    #[test]
    fn every_subscriber_is_notified() {
        let list = ObserverList::new();
        let count = Arc::new(AtomicUsize::new(0));
        for _ in 0..3 {
            let c = count.clone();
            list.subscribe(move |_| {
                c.fetch_add(1, Ordering::SeqCst);
            });
        }
        list.notify(Some(7));
        assert_eq!(count.load(Ordering::SeqCst), 3);
    }

    #[test]
    fn unsubscribed_observer_is_not_notified_again() {
        let list = ObserverList::new();
        let count = Arc::new(AtomicUsize::new(0));
        let c = count.clone();
        let handle = list.subscribe(move |_| {
            c.fetch_add(1, Ordering::SeqCst);
        });
        list.notify(Some(1));
        list.unsubscribe(handle);
        list.notify(Some(2));
        assert_eq!(count.load(Ordering::SeqCst), 1);
    }

    #[test]
    fn a_panicking_observer_does_not_stop_the_others() {
        let list = ObserverList::new();
        let count = Arc::new(AtomicUsize::new(0));
        list.subscribe(|_| panic!("boom"));
        let c = count.clone();
        list.subscribe(move |_| {
            c.fetch_add(1, Ordering::SeqCst);
        });
        list.notify(Some(1));
        assert_eq!(count.load(Ordering::SeqCst), 1);
    }
}
