use std::collections::VecDeque;
use std::panic::{catch_unwind, AssertUnwindSafe};
use std::sync::{Arc, Mutex, MutexGuard, PoisonError, Weak};

use crate::domain::AppState;

use super::{patch::StatePatch, reducer::reduce};

type Callback = Arc<dyn Fn(&AppState) + Send + Sync>;

struct Subscriber {
    id: u64,
    /// Version current at subscription time; the replay already covered it.
    since: u64,
    callback: Callback,
}

struct Inner {
    state: AppState,
    version: u64,
    subscribers: Vec<Subscriber>,
    next_id: u64,
    notifying: bool,
    queue: VecDeque<(u64, AppState)>,
}

/// Observable application state. Cloning gives another handle to the same
/// store.
#[derive(Clone)]
pub struct AppStore {
    inner: Arc<Mutex<Inner>>,
}

impl AppStore {
    pub fn new(state: AppState) -> Self {
        Self {
            inner: Arc::new(Mutex::new(Inner {
                state,
                version: 0,
                subscribers: Vec::new(),
                next_id: 0,
                notifying: false,
                queue: VecDeque::new(),
            })),
        }
    }

    pub fn state(&self) -> AppState {
        lock(&self.inner).state.clone()
    }

    /// Merges `patch` into the current state. Subscribers are notified in
    /// registration order when the merged state differs, and not at all when
    /// it doesn't. Returns whether the state changed.
    ///
    /// A call made from inside a subscriber is applied at once but its
    /// notification is queued behind the one in progress, so every
    /// subscriber observes changes in the order they happened.
    pub fn set_state(&self, patch: StatePatch) -> bool {
        let mut guard = lock(&self.inner);
        let next = reduce(guard.state.clone(), patch);
        if next == guard.state {
            return false;
        }
        guard.version += 1;
        let version = guard.version;
        guard.state = next.clone();
        guard.queue.push_back((version, next));
        if guard.notifying {
            return true;
        }
        guard.notifying = true;
        drop(guard);

        self.drain();
        true
    }

    /// Registers `f` and calls it right away with the current state.
    pub fn subscribe(&self, f: impl Fn(&AppState) + Send + Sync + 'static) -> Subscription {
        let callback: Callback = Arc::new(f);
        let (id, current) = {
            let mut guard = lock(&self.inner);
            let id = guard.next_id;
            guard.next_id += 1;
            let since = guard.version;
            guard.subscribers.push(Subscriber {
                id,
                since,
                callback: callback.clone(),
            });
            (id, guard.state.clone())
        };
        invoke(id, &callback, &current);
        Subscription {
            id,
            store: Arc::downgrade(&self.inner),
        }
    }

    pub fn subscriber_count(&self) -> usize {
        lock(&self.inner).subscribers.len()
    }

    fn drain(&self) {
        loop {
            let (version, state, targets) = {
                let mut guard = lock(&self.inner);
                let Some((version, state)) = guard.queue.pop_front() else {
                    guard.notifying = false;
                    return;
                };
                let targets: Vec<(u64, Callback)> = guard
                    .subscribers
                    .iter()
                    .filter(|s| s.since < version)
                    .map(|s| (s.id, s.callback.clone()))
                    .collect();
                (version, state, targets)
            };

            for (id, callback) in targets {
                // A subscriber removed earlier in this fan-out is skipped.
                if !self.is_subscribed(id) {
                    continue;
                }
                tracing::trace!(subscriber = id, version, "notifying");
                invoke(id, &callback, &state);
            }
        }
    }

    fn is_subscribed(&self, id: u64) -> bool {
        lock(&self.inner).subscribers.iter().any(|s| s.id == id)
    }
}

impl Default for AppStore {
    fn default() -> Self {
        Self::new(AppState::default())
    }
}

/// Handle returned by [`AppStore::subscribe`]. Dropping it keeps the
/// subscription alive; call [`Subscription::unsubscribe`] to end it.
#[derive(Debug)]
pub struct Subscription {
    id: u64,
    store: Weak<Mutex<Inner>>,
}

impl Subscription {
    /// Removes this subscription. Safe to call more than once.
    pub fn unsubscribe(&self) {
        if let Some(inner) = self.store.upgrade() {
            lock(&inner).subscribers.retain(|s| s.id != self.id);
        }
    }
}

fn lock(inner: &Mutex<Inner>) -> MutexGuard<'_, Inner> {
    inner.lock().unwrap_or_else(PoisonError::into_inner)
}

fn invoke(id: u64, callback: &Callback, state: &AppState) {
    if catch_unwind(AssertUnwindSafe(|| callback(state))).is_err() {
        tracing::error!(subscriber = id, screen = %state.screen, "state subscriber panicked");
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::ScreenId;
    use std::sync::atomic::{AtomicUsize, Ordering};

    #[test]
    fn no_op_merge_does_not_bump_version() {
        let store = AppStore::default();
        assert!(!store.set_state(StatePatch::screen(ScreenId::Gateway)));
        assert_eq!(lock(&store.inner).version, 0);
        assert!(store.set_state(StatePatch::screen(ScreenId::World)));
        assert_eq!(lock(&store.inner).version, 1);
    }

    #[test]
    fn late_subscriber_skips_states_it_already_replayed() {
        let store = AppStore::default();
        let seen = Arc::new(Mutex::new(Vec::new()));
        let inner_store = store.clone();
        let seen_late = seen.clone();
        let calls = Arc::new(AtomicUsize::new(0));
        let calls2 = calls.clone();

        // The first subscriber registers a second one while the store is
        // fanning out the change to `world`.
        store.subscribe(move |s| {
            if s.screen == ScreenId::World && calls2.fetch_add(1, Ordering::SeqCst) == 0 {
                let seen_late = seen_late.clone();
                inner_store.subscribe(move |s| seen_late.lock().unwrap().push(s.screen));
            }
        });
        store.set_state(StatePatch::screen(ScreenId::World));

        assert_eq!(*seen.lock().unwrap(), vec![ScreenId::World]);
    }
}
