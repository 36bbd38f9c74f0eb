//! Lifetime of the background work owned by one screen.

use std::collections::HashMap;
use std::future::Future;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};
use tokio::task::{AbortHandle, JoinSet};

/// Proof that a subscription still owns its slot.
///
/// Replacing a slot advances its generation, so tickets handed to earlier
/// subscriptions stop being current even if their task has not yet observed
/// the abort.
#[derive(Debug, Clone)]
pub struct SlotTicket {
    generation: Option<(Arc<AtomicU64>, u64)>,
}

impl SlotTicket {
    /// Returns a ticket that is always current, for work outside any slot.
    #[must_use]
    pub const fn detached() -> Self {
        Self { generation: None }
    }

    /// Returns `true` while no later subscription has taken the slot.
    #[must_use]
    pub fn is_current(&self) -> bool {
        self.generation
            .as_ref()
            .is_none_or(|(counter, issued)| counter.load(Ordering::SeqCst) == *issued)
    }
}

#[derive(Debug, Default)]
struct Slot {
    generation: Arc<AtomicU64>,
    handle: Option<AbortHandle>,
}

impl Slot {
    fn advance(&self) -> SlotTicket {
        let issued = self.generation.fetch_add(1, Ordering::SeqCst).wrapping_add(1);
        SlotTicket {
            generation: Some((Arc::clone(&self.generation), issued)),
        }
    }
}

/// Owner of a screen's subscriptions and in-flight writes.
///
/// Subscriptions live in keyed slots: starting a new subscription under an
/// occupied key invalidates the previous one's [`SlotTicket`] and aborts it,
/// so only the latest request for a given payload folds into state. Writes
/// run to completion unless the scope is dropped, which aborts everything it
/// owns.
#[derive(Debug, Default)]
pub struct ScreenScope {
    slots: Mutex<HashMap<&'static str, Slot>>,
    writes: Mutex<JoinSet<()>>,
}

impl ScreenScope {
    /// Creates an empty scope.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Runs the subscription built by `start` in the slot named `key`.
    ///
    /// The previous occupant is invalidated and aborted before the new one is
    /// spawned. `start` receives the ticket the new subscription must check
    /// before folding anything.
    ///
    /// Must be called from within a Tokio runtime.
    pub fn replace<F, Fut>(&self, key: &'static str, start: F)
    where
        F: FnOnce(SlotTicket) -> Fut,
        Fut: Future<Output = ()> + Send + 'static,
    {
        let mut slots = lock(&self.slots);
        let slot = slots.entry(key).or_default();
        let ticket = slot.advance();
        if let Some(previous) = slot.handle.take() {
            tracing::debug!(slot = key, "superseded subscription aborted");
            previous.abort();
        }
        slot.handle = Some(tokio::spawn(start(ticket)).abort_handle());
    }

    /// Runs a one-shot write owned by this scope.
    ///
    /// Must be called from within a Tokio runtime.
    pub fn spawn_write<F>(&self, write: F)
    where
        F: Future<Output = ()> + Send + 'static,
    {
        let mut writes = lock(&self.writes);
        while writes.try_join_next().is_some() {}
        writes.spawn(write);
    }

    /// Returns the number of subscriptions still running.
    #[must_use]
    pub fn active_subscriptions(&self) -> usize {
        lock(&self.slots)
            .values()
            .filter_map(|slot| slot.handle.as_ref())
            .filter(|handle| !handle.is_finished())
            .count()
    }

    /// Waits until every write spawned so far has finished.
    pub async fn settle(&self) {
        let mut pending = std::mem::take(&mut *lock(&self.writes));
        while let Some(outcome) = pending.join_next().await {
            if let Err(err) = outcome
                && err.is_panic()
            {
                tracing::error!(error = %err, "write task panicked");
            }
        }
    }
}

impl Drop for ScreenScope {
    fn drop(&mut self) {
        let slots = self.slots.get_mut().unwrap_or_else(PoisonError::into_inner);
        for handle in slots.drain().filter_map(|(_, slot)| slot.handle) {
            handle.abort();
        }
        self.writes
            .get_mut()
            .unwrap_or_else(PoisonError::into_inner)
            .abort_all();
    }
}

fn lock<T>(mutex: &Mutex<T>) -> MutexGuard<'_, T> {
    mutex.lock().unwrap_or_else(PoisonError::into_inner)
}
