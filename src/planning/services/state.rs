//! Observable screen state and the envelope fold rules.

use super::SlotTicket;
use crate::planning::{domain::RemoteResult, ports::ResultStream};
use futures::StreamExt;
use std::sync::Arc;
use tokio::sync::watch;

/// Loading and error flags shared by every screen.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct ViewStatus {
    /// True while the most recent envelope was `Loading`.
    pub is_loading: bool,
    /// Message of the most recent envelope when it was `Error`.
    pub error_message: Option<String>,
    /// Number of `Error` envelopes folded so far.
    ///
    /// Two equal messages in a row are still two distinct errors; observers
    /// compare this counter rather than the text.
    pub error_seq: u64,
}

impl ViewStatus {
    /// Returns the pending error message, if any.
    #[must_use]
    pub fn error_message(&self) -> Option<&str> {
        self.error_message.as_deref()
    }
}

/// Folds one envelope into the status flags.
///
/// Payload slices are not touched here; callers apply `Success` data to the
/// slice owned by the operation that produced it.
pub fn fold_status<T>(status: &mut ViewStatus, envelope: &RemoteResult<T>) {
    match envelope {
        RemoteResult::Loading => {
            status.is_loading = true;
            status.error_message = None;
        }
        RemoteResult::Success { .. } => {
            status.is_loading = false;
            status.error_message = None;
        }
        RemoteResult::Error { message } => {
            status.is_loading = false;
            status.error_message = Some(message.clone());
            status.error_seq = status.error_seq.wrapping_add(1);
        }
    }
}

/// Screen state that carries a [`ViewStatus`].
pub trait ScreenState: Clone + Send + Sync + 'static {
    /// Returns the status flags for in-place folding.
    fn status_mut(&mut self) -> &mut ViewStatus;
}

/// Single-writer holder of the latest screen snapshot.
///
/// Readers take a copy with [`StateHolder::snapshot`] or follow changes
/// through a [`watch::Receiver`].
#[derive(Debug)]
pub struct StateHolder<S> {
    sender: watch::Sender<S>,
}

impl<S> StateHolder<S>
where
    S: Clone + Send + Sync + 'static,
{
    /// Creates a holder seeded with `initial`.
    #[must_use]
    pub fn new(initial: S) -> Self {
        let (sender, _) = watch::channel(initial);
        Self { sender }
    }

    /// Returns a copy of the current state.
    #[must_use]
    pub fn snapshot(&self) -> S {
        self.sender.borrow().clone()
    }

    /// Returns a receiver observing every later state.
    #[must_use]
    pub fn subscribe(&self) -> watch::Receiver<S> {
        self.sender.subscribe()
    }

    /// Applies `modify` to the state and notifies receivers.
    pub fn update(&self, modify: impl FnOnce(&mut S)) {
        self.sender.send_modify(modify);
    }

    /// Reads the current state without cloning it.
    pub fn read<R>(&self, read: impl FnOnce(&S) -> R) -> R {
        read(&self.sender.borrow())
    }
}

/// Folds every envelope of `envelopes` into `holder`.
///
/// `apply` receives the data of each `Success` envelope together with the
/// state, after the status flags have been updated. Envelopes arriving once
/// `ticket` is no longer current are dropped and end the fold.
pub(crate) async fn drive<T, S, F>(
    mut envelopes: ResultStream<T>,
    holder: Arc<StateHolder<S>>,
    ticket: SlotTicket,
    mut apply: F,
) where
    T: Send + 'static,
    S: ScreenState,
    F: FnMut(&mut S, T) + Send,
{
    while let Some(envelope) = envelopes.next().await {
        let mut current = true;
        holder.update(|state| {
            current = ticket.is_current();
            if !current {
                return;
            }
            fold_status(state.status_mut(), &envelope);
            if let RemoteResult::Success { data, .. } = envelope {
                apply(state, data);
            }
        });
        if !current {
            tracing::debug!("stale subscription stopped");
            return;
        }
    }
}
