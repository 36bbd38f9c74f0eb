//! One-time delivery of screen errors.

use super::ViewStatus;

/// Tracks which errors have already been shown.
///
/// A screen re-renders on every state change, and the error message stays in
/// state until the next envelope clears it. The notifier hands each error out
/// once, keyed by [`ViewStatus::error_seq`].
#[derive(Debug, Clone, Copy, Default)]
pub struct ErrorNotifier {
    seen_seq: u64,
}

impl ErrorNotifier {
    /// Creates a notifier that has seen nothing yet.
    #[must_use]
    pub const fn new() -> Self {
        Self { seen_seq: 0 }
    }

    /// Creates a notifier that ignores every error already in `status`.
    #[must_use]
    pub const fn caught_up(status: &ViewStatus) -> Self {
        Self {
            seen_seq: status.error_seq,
        }
    }

    /// Returns the error to surface for this render, if it is new.
    pub fn take(&mut self, status: &ViewStatus) -> Option<String> {
        if status.error_seq == self.seen_seq {
            return None;
        }
        self.seen_seq = status.error_seq;
        status.error_message.clone()
    }
}
