//! Three-state result envelope for remote operations.

/// Outcome of a remote operation as observed while it runs.
///
/// Every operation reports [`Self::Loading`] first and then one terminal
/// [`Self::Success`] or [`Self::Error`]. Live subscriptions may report
/// `Success` repeatedly, once per remote change, and report nothing after an
/// `Error`.
#[derive(Debug, Clone, PartialEq)]
pub enum RemoteResult<T> {
    /// The operation is in flight.
    Loading,
    /// The operation produced a value.
    Success {
        /// Operation payload; `()` for writes.
        data: T,
        /// Optional informational message from the store.
        message: Option<String>,
    },
    /// The operation failed.
    Error {
        /// Human-readable failure message.
        message: String,
    },
}

impl<T> RemoteResult<T> {
    /// Creates a success envelope without a message.
    #[must_use]
    pub const fn success(data: T) -> Self {
        Self::Success {
            data,
            message: None,
        }
    }

    /// Creates an error envelope.
    #[must_use]
    pub fn error(message: impl Into<String>) -> Self {
        Self::Error {
            message: message.into(),
        }
    }

    /// Returns `true` for [`Self::Loading`].
    #[must_use]
    pub const fn is_loading(&self) -> bool {
        matches!(self, Self::Loading)
    }

    /// Returns `true` for [`Self::Error`].
    #[must_use]
    pub const fn is_error(&self) -> bool {
        matches!(self, Self::Error { .. })
    }

    /// Returns the payload of a success envelope.
    #[must_use]
    pub const fn data(&self) -> Option<&T> {
        match self {
            Self::Success { data, .. } => Some(data),
            Self::Loading | Self::Error { .. } => None,
        }
    }

    /// Returns the message of an error envelope.
    #[must_use]
    pub fn error_message(&self) -> Option<&str> {
        match self {
            Self::Error { message } => Some(message),
            Self::Loading | Self::Success { .. } => None,
        }
    }
}
