//! Conversion of store calls into result-envelope streams.

use super::schema::SchemaError;
use crate::planning::{domain::RemoteResult, ports::ResultStream};
use crate::store::ports::{SnapshotStream, StoreError};
use futures::{StreamExt, future, stream};
use std::future::Future;
use thiserror::Error;

/// Failure caught at the adapter boundary.
///
/// Only its message reaches the view models.
#[derive(Debug, Clone, Error)]
pub enum AdapterFailure {
    /// The store call failed.
    #[error(transparent)]
    Store(#[from] StoreError),

    /// A document could not be mapped to a record.
    #[error(transparent)]
    Schema(#[from] SchemaError),
}

/// Emits `Loading` followed by the outcome of a single write.
pub(super) fn one_shot<T, F>(operation: &'static str, write: F) -> ResultStream<T>
where
    T: Send + 'static,
    F: Future<Output = Result<T, AdapterFailure>> + Send + 'static,
{
    let outcome = async move {
        match write.await {
            Ok(data) => RemoteResult::success(data),
            Err(err) => {
                tracing::warn!(operation, kind = "write", error = %err, "store write failed");
                RemoteResult::error(err.to_string())
            }
        }
    };
    stream::once(future::ready(RemoteResult::Loading))
        .chain(stream::once(outcome))
        .boxed()
}

/// Emits `Loading` followed by one envelope per snapshot.
///
/// The first failure, from the store or from decoding, is emitted as
/// `Error` and ends the stream.
pub(super) fn subscription<D, T, F>(
    operation: &'static str,
    snapshots: SnapshotStream<D>,
    mut decode: F,
) -> ResultStream<T>
where
    D: Send + 'static,
    T: Send + 'static,
    F: FnMut(D) -> Result<T, AdapterFailure> + Send + 'static,
{
    tracing::debug!(operation, "subscription opened");
    let envelopes = snapshots.scan(false, move |failed, snapshot| {
        if *failed {
            return future::ready(None);
        }
        let envelope = match snapshot.map_err(AdapterFailure::from).and_then(&mut decode) {
            Ok(data) => RemoteResult::success(data),
            Err(err) => {
                *failed = true;
                tracing::warn!(operation, kind = "subscription", error = %err, "subscription failed");
                RemoteResult::error(err.to_string())
            }
        };
        future::ready(Some(envelope))
    });
    stream::once(future::ready(RemoteResult::Loading))
        .chain(envelopes)
        .boxed()
}

/// Emits `Loading` followed by an `Error` for a request that could not be
/// issued at all.
pub(super) fn rejected<T>(operation: &'static str, failure: AdapterFailure) -> ResultStream<T>
where
    T: Send + 'static,
{
    tracing::warn!(operation, error = %failure, "request could not be issued");
    stream::iter([
        RemoteResult::Loading,
        RemoteResult::error(failure.to_string()),
    ])
    .boxed()
}
