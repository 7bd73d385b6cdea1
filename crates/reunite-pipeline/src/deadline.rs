use std::{future::Future, time::Duration};

use reunite_core::services::{RemoteError, RemoteResult};

/// Run a remote call under `limit`; an elapsed deadline becomes
/// [`RemoteError::Timeout`] so callers handle it like any other failure.
pub(crate) async fn within<T>(
  service: &'static str,
  limit: Duration,
  call: impl Future<Output = RemoteResult<T>>,
) -> RemoteResult<T> {
  match tokio::time::timeout(limit, call).await {
    Ok(result) => result,
    Err(_) => Err(RemoteError::Timeout {
      service,
      seconds: limit.as_secs(),
    }),
  }
}
