//! Error types for the intake pipeline.
//!
//! Only [`Error`] aborts an intake. [`MatchServiceUnavailable`] and
//! [`NotificationFailure`] are recorded and logged, then the flow continues.

use reunite_core::{ValidationError, services::RemoteError};
use serde::Serialize;
use thiserror::Error;
use uuid::Uuid;

/// Boxed error from whichever [`reunite_core::store::ReportStore`] backend
/// the pipeline was built over.
pub type StoreError = Box<dyn std::error::Error + Send + Sync>;

/// A photo could not be fetched from its source or uploaded to the
/// canonical provider.
#[derive(Debug, Error)]
#[error("could not proxy photo {source_url:?}: {cause}")]
pub struct StorageProxyError {
  pub source_url: String,
  #[source]
  pub cause:      RemoteError,
}

/// The enrichment service was unreachable, timed out or returned garbage.
#[derive(Debug, Error)]
#[error("enrichment service error: {0}")]
pub struct EnrichmentServiceError(#[source] pub RemoteError);

/// The scorer failed; intake continues with no potential matches.
#[derive(Debug, Error)]
#[error("match service unavailable: {0}")]
pub struct MatchServiceUnavailable(#[source] pub RemoteError);

/// One recipient's SMS could not be delivered.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Error)]
#[serde(rename_all = "camelCase")]
#[error("alert for missing-person report {report_id} failed: {error}")]
pub struct NotificationFailure {
  pub report_id: Uuid,
  pub error:     String,
}

#[derive(Debug, Error)]
pub enum Error {
  #[error(transparent)]
  Validation(#[from] ValidationError),

  #[error(transparent)]
  StorageProxy(#[from] StorageProxyError),

  #[error(transparent)]
  Enrichment(#[from] EnrichmentServiceError),

  #[error("store error: {0}")]
  Store(#[source] StoreError),

  #[error("{kind} report {id} not found")]
  NotFound { kind: &'static str, id: Uuid },

  #[error("could not build match profile: {0}")]
  Profile(#[from] reunite_core::Error),
}

impl Error {
  pub(crate) fn store(e: impl std::error::Error + Send + Sync + 'static) -> Self {
    Self::Store(Box::new(e))
  }
}

pub type Result<T, E = Error> = std::result::Result<T, E>;
