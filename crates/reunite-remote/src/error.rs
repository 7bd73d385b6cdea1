//! Construction errors for `reunite-remote` clients.
//!
//! Per-call failures are reported as
//! [`reunite_core::services::RemoteError`] instead.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum Error {
  #[error("failed to build HTTP client: {0}")]
  Client(#[from] reqwest::Error),

  #[error("invalid configuration: {0}")]
  InvalidConfig(String),
}

pub type Result<T, E = Error> = std::result::Result<T, E>;
