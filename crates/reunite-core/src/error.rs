//! Error types for `reunite-core`.

use thiserror::Error;

/// A submission was malformed or incomplete. Always a client error; never
/// retried.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("{message}")]
pub struct ValidationError {
  pub message:        String,
  /// Required fields that were absent or blank, in camelCase wire form.
  pub missing_fields: Vec<String>,
}

impl ValidationError {
  pub fn new(message: impl Into<String>) -> Self {
    Self {
      message:        message.into(),
      missing_fields: Vec::new(),
    }
  }

  pub fn missing(fields: Vec<String>) -> Self {
    Self {
      message:        "Missing required fields".to_owned(),
      missing_fields: fields,
    }
  }
}

#[derive(Debug, Error)]
pub enum Error {
  #[error(transparent)]
  Validation(#[from] ValidationError),

  #[error("invalid date: {0:?}")]
  InvalidDate(String),

  #[error("serialization error: {0}")]
  Serialization(#[from] serde_json::Error),
}

pub type Result<T, E = Error> = std::result::Result<T, E>;
