//! Error type for `reunite-store-sqlite`.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum Error {
  #[error("database error: {0}")]
  Database(#[from] tokio_rusqlite::Error),

  #[error("json error: {0}")]
  Json(#[from] serde_json::Error),

  /// A stored row could not be decoded back into a report.
  #[error("corrupt row in {table}: {message}")]
  CorruptRow {
    table:   &'static str,
    message: String,
  },
}

pub type Result<T, E = Error> = std::result::Result<T, E>;
