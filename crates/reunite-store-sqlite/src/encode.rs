//! Encoding helpers between Rust domain types and the plain-text
//! representations stored in SQLite columns.
//!
//! Timestamps are stored as RFC 3339 UTC strings with exactly three
//! fractional digits and a `Z` suffix, so lexical order equals time order.
//! UUIDs are stored as hyphenated lowercase strings. Locations are
//! additionally stored trimmed and Unicode-lowercased for matching.

use chrono::{DateTime, SecondsFormat, Utc};
use serde::{Serialize, de::DeserializeOwned};
use uuid::Uuid;

use crate::{Error, Result};

pub fn encode_uuid(id: Uuid) -> String { id.hyphenated().to_string() }

pub fn encode_dt(dt: DateTime<Utc>) -> String {
  dt.to_rfc3339_opts(SecondsFormat::Millis, true)
}

/// Case-folded form of a location, used on both sides of a comparison.
pub fn fold_location(text: &str) -> String { text.trim().to_lowercase() }

pub fn encode_record<T: Serialize>(record: &T) -> Result<String> {
  Ok(serde_json::to_string(record)?)
}

pub fn decode_record<T: DeserializeOwned>(
  table: &'static str,
  json: &str,
) -> Result<T> {
  serde_json::from_str(json).map_err(|e| Error::CorruptRow {
    table,
    message: e.to_string(),
  })
}

#[cfg(test)]
mod tests {
  use chrono::TimeZone;

  use super::*;

  #[test]
  fn encoded_timestamps_sort_lexically() {
    let a = Utc.with_ymd_and_hms(2024, 3, 31, 23, 59, 59).unwrap();
    let b = a + chrono::Duration::milliseconds(500);
    let c = Utc.with_ymd_and_hms(2024, 4, 1, 0, 0, 0).unwrap();
    assert_eq!(encode_dt(a), "2024-03-31T23:59:59.000Z");
    assert!(encode_dt(a) < encode_dt(b));
    assert!(encode_dt(b) < encode_dt(c));
  }
}
