//! The `ReportStore` trait and supporting query types.
//!
//! The trait is implemented by storage backends (e.g. `reunite-store-sqlite`).
//! The pipeline and the HTTP layer depend on this abstraction, not on any
//! concrete backend.

use std::future::Future;

use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::{
  dates::DateWindow,
  report::{
    Gender, MissingPersonReport, NewMissingPerson, NewUnidentifiedPerson,
    UnidentifiedPersonReport,
  },
};

// ─── Query type ──────────────────────────────────────────────────────────────

/// How a location predicate compares against the stored location field.
/// Both modes trim and ignore case, with Unicode case folding.
#[derive(
  Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize,
)]
#[serde(rename_all = "lowercase")]
pub enum LocationMode {
  /// The stored location contains the query text.
  #[default]
  Contains,
  /// The stored location equals the query text.
  Exact,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LocationMatch {
  pub text: String,
  pub mode: LocationMode,
}

/// Parameters for [`ReportStore::find_missing`] and
/// [`ReportStore::find_unidentified`].
///
/// Each field applies to the kind being searched: `location` targets
/// `lastSeenLocation` / `foundAtLocation`, `age` targets `age` /
/// `estimatedAge`, and `date` targets `lastSeenDate` / `foundDate`.
/// All set predicates must hold.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ReportFilter {
  pub location: Option<LocationMatch>,
  pub gender:   Option<Gender>,
  /// Inclusive age bounds. Records with no age never match.
  pub age:      Option<(u32, u32)>,
  /// Inclusive date bounds.
  pub date:     Option<DateWindow>,
  pub limit:    Option<usize>,
}

// ─── Trait ───────────────────────────────────────────────────────────────────

/// Abstraction over a report store backend.
///
/// Both registries are append-created; reads return owned snapshots.
/// Creates of different reports are independent and need no global lock.
pub trait ReportStore: Send + Sync {
  type Error: std::error::Error + Send + Sync + 'static;

  // ── Missing persons ───────────────────────────────────────────────────

  /// Persist a new missing-person report; the store assigns id, status and
  /// timestamps.
  fn create_missing(
    &self,
    input: NewMissingPerson,
  ) -> impl Future<Output = Result<MissingPersonReport, Self::Error>> + Send + '_;

  /// Retrieve a missing-person report. Returns `None` if not found.
  fn get_missing(
    &self,
    id: Uuid,
  ) -> impl Future<Output = Result<Option<MissingPersonReport>, Self::Error>>
  + Send
  + '_;

  fn find_missing<'a>(
    &'a self,
    filter: &'a ReportFilter,
  ) -> impl Future<Output = Result<Vec<MissingPersonReport>, Self::Error>>
  + Send
  + 'a;

  // ── Unidentified persons ──────────────────────────────────────────────

  fn create_unidentified(
    &self,
    input: NewUnidentifiedPerson,
  ) -> impl Future<Output = Result<UnidentifiedPersonReport, Self::Error>>
  + Send
  + '_;

  fn get_unidentified(
    &self,
    id: Uuid,
  ) -> impl Future<Output = Result<Option<UnidentifiedPersonReport>, Self::Error>>
  + Send
  + '_;

  fn find_unidentified<'a>(
    &'a self,
    filter: &'a ReportFilter,
  ) -> impl Future<Output = Result<Vec<UnidentifiedPersonReport>, Self::Error>>
  + Send
  + 'a;
}
