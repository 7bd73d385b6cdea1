//! Candidate selection from the opposite registry.
//!
//! Selection is advisory: a store failure is logged and yields no candidates
//! rather than failing the intake.

use std::sync::Arc;

use chrono::{DateTime, Utc};
use reunite_core::{
  dates::month_window,
  report::{Gender, MissingPersonReport, UnidentifiedPersonReport},
  store::{LocationMatch, ReportFilter, ReportStore},
};

use crate::settings::MatchSettings;

pub struct CandidateSelector<S> {
  store:    Arc<S>,
  settings: MatchSettings,
}

impl<S: ReportStore> CandidateSelector<S> {
  pub fn new(store: Arc<S>, settings: MatchSettings) -> Self { Self { store, settings } }

  fn location(&self, text: &str) -> LocationMatch {
    LocationMatch {
      text: text.to_owned(),
      mode: self.settings.location_mode,
    }
  }

  /// Filter for unidentified persons found in the same local calendar month
  /// as `date`, at a location matching `location`.
  pub fn month_filter(
    &self,
    location: &str,
    date: DateTime<Utc>,
  ) -> reunite_core::Result<ReportFilter> {
    Ok(ReportFilter {
      location: Some(self.location(location)),
      date: Some(month_window(date)?),
      limit: Some(self.settings.max_candidates),
      ..Default::default()
    })
  }

  /// Filter for missing persons resembling an unidentified person: same
  /// gender (unless unknown), age within the tolerance band (when an age was
  /// estimated), matching location.
  pub fn attribute_filter(&self, subject: &UnidentifiedPersonReport) -> ReportFilter {
    let tolerance = self.settings.age_tolerance;
    ReportFilter {
      location: Some(self.location(&subject.found_at_location)),
      gender: (subject.gender != Gender::Unknown).then_some(subject.gender),
      age: subject
        .estimated_age
        .map(|age| (age.saturating_sub(tolerance), age.saturating_add(tolerance))),
      date: None,
      limit: Some(self.settings.max_candidates),
    }
  }

  /// Unidentified persons that could be the subject of a missing-person
  /// report last seen at `location` on `date`.
  pub async fn unidentified_in_month(
    &self,
    location: &str,
    date: DateTime<Utc>,
  ) -> Vec<UnidentifiedPersonReport> {
    let filter = match self.month_filter(location, date) {
      Ok(f) => f,
      Err(e) => {
        tracing::warn!(error = %e, "could not build month window; no candidates");
        return Vec::new();
      }
    };
    match self.store.find_unidentified(&filter).await {
      Ok(found) => found,
      Err(e) => {
        tracing::warn!(error = %e, "unidentified-person lookup failed; no candidates");
        Vec::new()
      }
    }
  }

  /// Missing persons whose attributes fit the unidentified `subject`.
  pub async fn missing_by_attributes(
    &self,
    subject: &UnidentifiedPersonReport,
  ) -> Vec<MissingPersonReport> {
    let filter = self.attribute_filter(subject);
    match self.store.find_missing(&filter).await {
      Ok(found) => found,
      Err(e) => {
        tracing::warn!(
          report_id = %subject.id,
          error = %e,
          "missing-person lookup failed; no candidates"
        );
        Vec::new()
      }
    }
  }
}
