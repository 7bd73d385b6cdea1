//! Advisory scoring of candidates against a subject profile.

use std::{sync::Arc, time::Duration};

use reunite_core::services::MatchScorer;
use serde::Serialize;
use serde_json::Value;

use crate::{deadline::within, error::MatchServiceUnavailable};

/// Result of scoring one subject. `potential_matches` is the scorer's list,
/// unmodified; it is empty when the scorer was skipped or unavailable.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PotentialMatches {
  pub candidate_count:        usize,
  pub potential_matches:      Vec<Value>,
  pub match_service_degraded: bool,
}

pub struct ScoringStage {
  scorer:  Arc<dyn MatchScorer>,
  timeout: Duration,
}

impl ScoringStage {
  pub fn new(scorer: Arc<dyn MatchScorer>, timeout: Duration) -> Self { Self { scorer, timeout } }

  /// Ask the scorer once. Errors are returned, not logged.
  pub async fn try_score(
    &self,
    subject: &Value,
    candidates: &[Value],
  ) -> Result<Vec<Value>, MatchServiceUnavailable> {
    within(
      "match scorer",
      self.timeout,
      self.scorer.score(subject, candidates),
    )
    .await
    .map_err(MatchServiceUnavailable)
  }

  /// Score `candidates`, degrading to no matches if the scorer fails. An
  /// empty candidate set is never sent.
  pub async fn score(&self, subject: &Value, candidates: &[Value]) -> PotentialMatches {
    if candidates.is_empty() {
      return PotentialMatches::default();
    }
    match self.try_score(subject, candidates).await {
      Ok(potential_matches) => PotentialMatches {
        candidate_count: candidates.len(),
        potential_matches,
        match_service_degraded: false,
      },
      Err(e) => {
        tracing::warn!(error = %e, candidates = candidates.len(), "scoring degraded");
        PotentialMatches {
          candidate_count:        candidates.len(),
          potential_matches:      Vec::new(),
          match_service_degraded: true,
        }
      }
    }
  }
}
