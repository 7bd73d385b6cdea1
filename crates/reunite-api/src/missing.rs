//! Handlers for `/missing` endpoints.
//!
//! | Method | Path | Notes |
//! |--------|------|-------|
//! | `POST` | `/missing` | Files a report and scores same-month candidates |
//! | `GET`  | `/missing/{id}` | 404 if not found |
//! | `GET`  | `/missing/{id}/match` | Re-runs selection and scoring |

use std::sync::Arc;

use axum::{
  Json,
  extract::{Path, State, rejection::JsonRejection},
  http::StatusCode,
  response::IntoResponse,
};
use reunite_core::{
  report::MissingPersonReport, store::ReportStore,
  submission::MissingPersonSubmission,
};
use reunite_pipeline::{IntakePipeline, PotentialMatches};
use serde::Serialize;
use uuid::Uuid;

use crate::{error::ApiError, parse_id};

// ─── Create ───────────────────────────────────────────────────────────────────

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Created {
  pub message: &'static str,
  pub report:  MissingPersonReport,
  #[serde(flatten)]
  pub matches: PotentialMatches,
}

/// `POST /missing`
pub async fn create<S: ReportStore>(
  State(pipeline): State<Arc<IntakePipeline<S>>>,
  body: Result<Json<MissingPersonSubmission>, JsonRejection>,
) -> Result<impl IntoResponse, ApiError> {
  let Json(submission) = body.map_err(|e| ApiError::BadRequest(e.body_text()))?;
  let outcome = pipeline.submit_missing(submission).await?;
  Ok((
    StatusCode::CREATED,
    Json(Created {
      message: "Missing person report submitted successfully",
      report:  outcome.report,
      matches: outcome.matches,
    }),
  ))
}

// ─── Get one ──────────────────────────────────────────────────────────────────

/// `GET /missing/{id}`
pub async fn get_one<S: ReportStore>(
  State(pipeline): State<Arc<IntakePipeline<S>>>,
  Path(id): Path<String>,
) -> Result<Json<MissingPersonReport>, ApiError> {
  let report = pipeline.get_missing(parse_id(&id)?).await?;
  Ok(Json(report))
}

// ─── Potential matches ────────────────────────────────────────────────────────

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Matches {
  pub report_id: Uuid,
  #[serde(flatten)]
  pub matches:   PotentialMatches,
}

/// `GET /missing/{id}/match`
pub async fn potential_matches<S: ReportStore>(
  State(pipeline): State<Arc<IntakePipeline<S>>>,
  Path(id): Path<String>,
) -> Result<Json<Matches>, ApiError> {
  let (report, matches) = pipeline.match_missing(parse_id(&id)?).await?;
  Ok(Json(Matches {
    report_id: report.id,
    matches,
  }))
}
