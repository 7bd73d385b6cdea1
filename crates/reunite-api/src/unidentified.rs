//! Handlers for `/unidentified` endpoints.
//!
//! | Method | Path | Notes |
//! |--------|------|-------|
//! | `POST` | `/unidentified` | Enriches, normalizes, files, notifies matches |
//! | `GET`  | `/unidentified/{id}` | 404 if not found |

use std::sync::Arc;

use axum::{
  Json,
  extract::{Path, State, rejection::JsonRejection},
  http::StatusCode,
  response::IntoResponse,
};
use reunite_core::{
  report::{MissingPersonReport, UnidentifiedPersonReport},
  store::ReportStore,
  submission::UnidentifiedPersonSubmission,
};
use reunite_pipeline::{IntakePipeline, NotificationSummary};
use serde::Serialize;
use uuid::Uuid;

use crate::{error::ApiError, parse_id};

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Created {
  pub message:         &'static str,
  pub report_id:       Uuid,
  /// Canonical photo URL, duplicated from the report for convenience.
  pub photo:           String,
  pub matched_count:   usize,
  pub matched_reports: Vec<MissingPersonReport>,
  pub notifications:   NotificationSummary,
  pub report:          UnidentifiedPersonReport,
}

/// `POST /unidentified`
pub async fn create<S: ReportStore>(
  State(pipeline): State<Arc<IntakePipeline<S>>>,
  body: Result<Json<UnidentifiedPersonSubmission>, JsonRejection>,
) -> Result<impl IntoResponse, ApiError> {
  let Json(submission) = body.map_err(|e| ApiError::BadRequest(e.body_text()))?;
  let outcome = pipeline.submit_unidentified(submission).await?;
  Ok((
    StatusCode::CREATED,
    Json(Created {
      message:         "Unidentified person report submitted successfully",
      report_id:       outcome.report.id,
      photo:           outcome.report.photo.clone(),
      matched_count:   outcome.matched_reports.len(),
      matched_reports: outcome.matched_reports,
      notifications:   outcome.notifications,
      report:          outcome.report,
    }),
  ))
}

/// `GET /unidentified/{id}`
pub async fn get_one<S: ReportStore>(
  State(pipeline): State<Arc<IntakePipeline<S>>>,
  Path(id): Path<String>,
) -> Result<Json<UnidentifiedPersonReport>, ApiError> {
  let report = pipeline.get_unidentified(parse_id(&id)?).await?;
  Ok(Json(report))
}
