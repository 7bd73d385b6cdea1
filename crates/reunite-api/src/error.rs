//! API error type and [`axum::response::IntoResponse`] implementation.

use axum::{
  Json,
  http::StatusCode,
  response::{IntoResponse, Response},
};
use reunite_pipeline::Error as PipelineError;
use serde_json::json;
use thiserror::Error;

/// An error returned by an API handler.
#[derive(Debug, Error)]
pub enum ApiError {
  #[error(transparent)]
  Pipeline(#[from] PipelineError),

  #[error("bad request: {0}")]
  BadRequest(String),
}

impl IntoResponse for ApiError {
  fn into_response(self) -> Response {
    let (status, body) = match &self {
      ApiError::BadRequest(m) => (StatusCode::BAD_REQUEST, json!({ "message": m })),
      ApiError::Pipeline(PipelineError::Validation(v)) => {
        let mut body = json!({ "message": v.message });
        if !v.missing_fields.is_empty() {
          body["missingFields"] = json!(v.missing_fields);
        }
        (StatusCode::BAD_REQUEST, body)
      }
      ApiError::Pipeline(e @ PipelineError::NotFound { .. }) => {
        (StatusCode::NOT_FOUND, json!({ "message": e.to_string() }))
      }
      // Remote and store details stay in the log, never in the body.
      ApiError::Pipeline(e @ PipelineError::Enrichment(_)) => {
        tracing::error!(error = %e, "intake aborted");
        (
          StatusCode::BAD_GATEWAY,
          json!({ "message": "Enrichment service unavailable" }),
        )
      }
      ApiError::Pipeline(e) => {
        tracing::error!(error = %e, "intake failed");
        (StatusCode::INTERNAL_SERVER_ERROR, json!({ "message": "Server error" }))
      }
    };
    (status, Json(body)).into_response()
  }
}
