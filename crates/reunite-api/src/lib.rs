//! JSON REST API for Reunite.
//!
//! Exposes an axum [`Router`] backed by an [`IntakePipeline`] over any
//! [`reunite_core::store::ReportStore`]. Auth and TLS are the caller's
//! responsibility.
//!
//! # Mounting
//!
//! ```rust,ignore
//! .nest("/api", reunite_api::api_router(pipeline.clone()))
//! ```
//!
//! or serve [`app`], which does the nesting and optional CORS.

pub mod error;
pub mod missing;
pub mod unidentified;

use std::sync::Arc;

use axum::{
  Router,
  routing::{get, post},
};
use reunite_core::store::ReportStore;
use reunite_pipeline::IntakePipeline;
use tower_http::{cors::CorsLayer, trace::TraceLayer};
use uuid::Uuid;

pub use error::ApiError;

/// Build the API router for `pipeline`.
///
/// The returned `Router<()>` can be nested into any parent router regardless
/// of its own state type.
pub fn api_router<S>(pipeline: Arc<IntakePipeline<S>>) -> Router<()>
where
  S: ReportStore + 'static,
{
  Router::new()
    // Missing persons
    .route("/missing", post(missing::create::<S>))
    .route("/missing/{id}", get(missing::get_one::<S>))
    .route("/missing/{id}/match", get(missing::potential_matches::<S>))
    // Unidentified persons
    .route("/unidentified", post(unidentified::create::<S>))
    .route("/unidentified/{id}", get(unidentified::get_one::<S>))
    .layer(TraceLayer::new_for_http())
    .with_state(pipeline)
}

/// The whole HTTP surface: the API under `/api`, open to cross-origin
/// browser clients when `cors` is set.
pub fn app<S>(pipeline: Arc<IntakePipeline<S>>, cors: bool) -> Router<()>
where
  S: ReportStore + 'static,
{
  let router = Router::new().nest("/api", api_router(pipeline));
  if cors {
    router.layer(CorsLayer::permissive())
  } else {
    router
  }
}

fn parse_id(raw: &str) -> Result<Uuid, ApiError> {
  raw
    .parse()
    .map_err(|_| ApiError::BadRequest(format!("invalid report id: {raw:?}")))
}
