//! The cross-registry matching and notification pipeline.
//!
//! [`IntakePipeline`] composes the photo normalizer, candidate selector,
//! scorer and notifier over any [`reunite_core::store::ReportStore`]. Remote
//! collaborators are injected as trait objects through [`Collaborators`].

use std::sync::Arc;

use reunite_core::services::{
  CanonicalUploader, Enricher, MatchScorer, ObjectDownloader, SmsGateway,
};

mod deadline;

pub mod error;
pub mod intake;
pub mod normalizer;
pub mod notifier;
pub mod scoring;
pub mod selector;
pub mod settings;

pub use error::{Error, Result};
pub use intake::{IntakePipeline, MissingIntakeOutcome, UnidentifiedIntakeOutcome};
pub use notifier::NotificationSummary;
pub use scoring::PotentialMatches;
pub use settings::{MatchSettings, PipelineSettings};

/// The remote services the pipeline calls.
#[derive(Clone)]
pub struct Collaborators {
  pub scorer:     Arc<dyn MatchScorer>,
  /// Unidentified-person intakes skip enrichment when unset.
  pub enricher:   Option<Arc<dyn Enricher>>,
  pub downloader: Arc<dyn ObjectDownloader>,
  pub uploader:   Arc<dyn CanonicalUploader>,
  pub sms:        Arc<dyn SmsGateway>,
}
