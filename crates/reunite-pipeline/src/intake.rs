//! The end-to-end intake flows.
//!
//! Missing-person intake: validate, normalize photo, persist, select
//! unidentified candidates in the same month, score.
//!
//! Unidentified-person intake: validate, enrich (if configured), normalize
//! photo, persist, select missing persons by attributes, notify their
//! contacts.
//!
//! Everything after persistence is best-effort; nothing rolls back the stored
//! record.

use std::sync::Arc;

use reunite_core::{
  report::{MissingPersonReport, NewUnidentifiedPerson, UnidentifiedPersonReport},
  services::{EnrichedFields, Enricher},
  store::ReportStore,
  submission::{MissingPersonSubmission, UnidentifiedPersonSubmission},
};
use uuid::Uuid;

use crate::{
  Collaborators,
  deadline::within,
  error::{EnrichmentServiceError, Error, Result},
  normalizer::PhotoNormalizer,
  notifier::{AlertContext, NotificationSummary, Notifier},
  scoring::{PotentialMatches, ScoringStage},
  selector::CandidateSelector,
  settings::PipelineSettings,
};

// ─── Unidentified-person stages ──────────────────────────────────────────────

/// A validated unidentified-person intake, before enrichment.
#[derive(Debug, Clone)]
pub struct UnidentifiedIntake(pub NewUnidentifiedPerson);

/// The intake after enrichment (or after enrichment was skipped). The photo
/// may still point at a foreign backend.
#[derive(Debug, Clone)]
pub struct EnrichedIntake(pub NewUnidentifiedPerson);

/// The intake with a canonical photo; ready to persist.
#[derive(Debug, Clone)]
pub struct NormalizedIntake(pub NewUnidentifiedPerson);

impl UnidentifiedIntake {
  /// Overlay the fields the enrichment service returned. Absent or blank
  /// fields keep the submitted value.
  pub fn merge(self, fields: EnrichedFields) -> EnrichedIntake {
    let mut intake = self.0;
    if let Some(desc) = fields.physical_description {
      intake.physical_description = Some(desc);
    }
    if let Some(photo) = fields.photo.filter(|p| !p.trim().is_empty()) {
      intake.photo = photo;
    }
    EnrichedIntake(intake)
  }

  pub fn unenriched(self) -> EnrichedIntake { EnrichedIntake(self.0) }
}

// ─── Outcomes ────────────────────────────────────────────────────────────────

#[derive(Debug, Clone)]
pub struct MissingIntakeOutcome {
  pub report:  MissingPersonReport,
  pub matches: PotentialMatches,
}

#[derive(Debug, Clone)]
pub struct UnidentifiedIntakeOutcome {
  pub report:          UnidentifiedPersonReport,
  pub matched_reports: Vec<MissingPersonReport>,
  pub notifications:   NotificationSummary,
}

// ─── Pipeline ────────────────────────────────────────────────────────────────

pub struct IntakePipeline<S> {
  store:      Arc<S>,
  enricher:   Option<Arc<dyn Enricher>>,
  settings:   PipelineSettings,
  normalizer: PhotoNormalizer,
  selector:   CandidateSelector<S>,
  scoring:    ScoringStage,
  notifier:   Notifier,
}

impl<S: ReportStore> IntakePipeline<S> {
  pub fn new(store: Arc<S>, collaborators: Collaborators, settings: PipelineSettings) -> Self {
    let Collaborators {
      scorer,
      enricher,
      downloader,
      uploader,
      sms,
    } = collaborators;

    Self {
      normalizer: PhotoNormalizer::new(
        downloader,
        uploader,
        settings.scratch_dir.clone(),
        settings.upload_folder.clone(),
        settings.alternate_storage_domain.clone(),
      ),
      selector: CandidateSelector::new(store.clone(), settings.matching.clone()),
      scoring: ScoringStage::new(scorer, settings.remote_timeout),
      notifier: Notifier::new(sms, settings.remote_timeout, settings.max_in_flight_sms),
      store,
      enricher,
      settings,
    }
  }

  pub fn store(&self) -> &S { &self.store }

  pub fn settings(&self) -> &PipelineSettings { &self.settings }

  // ── Missing persons ───────────────────────────────────────────────────

  pub async fn submit_missing(
    &self,
    submission: MissingPersonSubmission,
  ) -> Result<MissingIntakeOutcome> {
    let mut input = submission.validate()?;
    input.photo = self.normalizer.normalize(&input.photo).await?;

    let report = self
      .store
      .create_missing(input)
      .await
      .map_err(Error::store)?;

    let matches = self.potential_matches(&report).await?;
    tracing::info!(
      report_id = %report.id,
      candidates = matches.candidate_count,
      matches = matches.potential_matches.len(),
      degraded = matches.match_service_degraded,
      "missing-person report filed"
    );
    Ok(MissingIntakeOutcome { report, matches })
  }

  /// Re-run candidate selection and scoring for a stored missing-person
  /// report.
  pub async fn match_missing(&self, id: Uuid) -> Result<(MissingPersonReport, PotentialMatches)> {
    let report = self.get_missing(id).await?;
    let matches = self.potential_matches(&report).await?;
    Ok((report, matches))
  }

  async fn potential_matches(&self, report: &MissingPersonReport) -> Result<PotentialMatches> {
    let candidates = self
      .selector
      .unidentified_in_month(&report.last_seen_location, report.last_seen_date)
      .await;
    let profiles = candidates
      .iter()
      .map(UnidentifiedPersonReport::profile)
      .collect::<reunite_core::Result<Vec<_>>>()?;
    Ok(self.scoring.score(&report.profile()?, &profiles).await)
  }

  pub async fn get_missing(&self, id: Uuid) -> Result<MissingPersonReport> {
    self
      .store
      .get_missing(id)
      .await
      .map_err(Error::store)?
      .ok_or(Error::NotFound {
        kind: "missing-person",
        id,
      })
  }

  // ── Unidentified persons ──────────────────────────────────────────────

  pub async fn submit_unidentified(
    &self,
    submission: UnidentifiedPersonSubmission,
  ) -> Result<UnidentifiedIntakeOutcome> {
    let intake = UnidentifiedIntake(submission.validate()?);
    let enriched = self.enrich(intake).await?;
    let normalized = self.normalize(enriched).await?;

    let report = self
      .store
      .create_unidentified(normalized.0)
      .await
      .map_err(Error::store)?;

    let matched_reports = self.selector.missing_by_attributes(&report).await;
    let notifications = self
      .notifier
      .notify_contacts(
        &matched_reports,
        &AlertContext {
          report_id:  report.id,
          location:   &report.found_at_location,
          found_date: report.found_date,
          photo:      &report.photo,
        },
      )
      .await;

    tracing::info!(
      report_id = %report.id,
      matched = matched_reports.len(),
      "unidentified-person report filed"
    );
    Ok(UnidentifiedIntakeOutcome {
      report,
      matched_reports,
      notifications,
    })
  }

  async fn enrich(&self, intake: UnidentifiedIntake) -> Result<EnrichedIntake> {
    let Some(enricher) = &self.enricher else {
      return Ok(intake.unenriched());
    };
    let fields = within(
      "enrichment service",
      self.settings.remote_timeout,
      enricher.enrich(&intake.0),
    )
    .await
    .map_err(EnrichmentServiceError)?;
    Ok(intake.merge(fields))
  }

  async fn normalize(&self, enriched: EnrichedIntake) -> Result<NormalizedIntake> {
    let mut intake = enriched.0;
    intake.photo = self.normalizer.normalize(&intake.photo).await?;
    Ok(NormalizedIntake(intake))
  }

  pub async fn get_unidentified(&self, id: Uuid) -> Result<UnidentifiedPersonReport> {
    self
      .store
      .get_unidentified(id)
      .await
      .map_err(Error::store)?
      .ok_or(Error::NotFound {
        kind: "unidentified-person",
        id,
      })
  }
}
