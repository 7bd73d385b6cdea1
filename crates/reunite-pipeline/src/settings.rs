//! Tunables for candidate selection and the intake flow.

use std::{path::PathBuf, time::Duration};

use reunite_core::store::LocationMode;
use serde::Deserialize;

fn default_age_tolerance() -> u32 { 5 }

fn default_max_candidates() -> usize { 50 }

/// How loosely candidates are selected from the opposite registry.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct MatchSettings {
  /// Half-width of the age band, in years.
  pub age_tolerance:  u32,
  pub location_mode:  LocationMode,
  pub max_candidates: usize,
}

impl Default for MatchSettings {
  fn default() -> Self {
    Self {
      age_tolerance:  default_age_tolerance(),
      location_mode:  LocationMode::default(),
      max_candidates: default_max_candidates(),
    }
  }
}

#[derive(Debug, Clone)]
pub struct PipelineSettings {
  pub matching:                 MatchSettings,
  /// Applied to enrichment, scoring and each SMS send. Never to the store.
  pub remote_timeout:           Duration,
  pub max_in_flight_sms:        usize,
  /// Folder on the canonical provider that normalized photos land in.
  pub upload_folder:            String,
  /// HTTP host whose URLs are pulled through the normalizer.
  pub alternate_storage_domain: String,
  /// Where normalization scratch files are created.
  pub scratch_dir:              PathBuf,
}

impl Default for PipelineSettings {
  fn default() -> Self {
    Self {
      matching:                 MatchSettings::default(),
      remote_timeout:           Duration::from_secs(20),
      max_in_flight_sms:        4,
      upload_folder:            "uploads".to_owned(),
      alternate_storage_domain: "firebasestorage.googleapis.com".to_owned(),
      scratch_dir:              std::env::temp_dir(),
    }
  }
}
