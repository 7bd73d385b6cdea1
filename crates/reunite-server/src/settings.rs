//! Runtime server configuration, deserialised from `config.toml` layered
//! under `REUNITE_*` environment variables.
//!
//! Nested keys use `__` in the environment, e.g.
//! `REUNITE_TWILIO__AUTH_TOKEN` sets `[twilio] auth_token`.

use std::{
  path::{Path, PathBuf},
  time::Duration,
};

use anyhow::Context as _;
use reunite_pipeline::{MatchSettings, PipelineSettings};
use reunite_remote::config::{
  CloudinaryConfig, EndpointConfig, GcsConfig, TwilioConfig,
};
use serde::Deserialize;

fn default_host() -> String { "127.0.0.1".to_owned() }

fn default_port() -> u16 { 8080 }

fn default_store_path() -> PathBuf { PathBuf::from("~/.local/share/reunite/reunite.db") }

fn default_scratch_dir() -> PathBuf { std::env::temp_dir().join("reunite") }

fn default_cors() -> bool { true }

#[derive(Debug, Clone, Deserialize)]
pub struct ServerConfig {
  #[serde(default = "default_host")]
  pub host:        String,
  #[serde(default = "default_port")]
  pub port:        u16,
  #[serde(default = "default_store_path")]
  pub store_path:  PathBuf,
  /// Directory for photo-normalization scratch files.
  #[serde(default = "default_scratch_dir")]
  pub scratch_dir: PathBuf,
  /// Allow cross-origin browser clients.
  #[serde(default = "default_cors")]
  pub cors:        bool,
  #[serde(default)]
  pub matching:    MatchSettings,
  #[serde(default)]
  pub pipeline:    PipelineSection,
  pub scorer:      EndpointConfig,
  /// Unidentified-person intakes skip enrichment when absent.
  #[serde(default)]
  pub enrichment:  Option<EndpointConfig>,
  pub cloudinary:  CloudinaryConfig,
  #[serde(default)]
  pub gcs:         GcsConfig,
  pub twilio:      TwilioConfig,
}

/// `[pipeline]`
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct PipelineSection {
  pub remote_timeout_secs:      u64,
  pub max_in_flight_sms:        usize,
  pub upload_folder:            String,
  pub alternate_storage_domain: String,
}

impl Default for PipelineSection {
  fn default() -> Self {
    let defaults = PipelineSettings::default();
    Self {
      remote_timeout_secs:      defaults.remote_timeout.as_secs(),
      max_in_flight_sms:        defaults.max_in_flight_sms,
      upload_folder:            defaults.upload_folder,
      alternate_storage_domain: defaults.alternate_storage_domain,
    }
  }
}

impl ServerConfig {
  /// Read `path` (if it exists) and overlay the environment.
  pub fn load(path: &Path) -> anyhow::Result<Self> { Self::load_with_env(path, None) }

  /// Like [`ServerConfig::load`], reading overrides from `env` instead of the
  /// process environment when given. Values stay strings; numeric fields are
  /// converted during deserialisation, so `+1555…` phone numbers and
  /// zero-padded keys survive intact.
  fn load_with_env(
    path: &Path,
    env: Option<config::Map<String, String>>,
  ) -> anyhow::Result<Self> {
    config::Config::builder()
      .add_source(config::File::from(path).required(false))
      .add_source(
        config::Environment::with_prefix("REUNITE")
          .prefix_separator("_")
          .separator("__")
          .source(env),
      )
      .build()
      .context("failed to read config file")?
      .try_deserialize()
      .context("failed to deserialise ServerConfig")
  }

  /// Pipeline settings with `~` expanded in the scratch directory.
  pub fn pipeline_settings(&self) -> PipelineSettings {
    PipelineSettings {
      matching:                 self.matching.clone(),
      remote_timeout:           Duration::from_secs(self.pipeline.remote_timeout_secs),
      max_in_flight_sms:        self.pipeline.max_in_flight_sms,
      upload_folder:            self.pipeline.upload_folder.clone(),
      alternate_storage_domain: self.pipeline.alternate_storage_domain.clone(),
      scratch_dir:              expand_tilde(&self.scratch_dir),
    }
  }
}

/// Expand a leading `~` to the user's home directory.
pub fn expand_tilde(path: &Path) -> PathBuf {
  let s = path.to_string_lossy();
  if let Some(rest) = s.strip_prefix("~/")
    && let Ok(home) = std::env::var("HOME")
  {
    return PathBuf::from(home).join(rest);
  }
  path.to_path_buf()
}

#[cfg(test)]
mod tests {
  use reunite_core::store::LocationMode;

  use super::*;

  const MINIMAL: &str = r#"
[scorer]
url = "http://127.0.0.1:9000/match"

[cloudinary]
cloud_name = "demo"
api_key = "key"
api_secret = "secret"

[twilio]
account_sid = "AC123"
auth_token = "token"
from_number = "+15550000000"
"#;

  fn load(toml: &str) -> ServerConfig {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("config.toml");
    std::fs::write(&path, toml).unwrap();
    ServerConfig::load(&path).unwrap()
  }

  #[test]
  fn minimal_config_fills_defaults() {
    let cfg = load(MINIMAL);
    assert_eq!(cfg.host, "127.0.0.1");
    assert_eq!(cfg.port, 8080);
    assert!(cfg.cors);
    assert_eq!(cfg.matching, MatchSettings::default());
    assert!(cfg.enrichment.is_none());
    assert_eq!(cfg.gcs.base_url, "https://storage.googleapis.com");
    assert_eq!(cfg.scorer.timeout_secs, 30);

    let settings = cfg.pipeline_settings();
    assert_eq!(settings.remote_timeout, Duration::from_secs(20));
    assert_eq!(settings.max_in_flight_sms, 4);
    assert_eq!(settings.upload_folder, "uploads");
    assert_eq!(settings.alternate_storage_domain, "firebasestorage.googleapis.com");
  }

  #[test]
  fn sections_override_defaults() {
    let cfg = load(&format!(
      r#"
port = 3000
cors = false

[matching]
age_tolerance = 3
location_mode = "exact"

[pipeline]
remote_timeout_secs = 5
max_in_flight_sms = 1

[enrichment]
url = "http://127.0.0.1:9001/enrich"
{MINIMAL}"#
    ));
    assert_eq!(cfg.port, 3000);
    assert!(!cfg.cors);
    assert_eq!(cfg.matching.age_tolerance, 3);
    assert_eq!(cfg.matching.max_candidates, 50);
    assert_eq!(cfg.matching.location_mode, LocationMode::Exact);
    assert_eq!(cfg.enrichment.unwrap().url, "http://127.0.0.1:9001/enrich");

    let settings = cfg.pipeline.clone();
    assert_eq!(settings.remote_timeout_secs, 5);
    assert_eq!(settings.max_in_flight_sms, 1);
    assert_eq!(settings.upload_folder, "uploads");
  }

  #[test]
  fn env_overrides_keep_string_values_verbatim() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("config.toml");
    std::fs::write(&path, MINIMAL).unwrap();

    let env = [
      ("REUNITE_PORT", "9090"),
      ("REUNITE_TWILIO__FROM_NUMBER", "+15559990000"),
      ("REUNITE_CLOUDINARY__API_KEY", "000123"),
      ("REUNITE_MATCHING__AGE_TOLERANCE", "7"),
    ]
    .into_iter()
    .map(|(k, v)| (k.to_owned(), v.to_owned()))
    .collect();
    let cfg = ServerConfig::load_with_env(&path, Some(env)).unwrap();

    assert_eq!(cfg.port, 9090);
    assert_eq!(cfg.twilio.from_number, "+15559990000");
    assert_eq!(cfg.cloudinary.api_key, "000123");
    assert_eq!(cfg.matching.age_tolerance, 7);
  }

  #[test]
  fn missing_required_section_fails() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("config.toml");
    std::fs::write(&path, "port = 1").unwrap();
    assert!(ServerConfig::load(&path).is_err());
  }

  #[test]
  fn expands_home_prefix_only() {
    let home = std::env::var("HOME").unwrap_or_default();
    if !home.is_empty() {
      assert_eq!(
        expand_tilde(Path::new("~/data/r.db")),
        PathBuf::from(&home).join("data/r.db")
      );
    }
    assert_eq!(expand_tilde(Path::new("/var/r.db")), PathBuf::from("/var/r.db"));
    assert_eq!(expand_tilde(Path::new("~user/r.db")), PathBuf::from("~user/r.db"));
  }
}
