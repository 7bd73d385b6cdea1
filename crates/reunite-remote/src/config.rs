//! Connection settings for each remote collaborator, deserialised from the
//! server's `config.toml`.

use serde::Deserialize;

fn default_timeout_secs() -> u64 { 30 }

fn default_gcs_base() -> String { "https://storage.googleapis.com".to_owned() }

fn default_cloudinary_base() -> String { "https://api.cloudinary.com".to_owned() }

fn default_twilio_base() -> String { "https://api.twilio.com".to_owned() }

/// A JSON-over-HTTP service reached at a single fixed endpoint.
#[derive(Debug, Clone, Deserialize)]
pub struct EndpointConfig {
  pub url:          String,
  #[serde(default = "default_timeout_secs")]
  pub timeout_secs: u64,
}

/// Object downloads: plain HTTP GET plus the GCS JSON API for `gs://` URIs.
#[derive(Debug, Clone, Deserialize)]
pub struct GcsConfig {
  #[serde(default = "default_gcs_base")]
  pub base_url:     String,
  /// OAuth bearer token; public buckets need none.
  #[serde(default)]
  pub access_token: Option<String>,
  #[serde(default = "default_timeout_secs")]
  pub timeout_secs: u64,
}

impl Default for GcsConfig {
  fn default() -> Self {
    Self {
      base_url:     default_gcs_base(),
      access_token: None,
      timeout_secs: default_timeout_secs(),
    }
  }
}

#[derive(Debug, Clone, Deserialize)]
pub struct CloudinaryConfig {
  pub cloud_name:   String,
  pub api_key:      String,
  pub api_secret:   String,
  #[serde(default = "default_cloudinary_base")]
  pub base_url:     String,
  #[serde(default = "default_timeout_secs")]
  pub timeout_secs: u64,
}

#[derive(Debug, Clone, Deserialize)]
pub struct TwilioConfig {
  pub account_sid:  String,
  pub auth_token:   String,
  /// Sender number in E.164 form.
  pub from_number:  String,
  #[serde(default = "default_twilio_base")]
  pub base_url:     String,
  #[serde(default = "default_timeout_secs")]
  pub timeout_secs: u64,
}
