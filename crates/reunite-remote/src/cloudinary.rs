//! Signed uploads to the canonical photo host.

use std::path::Path;

use chrono::Utc;
use reqwest::{
  Client,
  multipart::{Form, Part},
};
use reunite_core::services::{BoxFuture, CanonicalUploader, RemoteResult};
use serde::Deserialize;
use sha2::{Digest, Sha256};

use crate::{
  Result,
  config::CloudinaryConfig,
  http::{build_client, ensure_success, invalid, transport},
};

const SERVICE: &str = "photo upload";

/// Sign upload parameters: sort by name, join as `k=v&k=v`, append the
/// secret, hex-encoded SHA-256 of the result.
pub fn sign(params: &[(&str, &str)], secret: &str) -> String {
  let mut sorted = params.to_vec();
  sorted.sort_by(|a, b| a.0.cmp(b.0));
  let joined = sorted
    .iter()
    .map(|(k, v)| format!("{k}={v}"))
    .collect::<Vec<_>>()
    .join("&");

  let mut hasher = Sha256::new();
  hasher.update(joined.as_bytes());
  hasher.update(secret.as_bytes());
  hex::encode(hasher.finalize())
}

#[derive(Deserialize)]
struct UploadResponse {
  secure_url: Option<String>,
}

#[derive(Clone)]
pub struct CloudinaryUploader {
  client:     Client,
  upload_url: String,
  api_key:    String,
  api_secret: String,
}

impl CloudinaryUploader {
  pub fn new(config: &CloudinaryConfig) -> Result<Self> {
    let upload_url = format!(
      "{}/v1_1/{}/image/upload",
      config.base_url.trim_end_matches('/'),
      config.cloud_name
    );
    Ok(Self {
      client: build_client(config.timeout_secs)?,
      upload_url,
      api_key: config.api_key.clone(),
      api_secret: config.api_secret.clone(),
    })
  }

  async fn request(&self, path: &Path, folder: &str) -> RemoteResult<String> {
    let bytes = tokio::fs::read(path).await?;
    let file_name = path
      .file_name()
      .map(|n| n.to_string_lossy().into_owned())
      .unwrap_or_else(|| "upload".to_owned());

    let timestamp = Utc::now().timestamp().to_string();
    let signature = sign(
      &[("folder", folder), ("timestamp", timestamp.as_str())],
      &self.api_secret,
    );

    let form = Form::new()
      .part("file", Part::bytes(bytes).file_name(file_name))
      .text("api_key", self.api_key.clone())
      .text("timestamp", timestamp)
      .text("folder", folder.to_owned())
      .text("signature", signature)
      .text("signature_algorithm", "sha256");

    let resp = self
      .client
      .post(&self.upload_url)
      .multipart(form)
      .send()
      .await
      .map_err(transport(SERVICE))?;

    let body: UploadResponse = ensure_success(SERVICE, resp)
      .await?
      .json()
      .await
      .map_err(|e| invalid(SERVICE, e.to_string()))?;

    match body.secure_url {
      Some(url) if !url.is_empty() => {
        tracing::debug!(%url, %folder, "photo uploaded");
        Ok(url)
      }
      _ => Err(invalid(SERVICE, "response has no secure_url")),
    }
  }
}

impl CanonicalUploader for CloudinaryUploader {
  fn upload<'a>(&'a self, path: &'a Path, folder: &'a str) -> BoxFuture<'a, RemoteResult<String>> {
    Box::pin(self.request(path, folder))
  }
}

#[cfg(test)]
mod tests {
  use super::sign;

  #[test]
  fn signature_matches_known_vector() {
    assert_eq!(
      sign(&[("timestamp", "1700000000"), ("folder", "uploads")], "abcd"),
      "1c2c736c66dcb5f94ffda2cb2751df3d12503bdce3d362b23125a8ff47501cbd"
    );
  }

  #[test]
  fn parameter_order_does_not_matter() {
    assert_eq!(
      sign(&[("a", "1"), ("b", "2")], "s"),
      sign(&[("b", "2"), ("a", "1")], "s"),
    );
  }
}
