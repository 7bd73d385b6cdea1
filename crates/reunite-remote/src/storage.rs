//! Photo downloads from non-canonical storage.
//!
//! Plain URLs are fetched with a GET; `gs://bucket/key` objects go through
//! the GCS JSON API (`/storage/v1/b/{bucket}/o/{key}?alt=media`).

use std::path::Path;

use reqwest::{Client, Url};
use reunite_core::services::{BoxFuture, ObjectDownloader, RemoteError, RemoteResult};

use crate::{
  Error, Result,
  config::GcsConfig,
  http::{build_client, ensure_success, transport, write_body},
};

const HTTP_SERVICE: &str = "photo download";
const GCS_SERVICE: &str = "object storage";

#[derive(Clone)]
pub struct StorageDownloader {
  client:       Client,
  base_url:     Url,
  access_token: Option<String>,
}

impl StorageDownloader {
  pub fn new(config: &GcsConfig) -> Result<Self> {
    let base_url = Url::parse(&config.base_url)
      .map_err(|e| Error::InvalidConfig(format!("gcs base_url: {e}")))?;
    if base_url.cannot_be_a_base() {
      return Err(Error::InvalidConfig(format!(
        "gcs base_url is not a base URL: {base_url}"
      )));
    }
    Ok(Self {
      client: build_client(config.timeout_secs)?,
      base_url,
      access_token: config.access_token.clone(),
    })
  }

  /// The media URL for an object. The key is encoded as a single path
  /// segment, so `/` inside it becomes `%2F`.
  pub fn object_url(&self, bucket: &str, key: &str) -> RemoteResult<Url> {
    let mut url = self.base_url.clone();
    url
      .path_segments_mut()
      .map_err(|()| RemoteError::BadReference(format!("gs://{bucket}/{key}")))?
      .pop_if_empty()
      .extend(["storage", "v1", "b", bucket, "o", key]);
    url.query_pairs_mut().append_pair("alt", "media");
    Ok(url)
  }

  async fn get_url(&self, url: &str, dest: &Path) -> RemoteResult<u64> {
    tracing::debug!(%url, "downloading photo");
    let resp = self
      .client
      .get(url)
      .send()
      .await
      .map_err(transport(HTTP_SERVICE))?;
    let resp = ensure_success(HTTP_SERVICE, resp).await?;
    write_body(HTTP_SERVICE, resp, dest).await
  }

  async fn get_object(&self, bucket: &str, key: &str, dest: &Path) -> RemoteResult<u64> {
    let url = self.object_url(bucket, key)?;
    tracing::debug!(%bucket, %key, "downloading storage object");
    let mut req = self.client.get(url);
    if let Some(token) = &self.access_token {
      req = req.bearer_auth(token);
    }
    let resp = req.send().await.map_err(transport(GCS_SERVICE))?;
    let resp = ensure_success(GCS_SERVICE, resp).await?;
    write_body(GCS_SERVICE, resp, dest).await
  }
}

impl ObjectDownloader for StorageDownloader {
  fn fetch_url<'a>(&'a self, url: &'a str, dest: &'a Path) -> BoxFuture<'a, RemoteResult<u64>> {
    Box::pin(self.get_url(url, dest))
  }

  fn download_object<'a>(
    &'a self,
    bucket: &'a str,
    key: &'a str,
    dest: &'a Path,
  ) -> BoxFuture<'a, RemoteResult<u64>> {
    Box::pin(self.get_object(bucket, key, dest))
  }
}
