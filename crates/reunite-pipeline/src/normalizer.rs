//! Photo normalization: pull photos stored outside the canonical provider
//! through a scratch file and re-upload them, so every persisted `photo` is a
//! canonical URL.

use std::{path::PathBuf, sync::Arc};

use reunite_core::services::{
  CanonicalUploader, ObjectDownloader, RemoteError,
};

use crate::error::StorageProxyError;

/// A photo reference on a backend the normalizer pulls from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PhotoSource<'a> {
  /// An `https://` URL on the alternate storage domain.
  AlternateHttp(&'a str),
  /// A `gs://bucket/key` object.
  Object { bucket: &'a str, key: &'a str },
}

/// Classify `reference`; `None` means it is left as-is. A `gs://` URI
/// without both a bucket and a key is rejected rather than passed through.
pub fn classify<'a>(
  reference: &'a str,
  alternate_domain: &str,
) -> Result<Option<PhotoSource<'a>>, RemoteError> {
  if let Some(rest) = reference.strip_prefix("https://") {
    let authority = rest.split(['/', '?', '#']).next().unwrap_or_default();
    let host = authority
      .rsplit('@')
      .next()
      .unwrap_or_default()
      .split(':')
      .next()
      .unwrap_or_default();
    if host.eq_ignore_ascii_case(alternate_domain) {
      return Ok(Some(PhotoSource::AlternateHttp(reference)));
    }
    return Ok(None);
  }

  if let Some(rest) = reference.strip_prefix("gs://") {
    return match rest.split_once('/') {
      Some((bucket, key)) if !bucket.is_empty() && !key.is_empty() => {
        Ok(Some(PhotoSource::Object { bucket, key }))
      }
      _ => Err(RemoteError::BadReference(reference.to_owned())),
    };
  }

  Ok(None)
}

pub struct PhotoNormalizer {
  downloader:       Arc<dyn ObjectDownloader>,
  uploader:         Arc<dyn CanonicalUploader>,
  scratch_dir:      PathBuf,
  folder:           String,
  alternate_domain: String,
}

impl PhotoNormalizer {
  pub fn new(
    downloader: Arc<dyn ObjectDownloader>,
    uploader: Arc<dyn CanonicalUploader>,
    scratch_dir: PathBuf,
    folder: String,
    alternate_domain: String,
  ) -> Self {
    Self {
      downloader,
      uploader,
      scratch_dir,
      folder,
      alternate_domain,
    }
  }

  /// Return the canonical URL for `source_url`, re-hosting it if it lives on
  /// a recognised foreign backend.
  pub async fn normalize(&self, source_url: &str) -> Result<String, StorageProxyError> {
    let wrap = |cause: RemoteError| StorageProxyError {
      source_url: source_url.to_owned(),
      cause,
    };

    let Some(source) = classify(source_url, &self.alternate_domain).map_err(wrap)? else {
      tracing::debug!(photo = %source_url, "photo already canonical or unrecognised");
      return Ok(source_url.to_owned());
    };

    // Removed on drop, whichever way this function returns.
    let scratch = tempfile::Builder::new()
      .prefix("photo-")
      .tempfile_in(&self.scratch_dir)
      .map_err(|e| wrap(e.into()))?;

    let bytes = match source {
      PhotoSource::AlternateHttp(url) => self.downloader.fetch_url(url, scratch.path()).await,
      PhotoSource::Object { bucket, key } => {
        self
          .downloader
          .download_object(bucket, key, scratch.path())
          .await
      }
    }
    .map_err(wrap)?;

    let canonical = self
      .uploader
      .upload(scratch.path(), &self.folder)
      .await
      .map_err(wrap)?;

    tracing::debug!(photo = %source_url, %canonical, bytes, "photo normalized");
    Ok(canonical)
  }
}
