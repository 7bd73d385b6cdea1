//! Remote collaborators of the intake pipeline.
//!
//! Each trait is object-safe so the pipeline can hold `Arc<dyn Trait>` and
//! tests can substitute stubs. Implementations make exactly one attempt per
//! call; timeouts and degradation are the caller's decision.

use std::{future::Future, path::Path, pin::Pin};

use serde::{Deserialize, Serialize};
use serde_json::Value;
use thiserror::Error;

use crate::report::{NewUnidentifiedPerson, PhysicalDescription};

pub type BoxFuture<'a, T> = Pin<Box<dyn Future<Output = T> + Send + 'a>>;

pub type RemoteResult<T> = std::result::Result<T, RemoteError>;

/// Failure of a single remote call.
#[derive(Debug, Error)]
pub enum RemoteError {
  #[error("{service} request failed: {source}")]
  Transport {
    service: &'static str,
    #[source]
    source:  Box<dyn std::error::Error + Send + Sync>,
  },

  #[error("{service} returned HTTP {status}: {body}")]
  Status {
    service: &'static str,
    status:  u16,
    body:    String,
  },

  #[error("{service} returned an unusable response: {message}")]
  InvalidResponse {
    service: &'static str,
    message: String,
  },

  #[error("{service} did not respond within {seconds}s")]
  Timeout { service: &'static str, seconds: u64 },

  #[error("malformed object reference: {0:?}")]
  BadReference(String),

  #[error("scratch file error: {0}")]
  Io(#[from] std::io::Error),
}

// ─── Scoring ─────────────────────────────────────────────────────────────────

/// The external similarity scorer. Its response is opaque to the pipeline
/// beyond being a list.
pub trait MatchScorer: Send + Sync {
  fn score<'a>(
    &'a self,
    subject: &'a Value,
    candidates: &'a [Value],
  ) -> BoxFuture<'a, RemoteResult<Vec<Value>>>;
}

// ─── Enrichment ──────────────────────────────────────────────────────────────

/// The fields the enrichment service may rewrite. Anything else in its
/// response is ignored so no intake field is lost on reassignment.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EnrichedFields {
  #[serde(default)]
  pub physical_description: Option<PhysicalDescription>,
  #[serde(default)]
  pub photo:                Option<String>,
}

/// AI pre-processing of a raw unidentified-person intake.
pub trait Enricher: Send + Sync {
  fn enrich<'a>(
    &'a self,
    intake: &'a NewUnidentifiedPerson,
  ) -> BoxFuture<'a, RemoteResult<EnrichedFields>>;
}

// ─── Photo storage ───────────────────────────────────────────────────────────

/// Fetches photos from non-canonical storage into a local file.
pub trait ObjectDownloader: Send + Sync {
  /// Plain HTTP GET of `url` into `dest`. Returns the number of bytes
  /// written.
  fn fetch_url<'a>(
    &'a self,
    url: &'a str,
    dest: &'a Path,
  ) -> BoxFuture<'a, RemoteResult<u64>>;

  /// Download `key` from `bucket` via the provider's object API.
  fn download_object<'a>(
    &'a self,
    bucket: &'a str,
    key: &'a str,
    dest: &'a Path,
  ) -> BoxFuture<'a, RemoteResult<u64>>;
}

/// The canonical photo provider.
pub trait CanonicalUploader: Send + Sync {
  /// Upload the file at `path` into `folder`; returns its public URL.
  fn upload<'a>(
    &'a self,
    path: &'a Path,
    folder: &'a str,
  ) -> BoxFuture<'a, RemoteResult<String>>;
}

// ─── Messaging ───────────────────────────────────────────────────────────────

pub trait SmsGateway: Send + Sync {
  fn send<'a>(&'a self, to: &'a str, body: &'a str) -> BoxFuture<'a, RemoteResult<()>>;
}
