//! Client for the external AI similarity scorer.

use reqwest::Client;
use reunite_core::services::{BoxFuture, MatchScorer, RemoteResult};
use serde::Serialize;
use serde_json::Value;

use crate::{
  Result,
  config::EndpointConfig,
  http::{build_client, ensure_success, invalid, transport},
};

const SERVICE: &str = "match scorer";

#[derive(Serialize)]
struct ScoreRequest<'a> {
  searcher_profile:   &'a Value,
  candidate_profiles: &'a [Value],
}

/// `POST {url}` with `{searcher_profile, candidate_profiles}`; the response
/// must be a JSON list and is returned as-is.
#[derive(Clone)]
pub struct HttpMatchScorer {
  client: Client,
  url:    String,
}

impl HttpMatchScorer {
  pub fn new(config: &EndpointConfig) -> Result<Self> {
    Ok(Self {
      client: build_client(config.timeout_secs)?,
      url:    config.url.clone(),
    })
  }

  async fn request(&self, subject: &Value, candidates: &[Value]) -> RemoteResult<Vec<Value>> {
    tracing::debug!(candidates = candidates.len(), "requesting match scores");
    let resp = self
      .client
      .post(&self.url)
      .json(&ScoreRequest {
        searcher_profile:   subject,
        candidate_profiles: candidates,
      })
      .send()
      .await
      .map_err(transport(SERVICE))?;

    let body: Value = ensure_success(SERVICE, resp)
      .await?
      .json()
      .await
      .map_err(|e| invalid(SERVICE, e.to_string()))?;

    match body {
      Value::Array(items) => Ok(items),
      other => Err(invalid(
        SERVICE,
        format!("expected a JSON list, got {}", json_kind(&other)),
      )),
    }
  }
}

fn json_kind(v: &Value) -> &'static str {
  match v {
    Value::Null => "null",
    Value::Bool(_) => "a boolean",
    Value::Number(_) => "a number",
    Value::String(_) => "a string",
    Value::Array(_) => "a list",
    Value::Object(_) => "an object",
  }
}

impl MatchScorer for HttpMatchScorer {
  fn score<'a>(
    &'a self,
    subject: &'a Value,
    candidates: &'a [Value],
  ) -> BoxFuture<'a, RemoteResult<Vec<Value>>> {
    Box::pin(self.request(subject, candidates))
  }
}
