//! Client for the AI enrichment service that pre-processes unidentified-person
//! intakes (photo clean-up, attribute extraction).

use reqwest::Client;
use reunite_core::{
  report::NewUnidentifiedPerson,
  services::{BoxFuture, EnrichedFields, Enricher, RemoteResult},
};

use crate::{
  Result,
  config::EndpointConfig,
  http::{build_client, ensure_success, invalid, transport},
};

const SERVICE: &str = "enrichment service";

#[derive(Clone)]
pub struct HttpEnricher {
  client: Client,
  url:    String,
}

impl HttpEnricher {
  pub fn new(config: &EndpointConfig) -> Result<Self> {
    Ok(Self {
      client: build_client(config.timeout_secs)?,
      url:    config.url.clone(),
    })
  }

  async fn request(&self, intake: &NewUnidentifiedPerson) -> RemoteResult<EnrichedFields> {
    tracing::debug!(url = %self.url, "requesting enrichment");
    let resp = self
      .client
      .post(&self.url)
      .json(intake)
      .send()
      .await
      .map_err(transport(SERVICE))?;

    ensure_success(SERVICE, resp)
      .await?
      .json::<EnrichedFields>()
      .await
      .map_err(|e| invalid(SERVICE, e.to_string()))
  }
}

impl Enricher for HttpEnricher {
  fn enrich<'a>(
    &'a self,
    intake: &'a NewUnidentifiedPerson,
  ) -> BoxFuture<'a, RemoteResult<EnrichedFields>> {
    Box::pin(self.request(intake))
  }
}
