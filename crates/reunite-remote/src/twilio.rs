//! Outbound SMS through the Twilio REST API.

use reqwest::Client;
use reunite_core::services::{BoxFuture, RemoteResult, SmsGateway};

use crate::{
  Result,
  config::TwilioConfig,
  http::{build_client, ensure_success, transport},
};

const SERVICE: &str = "sms gateway";

#[derive(Clone)]
pub struct TwilioSms {
  client:      Client,
  url:         String,
  account_sid: String,
  auth_token:  String,
  from_number: String,
}

impl TwilioSms {
  pub fn new(config: &TwilioConfig) -> Result<Self> {
    let url = format!(
      "{}/2010-04-01/Accounts/{}/Messages.json",
      config.base_url.trim_end_matches('/'),
      config.account_sid
    );
    Ok(Self {
      client: build_client(config.timeout_secs)?,
      url,
      account_sid: config.account_sid.clone(),
      auth_token: config.auth_token.clone(),
      from_number: config.from_number.clone(),
    })
  }

  async fn request(&self, to: &str, body: &str) -> RemoteResult<()> {
    let resp = self
      .client
      .post(&self.url)
      .basic_auth(&self.account_sid, Some(&self.auth_token))
      .form(&[("To", to), ("From", self.from_number.as_str()), ("Body", body)])
      .send()
      .await
      .map_err(transport(SERVICE))?;
    ensure_success(SERVICE, resp).await?;
    tracing::debug!(%to, "sms accepted");
    Ok(())
  }
}

impl SmsGateway for TwilioSms {
  fn send<'a>(&'a self, to: &'a str, body: &'a str) -> BoxFuture<'a, RemoteResult<()>> {
    Box::pin(self.request(to, body))
  }
}
