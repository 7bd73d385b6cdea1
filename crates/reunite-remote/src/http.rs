//! Shared request plumbing for the remote clients.

use std::{path::Path, time::Duration};

use reqwest::{Client, Response};
use reunite_core::services::{RemoteError, RemoteResult};
use tokio::io::AsyncWriteExt as _;

use crate::Result;

/// Error bodies are echoed into logs; keep them short.
const MAX_ERROR_BODY: usize = 512;

pub fn build_client(timeout_secs: u64) -> Result<Client> {
  Ok(
    Client::builder()
      .timeout(Duration::from_secs(timeout_secs))
      .build()?,
  )
}

pub fn transport(service: &'static str) -> impl Fn(reqwest::Error) -> RemoteError {
  move |e| RemoteError::Transport {
    service,
    source: Box::new(e),
  }
}

pub fn invalid(service: &'static str, message: impl Into<String>) -> RemoteError {
  RemoteError::InvalidResponse {
    service,
    message: message.into(),
  }
}

/// Turn a non-2xx response into [`RemoteError::Status`].
pub async fn ensure_success(service: &'static str, resp: Response) -> RemoteResult<Response> {
  let status = resp.status();
  if status.is_success() {
    return Ok(resp);
  }
  let mut body = resp.text().await.unwrap_or_default();
  if body.len() > MAX_ERROR_BODY {
    let mut cut = MAX_ERROR_BODY;
    while !body.is_char_boundary(cut) {
      cut -= 1;
    }
    body.truncate(cut);
  }
  Err(RemoteError::Status {
    service,
    status: status.as_u16(),
    body,
  })
}

/// Stream a response body into `dest`, replacing any existing content.
pub async fn write_body(
  service: &'static str,
  mut resp: Response,
  dest: &Path,
) -> RemoteResult<u64> {
  let mut file = tokio::fs::File::create(dest).await?;
  let mut written = 0u64;
  while let Some(chunk) = resp.chunk().await.map_err(transport(service))? {
    file.write_all(&chunk).await?;
    written += chunk.len() as u64;
  }
  file.flush().await?;
  Ok(written)
}
