//! Async HTTP client wrapping the waitlist JSON API.

use std::time::Duration;

use anyhow::{Context, Result, anyhow};
use reqwest::{Client, Response};
use serde::{Deserialize, Serialize};
use waitlist_core::entry::{EntryId, WaitlistEntry};

/// Async HTTP client for the waitlist JSON API.
///
/// Cheap to clone — the inner [`reqwest::Client`] is `Arc`-based.
#[derive(Clone)]
pub struct ApiClient {
  client:   Client,
  base_url: String,
}

#[derive(Deserialize)]
struct ListEnvelope {
  data: Vec<WaitlistEntry>,
}

#[derive(Deserialize)]
struct JoinEnvelope {
  id: EntryId,
}

#[derive(Deserialize)]
struct ErrorEnvelope {
  error: String,
}

#[derive(Serialize)]
struct JoinBody<'a> {
  name:    &'a str,
  country: &'a str,
  email:   &'a str,
}

impl ApiClient {
  pub fn new(base_url: impl Into<String>) -> Result<Self> {
    let client = Client::builder()
      .timeout(Duration::from_secs(30))
      .build()
      .context("failed to build HTTP client")?;
    Ok(Self { client, base_url: base_url.into() })
  }

  fn url(&self, path: &str) -> String {
    format!("{}/api{}", self.base_url.trim_end_matches('/'), path)
  }

  /// `GET /api/join`
  pub async fn list(&self) -> Result<Vec<WaitlistEntry>> {
    let resp = self
      .client
      .get(self.url("/join"))
      .send()
      .await
      .context("GET /join failed")?;
    let resp = check(resp, "GET /join").await?;
    let envelope: ListEnvelope = resp.json().await.context("deserialising entries")?;
    Ok(envelope.data)
  }

  /// `POST /api/join`
  pub async fn join(&self, name: &str, country: &str, email: &str) -> Result<EntryId> {
    let resp = self
      .client
      .post(self.url("/join"))
      .json(&JoinBody { name, country, email })
      .send()
      .await
      .context("POST /join failed")?;
    let resp = check(resp, "POST /join").await?;
    let envelope: JoinEnvelope = resp.json().await.context("deserialising join response")?;
    Ok(envelope.id)
  }
}

/// Turn a non-2xx response into an error carrying the server's message.
async fn check(resp: Response, what: &str) -> Result<Response> {
  let status = resp.status();
  if status.is_success() {
    return Ok(resp);
  }
  let message = resp
    .json::<ErrorEnvelope>()
    .await
    .map(|e| e.error)
    .unwrap_or_else(|_| "no error message".to_string());
  Err(anyhow!("{what} → {status}: {message}"))
}
