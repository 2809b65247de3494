//! Shared HTTP plumbing for the upstream adapters

use crate::error::{BiblioError, SourceError};
use reqwest::Client;
use serde_json::Value;
use std::time::Duration;

pub(crate) const USER_AGENT: &str = concat!("biblio/", env!("CARGO_PKG_VERSION"));

/// Build the HTTP client shared by all adapters
///
/// `timeout` bounds every request end to end.
pub fn build_client(timeout: Duration) -> Result<Client, BiblioError> {
    Client::builder()
        .user_agent(USER_AGENT)
        .timeout(timeout)
        .build()
        .map_err(|e| BiblioError::HttpClient(e.to_string()))
}

/// GET `url` and decode the body as JSON, failing on non-2xx statuses
///
/// Error bodies are never read.
pub(crate) async fn get_json(client: &Client, url: &str) -> Result<Value, SourceError> {
    let response = client.get(url).send().await?;
    let status = response.status();
    if !status.is_success() {
        return Err(SourceError::Status {
            status_code: status.as_u16(),
            message: status.canonical_reason().unwrap_or("Unknown").to_string(),
        });
    }
    Ok(response.json().await?)
}
