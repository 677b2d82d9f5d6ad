//! Trello REST API client.
//!
//! Thin HTTP wrapper: every call gets the static `key`/`token` pair appended
//! as query parameters. No retries. Pure helpers (`build_url`, `parse_body`,
//! `parse_error_body`) are tested directly.

use std::time::Duration;

use reqwest::Url;
use serde_json::Value;
use tracing::{debug, warn};

use super::types::{ProviderCall, ProviderError, TaskBoardApi};
use crate::config::{Credentials, RelayConfig};

// =============================================================================
// CLIENT
// =============================================================================

pub struct TrelloClient {
    http: reqwest::Client,
    base_url: String,
    credentials: Credentials,
}

impl TrelloClient {
    /// Build a client from relay config.
    ///
    /// # Errors
    ///
    /// Returns an error if the HTTP client cannot be constructed.
    pub fn new(config: &RelayConfig) -> Result<Self, ProviderError> {
        let http = reqwest::Client::builder()
            .timeout(Duration::from_secs(config.timeouts.request_secs))
            .connect_timeout(Duration::from_secs(config.timeouts.connect_secs))
            .build()
            .map_err(|e| ProviderError::HttpClientBuild(e.to_string()))?;
        Ok(Self { http, base_url: config.api_base_url.clone(), credentials: config.credentials.clone() })
    }

    #[must_use]
    pub fn base_url(&self) -> &str {
        &self.base_url
    }
}

#[async_trait::async_trait]
impl TaskBoardApi for TrelloClient {
    async fn call(&self, call: ProviderCall) -> Result<Value, ProviderError> {
        let url = build_url(&self.base_url, &self.credentials, &call)?;
        debug!(resource = ?call.resource(), operation = ?call.operation(), method = %call.method(), "provider: request");

        let mut request = self.http.request(call.method(), url);
        if let Some(body) = call.body() {
            request = request.json(&body);
        }

        // `without_url` keeps the credential query string out of error text.
        let response = request
            .send()
            .await
            .map_err(|e| ProviderError::Request(e.without_url().to_string()))?;

        let status = response.status();
        let text = response
            .text()
            .await
            .map_err(|e| ProviderError::Request(e.without_url().to_string()))?;

        if !status.is_success() {
            warn!(
                resource = ?call.resource(),
                operation = ?call.operation(),
                status = status.as_u16(),
                "provider: non-success response"
            );
            return Err(ProviderError::Response { status: status.as_u16(), body: parse_error_body(&text) });
        }

        parse_body(&text)
    }
}

// =============================================================================
// HELPERS
// =============================================================================

/// Assemble the full request URL: base + call path + call query + credentials.
fn build_url(base_url: &str, credentials: &Credentials, call: &ProviderCall) -> Result<Url, ProviderError> {
    let mut url = Url::parse(base_url).map_err(|e| ProviderError::InvalidUrl(format!("{base_url}: {e}")))?;

    url.path_segments_mut()
        .map_err(|()| ProviderError::InvalidUrl(format!("{base_url}: cannot be a base")))?
        .pop_if_empty()
        .extend(call.path_segments(&credentials.token));

    {
        let mut query = url.query_pairs_mut();
        for (name, value) in call.query() {
            query.append_pair(name, &value);
        }
        query.append_pair("key", &credentials.key);
        if call.sends_token_param() {
            query.append_pair("token", &credentials.token);
        }
    }

    Ok(url)
}

/// Parse a success body. Empty bodies (e.g. some DELETE responses) become `null`.
fn parse_body(text: &str) -> Result<Value, ProviderError> {
    if text.trim().is_empty() {
        return Ok(Value::Null);
    }
    serde_json::from_str(text).map_err(|e| ProviderError::Parse(e.to_string()))
}

/// Parse an error body: JSON when possible, otherwise the raw text.
/// Trello often answers errors with plain text such as `invalid id`.
fn parse_error_body(text: &str) -> Option<Value> {
    let trimmed = text.trim();
    if trimmed.is_empty() {
        return None;
    }
    Some(serde_json::from_str(trimmed).unwrap_or_else(|_| Value::String(trimmed.to_string())))
}

#[cfg(test)]
#[path = "trello_test.rs"]
mod tests;
