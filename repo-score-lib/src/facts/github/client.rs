//! GitHub GraphQL client
//!
//! Minimal client for the GitHub v4 API. Every query goes through [`Client::query`], which
//! classifies HTTP failures and GraphQL-level errors into [`ohno::AppError`] values.

use crate::Result;
use chrono::{DateTime, Utc};
use core::time::Duration;
use ohno::{IntoAppError, bail};
use reqwest::StatusCode;
use reqwest::header::HeaderMap;
use serde::Deserialize;
use serde::de::DeserializeOwned;
use serde_json::{Value, json};

pub(super) const LOG_TARGET: &str = "    github";

/// Rate limit information from response headers
#[derive(Debug, Clone, Copy)]
pub struct RateLimitInfo {
    pub remaining: usize,
    pub reset_at: DateTime<Utc>,
}

#[derive(Debug, Deserialize)]
struct GraphQlResponse<T> {
    data: Option<T>,
    #[serde(default)]
    errors: Vec<GraphQlError>,
}

#[derive(Debug, Deserialize)]
struct GraphQlError {
    message: String,
}

#[derive(Debug, Deserialize)]
struct ViewerData {
    viewer: Viewer,
}

#[derive(Debug, Deserialize)]
struct Viewer {
    login: String,
}

const VIEWER_QUERY: &str = "query { viewer { login } }";

/// GitHub GraphQL API client
#[derive(Debug, Clone)]
pub struct Client {
    client: reqwest::Client,
    endpoint: String,
}

impl Client {
    /// Create a new client with an optional authentication token.
    ///
    /// `base_url` is the API root (`https://api.github.com` for github.com); the GraphQL
    /// endpoint lives under it.
    pub fn new(token: Option<&str>, base_url: &str, timeout: Duration) -> Result<Self> {
        use reqwest::header::{AUTHORIZATION, HeaderValue};

        let mut client_builder = reqwest::Client::builder().user_agent("repo-score").timeout(timeout);

        if let Some(t) = token {
            let mut auth_val = HeaderValue::from_str(&format!("bearer {t}"))?;
            auth_val.set_sensitive(true);

            let mut headers = HeaderMap::new();
            let _ = headers.insert(AUTHORIZATION, auth_val);

            client_builder = client_builder.default_headers(headers);
        }

        Ok(Self {
            client: client_builder.build()?,
            endpoint: format!("{}/graphql", base_url.trim_end_matches('/')),
        })
    }

    /// The GraphQL endpoint this client posts to
    #[must_use]
    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }

    /// Run a GraphQL query and decode its `data` payload.
    pub async fn query<T: DeserializeOwned>(&self, query: &str, variables: Value) -> Result<T> {
        let resp = self.post(query, variables).await?;
        decode(resp).await
    }

    /// Check whether the configured token is accepted by GitHub.
    ///
    /// Returns `false` when GitHub answers with bad credentials; any other failure is an error.
    pub async fn validate_token(&self) -> Result<bool> {
        let resp = self.post(VIEWER_QUERY, json!({})).await?;
        if resp.status() == StatusCode::UNAUTHORIZED {
            return Ok(false);
        }

        let data: ViewerData = decode(resp).await?;
        log::info!(target: LOG_TARGET, "Authenticated to GitHub as '{}'", data.viewer.login);
        Ok(true)
    }

    async fn post(&self, query: &str, variables: Value) -> Result<reqwest::Response> {
        self.client
            .post(&self.endpoint)
            .json(&json!({ "query": query, "variables": variables }))
            .send()
            .await
            .into_app_err_with(|| format!("sending GraphQL request to '{}'", self.endpoint))
    }
}

/// Classify the response status and unwrap the GraphQL envelope
async fn decode<T: DeserializeOwned>(resp: reqwest::Response) -> Result<T> {
    let rate_limit = extract_rate_limit_from_headers(resp.headers());
    if let Some(rl) = &rate_limit {
        log::debug!(
            target: LOG_TARGET,
            "GitHub API quota: {} remaining, resets at {}",
            rl.remaining,
            rl.reset_at.with_timezone(&chrono::Local).format("%T")
        );
    }

    let status = resp.status();
    if !status.is_success() {
        match status {
            StatusCode::UNAUTHORIZED => bail!("GitHub rejected the request: bad credentials"),
            StatusCode::FORBIDDEN | StatusCode::TOO_MANY_REQUESTS => match rate_limit {
                Some(rl) if rl.remaining == 0 => {
                    bail!("GitHub API rate limit exceeded, resets at {}", rl.reset_at.to_rfc3339())
                }
                _ => bail!("GitHub API request was refused ({status})"),
            },
            _ => bail!("GitHub API request failed ({status})"),
        }
    }

    let body: GraphQlResponse<T> = resp.json().await.into_app_err("decoding GitHub GraphQL response")?;

    if !body.errors.is_empty() {
        let messages: Vec<_> = body.errors.iter().map(|e| e.message.as_str()).collect();
        bail!("GitHub GraphQL query failed: {}", messages.join("; "));
    }

    body.data.into_app_err("GitHub GraphQL response contained no data")
}

/// Extract rate limit information from API response headers
fn extract_rate_limit_from_headers(headers: &HeaderMap) -> Option<RateLimitInfo> {
    let remaining = headers.get("x-ratelimit-remaining")?.to_str().ok()?.parse::<usize>().ok()?;

    let reset_timestamp = headers.get("x-ratelimit-reset")?.to_str().ok()?.parse::<i64>().ok()?;

    let reset_at = DateTime::from_timestamp(reset_timestamp, 0)?;

    Some(RateLimitInfo { remaining, reset_at })
}
