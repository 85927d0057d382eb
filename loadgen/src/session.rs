//! Per-user HTTP session
//!
//! Each simulated user owns one `UserSession`: its own connection pool,
//! cookie jar and base URL. Sessions are created when the user starts and
//! dropped when it stops.

use reqwest::header::CONTENT_TYPE;
use reqwest::{Client, Response, Url};
use std::time::Duration;

use crate::error::LoadGenError;

/// HTTP context bound to one simulated user
#[derive(Debug, Clone)]
pub struct UserSession {
    client: Client,
    base_url: String,
}

impl UserSession {
    /// Build a session with a fresh client for `base_url`
    pub fn new(base_url: &str, request_timeout: Duration) -> Result<Self, LoadGenError> {
        let base_url = normalize_base_url(base_url)?;
        let client = Client::builder()
            .cookie_store(true)
            .timeout(request_timeout)
            .build()?;
        Ok(Self { client, base_url })
    }

    /// Base URL without a trailing slash
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Absolute URL for `path`
    pub fn url(&self, path: &str) -> String {
        if path.starts_with('/') {
            format!("{}{}", self.base_url, path)
        } else {
            format!("{}/{}", self.base_url, path)
        }
    }

    /// POST an already-encoded JSON body
    pub async fn post_json(&self, path: &str, body: String) -> Result<Response, reqwest::Error> {
        self.client
            .post(self.url(path))
            .header(CONTENT_TYPE, "application/json")
            .body(body)
            .send()
            .await
    }
}

/// Validate a target host and strip trailing slashes
pub fn normalize_base_url(host: &str) -> Result<String, LoadGenError> {
    let trimmed = host.trim().trim_end_matches('/');
    let url = Url::parse(trimmed)
        .map_err(|e| LoadGenError::InvalidTargetHost(format!("{}: {}", host, e)))?;

    if !matches!(url.scheme(), "http" | "https") || url.host_str().is_none() {
        return Err(LoadGenError::InvalidTargetHost(host.to_string()));
    }

    Ok(trimmed.to_string())
}
