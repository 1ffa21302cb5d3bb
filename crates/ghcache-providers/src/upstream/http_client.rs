//! Reqwest upstream client
//!
//! Conditional requests answered with `304` are returned as ordinary
//! responses; only transport failures become errors.

use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use ghcache_domain::error::{Error, Result};
use ghcache_domain::ports::Fetcher;
use ghcache_domain::{Request, Response};
use http::header::AUTHORIZATION;
use reqwest::Client;
use tracing::trace;

use crate::constants::{UPSTREAM_DEFAULT_TIMEOUT_SECS, UPSTREAM_DEFAULT_USER_AGENT};

/// Upstream client configuration
#[derive(Debug, Clone)]
pub struct UpstreamClientConfig {
    /// Total timeout for one request, body included
    pub timeout: Duration,
    /// `User-Agent` sent with every request
    pub user_agent: String,
    /// Bearer token added when the request has no `Authorization` header
    pub token: Option<String>,
}

impl Default for UpstreamClientConfig {
    fn default() -> Self {
        Self {
            timeout: Duration::from_secs(UPSTREAM_DEFAULT_TIMEOUT_SECS),
            user_agent: UPSTREAM_DEFAULT_USER_AGENT.to_string(),
            token: None,
        }
    }
}

/// [`Fetcher`] backed by a pooled reqwest client
#[derive(Clone)]
pub struct ReqwestUpstream {
    client: Client,
    token: Option<String>,
}

impl ReqwestUpstream {
    /// Build a client from `config`
    ///
    /// # Errors
    ///
    /// Returns [`Error::Configuration`] when the client cannot be constructed.
    pub fn new(config: &UpstreamClientConfig) -> Result<Self> {
        let client = Client::builder()
            .timeout(config.timeout)
            .user_agent(config.user_agent.clone())
            .build()
            .map_err(|e| Error::configuration_with_source("Failed to create HTTP client", e))?;
        Ok(Self {
            client,
            token: config.token.clone(),
        })
    }

    /// Wrap an existing client
    pub fn with_client(client: Client, token: Option<String>) -> Self {
        Self { client, token }
    }
}

fn transport_error(url: &str, e: reqwest::Error) -> Error {
    let message = if e.is_timeout() {
        format!("Request to {url} timed out")
    } else {
        format!("Request to {url} failed")
    };
    Error::Upstream {
        message,
        status: e.status().map(|s| s.as_u16()),
        source: Some(Arc::new(e)),
    }
}

#[async_trait]
impl Fetcher for ReqwestUpstream {
    async fn fetch(&self, request: Request) -> Result<Response> {
        let url = request.url().to_string();
        let mut builder = self
            .client
            .request(request.method().clone(), url.as_str())
            .headers(request.headers().clone());
        let token = self
            .token
            .as_ref()
            .filter(|_| !request.headers().contains_key(AUTHORIZATION));
        if let Some(token) = token {
            builder = builder.bearer_auth(token);
        }
        if !request.body().is_empty() {
            builder = builder.body(request.body().clone());
        }

        let response = builder
            .send()
            .await
            .map_err(|e| transport_error(&url, e))?;
        let status = response.status();
        let headers = response.headers().clone();
        let body = response
            .bytes()
            .await
            .map_err(|e| transport_error(&url, e))?;

        trace!(url = %url, status = status.as_u16(), bytes = body.len(), "Upstream response");
        Ok(Response::from_parts(status, headers, body))
    }
}

impl std::fmt::Debug for ReqwestUpstream {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ReqwestUpstream")
            .field("token", &self.token.as_ref().map(|_| "<redacted>"))
            .finish_non_exhaustive()
    }
}
