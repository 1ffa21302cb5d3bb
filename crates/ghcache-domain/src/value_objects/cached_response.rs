//! Persisted response snapshot
//!
//! A [`CachedResponse`] is what the cache store holds for a key: status,
//! headers, body, the time it was stored and the request header values named
//! by the response's `Vary` header. It is serialized to JSON with the body in
//! base64; the format is private to this crate.

use std::collections::BTreeMap;

use base64::Engine;
use base64::engine::general_purpose::STANDARD;
use bytes::Bytes;
use chrono::{DateTime, Utc};
use http::header::{HeaderName, HeaderValue, VARY};
use http::{HeaderMap, StatusCode};
use serde::{Deserialize, Serialize};

use crate::constants::COORDINATION_HEADERS;
use crate::error::{Error, Result};
use crate::value_objects::{Request, Response};

/// Stored snapshot of an upstream response
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CachedResponse {
    /// HTTP status code
    pub status: u16,
    /// Header name/value pairs in original order
    pub headers: Vec<(String, String)>,
    /// Body, base64 encoded
    pub body: String,
    /// When the snapshot was written
    pub stored_at: DateTime<Utc>,
    /// Request header values for each header named by `Vary`
    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    pub varied: BTreeMap<String, String>,
}

impl CachedResponse {
    /// Snapshot a response for storage
    ///
    /// Coordination markers are dropped and the request values of every
    /// `Vary` header are recorded. Header values that are not visible ASCII
    /// cannot be represented and are skipped.
    pub fn capture(response: &Response, request: &Request, stored_at: DateTime<Utc>) -> Self {
        let headers = response
            .headers()
            .iter()
            .filter(|(name, _)| !COORDINATION_HEADERS.contains(&name.as_str()))
            .filter_map(|(name, value)| {
                value
                    .to_str()
                    .ok()
                    .map(|v| (name.as_str().to_string(), v.to_string()))
            })
            .collect();

        let varied = vary_names(response.headers())
            .into_iter()
            .map(|name| {
                let value = joined_values(request.headers(), &name);
                (name, value)
            })
            .collect();

        Self {
            status: response.status().as_u16(),
            headers,
            body: STANDARD.encode(response.body()),
            stored_at,
            varied,
        }
    }

    /// Rebuild a response from the snapshot
    pub fn to_response(&self) -> Result<Response> {
        let status = StatusCode::from_u16(self.status)
            .map_err(|e| Error::read_with_source("Invalid status in cached response", e))?;

        let mut headers = HeaderMap::with_capacity(self.headers.len());
        for (name, value) in &self.headers {
            let name = HeaderName::from_bytes(name.as_bytes())
                .map_err(|e| Error::read_with_source("Invalid header name in cached response", e))?;
            let value = HeaderValue::from_str(value).map_err(|e| {
                Error::read_with_source("Invalid header value in cached response", e)
            })?;
            headers.append(name, value);
        }

        let body = STANDARD
            .decode(&self.body)
            .map_err(|e| Error::read_with_source("Invalid body in cached response", e))?;

        Ok(Response::from_parts(status, headers, Bytes::from(body)))
    }

    /// Whether the request matches the values recorded for every `Vary` header
    pub fn vary_matches(&self, request: &Request) -> bool {
        self.varied
            .iter()
            .all(|(name, recorded)| joined_values(request.headers(), name) == *recorded)
    }

    /// First value of a stored header, compared case-insensitively
    pub fn header(&self, name: &str) -> Option<&str> {
        self.headers
            .iter()
            .find(|(n, _)| n.eq_ignore_ascii_case(name))
            .map(|(_, v)| v.as_str())
    }

    /// Seconds since the snapshot was stored
    pub fn age_secs(&self, now: DateTime<Utc>) -> u64 {
        u64::try_from((now - self.stored_at).num_seconds()).unwrap_or(0)
    }

    /// Serialize for the cache store
    pub fn encode(&self) -> Result<Vec<u8>> {
        Ok(serde_json::to_vec(self)?)
    }

    /// Deserialize bytes read from the cache store
    pub fn decode(bytes: &[u8]) -> Result<Self> {
        serde_json::from_slice(bytes)
            .map_err(|e| Error::read_with_source("Failed to decode cached response", e))
    }
}

/// Lowercased header names listed in every `Vary` value
fn vary_names(headers: &HeaderMap) -> Vec<String> {
    headers
        .get_all(VARY)
        .iter()
        .filter_map(|v| v.to_str().ok())
        .flat_map(|v| v.split(','))
        .map(|name| name.trim().to_ascii_lowercase())
        .filter(|name| !name.is_empty() && name != "*")
        .collect()
}

fn joined_values(headers: &HeaderMap, name: &str) -> String {
    headers
        .get_all(name)
        .iter()
        .filter_map(|v| v.to_str().ok())
        .collect::<Vec<_>>()
        .join(", ")
}
