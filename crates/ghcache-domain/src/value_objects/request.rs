//! Outgoing request and its coalescing key

use std::fmt;

use bytes::Bytes;
use http::header::{HeaderName, HeaderValue, RANGE};
use http::{HeaderMap, Method, Uri};

/// A request to the upstream API
///
/// Headers are a name → value-list map; the body is opaque. Cloning is cheap
/// because the body is a shared immutable buffer.
#[derive(Debug, Clone)]
pub struct Request {
    method: Method,
    url: String,
    headers: HeaderMap,
    body: Bytes,
}

impl Request {
    /// Create a request with no headers and an empty body
    pub fn new<S: Into<String>>(method: Method, url: S) -> Self {
        Self {
            method,
            url: url.into(),
            headers: HeaderMap::new(),
            body: Bytes::new(),
        }
    }

    /// Create a GET request
    pub fn get<S: Into<String>>(url: S) -> Self {
        Self::new(Method::GET, url)
    }

    /// Add a header, keeping any existing values for the same name
    pub fn with_header(mut self, name: HeaderName, value: HeaderValue) -> Self {
        self.headers.append(name, value);
        self
    }

    /// Set the request body
    pub fn with_body<B: Into<Bytes>>(mut self, body: B) -> Self {
        self.body = body.into();
        self
    }

    /// HTTP method
    pub fn method(&self) -> &Method {
        &self.method
    }

    /// Request URL as given by the caller
    pub fn url(&self) -> &str {
        &self.url
    }

    /// Request headers
    pub fn headers(&self) -> &HeaderMap {
        &self.headers
    }

    /// Mutable request headers
    pub fn headers_mut(&mut self) -> &mut HeaderMap {
        &mut self.headers
    }

    /// Request body
    pub fn body(&self) -> &Bytes {
        &self.body
    }

    /// First value of a header as a string, if present and visible ASCII
    pub fn header_str(&self, name: &str) -> Option<&str> {
        self.headers.get(name).and_then(|v| v.to_str().ok())
    }

    /// Whether this request participates in coalescing
    ///
    /// Only GET is treated as an idempotent read; every other method goes
    /// straight to the delegate.
    pub fn is_idempotent_read(&self) -> bool {
        self.method == Method::GET
    }

    /// Whether a response to this request may be served from or written to the store
    pub fn is_cacheable(&self) -> bool {
        (self.method == Method::GET || self.method == Method::HEAD)
            && !self.headers.contains_key(RANGE)
    }

    /// Coalescing key for this request
    pub fn key(&self) -> RequestKey {
        RequestKey::from_url(&self.url)
    }

    /// Cache store key: the URL for GET, `"<METHOD> <URL>"` otherwise
    pub fn store_key(&self) -> String {
        let key = self.key();
        if self.method == Method::GET {
            key.into_string()
        } else {
            format!("{} {}", self.method, key)
        }
    }
}

/// Canonical identifier of a read request
///
/// Scheme and authority are lowercased; an empty path becomes `/`. URLs that
/// do not parse are used verbatim (trimmed).
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct RequestKey(String);

impl RequestKey {
    /// Normalize a URL into a key
    pub fn from_url(url: &str) -> Self {
        let trimmed = url.trim();
        let Ok(uri) = trimmed.parse::<Uri>() else {
            return Self(trimmed.to_string());
        };
        match (uri.scheme_str(), uri.authority()) {
            (Some(scheme), Some(authority)) => {
                let path = uri.path_and_query().map_or("/", |pq| pq.as_str());
                let path = if path.is_empty() { "/" } else { path };
                Self(format!(
                    "{}://{}{}",
                    scheme.to_ascii_lowercase(),
                    authority.as_str().to_ascii_lowercase(),
                    path
                ))
            }
            _ => Self(trimmed.to_string()),
        }
    }

    /// Key as a string slice
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Consume the key into its string form
    pub fn into_string(self) -> String {
        self.0
    }
}

impl fmt::Display for RequestKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}
