//! `Cache-Control` directive parsing

use std::collections::HashMap;

use http::HeaderMap;
use http::header::CACHE_CONTROL;

use crate::constants::DIRECTIVE_MAX_AGE;

/// Directives from every `Cache-Control` value of a header map
///
/// Directive names are lowercased; values have surrounding quotes removed.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CacheControl {
    directives: HashMap<String, Option<String>>,
}

impl CacheControl {
    /// Parse all `Cache-Control` headers
    pub fn from_headers(headers: &HeaderMap) -> Self {
        let mut directives = HashMap::new();
        for value in headers.get_all(CACHE_CONTROL) {
            let Ok(value) = value.to_str() else {
                continue;
            };
            for part in value.split(',') {
                let part = part.trim();
                if part.is_empty() {
                    continue;
                }
                match part.split_once('=') {
                    Some((name, val)) => directives.insert(
                        name.trim().to_ascii_lowercase(),
                        Some(val.trim().trim_matches('"').to_string()),
                    ),
                    None => directives.insert(part.to_ascii_lowercase(), None),
                };
            }
        }
        Self { directives }
    }

    /// Whether a directive is present
    pub fn has(&self, directive: &str) -> bool {
        self.directives.contains_key(directive)
    }

    /// `max-age` in seconds, if present and numeric
    pub fn max_age(&self) -> Option<u64> {
        self.directives
            .get(DIRECTIVE_MAX_AGE)
            .and_then(|v| v.as_deref())
            .and_then(|v| v.parse().ok())
    }

    /// Whether no directives were found
    pub fn is_empty(&self) -> bool {
        self.directives.is_empty()
    }
}
