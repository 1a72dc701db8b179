use std::time::Duration;

use url::Url;

/// Header the content store reads the API key from.
pub const DEFAULT_KEY_HEADER: &str = "X-MICROCMS-API-KEY";

/// Stable key for the cached item list. Versioned so a format change never
/// reads an older layout.
pub const DEFAULT_CACHE_KEY: &str = "gallery/items/v1";

pub const DEFAULT_PAGE_SIZE: usize = 100;

pub const DEFAULT_CACHE_TTL: Duration = Duration::from_secs(5 * 60);

/// How the provider pages and caches.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProviderSettings {
    pub page_size: usize,
    /// Cached lists older than this are ignored.
    pub cache_ttl: Duration,
    pub cache_key: String,
}

impl Default for ProviderSettings {
    fn default() -> Self {
        Self {
            page_size: DEFAULT_PAGE_SIZE,
            cache_ttl: DEFAULT_CACHE_TTL,
            cache_key: DEFAULT_CACHE_KEY.to_string(),
        }
    }
}

/// Connection details for the content API.
#[derive(Clone)]
pub struct ContentApiSettings {
    pub endpoint: Url,
    pub api_key: Option<String>,
    pub key_header: String,
    pub timeout: Duration,
}

impl ContentApiSettings {
    pub fn new(endpoint: Url, api_key: Option<String>) -> Self {
        Self {
            endpoint,
            api_key: api_key.filter(|key| !key.trim().is_empty()),
            key_header: DEFAULT_KEY_HEADER.to_string(),
            timeout: Duration::from_secs(30),
        }
    }
}

impl std::fmt::Debug for ContentApiSettings {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ContentApiSettings")
            .field("endpoint", &self.endpoint.as_str())
            .field("has_api_key", &self.api_key.is_some())
            .field("key_header", &self.key_header)
            .field("timeout", &self.timeout)
            .finish()
    }
}
