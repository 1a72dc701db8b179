use serde::{Deserialize, Serialize};
use std::path::PathBuf;

use crate::{constants::*, util::non_blank};

/// Raw configuration as defined in a TOML file.
#[derive(Debug, Default, Clone, Deserialize, Serialize)]
#[serde(rename_all = "snake_case", deny_unknown_fields)]
pub struct FileConfig {
    #[serde(default)]
    pub api: FileApiConfig,
    #[serde(default)]
    pub cache: FileCacheConfig,
    #[serde(default)]
    pub carousel: FileCarouselConfig,
    #[serde(default)]
    pub board: FileBoardConfig,
}

#[derive(Debug, Default, Clone, Deserialize, Serialize)]
#[serde(deny_unknown_fields)]
pub struct FileApiConfig {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub url: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub api_key: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub api_key_file: Option<PathBuf>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub page_size: Option<usize>,
    /// Humantime string, e.g. `"30s"`.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub timeout: Option<String>,
}

#[derive(Debug, Default, Clone, Deserialize, Serialize)]
#[serde(deny_unknown_fields)]
pub struct FileCacheConfig {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub enabled: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub dir: Option<PathBuf>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub ttl: Option<String>,
}

#[derive(Debug, Default, Clone, Deserialize, Serialize)]
#[serde(deny_unknown_fields)]
pub struct FileCarouselConfig {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub duration: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub distance: Option<f32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub easing: Option<String>,
}

#[derive(Debug, Default, Clone, Deserialize, Serialize)]
#[serde(deny_unknown_fields)]
pub struct FileBoardConfig {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub flip_duration: Option<String>,
}

/// Environment-derived configuration values, still unparsed.
///
/// Values are kept as strings so a malformed variable surfaces as a load
/// error naming the variable instead of being silently ignored.
#[derive(Debug, Default, Clone)]
pub struct EnvConfig {
    pub config_path: Option<PathBuf>,
    pub api_url: Option<String>,
    pub api_key: Option<String>,
    pub api_key_file: Option<PathBuf>,
    pub page_size: Option<String>,
    pub http_timeout: Option<String>,
    pub cache_dir: Option<PathBuf>,
    pub cache_ttl: Option<String>,
    pub cache_enabled: Option<String>,
    pub carousel_duration: Option<String>,
    pub carousel_distance: Option<String>,
    pub flip_duration: Option<String>,
    pub easing: Option<String>,
}

impl EnvConfig {
    pub fn gather() -> Self {
        Self::from_lookup(|name| std::env::var(name).ok())
    }

    /// Build from an arbitrary variable lookup; blank values count as unset.
    pub fn from_lookup<F>(lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        let var = |name: &str| non_blank(lookup(name));
        Self {
            config_path: var(ENV_CONFIG_PATH).map(PathBuf::from),
            api_url: var(ENV_API_URL),
            api_key: var(ENV_API_KEY),
            api_key_file: var(ENV_API_KEY_FILE).map(PathBuf::from),
            page_size: var(ENV_PAGE_SIZE),
            http_timeout: var(ENV_HTTP_TIMEOUT),
            cache_dir: var(ENV_CACHE_DIR).map(PathBuf::from),
            cache_ttl: var(ENV_CACHE_TTL),
            cache_enabled: var(ENV_CACHE_ENABLED),
            carousel_duration: var(ENV_CAROUSEL_DURATION),
            carousel_distance: var(ENV_CAROUSEL_DISTANCE),
            flip_duration: var(ENV_FLIP_DURATION),
            easing: var(ENV_EASING),
        }
    }
}
