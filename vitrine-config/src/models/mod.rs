pub mod sources;

use std::{path::PathBuf, time::Duration};

use url::Url;
use vitrine_core::{
    board::FlipTiming,
    carousel::CarouselTiming,
    provider::{CacheRoot, ContentApiSettings, ProviderSettings},
};

use sources::{
    FileApiConfig, FileBoardConfig, FileCacheConfig, FileCarouselConfig,
    FileConfig,
};

/// Fully resolved settings.
#[derive(Debug, Clone)]
pub struct Config {
    pub api: ApiConfig,
    pub cache: CacheConfig,
    pub carousel: CarouselTiming,
    pub board: FlipTiming,
    pub metadata: ConfigMetadata,
}

impl Config {
    pub fn content_api_settings(&self) -> ContentApiSettings {
        let mut settings =
            ContentApiSettings::new(self.api.url.clone(), self.api.api_key.clone());
        settings.timeout = self.api.timeout;
        settings
    }

    pub fn provider_settings(&self) -> ProviderSettings {
        ProviderSettings {
            page_size: self.api.page_size,
            cache_ttl: self.cache.ttl,
            ..ProviderSettings::default()
        }
    }

    pub fn cache_root(&self) -> CacheRoot {
        CacheRoot::new(self.cache.dir.clone())
    }

    /// File-shaped view of the effective settings, API key masked.
    pub fn to_file_config(&self) -> FileConfig {
        FileConfig {
            api: FileApiConfig {
                url: Some(self.api.url.to_string()),
                api_key: self.api.api_key.as_ref().map(|_| "********".into()),
                api_key_file: None,
                page_size: Some(self.api.page_size),
                timeout: Some(format_duration(self.api.timeout)),
            },
            cache: FileCacheConfig {
                enabled: Some(self.cache.enabled),
                dir: Some(self.cache.dir.clone()),
                ttl: Some(format_duration(self.cache.ttl)),
            },
            carousel: FileCarouselConfig {
                duration: Some(format_duration(self.carousel.duration)),
                distance: Some(self.carousel.slide_distance),
                easing: Some(self.carousel.easing.to_string()),
            },
            board: FileBoardConfig {
                flip_duration: Some(format_duration(self.board.duration)),
            },
        }
    }
}

fn format_duration(duration: Duration) -> String {
    humantime::format_duration(duration).to_string()
}

#[derive(Debug, Clone)]
pub struct ApiConfig {
    pub url: Url,
    pub api_key: Option<String>,
    pub page_size: usize,
    pub timeout: Duration,
}

impl ApiConfig {
    pub fn has_api_key(&self) -> bool {
        self.api_key.is_some()
    }
}

#[derive(Debug, Clone)]
pub struct CacheConfig {
    pub enabled: bool,
    pub dir: PathBuf,
    pub ttl: Duration,
}

impl CacheConfig {
    pub fn ensure_directory(&self) -> std::io::Result<()> {
        std::fs::create_dir_all(&self.dir)
    }
}

#[derive(Debug, Clone, Default)]
pub struct ConfigMetadata {
    pub config_path: Option<PathBuf>,
    pub env_file_loaded: bool,
}
