pub mod error;

use once_cell::sync::Lazy;
use std::{
    fs,
    path::{Path, PathBuf},
    time::Duration,
};
use tracing::debug;
use url::Url;
use vitrine_core::{
    animation::EasingFunction,
    board::FlipTiming,
    carousel::CarouselTiming,
    provider::settings::{DEFAULT_CACHE_TTL, DEFAULT_PAGE_SIZE},
};

use crate::{
    constants::*,
    models::{
        ApiConfig, CacheConfig, Config, ConfigMetadata,
        sources::{EnvConfig, FileApiConfig, FileConfig},
    },
    util::{parse_duration, parse_flag, parse_number},
    validation::{self, ConfigWarnings},
};
use error::ConfigLoadError;

static DEFAULT_CONFIG_LOCATIONS: Lazy<Vec<PathBuf>> = Lazy::new(|| {
    let mut locations = vec![
        PathBuf::from("vitrine.toml"),
        PathBuf::from("config/vitrine.toml"),
    ];
    if let Some(dir) = dirs::config_dir() {
        locations.push(dir.join(CACHE_DIR_NAME).join("config.toml"));
    }
    locations
});

#[derive(Debug, Default, Clone)]
pub struct ConfigLoaderOptions {
    pub config_path: Option<PathBuf>,
    pub env_file: Option<PathBuf>,
}

#[derive(Debug, Default)]
pub struct ConfigLoader {
    options: ConfigLoaderOptions,
}

#[derive(Debug)]
pub struct ConfigLoad {
    pub config: Config,
    pub warnings: ConfigWarnings,
}

impl ConfigLoader {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_options(options: ConfigLoaderOptions) -> Self {
        Self { options }
    }

    pub fn with_config_path<P: Into<PathBuf>>(mut self, path: P) -> Self {
        self.options.config_path = Some(path.into());
        self
    }

    pub fn with_env_file<P: Into<PathBuf>>(mut self, path: P) -> Self {
        self.options.env_file = Some(path.into());
        self
    }

    /// Load `.env`, then resolve against the process environment.
    pub fn load(&self) -> Result<ConfigLoad, ConfigLoadError> {
        let env_file_loaded = match &self.options.env_file {
            Some(path) => dotenvy::from_path(path).map(|_| true).or_else(
                |err| match err {
                    dotenvy::Error::Io(_) => Ok(false),
                    _ => Err(err),
                },
            )?,
            None => {
                dotenvy::dotenv().map(|_| true).or_else(|err| match err {
                    dotenvy::Error::Io(_) => Ok(false),
                    _ => Err(err),
                })?
            }
        };

        self.load_from(EnvConfig::gather(), env_file_loaded)
    }

    /// Resolve against an explicit environment, leaving `.env` alone.
    pub fn load_with_env(
        &self,
        env: EnvConfig,
    ) -> Result<ConfigLoad, ConfigLoadError> {
        self.load_from(env, false)
    }

    fn load_from(
        &self,
        env: EnvConfig,
        env_file_loaded: bool,
    ) -> Result<ConfigLoad, ConfigLoadError> {
        let (file_config, config_path) = self.load_file_config(&env)?;
        let (config, warnings) =
            self.compose_config(file_config, env, config_path, env_file_loaded)?;
        Ok(ConfigLoad { config, warnings })
    }

    fn load_file_config(
        &self,
        env: &EnvConfig,
    ) -> Result<(Option<FileConfig>, Option<PathBuf>), ConfigLoadError> {
        let explicit = self
            .options
            .config_path
            .clone()
            .or_else(|| env.config_path.clone());

        let path = match explicit {
            Some(path) if !path.exists() => {
                return Err(ConfigLoadError::MissingConfig { path });
            }
            Some(path) => path,
            None => match DEFAULT_CONFIG_LOCATIONS
                .iter()
                .find(|candidate| candidate.exists())
            {
                Some(found) => found.clone(),
                None => return Ok((None, None)),
            },
        };

        let contents =
            fs::read_to_string(&path).map_err(|err| ConfigLoadError::Io {
                path: path.clone(),
                source: err,
            })?;
        let file_config: FileConfig =
            toml::from_str(&contents).map_err(|err| ConfigLoadError::Parse {
                path: path.clone(),
                source: err,
            })?;
        debug!(path = %path.display(), "loaded configuration file");

        Ok((Some(file_config), Some(path)))
    }

    fn compose_config(
        &self,
        file_config: Option<FileConfig>,
        env: EnvConfig,
        config_path: Option<PathBuf>,
        env_file_loaded: bool,
    ) -> Result<(Config, ConfigWarnings), ConfigLoadError> {
        let mut warnings = ConfigWarnings::default();

        if config_path.is_none() {
            warnings.push_with_hint(
                "No vitrine.toml detected; using defaults and environment variables",
                format!("Pass --config or set {ENV_CONFIG_PATH} to use a file"),
            );
        }

        let FileConfig {
            api: file_api,
            cache: file_cache,
            carousel: file_carousel,
            board: file_board,
        } = file_config.unwrap_or_default();

        let raw_url = env
            .api_url
            .clone()
            .or(file_api.url.clone())
            .unwrap_or_else(|| DEFAULT_API_URL.to_string());
        let url = Url::parse(raw_url.trim()).map_err(|source| {
            ConfigLoadError::InvalidUrl {
                value: raw_url.clone(),
                source,
            }
        })?;

        let api = ApiConfig {
            url,
            api_key: Self::resolve_api_key(&env, &file_api)?,
            page_size: match &env.page_size {
                Some(raw) => parse_number(ENV_PAGE_SIZE, raw)?,
                None => file_api.page_size.unwrap_or(DEFAULT_PAGE_SIZE),
            },
            timeout: duration_setting(
                (ENV_HTTP_TIMEOUT, env.http_timeout),
                ("api.timeout", file_api.timeout),
                DEFAULT_HTTP_TIMEOUT,
            )?,
        };

        let cache = CacheConfig {
            enabled: match &env.cache_enabled {
                Some(raw) => parse_flag(ENV_CACHE_ENABLED, raw)?,
                None => file_cache.enabled.unwrap_or(true),
            },
            dir: env
                .cache_dir
                .or(file_cache.dir)
                .unwrap_or_else(default_cache_dir),
            ttl: duration_setting(
                (ENV_CACHE_TTL, env.cache_ttl),
                ("cache.ttl", file_cache.ttl),
                DEFAULT_CACHE_TTL,
            )?,
        };

        let easing = match env.easing.or(file_carousel.easing) {
            Some(raw) => raw.parse::<EasingFunction>()?,
            None => EasingFunction::default(),
        };

        let carousel_defaults = CarouselTiming::default();
        let carousel = CarouselTiming {
            duration: duration_setting(
                (ENV_CAROUSEL_DURATION, env.carousel_duration),
                ("carousel.duration", file_carousel.duration),
                carousel_defaults.duration,
            )?,
            slide_distance: match &env.carousel_distance {
                Some(raw) => parse_number(ENV_CAROUSEL_DISTANCE, raw)?,
                None => file_carousel
                    .distance
                    .unwrap_or(carousel_defaults.slide_distance),
            },
            easing,
        };

        let board = FlipTiming {
            duration: duration_setting(
                (ENV_FLIP_DURATION, env.flip_duration),
                ("board.flip_duration", file_board.flip_duration),
                FlipTiming::default().duration,
            )?,
            easing,
        };

        let config = Config {
            api,
            cache,
            carousel,
            board,
            metadata: ConfigMetadata {
                config_path,
                env_file_loaded,
            },
        };

        warnings.extend(validation::apply_guard_rails(&config)?);
        Ok((config, warnings))
    }

    fn resolve_api_key(
        env: &EnvConfig,
        file_api: &FileApiConfig,
    ) -> Result<Option<String>, ConfigLoadError> {
        if let Some(key) = env.api_key.clone() {
            return Ok(Some(key));
        }
        if let Some(path) = env.api_key_file.as_ref()
            && let Some(key) = Self::read_secret_file(path)?
        {
            return Ok(Some(key));
        }
        if let Some(key) = file_api
            .api_key
            .clone()
            .filter(|value| !value.trim().is_empty())
        {
            return Ok(Some(key));
        }
        match file_api.api_key_file.as_ref() {
            Some(path) => Self::read_secret_file(path),
            None => Ok(None),
        }
    }

    fn read_secret_file(
        path: &Path,
    ) -> Result<Option<String>, ConfigLoadError> {
        let contents = fs::read_to_string(path).map_err(|source| {
            ConfigLoadError::SecretFileIo {
                path: path.to_path_buf(),
                source,
            }
        })?;
        let trimmed = contents.trim();
        if trimmed.is_empty() {
            Ok(None)
        } else {
            Ok(Some(trimmed.to_string()))
        }
    }
}

/// Environment beats file beats default.
fn duration_setting(
    env: (&'static str, Option<String>),
    file: (&'static str, Option<String>),
    default: Duration,
) -> Result<Duration, ConfigLoadError> {
    match (env, file) {
        ((key, Some(raw)), _) | (_, (key, Some(raw))) => {
            parse_duration(key, &raw)
        }
        _ => Ok(default),
    }
}

fn default_cache_dir() -> PathBuf {
    dirs::cache_dir()
        .unwrap_or_else(std::env::temp_dir)
        .join(CACHE_DIR_NAME)
}
