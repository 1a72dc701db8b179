use std::fmt;

use crate::{constants::ENV_API_KEY, loader::error::ConfigLoadError, models::Config};

/// Soft problem with an otherwise usable configuration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConfigWarning {
    pub message: String,
    pub hint: Option<String>,
}

impl fmt::Display for ConfigWarning {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.hint {
            Some(hint) => write!(f, "{} (hint: {hint})", self.message),
            None => f.write_str(&self.message),
        }
    }
}

#[derive(Debug, Clone, Default)]
pub struct ConfigWarnings(Vec<ConfigWarning>);

impl ConfigWarnings {
    pub fn push(&mut self, message: impl Into<String>) {
        self.0.push(ConfigWarning {
            message: message.into(),
            hint: None,
        });
    }

    pub fn push_with_hint(
        &mut self,
        message: impl Into<String>,
        hint: impl Into<String>,
    ) {
        self.0.push(ConfigWarning {
            message: message.into(),
            hint: Some(hint.into()),
        });
    }

    pub fn extend(&mut self, other: ConfigWarnings) {
        self.0.extend(other.0);
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn iter(&self) -> impl Iterator<Item = &ConfigWarning> {
        self.0.iter()
    }

    pub fn contains(&self, needle: &str) -> bool {
        self.0.iter().any(|w| w.message.contains(needle))
    }
}

/// Reject impossible values and collect warnings for questionable ones.
pub fn apply_guard_rails(
    config: &Config,
) -> Result<ConfigWarnings, ConfigLoadError> {
    if config.api.page_size == 0 {
        return Err(ConfigLoadError::Invalid {
            key: "api.page_size",
            reason: "must be at least 1".into(),
        });
    }
    for (key, duration) in [
        ("api.timeout", config.api.timeout),
        ("cache.ttl", config.cache.ttl),
        ("carousel.duration", config.carousel.duration),
        ("board.flip_duration", config.board.duration),
    ] {
        if duration.is_zero() {
            return Err(ConfigLoadError::Invalid {
                key,
                reason: "must be longer than zero".into(),
            });
        }
    }
    let distance = config.carousel.slide_distance;
    if !distance.is_finite() || distance <= 0.0 {
        return Err(ConfigLoadError::Invalid {
            key: "carousel.distance",
            reason: format!("must be a positive number, got {distance}"),
        });
    }
    if !matches!(config.api.url.scheme(), "http" | "https") {
        return Err(ConfigLoadError::Invalid {
            key: "api.url",
            reason: format!("unsupported scheme '{}'", config.api.url.scheme()),
        });
    }

    let mut warnings = ConfigWarnings::default();
    if !config.api.has_api_key() {
        warnings.push_with_hint(
            "No content API key configured; fetches will fail",
            format!("Set {ENV_API_KEY} or api.api_key in vitrine.toml"),
        );
    }
    if !config.cache.enabled {
        warnings.push("Item cache disabled; every start hits the network");
    }
    Ok(warnings)
}
