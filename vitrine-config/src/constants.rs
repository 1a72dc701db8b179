use std::time::Duration;

/// Content endpoint used when nothing else is configured.
pub const DEFAULT_API_URL: &str =
    "https://liangworks.microcms.io/api/v1/taiwanphoto";

pub const DEFAULT_HTTP_TIMEOUT: Duration = Duration::from_secs(30);

/// Directory name under the platform cache dir.
pub const CACHE_DIR_NAME: &str = "vitrine";

pub const ENV_CONFIG_PATH: &str = "VITRINE_CONFIG";
pub const ENV_API_URL: &str = "VITRINE_API_URL";
pub const ENV_API_KEY: &str = "VITRINE_API_KEY";
pub const ENV_API_KEY_FILE: &str = "VITRINE_API_KEY_FILE";
pub const ENV_PAGE_SIZE: &str = "VITRINE_PAGE_SIZE";
pub const ENV_HTTP_TIMEOUT: &str = "VITRINE_HTTP_TIMEOUT";
pub const ENV_CACHE_DIR: &str = "VITRINE_CACHE_DIR";
pub const ENV_CACHE_TTL: &str = "VITRINE_CACHE_TTL";
pub const ENV_CACHE_ENABLED: &str = "VITRINE_CACHE_ENABLED";
pub const ENV_CAROUSEL_DURATION: &str = "VITRINE_CAROUSEL_DURATION";
pub const ENV_CAROUSEL_DISTANCE: &str = "VITRINE_CAROUSEL_DISTANCE";
pub const ENV_FLIP_DURATION: &str = "VITRINE_FLIP_DURATION";
pub const ENV_EASING: &str = "VITRINE_EASING";
