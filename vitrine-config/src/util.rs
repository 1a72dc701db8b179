use std::time::Duration;

use crate::loader::error::ConfigLoadError;

/// Parse a boolean value from a raw string, accepting common env-style forms.
///
/// Accepted truthy values (case-insensitive): `"1"`, `"true"`, `"yes"`, `"on"`.
/// Accepted falsy values: `"0"`, `"false"`, `"no"`, `"off"`.
pub fn parse_bool(raw: &str) -> Option<bool> {
    match raw.trim().to_ascii_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Some(true),
        "0" | "false" | "no" | "off" => Some(false),
        _ => None,
    }
}

/// Humantime duration (`"600ms"`, `"5m"`, `"1h 30m"`) for setting `key`.
pub fn parse_duration(
    key: &'static str,
    raw: &str,
) -> Result<Duration, ConfigLoadError> {
    humantime::parse_duration(raw.trim()).map_err(|source| {
        ConfigLoadError::InvalidDuration {
            key,
            value: raw.to_string(),
            source,
        }
    })
}

pub fn parse_number<T: std::str::FromStr>(
    key: &'static str,
    raw: &str,
) -> Result<T, ConfigLoadError> {
    raw.trim().parse().map_err(|_| ConfigLoadError::InvalidValue {
        key,
        value: raw.to_string(),
    })
}

pub fn parse_flag(key: &'static str, raw: &str) -> Result<bool, ConfigLoadError> {
    parse_bool(raw).ok_or_else(|| ConfigLoadError::InvalidValue {
        key,
        value: raw.to_string(),
    })
}

/// Treat empty and whitespace-only values as unset.
pub fn non_blank(value: Option<String>) -> Option<String> {
    value.filter(|v| !v.trim().is_empty())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn bools_accept_env_spellings() {
        assert_eq!(parse_bool("YES"), Some(true));
        assert_eq!(parse_bool(" off "), Some(false));
        assert_eq!(parse_bool("maybe"), None);
    }

    #[test]
    fn durations_are_humantime() {
        assert_eq!(
            parse_duration("k", "600ms").unwrap(),
            Duration::from_millis(600)
        );
        assert_eq!(parse_duration("k", "5m").unwrap(), Duration::from_secs(300));
        assert!(matches!(
            parse_duration("k", "soon"),
            Err(ConfigLoadError::InvalidDuration { key: "k", .. })
        ));
    }
}
