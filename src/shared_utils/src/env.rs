use std::str::FromStr;

use crate::config::ConfigError;

/// Reads an optional override. Unset and blank values both yield `None`.
pub fn get_env_override(name: &str) -> Option<String> {
    std::env::var(name)
        .ok()
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
}

/// Reads and parses an optional override.
///
/// Returns `Ok(None)` when the variable is unset or blank, and
/// [`ConfigError::InvalidEnvVar`] when it is set but does not parse as `T`.
pub fn parse_env_override<T>(name: &str) -> Result<Option<T>, ConfigError>
where
    T: FromStr,
    T::Err: std::fmt::Display,
{
    match get_env_override(name) {
        None => Ok(None),
        Some(raw) => raw
            .parse::<T>()
            .map(Some)
            .map_err(|e| ConfigError::InvalidEnvVar {
                name: name.to_string(),
                message: e.to_string(),
            }),
    }
}
