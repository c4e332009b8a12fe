use thiserror::Error;

/// Errors related to application configuration.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// An environment variable is set but its value could not be parsed.
    #[error("Invalid value for environment variable {name}: {message}")]
    InvalidEnvVar {
        /// Name of the offending variable.
        name: String,
        /// Parser message for the rejected value.
        message: String,
    },
}
