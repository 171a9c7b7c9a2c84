use std::path::PathBuf;

use thiserror::Error;

/// Raised when a command's arguments fail its acceptability rules.
///
/// This is a user-facing error: the CLI reports the message and exits
/// non-zero. It never signals a programming defect.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("invalid arguments: {message}")]
pub struct ValidationError {
    pub message: String,
}

impl ValidationError {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }
}

/// Errors raised while loading, saving or checking a [`Config`](crate::Config).
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to access config at {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to parse config at {path}: {source}")]
    Parse {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    #[error("config is missing required key '{0}'")]
    MissingKey(&'static str),

    #[error("invalid value for '{key}': {value}")]
    InvalidValue { key: &'static str, value: String },

    #[error("could not find home directory")]
    NoHomeDir,
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("unknown table format '{0}'")]
pub struct UnknownTableFormat(pub String);

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validation_error_display() {
        let err = ValidationError::new("limit must be positive");
        assert_eq!(err.to_string(), "invalid arguments: limit must be positive");
    }

    #[test]
    fn test_missing_key_display() {
        let err = ConfigError::MissingKey("server");
        assert_eq!(err.to_string(), "config is missing required key 'server'");
    }
}
