//! Configuration error types.
//!
//! All configuration constructors return `Result<T, ConfigError>` to enable
//! fail-fast validation: a [`Transport`](crate::Transport) can only be built
//! from an [`ApiConfig`](crate::ApiConfig) that already passed validation, so
//! missing credentials surface here, before any request is attempted.

use thiserror::Error;

/// Errors that can occur while building an [`ApiConfig`](crate::ApiConfig).
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ConfigError {
    /// API key cannot be empty.
    #[error("API key cannot be empty. Please provide a valid API key.")]
    EmptyApiKey,

    /// Base URL is invalid.
    #[error("Invalid base URL '{url}'. Please provide a valid URL with scheme (e.g., 'https://api.example.com').")]
    InvalidBaseUrl {
        /// The invalid URL that was provided.
        url: String,
    },

    /// A required field is missing.
    #[error("Missing required field: '{field}'. This field must be set before building the configuration.")]
    MissingRequiredField {
        /// The name of the missing field.
        field: &'static str,
    },

    /// A required environment variable is unset.
    #[error("Environment variable '{var}' is not set.")]
    MissingEnvVar {
        /// The name of the missing variable.
        var: &'static str,
    },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_api_key_error_message() {
        let error = ConfigError::EmptyApiKey;
        assert!(error.to_string().contains("API key cannot be empty"));
    }

    #[test]
    fn test_invalid_base_url_error_message() {
        let error = ConfigError::InvalidBaseUrl {
            url: "not a url".to_string(),
        };
        let message = error.to_string();
        assert!(message.contains("not a url"));
        assert!(message.contains("scheme"));
    }

    #[test]
    fn test_missing_required_field_error_message() {
        let error = ConfigError::MissingRequiredField { field: "api_key" };
        assert!(error.to_string().contains("api_key"));
    }

    #[test]
    fn test_error_implements_std_error() {
        let error = ConfigError::EmptyApiKey;
        let _: &dyn std::error::Error = &error;
    }
}
