//! Custom error types for translation operations

use thiserror::Error;

/// Translation-related errors
#[derive(Error, Debug)]
pub enum TranslationError {
    /// Catalog or settings could not be loaded
    #[error("Configuration error: {message}")]
    ConfigError {
        /// What went wrong, including the offending path when known
        message: String,
    },

    /// Engine label is not present in the catalog
    #[error("Unknown translation engine: {label}")]
    UnknownEngine {
        /// The label that was looked up
        label: String,
    },

    /// Backend needs an API key that the environment does not provide
    #[error("{backend} API key is not set (expected {variable})")]
    MissingApiKey {
        /// Backend name as it appears in engine labels
        backend: &'static str,
        /// Environment variable the key is read from
        variable: &'static str,
    },

    /// API request failed
    #[error("API error: {status} - {message}")]
    ApiError {
        /// HTTP status code
        status: u16,
        /// Response body, as returned by the backend
        message: String,
    },

    /// Network error
    #[error("Network error: {message}")]
    NetworkError {
        /// Underlying transport error
        message: String,
    },

    /// Request timeout
    #[error("Request timeout")]
    TimeoutError,

    /// Invalid response from API
    #[error("Invalid response: {message}")]
    InvalidResponseError {
        /// What was missing or malformed
        message: String,
    },

    /// Reqwest error
    #[error("HTTP client error: {0}")]
    HttpError(#[from] reqwest::Error),

    /// YAML error
    #[error("YAML error: {0}")]
    YamlError(#[from] serde_yaml::Error),
}

impl TranslationError {
    /// Classify a transport failure from the HTTP client
    pub fn from_transport(err: reqwest::Error) -> Self {
        if err.is_timeout() {
            TranslationError::TimeoutError
        } else {
            TranslationError::NetworkError {
                message: err.to_string(),
            }
        }
    }
}

impl From<config::ConfigError> for TranslationError {
    fn from(err: config::ConfigError) -> Self {
        TranslationError::ConfigError {
            message: err.to_string(),
        }
    }
}

/// Result type for translation operations
pub type Result<T> = std::result::Result<T, TranslationError>;
