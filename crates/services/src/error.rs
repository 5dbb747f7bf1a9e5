//! Shared error types for the services crate.

use thiserror::Error;

/// Errors emitted by `QuizBackend` implementations.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum QuizApiError {
    #[error("backend request failed with status {0}")]
    HttpStatus(reqwest::StatusCode),
    #[error(transparent)]
    Http(#[from] reqwest::Error),
    #[error("backend returned an unexpected response: {0}")]
    Decode(#[from] serde_json::Error),
    #[error("invalid endpoint url: {0}")]
    Url(#[from] url::ParseError),
    /// Failure injected by the in-memory backend.
    #[error("backend unavailable: {0}")]
    Unavailable(String),
}

/// Errors emitted while reading backend configuration.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum ConfigError {
    #[error("invalid backend url {raw:?}: {source}")]
    InvalidUrl {
        raw: String,
        #[source]
        source: url::ParseError,
    },
    #[error("backend url must use http or https, got {0:?}")]
    UnsupportedScheme(String),
}
