//! Internal error types for TMDB operations.
//!
//! These errors are internal to `mymovies-tmdb` and are mapped to
//! `CatalogPortError` at the port boundary.

use thiserror::Error;

/// Result type alias for TMDB operations.
pub type TmdbResult<T> = Result<T, TmdbError>;

/// Errors related to TMDB API operations.
#[derive(Debug, Error)]
pub enum TmdbError {
    /// API request failed with an HTTP error status.
    #[error("TMDB API request failed with status {status}: {url}")]
    ApiRequestFailed {
        /// HTTP status code
        status: u16,
        /// The URL that was requested
        url: String,
    },

    /// Client configuration is unusable.
    #[error("Invalid TMDB client configuration: {message}")]
    Configuration {
        /// What's wrong
        message: String,
    },

    /// Network or HTTP client error.
    #[error("Network error: {0}")]
    Network(#[from] reqwest::Error),

    /// URL parsing error.
    #[error("Invalid URL: {0}")]
    InvalidUrl(#[from] url::ParseError),

    /// JSON parsing error.
    #[error("JSON parsing error: {0}")]
    JsonParse(#[from] serde_json::Error),
}
