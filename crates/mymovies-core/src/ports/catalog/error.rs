//! Error types for catalog port operations.

use thiserror::Error;

/// Errors from remote catalog operations.
///
/// These are domain-level errors that screens pattern-match on.
/// Implementation-specific errors (HTTP, JSON) are mapped to these.
/// The type is `Clone` so one failure can be held by several observers.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CatalogPortError {
    /// The remote service could not be reached (connectivity, timeout, IO).
    #[error("Network error: {message}")]
    Transport {
        /// Description of the transport failure
        message: String,
    },

    /// The remote service answered with a non-success status.
    #[error("HTTP {status} from {url}")]
    Protocol {
        /// HTTP status code
        status: u16,
        /// Request URL
        url: String,
    },

    /// The response body could not be decoded.
    #[error("Invalid API response: {message}")]
    InvalidResponse {
        /// What was invalid
        message: String,
    },

    /// The client is misconfigured (bad base URL, missing token, ...).
    #[error("Configuration error: {message}")]
    Configuration {
        /// What's wrong with the configuration
        message: String,
    },

    /// Any other failure.
    #[error("{message}")]
    Other {
        /// Description of the failure
        message: String,
    },
}

impl CatalogPortError {
    /// Shorthand for an `Other` failure.
    pub fn other(message: impl Into<String>) -> Self {
        Self::Other {
            message: message.into(),
        }
    }

    /// The HTTP status carried by a protocol failure.
    #[must_use]
    pub const fn status(&self) -> Option<u16> {
        match self {
            Self::Protocol { status, .. } => Some(*status),
            _ => None,
        }
    }

    /// Whether this is a transport or protocol failure.
    #[must_use]
    pub const fn is_network(&self) -> bool {
        matches!(self, Self::Transport { .. } | Self::Protocol { .. })
    }
}

/// Result type alias for catalog port operations.
pub type CatalogPortResult<T> = Result<T, CatalogPortError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_only_for_protocol() {
        let err = CatalogPortError::Protocol {
            status: 500,
            url: "https://api.example/movie/238".to_string(),
        };
        assert_eq!(err.status(), Some(500));
        assert!(err.is_network());
        assert!(err.to_string().contains("500"));

        let err = CatalogPortError::Transport {
            message: "connection reset".to_string(),
        };
        assert_eq!(err.status(), None);
        assert!(err.is_network());
    }

    #[test]
    fn test_other_is_not_network() {
        let err = CatalogPortError::other("network error");
        assert!(!err.is_network());
        assert_eq!(err.to_string(), "network error");
    }
}
