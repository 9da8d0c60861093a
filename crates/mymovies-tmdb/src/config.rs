//! Public configuration for the TMDB client.
//!
//! The internal config is derived from this and validated once at client
//! construction.

use std::time::Duration;

use url::Url;

use crate::error::{TmdbError, TmdbResult};

/// Environment variable conventionally holding the API read access token.
pub const ACCESS_TOKEN_ENV: &str = "TMDB_ACCESS_TOKEN";

const DEFAULT_BASE_URL: &str = "https://api.themoviedb.org/3/";

/// Configuration for the TMDB client.
///
/// # Example
///
/// ```
/// use mymovies_tmdb::TmdbClientConfig;
/// use std::time::Duration;
///
/// let config = TmdbClientConfig::new()
///     .with_access_token("eyJhbGciOi...")
///     .with_timeout(Duration::from_secs(10));
/// ```
#[derive(Debug, Clone)]
pub struct TmdbClientConfig {
    /// Base URL of the v3 API
    pub(crate) base_url: String,
    /// User agent string for HTTP requests
    pub(crate) user_agent: String,
    /// Request timeout
    pub(crate) timeout: Duration,
    /// API read access token, sent as a bearer token
    pub(crate) access_token: Option<String>,
}

impl Default for TmdbClientConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_string(),
            user_agent: concat!("mymovies-tmdb/", env!("CARGO_PKG_VERSION")).to_string(),
            timeout: Duration::from_secs(30),
            access_token: None,
        }
    }
}

impl TmdbClientConfig {
    /// Create a new configuration with default settings.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the API base URL.
    ///
    /// Defaults to `https://api.themoviedb.org/3/`.
    #[must_use]
    pub fn with_base_url(mut self, url: impl Into<String>) -> Self {
        self.base_url = url.into();
        self
    }

    /// Set the user agent string for HTTP requests.
    #[must_use]
    pub fn with_user_agent(mut self, user_agent: impl Into<String>) -> Self {
        self.user_agent = user_agent.into();
        self
    }

    /// Set the request timeout.
    ///
    /// Defaults to 30 seconds.
    #[must_use]
    pub const fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    /// Set the API read access token.
    #[must_use]
    pub fn with_access_token(mut self, token: impl Into<String>) -> Self {
        self.access_token = Some(token.into());
        self
    }

    /// Set an optional access token.
    #[must_use]
    pub fn with_optional_access_token(mut self, token: Option<String>) -> Self {
        self.access_token = token.filter(|t| !t.trim().is_empty());
        self
    }
}

/// Validated configuration used by the client internals.
#[derive(Debug, Clone)]
pub(crate) struct TmdbConfig {
    /// Base URL, always ending with `/` so endpoint paths join below it
    pub base_url: Url,
    pub user_agent: String,
    pub timeout: Duration,
    pub access_token: Option<String>,
}

impl TmdbConfig {
    pub fn from_public(config: &TmdbClientConfig) -> TmdbResult<Self> {
        let mut base = config.base_url.trim().to_string();
        if !base.ends_with('/') {
            base.push('/');
        }
        let base_url = Url::parse(&base)?;
        if base_url.cannot_be_a_base() {
            return Err(TmdbError::Configuration {
                message: format!("base URL cannot have paths joined to it: {base}"),
            });
        }

        Ok(Self {
            base_url,
            user_agent: config.user_agent.clone(),
            timeout: config.timeout,
            access_token: config.access_token.clone(),
        })
    }
}

#[cfg(test)]
impl Default for TmdbConfig {
    fn default() -> Self {
        Self {
            base_url: Url::parse(DEFAULT_BASE_URL).unwrap(),
            user_agent: "mymovies-tmdb/test".to_string(),
            timeout: Duration::from_secs(30),
            access_token: None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = TmdbClientConfig::new();
        assert_eq!(config.base_url, "https://api.themoviedb.org/3/");
        assert!(config.user_agent.contains("mymovies-tmdb"));
        assert_eq!(config.timeout, Duration::from_secs(30));
        assert!(config.access_token.is_none());
    }

    #[test]
    fn test_builder_pattern() {
        let config = TmdbClientConfig::new()
            .with_base_url("https://custom.api/3")
            .with_user_agent("test-agent")
            .with_timeout(Duration::from_secs(60))
            .with_access_token("secret");

        assert_eq!(config.base_url, "https://custom.api/3");
        assert_eq!(config.user_agent, "test-agent");
        assert_eq!(config.timeout, Duration::from_secs(60));
        assert_eq!(config.access_token, Some("secret".to_string()));
    }

    #[test]
    fn test_blank_optional_token_is_none() {
        let config = TmdbClientConfig::new().with_optional_access_token(Some("  ".to_string()));
        assert!(config.access_token.is_none());
    }

    #[test]
    fn test_internal_config_normalizes_trailing_slash() {
        let config = TmdbClientConfig::new().with_base_url("https://custom.api/3");
        let internal = TmdbConfig::from_public(&config).unwrap();
        assert_eq!(internal.base_url.as_str(), "https://custom.api/3/");
    }

    #[test]
    fn test_internal_config_rejects_bad_url() {
        let config = TmdbClientConfig::new().with_base_url("not a url");
        assert!(TmdbConfig::from_public(&config).is_err());

        let config = TmdbClientConfig::new().with_base_url("mailto:someone@example.com");
        assert!(matches!(
            TmdbConfig::from_public(&config),
            Err(TmdbError::Configuration { .. })
        ));
    }
}
