//! TMDB client.
//!
//! Endpoint methods live in the submodules, grouped by resource. They
//! return internal `TmdbResult`s; `port.rs` maps them to the core port.

mod movies;
mod people;
mod search;

use mymovies_core::{CatalogPortError, LanguageTag};
use serde::de::DeserializeOwned;

use crate::config::{TmdbClientConfig, TmdbConfig};
use crate::error::TmdbResult;
use crate::http::{HttpBackend, ReqwestBackend};
use crate::url::{Endpoint, build_url};

// ============================================================================
// Type Aliases
// ============================================================================

/// Default TMDB client using the reqwest HTTP backend.
pub type DefaultTmdbClient = TmdbClient<ReqwestBackend>;

// ============================================================================
// Client
// ============================================================================

/// Client for the TMDB v3 API, generic over its HTTP backend.
///
/// Use `DefaultTmdbClient` in production code.
pub struct TmdbClient<B: HttpBackend> {
    pub(crate) backend: B,
    pub(crate) config: TmdbConfig,
}

impl DefaultTmdbClient {
    /// Create a new client with the given configuration.
    ///
    /// Fails with `CatalogPortError::Configuration` when the base URL is
    /// unusable or the HTTP client cannot be built.
    pub fn new(config: &TmdbClientConfig) -> Result<Self, CatalogPortError> {
        let internal = TmdbConfig::from_public(config).map_err(crate::port::map_error)?;
        let backend = ReqwestBackend::new(&internal).map_err(|e| CatalogPortError::Configuration {
            message: e.to_string(),
        })?;
        Ok(Self {
            backend,
            config: internal,
        })
    }
}

impl<B: HttpBackend> TmdbClient<B> {
    /// Create a new client with a custom backend.
    #[cfg(test)]
    pub(crate) const fn with_backend(config: TmdbConfig, backend: B) -> Self {
        Self { backend, config }
    }

    /// Build the URL for `endpoint` and fetch it.
    pub(crate) async fn fetch<T: DeserializeOwned + Send>(
        &self,
        endpoint: Endpoint<'_>,
        page: Option<u32>,
        lang: Option<&LanguageTag>,
    ) -> TmdbResult<T> {
        let url = build_url(&self.config, endpoint, page, lang)?;
        self.backend.get_json(&url).await
    }
}
