//! `AppCore` - the primary application facade.
//!
//! Composition root for core services. Front ends (CLI, screen layer)
//! receive an `AppCore` and reach every service through it.

use std::sync::Arc;

use tracing::warn;

use crate::ports::{CatalogClientPort, Repos};

use super::{CatalogRepository, PreferencesSource, SearchHistory};

/// The core application facade.
///
/// # Example
///
/// ```ignore
/// let repos = mymovies_db::CoreFactory::build_repos(pool);
/// let catalog = Arc::new(DefaultTmdbClient::new(&config)?);
/// let core = AppCore::new(repos, catalog);
/// core.reload().await;
///
/// let lists = core.catalog().popular(1, &core.preferences().language_tag()).await?;
/// ```
pub struct AppCore {
    catalog: CatalogRepository,
    preferences: PreferencesSource,
    search_history: SearchHistory,
}

impl AppCore {
    /// Create a new `AppCore` with the given repositories and catalog client.
    pub fn new(repos: Repos, catalog: Arc<dyn CatalogClientPort>) -> Self {
        Self {
            catalog: CatalogRepository::new(catalog),
            preferences: PreferencesSource::new(repos.preferences),
            search_history: SearchHistory::new(repos.search_keywords),
        }
    }

    /// Load persisted state (language tag, search history) into the
    /// observed values.
    pub async fn reload(&self) {
        self.preferences.reload().await;
        if let Err(e) = self.search_history.refresh().await {
            warn!(error = %e, "Failed to load search history");
        }
    }

    /// Access the catalog repository.
    pub const fn catalog(&self) -> &CatalogRepository {
        &self.catalog
    }

    /// Access the preferences source.
    pub const fn preferences(&self) -> &PreferencesSource {
        &self.preferences
    }

    /// Access the search history.
    pub const fn search_history(&self) -> &SearchHistory {
        &self.search_history
    }
}
