//! Composition utilities for building `AppCore` with `SQLite` backends.
//!
//! Construction only; no domain logic lives here.

use sqlx::SqlitePool;
use std::sync::Arc;

use mymovies_core::ports::CatalogClientPort;
use mymovies_core::{AppCore, Repos};

use crate::repositories::{SqlitePreferencesRepository, SqliteSearchKeywordRepository};

/// Factory for creating repository instances with `SQLite` backends.
pub struct CoreFactory;

impl CoreFactory {
    /// Build all `SQLite` repositories from a pool.
    ///
    /// This is the recommended way for adapters to obtain repositories.
    pub fn build_repos(pool: SqlitePool) -> Repos {
        Repos::new(
            Arc::new(SqliteSearchKeywordRepository::new(pool.clone())),
            Arc::new(SqlitePreferencesRepository::new(pool)),
        )
    }

    /// Build a complete `AppCore` from a pool and a catalog client.
    ///
    /// Equivalent to:
    ///
    /// ```ignore
    /// let repos = CoreFactory::build_repos(pool);
    /// let core = AppCore::new(repos, catalog);
    /// ```
    ///
    /// The returned core still holds default observed values; call
    /// `AppCore::reload` to read the stored preference and history.
    pub fn build_app_core(pool: SqlitePool, catalog: Arc<dyn CatalogClientPort>) -> AppCore {
        AppCore::new(Self::build_repos(pool), catalog)
    }
}

/// Test database helper for integration tests.
///
/// Provides an in-memory `SQLite` database with the production schema.
#[cfg(any(test, feature = "test-utils"))]
pub struct TestDb {
    pool: SqlitePool,
}

#[cfg(any(test, feature = "test-utils"))]
impl TestDb {
    /// Create a new in-memory test database with full schema.
    pub async fn new() -> anyhow::Result<Self> {
        let pool = crate::setup::setup_test_database().await?;
        Ok(Self { pool })
    }

    /// Get a reference to the connection pool.
    pub const fn pool(&self) -> &SqlitePool {
        &self.pool
    }

    /// Build repositories backed by this database.
    pub fn repos(&self) -> Repos {
        CoreFactory::build_repos(self.pool.clone())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use mymovies_core::NewSearchKeyword;

    #[tokio::test]
    async fn test_build_repos_share_the_pool() {
        let db = TestDb::new().await.unwrap();
        let repos = db.repos();

        repos
            .search_keywords
            .insert(&NewSearchKeyword::now("war"))
            .await
            .unwrap();
        repos.preferences.save_language_tag("zh-TW").await.unwrap();

        let other = db.repos();
        assert_eq!(other.search_keywords.list().await.unwrap().len(), 1);
        assert_eq!(
            other.preferences.load_language_tag().await.unwrap().as_deref(),
            Some("zh-TW")
        );
    }
}
