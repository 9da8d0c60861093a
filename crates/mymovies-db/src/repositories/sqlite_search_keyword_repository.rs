//! `SQLite` implementation of the `SearchKeywordRepository` trait.

use async_trait::async_trait;
use sqlx::SqlitePool;
use tokio::sync::watch;
use tracing::debug;

use mymovies_core::{
    NewSearchKeyword, RepositoryError, SearchKeyword, SearchKeywordRepository, StoreChanges,
};

use super::row_mappers::{KEYWORD_SELECT_COLUMNS, row_to_keyword, to_millis};

/// `SQLite` implementation of the `SearchKeywordRepository` trait.
///
/// Uniqueness comes from the `UNIQUE(keyword)` constraint. `insert` is a
/// single upsert statement, so two writers racing on the same keyword end
/// up with one row carrying the later timestamp.
pub struct SqliteSearchKeywordRepository {
    pool: SqlitePool,
    changes: StoreChanges,
}

impl SqliteSearchKeywordRepository {
    /// Create a new `SQLite` search keyword repository.
    pub fn new(pool: SqlitePool) -> Self {
        Self {
            pool,
            changes: StoreChanges::new(),
        }
    }
}

#[async_trait]
impl SearchKeywordRepository for SqliteSearchKeywordRepository {
    async fn list(&self) -> Result<Vec<SearchKeyword>, RepositoryError> {
        let query = format!(
            "SELECT {KEYWORD_SELECT_COLUMNS} FROM search_keywords ORDER BY added_at DESC, id DESC"
        );
        let rows = sqlx::query(&query)
            .fetch_all(&self.pool)
            .await
            .map_err(|e| RepositoryError::Storage(e.to_string()))?;

        rows.iter().map(row_to_keyword).collect()
    }

    async fn insert(&self, keyword: &NewSearchKeyword) -> Result<(), RepositoryError> {
        sqlx::query(
            r#"
            INSERT INTO search_keywords (keyword, added_at) VALUES (?, ?)
            ON CONFLICT(keyword) DO UPDATE SET added_at = excluded.added_at
            "#,
        )
        .bind(&keyword.keyword)
        .bind(to_millis(&keyword.added_at))
        .execute(&self.pool)
        .await
        .map_err(|e| RepositoryError::Storage(e.to_string()))?;

        debug!(keyword = %keyword.keyword, "Search keyword recorded");
        self.changes.notify();
        Ok(())
    }

    async fn delete(&self, keyword: &SearchKeyword) -> Result<(), RepositoryError> {
        let result = sqlx::query("DELETE FROM search_keywords WHERE id = ?")
            .bind(keyword.id)
            .execute(&self.pool)
            .await
            .map_err(|e| RepositoryError::Storage(e.to_string()))?;

        if result.rows_affected() == 0 {
            return Err(RepositoryError::NotFound(format!(
                "Search keyword not found: {}",
                keyword.keyword
            )));
        }

        self.changes.notify();
        Ok(())
    }

    fn changes(&self) -> Option<watch::Receiver<u64>> {
        Some(self.changes.subscribe())
    }
}
