//! `SQLite` implementation of the `PreferencesRepository` trait.

use async_trait::async_trait;
use sqlx::{Row, SqlitePool};
use tokio::sync::watch;

use mymovies_core::{PreferencesRepository, RepositoryError, StoreChanges};

const LANGUAGE_TAG_KEY: &str = "language_tag";

/// `SQLite` implementation of the `PreferencesRepository` trait.
///
/// Values live in the `settings_kv` table, one row per preference key.
/// Every successful save is announced on [`PreferencesRepository::changes`].
pub struct SqlitePreferencesRepository {
    pool: SqlitePool,
    changes: StoreChanges,
}

impl SqlitePreferencesRepository {
    /// Create a new `SQLite` preferences repository.
    pub fn new(pool: SqlitePool) -> Self {
        Self {
            pool,
            changes: StoreChanges::new(),
        }
    }

    async fn load_value(&self, key: &str) -> Result<Option<String>, RepositoryError> {
        let row = sqlx::query("SELECT value FROM settings_kv WHERE key = ?")
            .bind(key)
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| RepositoryError::Storage(e.to_string()))?;

        row.map(|r| {
            r.try_get::<String, _>("value")
                .map_err(|e| RepositoryError::Storage(e.to_string()))
        })
        .transpose()
    }

    async fn save_value(&self, key: &str, value: &str) -> Result<(), RepositoryError> {
        let updated_at = chrono::Utc::now().format("%Y-%m-%d %H:%M:%S").to_string();

        sqlx::query("INSERT OR REPLACE INTO settings_kv (key, value, updated_at) VALUES (?, ?, ?)")
            .bind(key)
            .bind(value)
            .bind(&updated_at)
            .execute(&self.pool)
            .await
            .map_err(|e| RepositoryError::Storage(e.to_string()))?;

        self.changes.notify();
        Ok(())
    }
}

#[async_trait]
impl PreferencesRepository for SqlitePreferencesRepository {
    async fn load_language_tag(&self) -> Result<Option<String>, RepositoryError> {
        self.load_value(LANGUAGE_TAG_KEY).await
    }

    async fn save_language_tag(&self, tag: &str) -> Result<(), RepositoryError> {
        self.save_value(LANGUAGE_TAG_KEY, tag).await
    }

    fn changes(&self) -> Option<watch::Receiver<u64>> {
        Some(self.changes.subscribe())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::setup::{setup_database, setup_test_database};

    #[tokio::test]
    async fn test_load_returns_none_when_empty() {
        let repo = SqlitePreferencesRepository::new(setup_test_database().await.unwrap());
        assert_eq!(repo.load_language_tag().await.unwrap(), None);
    }

    #[tokio::test]
    async fn test_save_and_load() {
        let repo = SqlitePreferencesRepository::new(setup_test_database().await.unwrap());

        repo.save_language_tag("ja-JP").await.unwrap();
        repo.save_language_tag("zh-TW").await.unwrap();

        assert_eq!(
            repo.load_language_tag().await.unwrap().as_deref(),
            Some("zh-TW")
        );
    }

    #[tokio::test]
    async fn test_empty_tag_is_stored_as_is() {
        let repo = SqlitePreferencesRepository::new(setup_test_database().await.unwrap());

        repo.save_language_tag("").await.unwrap();

        assert_eq!(repo.load_language_tag().await.unwrap().as_deref(), Some(""));
    }

    #[tokio::test]
    async fn test_save_is_announced() {
        let repo = SqlitePreferencesRepository::new(setup_test_database().await.unwrap());
        let mut changes = repo.changes().unwrap();
        assert!(!changes.has_changed().unwrap());

        repo.save_language_tag("ja-JP").await.unwrap();

        assert!(changes.has_changed().unwrap());
        changes.mark_unchanged();
        assert!(repo.load_language_tag().await.is_ok());
        assert!(!changes.has_changed().unwrap());
    }

    #[tokio::test]
    async fn test_value_survives_reopen() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("mymovies.db");

        {
            let pool = setup_database(&path).await.unwrap();
            SqlitePreferencesRepository::new(pool.clone())
                .save_language_tag("en-US")
                .await
                .unwrap();
            pool.close().await;
        }

        let repo = SqlitePreferencesRepository::new(setup_database(&path).await.unwrap());
        assert_eq!(
            repo.load_language_tag().await.unwrap().as_deref(),
            Some("en-US")
        );
    }
}
