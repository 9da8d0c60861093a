//! Search history service - persisted keywords feeding search suggestions.

use std::sync::Arc;

use chrono::{DateTime, Utc};
use tokio::sync::watch;
use tracing::{debug, warn};

use crate::domain::{NewSearchKeyword, SearchKeyword};
use crate::ports::{RepositoryError, SearchKeywordRepository};

/// Records committed search terms and publishes the keyword list.
///
/// The published list mirrors the store, most recently used first. It is
/// refreshed after every write made through this service, and by
/// `StoreWatcher` after writes made elsewhere.
pub struct SearchHistory {
    repo: Arc<dyn SearchKeywordRepository>,
    tx: watch::Sender<Vec<SearchKeyword>>,
}

impl SearchHistory {
    /// Create a history with an empty list. Call `refresh` to read the store.
    pub fn new(repo: Arc<dyn SearchKeywordRepository>) -> Self {
        let (tx, _) = watch::channel(Vec::new());
        Self { repo, tx }
    }

    /// Observe the keyword list.
    pub fn subscribe(&self) -> watch::Receiver<Vec<SearchKeyword>> {
        self.tx.subscribe()
    }

    /// The current keyword records.
    pub fn entries(&self) -> Vec<SearchKeyword> {
        self.tx.borrow().clone()
    }

    /// The current keywords as plain suggestion strings.
    pub fn keywords(&self) -> Vec<String> {
        self.tx.borrow().iter().map(|k| k.keyword.clone()).collect()
    }

    /// Observe the store's write notifications, if it announces writes.
    pub fn store_changes(&self) -> Option<watch::Receiver<u64>> {
        self.repo.changes()
    }

    /// Re-read the keyword list from the store.
    pub async fn refresh(&self) -> Result<(), RepositoryError> {
        let list = self.repo.list().await?;
        self.tx.send_if_modified(|current| {
            if *current == list {
                false
            } else {
                *current = list;
                true
            }
        });
        Ok(())
    }

    /// Record a committed search term.
    ///
    /// The keyword is trimmed; blank keywords are ignored and `false` is
    /// returned. Once the keyword is stored the call succeeds, even if the
    /// published list cannot be re-read.
    pub async fn record(&self, keyword: &str, at: DateTime<Utc>) -> Result<bool, RepositoryError> {
        let keyword = keyword.trim();
        if keyword.is_empty() {
            return Ok(false);
        }

        debug!(keyword, "Recording search keyword");
        self.repo.insert(&NewSearchKeyword::new(keyword, at)).await?;
        self.refresh_after_write().await;
        Ok(true)
    }

    /// Delete a keyword and refresh the list.
    pub async fn delete(&self, keyword: &SearchKeyword) -> Result<(), RepositoryError> {
        self.repo.delete(keyword).await?;
        self.refresh_after_write().await;
        Ok(())
    }

    async fn refresh_after_write(&self) {
        if let Err(e) = self.refresh().await {
            warn!(error = %e, "Failed to reload search history after write");
        }
    }

    /// Find a recorded keyword by its text.
    pub fn find(&self, keyword: &str) -> Option<SearchKeyword> {
        let keyword = keyword.trim();
        self.tx.borrow().iter().find(|k| k.keyword == keyword).cloned()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::MemoryStore;
    use chrono::TimeZone;

    fn at(millis: i64) -> DateTime<Utc> {
        Utc.timestamp_millis_opt(millis).unwrap()
    }

    #[tokio::test]
    async fn test_record_publishes_most_recent_first() {
        let history = SearchHistory::new(Arc::new(MemoryStore::new()));
        let mut rx = history.subscribe();

        history.record("matrix", at(1_000)).await.unwrap();
        history.record("hero", at(2_000)).await.unwrap();
        history.record("matrix", at(3_000)).await.unwrap();

        assert!(rx.has_changed().unwrap());
        assert_eq!(history.keywords(), vec!["matrix", "hero"]);
    }

    #[tokio::test]
    async fn test_blank_keyword_is_ignored() {
        let history = SearchHistory::new(Arc::new(MemoryStore::new()));

        assert!(!history.record("   ", at(1_000)).await.unwrap());
        assert!(history.keywords().is_empty());
    }

    #[tokio::test]
    async fn test_delete_refreshes_list() {
        let history = SearchHistory::new(Arc::new(MemoryStore::new()));
        history.record("war", at(1_000)).await.unwrap();
        history.record("peace", at(2_000)).await.unwrap();

        let war = history.find("war").unwrap();
        history.delete(&war).await.unwrap();

        assert_eq!(history.keywords(), vec!["peace"]);
        assert!(matches!(
            history.delete(&war).await,
            Err(RepositoryError::NotFound(_))
        ));
    }

    /// Store whose writes succeed but whose reads fail.
    struct WriteOnlyStore;

    #[async_trait::async_trait]
    impl SearchKeywordRepository for WriteOnlyStore {
        async fn list(&self) -> Result<Vec<SearchKeyword>, RepositoryError> {
            Err(RepositoryError::Storage("database is locked".to_string()))
        }

        async fn insert(&self, _keyword: &NewSearchKeyword) -> Result<(), RepositoryError> {
            Ok(())
        }

        async fn delete(&self, _keyword: &SearchKeyword) -> Result<(), RepositoryError> {
            Ok(())
        }
    }

    #[tokio::test]
    async fn test_record_succeeds_when_only_the_reload_fails() {
        let history = SearchHistory::new(Arc::new(WriteOnlyStore));

        assert!(history.record("war", at(1_000)).await.unwrap());
        assert!(history.refresh().await.is_err());
    }

    #[tokio::test]
    async fn test_histories_over_one_store_share_a_change_feed() {
        let store = MemoryStore::new();
        let writer = SearchHistory::new(Arc::new(store.clone()));
        let observer = SearchHistory::new(Arc::new(store));
        let mut changes = observer.store_changes().unwrap();

        writer.record("war", at(1_000)).await.unwrap();
        changes.changed().await.unwrap();
        observer.refresh().await.unwrap();

        assert_eq!(observer.keywords(), vec!["war"]);
    }
}
