//! Search keyword repository trait definition.

use async_trait::async_trait;
use tokio::sync::watch;

use super::RepositoryError;
use crate::domain::{NewSearchKeyword, SearchKeyword};

/// Repository for the search history table.
///
/// # Design Rules
///
/// - The store is the single arbiter of keyword uniqueness: `insert` of an
///   existing keyword refreshes its timestamp instead of adding a row, even
///   under concurrent writers
/// - `list` is ordered by `added_at`, most recent first
#[async_trait]
pub trait SearchKeywordRepository: Send + Sync {
    /// List all keywords, most recently used first.
    async fn list(&self) -> Result<Vec<SearchKeyword>, RepositoryError>;

    /// Insert a keyword or refresh the timestamp of an existing one.
    async fn insert(&self, keyword: &NewSearchKeyword) -> Result<(), RepositoryError>;

    /// Delete a keyword row.
    ///
    /// Returns `NotFound` if no row matches.
    async fn delete(&self, keyword: &SearchKeyword) -> Result<(), RepositoryError>;

    /// Notifications of writes made through this repository.
    ///
    /// `None` when the store cannot announce writes; it is then only polled.
    fn changes(&self) -> Option<watch::Receiver<u64>> {
        None
    }
}
