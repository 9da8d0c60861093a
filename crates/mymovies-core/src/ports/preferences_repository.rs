//! Preferences repository trait definition.

use async_trait::async_trait;
use tokio::sync::watch;

use super::RepositoryError;

/// Repository for user preferences persistence.
#[async_trait]
pub trait PreferencesRepository: Send + Sync {
    /// Load the stored language tag, `None` if never set.
    async fn load_language_tag(&self) -> Result<Option<String>, RepositoryError>;

    /// Store the language tag. Last write wins.
    async fn save_language_tag(&self, tag: &str) -> Result<(), RepositoryError>;

    /// Notifications of writes made through this repository.
    ///
    /// `None` when the store cannot announce writes; it is then only polled.
    fn changes(&self) -> Option<watch::Receiver<u64>> {
        None
    }
}
