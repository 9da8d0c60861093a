//! Preferences source - the observed language tag.

use std::sync::{Arc, Mutex, PoisonError};

use tokio::sync::watch;
use tracing::{debug, warn};

use crate::domain::LanguageTag;
use crate::ports::{PreferencesRepository, RepositoryError};

/// Exposes the stored language tag as a continuously observed value.
///
/// The value defaults to the unset tag. Store read failures are logged and
/// treated as "no preference"; they never reach observers.
///
/// A session tag stays in effect until the stored tag itself changes.
pub struct PreferencesSource {
    repo: Arc<dyn PreferencesRepository>,
    tx: watch::Sender<LanguageTag>,
    /// Last tag read from or written to the store.
    stored: Mutex<Option<LanguageTag>>,
}

impl PreferencesSource {
    /// Create a source holding the unset tag. Call `reload` to read the store.
    pub fn new(repo: Arc<dyn PreferencesRepository>) -> Self {
        let (tx, _) = watch::channel(LanguageTag::unset());
        Self {
            repo,
            tx,
            stored: Mutex::new(None),
        }
    }

    /// Create a source and read the stored tag.
    pub async fn load(repo: Arc<dyn PreferencesRepository>) -> Self {
        let source = Self::new(repo);
        source.reload().await;
        source
    }

    /// The current language tag.
    pub fn language_tag(&self) -> LanguageTag {
        self.tx.borrow().clone()
    }

    /// Observe the language tag.
    pub fn subscribe(&self) -> watch::Receiver<LanguageTag> {
        self.tx.subscribe()
    }

    /// Observe the store's write notifications, if it announces writes.
    pub fn store_changes(&self) -> Option<watch::Receiver<u64>> {
        self.repo.changes()
    }

    /// Re-read the store and publish the value if the stored tag changed.
    ///
    /// Picks up writes made by other components or processes.
    pub async fn reload(&self) {
        let tag = match self.repo.load_language_tag().await {
            Ok(stored) => stored.map(LanguageTag::new).unwrap_or_default(),
            Err(e) => {
                warn!(error = %e, "Failed to read language preference, using default");
                LanguageTag::unset()
            }
        };
        if self.remember_stored(&tag) {
            self.publish(tag);
        }
    }

    /// Persist a new language tag and publish it.
    pub async fn update_language_tag(&self, tag: LanguageTag) -> Result<(), RepositoryError> {
        self.repo.save_language_tag(tag.as_str()).await?;
        self.remember_stored(&tag);
        self.publish(tag);
        Ok(())
    }

    /// Publish a tag for this session only, without persisting it.
    pub fn set_session_language_tag(&self, tag: LanguageTag) {
        self.publish(tag);
    }

    /// Record `tag` as the stored value; `false` if it already was.
    fn remember_stored(&self, tag: &LanguageTag) -> bool {
        let mut stored = self.stored.lock().unwrap_or_else(PoisonError::into_inner);
        if stored.as_ref() == Some(tag) {
            return false;
        }
        *stored = Some(tag.clone());
        true
    }

    fn publish(&self, tag: LanguageTag) {
        let changed = self.tx.send_if_modified(|current| {
            if *current == tag {
                false
            } else {
                *current = tag.clone();
                true
            }
        });
        if changed {
            debug!(%tag, "Language tag changed");
        }
    }
}
