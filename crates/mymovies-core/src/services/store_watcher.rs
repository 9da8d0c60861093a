//! Store watcher - keeps observed preferences and history in step with the
//! local store.
//!
//! Writes announced by the store adapters are picked up immediately. Writes
//! made by another process are only visible by re-reading the store, so the
//! watcher can also poll on an interval.

use std::future;
use std::sync::{Arc, Weak};
use std::time::Duration;

use tokio::sync::watch;
use tokio::time::{Instant, Interval, MissedTickBehavior};
use tokio_util::sync::CancellationToken;
use tracing::{debug, warn};

use super::AppCore;

/// Poll interval used by front ends that share the store with other
/// processes.
pub const DEFAULT_STORE_POLL_INTERVAL: Duration = Duration::from_secs(2);

/// Handle of a running store watcher. Dropping it stops the watcher.
pub struct StoreWatcher {
    cancel: CancellationToken,
}

impl StoreWatcher {
    /// Start following the store behind `core`.
    ///
    /// With `poll` set, both values are also re-read on that interval. The
    /// watcher holds `core` weakly and stops once it is dropped.
    pub fn spawn(core: &Arc<AppCore>, poll: Option<Duration>) -> Self {
        let cancel = CancellationToken::new();
        let driver = Driver {
            core: Arc::downgrade(core),
            preferences: core.preferences().store_changes(),
            keywords: core.search_history().store_changes(),
            ticker: poll.map(poll_interval),
        };
        tokio::spawn(driver.run(cancel.clone()));
        Self { cancel }
    }

    pub fn is_running(&self) -> bool {
        !self.cancel.is_cancelled()
    }
}

impl Drop for StoreWatcher {
    fn drop(&mut self) {
        self.cancel.cancel();
    }
}

fn poll_interval(period: Duration) -> Interval {
    let mut ticker = tokio::time::interval_at(Instant::now() + period, period);
    ticker.set_missed_tick_behavior(MissedTickBehavior::Skip);
    ticker
}

enum Event {
    Stop,
    Preferences,
    Keywords,
    PreferencesClosed,
    KeywordsClosed,
    Poll,
}

struct Driver {
    core: Weak<AppCore>,
    preferences: Option<watch::Receiver<u64>>,
    keywords: Option<watch::Receiver<u64>>,
    ticker: Option<Interval>,
}

impl Driver {
    async fn run(mut self, cancel: CancellationToken) {
        loop {
            let event = tokio::select! {
                biased;
                () = cancel.cancelled() => Event::Stop,
                open = next_change(self.preferences.as_mut()) => {
                    if open { Event::Preferences } else { Event::PreferencesClosed }
                }
                open = next_change(self.keywords.as_mut()) => {
                    if open { Event::Keywords } else { Event::KeywordsClosed }
                }
                () = next_tick(self.ticker.as_mut()) => Event::Poll,
            };

            let core = match event {
                Event::Stop => break,
                Event::PreferencesClosed => {
                    self.preferences = None;
                    continue;
                }
                Event::KeywordsClosed => {
                    self.keywords = None;
                    continue;
                }
                Event::Preferences | Event::Keywords | Event::Poll => {
                    let Some(core) = self.core.upgrade() else {
                        break;
                    };
                    core
                }
            };

            if matches!(event, Event::Preferences | Event::Poll) {
                core.preferences().reload().await;
            }
            if matches!(event, Event::Keywords | Event::Poll) {
                if let Err(e) = core.search_history().refresh().await {
                    warn!(error = %e, "Failed to reload search history");
                }
            }
        }
        debug!("Store watcher stopped");
    }
}

/// Wait for the next announced write; `false` once the feed is closed.
async fn next_change(rx: Option<&mut watch::Receiver<u64>>) -> bool {
    match rx {
        Some(rx) => rx.changed().await.is_ok(),
        None => future::pending().await,
    }
}

async fn next_tick(ticker: Option<&mut Interval>) {
    match ticker {
        Some(ticker) => {
            ticker.tick().await;
        }
        None => future::pending().await,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::LanguageTag;
    use crate::testing::{FakeCatalog, MemoryStore};
    use chrono::Utc;

    const WAIT: Duration = Duration::from_secs(5);

    async fn core_over(store: &MemoryStore) -> Arc<AppCore> {
        let core = AppCore::new(store.repos(), Arc::new(FakeCatalog::new()));
        core.reload().await;
        Arc::new(core)
    }

    #[tokio::test]
    async fn test_write_through_one_core_reaches_another() {
        let store = MemoryStore::new().with_language_tag("en-US");
        let writer = core_over(&store).await;
        let observer = core_over(&store).await;
        let _watcher = StoreWatcher::spawn(&observer, None);
        let mut language = observer.preferences().subscribe();
        let mut keywords = observer.search_history().subscribe();

        writer
            .preferences()
            .update_language_tag(LanguageTag::new("zh-TW"))
            .await
            .unwrap();
        writer
            .search_history()
            .record("war", Utc::now())
            .await
            .unwrap();

        let tag = tokio::time::timeout(WAIT, language.wait_for(|t| t.as_str() == "zh-TW"))
            .await
            .unwrap()
            .unwrap()
            .clone();
        assert_eq!(tag.as_str(), "zh-TW");
        tokio::time::timeout(WAIT, keywords.wait_for(|k| !k.is_empty()))
            .await
            .unwrap()
            .unwrap();
        assert_eq!(observer.search_history().keywords(), vec!["war"]);
    }

    #[tokio::test]
    async fn test_polling_picks_up_unannounced_writes() {
        let store = MemoryStore::new().with_language_tag("en-US");
        let core = core_over(&store).await;
        let _watcher = StoreWatcher::spawn(&core, Some(Duration::from_millis(10)));
        let mut language = core.preferences().subscribe();

        store.set_stored_language_tag("ja-JP");

        tokio::time::timeout(WAIT, language.wait_for(|t| t.as_str() == "ja-JP"))
            .await
            .unwrap()
            .unwrap();
    }

    #[tokio::test]
    async fn test_polling_keeps_session_language() {
        let store = MemoryStore::new().with_language_tag("en-US");
        let core = core_over(&store).await;
        core.preferences()
            .set_session_language_tag(LanguageTag::new("ko-KR"));
        let _watcher = StoreWatcher::spawn(&core, Some(Duration::from_millis(5)));

        tokio::time::sleep(Duration::from_millis(50)).await;

        assert_eq!(core.preferences().language_tag().as_str(), "ko-KR");
    }

    #[tokio::test]
    async fn test_drop_stops_following() {
        let store = MemoryStore::new().with_language_tag("en-US");
        let writer = core_over(&store).await;
        let observer = core_over(&store).await;
        let watcher = StoreWatcher::spawn(&observer, None);
        assert!(watcher.is_running());
        drop(watcher);
        tokio::task::yield_now().await;

        writer
            .preferences()
            .update_language_tag(LanguageTag::new("zh-TW"))
            .await
            .unwrap();
        tokio::time::sleep(Duration::from_millis(50)).await;

        assert_eq!(observer.preferences().language_tag().as_str(), "en-US");
    }
}
