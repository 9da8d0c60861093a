//! Search screen: paged results for the current query plus keyword history.
//!
//! The paging key is the `(query, language)` pair. A driver task owns the
//! `Pager` for the current key and runs at most one load at a time; a key
//! change replaces the pager and drops whatever load was in flight.

use std::sync::Arc;
use std::sync::atomic::{AtomicU64, Ordering};

use chrono::Utc;
use futures_util::future::BoxFuture;
use mymovies_core::{
    AppCore, CatalogRepository, LanguageTag, LoadKind, LoadParams, LoadResult, LoadState, Movie,
    Pager, PagingConfig, PagingSnapshot, PagingSource, SearchKeyword, SearchMoviesPagingSource,
};
use tokio::sync::{mpsc, watch};
use tokio_util::sync::CancellationToken;
use tracing::debug;

use crate::error::GuiError;

/// Published search state.
#[derive(Debug, Clone, PartialEq)]
pub struct SearchResults {
    /// Query the results belong to.
    pub query: String,
    /// Language the results belong to.
    pub language: LanguageTag,
    pub paging: PagingSnapshot<Movie>,
    handled: u64,
}

impl SearchResults {
    /// Before the driver's first publish the first refresh is pending.
    fn initial(query: String, language: LanguageTag) -> Self {
        Self {
            query,
            language,
            paging: PagingSnapshot {
                refresh: LoadState::Loading,
                ..PagingSnapshot::initial()
            },
            handled: 0,
        }
    }

    /// Whether a load is running in either direction.
    pub const fn is_loading(&self) -> bool {
        self.paging.refresh.is_loading() || self.paging.append.is_loading()
    }
}

#[derive(Debug, Clone, Copy)]
enum SearchCommand {
    LoadMore,
    Retry,
    Refresh,
    Access(usize),
}

/// State of the search screen.
pub struct SearchMoviesViewModel {
    core: Arc<AppCore>,
    query: watch::Sender<String>,
    language: watch::Receiver<LanguageTag>,
    results: watch::Receiver<SearchResults>,
    commands: mpsc::UnboundedSender<SearchCommand>,
    sent: AtomicU64,
    cancel: CancellationToken,
}

impl SearchMoviesViewModel {
    /// Create the screen with an empty query and spawn its driver.
    pub fn new(core: Arc<AppCore>, config: PagingConfig) -> Self {
        let (query_tx, query_rx) = watch::channel(String::new());
        let language = core.preferences().subscribe();
        let (results_tx, results_rx) = watch::channel(SearchResults::initial(
            String::new(),
            language.borrow().clone(),
        ));
        let (commands_tx, commands_rx) = mpsc::unbounded_channel();
        let cancel = CancellationToken::new();

        let driver = SearchDriver {
            catalog: core.catalog().clone(),
            config,
            query: query_rx,
            language: language.clone(),
            commands: commands_rx,
            results: results_tx,
            cancel: cancel.clone(),
        };
        tokio::spawn(driver.run());

        Self {
            core,
            query: query_tx,
            language,
            results: results_rx,
            commands: commands_tx,
            sent: AtomicU64::new(0),
            cancel,
        }
    }

    /// Replace the query, including with an empty one.
    pub fn set_query(&self, query: impl Into<String>) {
        let query = query.into();
        self.query.send_if_modified(|current| {
            if *current == query {
                false
            } else {
                *current = query;
                true
            }
        });
    }

    /// Search for `keyword`. Empty keywords are ignored.
    pub fn search_movies(&self, keyword: &str) {
        if !keyword.is_empty() {
            self.set_query(keyword);
        }
    }

    /// Search for `keyword` and record it in the search history.
    ///
    /// The keyword is trimmed. Returns `false` without searching when
    /// nothing is left.
    pub async fn commit_search(&self, keyword: &str) -> Result<bool, GuiError> {
        let keyword = keyword.trim();
        if keyword.is_empty() {
            return Ok(false);
        }
        self.search_movies(keyword);
        self.core
            .search_history()
            .record(keyword, Utc::now())
            .await
            .map_err(GuiError::from)
    }

    /// Remove `keyword` from the search history.
    pub async fn delete_keyword(&self, keyword: &str) -> Result<(), GuiError> {
        let history = self.core.search_history();
        let entry = history.find(keyword).ok_or_else(|| GuiError::NotFound {
            entity: "search keyword",
            id: keyword.to_string(),
        })?;
        history.delete(&entry).await?;
        Ok(())
    }

    /// Load the next page if possible.
    pub fn load_more(&self) {
        self.send(SearchCommand::LoadMore);
    }

    /// Re-run the last failed load.
    pub fn retry(&self) {
        self.send(SearchCommand::Retry);
    }

    /// Reload the current query.
    pub fn refresh(&self) {
        self.send(SearchCommand::Refresh);
    }

    /// Report that the item at `index` is on screen. Loads the next page
    /// when the index nears the end of the loaded items.
    pub fn record_access(&self, index: usize) {
        self.send(SearchCommand::Access(index));
    }

    pub fn query(&self) -> String {
        self.query.borrow().clone()
    }

    /// Observe the results.
    pub fn results(&self) -> watch::Receiver<SearchResults> {
        self.results.clone()
    }

    pub fn snapshot(&self) -> SearchResults {
        self.results.borrow().clone()
    }

    /// Wait until the results reflect the current query, language and every
    /// command sent so far, with no load running.
    pub async fn settled(&self) -> SearchResults {
        let query = self.query();
        let language = self.language.borrow().clone();
        let sent = self.sent.load(Ordering::SeqCst);

        let current = |r: &SearchResults| {
            r.query == query && r.language == language && r.handled >= sent && !r.is_loading()
        };

        let mut rx = self.results.clone();
        if let Ok(results) = rx.wait_for(current).await {
            return results.clone();
        }
        rx.borrow().clone()
    }

    /// Past search keywords, most recent first.
    pub fn suggestions(&self) -> Vec<String> {
        self.core.search_history().keywords()
    }

    pub fn subscribe_suggestions(&self) -> watch::Receiver<Vec<SearchKeyword>> {
        self.core.search_history().subscribe()
    }

    fn send(&self, command: SearchCommand) {
        self.sent.fetch_add(1, Ordering::SeqCst);
        if self.commands.send(command).is_err() {
            debug!(?command, "Search driver stopped; command dropped");
        }
    }
}

impl Drop for SearchMoviesViewModel {
    fn drop(&mut self) {
        self.cancel.cancel();
    }
}

type SearchPager = Pager<SearchMoviesPagingSource>;
type PendingLoad = (LoadKind, BoxFuture<'static, LoadResult<u32, Movie>>);

enum Event {
    Stop,
    KeyChanged,
    LanguageClosed,
    Command(SearchCommand),
    Loaded(LoadKind, LoadResult<u32, Movie>),
}

struct SearchDriver {
    catalog: CatalogRepository,
    config: PagingConfig,
    query: watch::Receiver<String>,
    language: watch::Receiver<LanguageTag>,
    commands: mpsc::UnboundedReceiver<SearchCommand>,
    results: watch::Sender<SearchResults>,
    cancel: CancellationToken,
}

impl SearchDriver {
    async fn run(mut self) {
        let mut language_open = true;
        let mut handled: u64 = 0;
        let mut key = self.current_key();
        let (mut pager, mut pending) = self.open(&key);
        self.publish(&key, &pager, handled);

        loop {
            let event = tokio::select! {
                biased;

                () = self.cancel.cancelled() => Event::Stop,
                changed = self.query.changed() => match changed {
                    Ok(()) => Event::KeyChanged,
                    Err(_) => Event::Stop,
                },
                changed = self.language.changed(), if language_open => match changed {
                    Ok(()) => Event::KeyChanged,
                    Err(_) => Event::LanguageClosed,
                },
                command = self.commands.recv() => match command {
                    Some(command) => Event::Command(command),
                    None => Event::Stop,
                },
                (kind, result) = settle(&mut pending) => Event::Loaded(kind, result),
            };

            match event {
                Event::Stop => {
                    debug!("Search driver stopped");
                    return;
                }
                Event::LanguageClosed => {
                    language_open = false;
                    continue;
                }
                Event::KeyChanged => {
                    let next = self.current_key();
                    if next == key {
                        continue;
                    }
                    debug!(
                        query = %next.0,
                        language = %next.1,
                        dropped_load = pending.is_some(),
                        "Search key changed"
                    );
                    key = next;
                    (pager, pending) = self.open(&key);
                }
                Event::Command(command) => {
                    handled += 1;
                    let params = match command {
                        SearchCommand::LoadMore => pager.begin_append(),
                        SearchCommand::Retry => pager.retry(),
                        SearchCommand::Refresh => pager.begin_refresh(),
                        SearchCommand::Access(index) => pager.record_access(index),
                    };
                    if let Some(params) = params {
                        debug!(?command, page = ?params.key, "Search load started");
                        pending = Some(start_load(&pager, params));
                    }
                }
                Event::Loaded(kind, result) => {
                    pending = None;
                    if !pager.apply(kind, result) {
                        continue;
                    }
                }
            }

            self.publish(&key, &pager, handled);
        }
    }

    fn current_key(&mut self) -> (String, LanguageTag) {
        (
            self.query.borrow_and_update().clone(),
            self.language.borrow_and_update().clone(),
        )
    }

    /// A fresh pager for `key` with its first refresh already started.
    fn open(&self, key: &(String, LanguageTag)) -> (SearchPager, Option<PendingLoad>) {
        let source =
            SearchMoviesPagingSource::new(self.catalog.clone(), key.0.clone(), key.1.clone());
        let mut pager = Pager::new(Arc::new(source), self.config);
        let pending = pager
            .begin_refresh()
            .map(|params| start_load(&pager, params));
        (pager, pending)
    }

    fn publish(&self, key: &(String, LanguageTag), pager: &SearchPager, handled: u64) {
        self.results.send_replace(SearchResults {
            query: key.0.clone(),
            language: key.1.clone(),
            paging: pager.snapshot(),
            handled,
        });
    }
}

fn start_load(pager: &SearchPager, params: LoadParams<u32>) -> PendingLoad {
    let source = Arc::clone(pager.source());
    let kind = params.kind;
    (kind, Box::pin(async move { source.load(params).await }))
}

async fn settle(pending: &mut Option<PendingLoad>) -> (LoadKind, LoadResult<u32, Movie>) {
    match pending {
        Some((kind, load)) => (*kind, load.await),
        None => std::future::pending().await,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tests::WAIT;
    use mymovies_core::testing::{CatalogOp, FakeCatalog, MemoryStore};
    use mymovies_core::{CatalogClientPort, CatalogPortError};

    async fn setup(fake: FakeCatalog) -> (Arc<FakeCatalog>, Arc<AppCore>, SearchMoviesViewModel) {
        let fake = Arc::new(fake);
        let catalog: Arc<dyn CatalogClientPort> = Arc::clone(&fake) as _;
        let core = Arc::new(AppCore::new(
            MemoryStore::new().with_language_tag("zh-TW").repos(),
            catalog,
        ));
        core.reload().await;
        let vm = SearchMoviesViewModel::new(Arc::clone(&core), PagingConfig::default());
        (fake, core, vm)
    }

    async fn settled(vm: &SearchMoviesViewModel) -> SearchResults {
        tokio::time::timeout(WAIT, vm.settled()).await.unwrap()
    }

    fn pages_requested(fake: &FakeCatalog) -> Vec<u32> {
        fake.calls()
            .into_iter()
            .filter(|c| c.op == CatalogOp::SearchMovies)
            .filter_map(|c| c.page)
            .collect()
    }

    #[tokio::test]
    async fn test_empty_query_loads_nothing() {
        let (fake, _core, vm) = setup(FakeCatalog::new()).await;

        let results = settled(&vm).await;

        assert!(results.paging.items.is_empty());
        assert!(results.paging.end_of_pagination());
        assert!(fake.calls().is_empty());
    }

    #[tokio::test]
    async fn test_pages_through_results_until_empty_page() {
        let (fake, _core, vm) = setup(FakeCatalog::new().with_search_pages(3)).await;

        vm.search_movies("Hello World");
        let first = settled(&vm).await;
        assert_eq!(first.query, "Hello World");
        assert_eq!(first.paging.items.len(), 20);
        assert_eq!(first.paging.items[0].title, "Hello World #0 [zh-TW]");

        vm.load_more();
        assert_eq!(settled(&vm).await.paging.items.len(), 40);
        vm.load_more();
        assert_eq!(settled(&vm).await.paging.items.len(), 60);
        vm.load_more();
        let last = settled(&vm).await;
        assert_eq!(last.paging.items.len(), 60);
        assert!(last.paging.end_of_pagination());

        // Nothing left to ask for.
        vm.load_more();
        settled(&vm).await;
        assert_eq!(pages_requested(&fake), vec![1, 2, 3, 4]);
    }

    #[tokio::test]
    async fn test_empty_keyword_is_ignored() {
        let (_fake, _core, vm) = setup(FakeCatalog::new()).await;

        vm.search_movies("war");
        settled(&vm).await;
        vm.search_movies("");

        assert_eq!(vm.query(), "war");
        assert_eq!(settled(&vm).await.query, "war");
    }

    #[tokio::test]
    async fn test_append_failure_keeps_results_and_retry_resumes() {
        let (fake, _core, vm) = setup(FakeCatalog::new().with_search_pages(3)).await;

        vm.search_movies("war");
        settled(&vm).await;

        fake.fail(
            CatalogOp::SearchMovies,
            CatalogPortError::Transport {
                message: "offline".to_string(),
            },
        );
        vm.load_more();
        let failed = settled(&vm).await;
        assert_eq!(failed.paging.items.len(), 20);
        assert!(failed.paging.append.error().unwrap().is_network());
        assert_eq!(failed.paging.refresh, LoadState::idle());

        fake.clear_failure(CatalogOp::SearchMovies);
        vm.retry();
        let recovered = settled(&vm).await;
        assert_eq!(recovered.paging.items.len(), 40);
        assert_eq!(recovered.paging.items[20].title, "war #20 [zh-TW]");
        assert_eq!(pages_requested(&fake), vec![1, 2, 2]);
    }

    #[tokio::test]
    async fn test_refresh_failure_then_retry() {
        let (fake, _core, vm) = setup(FakeCatalog::new()).await;
        fake.fail(
            CatalogOp::SearchMovies,
            CatalogPortError::Protocol {
                status: 500,
                url: "search/movie".to_string(),
            },
        );

        vm.search_movies("war");
        let failed = settled(&vm).await;
        assert!(failed.paging.items.is_empty());
        assert_eq!(failed.paging.refresh.error().unwrap().status(), Some(500));

        fake.clear_failure(CatalogOp::SearchMovies);
        vm.retry();
        let recovered = settled(&vm).await;
        assert_eq!(recovered.paging.items.len(), 20);
        assert_eq!(recovered.paging.refresh, LoadState::idle());
    }

    #[tokio::test]
    async fn test_access_near_end_prefetches_next_page() {
        let (fake, _core, vm) = setup(FakeCatalog::new().with_search_pages(3)).await;

        vm.search_movies("war");
        settled(&vm).await;

        vm.record_access(5);
        assert_eq!(settled(&vm).await.paging.items.len(), 40);

        // Far from the end of 40 items.
        vm.record_access(5);
        settled(&vm).await;
        assert_eq!(pages_requested(&fake), vec![1, 2]);
    }

    #[tokio::test]
    async fn test_language_change_restarts_search() {
        let (_fake, core, vm) = setup(FakeCatalog::new()).await;

        vm.search_movies("war");
        settled(&vm).await;

        core.preferences()
            .set_session_language_tag(LanguageTag::new("ja-JP"));
        let results = settled(&vm).await;

        assert_eq!(results.language, LanguageTag::new("ja-JP"));
        assert_eq!(results.paging.items[0].title, "war #0 [ja-JP]");
    }

    #[tokio::test]
    async fn test_query_change_drops_in_flight_load() {
        let (fake, _core, vm) = setup(FakeCatalog::new()).await;
        fake.hold(CatalogOp::SearchMovies);

        vm.search_movies("war");
        tokio::time::timeout(WAIT, fake.wait_for_calls(1))
            .await
            .unwrap();
        vm.search_movies("peace");
        tokio::time::timeout(WAIT, fake.wait_for_calls(2))
            .await
            .unwrap();
        assert_eq!(fake.cancelled(), 1);

        fake.release(CatalogOp::SearchMovies);
        let results = settled(&vm).await;
        assert_eq!(results.query, "peace");
        assert_eq!(results.paging.items[0].title, "peace #0 [zh-TW]");
    }

    #[tokio::test]
    async fn test_commit_search_records_keyword() {
        let (_fake, _core, vm) = setup(FakeCatalog::new()).await;

        assert!(vm.commit_search("  war  ").await.unwrap());
        assert!(vm.commit_search("hero").await.unwrap());
        assert!(!vm.commit_search("   ").await.unwrap());

        assert_eq!(vm.query(), "hero");
        assert_eq!(vm.suggestions().len(), 2);
        assert!(vm.suggestions().contains(&"war".to_string()));
        assert_eq!(vm.subscribe_suggestions().borrow().len(), 2);
    }

    #[tokio::test]
    async fn test_delete_keyword() {
        let (_fake, _core, vm) = setup(FakeCatalog::new()).await;
        vm.commit_search("war").await.unwrap();

        vm.delete_keyword("war").await.unwrap();
        assert!(vm.suggestions().is_empty());

        let again = vm.delete_keyword("war").await;
        assert!(matches!(again, Err(GuiError::NotFound { .. })));
    }
}
