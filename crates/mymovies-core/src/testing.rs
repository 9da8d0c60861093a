//! In-memory fakes of the core ports, for tests in this and dependent crates.
//!
//! Enabled in this crate's tests and through the `test-utils` feature.

use std::collections::HashMap;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use tokio::sync::watch;

use crate::domain::{
    Cast, LanguageTag, Movie, MovieCredits, MovieDetail, MovieImages, MovieList, MovieVideos,
    NewSearchKeyword, PersonDetail, PersonImages, PersonMovieCredits, SearchKeyword, Video,
};
use crate::ports::{
    CatalogClientPort, CatalogPortError, CatalogPortResult, PreferencesRepository, Repos,
    RepositoryError, SearchKeywordRepository, StoreChanges, TimeWindow,
};

// ============================================================================
// Catalog fake
// ============================================================================

/// The thirteen catalog operations, used to configure `FakeCatalog`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum CatalogOp {
    NowPlaying,
    Upcoming,
    Popular,
    TopRated,
    Trending,
    MovieDetail,
    MovieCredits,
    MovieImages,
    MovieVideos,
    SearchMovies,
    PersonDetail,
    PersonImages,
    PersonMovieCredits,
}

/// One recorded call.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CatalogCall {
    pub op: CatalogOp,
    pub id: Option<i64>,
    pub page: Option<u32>,
    pub query: Option<String>,
    pub lang: LanguageTag,
}

#[derive(Default)]
struct FakeState {
    failures: HashMap<CatalogOp, CatalogPortError>,
    gates: HashMap<CatalogOp, watch::Sender<bool>>,
    calls: Vec<CatalogCall>,
}

/// A fake catalog that returns deterministic canned data.
///
/// Payloads embed the request parameters (id, page, language) so tests can
/// tell which generation produced them. Operations can be made to fail or
/// to block until released. Calls dropped before completing are counted.
pub struct FakeCatalog {
    state: Mutex<FakeState>,
    started: watch::Sender<usize>,
    cancelled: AtomicUsize,
    search_pages: u32,
    page_size: u32,
}

impl FakeCatalog {
    pub fn new() -> Self {
        let (started, _) = watch::channel(0);
        Self {
            state: Mutex::new(FakeState::default()),
            started,
            cancelled: AtomicUsize::new(0),
            search_pages: 1,
            page_size: 20,
        }
    }

    /// Number of non-empty search result pages for any query.
    #[must_use]
    pub fn with_search_pages(mut self, pages: u32) -> Self {
        self.search_pages = pages;
        self
    }

    /// Make every call of `op` fail with `error` until cleared.
    pub fn fail(&self, op: CatalogOp, error: CatalogPortError) {
        self.state.lock().unwrap().failures.insert(op, error);
    }

    pub fn clear_failure(&self, op: CatalogOp) {
        self.state.lock().unwrap().failures.remove(&op);
    }

    /// Block every call of `op` until `release` is called.
    pub fn hold(&self, op: CatalogOp) {
        let (tx, _) = watch::channel(false);
        self.state.lock().unwrap().gates.insert(op, tx);
    }

    /// Let held and future calls of `op` proceed.
    pub fn release(&self, op: CatalogOp) {
        if let Some(gate) = self.state.lock().unwrap().gates.remove(&op) {
            gate.send_replace(true);
        }
    }

    /// All calls made so far, in call order.
    pub fn calls(&self) -> Vec<CatalogCall> {
        self.state.lock().unwrap().calls.clone()
    }

    /// Number of calls made for `op`.
    pub fn call_count(&self, op: CatalogOp) -> usize {
        self.state
            .lock()
            .unwrap()
            .calls
            .iter()
            .filter(|c| c.op == op)
            .count()
    }

    /// Number of calls that were dropped before they completed.
    pub fn cancelled(&self) -> usize {
        self.cancelled.load(Ordering::SeqCst)
    }

    /// Wait until at least `count` calls have started.
    pub async fn wait_for_calls(&self, count: usize) {
        let mut rx = self.started.subscribe();
        let _ = rx.wait_for(|started| *started >= count).await;
    }

    async fn enter(&self, call: CatalogCall) -> CatalogPortResult<()> {
        let op = call.op;
        let (gate, failure) = {
            let mut state = self.state.lock().unwrap();
            state.calls.push(call);
            (
                state.gates.get(&op).map(watch::Sender::subscribe),
                state.failures.get(&op).cloned(),
            )
        };
        self.started.send_modify(|n| *n += 1);

        if let Some(mut gate) = gate {
            let _ = gate.wait_for(|open| *open).await;
        }
        // A failure configured while the call was held still applies.
        let failure = failure.or_else(|| self.state.lock().unwrap().failures.get(&op).cloned());
        failure.map_or(Ok(()), Err)
    }

    async fn respond<T>(
        &self,
        call: CatalogCall,
        make: impl FnOnce() -> T,
    ) -> CatalogPortResult<T> {
        let mut guard = CallGuard {
            cancelled: &self.cancelled,
            done: false,
        };
        let result = self.enter(call).await.map(|()| make());
        guard.done = true;
        result
    }

    fn list(&self, label: &str, page: u32, lang: &LanguageTag) -> MovieList {
        MovieList {
            dates: None,
            page,
            total_pages: 1,
            total_results: 1,
            results: vec![Movie {
                id: i64::from(page),
                title: format!("{label} p{page} [{lang}]"),
                ..Default::default()
            }],
        }
    }

    fn search_page(&self, query: &str, page: u32, lang: &LanguageTag) -> MovieList {
        let results = if page <= self.search_pages {
            (0..self.page_size)
                .map(|i| {
                    let index = i64::from((page - 1) * self.page_size + i);
                    Movie {
                        id: index + 1,
                        title: format!("{query} #{index} [{lang}]"),
                        ..Default::default()
                    }
                })
                .collect()
        } else {
            Vec::new()
        };
        MovieList {
            dates: None,
            page,
            total_pages: self.search_pages,
            total_results: self.search_pages * self.page_size,
            results,
        }
    }
}

impl Default for FakeCatalog {
    fn default() -> Self {
        Self::new()
    }
}

struct CallGuard<'a> {
    cancelled: &'a AtomicUsize,
    done: bool,
}

impl Drop for CallGuard<'_> {
    fn drop(&mut self) {
        if !self.done {
            self.cancelled.fetch_add(1, Ordering::SeqCst);
        }
    }
}

fn call(op: CatalogOp, id: Option<i64>, page: Option<u32>, lang: &LanguageTag) -> CatalogCall {
    CatalogCall {
        op,
        id,
        page,
        query: None,
        lang: lang.clone(),
    }
}

#[async_trait]
impl CatalogClientPort for FakeCatalog {
    async fn now_playing(&self, page: u32, lang: &LanguageTag) -> CatalogPortResult<MovieList> {
        self.respond(call(CatalogOp::NowPlaying, None, Some(page), lang), || {
            self.list("now playing", page, lang)
        })
        .await
    }

    async fn upcoming(&self, page: u32, lang: &LanguageTag) -> CatalogPortResult<MovieList> {
        self.respond(call(CatalogOp::Upcoming, None, Some(page), lang), || {
            self.list("upcoming", page, lang)
        })
        .await
    }

    async fn popular(&self, page: u32, lang: &LanguageTag) -> CatalogPortResult<MovieList> {
        self.respond(call(CatalogOp::Popular, None, Some(page), lang), || {
            self.list("popular", page, lang)
        })
        .await
    }

    async fn top_rated(&self, page: u32, lang: &LanguageTag) -> CatalogPortResult<MovieList> {
        self.respond(call(CatalogOp::TopRated, None, Some(page), lang), || {
            self.list("top rated", page, lang)
        })
        .await
    }

    async fn trending(
        &self,
        window: TimeWindow,
        page: u32,
        lang: &LanguageTag,
    ) -> CatalogPortResult<MovieList> {
        self.respond(call(CatalogOp::Trending, None, Some(page), lang), || {
            self.list(&format!("trending {window}"), page, lang)
        })
        .await
    }

    async fn movie_detail(
        &self,
        movie_id: i64,
        lang: &LanguageTag,
    ) -> CatalogPortResult<MovieDetail> {
        self.respond(call(CatalogOp::MovieDetail, Some(movie_id), None, lang), || {
            MovieDetail {
                id: movie_id,
                title: format!("Movie {movie_id} [{lang}]"),
                ..Default::default()
            }
        })
        .await
    }

    async fn movie_credits(
        &self,
        movie_id: i64,
        lang: &LanguageTag,
    ) -> CatalogPortResult<MovieCredits> {
        self.respond(call(CatalogOp::MovieCredits, Some(movie_id), None, lang), || {
            MovieCredits {
                id: movie_id,
                cast: vec![Cast {
                    id: 3084,
                    name: format!("Actor [{lang}]"),
                    ..Default::default()
                }],
                crew: Vec::new(),
            }
        })
        .await
    }

    async fn movie_images(&self, movie_id: i64) -> CatalogPortResult<MovieImages> {
        let unset = LanguageTag::unset();
        self.respond(call(CatalogOp::MovieImages, Some(movie_id), None, &unset), || {
            MovieImages {
                id: movie_id,
                ..Default::default()
            }
        })
        .await
    }

    async fn movie_videos(&self, movie_id: i64) -> CatalogPortResult<MovieVideos> {
        let unset = LanguageTag::unset();
        self.respond(call(CatalogOp::MovieVideos, Some(movie_id), None, &unset), || {
            MovieVideos {
                id: movie_id,
                results: vec![Video {
                    key: format!("trailer-{movie_id}"),
                    site: "YouTube".to_string(),
                    ..Default::default()
                }],
            }
        })
        .await
    }

    async fn search_movies(
        &self,
        query: &str,
        page: u32,
        lang: &LanguageTag,
    ) -> CatalogPortResult<MovieList> {
        let mut c = call(CatalogOp::SearchMovies, None, Some(page), lang);
        c.query = Some(query.to_string());
        self.respond(c, || self.search_page(query, page, lang)).await
    }

    async fn person_detail(
        &self,
        person_id: i64,
        lang: &LanguageTag,
    ) -> CatalogPortResult<PersonDetail> {
        self.respond(call(CatalogOp::PersonDetail, Some(person_id), None, lang), || {
            PersonDetail {
                id: person_id,
                name: format!("Person {person_id} [{lang}]"),
                ..Default::default()
            }
        })
        .await
    }

    async fn person_images(&self, person_id: i64) -> CatalogPortResult<PersonImages> {
        let unset = LanguageTag::unset();
        self.respond(call(CatalogOp::PersonImages, Some(person_id), None, &unset), || {
            PersonImages {
                id: person_id,
                profiles: Vec::new(),
            }
        })
        .await
    }

    async fn person_movie_credits(
        &self,
        person_id: i64,
        lang: &LanguageTag,
    ) -> CatalogPortResult<PersonMovieCredits> {
        self.respond(
            call(CatalogOp::PersonMovieCredits, Some(person_id), None, lang),
            || PersonMovieCredits {
                id: person_id,
                cast: vec![Movie {
                    id: 238,
                    title: format!("Credit [{lang}]"),
                    ..Default::default()
                }],
                crew: Vec::new(),
            },
        )
        .await
    }
}

// ============================================================================
// Local store fake
// ============================================================================

#[derive(Default)]
struct StoreState {
    language_tag: Option<String>,
    keywords: Vec<SearchKeyword>,
    next_id: i64,
}

/// In-memory local store implementing both repository ports.
///
/// Keyword inserts follow the same insert-or-refresh rule as the SQLite
/// table.
#[derive(Clone, Default)]
pub struct MemoryStore {
    state: Arc<Mutex<StoreState>>,
    preference_changes: StoreChanges,
    keyword_changes: StoreChanges,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn with_language_tag(self, tag: &str) -> Self {
        self.state.lock().unwrap().language_tag = Some(tag.to_string());
        self
    }

    /// Both repositories backed by this store.
    pub fn repos(&self) -> Repos {
        Repos::new(Arc::new(self.clone()), Arc::new(self.clone()))
    }

    /// The raw stored language tag.
    pub fn stored_language_tag(&self) -> Option<String> {
        self.state.lock().unwrap().language_tag.clone()
    }

    /// Overwrite the stored tag without announcing it, the way a write
    /// from another process looks to this one.
    pub fn set_stored_language_tag(&self, tag: &str) {
        self.state.lock().unwrap().language_tag = Some(tag.to_string());
    }
}

#[async_trait]
impl SearchKeywordRepository for MemoryStore {
    async fn list(&self) -> Result<Vec<SearchKeyword>, RepositoryError> {
        let mut rows = self.state.lock().unwrap().keywords.clone();
        rows.sort_by(|a, b| b.added_at.cmp(&a.added_at));
        Ok(rows)
    }

    async fn insert(&self, keyword: &NewSearchKeyword) -> Result<(), RepositoryError> {
        {
            let mut state = self.state.lock().unwrap();
            if let Some(row) = state
                .keywords
                .iter_mut()
                .find(|r| r.keyword == keyword.keyword)
            {
                row.added_at = keyword.added_at;
            } else {
                state.next_id += 1;
                let id = state.next_id;
                state.keywords.push(SearchKeyword {
                    id,
                    keyword: keyword.keyword.clone(),
                    added_at: keyword.added_at,
                });
            }
        }
        self.keyword_changes.notify();
        Ok(())
    }

    async fn delete(&self, keyword: &SearchKeyword) -> Result<(), RepositoryError> {
        {
            let mut state = self.state.lock().unwrap();
            let before = state.keywords.len();
            state.keywords.retain(|r| r.id != keyword.id);
            if state.keywords.len() == before {
                return Err(RepositoryError::NotFound(keyword.keyword.clone()));
            }
        }
        self.keyword_changes.notify();
        Ok(())
    }

    fn changes(&self) -> Option<watch::Receiver<u64>> {
        Some(self.keyword_changes.subscribe())
    }
}

#[async_trait]
impl PreferencesRepository for MemoryStore {
    async fn load_language_tag(&self) -> Result<Option<String>, RepositoryError> {
        Ok(self.state.lock().unwrap().language_tag.clone())
    }

    async fn save_language_tag(&self, tag: &str) -> Result<(), RepositoryError> {
        self.set_stored_language_tag(tag);
        self.preference_changes.notify();
        Ok(())
    }

    fn changes(&self) -> Option<watch::Receiver<u64>> {
        Some(self.preference_changes.subscribe())
    }
}
