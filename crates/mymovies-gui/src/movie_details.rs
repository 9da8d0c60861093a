//! Movie detail screen.

use mymovies_core::{
    CatalogPortResult, CatalogRepository, LanguageTag, MovieCredits, MovieDetail, MovieImages,
    MovieVideos, Video,
};
use tokio::sync::watch;

use crate::aggregator::ViewStateAggregator;
use crate::ui_state::UiState;

/// Aggregated payload of the movie detail screen.
#[derive(Debug, Clone, PartialEq)]
pub struct MovieDetails {
    pub detail: MovieDetail,
    pub credits: MovieCredits,
    pub images: MovieImages,
    pub videos: MovieVideos,
}

impl MovieDetails {
    /// Videos that can be opened on YouTube.
    pub fn youtube_videos(&self) -> impl Iterator<Item = &Video> {
        self.videos.results.iter().filter(|v| v.is_youtube())
    }
}

/// State of the movie detail screen.
pub struct MovieDetailsViewModel {
    aggregator: ViewStateAggregator<i64, MovieDetails>,
}

impl MovieDetailsViewModel {
    pub fn new(catalog: CatalogRepository, language: watch::Receiver<LanguageTag>) -> Self {
        let combine = move |movie_id: i64, lang: LanguageTag| {
            let catalog = catalog.clone();
            async move { fetch_movie(&catalog, movie_id, &lang).await }
        };
        let aggregator = ViewStateAggregator::spawn("movie_details", language, combine);
        Self { aggregator }
    }

    /// Show the movie with `movie_id`.
    pub fn load_movie(&self, movie_id: i64) {
        self.aggregator.set_focus(movie_id);
    }

    pub fn movie_id(&self) -> Option<i64> {
        self.aggregator.focus()
    }

    pub fn state(&self) -> UiState<MovieDetails> {
        self.aggregator.state()
    }

    pub fn subscribe(&self) -> watch::Receiver<UiState<MovieDetails>> {
        self.aggregator.subscribe()
    }

    pub async fn settled(&self) -> UiState<MovieDetails> {
        self.aggregator.settled().await
    }
}

async fn fetch_movie(
    catalog: &CatalogRepository,
    movie_id: i64,
    lang: &LanguageTag,
) -> CatalogPortResult<MovieDetails> {
    let (detail, credits, images, videos) = tokio::try_join!(
        catalog.movie_detail(movie_id, lang),
        catalog.movie_credits(movie_id, lang),
        catalog.movie_images(movie_id),
        catalog.movie_videos(movie_id),
    )?;

    Ok(MovieDetails {
        detail,
        credits,
        images,
        videos,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tests::{WAIT, eventually};
    use mymovies_core::testing::{CatalogOp, FakeCatalog, MemoryStore};
    use mymovies_core::{AppCore, CatalogClientPort, CatalogPortError};
    use std::sync::Arc;
    use std::time::Duration;

    async fn setup(tag: &str) -> (Arc<FakeCatalog>, AppCore, MovieDetailsViewModel) {
        let fake = Arc::new(FakeCatalog::new());
        let catalog: Arc<dyn CatalogClientPort> = Arc::clone(&fake) as _;
        let core = AppCore::new(MemoryStore::new().with_language_tag(tag).repos(), catalog);
        core.reload().await;
        let vm =
            MovieDetailsViewModel::new(core.catalog().clone(), core.preferences().subscribe());
        (fake, core, vm)
    }

    #[tokio::test]
    async fn test_all_four_payloads_aggregated() {
        let (fake, _core, vm) = setup("zh-TW").await;

        vm.load_movie(238);
        let state = tokio::time::timeout(WAIT, vm.settled()).await.unwrap();

        let details = state.success().unwrap();
        assert_eq!(details.detail.id, 238);
        assert_eq!(details.detail.title, "Movie 238 [zh-TW]");
        assert_eq!(details.credits.cast[0].name, "Actor [zh-TW]");
        assert_eq!(details.images.id, 238);
        assert_eq!(details.videos.results[0].key, "trailer-238");
        assert_eq!(details.youtube_videos().count(), 1);

        let calls = fake.calls();
        assert_eq!(calls.len(), 4);
        assert!(calls.iter().all(|c| c.id == Some(238)));
    }

    #[tokio::test]
    async fn test_detail_failure_wins_over_other_results() {
        let (fake, _core, vm) = setup("zh-TW").await;
        fake.fail(CatalogOp::MovieDetail, CatalogPortError::other("network error"));

        vm.load_movie(238);
        let state = tokio::time::timeout(WAIT, vm.settled()).await.unwrap();

        assert_eq!(
            state,
            UiState::Error(CatalogPortError::other("network error"))
        );
        assert_eq!(state.error().unwrap().to_string(), "network error");
    }

    #[tokio::test]
    async fn test_server_error_status_is_kept() {
        let (fake, _core, vm) = setup("en-US").await;
        fake.fail(
            CatalogOp::MovieVideos,
            CatalogPortError::Protocol {
                status: 500,
                url: "movie/238/videos".to_string(),
            },
        );

        vm.load_movie(238);
        let state = tokio::time::timeout(WAIT, vm.settled()).await.unwrap();

        assert_eq!(state.error().and_then(CatalogPortError::status), Some(500));
    }

    #[tokio::test]
    async fn test_never_returns_to_loading_on_refocus() {
        let (fake, _core, vm) = setup("zh-TW").await;
        let mut rx = vm.subscribe();

        vm.load_movie(238);
        tokio::time::timeout(WAIT, vm.settled()).await.unwrap();
        rx.borrow_and_update();

        fake.hold(CatalogOp::MovieDetail);
        vm.load_movie(680);
        tokio::time::timeout(WAIT, fake.wait_for_calls(8))
            .await
            .unwrap();

        // The previous result stays visible while the new generation runs.
        assert_eq!(vm.state().success().unwrap().detail.id, 238);
        assert!(!rx.has_changed().unwrap());

        fake.release(CatalogOp::MovieDetail);
        tokio::time::timeout(WAIT, rx.changed())
            .await
            .unwrap()
            .unwrap();

        let state = rx.borrow_and_update().clone();
        assert!(!state.is_loading());
        assert_eq!(state.success().unwrap().detail.id, 680);
    }

    #[tokio::test]
    async fn test_language_change_cancels_in_flight_generation() {
        let (fake, core, vm) = setup("zh-TW").await;
        fake.hold(CatalogOp::MovieDetail);

        vm.load_movie(238);
        tokio::time::timeout(WAIT, fake.wait_for_calls(4))
            .await
            .unwrap();

        core.preferences()
            .set_session_language_tag(LanguageTag::new("ja-JP"));
        tokio::time::timeout(WAIT, fake.wait_for_calls(8))
            .await
            .unwrap();
        assert_eq!(fake.cancelled(), 1);

        fake.release(CatalogOp::MovieDetail);
        let state = tokio::time::timeout(WAIT, vm.settled()).await.unwrap();

        let details = state.success().unwrap();
        assert_eq!(details.detail.title, "Movie 238 [ja-JP]");
        assert_eq!(details.credits.cast[0].name, "Actor [ja-JP]");
    }

    #[tokio::test]
    async fn test_same_id_twice_does_not_refetch() {
        let (fake, _core, vm) = setup("zh-TW").await;

        vm.load_movie(238);
        tokio::time::timeout(WAIT, vm.settled()).await.unwrap();
        vm.load_movie(238);
        tokio::time::sleep(Duration::from_millis(20)).await;

        assert_eq!(fake.call_count(CatalogOp::MovieDetail), 1);
        assert_eq!(vm.movie_id(), Some(238));
    }

    #[tokio::test]
    async fn test_no_fetch_before_first_focus() {
        let (fake, _core, vm) = setup("zh-TW").await;

        tokio::time::sleep(Duration::from_millis(20)).await;

        assert!(vm.state().is_loading());
        assert!(fake.calls().is_empty());
    }

    #[tokio::test]
    async fn test_drop_cancels_in_flight_fetches() {
        let (fake, _core, vm) = setup("zh-TW").await;
        fake.hold(CatalogOp::MovieDetail);
        fake.hold(CatalogOp::MovieCredits);

        vm.load_movie(238);
        tokio::time::timeout(WAIT, fake.wait_for_calls(4))
            .await
            .unwrap();
        drop(vm);

        assert!(eventually(|| fake.cancelled() == 2).await);
    }
}
