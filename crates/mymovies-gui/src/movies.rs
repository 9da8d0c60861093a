//! Home screen: the five movie lists.

use mymovies_core::{CatalogPortResult, CatalogRepository, LanguageTag, MovieList, TimeWindow};
use tokio::sync::watch;

use crate::aggregator::ViewStateAggregator;
use crate::ui_state::UiState;

/// Everything the home screen shows, first page of each list.
#[derive(Debug, Clone, PartialEq)]
pub struct MovieLists {
    pub trending: MovieList,
    pub now_playing: MovieList,
    pub upcoming: MovieList,
    pub popular: MovieList,
    pub top_rated: MovieList,
}

/// Home screen state.
///
/// The home screen has no subject, so it is focused as soon as it is
/// created and only restarts when the language changes.
pub struct MoviesViewModel {
    aggregator: ViewStateAggregator<(), MovieLists>,
}

impl MoviesViewModel {
    pub fn new(catalog: CatalogRepository, language: watch::Receiver<LanguageTag>) -> Self {
        let combine = move |(), lang: LanguageTag| {
            let catalog = catalog.clone();
            async move { fetch_lists(&catalog, &lang).await }
        };
        let aggregator = ViewStateAggregator::spawn("movies", language, combine);
        aggregator.set_focus(());
        Self { aggregator }
    }

    pub fn state(&self) -> UiState<MovieLists> {
        self.aggregator.state()
    }

    pub fn subscribe(&self) -> watch::Receiver<UiState<MovieLists>> {
        self.aggregator.subscribe()
    }

    pub async fn settled(&self) -> UiState<MovieLists> {
        self.aggregator.settled().await
    }
}

async fn fetch_lists(
    catalog: &CatalogRepository,
    lang: &LanguageTag,
) -> CatalogPortResult<MovieLists> {
    let (trending, now_playing, upcoming, popular, top_rated) = tokio::try_join!(
        catalog.trending(TimeWindow::Day, 1, lang),
        catalog.now_playing(1, lang),
        catalog.upcoming(1, lang),
        catalog.popular(1, lang),
        catalog.top_rated(1, lang),
    )?;

    Ok(MovieLists {
        trending,
        now_playing,
        upcoming,
        popular,
        top_rated,
    })
}
