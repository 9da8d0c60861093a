//! Catalog repository - single-shot access to the remote catalog.

use std::sync::Arc;

use tracing::debug;

use crate::domain::{
    LanguageTag, MovieCredits, MovieDetail, MovieImages, MovieList, MovieVideos, PersonDetail,
    PersonImages, PersonMovieCredits,
};
use crate::ports::{CatalogClientPort, CatalogPortResult, TimeWindow};

/// Fetch-once access to the remote catalog.
///
/// Each call performs exactly one remote request and yields its value or
/// its failure. Nothing is retried, cached or shared between concurrent
/// callers. Cloning is cheap; clones share the underlying client.
#[derive(Clone)]
pub struct CatalogRepository {
    client: Arc<dyn CatalogClientPort>,
}

impl CatalogRepository {
    pub fn new(client: Arc<dyn CatalogClientPort>) -> Self {
        Self { client }
    }

    pub async fn now_playing(&self, page: u32, lang: &LanguageTag) -> CatalogPortResult<MovieList> {
        debug!(page, %lang, "Fetching now playing");
        self.client.now_playing(page, lang).await
    }

    pub async fn upcoming(&self, page: u32, lang: &LanguageTag) -> CatalogPortResult<MovieList> {
        debug!(page, %lang, "Fetching upcoming");
        self.client.upcoming(page, lang).await
    }

    pub async fn popular(&self, page: u32, lang: &LanguageTag) -> CatalogPortResult<MovieList> {
        debug!(page, %lang, "Fetching popular");
        self.client.popular(page, lang).await
    }

    pub async fn top_rated(&self, page: u32, lang: &LanguageTag) -> CatalogPortResult<MovieList> {
        debug!(page, %lang, "Fetching top rated");
        self.client.top_rated(page, lang).await
    }

    pub async fn trending(
        &self,
        window: TimeWindow,
        page: u32,
        lang: &LanguageTag,
    ) -> CatalogPortResult<MovieList> {
        debug!(%window, page, %lang, "Fetching trending");
        self.client.trending(window, page, lang).await
    }

    pub async fn movie_detail(
        &self,
        movie_id: i64,
        lang: &LanguageTag,
    ) -> CatalogPortResult<MovieDetail> {
        debug!(movie_id, %lang, "Fetching movie detail");
        self.client.movie_detail(movie_id, lang).await
    }

    pub async fn movie_credits(
        &self,
        movie_id: i64,
        lang: &LanguageTag,
    ) -> CatalogPortResult<MovieCredits> {
        debug!(movie_id, %lang, "Fetching movie credits");
        self.client.movie_credits(movie_id, lang).await
    }

    pub async fn movie_images(&self, movie_id: i64) -> CatalogPortResult<MovieImages> {
        debug!(movie_id, "Fetching movie images");
        self.client.movie_images(movie_id).await
    }

    pub async fn movie_videos(&self, movie_id: i64) -> CatalogPortResult<MovieVideos> {
        debug!(movie_id, "Fetching movie videos");
        self.client.movie_videos(movie_id).await
    }

    pub async fn search_movies(
        &self,
        query: &str,
        page: u32,
        lang: &LanguageTag,
    ) -> CatalogPortResult<MovieList> {
        debug!(query, page, %lang, "Searching movies");
        self.client.search_movies(query, page, lang).await
    }

    pub async fn person_detail(
        &self,
        person_id: i64,
        lang: &LanguageTag,
    ) -> CatalogPortResult<PersonDetail> {
        debug!(person_id, %lang, "Fetching person detail");
        self.client.person_detail(person_id, lang).await
    }

    pub async fn person_images(&self, person_id: i64) -> CatalogPortResult<PersonImages> {
        debug!(person_id, "Fetching person images");
        self.client.person_images(person_id).await
    }

    pub async fn person_movie_credits(
        &self,
        person_id: i64,
        lang: &LanguageTag,
    ) -> CatalogPortResult<PersonMovieCredits> {
        debug!(person_id, %lang, "Fetching person movie credits");
        self.client.person_movie_credits(person_id, lang).await
    }
}
