//! Port trait implementation for `TmdbClient`.
//!
//! Implements the core-owned `CatalogClientPort` and maps internal errors
//! to `CatalogPortError` at this boundary.

use async_trait::async_trait;
use mymovies_core::{
    CatalogClientPort, CatalogPortError, CatalogPortResult, LanguageTag, MovieCredits,
    MovieDetail, MovieImages, MovieList, MovieVideos, PersonDetail, PersonImages,
    PersonMovieCredits, TimeWindow,
};

use crate::client::TmdbClient;
use crate::error::TmdbError;
use crate::http::HttpBackend;

// ============================================================================
// Error Mapping
// ============================================================================

/// Convert internal `TmdbError` to core `CatalogPortError`.
pub(crate) fn map_error(err: TmdbError) -> CatalogPortError {
    match err {
        TmdbError::ApiRequestFailed { status, url } => CatalogPortError::Protocol { status, url },
        TmdbError::Configuration { message } => CatalogPortError::Configuration { message },
        TmdbError::Network(e) if e.is_builder() => CatalogPortError::Configuration {
            message: e.to_string(),
        },
        TmdbError::Network(e) => CatalogPortError::Transport {
            message: e.to_string(),
        },
        TmdbError::InvalidUrl(e) => CatalogPortError::Configuration {
            message: e.to_string(),
        },
        TmdbError::JsonParse(e) => CatalogPortError::InvalidResponse {
            message: e.to_string(),
        },
    }
}

// ============================================================================
// Port Implementation
// ============================================================================

#[async_trait]
impl<B: HttpBackend> CatalogClientPort for TmdbClient<B> {
    async fn now_playing(&self, page: u32, lang: &LanguageTag) -> CatalogPortResult<MovieList> {
        Self::now_playing(self, page, lang).await.map_err(map_error)
    }

    async fn upcoming(&self, page: u32, lang: &LanguageTag) -> CatalogPortResult<MovieList> {
        Self::upcoming(self, page, lang).await.map_err(map_error)
    }

    async fn popular(&self, page: u32, lang: &LanguageTag) -> CatalogPortResult<MovieList> {
        Self::popular(self, page, lang).await.map_err(map_error)
    }

    async fn top_rated(&self, page: u32, lang: &LanguageTag) -> CatalogPortResult<MovieList> {
        Self::top_rated(self, page, lang).await.map_err(map_error)
    }

    async fn trending(
        &self,
        window: TimeWindow,
        page: u32,
        lang: &LanguageTag,
    ) -> CatalogPortResult<MovieList> {
        Self::trending(self, window, page, lang)
            .await
            .map_err(map_error)
    }

    async fn movie_detail(
        &self,
        movie_id: i64,
        lang: &LanguageTag,
    ) -> CatalogPortResult<MovieDetail> {
        Self::movie_detail(self, movie_id, lang)
            .await
            .map_err(map_error)
    }

    async fn movie_credits(
        &self,
        movie_id: i64,
        lang: &LanguageTag,
    ) -> CatalogPortResult<MovieCredits> {
        Self::movie_credits(self, movie_id, lang)
            .await
            .map_err(map_error)
    }

    async fn movie_images(&self, movie_id: i64) -> CatalogPortResult<MovieImages> {
        Self::movie_images(self, movie_id).await.map_err(map_error)
    }

    async fn movie_videos(&self, movie_id: i64) -> CatalogPortResult<MovieVideos> {
        Self::movie_videos(self, movie_id).await.map_err(map_error)
    }

    async fn search_movies(
        &self,
        query: &str,
        page: u32,
        lang: &LanguageTag,
    ) -> CatalogPortResult<MovieList> {
        Self::search_movies(self, query, page, lang)
            .await
            .map_err(map_error)
    }

    async fn person_detail(
        &self,
        person_id: i64,
        lang: &LanguageTag,
    ) -> CatalogPortResult<PersonDetail> {
        Self::person_detail(self, person_id, lang)
            .await
            .map_err(map_error)
    }

    async fn person_images(&self, person_id: i64) -> CatalogPortResult<PersonImages> {
        Self::person_images(self, person_id).await.map_err(map_error)
    }

    async fn person_movie_credits(
        &self,
        person_id: i64,
        lang: &LanguageTag,
    ) -> CatalogPortResult<PersonMovieCredits> {
        Self::person_movie_credits(self, person_id, lang)
            .await
            .map_err(map_error)
    }
}
