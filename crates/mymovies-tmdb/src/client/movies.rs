//! Movie lists and movie detail endpoints.

use mymovies_core::{
    LanguageTag, MovieCredits, MovieDetail, MovieImages, MovieList, MovieVideos, TimeWindow,
};

use super::TmdbClient;
use crate::error::TmdbResult;
use crate::http::HttpBackend;
use crate::url::Endpoint;

impl<B: HttpBackend> TmdbClient<B> {
    pub(crate) async fn now_playing(&self, page: u32, lang: &LanguageTag) -> TmdbResult<MovieList> {
        self.fetch(Endpoint::NowPlaying, Some(page), Some(lang)).await
    }

    pub(crate) async fn upcoming(&self, page: u32, lang: &LanguageTag) -> TmdbResult<MovieList> {
        self.fetch(Endpoint::Upcoming, Some(page), Some(lang)).await
    }

    pub(crate) async fn popular(&self, page: u32, lang: &LanguageTag) -> TmdbResult<MovieList> {
        self.fetch(Endpoint::Popular, Some(page), Some(lang)).await
    }

    pub(crate) async fn top_rated(&self, page: u32, lang: &LanguageTag) -> TmdbResult<MovieList> {
        self.fetch(Endpoint::TopRated, Some(page), Some(lang)).await
    }

    pub(crate) async fn trending(
        &self,
        window: TimeWindow,
        page: u32,
        lang: &LanguageTag,
    ) -> TmdbResult<MovieList> {
        self.fetch(Endpoint::Trending(window), Some(page), Some(lang))
            .await
    }

    pub(crate) async fn movie_detail(&self, id: i64, lang: &LanguageTag) -> TmdbResult<MovieDetail> {
        self.fetch(Endpoint::Movie(id), None, Some(lang)).await
    }

    pub(crate) async fn movie_credits(
        &self,
        id: i64,
        lang: &LanguageTag,
    ) -> TmdbResult<MovieCredits> {
        self.fetch(Endpoint::MovieCredits(id), None, Some(lang)).await
    }

    /// Images are requested without a language so every language is returned.
    pub(crate) async fn movie_images(&self, id: i64) -> TmdbResult<MovieImages> {
        self.fetch(Endpoint::MovieImages(id), None, None).await
    }

    pub(crate) async fn movie_videos(&self, id: i64) -> TmdbResult<MovieVideos> {
        self.fetch(Endpoint::MovieVideos(id), None, None).await
    }
}
