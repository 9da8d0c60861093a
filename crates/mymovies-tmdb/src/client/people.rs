//! Person endpoints.

use mymovies_core::{LanguageTag, PersonDetail, PersonImages, PersonMovieCredits};

use super::TmdbClient;
use crate::error::TmdbResult;
use crate::http::HttpBackend;
use crate::url::Endpoint;

impl<B: HttpBackend> TmdbClient<B> {
    pub(crate) async fn person_detail(
        &self,
        id: i64,
        lang: &LanguageTag,
    ) -> TmdbResult<PersonDetail> {
        self.fetch(Endpoint::Person(id), None, Some(lang)).await
    }

    pub(crate) async fn person_images(&self, id: i64) -> TmdbResult<PersonImages> {
        self.fetch(Endpoint::PersonImages(id), None, None).await
    }

    pub(crate) async fn person_movie_credits(
        &self,
        id: i64,
        lang: &LanguageTag,
    ) -> TmdbResult<PersonMovieCredits> {
        self.fetch(Endpoint::PersonMovieCredits(id), None, Some(lang))
            .await
    }
}
