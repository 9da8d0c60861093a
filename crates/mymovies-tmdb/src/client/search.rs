//! Movie search endpoint.

use mymovies_core::{LanguageTag, MovieList};

use super::TmdbClient;
use crate::error::TmdbResult;
use crate::http::HttpBackend;
use crate::url::Endpoint;

impl<B: HttpBackend> TmdbClient<B> {
    /// One page of full-text search results.
    pub(crate) async fn search_movies(
        &self,
        query: &str,
        page: u32,
        lang: &LanguageTag,
    ) -> TmdbResult<MovieList> {
        self.fetch(Endpoint::SearchMovie(query), Some(page), Some(lang))
            .await
    }
}
