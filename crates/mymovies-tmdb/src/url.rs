//! URL construction for TMDB endpoints.
//!
//! Pure functions: every endpoint path is joined below the configured base
//! URL and query parameters are appended in a fixed order.

use mymovies_core::{LanguageTag, TimeWindow};
use url::Url;

use crate::config::TmdbConfig;
use crate::error::TmdbResult;

/// The remote endpoints the client calls.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Endpoint<'a> {
    NowPlaying,
    Upcoming,
    Popular,
    TopRated,
    Trending(TimeWindow),
    Movie(i64),
    MovieCredits(i64),
    MovieImages(i64),
    MovieVideos(i64),
    SearchMovie(&'a str),
    Person(i64),
    PersonImages(i64),
    PersonMovieCredits(i64),
}

impl Endpoint<'_> {
    /// Path relative to the API base.
    pub fn path(&self) -> String {
        match self {
            Self::NowPlaying => "movie/now_playing".to_string(),
            Self::Upcoming => "movie/upcoming".to_string(),
            Self::Popular => "movie/popular".to_string(),
            Self::TopRated => "movie/top_rated".to_string(),
            Self::Trending(window) => format!("trending/movie/{window}"),
            Self::Movie(id) => format!("movie/{id}"),
            Self::MovieCredits(id) => format!("movie/{id}/credits"),
            Self::MovieImages(id) => format!("movie/{id}/images"),
            Self::MovieVideos(id) => format!("movie/{id}/videos"),
            Self::SearchMovie(_) => "search/movie".to_string(),
            Self::Person(id) => format!("person/{id}"),
            Self::PersonImages(id) => format!("person/{id}/images"),
            Self::PersonMovieCredits(id) => format!("person/{id}/movie_credits"),
        }
    }
}

/// Build the request URL for an endpoint.
///
/// `page` and `lang` are only appended when present; an unset language
/// omits the parameter so the service answers in its default language.
pub fn build_url(
    config: &TmdbConfig,
    endpoint: Endpoint<'_>,
    page: Option<u32>,
    lang: Option<&LanguageTag>,
) -> TmdbResult<Url> {
    let mut url = config.base_url.join(&endpoint.path())?;

    {
        let mut pairs = url.query_pairs_mut();
        if let Endpoint::SearchMovie(query) = endpoint {
            pairs.append_pair("query", query);
        }
        if let Some(page) = page {
            pairs.append_pair("page", &page.to_string());
        }
        if let Some(lang) = lang.and_then(LanguageTag::as_query) {
            pairs.append_pair("language", lang);
        }
    }

    // query_pairs_mut leaves a dangling `?` when nothing was appended
    if url.query() == Some("") {
        url.set_query(None);
    }

    Ok(url)
}
