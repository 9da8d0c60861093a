//! Catalog client port trait.

use std::fmt;

use async_trait::async_trait;

use super::error::CatalogPortResult;
use crate::domain::{
    LanguageTag, MovieCredits, MovieDetail, MovieImages, MovieList, MovieVideos, PersonDetail,
    PersonImages, PersonMovieCredits,
};

/// Window of the trending list.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub enum TimeWindow {
    #[default]
    Day,
    Week,
}

impl TimeWindow {
    /// Path segment used by the remote API.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Day => "day",
            Self::Week => "week",
        }
    }
}

impl fmt::Display for TimeWindow {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Port trait for the remote movie catalog.
///
/// Every method performs exactly one remote call. Pages are 1-based.
/// An unset `lang` lets the service answer in its default language.
///
/// # Design
///
/// - Uses core-owned domain types, not wire DTOs
/// - Returns `CatalogPortError` for all failures
/// - No retry, caching or coalescing at this level
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait CatalogClientPort: Send + Sync {
    async fn now_playing(&self, page: u32, lang: &LanguageTag) -> CatalogPortResult<MovieList>;

    async fn upcoming(&self, page: u32, lang: &LanguageTag) -> CatalogPortResult<MovieList>;

    async fn popular(&self, page: u32, lang: &LanguageTag) -> CatalogPortResult<MovieList>;

    async fn top_rated(&self, page: u32, lang: &LanguageTag) -> CatalogPortResult<MovieList>;

    /// Trending movies for the given window.
    async fn trending(
        &self,
        window: TimeWindow,
        page: u32,
        lang: &LanguageTag,
    ) -> CatalogPortResult<MovieList>;

    async fn movie_detail(
        &self,
        movie_id: i64,
        lang: &LanguageTag,
    ) -> CatalogPortResult<MovieDetail>;

    async fn movie_credits(
        &self,
        movie_id: i64,
        lang: &LanguageTag,
    ) -> CatalogPortResult<MovieCredits>;

    /// All images of a movie, in every language.
    async fn movie_images(&self, movie_id: i64) -> CatalogPortResult<MovieImages>;

    async fn movie_videos(&self, movie_id: i64) -> CatalogPortResult<MovieVideos>;

    /// Full-text movie search.
    ///
    /// # Arguments
    ///
    /// * `query` - Search text, never empty (callers short-circuit empty queries)
    /// * `page` - 1-based page number
    async fn search_movies(
        &self,
        query: &str,
        page: u32,
        lang: &LanguageTag,
    ) -> CatalogPortResult<MovieList>;

    async fn person_detail(
        &self,
        person_id: i64,
        lang: &LanguageTag,
    ) -> CatalogPortResult<PersonDetail>;

    async fn person_images(&self, person_id: i64) -> CatalogPortResult<PersonImages>;

    async fn person_movie_credits(
        &self,
        person_id: i64,
        lang: &LanguageTag,
    ) -> CatalogPortResult<PersonMovieCredits>;
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Arc;

    // Verify the trait is object-safe
    fn _assert_object_safe(_: Arc<dyn CatalogClientPort>) {}

    #[test]
    fn test_time_window_path_segment() {
        assert_eq!(TimeWindow::Day.as_str(), "day");
        assert_eq!(TimeWindow::Week.to_string(), "week");
        assert_eq!(TimeWindow::default(), TimeWindow::Day);
    }
}
