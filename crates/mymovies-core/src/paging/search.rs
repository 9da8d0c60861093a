//! Paged movie search.

use async_trait::async_trait;
use tracing::debug;

use super::source::{LoadParams, LoadResult, Page, PagingSource, PagingState};
use crate::domain::{LanguageTag, Movie};
use crate::services::CatalogRepository;

/// Loads search results one page at a time for a fixed query and language.
///
/// Keys are 1-based page numbers and only move forward.
pub struct SearchMoviesPagingSource {
    repository: CatalogRepository,
    query: String,
    language: LanguageTag,
}

impl SearchMoviesPagingSource {
    pub fn new(
        repository: CatalogRepository,
        query: impl Into<String>,
        language: LanguageTag,
    ) -> Self {
        Self {
            repository,
            query: query.into(),
            language,
        }
    }

    pub fn query(&self) -> &str {
        &self.query
    }

    pub const fn language(&self) -> &LanguageTag {
        &self.language
    }
}

#[async_trait]
impl PagingSource for SearchMoviesPagingSource {
    type Key = u32;
    type Value = Movie;

    async fn load(&self, params: LoadParams<u32>) -> LoadResult<u32, Movie> {
        if self.query.is_empty() {
            return LoadResult::Page(Page::empty());
        }

        let page = params.key.unwrap_or(1);
        debug!(query = %self.query, page, kind = ?params.kind, "Loading search page");

        match self
            .repository
            .search_movies(&self.query, page, &self.language)
            .await
        {
            Ok(list) => {
                let next_key = if list.results.is_empty() {
                    None
                } else {
                    Some(page + 1)
                };
                LoadResult::Page(Page {
                    data: list.results,
                    prev_key: None,
                    next_key,
                })
            }
            Err(e) => LoadResult::Error(e),
        }
    }

    fn refresh_key(&self, state: &PagingState<u32, Movie>) -> Option<u32> {
        let anchor = state.anchor_position?;
        let page = state.closest_page_to_position(anchor)?;
        page.prev_key
            .map(|k| k + 1)
            .or_else(|| page.next_key.and_then(|k| k.checked_sub(1)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::MovieList;
    use crate::paging::LoadKind;
    use crate::ports::CatalogPortError;
    use crate::ports::catalog::MockCatalogClientPort;
    use mockall::predicate::{always, eq};
    use std::sync::Arc;

    fn first_page() -> LoadParams<u32> {
        LoadParams {
            kind: LoadKind::Refresh,
            key: None,
            load_size: 60,
        }
    }

    fn results(count: usize) -> MovieList {
        MovieList {
            page: 1,
            results: (0..count)
                .map(|i| Movie {
                    id: i64::try_from(i).unwrap(),
                    ..Default::default()
                })
                .collect(),
            ..Default::default()
        }
    }

    fn source(mock: MockCatalogClientPort, query: &str) -> SearchMoviesPagingSource {
        SearchMoviesPagingSource::new(
            CatalogRepository::new(Arc::new(mock)),
            query,
            LanguageTag::from("zh-TW"),
        )
    }

    #[tokio::test]
    async fn test_empty_query_short_circuits() {
        let mut mock = MockCatalogClientPort::new();
        mock.expect_search_movies().never();

        let result = source(mock, "").load(first_page()).await;

        assert_eq!(result, LoadResult::Page(Page::empty()));
    }

    #[tokio::test]
    async fn test_full_page_has_next_key() {
        let mut mock = MockCatalogClientPort::new();
        mock.expect_search_movies()
            .with(eq("Hello World"), eq(1), always())
            .times(1)
            .returning(|_, _, _| Ok(results(20)));

        let LoadResult::Page(page) = source(mock, "Hello World").load(first_page()).await else {
            panic!("expected a page");
        };

        assert_eq!(page.data.len(), 20);
        assert_eq!(page.prev_key, None);
        assert_eq!(page.next_key, Some(2));
    }

    #[tokio::test]
    async fn test_empty_result_ends_pagination() {
        let mut mock = MockCatalogClientPort::new();
        mock.expect_search_movies()
            .times(1)
            .returning(|_, _, _| Ok(results(0)));

        let LoadResult::Page(page) = source(mock, "Hello World").load(first_page()).await else {
            panic!("expected a page");
        };

        assert!(page.data.is_empty());
        assert_eq!(page.next_key, None);
    }

    #[tokio::test]
    async fn test_key_selects_page() {
        let mut mock = MockCatalogClientPort::new();
        mock.expect_search_movies()
            .with(eq("matrix"), eq(3), always())
            .times(1)
            .returning(|_, _, _| Ok(results(5)));

        let params = LoadParams {
            kind: LoadKind::Append,
            key: Some(3),
            load_size: 20,
        };
        let LoadResult::Page(page) = source(mock, "matrix").load(params).await else {
            panic!("expected a page");
        };

        assert_eq!(page.next_key, Some(4));
    }

    #[tokio::test]
    async fn test_failure_becomes_error_result() {
        let mut mock = MockCatalogClientPort::new();
        mock.expect_search_movies().returning(|_, _, _| {
            Err(CatalogPortError::Protocol {
                status: 500,
                url: "search/movie".to_string(),
            })
        });

        let result = source(mock, "matrix").load(first_page()).await;

        match result {
            LoadResult::Error(e) => assert_eq!(e.status(), Some(500)),
            LoadResult::Page(_) => panic!("expected an error"),
        }
    }

    #[test]
    fn test_refresh_key_policy() {
        let src = source(MockCatalogClientPort::new(), "matrix");
        let page = |prev, next| Page {
            data: vec![Movie::default(); 20],
            prev_key: prev,
            next_key: next,
        };

        let state = PagingState {
            pages: vec![page(None, Some(2)), page(None, Some(3))],
            anchor_position: Some(25),
        };
        assert_eq!(src.refresh_key(&state), Some(2));

        let state = PagingState {
            pages: vec![page(Some(4), None)],
            anchor_position: Some(0),
        };
        assert_eq!(src.refresh_key(&state), Some(5));

        let state = PagingState {
            pages: vec![page(None, None)],
            anchor_position: Some(0),
        };
        assert_eq!(src.refresh_key(&state), None);

        let state = PagingState {
            pages: vec![page(None, Some(2))],
            anchor_position: None,
        };
        assert_eq!(src.refresh_key(&state), None);
    }
}
