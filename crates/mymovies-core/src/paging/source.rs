//! Paging source contract: keyed, page-at-a-time loading.

use async_trait::async_trait;

use crate::ports::CatalogPortError;

/// Which end of the loaded sequence a load serves.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LoadKind {
    /// (Re)load from scratch, replacing every loaded page.
    Refresh,
    /// Load the page after the last loaded one.
    Append,
}

/// Parameters of one load.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LoadParams<K> {
    pub kind: LoadKind,
    /// `None` asks for the first page.
    pub key: Option<K>,
    /// Requested item count. Sources with fixed page sizes may ignore it.
    pub load_size: usize,
}

/// One loaded page and the cursors around it.
#[derive(Debug, Clone, PartialEq)]
pub struct Page<K, V> {
    pub data: Vec<V>,
    /// Key of the preceding page, `None` when there is none.
    pub prev_key: Option<K>,
    /// Key of the following page, `None` at the end of the results.
    pub next_key: Option<K>,
}

impl<K, V> Page<K, V> {
    /// A page with no items and no neighbours.
    pub const fn empty() -> Self {
        Self {
            data: Vec::new(),
            prev_key: None,
            next_key: None,
        }
    }
}

/// Outcome of a load. Failures are values, never panics or early returns
/// past the paging boundary.
#[derive(Debug, Clone, PartialEq)]
pub enum LoadResult<K, V> {
    Page(Page<K, V>),
    Error(CatalogPortError),
}

/// Loaded pages plus the most recently accessed item position.
#[derive(Debug, Clone, PartialEq)]
pub struct PagingState<K, V> {
    pub pages: Vec<Page<K, V>>,
    pub anchor_position: Option<usize>,
}

impl<K, V> PagingState<K, V> {
    /// The page holding the item at `position`, or the last page when the
    /// position lies beyond the loaded items.
    pub fn closest_page_to_position(&self, position: usize) -> Option<&Page<K, V>> {
        let mut start = 0;
        for page in &self.pages {
            let end = start + page.data.len();
            if position < end {
                return Some(page);
            }
            start = end;
        }
        self.pages.last()
    }
}

/// A source of pages keyed by an opaque cursor.
///
/// Implementations are bound to one set of inputs (query, language, ...);
/// a change of inputs means a new source.
#[async_trait]
pub trait PagingSource: Send + Sync {
    type Key: Clone + Send + Sync;
    type Value: Clone + Send + Sync;

    /// Load one page.
    async fn load(&self, params: LoadParams<Self::Key>) -> LoadResult<Self::Key, Self::Value>;

    /// Key to reload first after an invalidation, `None` to start over.
    fn refresh_key(&self, state: &PagingState<Self::Key, Self::Value>) -> Option<Self::Key>;
}

#[cfg(test)]
mod tests {
    use super::*;

    fn page(items: &[i32], next: Option<u32>) -> Page<u32, i32> {
        Page {
            data: items.to_vec(),
            prev_key: None,
            next_key: next,
        }
    }

    #[test]
    fn test_closest_page_to_position() {
        let state = PagingState {
            pages: vec![page(&[1, 2, 3], Some(2)), page(&[4, 5], Some(3))],
            anchor_position: None,
        };

        assert_eq!(state.closest_page_to_position(0).unwrap().next_key, Some(2));
        assert_eq!(state.closest_page_to_position(3).unwrap().next_key, Some(3));
        assert_eq!(state.closest_page_to_position(99).unwrap().next_key, Some(3));
    }

    #[test]
    fn test_closest_page_without_pages() {
        let state: PagingState<u32, i32> = PagingState {
            pages: Vec::new(),
            anchor_position: Some(0),
        };
        assert!(state.closest_page_to_position(0).is_none());
    }
}
