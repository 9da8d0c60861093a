//! In-memory page holder for one paging source.
//!
//! `Pager` is a plain state machine: callers ask it to begin a load, run
//! the returned `LoadParams` against the source themselves, and hand the
//! result back with `apply`. That keeps cancellation in the caller's hands
//! (drop the load future) and the pager free of tasks and locks.

use std::sync::Arc;

use super::source::{LoadKind, LoadParams, LoadResult, Page, PagingSource, PagingState};
use crate::ports::CatalogPortError;

/// Paging tuning.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PagingConfig {
    /// Items requested per append.
    pub page_size: usize,
    /// Start appending when an access comes this close to the loaded end.
    pub prefetch_distance: usize,
    /// Items requested by a refresh.
    pub initial_load_size: usize,
}

impl Default for PagingConfig {
    fn default() -> Self {
        Self::with_page_size(20)
    }
}

impl PagingConfig {
    /// Config with prefetch distance equal to the page size and an initial
    /// load of three pages.
    pub const fn with_page_size(page_size: usize) -> Self {
        Self {
            page_size,
            prefetch_distance: page_size,
            initial_load_size: page_size.saturating_mul(3),
        }
    }
}

/// State of one load direction.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LoadState {
    NotLoading { end_of_pagination: bool },
    Loading,
    /// The last load in this direction failed. Loaded pages are kept.
    Error(CatalogPortError),
}

impl LoadState {
    pub const fn idle() -> Self {
        Self::NotLoading {
            end_of_pagination: false,
        }
    }

    pub const fn is_loading(&self) -> bool {
        matches!(self, Self::Loading)
    }

    pub const fn error(&self) -> Option<&CatalogPortError> {
        match self {
            Self::Error(e) => Some(e),
            _ => None,
        }
    }
}

/// What observers see: every loaded item plus both load states.
#[derive(Debug, Clone, PartialEq)]
pub struct PagingSnapshot<V> {
    pub items: Vec<V>,
    pub refresh: LoadState,
    pub append: LoadState,
}

impl<V> PagingSnapshot<V> {
    /// The state before any load has begun.
    pub const fn initial() -> Self {
        Self {
            items: Vec::new(),
            refresh: LoadState::idle(),
            append: LoadState::idle(),
        }
    }

    /// Whether no more items can be appended.
    pub const fn end_of_pagination(&self) -> bool {
        matches!(
            self.append,
            LoadState::NotLoading {
                end_of_pagination: true
            }
        )
    }
}

impl<V> Default for PagingSnapshot<V> {
    fn default() -> Self {
        Self::initial()
    }
}

/// Pages loaded from one source.
///
/// At most one load per direction is in flight. A refresh supersedes an
/// in-flight append; the append's eventual result is ignored.
pub struct Pager<S: PagingSource> {
    source: Arc<S>,
    config: PagingConfig,
    pages: Vec<Page<S::Key, S::Value>>,
    anchor_position: Option<usize>,
    refresh: LoadState,
    append: LoadState,
}

impl<S: PagingSource> Pager<S> {
    pub fn new(source: Arc<S>, config: PagingConfig) -> Self {
        Self {
            source,
            config,
            pages: Vec::new(),
            anchor_position: None,
            refresh: LoadState::idle(),
            append: LoadState::idle(),
        }
    }

    pub const fn source(&self) -> &Arc<S> {
        &self.source
    }

    pub const fn config(&self) -> &PagingConfig {
        &self.config
    }

    /// Number of loaded items.
    pub fn item_count(&self) -> usize {
        self.pages.iter().map(|p| p.data.len()).sum()
    }

    /// Loaded pages plus the anchor, as handed to `refresh_key`.
    pub fn state(&self) -> PagingState<S::Key, S::Value> {
        PagingState {
            pages: self.pages.clone(),
            anchor_position: self.anchor_position,
        }
    }

    /// Start a refresh. Returns `None` while one is already in flight.
    ///
    /// With pages loaded the source picks the key to reload from.
    pub fn begin_refresh(&mut self) -> Option<LoadParams<S::Key>> {
        if self.refresh.is_loading() {
            return None;
        }

        let key = if self.pages.is_empty() {
            None
        } else {
            self.source.refresh_key(&self.state())
        };
        self.refresh = LoadState::Loading;
        if self.append.is_loading() {
            self.append = LoadState::idle();
        }

        Some(LoadParams {
            kind: LoadKind::Refresh,
            key,
            load_size: self.config.initial_load_size,
        })
    }

    /// Start loading the next page.
    ///
    /// Returns `None` while any load is in flight, after a failed append
    /// (use `retry`), before the first refresh, or at the end of the results.
    pub fn begin_append(&mut self) -> Option<LoadParams<S::Key>> {
        if self.refresh.is_loading() || !matches!(self.append, LoadState::NotLoading { .. }) {
            return None;
        }
        self.start_append()
    }

    /// Re-run the failed load, if any. A failed refresh wins over a failed
    /// append.
    pub fn retry(&mut self) -> Option<LoadParams<S::Key>> {
        if self.refresh.error().is_some() {
            return self.begin_refresh();
        }
        if self.append.error().is_some() && !self.refresh.is_loading() {
            return self.start_append();
        }
        None
    }

    fn start_append(&mut self) -> Option<LoadParams<S::Key>> {
        let key = self.pages.last()?.next_key.clone()?;
        self.append = LoadState::Loading;
        Some(LoadParams {
            kind: LoadKind::Append,
            key: Some(key),
            load_size: self.config.page_size,
        })
    }

    /// Record that the item at `index` was accessed.
    ///
    /// Returns the next-page params when the access is within the prefetch
    /// distance of the loaded end and an append may start.
    pub fn record_access(&mut self, index: usize) -> Option<LoadParams<S::Key>> {
        self.anchor_position = Some(index);
        if index.saturating_add(self.config.prefetch_distance) >= self.item_count() {
            self.begin_append()
        } else {
            None
        }
    }

    /// Apply the result of a load begun with `kind`.
    ///
    /// Returns `false` when no load of that kind was in flight, in which
    /// case the result is discarded.
    pub fn apply(&mut self, kind: LoadKind, result: LoadResult<S::Key, S::Value>) -> bool {
        match kind {
            LoadKind::Refresh => {
                if !self.refresh.is_loading() {
                    return false;
                }
                match result {
                    LoadResult::Page(page) => {
                        let end_of_pagination = page.next_key.is_none();
                        self.pages = vec![page];
                        self.refresh = LoadState::idle();
                        self.append = LoadState::NotLoading { end_of_pagination };
                    }
                    LoadResult::Error(e) => self.refresh = LoadState::Error(e),
                }
            }
            LoadKind::Append => {
                if !self.append.is_loading() {
                    return false;
                }
                match result {
                    LoadResult::Page(page) => {
                        let end_of_pagination = page.next_key.is_none();
                        self.pages.push(page);
                        self.append = LoadState::NotLoading { end_of_pagination };
                    }
                    LoadResult::Error(e) => self.append = LoadState::Error(e),
                }
            }
        }
        true
    }

    pub fn snapshot(&self) -> PagingSnapshot<S::Value> {
        PagingSnapshot {
            items: self
                .pages
                .iter()
                .flat_map(|p| p.data.iter().cloned())
                .collect(),
            refresh: self.refresh.clone(),
            append: self.append.clone(),
        }
    }
}
