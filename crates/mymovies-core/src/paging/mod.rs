//! Cursor-based incremental loading.
//!
//! - [`PagingSource`]: loads one page for a key
//! - [`Pager`]: holds the loaded pages of one source and tracks load state
//! - [`SearchMoviesPagingSource`]: movie search results, page by page

mod pager;
mod search;
mod source;

pub use pager::{LoadState, Pager, PagingConfig, PagingSnapshot};
pub use search::SearchMoviesPagingSource;
pub use source::{LoadKind, LoadParams, LoadResult, Page, PagingSource, PagingState};
