#![doc = include_str!("../README.md")]
#![deny(unused_crate_dependencies)]

pub mod domain;
pub mod paging;
pub mod paths;
pub mod ports;
pub mod services;

#[cfg(any(test, feature = "test-utils"))]
pub mod testing;

// Re-export commonly used types for convenience
pub use domain::{
    BelongsToCollection, Cast, Crew, Dates, Genre, ImageInfo, LanguageTag, Movie, MovieCredits,
    MovieDetail, MovieImages, MovieList, MovieVideos, NewSearchKeyword, PersonDetail,
    PersonImages, PersonMovieCredits, ProductionCompany, ProductionCountry, ProfileImage,
    SearchKeyword, SpokenLanguage, Video,
};
pub use paging::{
    LoadKind, LoadParams, LoadResult, LoadState, Page, Pager, PagingConfig, PagingSnapshot,
    PagingSource, PagingState, SearchMoviesPagingSource,
};
pub use paths::{DATA_DIR_ENV, PathError, data_root, database_path, database_path_in};
pub use ports::{
    CatalogClientPort, CatalogPortError, CatalogPortResult, PreferencesRepository, Repos,
    RepositoryError, SearchKeywordRepository, StoreChanges, TimeWindow,
};
pub use services::{
    AppCore, CatalogRepository, DEFAULT_STORE_POLL_INTERVAL, PreferencesSource, SearchHistory,
    StoreWatcher,
};
