//! Repository implementations using `SQLite`.
//!
//! These implementations encapsulate all SQL queries and database access.
//! The `SqlitePool` is confined to this module and never exposed through
//! the port trait signatures.

mod row_mappers;
mod sqlite_preferences_repository;
mod sqlite_search_keyword_repository;

pub use sqlite_preferences_repository::SqlitePreferencesRepository;
pub use sqlite_search_keyword_repository::SqliteSearchKeywordRepository;
