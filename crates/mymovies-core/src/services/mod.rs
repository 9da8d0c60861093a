//! Core services - the application's business logic layer.
//!
//! Services orchestrate between ports and domain logic. They don't know
//! about concrete implementations.

mod app_core;
mod catalog_repository;
mod preferences;
mod search_history;
mod store_watcher;

pub use app_core::AppCore;
pub use catalog_repository::CatalogRepository;
pub use preferences::PreferencesSource;
pub use search_history::SearchHistory;
pub use store_watcher::{DEFAULT_STORE_POLL_INTERVAL, StoreWatcher};
