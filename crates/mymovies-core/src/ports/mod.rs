//! Port definitions (trait abstractions) for external systems.
//!
//! Ports define the interfaces that the core domain expects from infrastructure.
//! They contain no implementation details and use only domain types.
//!
//! # Design Rules
//!
//! - No `sqlx` or `reqwest` types in any signature
//! - Repository traits are minimal and CRUD-focused
//! - Every remote failure is reported as a value (`CatalogPortError`)

pub mod catalog;
pub mod preferences_repository;
pub mod search_keyword_repository;

use std::sync::Arc;

use thiserror::Error;
use tokio::sync::watch;

pub use catalog::{CatalogClientPort, CatalogPortError, CatalogPortResult, TimeWindow};
pub use preferences_repository::PreferencesRepository;
pub use search_keyword_repository::SearchKeywordRepository;

/// Container for the local store's repository trait objects.
///
/// Lives in core so `AppCore` can accept it without depending on the
/// database adapter.
#[derive(Clone)]
pub struct Repos {
    /// Persisted search keywords.
    pub search_keywords: Arc<dyn SearchKeywordRepository>,
    /// Key/value preferences (language tag).
    pub preferences: Arc<dyn PreferencesRepository>,
}

impl Repos {
    /// Create a new Repos container.
    pub fn new(
        search_keywords: Arc<dyn SearchKeywordRepository>,
        preferences: Arc<dyn PreferencesRepository>,
    ) -> Self {
        Self {
            search_keywords,
            preferences,
        }
    }
}

/// Write notifications published by a local store.
///
/// Adapters call `notify` after every successful write. Receivers see a
/// revision counter; only the fact that it moved matters.
#[derive(Debug, Clone)]
pub struct StoreChanges {
    tx: Arc<watch::Sender<u64>>,
}

impl StoreChanges {
    pub fn new() -> Self {
        let (tx, _) = watch::channel(0);
        Self { tx: Arc::new(tx) }
    }

    /// Announce a completed write.
    pub fn notify(&self) {
        self.tx.send_modify(|revision| *revision = revision.wrapping_add(1));
    }

    pub fn subscribe(&self) -> watch::Receiver<u64> {
        self.tx.subscribe()
    }
}

impl Default for StoreChanges {
    fn default() -> Self {
        Self::new()
    }
}

/// Domain-specific errors for repository operations.
///
/// This error type abstracts away storage implementation details (e.g., sqlx errors)
/// and provides a clean interface for services to handle storage failures.
#[derive(Debug, Error)]
pub enum RepositoryError {
    /// The requested entity was not found.
    #[error("Not found: {0}")]
    NotFound(String),

    /// Storage backend error (database, filesystem, etc.).
    #[error("Storage error: {0}")]
    Storage(String),

    /// Serialization or deserialization failed.
    #[error("Serialization error: {0}")]
    Serialization(String),

    /// A constraint was violated (e.g., unique constraint).
    #[error("Constraint violation: {0}")]
    Constraint(String),
}
