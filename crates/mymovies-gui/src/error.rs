//! Semantic error types for screen operations.
//!
//! Catalog failures are not errors here; they are published as screen state.
//! `GuiError` covers the operations a screen performs directly.

use mymovies_core::RepositoryError;
use thiserror::Error;

#[derive(Debug, Clone, Error)]
pub enum GuiError {
    /// Entity not found.
    #[error("{entity} not found: {id}")]
    NotFound {
        /// Type of entity (e.g. "search keyword").
        entity: &'static str,
        /// Identifier that was not found.
        id: String,
    },

    /// The screen's driver has stopped.
    #[error("screen closed")]
    Closed,

    /// Local store failure.
    #[error("storage error: {0}")]
    Storage(String),
}

impl From<RepositoryError> for GuiError {
    fn from(err: RepositoryError) -> Self {
        match err {
            RepositoryError::NotFound(id) => Self::NotFound {
                entity: "search keyword",
                id,
            },
            other => Self::Storage(other.to_string()),
        }
    }
}
