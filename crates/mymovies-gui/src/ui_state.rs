//! Screen state shared by every view model.

use mymovies_core::CatalogPortError;

/// Shown for failures to reach the catalog service.
pub const NETWORK_ERROR_MESSAGE: &str =
    "A network problem occurred. Check your connection and try again.";

/// Observed state of one screen.
#[derive(Debug, Clone, PartialEq)]
pub enum UiState<T> {
    /// Nothing has settled yet.
    Loading,
    Success(T),
    Error(CatalogPortError),
}

impl<T> UiState<T> {
    pub const fn is_loading(&self) -> bool {
        matches!(self, Self::Loading)
    }

    pub const fn success(&self) -> Option<&T> {
        match self {
            Self::Success(value) => Some(value),
            _ => None,
        }
    }

    pub const fn error(&self) -> Option<&CatalogPortError> {
        match self {
            Self::Error(e) => Some(e),
            _ => None,
        }
    }
}

impl<T> From<Result<T, CatalogPortError>> for UiState<T> {
    fn from(result: Result<T, CatalogPortError>) -> Self {
        match result {
            Ok(value) => Self::Success(value),
            Err(e) => Self::Error(e),
        }
    }
}

/// The message a renderer shows for a failure.
///
/// Transport and protocol failures collapse into one fixed network message;
/// anything else is shown with its description.
pub fn error_message(error: &CatalogPortError) -> String {
    if error.is_network() {
        NETWORK_ERROR_MESSAGE.to_string()
    } else {
        format!("Error: {error}")
    }
}
