//! Command handlers.
//!
//! Each handler receives the `CliContext`, drives the matching screen view
//! model (or core service) to completion and hands the result to
//! `presentation`. Handlers never touch the database or HTTP client
//! directly.

pub mod history;
pub mod home;
pub mod language;
pub mod movie;
pub mod person;
pub mod search;

use mymovies_gui::UiState;

use crate::error::CliError;

/// Unwrap a settled screen state.
pub(crate) fn settled_value<T>(state: UiState<T>) -> Result<T, CliError> {
    match state {
        UiState::Success(value) => Ok(value),
        UiState::Error(e) => Err(e.into()),
        UiState::Loading => Err(CliError::Core(
            "screen closed before loading finished".to_string(),
        )),
    }
}
