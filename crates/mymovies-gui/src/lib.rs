#![doc = include_str!("../README.md")]
#![deny(unsafe_code)]
#![deny(unused_crate_dependencies)]

mod aggregator;
mod deps;
mod error;
mod screens;

pub mod movie_details;
pub mod movies;
pub mod person_details;
pub mod search;
pub mod ui_state;

// Primary exports
pub use aggregator::ViewStateAggregator;
pub use deps::GuiDeps;
pub use error::GuiError;
pub use screens::Screens;

pub use movie_details::{MovieDetails, MovieDetailsViewModel};
pub use movies::{MovieLists, MoviesViewModel};
pub use person_details::{PersonDetails, PersonDetailsViewModel};
pub use search::{SearchMoviesViewModel, SearchResults};
pub use ui_state::{NETWORK_ERROR_MESSAGE, UiState, error_message};
