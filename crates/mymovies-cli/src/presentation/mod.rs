//! Text rendering for command output.
//!
//! Handlers decide what to show; this module decides how it looks.

mod details;
mod lists;
mod tables;

pub use details::{print_movie_details, print_person_details};
pub use lists::{movie_row, print_history, print_home, print_movie_table};
pub use tables::{format_optional, print_separator, release_year, truncate_string};
