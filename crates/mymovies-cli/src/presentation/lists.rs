//! Movie tables and search history.

use mymovies_core::domain::image_urls::format_rating;
use mymovies_core::{Movie, MovieList, SearchKeyword};
use mymovies_gui::MovieLists;

use super::tables::{print_separator, release_year, truncate_string};

const TABLE_WIDTH: usize = 72;
const TITLE_WIDTH: usize = 48;

/// One table row: position, id, title, year and rating.
pub fn movie_row(index: usize, movie: &Movie) -> String {
    format!(
        "{:>3}  {:<8} {:<width$} {:<4}  {:>4}",
        index + 1,
        movie.id,
        truncate_string(&movie.title, TITLE_WIDTH),
        release_year(&movie.release_date),
        format_rating(Some(movie.vote_average)),
        width = TITLE_WIDTH,
    )
}

/// Print a titled movie table.
pub fn print_movie_table(heading: &str, movies: &[Movie]) {
    println!("{heading}");
    print_separator(TABLE_WIDTH);
    if movies.is_empty() {
        println!("  (none)");
    }
    for (index, movie) in movies.iter().enumerate() {
        println!("{}", movie_row(index, movie));
    }
    println!();
}

/// Print every list of the home screen.
pub fn print_home(lists: &MovieLists) {
    let sections: [(&str, &MovieList); 5] = [
        ("Trending today", &lists.trending),
        ("Now playing", &lists.now_playing),
        ("Upcoming", &lists.upcoming),
        ("Popular", &lists.popular),
        ("Top rated", &lists.top_rated),
    ];
    for (heading, list) in sections {
        print_movie_table(heading, &list.results);
    }
}

/// Print remembered keywords, newest first.
pub fn print_history(entries: &[SearchKeyword]) {
    if entries.is_empty() {
        println!("No search history.");
        return;
    }
    println!("{:<20} KEYWORD", "SEARCHED AT");
    print_separator(TABLE_WIDTH);
    for entry in entries {
        println!(
            "{:<20} {}",
            entry.added_at.format("%Y-%m-%d %H:%M"),
            entry.keyword
        );
    }
}
