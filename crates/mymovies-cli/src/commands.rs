//! Subcommand definitions.

use clap::Subcommand;

/// Top-level commands.
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Show trending, now playing, upcoming, popular and top rated movies
    Home,

    /// Show details, cast, images and trailers of a movie
    Movie {
        /// TMDB movie id
        id: i64,
    },

    /// Show biography, photos and filmography of a person
    Person {
        /// TMDB person id
        id: i64,
    },

    /// Search movies by title and remember the keyword
    Search {
        /// Search keyword
        query: String,
        /// Number of result pages to load
        #[arg(long, default_value_t = 1, value_parser = clap::value_parser!(u32).range(1..))]
        pages: u32,
    },

    /// List remembered search keywords, newest first
    History {
        #[command(subcommand)]
        command: Option<HistoryCommand>,
    },

    /// Show the display language, or persist a new one
    Language {
        /// Language tag such as en-US or zh-TW
        tag: Option<String>,
    },
}

/// Search history management.
#[derive(Subcommand, Debug)]
pub enum HistoryCommand {
    /// Forget a remembered keyword
    Delete {
        /// Keyword exactly as listed by `history`
        keyword: String,
    },
}
