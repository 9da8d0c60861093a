//! Main CLI parser and top-level argument handling.

use std::path::PathBuf;

use clap::Parser;

use crate::commands::Commands;

/// Command-line interface for browsing the movie catalog.
#[derive(Parser)]
#[command(name = "mymovies")]
#[command(about = "Browse movies, people and search history from the terminal")]
#[command(version)]
pub struct Cli {
    /// Display language for this invocation only (e.g. zh-TW)
    #[arg(long = "language", global = true, value_name = "TAG")]
    pub language: Option<String>,

    /// Use this database file instead of the default location
    #[arg(long = "db", global = true, value_name = "PATH")]
    pub db: Option<PathBuf>,

    /// Enable verbose/debug output
    #[arg(short = 'v', long = "verbose", global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Option<Commands>,
}
