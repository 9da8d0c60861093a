//! CLI entry point - the composition root.
//!
//! Parses arguments, initialises logging, bootstraps the `CliContext` and
//! dispatches to a handler. Handler errors become sysexits-style exit codes.

use clap::{CommandFactory, Parser};
use tracing_subscriber::EnvFilter;

use mymovies_cli::{Cli, CliConfig, CliError, Commands, HistoryCommand, bootstrap, handlers};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Load environment variables before anything reads them
    dotenvy::dotenv().ok();

    // Parse CLI arguments
    let cli = Cli::parse();

    // Initialize logging; RUST_LOG wins over --verbose
    let default_level = if cli.verbose { "debug" } else { "warn" };
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level)),
        )
        .with_writer(std::io::stderr)
        .init();

    let Some(command) = cli.command.as_ref() else {
        Cli::command().print_help()?;
        return Ok(());
    };

    if let Err(e) = run(&cli, command).await {
        eprintln!("{e}");
        std::process::exit(e.exit_code());
    }
    Ok(())
}

async fn run(cli: &Cli, command: &Commands) -> Result<(), CliError> {
    // Bootstrap the CLI context (composition root)
    let config = CliConfig::from_cli(cli)?;
    let ctx = bootstrap(config).await?;

    match command {
        Commands::Home => handlers::home::execute(&ctx).await,
        Commands::Movie { id } => handlers::movie::execute(&ctx, *id).await,
        Commands::Person { id } => handlers::person::execute(&ctx, *id).await,
        Commands::Search { query, pages } => {
            handlers::search::execute(&ctx, query, *pages).await
        }
        Commands::History { command: None } => handlers::history::list(&ctx),
        Commands::History {
            command: Some(HistoryCommand::Delete { keyword }),
        } => handlers::history::delete(&ctx, keyword).await,
        Commands::Language { tag } => handlers::language::execute(&ctx, tag.as_deref()).await,
    }
}
