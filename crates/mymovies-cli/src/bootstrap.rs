//! CLI bootstrap - the composition root.
//!
//! This module is the ONLY place where infrastructure is wired together
//! for the CLI adapter. All concrete implementations are instantiated here:
//! - Database pool and repositories (via mymovies-db)
//! - TMDB catalog client (via mymovies-tmdb)
//! - Core services (via mymovies-core)
//! - Screen view models (via mymovies-gui)

use std::env;
use std::path::PathBuf;
use std::sync::Arc;

use mymovies_core::{
    AppCore, CatalogClientPort, DEFAULT_STORE_POLL_INTERVAL, LanguageTag, Repos, StoreWatcher,
    database_path,
};
use mymovies_db::{CoreFactory, setup_database};
use mymovies_gui::{GuiDeps, Screens};
use mymovies_tmdb::{ACCESS_TOKEN_ENV, DefaultTmdbClient, TmdbClientConfig};
use tracing::{info, warn};

use crate::error::CliError;
use crate::parser::Cli;

/// Bootstrap configuration for the CLI.
#[derive(Debug, Clone)]
pub struct CliConfig {
    /// SQLite database file.
    pub database_path: PathBuf,
    /// TMDB API read access token.
    pub access_token: Option<String>,
    /// Language for this invocation only. Never persisted.
    pub language: Option<LanguageTag>,
}

impl CliConfig {
    /// Create config with the default database location and the access
    /// token from the environment.
    pub fn with_defaults() -> Result<Self, CliError> {
        Ok(Self {
            database_path: database_path()?,
            access_token: access_token_from_env(),
            language: None,
        })
    }

    /// Create config honouring the global command-line overrides.
    pub fn from_cli(cli: &Cli) -> Result<Self, CliError> {
        let mut config = match &cli.db {
            Some(path) => Self {
                database_path: path.clone(),
                access_token: access_token_from_env(),
                language: None,
            },
            None => Self::with_defaults()?,
        };
        config.language = cli
            .language
            .as_deref()
            .map(str::trim)
            .filter(|tag| !tag.is_empty())
            .map(LanguageTag::new);
        Ok(config)
    }
}

fn access_token_from_env() -> Option<String> {
    env::var(ACCESS_TOKEN_ENV)
        .ok()
        .filter(|token| !token.trim().is_empty())
}

/// Fully composed application context for CLI commands.
///
/// Holds the store watcher, so writes made by other processes sharing the
/// database reach the screens while the context is alive.
pub struct CliContext {
    core: Arc<AppCore>,
    screens: Screens,
    _store_watcher: StoreWatcher,
}

impl CliContext {
    pub const fn core(&self) -> &Arc<AppCore> {
        &self.core
    }

    pub const fn screens(&self) -> &Screens {
        &self.screens
    }
}

/// Bootstrap the CLI with all dependencies wired up.
pub async fn bootstrap(config: CliConfig) -> Result<CliContext, CliError> {
    // 1. Open the local store
    let pool = setup_database(&config.database_path)
        .await
        .map_err(|e| CliError::Database(format!("{e:#}")))?;

    // 2. Build the catalog client
    if config.access_token.is_none() {
        warn!("{ACCESS_TOKEN_ENV} is not set; catalog requests will be rejected");
    }
    let tmdb_config = TmdbClientConfig::default().with_optional_access_token(config.access_token);
    let catalog: Arc<dyn CatalogClientPort> = Arc::new(DefaultTmdbClient::new(&tmdb_config)?);

    // 3. Compose core and screens
    let core = CoreFactory::build_app_core(pool, catalog);
    let ctx = finish(core, config.language).await;

    info!(
        database = %config.database_path.display(),
        language = %ctx.core.preferences().language_tag(),
        "CLI bootstrap complete"
    );
    Ok(ctx)
}

/// Bootstrap with injected repositories and catalog client.
pub async fn bootstrap_with(
    repos: Repos,
    catalog: Arc<dyn CatalogClientPort>,
    language: Option<LanguageTag>,
) -> CliContext {
    finish(AppCore::new(repos, catalog), language).await
}

async fn finish(core: AppCore, language: Option<LanguageTag>) -> CliContext {
    core.reload().await;
    if let Some(tag) = language {
        core.preferences().set_session_language_tag(tag);
    }

    let core = Arc::new(core);
    let store_watcher = StoreWatcher::spawn(&core, Some(DEFAULT_STORE_POLL_INTERVAL));
    let screens = Screens::new(GuiDeps::new(Arc::clone(&core)));
    CliContext {
        core,
        screens,
        _store_watcher: store_watcher,
    }
}
