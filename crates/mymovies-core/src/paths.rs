//! Data directory and database path resolution.

use std::env;
use std::fs;
use std::path::{Path, PathBuf};

use thiserror::Error;

/// Environment variable that overrides the data directory.
pub const DATA_DIR_ENV: &str = "MYMOVIES_DATA_DIR";

const APP_DIR_NAME: &str = "mymovies";
const DATABASE_FILE: &str = "mymovies.db";

/// Errors that can occur during path resolution.
#[derive(Debug, Error)]
pub enum PathError {
    /// Could not determine the system data directory.
    #[error("Cannot determine system data directory")]
    NoDataDir,

    /// Failed to create a directory.
    #[error("Failed to create directory {path}: {reason}")]
    CreateFailed { path: PathBuf, reason: String },
}

/// Get the root directory for application data.
///
/// Resolution order:
/// 1. `MYMOVIES_DATA_DIR` environment variable
/// 2. System data directory (e.g., `~/.local/share/mymovies`)
pub fn data_root() -> Result<PathBuf, PathError> {
    if let Ok(path) = env::var(DATA_DIR_ENV) {
        if !path.trim().is_empty() {
            return Ok(PathBuf::from(path));
        }
    }

    let data_dir = dirs::data_local_dir().ok_or(PathError::NoDataDir)?;
    Ok(data_dir.join(APP_DIR_NAME))
}

/// Get the path to the database file, creating its directory if needed.
pub fn database_path() -> Result<PathBuf, PathError> {
    database_path_in(&data_root()?)
}

/// Database file location under an explicit root.
pub fn database_path_in(root: &Path) -> Result<PathBuf, PathError> {
    fs::create_dir_all(root).map_err(|e| PathError::CreateFailed {
        path: root.to_path_buf(),
        reason: e.to_string(),
    })?;

    Ok(root.join(DATABASE_FILE))
}
