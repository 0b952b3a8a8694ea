//! Data directory resolution

use std::fs;
use std::path::{Path, PathBuf};

/// Environment variable overriding the data directory
pub const ENV_HOME: &str = "PROMPT_FORGE_HOME";

/// Directory name used under the user's home directory
const DATA_DIR_NAME: &str = ".prompt-forge";

/// Resolve the default data directory.
/// `PROMPT_FORGE_HOME` wins, then `~/.prompt-forge`, then `./.prompt-forge`.
pub fn default_data_dir() -> PathBuf {
    if let Ok(home) = std::env::var(ENV_HOME) {
        let home = home.trim();
        if !home.is_empty() {
            return PathBuf::from(home);
        }
    }

    dirs::home_dir()
        .map(|h| h.join(DATA_DIR_NAME))
        .unwrap_or_else(|| PathBuf::from(DATA_DIR_NAME))
}

/// Make sure the data directory exists.
/// Creation failures are logged; callers surface write errors later.
pub fn ensure_data_dir(dir: &Path) -> PathBuf {
    if !dir.exists() {
        if let Err(e) = fs::create_dir_all(dir) {
            tracing::warn!("Failed to create data directory {:?}: {}", dir, e);
        }
    }

    dir.to_path_buf()
}
