pub mod config;
pub mod kv;
pub mod state_store;

pub use config::{Config, IdentityConfig, LogConfig, StorageConfig};
pub use kv::{FileStore, KeyValueStore, MemoryStore};
pub use state_store::{LoadOutcome, StateStore, DEFAULT_STATE_KEY};

use std::path::PathBuf;

use crate::error::ConfigError;

/// Returns the data directory, creating it if needed.
///
/// `MAMMOUTH_DATA_DIR` overrides the location. Otherwise the directory is
/// `~/.config/mammouth[-dev]/`, with `MAMMOUTH_ENV=dev` selecting the
/// development directory.
///
/// # Errors
/// Returns an error if creating the directory fails.
pub fn data_dir() -> Result<PathBuf, ConfigError> {
    let dir = match std::env::var_os("MAMMOUTH_DATA_DIR") {
        Some(custom) if !custom.is_empty() => PathBuf::from(custom),
        _ => {
            let base_dir = dirs::home_dir()
                .unwrap_or_else(|| PathBuf::from("."))
                .join(".config");

            let env = std::env::var("MAMMOUTH_ENV").unwrap_or_else(|_| "production".to_string());

            if env == "dev" {
                base_dir.join("mammouth-dev")
            } else {
                base_dir.join("mammouth")
            }
        }
    };

    std::fs::create_dir_all(&dir)
        .map_err(|e| ConfigError::DataDir(format!("{}: {e}", dir.display())))?;
    Ok(dir)
}
