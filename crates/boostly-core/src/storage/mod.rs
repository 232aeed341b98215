mod config;
pub mod database;
mod gateway;
mod memory;

pub use config::{Config, ModeKind, NotificationsConfig, TimerConfig};
pub use database::Database;
pub use gateway::PersistenceGateway;
pub use memory::MemoryGateway;

use std::path::PathBuf;

use crate::error::PersistenceError;

/// Returns the data directory, creating it if needed.
///
/// `BOOSTLY_HOME` overrides the location outright. Otherwise it is
/// `~/.config/boostly[-dev]/`, with the `-dev` suffix when `BOOSTLY_ENV=dev`.
///
/// # Errors
/// Returns an error if creating the directory fails.
pub fn data_dir() -> Result<PathBuf, PersistenceError> {
    let dir = match std::env::var_os("BOOSTLY_HOME") {
        Some(home) => PathBuf::from(home),
        None => {
            let base_dir = dirs::home_dir()
                .unwrap_or_else(|| PathBuf::from("."))
                .join(".config");
            let env = std::env::var("BOOSTLY_ENV").unwrap_or_else(|_| "production".to_string());
            if env == "dev" {
                base_dir.join("boostly-dev")
            } else {
                base_dir.join("boostly")
            }
        }
    };

    std::fs::create_dir_all(&dir)
        .map_err(|e| PersistenceError::DataDir(format!("{}: {e}", dir.display())))?;
    Ok(dir)
}
