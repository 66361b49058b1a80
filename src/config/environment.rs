// ABOUTME: Environment-based configuration for runtime settings
// ABOUTME: Database location resolution with platform data-dir defaults
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 CalTrack

//! Environment-based configuration.
//!
//! CalTrack is configured entirely through environment variables; the only
//! setting with filesystem awareness is the database location, which defaults
//! to the platform data directory.

use std::env;
use std::path::PathBuf;

use tracing::debug;

use crate::constants::{defaults, env_names};
use crate::errors::{AppError, AppResult};

/// Runtime configuration
#[derive(Debug, Clone)]
pub struct AppConfig {
    /// SQLite database URL (e.g., `sqlite:/home/user/.local/share/caltrack/caltrack.db`)
    pub database_url: String,
}

impl AppConfig {
    /// Load configuration from the environment
    ///
    /// # Errors
    ///
    /// Returns a `ConfigError` if an override is present but empty.
    pub fn from_env() -> AppResult<Self> {
        let database_url =
            env::var(env_names::DATABASE_URL).unwrap_or_else(|_| default_database_url());
        if database_url.trim().is_empty() {
            return Err(AppError::config(format!(
                "{} must not be empty",
                env_names::DATABASE_URL
            )));
        }

        debug!(database_url = %database_url, "configuration loaded");
        Ok(Self { database_url })
    }

    /// Replace the database URL (CLI `--database-url` override)
    #[must_use]
    pub fn with_database_url(mut self, database_url: impl Into<String>) -> Self {
        self.database_url = database_url.into();
        self
    }

    /// Create the parent directory of a file-backed SQLite database
    ///
    /// `?mode=rwc` creates the file but not intermediate directories, so the
    /// default data-dir location needs this before first connect.
    ///
    /// # Errors
    ///
    /// Returns a `ConfigError` if the directory cannot be created.
    pub fn ensure_database_dir(&self) -> AppResult<()> {
        let Some(path) = self.database_file_path() else {
            return Ok(());
        };
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent).map_err(|e| {
                AppError::config(format!(
                    "cannot create database directory {}: {e}",
                    parent.display()
                ))
            })?;
        }
        Ok(())
    }

    /// The filesystem path of a file-backed `sqlite:` URL, if any
    fn database_file_path(&self) -> Option<PathBuf> {
        let path = self.database_url.strip_prefix("sqlite:")?;
        let path = path.split('?').next().unwrap_or(path);
        if path.is_empty() || path.starts_with(':') {
            return None;
        }
        Some(PathBuf::from(path))
    }
}

/// Default database URL under the platform data directory
fn default_database_url() -> String {
    dirs::data_dir()
        .map(|dir| dir.join("caltrack").join(defaults::DATABASE_FILE))
        .and_then(|path| path.to_str().map(|s| format!("sqlite:{s}")))
        .unwrap_or_else(|| format!("sqlite:{}", defaults::DATABASE_FILE))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_database_file_path_strips_scheme_and_query() {
        let config = AppConfig {
            database_url: "sqlite:/tmp/ct/caltrack.db?mode=rwc".to_owned(),
        };
        assert_eq!(
            config.database_file_path(),
            Some(PathBuf::from("/tmp/ct/caltrack.db"))
        );
    }

    #[test]
    fn test_memory_url_has_no_file_path() {
        let config = AppConfig {
            database_url: "sqlite::memory:".to_owned(),
        };
        assert_eq!(config.database_file_path(), None);
    }
}
