//! Unified path management for Nexa files.
//!
//! # Directory Structure
//!
//! ```text
//! ~/.config/nexa/              # Config directory
//! └── config.toml              # Application configuration
//!
//! ~/.local/share/nexa/         # Data directory
//! └── state/                   # Key-value store
//!     └── nexa_app.json        # Persisted AppState
//! ```

use std::path::PathBuf;

use nexa_core::error::{NexaError, Result};

const APP_DIR: &str = "nexa";

/// Resolves where Nexa keeps its files.
///
/// A `base` override puts both config and data under one directory, which
/// is what tests and the `--data-dir` flag use.
#[derive(Debug, Clone, Default)]
pub struct NexaPaths {
    base: Option<PathBuf>,
}

impl NexaPaths {
    pub fn new(base: Option<PathBuf>) -> Self {
        Self { base }
    }

    /// Returns the configuration directory (e.g. `~/.config/nexa/`).
    pub fn config_dir(&self) -> Result<PathBuf> {
        if let Some(base) = &self.base {
            return Ok(base.clone());
        }
        dirs::config_dir()
            .map(|dir| dir.join(APP_DIR))
            .ok_or_else(|| NexaError::config("Cannot find config directory"))
    }

    /// Returns the data directory (e.g. `~/.local/share/nexa/`).
    pub fn data_dir(&self) -> Result<PathBuf> {
        if let Some(base) = &self.base {
            return Ok(base.clone());
        }
        dirs::data_dir()
            .map(|dir| dir.join(APP_DIR))
            .ok_or_else(|| NexaError::config("Cannot find data directory"))
    }

    /// Returns the path to `config.toml`.
    pub fn config_file(&self) -> Result<PathBuf> {
        Ok(self.config_dir()?.join("config.toml"))
    }

    /// Returns the directory backing the key-value store.
    pub fn state_dir(&self) -> Result<PathBuf> {
        Ok(self.data_dir()?.join("state"))
    }
}
