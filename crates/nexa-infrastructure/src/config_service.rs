//! Configuration service implementation.
//!
//! Loads `NexaConfig` from `config.toml`. A missing file means defaults; a
//! file that fails to parse or validate is reported and replaced by defaults
//! so a bad edit never keeps the app from starting.

use std::fs;
use std::path::{Path, PathBuf};
use std::sync::{Arc, RwLock};

use nexa_core::config::NexaConfig;
use nexa_core::error::Result;

/// Loads and caches the configuration file.
#[derive(Debug, Clone)]
pub struct ConfigService {
    path: PathBuf,
    /// Cached configuration loaded from file.
    config: Arc<RwLock<Option<NexaConfig>>>,
}

impl ConfigService {
    /// The file is read lazily on first access.
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            config: Arc::new(RwLock::new(None)),
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Gets the configuration, loading from file if not cached.
    pub fn get_config(&self) -> NexaConfig {
        {
            let read_lock = self.config.read().unwrap_or_else(|e| e.into_inner());
            if let Some(ref cached) = *read_lock {
                return cached.clone();
            }
        }

        let loaded = match Self::load_from(&self.path) {
            Ok(config) => config,
            Err(e) => {
                tracing::warn!(
                    "[ConfigService] Ignoring {:?}, using defaults: {}",
                    self.path,
                    e
                );
                NexaConfig::default()
            }
        };

        {
            let mut write_lock = self.config.write().unwrap_or_else(|e| e.into_inner());
            *write_lock = Some(loaded.clone());
        }

        loaded
    }

    /// Invalidates the cache, forcing a reload on next access.
    pub fn invalidate_cache(&self) {
        let mut write_lock = self.config.write().unwrap_or_else(|e| e.into_inner());
        *write_lock = None;
    }

    /// Reads and validates a config file. A missing file yields defaults.
    pub fn load_from(path: &Path) -> Result<NexaConfig> {
        if !path.exists() {
            tracing::debug!("[ConfigService] No config at {:?}, using defaults", path);
            return Ok(NexaConfig::default());
        }

        let content = fs::read_to_string(path)?;
        let config: NexaConfig = toml::from_str(&content)?;
        config.validate()?;
        Ok(config)
    }

    /// Writes the default configuration if no file exists yet.
    ///
    /// Returns whether a file was created.
    pub fn write_default_if_missing(&self) -> Result<bool> {
        if self.path.exists() {
            return Ok(false);
        }
        if let Some(parent) = self.path.parent() {
            fs::create_dir_all(parent)?;
        }
        let content = toml::to_string_pretty(&NexaConfig::default())?;
        fs::write(&self.path, content)?;
        tracing::info!("[ConfigService] Wrote default config to {:?}", self.path);
        Ok(true)
    }
}
