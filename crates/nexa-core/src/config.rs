use std::path::PathBuf;
use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::error::{NexaError, Result};
use crate::matching::MatchOdds;

/// Record name the state blob is stored under.
pub const DEFAULT_STATE_KEY: &str = "nexa_app";

/// Default debounce window for state writes.
pub const DEFAULT_DEBOUNCE_MS: u64 = 400;

#[derive(Deserialize, Serialize, Debug, Clone, PartialEq)]
#[serde(default)]
pub struct StorageSettings {
    /// Overrides the platform data directory.
    pub data_dir: Option<PathBuf>,
    pub state_key: String,
    pub debounce_ms: u64,
}

impl Default for StorageSettings {
    fn default() -> Self {
        Self {
            data_dir: None,
            state_key: DEFAULT_STATE_KEY.to_string(),
            debounce_ms: DEFAULT_DEBOUNCE_MS,
        }
    }
}

impl StorageSettings {
    pub fn debounce(&self) -> Duration {
        Duration::from_millis(self.debounce_ms)
    }
}

#[derive(Deserialize, Serialize, Debug, Clone, PartialEq)]
#[serde(default)]
pub struct DemoSettings {
    pub like_match_probability: f64,
    pub superlike_match_probability: f64,
}

impl Default for DemoSettings {
    fn default() -> Self {
        let odds = MatchOdds::default();
        Self {
            like_match_probability: odds.like,
            superlike_match_probability: odds.superlike,
        }
    }
}

impl DemoSettings {
    pub fn odds(&self) -> MatchOdds {
        MatchOdds {
            like: self.like_match_probability,
            superlike: self.superlike_match_probability,
        }
    }
}

#[derive(Deserialize, Serialize, Debug, Clone, PartialEq, Eq)]
#[serde(default)]
pub struct AuthSettings {
    /// A successful sign-in approves a pending application.
    pub approve_on_sign_in: bool,
}

impl Default for AuthSettings {
    fn default() -> Self {
        Self {
            approve_on_sign_in: true,
        }
    }
}

#[derive(Deserialize, Serialize, Debug, Clone, PartialEq, Eq)]
#[serde(default)]
pub struct LogSettings {
    pub level: String,
}

impl Default for LogSettings {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
        }
    }
}

/// Root of `config.toml`.
#[derive(Deserialize, Serialize, Debug, Clone, Default, PartialEq)]
#[serde(default)]
pub struct NexaConfig {
    pub storage: StorageSettings,
    pub demo: DemoSettings,
    pub auth: AuthSettings,
    pub logging: LogSettings,
}

impl NexaConfig {
    /// Rejects values the engine cannot work with.
    pub fn validate(&self) -> Result<()> {
        if self.storage.state_key.trim().is_empty() {
            return Err(NexaError::config("storage.state_key must not be empty"));
        }
        for (name, p) in [
            ("demo.like_match_probability", self.demo.like_match_probability),
            (
                "demo.superlike_match_probability",
                self.demo.superlike_match_probability,
            ),
        ] {
            if !(0.0..=1.0).contains(&p) {
                return Err(NexaError::config(format!("{name} must be within 0..=1, got {p}")));
            }
        }
        Ok(())
    }
}
