//! Arsenal configuration (resource).
//!
//! Источники по приоритету: defaults → TOML файл → env (`TORPEDO_FAILURE_RATE`).

use std::path::Path;

use bevy::prelude::*;
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Env переменная, переопределяющая шанс misfire
pub const FAILURE_RATE_ENV: &str = "TORPEDO_FAILURE_RATE";

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read arsenal config {path}: {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to parse arsenal config: {0}")]
    Parse(#[from] toml::de::Error),

    #[error("failure rate must be within [0.0, 1.0], got {0}")]
    InvalidFailureRate(f64),
}

/// Параметры корабля и его torpedo bays
#[derive(Resource, Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ArsenalConfig {
    pub ship_name: String,
    /// Начальный запас primary bay
    pub primary_torpedoes: u32,
    /// Начальный запас secondary bay
    pub secondary_torpedoes: u32,
    /// Шанс misfire для обоих bays [0.0, 1.0]
    pub failure_rate: f64,
    /// Seed для RNG bays (secondary получает seed + 1)
    pub seed: u64,
}

impl Default for ArsenalConfig {
    fn default() -> Self {
        Self {
            ship_name: "GT4500".to_string(),
            primary_torpedoes: 10,
            secondary_torpedoes: 10,
            failure_rate: 0.0,
            seed: 42,
        }
    }
}

impl ArsenalConfig {
    pub fn from_toml_str(source: &str) -> Result<Self, ConfigError> {
        let config: Self = toml::from_str(source)?;
        config.validate()?;
        Ok(config)
    }

    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let source = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.display().to_string(),
            source,
        })?;

        Self::from_toml_str(&source)
    }

    /// Применить env override. Мусор в переменной игнорируется (warning).
    pub fn with_env_overrides(self) -> Self {
        let value = std::env::var(FAILURE_RATE_ENV).ok();
        self.with_failure_rate_override(value.as_deref())
    }

    fn with_failure_rate_override(mut self, value: Option<&str>) -> Self {
        let Some(raw) = value else {
            return self;
        };

        match raw.trim().parse::<f64>() {
            Ok(rate) if (0.0..=1.0).contains(&rate) => self.failure_rate = rate,
            _ => crate::logger::log_warning(&format!(
                "{}={:?} ignored (expected a number in [0.0, 1.0])",
                FAILURE_RATE_ENV, raw
            )),
        }

        self
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if !(0.0..=1.0).contains(&self.failure_rate) {
            return Err(ConfigError::InvalidFailureRate(self.failure_rate));
        }
        Ok(())
    }
}
