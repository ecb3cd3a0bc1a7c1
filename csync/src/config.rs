//! Configuration for csync
//!
//! Tunables come from an optional TOML file; every field has a default so
//! running without a config file just works. CLI flags never live here —
//! they stay in `main.rs`.

use std::fs;
use std::path::Path;

use serde::Deserialize;
use tracing::info;

use csync_common::{Error, Result};

/// Batch tunables with serde defaults.
#[derive(Debug, Clone, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct SyncConfig {
    /// Country code prepended to stored phone numbers lacking a '+' prefix.
    pub default_country_code: String,

    /// Fuzzy full-name similarity threshold (0-100) for the second matching
    /// pass. Exact name matches always qualify regardless of this value.
    pub fuzzy_threshold: f64,
}

impl Default for SyncConfig {
    fn default() -> Self {
        SyncConfig {
            default_country_code: "+1".to_string(),
            fuzzy_threshold: 90.0,
        }
    }
}

impl SyncConfig {
    /// Load from a TOML file, or fall back to defaults when no path is given.
    pub fn load(path: Option<&Path>) -> Result<Self> {
        let Some(path) = path else {
            return Ok(SyncConfig::default());
        };

        let raw = fs::read_to_string(path).map_err(|e| {
            Error::Config(format!("cannot read {}: {}", path.display(), e))
        })?;
        let config: SyncConfig = toml::from_str(&raw)
            .map_err(|e| Error::Config(format!("invalid {}: {}", path.display(), e)))?;

        if !(0.0..=100.0).contains(&config.fuzzy_threshold) {
            return Err(Error::Config(format!(
                "fuzzy_threshold must be within 0-100, got {}",
                config.fuzzy_threshold
            )));
        }

        info!("configuration loaded from {}", path.display());
        Ok(config)
    }
}
