//! Configuration management for CursorPage
//!
//! Pagination limits and logging settings, loaded from a TOML file with
//! defaults for anything absent

use crate::monitoring::LoggingConfig;
use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::path::Path;
use tracing::debug;

/// CursorPage configuration
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CursorPageConfig {
    /// Pagination settings
    pub pagination: PaginationConfig,
    /// Logging settings
    pub logging: LoggingConfig,
}

/// Page size limits
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PaginationConfig {
    /// Page size used when a request does not name one
    pub default_limit: u64,
    /// Largest page size a request may ask for
    pub max_limit: u64,
}

impl Default for PaginationConfig {
    fn default() -> Self {
        Self {
            default_limit: 50,
            max_limit: 300,
        }
    }
}

impl CursorPageConfig {
    /// Load configuration from file; a missing file yields the defaults
    pub fn load(path: &Path) -> Result<Self> {
        if !path.exists() {
            debug!("No config file at {}, using defaults", path.display());
            return Ok(Self::default());
        }

        let content = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file: {}", path.display()))?;

        let config: CursorPageConfig = toml::from_str(&content)
            .with_context(|| format!("Failed to parse config file: {}", path.display()))?;

        config.validate()?;

        Ok(config)
    }

    /// Save configuration to file
    pub fn save(&self, path: &Path) -> Result<()> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)
                .with_context(|| format!("Failed to create config directory: {}", parent.display()))?;
        }

        let content = toml::to_string_pretty(self).context("Failed to serialize configuration")?;

        std::fs::write(path, content)
            .with_context(|| format!("Failed to write config file: {}", path.display()))?;

        Ok(())
    }

    /// Validate configuration
    pub fn validate(&self) -> Result<()> {
        if self.pagination.default_limit == 0 {
            return Err(anyhow::anyhow!("Default page limit cannot be 0"));
        }

        if self.pagination.max_limit < self.pagination.default_limit {
            return Err(anyhow::anyhow!(
                "Max page limit ({}) cannot be below the default limit ({})",
                self.pagination.max_limit,
                self.pagination.default_limit
            ));
        }

        Ok(())
    }
}
