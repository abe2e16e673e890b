// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Store configuration loaded from TOML

use serde::Deserialize;
use std::path::{Path, PathBuf};
use std::time::Duration;
use thiserror::Error;

/// Errors from loading a configuration file
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read {path}: {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("TOML parse error: {0}")]
    Toml(#[from] toml::de::Error),
}

/// Configuration for an [`AcidState`](crate::AcidState)
///
/// ```toml
/// root = "/var/lib/app/state"
/// checkpoint_interval = 1000
/// compact_on_checkpoint = true
/// group_commit_window = "2ms"
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct AcidConfig {
    /// Parent of the per-type directories used by `open_default`
    pub root: PathBuf,
    /// Take a checkpoint after this many updates
    pub checkpoint_interval: Option<u64>,
    /// Drop log records a checkpoint has made redundant
    pub compact_on_checkpoint: bool,
    /// How long log writers wait to batch appends into one fsync
    #[serde(with = "humantime_serde")]
    pub group_commit_window: Duration,
}

impl Default for AcidConfig {
    fn default() -> Self {
        Self {
            root: PathBuf::from("state"),
            checkpoint_interval: None,
            compact_on_checkpoint: false,
            group_commit_window: Duration::ZERO,
        }
    }
}

impl AcidConfig {
    /// Load configuration from a TOML file
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_toml_str(&content)
    }

    pub fn from_toml_str(content: &str) -> Result<Self, ConfigError> {
        Ok(toml::from_str(content)?)
    }

    /// Directory used for state type `name`
    pub fn directory_for(&self, name: &str) -> PathBuf {
        self.root.join(name)
    }
}

#[cfg(test)]
#[path = "config_tests.rs"]
mod tests;
