//! Network configuration.
//!
//! Loaded from `<config_dir>/hostnet/network.toml`; every field has a
//! default so a missing file or a partial one both work.

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use directories::ProjectDirs;
use hostnet_types::{NodeDescription, parse_description};
use serde::{Deserialize, Serialize};

/// Configuration for a [`Network`](crate::Network).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NetworkConfig {
    /// Upper bound on forwarded relay hops per command.
    #[serde(default = "default_max_relay_depth")]
    pub max_relay_depth: usize,

    /// How many candidate addresses to try before giving up on a new host.
    #[serde(default = "default_address_attempts")]
    pub address_attempts: usize,

    /// JSON file, in the bootstrap description shape, seeding every new host.
    #[serde(default)]
    pub root_template: Option<PathBuf>,
}

fn default_max_relay_depth() -> usize {
    8
}

fn default_address_attempts() -> usize {
    1000
}

impl Default for NetworkConfig {
    fn default() -> Self {
        Self {
            max_relay_depth: default_max_relay_depth(),
            address_attempts: default_address_attempts(),
            root_template: None,
        }
    }
}

impl NetworkConfig {
    /// Load configuration from the default path, or defaults if absent.
    pub fn load() -> Result<Self> {
        let path = config_path()?;
        if !path.exists() {
            tracing::debug!(path = %path.display(), "no network config, using defaults");
            return Ok(Self::default());
        }
        Self::load_from(&path)
    }

    /// Load configuration from a specific path.
    pub fn load_from(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("reading config from {}", path.display()))?;
        let config: NetworkConfig =
            toml::from_str(&content).with_context(|| format!("parsing config from {}", path.display()))?;
        Ok(config)
    }

    /// Read the root template, or an empty description when none is set.
    ///
    /// A relative template path is taken relative to the current directory.
    pub fn load_root_template(&self) -> Result<Vec<NodeDescription>> {
        let Some(path) = &self.root_template else {
            return Ok(Vec::new());
        };
        let json = std::fs::read_to_string(path)
            .with_context(|| format!("reading root template from {}", path.display()))?;
        parse_description(&json).with_context(|| format!("parsing root template from {}", path.display()))
    }
}

/// Default config file path.
pub fn config_path() -> Result<PathBuf> {
    let dirs = ProjectDirs::from("", "", "hostnet").context("could not determine config directory")?;
    Ok(dirs.config_dir().join("network.toml"))
}
