use anyhow::{Context, Result};
use serde::Deserialize;
use std::path::Path;

/// Name of the configuration file looked up from the working directory
pub const CONFIG_FILE: &str = "semver.toml";

/// The semver configuration file structure (semver.toml)
#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct SemverConfig {
    /// Default log filter when RUST_LOG is unset (e.g. "debug")
    pub log_level: Option<String>,

    /// Fail on versions that do not normalize instead of skipping them
    pub strict: bool,

    /// Sort command defaults
    pub sort: SortConfig,
}

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct SortConfig {
    /// Sort newest first
    pub descending: bool,
}

impl SemverConfig {
    /// Load configuration from semver.toml, searching upward from the given directory
    pub fn load(start_dir: &Path) -> Result<Option<Self>> {
        let mut current = start_dir.to_path_buf();

        loop {
            let config_path = current.join(CONFIG_FILE);

            if config_path.is_file() {
                return Self::load_file(&config_path).map(Some);
            }

            if !current.pop() {
                return Ok(None);
            }
        }
    }

    /// Load configuration by searching upward from the current working directory
    pub fn load_from_cwd() -> Result<Option<Self>> {
        let cwd = std::env::current_dir()?;
        Self::load(&cwd)
    }

    /// Load an explicit `--config` location: a file, or a directory to search from
    pub fn load_path(path: &Path) -> Result<Option<Self>> {
        if path.is_dir() {
            Self::load(path)
        } else {
            Self::load_file(path).map(Some)
        }
    }

    fn load_file(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("failed to read {}", path.display()))?;
        toml::from_str(&content).with_context(|| format!("invalid configuration in {}", path.display()))
    }
}
