//! Global configuration.
//!
//! Global config is stored at `~/.config/zup/config.toml` (or platform
//! equivalent). Every field is optional; CLI flags and `ZUP_*` environment
//! variables take precedence over anything set here.

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use thiserror::Error;
use tracing::debug;

/// Error type for global config operations.
#[derive(Debug, Error)]
pub enum GlobalConfigError {
    #[error("failed to read global config: {0}")]
    ReadError(#[from] std::io::Error),

    #[error("failed to parse global config: {0}")]
    ParseError(#[from] toml::de::Error),

    #[error("failed to serialize global config: {0}")]
    SerializeError(#[from] toml::ser::Error),
}

/// Global configuration.
///
/// # Example
///
/// ```toml
/// # ~/.config/zup/config.toml
///
/// install-dir = "/home/user/zig"
/// path-link = "/home/user/zig/default"
/// index-url = "https://ziglang.org/download/index.json"
/// ```
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub struct GlobalConfig {
    /// Directory holding installed compiler versions.
    pub install_dir: Option<PathBuf>,

    /// Location of the default-compiler pointer.
    pub path_link: Option<PathBuf>,

    /// Download index URL (override for mirrors).
    pub index_url: Option<String>,
}

impl GlobalConfig {
    /// Parse global config from a TOML string.
    pub fn parse(s: &str) -> Result<Self, GlobalConfigError> {
        Ok(toml::from_str(s)?)
    }

    /// Parse global config from a file.
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self, GlobalConfigError> {
        let content = std::fs::read_to_string(path)?;
        Self::parse(&content)
    }

    /// Serialize the global config to a TOML string.
    pub fn to_toml(&self) -> Result<String, GlobalConfigError> {
        Ok(toml::to_string_pretty(self)?)
    }

    /// Write the global config to a file.
    pub fn to_file(&self, path: impl AsRef<Path>) -> Result<(), GlobalConfigError> {
        let path = path.as_ref();

        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }

        let content = self.to_toml()?;
        std::fs::write(path, content)?;
        Ok(())
    }
}

/// Load the global configuration from its default location.
///
/// Returns `Ok(None)` if the global config file doesn't exist.
/// Returns `Err` if the file exists but can't be parsed.
pub fn load_global_config() -> Result<Option<GlobalConfig>, GlobalConfigError> {
    let config_file = match crate::paths::global_config_file() {
        Ok(path) => path,
        Err(_) => {
            debug!("Could not determine global config path");
            return Ok(None);
        }
    };

    load_config_at(&config_file)
}

/// Load a configuration file from an explicit path.
pub fn load_config_at(path: &Path) -> Result<Option<GlobalConfig>, GlobalConfigError> {
    if !path.exists() {
        debug!("Config file does not exist: {}", path.display());
        return Ok(None);
    }

    let config = GlobalConfig::from_file(path)?;
    debug!("Loaded config from {}", path.display());
    Ok(Some(config))
}
