//! Configuration for zup.
//!
//! This crate handles:
//! - Parsing the global `config.toml`
//! - Platform default directories
//! - Merging CLI flags, environment, config file, and defaults

pub mod combine;
pub mod global;
pub mod paths;

pub use combine::Combine;
pub use global::{load_config_at, load_global_config, GlobalConfig, GlobalConfigError};
pub use paths::{absolute_path, default_install_dir, ensure_dir, global_config_file};

use std::path::{Path, PathBuf};
use zup_core::error::{Error, Result};

/// The global config filename.
pub const CONFIG_FILENAME: &str = "config.toml";

/// Fully resolved settings for one invocation.
///
/// `path_link` and `index_url` stay optional here; their defaults depend on
/// the install directory and host platform and are filled in downstream.
#[derive(Debug, Clone)]
pub struct Settings {
    /// Directory holding installed compiler versions.
    pub install_dir: PathBuf,

    /// Location of the default-compiler pointer, if overridden.
    pub path_link: Option<PathBuf>,

    /// Download index URL, if overridden.
    pub index_url: Option<String>,
}

impl Settings {
    /// Resolve settings from CLI overrides, an optional explicit config file,
    /// and the global config.
    ///
    /// Precedence: `overrides` (flags and environment), then the config file,
    /// then platform defaults. An explicitly named config file must exist;
    /// the default one is optional. The install directory always comes back
    /// absolute, with relative overrides resolved against the current
    /// directory.
    pub fn resolve(overrides: GlobalConfig, config_file: Option<&Path>) -> Result<Self> {
        let file_config = match config_file {
            Some(path) => {
                if !path.exists() {
                    return Err(Error::Config {
                        message: "config file not found".to_string(),
                        path: Some(path.to_path_buf()),
                    });
                }
                load_config_at(path).map_err(|e| Error::Config {
                    message: e.to_string(),
                    path: Some(path.to_path_buf()),
                })?
            }
            None => load_global_config().map_err(|e| Error::Config {
                message: e.to_string(),
                path: global_config_file().ok(),
            })?,
        };

        let merged = overrides.combine(file_config.unwrap_or_default());

        let install_dir = match merged.install_dir {
            Some(dir) => absolute_path(&dir)?,
            None => default_install_dir()?,
        };

        Ok(Settings {
            install_dir,
            path_link: merged.path_link,
            index_url: merged.index_url,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_flags_override_file() {
        let temp = tempfile::tempdir().unwrap();
        let config_path = temp.path().join("config.toml");
        std::fs::write(
            &config_path,
            "install-dir = \"/from/file\"\nindex-url = \"https://mirror.example/index.json\"\n",
        )
        .unwrap();

        let overrides = GlobalConfig {
            install_dir: Some(PathBuf::from("/from/flags")),
            path_link: None,
            index_url: None,
        };
        let settings = Settings::resolve(overrides, Some(&config_path)).unwrap();
        assert_eq!(settings.install_dir, PathBuf::from("/from/flags"));
        assert_eq!(
            settings.index_url.as_deref(),
            Some("https://mirror.example/index.json")
        );
    }

    #[test]
    fn test_relative_install_dir_is_absolutized() {
        let temp = tempfile::tempdir().unwrap();
        let config_path = temp.path().join("config.toml");
        std::fs::write(&config_path, "").unwrap();

        let overrides = GlobalConfig {
            install_dir: Some(PathBuf::from("zigroot")),
            path_link: None,
            index_url: None,
        };
        let settings = Settings::resolve(overrides, Some(&config_path)).unwrap();
        assert!(settings.install_dir.is_absolute());
        assert_eq!(
            settings.install_dir,
            std::env::current_dir().unwrap().join("zigroot")
        );
    }

    #[test]
    fn test_missing_explicit_config_is_an_error() {
        let temp = tempfile::tempdir().unwrap();
        let missing = temp.path().join("nope.toml");
        let err = Settings::resolve(GlobalConfig::default(), Some(&missing)).unwrap_err();
        assert!(err.to_string().contains("config file not found"));
    }
}
