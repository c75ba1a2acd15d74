//! Platform default directories.
//!
//! - Linux: `~/.local/share/zup` (installs), `~/.config/zup` (config)
//! - macOS: `~/Library/Application Support/zup` for both
//! - Windows: `%LOCALAPPDATA%\zup` (installs), `%APPDATA%\zup` (config)

use directories::ProjectDirs;
use std::path::{Path, PathBuf};
use tracing::debug;
use zup_core::error::{Error, Result};

fn project_dirs() -> Result<ProjectDirs> {
    ProjectDirs::from("dev", "zup", "zup")
        .ok_or_else(|| Error::config("could not determine home directory"))
}

/// Default directory holding installed compiler versions.
pub fn default_install_dir() -> Result<PathBuf> {
    Ok(project_dirs()?.data_local_dir().to_path_buf())
}

/// Path of the global config file.
pub fn global_config_file() -> Result<PathBuf> {
    Ok(project_dirs()?.config_dir().join(crate::CONFIG_FILENAME))
}

/// Absolute form of `path`, resolved against the current directory.
///
/// The install directory ends up in symlink targets, and the OS resolves
/// a relative symlink target against the link's parent, not the
/// invocation directory.
pub fn absolute_path(path: &Path) -> Result<PathBuf> {
    if path.is_absolute() {
        return Ok(path.to_path_buf());
    }
    let cwd = std::env::current_dir().map_err(|e| Error::Io {
        message: "failed to resolve current directory".to_string(),
        path: Some(path.to_path_buf()),
        source: e,
    })?;
    Ok(cwd.join(path))
}

/// Ensure a directory exists.
pub fn ensure_dir(path: &PathBuf) -> Result<()> {
    if !path.exists() {
        debug!("Creating directory: {}", path.display());
        std::fs::create_dir_all(path).map_err(|e| Error::Io {
            message: format!("failed to create directory: {}", path.display()),
            path: Some(path.clone()),
            source: e,
        })?;
    }
    Ok(())
}
