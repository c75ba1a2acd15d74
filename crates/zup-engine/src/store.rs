//! Install-root layout and enumeration.
//!
//! The install root is the only durable state zup owns:
//!
//! ```text
//! <root>/<version>/files/...       canonical installed compiler
//! <root>/<version>/keep            keep marker (empty file)
//! <root>/<version>.installing/...  transient staging
//! <root>/master                    master alias
//! <root>/default | <root>/zig.cmd  default pointer (mechanism-dependent)
//! ```
//!
//! Nothing here is cached between calls: the root is re-read on every
//! operation so manual edits (a hand-deleted version, an orphaned staging
//! directory from a crash) are tolerated rather than contradicted.

use crate::platform;
use std::path::{Path, PathBuf};
use std::time::SystemTime;
use tracing::debug;
use zup_core::error::{Error, Result};

/// Suffix marking a transient staging directory.
pub const STAGING_SUFFIX: &str = ".installing";

/// Name of the keep-marker file inside a version directory.
pub const KEEP_MARKER: &str = "keep";

/// Name of the master alias entry.
pub const MASTER_ALIAS: &str = "master";

/// Subdirectory of a version directory holding the extracted compiler.
pub const FILES_DIR: &str = "files";

/// A configured install root.
#[derive(Debug, Clone)]
pub struct InstallRoot {
    path: PathBuf,
}

/// One installed version, as found on disk.
#[derive(Debug, Clone)]
pub struct InstalledVersion {
    /// Version string, taken from the directory name.
    pub name: String,
    /// The version directory.
    pub path: PathBuf,
    /// Whether a keep marker protects this version.
    pub keep: bool,
    /// Modification time of the version directory, when available.
    pub installed_at: Option<SystemTime>,
}

impl InstallRoot {
    /// Wrap an install-root path. The directory need not exist yet.
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// The root directory itself.
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Create the root directory if missing.
    pub fn ensure_exists(&self) -> Result<()> {
        if !self.path.exists() {
            debug!("Creating install root: {}", self.path.display());
            std::fs::create_dir_all(&self.path)
                .map_err(|e| Error::io("failed to create install root", &self.path, e))?;
        }
        Ok(())
    }

    /// Canonical directory for a version.
    pub fn version_dir(&self, version: &str) -> PathBuf {
        self.path.join(version)
    }

    /// The `files/` subdirectory holding the extracted compiler.
    pub fn files_dir(&self, version: &str) -> PathBuf {
        self.version_dir(version).join(FILES_DIR)
    }

    /// Transient staging directory for an in-flight install.
    pub fn staging_dir(&self, version: &str) -> PathBuf {
        self.path.join(format!("{version}{STAGING_SUFFIX}"))
    }

    /// Keep-marker path for a version.
    pub fn keep_marker(&self, version: &str) -> PathBuf {
        self.version_dir(version).join(KEEP_MARKER)
    }

    /// The master alias entry.
    pub fn master_alias(&self) -> PathBuf {
        self.path.join(MASTER_ALIAS)
    }

    /// Path of the compiler executable for an installed version.
    pub fn compiler_path(&self, version: &str) -> PathBuf {
        self.files_dir(version).join(platform::compiler_exe_name())
    }

    /// Whether a version's canonical directory exists.
    ///
    /// The canonical directory is the commit signal: it appears only via
    /// the installer's final rename, so existence means fully installed.
    pub fn is_installed(&self, version: &str) -> bool {
        self.version_dir(version).is_dir()
    }

    /// Enumerate installed versions, freshly read from disk.
    ///
    /// Only directories count; the master alias and the default pointer
    /// are links or files and fall out naturally. Staging directories are
    /// excluded by their suffix. Sorted by name for stable output.
    pub fn installed_versions(&self) -> Result<Vec<InstalledVersion>> {
        if !self.path.exists() {
            return Ok(Vec::new());
        }

        let entries = std::fs::read_dir(&self.path)
            .map_err(|e| Error::io("failed to read install root", &self.path, e))?;

        let mut versions = Vec::new();
        for entry in entries {
            let entry =
                entry.map_err(|e| Error::io("failed to read install root", &self.path, e))?;
            let file_type = entry
                .file_type()
                .map_err(|e| Error::io("failed to stat install-root entry", entry.path(), e))?;
            if !file_type.is_dir() {
                continue;
            }

            let name = match entry.file_name().into_string() {
                Ok(name) => name,
                Err(_) => continue,
            };
            if name.ends_with(STAGING_SUFFIX) {
                continue;
            }

            let path = entry.path();
            let keep = path.join(KEEP_MARKER).exists();
            let installed_at = entry.metadata().ok().and_then(|m| m.modified().ok());
            versions.push(InstalledVersion {
                name,
                path,
                keep,
                installed_at,
            });
        }

        versions.sort_by(|a, b| a.name.cmp(&b.name));
        Ok(versions)
    }
}

/// Recursively search `dir` for the compiler executable.
///
/// Returns the path of the first match, walking files before descending
/// into subdirectories.
pub fn find_compiler_under(dir: &Path) -> Result<Option<PathBuf>> {
    let exe_name = platform::compiler_exe_name();
    let entries =
        std::fs::read_dir(dir).map_err(|e| Error::io("failed to read directory", dir, e))?;

    let mut subdirs = Vec::new();
    for entry in entries {
        let entry = entry.map_err(|e| Error::io("failed to read directory", dir, e))?;
        let file_type = entry
            .file_type()
            .map_err(|e| Error::io("failed to stat directory entry", entry.path(), e))?;
        if file_type.is_file() && entry.file_name() == exe_name {
            return Ok(Some(entry.path()));
        }
        if file_type.is_dir() {
            subdirs.push(entry.path());
        }
    }

    for subdir in subdirs {
        if let Some(found) = find_compiler_under(&subdir)? {
            return Ok(Some(found));
        }
    }

    Ok(None)
}
