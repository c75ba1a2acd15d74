//! Default and master pointers.
//!
//! The default pointer is the stable path the shell invokes to reach the
//! active compiler; the master alias records which concrete version last
//! satisfied a `master` fetch. Both come in two variants selected once at
//! startup: symlinks where the OS lets a link be invoked directly, and a
//! generated stub executable on Windows. Call sites never branch on the
//! platform themselves.

use crate::platform;
use crate::store::{self, InstallRoot};
use crate::stub::StubTemplate;
use std::ffi::OsStr;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};
use tracing::debug;
use zup_core::error::{Error, Result};

/// How pointers are realized on the target platform.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PointerMechanism {
    /// Symbolic links (Unix).
    Symlink,
    /// Generated stub executable and alias file (Windows).
    Stub,
}

impl PointerMechanism {
    /// Select the mechanism for the build host.
    pub fn for_host() -> Self {
        if cfg!(windows) {
            Self::Stub
        } else {
            Self::Symlink
        }
    }

    /// Root-level entry name of the default pointer for this mechanism.
    pub fn default_pointer_name(&self) -> &'static str {
        match self {
            Self::Symlink => "default",
            Self::Stub => "zig.cmd",
        }
    }
}

/// The stable path exposing the active compiler version.
#[derive(Debug, Clone)]
pub struct DefaultPointer {
    path: PathBuf,
    mechanism: PointerMechanism,
}

impl DefaultPointer {
    /// A pointer at an explicit path (the `--path-link` override).
    pub fn new(path: impl Into<PathBuf>, mechanism: PointerMechanism) -> Self {
        Self {
            path: path.into(),
            mechanism,
        }
    }

    /// The pointer at its default root-level location.
    pub fn at_default_location(root: &InstallRoot, mechanism: PointerMechanism) -> Self {
        Self::new(
            root.path().join(mechanism.default_pointer_name()),
            mechanism,
        )
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Resolve the pointer's current target directory.
    ///
    /// `Ok(None)` means no default is set. An entry of the wrong kind at
    /// the pointer path is a `PointerKindMismatch`, never overwritten.
    pub fn target(&self) -> Result<Option<PathBuf>> {
        match self.mechanism {
            PointerMechanism::Symlink => read_symlink_target(&self.path),
            PointerMechanism::Stub => read_stub_target(&self.path),
        }
    }

    /// Point at `target` unconditionally, storing its absolute form.
    ///
    /// An entry of the wrong kind at the pointer path still surfaces as
    /// `PointerKindMismatch` before anything is written. A relative
    /// `target` is resolved against the current directory first; written
    /// as-is the OS would resolve it against the pointer's parent.
    pub fn set_target(&self, target: &Path) -> Result<()> {
        self.target()?;
        let target = absolute_path(target)?;

        match self.mechanism {
            PointerMechanism::Symlink => replace_symlink(&self.path, &target)?,
            PointerMechanism::Stub => {
                let bytes = StubTemplate::builtin().render(&target)?;
                std::fs::write(&self.path, bytes)
                    .map_err(|e| Error::io("failed to write stub pointer", &self.path, e))?;
            }
        }

        debug!(
            "Default pointer {} -> {}",
            self.path.display(),
            target.display()
        );
        Ok(())
    }

    /// Point at `target`, returning whether a write occurred.
    ///
    /// Idempotent: the existing pointer is resolved first and left
    /// untouched when it already points at `target`.
    pub fn update(&self, target: &Path) -> Result<bool> {
        let target = absolute_path(target)?;
        if let Some(current) = self.target()? {
            if current == target {
                debug!("Default pointer already at {}", target.display());
                return Ok(false);
            }
        }

        self.set_target(&target)?;
        Ok(true)
    }

    /// The managed version the pointer targets, if any.
    ///
    /// Returns the version name when the target is `<root>/<version>/files`;
    /// a pointer activated from an arbitrary path yields `None`.
    pub fn default_version(&self, root: &InstallRoot) -> Result<Option<String>> {
        let target = match self.target()? {
            Some(target) => target,
            None => return Ok(None),
        };

        if target.file_name() != Some(OsStr::new(store::FILES_DIR)) {
            return Ok(None);
        }
        let version_dir = match target.parent() {
            Some(dir) => dir,
            None => return Ok(None),
        };
        let root_path = absolute_path(root.path())?;
        if version_dir.parent() != Some(root_path.as_path()) {
            return Ok(None);
        }
        Ok(version_dir
            .file_name()
            .and_then(|n| n.to_str())
            .map(String::from))
    }
}

/// Activate a default pointing at an arbitrary filesystem location.
///
/// Without `force`, `path` is searched recursively for the compiler
/// executable and its containing directory becomes the target; with
/// `force` the absolute form of `path` itself is used, unsearched. No
/// `files/` nesting is assumed either way. Returns the chosen target.
pub fn set_default_from_path(
    pointer: &DefaultPointer,
    path: &Path,
    force: bool,
) -> Result<PathBuf> {
    let base = absolute_path(path)?;
    let target = if force {
        base
    } else {
        match store::find_compiler_under(&base)? {
            Some(exe) => exe.parent().unwrap_or(&base).to_path_buf(),
            None => {
                return Err(Error::CompilerNotFound {
                    exe: platform::compiler_exe_name(),
                    dir: base,
                })
            }
        }
    };

    pointer.update(&target)?;
    Ok(target)
}

/// The alias recording which version currently satisfies `master`.
///
/// Differs from the default pointer in target (the version directory,
/// not `files/`) and in that it is written only as a side effect of a
/// successful master fetch.
#[derive(Debug, Clone)]
pub struct MasterPointer {
    root: PathBuf,
    mechanism: PointerMechanism,
}

impl MasterPointer {
    pub fn new(root: &InstallRoot, mechanism: PointerMechanism) -> Self {
        Self {
            root: root.path().to_path_buf(),
            mechanism,
        }
    }

    pub fn path(&self) -> PathBuf {
        self.root.join(store::MASTER_ALIAS)
    }

    /// The version name the alias currently resolves to.
    pub fn target_version(&self) -> Result<Option<String>> {
        match self.mechanism {
            PointerMechanism::Symlink => {
                let target = read_symlink_target(&self.path())?;
                Ok(target
                    .and_then(|t| t.file_name().and_then(|n| n.to_str()).map(String::from)))
            }
            PointerMechanism::Stub => read_alias_file(&self.path()),
        }
    }

    /// Record `version` as the current master, returning whether a write
    /// occurred. Idempotent like the default pointer.
    pub fn update(&self, version: &str) -> Result<bool> {
        let path = self.path();
        match self.mechanism {
            PointerMechanism::Symlink => {
                let target = absolute_path(&self.root.join(version))?;
                if let Some(current) = read_symlink_target(&path)? {
                    if current == target {
                        return Ok(false);
                    }
                }
                replace_symlink(&path, &target)?;
            }
            PointerMechanism::Stub => {
                if read_alias_file(&path)?.as_deref() == Some(version) {
                    return Ok(false);
                }
                std::fs::write(&path, version)
                    .map_err(|e| Error::io("failed to write master alias", &path, e))?;
            }
        }
        debug!("Master alias -> {}", version);
        Ok(true)
    }
}

fn absolute_path(path: &Path) -> Result<PathBuf> {
    if path.is_absolute() {
        return Ok(path.to_path_buf());
    }
    let cwd = std::env::current_dir()
        .map_err(|e| Error::io("failed to resolve current directory", path, e))?;
    Ok(cwd.join(path))
}

fn read_symlink_target(path: &Path) -> Result<Option<PathBuf>> {
    let meta = match std::fs::symlink_metadata(path) {
        Err(e) if e.kind() == ErrorKind::NotFound => return Ok(None),
        Err(e) => return Err(Error::io("failed to stat pointer", path, e)),
        Ok(meta) => meta,
    };
    if !meta.file_type().is_symlink() {
        return Err(Error::PointerKindMismatch {
            path: path.to_path_buf(),
            expected: "symbolic link",
        });
    }
    let target =
        std::fs::read_link(path).map_err(|e| Error::io("failed to read pointer", path, e))?;
    Ok(Some(target))
}

fn read_stub_target(path: &Path) -> Result<Option<PathBuf>> {
    let bytes = match std::fs::read(path) {
        Err(e) if e.kind() == ErrorKind::NotFound => return Ok(None),
        Err(e) => return Err(Error::io("failed to read pointer", path, e)),
        Ok(bytes) => bytes,
    };
    match StubTemplate::builtin().extract_target(&bytes) {
        Some(target) => Ok(Some(target)),
        None => Err(Error::PointerKindMismatch {
            path: path.to_path_buf(),
            expected: "zup stub executable",
        }),
    }
}

fn read_alias_file(path: &Path) -> Result<Option<String>> {
    match std::fs::symlink_metadata(path) {
        Err(e) if e.kind() == ErrorKind::NotFound => return Ok(None),
        Err(e) => return Err(Error::io("failed to stat master alias", path, e)),
        Ok(meta) if !meta.is_file() => {
            return Err(Error::PointerKindMismatch {
                path: path.to_path_buf(),
                expected: "master alias file",
            })
        }
        Ok(_) => {}
    }
    let contents = std::fs::read_to_string(path)
        .map_err(|e| Error::io("failed to read master alias", path, e))?;
    let version = contents.trim();
    if version.is_empty() {
        Ok(None)
    } else {
        Ok(Some(version.to_string()))
    }
}

fn replace_symlink(link: &Path, target: &Path) -> Result<()> {
    if std::fs::symlink_metadata(link).is_ok() {
        std::fs::remove_file(link)
            .map_err(|e| Error::io("failed to unlink pointer", link, e))?;
    }
    create_symlink(target, link)
}

fn create_symlink(original: &Path, link: &Path) -> Result<()> {
    #[cfg(unix)]
    let created = std::os::unix::fs::symlink(original, link);
    #[cfg(windows)]
    let created = std::os::windows::fs::symlink_dir(original, link);
    created.map_err(|e| Error::io("failed to create pointer link", link, e))
}
