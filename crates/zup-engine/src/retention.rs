//! Retention policy and cleanup.
//!
//! A version is protected from deletion when it is the current default,
//! the current master target, or carries a keep marker. Everything else
//! is fair game for `clean`. Pointer state is read fresh at the start of
//! each operation; nothing is cached.

use crate::pointer::{DefaultPointer, MasterPointer};
use crate::store::{self, InstallRoot};
use std::fs::File;
use tracing::{debug, info};
use zup_core::error::{Error, Result};

/// Why a version is exempt from cleanup. Reasons are user-facing and
/// reported verbatim.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ProtectReason {
    /// The version the default pointer targets.
    Default,
    /// The version the master alias targets.
    Master,
    /// The version directory contains a keep marker.
    Keep,
}

impl std::fmt::Display for ProtectReason {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Default => write!(f, "is default compiler"),
            Self::Master => write!(f, "it is master"),
            Self::Keep => write!(f, "has keep file"),
        }
    }
}

/// Report of a bulk cleanup run.
#[derive(Debug, Default)]
pub struct CleanReport {
    /// Entries that were deleted.
    pub removed: Vec<String>,
    /// Versions that were kept, with the protecting reason.
    pub kept: Vec<(String, ProtectReason)>,
}

/// Decide whether `name` is protected, given current pointer state.
pub fn is_protected(
    root: &InstallRoot,
    name: &str,
    default_version: Option<&str>,
    master_version: Option<&str>,
) -> Option<ProtectReason> {
    if default_version == Some(name) {
        return Some(ProtectReason::Default);
    }
    if master_version == Some(name) {
        return Some(ProtectReason::Master);
    }
    if root.keep_marker(name).exists() {
        return Some(ProtectReason::Keep);
    }
    None
}

/// Create the keep marker for an installed version.
pub fn keep(root: &InstallRoot, name: &str) -> Result<()> {
    if !root.is_installed(name) {
        return Err(Error::not_installed(name));
    }
    let marker = root.keep_marker(name);
    File::create(&marker).map_err(|e| Error::io("failed to create keep marker", &marker, e))?;
    info!("Created keep marker for {}", name);
    Ok(())
}

/// Delete one version, refusing if it is protected.
pub fn clean_one(
    root: &InstallRoot,
    default_pointer: &DefaultPointer,
    master: &MasterPointer,
    name: &str,
) -> Result<()> {
    if !root.is_installed(name) {
        return Err(Error::not_installed(name));
    }

    let default_version = default_pointer.default_version(root)?;
    let master_version = master.target_version()?;
    if let Some(reason) = is_protected(
        root,
        name,
        default_version.as_deref(),
        master_version.as_deref(),
    ) {
        return Err(Error::Protected {
            name: name.to_string(),
            reason: reason.to_string(),
        });
    }

    let dir = root.version_dir(name);
    info!("Deleting {}", dir.display());
    std::fs::remove_dir_all(&dir).map_err(|e| Error::io("failed to delete version", &dir, e))?;
    Ok(())
}

/// Delete every unprotected version directory under the root.
///
/// Non-directories (the master alias, a stub pointer) are skipped by
/// construction. Orphaned staging directories are collected as ordinary
/// unprotected entries. The first deletion failure aborts the loop and
/// surfaces the filesystem error.
pub fn clean_all(
    root: &InstallRoot,
    default_pointer: &DefaultPointer,
    master: &MasterPointer,
) -> Result<CleanReport> {
    let mut report = CleanReport::default();
    if !root.path().exists() {
        return Ok(report);
    }

    let default_version = default_pointer.default_version(root)?;
    let master_version = master.target_version()?;

    let entries = std::fs::read_dir(root.path())
        .map_err(|e| Error::io("failed to read install root", root.path(), e))?;
    for entry in entries {
        let entry =
            entry.map_err(|e| Error::io("failed to read install root", root.path(), e))?;
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

        if name.ends_with(store::STAGING_SUFFIX) {
            debug!("Collecting stale staging: {}", name);
            std::fs::remove_dir_all(entry.path())
                .map_err(|e| Error::io("failed to delete stale staging", entry.path(), e))?;
            report.removed.push(name);
            continue;
        }

        match is_protected(
            root,
            &name,
            default_version.as_deref(),
            master_version.as_deref(),
        ) {
            Some(reason) => {
                info!("Keeping {} ({})", name, reason);
                report.kept.push((name, reason));
            }
            None => {
                info!("Deleting {}", name);
                std::fs::remove_dir_all(entry.path())
                    .map_err(|e| Error::io("failed to delete version", entry.path(), e))?;
                report.removed.push(name);
            }
        }
    }

    report.removed.sort();
    report.kept.sort_by(|a, b| a.0.cmp(&b.0));
    Ok(report)
}
