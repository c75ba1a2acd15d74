//! Atomic download + extract + publish of one compiler version.
//!
//! An install works entirely inside `<root>/<version>.installing` and
//! becomes visible through a single directory rename at the end. The
//! canonical directory's existence is the commit signal: a crash at any
//! earlier point leaves at most an orphaned staging directory, which the
//! next attempt for that version purges before starting over.

use crate::extract;
use crate::index::IndexClient;
use crate::platform::Platform;
use crate::pointer::{MasterPointer, PointerMechanism};
use crate::store::{self, InstallRoot};
use crate::version;
use futures_util::StreamExt;
use std::fs::File;
use std::io::Write;
use std::path::{Path, PathBuf};
use std::time::Duration;
use tracing::{debug, info};
use zup_core::error::{Error, Result};
use zup_telemetry::TimingGuard;
use zup_ui::{Progress, Spinner};

/// Options threaded through an install run.
#[derive(Debug, Clone)]
pub struct InstallOptions {
    /// HTTP timeout in seconds.
    pub timeout: u64,
    /// Whether to draw download/extract progress.
    pub show_progress: bool,
}

impl Default for InstallOptions {
    fn default() -> Self {
        Self {
            timeout: 300, // 5 minutes for large archives
            show_progress: true,
        }
    }
}

/// Result of an install.
#[derive(Debug)]
pub struct InstallOutcome {
    /// The concrete version that was installed.
    pub version: String,
    /// Canonical version directory.
    pub dir: PathBuf,
    /// Whether the version was already present (no network access).
    pub was_installed: bool,
}

/// Removes the staging directory on drop unless the install published.
struct StagingGuard {
    path: PathBuf,
    armed: bool,
}

impl StagingGuard {
    fn new(path: PathBuf) -> Self {
        Self { path, armed: true }
    }

    fn defuse(mut self) {
        self.armed = false;
    }
}

impl Drop for StagingGuard {
    fn drop(&mut self) {
        if self.armed {
            debug!("Cleaning up staging: {}", self.path.display());
            let _ = std::fs::remove_dir_all(&self.path);
        }
    }
}

/// Install `version` from `url` into the root.
///
/// Idempotent: when the canonical directory already exists this returns
/// success immediately, touching neither the network nor the disk.
pub async fn install(
    root: &InstallRoot,
    version: &str,
    url: &str,
    options: &InstallOptions,
) -> Result<InstallOutcome> {
    let canonical = root.version_dir(version);
    if canonical.is_dir() {
        debug!("zig {} is already installed", version);
        return Ok(InstallOutcome {
            version: version.to_string(),
            dir: canonical,
            was_installed: true,
        });
    }

    root.ensure_exists()?;

    // Purge any staging left by a crashed earlier attempt.
    let staging = root.staging_dir(version);
    if staging.exists() {
        debug!("Removing stale staging: {}", staging.display());
        std::fs::remove_dir_all(&staging)
            .map_err(|e| Error::io("failed to remove stale staging directory", &staging, e))?;
    }
    std::fs::create_dir_all(&staging)
        .map_err(|e| Error::io("failed to create staging directory", &staging, e))?;
    let guard = StagingGuard::new(staging.clone());

    let archive_name = url.rsplit('/').next().unwrap_or("download");
    let archive_path = staging.join(archive_name);
    download_archive(url, &archive_path, version, options).await?;

    {
        let _timing = TimingGuard::new(format!("extract {version}"));
        let spinner = if options.show_progress {
            Some(Spinner::new(format!("Extracting zig {version}...")))
        } else {
            None
        };
        match extract::extract_archive(&archive_path, &staging) {
            Ok(()) => {
                if let Some(spinner) = spinner {
                    spinner.finish_clear();
                }
            }
            Err(e) => {
                if let Some(spinner) = spinner {
                    spinner.finish_error(format!("Failed to extract zig {version}"));
                }
                return Err(e);
            }
        }
    }

    // Normalize the layout: whatever the archive called its top-level
    // directory becomes `files/`.
    let top = locate_extracted_dir(&staging, &archive_path)?;
    let files = staging.join(store::FILES_DIR);
    std::fs::rename(&top, &files)
        .map_err(|e| Error::io("failed to normalize archive layout", &top, e))?;

    std::fs::remove_file(&archive_path)
        .map_err(|e| Error::io("failed to remove downloaded archive", &archive_path, e))?;

    // The publish point: one rename makes the version fully visible.
    std::fs::rename(&staging, &canonical)
        .map_err(|e| Error::io("failed to publish installed version", &staging, e))?;
    guard.defuse();

    info!("Installed zig {}", version);
    Ok(InstallOutcome {
        version: version.to_string(),
        dir: canonical,
        was_installed: false,
    })
}

/// Fetch a version token, resolving `master` through the download index.
///
/// A successful master fetch records the resolved version in the master
/// alias, even when the install itself was a cached no-op.
pub async fn fetch(
    root: &InstallRoot,
    mechanism: PointerMechanism,
    index: &IndexClient,
    platform: Platform,
    token: &str,
    options: &InstallOptions,
) -> Result<InstallOutcome> {
    if token == version::MASTER {
        let resolved = index.resolve_master(platform).await?;
        info!("master is {}", resolved.version);
        let outcome = install(root, &resolved.version, &resolved.tarball_url, options).await?;
        MasterPointer::new(root, mechanism).update(&outcome.version)?;
        Ok(outcome)
    } else {
        let url = version::download_url(token, platform);
        install(root, token, &url, options).await
    }
}

/// Stream the archive at `url` into `dest` in bounded chunks.
async fn download_archive(
    url: &str,
    dest: &Path,
    version: &str,
    options: &InstallOptions,
) -> Result<()> {
    let client = reqwest::Client::builder()
        .timeout(Duration::from_secs(options.timeout))
        .build()
        .map_err(|e| Error::config(format!("failed to create HTTP client: {e}")))?;

    debug!("Downloading from {}", url);
    let response = client
        .get(url)
        .send()
        .await
        .map_err(|e| Error::download(url, "request failed", Some(Box::new(e))))?;

    let status = response.status();
    if !status.is_success() {
        return Err(Error::download(url, format!("HTTP {status}"), None));
    }

    let total_size = response.content_length().unwrap_or(0);
    let progress = if options.show_progress && total_size > 0 {
        Some(Progress::new(
            total_size,
            format!("Downloading zig {version}"),
        ))
    } else {
        None
    };

    let mut file =
        File::create(dest).map_err(|e| Error::io("failed to create download file", dest, e))?;

    let mut stream = response.bytes_stream();
    let mut downloaded: u64 = 0;
    while let Some(chunk) = stream.next().await {
        let chunk =
            chunk.map_err(|e| Error::download(url, "download interrupted", Some(Box::new(e))))?;
        file.write_all(&chunk)
            .map_err(|e| Error::io("failed to write download data", dest, e))?;
        downloaded += chunk.len() as u64;
        if let Some(ref progress) = progress {
            progress.set_position(downloaded);
        }
    }

    if let Some(progress) = progress {
        progress.finish(format!(
            "Downloaded zig {} ({:.1} MB)",
            version,
            downloaded as f64 / 1_000_000.0
        ));
    }
    Ok(())
}

/// Find the single directory the extractor produced inside staging.
fn locate_extracted_dir(staging: &Path, archive_path: &Path) -> Result<PathBuf> {
    let entries = std::fs::read_dir(staging)
        .map_err(|e| Error::io("failed to read staging directory", staging, e))?;

    let mut dirs = Vec::new();
    for entry in entries {
        let entry =
            entry.map_err(|e| Error::io("failed to read staging directory", staging, e))?;
        let file_type = entry
            .file_type()
            .map_err(|e| Error::io("failed to stat staging entry", entry.path(), e))?;
        if file_type.is_dir() {
            dirs.push(entry.path());
        }
    }

    match dirs.as_slice() {
        [single] => Ok(single.clone()),
        _ => Err(Error::ArchiveLayout {
            path: archive_path.to_path_buf(),
        }),
    }
}
