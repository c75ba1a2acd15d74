//! Version classification and download URL construction.
//!
//! Tagged releases and dev builds live at different paths on
//! ziglang.org, so every version string is classified before its URL is
//! built. The literal token `master` never reaches this module; it is
//! resolved to a concrete version through the download index first.

use crate::platform::Platform;

/// The version token resolved through the download index.
pub const MASTER: &str = "master";

/// Base URL for compiler downloads.
pub const DOWNLOAD_HOST: &str = "https://ziglang.org";

/// Whether a version string names a tagged release or a dev build.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum VersionKind {
    /// Tagged release such as `0.11.0`.
    Release,
    /// Dev build such as `0.12.0-dev.100+aaaa` (contains `-` or `+`).
    Dev,
}

/// Classify a version string.
pub fn classify(version: &str) -> VersionKind {
    if version.contains('-') || version.contains('+') {
        VersionKind::Dev
    } else {
        VersionKind::Release
    }
}

/// The archive file name published for a version and platform.
pub fn archive_file_name(version: &str, platform: Platform) -> String {
    format!(
        "zig-{}-{}.{}",
        platform.url_component(),
        version,
        platform.archive_ext()
    )
}

/// Construct the canonical download URL for a non-master version.
///
/// Total over its inputs: any version/platform pair yields a URL string;
/// whether the server has the artifact is the download step's problem.
pub fn download_url(version: &str, platform: Platform) -> String {
    let file = archive_file_name(version, platform);
    match classify(version) {
        VersionKind::Release => format!("{DOWNLOAD_HOST}/download/{version}/{file}"),
        VersionKind::Dev => format!("{DOWNLOAD_HOST}/builds/{file}"),
    }
}
