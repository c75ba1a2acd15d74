//! Version lifecycle engine for zup.
//!
//! This crate handles:
//! - Classifying version strings and building download URLs
//! - Atomic install (download + extract + publish) into the install root
//! - The cross-platform default pointer and the master alias
//! - Retention policy and cleanup of installed versions

pub mod extract;
pub mod index;
pub mod install;
pub mod platform;
pub mod pointer;
pub mod retention;
pub mod store;
pub mod stub;
pub mod version;

pub use index::{IndexClient, MasterRelease, DEFAULT_INDEX_URL};
pub use install::{fetch, install, InstallOptions, InstallOutcome};
pub use platform::{Arch, Os, Platform};
pub use pointer::{set_default_from_path, DefaultPointer, MasterPointer, PointerMechanism};
pub use retention::{clean_all, clean_one, is_protected, keep, CleanReport, ProtectReason};
pub use store::{find_compiler_under, InstallRoot, InstalledVersion};
pub use version::{classify, download_url, VersionKind, MASTER};
