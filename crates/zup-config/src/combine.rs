//! Configuration merging utilities.
//!
//! The `Combine` trait merges configuration from multiple sources:
//! CLI flags and environment variables sit above the config file, which
//! sits above platform defaults. `Option<T>`: first `Some` value wins.

use crate::GlobalConfig;

/// Trait for combining configuration values.
///
/// The convention is that `self` has higher precedence than `other`.
pub trait Combine {
    /// Combine two values, preferring values in `self`.
    #[must_use]
    fn combine(self, other: Self) -> Self;
}

impl<T> Combine for Option<T> {
    fn combine(self, other: Self) -> Self {
        self.or(other)
    }
}

impl Combine for GlobalConfig {
    fn combine(self, other: Self) -> Self {
        Self {
            install_dir: self.install_dir.combine(other.install_dir),
            path_link: self.path_link.combine(other.path_link),
            index_url: self.index_url.combine(other.index_url),
        }
    }
}
