//! Error types for zup.

use std::path::PathBuf;

/// Result type alias using zup Error.
pub type Result<T> = std::result::Result<T, Error>;

/// A fix suggestion for an error.
#[derive(Debug, Clone)]
pub struct Fix {
    /// Description of what this fix does
    pub description: String,
    /// Command to run, if applicable
    pub command: Option<String>,
}

impl Fix {
    /// Create a fix with just a description.
    pub fn new(description: impl Into<String>) -> Self {
        Self {
            description: description.into(),
            command: None,
        }
    }

    /// Create a fix with a command.
    pub fn with_command(description: impl Into<String>, command: impl Into<String>) -> Self {
        Self {
            description: description.into(),
            command: Some(command.into()),
        }
    }
}

/// Structured error type for zup.
///
/// Engine operations are all-or-nothing: recoverable failures (a dead
/// download, a bad archive) are undone locally before one of these is
/// returned, everything else carries the underlying cause verbatim.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("download failed: {url}: {reason}")]
    Download {
        url: String,
        reason: String,
        #[source]
        source: Option<Box<dyn std::error::Error + Send + Sync>>,
    },

    #[error("unsupported archive extension: {name}")]
    UnsupportedArchive { name: String },

    #[error("refusing to remove '{name}' ({reason})")]
    Protected { name: String, reason: String },

    #[error("compiler '{name}' is not installed")]
    NotInstalled { name: String, fixes: Vec<Fix> },

    #[error("{} exists but is not a {expected}", path.display())]
    PointerKindMismatch { path: PathBuf, expected: &'static str },

    #[error("target path exceeds the {limit}-byte stub budget: {}", path.display())]
    PathTooLong { path: PathBuf, limit: usize },

    #[error("archive did not contain a single top-level directory: {}", path.display())]
    ArchiveLayout { path: PathBuf },

    #[error("download index at {url}: missing or malformed '{field}'")]
    MalformedIndex { url: String, field: String },

    #[error("no {exe} executable found under {}", dir.display())]
    CompilerNotFound { exe: &'static str, dir: PathBuf },

    #[error("configuration error: {message}")]
    Config {
        message: String,
        path: Option<PathBuf>,
    },

    #[error("{message}")]
    Io {
        message: String,
        path: Option<PathBuf>,
        #[source]
        source: std::io::Error,
    },
}

impl Error {
    /// Create an I/O error with a message and the affected path.
    pub fn io(message: impl Into<String>, path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Error::Io {
            message: message.into(),
            path: Some(path.into()),
            source,
        }
    }

    /// Create a download error from a transport-layer cause.
    pub fn download(
        url: impl Into<String>,
        reason: impl Into<String>,
        source: Option<Box<dyn std::error::Error + Send + Sync>>,
    ) -> Self {
        Error::Download {
            url: url.into(),
            reason: reason.into(),
            source,
        }
    }

    /// Create a not-installed error carrying the standard fetch suggestion.
    pub fn not_installed(name: impl Into<String>) -> Self {
        let name = name.into();
        let fixes = vec![Fix::with_command(
            "Fetch it first",
            format!("zup fetch {name}"),
        )];
        Error::NotInstalled { name, fixes }
    }

    /// Create a config error.
    pub fn config(message: impl Into<String>) -> Self {
        Error::Config {
            message: message.into(),
            path: None,
        }
    }

    /// Get suggested fixes for this error.
    pub fn fixes(&self) -> &[Fix] {
        match self {
            Error::NotInstalled { fixes, .. } => fixes,
            _ => &[],
        }
    }

    /// Map this error to a process exit code.
    pub fn exit_code(&self) -> crate::ExitCode {
        match self {
            Error::Download { .. } | Error::MalformedIndex { .. } => crate::ExitCode::NetworkError,
            Error::Protected { .. } => crate::ExitCode::CleanupRefused,
            Error::Config { .. } => crate::ExitCode::ConfigError,
            _ => crate::ExitCode::GeneralError,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_not_installed_carries_fetch_fix() {
        let err = Error::not_installed("0.11.0");
        let fixes = err.fixes();
        assert_eq!(fixes.len(), 1);
        assert_eq!(fixes[0].command.as_deref(), Some("zup fetch 0.11.0"));
    }

    #[test]
    fn test_exit_codes() {
        let err = Error::download("http://x", "connect refused", None);
        assert_eq!(err.exit_code(), crate::ExitCode::NetworkError);

        let err = Error::Protected {
            name: "0.11.0".into(),
            reason: "is default compiler".into(),
        };
        assert_eq!(err.exit_code(), crate::ExitCode::CleanupRefused);
    }

    #[test]
    fn test_display_messages() {
        let err = Error::UnsupportedArchive {
            name: "zig-linux-x86_64-0.11.0.rar".into(),
        };
        assert_eq!(
            err.to_string(),
            "unsupported archive extension: zig-linux-x86_64-0.11.0.rar"
        );

        let err = Error::Protected {
            name: "0.11.0".into(),
            reason: "has keep file".into(),
        };
        assert_eq!(err.to_string(), "refusing to remove '0.11.0' (has keep file)");
    }
}
