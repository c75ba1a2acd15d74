//! Core types for zup.
//!
//! This crate provides the shared error taxonomy, exit codes, and
//! environment-variable constants used across all zup crates.

pub mod env;
pub mod error;

pub use env::EnvVars;
pub use error::{Error, Fix, Result};

/// Exit codes for the zup CLI.
///
/// Engine code never terminates the process; it returns typed errors and the
/// CLI layer maps them to one of these.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[repr(u8)]
pub enum ExitCode {
    /// Success
    Success = 0,
    /// General error
    GeneralError = 1,
    /// Usage error (bad arguments)
    UsageError = 2,
    /// Configuration error
    ConfigError = 3,
    /// Download or index error
    NetworkError = 4,
    /// Cleanup refused a protected version
    CleanupRefused = 5,
}

impl From<ExitCode> for i32 {
    fn from(code: ExitCode) -> Self {
        code as i32
    }
}

impl From<ExitCode> for std::process::ExitCode {
    fn from(code: ExitCode) -> Self {
        std::process::ExitCode::from(code as u8)
    }
}
