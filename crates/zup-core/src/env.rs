//! Environment variable constants for zup.
//!
//! Single source of truth for every environment variable zup recognizes.

/// Environment variable names used by zup.
pub struct EnvVars;

impl EnvVars {
    /// Directory holding installed compiler versions.
    pub const ZUP_INSTALL_DIR: &'static str = "ZUP_INSTALL_DIR";

    /// Location of the default-compiler pointer.
    pub const ZUP_PATH_LINK: &'static str = "ZUP_PATH_LINK";

    /// Override the download index URL.
    pub const ZUP_INDEX_URL: &'static str = "ZUP_INDEX_URL";

    /// Path to the zup configuration file.
    pub const ZUP_CONFIG_FILE: &'static str = "ZUP_CONFIG_FILE";

    /// Enable verbose output.
    pub const ZUP_VERBOSE: &'static str = "ZUP_VERBOSE";

    /// Suppress output.
    pub const ZUP_QUIET: &'static str = "ZUP_QUIET";

    /// Disable colored output.
    pub const ZUP_NO_COLOR: &'static str = "ZUP_NO_COLOR";

    /// Enable JSON log output.
    pub const ZUP_LOG_JSON: &'static str = "ZUP_LOG_JSON";

    /// Standard NO_COLOR environment variable.
    pub const NO_COLOR: &'static str = "NO_COLOR";

    /// Standard CLICOLOR environment variable.
    pub const CLICOLOR: &'static str = "CLICOLOR";
}

/// Check if colors should be disabled based on environment.
pub fn no_color() -> bool {
    std::env::var(EnvVars::NO_COLOR).is_ok()
        || std::env::var(EnvVars::ZUP_NO_COLOR).is_ok()
        || std::env::var(EnvVars::CLICOLOR)
            .map(|v| v == "0")
            .unwrap_or(false)
}
