//! CLI argument parsing.

use clap::{Args, Parser, Subcommand};
use clap_complete::Shell;
use std::path::PathBuf;
use zup_core::EnvVars;

use crate::styles::STYLES;

/// zup - Zig compiler version manager
#[derive(Parser, Debug)]
#[command(name = "zup")]
#[command(author, version, about = "Download and manage zig compilers")]
#[command(long_about = None)]
#[command(propagate_version = true)]
#[command(styles = STYLES)]
#[command(after_help = "Use `zup help <command>` for more information about a command.")]
pub struct Cli {
    #[command(flatten)]
    pub global: GlobalArgs,

    #[command(subcommand)]
    pub command: Option<Commands>,
}

/// Global arguments available to all commands.
#[derive(Args, Debug)]
pub struct GlobalArgs {
    /// Directory holding installed compiler versions
    #[arg(long, global = true, env = EnvVars::ZUP_INSTALL_DIR)]
    pub install_dir: Option<PathBuf>,

    /// Location of the default-compiler pointer
    #[arg(long, global = true, env = EnvVars::ZUP_PATH_LINK)]
    pub path_link: Option<PathBuf>,

    /// Override the download index URL
    #[arg(long, global = true, env = EnvVars::ZUP_INDEX_URL)]
    pub index_url: Option<String>,

    /// Path to configuration file
    #[arg(long, global = true, env = EnvVars::ZUP_CONFIG_FILE)]
    pub config_file: Option<PathBuf>,

    /// Enable verbose output
    #[arg(short, long, global = true, env = EnvVars::ZUP_VERBOSE)]
    pub verbose: bool,

    /// Suppress status output
    #[arg(short, long, global = true, env = EnvVars::ZUP_QUIET)]
    pub quiet: bool,

    /// Disable colored output
    #[arg(long, global = true, env = EnvVars::ZUP_NO_COLOR)]
    pub no_color: bool,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Download a compiler version and make it the default
    // The positional `version` id collides with the --version flag that
    // `propagate_version` would auto-generate, so suppress the flag here
    // (and on the other subcommands taking a `version` positional).
    #[command(disable_version_flag = true)]
    Install {
        /// Version to install, or `master` for the latest dev build
        version: String,
    },

    /// Download a compiler version without changing the default
    #[command(disable_version_flag = true)]
    Fetch {
        /// Version to fetch, or `master` for the latest dev build
        version: String,
    },

    /// Print or change the default compiler
    Default {
        /// Installed version name, `master`, or a path to activate from
        target: Option<String>,

        /// Use a path argument as-is, without searching it for the executable
        #[arg(long)]
        force: bool,
    },

    /// Show installed compiler versions
    List,

    /// Protect a version from `zup clean`
    #[command(disable_version_flag = true)]
    Keep {
        /// Installed version name
        version: String,
    },

    /// Delete one version, or every unprotected version
    #[command(disable_version_flag = true)]
    Clean {
        /// Installed version name (omit to clean everything unprotected)
        version: Option<String>,
    },

    /// Run an installed compiler, forwarding its exit status
    #[command(disable_version_flag = true)]
    Run {
        /// Installed version name or `master`
        version: String,

        /// Arguments to pass to the compiler
        #[arg(trailing_var_arg = true, allow_hyphen_values = true)]
        args: Vec<String>,
    },

    /// Fetch and print the download index
    Index,

    /// Print the effective install root
    Root,

    /// Generate shell completions
    Completions {
        /// Shell to generate completions for
        #[arg(value_enum)]
        shell: Shell,
    },
}
