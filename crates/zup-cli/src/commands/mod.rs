//! Command implementations.

mod clean;
mod completions;
mod default;
mod fetch;
mod index;
mod install;
mod keep;
mod list;
mod root;
mod run;

use anyhow::Result;
use zup_config::{GlobalConfig, Settings};
use zup_engine::{
    DefaultPointer, IndexClient, InstallRoot, MasterPointer, PointerMechanism, DEFAULT_INDEX_URL,
};
use zup_ui::{apply_color_choice, Output, Verbosity};

use crate::cli::{Cli, Commands, GlobalArgs};

/// Timeout for download-index requests.
const INDEX_TIMEOUT_SECS: u64 = 30;

/// Resolved settings plus the handles every command builds from them.
pub(crate) struct Context {
    pub settings: Settings,
    pub root: InstallRoot,
    pub mechanism: PointerMechanism,
}

impl Context {
    fn new(global: &GlobalArgs) -> zup_core::Result<Self> {
        let overrides = GlobalConfig {
            install_dir: global.install_dir.clone(),
            path_link: global.path_link.clone(),
            index_url: global.index_url.clone(),
        };
        let settings = Settings::resolve(overrides, global.config_file.as_deref())?;
        let root = InstallRoot::new(&settings.install_dir);

        Ok(Self {
            settings,
            root,
            mechanism: PointerMechanism::for_host(),
        })
    }

    /// The default-compiler pointer, honoring a `--path-link` override.
    pub fn default_pointer(&self) -> DefaultPointer {
        match &self.settings.path_link {
            Some(path) => DefaultPointer::new(path, self.mechanism),
            None => DefaultPointer::at_default_location(&self.root, self.mechanism),
        }
    }

    /// The master alias for this install root.
    pub fn master_pointer(&self) -> MasterPointer {
        MasterPointer::new(&self.root, self.mechanism)
    }

    /// A download-index client, honoring an `--index-url` override.
    pub fn index_client(&self) -> zup_core::Result<IndexClient> {
        let url = self
            .settings
            .index_url
            .as_deref()
            .unwrap_or(DEFAULT_INDEX_URL);
        IndexClient::new(url, INDEX_TIMEOUT_SECS)
    }

    /// Make sure the directory holding the default pointer exists.
    pub fn ensure_pointer_parent(&self, pointer: &DefaultPointer) -> zup_core::Result<()> {
        match pointer.path().parent() {
            Some(parent) => zup_config::ensure_dir(&parent.to_path_buf()),
            None => Ok(()),
        }
    }
}

/// Print a structured error and map it to the process exit code.
pub(crate) fn fail(output: &Output, error: &zup_core::Error) -> Result<i32> {
    output.print_error(error);
    Ok(error.exit_code().into())
}

/// Run the CLI command.
pub async fn run(cli: Cli) -> Result<i32> {
    apply_color_choice(cli.global.no_color);

    // Create output handler from global args
    let output =
        Output::with_verbosity(Verbosity::from_flags(cli.global.quiet, cli.global.verbose));

    let command = match cli.command {
        Some(command) => command,
        None => {
            // No command - show help
            use clap::CommandFactory;
            Cli::command().print_help()?;
            println!();
            return Ok(0);
        }
    };

    let ctx = match Context::new(&cli.global) {
        Ok(ctx) => ctx,
        Err(e) => return fail(&output, &e),
    };

    match command {
        Commands::Install { version } => install::run(&ctx, &version, &output).await,
        Commands::Fetch { version } => fetch::run(&ctx, &version, &output).await,
        Commands::Default { target, force } => {
            default::run(&ctx, target.as_deref(), force, &output)
        }
        Commands::List => list::run(&ctx, &output),
        Commands::Keep { version } => keep::run(&ctx, &version, &output),
        Commands::Clean { version } => clean::run(&ctx, version.as_deref(), &output),
        Commands::Run { version, args } => run::run(&ctx, &version, &args, &output),
        Commands::Index => index::run(&ctx, &output).await,
        Commands::Root => root::run(&ctx),
        Commands::Completions { shell } => completions::run(shell),
    }
}
