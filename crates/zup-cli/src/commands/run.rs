//! Run command: execute an installed compiler, forwarding its exit status.

use std::process::Command;

use anyhow::Result;
use zup_core::Error;
use zup_engine::MASTER;
use zup_ui::Output;

use super::{fail, Context};

pub fn run(ctx: &Context, version: &str, args: &[String], output: &Output) -> Result<i32> {
    // `master` means whatever the alias currently resolves to.
    let name = if version == MASTER {
        match ctx.master_pointer().target_version() {
            Ok(Some(resolved)) => resolved,
            Ok(None) => return fail(output, &Error::not_installed(MASTER)),
            Err(e) => return fail(output, &e),
        }
    } else {
        version.to_string()
    };

    let exe = ctx.root.compiler_path(&name);
    if !exe.is_file() {
        return fail(output, &Error::not_installed(name.as_str()));
    }

    output.verbose(&format!("running {}", exe.display()));
    let status = match Command::new(&exe).args(args).status() {
        Ok(status) => status,
        Err(e) => return fail(output, &Error::io("failed to run compiler", &exe, e)),
    };
    Ok(status.code().unwrap_or(1))
}
