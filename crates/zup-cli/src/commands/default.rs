//! Default command: print or change the default compiler.

use std::path::Path;

use anyhow::Result;
use zup_core::Error;
use zup_engine::{set_default_from_path, MASTER};
use zup_ui::Output;

use super::{fail, Context};

pub fn run(ctx: &Context, target: Option<&str>, force: bool, output: &Output) -> Result<i32> {
    match target {
        Some(target) => set(ctx, target, force, output),
        None => show(ctx, output),
    }
}

/// Print the current default: the version name when the pointer targets an
/// installed version, otherwise the raw target path.
fn show(ctx: &Context, output: &Output) -> Result<i32> {
    let pointer = ctx.default_pointer();
    match pointer.default_version(&ctx.root) {
        Ok(Some(version)) => {
            println!("{}", version);
            Ok(0)
        }
        Ok(None) => match pointer.target() {
            Ok(Some(path)) => {
                println!("{}", path.display());
                Ok(0)
            }
            Ok(None) => {
                output.info("no default compiler set");
                Ok(0)
            }
            Err(e) => fail(output, &e),
        },
        Err(e) => fail(output, &e),
    }
}

fn set(ctx: &Context, target: &str, force: bool, output: &Output) -> Result<i32> {
    let pointer = ctx.default_pointer();

    // `master` means whatever the alias currently resolves to.
    let name = if target == MASTER {
        match ctx.master_pointer().target_version() {
            Ok(Some(version)) => Some(version),
            Ok(None) => return fail(output, &Error::not_installed(MASTER)),
            Err(e) => return fail(output, &e),
        }
    } else if ctx.root.is_installed(target) {
        Some(target.to_string())
    } else {
        None
    };

    if let Some(name) = name {
        if !ctx.root.is_installed(&name) {
            return fail(output, &Error::not_installed(name.as_str()));
        }
        if let Err(e) = ctx.ensure_pointer_parent(&pointer) {
            return fail(output, &e);
        }
        let files = ctx.root.files_dir(&name);
        if let Err(e) = pointer.update(&files) {
            return fail(output, &e);
        }
        output.status("Default", &format!("zig {}", name));
        return Ok(0);
    }

    // Not an installed version; treat the argument as a path to activate.
    let path = Path::new(target);
    if !path.exists() {
        return fail(output, &Error::not_installed(target));
    }
    if let Err(e) = ctx.ensure_pointer_parent(&pointer) {
        return fail(output, &e);
    }
    match set_default_from_path(&pointer, path, force) {
        Ok(resolved) => {
            output.status("Default", &resolved.display().to_string());
            Ok(0)
        }
        Err(e) => fail(output, &e),
    }
}
