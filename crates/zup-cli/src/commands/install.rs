//! Install command: fetch a compiler and make it the default.

use std::time::Instant;

use anyhow::Result;
use zup_engine::{InstallOptions, Platform};
use zup_ui::Output;

use super::{fail, Context};

pub async fn run(ctx: &Context, version: &str, output: &Output) -> Result<i32> {
    let started = Instant::now();

    let index = match ctx.index_client() {
        Ok(index) => index,
        Err(e) => return fail(output, &e),
    };
    let options = InstallOptions {
        show_progress: output.progress_enabled(),
        ..Default::default()
    };

    output.status("Fetching", &format!("zig {}", version));
    let outcome = match zup_engine::fetch(
        &ctx.root,
        ctx.mechanism,
        &index,
        Platform::host(),
        version,
        &options,
    )
    .await
    {
        Ok(outcome) => outcome,
        Err(e) => return fail(output, &e),
    };

    if outcome.was_installed {
        output.info(&format!("zig {} is already installed", outcome.version));
    }

    let pointer = ctx.default_pointer();
    if let Err(e) = ctx.ensure_pointer_parent(&pointer) {
        return fail(output, &e);
    }
    let files = ctx.root.files_dir(&outcome.version);
    if let Err(e) = pointer.update(&files) {
        return fail(output, &e);
    }

    output.success_summary(
        &format!("zig {} is now the default", outcome.version),
        started.elapsed(),
    );
    Ok(0)
}
