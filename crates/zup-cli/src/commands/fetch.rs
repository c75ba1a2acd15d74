//! Fetch command: download a compiler without touching the default.

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
    match zup_engine::fetch(
        &ctx.root,
        ctx.mechanism,
        &index,
        Platform::host(),
        version,
        &options,
    )
    .await
    {
        Ok(outcome) if outcome.was_installed => {
            output.info(&format!("zig {} is already installed", outcome.version));
            Ok(0)
        }
        Ok(outcome) => {
            output.success_summary(
                &format!("Fetched zig {}", outcome.version),
                started.elapsed(),
            );
            Ok(0)
        }
        Err(e) => fail(output, &e),
    }
}
