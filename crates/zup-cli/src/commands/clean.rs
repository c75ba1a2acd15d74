//! Clean command: delete one version or every unprotected one.

use anyhow::Result;
use zup_ui::Output;

use super::{fail, Context};

pub fn run(ctx: &Context, version: Option<&str>, output: &Output) -> Result<i32> {
    let pointer = ctx.default_pointer();
    let master = ctx.master_pointer();

    match version {
        Some(version) => match zup_engine::clean_one(&ctx.root, &pointer, &master, version) {
            Ok(()) => {
                output.status("Removed", &format!("zig {}", version));
                Ok(0)
            }
            Err(e) => fail(output, &e),
        },
        None => match zup_engine::clean_all(&ctx.root, &pointer, &master) {
            Ok(report) => {
                for name in &report.removed {
                    output.status("Removed", name);
                }
                for (name, reason) in &report.kept {
                    output.info(&format!("keeping {} ({})", name, reason));
                }
                if report.removed.is_empty() {
                    output.info("Nothing to clean");
                }
                Ok(0)
            }
            Err(e) => fail(output, &e),
        },
    }
}
