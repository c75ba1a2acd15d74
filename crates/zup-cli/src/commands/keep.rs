//! Keep command: protect a version from `zup clean`.

use anyhow::Result;
use zup_ui::Output;

use super::{fail, Context};

pub fn run(ctx: &Context, version: &str, output: &Output) -> Result<i32> {
    match zup_engine::keep(&ctx.root, version) {
        Ok(()) => {
            output.status("Kept", &format!("zig {}", version));
            Ok(0)
        }
        Err(e) => fail(output, &e),
    }
}
