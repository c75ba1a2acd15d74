//! Root command: print the effective install root.

use anyhow::Result;

use super::Context;

pub fn run(ctx: &Context) -> Result<i32> {
    println!("{}", ctx.root.path().display());
    Ok(0)
}
