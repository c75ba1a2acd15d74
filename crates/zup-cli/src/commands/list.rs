//! List command: show installed versions with their annotations.

use anyhow::Result;
use chrono::{DateTime, Local};
use zup_ui::Output;

use super::{fail, Context};

pub fn run(ctx: &Context, output: &Output) -> Result<i32> {
    let versions = match ctx.root.installed_versions() {
        Ok(versions) => versions,
        Err(e) => return fail(output, &e),
    };

    if versions.is_empty() {
        output.info("No zig versions installed");
        output.info("Install one with: zup install <version>");
        return Ok(0);
    }

    // Pointer state is advisory here; a broken pointer must not hide the
    // installed versions.
    let default_version = match ctx.default_pointer().default_version(&ctx.root) {
        Ok(version) => version,
        Err(e) => {
            output.warn(&format!("unreadable default pointer: {}", e));
            None
        }
    };
    let master_version = match ctx.master_pointer().target_version() {
        Ok(version) => version,
        Err(e) => {
            output.warn(&format!("unreadable master alias: {}", e));
            None
        }
    };

    for version in &versions {
        let mut notes = Vec::new();
        if default_version.as_deref() == Some(version.name.as_str()) {
            notes.push("default");
        }
        if master_version.as_deref() == Some(version.name.as_str()) {
            notes.push("master");
        }
        if version.keep {
            notes.push("keep");
        }

        let annotation = if notes.is_empty() {
            String::new()
        } else {
            format!("  ({})", notes.join(", "))
        };
        match version.installed_at {
            Some(time) => {
                let date: DateTime<Local> = time.into();
                println!(
                    "{:<28} {}{}",
                    version.name,
                    date.format("%Y-%m-%d"),
                    annotation
                );
            }
            None => println!("{}{}", version.name, annotation),
        }
    }

    Ok(0)
}
