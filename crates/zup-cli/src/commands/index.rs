//! Index command: fetch and pretty-print the download index.

use anyhow::Result;
use zup_ui::Output;

use super::{fail, Context};

pub async fn run(ctx: &Context, output: &Output) -> Result<i32> {
    let client = match ctx.index_client() {
        Ok(client) => client,
        Err(e) => return fail(output, &e),
    };

    output.verbose(&format!("fetching {}", client.url()));
    match client.fetch().await {
        Ok(doc) => {
            println!("{}", serde_json::to_string_pretty(&doc)?);
            Ok(0)
        }
        Err(e) => fail(output, &e),
    }
}
