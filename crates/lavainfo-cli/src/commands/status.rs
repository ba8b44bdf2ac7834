// crates/lavainfo-cli/src/commands/status.rs
//
// `lavainfo status` — latest Lava block height and time.

use lavainfo_core::{BlockInfo, BlockSource};

use super::Context;
use crate::error::CliError;
use crate::output::{format_fields, format_json, OutputFormat};

/// Run the status command.
pub async fn run(ctx: &Context) -> Result<(), CliError> {
    let block = ctx.client.latest_block().await.map_err(CliError::Block)?;
    println!("{}", render(&block, ctx.client.base_url().as_str(), ctx.format)?);
    Ok(())
}

fn render(block: &BlockInfo, endpoint: &str, format: OutputFormat) -> Result<String, CliError> {
    match format {
        OutputFormat::Json => Ok(format_json(block)?),
        OutputFormat::Table => Ok(format_fields(&[
            ("REST endpoint", endpoint.to_string()),
            ("Block", block.height.to_string()),
            ("Block time", block.time.to_rfc3339()),
        ])),
    }
}
