// crates/lavainfo-cli/src/commands/mod.rs
//
// Command module declarations and the shared command context.

pub mod status;
pub mod view;

use lavainfo_core::{aggregate, AggregateOptions, Aggregation, ChainListSource};
use lavainfo_rest::LavaRestClient;

use crate::error::CliError;
use crate::output::OutputFormat;

/// Everything a command needs: the REST client, aggregation options, and
/// the output format.
pub struct Context {
    pub client: LavaRestClient,
    pub options: AggregateOptions,
    pub format: OutputFormat,
}

impl Context {
    /// Fetch the chain list, then aggregate every chain's stake entries.
    ///
    /// A fresh `Aggregation` is built on every call.
    pub async fn load(&self) -> Result<Aggregation, CliError> {
        let chains = self
            .client
            .fetch_chains()
            .await
            .map_err(CliError::Unavailable)?;
        tracing::info!("Loaded {} chains from {}", chains.len(), self.client.base_url());

        let data = aggregate(&self.client, &chains, &self.options).await?;
        Ok(data)
    }
}
