// crates/lavainfo-cli/src/error.rs

use lavainfo_core::{AggregateError, SourceError};
use thiserror::Error;

/// Errors surfaced to the user by CLI commands.
#[derive(Debug, Error)]
pub enum CliError {
    /// The chain list could not be fetched; nothing to show.
    #[error("Data unavailable: {0}")]
    Unavailable(SourceError),

    #[error("Aggregation failed: {0}")]
    Aggregate(#[from] AggregateError),

    #[error("Block status unavailable: {0}")]
    Block(SourceError),

    #[error("Provider not found: {0}")]
    ProviderNotFound(String),

    #[error("Chain not found: {0}")]
    ChainNotFound(String),

    #[error("Could not serialize output: {0}")]
    Output(#[from] serde_json::Error),
}
