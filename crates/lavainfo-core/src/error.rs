// crates/lavainfo-core/src/error.rs

use std::time::Duration;

use thiserror::Error;

/// Errors raised by a data source (chain list, stake entries, block header).
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SourceError {
    /// Network failure or non-success HTTP status.
    #[error("Transport error: {0}")]
    Transport(String),

    /// Response body did not match the expected shape.
    #[error("Parse error: {0}")]
    Parse(String),

    /// The request did not complete within the allotted time.
    #[error("Timed out after {0:?}")]
    Timeout(Duration),
}

impl From<serde_json::Error> for SourceError {
    fn from(e: serde_json::Error) -> Self {
        SourceError::Parse(e.to_string())
    }
}

/// Errors raised by a stake aggregation pass.
#[derive(Debug, Clone, Error)]
pub enum AggregateError {
    /// The chain list was empty; there is nothing to aggregate.
    #[error("No chains to aggregate")]
    NoChains,

    /// A chain's stake fetch or decode failed.
    #[error("Chain {chain_id}: {source}")]
    Chain {
        chain_id: String,
        #[source]
        source: SourceError,
    },

    /// `fold_chains` was given a different number of responses than chains.
    #[error("Expected {chains} chain responses, got {responses}")]
    LengthMismatch { chains: usize, responses: usize },
}

impl AggregateError {
    /// The chain that caused the failure, if any.
    pub fn chain_id(&self) -> Option<&str> {
        match self {
            AggregateError::NoChains | AggregateError::LengthMismatch { .. } => None,
            AggregateError::Chain { chain_id, .. } => Some(chain_id),
        }
    }
}
