// crates/lavainfo-core/src/traits.rs

use async_trait::async_trait;

use crate::block::BlockInfo;
use crate::chain::ChainDescriptor;
use crate::error::SourceError;
use crate::stake::StakeEntry;

/// Source of the network's chain list.
///
/// Implemented by lavainfo-rest.
#[async_trait]
pub trait ChainListSource: Send + Sync {
    /// Fetch every chain registered on the network.
    async fn fetch_chains(&self) -> Result<Vec<ChainDescriptor>, SourceError>;
}

/// Source of per-chain provider stake entries.
///
/// Implemented by lavainfo-rest, and by in-memory fakes in tests.
#[async_trait]
pub trait StakeSource: Send + Sync {
    /// Fetch all stake entries for a chain, frozen stakes included.
    async fn fetch_stake_entries(&self, chain_id: &str) -> Result<Vec<StakeEntry>, SourceError>;
}

/// Source of the latest block header.
#[async_trait]
pub trait BlockSource: Send + Sync {
    async fn latest_block(&self) -> Result<BlockInfo, SourceError>;
}
