// crates/lavainfo-core/src/block.rs

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::error::SourceError;

/// Height and timestamp of the latest Lava block.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BlockInfo {
    pub height: u64,
    pub time: DateTime<Utc>,
}

#[derive(Debug, Deserialize)]
struct LatestBlockResponse {
    block: RawBlock,
}

#[derive(Debug, Deserialize)]
struct RawBlock {
    header: RawHeader,
}

#[derive(Debug, Deserialize)]
struct RawHeader {
    height: String,
    time: DateTime<Utc>,
}

impl BlockInfo {
    /// Decode a tendermint `blocks/latest` response body.
    pub fn from_latest_json(body: &str) -> Result<Self, SourceError> {
        let resp: LatestBlockResponse = serde_json::from_str(body)?;
        let height = resp.block.header.height.parse().map_err(|e| {
            SourceError::Parse(format!(
                "invalid block height {:?}: {}",
                resp.block.header.height, e
            ))
        })?;
        Ok(Self {
            height,
            time: resp.block.header.time,
        })
    }
}
