// crates/lavainfo-core/src/chain.rs

use serde::{Deserialize, Serialize};

/// A chain served on the Lava network, as listed by `lavanet/lava/spec`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChainDescriptor {
    /// Human-readable chain name.
    #[serde(rename = "chainName")]
    pub chain_name: String,
    /// Chain identifier used to query providers (e.g. "LAV1").
    #[serde(rename = "chainID")]
    pub chain_id: String,
    /// API interfaces enabled for this chain (rest, grpc, tendermintrpc, ...).
    #[serde(rename = "enabledApiInterfaces", default)]
    pub enabled_api_interfaces: Vec<String>,
    /// Number of APIs, as reported on the wire.
    #[serde(default)]
    pub api_count: String,
}

impl ChainDescriptor {
    pub fn new(chain_id: impl Into<String>, chain_name: impl Into<String>) -> Self {
        Self {
            chain_name: chain_name.into(),
            chain_id: chain_id.into(),
            enabled_api_interfaces: Vec::new(),
            api_count: String::new(),
        }
    }

    /// Number of APIs on this chain.
    ///
    /// Uses `api_count` when it parses, otherwise the enabled interface count.
    pub fn interface_count(&self) -> usize {
        self.api_count
            .trim()
            .parse()
            .unwrap_or(self.enabled_api_interfaces.len())
    }
}

/// Response body of `show_all_chains`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ChainListResponse {
    #[serde(rename = "chainInfoList", default)]
    pub chain_info_list: Vec<ChainDescriptor>,
}
