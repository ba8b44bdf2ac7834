// crates/lavainfo-core/src/stake.rs
//
// Wire types for provider stake entries returned by the pairing module.
// Amounts are decimal strings in ulava.

use serde::{Deserialize, Serialize};

use crate::error::SourceError;
use crate::token::Ulava;

/// A coin amount as encoded by Cosmos REST endpoints.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Coin {
    pub denom: String,
    pub amount: String,
}

/// A provider endpoint advertised in a stake entry.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Endpoint {
    #[serde(rename = "iPPORT", default)]
    pub ip_port: String,
    #[serde(default)]
    pub geolocation: String,
    #[serde(default)]
    pub addons: Vec<serde_json::Value>,
    #[serde(default)]
    pub api_interfaces: Vec<String>,
    #[serde(default)]
    pub extensions: Vec<serde_json::Value>,
}

/// One provider's stake on one chain.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StakeEntry {
    pub stake: Coin,
    pub address: String,
    #[serde(default)]
    pub stake_applied_block: String,
    #[serde(default)]
    pub endpoints: Vec<Endpoint>,
    #[serde(default)]
    pub geolocation: String,
    #[serde(default)]
    pub chain: String,
    #[serde(default)]
    pub moniker: String,
}

impl StakeEntry {
    /// Parse the stake amount as an integer number of ulava.
    pub fn amount(&self) -> Result<Ulava, SourceError> {
        self.stake.amount.trim().parse::<u128>().map(Ulava).map_err(|e| {
            SourceError::Parse(format!(
                "invalid stake amount {:?} for provider {}: {}",
                self.stake.amount, self.address, e
            ))
        })
    }
}

/// Response body of `pairing/providers/{chain_id}`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProvidersResponse {
    #[serde(rename = "stakeEntry", default)]
    pub stake_entry: Vec<StakeEntry>,
    #[serde(default)]
    pub output: String,
}
