// crates/lavainfo-rest/src/client.rs
//
// LavaRestClient: GETs chain, provider stake, and block data from a Lava
// REST endpoint using a shared reqwest client.

use std::time::Duration;

use async_trait::async_trait;
use reqwest::Url;

use lavainfo_core::{
    BlockInfo, BlockSource, ChainDescriptor, ChainListResponse, ChainListSource,
    ProvidersResponse, SourceError, StakeEntry, StakeSource,
};

use crate::error::RestError;

/// Public Lava testnet REST endpoint.
pub const DEFAULT_REST_URL: &str = "https://rest-public-rpc-testnet2.lavanet.xyz";

/// Default timeout applied to every request made by the shared client.
pub const DEFAULT_REQUEST_TIMEOUT: Duration = Duration::from_secs(10);

/// Path listing every registered chain.
pub const SHOW_ALL_CHAINS_PATH: &str = "lavanet/lava/spec/show_all_chains";

/// Path prefix for a chain's provider stake entries.
pub const PROVIDERS_PATH: &str = "lavanet/lava/pairing/providers";

/// Path of the latest tendermint block.
pub const LATEST_BLOCK_PATH: &str = "cosmos/base/tendermint/v1beta1/blocks/latest";

/// REST client for a single Lava endpoint.
#[derive(Debug, Clone)]
pub struct LavaRestClient {
    base_url: Url,
    client: reqwest::Client,
}

impl LavaRestClient {
    /// Create a client with the default request timeout.
    pub fn new(base_url: &str) -> Result<Self, RestError> {
        Self::with_timeout(base_url, DEFAULT_REQUEST_TIMEOUT)
    }

    /// Create a client whose requests time out after `timeout`.
    pub fn with_timeout(base_url: &str, timeout: Duration) -> Result<Self, RestError> {
        let parsed = Url::parse(base_url).map_err(|e| RestError::InvalidBaseUrl {
            url: base_url.to_string(),
            reason: e.to_string(),
        })?;
        if parsed.cannot_be_a_base() || !matches!(parsed.scheme(), "http" | "https") {
            return Err(RestError::InvalidBaseUrl {
                url: base_url.to_string(),
                reason: "expected an http or https URL".to_string(),
            });
        }

        let client = reqwest::Client::builder().timeout(timeout).build()?;

        Ok(Self {
            base_url: parsed,
            client,
        })
    }

    pub fn base_url(&self) -> &Url {
        &self.base_url
    }

    /// URL of the chain list.
    pub fn chains_url(&self) -> Url {
        self.endpoint(SHOW_ALL_CHAINS_PATH.split('/'))
    }

    /// URL of a chain's stake entries, frozen providers included.
    pub fn providers_url(&self, chain_id: &str) -> Url {
        let mut url = self.endpoint(PROVIDERS_PATH.split('/').chain(std::iter::once(chain_id)));
        url.query_pairs_mut().append_pair("showFrozen", "true");
        url
    }

    /// URL of the latest block header.
    pub fn latest_block_url(&self) -> Url {
        self.endpoint(LATEST_BLOCK_PATH.split('/'))
    }

    fn endpoint<'a>(&self, segments: impl IntoIterator<Item = &'a str>) -> Url {
        let mut url = self.base_url.clone();
        url.set_query(None);
        // Checked in the constructor: the base URL can be a base.
        if let Ok(mut path) = url.path_segments_mut() {
            path.pop_if_empty().extend(segments);
        }
        url
    }

    async fn get_text(&self, url: Url) -> Result<String, RestError> {
        tracing::debug!("GET {}", url);
        let resp = self.client.get(url.clone()).send().await?;

        let status = resp.status();
        if !status.is_success() {
            return Err(RestError::Status {
                url: url.to_string(),
                status: status.as_u16(),
            });
        }

        Ok(resp.text().await?)
    }
}

/// Decode a `show_all_chains` body into chain descriptors.
pub fn parse_chain_list(body: &str) -> Result<Vec<ChainDescriptor>, SourceError> {
    let resp: ChainListResponse = serde_json::from_str(body)?;
    Ok(resp.chain_info_list)
}

/// Decode a `pairing/providers/{chain_id}` body into stake entries.
pub fn parse_providers(body: &str) -> Result<Vec<StakeEntry>, SourceError> {
    let resp: ProvidersResponse = serde_json::from_str(body)?;
    Ok(resp.stake_entry)
}

#[async_trait]
impl ChainListSource for LavaRestClient {
    async fn fetch_chains(&self) -> Result<Vec<ChainDescriptor>, SourceError> {
        let body = self.get_text(self.chains_url()).await?;
        let chains = parse_chain_list(&body)?;
        tracing::debug!("Chain list: {} chains", chains.len());
        Ok(chains)
    }
}

#[async_trait]
impl StakeSource for LavaRestClient {
    async fn fetch_stake_entries(&self, chain_id: &str) -> Result<Vec<StakeEntry>, SourceError> {
        let body = self.get_text(self.providers_url(chain_id)).await?;
        parse_providers(&body)
    }
}

#[async_trait]
impl BlockSource for LavaRestClient {
    async fn latest_block(&self) -> Result<BlockInfo, SourceError> {
        let body = self.get_text(self.latest_block_url()).await?;
        BlockInfo::from_latest_json(&body)
    }
}
