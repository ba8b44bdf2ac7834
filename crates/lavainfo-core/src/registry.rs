// crates/lavainfo-core/src/registry.rs
//
// Derived aggregation results: the provider registry, per-chain aggregates,
// and summary totals. Built once per aggregation pass and read-only after.

use serde::{Serialize, Serializer};
use std::collections::{BTreeMap, HashMap};
use std::fmt::Display;
use std::sync::Arc;

use crate::chain::ChainDescriptor;
use crate::error::SourceError;
use crate::stake::StakeEntry;
use crate::token::Ulava;

/// A provider and every stake entry it holds across chains.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Provider {
    address: String,
    moniker: String,
    chains: Vec<StakeEntry>,
    total_stake: Ulava,
}

impl Provider {
    pub(crate) fn new(
        address: String,
        moniker: String,
        chains: Vec<StakeEntry>,
        total_stake: Ulava,
    ) -> Self {
        Self {
            address,
            moniker,
            chains,
            total_stake,
        }
    }

    pub fn address(&self) -> &str {
        &self.address
    }

    pub fn moniker(&self) -> &str {
        &self.moniker
    }

    /// Stake entries in the order they were folded in, one per chain.
    pub fn chains(&self) -> &[StakeEntry] {
        &self.chains
    }

    pub fn chain_count(&self) -> usize {
        self.chains.len()
    }

    /// Sum of this provider's stake across all its chains.
    pub fn total_stake(&self) -> Ulava {
        self.total_stake
    }

    /// The provider's stake entry on `chain_id`, if it has one.
    pub fn stake_on(&self, chain_id: &str) -> Option<&StakeEntry> {
        self.chains.iter().find(|e| e.chain == chain_id)
    }
}

/// A chain together with the providers staked on it.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ChainAggregate {
    #[serde(flatten)]
    descriptor: ChainDescriptor,
    providers: BTreeMap<String, Arc<Provider>>,
    total_stake: Ulava,
}

impl ChainAggregate {
    pub(crate) fn new(
        descriptor: ChainDescriptor,
        providers: BTreeMap<String, Arc<Provider>>,
        total_stake: Ulava,
    ) -> Self {
        Self {
            descriptor,
            providers,
            total_stake,
        }
    }

    pub fn descriptor(&self) -> &ChainDescriptor {
        &self.descriptor
    }

    pub fn chain_id(&self) -> &str {
        &self.descriptor.chain_id
    }

    pub fn chain_name(&self) -> &str {
        &self.descriptor.chain_name
    }

    /// Providers on this chain, keyed by address. Shares `Provider`
    /// instances with the global registry.
    pub fn providers(&self) -> &BTreeMap<String, Arc<Provider>> {
        &self.providers
    }

    pub fn provider_count(&self) -> usize {
        self.providers.len()
    }

    /// Sum of the stake entries on this chain.
    pub fn total_stake(&self) -> Ulava {
        self.total_stake
    }

    /// A chain is active when at least one provider stakes on it.
    pub fn is_active(&self) -> bool {
        !self.providers.is_empty()
    }
}

/// Summary counters over one aggregation pass.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct AggregateTotals {
    pub active_chains: usize,
    pub provider_count: usize,
    pub total_stake: Ulava,
}

/// A chain whose stake entries could not be fetched in best-effort mode.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ChainFailure {
    pub chain_id: String,
    #[serde(serialize_with = "serialize_display")]
    pub error: SourceError,
}

fn serialize_display<T: Display, S: Serializer>(value: &T, serializer: S) -> Result<S::Ok, S::Error> {
    serializer.collect_str(value)
}

/// Result of one aggregation pass.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Aggregation {
    providers: HashMap<String, Arc<Provider>>,
    chains: Vec<ChainAggregate>,
    totals: AggregateTotals,
    failures: Vec<ChainFailure>,
}

impl Aggregation {
    pub(crate) fn new(
        providers: HashMap<String, Arc<Provider>>,
        chains: Vec<ChainAggregate>,
        totals: AggregateTotals,
    ) -> Self {
        Self {
            providers,
            chains,
            totals,
            failures: Vec::new(),
        }
    }

    pub(crate) fn with_failures(mut self, failures: Vec<ChainFailure>) -> Self {
        self.failures = failures;
        self
    }

    /// The global registry: one entry per distinct provider address.
    pub fn providers(&self) -> &HashMap<String, Arc<Provider>> {
        &self.providers
    }

    /// Chain aggregates in input order, including chains with no providers.
    pub fn chains(&self) -> &[ChainAggregate] {
        &self.chains
    }

    pub fn totals(&self) -> AggregateTotals {
        self.totals
    }

    /// Chains skipped in best-effort mode. Always empty under fail-fast.
    pub fn failures(&self) -> &[ChainFailure] {
        &self.failures
    }

    /// Look up a provider by address.
    pub fn provider(&self, address: &str) -> Option<&Arc<Provider>> {
        self.providers.get(address)
    }

    /// Look up a chain aggregate by chain ID.
    pub fn chain(&self, chain_id: &str) -> Option<&ChainAggregate> {
        self.chains.iter().find(|c| c.chain_id() == chain_id)
    }

    /// Chains with at least one provider, in input order.
    pub fn active_chains(&self) -> impl Iterator<Item = &ChainAggregate> {
        self.chains.iter().filter(|c| c.is_active())
    }

    /// Providers ordered by total stake (descending), then address.
    pub fn providers_by_stake(&self) -> Vec<&Arc<Provider>> {
        let mut providers: Vec<_> = self.providers.values().collect();
        providers.sort_by(|a, b| {
            b.total_stake()
                .cmp(&a.total_stake())
                .then_with(|| a.address().cmp(b.address()))
        });
        providers
    }
}
