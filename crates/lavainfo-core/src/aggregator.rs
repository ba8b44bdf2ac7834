// crates/lavainfo-core/src/aggregator.rs
//
// Stake aggregation: fetch every chain's stake entries concurrently, then fold
// them into a provider registry and per-chain aggregates.
//
// The fold runs only after every fetch has settled, so the registry is never
// shared with an in-flight request. Inputs are borrowed and never modified;
// each call builds a fresh `Aggregation`.

use futures::future;
use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, BTreeSet, HashMap};
use std::sync::Arc;
use std::time::Duration;

use crate::chain::ChainDescriptor;
use crate::error::{AggregateError, SourceError};
use crate::registry::{AggregateTotals, Aggregation, ChainAggregate, ChainFailure, Provider};
use crate::stake::StakeEntry;
use crate::token::Ulava;
use crate::traits::StakeSource;

/// Default per-chain fetch timeout.
pub const DEFAULT_FETCH_TIMEOUT: Duration = Duration::from_secs(15);

/// What to do when one chain's stake fetch fails.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FailurePolicy {
    /// Fail the whole pass on the first chain error and cancel outstanding fetches.
    #[default]
    FailFast,
    /// Skip failed chains, record them in `Aggregation::failures`, aggregate the rest.
    BestEffort,
}

/// Options for a single aggregation pass.
#[derive(Debug, Clone)]
pub struct AggregateOptions {
    pub policy: FailurePolicy,
    /// Upper bound on each chain's fetch. `None` waits indefinitely.
    pub fetch_timeout: Option<Duration>,
}

impl Default for AggregateOptions {
    fn default() -> Self {
        Self {
            policy: FailurePolicy::default(),
            fetch_timeout: Some(DEFAULT_FETCH_TIMEOUT),
        }
    }
}

/// Fetch and aggregate stake entries for every chain in `chains`.
///
/// One fetch is issued per chain and all run concurrently. Under
/// [`FailurePolicy::FailFast`] the first failure is returned with the
/// offending chain ID; under [`FailurePolicy::BestEffort`] failed chains are
/// reported in the result and contribute no providers.
///
/// # Errors
/// Returns `AggregateError::NoChains` if `chains` is empty, and
/// `AggregateError::Chain` for a fetch, timeout, or decode failure under fail-fast.
pub async fn aggregate<S>(
    source: &S,
    chains: &[ChainDescriptor],
    options: &AggregateOptions,
) -> Result<Aggregation, AggregateError>
where
    S: StakeSource + ?Sized,
{
    if chains.is_empty() {
        return Err(AggregateError::NoChains);
    }

    tracing::debug!(
        "Fetching stake entries for {} chains ({:?})",
        chains.len(),
        options.policy
    );

    let (fetched, failures) = match options.policy {
        FailurePolicy::FailFast => {
            let fetches = chains.iter().map(|chain| async move {
                fetch_chain(source, &chain.chain_id, options.fetch_timeout)
                    .await
                    .map_err(|err| AggregateError::Chain {
                        chain_id: chain.chain_id.clone(),
                        source: err,
                    })
            });
            (future::try_join_all(fetches).await?, Vec::new())
        }
        FailurePolicy::BestEffort => {
            let results = future::join_all(
                chains
                    .iter()
                    .map(|chain| fetch_chain(source, &chain.chain_id, options.fetch_timeout)),
            )
            .await;

            let mut fetched = Vec::with_capacity(chains.len());
            let mut failures = Vec::new();
            for (chain, result) in chains.iter().zip(results) {
                match result {
                    Ok(entries) => fetched.push(entries),
                    Err(error) => {
                        tracing::warn!("Skipping chain {}: {}", chain.chain_id, error);
                        failures.push(ChainFailure {
                            chain_id: chain.chain_id.clone(),
                            error,
                        });
                        fetched.push(Vec::new());
                    }
                }
            }
            (fetched, failures)
        }
    };

    let aggregation = fold_chains(chains, fetched)?.with_failures(failures);
    let totals = aggregation.totals();
    tracing::info!(
        "Aggregated {} providers over {} active chains, total stake {}",
        totals.provider_count,
        totals.active_chains,
        totals.total_stake
    );
    Ok(aggregation)
}

/// Fetch one chain's entries and check that every amount parses.
async fn fetch_chain<S>(
    source: &S,
    chain_id: &str,
    timeout: Option<Duration>,
) -> Result<Vec<StakeEntry>, SourceError>
where
    S: StakeSource + ?Sized,
{
    let entries = match timeout {
        Some(limit) => tokio::time::timeout(limit, source.fetch_stake_entries(chain_id))
            .await
            .map_err(|_| SourceError::Timeout(limit))??,
        None => source.fetch_stake_entries(chain_id).await?,
    };

    for entry in &entries {
        entry.amount()?;
    }

    tracing::debug!("Chain {}: {} stake entries", chain_id, entries.len());
    Ok(entries)
}

/// Entries collected for one address during the fold.
struct ProviderBuilder {
    moniker: String,
    chains: Vec<StakeEntry>,
    amounts: Vec<Ulava>,
}

/// Fold already-fetched stake entries into an `Aggregation`.
///
/// `fetched[i]` holds the entries returned for `chains[i]`; each entry is
/// registered under that chain and its `chain` field is set to that chain ID.
/// A provider seen on several chains gets one registry entry with one stake
/// entry per chain. An address listed more than once in a single chain's
/// response is merged into its first entry for that chain, amounts summed.
///
/// # Errors
/// Returns `AggregateError::LengthMismatch` if `fetched` and `chains` differ in
/// length, and `AggregateError::Chain` if a stake amount is not an integer.
pub fn fold_chains(
    chains: &[ChainDescriptor],
    fetched: Vec<Vec<StakeEntry>>,
) -> Result<Aggregation, AggregateError> {
    if chains.len() != fetched.len() {
        return Err(AggregateError::LengthMismatch {
            chains: chains.len(),
            responses: fetched.len(),
        });
    }

    let mut builders: HashMap<String, ProviderBuilder> = HashMap::new();
    let mut members: Vec<(BTreeSet<String>, Ulava)> = Vec::with_capacity(chains.len());

    for (chain, entries) in chains.iter().zip(fetched) {
        let mut addresses = BTreeSet::new();
        let mut chain_total = Ulava::zero();
        // Address -> index of this chain's entry in the provider's builder.
        let mut slots: HashMap<String, usize> = HashMap::new();

        for mut entry in entries {
            let amount = entry.amount().map_err(|source| AggregateError::Chain {
                chain_id: chain.chain_id.clone(),
                source,
            })?;
            if entry.chain != chain.chain_id {
                if !entry.chain.is_empty() {
                    tracing::debug!(
                        "Entry for {} names chain {}, registering under {}",
                        entry.address,
                        entry.chain,
                        chain.chain_id
                    );
                }
                entry.chain = chain.chain_id.clone();
            }

            chain_total += amount;
            addresses.insert(entry.address.clone());

            let builder = builders
                .entry(entry.address.clone())
                .or_insert_with(|| ProviderBuilder {
                    moniker: entry.moniker.clone(),
                    chains: Vec::new(),
                    amounts: Vec::new(),
                });

            match slots.get(&entry.address).copied() {
                Some(slot) => {
                    tracing::debug!(
                        "Merging duplicate entry for {} on chain {}",
                        entry.address,
                        chain.chain_id
                    );
                    let merged = builder.amounts[slot] + amount;
                    builder.amounts[slot] = merged;
                    builder.chains[slot].stake.amount = merged.0.to_string();
                }
                None => {
                    slots.insert(entry.address.clone(), builder.chains.len());
                    builder.chains.push(entry);
                    builder.amounts.push(amount);
                }
            }
        }

        members.push((addresses, chain_total));
    }

    // Second pass: per-provider totals and the grand total.
    let mut providers = HashMap::with_capacity(builders.len());
    let mut total_stake = Ulava::zero();
    for (address, builder) in builders {
        let provider_total: Ulava = builder.amounts.iter().copied().sum();
        total_stake += provider_total;
        let provider = Provider::new(address.clone(), builder.moniker, builder.chains, provider_total);
        providers.insert(address, Arc::new(provider));
    }

    let chain_aggregates: Vec<ChainAggregate> = chains
        .iter()
        .zip(members)
        .map(|(chain, (addresses, chain_total))| {
            let chain_providers: BTreeMap<String, Arc<Provider>> = addresses
                .into_iter()
                .filter_map(|address| {
                    providers
                        .get(&address)
                        .map(|provider| (address, Arc::clone(provider)))
                })
                .collect();
            ChainAggregate::new(chain.clone(), chain_providers, chain_total)
        })
        .collect();

    let totals = AggregateTotals {
        active_chains: chain_aggregates.iter().filter(|c| c.is_active()).count(),
        provider_count: providers.len(),
        total_stake,
    };

    Ok(Aggregation::new(providers, chain_aggregates, totals))
}
