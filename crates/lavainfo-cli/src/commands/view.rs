// crates/lavainfo-cli/src/commands/view.rs
//
// `lavainfo {summary, providers, provider, chain, open}` — aggregate the
// network's stake data and render one view of it.
//
// Each command is turned into a view `Action` and applied through the
// `ViewState` reducer; rendering only looks at the resulting `View`.

use serde::Serialize;
use tabled::Tabled;

use lavainfo_core::{
    parse_focus_query, Action, AggregateTotals, Aggregation, ChainAggregate, ChainFailure,
    Provider, Ulava, View, ViewState,
};

use super::Context;
use crate::error::CliError;
use crate::output::{format_fields, format_json, format_table, OutputFormat};

/// A row in the chain list.
#[derive(Tabled)]
struct ChainRow {
    #[tabled(rename = "Chain Name")]
    chain_name: String,
    #[tabled(rename = "Chain ID")]
    chain_id: String,
    #[tabled(rename = "#Providers")]
    providers: usize,
}

/// A row in the provider list.
#[derive(Tabled, Serialize)]
struct ProviderRow {
    #[tabled(rename = "Moniker")]
    moniker: String,
    #[tabled(rename = "Address")]
    address: String,
    #[tabled(rename = "Staked Chains")]
    staked_chains: usize,
    #[tabled(rename = "Total Stake")]
    #[serde(skip)]
    total_stake_display: String,
    #[tabled(skip)]
    total_stake: Ulava,
}

/// A row in a provider's chain table.
#[derive(Tabled)]
struct ProviderChainRow {
    #[tabled(rename = "Chain")]
    chain: String,
    #[tabled(rename = "Stake")]
    stake: String,
    #[tabled(rename = "Geolocation")]
    geolocation: String,
    #[tabled(rename = "Start Block")]
    start_block: String,
}

/// A row in a chain's provider table.
#[derive(Tabled, Serialize)]
struct ChainProviderRow {
    #[tabled(rename = "Provider")]
    moniker: String,
    #[tabled(rename = "Address")]
    address: String,
}

#[derive(Serialize)]
struct ChainSummary<'a> {
    chain_name: &'a str,
    chain_id: &'a str,
    providers: usize,
    total_stake: Ulava,
}

#[derive(Serialize)]
struct SummaryJson<'a> {
    #[serde(flatten)]
    totals: AggregateTotals,
    chains: Vec<ChainSummary<'a>>,
    failures: &'a [ChainFailure],
}

#[derive(Serialize)]
struct ChainDetailJson<'a> {
    chain_name: &'a str,
    chain_id: &'a str,
    api_count: usize,
    total_stake: Ulava,
    providers: Vec<ChainProviderRow>,
}

/// Run a view command.
pub async fn run(ctx: &Context, action: Action) -> Result<(), CliError> {
    let data = ctx.load().await?;
    let state = apply(action, &data)?;
    println!("{}", render(&state, &data, ctx.format)?);
    Ok(())
}

/// Apply `action` to a fresh view state, rejecting unknown focus targets.
///
/// A `Navigate` query with no focus key shows the chain summary.
pub fn apply(action: Action, data: &Aggregation) -> Result<ViewState, CliError> {
    let action = match action {
        Action::Navigate(query) => parse_focus_query(&query).unwrap_or(Action::ShowChains),
        other => other,
    };

    match &action {
        Action::FocusProvider(address) if data.provider(address).is_none() => {
            return Err(CliError::ProviderNotFound(address.clone()));
        }
        Action::FocusChain(chain_id) if data.chain(chain_id).is_none() => {
            return Err(CliError::ChainNotFound(chain_id.clone()));
        }
        _ => {}
    }

    Ok(ViewState::new().reduce(action, data))
}

/// Render the current view of `data`.
pub fn render(state: &ViewState, data: &Aggregation, format: OutputFormat) -> Result<String, CliError> {
    match state.view() {
        View::Chains => render_summary(data, format),
        View::Providers => render_providers(data, format),
        View::Provider(address) => {
            let provider = data
                .provider(address)
                .ok_or_else(|| CliError::ProviderNotFound(address.clone()))?;
            render_provider(provider, format)
        }
        View::Chain(chain_id) => {
            let chain = data
                .chain(chain_id)
                .ok_or_else(|| CliError::ChainNotFound(chain_id.clone()))?;
            render_chain(chain, format)
        }
    }
}

fn render_summary(data: &Aggregation, format: OutputFormat) -> Result<String, CliError> {
    let totals = data.totals();

    if format == OutputFormat::Json {
        let summary = SummaryJson {
            totals,
            chains: data
                .active_chains()
                .map(|c| ChainSummary {
                    chain_name: c.chain_name(),
                    chain_id: c.chain_id(),
                    providers: c.provider_count(),
                    total_stake: c.total_stake(),
                })
                .collect(),
            failures: data.failures(),
        };
        return Ok(format_json(&summary)?);
    }

    let mut out = format_fields(&[
        ("Active Chains", totals.active_chains.to_string()),
        ("Providers", totals.provider_count.to_string()),
        ("Total Stake", totals.total_stake.to_string()),
    ]);

    for failure in data.failures() {
        out.push_str(&format!("\nSkipped chain {}: {}", failure.chain_id, failure.error));
    }

    // Only chains with at least one provider are listed.
    let rows: Vec<ChainRow> = data
        .active_chains()
        .map(|c| ChainRow {
            chain_name: c.chain_name().to_string(),
            chain_id: c.chain_id().to_string(),
            providers: c.provider_count(),
        })
        .collect();

    out.push_str("\n\nChain List\n");
    out.push_str(&format_table(&rows));
    Ok(out)
}

fn render_providers(data: &Aggregation, format: OutputFormat) -> Result<String, CliError> {
    let rows: Vec<ProviderRow> = data
        .providers_by_stake()
        .into_iter()
        .map(|p| ProviderRow {
            moniker: p.moniker().to_string(),
            address: p.address().to_string(),
            staked_chains: p.chain_count(),
            total_stake_display: p.total_stake().to_string(),
            total_stake: p.total_stake(),
        })
        .collect();

    match format {
        OutputFormat::Json => Ok(format_json(&rows)?),
        OutputFormat::Table => Ok(format!("Providers\n{}", format_table(&rows))),
    }
}

fn render_provider(provider: &Provider, format: OutputFormat) -> Result<String, CliError> {
    if format == OutputFormat::Json {
        return Ok(format_json(provider)?);
    }

    let rows: Vec<ProviderChainRow> = provider
        .chains()
        .iter()
        .map(|e| ProviderChainRow {
            chain: e.chain.clone(),
            stake: format!("{} {}", e.stake.amount, e.stake.denom),
            geolocation: e.geolocation.clone(),
            start_block: e.stake_applied_block.clone(),
        })
        .collect();

    let mut out = format_fields(&[
        ("Provider", provider.moniker().to_string()),
        ("Address", provider.address().to_string()),
        ("Chains", provider.chain_count().to_string()),
        ("Total Stake", provider.total_stake().to_string()),
    ]);
    out.push_str("\n\nProvider Chains\n");
    out.push_str(&format_table(&rows));
    Ok(out)
}

fn render_chain(chain: &ChainAggregate, format: OutputFormat) -> Result<String, CliError> {
    let rows: Vec<ChainProviderRow> = chain
        .providers()
        .values()
        .map(|p| ChainProviderRow {
            moniker: p.moniker().to_string(),
            address: p.address().to_string(),
        })
        .collect();

    if format == OutputFormat::Json {
        let detail = ChainDetailJson {
            chain_name: chain.chain_name(),
            chain_id: chain.chain_id(),
            api_count: chain.descriptor().interface_count(),
            total_stake: chain.total_stake(),
            providers: rows,
        };
        return Ok(format_json(&detail)?);
    }

    let mut out = format_fields(&[
        ("Chain", format!("{} ({})", chain.chain_name(), chain.chain_id())),
        ("#APIs", chain.descriptor().interface_count().to_string()),
        ("#Providers", chain.provider_count().to_string()),
        ("Total Stake", chain.total_stake().to_string()),
    ]);
    out.push_str("\n\nChain Providers\n");
    out.push_str(&format_table(&rows));
    Ok(out)
}
