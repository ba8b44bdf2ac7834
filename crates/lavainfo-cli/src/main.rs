// crates/lavainfo-cli/src/main.rs
//
// CLI entrypoint for Lava provider info.
//
// Fetches the chain list and every chain's provider stake entries from a
// Lava REST endpoint, aggregates them, and prints chain, provider, and block
// views as tables or JSON.

mod commands;
mod config;
mod error;
mod output;

use clap::{Parser, Subcommand};

use commands::Context;
use config::{CliConfig, DEFAULT_CONFIG_PATH};
use lavainfo_core::{Action, FailurePolicy};
use lavainfo_rest::LavaRestClient;
use output::OutputFormat;

/// Lava provider info: chains, providers, and stake on a Lava network.
#[derive(Parser, Debug)]
#[command(
    name = "lavainfo",
    version = "0.1.0",
    about = "Show Lava provider and chain stake info from a Lava REST endpoint"
)]
struct Cli {
    /// Path to the TOML configuration file.
    #[arg(long, global = true, default_value = DEFAULT_CONFIG_PATH)]
    config: String,

    /// REST endpoint; overrides the config file.
    #[arg(long, global = true)]
    rest: Option<String>,

    /// Output format.
    #[arg(long, global = true, value_enum, default_value_t = OutputFormat::Table)]
    format: OutputFormat,

    /// Skip chains whose stake fetch fails instead of aborting.
    #[arg(long, global = true)]
    best_effort: bool,

    #[command(subcommand)]
    command: Commands,
}

/// Top-level subcommands.
#[derive(Debug, Subcommand)]
enum Commands {
    /// Active chains, provider count, total stake, and the chain list.
    Summary,

    /// Every provider with its staked chain count and total stake.
    Providers,

    /// One provider's stake on each chain.
    Provider {
        /// Provider address.
        address: String,
    },

    /// One chain's providers and total stake.
    Chain {
        /// Chain ID (e.g. LAV1).
        chain_id: String,
    },

    /// Open a focus query such as `?p=<address>` or `?c=<chain_id>`.
    Open {
        query: String,
    },

    /// Latest block height and time.
    Status,
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();

    let (mut config, config_error) = CliConfig::load_or_default(&cli.config);

    // Logs go to stderr so JSON on stdout stays clean.
    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(&config.log_level)),
        )
        .init();

    match config_error {
        None => tracing::info!("Loaded configuration from {}", cli.config),
        Some(e) => tracing::warn!(
            "Could not load config from {}: {}. Using defaults.",
            cli.config,
            e
        ),
    }

    // CLI flags override the config file.
    if let Some(rest) = &cli.rest {
        config.rest_url = rest.clone();
    }
    if cli.best_effort {
        config.failure_policy = FailurePolicy::BestEffort;
    }

    let ctx = Context {
        client: LavaRestClient::with_timeout(&config.rest_url, config.request_timeout())?,
        options: config.aggregate_options(),
        format: cli.format,
    };

    match cli.command {
        Commands::Summary => commands::view::run(&ctx, Action::ShowChains).await?,
        Commands::Providers => commands::view::run(&ctx, Action::ShowProviders).await?,
        Commands::Provider { address } => {
            commands::view::run(&ctx, Action::FocusProvider(address)).await?
        }
        Commands::Chain { chain_id } => {
            commands::view::run(&ctx, Action::FocusChain(chain_id)).await?
        }
        Commands::Open { query } => commands::view::run(&ctx, Action::Navigate(query)).await?,
        Commands::Status => commands::status::run(&ctx).await?,
    }

    Ok(())
}
