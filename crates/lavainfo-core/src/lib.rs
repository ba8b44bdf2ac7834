// crates/lavainfo-core/src/lib.rs
//
// lavainfo-core: data model, source traits, stake aggregation, and view state
// for Lava provider info.
//
// The REST client and CLI crates depend on this one. Nothing here performs
// I/O directly; fetching goes through the traits in `traits`.

pub mod aggregator;
pub mod block;
pub mod chain;
pub mod error;
pub mod registry;
pub mod stake;
pub mod token;
pub mod traits;
pub mod view;

// Re-export key types for ergonomic access from downstream crates.
// Usage: `use lavainfo_core::Aggregation;`

// Wire types
pub use block::BlockInfo;
pub use chain::{ChainDescriptor, ChainListResponse};
pub use stake::{Coin, Endpoint, ProvidersResponse, StakeEntry};

// Aggregation
pub use aggregator::{aggregate, fold_chains, AggregateOptions, FailurePolicy, DEFAULT_FETCH_TIMEOUT};
pub use registry::{AggregateTotals, Aggregation, ChainAggregate, ChainFailure, Provider};

// Token
pub use token::{format_lava, Ulava, ULAVA_PER_LAVA};

// View state
pub use view::{focus_query, parse_focus_query, Action, View, ViewState};

// Error types
pub use error::{AggregateError, SourceError};

// Traits
pub use traits::{BlockSource, ChainListSource, StakeSource};
