// crates/lavainfo-core/tests/aggregate.rs
//
// Aggregation tests against an in-memory stake source. Covers the registry
// invariants, both failure policies, per-fetch timeouts, and rebuild
// behavior. No network access.

use std::collections::HashMap;
use std::time::Duration;

use async_trait::async_trait;

use lavainfo_core::{
    aggregate, AggregateError, AggregateOptions, ChainDescriptor, Coin, FailurePolicy,
    SourceError, StakeEntry, StakeSource, Ulava,
};

// ---------------------------------------------------------------------------
// Helpers
// ---------------------------------------------------------------------------

/// How the fake responds for one chain.
#[derive(Clone)]
enum Reply {
    Entries(Vec<StakeEntry>),
    Fail(SourceError),
    Hang,
}

/// In-memory `StakeSource` with an optional delay per chain.
#[derive(Default)]
struct FakeSource {
    replies: HashMap<String, Reply>,
    delays: HashMap<String, Duration>,
}

impl FakeSource {
    fn with(mut self, chain_id: &str, reply: Reply) -> Self {
        self.replies.insert(chain_id.to_string(), reply);
        self
    }

    fn delayed(mut self, chain_id: &str, delay: Duration) -> Self {
        self.delays.insert(chain_id.to_string(), delay);
        self
    }
}

#[async_trait]
impl StakeSource for FakeSource {
    async fn fetch_stake_entries(&self, chain_id: &str) -> Result<Vec<StakeEntry>, SourceError> {
        if let Some(delay) = self.delays.get(chain_id) {
            tokio::time::sleep(*delay).await;
        }
        match self.replies.get(chain_id) {
            Some(Reply::Entries(entries)) => Ok(entries.clone()),
            Some(Reply::Fail(e)) => Err(e.clone()),
            Some(Reply::Hang) => std::future::pending().await,
            None => Err(SourceError::Transport(format!("404 for {}", chain_id))),
        }
    }
}

fn chains(ids: &[&str]) -> Vec<ChainDescriptor> {
    ids.iter()
        .map(|id| ChainDescriptor::new(*id, format!("{} network", id)))
        .collect()
}

fn stake(chain_id: &str, address: &str, amount: &str) -> StakeEntry {
    StakeEntry {
        stake: Coin {
            denom: "ulava".to_string(),
            amount: amount.to_string(),
        },
        address: address.to_string(),
        stake_applied_block: "42".to_string(),
        endpoints: Vec::new(),
        geolocation: "2".to_string(),
        chain: chain_id.to_string(),
        moniker: format!("moniker-{}", address),
    }
}

fn scenario_source() -> FakeSource {
    FakeSource::default()
        .with("A", Reply::Entries(vec![stake("A", "p1", "1000000")]))
        .with(
            "B",
            Reply::Entries(vec![stake("B", "p1", "2000000"), stake("B", "p2", "500000")]),
        )
}

fn best_effort() -> AggregateOptions {
    AggregateOptions {
        policy: FailurePolicy::BestEffort,
        ..AggregateOptions::default()
    }
}

// ---------------------------------------------------------------------------
// Registry invariants
// ---------------------------------------------------------------------------

#[tokio::test]
async fn test_two_chain_scenario() {
    let source = scenario_source();
    let input = chains(&["A", "B"]);
    let agg = aggregate(&source, &input, &AggregateOptions::default())
        .await
        .unwrap();

    assert_eq!(agg.providers().len(), 2);
    assert_eq!(agg.provider("p1").unwrap().total_stake(), Ulava(3_000_000));
    assert_eq!(agg.provider("p1").unwrap().total_stake().to_string(), "3 LAVA");
    assert_eq!(agg.provider("p2").unwrap().total_stake(), Ulava(500_000));
    assert_eq!(agg.provider("p2").unwrap().total_stake().to_string(), "0 LAVA");
    assert_eq!(agg.totals().active_chains, 2);
    assert_eq!(agg.totals().total_stake, Ulava(3_500_000));
    assert!(agg.failures().is_empty());
}

#[tokio::test]
async fn test_disjoint_providers_registry_size() {
    let source = FakeSource::default()
        .with("A", Reply::Entries(vec![stake("A", "a1", "1"), stake("A", "a2", "2")]))
        .with("B", Reply::Entries(vec![stake("B", "b1", "3")]))
        .with("C", Reply::Entries(vec![stake("C", "c1", "4"), stake("C", "c2", "5"), stake("C", "c3", "6")]));
    let input = chains(&["A", "B", "C"]);
    let agg = aggregate(&source, &input, &AggregateOptions::default())
        .await
        .unwrap();

    let per_chain: usize = agg.chains().iter().map(|c| c.provider_count()).sum();
    assert_eq!(agg.providers().len(), per_chain);
    assert_eq!(agg.providers().len(), 6);
}

#[tokio::test]
async fn test_overlapping_provider_has_one_entry_per_chain() {
    let source = FakeSource::default()
        .with("A", Reply::Entries(vec![stake("A", "shared", "10")]))
        .with("B", Reply::Entries(vec![stake("B", "shared", "20")]))
        .with("C", Reply::Entries(vec![stake("C", "shared", "30"), stake("C", "solo", "1")]));
    let input = chains(&["A", "B", "C"]);
    let agg = aggregate(&source, &input, &AggregateOptions::default())
        .await
        .unwrap();

    assert_eq!(agg.providers().len(), 2);
    let shared = agg.provider("shared").unwrap();
    assert_eq!(shared.chain_count(), 3);
    let mut seen: Vec<&str> = shared.chains().iter().map(|e| e.chain.as_str()).collect();
    seen.sort();
    assert_eq!(seen, vec!["A", "B", "C"]);
}

#[tokio::test]
async fn test_totals_are_sums() {
    let source = scenario_source();
    let input = chains(&["A", "B"]);
    let agg = aggregate(&source, &input, &AggregateOptions::default())
        .await
        .unwrap();

    for provider in agg.providers().values() {
        let expected: u128 = provider
            .chains()
            .iter()
            .map(|e| e.stake.amount.parse::<u128>().unwrap())
            .sum();
        assert_eq!(provider.total_stake(), Ulava(expected));
    }
    let grand: Ulava = agg.providers().values().map(|p| p.total_stake()).sum();
    assert_eq!(agg.totals().total_stake, grand);
    assert_eq!(
        agg.totals().active_chains,
        agg.chains().iter().filter(|c| c.provider_count() > 0).count()
    );
}

#[tokio::test]
async fn test_completion_order_does_not_change_result() {
    let input = chains(&["A", "B"]);
    let fast_a = scenario_source().delayed("B", Duration::from_millis(30));
    let fast_b = scenario_source().delayed("A", Duration::from_millis(30));

    let first = aggregate(&fast_a, &input, &AggregateOptions::default())
        .await
        .unwrap();
    let second = aggregate(&fast_b, &input, &AggregateOptions::default())
        .await
        .unwrap();
    assert_eq!(first, second);
}

#[tokio::test]
async fn test_idempotent_and_inputs_untouched() {
    let source = scenario_source();
    let input = chains(&["A", "B"]);
    let before = input.clone();

    let first = aggregate(&source, &input, &AggregateOptions::default())
        .await
        .unwrap();
    let second = aggregate(&source, &input, &AggregateOptions::default())
        .await
        .unwrap();

    assert_eq!(first, second);
    assert_eq!(input, before);
}

#[tokio::test]
async fn test_rebuild_drops_stale_chains() {
    let source = scenario_source();
    let full = aggregate(&source, &chains(&["A", "B"]), &AggregateOptions::default())
        .await
        .unwrap();
    assert!(full.provider("p2").is_some());

    let narrowed = aggregate(&source, &chains(&["A"]), &AggregateOptions::default())
        .await
        .unwrap();
    assert!(narrowed.provider("p2").is_none());
    assert_eq!(narrowed.provider("p1").unwrap().chain_count(), 1);
    assert!(narrowed.chain("B").is_none());
}

#[tokio::test]
async fn test_empty_chain_list_is_rejected() {
    let source = FakeSource::default();
    let err = aggregate(&source, &[], &AggregateOptions::default())
        .await
        .unwrap_err();
    assert!(matches!(err, AggregateError::NoChains));
}

// ---------------------------------------------------------------------------
// Failure policies
// ---------------------------------------------------------------------------

#[tokio::test]
async fn test_fail_fast_reports_chain() {
    let source = scenario_source().with(
        "C",
        Reply::Fail(SourceError::Transport("connection refused".into())),
    );
    let input = chains(&["A", "B", "C"]);
    let err = aggregate(&source, &input, &AggregateOptions::default())
        .await
        .unwrap_err();

    assert_eq!(err.chain_id(), Some("C"));
    assert!(matches!(
        err,
        AggregateError::Chain {
            source: SourceError::Transport(_),
            ..
        }
    ));
}

#[tokio::test]
async fn test_fail_fast_does_not_wait_for_hung_chain() {
    let source = scenario_source()
        .with("HUNG", Reply::Hang)
        .with("BAD", Reply::Fail(SourceError::Parse("unexpected token".into())));
    let input = chains(&["A", "HUNG", "BAD"]);
    let options = AggregateOptions {
        policy: FailurePolicy::FailFast,
        fetch_timeout: None,
    };

    let result = tokio::time::timeout(Duration::from_secs(5), aggregate(&source, &input, &options))
        .await
        .expect("fail-fast should not wait on the hung chain");
    assert_eq!(result.unwrap_err().chain_id(), Some("BAD"));
}

#[tokio::test]
async fn test_fail_fast_rejects_malformed_amount() {
    let source = scenario_source().with("C", Reply::Entries(vec![stake("C", "p3", "1e6")]));
    let input = chains(&["A", "C"]);
    let err = aggregate(&source, &input, &AggregateOptions::default())
        .await
        .unwrap_err();
    assert_eq!(err.chain_id(), Some("C"));
    assert!(matches!(
        err,
        AggregateError::Chain {
            source: SourceError::Parse(_),
            ..
        }
    ));
}

#[tokio::test]
async fn test_best_effort_skips_failed_chain() {
    let source = scenario_source().with(
        "C",
        Reply::Fail(SourceError::Transport("503 Service Unavailable".into())),
    );
    let input = chains(&["A", "B", "C"]);
    let agg = aggregate(&source, &input, &best_effort()).await.unwrap();

    assert_eq!(agg.providers().len(), 2);
    assert_eq!(agg.totals().active_chains, 2);
    assert_eq!(agg.totals().total_stake, Ulava(3_500_000));
    assert_eq!(agg.failures().len(), 1);
    assert_eq!(agg.failures()[0].chain_id, "C");
    assert!(!agg.chain("C").unwrap().is_active());
}

#[tokio::test]
async fn test_best_effort_records_malformed_amount() {
    let source = scenario_source().with("C", Reply::Entries(vec![stake("C", "p3", "-5")]));
    let input = chains(&["A", "B", "C"]);
    let agg = aggregate(&source, &input, &best_effort()).await.unwrap();

    assert!(agg.provider("p3").is_none());
    assert!(matches!(agg.failures()[0].error, SourceError::Parse(_)));
}

#[tokio::test]
async fn test_timeout_is_a_chain_failure() {
    let source = scenario_source().with("SLOW", Reply::Hang);
    let input = chains(&["A", "B", "SLOW"]);
    let limit = Duration::from_millis(50);

    let options = AggregateOptions {
        policy: FailurePolicy::BestEffort,
        fetch_timeout: Some(limit),
    };
    let agg = aggregate(&source, &input, &options).await.unwrap();
    assert_eq!(agg.failures()[0].error, SourceError::Timeout(limit));
    assert_eq!(agg.providers().len(), 2);

    let options = AggregateOptions {
        policy: FailurePolicy::FailFast,
        fetch_timeout: Some(limit),
    };
    let err = aggregate(&source, &input, &options).await.unwrap_err();
    assert_eq!(err.chain_id(), Some("SLOW"));
}
