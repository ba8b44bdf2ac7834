// crates/lavainfo-core/src/view.rs
//
// Presentation state as a value plus a reducer. Views are selected by
// semantic keys (provider address, chain ID), never by position.
//
// Focus queries follow the dashboard URL form: `?p=<address>` focuses a
// provider, `?c=<chain_id>` focuses a chain.

use serde::Serialize;

use crate::registry::Aggregation;

/// Query key that focuses a provider.
pub const PROVIDER_QUERY_KEY: &str = "p";

/// Query key that focuses a chain.
pub const CHAIN_QUERY_KEY: &str = "c";

/// What the presentation layer is showing.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(tag = "view", content = "key", rename_all = "snake_case")]
pub enum View {
    /// Summary counters and the chain list.
    #[default]
    Chains,
    /// Every provider in the registry.
    Providers,
    /// One provider, by address.
    Provider(String),
    /// One chain, by chain ID.
    Chain(String),
}

/// A requested state transition.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Action {
    ShowChains,
    ShowProviders,
    FocusProvider(String),
    FocusChain(String),
    /// Apply a URL-style focus query such as `?p=lava@1abc`.
    Navigate(String),
}

/// Current view state. Transitions happen only through [`ViewState::reduce`].
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct ViewState {
    view: View,
}

impl ViewState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn view(&self) -> &View {
        &self.view
    }

    /// Apply `action` against the aggregated data and return the next state.
    ///
    /// Focusing an address or chain ID that is not in `data` leaves the state
    /// unchanged. Focusing a provider replaces any chain focus and vice versa.
    pub fn reduce(&self, action: Action, data: &Aggregation) -> ViewState {
        let view = match action {
            Action::ShowChains => View::Chains,
            Action::ShowProviders => View::Providers,
            Action::FocusProvider(address) => {
                if data.provider(&address).is_none() {
                    tracing::debug!("Ignoring focus on unknown provider {}", address);
                    return self.clone();
                }
                View::Provider(address)
            }
            Action::FocusChain(chain_id) => {
                if data.chain(&chain_id).is_none() {
                    tracing::debug!("Ignoring focus on unknown chain {}", chain_id);
                    return self.clone();
                }
                View::Chain(chain_id)
            }
            Action::Navigate(query) => {
                return match parse_focus_query(&query) {
                    Some(action) => self.reduce(action, data),
                    None => self.clone(),
                };
            }
        };
        ViewState { view }
    }
}

/// Parse a focus query into a focus action.
///
/// Accepts an optional leading `?`. Keys and values are form-urlencoded
/// (`%40` is `@`, `+` is a space). When both keys are present the provider
/// key wins. Returns `None` if neither key carries a non-empty value.
pub fn parse_focus_query(query: &str) -> Option<Action> {
    let query = query.trim().trim_start_matches('?');

    let mut provider = None;
    let mut chain = None;
    for (key, value) in form_urlencoded::parse(query.as_bytes()) {
        if value.is_empty() {
            continue;
        }
        match key.as_ref() {
            PROVIDER_QUERY_KEY if provider.is_none() => provider = Some(value.into_owned()),
            CHAIN_QUERY_KEY if chain.is_none() => chain = Some(value.into_owned()),
            _ => {}
        }
    }

    provider
        .map(Action::FocusProvider)
        .or_else(|| chain.map(Action::FocusChain))
}

/// Build the focus query for a view, the inverse of [`parse_focus_query`].
pub fn focus_query(view: &View) -> String {
    let mut query = form_urlencoded::Serializer::new(String::from("?"));
    match view {
        View::Provider(address) => {
            query.append_pair(PROVIDER_QUERY_KEY, address);
        }
        View::Chain(chain_id) => {
            query.append_pair(CHAIN_QUERY_KEY, chain_id);
        }
        View::Chains | View::Providers => {}
    }
    query.finish()
}
