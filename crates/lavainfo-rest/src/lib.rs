// crates/lavainfo-rest/src/lib.rs
//
// lavainfo-rest: reqwest-backed implementations of the lavainfo-core source
// traits against a Lava REST endpoint.

pub mod client;
pub mod error;

pub use client::{
    parse_chain_list, parse_providers, LavaRestClient, DEFAULT_REQUEST_TIMEOUT, DEFAULT_REST_URL,
};
pub use error::RestError;
