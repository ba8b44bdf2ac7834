// crates/lavainfo-cli/src/config.rs
//
// Runtime configuration for the lavainfo CLI.
// Loaded from a TOML file or populated with defaults; flags override both.

use serde::Deserialize;
use std::fs;
use std::time::Duration;

use lavainfo_core::{AggregateOptions, FailurePolicy};
use lavainfo_rest::DEFAULT_REST_URL;

/// Default location of the config file.
pub const DEFAULT_CONFIG_PATH: &str = "~/.lavainfo/config.toml";

/// Runtime configuration for the CLI.
#[derive(Debug, Clone, Deserialize)]
pub struct CliConfig {
    /// Base URL of the Lava REST endpoint.
    #[serde(default = "default_rest_url")]
    pub rest_url: String,

    /// Timeout for each HTTP request, in seconds.
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,

    /// Upper bound on each chain's stake fetch, in seconds. 0 disables it.
    #[serde(default = "default_fetch_timeout_secs")]
    pub fetch_timeout_secs: u64,

    /// "fail_fast" or "best_effort".
    #[serde(default)]
    pub failure_policy: FailurePolicy,

    /// Log level: "trace", "debug", "info", "warn", "error".
    #[serde(default = "default_log_level")]
    pub log_level: String,
}

fn default_rest_url() -> String {
    DEFAULT_REST_URL.to_string()
}

fn default_timeout_secs() -> u64 {
    10
}

fn default_fetch_timeout_secs() -> u64 {
    15
}

fn default_log_level() -> String {
    "warn".to_string()
}

impl Default for CliConfig {
    fn default() -> Self {
        Self {
            rest_url: default_rest_url(),
            timeout_secs: default_timeout_secs(),
            fetch_timeout_secs: default_fetch_timeout_secs(),
            failure_policy: FailurePolicy::default(),
            log_level: default_log_level(),
        }
    }
}

impl CliConfig {
    /// Load configuration from a TOML file at the given path.
    ///
    /// Returns an error if the file cannot be read or parsed.
    pub fn load(path: &str) -> Result<Self, Box<dyn std::error::Error>> {
        let contents = fs::read_to_string(expand_tilde(path))?;
        Self::from_toml(&contents)
    }

    /// Load the file at `path`, falling back to defaults.
    ///
    /// The second value carries the load error when the defaults were used;
    /// the caller logs it once tracing is up.
    pub fn load_or_default(path: &str) -> (Self, Option<String>) {
        match Self::load(path) {
            Ok(config) => (config, None),
            Err(e) => (Self::default(), Some(e.to_string())),
        }
    }

    pub fn from_toml(contents: &str) -> Result<Self, Box<dyn std::error::Error>> {
        let config: CliConfig = toml::from_str(contents)?;
        Ok(config)
    }

    pub fn request_timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }

    /// Aggregation options derived from this config.
    pub fn aggregate_options(&self) -> AggregateOptions {
        AggregateOptions {
            policy: self.failure_policy,
            fetch_timeout: match self.fetch_timeout_secs {
                0 => None,
                secs => Some(Duration::from_secs(secs)),
            },
        }
    }
}

/// Expand a leading `~/` to the user's home directory.
pub fn expand_tilde(path: &str) -> String {
    if let Some(rest) = path.strip_prefix("~/") {
        if let Some(home) = dirs::home_dir() {
            return home.join(rest).display().to_string();
        }
    }
    path.to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_file_uses_defaults() {
        let config = CliConfig::from_toml("").unwrap();
        assert_eq!(config.rest_url, DEFAULT_REST_URL);
        assert_eq!(config.timeout_secs, 10);
        assert_eq!(config.failure_policy, FailurePolicy::FailFast);
        assert_eq!(config.log_level, "warn");
    }

    #[test]
    fn test_parse_full_file() {
        let config = CliConfig::from_toml(
            r#"
            rest_url = "http://localhost:1317"
            timeout_secs = 3
            fetch_timeout_secs = 0
            failure_policy = "best_effort"
            log_level = "debug"
            "#,
        )
        .unwrap();
        assert_eq!(config.rest_url, "http://localhost:1317");
        assert_eq!(config.request_timeout(), Duration::from_secs(3));
        let options = config.aggregate_options();
        assert_eq!(options.policy, FailurePolicy::BestEffort);
        assert_eq!(options.fetch_timeout, None);
    }

    #[test]
    fn test_unknown_policy_rejected() {
        assert!(CliConfig::from_toml(r#"failure_policy = "sometimes""#).is_err());
    }

    #[test]
    fn test_missing_file_falls_back_with_reason() {
        let (config, reason) = CliConfig::load_or_default("/nonexistent/lavainfo/config.toml");
        assert_eq!(config.rest_url, DEFAULT_REST_URL);
        assert_eq!(config.log_level, "warn");
        assert!(reason.is_some());
    }

    #[test]
    fn test_expand_tilde_leaves_absolute_paths() {
        assert_eq!(expand_tilde("/etc/lavainfo.toml"), "/etc/lavainfo.toml");
    }
}
