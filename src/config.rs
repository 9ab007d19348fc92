//! Runtime configuration
//!
//! Defaults first, then `GHMARKS_*` environment overrides.

use std::time::Duration;

pub const DEFAULT_API_BASE: &str = "https://api.github.com";
pub const DEFAULT_DEBOUNCE_MS: u64 = 500;
pub const DEFAULT_TIMEOUT_SECS: u64 = 15;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Config {
    /// Base URL of the GitHub REST API
    pub api_base: String,
    /// Quiet period after the last term/type change before a search is sent
    pub debounce: Duration,
    /// Per-request timeout
    pub request_timeout: Duration,
    /// GitHub rejects requests without a User-Agent
    pub user_agent: String,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            api_base: DEFAULT_API_BASE.to_string(),
            debounce: Duration::from_millis(DEFAULT_DEBOUNCE_MS),
            request_timeout: Duration::from_secs(DEFAULT_TIMEOUT_SECS),
            user_agent: format!("ghmarks/{}", env!("CARGO_PKG_VERSION")),
        }
    }
}

impl Config {
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Build a config from an arbitrary variable source.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let mut config = Self::default();

        if let Some(base) = lookup("GHMARKS_API_BASE").filter(|v| !v.is_empty()) {
            config.api_base = base.trim_end_matches('/').to_string();
        }
        if let Some(val) = lookup("GHMARKS_DEBOUNCE_MS") {
            if let Ok(ms) = val.parse() {
                config.debounce = Duration::from_millis(ms);
            }
        }
        if let Some(val) = lookup("GHMARKS_TIMEOUT_SECS") {
            if let Ok(secs) = val.parse() {
                config.request_timeout = Duration::from_secs(secs);
            }
        }
        if let Some(agent) = lookup("GHMARKS_USER_AGENT").filter(|v| !v.is_empty()) {
            config.user_agent = agent;
        }

        config
    }
}
