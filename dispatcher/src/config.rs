//! Gateway configuration loaded once at startup
//!
//! ## Configuration Sources
//! Values are read from environment variables. The webserver loads a `.env`
//! file before calling [`GatewayConfig::from_env`], so both sources work.
//!
//! - `FANOUT_ADAPTERS`: ordered, comma separated adapter list
//!   (`service_a`, `service_b`, `openai`, `anthropic`); defaults to
//!   `service_a,service_b`
//! - `FANOUT_TIMEOUT_SECS`: per-call timeout in seconds (default 30)
//! - `<PREFIX>_URL`, `<PREFIX>_API_KEY`, `<PREFIX>_MODEL`: per adapter, where
//!   the prefix is `AI_SERVICE_A`, `AI_SERVICE_B`, `OPENAI` or `ANTHROPIC`
//!
//! The OpenAI and Anthropic prefixes also accept `OPENAI_API_URL` /
//! `OPENAI_API_MODEL` style names. A missing API key is not an error here:
//! the adapter reports it per request.

use std::collections::HashSet;
use std::time::Duration;

use crate::error::{DispatcherError, DispatcherResult};
use crate::types::{AdapterConfig, AdapterKind, DEFAULT_TIMEOUT};

const DEFAULT_ADAPTERS: &str = "service_a,service_b";

/// Immutable configuration for the whole adapter set
#[derive(Debug, Clone, PartialEq)]
pub struct GatewayConfig {
    /// Adapters in dispatch (and response) order
    pub adapters: Vec<AdapterConfig>,
    pub request_timeout: Duration,
}

impl GatewayConfig {
    pub fn new(adapters: Vec<AdapterConfig>) -> Self {
        Self {
            adapters,
            request_timeout: DEFAULT_TIMEOUT,
        }
    }

    /// Load configuration from process environment variables
    pub fn from_env() -> DispatcherResult<Self> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Load configuration through an arbitrary key lookup
    pub fn from_lookup<F>(lookup: F) -> DispatcherResult<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let request_timeout = match lookup("FANOUT_TIMEOUT_SECS") {
            Some(raw) => parse_timeout(&raw)?,
            None => DEFAULT_TIMEOUT,
        };

        let adapter_list = lookup("FANOUT_ADAPTERS").unwrap_or_else(|| DEFAULT_ADAPTERS.to_string());
        let kinds = parse_adapter_list(&adapter_list)?;

        let adapters = kinds
            .into_iter()
            .map(|kind| adapter_from_lookup(kind, &lookup, request_timeout))
            .collect::<DispatcherResult<Vec<_>>>()?;

        Ok(Self {
            adapters,
            request_timeout,
        })
    }

    /// Service names in dispatch order
    pub fn service_names(&self) -> Vec<&str> {
        self.adapters.iter().map(|a| a.service_name.as_str()).collect()
    }
}

fn parse_timeout(raw: &str) -> DispatcherResult<Duration> {
    let seconds: u64 = raw
        .trim()
        .parse()
        .map_err(|e| DispatcherError::config(format!("Invalid FANOUT_TIMEOUT_SECS '{raw}': {e}")))?;
    if seconds == 0 {
        return Err(DispatcherError::config("FANOUT_TIMEOUT_SECS must be greater than zero"));
    }
    Ok(Duration::from_secs(seconds))
}

/// Parse "service_a,service_b" into an ordered, duplicate-free kind list
fn parse_adapter_list(raw: &str) -> DispatcherResult<Vec<AdapterKind>> {
    let mut seen = HashSet::new();
    let mut kinds = Vec::new();

    for item in raw.split(',').map(str::trim).filter(|item| !item.is_empty()) {
        let kind: AdapterKind = item.parse().map_err(|e: String| DispatcherError::config(e))?;
        if !seen.insert(kind) {
            return Err(DispatcherError::config(format!(
                "Adapter '{item}' is listed more than once in FANOUT_ADAPTERS"
            )));
        }
        kinds.push(kind);
    }

    if kinds.is_empty() {
        return Err(DispatcherError::config("FANOUT_ADAPTERS must name at least one adapter"));
    }
    Ok(kinds)
}

fn adapter_from_lookup<F>(kind: AdapterKind, lookup: &F, timeout: Duration) -> DispatcherResult<AdapterConfig>
where
    F: Fn(&str) -> Option<String>,
{
    let prefix = kind.env_prefix();
    let first_of = |suffixes: &[&str]| {
        suffixes
            .iter()
            .find_map(|suffix| lookup(&format!("{prefix}_{suffix}")))
    };

    let endpoint = first_of(&["URL", "API_URL"]).unwrap_or_else(|| kind.default_endpoint().to_string());
    url::Url::parse(&endpoint)
        .map_err(|e| DispatcherError::config(format!("Invalid {prefix}_URL '{endpoint}': {e}")))?;

    let mut config = AdapterConfig::new(kind, endpoint).with_timeout(timeout);
    config.api_key = first_of(&["API_KEY"]);
    if let Some(model) = first_of(&["MODEL", "API_MODEL"]) {
        config.model = Some(model);
    }
    Ok(config)
}
