//! Engine configuration from environment variables.

use std::time::Duration;

use super::dnd5e_api::{DEFAULT_CATALOG_BASE_URL, DEFAULT_CATALOG_TIMEOUT_SECS};

/// Default TTL for cached catalog responses (one hour).
pub const DEFAULT_CATALOG_CACHE_TTL_SECS: u64 = 3600;

const BASE_URL_VAR: &str = "CATALOG_BASE_URL";
const TIMEOUT_VAR: &str = "CATALOG_TIMEOUT_SECS";
const CACHE_TTL_VAR: &str = "CATALOG_CACHE_TTL_SECS";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EngineConfig {
    pub catalog_base_url: String,
    pub catalog_timeout_secs: u64,
    /// `None` disables the response cache.
    pub catalog_cache_ttl: Option<Duration>,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            catalog_base_url: DEFAULT_CATALOG_BASE_URL.to_string(),
            catalog_timeout_secs: DEFAULT_CATALOG_TIMEOUT_SECS,
            catalog_cache_ttl: Some(Duration::from_secs(DEFAULT_CATALOG_CACHE_TTL_SECS)),
        }
    }
}

impl EngineConfig {
    /// Read `CATALOG_BASE_URL`, `CATALOG_TIMEOUT_SECS` and
    /// `CATALOG_CACHE_TTL_SECS`, falling back to defaults.
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Build from an arbitrary key lookup. Blank values count as unset and
    /// unparseable numbers fall back to the default with a warning.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let defaults = Self::default();
        let value = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());

        let catalog_base_url = value(BASE_URL_VAR)
            .map(|v| v.trim().to_string())
            .unwrap_or(defaults.catalog_base_url);

        let catalog_timeout_secs = match value(TIMEOUT_VAR).map(|v| parse_secs(TIMEOUT_VAR, &v)) {
            Some(Some(0)) => {
                tracing::warn!(var = TIMEOUT_VAR, "Zero timeout is not allowed, using default");
                defaults.catalog_timeout_secs
            }
            Some(Some(secs)) => secs,
            Some(None) | None => defaults.catalog_timeout_secs,
        };

        let catalog_cache_ttl = match value(CACHE_TTL_VAR).map(|v| parse_secs(CACHE_TTL_VAR, &v)) {
            Some(Some(0)) => None,
            Some(Some(secs)) => Some(Duration::from_secs(secs)),
            Some(None) | None => defaults.catalog_cache_ttl,
        };

        Self {
            catalog_base_url,
            catalog_timeout_secs,
            catalog_cache_ttl,
        }
    }
}

fn parse_secs(var: &str, raw: &str) -> Option<u64> {
    match raw.trim().parse::<u64>() {
        Ok(secs) => Some(secs),
        Err(e) => {
            tracing::warn!(var, value = raw, error = %e, "Invalid number of seconds, using default");
            None
        }
    }
}
