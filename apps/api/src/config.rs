use std::time::Duration;

use anyhow::{Context, Result};

/// Application configuration loaded from environment variables.
/// Backends are optional: without `DATABASE_URL` / `REDIS_URL` the service
/// runs on in-memory stores, without `ANTHROPIC_API_KEY` it skips LLM features.
#[derive(Debug, Clone)]
pub struct Config {
    pub database_url: Option<String>,
    pub redis_url: Option<String>,
    pub anthropic_api_key: Option<String>,
    pub port: u16,
    pub rust_log: String,
    pub supplier_timeout: Duration,
    pub inference_cache_ttl: Duration,
}

impl Config {
    pub fn from_env() -> Result<Self> {
        dotenvy::dotenv().ok(); // load .env if present; ignore if missing
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Builds the config from an arbitrary variable source.
    pub fn from_lookup<F>(lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let optional = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());

        Ok(Config {
            database_url: optional("DATABASE_URL"),
            redis_url: optional("REDIS_URL"),
            anthropic_api_key: optional("ANTHROPIC_API_KEY"),
            port: optional("PORT")
                .unwrap_or_else(|| "8080".to_string())
                .parse::<u16>()
                .context("PORT must be a valid port number")?,
            rust_log: optional("RUST_LOG").unwrap_or_else(|| "info".to_string()),
            supplier_timeout: Duration::from_secs(
                optional("SUPPLIER_TIMEOUT_SECS")
                    .unwrap_or_else(|| "20".to_string())
                    .parse::<u64>()
                    .context("SUPPLIER_TIMEOUT_SECS must be a whole number of seconds")?,
            ),
            inference_cache_ttl: Duration::from_secs(
                optional("INFERENCE_CACHE_TTL_SECS")
                    .unwrap_or_else(|| "3600".to_string())
                    .parse::<u64>()
                    .context("INFERENCE_CACHE_TTL_SECS must be a whole number of seconds")?,
            ),
        })
    }
}

#[cfg(test)]
mod tests {
    use std::collections::HashMap;

    use super::*;

    fn config_from(vars: &[(&str, &str)]) -> Result<Config> {
        let map: HashMap<String, String> = vars
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        Config::from_lookup(|key| map.get(key).cloned())
    }

    #[test]
    fn test_defaults_when_nothing_set() {
        let config = config_from(&[]).unwrap();
        assert_eq!(config.port, 8080);
        assert_eq!(config.rust_log, "info");
        assert!(config.database_url.is_none());
        assert!(config.anthropic_api_key.is_none());
        assert_eq!(config.supplier_timeout, Duration::from_secs(20));
        assert_eq!(config.inference_cache_ttl, Duration::from_secs(3600));
    }

    #[test]
    fn test_blank_values_treated_as_unset() {
        let config = config_from(&[("REDIS_URL", "  "), ("ANTHROPIC_API_KEY", "")]).unwrap();
        assert!(config.redis_url.is_none());
        assert!(config.anthropic_api_key.is_none());
    }

    #[test]
    fn test_overrides_are_parsed() {
        let config = config_from(&[
            ("PORT", "9090"),
            ("DATABASE_URL", "postgres://localhost/career"),
            ("SUPPLIER_TIMEOUT_SECS", "5"),
        ])
        .unwrap();
        assert_eq!(config.port, 9090);
        assert_eq!(config.database_url.as_deref(), Some("postgres://localhost/career"));
        assert_eq!(config.supplier_timeout, Duration::from_secs(5));
    }

    #[test]
    fn test_invalid_numbers_rejected() {
        assert!(config_from(&[("PORT", "eighty")]).is_err());
        assert!(config_from(&[("SUPPLIER_TIMEOUT_SECS", "-1")]).is_err());
    }
}
