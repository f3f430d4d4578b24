//! Startup configuration read from the environment.

use std::{env, fmt::Display, path::PathBuf, str::FromStr};

use anyhow::anyhow;
use tracing::info;

/// Where the store keeps its records.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StoreBackend {
    Memory,
    Sqlite,
}

impl FromStr for StoreBackend {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "memory" => Ok(StoreBackend::Memory),
            "sqlite" => Ok(StoreBackend::Sqlite),
            other => Err(anyhow!("expected `memory` or `sqlite`, got `{other}`")),
        }
    }
}

#[derive(Debug, Clone)]
pub struct Config {
    pub host: String,
    pub port: u16,
    /// Bearer token for `POST /api/patient`. Empty disables the check.
    pub api_token: String,
    pub store: StoreBackend,
    pub db_path: PathBuf,
    pub seed: bool,
    pub default_limit: usize,
    pub max_limit: usize,
    pub low_stock_threshold: u32,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            host: "0.0.0.0".to_string(),
            port: 5000,
            api_token: "mysecrettoken".to_string(),
            store: StoreBackend::Memory,
            db_path: PathBuf::from("optical.db"),
            seed: true,
            default_limit: optical_core::pagination::DEFAULT_LIMIT,
            max_limit: optical_core::pagination::MAX_LIMIT,
            low_stock_threshold: optical_core::store::DEFAULT_LOW_STOCK_THRESHOLD,
        }
    }
}

impl Config {
    /// Read `OPTICAL_*` variables, falling back to defaults for unset ones.
    pub fn load() -> anyhow::Result<Self> {
        Self::from_lookup(|key| env::var(key).ok())
    }

    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> anyhow::Result<Self> {
        let defaults = Self::default();
        let config = Self {
            host: try_load(&lookup, "OPTICAL_HOST", defaults.host)?,
            port: try_load(&lookup, "OPTICAL_PORT", defaults.port)?,
            api_token: lookup("OPTICAL_API_TOKEN").unwrap_or(defaults.api_token),
            store: try_load(&lookup, "OPTICAL_STORE", defaults.store)?,
            db_path: try_load(&lookup, "OPTICAL_DB_PATH", defaults.db_path)?,
            seed: try_load(&lookup, "OPTICAL_SEED", defaults.seed)?,
            default_limit: try_load(&lookup, "OPTICAL_DEFAULT_LIMIT", defaults.default_limit)?,
            max_limit: try_load(&lookup, "OPTICAL_MAX_LIMIT", defaults.max_limit)?,
            low_stock_threshold: try_load(&lookup, "OPTICAL_LOW_STOCK", defaults.low_stock_threshold)?,
        };

        if config.default_limit == 0 || config.max_limit == 0 {
            return Err(anyhow!("page limits must be at least 1"));
        }
        Ok(config)
    }

    pub fn address(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}

fn try_load<T>(lookup: &impl Fn(&str) -> Option<String>, key: &str, default: T) -> anyhow::Result<T>
where
    T: FromStr + std::fmt::Debug,
    T::Err: Display,
{
    match lookup(key) {
        Some(raw) => raw
            .trim()
            .parse()
            .map_err(|e| anyhow!("Invalid {key} value {raw:?}: {e}")),
        None => {
            info!("{key} not set, using default: {default:?}");
            Ok(default)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn from(vars: &[(&str, &str)]) -> anyhow::Result<Config> {
        let vars: HashMap<String, String> = vars
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        Config::from_lookup(|key| vars.get(key).cloned())
    }

    #[test]
    fn test_defaults() {
        let config = from(&[]).unwrap();
        assert_eq!(config.port, 5000);
        assert_eq!(config.api_token, "mysecrettoken");
        assert_eq!(config.store, StoreBackend::Memory);
        assert_eq!(config.default_limit, 10);
        assert_eq!(config.max_limit, 100);
        assert!(config.seed);
        assert_eq!(config.address(), "0.0.0.0:5000");
    }

    #[test]
    fn test_overrides() {
        let config = from(&[
            ("OPTICAL_PORT", "8080"),
            ("OPTICAL_STORE", "SQLite"),
            ("OPTICAL_SEED", "false"),
            ("OPTICAL_API_TOKEN", ""),
        ])
        .unwrap();
        assert_eq!(config.port, 8080);
        assert_eq!(config.store, StoreBackend::Sqlite);
        assert!(!config.seed);
        assert!(config.api_token.is_empty());
    }

    #[test]
    fn test_invalid_values_are_errors() {
        let err = from(&[("OPTICAL_PORT", "not-a-port")]).unwrap_err();
        assert!(err.to_string().contains("OPTICAL_PORT"));

        assert!(from(&[("OPTICAL_STORE", "redis")]).is_err());
        assert!(from(&[("OPTICAL_MAX_LIMIT", "0")]).is_err());
    }
}
