//! API configuration module.
//!
//! Configuration is loaded from environment variables with fallback to defaults.
//!
//! | Variable                     | Default                 |
//! |------------------------------|-------------------------|
//! | `BAZAAR_BIND_ADDR`           | `0.0.0.0`               |
//! | `BAZAAR_PORT`                | `3000`                  |
//! | `BAZAAR_DATABASE_PATH`       | `./bazaar.db`           |
//! | `BAZAAR_DB_MAX_CONNECTIONS`  | `5`                     |
//! | `BAZAAR_STRICT_PRICE_PARAMS` | `false`                 |
//! | `BAZAAR_LOG`                 | `info,bazaar_api=debug` |
//!
//! `RUST_LOG`, when set, wins over `BAZAAR_LOG`.

use std::env;
use std::net::{IpAddr, SocketAddr};
use std::path::PathBuf;
use std::str::FromStr;

use bazaar_core::PriceParsing;
use bazaar_db::DbConfig;

/// Default tracing filter.
pub const DEFAULT_LOG_FILTER: &str = "info,bazaar_api=debug";

/// API configuration.
#[derive(Debug, Clone, PartialEq)]
pub struct ApiConfig {
    /// Interface to listen on
    pub bind_addr: IpAddr,

    /// HTTP port
    pub port: u16,

    /// SQLite database file
    pub database_path: PathBuf,

    /// Upper bound on pooled connections
    pub db_max_connections: u32,

    /// Reject non-integer price bounds instead of reading their leading digits
    pub strict_price_params: bool,

    /// tracing-subscriber filter directive
    pub log_filter: String,
}

impl ApiConfig {
    /// Load configuration from environment variables.
    pub fn load() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Load configuration through an arbitrary lookup.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let config = ApiConfig {
            bind_addr: parse_or(&lookup, "BAZAAR_BIND_ADDR", IpAddr::from([0, 0, 0, 0]))?,
            port: parse_or(&lookup, "BAZAAR_PORT", 3000)?,
            database_path: lookup("BAZAAR_DATABASE_PATH")
                .map(PathBuf::from)
                .unwrap_or_else(|| PathBuf::from("./bazaar.db")),
            db_max_connections: parse_or(&lookup, "BAZAAR_DB_MAX_CONNECTIONS", 5)?,
            strict_price_params: match lookup("BAZAAR_STRICT_PRICE_PARAMS") {
                Some(value) => parse_flag("BAZAAR_STRICT_PRICE_PARAMS", &value)?,
                None => false,
            },
            log_filter: lookup("BAZAAR_LOG").unwrap_or_else(|| DEFAULT_LOG_FILTER.to_string()),
        };

        if config.db_max_connections == 0 {
            return Err(ConfigError::InvalidValue(
                "BAZAAR_DB_MAX_CONNECTIONS".to_string(),
            ));
        }

        Ok(config)
    }

    /// Address the server binds to.
    pub fn socket_addr(&self) -> SocketAddr {
        SocketAddr::new(self.bind_addr, self.port)
    }

    /// How `min_price` / `max_price` are read.
    pub fn price_parsing(&self) -> PriceParsing {
        if self.strict_price_params {
            PriceParsing::Strict
        } else {
            PriceParsing::Lenient
        }
    }

    /// Database settings derived from this configuration.
    pub fn db_config(&self) -> DbConfig {
        DbConfig::new(&self.database_path).max_connections(self.db_max_connections)
    }
}

fn parse_or<F, T>(lookup: &F, key: &str, default: T) -> Result<T, ConfigError>
where
    F: Fn(&str) -> Option<String>,
    T: FromStr,
{
    match lookup(key) {
        Some(value) => value
            .trim()
            .parse()
            .map_err(|_| ConfigError::InvalidValue(key.to_string())),
        None => Ok(default),
    }
}

fn parse_flag(key: &str, value: &str) -> Result<bool, ConfigError> {
    match value.trim().to_ascii_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Ok(true),
        "0" | "false" | "no" | "off" | "" => Ok(false),
        _ => Err(ConfigError::InvalidValue(key.to_string())),
    }
}

/// Configuration error types.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Invalid value for {0}")]
    InvalidValue(String),
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn load(vars: &[(&str, &str)]) -> Result<ApiConfig, ConfigError> {
        let vars: HashMap<String, String> = vars
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        ApiConfig::from_lookup(|key| vars.get(key).cloned())
    }

    #[test]
    fn test_defaults() {
        let config = load(&[]).unwrap();
        assert_eq!(config.socket_addr().to_string(), "0.0.0.0:3000");
        assert_eq!(config.database_path, PathBuf::from("./bazaar.db"));
        assert_eq!(config.db_max_connections, 5);
        assert_eq!(config.price_parsing(), PriceParsing::Lenient);
        assert_eq!(config.log_filter, DEFAULT_LOG_FILTER);
    }

    #[test]
    fn test_overrides() {
        let config = load(&[
            ("BAZAAR_BIND_ADDR", "127.0.0.1"),
            ("BAZAAR_PORT", "8080"),
            ("BAZAAR_DATABASE_PATH", "/tmp/shop.db"),
            ("BAZAAR_DB_MAX_CONNECTIONS", "2"),
            ("BAZAAR_STRICT_PRICE_PARAMS", "true"),
            ("BAZAAR_LOG", "warn"),
        ])
        .unwrap();

        assert_eq!(config.socket_addr().to_string(), "127.0.0.1:8080");
        assert_eq!(config.db_config().database_path, PathBuf::from("/tmp/shop.db"));
        assert_eq!(config.db_config().max_connections, 2);
        assert_eq!(config.price_parsing(), PriceParsing::Strict);
        assert_eq!(config.log_filter, "warn");
    }

    #[test]
    fn test_invalid_values() {
        for (key, value) in [
            ("BAZAAR_PORT", "http"),
            ("BAZAAR_PORT", "70000"),
            ("BAZAAR_BIND_ADDR", "localhost"),
            ("BAZAAR_DB_MAX_CONNECTIONS", "0"),
            ("BAZAAR_STRICT_PRICE_PARAMS", "maybe"),
        ] {
            let err = load(&[(key, value)]).unwrap_err();
            assert_eq!(err.to_string(), format!("Invalid value for {key}"));
        }
    }
}
