//! Environment configuration.

use std::env;

use dotenv::dotenv;

use crate::error::Error;

#[derive(Debug, Clone, PartialEq)]
pub struct Config {
    // Server configuration
    pub server_host: String,
    pub server_port: u16,

    // Database configuration
    pub database_url: String,
    pub database_max_connections: u32,
}

impl Config {
    /// Loads `.env` if present, then reads the process environment.
    pub fn from_env() -> Result<Self, Error> {
        dotenv().ok();
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Builds the configuration from any key lookup, applying defaults for
    /// unset keys.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, Error> {
        let server_host = lookup("SERVER_HOST").unwrap_or_else(|| "0.0.0.0".to_string());
        let server_port = parse_var(&lookup, "SERVER_PORT", 8080)?;

        let database_url = lookup("DATABASE_URL")
            .unwrap_or_else(|| "sqlite://customers.db?mode=rwc".to_string());
        let database_max_connections = parse_var(&lookup, "DATABASE_MAX_CONNECTIONS", 5)?;

        Ok(Config {
            server_host,
            server_port,
            database_url,
            database_max_connections,
        })
    }

    pub fn server_address(&self) -> String {
        format!("{}:{}", self.server_host, self.server_port)
    }
}

fn parse_var<T>(lookup: &impl Fn(&str) -> Option<String>, key: &str, default: T) -> Result<T, Error>
where
    T: std::str::FromStr,
    T::Err: std::fmt::Display,
{
    match lookup(key) {
        Some(raw) => raw
            .trim()
            .parse()
            .map_err(|e| Error::Config(format!("{key} must be a valid number, got `{raw}`: {e}"))),
        None => Ok(default),
    }
}

#[cfg(test)]
mod tests {
    use std::collections::HashMap;

    use super::*;

    fn lookup(vars: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let vars: HashMap<String, String> = vars.iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key| vars.get(key).cloned()
    }

    #[test]
    fn defaults_apply_when_unset() {
        let config = Config::from_lookup(lookup(&[])).unwrap();
        assert_eq!(config.server_address(), "0.0.0.0:8080");
        assert_eq!(config.database_url, "sqlite://customers.db?mode=rwc");
        assert_eq!(config.database_max_connections, 5);
    }

    #[test]
    fn reads_overrides() {
        let config = Config::from_lookup(lookup(&[
            ("SERVER_HOST", "127.0.0.1"),
            ("SERVER_PORT", "3000"),
            ("DATABASE_URL", "sqlite::memory:"),
            ("DATABASE_MAX_CONNECTIONS", "1"),
        ]))
        .unwrap();
        assert_eq!(config.server_address(), "127.0.0.1:3000");
        assert_eq!(config.database_url, "sqlite::memory:");
        assert_eq!(config.database_max_connections, 1);
    }

    #[test]
    fn malformed_port_is_a_config_error() {
        let err = Config::from_lookup(lookup(&[("SERVER_PORT", "eighty")])).unwrap_err();
        assert!(matches!(err, Error::Config(msg) if msg.contains("SERVER_PORT")));
    }
}
