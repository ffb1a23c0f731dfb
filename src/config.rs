use anyhow::Context;
use std::env;
use std::net::SocketAddr;
use std::path::PathBuf;

pub const DEFAULT_DATABASE_URL: &str = "sqlite://./investor_data.db?mode=rwc";
pub const DEFAULT_DATA_PATH: &str = "./data/data.csv";
pub const DEFAULT_BIND_ADDR: &str = "127.0.0.1:3000";

/// Process settings, read once at startup.
#[derive(Debug, Clone, PartialEq)]
pub struct Config {
    /// Connection target for the relational store.
    pub database_url: String,
    /// Ledger CSV used to seed an empty database.
    pub data_path: PathBuf,
    pub bind_addr: SocketAddr,
}

impl Config {
    /// Reads `DATABASE_URL` (or `DB_PATH`), `DATA_PATH` and `BIND_ADDR`, falling back to
    /// local defaults.
    pub fn from_env() -> anyhow::Result<Self> {
        Self::from_lookup(|key| env::var(key).ok())
    }

    pub fn from_lookup<F>(lookup: F) -> anyhow::Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let database_url = lookup("DATABASE_URL")
            .or_else(|| lookup("DB_PATH"))
            .unwrap_or_else(|| DEFAULT_DATABASE_URL.to_string());
        let data_path = lookup("DATA_PATH").unwrap_or_else(|| DEFAULT_DATA_PATH.to_string());
        let bind_addr = lookup("BIND_ADDR").unwrap_or_else(|| DEFAULT_BIND_ADDR.to_string());
        let bind_addr = bind_addr
            .parse::<SocketAddr>()
            .with_context(|| format!("BIND_ADDR is not a valid socket address: {bind_addr}"))?;

        Ok(Self {
            database_url,
            data_path: PathBuf::from(data_path),
            bind_addr,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn lookup_from(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let vars: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key| vars.get(key).cloned()
    }

    #[test]
    fn test_defaults_when_nothing_is_set() {
        let config = Config::from_lookup(lookup_from(&[])).unwrap();
        assert_eq!(config.database_url, DEFAULT_DATABASE_URL);
        assert_eq!(config.data_path, PathBuf::from(DEFAULT_DATA_PATH));
        assert_eq!(config.bind_addr, "127.0.0.1:3000".parse::<SocketAddr>().unwrap());
    }

    #[test]
    fn test_overrides_are_honoured() {
        let config = Config::from_lookup(lookup_from(&[
            ("DATABASE_URL", "sqlite::memory:"),
            ("DATA_PATH", "/srv/ledger.csv"),
            ("BIND_ADDR", "0.0.0.0:8000"),
        ]))
        .unwrap();
        assert_eq!(config.database_url, "sqlite::memory:");
        assert_eq!(config.data_path, PathBuf::from("/srv/ledger.csv"));
        assert_eq!(config.bind_addr.port(), 8000);
    }

    #[test]
    fn test_db_path_is_a_fallback_for_database_url() {
        let config =
            Config::from_lookup(lookup_from(&[("DB_PATH", "sqlite://./legacy.db?mode=rwc")]))
                .unwrap();
        assert_eq!(config.database_url, "sqlite://./legacy.db?mode=rwc");

        let config = Config::from_lookup(lookup_from(&[
            ("DATABASE_URL", "sqlite://./primary.db?mode=rwc"),
            ("DB_PATH", "sqlite://./legacy.db?mode=rwc"),
        ]))
        .unwrap();
        assert_eq!(config.database_url, "sqlite://./primary.db?mode=rwc");
    }

    #[test]
    fn test_invalid_bind_addr_is_rejected() {
        let err =
            Config::from_lookup(lookup_from(&[("BIND_ADDR", "not-an-address")])).unwrap_err();
        assert!(err.to_string().contains("BIND_ADDR"));
    }
}
