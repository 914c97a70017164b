use sqlx::postgres::{PgConnectOptions, PgSslMode};

use crate::error::{LoaderError, Result};

const DEFAULT_PORT: u16 = 5432;

/// Database connection parameters, read from the environment before any
/// network I/O is attempted.
#[derive(Debug, Clone)]
pub struct Config {
    pub host: String,
    pub user: String,
    pub password: String,
    pub database: String,
    pub port: u16,
}

impl Config {
    pub fn from_env() -> Result<Self> {
        Self::load(|key| std::env::var(key).ok())
    }

    fn load(get: impl Fn(&str) -> Option<String>) -> Result<Self> {
        let required =
            |key: &'static str| get(key).ok_or(LoaderError::Configuration(key));

        let port = match get("DB_PORT") {
            Some(raw) => raw.parse().map_err(|_| LoaderError::InvalidPort(raw))?,
            None => DEFAULT_PORT,
        };

        Ok(Self {
            host: required("DB_HOST")?,
            user: required("DB_USER")?,
            password: required("DB_PASSWORD")?,
            database: required("DB_NAME")?,
            port,
        })
    }

    /// Connection options for the configured server. TLS is mandatory;
    /// managed Postgres offerings terminate plaintext connections.
    pub fn connect_options(&self) -> PgConnectOptions {
        PgConnectOptions::new()
            .host(&self.host)
            .port(self.port)
            .username(&self.user)
            .password(&self.password)
            .database(&self.database)
            .ssl_mode(PgSslMode::Require)
    }
}

#[cfg(test)]
mod tests {
    use std::collections::HashMap;

    use super::*;

    fn lookup<'a>(pairs: &'a [(&'a str, &'a str)]) -> impl Fn(&str) -> Option<String> + 'a {
        let map: HashMap<&str, &str> = pairs.iter().copied().collect();
        move |key| map.get(key).map(|v| v.to_string())
    }

    const FULL: &[(&str, &str)] = &[
        ("DB_HOST", "db.example.net"),
        ("DB_USER", "loader"),
        ("DB_PASSWORD", "hunter2"),
        ("DB_NAME", "players"),
    ];

    #[test]
    fn test_defaults_port_when_unset() {
        let config = Config::load(lookup(FULL)).unwrap();
        assert_eq!(config.port, 5432);
        assert_eq!(config.host, "db.example.net");
        assert_eq!(config.database, "players");
    }

    #[test]
    fn test_honors_port_override() {
        let mut pairs = FULL.to_vec();
        pairs.push(("DB_PORT", "6543"));
        let config = Config::load(lookup(&pairs)).unwrap();
        assert_eq!(config.port, 6543);
    }

    #[test]
    fn test_reports_missing_variable_by_name() {
        let pairs: Vec<_> = FULL
            .iter()
            .copied()
            .filter(|(key, _)| *key != "DB_PASSWORD")
            .collect();
        let err = Config::load(lookup(&pairs)).unwrap_err();
        assert!(matches!(err, LoaderError::Configuration("DB_PASSWORD")));
    }

    #[test]
    fn test_rejects_non_numeric_port() {
        let mut pairs = FULL.to_vec();
        pairs.push(("DB_PORT", "default"));
        let err = Config::load(lookup(&pairs)).unwrap_err();
        assert!(matches!(err, LoaderError::InvalidPort(raw) if raw == "default"));
    }
}
