//! Server configuration, read from the process environment

use anyhow::{Context, Result};
use ::config::{Config, Environment};
use serde::Deserialize;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LogFormat {
    Text,
    Json,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
    pub database_url: String,
    pub database_max_connections: u32,
    pub log_format: LogFormat,
}

impl ServerConfig {
    /// Loads `HOST`, `PORT`, `DATABASE_URL`, `DATABASE_MAX_CONNECTIONS` and
    /// `LOG_FORMAT`, falling back to defaults for anything unset.
    pub fn load() -> Result<Self> {
        Self::from_environment(Environment::default())
    }

    fn from_environment(environment: Environment) -> Result<Self> {
        Config::builder()
            .set_default("host", "0.0.0.0")?
            .set_default("port", 3000)?
            .set_default("database_url", "sqlite://addrbook.db")?
            .set_default("database_max_connections", 5)?
            .set_default("log_format", "text")?
            .add_source(environment.try_parsing(true))
            .build()
            .context("Failed to read configuration")?
            .try_deserialize()
            .context("Invalid configuration")
    }

    pub fn bind_address(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn environment(vars: &[(&str, &str)]) -> Environment {
        let source = vars
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        Environment::default().source(Some(source))
    }

    #[test]
    fn test_defaults() {
        let config = ServerConfig::from_environment(environment(&[])).unwrap();

        assert_eq!(config.port, 3000);
        assert_eq!(config.bind_address(), "0.0.0.0:3000");
        assert_eq!(config.database_url, "sqlite://addrbook.db");
        assert_eq!(config.database_max_connections, 5);
        assert_eq!(config.log_format, LogFormat::Text);
    }

    #[test]
    fn test_environment_overrides() {
        let config = ServerConfig::from_environment(environment(&[
            ("PORT", "8080"),
            ("DATABASE_URL", "sqlite://data/customers.db"),
            ("DATABASE_MAX_CONNECTIONS", "10"),
            ("LOG_FORMAT", "json"),
        ]))
        .unwrap();

        assert_eq!(config.port, 8080);
        assert_eq!(config.database_url, "sqlite://data/customers.db");
        assert_eq!(config.database_max_connections, 10);
        assert_eq!(config.log_format, LogFormat::Json);
    }

    #[test]
    fn test_invalid_port_is_rejected() {
        let result = ServerConfig::from_environment(environment(&[("PORT", "not-a-port")]));

        assert!(result.is_err());
    }
}
