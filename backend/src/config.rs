//! Configuration management for the directory back office
//!
//! Supports hierarchical configuration loading:
//! 1. Default values in code
//! 2. Configuration files (config/development.toml, config/production.toml)
//! 3. Environment variable overrides with DIRDESK_ prefix (DIRDESK_DATABASE__URL)

use config::{builder::DefaultState, ConfigBuilder, ConfigError, Environment, File};
use serde::Deserialize;

/// Main application configuration
#[derive(Debug, Deserialize, Clone, Default)]
pub struct Config {
    /// Current environment (development, production)
    pub environment: String,

    /// Server configuration
    pub server: ServerConfig,

    /// Which store backs the gateway
    pub storage: StorageConfig,

    /// Database configuration
    pub database: DatabaseConfig,

    /// Admin directory settings
    pub listings: ListingsConfig,

    /// Analytics side-channel settings
    pub analytics: AnalyticsConfig,

    /// Admin assistant endpoint
    pub assistant: AssistantConfig,

    /// Log output settings
    pub log: LogConfig,
}

#[derive(Debug, Deserialize, Clone)]
pub struct ServerConfig {
    /// Server port
    pub port: u16,

    /// Server host
    pub host: String,
}

#[derive(Debug, Deserialize, Clone, Copy, PartialEq, Eq, Default)]
#[serde(rename_all = "lowercase")]
pub enum StorageBackend {
    Postgres,
    #[default]
    Memory,
}

impl std::fmt::Display for StorageBackend {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            StorageBackend::Postgres => write!(f, "postgres"),
            StorageBackend::Memory => write!(f, "memory"),
        }
    }
}

#[derive(Debug, Deserialize, Clone, Default)]
pub struct StorageConfig {
    pub backend: StorageBackend,
}

#[derive(Debug, Deserialize, Clone)]
pub struct DatabaseConfig {
    /// PostgreSQL connection URL
    pub url: String,

    /// Maximum number of connections in the pool
    pub max_connections: u32,

    /// Minimum number of connections in the pool
    pub min_connections: u32,
}

#[derive(Debug, Deserialize, Clone)]
pub struct ListingsConfig {
    /// Rows per page in the admin directory
    pub page_size: u32,
}

#[derive(Debug, Deserialize, Clone)]
pub struct AnalyticsConfig {
    pub enabled: bool,
}

#[derive(Debug, Deserialize, Clone)]
pub struct AssistantConfig {
    /// Chat endpoint; the assistant route is disabled when unset
    pub endpoint: Option<String>,

    /// Request timeout in seconds
    pub timeout_secs: u64,
}

#[derive(Debug, Deserialize, Clone, Default)]
pub struct LogConfig {
    /// Emit JSON lines instead of human-readable output
    pub json: bool,
}

impl Config {
    /// Load configuration from files and environment variables
    pub fn load() -> Result<Self, ConfigError> {
        let environment =
            std::env::var("DIRDESK_ENVIRONMENT").unwrap_or_else(|_| "development".into());

        let config = Self::defaults(&environment)?
            // Load environment-specific config file
            .add_source(File::with_name(&format!("config/{}", environment)).required(false))
            // Override with environment variables (DIRDESK_ prefix)
            .add_source(
                Environment::with_prefix("DIRDESK")
                    .prefix_separator("_")
                    .separator("__")
                    .try_parsing(true),
            )
            .build()?;

        let config: Config = config.try_deserialize()?;
        config.validate()?;
        Ok(config)
    }

    /// Builder seeded with every default value
    pub fn defaults(environment: &str) -> Result<ConfigBuilder<DefaultState>, ConfigError> {
        config::Config::builder()
            .set_default("environment", environment)?
            .set_default("server.port", 3000)?
            .set_default("server.host", "0.0.0.0")?
            .set_default("storage.backend", "postgres")?
            .set_default("database.url", "")?
            .set_default("database.max_connections", 10)?
            .set_default("database.min_connections", 2)?
            .set_default("listings.page_size", i64::from(shared::LISTING_PAGE_SIZE))?
            .set_default("analytics.enabled", true)?
            .set_default("assistant.timeout_secs", 30)?
            .set_default("log.json", false)
    }

    /// Reject combinations that cannot start
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.storage.backend == StorageBackend::Postgres && self.database.url.is_empty() {
            return Err(ConfigError::Message(
                "database.url is required for the postgres storage backend".to_string(),
            ));
        }
        if self.listings.page_size == 0 {
            return Err(ConfigError::Message(
                "listings.page_size must be at least 1".to_string(),
            ));
        }
        Ok(())
    }

    pub fn is_development(&self) -> bool {
        self.environment == "development"
    }
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            port: 3000,
            host: "0.0.0.0".to_string(),
        }
    }
}

impl Default for DatabaseConfig {
    fn default() -> Self {
        Self {
            url: String::new(),
            max_connections: 10,
            min_connections: 2,
        }
    }
}

impl Default for ListingsConfig {
    fn default() -> Self {
        Self {
            page_size: shared::LISTING_PAGE_SIZE,
        }
    }
}

impl Default for AnalyticsConfig {
    fn default() -> Self {
        Self { enabled: true }
    }
}

impl Default for AssistantConfig {
    fn default() -> Self {
        Self {
            endpoint: None,
            timeout_secs: 30,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_require_database_url() {
        let config: Config = Config::defaults("test")
            .unwrap()
            .build()
            .unwrap()
            .try_deserialize()
            .unwrap();

        assert_eq!(config.storage.backend, StorageBackend::Postgres);
        assert_eq!(config.listings.page_size, 10);
        assert!(config.analytics.enabled);
        assert!(config.assistant.endpoint.is_none());
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_memory_backend_needs_no_database() {
        let config: Config = Config::defaults("test")
            .unwrap()
            .set_override("storage.backend", "memory")
            .unwrap()
            .set_override("assistant.endpoint", "http://localhost:9000/chat")
            .unwrap()
            .build()
            .unwrap()
            .try_deserialize()
            .unwrap();

        assert_eq!(config.storage.backend, StorageBackend::Memory);
        assert_eq!(
            config.assistant.endpoint.as_deref(),
            Some("http://localhost:9000/chat")
        );
        assert!(config.validate().is_ok());
    }
}
