//! # Server Configuration
//!
//! ## Configuration Sources
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    Configuration Priority                               │
//! │                                                                         │
//! │  1. Environment Variables (highest priority)                           │
//! │     ROSTER_DB_PATH, ROSTER_BIND_ADDR, ROSTER_PORT, ROSTER_SEED         │
//! │                                                                         │
//! │  2. TOML Config File                                                   │
//! │     --config <path>, else <platform config dir>/server.toml            │
//! │                                                                         │
//! │  3. Default Values (lowest priority)                                   │
//! │     127.0.0.1:8080, database in the platform data directory            │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Configuration File Format
//! ```toml
//! # server.toml
//! [database]
//! path = "/var/lib/roster/roster.db"
//! max_connections = 5
//! seed = true
//!
//! [http]
//! bind_addr = "0.0.0.0"
//! port = 8080
//! ```

use serde::{Deserialize, Serialize};
use std::path::PathBuf;
use thiserror::Error;
use tracing::{debug, info};

use roster_db::DbConfig;

pub const ENV_DB_PATH: &str = "ROSTER_DB_PATH";
pub const ENV_BIND_ADDR: &str = "ROSTER_BIND_ADDR";
pub const ENV_PORT: &str = "ROSTER_PORT";
pub const ENV_SEED: &str = "ROSTER_SEED";

/// Configuration error types.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to read config file: {0}")]
    Io(#[from] std::io::Error),

    #[error("Failed to parse config file: {0}")]
    Parse(#[from] toml::de::Error),

    #[error("Invalid value for {0}")]
    InvalidValue(String),

    #[error("Invalid configuration: {0}")]
    Invalid(String),
}

/// `[database]` section.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DatabaseSettings {
    /// SQLite file. `None` uses [`DbConfig::default_path`].
    pub path: Option<PathBuf>,

    /// Pool size.
    pub max_connections: u32,

    /// Insert sample rows into empty tables at startup.
    pub seed: bool,
}

impl Default for DatabaseSettings {
    fn default() -> Self {
        DatabaseSettings {
            path: None,
            max_connections: 5,
            seed: true,
        }
    }
}

/// `[http]` section.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct HttpSettings {
    pub bind_addr: String,
    pub port: u16,
}

impl Default for HttpSettings {
    fn default() -> Self {
        HttpSettings {
            bind_addr: "127.0.0.1".to_string(),
            port: 8080,
        }
    }
}

/// Complete server configuration.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ServerConfig {
    #[serde(default)]
    pub database: DatabaseSettings,

    #[serde(default)]
    pub http: HttpSettings,
}

impl ServerConfig {
    /// Loads configuration from file, environment, and defaults.
    ///
    /// ## Load Order (later overrides earlier)
    /// 1. Default values
    /// 2. Config file (server.toml); a missing file is not an error
    /// 3. Environment variables
    pub fn load(config_path: Option<PathBuf>) -> Result<Self, ConfigError> {
        let mut config = ServerConfig::default();

        if let Some(path) = config_path.or_else(Self::default_config_path) {
            if path.exists() {
                info!(?path, "Loading server config from file");
                let contents = std::fs::read_to_string(&path)?;
                config = Self::from_toml(&contents)?;
            } else {
                debug!(?path, "Config file not found, using defaults");
            }
        }

        config.apply_overrides(|key| std::env::var(key).ok())?;
        config.validate()?;

        Ok(config)
    }

    /// Parses a `server.toml` document.
    pub fn from_toml(contents: &str) -> Result<Self, ConfigError> {
        Ok(toml::from_str(contents)?)
    }

    /// Applies `ROSTER_*` overrides read through `lookup`.
    ///
    /// Unparseable numbers and booleans are errors, not silently ignored.
    pub fn apply_overrides<F>(&mut self, lookup: F) -> Result<(), ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(path) = lookup(ENV_DB_PATH).filter(|p| !p.trim().is_empty()) {
            debug!(path = %path, "Overriding database path from environment");
            self.database.path = Some(PathBuf::from(path));
        }

        if let Some(addr) = lookup(ENV_BIND_ADDR) {
            self.http.bind_addr = addr;
        }

        if let Some(port) = lookup(ENV_PORT) {
            self.http.port = port
                .trim()
                .parse()
                .map_err(|_| ConfigError::InvalidValue(ENV_PORT.to_string()))?;
        }

        if let Some(seed) = lookup(ENV_SEED) {
            self.database.seed = parse_flag(&seed)
                .ok_or_else(|| ConfigError::InvalidValue(ENV_SEED.to_string()))?;
        }

        Ok(())
    }

    /// Validates the configuration.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.http.port == 0 {
            return Err(ConfigError::Invalid("http.port must be greater than 0".into()));
        }
        if self.http.bind_addr.trim().is_empty() {
            return Err(ConfigError::Invalid("http.bind_addr must not be empty".into()));
        }
        if self.database.max_connections == 0 {
            return Err(ConfigError::Invalid(
                "database.max_connections must be greater than 0".into(),
            ));
        }
        Ok(())
    }

    /// `bind_addr:port`, ready for `TcpListener::bind`.
    pub fn bind_address(&self) -> String {
        format!("{}:{}", self.http.bind_addr, self.http.port)
    }

    /// Resolved database file location.
    pub fn database_path(&self) -> PathBuf {
        self.database
            .path
            .clone()
            .unwrap_or_else(DbConfig::default_path)
    }

    /// Pool configuration for [`roster_db::Database::new`].
    pub fn db_config(&self) -> DbConfig {
        DbConfig::new(self.database_path()).max_connections(self.database.max_connections)
    }

    fn default_config_path() -> Option<PathBuf> {
        directories::ProjectDirs::from("lv", "roster", "roster")
            .map(|dirs| dirs.config_dir().join("server.toml"))
    }
}

fn parse_flag(value: &str) -> Option<bool> {
    match value.trim().to_ascii_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Some(true),
        "0" | "false" | "no" | "off" => Some(false),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn env(pairs: &[(&str, &str)]) -> HashMap<String, String> {
        pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect()
    }

    #[test]
    fn test_defaults_are_valid() {
        let config = ServerConfig::default();
        assert!(config.validate().is_ok());
        assert_eq!(config.bind_address(), "127.0.0.1:8080");
        assert!(config.database.seed);
    }

    #[test]
    fn test_partial_toml_keeps_defaults() {
        let config = ServerConfig::from_toml("[http]\nport = 9000\n").unwrap();
        assert_eq!(config.http.port, 9000);
        assert_eq!(config.http.bind_addr, "127.0.0.1");
        assert_eq!(config.database.max_connections, 5);
    }

    #[test]
    fn test_full_toml() {
        let config = ServerConfig::from_toml(
            r#"
            [database]
            path = "/tmp/roster.db"
            max_connections = 2
            seed = false

            [http]
            bind_addr = "0.0.0.0"
            port = 8181
            "#,
        )
        .unwrap();

        assert_eq!(config.database_path(), PathBuf::from("/tmp/roster.db"));
        assert_eq!(config.db_config().max_connections, 2);
        assert!(!config.database.seed);
        assert_eq!(config.bind_address(), "0.0.0.0:8181");
    }

    #[test]
    fn test_env_overrides() {
        let vars = env(&[
            (ENV_DB_PATH, "/data/r.db"),
            (ENV_PORT, "7070"),
            (ENV_SEED, "off"),
        ]);
        let mut config = ServerConfig::default();
        config.apply_overrides(|k| vars.get(k).cloned()).unwrap();

        assert_eq!(config.database.path, Some(PathBuf::from("/data/r.db")));
        assert_eq!(config.http.port, 7070);
        assert!(!config.database.seed);
    }

    #[test]
    fn test_bad_env_port_rejected() {
        let vars = env(&[(ENV_PORT, "eighty")]);
        let mut config = ServerConfig::default();
        let err = config.apply_overrides(|k| vars.get(k).cloned()).unwrap_err();
        assert!(matches!(err, ConfigError::InvalidValue(ref key) if key == ENV_PORT));
    }

    #[test]
    fn test_validation() {
        let mut config = ServerConfig::default();
        config.http.port = 0;
        assert!(config.validate().is_err());

        let mut config = ServerConfig::default();
        config.http.bind_addr = "  ".into();
        assert!(config.validate().is_err());

        let mut config = ServerConfig::default();
        config.database.max_connections = 0;
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_load_from_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("server.toml");
        std::fs::write(&path, "[http]\nport = 8282\n").unwrap();

        let config = ServerConfig::load(Some(path)).unwrap();
        // ROSTER_PORT may be set in the environment running the tests
        if std::env::var(ENV_PORT).is_err() {
            assert_eq!(config.http.port, 8282);
        }
    }

    #[test]
    fn test_malformed_file_is_error() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("server.toml");
        std::fs::write(&path, "[http\nport = ").unwrap();

        assert!(matches!(
            ServerConfig::load(Some(path)),
            Err(ConfigError::Parse(_))
        ));
    }
}
