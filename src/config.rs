//! Configuration management for the portal server
//!
//! Values come from code defaults, an optional `config.toml`, and
//! `PORTAL__*` environment overrides, in that order of precedence.

use config::{Config, Environment, File};
use serde::Deserialize;
use std::path::PathBuf;
use std::time::Duration;

/// Complete server configuration
#[derive(Debug, Deserialize, Clone)]
pub struct ServerConfig {
    // ═══ NETWORK ═══
    /// IP address the HTTP listener binds to
    pub bind_address: String,

    /// Port for the HTTP listener
    pub port: u16,

    // ═══ PERSISTENCE ═══
    /// Directory holding the record document and the action log
    pub data_dir: String,

    /// File name of the JSON record document inside `data_dir`
    pub records_file: String,

    /// File name of the action log inside `data_dir`
    pub actions_file: String,

    // ═══ SESSIONS ═══
    /// Name of the cookie carrying the session token
    pub session_cookie: String,

    /// Sliding session lifetime
    pub session_ttl_secs: u64,

    /// How often expired sessions are swept from the store
    pub session_sweep_interval_secs: u64,

    // ═══ PREFERENCES ═══
    /// Lifetime of the theme cookie
    pub theme_max_age_days: i64,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            bind_address: "127.0.0.1".to_string(),
            port: 3001,
            data_dir: "./data".to_string(),
            records_file: "usuarios.json".to_string(),
            actions_file: "logs.txt".to_string(),
            session_cookie: "sid".to_string(),
            session_ttl_secs: 30 * 60,
            session_sweep_interval_secs: 60,
            theme_max_age_days: 7,
        }
    }
}

impl ServerConfig {
    /// Load configuration from `config.toml` (optional) with environment overrides
    pub fn load() -> Result<Self, config::ConfigError> {
        let defaults = ServerConfig::default();

        let settings = Config::builder()
            .set_default("bind_address", defaults.bind_address)?
            .set_default("port", defaults.port as i64)?
            .set_default("data_dir", defaults.data_dir)?
            .set_default("records_file", defaults.records_file)?
            .set_default("actions_file", defaults.actions_file)?
            .set_default("session_cookie", defaults.session_cookie)?
            .set_default("session_ttl_secs", defaults.session_ttl_secs as i64)?
            .set_default(
                "session_sweep_interval_secs",
                defaults.session_sweep_interval_secs as i64,
            )?
            .set_default("theme_max_age_days", defaults.theme_max_age_days)?
            .add_source(File::with_name("config").required(false))
            .add_source(Environment::with_prefix("PORTAL").separator("__"))
            .build()?;

        let config: ServerConfig = settings.try_deserialize()?;
        config.validate()?;
        Ok(config)
    }

    /// Validation for all configuration values
    pub fn validate(&self) -> Result<(), config::ConfigError> {
        if self.port == 0 {
            return Err(config::ConfigError::Message("port cannot be 0".into()));
        }

        if self.data_dir.trim().is_empty() {
            return Err(config::ConfigError::Message(
                "data_dir cannot be empty".into(),
            ));
        }

        if self.records_file.trim().is_empty() || self.actions_file.trim().is_empty() {
            return Err(config::ConfigError::Message(
                "records_file and actions_file cannot be empty".into(),
            ));
        }

        if self.session_cookie.trim().is_empty() {
            return Err(config::ConfigError::Message(
                "session_cookie cannot be empty".into(),
            ));
        }

        if self.session_ttl_secs == 0 || self.session_sweep_interval_secs == 0 {
            return Err(config::ConfigError::Message(
                "session_ttl_secs and session_sweep_interval_secs must be greater than 0".into(),
            ));
        }

        if self.theme_max_age_days <= 0 {
            return Err(config::ConfigError::Message(
                "theme_max_age_days must be greater than 0".into(),
            ));
        }

        Ok(())
    }

    /// Bind address and port as a string
    pub fn listen_addr(&self) -> String {
        format!("{}:{}", self.bind_address, self.port)
    }

    /// Data directory as PathBuf
    pub fn data_dir_path(&self) -> PathBuf {
        PathBuf::from(&self.data_dir)
    }

    /// Full path of the user record document
    pub fn records_path(&self) -> PathBuf {
        self.data_dir_path().join(&self.records_file)
    }

    /// Full path of the action log
    pub fn actions_path(&self) -> PathBuf {
        self.data_dir_path().join(&self.actions_file)
    }

    pub fn session_ttl(&self) -> Duration {
        Duration::from_secs(self.session_ttl_secs)
    }

    pub fn session_sweep_interval(&self) -> Duration {
        Duration::from_secs(self.session_sweep_interval_secs)
    }

    /// Configuration rooted at a different data directory, used by tests
    pub fn with_data_dir(mut self, data_dir: impl Into<PathBuf>) -> Self {
        self.data_dir = data_dir.into().to_string_lossy().to_string();
        self
    }
}
