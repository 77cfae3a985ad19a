//! Configuration module for lectern.

use serde::Deserialize;
use std::path::Path;

use crate::{LecternError, Result};

/// Database configuration.
#[derive(Debug, Clone, Deserialize)]
pub struct DatabaseConfig {
    /// Path to the SQLite database file.
    #[serde(default = "default_db_path")]
    pub path: String,
}

fn default_db_path() -> String {
    "data/lectern.db".to_string()
}

impl Default for DatabaseConfig {
    fn default() -> Self {
        Self {
            path: default_db_path(),
        }
    }
}

/// Logging configuration.
#[derive(Debug, Clone, Deserialize)]
pub struct LoggingConfig {
    /// Log level (trace, debug, info, warn, error).
    #[serde(default = "default_log_level")]
    pub level: String,
    /// Path to the log file.
    #[serde(default = "default_log_file")]
    pub file: String,
}

fn default_log_level() -> String {
    "info".to_string()
}

fn default_log_file() -> String {
    "logs/lectern.log".to_string()
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: default_log_level(),
            file: default_log_file(),
        }
    }
}

/// Authentication configuration.
///
/// The bootstrap credential pairs are development defaults; a deployment
/// overrides them in its config file or injects its own credential store.
#[derive(Debug, Clone, Deserialize)]
pub struct AuthConfig {
    /// Session lifetime in seconds for email and OAuth sign-ins.
    #[serde(default = "default_session_secs")]
    pub session_secs: u64,
    /// Session lifetime in seconds for admin sign-ins.
    #[serde(default = "default_admin_session_secs")]
    pub admin_session_secs: u64,
    /// Admin login username.
    #[serde(default = "default_admin_username")]
    pub admin_username: String,
    /// Admin login password (hashed at startup, never compared in plaintext).
    #[serde(default = "default_admin_password")]
    pub admin_password: String,
    /// Email address recorded on the lazily created admin account.
    #[serde(default = "default_admin_email")]
    pub admin_email: String,
    /// Demo email account accepted by the email provider.
    #[serde(default = "default_demo_email")]
    pub demo_email: String,
    /// Password for the demo email account (hashed at startup).
    #[serde(default = "default_demo_password")]
    pub demo_password: String,
    /// Base URL of the OAuth token-introspection endpoint.
    #[serde(default = "default_introspection_url")]
    pub introspection_url: String,
    /// Timeout in seconds for the introspection call.
    #[serde(default = "default_introspection_timeout")]
    pub introspection_timeout_secs: u64,
}

fn default_session_secs() -> u64 {
    24 * 60 * 60
}

fn default_admin_session_secs() -> u64 {
    8 * 60 * 60
}

fn default_admin_username() -> String {
    "admin".to_string()
}

fn default_admin_password() -> String {
    "B1950".to_string()
}

fn default_admin_email() -> String {
    "admin@example.com".to_string()
}

fn default_demo_email() -> String {
    "test@example.com".to_string()
}

fn default_demo_password() -> String {
    "password".to_string()
}

fn default_introspection_url() -> String {
    "https://www.googleapis.com/oauth2/v3".to_string()
}

fn default_introspection_timeout() -> u64 {
    10
}

impl Default for AuthConfig {
    fn default() -> Self {
        Self {
            session_secs: default_session_secs(),
            admin_session_secs: default_admin_session_secs(),
            admin_username: default_admin_username(),
            admin_password: default_admin_password(),
            admin_email: default_admin_email(),
            demo_email: default_demo_email(),
            demo_password: default_demo_password(),
            introspection_url: default_introspection_url(),
            introspection_timeout_secs: default_introspection_timeout(),
        }
    }
}

/// Top-level configuration.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct Config {
    /// Database settings.
    #[serde(default)]
    pub database: DatabaseConfig,
    /// Logging settings.
    #[serde(default)]
    pub logging: LoggingConfig,
    /// Authentication settings.
    #[serde(default)]
    pub auth: AuthConfig,
}

impl Config {
    /// Load configuration from a TOML file.
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = std::fs::read_to_string(path.as_ref()).map_err(LecternError::Io)?;
        Self::parse(&content)
    }

    /// Load configuration from a TOML file, falling back to defaults if
    /// the file does not exist.
    pub fn load_or_default<P: AsRef<Path>>(path: P) -> Result<Self> {
        if path.as_ref().exists() {
            Self::load(path)
        } else {
            Ok(Self::default())
        }
    }

    /// Parse configuration from a TOML string.
    pub fn parse(s: &str) -> Result<Self> {
        toml::from_str(s).map_err(|e| LecternError::Config(format!("config parse error: {e}")))
    }
}
