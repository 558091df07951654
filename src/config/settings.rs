//! Configuration settings structures for shareit
//!
//! Defines all configuration that can be loaded from TOML files and
//! `SHAREIT_*` environment variables.

use serde::{Deserialize, Serialize};

use crate::config::error::ConfigError;
use crate::logger::{ConsoleConfig, FileConfig, LogFormat, LoggerConfig};

// ============================================================================
// Default value functions
// ============================================================================

fn default_app_name() -> String {
    "shareit".to_string()
}

fn default_app_version() -> String {
    crate::pkg_version().to_string()
}

fn default_host() -> String {
    "127.0.0.1".to_string()
}

fn default_port() -> u16 {
    9090
}

fn default_gateway_port() -> u16 {
    8080
}

fn default_backend_url() -> String {
    "http://127.0.0.1:9090".to_string()
}

fn default_request_timeout() -> u64 {
    30
}

fn default_max_connections() -> u32 {
    10
}

fn default_min_connections() -> u32 {
    1
}

fn default_connection_timeout() -> u64 {
    30
}

fn default_log_level() -> String {
    "info".to_string()
}

fn default_true() -> bool {
    true
}

fn default_log_path() -> String {
    "logs/shareit.log".to_string()
}

fn default_log_format() -> String {
    "full".to_string()
}

// ============================================================================
// Application Configuration
// ============================================================================

/// Application basic information configuration
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ApplicationConfig {
    #[serde(default = "default_app_name")]
    pub name: String,

    #[serde(default = "default_app_version")]
    pub version: String,
}

impl Default for ApplicationConfig {
    fn default() -> Self {
        Self {
            name: default_app_name(),
            version: default_app_version(),
        }
    }
}

// ============================================================================
// Server Configuration
// ============================================================================

/// Axum HTTP server configuration (backend process)
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ServerConfig {
    /// Server host address
    #[serde(default = "default_host")]
    pub host: String,

    /// Server port
    #[serde(default = "default_port")]
    pub port: u16,

    /// Request timeout in seconds
    #[serde(default = "default_request_timeout")]
    pub request_timeout: u64,
}

impl ServerConfig {
    /// Get the full server address as "host:port"
    pub fn address(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: default_host(),
            port: default_port(),
            request_timeout: default_request_timeout(),
        }
    }
}

// ============================================================================
// Gateway Configuration
// ============================================================================

/// Gateway process configuration: where it listens and which backend
/// it forwards validated requests to.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GatewayConfig {
    #[serde(default = "default_host")]
    pub host: String,

    #[serde(default = "default_gateway_port")]
    pub port: u16,

    /// Base URL of the backend server
    #[serde(default = "default_backend_url")]
    pub backend_url: String,

    /// Timeout for forwarded requests in seconds
    #[serde(default = "default_request_timeout")]
    pub request_timeout: u64,
}

impl GatewayConfig {
    pub fn address(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.backend_url.is_empty() {
            return Err(ConfigError::validation(
                "gateway.backend_url",
                "backend URL cannot be empty",
            ));
        }
        if !self.backend_url.starts_with("http://") && !self.backend_url.starts_with("https://") {
            return Err(ConfigError::validation(
                "gateway.backend_url",
                "backend URL must start with http:// or https://",
            ));
        }
        Ok(())
    }
}

impl Default for GatewayConfig {
    fn default() -> Self {
        Self {
            host: default_host(),
            port: default_gateway_port(),
            backend_url: default_backend_url(),
            request_timeout: default_request_timeout(),
        }
    }
}

// ============================================================================
// Database Configuration
// ============================================================================

/// Diesel database connection configuration
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DatabaseConfig {
    /// Database connection URL
    #[serde(default)]
    pub url: String,

    /// Maximum number of connections in the pool
    #[serde(default = "default_max_connections")]
    pub max_connections: u32,

    /// Minimum number of connections in the pool
    #[serde(default = "default_min_connections")]
    pub min_connections: u32,

    /// Connection timeout in seconds
    #[serde(default = "default_connection_timeout")]
    pub connection_timeout: u64,

    /// Whether to automatically run pending migrations on startup
    #[serde(default)]
    pub auto_migrate: bool,
}

impl Default for DatabaseConfig {
    fn default() -> Self {
        Self {
            url: String::new(),
            max_connections: default_max_connections(),
            min_connections: default_min_connections(),
            connection_timeout: default_connection_timeout(),
            auto_migrate: false,
        }
    }
}

// ============================================================================
// Logger Settings
// ============================================================================

/// Console output settings
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ConsoleSettings {
    #[serde(default = "default_true")]
    pub enabled: bool,

    #[serde(default = "default_true")]
    pub colored: bool,
}

impl Default for ConsoleSettings {
    fn default() -> Self {
        Self {
            enabled: default_true(),
            colored: default_true(),
        }
    }
}

/// File output settings
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FileSettings {
    #[serde(default)]
    pub enabled: bool,

    /// Path to the log file
    #[serde(default = "default_log_path")]
    pub path: String,

    /// Log format: "full", "compact", or "json"
    #[serde(default = "default_log_format")]
    pub format: String,
}

impl Default for FileSettings {
    fn default() -> Self {
        Self {
            enabled: false,
            path: default_log_path(),
            format: default_log_format(),
        }
    }
}

/// Logger configuration settings
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LoggerSettings {
    /// Log level: "trace", "debug", "info", "warn", "error"
    #[serde(default = "default_log_level")]
    pub level: String,

    #[serde(default)]
    pub console: ConsoleSettings,

    #[serde(default)]
    pub file: FileSettings,
}

impl Default for LoggerSettings {
    fn default() -> Self {
        Self {
            level: default_log_level(),
            console: ConsoleSettings::default(),
            file: FileSettings::default(),
        }
    }
}

impl LoggerSettings {
    /// Convert the file representation into the runtime LoggerConfig.
    pub fn to_logger_config(&self) -> Result<LoggerConfig, ConfigError> {
        let format = self
            .file
            .format
            .parse::<LogFormat>()
            .map_err(|e| ConfigError::validation("logger.file.format".to_string(), e))?;

        Ok(LoggerConfig {
            level: self.level.clone(),
            console: ConsoleConfig {
                enabled: self.console.enabled,
                colored: self.console.colored,
            },
            file: FileConfig {
                enabled: self.file.enabled,
                path: self.file.path.clone().into(),
                format,
            },
        })
    }
}

// ============================================================================
// Root Settings
// ============================================================================

/// Root configuration object assembled by the ConfigLoader.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Settings {
    #[serde(default)]
    pub application: ApplicationConfig,

    #[serde(default)]
    pub server: ServerConfig,

    #[serde(default)]
    pub gateway: GatewayConfig,

    #[serde(default)]
    pub database: DatabaseConfig,

    #[serde(default)]
    pub logger: LoggerSettings,
}

impl Settings {
    /// Validates settings that every run mode depends on.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.server.port == 0 {
            return Err(ConfigError::validation(
                "server.port",
                "port must be non-zero",
            ));
        }
        if self.gateway.port == 0 {
            return Err(ConfigError::validation(
                "gateway.port",
                "port must be non-zero",
            ));
        }
        self.logger.to_logger_config()?;
        Ok(())
    }

    /// Validates the settings the backend server additionally requires.
    pub fn validate_for_server(&self) -> Result<(), ConfigError> {
        self.validate()?;
        if self.database.url.is_empty() {
            return Err(ConfigError::validation(
                "database.url",
                "database URL must be configured for the server",
            ));
        }
        Ok(())
    }

    /// Validates the settings the gateway additionally requires.
    pub fn validate_for_gateway(&self) -> Result<(), ConfigError> {
        self.validate()?;
        self.gateway.validate()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_are_valid() {
        let settings = Settings::default();
        assert!(settings.validate().is_ok());
    }

    #[test]
    fn test_server_validation_requires_database_url() {
        let settings = Settings::default();
        assert!(settings.validate_for_server().is_err());

        let mut settings = Settings::default();
        settings.database.url = "postgres://localhost/shareit".to_string();
        assert!(settings.validate_for_server().is_ok());
    }

    #[test]
    fn test_gateway_validation_rejects_bad_backend_url() {
        let mut settings = Settings::default();
        settings.gateway.backend_url = "localhost:9090".to_string();
        assert!(settings.validate_for_gateway().is_err());
    }

    #[test]
    fn test_settings_deserialize_from_toml() {
        let toml = r#"
            [server]
            host = "0.0.0.0"
            port = 9191

            [database]
            url = "postgres://localhost/shareit"
            auto_migrate = true

            [gateway]
            backend_url = "http://server:9191"
        "#;
        let settings: Settings = toml::from_str(toml).unwrap();
        assert_eq!(settings.server.address(), "0.0.0.0:9191");
        assert!(settings.database.auto_migrate);
        assert_eq!(settings.gateway.backend_url, "http://server:9191");
        assert_eq!(settings.logger.level, "info");
    }

    #[test]
    fn test_bad_log_format_fails_validation() {
        let mut settings = Settings::default();
        settings.logger.file.format = "yaml".to_string();
        assert!(settings.validate().is_err());
    }
}
