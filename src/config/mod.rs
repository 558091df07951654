//! Configuration management module for shareit
//!
//! Provides layered configuration loading:
//! 1. `default.toml` - Base default configuration
//! 2. `{environment}.toml` - Environment-specific configuration
//! 3. `local.toml` - Local development overrides (not committed)
//! 4. `SHAREIT_*` environment variables (highest priority)

pub mod environment;
pub mod error;
pub mod loader;
pub mod settings;

pub use environment::Environment;
pub use error::ConfigError;
pub use loader::ConfigLoader;
pub use settings::{DatabaseConfig, GatewayConfig, Settings};
