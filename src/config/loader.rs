//! Configuration loader for shareit
//!
//! Handles layered loading of configuration from TOML files and
//! environment variables.

use std::path::PathBuf;

use config::{Config, Environment, File, FileFormat};

use crate::config::environment::Environment as AppEnvironment;
use crate::config::error::ConfigError;
use crate::config::settings::Settings;

/// Environment variable for configuration directory
const CONFIG_DIR_ENV: &str = "SHAREIT_CONFIG_DIR";

/// Default configuration directory
const DEFAULT_CONFIG_DIR: &str = "config";

/// Environment variable prefix for configuration overrides
const ENV_PREFIX: &str = "SHAREIT";

/// Separator for nested configuration keys in environment variables
const ENV_SEPARATOR: &str = "__";

/// Configuration loader that handles layered configuration loading
///
/// Sources in order of priority (lowest first):
/// 1. `default.toml`
/// 2. `{environment}.toml`
/// 3. `local.toml`
/// 4. `SHAREIT_*` environment variables
#[derive(Debug)]
pub struct ConfigLoader {
    config_dir: PathBuf,
    /// Explicit configuration file (skips layered loading when set)
    config_file: Option<PathBuf>,
    environment: AppEnvironment,
}

impl ConfigLoader {
    /// Create a loader using `SHAREIT_CONFIG_DIR` (or `config/`) and
    /// `SHAREIT_APP_ENV`.
    pub fn new() -> Self {
        let config_dir = std::env::var(CONFIG_DIR_ENV)
            .map(PathBuf::from)
            .unwrap_or_else(|_| PathBuf::from(DEFAULT_CONFIG_DIR));

        Self {
            config_dir,
            config_file: None,
            environment: AppEnvironment::from_env(),
        }
    }

    /// Create a loader that reads exactly one configuration file.
    pub fn with_file(path: PathBuf) -> Self {
        Self {
            config_dir: PathBuf::from(DEFAULT_CONFIG_DIR),
            config_file: Some(path),
            environment: AppEnvironment::from_env(),
        }
    }

    /// Overrides the detected environment, e.g. from a CLI flag.
    pub fn with_environment(mut self, environment: AppEnvironment) -> Self {
        self.environment = environment;
        self
    }

    pub fn environment(&self) -> AppEnvironment {
        self.environment
    }

    /// Load configuration from all sources.
    pub fn load(&self) -> Result<Settings, ConfigError> {
        let mut builder = Config::builder();

        if let Some(file) = &self.config_file {
            if !file.exists() {
                return Err(ConfigError::FileNotFound(file.display().to_string()));
            }
            builder = builder.add_source(
                File::from(file.clone())
                    .format(FileFormat::Toml)
                    .required(true),
            );
        } else {
            builder = builder
                .add_source(
                    File::from(self.config_dir.join("default.toml"))
                        .format(FileFormat::Toml)
                        .required(false),
                )
                .add_source(
                    File::from(
                        self.config_dir
                            .join(format!("{}.toml", self.environment.as_str())),
                    )
                    .format(FileFormat::Toml)
                    .required(false),
                )
                .add_source(
                    File::from(self.config_dir.join("local.toml"))
                        .format(FileFormat::Toml)
                        .required(false),
                );
        }

        builder = builder.add_source(
            Environment::with_prefix(ENV_PREFIX)
                .separator(ENV_SEPARATOR)
                .try_parsing(true),
        );

        let config = builder.build()?;
        let settings: Settings = config.try_deserialize()?;
        Ok(settings)
    }
}

impl Default for ConfigLoader {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use std::io::Write;

    use super::*;

    #[test]
    fn test_missing_explicit_file_fails() {
        let loader = ConfigLoader::with_file(PathBuf::from("/nonexistent/shareit.toml"));
        assert!(matches!(loader.load(), Err(ConfigError::FileNotFound(_))));
    }

    #[test]
    fn test_load_explicit_file() {
        let mut file = tempfile::NamedTempFile::with_suffix(".toml").unwrap();
        writeln!(
            file,
            "[database]\nurl = \"postgres://localhost/shareit_test\"\n"
        )
        .unwrap();

        let loader = ConfigLoader::with_file(file.path().to_path_buf());
        let settings = loader.load().unwrap();
        assert_eq!(settings.database.url, "postgres://localhost/shareit_test");
    }

    #[test]
    fn test_missing_layered_files_fall_back_to_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let loader = ConfigLoader {
            config_dir: dir.path().to_path_buf(),
            config_file: None,
            environment: AppEnvironment::Test,
        };
        let settings = loader.load().unwrap();
        assert_eq!(settings.server.port, 9090);
    }
}
