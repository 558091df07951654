//! CLI module for shareit.
//!
//! Argument parsing with clap plus the glue that turns parsed arguments
//! into loaded settings and an initialized logger.

mod migrate;
pub mod parser;

pub use migrate::MigrateCommandHandler;
pub use parser::{Cli, Commands, EnvironmentArg};

use crate::config::settings::Settings;
use crate::config::{ConfigError, ConfigLoader};
use crate::logger::init_logger;

/// Loads settings honoring the global CLI flags.
///
/// `--config` switches to single-file loading, `--env` overrides the
/// detected environment, and `--verbose`/`--quiet` override the logger
/// level. Host/port flags of the serve and gateway subcommands are
/// applied on top of the file values.
pub fn load_settings(cli: &Cli) -> Result<Settings, ConfigError> {
    let mut loader = match &cli.config {
        Some(path) => ConfigLoader::with_file(path.clone()),
        None => ConfigLoader::new(),
    };
    if let Some(env) = cli.env {
        loader = loader.with_environment(env.into());
    }

    let mut settings = loader.load()?;

    if cli.verbose {
        settings.logger.level = "debug".to_string();
    } else if cli.quiet {
        settings.logger.level = "error".to_string();
    }

    match &cli.command {
        Some(Commands::Serve { host, port, .. }) => {
            if let Some(host) = host {
                settings.server.host = host.clone();
            }
            if let Some(port) = port {
                settings.server.port = *port;
            }
        }
        Some(Commands::Gateway { host, port, .. }) => {
            if let Some(host) = host {
                settings.gateway.host = host.clone();
            }
            if let Some(port) = port {
                settings.gateway.port = *port;
            }
        }
        _ => {}
    }

    Ok(settings)
}

/// Initializes the global logger from the loaded settings.
pub fn init_logger_from_settings(settings: &Settings) -> anyhow::Result<()> {
    let logger_config = settings.logger.to_logger_config()?;
    init_logger(&logger_config)
}

#[cfg(test)]
mod tests {
    use clap::Parser;

    use super::*;

    #[test]
    fn test_serve_port_flag_overrides_settings() {
        let cli = Cli::try_parse_from(["shareit", "serve", "--port", "8123"]).unwrap();
        let settings = load_settings(&cli).unwrap();
        assert_eq!(settings.server.port, 8123);
    }

    #[test]
    fn test_verbose_flag_raises_log_level() {
        let cli = Cli::try_parse_from(["shareit", "--verbose", "serve"]).unwrap();
        let settings = load_settings(&cli).unwrap();
        assert_eq!(settings.logger.level, "debug");
    }
}
