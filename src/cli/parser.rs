//! CLI argument parsing with clap.

use clap::{Parser, Subcommand, ValueEnum};
use std::path::PathBuf;

// Include shadow-rs generated build information
use shadow_rs::shadow;
shadow!(build);

/// A two-tier item sharing backend
#[derive(Parser, Debug)]
#[command(name = "shareit")]
#[command(about = "A peer-to-peer item sharing service")]
#[command(long_about = "
ShareIt is a peer-to-peer item sharing backend: users list items, book
them over date ranges, comment after completed rentals, and post item
requests. It runs as two processes from one binary:

    shareit serve      # the backend (business rules + persistence)
    shareit gateway    # the validating HTTP gateway in front of it
    shareit migrate    # apply database schema migrations

EXAMPLES:
    # Start the backend with default configuration
    shareit serve

    # Start the gateway against a remote backend
    SHAREIT__GATEWAY__BACKEND_URL=http://backend:9090 shareit gateway

    # Use a custom configuration file
    shareit --config /etc/shareit/production.toml serve

    # Preview pending migrations
    shareit migrate --dry-run
")]
#[command(version = build::CLAP_LONG_VERSION)]
pub struct Cli {
    /// Subcommand to execute
    #[command(subcommand)]
    pub command: Option<Commands>,

    /// Configuration file path
    ///
    /// Use a single TOML file instead of the layered config/ directory.
    #[arg(short, long, value_name = "FILE")]
    pub config: Option<PathBuf>,

    /// Override environment detection
    ///
    /// Forces a specific environment instead of reading SHAREIT_APP_ENV.
    #[arg(short, long, value_enum)]
    pub env: Option<EnvironmentArg>,

    /// Enable verbose logging (debug level)
    #[arg(short, long)]
    pub verbose: bool,

    /// Suppress non-error output
    #[arg(short, long, conflicts_with = "verbose")]
    pub quiet: bool,
}

/// Available subcommands
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Start the backend server (default)
    Serve {
        /// Host address to bind to, overriding [server].host
        #[arg(long, value_name = "ADDRESS")]
        host: Option<String>,

        /// Port number to listen on, overriding [server].port
        #[arg(short, long, value_name = "PORT")]
        port: Option<u16>,

        /// Validate configuration and exit
        #[arg(long)]
        dry_run: bool,
    },
    /// Start the gateway in front of a running backend
    Gateway {
        /// Host address to bind to, overriding [gateway].host
        #[arg(long, value_name = "ADDRESS")]
        host: Option<String>,

        /// Port number to listen on, overriding [gateway].port
        #[arg(short, long, value_name = "PORT")]
        port: Option<u16>,

        /// Validate configuration and exit
        #[arg(long)]
        dry_run: bool,
    },
    /// Database migration operations
    Migrate {
        /// Show pending migrations without applying
        #[arg(long, conflicts_with = "rollback")]
        dry_run: bool,

        /// Number of migrations to rollback
        #[arg(long, value_name = "STEPS")]
        rollback: Option<u32>,
    },
}

/// Environment options
#[derive(ValueEnum, Clone, Copy, Debug)]
pub enum EnvironmentArg {
    #[value(name = "development", alias = "dev")]
    Development,
    #[value(name = "production", alias = "prod")]
    Production,
    #[value(name = "test")]
    Test,
}

impl From<EnvironmentArg> for crate::config::Environment {
    fn from(arg: EnvironmentArg) -> Self {
        match arg {
            EnvironmentArg::Development => crate::config::Environment::Development,
            EnvironmentArg::Production => crate::config::Environment::Production,
            EnvironmentArg::Test => crate::config::Environment::Test,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parses_serve_with_port() {
        let cli = Cli::try_parse_from(["shareit", "serve", "--port", "8081"]).unwrap();
        match cli.command {
            Some(Commands::Serve { port, .. }) => assert_eq!(port, Some(8081)),
            other => panic!("Expected serve command, got: {:?}", other),
        }
    }

    #[test]
    fn test_parses_gateway_command() {
        let cli = Cli::try_parse_from(["shareit", "gateway"]).unwrap();
        assert!(matches!(cli.command, Some(Commands::Gateway { .. })));
    }

    #[test]
    fn test_migrate_dry_run_conflicts_with_rollback() {
        let result =
            Cli::try_parse_from(["shareit", "migrate", "--dry-run", "--rollback", "2"]);
        assert!(result.is_err());
    }

    #[test]
    fn test_verbose_conflicts_with_quiet() {
        let result = Cli::try_parse_from(["shareit", "--verbose", "--quiet", "serve"]);
        assert!(result.is_err());
    }

    #[test]
    fn test_env_alias() {
        let cli = Cli::try_parse_from(["shareit", "--env", "prod", "serve"]).unwrap();
        assert!(matches!(cli.env, Some(EnvironmentArg::Production)));
    }
}
