//! Logger module
//!
//! A logging setup based on `tracing-subscriber` with support for:
//! - Console output with color control
//! - Optional file output in Full, Compact or JSON format

use std::fs::OpenOptions;
use std::io::IsTerminal;
use std::path::PathBuf;
use std::str::FromStr;
use std::sync::Mutex;

use tracing_subscriber::{EnvFilter, Layer, fmt, layer::SubscriberExt, util::SubscriberInitExt};

/// Output format for the file layer.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LogFormat {
    Full,
    Compact,
    Json,
}

impl FromStr for LogFormat {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "full" => Ok(LogFormat::Full),
            "compact" => Ok(LogFormat::Compact),
            "json" => Ok(LogFormat::Json),
            other => Err(format!("unknown log format '{}'", other)),
        }
    }
}

/// Console output configuration.
#[derive(Debug, Clone)]
pub struct ConsoleConfig {
    pub enabled: bool,
    pub colored: bool,
}

/// File output configuration.
#[derive(Debug, Clone)]
pub struct FileConfig {
    pub enabled: bool,
    pub path: PathBuf,
    pub format: LogFormat,
}

/// Runtime logger configuration, assembled from LoggerSettings.
#[derive(Debug, Clone)]
pub struct LoggerConfig {
    pub level: String,
    pub console: ConsoleConfig,
    pub file: FileConfig,
}

/// Initialize the global tracing subscriber from the given configuration.
pub fn init_logger(config: &LoggerConfig) -> anyhow::Result<()> {
    let filter = EnvFilter::try_new(&config.level).unwrap_or_else(|_| EnvFilter::new("info"));

    let console_layer = if config.console.enabled {
        let use_ansi = config.console.colored && std::io::stdout().is_terminal();
        Some(
            fmt::layer()
                .with_ansi(use_ansi)
                .with_target(true)
                .with_level(true),
        )
    } else {
        None
    };

    let file_layer = if config.file.enabled {
        if let Some(parent) = config.file.path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        let file = OpenOptions::new()
            .create(true)
            .append(true)
            .open(&config.file.path)?;
        let writer = Mutex::new(file);

        // Three formats produce three distinct layer types; box them.
        let layer: Box<dyn tracing_subscriber::Layer<_> + Send + Sync> = match config.file.format {
            LogFormat::Full => fmt::layer()
                .with_ansi(false)
                .with_target(true)
                .with_writer(writer)
                .boxed(),
            LogFormat::Compact => fmt::layer()
                .with_ansi(false)
                .with_target(true)
                .compact()
                .with_writer(writer)
                .boxed(),
            LogFormat::Json => fmt::layer().with_ansi(false).json().with_writer(writer).boxed(),
        };
        Some(layer)
    } else {
        None
    };

    if console_layer.is_none() && file_layer.is_none() {
        anyhow::bail!("At least one output (console or file) must be enabled");
    }

    tracing_subscriber::registry()
        .with(filter)
        .with(file_layer)
        .with(console_layer)
        .init();

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_log_format_parsing() {
        assert_eq!("full".parse::<LogFormat>().unwrap(), LogFormat::Full);
        assert_eq!("JSON".parse::<LogFormat>().unwrap(), LogFormat::Json);
        assert!("xml".parse::<LogFormat>().is_err());
    }
}
