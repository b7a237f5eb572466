//! Logger Module
//!
//! Console logging on top of `tracing-subscriber` with a selectable
//! `full`, `compact` or `json` format. ANSI colours are only emitted when
//! stdout is a terminal.

pub mod config;

pub use config::*;

use std::io::IsTerminal;

use tracing_subscriber::{EnvFilter, fmt, layer::SubscriberExt, util::SubscriberInitExt};

/// Initialize the global subscriber with the given configuration
///
/// `RUST_LOG`, when set, takes precedence over the configured level.
pub fn init_logger(config: LoggerConfig) -> anyhow::Result<()> {
    config.validate()?;

    let filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(&config.level))
        .unwrap_or_else(|_| EnvFilter::new("info"));

    let use_ansi = config.console.colored && std::io::stdout().is_terminal();
    let registry = tracing_subscriber::registry().with(filter);

    match config.console.format {
        LogFormat::Full => registry
            .with(fmt::layer().with_ansi(use_ansi).with_target(true))
            .try_init()?,
        LogFormat::Compact => registry
            .with(fmt::layer().with_ansi(use_ansi).with_target(true).compact())
            .try_init()?,
        LogFormat::Json => registry
            .with(fmt::layer().with_ansi(false).json())
            .try_init()?,
    }

    Ok(())
}
