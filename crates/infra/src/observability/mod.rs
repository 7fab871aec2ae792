//! Logging initialisation
//!
//! Installs the process-wide `tracing` subscriber. The filter comes from
//! `RUST_LOG` and defaults to `info`.

use std::str::FromStr;

use anyhow::Context;
use tracing_subscriber::{fmt, EnvFilter};

const DEFAULT_FILTER: &str = "info";

/// Output format of the installed subscriber.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum LogFormat {
    /// Human-readable lines.
    #[default]
    Pretty,
    /// One JSON object per event.
    Json,
}

impl FromStr for LogFormat {
    type Err = anyhow::Error;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value.to_ascii_lowercase().as_str() {
            "pretty" | "text" => Ok(Self::Pretty),
            "json" => Ok(Self::Json),
            other => anyhow::bail!("unknown log format: {other}"),
        }
    }
}

/// Install the global subscriber
///
/// # Errors
/// Fails when `RUST_LOG` holds an invalid directive or a global subscriber
/// is already installed.
pub fn init_tracing(format: LogFormat) -> anyhow::Result<()> {
    let filter = env_filter()?;
    let builder = fmt().with_env_filter(filter).with_target(true);

    match format {
        LogFormat::Pretty => builder.try_init(),
        LogFormat::Json => builder.json().try_init(),
    }
    .map_err(|err| anyhow::anyhow!("{err}"))
    .context("failed to install tracing subscriber")
}

fn env_filter() -> anyhow::Result<EnvFilter> {
    match std::env::var(EnvFilter::DEFAULT_ENV) {
        Ok(directives) if !directives.trim().is_empty() => EnvFilter::try_new(&directives)
            .with_context(|| format!("invalid {} directive: {directives}", EnvFilter::DEFAULT_ENV)),
        _ => Ok(EnvFilter::new(DEFAULT_FILTER)),
    }
}
