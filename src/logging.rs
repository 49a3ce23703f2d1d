//! File logging
//!
//! The terminal belongs to the UI, so events are written to a log file.
//! `BILLING_TUI_LOG` takes an `EnvFilter` directive, `info` by default.

use crate::config::Config;
use anyhow::Context;
use std::fs::{self, OpenOptions};
use std::path::PathBuf;
use std::sync::Mutex;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

pub const LOG_ENV: &str = "BILLING_TUI_LOG";

pub fn init_logging(config: &Config) -> anyhow::Result<PathBuf> {
    let path = config
        .log_path()
        .context("Could not determine log file location")?;
    if let Some(dir) = path.parent() {
        fs::create_dir_all(dir)?;
    }

    let file = OpenOptions::new()
        .create(true)
        .append(true)
        .open(&path)
        .with_context(|| format!("Failed to open log file {}", path.display()))?;

    tracing_subscriber::registry()
        .with(EnvFilter::try_from_env(LOG_ENV).unwrap_or_else(|_| EnvFilter::new("info")))
        .with(
            tracing_subscriber::fmt::layer()
                .with_writer(Mutex::new(file))
                .with_ansi(false),
        )
        .try_init()?;

    Ok(path)
}
