use crate::utils::app_paths::AppPaths;
use anyhow::Result;
use std::fs::OpenOptions;
use std::path::PathBuf;
use std::sync::Arc;
use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

/// Initialize tracing with a plain-file writer.
///
/// The TUI owns the terminal, so log output goes to a file under the data
/// directory. Returns the log path so the caller can tell the user where
/// to tail it. Filtering honors `RUST_LOG`, defaulting to `info`.
pub fn init_tracing() -> Result<PathBuf> {
    let log_path = AppPaths::log_file()?;
    let file = OpenOptions::new()
        .create(true)
        .append(true)
        .open(&log_path)?;

    let fmt_layer = fmt::layer()
        .with_writer(Arc::new(file))
        .with_target(true)
        .with_level(true)
        .with_ansi(false)
        .compact();

    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));

    tracing_subscriber::registry()
        .with(filter)
        .with(fmt_layer)
        .init();

    tracing::info!(target: "app", "logging initialized");
    Ok(log_path)
}
