//! # Logging
//!
//! The TUI owns the terminal, so diagnostics go to a file instead of stderr.
//! `RUST_LOG` takes precedence over the configured level.
//!
//! ```text
//! ~/.local/share/dlogview/logs/dlogview.log
//! ```

use anyhow::{Context, Result};
use std::fs;
use std::path::Path;
use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

pub const LOG_FILE_NAME: &str = "dlogview.log";

/// Filter used when `RUST_LOG` is unset: our crate at `level`, everything
/// else at `warn`.
pub fn default_directive(level: &str) -> String {
    format!("warn,dlogview={level}")
}

/// Install the global subscriber writing to `dir/dlogview.log`.
///
/// The returned guard flushes the background writer on drop and must be kept
/// alive for the whole run.
pub fn init(level: &str, dir: &Path) -> Result<WorkerGuard> {
    fs::create_dir_all(dir)
        .with_context(|| format!("Failed to create log directory: {}", dir.display()))?;

    let filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(default_directive(level)))
        .context("Invalid log level")?;

    let appender = tracing_appender::rolling::never(dir, LOG_FILE_NAME);
    let (writer, guard) = tracing_appender::non_blocking(appender);

    tracing_subscriber::registry()
        .with(filter)
        .with(
            tracing_subscriber::fmt::layer()
                .with_writer(writer)
                .with_ansi(false)
                .with_target(true),
        )
        .try_init()
        .context("Failed to install log subscriber")?;

    Ok(guard)
}
