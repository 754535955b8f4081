//! Logging configuration using tracing

use std::path::PathBuf;
use tracing_appender::rolling::{RollingFileAppender, Rotation};
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

use crate::error::{Error, Result};

const LOG_FILE_NAME: &str = "logtail.log";

const LOG_ENV_VAR: &str = "LOGTAIL_LOG";

/// Every workspace crate at info, dependencies at warn
const DEFAULT_DIRECTIVES: &str =
    "warn,logtail=info,logtail_core=info,logtail_client=info,logtail_app=info,logtail_tui=info";

/// Initialize the logging subsystem
///
/// Logs are written to `~/.local/share/logtail/logs/` because the terminal
/// view and the headless NDJSON stream both own stdout.
/// Log level is controlled by the `LOGTAIL_LOG` environment variable.
///
/// # Examples
/// ```bash
/// LOGTAIL_LOG=debug logtail --url ws://localhost:8080
/// LOGTAIL_LOG=logtail_client=trace logtail --headless
/// ```
pub fn init() -> Result<()> {
    let log_dir = log_directory();
    std::fs::create_dir_all(&log_dir)?;

    let file_appender = RollingFileAppender::new(Rotation::DAILY, &log_dir, LOG_FILE_NAME);

    let env_filter =
        EnvFilter::try_from_env(LOG_ENV_VAR).unwrap_or_else(|_| EnvFilter::new(DEFAULT_DIRECTIVES));

    tracing_subscriber::registry()
        .with(env_filter)
        .with(
            fmt::layer()
                .with_writer(file_appender)
                .with_ansi(false)
                .with_target(true)
                .with_file(true)
                .with_line_number(true)
                .with_timer(fmt::time::ChronoLocal::new(
                    "%Y-%m-%d %H:%M:%S%.3f".to_string(),
                )),
        )
        .try_init()
        .map_err(|e| Error::config(format!("Logging already initialized: {}", e)))?;

    tracing::info!("───────────────────────────────────────────────");
    tracing::info!("logtail {} starting", env!("CARGO_PKG_VERSION"));
    tracing::info!("Log directory: {}", log_dir.display());

    Ok(())
}

/// `<data dir>/logtail/logs`, or `./logtail/logs` when the platform has none
fn log_directory() -> PathBuf {
    dirs::data_local_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join("logtail")
        .join("logs")
}
