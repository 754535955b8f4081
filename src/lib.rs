//! logtail - follow remote log files over a websocket
//!
//! The binary wires the CLI to one of two frontends: the ratatui view from
//! `logtail-tui`, or the headless NDJSON stream in [`headless`].

pub mod cli;
pub mod headless;

use logtail_app::config::Settings;
use logtail_core::prelude::*;

pub use headless::runner::run_headless;

/// Run the terminal view. Logging must already be set up.
pub async fn run(settings: Settings) -> Result<()> {
    // Initialize error handling
    color_eyre::install().map_err(|e| Error::terminal(e.to_string()))?;

    info!("═══════════════════════════════════════════════════════");
    info!("logtail starting");
    info!("Server: {}", settings.connection.url);
    info!("═══════════════════════════════════════════════════════");

    let result = logtail_tui::run(settings).await;

    if let Err(ref e) = result {
        error!("Application error: {:?}", e);
    }

    info!("logtail exiting");
    result
}
