//! Main TUI runner - entry point and event loop
//!
//! - `run`: builds the Engine, starts the transport and owns the terminal
//! - `run_loop`: drains engine messages, draws, polls terminal input

use logtail_app::config::Settings;
use logtail_app::{Engine, StatusLevel};
use logtail_core::prelude::*;

use super::{event, render, terminal};

/// Run the TUI until the user quits or a termination signal arrives
pub async fn run(settings: Settings) -> Result<()> {
    let mut engine = Engine::new(settings);

    // A bad server URL is not fatal: the view still opens and says why
    if let Err(e) = engine.start_transport() {
        error!("Failed to start tail transport: {}", e);
        engine
            .state
            .set_status(StatusLevel::Error, format!("Not connected: {}", e));
    }

    let mut term = match terminal::init().context("Failed to open the terminal view") {
        Ok(term) => term,
        Err(e) => {
            engine.shutdown().await;
            return Err(e);
        }
    };

    let result = run_loop(&mut term, &mut engine);

    engine.shutdown().await;

    terminal::restore();

    result
}

/// Main event loop
fn run_loop(terminal: &mut ratatui::DefaultTerminal, engine: &mut Engine) -> Result<()> {
    while !engine.should_quit() {
        // Transport events, signals
        engine.drain_pending_messages();

        terminal.draw(|frame| render::view(frame, &mut engine.state))?;

        // Handle terminal events
        if let Some(message) = event::poll()? {
            engine.process_message(message);
        }
    }

    info!("Quit requested");
    Ok(())
}
