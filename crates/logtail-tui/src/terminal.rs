//! Terminal setup and restoration

use ratatui::DefaultTerminal;

use logtail_core::prelude::*;

/// Enter raw mode and the alternate screen.
///
/// The panic hook goes in first so a panic anywhere after this point leaves
/// a usable shell behind.
pub fn init() -> Result<DefaultTerminal> {
    install_panic_hook();
    ratatui::try_init().map_err(|e| Error::TerminalInit(e.to_string()))
}

/// Leave the alternate screen; failures are logged, there is nothing left to do
pub fn restore() {
    if let Err(e) = ratatui::try_restore() {
        warn!("Failed to restore terminal: {}", e);
    }
}

fn install_panic_hook() {
    let previous = std::panic::take_hook();
    std::panic::set_hook(Box::new(move |info| {
        let _ = ratatui::try_restore();
        previous(info);
    }));
}
