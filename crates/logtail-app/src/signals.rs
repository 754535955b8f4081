//! Termination signals become a [`Message::Quit`] on the engine channel

use tokio::sync::mpsc;

use logtail_core::prelude::*;

use crate::message::Message;

/// Listen for SIGINT/SIGTERM (Ctrl+C on Windows) in the background.
///
/// The quit goes through the normal message path, so the transport is closed
/// and the terminal restored the same way as for `q`.
pub fn spawn_signal_handler(tx: mpsc::Sender<Message>) {
    tokio::spawn(async move {
        match next_signal().await {
            Ok(name) => {
                info!("Received {}, shutting down", name);
                if tx.send(Message::Quit).await.is_err() {
                    debug!("Engine already gone when {} arrived", name);
                }
            }
            Err(e) => error!("Signal handler error: {}", e),
        }
    });
}

#[cfg(unix)]
async fn next_signal() -> Result<&'static str> {
    use tokio::signal::unix::{signal, SignalKind};

    let listen = |kind: SignalKind, name: &str| {
        signal(kind).map_err(|e| Error::terminal(format!("Cannot listen for {}: {}", name, e)))
    };
    let mut interrupt = listen(SignalKind::interrupt(), "SIGINT")?;
    let mut terminate = listen(SignalKind::terminate(), "SIGTERM")?;

    Ok(tokio::select! {
        _ = interrupt.recv() => "SIGINT",
        _ = terminate.recv() => "SIGTERM",
    })
}

#[cfg(windows)]
async fn next_signal() -> Result<&'static str> {
    tokio::signal::ctrl_c()
        .await
        .map_err(|e| Error::terminal(format!("Cannot listen for Ctrl+C: {}", e)))?;
    Ok("Ctrl+C")
}
