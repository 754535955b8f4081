//! Headless mode runner - main event loop without TUI
//!
//! Drives the Engine from its message channel and turns every EngineEvent
//! into NDJSON on stdout. Commands arrive as lines on stdin.

use tokio::sync::{broadcast, mpsc};

use logtail_app::config::Settings;
use logtail_app::{message::Message, Engine, EngineEvent};
use logtail_core::prelude::*;

use super::HeadlessEvent;

/// Run in headless mode - output JSON events instead of TUI.
///
/// Logging must already be set up; stdout carries events only.
pub async fn run_headless(settings: Settings) -> Result<()> {
    info!("═══════════════════════════════════════════════════════");
    info!("logtail starting in HEADLESS mode");
    info!("Server: {}", settings.connection.url);
    info!("═══════════════════════════════════════════════════════");

    let mut engine = Engine::new(settings);
    let mut events = engine.subscribe();

    // Spawn headless-specific stdin reader
    let stdin_tx = engine.msg_sender();
    std::thread::spawn(move || {
        spawn_stdin_reader_blocking(stdin_tx);
    });

    if let Err(e) = engine.start_transport() {
        let fatal = e.is_fatal();
        error!("Failed to start tail transport: {}", e);
        HeadlessEvent::error(e.to_string(), fatal).emit();
        if fatal {
            engine.shutdown().await;
            return Err(e);
        }
    }
    flush_events(&mut events);

    let result = headless_event_loop(&mut engine, &mut events).await;

    engine.shutdown().await;
    flush_events(&mut events);

    info!("logtail headless mode exiting");
    result
}

/// Main headless event loop
async fn headless_event_loop(
    engine: &mut Engine,
    events: &mut broadcast::Receiver<EngineEvent>,
) -> Result<()> {
    loop {
        if engine.should_quit() {
            info!("Quit requested");
            break;
        }

        match engine.msg_rx.recv().await {
            Some(msg) => {
                engine.process_message(msg);
                flush_events(events);
            }
            None => {
                info!("Message channel closed");
                break;
            }
        }
    }

    Ok(())
}

/// Emit every engine event received so far
fn flush_events(events: &mut broadcast::Receiver<EngineEvent>) {
    loop {
        match events.try_recv() {
            Ok(event) => {
                for headless in HeadlessEvent::from_engine_event(&event) {
                    headless.emit();
                }
            }
            Err(broadcast::error::TryRecvError::Lagged(skipped)) => {
                warn!("Headless output fell behind; {} events dropped", skipped);
                HeadlessEvent::error(format!("{} events dropped", skipped), false).emit();
            }
            Err(broadcast::error::TryRecvError::Empty | broadcast::error::TryRecvError::Closed) => {
                break
            }
        }
    }
}

/// Map one stdin line to a message.
///
/// `file <name>` switches the tail, `filter <regex>` sets the filter (no
/// argument clears it), `clear` restarts the current tail, `q`/`quit` exits.
pub fn parse_stdin_command(line: &str) -> Option<Message> {
    let trimmed = line.trim();
    let (command, argument) = match trimmed.split_once(char::is_whitespace) {
        Some((command, argument)) => (command, argument.trim()),
        None => (trimmed, ""),
    };

    match command {
        "q" | "quit" => Some(Message::Quit),
        "file" if !argument.is_empty() => Some(Message::SelectFile(argument.to_string())),
        "filter" => Some(Message::SetFilter(argument.to_string())),
        "clear" => Some(Message::ClearView),
        _ => None,
    }
}

/// Read commands from stdin and send them to the message channel (blocking)
fn spawn_stdin_reader_blocking(msg_tx: mpsc::Sender<Message>) {
    use std::io::BufRead;

    let stdin = std::io::stdin();
    let reader = stdin.lock();

    for line in reader.lines() {
        match line {
            Ok(line) if line.trim().is_empty() => {}
            Ok(line) => match parse_stdin_command(&line) {
                Some(message) => {
                    info!("Stdin: {:?}", message);
                    let quit = matches!(message, Message::Quit);
                    if msg_tx.blocking_send(message).is_err() || quit {
                        break;
                    }
                }
                None => warn!("Unknown stdin command: {}", line.trim()),
            },
            Err(e) => {
                error!("Failed to read stdin: {}", e);
                break;
            }
        }
    }

    info!("Stdin reader exiting");
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_quit() {
        assert!(matches!(parse_stdin_command("q"), Some(Message::Quit)));
        assert!(matches!(parse_stdin_command(" quit "), Some(Message::Quit)));
    }

    #[test]
    fn test_parse_file_keeps_argument() {
        match parse_stdin_command("file logs/request.log") {
            Some(Message::SelectFile(file)) => assert_eq!(file, "logs/request.log"),
            other => panic!("unexpected {:?}", other),
        }
        assert!(parse_stdin_command("file").is_none());
    }

    #[test]
    fn test_parse_filter_with_spaces() {
        match parse_stdin_command("filter GET /content") {
            Some(Message::SetFilter(pattern)) => assert_eq!(pattern, "GET /content"),
            other => panic!("unexpected {:?}", other),
        }
        match parse_stdin_command("filter") {
            Some(Message::SetFilter(pattern)) => assert!(pattern.is_empty()),
            other => panic!("unexpected {:?}", other),
        }
    }

    #[test]
    fn test_parse_clear_and_unknown() {
        assert!(matches!(parse_stdin_command("clear"), Some(Message::ClearView)));
        assert!(parse_stdin_command("reload").is_none());
    }

    #[tokio::test]
    async fn test_bad_server_url_is_fatal_at_startup() {
        let mut settings = Settings::default();
        settings.connection.url = "ftp://logs.example.com".to_string();
        let mut engine = Engine::new(settings);

        let err = engine.start_transport().unwrap_err();
        assert!(err.is_fatal());
        engine.shutdown().await;

        assert!(!Error::channel_send("tail command queue is full").is_fatal());
    }

    #[tokio::test]
    async fn test_flush_events_emits_pending() {
        let (tx, mut rx) = broadcast::channel(4);
        tx.send(EngineEvent::SessionReset).unwrap();
        tx.send(EngineEvent::Shutdown).unwrap();

        flush_events(&mut rx);

        assert!(matches!(
            rx.try_recv(),
            Err(broadcast::error::TryRecvError::Empty)
        ));
    }
}
