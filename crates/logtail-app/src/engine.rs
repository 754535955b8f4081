//! Engine - shared orchestration state for TUI and headless runners
//!
//! The Engine owns the TEA state, the message channel, the shutdown signal,
//! the settings and the tail transport. Transport events are bridged into the
//! message channel, so all state is mutated by one update loop.

use tokio::sync::{broadcast, mpsc, watch};

use logtail_client::{TailClient, TransportEvent};
use logtail_core::prelude::*;

use crate::config::Settings;
use crate::engine_event::EngineEvent;
use crate::handler::UpdateAction;
use crate::message::Message;
use crate::process;
use crate::signals;
use crate::state::AppState;

/// Capacity of the unified message channel
const MESSAGE_CHANNEL_CAPACITY: usize = 256;

/// Capacity of the engine event broadcast
const EVENT_CHANNEL_CAPACITY: usize = 256;

/// Lightweight snapshot of state for change detection.
///
/// Captured before message processing, compared after to detect
/// what changed and emit appropriate EngineEvents.
#[derive(Debug, Clone)]
struct StateSnapshot {
    generation: u64,
    end_seq: u64,
    filter_pattern: Option<String>,
    filter_rejections: u64,
}

impl StateSnapshot {
    fn capture(state: &AppState) -> Self {
        Self {
            generation: state.tail.generation(),
            end_seq: state.tail.end_seq(),
            filter_pattern: state.tail.filter_pattern().map(str::to_string),
            filter_rejections: state.filter_rejections,
        }
    }
}

/// Orchestration engine for logtail.
pub struct Engine {
    /// TEA application state (the Model)
    pub state: AppState,

    /// Sender half of the unified message channel.
    /// Clone this to give to input sources (signal handler, transport bridge).
    pub msg_tx: mpsc::Sender<Message>,

    /// Receiver half of the unified message channel.
    /// The frontend event loop drains messages from here.
    pub msg_rx: mpsc::Receiver<Message>,

    /// Sender for the shutdown signal. Send `true` to initiate shutdown.
    pub shutdown_tx: watch::Sender<bool>,

    /// Receiver for the shutdown signal. Clone for background tasks.
    pub shutdown_rx: watch::Receiver<bool>,

    pub settings: Settings,

    /// Tail transport. None until [`Engine::start_transport`] succeeds.
    client: Option<TailClient>,

    event_tx: broadcast::Sender<EngineEvent>,
}

impl Engine {
    /// Create the engine: state from settings, channels and signal handler.
    ///
    /// Must be called within a Tokio runtime. Nothing connects until
    /// [`Engine::start_transport`].
    pub fn new(settings: Settings) -> Self {
        let state = AppState::with_settings(settings.clone());

        let (msg_tx, msg_rx) = mpsc::channel::<Message>(MESSAGE_CHANNEL_CAPACITY);
        let (shutdown_tx, shutdown_rx) = watch::channel(false);

        signals::spawn_signal_handler(msg_tx.clone());

        let (event_tx, _) = broadcast::channel(EVENT_CHANNEL_CAPACITY);

        Self {
            state,
            msg_tx,
            msg_rx,
            shutdown_tx,
            shutdown_rx,
            settings,
            client: None,
            event_tx,
        }
    }

    /// Spawn the tail client and bridge its events into the message channel.
    ///
    /// The configured file, if any, is requested right away; the client sends
    /// it as soon as a connection is up and again after every reconnect.
    pub fn start_transport(&mut self) -> Result<()> {
        let config = self.settings.connection.client_config()?;
        info!("Starting tail transport for {}", config.url);

        let (client, events) = TailClient::spawn(config);
        Self::bridge_transport(events, self.msg_tx.clone(), self.shutdown_rx.clone());

        if let Some(request) = self.state.tail_request.clone() {
            client.request_tail(request.clone())?;
            self.emit(EngineEvent::TailRequested {
                file: request.file,
                amount_mb: request.amount_mb,
            });
        }

        self.client = Some(client);
        Ok(())
    }

    /// Subscribe to engine events.
    ///
    /// If the subscriber falls behind, older events are dropped
    /// (`RecvError::Lagged`).
    pub fn subscribe(&self) -> broadcast::Receiver<EngineEvent> {
        self.event_tx.subscribe()
    }

    /// Process a single message through the TEA update cycle and emit the
    /// resulting EngineEvents.
    pub fn process_message(&mut self, msg: Message) {
        let pre = StateSnapshot::capture(&self.state);

        if let Message::Transport(event) = &msg {
            self.emit_transport_event(event);
        }

        let actions = process::process_message(&mut self.state, msg, self.client.as_ref());

        let post = StateSnapshot::capture(&self.state);
        self.emit_events(&pre, &post);

        for action in actions {
            match action {
                UpdateAction::RequestTail(request) => self.emit(EngineEvent::TailRequested {
                    file: request.file,
                    amount_mb: request.amount_mb,
                }),
            }
        }
    }

    /// Drain and process all pending messages from the channel.
    ///
    /// Returns the number of messages processed.
    pub fn drain_pending_messages(&mut self) -> usize {
        let mut count = 0;
        while let Ok(msg) = self.msg_rx.try_recv() {
            self.process_message(msg);
            count += 1;
        }
        count
    }

    /// Get a clone of the message sender for spawning input sources.
    pub fn msg_sender(&self) -> mpsc::Sender<Message> {
        self.msg_tx.clone()
    }

    /// Get a clone of the shutdown receiver for background tasks.
    pub fn shutdown_receiver(&self) -> watch::Receiver<bool> {
        self.shutdown_rx.clone()
    }

    pub fn should_quit(&self) -> bool {
        self.state.should_quit()
    }

    /// Whether the tail transport has been started
    pub fn has_transport(&self) -> bool {
        self.client.is_some()
    }

    /// Close the connection and signal background tasks to stop.
    pub async fn shutdown(&mut self) {
        self.emit(EngineEvent::Shutdown);

        if let Some(client) = self.client.take() {
            client.disconnect().await;
        }

        let _ = self.shutdown_tx.send(true);
        info!("Engine shut down");
    }

    fn emit_transport_event(&self, event: &TransportEvent) {
        let engine_event = match event {
            TransportEvent::Connected { attempt } => EngineEvent::Connected { attempt: *attempt },
            TransportEvent::Disconnected { reason } => EngineEvent::Disconnected {
                reason: reason.clone(),
            },
            TransportEvent::ConnectFailed { message } => EngineEvent::ConnectFailed {
                message: message.clone(),
            },
            TransportEvent::Data(_) | TransportEvent::Info(_) => return,
        };
        self.emit(engine_event);
    }

    /// Compare pre/post snapshots and emit what changed.
    fn emit_events(&self, pre: &StateSnapshot, post: &StateSnapshot) {
        let since = if post.generation != pre.generation {
            self.emit(EngineEvent::SessionReset);
            0
        } else {
            pre.end_seq
        };

        if post.end_seq > since && self.event_tx.receiver_count() > 0 {
            let lines: Vec<_> = self.state.tail.lines_since(since).cloned().collect();
            if !lines.is_empty() {
                self.emit(EngineEvent::Lines(lines));
            }
        }

        if post.filter_rejections != pre.filter_rejections {
            self.emit(EngineEvent::FilterRejected {
                message: self.state.filter_error.clone().unwrap_or_default(),
            });
        }

        if post.filter_pattern != pre.filter_pattern {
            self.emit(EngineEvent::FilterChanged {
                pattern: post.filter_pattern.clone(),
            });
        }
    }

    /// send() fails only without receivers, which is fine.
    fn emit(&self, event: EngineEvent) {
        trace!("Engine event: {}", event.event_type());
        let _ = self.event_tx.send(event);
    }

    fn bridge_transport(
        mut events: mpsc::Receiver<TransportEvent>,
        msg_tx: mpsc::Sender<Message>,
        mut shutdown_rx: watch::Receiver<bool>,
    ) {
        tokio::spawn(async move {
            loop {
                tokio::select! {
                    event = events.recv() => {
                        let Some(event) = event else { break };
                        if msg_tx.send(Message::Transport(event)).await.is_err() {
                            break;
                        }
                    }
                    _ = shutdown_rx.changed() => break,
                }
            }
            debug!("Transport bridge exiting");
        });
    }
}
