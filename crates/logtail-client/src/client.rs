//! Async WebSocket client for the tail endpoint.
//!
//! [`TailClient::spawn`] starts a background Tokio task that owns the
//! connection and never gives up on it: after every loss or failed attempt it
//! waits a fixed delay and dials again. Everything the task observes is
//! surfaced as a [`TransportEvent`] on a bounded channel.
//!
//! ## Architecture
//!
//! ```text
//! ┌──────────────┐   ClientCommand   ┌──────────────────────────────┐
//! │  TailClient  │ ────────────────▶ │  Background task              │
//! │  (handle)    │                   │                               │
//! │              │ ◀──────────────── │  connect → io loop → wait     │
//! └──────────────┘   TransportEvent  │  ping every keepalive tick    │
//!                                    │  resend tail on (re)connect   │
//!                                    └──────────────────────────────┘
//! ```
//!
//! Selecting a file while a tail is already running redials instead of
//! sending a second command on the same socket. Frames of the old file can
//! still be in flight, so the fresh [`TransportEvent::Connected`] is the point
//! after which every event belongs to the new file.

use std::sync::{Arc, RwLock};
use std::time::Duration;

use futures_util::stream::SplitSink;
use futures_util::{SinkExt, StreamExt};
use tokio::sync::mpsc;
use tokio_tungstenite::connect_async;
use tokio_tungstenite::tungstenite::protocol::Message as WsMessage;
use tokio_tungstenite::{MaybeTlsStream, WebSocketStream};
use url::Url;

use logtail_core::prelude::*;

use crate::decoder::Utf8Decoder;
use crate::protocol::{classify_text_frame, TailRequest, TextFrame, PING};

/// Default interval between keepalive pings
pub const DEFAULT_KEEPALIVE: Duration = Duration::from_millis(1000);

/// Default pause before dialing again after a loss or failed attempt
pub const DEFAULT_RECONNECT_DELAY: Duration = Duration::from_millis(2000);

/// Capacity of the command channel
const CMD_CHANNEL_CAPACITY: usize = 32;

/// Capacity of the event channel (log data is bursty)
const EVENT_CHANNEL_CAPACITY: usize = 256;

// ---------------------------------------------------------------------------
// Public types
// ---------------------------------------------------------------------------

/// Connection settings of a [`TailClient`]
#[derive(Debug, Clone)]
pub struct TailClientConfig {
    pub url: Url,
    pub keepalive: Duration,
    pub reconnect_delay: Duration,
}

impl TailClientConfig {
    pub fn new(url: Url) -> Self {
        Self {
            url,
            keepalive: DEFAULT_KEEPALIVE,
            reconnect_delay: DEFAULT_RECONNECT_DELAY,
        }
    }
}

/// Current connection state of a [`TailClient`].
#[derive(Debug, Clone, PartialEq)]
pub enum ConnectionState {
    /// Not connected and not attempting to connect.
    Disconnected,
    /// First connection attempt in progress.
    Connecting,
    /// Connected and tailing.
    Connected,
    /// Connection lost or refused; retrying.
    Reconnecting {
        /// Attempts since the last successful connection (1-indexed).
        attempt: u32,
    },
}

/// Everything the background task reports
#[derive(Debug, Clone, PartialEq)]
pub enum TransportEvent {
    /// A connection opened. `attempt` counts the dials it took.
    Connected { attempt: u32 },
    /// An open connection was lost; a reconnect is scheduled.
    Disconnected { reason: String },
    /// A dial failed; another is scheduled.
    ConnectFailed { message: String },
    /// Decoded log text from a binary frame
    Data(String),
    /// An informational text frame
    Info(String),
}

/// Internal messages sent from the handle to the background task.
#[derive(Debug)]
enum ClientCommand {
    /// Select a file; remembered and resent after every reconnect. Replacing
    /// a running tail reopens the connection.
    Tail(TailRequest),
    /// Close the connection and stop the background task.
    Disconnect,
}

type WsStream = WebSocketStream<MaybeTlsStream<tokio::net::TcpStream>>;

// ---------------------------------------------------------------------------
// TailClient
// ---------------------------------------------------------------------------

/// Clonable handle to the background connection task.
///
/// The task exits when every handle is dropped or [`TailClient::disconnect`]
/// is called.
#[derive(Clone)]
pub struct TailClient {
    cmd_tx: mpsc::Sender<ClientCommand>,
    state: Arc<RwLock<ConnectionState>>,
}

impl std::fmt::Debug for TailClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TailClient")
            .field("connection_state", &self.connection_state())
            .finish()
    }
}

impl TailClient {
    /// Start the background task and return the handle plus its event stream.
    ///
    /// Must be called within a Tokio runtime.
    pub fn spawn(config: TailClientConfig) -> (Self, mpsc::Receiver<TransportEvent>) {
        let (cmd_tx, cmd_rx) = mpsc::channel(CMD_CHANNEL_CAPACITY);
        let (event_tx, event_rx) = mpsc::channel(EVENT_CHANNEL_CAPACITY);
        let state = Arc::new(RwLock::new(ConnectionState::Connecting));

        tokio::spawn(run_client_task(
            config,
            cmd_rx,
            event_tx,
            Arc::clone(&state),
        ));

        (Self { cmd_tx, state }, event_rx)
    }

    /// Select a file to tail. Sent now if connected, and after every reconnect.
    pub async fn tail(&self, request: TailRequest) -> Result<()> {
        self.cmd_tx
            .send(ClientCommand::Tail(request))
            .await
            .map_err(|_| Error::ChannelClosed)
    }

    /// Non-blocking [`TailClient::tail`] for synchronous callers.
    pub fn request_tail(&self, request: TailRequest) -> Result<()> {
        self.cmd_tx
            .try_send(ClientCommand::Tail(request))
            .map_err(|err| match err {
                mpsc::error::TrySendError::Full(_) => {
                    Error::channel_send("tail command queue is full")
                }
                mpsc::error::TrySendError::Closed(_) => Error::ChannelClosed,
            })
    }

    /// Close the connection and stop reconnecting.
    pub async fn disconnect(&self) {
        // A closed channel means the task is already gone
        let _ = self.cmd_tx.send(ClientCommand::Disconnect).await;
    }

    pub fn connection_state(&self) -> ConnectionState {
        self.state.read().unwrap_or_else(|e| e.into_inner()).clone()
    }

    pub fn is_connected(&self) -> bool {
        self.connection_state() == ConnectionState::Connected
    }
}

// ---------------------------------------------------------------------------
// Background task
// ---------------------------------------------------------------------------

/// How one connection ended
#[derive(Debug)]
enum LoopExit {
    /// Unexpected loss; reconnect after the delay
    Lost(String),
    /// A different tail was selected; redial at once
    Switched,
    /// Disconnect requested, handles dropped or event receiver gone
    Shutdown,
}

async fn run_client_task(
    config: TailClientConfig,
    mut cmd_rx: mpsc::Receiver<ClientCommand>,
    event_tx: mpsc::Sender<TransportEvent>,
    state: Arc<RwLock<ConnectionState>>,
) {
    let mut request: Option<TailRequest> = None;
    let mut attempt: u32 = 1;
    let mut connected_before = false;

    loop {
        set_state(
            &state,
            if connected_before || attempt > 1 {
                ConnectionState::Reconnecting { attempt }
            } else {
                ConnectionState::Connecting
            },
        );

        match connect_ws(&config.url).await {
            Ok(ws_stream) => {
                info!("Tail: connected to {} (attempt {})", config.url, attempt);
                set_state(&state, ConnectionState::Connected);

                if !emit(&event_tx, TransportEvent::Connected { attempt }).await {
                    break;
                }
                connected_before = true;
                attempt = 1;

                let exit = run_io_loop(
                    ws_stream,
                    &mut cmd_rx,
                    &event_tx,
                    &mut request,
                    config.keepalive,
                )
                .await;

                match exit {
                    LoopExit::Shutdown => break,
                    LoopExit::Switched => {
                        debug!("Tail: reopening connection for the new tail");
                        continue;
                    }
                    LoopExit::Lost(reason) => {
                        warn!("Tail: connection lost: {}", reason);
                        set_state(&state, ConnectionState::Reconnecting { attempt });
                        if !emit(&event_tx, TransportEvent::Disconnected { reason }).await {
                            break;
                        }
                    }
                }
            }
            Err(err) => {
                warn!("Tail: connection attempt {} failed: {}", attempt, err);
                let message = match err {
                    Error::Connection { message } => message,
                    other => other.to_string(),
                };
                if !emit(&event_tx, TransportEvent::ConnectFailed { message }).await {
                    break;
                }
                attempt = attempt.saturating_add(1);
            }
        }

        if !wait_for_retry(config.reconnect_delay, &mut cmd_rx, &mut request).await {
            break;
        }
    }

    set_state(&state, ConnectionState::Disconnected);
    debug!("Tail background task exiting");
}

/// Sleep out the reconnect delay while still accepting commands.
///
/// Returns `false` when the task should stop.
async fn wait_for_retry(
    delay: Duration,
    cmd_rx: &mut mpsc::Receiver<ClientCommand>,
    request: &mut Option<TailRequest>,
) -> bool {
    let sleep = tokio::time::sleep(delay);
    tokio::pin!(sleep);

    loop {
        tokio::select! {
            _ = &mut sleep => return true,
            cmd = cmd_rx.recv() => match cmd {
                Some(ClientCommand::Tail(next)) => {
                    debug!("Tail: queued {} until reconnect", next.to_command());
                    *request = Some(next);
                }
                Some(ClientCommand::Disconnect) | None => return false,
            }
        }
    }
}

/// Run one connection's read/write select loop.
async fn run_io_loop(
    ws_stream: WsStream,
    cmd_rx: &mut mpsc::Receiver<ClientCommand>,
    event_tx: &mpsc::Sender<TransportEvent>,
    request: &mut Option<TailRequest>,
    keepalive: Duration,
) -> LoopExit {
    let (mut ws_sink, mut ws_stream) = ws_stream.split();
    let mut decoder = Utf8Decoder::new();

    if let Some(current) = request.as_ref() {
        if let Err(err) = send_text(&mut ws_sink, current.to_command()).await {
            return LoopExit::Lost(err);
        }
    }

    let mut keepalive_interval = tokio::time::interval(keepalive);
    keepalive_interval.tick().await; // consume the immediate first tick

    loop {
        tokio::select! {
            // ── Incoming WebSocket message ───────────────────────────────
            frame = ws_stream.next() => {
                let event = match frame {
                    Some(Ok(WsMessage::Binary(bytes))) => {
                        let text = decoder.decode(&bytes);
                        if text.is_empty() {
                            continue;
                        }
                        TransportEvent::Data(text)
                    }
                    Some(Ok(WsMessage::Text(text))) => match classify_text_frame(text.as_str()) {
                        TextFrame::Pong => {
                            trace!("Tail: pong");
                            continue;
                        }
                        TextFrame::Info(info) => TransportEvent::Info(info),
                    },
                    Some(Ok(WsMessage::Close(frame))) => {
                        let reason = frame
                            .map(|f| f.reason.as_str().to_string())
                            .filter(|r| !r.is_empty())
                            .unwrap_or_else(|| "closed by server".to_string());
                        return LoopExit::Lost(reason);
                    }
                    Some(Ok(WsMessage::Ping(_) | WsMessage::Pong(_))) => continue,
                    Some(Ok(other)) => {
                        warn!("Tail: dropped {}", unsupported_frame(&other));
                        continue;
                    }
                    Some(Err(err)) => return LoopExit::Lost(err.to_string()),
                    None => return LoopExit::Lost("stream ended".to_string()),
                };

                if !emit(event_tx, event).await {
                    send_close(&mut ws_sink).await;
                    return LoopExit::Shutdown;
                }
            }

            // ── Command from the handle ──────────────────────────────────
            cmd = cmd_rx.recv() => {
                match cmd {
                    Some(ClientCommand::Tail(next)) => {
                        let running = request.replace(next);
                        if running.is_some() {
                            send_close(&mut ws_sink).await;
                            return LoopExit::Switched;
                        }
                        if let Some(current) = request.as_ref() {
                            if let Err(err) = send_text(&mut ws_sink, current.to_command()).await {
                                return LoopExit::Lost(err);
                            }
                        }
                    }
                    Some(ClientCommand::Disconnect) | None => {
                        send_close(&mut ws_sink).await;
                        return LoopExit::Shutdown;
                    }
                }
            }

            // ── Keepalive ────────────────────────────────────────────────
            _ = keepalive_interval.tick() => {
                if let Err(err) = send_text(&mut ws_sink, PING.to_string()).await {
                    return LoopExit::Lost(err);
                }
            }
        }
    }
}

// ---------------------------------------------------------------------------
// Helper functions
// ---------------------------------------------------------------------------

async fn connect_ws(url: &Url) -> Result<WsStream> {
    let (ws_stream, _response) = connect_async(url.as_str())
        .await
        .map_err(|err| Error::connection(err.to_string()))?;
    Ok(ws_stream)
}

async fn send_text(
    ws_sink: &mut SplitSink<WsStream, WsMessage>,
    text: String,
) -> std::result::Result<(), String> {
    trace!("Tail: sending {}", text);
    ws_sink
        .send(WsMessage::text(text))
        .await
        .map_err(|err| format!("send failed: {err}"))
}

/// Send a WebSocket Close frame, ignoring any write errors.
async fn send_close(ws_sink: &mut SplitSink<WsStream, WsMessage>) {
    let _ = ws_sink.send(WsMessage::Close(None)).await;
    let _ = ws_sink.close().await;
}

/// Forward an event; `false` once nobody is listening.
async fn emit(event_tx: &mpsc::Sender<TransportEvent>, event: TransportEvent) -> bool {
    if event_tx.send(event).await.is_err() {
        debug!("Tail: event receiver dropped");
        return false;
    }
    true
}

/// Diagnostic for a frame the tail protocol has no use for
fn unsupported_frame(frame: &WsMessage) -> Error {
    Error::protocol(format!("unsupported frame of {} bytes", frame.len()))
}

fn set_state(state: &RwLock<ConnectionState>, next: ConnectionState) {
    let mut guard = state.write().unwrap_or_else(|e| e.into_inner());
    *guard = next;
}
