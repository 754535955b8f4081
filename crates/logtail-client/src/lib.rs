//! # logtail-client - Tail Transport
//!
//! WebSocket transport for logtail. Speaks the tail protocol (`tail:` command,
//! `ping`/`pong` keepalive, binary log frames), decodes UTF-8 across frame
//! boundaries and reconnects indefinitely after a fixed delay.
//!
//! ## Public API
//!
//! - [`TailClient`] - Handle to the background connection task
//! - [`TransportEvent`] - Connection lifecycle, log data and server info
//! - [`TailRequest`] - File selection command
//! - [`parse_amount()`], [`build_tail_url()`] - Input validation

pub mod client;
pub mod decoder;
pub mod protocol;

pub use client::{
    ConnectionState, TailClient, TailClientConfig, TransportEvent, DEFAULT_KEEPALIVE,
    DEFAULT_RECONNECT_DELAY,
};
pub use decoder::Utf8Decoder;
pub use protocol::{
    build_tail_url, classify_text_frame, parse_amount, TailRequest, TextFrame, DEFAULT_TAIL_PATH,
    PING, PONG,
};
