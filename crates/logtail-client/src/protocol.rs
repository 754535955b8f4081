//! Tail protocol spoken over the WebSocket.
//!
//! The client selects a file with a textual command, keeps the connection
//! alive with a literal `ping`, and receives log bytes as binary frames.
//! Text frames are either the `pong` reply or informational messages from
//! the server (file rotation notices and the like).

use url::Url;

use logtail_core::prelude::*;

/// Default server path of the tail endpoint
pub const DEFAULT_TAIL_PATH: &str = "/system/console/logviewer/tail";

/// Keepalive request sent by the client
pub const PING: &str = "ping";

/// Keepalive reply, swallowed by the client
pub const PONG: &str = "pong";

/// Selects (or restarts) the tail of one log file
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TailRequest {
    /// How many megabytes of history to send before following
    pub amount_mb: u32,
    /// Server-side path of the log file
    pub file: String,
}

impl TailRequest {
    pub fn new(file: impl Into<String>, amount_mb: u32) -> Self {
        Self {
            amount_mb,
            file: file.into(),
        }
    }

    /// Wire form: `tail:<amount>mb:<file>`
    pub fn to_command(&self) -> String {
        format!("tail:{}mb:{}", self.amount_mb, self.file)
    }
}

/// Validate a user-supplied amount as a non-negative whole number
pub fn parse_amount(value: &str) -> Result<u32> {
    let trimmed = value.trim();
    if trimmed.is_empty() || !trimmed.bytes().all(|b| b.is_ascii_digit()) {
        return Err(Error::invalid_amount(value));
    }
    trimmed.parse().map_err(|_| Error::invalid_amount(value))
}

/// Meaning of an inbound text frame
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TextFrame {
    /// Keepalive reply
    Pong,
    /// Anything else the server says outside the log stream
    Info(String),
}

pub fn classify_text_frame(text: &str) -> TextFrame {
    if text == PONG {
        TextFrame::Pong
    } else {
        TextFrame::Info(text.to_string())
    }
}

/// Build the WebSocket URL of the tail endpoint.
///
/// `http`/`https` bases are mapped to `ws`/`wss`. A base that already has a
/// non-root path keeps it as a prefix of `path`.
pub fn build_tail_url(base: &str, path: &str) -> Result<Url> {
    let mut url = Url::parse(base)
        .map_err(|e| Error::config_invalid(format!("invalid server url '{base}': {e}")))?;

    let scheme = match url.scheme() {
        "ws" | "http" => "ws",
        "wss" | "https" => "wss",
        other => {
            return Err(Error::config_invalid(format!(
                "unsupported url scheme '{other}', expected ws, wss, http or https"
            )))
        }
    };
    if url.set_scheme(scheme).is_err() {
        return Err(Error::config_invalid(format!(
            "cannot use scheme '{scheme}' with '{base}'"
        )));
    }

    let prefix = url.path().trim_end_matches('/').to_string();
    let suffix = path.trim_start_matches('/');
    url.set_path(&format!("{prefix}/{suffix}"));
    Ok(url)
}
