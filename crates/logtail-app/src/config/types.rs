//! Configuration types

use std::time::Duration;

use serde::{Deserialize, Serialize};

use logtail_client::{build_tail_url, TailClientConfig, TailRequest, DEFAULT_TAIL_PATH};
use logtail_core::prelude::*;

/// Settings from config.toml
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Settings {
    #[serde(default)]
    pub connection: ConnectionSettings,

    #[serde(default)]
    pub tail: TailSettings,

    #[serde(default)]
    pub ui: UiSettings,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ConnectionSettings {
    /// Server base URL (ws, wss, http or https)
    #[serde(default = "default_url")]
    pub url: String,

    /// Path of the tail endpoint below the base URL
    #[serde(default = "default_path")]
    pub path: String,

    #[serde(default = "default_keepalive_ms")]
    pub keepalive_ms: u64,

    #[serde(default = "default_reconnect_delay_ms")]
    pub reconnect_delay_ms: u64,
}

fn default_url() -> String {
    "ws://localhost:8080".to_string()
}

fn default_path() -> String {
    DEFAULT_TAIL_PATH.to_string()
}

fn default_keepalive_ms() -> u64 {
    1000
}

fn default_reconnect_delay_ms() -> u64 {
    2000
}

impl Default for ConnectionSettings {
    fn default() -> Self {
        Self {
            url: default_url(),
            path: default_path(),
            keepalive_ms: default_keepalive_ms(),
            reconnect_delay_ms: default_reconnect_delay_ms(),
        }
    }
}

impl ConnectionSettings {
    /// Resolve the tail endpoint and timings into a client config
    pub fn client_config(&self) -> Result<TailClientConfig> {
        let url = build_tail_url(&self.url, &self.path)?;
        let mut config = TailClientConfig::new(url);
        // Zero would spin; clamp to one millisecond
        config.keepalive = Duration::from_millis(self.keepalive_ms.max(1));
        config.reconnect_delay = Duration::from_millis(self.reconnect_delay_ms);
        Ok(config)
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TailSettings {
    /// Log file to tail on startup
    #[serde(default)]
    pub file: Option<String>,

    /// Megabytes of history requested before following
    #[serde(default = "default_amount_mb")]
    pub amount_mb: u32,

    /// Initial find filter
    #[serde(default)]
    pub filter: Option<String>,
}

fn default_amount_mb() -> u32 {
    1
}

impl Default for TailSettings {
    fn default() -> Self {
        Self {
            file: None,
            amount_mb: default_amount_mb(),
            filter: None,
        }
    }
}

impl TailSettings {
    /// The startup tail request, if a file is configured
    pub fn request(&self) -> Option<TailRequest> {
        self.file
            .as_deref()
            .filter(|f| !f.trim().is_empty())
            .map(|file| TailRequest::new(file.trim(), self.amount_mb))
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UiSettings {
    /// Lines kept before the oldest are evicted
    #[serde(default = "default_max_entries")]
    pub max_entries: usize,

    /// Start in follow mode
    #[serde(default = "default_true")]
    pub follow: bool,

    #[serde(default)]
    pub show_line_numbers: bool,
}

fn default_max_entries() -> usize {
    10_000
}

fn default_true() -> bool {
    true
}

impl Default for UiSettings {
    fn default() -> Self {
        Self {
            max_entries: default_max_entries(),
            follow: true,
            show_line_numbers: false,
        }
    }
}
