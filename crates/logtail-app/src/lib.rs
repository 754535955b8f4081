//! logtail-app - Application state and orchestration for logtail
//!
//! This crate implements the TEA (The Elm Architecture) pattern for state
//! management, the Engine that bridges the tail transport into a single
//! message loop, the tail view store and configuration loading.

pub mod config;
pub mod engine;
pub mod engine_event;
pub mod handler;
pub mod input_key;
pub mod log_view_state;
pub mod message;
pub mod process;
pub mod signals;
pub mod state;
pub mod tail_view;

// Re-export primary types
pub use engine::Engine;
pub use engine_event::EngineEvent;
pub use handler::{UpdateAction, UpdateResult};
pub use input_key::InputKey;
pub use log_view_state::{FocusInfo, LogViewState};
pub use message::Message;
pub use state::{AppPhase, AppState, StatusLevel, StatusMessage, UiMode};
pub use tail_view::{InfoLine, SectionCounts, TailView, ViewLine};

// Re-export transport types for frontends
pub use logtail_client::ConnectionState;
