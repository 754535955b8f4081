//! Application state (Model in TEA pattern)

use logtail_client::{ConnectionState, TailRequest};

use crate::config::Settings;
use crate::log_view_state::LogViewState;
use crate::tail_view::TailView;

/// Current UI mode
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum UiMode {
    /// Log view with status bar
    #[default]
    Normal,
    /// Typing a find filter expression
    FilterInput,
    /// Typing the path of the file to tail
    FileInput,
}

impl UiMode {
    pub fn is_prompt(self) -> bool {
        matches!(self, UiMode::FilterInput | UiMode::FileInput)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum AppPhase {
    #[default]
    Running,
    Quitting,
}

/// Severity of the status bar message
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StatusLevel {
    Info,
    Warning,
    Error,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StatusMessage {
    pub level: StatusLevel,
    pub text: String,
}

/// Complete application state
#[derive(Debug)]
pub struct AppState {
    pub phase: AppPhase,
    pub ui_mode: UiMode,

    /// Text typed into the active prompt
    pub prompt: String,

    pub tail: TailView,
    pub log_view_state: LogViewState,

    /// Transport connection, mirrored from transport events
    pub connection: ConnectionState,

    /// File currently requested from the server
    pub tail_request: Option<TailRequest>,

    /// Last rejected filter expression and why
    pub filter_error: Option<String>,
    /// Bumped on every rejected filter expression
    pub filter_rejections: u64,

    pub status: Option<StatusMessage>,

    pub settings: Settings,
}

impl AppState {
    pub fn with_settings(settings: Settings) -> Self {
        let mut tail = TailView::new(settings.ui.max_entries);
        tail.set_follow(settings.ui.follow);

        let mut log_view_state = LogViewState::new();
        log_view_state.auto_scroll = settings.ui.follow;

        let mut state = Self {
            phase: AppPhase::Running,
            ui_mode: UiMode::Normal,
            prompt: String::new(),
            tail,
            log_view_state,
            connection: ConnectionState::Connecting,
            tail_request: settings.tail.request(),
            filter_error: None,
            filter_rejections: 0,
            status: None,
            settings,
        };

        if let Some(pattern) = state.settings.tail.filter.clone() {
            state.apply_filter(&pattern);
        }
        state
    }

    pub fn should_quit(&self) -> bool {
        self.phase == AppPhase::Quitting
    }

    /// Apply a find filter; a rejected expression is recorded and the previous
    /// filter stays active. Returns whether the filter was applied.
    pub fn apply_filter(&mut self, pattern: &str) -> bool {
        match self.tail.set_filter(pattern) {
            Ok(()) => {
                self.filter_error = None;
                true
            }
            Err(err) => {
                self.filter_error = Some(err.to_string());
                self.filter_rejections += 1;
                self.set_status(StatusLevel::Error, err.to_string());
                false
            }
        }
    }

    /// Set follow mode in both the stream state and the scroll state
    pub fn set_follow(&mut self, follow: bool) {
        self.tail.set_follow(follow);
        self.log_view_state.auto_scroll = follow;
        if follow {
            self.log_view_state.scroll_to_bottom();
        }
    }

    /// Empty the view for a new session
    pub fn reset_session(&mut self) {
        self.tail.reset();
        self.log_view_state.reset();
        if self.tail.follow() {
            self.log_view_state.auto_scroll = true;
        }
    }

    pub fn set_status(&mut self, level: StatusLevel, text: impl Into<String>) {
        self.status = Some(StatusMessage {
            level,
            text: text.into(),
        });
    }

    /// Name of the tailed file for display
    pub fn file_label(&self) -> &str {
        self.tail_request
            .as_ref()
            .map(|r| r.file.as_str())
            .unwrap_or("(no file)")
    }
}

impl Default for AppState {
    fn default() -> Self {
        Self::with_settings(Settings::default())
    }
}
