//! Color palette.
//!
//! Named terminal colors only, so the view follows the user's terminal theme.

use ratatui::style::Color;

// --- Borders ---
pub const BORDER_DIM: Color = Color::DarkGray;
pub const BORDER_ACTIVE: Color = Color::Cyan;

// --- Accent ---
pub const ACCENT: Color = Color::Cyan;
pub const CONTRAST_FG: Color = Color::Black;

// --- Text ---
pub const TEXT_PRIMARY: Color = Color::White;
pub const TEXT_SECONDARY: Color = Color::Gray;
pub const TEXT_MUTED: Color = Color::DarkGray;

// --- Status ---
pub const STATUS_GREEN: Color = Color::Green;
pub const STATUS_RED: Color = Color::Red;
pub const STATUS_YELLOW: Color = Color::Yellow;

// --- Error sections ---
pub const SECTION_ERROR: Color = Color::Red;
pub const SECTION_ERROR_MSG: Color = Color::LightRed;
pub const SECTION_WARNING: Color = Color::Yellow;
pub const SECTION_WARNING_MSG: Color = Color::Yellow;

// --- Request anchors ---
pub const REQUEST_LINK: Color = Color::Cyan;
pub const REQUEST_TARGET: Color = Color::Blue;

// --- Filter highlight ---
pub const MATCH_HIGHLIGHT_FG: Color = Color::Black;
pub const MATCH_HIGHLIGHT_BG: Color = Color::Yellow;

// --- Informational lines ---
pub const INFO_LINE: Color = Color::Magenta;

// --- Gutter ---
pub const LINE_NUMBER: Color = Color::DarkGray;
