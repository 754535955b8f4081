//! # logtail-core - Stream Classification Core
//!
//! Foundation crate for logtail. Turns an arbitrarily chunked text stream into
//! classified log entries: complete lines, error/warning sections, linked
//! request markers and live filter matches.
//!
//! This crate has **zero internal dependencies** -- it only depends on external
//! crates (serde, chrono, thiserror, regex, tracing).
//!
//! ## Public API
//!
//! ### Domain Types (`types`)
//! - [`LogEntry`] - One classified line with match and section information
//! - [`EntryKind`] - Plain, error start/continuation, request start/end
//! - [`LogType`] - Sticky classification mode of the stream
//! - [`Severity`], [`SectionId`], [`RequestAnchor`]
//!
//! ### Processing (`processor`)
//! - [`LogStreamState`] - The per-session processing context
//! - [`LineClass`] - Tagged per-line classification result
//!
//! ### Building Blocks
//! - [`StreamBuffer`] - Line reassembly across chunks
//! - [`ErrorAggregator`], [`is_continuation_line()`] - Error section tracking
//! - [`detect_request_marker()`] - Request start/end detection
//! - [`FindFilter`], [`ViewFilter`] - Live filter and visibility rules
//!
//! ### Error Handling (`error`)
//! - [`Error`] - Custom error enum with `fatal` vs `recoverable` classification
//! - [`Result`] - Type alias for `std::result::Result<T, Error>`
//! - [`ResultExt`] - Extension trait for adding error context
//!
//! ## Prelude
//!
//! ```rust
//! use logtail_core::prelude::*;
//! ```

pub mod error;
pub mod error_section;
pub mod filter;
pub mod logging;
pub mod prelude;
pub mod processor;
pub mod request_link;
pub mod stream_buffer;
pub mod types;

pub use error::{Error, Result, ResultExt};
pub use error_section::{
    is_continuation_line, marker_severity, ErrorAggregator, OpenSection, SectionStep,
    ERROR_MARKER, WARN_MARKER,
};
pub use filter::{apply_filter, FindFilter, ViewFilter};
pub use processor::{LineClass, LogStreamState};
pub use request_link::{detect_request_marker, match_request_end, match_request_start, RequestMarker};
pub use stream_buffer::StreamBuffer;
pub use types::{AnchorRole, EntryKind, LogEntry, LogType, RequestAnchor, SectionId, Severity};
