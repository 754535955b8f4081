//! Configuration file parsing for logtail
//!
//! Settings live in `config.toml` under the platform config directory
//! (`~/.config/logtail/` on Linux) unless a path is given explicitly.

pub mod settings;
pub mod types;

pub use settings::{default_config_path, init_config_file, load_settings};
pub use types::*;
