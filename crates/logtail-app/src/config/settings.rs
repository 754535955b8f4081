//! Settings file loading and initialization

use std::path::{Path, PathBuf};

use logtail_core::prelude::*;

use super::types::Settings;

const APP_DIR: &str = "logtail";
const CONFIG_FILENAME: &str = "config.toml";

const DEFAULT_CONFIG: &str = r#"# logtail configuration

[connection]
url = "ws://localhost:8080"                  # ws, wss, http or https
path = "/system/console/logviewer/tail"
keepalive_ms = 1000
reconnect_delay_ms = 2000                    # Fixed pause between reconnect attempts

[tail]
# file = "logs/error.log"                    # Tailed on startup when set
amount_mb = 1                                # History requested before following
# filter = "ERROR|Exception"                 # Case-insensitive regex

[ui]
max_entries = 10000                          # Oldest lines are dropped past this
follow = true
show_line_numbers = false
"#;

/// `<config dir>/logtail/config.toml`, if the platform has a config dir
pub fn default_config_path() -> Option<PathBuf> {
    dirs::config_dir().map(|dir| dir.join(APP_DIR).join(CONFIG_FILENAME))
}

/// Load settings from `path`.
///
/// A missing file yields defaults. An unreadable or unparsable file is an
/// error; callers decide whether to fall back.
pub fn load_settings(path: &Path) -> Result<Settings> {
    if !path.exists() {
        debug!("No config file at {:?}, using defaults", path);
        return Ok(Settings::default());
    }

    let content = std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read {}", path.display()))?;
    let settings = toml::from_str(&content)
        .map_err(|e| Error::config(format!("Failed to parse {}: {}", path.display(), e)))?;
    debug!("Loaded settings from {:?}", path);
    Ok(settings)
}

/// Write the commented default config to `path` unless a file exists.
///
/// Returns `true` when a file was created.
pub fn init_config_file(path: &Path) -> Result<bool> {
    if path.exists() {
        return Ok(false);
    }

    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent)
            .with_context(|| format!("Failed to create {}", parent.display()))?;
    }

    std::fs::write(path, DEFAULT_CONFIG)
        .with_context(|| format!("Failed to write {}", path.display()))?;
    info!("Created default config at {:?}", path);
    Ok(true)
}
