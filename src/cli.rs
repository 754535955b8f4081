//! Command line arguments and how they layer over the config file

use std::path::PathBuf;

use clap::Parser;
use logtail_app::config::{default_config_path, load_settings, Settings};
use logtail_client::parse_amount;
use logtail_core::prelude::*;

/// logtail - follow a remote log file in the terminal
#[derive(Parser, Debug)]
#[command(name = "logtail", version)]
#[command(about = "Follow a remote log file over a websocket", long_about = None)]
pub struct Args {
    /// Server base URL (ws, wss, http or https)
    #[arg(long, value_name = "URL")]
    pub url: Option<String>,

    /// Log file to tail, as the server names it
    #[arg(short, long, value_name = "FILE")]
    pub file: Option<String>,

    /// Megabytes of existing content to show before following
    #[arg(short, long, value_name = "MB", value_parser = parse_amount_arg)]
    pub amount: Option<u32>,

    /// Case-insensitive regex that highlights matching lines
    #[arg(long, value_name = "REGEX")]
    pub filter: Option<String>,

    /// Config file to use instead of the default location
    #[arg(short, long, value_name = "PATH")]
    pub config: Option<PathBuf>,

    /// Run in headless mode (NDJSON on stdout, no TUI)
    #[arg(long)]
    pub headless: bool,

    /// Write a commented default config file and exit
    #[arg(long)]
    pub init_config: bool,
}

/// Settings ready to run with, and the config problem they replaced, if any
#[derive(Debug)]
pub struct ResolvedSettings {
    pub settings: Settings,
    pub problem: Option<Error>,
}

fn parse_amount_arg(value: &str) -> std::result::Result<u32, String> {
    parse_amount(value).map_err(|e| e.to_string())
}

impl Args {
    /// Config file location: `--config`, else the platform default
    pub fn config_path(&self) -> Option<PathBuf> {
        self.config.clone().or_else(default_config_path)
    }

    /// Load the config file and apply command line overrides.
    ///
    /// An explicit `--config` that does not exist is an error; a missing
    /// default file just means defaults. A file that cannot be read or parsed
    /// is replaced by defaults and returned as the `problem` to report.
    pub fn resolve_settings(&self) -> Result<ResolvedSettings> {
        let path = match &self.config {
            Some(path) if !path.exists() => {
                return Err(Error::ConfigNotFound { path: path.clone() });
            }
            Some(path) => Some(path.clone()),
            None => default_config_path(),
        };

        let (settings, problem) = match path.map(|path| load_settings(&path)) {
            Some(Ok(settings)) => (settings, None),
            Some(Err(e)) => {
                warn!("{}; using defaults", e);
                (Settings::default(), Some(e))
            }
            None => (Settings::default(), None),
        };

        Ok(ResolvedSettings {
            settings: self.apply_overrides(settings),
            problem,
        })
    }

    /// Values given on the command line win over the file
    pub fn apply_overrides(&self, mut settings: Settings) -> Settings {
        if let Some(url) = &self.url {
            settings.connection.url = url.clone();
        }
        if let Some(file) = &self.file {
            settings.tail.file = Some(file.clone());
        }
        if let Some(amount) = self.amount {
            settings.tail.amount_mb = amount;
        }
        if let Some(filter) = &self.filter {
            settings.tail.filter = Some(filter.clone());
        }
        settings
    }
}
