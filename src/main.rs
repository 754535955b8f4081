//! logtail - follow remote log files over a websocket
//!
//! This is the binary entry point. All logic lives in the library.

use clap::Parser;
use logtail::cli::Args;
use logtail_app::config::init_config_file;
use logtail_core::prelude::*;

#[tokio::main]
async fn main() -> Result<()> {
    let args = Args::parse();

    // Before the config file is read, so its problems reach the log
    logtail_core::logging::init().context("Failed to start logging")?;

    if args.init_config {
        let Some(path) = args.config_path() else {
            eprintln!("❌ No config directory on this platform; pass --config PATH");
            std::process::exit(1);
        };
        let created = init_config_file(&path)
            .with_context(|| format!("Failed to write default config to {}", path.display()))?;
        if created {
            eprintln!("✅ Wrote default configuration to {}", path.display());
        } else {
            eprintln!("Configuration already exists at {}", path.display());
        }
        return Ok(());
    }

    let resolved = args.resolve_settings()?;
    if let Some(problem) = &resolved.problem {
        eprintln!("⚠️  {}", problem);
        eprintln!("   Continuing with default settings.");
    }

    if args.headless {
        logtail::run_headless(resolved.settings).await
    } else {
        logtail::run(resolved.settings).await
    }
}
