//! mockview - A terminal viewer for mock server request history
//!
//! This is the binary entry point. All logic lives in the workspace crates.

use std::path::PathBuf;
use std::time::Duration;

use clap::Parser;
use color_eyre::Result;
use tracing::{info, warn};

use mockview_app::config::{self, Settings};
use mockview_app::{FilePreferenceStore, MockServerClient, PreferenceStore};

/// mockview - A terminal viewer for mock server request history
#[derive(Parser, Debug)]
#[command(name = "mockview")]
#[command(about = "A terminal viewer for mock server request history", long_about = None)]
struct Args {
    /// Base URL of the mock server admin API
    #[arg(long, value_name = "URL")]
    url: Option<String>,

    /// Show a past session instead of the live one
    #[arg(long, value_name = "ID")]
    session: Option<String>,

    /// Print the first page of the history and exit (no TUI)
    #[arg(long)]
    headless: bool,

    /// Path to config.toml
    #[arg(long, value_name = "PATH")]
    config: Option<PathBuf>,
}

#[tokio::main]
async fn main() -> Result<()> {
    color_eyre::install()?;
    let args = Args::parse();

    mockview_core::logging::init()?;

    let settings = load_config(&args);
    let client = MockServerClient::new(
        &settings.server.url,
        Duration::from_millis(settings.server.timeout_ms),
    )?;
    let prefs: Box<dyn PreferenceStore> =
        Box::new(FilePreferenceStore::new(FilePreferenceStore::default_path()));

    if args.headless {
        mockview_tui::run_headless(&settings, &client, prefs, args.session.as_deref()).await?;
    } else {
        mockview_tui::run(settings, client, prefs, args.session).await?;
    }

    info!("mockview exiting");
    Ok(())
}

/// Load settings from `--config` or the default location, then apply CLI
/// overrides.
fn load_config(args: &Args) -> Settings {
    let path = args.config.clone().unwrap_or_else(config::default_config_path);

    // Only the default location gets a starter file
    if args.config.is_none() {
        if let Err(e) = config::init_config_file(&path) {
            warn!("Could not create {}: {}", path.display(), e);
        }
    }

    let mut settings = config::load_settings(&path);
    if let Some(url) = &args.url {
        settings.server.url = url.clone();
    }
    settings
}
