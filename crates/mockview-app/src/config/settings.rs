//! Settings parser for config.toml

use std::path::{Path, PathBuf};

use super::types::Settings;
use mockview_core::prelude::*;
use mockview_core::{is_valid_date_format, DEFAULT_DATE_FORMAT};

const CONFIG_FILENAME: &str = "config.toml";
const APP_DIR: &str = "mockview";

/// Default location: `<config dir>/mockview/config.toml`
pub fn default_config_path() -> PathBuf {
    dirs::config_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join(APP_DIR)
        .join(CONFIG_FILENAME)
}

/// Load settings from `config_path`, falling back to defaults when the file
/// is missing or malformed.
pub fn load_settings(config_path: &Path) -> Settings {
    if !config_path.exists() {
        debug!("No config file at {:?}, using defaults", config_path);
        return Settings::default();
    }

    match std::fs::read_to_string(config_path) {
        Ok(content) => match toml::from_str::<Settings>(&content) {
            Ok(mut settings) => {
                debug!("Loaded settings from {:?}", config_path);
                if !is_valid_date_format(&settings.ui.date_format) {
                    warn!(
                        "Invalid ui.date_format {:?}, using {:?}",
                        settings.ui.date_format, DEFAULT_DATE_FORMAT
                    );
                    settings.ui.date_format = DEFAULT_DATE_FORMAT.to_string();
                }
                settings
            }
            Err(e) => {
                warn!("Failed to parse {:?}: {}", config_path, e);
                Settings::default()
            }
        },
        Err(e) => {
            warn!("Failed to read {:?}: {}", config_path, e);
            Settings::default()
        }
    }
}

/// Write a commented default config file if none exists yet.
pub fn init_config_file(config_path: &Path) -> Result<()> {
    if config_path.exists() {
        return Ok(());
    }

    if let Some(parent) = config_path.parent() {
        std::fs::create_dir_all(parent)
            .map_err(|e| Error::config(format!("Failed to create config dir: {}", e)))?;
    }

    let default_content = r#"# mockview configuration

[server]
# Admin API of the mock server
url = "http://localhost:8081"
timeout_ms = 5000

[history]
# Autorefresh interval (only the live session is refreshed)
poll_interval_ms = 10000
page_size = 10
auto_refresh = false

[ui]
date_format = "%Y-%m-%d %H:%M:%S%.3f"
"#;

    std::fs::write(config_path, default_content)
        .map_err(|e| Error::config(format!("Failed to write config.toml: {}", e)))?;
    info!("Created default config at {:?}", config_path);
    Ok(())
}
