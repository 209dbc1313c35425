//! Configuration types for mockview
//!
//! Defines:
//! - `Settings` - Global application settings
//! - `ServerSettings`, `HistorySettings`, `UiSettings` - its sections

use serde::{Deserialize, Serialize};

use mockview_core::DEFAULT_DATE_FORMAT;

/// Default admin API address of the mock server
pub const DEFAULT_SERVER_URL: &str = "http://localhost:8081";

/// Default history refresh interval (10 seconds)
pub const DEFAULT_POLL_INTERVAL_MS: u64 = 10_000;

/// Page size every mount starts with
pub const DEFAULT_PAGE_SIZE: usize = 10;

/// Application settings (config.toml)
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct Settings {
    #[serde(default)]
    pub server: ServerSettings,

    #[serde(default)]
    pub history: HistorySettings,

    #[serde(default)]
    pub ui: UiSettings,
}

/// Mock server connection settings
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct ServerSettings {
    /// Base URL of the admin API
    #[serde(default = "default_server_url")]
    pub url: String,

    /// Request timeout in milliseconds
    #[serde(default = "default_timeout_ms")]
    pub timeout_ms: u64,
}

impl Default for ServerSettings {
    fn default() -> Self {
        Self {
            url: default_server_url(),
            timeout_ms: default_timeout_ms(),
        }
    }
}

fn default_server_url() -> String {
    DEFAULT_SERVER_URL.to_string()
}

fn default_timeout_ms() -> u64 {
    5_000
}

/// History view settings
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct HistorySettings {
    /// Autorefresh interval in milliseconds
    #[serde(default = "default_poll_interval_ms")]
    pub poll_interval_ms: u64,

    /// Page size used when the view is mounted
    #[serde(default = "default_page_size")]
    pub page_size: usize,

    /// Start with autorefresh enabled (only effective on the live session)
    #[serde(default)]
    pub auto_refresh: bool,
}

impl Default for HistorySettings {
    fn default() -> Self {
        Self {
            poll_interval_ms: default_poll_interval_ms(),
            page_size: default_page_size(),
            auto_refresh: false,
        }
    }
}

fn default_poll_interval_ms() -> u64 {
    DEFAULT_POLL_INTERVAL_MS
}

fn default_page_size() -> usize {
    DEFAULT_PAGE_SIZE
}

/// UI settings
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct UiSettings {
    /// chrono format string used for request/response timestamps
    #[serde(default = "default_date_format")]
    pub date_format: String,
}

impl Default for UiSettings {
    fn default() -> Self {
        Self {
            date_format: default_date_format(),
        }
    }
}

fn default_date_format() -> String {
    DEFAULT_DATE_FORMAT.to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_settings() {
        let settings = Settings::default();
        assert_eq!(settings.server.url, "http://localhost:8081");
        assert_eq!(settings.history.poll_interval_ms, 10_000);
        assert_eq!(settings.history.page_size, 10);
        assert!(!settings.history.auto_refresh);
        assert_eq!(settings.ui.date_format, DEFAULT_DATE_FORMAT);
    }

    #[test]
    fn test_partial_toml_fills_defaults() {
        let settings: Settings = toml::from_str(
            r#"
            [server]
            url = "http://mocks:9000"
            "#,
        )
        .unwrap();
        assert_eq!(settings.server.url, "http://mocks:9000");
        assert_eq!(settings.server.timeout_ms, 5_000);
        assert_eq!(settings.history.page_size, 10);
    }

    #[test]
    fn test_empty_toml_is_default() {
        let settings: Settings = toml::from_str("").unwrap();
        assert_eq!(settings.server.url, DEFAULT_SERVER_URL);
    }
}
