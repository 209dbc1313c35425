//! Configuration file parsing for mockview
//!
//! Supports:
//! - `config.toml` - Global settings (server, history, ui)
//! - `preferences.toml` - Persisted view preferences (see [`crate::preferences`])

pub mod settings;
pub mod types;

pub use settings::{default_config_path, init_config_file, load_settings};
pub use types::*;
