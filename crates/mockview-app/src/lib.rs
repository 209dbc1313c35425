//! mockview-app - Application state and orchestration for mockview
//!
//! This crate implements the TEA (The Elm Architecture) pattern for the
//! history viewer: the history view controller, persisted sort/page
//! preferences, the autorefresh timer, the diagram pipeline, configuration
//! loading and the admin API client.

pub mod actions;
pub mod client;
pub mod config;
pub mod diagram;
pub mod handler;
pub mod history;
pub mod input_key;
pub mod message;
pub mod polling;
pub mod preferences;
pub mod process;
pub mod scroll;
pub mod sessions;
pub mod signals;
pub mod sort_page;
pub mod state;

// Re-export primary types
pub use client::{HistorySource, LocalHistorySource, MockServerClient};
pub use handler::{UpdateAction, UpdateResult};
pub use history::{BodyState, HistoryView, LoadingIndicator, Pagination};
pub use message::Message;
pub use preferences::{FilePreferenceStore, MemoryPreferenceStore, PreferenceStore};
pub use process::process_message;
pub use state::{AppState, UiMode};
