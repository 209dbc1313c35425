//! mockview-tui - Terminal UI for mockview
//!
//! This crate provides the ratatui-based terminal interface. It drives the
//! TEA loop from mockview-app and adds terminal rendering, event polling, and
//! widget display. [`headless`] prints the history without a terminal.

pub mod event;
pub mod headless;
pub mod layout;
pub mod render;
pub mod runner;
pub mod terminal;
pub mod theme;
pub mod widgets;

#[cfg(test)]
pub mod test_utils;

// Re-export main entry points
pub use headless::run_headless;
pub use runner::run;
