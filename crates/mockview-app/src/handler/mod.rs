//! Handler module - TEA update function and event handlers
//!
//! Organized into submodules:
//! - `update`: Main update() function and message dispatch
//! - `keys`: Key event handlers for UI modes

pub(crate) mod keys;
pub(crate) mod update;


use crate::history::FetchTicket;
use crate::message::Message;

// Re-export main entry point
pub use update::update;

/// Actions that the event loop should perform after update
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum UpdateAction {
    /// Fetch the history of `session` (`None` = live session)
    FetchHistory {
        session: Option<String>,
        ticket: FetchTicket,
    },

    /// Fetch the session list
    FetchSessions,

    /// Fetch one mock definition
    FetchMock {
        mock_id: String,
        session: Option<String>,
    },

    /// Arm or disarm the autorefresh timer to match the state.
    ///
    /// Handled by `process.rs`, which owns the message sender the timer
    /// callback needs.
    SyncPolling,
}

/// Result of processing a message
#[derive(Debug, Default)]
pub struct UpdateResult {
    /// Optional follow-up message to process
    pub message: Option<Message>,
    /// Optional action for the event loop to perform
    pub action: Option<UpdateAction>,
}

impl UpdateResult {
    pub fn none() -> Self {
        Self::default()
    }

    pub fn message(msg: Message) -> Self {
        Self {
            message: Some(msg),
            action: None,
        }
    }

    pub fn action(action: UpdateAction) -> Self {
        Self {
            message: None,
            action: Some(action),
        }
    }

    /// Both an action and a follow-up message.
    pub fn both(action: UpdateAction, msg: Message) -> Self {
        Self {
            message: Some(msg),
            action: Some(action),
        }
    }
}
