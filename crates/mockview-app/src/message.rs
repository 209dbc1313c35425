//! Message types for the application (TEA pattern)

use mockview_core::{Entry, SessionSummary};

use crate::history::FetchTicket;
use crate::input_key::InputKey;

/// All possible messages/actions in the application
#[derive(Debug, Clone)]
pub enum Message {
    /// Keyboard event from terminal
    Key(InputKey),

    /// Tick event for periodic updates (animations, eased scrolling)
    Tick,

    /// Quit the application (`q`, Ctrl+C, signal handler)
    Quit,

    // ─────────────────────────────────────────────────────────
    // History Lifecycle
    // ─────────────────────────────────────────────────────────
    /// (Re)mount the history view and load sessions and history
    Mount,

    /// Manual refresh: reload sessions and history
    Refresh,

    /// Fetch history if no fetch is in flight
    FetchHistory,

    /// Autorefresh timer fired
    PollTick,

    /// Re-arm or disarm the autorefresh timer
    SyncPolling,

    /// History fetch completed
    HistoryLoaded {
        ticket: FetchTicket,
        result: Result<Vec<Entry>, String>,
    },

    /// Session list fetch completed
    SessionsLoaded {
        result: Result<Vec<SessionSummary>, String>,
    },

    // ─────────────────────────────────────────────────────────
    // Sort / Page
    // ─────────────────────────────────────────────────────────
    ToggleSortField,
    ToggleSortOrder,
    NextPage,
    PrevPage,
    ChangePage(usize),
    ChangePageSize { page: usize, page_size: usize },
    NextPageSize,
    PrevPageSize,
    TogglePolling,

    // ─────────────────────────────────────────────────────────
    // Selection / Scroll
    // ─────────────────────────────────────────────────────────
    SelectNextEntry,
    SelectPrevEntry,
    ScrollUp,
    ScrollDown,
    PageUp,
    PageDown,
    ScrollToTop,

    // ─────────────────────────────────────────────────────────
    // Sessions
    // ─────────────────────────────────────────────────────────
    SelectPrevSession,
    SelectNextSession,

    // ─────────────────────────────────────────────────────────
    // Secondary Views
    // ─────────────────────────────────────────────────────────
    /// Show the matched mock of the selected entry
    OpenMockDetail,

    /// Mock definition fetch completed
    MockLoaded {
        mock_id: String,
        result: Result<serde_json::Value, String>,
    },

    /// Show the sequence diagram of the history
    OpenVisualize,

    /// Back to the history view
    CloseView,
}
