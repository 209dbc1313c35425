//! Key event handlers for different UI modes

use crate::input_key::InputKey;
use crate::message::Message;
use crate::state::{AppState, UiMode};

/// Convert key events to messages based on current UI mode
pub fn handle_key(state: &AppState, key: InputKey) -> Option<Message> {
    match state.ui_mode {
        UiMode::History => handle_key_history(state, key),
        UiMode::Visualize | UiMode::MockDetail => handle_key_secondary(key),
    }
}

/// Handle key events in the history list
fn handle_key_history(state: &AppState, key: InputKey) -> Option<Message> {
    match key {
        InputKey::Char('q') | InputKey::CharCtrl('c') => Some(Message::Quit),

        // Sort
        InputKey::Char('s') => Some(Message::ToggleSortField),
        InputKey::Char('o') => Some(Message::ToggleSortOrder),

        // Pages
        InputKey::Right | InputKey::Char('n') => Some(Message::NextPage),
        InputKey::Left | InputKey::Char('p') => Some(Message::PrevPage),
        InputKey::Char('+' | '=') => Some(Message::NextPageSize),
        InputKey::Char('-') => Some(Message::PrevPageSize),

        // Autorefresh and the diagram only exist on the live session
        InputKey::Char('a') if state.can_poll() => Some(Message::TogglePolling),
        InputKey::Char('v') if state.can_poll() => Some(Message::OpenVisualize),

        // Entry selection
        InputKey::Char('j') => Some(Message::SelectNextEntry),
        InputKey::Char('k') => Some(Message::SelectPrevEntry),

        // Scrolling
        InputKey::Up => Some(Message::ScrollUp),
        InputKey::Down => Some(Message::ScrollDown),
        InputKey::PageUp => Some(Message::PageUp),
        InputKey::PageDown => Some(Message::PageDown),
        InputKey::Home | InputKey::Char('g') => Some(Message::ScrollToTop),

        InputKey::Char('r') => Some(Message::Refresh),

        // Sessions
        InputKey::Char('[') => Some(Message::SelectPrevSession),
        InputKey::Char(']') => Some(Message::SelectNextSession),

        // Secondary views
        InputKey::Enter => Some(Message::OpenMockDetail),

        _ => None,
    }
}

/// Handle key events in the diagram and mock detail views
fn handle_key_secondary(key: InputKey) -> Option<Message> {
    match key {
        InputKey::Esc | InputKey::Backspace => Some(Message::CloseView),
        InputKey::Char('q') | InputKey::CharCtrl('c') => Some(Message::Quit),
        InputKey::Up | InputKey::Char('k') => Some(Message::ScrollUp),
        InputKey::Down | InputKey::Char('j') => Some(Message::ScrollDown),
        InputKey::PageUp => Some(Message::PageUp),
        InputKey::PageDown => Some(Message::PageDown),
        InputKey::Home | InputKey::Char('g') => Some(Message::ScrollToTop),
        _ => None,
    }
}
