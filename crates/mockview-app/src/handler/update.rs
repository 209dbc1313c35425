//! Main update function - handles state transitions (TEA pattern)

use mockview_core::prelude::*;

use crate::diagram::history_diagram;
use crate::message::Message;
use crate::sessions::SessionList;
use crate::sort_page::{next_page_size, prev_page_size};
use crate::state::{AppPhase, AppState, MockDetailState, UiMode, HISTORY_DIAGRAM_ID};

use super::{keys::handle_key, UpdateAction, UpdateResult};

/// Process a message and update state
/// Returns optional follow-up message and/or action
pub fn update(state: &mut AppState, message: Message) -> UpdateResult {
    match message {
        Message::Quit => {
            state.history.unmount();
            state.phase = AppPhase::Quitting;
            UpdateResult::none()
        }

        Message::Key(key) => match handle_key(state, key) {
            Some(msg) => UpdateResult::message(msg),
            None => UpdateResult::none(),
        },

        Message::Tick => {
            state.tick();
            UpdateResult::none()
        }

        // ─────────────────────────────────────────────────────────
        // History Lifecycle
        // ─────────────────────────────────────────────────────────
        Message::Mount => {
            state.history.mount();
            UpdateResult::both(UpdateAction::FetchSessions, Message::FetchHistory)
        }

        Message::Refresh => {
            UpdateResult::both(UpdateAction::FetchSessions, Message::FetchHistory)
        }

        Message::FetchHistory => match state.history.begin_fetch() {
            Some(ticket) => UpdateResult::action(UpdateAction::FetchHistory {
                session: state.session_param(),
                ticket,
            }),
            None => UpdateResult::none(),
        },

        Message::PollTick => {
            if state.history.polling.is_enabled() && state.can_poll() {
                UpdateResult::message(Message::FetchHistory)
            } else {
                UpdateResult::none()
            }
        }

        Message::SyncPolling => UpdateResult::action(UpdateAction::SyncPolling),

        Message::HistoryLoaded { ticket, result } => {
            let succeeded = result.is_ok();
            if state.history.apply_fetch(ticket, result)
                && succeeded
                && state.ui_mode == UiMode::Visualize
            {
                render_diagram(state);
            }
            UpdateResult::none()
        }

        Message::SessionsLoaded { result } => {
            match result {
                Ok(list) => {
                    debug!("Sessions fetched: {}", list.len());
                    state.sessions.set_list(list);
                    state.sessions_error = None;
                }
                Err(message) => {
                    warn!("Session list fetch failed: {}", message);
                    state.sessions_error = Some(message);
                }
            }
            UpdateResult::message(Message::SyncPolling)
        }

        // ─────────────────────────────────────────────────────────
        // Sort / Page
        // ─────────────────────────────────────────────────────────
        Message::ToggleSortField => {
            state.history.on_sort();
            UpdateResult::none()
        }

        Message::ToggleSortOrder => {
            state.history.on_sort_date();
            UpdateResult::none()
        }

        Message::NextPage => {
            state.history.next_page();
            UpdateResult::none()
        }

        Message::PrevPage => {
            state.history.prev_page();
            UpdateResult::none()
        }

        Message::ChangePage(page) => {
            state.history.on_change_page(page);
            UpdateResult::none()
        }

        Message::ChangePageSize { page, page_size } => {
            state.history.on_change_page_size(page, page_size);
            UpdateResult::none()
        }

        Message::NextPageSize => change_page_size(state, next_page_size),
        Message::PrevPageSize => change_page_size(state, prev_page_size),

        Message::TogglePolling => {
            if !state.can_poll() {
                return UpdateResult::none();
            }
            state.history.toggle_polling();
            UpdateResult::message(Message::SyncPolling)
        }

        // ─────────────────────────────────────────────────────────
        // Selection / Scroll
        // ─────────────────────────────────────────────────────────
        Message::SelectNextEntry => {
            state.history.select_next();
            UpdateResult::none()
        }

        Message::SelectPrevEntry => {
            state.history.select_prev();
            UpdateResult::none()
        }

        Message::ScrollUp => {
            state.active_scroll().scroll_up(1);
            UpdateResult::none()
        }

        Message::ScrollDown => {
            state.active_scroll().scroll_down(1);
            UpdateResult::none()
        }

        Message::PageUp => {
            state.active_scroll().page_up();
            UpdateResult::none()
        }

        Message::PageDown => {
            state.active_scroll().page_down();
            UpdateResult::none()
        }

        Message::ScrollToTop => {
            state.active_scroll().scroll_to_top();
            UpdateResult::none()
        }

        // ─────────────────────────────────────────────────────────
        // Sessions
        // ─────────────────────────────────────────────────────────
        Message::SelectPrevSession => switch_session(state, SessionList::select_prev),
        Message::SelectNextSession => switch_session(state, SessionList::select_next),

        // ─────────────────────────────────────────────────────────
        // Secondary Views
        // ─────────────────────────────────────────────────────────
        Message::OpenMockDetail => {
            let Some(mock_id) = state.history.selected_mock_id().map(str::to_string) else {
                return UpdateResult::none();
            };
            state.mock_detail = Some(MockDetailState::loading(mock_id.clone()));
            state.ui_mode = UiMode::MockDetail;
            UpdateResult::action(UpdateAction::FetchMock {
                mock_id,
                session: state.session_param(),
            })
        }

        Message::MockLoaded { mock_id, result } => {
            match state.mock_detail.as_mut() {
                Some(detail) if detail.mock_id == mock_id => detail.apply(result),
                _ => debug!("Dropping mock {} for a closed view", mock_id),
            }
            UpdateResult::none()
        }

        Message::OpenVisualize => {
            state.ui_mode = UiMode::Visualize;
            state.diagram_scroll.scroll_to_top();
            render_diagram(state);
            UpdateResult::none()
        }

        Message::CloseView => {
            state.ui_mode = UiMode::History;
            state.mock_detail = None;
            state.diagram.clear();
            UpdateResult::none()
        }
    }
}

/// Step the page size, keeping the current page (clamped to the new range).
fn change_page_size(state: &AppState, step: fn(usize) -> usize) -> UpdateResult {
    let pagination = state.history.pagination();
    UpdateResult::message(Message::ChangePageSize {
        page: pagination.page,
        page_size: step(pagination.page_size),
    })
}

/// Move the session selection; a change remounts the history view.
fn switch_session(state: &mut AppState, step: fn(&mut SessionList) -> bool) -> UpdateResult {
    if !step(&mut state.sessions) {
        return UpdateResult::none();
    }
    info!("Viewing session {:?}", state.sessions.selected);
    state.history.mount();
    UpdateResult::both(UpdateAction::SyncPolling, Message::FetchHistory)
}

fn render_diagram(state: &mut AppState) {
    let source = history_diagram(state.history.entries());
    state.diagram.render(HISTORY_DIAGRAM_ID, &source);
}
