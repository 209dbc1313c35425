//! Message processing: runs the TEA update loop and dispatches actions

use tokio::sync::mpsc;

use mockview_core::prelude::*;

use crate::actions::handle_action;
use crate::client::HistorySource;
use crate::message::Message;
use crate::state::AppState;
use crate::{handler, UpdateAction};

/// Process a message through the TEA update function
///
/// Follow-up messages are processed in the same call; actions are dispatched
/// as they come out of `update`.
pub fn process_message<C>(
    state: &mut AppState,
    message: Message,
    msg_tx: &mpsc::Sender<Message>,
    client: &C,
) where
    C: HistorySource + Clone + Sync + 'static,
{
    let mut msg = Some(message);
    while let Some(m) = msg {
        let result = handler::update(state, m);

        match result.action {
            Some(UpdateAction::SyncPolling) => sync_polling(state, msg_tx),
            Some(action) => handle_action(action, msg_tx.clone(), client),
            None => {}
        }

        msg = result.message;
    }
}

/// Arm or disarm the autorefresh timer. Each tick posts a `PollTick`.
fn sync_polling(state: &mut AppState, msg_tx: &mpsc::Sender<Message>) {
    let can_poll = state.can_poll();
    let tx = msg_tx.clone();
    state.history.sync_polling(can_poll, move || {
        // Dropped when the event loop is backlogged; the next tick retries
        if tx.try_send(Message::PollTick).is_err() {
            trace!("Poll tick skipped");
        }
    });
}

#[cfg(test)]
mod tests {
    use std::time::Duration;

    use mockview_core::{Entry, SessionSummary};

    use super::*;
    use crate::config::Settings;
    use crate::preferences::MemoryPreferenceStore;

    #[derive(Clone)]
    struct EmptySource;

    impl HistorySource for EmptySource {
        async fn fetch_history(&self, _session: Option<&str>) -> Result<Vec<Entry>> {
            Ok(vec![])
        }

        async fn fetch_sessions(&self) -> Result<Vec<SessionSummary>> {
            Ok(vec![])
        }

        async fn fetch_mock(&self, _id: &str, _session: Option<&str>) -> Result<serde_json::Value> {
            Ok(serde_json::Value::Null)
        }
    }

    fn test_state() -> AppState {
        AppState::new(
            Settings::default(),
            Box::new(MemoryPreferenceStore::new()),
            None,
        )
    }

    /// Feed every queued message back through `process_message`.
    async fn drain(state: &mut AppState, tx: &mpsc::Sender<Message>, rx: &mut mpsc::Receiver<Message>) {
        while let Ok(Some(msg)) = tokio::time::timeout(Duration::from_millis(50), rx.recv()).await {
            process_message(state, msg, tx, &EmptySource);
        }
    }

    #[tokio::test]
    async fn test_mount_loads_empty_history() {
        let (tx, mut rx) = mpsc::channel(16);
        let mut state = test_state();

        process_message(&mut state, Message::Mount, &tx, &EmptySource);
        assert!(state.history.is_fetching());

        drain(&mut state, &tx, &mut rx).await;

        assert!(state.history.has_loaded());
        assert!(!state.history.is_fetching());
        assert_eq!(state.history.body(), crate::history::BodyState::Empty);
    }

    #[tokio::test]
    async fn test_toggle_polling_starts_and_stops_timer() {
        let (tx, _rx) = mpsc::channel(16);
        let mut state = test_state();

        process_message(&mut state, Message::TogglePolling, &tx, &EmptySource);
        assert!(state.history.polling.is_running());

        process_message(&mut state, Message::TogglePolling, &tx, &EmptySource);
        assert!(!state.history.polling.is_running());
    }

    #[tokio::test(start_paused = true)]
    async fn test_poll_timer_posts_ticks() {
        let (tx, mut rx) = mpsc::channel(16);
        let mut state = test_state();

        process_message(&mut state, Message::TogglePolling, &tx, &EmptySource);
        tokio::time::sleep(state.history.polling.interval() + Duration::from_millis(5)).await;

        assert!(matches!(rx.try_recv(), Ok(Message::PollTick)));
    }
}
