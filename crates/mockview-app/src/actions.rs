//! Action handlers: UpdateAction dispatch and background task spawning
//!
//! Every network request runs on its own tokio task and reports back with a
//! [`Message`]. Errors are flattened to their display text, which is what the
//! views show.

use tokio::sync::mpsc;

use mockview_core::prelude::*;

use crate::client::HistorySource;
use crate::message::Message;
use crate::UpdateAction;

/// Execute an action by spawning a background task
///
/// `SyncPolling` is not a network action; `process_message` handles it before
/// dispatching here.
pub fn handle_action<C>(action: UpdateAction, msg_tx: mpsc::Sender<Message>, client: &C)
where
    C: HistorySource + Clone + Sync + 'static,
{
    match action {
        UpdateAction::FetchHistory { session, ticket } => {
            let client = client.clone();
            tokio::spawn(async move {
                let result = client
                    .fetch_history(session.as_deref())
                    .await
                    .map_err(|e| failure_text("History fetch", e));
                if msg_tx
                    .send(Message::HistoryLoaded { ticket, result })
                    .await
                    .is_err()
                {
                    debug!("History result dropped: event loop closed");
                }
            });
        }

        UpdateAction::FetchSessions => {
            let client = client.clone();
            tokio::spawn(async move {
                let result = client
                    .fetch_sessions()
                    .await
                    .map_err(|e| failure_text("Session list fetch", e));
                let _ = msg_tx.send(Message::SessionsLoaded { result }).await;
            });
        }

        UpdateAction::FetchMock { mock_id, session } => {
            let client = client.clone();
            tokio::spawn(async move {
                let result = client
                    .fetch_mock(&mock_id, session.as_deref())
                    .await
                    .map_err(|e| failure_text("Mock fetch", e));
                let _ = msg_tx.send(Message::MockLoaded { mock_id, result }).await;
            });
        }

        UpdateAction::SyncPolling => {
            warn!("SyncPolling reached handle_action; ignoring");
        }
    }
}

/// Log a fetch failure and flatten it to the text the view shows.
///
/// Failures the next poll or refresh can clear are warnings; the rest are
/// errors.
fn failure_text(what: &str, err: Error) -> String {
    if err.is_recoverable() {
        warn!("{} failed: {}", what, err);
    } else {
        error!("{} failed: {:?}", what, err);
    }
    err.to_string()
}

#[cfg(test)]
mod tests {
    use std::sync::{Arc, Mutex};

    use chrono::{TimeZone, Utc};
    use mockview_core::{Entry, SessionSummary};
    use serde_json::json;

    use super::*;
    use crate::config::Settings;
    use crate::preferences::MemoryPreferenceStore;
    use crate::state::AppState;

    /// In-memory source recording the sessions it was asked for
    #[derive(Clone, Default)]
    struct FakeSource {
        fail: bool,
        requested: Arc<Mutex<Vec<Option<String>>>>,
    }

    impl HistorySource for FakeSource {
        async fn fetch_history(&self, session: Option<&str>) -> Result<Vec<Entry>> {
            self.requested
                .lock()
                .unwrap()
                .push(session.map(str::to_string));
            if self.fail {
                return Err(Error::server(503, "engine offline"));
            }
            Ok(vec![])
        }

        async fn fetch_sessions(&self) -> Result<Vec<SessionSummary>> {
            Ok(vec![SessionSummary {
                id: "s-1".into(),
                name: "first".into(),
                date: Utc.with_ymd_and_hms(2024, 1, 1, 0, 0, 0).unwrap(),
            }])
        }

        async fn fetch_mock(&self, mock_id: &str, _session: Option<&str>) -> Result<serde_json::Value> {
            Ok(json!({ "id": mock_id }))
        }
    }

    fn ticket() -> crate::history::FetchTicket {
        let mut state = AppState::new(
            Settings::default(),
            Box::new(MemoryPreferenceStore::new()),
            None,
        );
        state.history.mount();
        state.history.begin_fetch().unwrap()
    }

    #[tokio::test]
    async fn test_fetch_history_reports_result() {
        let (tx, mut rx) = mpsc::channel(4);
        let source = FakeSource::default();
        let ticket = ticket();

        handle_action(
            UpdateAction::FetchHistory {
                session: Some("s-1".into()),
                ticket,
            },
            tx,
            &source,
        );

        match rx.recv().await {
            Some(Message::HistoryLoaded { ticket: t, result }) => {
                assert_eq!(t, ticket);
                assert_eq!(result.unwrap().len(), 0);
            }
            other => panic!("unexpected message {other:?}"),
        }
        assert_eq!(
            source.requested.lock().unwrap().as_slice(),
            &[Some("s-1".to_string())]
        );
    }

    #[tokio::test]
    async fn test_fetch_history_error_becomes_text() {
        let (tx, mut rx) = mpsc::channel(4);
        let source = FakeSource {
            fail: true,
            ..Default::default()
        };

        handle_action(
            UpdateAction::FetchHistory {
                session: None,
                ticket: ticket(),
            },
            tx,
            &source,
        );

        match rx.recv().await {
            Some(Message::HistoryLoaded { result: Err(text), .. }) => {
                assert!(text.contains("engine offline"), "got {text}");
            }
            other => panic!("unexpected message {other:?}"),
        }
    }

    #[test]
    fn test_failure_text_is_display_text() {
        assert_eq!(failure_text("History fetch", Error::server(404, "gone")), "gone");
        assert_eq!(
            failure_text("History fetch", Error::invalid_url("::x")),
            "Invalid server URL: ::x"
        );
    }

    #[tokio::test]
    async fn test_fetch_sessions_and_mock() {
        let (tx, mut rx) = mpsc::channel(4);
        let source = FakeSource::default();

        handle_action(UpdateAction::FetchSessions, tx.clone(), &source);
        match rx.recv().await {
            Some(Message::SessionsLoaded { result }) => {
                assert_eq!(result.unwrap()[0].id, "s-1");
            }
            other => panic!("unexpected message {other:?}"),
        }

        handle_action(
            UpdateAction::FetchMock {
                mock_id: "m-9".into(),
                session: None,
            },
            tx,
            &source,
        );
        match rx.recv().await {
            Some(Message::MockLoaded { mock_id, result }) => {
                assert_eq!(mock_id, "m-9");
                assert_eq!(result.unwrap()["id"], "m-9");
            }
            other => panic!("unexpected message {other:?}"),
        }
    }
}
