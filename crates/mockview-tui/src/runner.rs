//! Main TUI runner - entry point and event loop

use tokio::sync::mpsc;

use mockview_app::config::Settings;
use mockview_app::message::Message;
use mockview_app::signals;
use mockview_app::state::AppState;
use mockview_app::{process_message, HistorySource, PreferenceStore};
use mockview_core::prelude::*;

use super::{event, render, terminal};

/// Run the history viewer against `client` until the user quits.
///
/// `session` pins a past session; `None` follows the live one.
pub async fn run<C>(
    settings: Settings,
    client: C,
    prefs: Box<dyn PreferenceStore>,
    session: Option<String>,
) -> Result<()>
where
    C: HistorySource + Clone + Sync + 'static,
{
    // Install panic hook for terminal restoration
    terminal::install_panic_hook();

    info!("Connecting to {}", settings.server.url);
    let mut state = AppState::new(settings, prefs, session);

    let mut term = ratatui::try_init().map_err(|e| Error::TerminalInit(e.to_string()))?;

    // Unified message channel: background fetches, poll ticks, signals
    let (msg_tx, msg_rx) = mpsc::channel::<Message>(256);
    signals::spawn_signal_handler(msg_tx.clone());

    process_message(&mut state, Message::Mount, &msg_tx, &client);

    let result = run_loop(&mut term, &mut state, msg_rx, &msg_tx, &client);

    // Stop the poll timer and drop late fetch results
    state.history.unmount();

    ratatui::restore();

    result
}

/// Main event loop
fn run_loop<C>(
    terminal: &mut ratatui::DefaultTerminal,
    state: &mut AppState,
    mut msg_rx: mpsc::Receiver<Message>,
    msg_tx: &mpsc::Sender<Message>,
    client: &C,
) -> Result<()>
where
    C: HistorySource + Clone + Sync + 'static,
{
    while !state.should_quit() {
        while let Ok(msg) = msg_rx.try_recv() {
            process_message(state, msg, msg_tx, client);
        }

        terminal.draw(|frame| render::view(frame, state))?;

        if let Some(message) = event::poll()? {
            process_message(state, message, msg_tx, client);
        }
    }

    Ok(())
}
