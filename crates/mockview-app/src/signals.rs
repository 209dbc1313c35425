//! OS signal handling: a termination signal becomes `Message::Quit`

use tokio::sync::mpsc;
use tokio::task::JoinHandle;

use mockview_core::prelude::*;

use crate::message::Message;

/// Spawn a task that turns the first SIGINT/SIGTERM (Ctrl+C on Windows) into
/// a quit message.
pub fn spawn_signal_handler(tx: mpsc::Sender<Message>) -> JoinHandle<()> {
    tokio::spawn(async move {
        match wait_for_signal().await {
            Ok(name) => {
                info!("Received {}, shutting down", name);
                let _ = tx.send(Message::Quit).await;
            }
            Err(e) => error!("Signal handler error: {}", e),
        }
    })
}

#[cfg(unix)]
async fn wait_for_signal() -> Result<&'static str> {
    use tokio::signal::unix::{signal, SignalKind};

    let mut sigint = signal(SignalKind::interrupt())
        .map_err(|e| Error::terminal(format!("Failed to create SIGINT handler: {}", e)))?;
    let mut sigterm = signal(SignalKind::terminate())
        .map_err(|e| Error::terminal(format!("Failed to create SIGTERM handler: {}", e)))?;

    let name = tokio::select! {
        _ = sigint.recv() => "SIGINT",
        _ = sigterm.recv() => "SIGTERM",
    };
    Ok(name)
}

#[cfg(windows)]
async fn wait_for_signal() -> Result<&'static str> {
    tokio::signal::ctrl_c()
        .await
        .map_err(|e| Error::terminal(format!("Failed to listen for Ctrl+C: {}", e)))?;
    Ok("Ctrl+C")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_handler_stays_quiet_without_signal() {
        let (tx, mut rx) = mpsc::channel::<Message>(1);

        let handle = spawn_signal_handler(tx);
        tokio::time::sleep(std::time::Duration::from_millis(10)).await;

        assert!(rx.try_recv().is_err());
        assert!(!handle.is_finished());
        handle.abort();
    }
}
