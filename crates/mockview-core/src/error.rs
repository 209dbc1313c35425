//! Error type shared by every mockview crate
//!
//! Fetch and preference failures are shown in place and retried by the next
//! poll or refresh; only terminal setup and a bad server URL end the process.

use thiserror::Error;

/// `Result` with [`Error`] as the error type
pub type Result<T> = std::result::Result<T, Error>;

/// Errors grouped by the layer they come from
#[derive(Debug, Error)]
pub enum Error {
    // ─────────────────────────────────────────────────────────────
    // Common/Infrastructure Errors
    // ─────────────────────────────────────────────────────────────
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON parsing error: {0}")]
    Json(#[from] serde_json::Error),

    // ─────────────────────────────────────────────────────────────
    // Terminal/TUI Errors
    // ─────────────────────────────────────────────────────────────
    #[error("Terminal error: {message}")]
    Terminal { message: String },

    #[error("Failed to initialize terminal: {0}")]
    TerminalInit(String),

    // ─────────────────────────────────────────────────────────────
    // Mock Server Errors
    // ─────────────────────────────────────────────────────────────
    /// Transport-level failure (connection refused, timeout, bad body).
    #[error("HTTP error: {message}")]
    Http { message: String },

    /// The server answered with a non-success status.
    #[error("{message}")]
    Server { status: u16, message: String },

    #[error("Invalid server URL: {url}")]
    InvalidUrl { url: String },

    // ─────────────────────────────────────────────────────────────
    // Configuration Errors
    // ─────────────────────────────────────────────────────────────
    #[error("Configuration error: {message}")]
    Config { message: String },

    // ─────────────────────────────────────────────────────────────
    // Preference Storage Errors
    // ─────────────────────────────────────────────────────────────
    #[error("Preference storage error: {message}")]
    Preferences { message: String },
}

// ─────────────────────────────────────────────────────────────────
// Convenience Constructors
// ─────────────────────────────────────────────────────────────────

impl Error {
    pub fn terminal(message: impl Into<String>) -> Self {
        Self::Terminal {
            message: message.into(),
        }
    }

    pub fn http(message: impl Into<String>) -> Self {
        Self::Http {
            message: message.into(),
        }
    }

    pub fn server(status: u16, message: impl Into<String>) -> Self {
        Self::Server {
            status,
            message: message.into(),
        }
    }

    pub fn invalid_url(url: impl Into<String>) -> Self {
        Self::InvalidUrl { url: url.into() }
    }

    pub fn config(message: impl Into<String>) -> Self {
        Self::Config {
            message: message.into(),
        }
    }

    pub fn preferences(message: impl Into<String>) -> Self {
        Self::Preferences {
            message: message.into(),
        }
    }

    /// Server, transport and preference failures; the next poll tick or a
    /// manual refresh retries them.
    pub fn is_recoverable(&self) -> bool {
        matches!(
            self,
            Error::Http { .. }
                | Error::Server { .. }
                | Error::Json(_)
                | Error::Preferences { .. }
        )
    }
}

// ─────────────────────────────────────────────────────────────────
// Error Context Extensions
// ─────────────────────────────────────────────────────────────────

/// Log an error with a description of what was being attempted
pub trait ResultExt<T> {
    /// Log the text `f` builds alongside the error, then pass it on.
    fn with_context<F>(self, f: F) -> Result<T>
    where
        F: FnOnce() -> String;
}

impl<T, E: Into<Error>> ResultExt<T> for std::result::Result<T, E> {
    fn with_context<F>(self, f: F) -> Result<T>
    where
        F: FnOnce() -> String,
    {
        self.map_err(|e| {
            let err = e.into();
            tracing::error!("{}: {:?}", f(), err);
            err
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display_messages() {
        let err = Error::http("connection refused");
        assert_eq!(err.to_string(), "HTTP error: connection refused");

        let err = Error::config("bad port");
        assert!(err.to_string().contains("bad port"));
    }

    #[test]
    fn test_server_error_displays_message_verbatim() {
        let err = Error::server(404, "session not found");
        assert_eq!(err.to_string(), "session not found");
    }

    #[test]
    fn test_error_from_io() {
        let io_err = std::io::Error::new(std::io::ErrorKind::NotFound, "file not found");
        let err: Error = io_err.into();
        assert!(matches!(err, Error::Io(_)));
    }

    #[test]
    fn test_error_is_recoverable() {
        assert!(Error::http("timeout").is_recoverable());
        assert!(Error::server(500, "boom").is_recoverable());
        assert!(Error::preferences("locked").is_recoverable());
        assert!(!Error::TerminalInit("x".into()).is_recoverable());
    }

    #[test]
    fn test_context_preserves_error() {
        let res: std::result::Result<(), std::io::Error> = Err(std::io::Error::new(
            std::io::ErrorKind::PermissionDenied,
            "denied",
        ));
        let err = res
            .with_context(|| "writing preferences".to_string())
            .unwrap_err();
        assert!(matches!(err, Error::Io(_)));
    }
}
