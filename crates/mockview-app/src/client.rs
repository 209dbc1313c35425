//! Mock server admin API client
//!
//! [`HistorySource`] is the seam the app talks to; [`MockServerClient`] is the
//! reqwest implementation. Endpoints:
//!
//! - `GET {url}/history[?session=ID]`
//! - `GET {url}/sessions/summary`
//! - `GET {url}/mocks?id=ID[&session=ID]`
//!
//! Omitting `session` targets the live session.

use std::time::Duration;

use reqwest::header::{HeaderValue, ACCEPT};
use reqwest::Client;
use serde::de::DeserializeOwned;
use url::Url;

use mockview_core::prelude::*;
use mockview_core::{Entry, SessionSummary};

/// Read access to the mock server's history and sessions
#[trait_variant::make(HistorySource: Send)]
pub trait LocalHistorySource {
    /// Recorded entries of `session`, or of the live session when `None`.
    async fn fetch_history(&self, session: Option<&str>) -> Result<Vec<Entry>>;

    /// All sessions, oldest first; the last one is live.
    async fn fetch_sessions(&self) -> Result<Vec<SessionSummary>>;

    /// Definition of one mock, as opaque JSON.
    async fn fetch_mock(&self, mock_id: &str, session: Option<&str>) -> Result<serde_json::Value>;
}

/// HTTP client for the admin API
#[derive(Debug, Clone)]
pub struct MockServerClient {
    base: Url,
    http: Client,
}

impl MockServerClient {
    /// Create a client for the admin API at `base_url`.
    pub fn new(base_url: &str, timeout: Duration) -> Result<Self> {
        let base = Url::parse(base_url).map_err(|_| Error::invalid_url(base_url))?;
        if !matches!(base.scheme(), "http" | "https") {
            return Err(Error::invalid_url(base_url));
        }

        let http = Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|e| Error::http(format!("Failed to create HTTP client: {}", e)))?;

        Ok(Self { base, http })
    }

    pub fn base_url(&self) -> &Url {
        &self.base
    }

    /// `{base}/{path}?{query}`, keeping any path prefix of the base URL.
    pub fn endpoint(&self, path: &str, query: &[(&str, &str)]) -> Result<Url> {
        let raw = format!("{}/{}", self.base.as_str().trim_end_matches('/'), path);
        let mut url = Url::parse(&raw).map_err(|_| Error::invalid_url(raw.as_str()))?;
        if !query.is_empty() {
            url.query_pairs_mut().extend_pairs(query);
        }
        Ok(url)
    }

    async fn get_json<T: DeserializeOwned>(&self, url: Url) -> Result<T> {
        trace!("GET {}", url);
        let response = self
            .http
            .get(url.clone())
            .header(ACCEPT, HeaderValue::from_static("application/json"))
            .send()
            .await
            .map_err(|e| Error::http(e.to_string()))?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(Error::server(
                status.as_u16(),
                server_message(status.as_u16(), &body),
            ));
        }

        response
            .json::<T>()
            .await
            .map_err(|e| Error::http(format!("Invalid response from {}: {}", url, e)))
    }
}

impl HistorySource for MockServerClient {
    async fn fetch_history(&self, session: Option<&str>) -> Result<Vec<Entry>> {
        let query: Vec<(&str, &str)> = session.map(|id| ("session", id)).into_iter().collect();
        let url = self.endpoint("history", &query)?;
        // An empty history is serialised as `null`
        let entries: Option<Vec<Entry>> = self.get_json(url).await?;
        Ok(entries.unwrap_or_default())
    }

    async fn fetch_sessions(&self) -> Result<Vec<SessionSummary>> {
        let url = self.endpoint("sessions/summary", &[])?;
        let sessions: Option<Vec<SessionSummary>> = self.get_json(url).await?;
        Ok(sessions.unwrap_or_default())
    }

    async fn fetch_mock(&self, mock_id: &str, session: Option<&str>) -> Result<serde_json::Value> {
        let mut query = vec![("id", mock_id)];
        if let Some(id) = session {
            query.push(("session", id));
        }
        let url = self.endpoint("mocks", &query)?;
        let mocks: serde_json::Value = self.get_json(url).await?;

        // `?id=` answers with a one-element list
        match mocks {
            serde_json::Value::Array(mut list) if list.len() == 1 => Ok(list.remove(0)),
            other => Ok(other),
        }
    }
}

/// Error text for a non-success response: the server's `message` field when
/// present, `HTTP <status>` otherwise.
pub fn server_message(status: u16, body: &str) -> String {
    serde_json::from_str::<serde_json::Value>(body)
        .ok()
        .and_then(|v| v.get("message").and_then(|m| m.as_str()).map(str::to_string))
        .filter(|m| !m.is_empty())
        .unwrap_or_else(|| format!("HTTP {}", status))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn client(url: &str) -> MockServerClient {
        MockServerClient::new(url, Duration::from_secs(1)).unwrap()
    }

    #[test]
    fn test_rejects_invalid_urls() {
        assert!(matches!(
            MockServerClient::new("not a url", Duration::from_secs(1)),
            Err(Error::InvalidUrl { .. })
        ));
        assert!(matches!(
            MockServerClient::new("ftp://host", Duration::from_secs(1)),
            Err(Error::InvalidUrl { .. })
        ));
    }

    #[test]
    fn test_endpoint_without_session() {
        let url = client("http://localhost:8081").endpoint("history", &[]).unwrap();
        assert_eq!(url.as_str(), "http://localhost:8081/history");
    }

    #[test]
    fn test_endpoint_keeps_path_prefix_and_encodes_query() {
        let url = client("http://mocks.local/admin/")
            .endpoint("mocks", &[("id", "a b"), ("session", "s&1")])
            .unwrap();
        assert_eq!(
            url.as_str(),
            "http://mocks.local/admin/mocks?id=a+b&session=s%261"
        );
    }

    #[test]
    fn test_server_message_prefers_body_message() {
        assert_eq!(
            server_message(404, r#"{"message":"session not found"}"#),
            "session not found"
        );
        assert_eq!(server_message(500, "<html>oops</html>"), "HTTP 500");
        assert_eq!(server_message(502, r#"{"message":""}"#), "HTTP 502");
        assert_eq!(server_message(503, ""), "HTTP 503");
    }
}
