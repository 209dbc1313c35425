//! # History Domain Types
//!
//! The request/response records served by the mock server's `/history`
//! endpoint, and the session summaries served by `/sessions/summary`.
//!
//! Entries are created by the server and never mutated here; the viewer only
//! reads and reorders them.

use std::collections::BTreeMap;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Header or query-parameter map: name → values in their original order.
///
/// The server serializes these maps with sorted keys, so a `BTreeMap` keeps
/// the display order identical to the wire order.
pub type Headers = BTreeMap<String, Vec<String>>;

/// Statuses strictly above this value are synthetic markers emitted by the
/// mock engine itself (no mock matched, or the engine failed), not real HTTP
/// statuses.
pub const ENGINE_FAILURE_STATUS: u16 = 600;

/// One recorded request/response pair.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Entry {
    /// ID of the mock that matched the request, if any.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub mock_id: Option<String>,
    pub request: Request,
    pub response: Response,
}

/// The request half of an [`Entry`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Request {
    pub path: String,
    pub method: String,
    /// JSON value when the body parsed as JSON, otherwise the raw body string.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub body: Option<serde_json::Value>,
    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    pub query_params: Headers,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub headers: Option<Headers>,
    pub date: DateTime<Utc>,
}

/// The response half of an [`Entry`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Response {
    pub status: u16,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub body: Option<serde_json::Value>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub headers: Option<Headers>,
    pub date: DateTime<Utc>,
}

impl Entry {
    /// Whether the response status is a mock-engine failure marker.
    pub fn is_engine_failure(&self) -> bool {
        self.response.is_engine_failure()
    }

    /// The matched mock id, treating an empty string as no match.
    pub fn matched_mock(&self) -> Option<&str> {
        self.mock_id.as_deref().filter(|id| !id.is_empty())
    }
}

impl Response {
    /// Whether the status is a mock-engine failure marker (> 600).
    pub fn is_engine_failure(&self) -> bool {
        self.status > ENGINE_FAILURE_STATUS
    }

    /// The engine's failure message (`body.message`) for failure statuses.
    pub fn engine_message(&self) -> Option<&str> {
        if !self.is_engine_failure() {
            return None;
        }
        self.body
            .as_ref()
            .and_then(|body| body.get("message"))
            .and_then(|message| message.as_str())
    }
}

/// A server session as returned by `GET /sessions/summary`.
///
/// The list is ordered by creation; the last element is the live session.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SessionSummary {
    pub id: String,
    #[serde(default)]
    pub name: String,
    pub date: DateTime<Utc>,
}

impl SessionSummary {
    /// Display label: the name, or the id when the session is unnamed.
    pub fn label(&self) -> &str {
        if self.name.is_empty() {
            &self.id
        } else {
            &self.name
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const SAMPLE: &str = r#"{
        "mock_id": "b7e3",
        "request": {
            "path": "/users",
            "method": "GET",
            "query_params": {"page": ["1", "2"]},
            "headers": {"Accept": ["application/json"]},
            "date": "2024-03-01T10:00:00.123456+01:00"
        },
        "response": {
            "status": 200,
            "body": {"users": []},
            "headers": {"Content-Type": ["application/json"]},
            "date": "2024-03-01T10:00:00.200Z"
        }
    }"#;

    #[test]
    fn test_entry_deserializes_server_payload() {
        let entry: Entry = serde_json::from_str(SAMPLE).unwrap();
        assert_eq!(entry.request.method, "GET");
        assert_eq!(entry.request.query_params["page"], vec!["1", "2"]);
        assert_eq!(entry.matched_mock(), Some("b7e3"));
        assert!(entry.request.body.is_none());
        assert_eq!(entry.response.status, 200);
        // Offsets are normalised to UTC
        assert_eq!(
            entry.request.date.to_rfc3339(),
            "2024-03-01T09:00:00.123456+00:00"
        );
    }

    #[test]
    fn test_entry_without_optional_fields() {
        let json = r#"{
            "request": {"path": "/", "method": "POST", "date": "2024-03-01T10:00:00Z"},
            "response": {"status": 204, "date": "2024-03-01T10:00:01Z"}
        }"#;
        let entry: Entry = serde_json::from_str(json).unwrap();
        assert!(entry.mock_id.is_none());
        assert!(entry.request.headers.is_none());
        assert!(entry.request.query_params.is_empty());
        assert!(entry.response.body.is_none());
    }

    #[test]
    fn test_empty_mock_id_is_no_match() {
        let mut entry: Entry = serde_json::from_str(SAMPLE).unwrap();
        entry.mock_id = Some(String::new());
        assert_eq!(entry.matched_mock(), None);
    }

    #[test]
    fn test_engine_failure_threshold() {
        let mut entry: Entry = serde_json::from_str(SAMPLE).unwrap();
        entry.response.status = 600;
        assert!(!entry.is_engine_failure());
        entry.response.status = 666;
        assert!(entry.is_engine_failure());
    }

    #[test]
    fn test_engine_message_only_for_failures() {
        let mut entry: Entry = serde_json::from_str(SAMPLE).unwrap();
        entry.response.body = Some(serde_json::json!({"message": "No mock found"}));
        assert_eq!(entry.response.engine_message(), None);

        entry.response.status = 666;
        assert_eq!(entry.response.engine_message(), Some("No mock found"));

        entry.response.body = Some(serde_json::json!("plain"));
        assert_eq!(entry.response.engine_message(), None);
    }

    #[test]
    fn test_session_label_falls_back_to_id() {
        let session = SessionSummary {
            id: "abc".into(),
            name: String::new(),
            date: Utc::now(),
        };
        assert_eq!(session.label(), "abc");
    }
}
