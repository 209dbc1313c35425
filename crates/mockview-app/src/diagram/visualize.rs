//! Sequence diagram of the recorded traffic
//!
//! One round trip per entry, in request order: the client's request, the
//! mock server's response, and a note for engine failures or matched mocks.

use mockview_core::{format_query, Entry, SortField, SortOrder};

use crate::sort_page::sorted_entries;

const CLIENT: &str = "C";
const SERVER: &str = "M";

/// Build a `sequenceDiagram` description for `entries`.
pub fn history_diagram(entries: &[Entry]) -> String {
    let mut source = String::from("sequenceDiagram\n");
    source.push_str(&format!("    participant {CLIENT} as Client\n"));
    source.push_str(&format!("    participant {SERVER} as Mock server\n"));

    for entry in sorted_entries(entries, SortField::Request, SortOrder::Asc) {
        let request = &entry.request;
        let target = format!("{}{}", request.path, format_query(&request.query_params));
        source.push_str(&format!(
            "    {CLIENT}->>{SERVER}: {} {}\n",
            sanitize(&request.method),
            sanitize(&target)
        ));

        let response = &entry.response;
        source.push_str(&format!("    {SERVER}-->>{CLIENT}: {}\n", response.status));

        if let Some(message) = response.engine_message() {
            source.push_str(&format!("    Note right of {SERVER}: {}\n", sanitize(message)));
        } else if let Some(mock_id) = entry.matched_mock() {
            source.push_str(&format!(
                "    Note right of {SERVER}: mock {}\n",
                sanitize(mock_id)
            ));
        }
    }

    source
}

/// Keep user-controlled text on one line and free of statement separators.
fn sanitize(text: &str) -> String {
    text.chars()
        .map(|c| match c {
            '\n' | '\r' | '\t' => ' ',
            ';' => ',',
            other => other,
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::diagram::{DiagramRenderer, SequenceRenderer};
    use chrono::{Duration, TimeZone, Utc};
    use mockview_core::{Headers, Request, Response};
    use serde_json::json;

    fn entry(path: &str, secs: i64, status: u16) -> Entry {
        let date = Utc.with_ymd_and_hms(2024, 5, 1, 8, 0, 0).unwrap() + Duration::seconds(secs);
        Entry {
            mock_id: None,
            request: Request {
                path: path.into(),
                method: "POST".into(),
                body: None,
                query_params: Headers::new(),
                headers: None,
                date,
            },
            response: Response {
                status,
                body: None,
                headers: None,
                date,
            },
        }
    }

    #[test]
    fn test_empty_history_has_only_participants() {
        let source = history_diagram(&[]);
        assert_eq!(
            source,
            "sequenceDiagram\n    participant C as Client\n    participant M as Mock server\n"
        );
        assert!(SequenceRenderer.validate(&source).is_ok());
    }

    #[test]
    fn test_round_trips_in_request_order() {
        let source = history_diagram(&[entry("/second", 5, 201), entry("/first", 1, 200)]);
        let first = source.find("POST /first").unwrap();
        let second = source.find("POST /second").unwrap();
        assert!(first < second);
        assert!(source.contains("M-->>C: 201"));
    }

    #[test]
    fn test_failure_and_mock_notes() {
        let mut failed = entry("/x", 1, 666);
        failed.response.body = Some(json!({"message": "No mock found;\nsorry"}));
        let mut matched = entry("/y", 2, 200);
        matched.mock_id = Some("abc".into());

        let source = history_diagram(&[failed, matched]);
        assert!(source.contains("Note right of M: No mock found, sorry"));
        assert!(source.contains("Note right of M: mock abc"));
    }

    #[test]
    fn test_generated_diagram_renders() {
        let mut e = entry("/search", 1, 200);
        e.request.query_params.insert("q".into(), vec!["a:b".into()]);
        let source = history_diagram(&[e]);
        let fragment = SequenceRenderer.render("history", &source).unwrap();
        assert!(fragment.lines.iter().any(|l| l.contains("POST /search?q=a%3Ab")));
    }
}
