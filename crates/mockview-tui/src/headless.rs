//! Headless mode - plain-text history dump
//!
//! Fetches the history once and prints the first page of the sorted window to
//! stdout, using the same entry cards as the terminal UI without styling.
//! Useful for scripts and for checking a server without a terminal.
//!
//! Recorded traffic is untrusted: control characters are stripped so a body
//! cannot drive the terminal the dump is printed to.

use std::io::{self, Write};

use ratatui::text::Line;

use mockview_app::config::Settings;
use mockview_app::sort_page::SortPageStore;
use mockview_app::{HistorySource, PreferenceStore};
use mockview_core::prelude::*;
use mockview_core::{format_entry, Entry};

use crate::widgets::EntryCard;

/// Column width entry cards are laid out for
const TEXT_WIDTH: usize = 100;

/// Fetch once and print the first page.
pub async fn run_headless<C: HistorySource>(
    settings: &Settings,
    client: &C,
    prefs: Box<dyn PreferenceStore>,
    session: Option<&str>,
) -> Result<()> {
    let entries = client.fetch_history(session).await?;
    info!("Headless dump: {} entries", entries.len());

    let mut store = SortPageStore::new(prefs);
    store.reset_pages(settings.history.page_size);

    let text = render_text(&store, &entries, &settings.ui.date_format);

    let mut stdout = io::stdout().lock();
    stdout.write_all(text.as_bytes())?;
    stdout.flush()?;
    Ok(())
}

/// Plain-text rendering of the store's current window of `entries`.
pub fn render_text(store: &SortPageStore, entries: &[Entry], date_format: &str) -> String {
    let mut out = format!(
        "{} entries · sorted by {} date, {} first · page {} of {}\n\n",
        entries.len(),
        store.field().as_str(),
        store.order().first_label(),
        store.page(),
        store.page_count(entries.len()),
    );

    if entries.is_empty() {
        out.push_str("The history is empty.\n");
        return out;
    }

    for entry in store.visible_window(entries) {
        let block = format_entry(entry, date_format);
        for line in EntryCard::new(&block).lines(TEXT_WIDTH) {
            out.push_str(&printable(&plain(&line)));
            out.push('\n');
        }
    }
    out
}

fn plain(line: &Line<'_>) -> String {
    line.spans.iter().map(|span| span.content.as_ref()).collect()
}

/// `text` without control characters or trailing whitespace.
fn printable(text: &str) -> String {
    let mut out: String = text.chars().filter(|c| !c.is_control()).collect();
    out.truncate(out.trim_end().len());
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{Duration, TimeZone, Utc};
    use mockview_app::preferences::MemoryPreferenceStore;
    use mockview_core::{Headers, Request, Response};
    use serde_json::json;

    const DATE_FORMAT: &str = "%H:%M:%S";

    fn entry(n: i64) -> Entry {
        let date = Utc.with_ymd_and_hms(2024, 3, 1, 10, 0, 0).unwrap() + Duration::seconds(n);
        Entry {
            mock_id: Some(format!("mock-{n}")),
            request: Request {
                path: format!("/orders/{n}"),
                method: "POST".into(),
                body: Some(json!({ "qty": n })),
                query_params: Headers::new(),
                headers: None,
                date,
            },
            response: Response {
                status: 201,
                body: None,
                headers: None,
                date,
            },
        }
    }

    fn store(page_size: usize) -> SortPageStore {
        let mut store = SortPageStore::new(Box::new(MemoryPreferenceStore::new()));
        store.reset_pages(page_size);
        store
    }

    #[test]
    fn test_first_page_newest_first() {
        let entries: Vec<Entry> = (1..=12).map(entry).collect();

        let text = render_text(&store(10), &entries, DATE_FORMAT);

        assert!(text.starts_with("12 entries · sorted by response date, newest first · page 1 of 2"));
        assert!(text.contains("POST /orders/12"));
        assert!(text.contains("POST /orders/3"));
        // Page 1 of the descending window stops at rank 10
        assert!(!text.contains("/orders/2 "));
        assert!(!text.contains("/orders/1 "));
        assert!(text.contains("Matched Mock  mock-12"));
        assert!(text.contains("\"qty\": 12"));
    }

    #[test]
    fn test_no_styling_or_trailing_spaces() {
        let text = render_text(&store(10), &[entry(1)], DATE_FORMAT);

        assert!(!text.contains('\u{1b}'));
        assert!(text.lines().all(|l| l == l.trim_end()));
        assert!(text.contains("← 201"));
    }

    #[test]
    fn test_control_characters_are_stripped() {
        let mut e = entry(1);
        e.request.path = "/orders/\u{1b}]0;pwned\u{7}1".into();
        e.request.body = Some(json!("evil\u{1b}[2Jtext\r"));

        let text = render_text(&store(10), &[e], DATE_FORMAT);

        assert!(!text.chars().any(|c| c.is_control() && c != '\n'));
        assert!(text.contains("evil[2Jtext"));
        assert!(text.contains("/orders/]0;pwned1"));
    }

    #[test]
    fn test_malformed_date_format_still_renders() {
        let text = render_text(&store(10), &[entry(1)], "%Y-%Q");

        assert!(text.contains("POST /orders/1"));
        assert!(text.contains(":01.000"));
    }

    #[test]
    fn test_empty_history() {
        let text = render_text(&store(10), &[], DATE_FORMAT);

        assert!(text.starts_with("0 entries"));
        assert!(text.contains("page 1 of 1"));
        assert!(text.ends_with("The history is empty.\n"));
    }
}
