//! # Entry Formatting
//!
//! Pure conversion of one [`Entry`] into an [`EntryBlock`]: the display model
//! the terminal layer draws and the headless mode prints. Nothing here touches
//! state; every function is a function of its input.

use std::fmt::Write;

use chrono::format::{Item, StrftimeItems};
use chrono::{DateTime, Local, Utc};
use percent_encoding::{utf8_percent_encode, AsciiSet, NON_ALPHANUMERIC};

use crate::history::{Entry, Headers};

/// Default timestamp format (`2024-03-01 10:00:00.123`)
pub const DEFAULT_DATE_FORMAT: &str = "%Y-%m-%d %H:%M:%S%.3f";

/// Characters left unescaped in query values (same set as `encodeURIComponent`)
const QUERY_VALUE: &AsciiSet = &NON_ALPHANUMERIC
    .remove(b'-')
    .remove(b'_')
    .remove(b'.')
    .remove(b'!')
    .remove(b'~')
    .remove(b'*')
    .remove(b'\'')
    .remove(b'(')
    .remove(b')');

// ── Display model ─────────────────────────────────────────────────────────────

/// Display model for one history entry.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EntryBlock {
    pub request: RequestSection,
    pub response: ResponseSection,
    /// Target of the "Matched Mock" affordance, when a mock matched.
    pub mock_id: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RequestSection {
    pub method: String,
    /// Path followed by the formatted query string.
    pub target: String,
    pub date: String,
    /// `None` when the request carried no header map at all.
    pub headers: Option<Vec<HeaderRow>>,
    pub body: Option<BodyText>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResponseSection {
    pub status: u16,
    /// Status is a mock-engine failure marker.
    pub failed: bool,
    /// The engine's failure message, for failed responses.
    pub error: Option<String>,
    pub date: String,
    pub headers: Option<Vec<HeaderRow>>,
    pub body: Option<BodyText>,
}

/// One header name with its values joined by `", "`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HeaderRow {
    pub name: String,
    pub value: String,
}

/// A body ready for display.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum BodyText {
    /// Structured data, pretty-printed with 2-space indentation.
    Json(String),
    /// Anything that is not structured data, verbatim.
    Raw(String),
}

impl BodyText {
    pub fn as_str(&self) -> &str {
        match self {
            BodyText::Json(text) | BodyText::Raw(text) => text,
        }
    }

    pub fn is_json(&self) -> bool {
        matches!(self, BodyText::Json(_))
    }
}

// ── Formatting ────────────────────────────────────────────────────────────────

/// Build the display block for `entry`, formatting timestamps with
/// `date_format` (a chrono format string) in local time.
pub fn format_entry(entry: &Entry, date_format: &str) -> EntryBlock {
    let request = &entry.request;
    let response = &entry.response;

    EntryBlock {
        request: RequestSection {
            method: request.method.clone(),
            target: format!("{}{}", request.path, format_query(&request.query_params)),
            date: format_timestamp(&request.date, date_format),
            headers: request.headers.as_ref().map(format_headers),
            body: request.body.as_ref().and_then(format_body),
        },
        response: ResponseSection {
            status: response.status,
            failed: response.is_engine_failure(),
            error: response.engine_message().map(str::to_string),
            date: format_timestamp(&response.date, date_format),
            headers: response.headers.as_ref().map(format_headers),
            body: response.body.as_ref().and_then(format_body),
        },
        mock_id: entry.matched_mock().map(str::to_string),
    }
}

/// Format a timestamp in local time.
///
/// A malformed `date_format` falls back to [`DEFAULT_DATE_FORMAT`].
pub fn format_timestamp(date: &DateTime<Utc>, date_format: &str) -> String {
    let local = date.with_timezone(&Local);
    let mut out = String::new();
    if write!(out, "{}", local.format(date_format)).is_ok() {
        return out;
    }
    local.format(DEFAULT_DATE_FORMAT).to_string()
}

/// Whether `date_format` is a chrono format string without unknown specifiers.
pub fn is_valid_date_format(date_format: &str) -> bool {
    !StrftimeItems::new(date_format).any(|item| matches!(item, Item::Error))
}

/// Format a query map as `?a=1&a=2&b=x`, or an empty string for no params.
pub fn format_query(params: &Headers) -> String {
    let pairs: Vec<String> = params
        .iter()
        .flat_map(|(name, values)| {
            values
                .iter()
                .map(move |value| format!("{}={}", name, utf8_percent_encode(value, QUERY_VALUE)))
        })
        .collect();

    if pairs.is_empty() {
        String::new()
    } else {
        format!("?{}", pairs.join("&"))
    }
}

/// One row per header name, values joined by `", "` in their original order.
pub fn format_headers(headers: &Headers) -> Vec<HeaderRow> {
    headers
        .iter()
        .map(|(name, values)| HeaderRow {
            name: name.clone(),
            value: values.join(", "),
        })
        .collect()
}

/// Format a body for display.
///
/// Returns `None` for bodies with nothing to show (`null`, empty string).
/// Strings that parse as JSON and all non-string values are pretty-printed;
/// other strings are returned verbatim.
pub fn format_body(body: &serde_json::Value) -> Option<BodyText> {
    match body {
        serde_json::Value::Null => None,
        serde_json::Value::String(raw) if raw.is_empty() => None,
        serde_json::Value::String(raw) => {
            match serde_json::from_str::<serde_json::Value>(raw) {
                Ok(parsed) if parsed.is_object() || parsed.is_array() => {
                    Some(pretty(&parsed).unwrap_or_else(|| BodyText::Raw(raw.clone())))
                }
                _ => Some(BodyText::Raw(raw.clone())),
            }
        }
        other => Some(pretty(other).unwrap_or_else(|| BodyText::Raw(other.to_string()))),
    }
}

fn pretty(value: &serde_json::Value) -> Option<BodyText> {
    serde_json::to_string_pretty(value).ok().map(BodyText::Json)
}
