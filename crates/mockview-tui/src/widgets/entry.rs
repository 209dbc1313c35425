//! Entry card: one request/response pair as styled lines
//!
//! ```text
//! ▌ GET /users?id=7                              2024-03-01 10:00:00.120
//!     Headers   accept: application/json
//!     Body      {
//!                 "name": "ada"
//!               }
//!   ← 200                                        2024-03-01 10:00:00.125
//!     Matched Mock  users-get  [Enter]
//! ```

use ratatui::style::Style;
use ratatui::text::{Line, Span};
use unicode_width::UnicodeWidthStr;

use mockview_core::{BodyText, EntryBlock, HeaderRow};

use crate::theme::styles;

/// Width of the section label column
const LABEL_WIDTH: usize = 10;
const INDENT: &str = "    ";

/// Display of one [`EntryBlock`]
pub struct EntryCard<'a> {
    block: &'a EntryBlock,
    selected: bool,
}

impl<'a> EntryCard<'a> {
    pub fn new(block: &'a EntryBlock) -> Self {
        Self {
            block,
            selected: false,
        }
    }

    pub fn selected(mut self, selected: bool) -> Self {
        self.selected = selected;
        self
    }

    /// Lines of the card laid out for `width` columns, ending with a blank
    /// separator line.
    pub fn lines(&self, width: usize) -> Vec<Line<'static>> {
        let request = &self.block.request;
        let response = &self.block.response;
        let mut lines = Vec::new();

        let (marker, method_style) = if self.selected {
            (Span::styled("▌", styles::accent_bold()), styles::focused_selected())
        } else {
            (Span::raw(" "), styles::accent_bold())
        };
        lines.push(title_line(
            vec![
                marker,
                Span::raw(" "),
                Span::styled(request.method.clone(), method_style),
                Span::raw(" "),
                Span::styled(request.target.clone(), styles::text_primary()),
            ],
            &request.date,
            width,
        ));
        push_headers(&mut lines, request.headers.as_deref());
        push_body(&mut lines, request.body.as_ref());

        let status_style = styles::status(response.status, response.failed);
        lines.push(title_line(
            vec![
                Span::raw("  "),
                Span::styled("← ", styles::text_muted()),
                Span::styled(response.status.to_string(), status_style),
            ],
            &response.date,
            width,
        ));
        if let Some(error) = &response.error {
            lines.push(Line::from(vec![
                Span::raw(INDENT),
                label("Error"),
                Span::styled(error.clone(), styles::error_bold()),
            ]));
        }
        push_headers(&mut lines, response.headers.as_deref());
        push_body(&mut lines, response.body.as_ref());

        if let Some(mock_id) = &self.block.mock_id {
            let mut spans = vec![
                Span::raw(INDENT),
                Span::styled("Matched Mock  ", styles::text_secondary()),
                Span::styled(mock_id.clone(), styles::accent()),
            ];
            if self.selected {
                spans.push(Span::styled("  [Enter]", styles::keybinding()));
            }
            lines.push(Line::from(spans));
        }

        lines.push(Line::default());
        lines
    }
}

/// `left` followed by `date` right-aligned to `width`.
fn title_line(mut left: Vec<Span<'static>>, date: &str, width: usize) -> Line<'static> {
    let used: usize = left.iter().map(|s| s.content.width()).sum();
    let pad = width.saturating_sub(used + date.width()).max(2);
    left.push(Span::raw(" ".repeat(pad)));
    left.push(Span::styled(date.to_string(), styles::text_muted()));
    Line::from(left)
}

fn label(text: &str) -> Span<'static> {
    Span::styled(format!("{:<width$}", text, width = LABEL_WIDTH), styles::text_secondary())
}

fn continuation() -> Span<'static> {
    Span::raw(" ".repeat(INDENT.len() + LABEL_WIDTH))
}

fn push_headers(lines: &mut Vec<Line<'static>>, headers: Option<&[HeaderRow]>) {
    let Some(headers) = headers else {
        return;
    };
    for (i, row) in headers.iter().enumerate() {
        let mut spans = if i == 0 {
            vec![Span::raw(INDENT), label("Headers")]
        } else {
            vec![continuation()]
        };
        spans.push(Span::styled(format!("{}: ", row.name), styles::text_secondary()));
        spans.push(Span::styled(row.value.clone(), styles::text_primary()));
        lines.push(Line::from(spans));
    }
}

fn push_body(lines: &mut Vec<Line<'static>>, body: Option<&BodyText>) {
    let Some(body) = body else {
        return;
    };
    let style: Style = styles::body(body.is_json());
    for (i, text) in body.as_str().lines().enumerate() {
        let mut spans = if i == 0 {
            vec![Span::raw(INDENT), label("Body")]
        } else {
            vec![continuation()]
        };
        spans.push(Span::styled(text.to_string(), style));
        lines.push(Line::from(spans));
    }
}
