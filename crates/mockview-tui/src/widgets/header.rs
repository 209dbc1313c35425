//! Header bar widget
//!
//! Two rows inside a glass container: title, server and sort/autorefresh
//! state on top; the viewed session and the verification summary below.

use ratatui::{
    buffer::Buffer,
    layout::Rect,
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Paragraph, Widget},
};

use mockview_app::sessions::SessionList;
use mockview_core::{SortField, SortOrder};

use crate::theme::{palette, styles};

pub const CLEAN_MESSAGE: &str = "History is clean";

/// Main header showing server, session, sort and verification state
pub struct MainHeader<'a> {
    server_url: &'a str,
    sessions: &'a SessionList,
    sessions_error: Option<&'a str>,
    field: SortField,
    order: SortOrder,
    /// `None` when autorefresh is not available (past session)
    polling: Option<bool>,
    /// Engine failures in the loaded history; `None` before the first load
    failures: Option<usize>,
}

impl<'a> MainHeader<'a> {
    pub fn new(server_url: &'a str, sessions: &'a SessionList) -> Self {
        Self {
            server_url,
            sessions,
            sessions_error: None,
            field: SortField::default(),
            order: SortOrder::default(),
            polling: None,
            failures: None,
        }
    }

    pub fn sessions_error(mut self, error: Option<&'a str>) -> Self {
        self.sessions_error = error;
        self
    }

    pub fn sort(mut self, field: SortField, order: SortOrder) -> Self {
        self.field = field;
        self.order = order;
        self
    }

    pub fn polling(mut self, polling: Option<bool>) -> Self {
        self.polling = polling;
        self
    }

    pub fn failures(mut self, failures: Option<usize>) -> Self {
        self.failures = failures;
        self
    }

    fn title_row(&self, width: u16) -> Line<'static> {
        let left = vec![
            Span::raw(" "),
            Span::styled("●", Style::default().fg(palette::STATUS_GREEN)),
            Span::raw(" "),
            Span::styled("mockview", styles::accent_bold()),
            Span::styled(" / ", styles::text_muted()),
            Span::styled(self.server_url.to_string(), styles::text_secondary()),
        ];

        let arrow = match self.order {
            SortOrder::Asc => "↑",
            SortOrder::Desc => "↓",
        };
        let mut right = vec![
            Span::styled("sort ", styles::text_muted()),
            Span::styled(format!("{} {}", self.field, arrow), styles::text_primary()),
            Span::styled("  auto ", styles::text_muted()),
        ];
        right.push(match self.polling {
            Some(true) => Span::styled(
                "on",
                Style::default()
                    .fg(palette::STATUS_YELLOW)
                    .add_modifier(Modifier::BOLD),
            ),
            Some(false) => Span::styled("off", styles::text_secondary()),
            None => Span::styled("n/a", styles::text_muted()),
        });
        right.push(Span::raw(" "));

        spread(left, right, width)
    }

    fn session_row(&self, width: u16) -> Line<'static> {
        let (label, live) = match (self.sessions.selected_summary(), &self.sessions.selected) {
            (Some(summary), _) => (summary.label().to_string(), self.sessions.can_poll()),
            (None, Some(id)) => (id.clone(), false),
            (None, None) => ("live".to_string(), true),
        };

        let mut left = vec![
            Span::styled(" Session ", styles::text_muted()),
            Span::styled(label, styles::text_primary()),
        ];
        if live {
            left.push(Span::styled(" (live)", Style::default().fg(palette::STATUS_GREEN)));
        }
        if let Some(index) = self.sessions.selected_index() {
            left.push(Span::styled(
                format!("  {}/{}", index + 1, self.sessions.list.len()),
                styles::text_muted(),
            ));
        }

        let right = if let Some(error) = self.sessions_error {
            vec![Span::styled(format!("sessions: {error} "), styles::error_bold())]
        } else {
            match self.failures {
                Some(0) => vec![Span::styled(
                    format!("✓ {} ", CLEAN_MESSAGE),
                    Style::default().fg(palette::STATUS_GREEN),
                )],
                Some(n) => vec![Span::styled(
                    format!("✗ {} engine failure{} ", n, if n == 1 { "" } else { "s" }),
                    styles::error_bold(),
                )],
                None => vec![],
            }
        };

        spread(left, right, width)
    }
}

/// `left` and `right` on one line, `right` flush with the right edge when it
/// fits.
fn spread(left: Vec<Span<'static>>, right: Vec<Span<'static>>, width: u16) -> Line<'static> {
    let left_width: usize = left.iter().map(|s| s.width()).sum();
    let right_width: usize = right.iter().map(|s| s.width()).sum();
    let mut spans = left;
    if left_width + right_width < width as usize {
        spans.push(Span::raw(
            " ".repeat(width as usize - left_width - right_width),
        ));
        spans.extend(right);
    }
    Line::from(spans)
}

impl Widget for MainHeader<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let block = styles::glass_block(false);
        let inner = block.inner(area);
        block.render(area, buf);

        if inner.height == 0 || inner.width == 0 {
            return;
        }

        let mut lines = vec![self.title_row(inner.width)];
        if inner.height >= 2 {
            lines.push(self.session_row(inner.width));
        }
        Paragraph::new(lines).render(inner, buf);
    }
}
