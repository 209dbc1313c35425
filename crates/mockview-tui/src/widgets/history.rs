//! History body: pager bars, entry cards, and the loading/empty/error states

use ratatui::buffer::Buffer;
use ratatui::layout::Rect;
use ratatui::style::{Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Clear, Paragraph, StatefulWidget, Widget};

use mockview_app::history::{BodyState, HistoryView, LoadingIndicator, Pagination};
use mockview_app::scroll::ScrollState;
use mockview_core::{format_entry, SortField, SortOrder};

use super::{centered_rect, render_scrolled, spinner, EntryCard};
use crate::theme::{palette, styles};

pub const EMPTY_MESSAGE: &str = "The history is empty.";
pub const ERROR_TITLE: &str = "Unable to load history";

/// Lines of the history body, built before rendering so the widget does not
/// hold a borrow of the view while it updates the scroll state.
#[derive(Debug, Default)]
pub struct HistoryContent {
    pub lines: Vec<Line<'static>>,
    /// `(first line, line count)` of the selected entry card
    pub selected: Option<(usize, usize)>,
}

impl HistoryContent {
    /// Lay out the body of `history` for `width` columns.
    pub fn build(history: &HistoryView, date_format: &str, width: usize) -> Self {
        match history.body() {
            BodyState::Error(message) => Self::notice(vec![
                Line::from(Span::styled(format!("⚠ {}", ERROR_TITLE), styles::error_bold())),
                Line::from(Span::styled(message.to_string(), styles::text_primary())),
                Line::default(),
                Line::from(vec![
                    Span::styled("r", styles::keybinding()),
                    Span::styled(" retry", styles::text_muted()),
                ]),
            ]),
            BodyState::Empty => Self::notice(vec![Line::from(Span::styled(
                format!("ℹ {}", EMPTY_MESSAGE),
                styles::text_secondary(),
            ))]),
            BodyState::Populated {
                window,
                show_top_pager,
                show_bottom_pager,
            } => {
                let pagination = history.pagination();
                let mut content = Self::default();

                if show_top_pager {
                    content.lines.push(pager_line(&pagination));
                    content.lines.push(Line::default());
                }
                for (i, entry) in window.iter().enumerate() {
                    let block = format_entry(entry, date_format);
                    let selected = i == history.selected();
                    let card = EntryCard::new(&block).selected(selected).lines(width);
                    if selected {
                        content.selected = Some((content.lines.len(), card.len()));
                    }
                    content.lines.extend(card);
                }
                if show_bottom_pager {
                    content.lines.push(pager_line(&pagination));
                }
                content
            }
        }
    }

    fn notice(body: Vec<Line<'static>>) -> Self {
        let mut lines = vec![Line::default()];
        lines.extend(
            body.into_iter()
                .map(|line| Line::from([vec![Span::raw("  ")], line.spans].concat())),
        );
        Self {
            lines,
            selected: None,
        }
    }
}

/// `◀ Page 2 of 3 ▶  ·  10 per page  ·  25 entries`
fn pager_line(p: &Pagination) -> Line<'static> {
    let arrow = |enabled: bool, glyph: &'static str| {
        Span::styled(
            glyph,
            if enabled {
                styles::accent_bold()
            } else {
                styles::text_muted()
            },
        )
    };
    let sep = || Span::styled("  ·  ", styles::text_muted());

    Line::from(vec![
        Span::raw("  "),
        arrow(p.page > 1, "◀"),
        Span::styled(" Page ", styles::text_secondary()),
        Span::styled(p.page.to_string(), styles::text_bright_bold()),
        Span::styled(" of ", styles::text_secondary()),
        Span::styled(p.page_count.to_string(), styles::text_secondary()),
        Span::raw(" "),
        arrow(p.page < p.page_count, "▶"),
        sep(),
        Span::styled(format!("{} per page", p.page_size), styles::text_secondary()),
        sep(),
        Span::styled(format!("{} entries", p.total), styles::text_secondary()),
    ])
}

/// The history list panel
pub struct HistoryBody {
    content: HistoryContent,
    loading: LoadingIndicator,
    frame: u64,
    field: SortField,
    order: SortOrder,
}

impl HistoryBody {
    pub fn new(content: HistoryContent, loading: LoadingIndicator) -> Self {
        Self {
            content,
            loading,
            frame: 0,
            field: SortField::default(),
            order: SortOrder::default(),
        }
    }

    pub fn animation_frame(mut self, frame: u64) -> Self {
        self.frame = frame;
        self
    }

    pub fn sort(mut self, field: SortField, order: SortOrder) -> Self {
        self.field = field;
        self.order = order;
        self
    }

    fn render_blocking(&self, area: Rect, buf: &mut Buffer) {
        let text = format!("{} Loading history…", spinner(self.frame));
        let rect = centered_rect(text.chars().count() as u16, 1, area);
        Paragraph::new(Span::styled(text, styles::accent())).render(rect, buf);
    }
}

/// Badge drawn over the top-right corner while a refresh is in flight.
fn render_overlay(frame: u64, area: Rect, buf: &mut Buffer) {
    let text = format!(" {} Refreshing ", spinner(frame));
    let width = (text.chars().count() as u16).min(area.width);
    let rect = Rect::new(area.right().saturating_sub(width), area.y, width, 1);
    Clear.render(rect, buf);
    Paragraph::new(text)
        .style(
            Style::default()
                .fg(palette::TEXT_BRIGHT)
                .bg(palette::OVERLAY_BG)
                .add_modifier(Modifier::BOLD),
        )
        .render(rect, buf);
}

impl StatefulWidget for HistoryBody {
    type State = ScrollState;

    fn render(self, area: Rect, buf: &mut Buffer, state: &mut ScrollState) {
        let title = format!(
            " History · {} date, {} first ",
            self.field,
            self.order.first_label()
        );
        let block = styles::glass_block(true).title(Span::styled(title, styles::accent_bold()));
        let inner = block.inner(area);
        block.render(area, buf);

        if inner.width == 0 || inner.height == 0 {
            return;
        }

        if self.loading == LoadingIndicator::Blocking {
            self.render_blocking(inner, buf);
            return;
        }

        state.update_content_size(self.content.lines.len(), inner.height as usize);
        if state.take_reveal() {
            if let Some((start, height)) = self.content.selected {
                state.ensure_visible(start, height);
            }
        }

        let overlay = self.loading == LoadingIndicator::Overlay;
        let frame = self.frame;
        render_scrolled(self.content.lines, state.offset, inner, buf);
        if overlay {
            render_overlay(frame, inner, buf);
        }
    }
}
