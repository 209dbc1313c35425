//! Mock detail view: the matched mock's definition, pretty-printed

use ratatui::buffer::Buffer;
use ratatui::layout::Rect;
use ratatui::text::{Line, Span};
use ratatui::widgets::{StatefulWidget, Widget};

use mockview_app::state::MockDetailState;

use super::{render_scrolled, spinner};
use crate::theme::styles;

/// Mock definition panel
#[derive(Default)]
pub struct MockDetailView {
    frame: u64,
}

impl MockDetailView {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn animation_frame(mut self, frame: u64) -> Self {
        self.frame = frame;
        self
    }
}

impl StatefulWidget for MockDetailView {
    type State = MockDetailState;

    fn render(self, area: Rect, buf: &mut Buffer, state: &mut MockDetailState) {
        let title = format!(" Mock {} ", state.mock_id);
        let block = styles::glass_block(true).title(Span::styled(title, styles::accent_bold()));
        let inner = block.inner(area);
        block.render(area, buf);

        if inner.width == 0 || inner.height == 0 {
            return;
        }

        let lines: Vec<Line> = if state.loading {
            vec![Line::from(Span::styled(
                format!("  {} Loading mock…", spinner(self.frame)),
                styles::accent(),
            ))]
        } else if let Some(error) = &state.error {
            vec![
                Line::from(Span::styled("  Unable to load mock", styles::error_bold())),
                Line::from(Span::styled(format!("  {}", error), styles::text_primary())),
            ]
        } else {
            state
                .body
                .as_deref()
                .unwrap_or_default()
                .lines()
                .map(|l| Line::from(Span::styled(l.to_string(), styles::body(true))))
                .collect()
        };

        state.scroll.update_content_size(lines.len(), inner.height as usize);
        render_scrolled(lines, state.scroll.offset, inner, buf);
    }
}
