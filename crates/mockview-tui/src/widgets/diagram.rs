//! Visualize view: the rendered sequence diagram or its error

use ratatui::buffer::Buffer;
use ratatui::layout::Rect;
use ratatui::text::{Line, Span};
use ratatui::widgets::{StatefulWidget, Widget};

use mockview_app::diagram::{Fragment, RENDER_ERROR_TITLE};
use mockview_app::scroll::ScrollState;

use super::render_scrolled;
use crate::theme::styles;

/// Diagram panel
pub struct DiagramView<'a> {
    fragment: Option<&'a Fragment>,
    error: Option<&'a str>,
}

impl<'a> DiagramView<'a> {
    pub fn new(fragment: Option<&'a Fragment>, error: Option<&'a str>) -> Self {
        Self { fragment, error }
    }

    fn lines(&self) -> Vec<Line<'a>> {
        if let Some(error) = self.error {
            return vec![
                Line::default(),
                Line::from(Span::styled(
                    format!("  {}", RENDER_ERROR_TITLE),
                    styles::error_bold(),
                )),
                Line::from(Span::styled(format!("  {}", error), styles::text_primary())),
            ];
        }
        match self.fragment {
            Some(fragment) if !fragment.is_empty() => fragment
                .lines
                .iter()
                .map(|l| Line::from(Span::styled(l.as_str(), styles::text_primary())))
                .collect(),
            _ => vec![Line::from(Span::styled(
                "  Nothing to draw",
                styles::text_muted(),
            ))],
        }
    }
}

impl StatefulWidget for DiagramView<'_> {
    type State = ScrollState;

    fn render(self, area: Rect, buf: &mut Buffer, state: &mut ScrollState) {
        let block = styles::glass_block(true)
            .title(Span::styled(" Sequence diagram ", styles::accent_bold()));
        let inner = block.inner(area);
        block.render(area, buf);

        if inner.width == 0 || inner.height == 0 {
            return;
        }

        let lines = self.lines();
        state.update_content_size(lines.len(), inner.height as usize);
        render_scrolled(lines, state.offset, inner, buf);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_utils::TestTerminal;

    #[test]
    fn test_error_replaces_fragment() {
        let mut term = TestTerminal::new();
        let mut scroll = ScrollState::new();
        term.render_stateful_widget(
            DiagramView::new(None, Some("line 3: unknown participant X")),
            term.area(),
            &mut scroll,
        );

        assert!(term.buffer_contains(RENDER_ERROR_TITLE));
        assert!(term.buffer_contains("line 3: unknown participant X"));
    }

    #[test]
    fn test_fragment_lines_scroll() {
        let fragment = Fragment {
            id: "d".into(),
            lines: (0..40).map(|i| format!("row {i:02}")).collect(),
        };
        let mut term = TestTerminal::new();
        let mut scroll = ScrollState::new();
        scroll.offset = 30;

        term.render_stateful_widget(
            DiagramView::new(Some(&fragment), None),
            term.area(),
            &mut scroll,
        );

        // 22 visible rows of 40: the offset clamps to 18
        assert_eq!(scroll.offset, 18);
        assert!(term.buffer_contains("row 18"));
        assert!(!term.buffer_contains("row 17"));
    }

    #[test]
    fn test_empty_pipeline_placeholder() {
        let mut term = TestTerminal::new();
        let mut scroll = ScrollState::new();
        term.render_stateful_widget(DiagramView::new(None, None), term.area(), &mut scroll);
        assert!(term.buffer_contains("Nothing to draw"));
    }
}
