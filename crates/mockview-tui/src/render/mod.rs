//! Main render/view function (View in TEA pattern)


use ratatui::layout::Rect;
use ratatui::style::Style;
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Paragraph};
use ratatui::Frame;

use mockview_app::state::{AppState, UiMode};

use crate::layout;
use crate::theme::{palette, styles};
use crate::widgets::{DiagramView, HistoryBody, HistoryContent, MainHeader, MockDetailView};

/// Render the complete UI (View function in TEA)
///
/// Only scroll state is written here: content sizes measured during layout
/// and pending reveal requests.
pub fn view(frame: &mut Frame, state: &mut AppState) {
    let area = frame.area();
    frame.render_widget(
        Block::default().style(Style::default().bg(palette::DEEPEST_BG)),
        area,
    );

    let areas = layout::create(area);

    let loaded_cleanly = state.history.has_loaded() && state.history.error().is_none();
    let header = MainHeader::new(&state.settings.server.url, &state.sessions)
        .sessions_error(state.sessions_error.as_deref())
        .sort(state.history.sort_page.field(), state.history.sort_page.order())
        .polling(state.can_poll().then(|| state.history.polling.is_enabled()))
        .failures(loaded_cleanly.then(|| state.history.failure_count()));
    frame.render_widget(header, areas.header);

    match state.ui_mode {
        UiMode::History => render_history(frame, state, areas.body),
        UiMode::Visualize => {
            let view = DiagramView::new(state.diagram.fragment(), state.diagram.error());
            frame.render_stateful_widget(view, areas.body, &mut state.diagram_scroll);
        }
        UiMode::MockDetail => {
            let animation_frame = state.animation_frame;
            if let Some(detail) = state.mock_detail.as_mut() {
                frame.render_stateful_widget(
                    MockDetailView::new().animation_frame(animation_frame),
                    areas.body,
                    detail,
                );
            }
        }
    }

    frame.render_widget(footer(state), areas.footer);
}

fn render_history(frame: &mut Frame, state: &mut AppState, area: Rect) {
    // Cards are laid out for the panel's inner width
    let width = area.width.saturating_sub(2) as usize;
    let content = HistoryContent::build(&state.history, &state.settings.ui.date_format, width);
    let body = HistoryBody::new(content, state.history.loading_indicator())
        .animation_frame(state.animation_frame)
        .sort(state.history.sort_page.field(), state.history.sort_page.order());
    frame.render_stateful_widget(body, area, &mut state.history.scroll);
}

/// Key hints for the current mode, most important first; the line is cut at
/// the terminal edge.
fn footer(state: &AppState) -> Paragraph<'static> {
    let mut hints: Vec<(&str, &str)> = vec![("q", "quit")];
    match state.ui_mode {
        UiMode::History => {
            if state.can_poll() {
                hints.extend([("a", "auto"), ("v", "diagram")]);
            }
            if state.history.selected_mock_id().is_some() {
                hints.push(("Enter", "mock"));
            }
            hints.extend([
                ("s", "field"),
                ("o", "order"),
                ("←→", "page"),
                ("+-", "size"),
                ("jk", "select"),
                ("[]", "session"),
                ("r", "refresh"),
            ]);
        }
        UiMode::Visualize | UiMode::MockDetail => {
            hints.extend([("Esc", "back"), ("↑↓", "scroll")]);
        }
    }

    let mut spans = vec![Span::raw(" ")];
    for (i, (key, action)) in hints.into_iter().enumerate() {
        if i > 0 {
            spans.push(Span::raw("  "));
        }
        spans.push(Span::styled(key.to_string(), styles::keybinding()));
        spans.push(Span::styled(format!(" {action}"), styles::text_muted()));
    }
    Paragraph::new(Line::from(spans))
}
