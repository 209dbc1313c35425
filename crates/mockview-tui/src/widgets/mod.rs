//! Custom widget components

mod diagram;
mod entry;
mod header;
mod history;
mod mock_detail;

pub use diagram::DiagramView;
pub use entry::EntryCard;
pub use header::MainHeader;
pub use history::{HistoryBody, HistoryContent};
pub use mock_detail::MockDetailView;

use ratatui::buffer::Buffer;
use ratatui::layout::Rect;
use ratatui::text::Line;
use ratatui::widgets::{Paragraph, Widget};

/// Braille spinner frames, one per tick
const SPINNER: &[&str] = &["⠋", "⠙", "⠹", "⠸", "⠼", "⠴", "⠦", "⠧", "⠇", "⠏"];

/// Spinner glyph for an animation frame.
pub fn spinner(frame: u64) -> &'static str {
    SPINNER[(frame % SPINNER.len() as u64) as usize]
}

/// Center a fixed-size rect within an area, clamped to the area.
pub fn centered_rect(width: u16, height: u16, area: Rect) -> Rect {
    let w = width.min(area.width);
    let h = height.min(area.height);
    let x = area.x + (area.width.saturating_sub(w)) / 2;
    let y = area.y + (area.height.saturating_sub(h)) / 2;
    Rect::new(x, y, w, h)
}

/// Render the window of `lines` starting at `offset`.
fn render_scrolled(lines: Vec<Line<'_>>, offset: usize, area: Rect, buf: &mut Buffer) {
    let window: Vec<Line> = lines
        .into_iter()
        .skip(offset)
        .take(area.height as usize)
        .collect();
    Paragraph::new(window).render(area, buf);
}
