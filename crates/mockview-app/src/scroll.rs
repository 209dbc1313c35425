//! History view scroll state - offset, viewport bounds, and the eased
//! scroll back to the top anchor after repaging.

// ─────────────────────────────────────────────────────────────────────────────
// ScrollState
// ─────────────────────────────────────────────────────────────────────────────

/// Vertical scroll position of the history body
#[derive(Debug, Default, Clone)]
pub struct ScrollState {
    /// Current vertical scroll offset from top
    pub offset: usize,
    /// Total number of lines (set during render)
    pub total_lines: usize,
    /// Visible lines (set during render)
    pub visible_lines: usize,
    /// An eased scroll to the top anchor is in progress
    animating: bool,
    /// The selection moved; the next render brings it into view
    reveal: bool,
}

impl ScrollState {
    pub fn new() -> Self {
        Self::default()
    }

    fn max_offset(&self) -> usize {
        self.total_lines.saturating_sub(self.visible_lines)
    }

    /// Scroll up by n lines
    pub fn scroll_up(&mut self, n: usize) {
        self.animating = false;
        self.offset = self.offset.saturating_sub(n);
    }

    /// Scroll down by n lines
    pub fn scroll_down(&mut self, n: usize) {
        self.animating = false;
        self.offset = (self.offset + n).min(self.max_offset());
    }

    /// Jump to top immediately
    pub fn scroll_to_top(&mut self) {
        self.animating = false;
        self.offset = 0;
    }

    pub fn page_up(&mut self) {
        let page = self.visible_lines.saturating_sub(2).max(1);
        self.scroll_up(page);
    }

    pub fn page_down(&mut self) {
        let page = self.visible_lines.saturating_sub(2).max(1);
        self.scroll_down(page);
    }

    /// Start an eased scroll to the top anchor.
    pub fn request_top(&mut self) {
        self.animating = self.offset > 0;
    }

    /// Ask the next render to bring the selection into view.
    pub fn request_reveal(&mut self) {
        self.reveal = true;
    }

    /// Consume a pending reveal request.
    pub fn take_reveal(&mut self) -> bool {
        std::mem::take(&mut self.reveal)
    }

    pub fn is_animating(&self) -> bool {
        self.animating
    }

    /// Advance the eased scroll one frame: the remaining distance halves each
    /// tick (at least one line). Returns true while still moving.
    pub fn tick(&mut self) -> bool {
        if !self.animating {
            return false;
        }
        let step = (self.offset / 2).max(1);
        self.offset = self.offset.saturating_sub(step);
        if self.offset == 0 {
            self.animating = false;
        }
        self.animating
    }

    /// Bring lines `[start, start + height)` into view, preferring the start.
    pub fn ensure_visible(&mut self, start: usize, height: usize) {
        if self.visible_lines == 0 {
            return;
        }
        if start < self.offset {
            self.animating = false;
            self.offset = start;
        } else if start + height.min(self.visible_lines) > self.offset + self.visible_lines {
            self.animating = false;
            self.offset = (start + height.min(self.visible_lines))
                .saturating_sub(self.visible_lines)
                .min(self.max_offset());
        }
    }

    /// Update with new content size, clamping the offset if content shrank
    pub fn update_content_size(&mut self, total: usize, visible: usize) {
        self.total_lines = total;
        self.visible_lines = visible;
        if self.offset > self.max_offset() {
            self.offset = self.max_offset();
        }
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// Tests
// ─────────────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;

    fn state(total: usize, visible: usize, offset: usize) -> ScrollState {
        let mut s = ScrollState::new();
        s.update_content_size(total, visible);
        s.offset = offset;
        s
    }

    #[test]
    fn test_scroll_bounds() {
        let mut s = state(100, 20, 0);
        s.scroll_up(5);
        assert_eq!(s.offset, 0);
        s.scroll_down(500);
        assert_eq!(s.offset, 80);
        s.page_up();
        assert_eq!(s.offset, 62);
    }

    #[test]
    fn test_request_top_eases_to_zero() {
        let mut s = state(200, 20, 40);
        s.request_top();
        assert!(s.is_animating());

        let mut offsets = Vec::new();
        while s.tick() {
            offsets.push(s.offset);
        }
        assert_eq!(s.offset, 0);
        assert_eq!(offsets, vec![20, 10, 5, 3, 2, 1]);
        assert!(!s.is_animating());
    }

    #[test]
    fn test_request_top_at_top_is_noop() {
        let mut s = state(200, 20, 0);
        s.request_top();
        assert!(!s.is_animating());
        assert!(!s.tick());
    }

    #[test]
    fn test_manual_scroll_cancels_animation() {
        let mut s = state(200, 20, 40);
        s.request_top();
        s.scroll_down(1);
        assert!(!s.is_animating());
        assert_eq!(s.offset, 41);
    }

    #[test]
    fn test_content_shrink_clamps_offset() {
        let mut s = state(200, 20, 150);
        s.update_content_size(50, 20);
        assert_eq!(s.offset, 30);
    }

    #[test]
    fn test_ensure_visible() {
        let mut s = state(200, 20, 50);
        s.ensure_visible(10, 5);
        assert_eq!(s.offset, 10);
        s.ensure_visible(40, 8);
        assert_eq!(s.offset, 28);
        s.ensure_visible(30, 4);
        assert_eq!(s.offset, 28);
    }

    #[test]
    fn test_reveal_request_is_consumed_once() {
        let mut s = ScrollState::new();
        assert!(!s.take_reveal());
        s.request_reveal();
        assert!(s.take_reveal());
        assert!(!s.take_reveal());
    }
}
