//! Server sessions and the live-session predicate

use mockview_core::SessionSummary;

/// Sessions known to the server plus the one the user is viewing.
///
/// `selected == None` means "whatever session is live right now".
#[derive(Debug, Clone, Default)]
pub struct SessionList {
    pub selected: Option<String>,
    pub list: Vec<SessionSummary>,
}

impl SessionList {
    pub fn new(selected: Option<String>) -> Self {
        Self {
            selected,
            list: Vec::new(),
        }
    }

    /// The most recently created session.
    pub fn live(&self) -> Option<&SessionSummary> {
        self.list.last()
    }

    /// Whether the selection is the live session, and so may be polled.
    ///
    /// True when nothing is selected or the selected id equals the last id in
    /// the list; false for any other id, including when the list is empty.
    pub fn can_poll(&self) -> bool {
        match &self.selected {
            None => true,
            Some(id) => self.live().is_some_and(|live| &live.id == id),
        }
    }

    /// Position of the selection in `list` (`None` selection maps to the last).
    pub fn selected_index(&self) -> Option<usize> {
        match &self.selected {
            None => self.list.len().checked_sub(1),
            Some(id) => self.list.iter().position(|s| &s.id == id),
        }
    }

    pub fn selected_summary(&self) -> Option<&SessionSummary> {
        self.selected_index().and_then(|i| self.list.get(i))
    }

    /// Replace the list, keeping the selection.
    pub fn set_list(&mut self, list: Vec<SessionSummary>) {
        self.list = list;
    }

    /// Select the previous (older) session. Returns true when the selection
    /// changed.
    pub fn select_prev(&mut self) -> bool {
        match self.selected_index() {
            Some(i) if i > 0 => self.select_index(i - 1),
            _ => false,
        }
    }

    /// Select the next (newer) session. Returns true when the selection
    /// changed.
    pub fn select_next(&mut self) -> bool {
        match self.selected_index() {
            Some(i) if i + 1 < self.list.len() => self.select_index(i + 1),
            _ => false,
        }
    }

    fn select_index(&mut self, index: usize) -> bool {
        let Some(session) = self.list.get(index) else {
            return false;
        };
        if self.selected.as_deref() == Some(session.id.as_str()) {
            return false;
        }
        self.selected = Some(session.id.clone());
        true
    }
}
