//! # History View Controller
//!
//! Composes fetch results, the [`SortPageStore`], the [`PollingController`]
//! and the view's [`ScrollState`]. Every operation here is a synchronous
//! state update; network work is requested through
//! [`UpdateAction`](crate::handler::UpdateAction)s and its results come back
//! through [`HistoryView::apply_fetch`].
//!
//! ## Fetch bookkeeping
//!
//! Each mount (and each session switch) bumps a generation counter. A fetch
//! is started with [`HistoryView::begin_fetch`], which hands out a
//! [`FetchTicket`] carrying the current generation, or refuses while another
//! fetch is in flight. Results whose ticket belongs to an older generation
//! are dropped.

use mockview_core::prelude::*;
use mockview_core::Entry;

use crate::config::Settings;
use crate::polling::PollingController;
use crate::preferences::PreferenceStore;
use crate::scroll::ScrollState;
use crate::sort_page::SortPageStore;

/// The bottom pagination bar is shown only above this many entries
pub const BOTTOM_PAGER_THRESHOLD: usize = 10;

/// Proof that a fetch was started for a given mount generation
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FetchTicket {
    generation: u64,
}

impl FetchTicket {
    pub fn generation(&self) -> u64 {
        self.generation
    }
}

/// What the body region shows
#[derive(Debug, PartialEq)]
pub enum BodyState<'a> {
    /// The last fetch failed; the list is suppressed.
    Error(&'a str),
    /// The last fetch succeeded with no entries.
    Empty,
    /// The visible window plus pagination bars.
    Populated {
        window: Vec<&'a Entry>,
        show_top_pager: bool,
        show_bottom_pager: bool,
    },
}

/// How a pending fetch is signalled
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LoadingIndicator {
    None,
    /// First fetch of a mount: the whole view is replaced by the indicator.
    Blocking,
    /// Later fetches: drawn over the current content.
    Overlay,
}

/// Pagination numbers for the pager bars
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Pagination {
    pub page: usize,
    pub page_size: usize,
    pub page_count: usize,
    pub total: usize,
}

/// State of the history view
#[derive(Debug)]
pub struct HistoryView {
    entries: Vec<Entry>,
    error: Option<String>,
    /// At least one fetch of this mount succeeded
    has_loaded: bool,
    generation: u64,
    in_flight: bool,
    /// Index of the selected entry within the visible window
    selected: usize,
    initial_page_size: usize,
    pub sort_page: SortPageStore,
    pub polling: PollingController,
    pub scroll: ScrollState,
}

impl HistoryView {
    pub fn new(prefs: Box<dyn PreferenceStore>, settings: &Settings) -> Self {
        let mut sort_page = SortPageStore::new(prefs);
        let initial_page_size = settings.history.page_size.max(1);
        sort_page.reset_pages(initial_page_size);

        Self {
            entries: Vec::new(),
            error: None,
            has_loaded: false,
            generation: 0,
            in_flight: false,
            selected: 0,
            initial_page_size,
            sort_page,
            polling: PollingController::new(
                settings.history.poll_interval_ms,
                settings.history.auto_refresh,
            ),
            scroll: ScrollState::new(),
        }
    }

    // ─────────────────────────────────────────────────────────
    // Lifecycle
    // ─────────────────────────────────────────────────────────

    /// Start a fresh mount: page state back to `{1, initial}`, first-fetch
    /// indicator re-armed, results of earlier fetches invalidated.
    pub fn mount(&mut self) {
        self.generation += 1;
        self.in_flight = false;
        self.entries.clear();
        self.error = None;
        self.has_loaded = false;
        self.selected = 0;
        self.sort_page.reset_pages(self.initial_page_size);
        self.scroll = ScrollState::new();
        debug!("History view mounted (generation {})", self.generation);
    }

    /// Stop polling and invalidate in-flight fetches.
    pub fn unmount(&mut self) {
        self.polling.stop();
        self.generation += 1;
        self.in_flight = false;
        debug!("History view unmounted");
    }

    pub fn generation(&self) -> u64 {
        self.generation
    }

    // ─────────────────────────────────────────────────────────
    // Fetching
    // ─────────────────────────────────────────────────────────

    /// Claim the fetch slot. `None` while a fetch is already in flight.
    pub fn begin_fetch(&mut self) -> Option<FetchTicket> {
        if self.in_flight {
            trace!("History fetch already in flight, skipping");
            return None;
        }
        self.in_flight = true;
        Some(FetchTicket {
            generation: self.generation,
        })
    }

    pub fn is_fetching(&self) -> bool {
        self.in_flight
    }

    /// Apply a fetch result. Returns false when the ticket is stale and the
    /// result was ignored.
    pub fn apply_fetch(
        &mut self,
        ticket: FetchTicket,
        result: std::result::Result<Vec<Entry>, String>,
    ) -> bool {
        if ticket.generation != self.generation {
            debug!(
                "Dropping stale history result (generation {} != {})",
                ticket.generation, self.generation
            );
            return false;
        }
        self.in_flight = false;

        match result {
            Ok(entries) => {
                debug!("History fetched: {} entries", entries.len());
                self.entries = entries;
                self.error = None;
                self.has_loaded = true;
                self.sort_page.clamp_page(self.entries.len());
                self.clamp_selection();
            }
            Err(message) => {
                warn!("History fetch failed: {}", message);
                self.error = Some(message);
            }
        }
        true
    }

    // ─────────────────────────────────────────────────────────
    // User operations
    // ─────────────────────────────────────────────────────────

    /// Toggle the sort field (request/response date).
    pub fn on_sort(&mut self) {
        self.sort_page.toggle_sort_field();
        self.selected = 0;
    }

    /// Toggle the sort order (oldest/newest first).
    pub fn on_sort_date(&mut self) {
        self.sort_page.toggle_sort_order();
        self.selected = 0;
    }

    pub fn on_change_page(&mut self, page: usize) {
        self.sort_page.set_page(page);
        self.sort_page.clamp_page(self.entries.len());
        self.after_repage();
    }

    pub fn on_change_page_size(&mut self, page: usize, page_size: usize) {
        self.sort_page.set_page_size(page, page_size);
        self.sort_page.clamp_page(self.entries.len());
        self.after_repage();
    }

    pub fn next_page(&mut self) {
        let page = self.sort_page.page();
        if page < self.sort_page.page_count(self.entries.len()) {
            self.on_change_page(page + 1);
        }
    }

    pub fn prev_page(&mut self) {
        let page = self.sort_page.page();
        if page > 1 {
            self.on_change_page(page - 1);
        }
    }

    /// Flip the autorefresh switch; returns the new value.
    pub fn toggle_polling(&mut self) -> bool {
        let enabled = self.polling.toggle();
        info!(
            "History autorefresh {}",
            if enabled { "enabled" } else { "disabled" }
        );
        enabled
    }

    /// Arm or disarm the timer to match the switch and the live-session rule.
    ///
    /// When polling is not permitted the switch is forced off and no timer
    /// runs.
    pub fn sync_polling<F>(&mut self, can_poll: bool, callback: F)
    where
        F: FnMut() + Send + 'static,
    {
        if !can_poll {
            self.polling.set_enabled(false);
        }
        if self.polling.is_enabled() {
            self.polling.start(callback);
        } else {
            self.polling.stop();
        }
    }

    fn after_repage(&mut self) {
        self.selected = 0;
        self.scroll.request_top();
    }

    // ─────────────────────────────────────────────────────────
    // Selection
    // ─────────────────────────────────────────────────────────

    pub fn selected(&self) -> usize {
        self.selected
    }

    pub fn select_next(&mut self) {
        let len = self.window_len();
        if self.selected + 1 < len {
            self.selected += 1;
            self.scroll.request_reveal();
        }
    }

    pub fn select_prev(&mut self) {
        if self.selected > 0 {
            self.selected -= 1;
            self.scroll.request_reveal();
        }
    }

    pub fn selected_entry(&self) -> Option<&Entry> {
        if self.error.is_some() {
            return None;
        }
        self.sort_page
            .visible_window(&self.entries)
            .get(self.selected)
            .copied()
    }

    /// Mock id of the selected entry, when a mock matched it.
    pub fn selected_mock_id(&self) -> Option<&str> {
        self.selected_entry().and_then(Entry::matched_mock)
    }

    fn window_len(&self) -> usize {
        self.sort_page.visible_window(&self.entries).len()
    }

    fn clamp_selection(&mut self) {
        let len = self.window_len();
        self.selected = self.selected.min(len.saturating_sub(1));
    }

    // ─────────────────────────────────────────────────────────
    // Derived view state
    // ─────────────────────────────────────────────────────────

    pub fn entries(&self) -> &[Entry] {
        &self.entries
    }

    pub fn error(&self) -> Option<&str> {
        self.error.as_deref()
    }

    pub fn has_loaded(&self) -> bool {
        self.has_loaded
    }

    pub fn body(&self) -> BodyState<'_> {
        if let Some(message) = &self.error {
            return BodyState::Error(message);
        }
        if self.entries.is_empty() {
            return BodyState::Empty;
        }
        BodyState::Populated {
            window: self.sort_page.visible_window(&self.entries),
            show_top_pager: true,
            show_bottom_pager: self.entries.len() > BOTTOM_PAGER_THRESHOLD,
        }
    }

    pub fn loading_indicator(&self) -> LoadingIndicator {
        match (self.in_flight, self.has_loaded) {
            (false, _) => LoadingIndicator::None,
            (true, false) => LoadingIndicator::Blocking,
            (true, true) => LoadingIndicator::Overlay,
        }
    }

    pub fn pagination(&self) -> Pagination {
        let total = self.entries.len();
        Pagination {
            page: self.sort_page.page(),
            page_size: self.sort_page.page_size(),
            page_count: self.sort_page.page_count(total),
            total,
        }
    }

    /// Entries whose response is a mock-engine failure marker.
    pub fn failure_count(&self) -> usize {
        self.entries.iter().filter(|e| e.is_engine_failure()).count()
    }
}
