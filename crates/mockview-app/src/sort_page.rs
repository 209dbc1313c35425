//! Sort and pagination state for the history list
//!
//! Sort field and order are durable (read from and written through a
//! [`PreferenceStore`]); page and page size live only as long as the view.

use mockview_core::prelude::*;
use mockview_core::{Entry, SortField, SortOrder};

use crate::config::DEFAULT_PAGE_SIZE;
use crate::preferences::{PreferenceStore, SORT_FIELD_KEY, SORT_ORDER_KEY};

/// Page sizes offered by the page-size selector
pub const PAGE_SIZE_OPTIONS: [usize; 4] = [10, 20, 50, 100];

/// Current sort axes plus session-only page state.
pub struct SortPageStore {
    prefs: Box<dyn PreferenceStore>,
    field: SortField,
    order: SortOrder,
    page: usize,
    page_size: usize,
}

impl std::fmt::Debug for SortPageStore {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SortPageStore")
            .field("field", &self.field)
            .field("order", &self.order)
            .field("page", &self.page)
            .field("page_size", &self.page_size)
            .finish()
    }
}

impl SortPageStore {
    /// Open the store, reading the persisted sort axes. Missing or invalid
    /// values fall back to `response` / `desc`.
    pub fn new(prefs: Box<dyn PreferenceStore>) -> Self {
        let field = read_pref(prefs.as_ref(), SORT_FIELD_KEY);
        let order = read_pref(prefs.as_ref(), SORT_ORDER_KEY);

        Self {
            prefs,
            field,
            order,
            page: 1,
            page_size: DEFAULT_PAGE_SIZE,
        }
    }

    pub fn field(&self) -> SortField {
        self.field
    }

    pub fn order(&self) -> SortOrder {
        self.order
    }

    pub fn page(&self) -> usize {
        self.page
    }

    pub fn page_size(&self) -> usize {
        self.page_size
    }

    /// Flip the sort field and persist it.
    pub fn toggle_sort_field(&mut self) {
        self.field = self.field.other();
        self.persist(SORT_FIELD_KEY, self.field.as_str());
    }

    /// Flip the sort order and persist it.
    pub fn toggle_sort_order(&mut self) {
        self.order = self.order.other();
        self.persist(SORT_ORDER_KEY, self.order.as_str());
    }

    pub fn set_page(&mut self, page: usize) {
        self.page = page.max(1);
    }

    /// Set page and page size together.
    pub fn set_page_size(&mut self, page: usize, page_size: usize) {
        self.page = page.max(1);
        self.page_size = page_size.max(1);
    }

    /// Back to `{1, initial_size}`; sort axes are untouched.
    pub fn reset_pages(&mut self, initial_size: usize) {
        self.set_page_size(1, initial_size);
    }

    /// Number of pages for `total` entries (never less than 1).
    pub fn page_count(&self, total: usize) -> usize {
        total.div_ceil(self.page_size).max(1)
    }

    /// Pull `page` back inside `[1, page_count(total)]`.
    pub fn clamp_page(&mut self, total: usize) {
        self.page = self.page.clamp(1, self.page_count(total));
    }

    /// Sort `entries` by the chosen timestamp and return the current page.
    ///
    /// The sort is stable in both directions: entries with equal timestamps
    /// keep their original relative order.
    pub fn visible_window<'a>(&self, entries: &'a [Entry]) -> Vec<&'a Entry> {
        let mut sorted = sorted_entries(entries, self.field, self.order);

        let start = (self.page - 1).saturating_mul(self.page_size).min(sorted.len());
        let end = self.page.saturating_mul(self.page_size).min(sorted.len());
        sorted.truncate(end);
        sorted.drain(..start);
        sorted
    }

    fn persist(&self, key: &str, value: &str) {
        if let Err(e) = self.prefs.set(key, value) {
            warn!("Failed to persist {}: {}", key, e);
        }
    }
}

/// Stable sort of `entries` by `field`'s timestamp in `order`.
pub fn sorted_entries(entries: &[Entry], field: SortField, order: SortOrder) -> Vec<&Entry> {
    let mut sorted: Vec<&Entry> = entries.iter().collect();
    sorted.sort_by(|a, b| {
        let ord = field.date_of(a).cmp(&field.date_of(b));
        match order {
            SortOrder::Asc => ord,
            SortOrder::Desc => ord.reverse(),
        }
    });
    sorted
}

/// The next page-size option after `current`, wrapping around.
pub fn next_page_size(current: usize) -> usize {
    PAGE_SIZE_OPTIONS
        .iter()
        .copied()
        .find(|size| *size > current)
        .unwrap_or(PAGE_SIZE_OPTIONS[0])
}

/// The page-size option before `current`, wrapping around.
pub fn prev_page_size(current: usize) -> usize {
    PAGE_SIZE_OPTIONS
        .iter()
        .rev()
        .copied()
        .find(|size| *size < current)
        .unwrap_or(PAGE_SIZE_OPTIONS[PAGE_SIZE_OPTIONS.len() - 1])
}

fn read_pref<T>(prefs: &dyn PreferenceStore, key: &str) -> T
where
    T: std::str::FromStr + Default,
{
    prefs
        .get(key)
        .and_then(|raw| raw.parse().ok())
        .unwrap_or_default()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::preferences::MemoryPreferenceStore;
    use chrono::{Duration, TimeZone, Utc};
    use mockview_core::{Headers, Request, Response};

    /// Entry `n` with request at `n` seconds and response at `resp` seconds.
    fn entry(n: i64, resp: i64) -> Entry {
        let base = Utc.with_ymd_and_hms(2024, 1, 1, 0, 0, 0).unwrap();
        Entry {
            mock_id: None,
            request: Request {
                path: format!("/{n}"),
                method: "GET".into(),
                body: None,
                query_params: Headers::new(),
                headers: None,
                date: base + Duration::seconds(n),
            },
            response: Response {
                status: 200,
                body: None,
                headers: None,
                date: base + Duration::seconds(resp),
            },
        }
    }

    fn paths(window: &[&Entry]) -> Vec<String> {
        window.iter().map(|e| e.request.path.clone()).collect()
    }

    fn store() -> (SortPageStore, MemoryPreferenceStore) {
        let prefs = MemoryPreferenceStore::new();
        (SortPageStore::new(Box::new(prefs.clone())), prefs)
    }

    #[test]
    fn test_defaults() {
        let (store, _) = store();
        assert_eq!(store.field(), SortField::Response);
        assert_eq!(store.order(), SortOrder::Desc);
        assert_eq!(store.page(), 1);
        assert_eq!(store.page_size(), 10);
    }

    #[test]
    fn test_toggles_persist_and_survive_reload() {
        let (mut store, prefs) = store();
        store.toggle_sort_field();
        store.toggle_sort_order();
        assert_eq!(prefs.get(SORT_FIELD_KEY).as_deref(), Some("request"));
        assert_eq!(prefs.get(SORT_ORDER_KEY).as_deref(), Some("asc"));

        let reloaded = SortPageStore::new(Box::new(prefs));
        assert_eq!(reloaded.field(), SortField::Request);
        assert_eq!(reloaded.order(), SortOrder::Asc);
    }

    #[test]
    fn test_toggle_twice_is_identity() {
        let (mut store, _) = store();
        store.toggle_sort_field();
        store.toggle_sort_field();
        store.toggle_sort_order();
        store.toggle_sort_order();
        assert_eq!(store.field(), SortField::Response);
        assert_eq!(store.order(), SortOrder::Desc);
    }

    #[test]
    fn test_invalid_persisted_values_fall_back() {
        let prefs = MemoryPreferenceStore::new();
        prefs.set(SORT_FIELD_KEY, "sideways").unwrap();
        prefs.set(SORT_ORDER_KEY, "").unwrap();
        let store = SortPageStore::new(Box::new(prefs));
        assert_eq!(store.field(), SortField::Response);
        assert_eq!(store.order(), SortOrder::Desc);
    }

    #[test]
    fn test_sorts_by_chosen_field() {
        // Request order 1,2,3 but response order 3,1,2
        let entries = vec![entry(1, 20), entry(2, 30), entry(3, 10)];
        let (mut store, _) = store();

        assert_eq!(paths(&store.visible_window(&entries)), ["/2", "/1", "/3"]);

        store.toggle_sort_field();
        assert_eq!(paths(&store.visible_window(&entries)), ["/3", "/2", "/1"]);

        store.toggle_sort_order();
        assert_eq!(paths(&store.visible_window(&entries)), ["/1", "/2", "/3"]);
    }

    #[test]
    fn test_ties_keep_original_order_in_both_directions() {
        let entries = vec![entry(1, 5), entry(2, 5), entry(3, 1), entry(4, 5)];
        let (mut store, _) = store();

        assert_eq!(
            paths(&store.visible_window(&entries)),
            ["/1", "/2", "/4", "/3"]
        );
        store.toggle_sort_order();
        assert_eq!(
            paths(&store.visible_window(&entries)),
            ["/3", "/1", "/2", "/4"]
        );
    }

    #[test]
    fn test_window_lengths() {
        let entries: Vec<Entry> = (0..23).map(|n| entry(n, n)).collect();
        let (mut store, _) = store();

        for (page, expected) in [(1, 10), (2, 10), (3, 3), (4, 0), (100, 0)] {
            store.set_page(page);
            assert_eq!(store.visible_window(&entries).len(), expected, "page {page}");
        }

        store.set_page_size(2, 7);
        assert_eq!(store.visible_window(&entries).len(), 7);
        store.set_page_size(4, 7);
        assert_eq!(store.visible_window(&entries).len(), 2);
    }

    #[test]
    fn test_visible_window_is_idempotent() {
        let entries: Vec<Entry> = (0..15).map(|n| entry(n, 15 - n)).collect();
        let (store, _) = store();
        assert_eq!(store.visible_window(&entries), store.visible_window(&entries));
    }

    #[test]
    fn test_set_page_size_updates_both() {
        let (mut store, _) = store();
        store.set_page(4);
        store.set_page_size(1, 5);
        assert_eq!((store.page(), store.page_size()), (1, 5));
    }

    #[test]
    fn test_page_count_and_clamp() {
        let (mut store, _) = store();
        assert_eq!(store.page_count(0), 1);
        assert_eq!(store.page_count(10), 1);
        assert_eq!(store.page_count(11), 2);

        store.set_page(5);
        store.clamp_page(25);
        assert_eq!(store.page(), 3);
        store.clamp_page(0);
        assert_eq!(store.page(), 1);
    }

    #[test]
    fn test_zero_inputs_are_raised_to_one() {
        let (mut store, _) = store();
        store.set_page_size(0, 0);
        assert_eq!((store.page(), store.page_size()), (1, 1));
    }

    #[test]
    fn test_page_size_cycle() {
        assert_eq!(next_page_size(10), 20);
        assert_eq!(next_page_size(100), 10);
        assert_eq!(next_page_size(7), 10);
        assert_eq!(prev_page_size(20), 10);
        assert_eq!(prev_page_size(10), 100);
    }
}
