//! Event Catalog
//!
//! In-memory search and pagination over an already fetched event collection.
//! Searching and paging never trigger a refetch.
//!
//! Rules:
//! - the query is trimmed and compared case-insensitively against title,
//!   location and tag; an empty query matches every event
//! - page count is `ceil(filtered / page_size)`, never less than 1
//! - pages are 1-based and always clamped to `1..=page_count`
//! - changing the query returns to page 1

use crate::models::Event;

/// Events shown per catalog page
pub const PAGE_SIZE: usize = 15;

/// Whether an event matches an already normalized (trimmed, lowercased) query
pub fn matches_query(event: &Event, normalized: &str) -> bool {
    if normalized.is_empty() {
        return true;
    }

    [&event.title, &event.location, &event.tag]
        .iter()
        .any(|field| field.to_lowercase().contains(normalized))
}

/// Trim and lowercase a raw search query
pub fn normalize_query(raw: &str) -> String {
    raw.trim().to_lowercase()
}

/// Events matching a raw query, in original order
pub fn filter_events<'a>(events: &'a [Event], query: &str) -> Vec<&'a Event> {
    let normalized = normalize_query(query);
    events
        .iter()
        .filter(|event| matches_query(event, &normalized))
        .collect()
}

/// Number of pages for `len` items
pub fn page_count(len: usize, page_size: usize) -> usize {
    let page_size = page_size.max(1);
    len.div_ceil(page_size).max(1)
}

/// Items of 1-based `page`; empty when the page is out of range
pub fn page_slice<T>(items: &[T], page: usize, page_size: usize) -> &[T] {
    let page_size = page_size.max(1);
    let start = page.saturating_sub(1).saturating_mul(page_size);
    if start >= items.len() {
        return &[];
    }
    let end = (start + page_size).min(items.len());
    &items[start..end]
}

/// Searchable, paginated view over a fetched event collection
#[derive(Clone, Debug, PartialEq)]
pub struct Catalog {
    events: Vec<Event>,
    query: String,
    page: usize,
    page_size: usize,
}

impl Default for Catalog {
    fn default() -> Self {
        Self::new(Vec::new())
    }
}

impl Catalog {
    /// Create a catalog on page 1 with an empty query
    pub fn new(events: Vec<Event>) -> Self {
        Self {
            events,
            query: String::new(),
            page: 1,
            page_size: PAGE_SIZE,
        }
    }

    /// Use a different page size (minimum 1)
    pub fn with_page_size(mut self, page_size: usize) -> Self {
        self.page_size = page_size.max(1);
        self.clamp_page();
        self
    }

    /// Replace the collection, keeping the query and clamping the page
    pub fn set_events(&mut self, events: Vec<Event>) {
        self.events = events;
        self.clamp_page();
    }

    /// All events, unfiltered
    pub fn events(&self) -> &[Event] {
        &self.events
    }

    /// Change the search query and return to the first page
    pub fn set_query(&mut self, query: impl Into<String>) {
        self.query = query.into();
        self.page = 1;
    }

    /// The raw query as typed
    pub fn query(&self) -> &str {
        &self.query
    }

    /// Current 1-based page
    pub fn page(&self) -> usize {
        self.page
    }

    pub fn page_size(&self) -> usize {
        self.page_size
    }

    /// Events matching the query
    pub fn filtered(&self) -> Vec<&Event> {
        filter_events(&self.events, &self.query)
    }

    pub fn filtered_len(&self) -> usize {
        self.filtered().len()
    }

    pub fn page_count(&self) -> usize {
        page_count(self.filtered_len(), self.page_size)
    }

    /// Events on the current page
    pub fn page_items(&self) -> Vec<&Event> {
        let filtered = self.filtered();
        page_slice(&filtered, self.page, self.page_size).to_vec()
    }

    /// Jump to a page, clamped to the valid range
    pub fn go_to_page(&mut self, page: usize) {
        self.page = page.clamp(1, self.page_count());
    }

    pub fn next_page(&mut self) {
        self.go_to_page(self.page.saturating_add(1));
    }

    pub fn prev_page(&mut self) {
        self.go_to_page(self.page.saturating_sub(1));
    }

    pub fn has_prev(&self) -> bool {
        self.page > 1
    }

    pub fn has_next(&self) -> bool {
        self.page < self.page_count()
    }

    fn clamp_page(&mut self) {
        self.page = self.page.clamp(1, self.page_count());
    }
}
