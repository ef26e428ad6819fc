//! Filter, search, sort and paging over a fetched collection.
//!
//! `ListState` owns the full collection and the currently displayed
//! subset. Every transition recomputes `displayed` from scratch; nothing is
//! patched incrementally. Sorting reorders only what is displayed, so a sort
//! after a partial load-more never pulls in unloaded items.

pub mod item;
pub mod sort;

pub use item::{Listable, ALL_TAG};
pub use sort::SortKey;

use tracing::debug;

/// Page size on first render and on each load-more.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Paging {
    pub initial: usize,
    pub increment: usize,
}

impl Paging {
    pub const PROJECTS: Paging = Paging { initial: 12, increment: 6 };
    pub const ARTICLES: Paging = Paging { initial: 6, increment: 3 };
}

#[derive(Debug, Clone)]
pub struct ListState<T> {
    full: Vec<T>,
    displayed: Vec<T>,
    filter: String,
    search: String,
    sort: SortKey,
    paging: Paging,
}

impl<T: Listable> ListState<T> {
    pub fn new(full: Vec<T>, paging: Paging) -> Self {
        let displayed = full.iter().take(paging.initial).cloned().collect();
        Self {
            full,
            displayed,
            filter: ALL_TAG.to_string(),
            search: String::new(),
            sort: SortKey::default(),
            paging,
        }
    }

    /// Items matching the active filter and search, in fetch order.
    fn matching(&self) -> impl Iterator<Item = &T> {
        self.full
            .iter()
            .filter(|item| item.matches_tag(&self.filter))
            .filter(|item| item.matches_search(&self.search))
    }

    /// Show the first page of items under `tag`, still narrowed by the
    /// active search term.
    pub fn filter(&mut self, tag: &str) {
        self.filter = tag.trim().to_lowercase();
        let page = self.paging.initial;
        self.displayed = self.matching().take(page).cloned().collect();
        debug!(filter = %self.filter, displayed = self.displayed.len(), "applied filter");
    }

    /// Show every item under the active filter that matches `term`.
    pub fn search(&mut self, term: &str) {
        self.search = term.trim().to_string();
        self.displayed = self.matching().cloned().collect();
        debug!(search = %self.search, displayed = self.displayed.len(), "applied search");
    }

    /// Reorder the displayed items only.
    pub fn sort(&mut self, key: SortKey) {
        self.sort = key;
        self.displayed = sort::sorted(&self.displayed, key);
        debug!(sort = %key, "applied sort");
    }

    /// Append the next slice of `full` after the current display length.
    /// Returns how many items were added.
    pub fn load_more(&mut self) -> usize {
        let start = self.displayed.len().min(self.full.len());
        let end = (start + self.paging.increment).min(self.full.len());
        self.displayed.extend_from_slice(&self.full[start..end]);
        debug!(added = end - start, displayed = self.displayed.len(), "loaded more");
        end - start
    }

    /// Replace the collection with a fresh fetch and reset every control.
    pub fn reload(&mut self, full: Vec<T>) {
        *self = Self::new(full, self.paging);
    }

    pub fn displayed(&self) -> &[T] {
        &self.displayed
    }

    pub fn full(&self) -> &[T] {
        &self.full
    }

    /// Whether the load-more control should be shown.
    pub fn has_more(&self) -> bool {
        self.displayed.len() < self.full.len()
    }

    pub fn active_filter(&self) -> &str {
        &self.filter
    }

    pub fn active_search(&self) -> &str {
        &self.search
    }

    pub fn active_sort(&self) -> SortKey {
        self.sort
    }
}
