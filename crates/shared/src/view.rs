//! Filter, sort and paginate a feedback collection into the page on screen.
//!
//! Everything here is pure: the same collection and [`ViewState`] always
//! produce the same [`PageView`], and the collection itself is never
//! reordered.

use std::{cmp::Ordering, fmt, str::FromStr, sync::LazyLock};

use icu_collator::{options::CollatorOptions, Collator, CollatorBorrowed};
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::domain::FeedbackItem;

pub const PAGE_SIZE: usize = 5;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SortOrder {
    #[default]
    Newest,
    Oldest,
    Alphabetical,
}

impl SortOrder {
    pub const ALL: [SortOrder; 3] = [Self::Newest, Self::Oldest, Self::Alphabetical];

    pub fn as_str(self) -> &'static str {
        match self {
            Self::Newest => "newest",
            Self::Oldest => "oldest",
            Self::Alphabetical => "alphabetical",
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            Self::Newest => "Newest first",
            Self::Oldest => "Oldest first",
            Self::Alphabetical => "A to Z",
        }
    }
}

impl fmt::Display for SortOrder {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("unknown sort order '{0}' (expected newest, oldest or alphabetical)")]
pub struct ParseSortOrderError(String);

impl FromStr for SortOrder {
    type Err = ParseSortOrderError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "newest" => Ok(Self::Newest),
            "oldest" => Ok(Self::Oldest),
            "alphabetical" | "alpha" | "az" => Ok(Self::Alphabetical),
            other => Err(ParseSortOrderError(other.to_string())),
        }
    }
}

/// Transient filter/sort/page selection.
///
/// Changing the filter or the sort order always returns to page 1 so a page
/// index from a previous combination is never shown.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ViewState {
    filter: String,
    sort: SortOrder,
    page: usize,
}

impl Default for ViewState {
    fn default() -> Self {
        Self {
            filter: String::new(),
            sort: SortOrder::default(),
            page: 1,
        }
    }
}

impl ViewState {
    pub fn new(filter: impl Into<String>, sort: SortOrder, page: usize) -> Self {
        Self {
            filter: filter.into(),
            sort,
            page: page.max(1),
        }
    }

    pub fn filter(&self) -> &str {
        &self.filter
    }

    pub fn sort(&self) -> SortOrder {
        self.sort
    }

    pub fn page(&self) -> usize {
        self.page
    }

    /// Returns `true` when the filter actually changed (and the page was reset).
    pub fn set_filter(&mut self, filter: impl Into<String>) -> bool {
        let filter = filter.into();
        if filter == self.filter {
            return false;
        }
        self.filter = filter;
        self.page = 1;
        true
    }

    /// Returns `true` when the order actually changed (and the page was reset).
    pub fn set_sort(&mut self, sort: SortOrder) -> bool {
        if sort == self.sort {
            return false;
        }
        self.sort = sort;
        self.page = 1;
        true
    }

    pub fn set_page(&mut self, page: usize) {
        self.page = page.max(1);
    }

    pub fn next_page(&mut self, total_pages: usize) {
        self.page = (self.page + 1).min(total_pages.max(1));
    }

    pub fn previous_page(&mut self) {
        self.page = self.page.saturating_sub(1).max(1);
    }

    /// Pulls the stored page back into `[1, total_pages]`.
    pub fn clamp_page(&mut self, total_pages: usize) {
        self.page = self.page.clamp(1, total_pages.max(1));
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PageEntry {
    /// 1-based position within the whole filtered and sorted set.
    pub position: usize,
    pub item: FeedbackItem,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PageView {
    pub entries: Vec<PageEntry>,
    pub page: usize,
    pub total_pages: usize,
    pub page_size: usize,
    pub filtered_count: usize,
    pub total_count: usize,
}

impl PageView {
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn is_collection_empty(&self) -> bool {
        self.total_count == 0
    }

    /// Page controls are hidden, not disabled, when everything fits on one page.
    pub fn show_pagination(&self) -> bool {
        self.filtered_count > self.page_size
    }

    pub fn has_previous(&self) -> bool {
        self.page > 1
    }

    pub fn has_next(&self) -> bool {
        self.page < self.total_pages
    }

    pub fn items(&self) -> impl Iterator<Item = &FeedbackItem> {
        self.entries.iter().map(|entry| &entry.item)
    }
}

pub fn total_pages(filtered_count: usize, page_size: usize) -> usize {
    filtered_count.div_ceil(page_size.max(1)).max(1)
}

pub fn filter_items<'a>(items: &'a [FeedbackItem], filter: &str) -> Vec<&'a FeedbackItem> {
    if filter.is_empty() {
        return items.iter().collect();
    }
    let needle = filter.to_lowercase();
    items
        .iter()
        .filter(|item| item.as_str().to_lowercase().contains(&needle))
        .collect()
}

pub fn sort_items(items: &mut [&FeedbackItem], order: SortOrder) {
    match order {
        SortOrder::Newest => items.reverse(),
        SortOrder::Oldest => {}
        SortOrder::Alphabetical => items.sort_by(|a, b| locale_cmp(a.as_str(), b.as_str())),
    }
}

static COLLATOR: LazyLock<Option<CollatorBorrowed<'static>>> = LazyLock::new(|| {
    Collator::try_new(Default::default(), CollatorOptions::default())
        .inspect_err(|err| tracing::warn!("root collation unavailable: {err}"))
        .ok()
});

/// Root-locale collation: accents and case are secondary to the base letter,
/// lowercase sorts before uppercase, and exact ties fall back to code points.
pub fn locale_cmp(a: &str, b: &str) -> Ordering {
    let collated = match COLLATOR.as_ref() {
        Some(collator) => collator.compare(a, b),
        None => a
            .chars()
            .flat_map(char::to_lowercase)
            .cmp(b.chars().flat_map(char::to_lowercase)),
    };
    collated.then_with(|| a.cmp(b))
}

/// Runs filter, sort and paginate over `items` for the given view.
pub fn derive_page(items: &[FeedbackItem], view: &ViewState, page_size: usize) -> PageView {
    let page_size = page_size.max(1);
    let mut visible = filter_items(items, view.filter());
    sort_items(&mut visible, view.sort());

    let filtered_count = visible.len();
    let total_pages = total_pages(filtered_count, page_size);
    let page = view.page().clamp(1, total_pages);
    let offset = (page - 1) * page_size;

    let entries = visible
        .into_iter()
        .enumerate()
        .skip(offset)
        .take(page_size)
        .map(|(index, item)| PageEntry {
            position: index + 1,
            item: item.clone(),
        })
        .collect();

    PageView {
        entries,
        page,
        total_pages,
        page_size,
        filtered_count,
        total_count: items.len(),
    }
}

#[cfg(test)]
#[path = "tests/view_tests.rs"]
mod tests;
