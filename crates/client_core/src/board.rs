use shared::{
    domain::FeedbackItem,
    error::FeedbackError,
    view::{self, derive_page, PageView, SortOrder, ViewState},
};

/// In-memory feedback collection plus the view state used to render it.
#[derive(Debug, Clone)]
pub struct FeedbackBoard {
    items: Vec<FeedbackItem>,
    view: ViewState,
    page_size: usize,
}

impl Default for FeedbackBoard {
    fn default() -> Self {
        Self::new(view::PAGE_SIZE)
    }
}

impl FeedbackBoard {
    pub fn new(page_size: usize) -> Self {
        Self {
            items: Vec::new(),
            view: ViewState::default(),
            page_size: page_size.max(1),
        }
    }

    pub fn items(&self) -> &[FeedbackItem] {
        &self.items
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn view(&self) -> &ViewState {
        &self.view
    }

    pub fn page_size(&self) -> usize {
        self.page_size
    }

    /// Appends trimmed feedback. Blank input leaves the board untouched.
    pub fn submit(&mut self, raw: &str) -> Result<&FeedbackItem, FeedbackError> {
        let item = FeedbackItem::parse(raw)?;
        self.items.push(item);
        Ok(&self.items[self.items.len() - 1])
    }

    /// Swaps in a freshly loaded collection, keeping the current view.
    pub fn replace_items(&mut self, items: Vec<FeedbackItem>) {
        self.items = items;
        let total = self.total_pages();
        self.view.clamp_page(total);
    }

    /// Forgets the collection and the view; the backing store is not touched.
    pub fn clear(&mut self) {
        self.items.clear();
        self.view = ViewState::default();
    }

    pub fn set_filter(&mut self, filter: impl Into<String>) -> bool {
        self.view.set_filter(filter)
    }

    pub fn set_sort(&mut self, sort: SortOrder) -> bool {
        self.view.set_sort(sort)
    }

    pub fn set_page(&mut self, page: usize) {
        self.view.set_page(page);
        let total = self.total_pages();
        self.view.clamp_page(total);
    }

    pub fn next_page(&mut self) {
        let total = self.total_pages();
        self.view.next_page(total);
    }

    pub fn previous_page(&mut self) {
        self.view.previous_page();
    }

    pub fn total_pages(&self) -> usize {
        let filtered = view::filter_items(&self.items, self.view.filter()).len();
        view::total_pages(filtered, self.page_size)
    }

    pub fn render(&self) -> PageView {
        derive_page(&self.items, &self.view, self.page_size)
    }
}

#[cfg(test)]
#[path = "tests/board_tests.rs"]
mod tests;
