//! Client-side paging over an in-memory result set.
//!
//! The pager never fails: out-of-range page numbers clamp to the nearest
//! valid page and a page size of zero is treated as one.

use serde::Serialize;

pub const DEFAULT_PAGE_SIZE: usize = 10;

/// One entry of the page-number strip.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum PageMarker {
    Page(usize),
    Ellipsis,
}

#[derive(Debug, Clone)]
pub struct Pager<T> {
    items: Vec<T>,
    current_page: usize,
    page_size: usize,
}

impl<T> Default for Pager<T> {
    fn default() -> Self {
        Self::new(Vec::new(), DEFAULT_PAGE_SIZE)
    }
}

impl<T> Pager<T> {
    pub fn new(items: Vec<T>, page_size: usize) -> Self {
        Self {
            items,
            current_page: 1,
            page_size: page_size.max(1),
        }
    }

    /// Replace the collection and go back to page 1.
    pub fn set_items(&mut self, items: Vec<T>) {
        self.items = items;
        self.current_page = 1;
    }

    pub fn items(&self) -> &[T] {
        &self.items
    }

    pub fn item_count(&self) -> usize {
        self.items.len()
    }

    pub fn current_page(&self) -> usize {
        self.current_page
    }

    pub fn page_size(&self) -> usize {
        self.page_size
    }

    /// `max(1, ceil(item_count / page_size))`.
    pub fn total_pages(&self) -> usize {
        self.items.len().div_ceil(self.page_size).max(1)
    }

    pub fn set_page(&mut self, page: usize) {
        let total = self.total_pages();
        if total == 0 {
            return;
        }
        self.current_page = page.clamp(1, total);
    }

    pub fn next_page(&mut self) {
        self.set_page(self.current_page.saturating_add(1));
    }

    pub fn previous_page(&mut self) {
        self.set_page(self.current_page.saturating_sub(1));
    }

    pub fn has_next(&self) -> bool {
        self.current_page < self.total_pages()
    }

    pub fn has_previous(&self) -> bool {
        self.current_page > 1
    }

    /// Change the page size; always returns to page 1.
    pub fn set_page_size(&mut self, page_size: usize) {
        self.page_size = page_size.max(1);
        self.current_page = 1;
    }

    pub fn visible_slice(&self) -> &[T] {
        let start = (self.current_page - 1)
            .saturating_mul(self.page_size)
            .min(self.items.len());
        let end = start.saturating_add(self.page_size).min(self.items.len());
        &self.items[start..end]
    }

    /// `(first, last, total)` 1-based item positions on the current page,
    /// `(0, 0, 0)` when there is nothing to show.
    pub fn showing_range(&self) -> (usize, usize, usize) {
        let total = self.items.len();
        if total == 0 {
            return (0, 0, 0);
        }
        let first = (self.current_page - 1) * self.page_size + 1;
        let last = first + self.visible_slice().len() - 1;
        (first, last, total)
    }

    /// Page 1, the last page and the pages adjacent to the current one, with
    /// a single [`PageMarker::Ellipsis`] wherever numbers are skipped.
    pub fn page_numbers_to_display(&self) -> Vec<PageMarker> {
        let total = self.total_pages();
        let current = self.current_page;

        let mut markers = Vec::new();
        let mut prev: Option<usize> = None;
        for page in 1..=total {
            let shown = page == 1
                || page == total
                || (page + 1 >= current && page <= current + 1);
            if !shown {
                continue;
            }
            if let Some(p) = prev {
                if page - p >= 2 {
                    markers.push(PageMarker::Ellipsis);
                }
            }
            markers.push(PageMarker::Page(page));
            prev = Some(page);
        }
        markers
    }
}
