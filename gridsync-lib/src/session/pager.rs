//! Pagination state

use crate::model::Row;

/// Default rows per page.
pub const DEFAULT_PAGE_SIZE: usize = 100;

/// Pagination window over the sorted row sequence.
///
/// Pages are 1-based. The pager never points past the data: whenever the row
/// count shrinks, [`Pager::reconcile`] clamps to the last valid page (page 1
/// for an empty table).
#[derive(Debug, Clone)]
pub struct Pager {
    page_size: usize,
    current_page: usize,
}

impl Pager {
    /// Creates a pager with the default page size, on page 1.
    pub fn new() -> Self {
        Self::with_page_size(DEFAULT_PAGE_SIZE)
    }

    /// Creates a pager with the given page size. A size of zero is clamped
    /// to one.
    pub fn with_page_size(page_size: usize) -> Self {
        Self {
            page_size: page_size.max(1),
            current_page: 1,
        }
    }

    /// Returns the current page size.
    pub fn page_size(&self) -> usize {
        self.page_size
    }

    /// Returns the current page, 1-based.
    pub fn current_page(&self) -> usize {
        self.current_page
    }

    /// Returns the total number of pages for `total_rows` rows; never zero.
    pub fn total_pages(&self, total_rows: usize) -> usize {
        total_rows.div_ceil(self.page_size).max(1)
    }

    /// Changes the page size (zero clamps to one) and re-clamps the current
    /// page against the given row count.
    pub fn set_page_size(&mut self, page_size: usize, total_rows: usize) {
        self.page_size = page_size.max(1);
        self.reconcile(total_rows);
    }

    /// Jumps to the given page, clamped into `1..=total_pages`.
    pub fn set_page(&mut self, page: usize, total_rows: usize) {
        self.current_page = page.clamp(1, self.total_pages(total_rows));
    }

    /// Advances one page, clamped at the last page.
    pub fn next_page(&mut self, total_rows: usize) {
        self.set_page(self.current_page + 1, total_rows);
    }

    /// Goes back one page, clamped at page 1.
    pub fn prev_page(&mut self, total_rows: usize) {
        self.set_page(self.current_page.saturating_sub(1), total_rows);
    }

    /// Returns the half-open window of rows on the current page.
    pub fn page_slice<'a>(&self, rows: &'a [Row]) -> &'a [Row] {
        let start = (self.current_page - 1) * self.page_size;
        let end = (start + self.page_size).min(rows.len());
        if start >= rows.len() {
            return &[];
        }
        &rows[start..end]
    }

    /// Returns the 1-based item numbers shown as "x–y of n", or `None` for
    /// an empty table ("0 items").
    pub fn item_range(&self, total_rows: usize) -> Option<(usize, usize)> {
        if total_rows == 0 {
            return None;
        }
        let first = (self.current_page - 1) * self.page_size + 1;
        let last = (self.current_page * self.page_size).min(total_rows);
        Some((first, last))
    }

    /// Clamps the current page after the row count changed.
    ///
    /// Always prefers the last valid page over an empty one; an empty table
    /// rests on page 1.
    pub fn reconcile(&mut self, total_rows: usize) {
        let total_pages = self.total_pages(total_rows);
        if self.current_page > total_pages {
            self.current_page = total_pages;
        }
    }
}

impl Default for Pager {
    fn default() -> Self {
        Self::new()
    }
}
