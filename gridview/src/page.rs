//! Pagination state and page snapshots.

use std::ops::Range;

/// Page cursor: 0-based index and fixed page size.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PageState {
    pub index: usize,
    pub size: usize,
}

impl PageState {
    /// First page of the given size.
    pub fn new(size: usize) -> Self {
        Self { index: 0, size }
    }

    /// Number of pages needed for `count` rows.
    pub fn page_count(&self, count: usize) -> usize {
        if self.size == 0 {
            return 0;
        }
        count.div_ceil(self.size)
    }

    /// Clamp the index into `[0, page_count - 1]` (or 0 when there are no rows).
    ///
    /// Returns `true` if the index moved.
    pub fn clamp(&mut self, count: usize) -> bool {
        let last = self.page_count(count).saturating_sub(1);
        if self.index > last {
            self.index = last;
            return true;
        }
        false
    }

    /// Row range of the current page within `count` rows.
    pub fn range(&self, count: usize) -> Range<usize> {
        let start = (self.index * self.size).min(count);
        let end = (start + self.size).min(count);
        start..end
    }
}

/// A snapshot of the visible page of a table.
#[derive(Debug, Clone)]
pub struct Page<T> {
    rows: Vec<T>,
    index: usize,
    size: usize,
    page_count: usize,
    filtered_count: usize,
    total_count: usize,
}

impl<T> Page<T> {
    pub(crate) fn new(
        rows: Vec<T>,
        state: PageState,
        filtered_count: usize,
        total_count: usize,
    ) -> Self {
        Self {
            rows,
            index: state.index,
            size: state.size,
            page_count: state.page_count(filtered_count),
            filtered_count,
            total_count,
        }
    }

    /// Rows on this page.
    pub fn rows(&self) -> &[T] {
        &self.rows
    }

    /// Consume the page, returning its rows.
    pub fn into_rows(self) -> Vec<T> {
        self.rows
    }

    /// 0-based page index.
    pub fn index(&self) -> usize {
        self.index
    }

    /// Page size.
    pub fn size(&self) -> usize {
        self.size
    }

    /// Number of pages for the current filter.
    pub fn page_count(&self) -> usize {
        self.page_count
    }

    /// Rows passing search and filters.
    pub fn filtered_count(&self) -> usize {
        self.filtered_count
    }

    /// Rows supplied to the table.
    pub fn total_count(&self) -> usize {
        self.total_count
    }

    /// Number of rows on this page.
    pub fn len(&self) -> usize {
        self.rows.len()
    }

    /// Returns `true` if this page shows no rows.
    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// Returns `true` if a later page exists.
    pub fn has_next(&self) -> bool {
        self.index + 1 < self.page_count
    }

    /// Returns `true` if an earlier page exists.
    pub fn has_prev(&self) -> bool {
        self.index > 0
    }

    /// 1-based position of the first row on this page, 0 when empty.
    pub fn first_row_number(&self) -> usize {
        if self.rows.is_empty() {
            0
        } else {
            self.index * self.size + 1
        }
    }
}
