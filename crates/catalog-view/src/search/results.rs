//! View results and pagination.

use crate::catalog::ProductRecord;
use serde::{Deserialize, Serialize};

/// Pagination info.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub struct Pagination {
    /// Current page (1-indexed), always within `[1, total_pages]`.
    pub page: usize,
    /// Items per page.
    pub per_page: usize,
    /// Total number of matched items.
    pub total: usize,
    /// Total number of pages, at least 1.
    pub total_pages: usize,
    /// Whether there's a next page.
    pub has_next: bool,
    /// Whether there's a previous page.
    pub has_prev: bool,
}

impl Pagination {
    /// Create pagination info, clamping `requested_page` into range.
    pub fn new(requested_page: usize, per_page: usize, total: usize) -> Self {
        let per_page = per_page.max(1);
        let total_pages = total.div_ceil(per_page).max(1);
        let page = requested_page.clamp(1, total_pages);

        Self {
            page,
            per_page,
            total,
            total_pages,
            has_next: page < total_pages,
            has_prev: page > 1,
        }
    }

    /// Index of the first item on the page.
    pub fn offset(&self) -> usize {
        (self.page - 1) * self.per_page
    }

    /// Index range of the page within the matched list.
    pub fn range(&self) -> std::ops::Range<usize> {
        let start = self.offset().min(self.total);
        let end = (start + self.per_page).min(self.total);
        start..end
    }

    /// Get page numbers for display (e.g., [3, 4, 5, 6, 7]).
    pub fn page_numbers(&self, max_visible: usize) -> Vec<usize> {
        if max_visible == 0 {
            return Vec::new();
        }
        if self.total_pages <= max_visible {
            return (1..=self.total_pages).collect();
        }

        let half = max_visible / 2;
        let start = self.page.saturating_sub(half).max(1);
        let end = (start + max_visible - 1).min(self.total_pages);
        let start = (end + 1).saturating_sub(max_visible).max(1);

        (start..=end).collect()
    }

    /// Check if on first page.
    pub fn is_first(&self) -> bool {
        self.page == 1
    }

    /// Check if on last page.
    pub fn is_last(&self) -> bool {
        self.page >= self.total_pages
    }

    /// Get start item number (1-indexed), 0 when nothing matched.
    pub fn start_item(&self) -> usize {
        if self.total == 0 {
            0
        } else {
            self.offset() + 1
        }
    }

    /// Get end item number.
    pub fn end_item(&self) -> usize {
        (self.page * self.per_page).min(self.total)
    }
}

impl Default for Pagination {
    fn default() -> Self {
        Self::new(1, crate::search::FilterSpec::DEFAULT_PAGE_SIZE, 0)
    }
}

/// Output of one catalog view render.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ViewResult {
    /// The records on the current page.
    pub visible: Vec<ProductRecord>,
    /// Pagination over the full matched set.
    pub pagination: Pagination,
}

impl ViewResult {
    /// Number of records that passed every filter.
    pub fn total_matched(&self) -> usize {
        self.pagination.total
    }

    /// Number of pages, at least 1.
    pub fn total_pages(&self) -> usize {
        self.pagination.total_pages
    }

    /// The page actually shown, after clamping.
    pub fn page(&self) -> usize {
        self.pagination.page
    }

    /// Check if nothing is shown.
    pub fn is_empty(&self) -> bool {
        self.visible.is_empty()
    }

    /// Counters for the summary strip.
    pub fn summary(&self, total_products: usize) -> CatalogSummary {
        CatalogSummary {
            total: total_products,
            filtered: self.total_matched(),
            showing: self.visible.len(),
        }
    }
}

/// Total / Filtered / Showing counters.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CatalogSummary {
    /// Products in the source list.
    pub total: usize,
    /// Products that passed every filter.
    pub filtered: usize,
    /// Products on the current page.
    pub showing: usize,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_pagination_basics() {
        let p = Pagination::new(2, 10, 45);
        assert_eq!(p.total_pages, 5);
        assert!(p.has_next);
        assert!(p.has_prev);
        assert_eq!(p.offset(), 10);
        assert_eq!(p.range(), 10..20);
    }

    #[test]
    fn test_pagination_last_page() {
        let p = Pagination::new(5, 10, 45);
        assert!(p.has_prev);
        assert!(!p.has_next);
        assert!(p.is_last());
        assert_eq!(p.range(), 40..45);
    }

    #[test]
    fn test_pagination_clamps_high_page() {
        let p = Pagination::new(5, 6, 7);
        assert_eq!(p.total_pages, 2);
        assert_eq!(p.page, 2);
        assert_eq!(p.range(), 6..7);
    }

    #[test]
    fn test_pagination_clamps_zero_page() {
        let p = Pagination::new(0, 6, 7);
        assert_eq!(p.page, 1);
        assert!(p.is_first());
    }

    #[test]
    fn test_pagination_empty() {
        let p = Pagination::new(3, 6, 0);
        assert_eq!(p.total_pages, 1);
        assert_eq!(p.page, 1);
        assert_eq!(p.range(), 0..0);
        assert_eq!(p.start_item(), 0);
        assert_eq!(p.end_item(), 0);
    }

    #[test]
    fn test_pagination_exact_multiple() {
        let p = Pagination::new(1, 6, 12);
        assert_eq!(p.total_pages, 2);
    }

    #[test]
    fn test_pagination_page_numbers() {
        let p = Pagination::new(5, 10, 100);
        assert_eq!(p.page_numbers(5), vec![3, 4, 5, 6, 7]);

        let p = Pagination::new(1, 10, 100);
        assert_eq!(p.page_numbers(5), vec![1, 2, 3, 4, 5]);

        let p = Pagination::new(10, 10, 100);
        assert_eq!(p.page_numbers(5), vec![6, 7, 8, 9, 10]);

        let p = Pagination::new(1, 10, 25);
        assert_eq!(p.page_numbers(5), vec![1, 2, 3]);
    }

    #[test]
    fn test_pagination_item_range() {
        let p = Pagination::new(2, 10, 45);
        assert_eq!(p.start_item(), 11);
        assert_eq!(p.end_item(), 20);
    }

    #[test]
    fn test_summary() {
        let result = ViewResult {
            visible: vec![ProductRecord::new("a", "A")],
            pagination: Pagination::new(1, 6, 1),
        };
        assert_eq!(
            result.summary(4),
            CatalogSummary {
                total: 4,
                filtered: 1,
                showing: 1
            }
        );
    }
}
