//! Catalog view query: filters, sort order and page.

use crate::catalog::ProductRecord;
use crate::error::CatalogError;
use crate::search::{DiscountBucket, Filter, StockFilter};
use serde::{Deserialize, Serialize};
use std::cmp::Ordering;

/// Sort options for the catalog view.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
pub enum SortOption {
    /// Incoming order.
    #[default]
    Relevance,
    /// Newest first by creation time.
    Newest,
    /// List price, low to high.
    PriceAsc,
    /// List price, high to low.
    PriceDesc,
    /// Highest discount first.
    Discount,
}

impl SortOption {
    pub const ALL: [SortOption; 5] = [
        SortOption::Relevance,
        SortOption::Newest,
        SortOption::PriceAsc,
        SortOption::PriceDesc,
        SortOption::Discount,
    ];

    pub fn from_tag(tag: &str) -> Result<Self, CatalogError> {
        match tag {
            "" => Ok(SortOption::Relevance),
            "new" => Ok(SortOption::Newest),
            "low-high" => Ok(SortOption::PriceAsc),
            "high-low" => Ok(SortOption::PriceDesc),
            "discount" => Ok(SortOption::Discount),
            other => Err(CatalogError::UnknownSort(other.to_string())),
        }
    }

    pub fn tag(&self) -> &'static str {
        match self {
            SortOption::Relevance => "",
            SortOption::Newest => "new",
            SortOption::PriceAsc => "low-high",
            SortOption::PriceDesc => "high-low",
            SortOption::Discount => "discount",
        }
    }

    pub fn display_name(&self) -> &'static str {
        match self {
            SortOption::Relevance => "Relevance",
            SortOption::Newest => "Newest",
            SortOption::PriceAsc => "Price: Low to High",
            SortOption::PriceDesc => "Price: High to Low",
            SortOption::Discount => "Highest Discount",
        }
    }

    /// Stable in-place sort. Ties keep their incoming order.
    ///
    /// Prices rank by list price, not discounted price. Records without a
    /// creation time rank as the oldest.
    pub fn sort(&self, products: &mut [&ProductRecord]) {
        let compare: fn(&ProductRecord, &ProductRecord) -> Ordering = match self {
            SortOption::Relevance => return,
            SortOption::Newest => |a, b| b.created_at.cmp(&a.created_at),
            SortOption::PriceAsc => |a, b| a.base_price.total_cmp(&b.base_price),
            SortOption::PriceDesc => |a, b| b.base_price.total_cmp(&a.base_price),
            SortOption::Discount => {
                |a, b| b.discount_percentage.total_cmp(&a.discount_percentage)
            }
        };
        products.sort_by(|a, b| compare(a, b));
    }
}

/// Everything the operator chose for one catalog view render.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FilterSpec {
    /// Free-text search; empty means no text filter.
    pub search_text: String,
    /// Exact category; empty means any.
    pub category: String,
    /// Exact subcategory; empty means any.
    pub sub_category: String,
    /// Discount bucket; `None` means any.
    pub discount: Option<DiscountBucket>,
    /// Inclusive ceiling on list price.
    pub price_max: f64,
    /// Stock availability.
    pub stock: StockFilter,
    /// Sort order.
    pub sort: SortOption,
    /// Requested page (1-indexed). Clamped at render time.
    pub page: usize,
    /// Items per page.
    pub page_size: usize,
}

impl FilterSpec {
    /// Default price ceiling of the filter panel.
    pub const DEFAULT_PRICE_MAX: f64 = 50_000.0;
    /// Cards per page.
    pub const DEFAULT_PAGE_SIZE: usize = 6;

    /// Create an unconstrained spec on page 1.
    pub fn new() -> Self {
        Self {
            search_text: String::new(),
            category: String::new(),
            sub_category: String::new(),
            discount: None,
            price_max: Self::DEFAULT_PRICE_MAX,
            stock: StockFilter::All,
            sort: SortOption::Relevance,
            page: 1,
            page_size: Self::DEFAULT_PAGE_SIZE,
        }
    }

    /// Set the search text.
    pub fn with_search(mut self, text: impl Into<String>) -> Self {
        self.search_text = text.into();
        self
    }

    /// Set the category filter.
    pub fn with_category(mut self, category: impl Into<String>) -> Self {
        self.category = category.into();
        self
    }

    /// Set the subcategory filter.
    pub fn with_sub_category(mut self, sub_category: impl Into<String>) -> Self {
        self.sub_category = sub_category.into();
        self
    }

    /// Set the discount bucket.
    pub fn with_discount(mut self, bucket: Option<DiscountBucket>) -> Self {
        self.discount = bucket;
        self
    }

    /// Set the price ceiling.
    pub fn with_price_max(mut self, price_max: f64) -> Self {
        self.price_max = price_max;
        self
    }

    /// Set the stock filter.
    pub fn with_stock(mut self, stock: StockFilter) -> Self {
        self.stock = stock;
        self
    }

    /// Set sort option.
    pub fn with_sort(mut self, sort: SortOption) -> Self {
        self.sort = sort;
        self
    }

    /// Set the requested page. Values below 1 become 1.
    pub fn with_page(mut self, page: usize) -> Self {
        self.page = page.max(1);
        self
    }

    /// Set the page size. Values below 1 become 1.
    pub fn with_page_size(mut self, page_size: usize) -> Self {
        self.page_size = page_size.max(1);
        self
    }

    /// The active filter stages, in pipeline order.
    pub fn filters(&self) -> Vec<Filter> {
        let mut filters = Vec::new();
        let text = self.search_text.trim();
        if !text.is_empty() {
            filters.push(Filter::text(text));
        }
        if !self.category.is_empty() {
            filters.push(Filter::Category(self.category.clone()));
        }
        if !self.sub_category.is_empty() {
            filters.push(Filter::SubCategory(self.sub_category.clone()));
        }
        if self.stock != StockFilter::All {
            filters.push(Filter::Stock(self.stock));
        }
        if self.price_max.is_finite() {
            filters.push(Filter::PriceMax(self.price_max));
        }
        if let Some(bucket) = self.discount {
            filters.push(Filter::Discount(bucket));
        }
        filters
    }

    /// Check if no filter stage is active (an infinite ceiling counts as none).
    pub fn is_unconstrained(&self) -> bool {
        self.filters().is_empty()
    }

    /// Back to defaults, keeping the page size.
    pub fn reset(&mut self) {
        *self = Self::new().with_page_size(self.page_size);
    }

    /// Change the search text and return to page 1.
    pub fn set_search(&mut self, text: impl Into<String>) {
        self.search_text = text.into();
        self.page = 1;
    }

    /// Change the category; the subcategory no longer applies and is cleared.
    pub fn set_category(&mut self, category: impl Into<String>) {
        self.category = category.into();
        self.sub_category.clear();
        self.page = 1;
    }

    pub fn set_sub_category(&mut self, sub_category: impl Into<String>) {
        self.sub_category = sub_category.into();
        self.page = 1;
    }

    pub fn set_discount(&mut self, bucket: Option<DiscountBucket>) {
        self.discount = bucket;
        self.page = 1;
    }

    pub fn set_price_max(&mut self, price_max: f64) {
        self.price_max = price_max;
        self.page = 1;
    }

    pub fn set_stock(&mut self, stock: StockFilter) {
        self.stock = stock;
        self.page = 1;
    }

    pub fn set_sort(&mut self, sort: SortOption) {
        self.sort = sort;
        self.page = 1;
    }

    /// Move to a page. Clamping happens at render time.
    pub fn set_page(&mut self, page: usize) {
        self.page = page.max(1);
    }
}

impl Default for FilterSpec {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sort_tags() {
        for sort in SortOption::ALL {
            assert_eq!(SortOption::from_tag(sort.tag()).unwrap(), sort);
        }
        assert!(SortOption::from_tag("popular").is_err());
    }

    #[test]
    fn test_spec_builder() {
        let spec = FilterSpec::new()
            .with_search("shoe")
            .with_stock(StockFilter::InStock)
            .with_sort(SortOption::PriceAsc)
            .with_page(2)
            .with_page_size(10);

        assert_eq!(spec.page, 2);
        assert_eq!(spec.page_size, 10);
        assert_eq!(spec.sort, SortOption::PriceAsc);
    }

    #[test]
    fn test_page_floor() {
        let spec = FilterSpec::new().with_page(0).with_page_size(0);
        assert_eq!(spec.page, 1);
        assert_eq!(spec.page_size, 1);
    }

    #[test]
    fn test_filters_follow_stage_order() {
        let spec = FilterSpec::new()
            .with_discount(Some(DiscountBucket::from_tag("10-19").unwrap()))
            .with_stock(StockFilter::OutOfStock)
            .with_sub_category("Running")
            .with_category("Shoes")
            .with_search("  Red ");

        let filters = spec.filters();
        assert_eq!(filters.len(), 6);
        assert_eq!(filters[0], Filter::Text("red".to_string()));
        assert_eq!(filters[1], Filter::Category("Shoes".to_string()));
        assert_eq!(filters[2], Filter::SubCategory("Running".to_string()));
        assert_eq!(filters[3], Filter::Stock(StockFilter::OutOfStock));
        assert_eq!(filters[4], Filter::PriceMax(FilterSpec::DEFAULT_PRICE_MAX));
        assert!(matches!(filters[5], Filter::Discount(_)));
    }

    #[test]
    fn test_unconstrained() {
        assert!(!FilterSpec::new().is_unconstrained());
        assert!(FilterSpec::new()
            .with_price_max(f64::INFINITY)
            .is_unconstrained());
        assert!(FilterSpec::new()
            .with_price_max(f64::INFINITY)
            .with_search("   ")
            .is_unconstrained());
    }

    #[test]
    fn test_set_category_clears_subcategory() {
        let mut spec = FilterSpec::new()
            .with_category("Shoes")
            .with_sub_category("Running")
            .with_page(3);
        spec.set_category("Apparel");
        assert_eq!(spec.category, "Apparel");
        assert!(spec.sub_category.is_empty());
        assert_eq!(spec.page, 1);
    }

    #[test]
    fn test_reset_keeps_page_size() {
        let mut spec = FilterSpec::new()
            .with_search("x")
            .with_page_size(12)
            .with_page(4);
        spec.reset();
        assert_eq!(spec, FilterSpec::new().with_page_size(12));
    }

    #[test]
    fn test_sort_newest_puts_undated_last() {
        use chrono::{TimeZone, Utc};

        let old = ProductRecord::new("old", "Old")
            .with_created_at(Utc.with_ymd_and_hms(2023, 1, 1, 0, 0, 0).unwrap());
        let new = ProductRecord::new("new", "New")
            .with_created_at(Utc.with_ymd_and_hms(2024, 1, 1, 0, 0, 0).unwrap());
        let undated = ProductRecord::new("undated", "Undated");

        let mut refs = vec![&undated, &old, &new];
        SortOption::Newest.sort(&mut refs);
        let ids: Vec<_> = refs.iter().map(|p| p.id.as_str()).collect();
        assert_eq!(ids, vec!["new", "old", "undated"]);
    }

    #[test]
    fn test_sort_is_stable() {
        let a = ProductRecord::new("a", "A").with_price(10.0);
        let b = ProductRecord::new("b", "B").with_price(5.0);
        let c = ProductRecord::new("c", "C").with_price(10.0);

        let mut refs = vec![&a, &b, &c];
        SortOption::PriceDesc.sort(&mut refs);
        let ids: Vec<_> = refs.iter().map(|p| p.id.as_str()).collect();
        assert_eq!(ids, vec!["a", "c", "b"]);
    }
}
