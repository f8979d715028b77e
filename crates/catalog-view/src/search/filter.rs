//! Catalog filter stages.

use crate::catalog::ProductRecord;
use crate::error::CatalogError;
use serde::{Deserialize, Serialize};
use std::fmt;

/// One discount-percentage range offered in the filter panel.
///
/// Buckets are ten points wide and half-open, `[low, low + 10)`, except the
/// last one which is `[80, ∞)`. Together they partition `[0, ∞)`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct DiscountBucket {
    low: u8,
}

impl DiscountBucket {
    const WIDTH: u8 = 10;
    const OPEN_LOW: u8 = 80;

    /// The closed set of buckets, in display order.
    pub const ALL: [DiscountBucket; 9] = [
        DiscountBucket { low: 0 },
        DiscountBucket { low: 10 },
        DiscountBucket { low: 20 },
        DiscountBucket { low: 30 },
        DiscountBucket { low: 40 },
        DiscountBucket { low: 50 },
        DiscountBucket { low: 60 },
        DiscountBucket { low: 70 },
        DiscountBucket { low: 80 },
    ];

    /// Parse a bucket tag such as `"10-19"` or `"80+"`.
    pub fn from_tag(tag: &str) -> Result<Self, CatalogError> {
        Self::ALL
            .iter()
            .copied()
            .find(|b| b.tag() == tag)
            .ok_or_else(|| CatalogError::UnknownDiscountBucket(tag.to_string()))
    }

    /// Tag used in query strings and the filter select.
    pub fn tag(&self) -> String {
        match self.high() {
            Some(high) => format!("{}-{}", self.low, high - 1),
            None => format!("{}+", self.low),
        }
    }

    /// Human label, e.g. `"10% - 19%"`.
    pub fn label(&self) -> String {
        match self.high() {
            Some(high) => format!("{}% - {}%", self.low, high - 1),
            None => format!("{}%+", self.low),
        }
    }

    /// Inclusive lower bound.
    pub fn low(&self) -> f64 {
        f64::from(self.low)
    }

    /// Exclusive upper bound, `None` for the open-ended bucket.
    fn high(&self) -> Option<u8> {
        (self.low < Self::OPEN_LOW).then(|| self.low + Self::WIDTH)
    }

    /// Numeric range as `(low, exclusive_high)`.
    pub fn range(&self) -> (f64, Option<f64>) {
        (self.low(), self.high().map(f64::from))
    }

    /// Check if a discount value falls in this bucket.
    pub fn contains(&self, discount: f64) -> bool {
        match self.range() {
            (low, Some(high)) => discount >= low && discount < high,
            (low, None) => discount >= low,
        }
    }
}

impl fmt::Display for DiscountBucket {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.tag())
    }
}

impl TryFrom<String> for DiscountBucket {
    type Error = CatalogError;

    fn try_from(tag: String) -> Result<Self, Self::Error> {
        Self::from_tag(&tag)
    }
}

impl From<DiscountBucket> for String {
    fn from(bucket: DiscountBucket) -> Self {
        bucket.tag()
    }
}

/// Parse a discount tag where `""` means "no bucket".
pub fn parse_discount_tag(tag: &str) -> Result<Option<DiscountBucket>, CatalogError> {
    if tag.is_empty() {
        Ok(None)
    } else {
        DiscountBucket::from_tag(tag).map(Some)
    }
}

/// Stock availability filter.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
pub enum StockFilter {
    /// Keep everything.
    #[default]
    All,
    /// Keep `stock > 0`.
    InStock,
    /// Keep `stock == 0`.
    OutOfStock,
}

impl StockFilter {
    pub fn from_tag(tag: &str) -> Result<Self, CatalogError> {
        match tag {
            "" => Ok(StockFilter::All),
            "in" => Ok(StockFilter::InStock),
            "out" => Ok(StockFilter::OutOfStock),
            other => Err(CatalogError::UnknownStockFilter(other.to_string())),
        }
    }

    pub fn tag(&self) -> &'static str {
        match self {
            StockFilter::All => "",
            StockFilter::InStock => "in",
            StockFilter::OutOfStock => "out",
        }
    }

    pub fn display_name(&self) -> &'static str {
        match self {
            StockFilter::All => "All",
            StockFilter::InStock => "In stock",
            StockFilter::OutOfStock => "Out of stock",
        }
    }

    fn keeps(&self, product: &ProductRecord) -> bool {
        match self {
            StockFilter::All => true,
            StockFilter::InStock => product.stock > 0,
            StockFilter::OutOfStock => product.stock == 0,
        }
    }
}

/// A single filter stage of the view pipeline.
#[derive(Debug, Clone, PartialEq)]
pub enum Filter {
    /// Substring match over name/description/brand. Holds the lowercased needle.
    Text(String),
    /// Exact category match.
    Category(String),
    /// Exact subcategory match.
    SubCategory(String),
    /// Stock availability.
    Stock(StockFilter),
    /// Inclusive ceiling on the list price.
    PriceMax(f64),
    /// Discount bucket.
    Discount(DiscountBucket),
}

impl Filter {
    /// Create a text filter; the needle is lowercased once here.
    pub fn text(query: &str) -> Self {
        Filter::Text(query.to_lowercase())
    }

    /// Check if a product passes this stage.
    pub fn matches(&self, product: &ProductRecord) -> bool {
        match self {
            Filter::Text(needle) => product.matches_text(needle),
            Filter::Category(category) => product.category == *category,
            Filter::SubCategory(sub) => product.sub_category == *sub,
            Filter::Stock(stock) => stock.keeps(product),
            Filter::PriceMax(max) => product.base_price <= *max,
            Filter::Discount(bucket) => bucket.contains(product.discount_percentage),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_bucket_tags_round_trip() {
        let tags: Vec<String> = DiscountBucket::ALL.iter().map(|b| b.tag()).collect();
        assert_eq!(
            tags,
            vec!["0-9", "10-19", "20-29", "30-39", "40-49", "50-59", "60-69", "70-79", "80+"]
        );
        for tag in &tags {
            assert_eq!(DiscountBucket::from_tag(tag).unwrap().tag(), *tag);
        }
    }

    #[test]
    fn test_bucket_labels() {
        assert_eq!(DiscountBucket::from_tag("10-19").unwrap().label(), "10% - 19%");
        assert_eq!(DiscountBucket::from_tag("80+").unwrap().label(), "80%+");
    }

    #[test]
    fn test_unknown_bucket() {
        assert!(matches!(
            DiscountBucket::from_tag("5-15"),
            Err(CatalogError::UnknownDiscountBucket(_))
        ));
        assert_eq!(parse_discount_tag("").unwrap(), None);
    }

    #[test]
    fn test_bucket_boundaries() {
        let low = DiscountBucket::from_tag("0-9").unwrap();
        assert!(low.contains(0.0));
        assert!(low.contains(9.0));
        assert!(low.contains(9.5));
        assert!(!low.contains(10.0));
        assert!(!low.contains(-1.0));

        let top = DiscountBucket::from_tag("80+").unwrap();
        assert!(top.contains(80.0));
        assert!(top.contains(150.0));
        assert!(!top.contains(79.99));
    }

    #[test]
    fn test_buckets_are_exclusive() {
        let mut d = 0.0;
        while d <= 100.0 {
            let hits = DiscountBucket::ALL.iter().filter(|b| b.contains(d)).count();
            assert_eq!(hits, 1, "discount {d} matched {hits} buckets");
            d += 0.25;
        }
    }

    #[test]
    fn test_bucket_serde() {
        let bucket = DiscountBucket::from_tag("30-39").unwrap();
        let json = serde_json::to_string(&bucket).unwrap();
        assert_eq!(json, r#""30-39""#);
        let back: DiscountBucket = serde_json::from_str(&json).unwrap();
        assert_eq!(back, bucket);
        assert!(serde_json::from_str::<DiscountBucket>(r#""31-40""#).is_err());
    }

    #[test]
    fn test_stock_filter() {
        let in_stock = ProductRecord::new("a", "A").with_stock(2);
        let sold_out = ProductRecord::new("b", "B");

        assert!(Filter::Stock(StockFilter::InStock).matches(&in_stock));
        assert!(!Filter::Stock(StockFilter::InStock).matches(&sold_out));
        assert!(Filter::Stock(StockFilter::OutOfStock).matches(&sold_out));
        assert!(Filter::Stock(StockFilter::All).matches(&sold_out));
        assert!(StockFilter::from_tag("maybe").is_err());
    }

    #[test]
    fn test_text_filter_is_case_insensitive() {
        let p = ProductRecord::new("a", "Red Shoe").with_brand("ACME");
        assert!(Filter::text("SHOE").matches(&p));
        assert!(Filter::text("acm").matches(&p));
        assert!(!Filter::text("boot").matches(&p));
    }

    #[test]
    fn test_category_is_exact() {
        let p = ProductRecord::new("a", "Red Shoe")
            .with_category("Shoes")
            .with_sub_category("Running");
        assert!(Filter::Category("Shoes".into()).matches(&p));
        assert!(!Filter::Category("shoes".into()).matches(&p));
        assert!(Filter::SubCategory("Running".into()).matches(&p));
        assert!(!Filter::SubCategory("Run".into()).matches(&p));
    }

    #[test]
    fn test_price_max_is_inclusive() {
        let p = ProductRecord::new("a", "A").with_price(1000.0);
        assert!(Filter::PriceMax(1000.0).matches(&p));
        assert!(!Filter::PriceMax(999.99).matches(&p));
    }
}
