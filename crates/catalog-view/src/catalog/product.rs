//! Product record as seen by the catalog views.

use crate::ids::ProductId;
use crate::money;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// One catalog item in canonical shape.
///
/// Built only through [`crate::catalog::normalize_product`] or the builder
/// methods below; every field has a safe default so the views never have to
/// deal with missing data.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProductRecord {
    /// Identifier issued by the product API.
    pub id: ProductId,
    /// Product name.
    pub name: String,
    /// Brand name.
    pub brand: String,
    /// Model designation.
    pub model: String,
    /// Free-text description.
    pub description: String,
    /// Top-level category (controlled vocabulary).
    pub category: String,
    /// Subcategory within `category`.
    pub sub_category: String,
    /// Third-level category.
    pub sub_sub_category: String,
    /// List price before discount.
    pub base_price: f64,
    /// Discount percentage, 0 when absent.
    pub discount_percentage: f64,
    /// Units in stock.
    pub stock: u64,
    /// Creation time, used for recency ordering.
    pub created_at: Option<DateTime<Utc>>,
    /// Last update time.
    pub updated_at: Option<DateTime<Utc>>,
    /// Image URLs, primary first.
    pub images: Vec<String>,
    /// Available sizes.
    pub sizes: Vec<String>,
    /// Whether the product is flagged as the storefront's main product.
    pub is_main: bool,
}

impl ProductRecord {
    /// Create a record with an id and a name; everything else defaults.
    pub fn new(id: impl Into<ProductId>, name: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            ..Default::default()
        }
    }

    pub fn with_brand(mut self, brand: impl Into<String>) -> Self {
        self.brand = brand.into();
        self
    }

    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = description.into();
        self
    }

    pub fn with_category(mut self, category: impl Into<String>) -> Self {
        self.category = category.into();
        self
    }

    pub fn with_sub_category(mut self, sub_category: impl Into<String>) -> Self {
        self.sub_category = sub_category.into();
        self
    }

    pub fn with_price(mut self, base_price: f64) -> Self {
        self.base_price = base_price;
        self
    }

    pub fn with_discount(mut self, discount_percentage: f64) -> Self {
        self.discount_percentage = discount_percentage;
        self
    }

    pub fn with_stock(mut self, stock: u64) -> Self {
        self.stock = stock;
        self
    }

    pub fn with_created_at(mut self, created_at: DateTime<Utc>) -> Self {
        self.created_at = Some(created_at);
        self
    }

    pub fn with_image(mut self, url: impl Into<String>) -> Self {
        self.images.push(url.into());
        self
    }

    /// Price after discount. Derived on every call, never stored.
    pub fn final_price(&self) -> f64 {
        money::discounted(self.base_price, self.discount_percentage)
    }

    /// Check if any discount applies.
    pub fn has_discount(&self) -> bool {
        self.discount_percentage > 0.0
    }

    /// Check if at least one unit is in stock.
    pub fn is_in_stock(&self) -> bool {
        self.stock > 0
    }

    /// First image URL, if any.
    pub fn primary_image(&self) -> Option<&str> {
        self.images.first().map(String::as_str)
    }

    /// Case-insensitive substring match over name, description and brand.
    ///
    /// `needle` must already be lowercased.
    pub fn matches_text(&self, needle: &str) -> bool {
        [&self.name, &self.description, &self.brand]
            .iter()
            .any(|field| field.to_lowercase().contains(needle))
    }
}
