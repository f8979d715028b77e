//! Product catalog views for the admin console.
//!
//! - **Catalog**: canonical product records, payload normalization,
//!   categories, the product form, snapshots
//! - **Customers**: customer list normalization
//! - **Search**: filter stages, sort options, pagination and the view
//!   pipeline
//!
//! # Example
//!
//! ```rust
//! use catalog_view::prelude::*;
//!
//! let products = parse_products(r#"{"products": [
//!     {"_id": "1", "name": "Red Shoe", "basePrice": 1000, "discountPercentage": 10, "stock": 5},
//!     {"_id": "2", "name": "Blue Shirt", "price": 500, "stock": 0}
//! ]}"#).unwrap();
//!
//! let spec = FilterSpec::new()
//!     .with_stock(StockFilter::InStock)
//!     .with_sort(SortOption::PriceAsc);
//!
//! let view = compute_view(&products, &spec);
//! assert_eq!(view.total_matched(), 1);
//! assert_eq!(view.visible[0].name, "Red Shoe");
//! ```

pub mod error;
pub mod ids;
pub mod money;

pub mod catalog;
pub mod customers;
pub mod search;

pub use error::CatalogError;
pub use ids::{CustomerId, ProductId};
pub use money::Currency;

/// Prelude for convenient imports.
pub mod prelude {
    pub use crate::error::CatalogError;
    pub use crate::ids::{CustomerId, ProductId};
    pub use crate::money::Currency;

    // Catalog
    pub use crate::catalog::{
        normalize_payload, normalize_product, parse_categories, parse_products, CatalogSnapshot,
        CategoryEntry, CategoryTree, ProductDraft, ProductRecord, SaveTarget, ViewSession,
    };

    // Customers
    pub use crate::customers::{normalize_customers, parse_customers, Customer};

    // Search
    pub use crate::search::{
        compute_view, parse_discount_tag, CatalogSummary, DiscountBucket, Filter, FilterSpec,
        Pagination, SortOption, StockFilter, ViewResult,
    };
}
