//! Product catalog module.
//!
//! Contains the canonical product record, the API normalization boundary,
//! the category vocabulary, the product form, and the snapshot/session
//! types.

mod category;
mod draft;
pub(crate) mod normalize;
mod product;
mod store;

pub use category::{parse_categories, CategoryEntry, CategoryTree};
pub use draft::{Dimensions, ProductDraft, SaveTarget, Shipping, Warranty};
pub use normalize::{normalize_payload, normalize_product, normalize_single, parse_products};
pub use product::ProductRecord;
pub use store::{CatalogSnapshot, ViewSession};
