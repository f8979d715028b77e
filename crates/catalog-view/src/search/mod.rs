//! Search module.
//!
//! Filter stages, the view query, pagination and the pipeline that ties
//! them together.

mod filter;
mod pipeline;
mod query;
mod results;

pub use filter::{parse_discount_tag, DiscountBucket, Filter, StockFilter};
pub use pipeline::compute_view;
pub use query::{FilterSpec, SortOption};
pub use results::{CatalogSummary, Pagination, ViewResult};
