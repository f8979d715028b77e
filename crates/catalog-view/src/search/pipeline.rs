//! The catalog view pipeline: filter, sort, paginate.

use crate::catalog::ProductRecord;
use crate::search::{FilterSpec, Pagination, ViewResult};

/// Derive the view for `spec` over `products`.
///
/// Filter stages run in a fixed order (text, category, subcategory, stock,
/// price ceiling, discount), then the stable sort, then pagination with the
/// requested page clamped into range. The input is never modified and the
/// result depends only on the arguments.
pub fn compute_view(products: &[ProductRecord], spec: &FilterSpec) -> ViewResult {
    let filters = spec.filters();

    let mut matched: Vec<&ProductRecord> = products
        .iter()
        .filter(|product| filters.iter().all(|f| f.matches(product)))
        .collect();

    spec.sort.sort(&mut matched);

    let pagination = Pagination::new(spec.page, spec.page_size, matched.len());
    let visible = matched[pagination.range()]
        .iter()
        .map(|product| (*product).clone())
        .collect();

    tracing::debug!(
        products = products.len(),
        stages = filters.len(),
        matched = pagination.total,
        page = pagination.page,
        total_pages = pagination.total_pages,
        "computed catalog view"
    );

    ViewResult {
        visible,
        pagination,
    }
}
