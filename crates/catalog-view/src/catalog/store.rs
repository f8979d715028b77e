//! Catalog snapshot and the stateful view session around it.

use crate::catalog::ProductRecord;
use crate::error::CatalogError;
use crate::ids::ProductId;
use crate::search::{compute_view, FilterSpec, ViewResult};

/// The product list as last fetched from the API.
///
/// Updates always replace the whole list; there is no in-place patching.
/// Every replacement bumps `revision` so callers can tell snapshots apart.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct CatalogSnapshot {
    products: Vec<ProductRecord>,
    revision: u64,
}

impl CatalogSnapshot {
    pub fn new(products: Vec<ProductRecord>) -> Self {
        Self {
            products,
            revision: 1,
        }
    }

    /// Replace the whole list.
    pub fn replace_all(&mut self, products: Vec<ProductRecord>) {
        self.products = products;
        self.revision += 1;
        tracing::debug!(
            revision = self.revision,
            products = self.products.len(),
            "replaced catalog snapshot"
        );
    }

    pub fn products(&self) -> &[ProductRecord] {
        &self.products
    }

    pub fn revision(&self) -> u64 {
        self.revision
    }

    pub fn len(&self) -> usize {
        self.products.len()
    }

    pub fn is_empty(&self) -> bool {
        self.products.is_empty()
    }

    /// Look up a product by id.
    pub fn get(&self, id: &ProductId) -> Result<&ProductRecord, CatalogError> {
        self.products
            .iter()
            .find(|p| &p.id == id)
            .ok_or_else(|| CatalogError::ProductNotFound(id.to_string()))
    }

    /// Render a view of this snapshot.
    pub fn view(&self, spec: &FilterSpec) -> ViewResult {
        compute_view(&self.products, spec)
    }
}

/// A catalog screen: one snapshot plus the operator's current filters.
///
/// Every render recomputes from scratch. When a render finds the stored
/// page beyond the last page (typically after a filter narrowed the set),
/// the page shown is the clamped one and the stored page resets to 1.
#[derive(Debug, Clone, Default)]
pub struct ViewSession {
    snapshot: CatalogSnapshot,
    spec: FilterSpec,
}

impl ViewSession {
    pub fn new(snapshot: CatalogSnapshot) -> Self {
        Self {
            snapshot,
            spec: FilterSpec::new(),
        }
    }

    /// Use a specific spec, e.g. with a non-default page size.
    pub fn with_spec(mut self, spec: FilterSpec) -> Self {
        self.spec = spec;
        self
    }

    pub fn snapshot(&self) -> &CatalogSnapshot {
        &self.snapshot
    }

    pub fn spec(&self) -> &FilterSpec {
        &self.spec
    }

    /// Mutable access for the filter panel.
    pub fn filters_mut(&mut self) -> &mut FilterSpec {
        &mut self.spec
    }

    /// Swap in a freshly fetched list.
    pub fn replace_products(&mut self, products: Vec<ProductRecord>) {
        self.snapshot.replace_all(products);
    }

    /// Reset every filter and return to page 1.
    pub fn reset_filters(&mut self) {
        self.spec.reset();
    }

    /// Compute the current view.
    pub fn render(&mut self) -> ViewResult {
        let result = self.snapshot.view(&self.spec);
        if self.spec.page > result.total_pages() {
            tracing::debug!(
                requested = self.spec.page,
                total_pages = result.total_pages(),
                "page out of range, resetting to first page"
            );
            self.spec.page = 1;
        }
        result
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn products(n: usize) -> Vec<ProductRecord> {
        (1..=n)
            .map(|i| ProductRecord::new(i.to_string(), format!("Product {i}")))
            .collect()
    }

    #[test]
    fn test_replace_all_bumps_revision() {
        let mut snapshot = CatalogSnapshot::new(products(3));
        assert_eq!(snapshot.revision(), 1);
        snapshot.replace_all(products(5));
        assert_eq!(snapshot.revision(), 2);
        assert_eq!(snapshot.len(), 5);
    }

    #[test]
    fn test_get() {
        let snapshot = CatalogSnapshot::new(products(3));
        assert_eq!(snapshot.get(&ProductId::new("2")).unwrap().name, "Product 2");
        assert!(matches!(
            snapshot.get(&ProductId::new("9")),
            Err(CatalogError::ProductNotFound(_))
        ));
    }

    #[test]
    fn test_render_resets_out_of_range_page() {
        let mut session = ViewSession::new(CatalogSnapshot::new(products(13)));
        session.filters_mut().set_page(3);
        assert_eq!(session.render().page(), 3);

        session.replace_products(products(7));
        let shown = session.render();
        assert_eq!(shown.page(), 2);
        assert_eq!(session.spec().page, 1);
        assert_eq!(session.render().page(), 1);
    }

    #[test]
    fn test_in_range_page_is_kept() {
        let mut session = ViewSession::new(CatalogSnapshot::new(products(13)));
        session.filters_mut().set_page(2);
        session.render();
        assert_eq!(session.spec().page, 2);
    }

    #[test]
    fn test_reset_filters() {
        let mut session = ViewSession::new(CatalogSnapshot::new(products(3)))
            .with_spec(FilterSpec::new().with_page_size(2));
        session.filters_mut().set_search("zzz");
        assert_eq!(session.render().total_matched(), 0);

        session.reset_filters();
        let result = session.render();
        assert_eq!(result.total_matched(), 3);
        assert_eq!(result.visible.len(), 2);
    }
}
