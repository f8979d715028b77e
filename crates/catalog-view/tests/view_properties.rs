//! End-to-end checks of the catalog view over normalized API payloads.

use catalog_view::prelude::*;
use serde_json::json;

fn shoe_and_shirt() -> Vec<ProductRecord> {
    normalize_payload(&json!([
        {
            "_id": "p-shoe",
            "name": "Red Shoe",
            "basePrice": 1000,
            "discountPercentage": 10,
            "stock": 5,
            "category": "Shoes"
        },
        {
            "_id": "p-shirt",
            "name": "Blue Shirt",
            "basePrice": 500,
            "discountPercentage": 0,
            "stock": 0,
            "category": "Apparel"
        }
    ]))
    .unwrap()
}

fn names(view: &ViewResult) -> Vec<&str> {
    view.visible.iter().map(|p| p.name.as_str()).collect()
}

fn numbered(n: usize) -> Vec<ProductRecord> {
    (1..=n)
        .map(|i| {
            ProductRecord::new(format!("p{i}"), format!("Product {i}"))
                .with_price((i * 100) as f64)
                .with_discount(((i * 7) % 100) as f64)
                .with_stock((i % 3) as u64)
        })
        .collect()
}

fn unconstrained() -> FilterSpec {
    FilterSpec::new()
        .with_price_max(f64::INFINITY)
        .with_page_size(1_000)
}

#[test]
fn test_in_stock_filter() {
    let spec = FilterSpec::new().with_stock(StockFilter::from_tag("in").unwrap());
    let view = compute_view(&shoe_and_shirt(), &spec);
    assert_eq!(names(&view), vec!["Red Shoe"]);
    assert_eq!(view.total_matched(), 1);
}

#[test]
fn test_low_discount_bucket() {
    let spec = FilterSpec::new().with_discount(parse_discount_tag("0-9").unwrap());
    let view = compute_view(&shoe_and_shirt(), &spec);
    assert_eq!(names(&view), vec!["Blue Shirt"]);
}

#[test]
fn test_price_low_to_high() {
    let spec = FilterSpec::new().with_sort(SortOption::from_tag("low-high").unwrap());
    let view = compute_view(&shoe_and_shirt(), &spec);
    assert_eq!(names(&view), vec!["Blue Shirt", "Red Shoe"]);
}

#[test]
fn test_page_beyond_end_is_clamped() {
    let products = numbered(7);
    let spec = FilterSpec::new().with_page_size(6).with_page(5);
    let view = compute_view(&products, &spec);

    assert_eq!(view.total_pages(), 2);
    assert_eq!(view.page(), 2);
    assert_eq!(names(&view), vec!["Product 7"]);

    let last = compute_view(&products, &spec.clone().with_page(2));
    assert_eq!(view, last);
}

#[test]
fn test_empty_constraints_keep_everything_in_order() {
    let products = numbered(25);
    let view = compute_view(&products, &unconstrained());
    assert_eq!(view.visible, products);
}

#[test]
fn test_relevance_preserves_input_order_of_subset() {
    let products = numbered(20);
    let spec = unconstrained().with_stock(StockFilter::InStock);
    let view = compute_view(&products, &spec);

    let expected: Vec<&ProductRecord> = products.iter().filter(|p| p.stock > 0).collect();
    let actual: Vec<&ProductRecord> = view.visible.iter().collect();
    assert_eq!(actual, expected);
}

#[test]
fn test_idempotent() {
    let products = numbered(15);
    let spec = FilterSpec::new()
        .with_sort(SortOption::Discount)
        .with_discount(parse_discount_tag("10-19").unwrap())
        .with_page(2);

    assert_eq!(compute_view(&products, &spec), compute_view(&products, &spec));
}

#[test]
fn test_page_always_in_range() {
    let products = numbered(13);
    for requested in 0..10 {
        let view = compute_view(&products, &FilterSpec::new().with_page(requested));
        assert!(view.page() >= 1);
        assert!(view.page() <= view.total_pages());
    }
}

#[test]
fn test_every_discount_hits_one_bucket() {
    for d in 0..=100 {
        let hits = DiscountBucket::ALL
            .iter()
            .filter(|b| b.contains(f64::from(d)))
            .count();
        assert_eq!(hits, 1, "discount {d}");
    }
}

#[test]
fn test_summary_counts() {
    let products = numbered(13);
    let view = compute_view(&products, &FilterSpec::new().with_page(3));
    assert_eq!(
        view.summary(products.len()),
        CatalogSummary {
            total: 13,
            filtered: 13,
            showing: 1
        }
    );
}

#[test]
fn test_fetch_failure_renders_empty_view() {
    let products = parse_products("<html>502 Bad Gateway</html>").unwrap_or_default();
    let view = compute_view(&products, &FilterSpec::new());
    assert_eq!(view.total_matched(), 0);
    assert_eq!(view.total_pages(), 1);
}
