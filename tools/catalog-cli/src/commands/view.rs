//! Filtered, sorted, paginated product listing.

use anyhow::Result;
use catalog_view::prelude::*;
use console::style;
use serde::Serialize;

use super::{load_categories, load_products, ViewArgs};
use crate::config::CliConfig;
use crate::context::Context;
use crate::output::{discount_badge, page_strip, stock_badge};

const PAGE_LINKS: usize = 5;

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct ViewReport<'a> {
    summary: CatalogSummary,
    pagination: &'a Pagination,
    products: &'a [ProductRecord],
}

/// Run the view command.
pub async fn run(args: ViewArgs, ctx: &Context) -> Result<()> {
    let products = match ctx.products_file(args.products.as_deref()) {
        Some(path) => match load_products(&path).await {
            Ok(products) => products,
            Err(e) => {
                tracing::warn!(error = %format!("{:#}", e), "product load failed");
                ctx.output
                    .warn(&format!("Could not load products, showing none: {:#}", e));
                Vec::new()
            }
        },
        None => {
            ctx.output
                .warn("No product export configured. Pass --products or set sources.products_file.");
            Vec::new()
        }
    };

    let tree = match ctx.categories_file(args.categories.as_deref()) {
        Some(path) => match load_categories(&path).await {
            Ok(tree) => Some(tree),
            Err(e) => {
                ctx.output.warn(&format!("{:#}", e));
                None
            }
        },
        None => None,
    };

    let spec = build_spec(&args, &ctx.config, tree.as_ref())?;
    let view = compute_view(&products, &spec);
    let summary = view.summary(products.len());

    if ctx.output.is_json() {
        ctx.output.json(&ViewReport {
            summary,
            pagination: &view.pagination,
            products: &view.visible,
        });
        return Ok(());
    }

    ctx.output.header("Products");
    if ctx.output.is_verbose() {
        describe_spec(&spec, ctx);
    }

    if view.is_empty() {
        ctx.output.info("No products match the current filters.");
    }

    let currency = ctx.config.catalog.currency;
    for product in &view.visible {
        print_card(product, currency);
    }

    ctx.output.rule();
    println!(
        "  Total: {}  Filtered: {}  Showing: {}",
        style(summary.total).bold(),
        style(summary.filtered).bold(),
        style(summary.showing).bold()
    );
    println!(
        "  Page {} of {}   {}",
        view.page(),
        view.total_pages(),
        page_strip(&view.pagination, PAGE_LINKS)
    );

    Ok(())
}

/// Assemble the filter spec from flags and config.
fn build_spec(
    args: &ViewArgs,
    config: &CliConfig,
    tree: Option<&CategoryTree>,
) -> Result<FilterSpec> {
    let mut spec = config.base_spec();
    if let Some(page_size) = args.page_size {
        spec = spec.with_page_size(page_size);
    }
    if let Some(price_max) = args.price_max {
        spec = spec.with_price_max(price_max);
    }

    let sub_category = match tree {
        Some(tree) if !args.sub_category.is_empty() => {
            let kept = tree
                .reconcile_subcategory(&args.category, &args.sub_category)
                .unwrap_or_default();
            if kept.is_empty() {
                tracing::warn!(
                    category = %args.category,
                    sub_category = %args.sub_category,
                    "subcategory not in category, ignoring"
                );
            }
            kept
        }
        _ => args.sub_category.clone(),
    };

    Ok(spec
        .with_search(args.search.as_str())
        .with_category(args.category.as_str())
        .with_sub_category(sub_category)
        .with_discount(parse_discount_tag(&args.discount)?)
        .with_stock(StockFilter::from_tag(&args.stock)?)
        .with_sort(SortOption::from_tag(&args.sort)?)
        .with_page(args.page))
}

fn describe_spec(spec: &FilterSpec, ctx: &Context) {
    if !spec.search_text.is_empty() {
        ctx.output.kv("search", &spec.search_text);
    }
    if !spec.category.is_empty() {
        ctx.output.kv("category", &spec.category);
    }
    if !spec.sub_category.is_empty() {
        ctx.output.kv("subcategory", &spec.sub_category);
    }
    if let Some(bucket) = spec.discount {
        ctx.output.kv("discount", &bucket.label());
    }
    ctx.output.kv("price max", &spec.price_max.to_string());
    ctx.output.kv("stock", spec.stock.display_name());
    ctx.output.kv("sort", spec.sort.display_name());
}

fn print_card(product: &ProductRecord, currency: Currency) {
    let brand = if product.brand.is_empty() {
        String::new()
    } else {
        format!(" · {}", style(&product.brand).dim())
    };
    println!("\n  {}{}", style(&product.name).bold(), brand);

    let mut line = vec![style(currency.format(product.final_price())).cyan().to_string()];
    if product.has_discount() {
        line.push(
            style(currency.format(product.base_price))
                .dim()
                .strikethrough()
                .to_string(),
        );
        line.push(discount_badge(product));
    }
    line.push(stock_badge(product));
    println!("    {}", line.join("  "));
    println!("    {}", style(product.id.as_str()).dim());
}

#[cfg(test)]
mod tests {
    use super::*;

    fn args() -> ViewArgs {
        ViewArgs {
            products: None,
            categories: None,
            search: String::new(),
            category: String::new(),
            sub_category: String::new(),
            discount: String::new(),
            price_max: None,
            stock: String::new(),
            sort: String::new(),
            page: 1,
            page_size: None,
        }
    }

    #[test]
    fn test_defaults_come_from_config() {
        let mut config = CliConfig::default();
        config.catalog.page_size = 4;
        let spec = build_spec(&args(), &config, None).unwrap();
        assert_eq!(spec, FilterSpec::new().with_page_size(4));
    }

    #[test]
    fn test_flags_override_config() {
        let mut a = args();
        a.page_size = Some(10);
        a.price_max = Some(999.0);
        a.stock = "in".to_string();
        a.sort = "high-low".to_string();
        a.discount = "80+".to_string();
        a.page = 3;

        let spec = build_spec(&a, &CliConfig::default(), None).unwrap();
        assert_eq!(spec.page_size, 10);
        assert_eq!(spec.price_max, 999.0);
        assert_eq!(spec.stock, StockFilter::InStock);
        assert_eq!(spec.sort, SortOption::PriceDesc);
        assert_eq!(spec.discount.map(|b| b.tag()), Some("80+".to_string()));
        assert_eq!(spec.page, 3);
    }

    #[test]
    fn test_bad_tags_are_errors() {
        let mut a = args();
        a.sort = "popular".to_string();
        assert!(build_spec(&a, &CliConfig::default(), None).is_err());

        let mut a = args();
        a.discount = "5-15".to_string();
        assert!(build_spec(&a, &CliConfig::default(), None).is_err());
    }

    #[test]
    fn test_foreign_subcategory_is_dropped() {
        let tree = CategoryTree::new(vec![
            CategoryEntry::new("Shoes", vec!["Running".to_string()]),
            CategoryEntry::new("Apparel", vec!["Shirts".to_string()]),
        ]);

        let mut a = args();
        a.category = "Shoes".to_string();
        a.sub_category = "Shirts".to_string();
        let spec = build_spec(&a, &CliConfig::default(), Some(&tree)).unwrap();
        assert!(spec.sub_category.is_empty());

        a.sub_category = "Running".to_string();
        let spec = build_spec(&a, &CliConfig::default(), Some(&tree)).unwrap();
        assert_eq!(spec.sub_category, "Running");
    }
}
