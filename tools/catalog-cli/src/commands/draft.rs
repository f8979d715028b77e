//! Product create/edit form preview.

use anyhow::{bail, Context as _, Result};
use catalog_view::prelude::{CategoryTree, ProductDraft, ProductId};
use serde::Serialize;

use super::{load_categories, load_raw, DraftArgs};
use crate::context::Context;

#[derive(Serialize)]
struct DraftReport<'a> {
    method: &'static str,
    path: String,
    fields: Vec<FormField<'a>>,
}

#[derive(Serialize)]
struct FormField<'a> {
    name: &'a str,
    value: &'a str,
}

/// Run the draft command.
pub async fn run(args: DraftArgs, ctx: &Context) -> Result<()> {
    let mut draft = match &args.from {
        Some(id) => {
            let Some(path) = ctx.products_file(args.products.as_deref()) else {
                bail!("No product export configured. Pass --products or set sources.products_file.");
            };
            let payload = load_raw(&path).await?;
            ProductDraft::from_payload(&payload, &ProductId::new(id.as_str()))
                .with_context(|| format!("Cannot edit product {}", id))?
        }
        None => ProductDraft::new(),
    };

    apply(&args, &mut draft, ctx);

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
    if let Some(tree) = &tree {
        reconcile(&mut draft, tree, ctx);
    }

    let target = draft.target();
    let fields = draft.form_fields()?;

    if ctx.output.is_json() {
        ctx.output.json(&DraftReport {
            method: target.method(),
            path: target.path(),
            fields: fields
                .iter()
                .map(|(name, value)| FormField { name, value })
                .collect(),
        });
        return Ok(());
    }

    let title = if draft.is_edit() { "Edit product" } else { "New product" };
    ctx.output.header(title);
    ctx.output
        .kv("request", &format!("{} {}", target.method(), target.path()));
    ctx.output.rule();
    for (name, value) in &fields {
        ctx.output.kv(name, value);
    }

    Ok(())
}

/// Apply command-line edits on top of the draft.
fn apply(args: &DraftArgs, draft: &mut ProductDraft, ctx: &Context) {
    if let Some(name) = &args.name {
        draft.name = name.clone();
    }
    if let Some(brand) = &args.brand {
        draft.brand = brand.clone();
    }
    if let Some(description) = &args.description {
        draft.description = description.clone();
    }
    if let Some(price) = args.price {
        draft.base_price = Some(price);
    }
    if let Some(mrp) = args.mrp {
        draft.mrp = Some(mrp);
    }
    if let Some(discount) = args.discount {
        draft.discount_percentage = discount;
    }
    if let Some(stock) = args.stock {
        draft.stock = stock;
    }
    if let Some(category) = &args.category {
        if *category != draft.category {
            draft.sub_category.clear();
            draft.sub_sub_category.clear();
        }
        draft.category = category.clone();
    }
    if let Some(sub_category) = &args.sub_category {
        draft.sub_category = sub_category.clone();
    }
    if args.main {
        draft.is_main = true;
    }

    for size in &args.remove_sizes {
        if !draft.remove_size(size) {
            ctx.output.warn(&format!("Size {} was not set", size));
        }
    }
    for size in &args.sizes {
        if !draft.add_size(size) {
            tracing::debug!(size = %size, "size skipped");
        }
    }
}

fn reconcile(draft: &mut ProductDraft, tree: &CategoryTree, ctx: &Context) {
    let before = draft.sub_category.clone();
    draft.reconcile_categories(tree);
    if draft.sub_category.is_empty() && !before.is_empty() {
        ctx.output.warn(&format!(
            "Subcategory {} is not under {}, cleared",
            before, draft.category
        ));
    }
}

#[cfg(test)]
mod tests {
    use std::path::PathBuf;

    use catalog_view::prelude::CategoryEntry;
    use serde_json::json;

    use super::*;
    use crate::config::CliConfig;
    use crate::output::Output;

    fn ctx() -> Context {
        Context {
            config: CliConfig::default(),
            output: Output::new(false, true),
            cwd: PathBuf::from("/work"),
        }
    }

    #[test]
    fn test_flags_fill_a_new_draft() {
        let args = DraftArgs {
            name: Some("Trail Shoe".to_string()),
            price: Some(2499.0),
            stock: Some(7),
            sizes: vec!["M".to_string(), " M ".to_string(), "L".to_string()],
            main: true,
            ..Default::default()
        };
        let mut draft = ProductDraft::new();
        apply(&args, &mut draft, &ctx());

        assert_eq!(draft.name, "Trail Shoe");
        assert_eq!(draft.base_price, Some(2499.0));
        assert_eq!(draft.stock, 7);
        assert_eq!(draft.sizes, vec!["M", "L"]);
        assert!(draft.is_main);
        assert_eq!(draft.availability, ProductDraft::DEFAULT_AVAILABILITY);
    }

    #[test]
    fn test_flags_edit_a_prefilled_draft() {
        let payload = json!({"products": [{
            "_id": "p1",
            "name": "Old",
            "category": "Shoes",
            "subCategory": "Running",
            "sizes": ["S", "M"],
            "stock": 3
        }]});
        let mut draft = ProductDraft::from_payload(&payload, &ProductId::new("p1")).unwrap();

        let args = DraftArgs {
            name: Some("New".to_string()),
            remove_sizes: vec!["S".to_string()],
            sizes: vec!["XL".to_string()],
            ..Default::default()
        };
        apply(&args, &mut draft, &ctx());

        assert_eq!(draft.name, "New");
        assert_eq!(draft.sizes, vec!["M", "XL"]);
        assert_eq!(draft.stock, 3);
        assert_eq!(draft.sub_category, "Running");
        assert_eq!(draft.target().path(), "/api/product/p1");
    }

    #[test]
    fn test_changing_category_clears_subcategory() {
        let mut draft = ProductDraft::new();
        draft.category = "Shoes".to_string();
        draft.sub_category = "Running".to_string();

        let args = DraftArgs {
            category: Some("Apparel".to_string()),
            ..Default::default()
        };
        apply(&args, &mut draft, &ctx());
        assert_eq!(draft.category, "Apparel");
        assert!(draft.sub_category.is_empty());
    }

    #[test]
    fn test_reconcile_drops_foreign_subcategory() {
        let tree = CategoryTree::new(vec![
            CategoryEntry::new("Shoes", vec!["Running".to_string()]),
            CategoryEntry::new("Apparel", vec!["Shirts".to_string()]),
        ]);
        let mut draft = ProductDraft::new();
        draft.category = "Shoes".to_string();
        draft.sub_category = "Shirts".to_string();

        reconcile(&mut draft, &tree, &ctx());
        assert!(draft.sub_category.is_empty());
    }
}
