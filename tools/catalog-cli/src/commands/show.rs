//! Single product details.

use anyhow::{bail, Result};
use catalog_view::prelude::{CatalogSnapshot, ProductId, ProductRecord};

use super::{load_products, ShowArgs};
use crate::context::Context;
use crate::output::{discount_badge, stock_badge};

/// Run the show command.
pub async fn run(args: ShowArgs, ctx: &Context) -> Result<()> {
    let Some(path) = ctx.products_file(args.products.as_deref()) else {
        bail!("No product export configured. Pass --products or set sources.products_file.");
    };
    let snapshot = CatalogSnapshot::new(load_products(&path).await?);
    let product = snapshot.get(&ProductId::new(args.id))?;

    if ctx.output.is_json() {
        ctx.output.json(product);
        return Ok(());
    }

    print_details(product, ctx);
    Ok(())
}

fn print_details(product: &ProductRecord, ctx: &Context) {
    let currency = ctx.config.catalog.currency;

    ctx.output.header(&product.name);
    ctx.output.kv("id", product.id.as_str());
    for (key, value) in [("brand", &product.brand), ("model", &product.model)] {
        if !value.is_empty() {
            ctx.output.kv(key, value);
        }
    }

    let path: Vec<&str> = [
        product.category.as_str(),
        product.sub_category.as_str(),
        product.sub_sub_category.as_str(),
    ]
    .into_iter()
    .filter(|s| !s.is_empty())
    .collect();
    if !path.is_empty() {
        ctx.output.kv("category", &path.join(" › "));
    }

    ctx.output.kv("price", &currency.format(product.final_price()));
    if product.has_discount() {
        ctx.output.kv("list price", &currency.format(product.base_price));
        ctx.output.kv("discount", &discount_badge(product));
    }
    ctx.output.kv("stock", &stock_badge(product));

    if !product.sizes.is_empty() {
        ctx.output.kv("sizes", &product.sizes.join(", "));
    }
    if let Some(created) = product.created_at {
        ctx.output.kv("created", &created.to_rfc3339());
    }
    if let Some(updated) = product.updated_at {
        ctx.output.kv("updated", &updated.to_rfc3339());
    }
    if product.is_main {
        ctx.output.kv("main product", "yes");
    }

    if !product.description.is_empty() {
        ctx.output.info("");
        println!("  {}", product.description);
    }

    if !product.images.is_empty() {
        ctx.output.info("Images:");
        for image in &product.images {
            ctx.output.list_item(image);
        }
    }
}
