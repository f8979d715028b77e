//! Category listing.

use anyhow::{bail, Result};
use catalog_view::prelude::CategoryTree;

use super::{load_categories, CategoriesArgs};
use crate::context::Context;

/// Run the categories command.
pub async fn run(args: CategoriesArgs, ctx: &Context) -> Result<()> {
    let Some(path) = ctx.categories_file(args.categories.as_deref()) else {
        bail!("No category export configured. Pass --categories or set sources.categories_file.");
    };
    let tree = load_categories(&path).await?;

    match args.category {
        Some(category) => list_subcategories(&tree, &category, ctx),
        None if args.quick => {
            let picks = tree.quick_picks(CategoryTree::QUICK_PICKS);
            if ctx.output.is_json() {
                ctx.output.json(&picks);
                return Ok(());
            }
            ctx.output.header("Quick picks");
            for name in picks {
                ctx.output.list_item(name);
            }
            Ok(())
        }
        None => {
            if ctx.output.is_json() {
                ctx.output.json(&tree);
                return Ok(());
            }
            ctx.output.header("Categories");
            if tree.is_empty() {
                ctx.output.info("No categories.");
            }
            for entry in tree.entries() {
                ctx.output.kv(
                    &entry.category,
                    &format!("{} subcategories", entry.subcategories.len()),
                );
            }
            Ok(())
        }
    }
}

fn list_subcategories(tree: &CategoryTree, category: &str, ctx: &Context) -> Result<()> {
    if !tree.names().any(|name| name == category) {
        bail!("Unknown category: {}", category);
    }
    let subs = tree.subcategories_for(category);

    if ctx.output.is_json() {
        ctx.output.json(&subs);
        return Ok(());
    }

    ctx.output.header(&format!("Subcategories of {}", category));
    if subs.is_empty() {
        ctx.output.info("None.");
    }
    for sub in subs {
        ctx.output.list_item(sub);
    }
    Ok(())
}
