//! CLI command implementations.

pub mod categories;
pub mod config;
pub mod customers;
pub mod draft;
pub mod session;
pub mod show;
pub mod view;

use std::path::Path;

use anyhow::{Context as _, Result};
use catalog_view::prelude::{
    parse_categories, parse_customers, parse_products, CategoryTree, Customer, ProductRecord,
};
use clap::{Args, Subcommand};

/// Arguments for the view command.
#[derive(Args)]
pub struct ViewArgs {
    /// Product export to read (default: sources.products_file).
    #[arg(short, long)]
    pub products: Option<String>,

    /// Category export, used to drop a subcategory that does not belong
    /// to the chosen category.
    #[arg(long)]
    pub categories: Option<String>,

    /// Free-text search over name, description and brand.
    #[arg(short, long, default_value = "")]
    pub search: String,

    /// Exact category.
    #[arg(long, default_value = "")]
    pub category: String,

    /// Exact subcategory.
    #[arg(long, default_value = "")]
    pub sub_category: String,

    /// Discount bucket: 0-9, 10-19, ..., 70-79, 80+.
    #[arg(short, long, default_value = "")]
    pub discount: String,

    /// Price ceiling on the list price (default: catalog.price_ceiling).
    #[arg(long)]
    pub price_max: Option<f64>,

    /// Stock filter: in, out.
    #[arg(long, default_value = "")]
    pub stock: String,

    /// Sort: new, low-high, high-low, discount.
    #[arg(long, default_value = "")]
    pub sort: String,

    /// Page to show (1-indexed).
    #[arg(long, default_value = "1")]
    pub page: usize,

    /// Cards per page (default: catalog.page_size).
    #[arg(long)]
    pub page_size: Option<usize>,
}

/// Arguments for the categories command.
#[derive(Args)]
pub struct CategoriesArgs {
    /// Category export to read (default: sources.categories_file).
    #[arg(long)]
    pub categories: Option<String>,

    /// List the subcategories of this category.
    #[arg(long)]
    pub category: Option<String>,

    /// Only the quick-pick categories.
    #[arg(short, long)]
    pub quick: bool,
}

/// Arguments for the show command.
#[derive(Args)]
pub struct ShowArgs {
    /// Product id.
    pub id: String,

    /// Product export to read (default: sources.products_file).
    #[arg(short, long)]
    pub products: Option<String>,
}

/// Arguments for the draft command.
#[derive(Args, Default)]
pub struct DraftArgs {
    /// Pre-fill from the product with this id (edit instead of create).
    #[arg(long)]
    pub from: Option<String>,

    /// Product export holding the product to edit (default: sources.products_file).
    #[arg(short, long)]
    pub products: Option<String>,

    /// Category export, used to drop a subcategory that does not belong
    /// to the chosen category.
    #[arg(long)]
    pub categories: Option<String>,

    /// Product name.
    #[arg(long)]
    pub name: Option<String>,

    /// Brand.
    #[arg(long)]
    pub brand: Option<String>,

    /// Description.
    #[arg(long)]
    pub description: Option<String>,

    /// Base price.
    #[arg(long)]
    pub price: Option<f64>,

    /// Maximum retail price.
    #[arg(long)]
    pub mrp: Option<f64>,

    /// Discount percentage.
    #[arg(long)]
    pub discount: Option<f64>,

    /// Units in stock.
    #[arg(long)]
    pub stock: Option<u64>,

    /// Category.
    #[arg(long)]
    pub category: Option<String>,

    /// Subcategory.
    #[arg(long)]
    pub sub_category: Option<String>,

    /// Add a size (repeatable).
    #[arg(long = "size")]
    pub sizes: Vec<String>,

    /// Remove a size (repeatable).
    #[arg(long = "remove-size")]
    pub remove_sizes: Vec<String>,

    /// Mark as a main product.
    #[arg(long)]
    pub main: bool,
}

/// Arguments for the customers command.
#[derive(Args)]
pub struct CustomersArgs {
    /// Customer export to read (default: sources.customers_file).
    #[arg(short, long)]
    pub customers: Option<String>,
}

/// Arguments for the session command.
#[derive(Args)]
pub struct SessionArgs {
    #[command(subcommand)]
    pub command: SessionCommand,
}

#[derive(Subcommand)]
pub enum SessionCommand {
    /// Store a token issued by the login API.
    Login {
        /// Token value.
        #[arg(short, long, conflicts_with = "response", required_unless_present = "response")]
        token: Option<String>,

        /// File holding the login API response body.
        #[arg(short, long)]
        response: Option<String>,

        /// Store as a customer access token instead of an admin token.
        #[arg(long)]
        access: bool,
    },
    /// Print the JSON body of a login request.
    Request {
        /// Account email.
        #[arg(short, long)]
        email: String,

        /// Account password.
        #[arg(short, long)]
        password: String,
    },
    /// Clear the stored session.
    Logout {
        /// Skip confirmation prompt.
        #[arg(short, long)]
        yes: bool,
    },
    /// Show the current session.
    Status,
}

/// Arguments for the config command.
#[derive(Args)]
pub struct ConfigArgs {
    #[command(subcommand)]
    pub command: ConfigCommand,
}

#[derive(Subcommand)]
pub enum ConfigCommand {
    /// Show current configuration.
    Show,
    /// Initialize a new config file.
    Init {
        /// Force overwrite existing config.
        #[arg(short, long)]
        force: bool,
    },
    /// Validate the config file.
    Validate,
}

/// Read and normalize a product export.
pub async fn load_products(path: &Path) -> Result<Vec<ProductRecord>> {
    let body = tokio::fs::read_to_string(path)
        .await
        .with_context(|| format!("Failed to read product export: {}", path.display()))?;
    let products = parse_products(&body)
        .with_context(|| format!("Failed to parse product export: {}", path.display()))?;
    tracing::debug!(path = %path.display(), products = products.len(), "loaded products");
    Ok(products)
}

/// Read a product export without normalizing it.
pub async fn load_raw(path: &Path) -> Result<serde_json::Value> {
    let body = tokio::fs::read_to_string(path)
        .await
        .with_context(|| format!("Failed to read product export: {}", path.display()))?;
    serde_json::from_str(&body)
        .with_context(|| format!("Failed to parse product export: {}", path.display()))
}

/// Read and normalize a customer export.
pub async fn load_customers(path: &Path) -> Result<Vec<Customer>> {
    let body = tokio::fs::read_to_string(path)
        .await
        .with_context(|| format!("Failed to read customer export: {}", path.display()))?;
    let customers = parse_customers(&body)
        .with_context(|| format!("Failed to parse customer export: {}", path.display()))?;
    tracing::debug!(path = %path.display(), customers = customers.len(), "loaded customers");
    Ok(customers)
}

/// Read a category export.
pub async fn load_categories(path: &Path) -> Result<CategoryTree> {
    let body = tokio::fs::read_to_string(path)
        .await
        .with_context(|| format!("Failed to read category export: {}", path.display()))?;
    parse_categories(&body)
        .with_context(|| format!("Failed to parse category export: {}", path.display()))
}
