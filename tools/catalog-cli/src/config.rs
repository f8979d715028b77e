//! CLI configuration.

use anyhow::{Context, Result};
use catalog_view::prelude::{Currency, FilterSpec};
use serde::{Deserialize, Serialize};

/// File names searched for, in order, from the working directory upward.
pub const CONFIG_FILE_NAMES: [&str; 3] = ["catalog.toml", ".catalog.toml", "catalog.json"];

/// CLI configuration file.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct CliConfig {
    /// Catalog view settings.
    #[serde(default)]
    pub catalog: CatalogConfig,

    /// Where product and category exports live.
    #[serde(default)]
    pub sources: SourcesConfig,

    /// Session storage.
    #[serde(default)]
    pub session: SessionConfig,
}

impl CliConfig {
    /// Load config from a file.
    pub fn load(path: &str) -> Result<Self> {
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file: {}", path))?;
        Self::parse(path, &content)
    }

    /// Parse config text; the format follows the file extension.
    pub fn parse(path: &str, content: &str) -> Result<Self> {
        if path.ends_with(".json") {
            serde_json::from_str(content)
                .with_context(|| format!("Failed to parse JSON config: {}", path))
        } else {
            toml::from_str(content)
                .with_context(|| format!("Failed to parse TOML config: {}", path))
        }
    }

    /// A filter spec carrying the configured page size and price ceiling.
    pub fn base_spec(&self) -> FilterSpec {
        FilterSpec::new()
            .with_page_size(self.catalog.page_size)
            .with_price_max(self.catalog.price_ceiling)
    }

    /// Problems that make the config unusable.
    pub fn errors(&self) -> Vec<String> {
        let mut errors = Vec::new();
        if self.catalog.page_size == 0 {
            errors.push("catalog.page_size must be at least 1".to_string());
        }
        if self.catalog.price_ceiling.is_nan() || self.catalog.price_ceiling < 0.0 {
            errors.push("catalog.price_ceiling must be a non-negative number".to_string());
        }
        if self.session.token_file.trim().is_empty() {
            errors.push("session.token_file is required".to_string());
        }
        errors
    }

    /// Settings that work but are probably not intended.
    pub fn warnings(&self) -> Vec<String> {
        let mut warnings = Vec::new();
        if self.sources.products_file.is_none() {
            warnings.push("sources.products_file is not set; pass --products".to_string());
        }
        if self.catalog.page_size > 100 {
            warnings.push(format!(
                "catalog.page_size {} is unusually large",
                self.catalog.page_size
            ));
        }
        warnings
    }
}

/// Catalog view settings.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CatalogConfig {
    /// Cards per page.
    #[serde(default = "default_page_size")]
    pub page_size: usize,

    /// Initial price ceiling of the filter panel.
    #[serde(default = "default_price_ceiling")]
    pub price_ceiling: f64,

    /// Display currency.
    #[serde(default)]
    pub currency: Currency,
}

fn default_page_size() -> usize {
    FilterSpec::DEFAULT_PAGE_SIZE
}

fn default_price_ceiling() -> f64 {
    FilterSpec::DEFAULT_PRICE_MAX
}

impl Default for CatalogConfig {
    fn default() -> Self {
        Self {
            page_size: default_page_size(),
            price_ceiling: default_price_ceiling(),
            currency: Currency::default(),
        }
    }
}

/// Export files.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SourcesConfig {
    /// Product list export (API response body).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub products_file: Option<String>,

    /// Category tree export.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub categories_file: Option<String>,

    /// Customer list export.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub customers_file: Option<String>,
}

/// Session storage.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SessionConfig {
    /// Token file, relative to the working directory.
    #[serde(default = "default_token_file")]
    pub token_file: String,
}

fn default_token_file() -> String {
    ".catalog/session.json".to_string()
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self {
            token_file: default_token_file(),
        }
    }
}

/// Generate a default catalog.toml config file.
pub fn generate_default_config() -> String {
    format!(
        r#"# Catalog CLI configuration

[catalog]
page_size = {page_size}
price_ceiling = {price_ceiling:.1}
currency = "INR"

[sources]
# products_file = "exports/products.json"
# categories_file = "exports/categories.json"
# customers_file = "exports/customers.json"

[session]
token_file = "{token_file}"
"#,
        page_size = FilterSpec::DEFAULT_PAGE_SIZE,
        price_ceiling = FilterSpec::DEFAULT_PRICE_MAX,
        token_file = default_token_file(),
    )
}
