//! Product create/edit form state.
//!
//! A [`ProductDraft`] starts from the form defaults, or is pre-filled from a
//! record the API already holds. It is turned into the flat list of form
//! fields the product endpoint accepts, with nested values as JSON strings.

use chrono::{DateTime, SecondsFormat, Utc};
use serde::{Deserialize, Deserializer, Serialize};
use serde_json::{Map, Value};

use super::normalize::{
    discount, first_id, kind_of, listed_price, number, product_list, stock, string_list, text,
    timestamp,
};
use crate::catalog::CategoryTree;
use crate::error::CatalogError;
use crate::ids::ProductId;
use crate::money::Currency;

/// Warranty block of the product form.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Warranty {
    #[serde(rename = "type", default, deserialize_with = "lenient_text")]
    pub kind: String,
    #[serde(default, deserialize_with = "lenient_text")]
    pub duration: String,
}

/// Package dimensions.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Dimensions {
    #[serde(default, deserialize_with = "lenient_text")]
    pub length: String,
    #[serde(default, deserialize_with = "lenient_text")]
    pub width: String,
    #[serde(default, deserialize_with = "lenient_text")]
    pub height: String,
    #[serde(default = "default_unit")]
    pub unit: String,
}

fn default_unit() -> String {
    "cm".to_string()
}

impl Default for Dimensions {
    fn default() -> Self {
        Self {
            length: String::new(),
            width: String::new(),
            height: String::new(),
            unit: default_unit(),
        }
    }
}

/// Shipping block of the product form.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Shipping {
    #[serde(default, deserialize_with = "lenient_text")]
    pub weight: String,
    #[serde(default)]
    pub dimensions: Dimensions,
    #[serde(default, deserialize_with = "lenient_text")]
    pub delivery_time: String,
    #[serde(default, deserialize_with = "lenient_text")]
    pub return_policy: String,
    #[serde(default, deserialize_with = "lenient_number")]
    pub shipping_charge: f64,
}

// Form values arrive as strings or numbers depending on who saved them.
fn lenient_text<'de, D: Deserializer<'de>>(deserializer: D) -> Result<String, D::Error> {
    Ok(match Value::deserialize(deserializer)? {
        Value::String(s) => s,
        Value::Number(n) => n.to_string(),
        _ => String::new(),
    })
}

fn lenient_number<'de, D: Deserializer<'de>>(deserializer: D) -> Result<f64, D::Error> {
    Ok(number(&Value::deserialize(deserializer)?).unwrap_or(0.0))
}

/// Where a saved draft goes.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SaveTarget {
    /// New product.
    Create,
    /// Existing product.
    Update(ProductId),
}

impl SaveTarget {
    pub fn method(&self) -> &'static str {
        match self {
            SaveTarget::Create => "POST",
            SaveTarget::Update(_) => "PUT",
        }
    }

    /// Path relative to the API base.
    pub fn path(&self) -> String {
        match self {
            SaveTarget::Create => "/api/product".to_string(),
            SaveTarget::Update(id) => format!("/api/product/{}", id),
        }
    }
}

/// The product form.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ProductDraft {
    /// Set when editing an existing product.
    pub id: Option<ProductId>,
    pub name: String,
    pub brand: String,
    pub model: String,
    pub description: String,
    /// List price; `None` while the field is blank.
    pub base_price: Option<f64>,
    pub mrp: Option<f64>,
    pub discount_percentage: f64,
    pub currency: Currency,
    pub availability: String,
    pub category: String,
    pub sub_category: String,
    pub sub_sub_category: String,
    pub sizes: Vec<String>,
    pub warranty: Warranty,
    pub shipping: Shipping,
    pub stock: u64,
    pub is_main: bool,
    /// Variant product ids.
    pub variants: Vec<String>,
    pub views: u64,
    /// Image URLs already stored for the product.
    pub images: Vec<String>,
    /// Video URLs already stored for the product.
    pub videos: Vec<String>,
    pub expiry_date: Option<DateTime<Utc>>,
    pub color: String,
}

impl ProductDraft {
    pub const DEFAULT_AVAILABILITY: &'static str = "In Stock";
    pub const DEFAULT_COLOR: &'static str = "#3b82f6";
    /// Sizes offered by the size picker.
    pub const SIZE_PRESETS: [&'static str; 6] = ["XS", "S", "M", "L", "XL", "XXL"];

    /// An empty form.
    pub fn new() -> Self {
        Self {
            id: None,
            name: String::new(),
            brand: String::new(),
            model: String::new(),
            description: String::new(),
            base_price: None,
            mrp: None,
            discount_percentage: 0.0,
            currency: Currency::INR,
            availability: Self::DEFAULT_AVAILABILITY.to_string(),
            category: String::new(),
            sub_category: String::new(),
            sub_sub_category: String::new(),
            sizes: Vec::new(),
            warranty: Warranty::default(),
            shipping: Shipping::default(),
            stock: 0,
            is_main: false,
            variants: Vec::new(),
            views: 0,
            images: Vec::new(),
            videos: Vec::new(),
            expiry_date: None,
            color: Self::DEFAULT_COLOR.to_string(),
        }
    }

    /// Pre-fill the form from a raw product object.
    ///
    /// Absent or `null` fields keep the form defaults.
    ///
    /// # Errors
    ///
    /// Returns [`CatalogError::InvalidRecord`] if `raw` is not an object.
    pub fn from_value(raw: &Value) -> Result<Self, CatalogError> {
        let obj = raw.as_object().ok_or_else(|| CatalogError::InvalidRecord {
            index: 0,
            reason: format!("expected object, found {}", kind_of(raw)),
        })?;

        let mut draft = Self::new();
        let id = first_id(obj);
        draft.id = (!id.is_empty()).then(|| ProductId::new(id));

        draft.name = text(obj, &["name", "title"]);
        draft.brand = text(obj, &["brand"]);
        draft.model = text(obj, &["model"]);
        draft.description = text(obj, &["description"]);
        draft.category = text(obj, &["category"]);
        draft.sub_category = text(obj, &["subCategory", "subcategory"]);
        draft.sub_sub_category = text(obj, &["subSubCategory"]);

        draft.base_price = listed_price(obj);
        draft.mrp = present(obj, "mrp").and_then(number);
        draft.discount_percentage = discount(obj);
        draft.stock = stock(obj);
        draft.views = present(obj, "views")
            .and_then(number)
            .filter(|v| *v > 0.0)
            .map_or(0, |v| v as u64);
        draft.is_main = obj.get("isMain").and_then(Value::as_bool).unwrap_or(false);

        if let Some(code) = present(obj, "currency").and_then(Value::as_str) {
            match Currency::from_code(code) {
                Some(currency) => draft.currency = currency,
                None => tracing::warn!(code, "unknown currency, keeping default"),
            }
        }
        if let Some(availability) = present(obj, "availability").and_then(Value::as_str) {
            draft.availability = availability.to_string();
        }
        if let Some(color) = present(obj, "color").and_then(Value::as_str) {
            draft.color = color.to_string();
        }

        draft.sizes = string_list(obj.get("sizes"));
        draft.variants = string_list(obj.get("variants"));
        draft.images = string_list(obj.get("images"));
        draft.videos = string_list(obj.get("videos"));
        draft.expiry_date = obj.get("expiryDate").and_then(timestamp);

        if let Some(warranty) = present(obj, "warranty") {
            draft.warranty = nested(warranty, "warranty");
        }
        if let Some(shipping) = present(obj, "shipping") {
            draft.shipping = nested(shipping, "shipping");
        }

        Ok(draft)
    }

    /// Pre-fill the form from the product with `id` in a list payload.
    pub fn from_payload(payload: &Value, id: &ProductId) -> Result<Self, CatalogError> {
        let raw = product_list(payload)?
            .iter()
            .find(|raw| {
                raw.as_object()
                    .is_some_and(|obj| first_id(obj) == id.as_str())
            })
            .ok_or_else(|| CatalogError::ProductNotFound(id.to_string()))?;
        Self::from_value(raw)
    }

    /// Whether saving updates an existing product.
    pub fn is_edit(&self) -> bool {
        self.id.is_some()
    }

    pub fn target(&self) -> SaveTarget {
        match &self.id {
            Some(id) => SaveTarget::Update(id.clone()),
            None => SaveTarget::Create,
        }
    }

    /// Add a size. Blank and already-present sizes are ignored.
    pub fn add_size(&mut self, size: &str) -> bool {
        let size = size.trim();
        if size.is_empty() || self.sizes.iter().any(|s| s == size) {
            return false;
        }
        self.sizes.push(size.to_string());
        true
    }

    /// Remove a size; returns whether it was present.
    pub fn remove_size(&mut self, size: &str) -> bool {
        let before = self.sizes.len();
        self.sizes.retain(|s| s != size);
        self.sizes.len() != before
    }

    /// Drop a subcategory that does not belong to the chosen category.
    pub fn reconcile_categories(&mut self, tree: &CategoryTree) {
        if self.sub_category.is_empty() {
            return;
        }
        if tree
            .reconcile_subcategory(&self.category, &self.sub_category)
            .is_none()
        {
            self.sub_category.clear();
            self.sub_sub_category.clear();
        }
    }

    /// Flat form fields in submission order.
    ///
    /// Numbers are stringified, blank prices become `""`, and nested values
    /// (sizes, variants, warranty, shipping, stored media) are JSON strings.
    pub fn form_fields(&self) -> Result<Vec<(&'static str, String)>, CatalogError> {
        let mut fields = vec![
            ("name", self.name.clone()),
            ("brand", self.brand.clone()),
            ("model", self.model.clone()),
            ("description", self.description.clone()),
            ("basePrice", blank_or(self.base_price)),
            ("mrp", blank_or(self.mrp)),
            ("discountPercentage", self.discount_percentage.to_string()),
            ("currency", self.currency.code().to_string()),
            ("availability", self.availability.clone()),
            ("category", self.category.clone()),
            ("subCategory", self.sub_category.clone()),
            ("subSubCategory", self.sub_sub_category.clone()),
            ("stock", self.stock.to_string()),
            ("isMain", self.is_main.to_string()),
            ("views", self.views.to_string()),
        ];
        if let Some(expiry) = self.expiry_date {
            fields.push((
                "expiryDate",
                expiry.to_rfc3339_opts(SecondsFormat::Millis, true),
            ));
        }
        fields.push(("color", self.color.clone()));
        fields.push(("sizes", serde_json::to_string(&self.sizes)?));
        fields.push(("variants", serde_json::to_string(&self.variants)?));
        fields.push(("warranty", serde_json::to_string(&self.warranty)?));
        fields.push(("shipping", serde_json::to_string(&self.shipping)?));
        if !self.images.is_empty() {
            fields.push(("existingImages", serde_json::to_string(&self.images)?));
        }
        if !self.videos.is_empty() {
            fields.push(("existingVideos", serde_json::to_string(&self.videos)?));
        }
        Ok(fields)
    }
}

impl Default for ProductDraft {
    fn default() -> Self {
        Self::new()
    }
}

fn present<'a>(obj: &'a Map<String, Value>, key: &str) -> Option<&'a Value> {
    obj.get(key).filter(|v| !v.is_null())
}

fn nested<T: Default + for<'de> Deserialize<'de>>(value: &Value, field: &str) -> T {
    serde_json::from_value(value.clone()).unwrap_or_else(|e| {
        tracing::warn!(field, error = %e, "unreadable nested field, using defaults");
        T::default()
    })
}

fn blank_or(value: Option<f64>) -> String {
    value.map(|v| v.to_string()).unwrap_or_default()
}
