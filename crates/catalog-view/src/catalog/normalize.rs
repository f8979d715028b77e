//! Normalization from raw product API payloads to [`ProductRecord`].
//!
//! The product API is loosely typed: lists arrive bare or wrapped in
//! `{ products }` / `{ data }`, prices and discounts have legacy synonyms,
//! and numbers sometimes arrive as strings. Everything is folded into the
//! canonical shape here, once, so nothing downstream inspects raw JSON.

use chrono::{DateTime, NaiveDate, NaiveDateTime, TimeZone, Utc};
use serde_json::{Map, Value};

use crate::catalog::ProductRecord;
use crate::error::CatalogError;
use crate::ids::ProductId;

/// Wrapper keys that may hold the product list, in precedence order.
const LIST_KEYS: [&str; 2] = ["products", "data"];

/// Wrapper keys that may hold a single product, in precedence order.
const SINGLE_KEYS: [&str; 2] = ["product", "data"];

/// Normalizes one raw product object.
///
/// # Errors
///
/// Returns [`CatalogError::InvalidRecord`] if `raw` is not a JSON object.
/// Field-level problems never fail; they degrade to defaults.
pub fn normalize_product(raw: &Value) -> Result<ProductRecord, CatalogError> {
    normalize_at(raw, 0)
}

fn normalize_at(raw: &Value, index: usize) -> Result<ProductRecord, CatalogError> {
    let obj = raw.as_object().ok_or_else(|| CatalogError::InvalidRecord {
        index,
        reason: format!("expected object, found {}", kind_of(raw)),
    })?;

    Ok(ProductRecord {
        id: ProductId::new(first_id(obj)),
        name: text(obj, &["name", "title"]),
        brand: text(obj, &["brand"]),
        model: text(obj, &["model"]),
        description: text(obj, &["description"]),
        category: text(obj, &["category"]),
        sub_category: text(obj, &["subCategory", "subcategory"]),
        sub_sub_category: text(obj, &["subSubCategory"]),
        base_price: price(obj),
        discount_percentage: discount(obj),
        stock: stock(obj),
        created_at: obj.get("createdAt").and_then(timestamp),
        updated_at: obj.get("updatedAt").and_then(timestamp),
        images: images(obj),
        sizes: string_list(obj.get("sizes")),
        is_main: obj.get("isMain").and_then(Value::as_bool).unwrap_or(false),
    })
}

/// Normalizes a product list payload.
///
/// Accepts a bare array or an object wrapping the array under `products`
/// or `data`. Entries that are not objects are skipped with a warning.
///
/// # Errors
///
/// Returns [`CatalogError::UnexpectedShape`] if no product list can be found.
pub fn normalize_payload(payload: &Value) -> Result<Vec<ProductRecord>, CatalogError> {
    let list = product_list(payload)?;

    let mut products = Vec::with_capacity(list.len());
    for (index, raw) in list.iter().enumerate() {
        match normalize_at(raw, index) {
            Ok(product) => products.push(product),
            Err(e) => tracing::warn!(error = %e, "skipping product record"),
        }
    }

    tracing::debug!(
        received = list.len(),
        kept = products.len(),
        "normalized product payload"
    );
    Ok(products)
}

/// Locates the product array inside a list payload.
pub(crate) fn product_list(payload: &Value) -> Result<&Vec<Value>, CatalogError> {
    match payload {
        Value::Array(items) => Ok(items),
        Value::Object(obj) => LIST_KEYS
            .iter()
            .find_map(|key| obj.get(*key).and_then(Value::as_array))
            .ok_or_else(|| {
                CatalogError::UnexpectedShape(
                    "object without a `products` or `data` array".to_string(),
                )
            }),
        other => Err(CatalogError::UnexpectedShape(format!(
            "expected array or object, found {}",
            kind_of(other)
        ))),
    }
}

/// Parses and normalizes a product list from JSON text.
pub fn parse_products(json: &str) -> Result<Vec<ProductRecord>, CatalogError> {
    let value: Value = serde_json::from_str(json)?;
    normalize_payload(&value)
}

/// Normalizes a single-product payload (`{...}`, `{ product }` or `{ data }`).
pub fn normalize_single(payload: &Value) -> Result<ProductRecord, CatalogError> {
    let inner = payload
        .as_object()
        .and_then(|obj| {
            SINGLE_KEYS
                .iter()
                .find_map(|key| obj.get(*key).filter(|v| v.is_object()))
        })
        .unwrap_or(payload);
    normalize_product(inner)
}

pub(crate) fn first_id(obj: &Map<String, Value>) -> String {
    ["_id", "id"]
        .iter()
        .find_map(|key| match obj.get(*key) {
            Some(Value::String(s)) => Some(s.clone()),
            Some(Value::Number(n)) => Some(n.to_string()),
            _ => None,
        })
        .unwrap_or_default()
}

pub(crate) fn text(obj: &Map<String, Value>, keys: &[&str]) -> String {
    keys.iter()
        .find_map(|key| obj.get(*key).and_then(Value::as_str))
        .unwrap_or_default()
        .to_string()
}

/// Lenient numeric read: JSON numbers and numeric strings.
pub(crate) fn number(value: &Value) -> Option<f64> {
    let n = match value {
        Value::Number(n) => n.as_f64(),
        Value::String(s) => s.trim().parse::<f64>().ok(),
        _ => None,
    }?;
    n.is_finite().then_some(n)
}

fn price(obj: &Map<String, Value>) -> f64 {
    listed_price(obj).unwrap_or(0.0)
}

// First non-null synonym wins, even when it does not parse.
pub(crate) fn listed_price(obj: &Map<String, Value>) -> Option<f64> {
    ["basePrice", "price"]
        .iter()
        .find_map(|key| obj.get(*key).filter(|v| !v.is_null()))
        .and_then(number)
        .filter(|p| *p >= 0.0)
}

// Only a JSON number counts; a string discount falls through to the synonym.
pub(crate) fn discount(obj: &Map<String, Value>) -> f64 {
    ["discountPercentage", "discount"]
        .iter()
        .find_map(|key| obj.get(*key).and_then(Value::as_f64))
        .filter(|d| d.is_finite())
        .unwrap_or(0.0)
}

// Any positive amount is in stock, so fractions round up.
pub(crate) fn stock(obj: &Map<String, Value>) -> u64 {
    match obj.get("stock").and_then(number) {
        Some(n) if n > 0.0 => n.ceil() as u64,
        _ => 0,
    }
}

fn images(obj: &Map<String, Value>) -> Vec<String> {
    let list = string_list(obj.get("images"));
    if !list.is_empty() {
        return list;
    }
    obj.get("image")
        .and_then(Value::as_str)
        .filter(|s| !s.is_empty())
        .map(|s| vec![s.to_string()])
        .unwrap_or_default()
}

pub(crate) fn string_list(value: Option<&Value>) -> Vec<String> {
    value
        .and_then(Value::as_array)
        .map(|items| {
            items
                .iter()
                .filter_map(Value::as_str)
                .map(str::to_string)
                .collect()
        })
        .unwrap_or_default()
}

/// Parses the timestamp formats the API has been seen to emit.
pub(crate) fn timestamp(value: &Value) -> Option<DateTime<Utc>> {
    match value {
        Value::String(s) => parse_timestamp(s),
        Value::Number(n) => n
            .as_i64()
            .and_then(|ms| Utc.timestamp_millis_opt(ms).single()),
        _ => None,
    }
}

pub(crate) fn parse_timestamp(s: &str) -> Option<DateTime<Utc>> {
    let s = s.trim();
    if let Ok(dt) = DateTime::parse_from_rfc3339(s) {
        return Some(dt.with_timezone(&Utc));
    }
    if let Ok(naive) = NaiveDateTime::parse_from_str(s, "%Y-%m-%dT%H:%M:%S%.f") {
        return Some(naive.and_utc());
    }
    NaiveDate::parse_from_str(s, "%Y-%m-%d")
        .ok()
        .and_then(|d| d.and_hms_opt(0, 0, 0))
        .map(|naive| naive.and_utc())
}

pub(crate) fn kind_of(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "boolean",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}
