//! Customer accounts as listed in the console.

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::catalog::normalize::{first_id, kind_of, text};
use crate::error::CatalogError;
use crate::ids::CustomerId;

/// One customer row.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Customer {
    pub id: CustomerId,
    pub name: String,
    pub email: String,
    /// `None` when the account has no phone number.
    pub phone: Option<String>,
    /// Account role, [`Customer::DEFAULT_ROLE`] when the API sends none.
    pub role: String,
}

impl Customer {
    pub const DEFAULT_ROLE: &'static str = "customer";

    pub fn new(id: impl Into<CustomerId>, name: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            role: Self::DEFAULT_ROLE.to_string(),
            ..Default::default()
        }
    }

    fn from_raw(raw: &Value, index: usize) -> Result<Self, CatalogError> {
        let obj = raw.as_object().ok_or_else(|| CatalogError::InvalidRecord {
            index,
            reason: format!("expected object, found {}", kind_of(raw)),
        })?;

        let phone = text(obj, &["phone"]);
        let role = text(obj, &["role"]);
        Ok(Self {
            id: CustomerId::new(first_id(obj)),
            name: text(obj, &["name"]),
            email: text(obj, &["email"]),
            phone: (!phone.is_empty()).then_some(phone),
            role: if role.is_empty() {
                Self::DEFAULT_ROLE.to_string()
            } else {
                role
            },
        })
    }
}

/// Normalizes a customer payload.
///
/// Accepts a bare array, `{ user }` holding one account, or `{ data }`
/// holding a list. An object with neither key is an empty list. Entries
/// that are not objects are skipped with a warning.
///
/// # Errors
///
/// Returns [`CatalogError::UnexpectedShape`] for scalar payloads.
pub fn normalize_customers(payload: &Value) -> Result<Vec<Customer>, CatalogError> {
    let entries: Vec<&Value> = match payload {
        Value::Array(items) => items.iter().collect(),
        Value::Object(obj) => match (obj.get("user"), obj.get("data")) {
            (Some(user), _) if user.is_object() => vec![user],
            (_, Some(Value::Array(items))) => items.iter().collect(),
            (_, Some(data)) if data.is_object() => vec![data],
            _ => {
                tracing::debug!("customer payload without `user` or `data`");
                Vec::new()
            }
        },
        other => {
            return Err(CatalogError::UnexpectedShape(format!(
                "expected array or object, found {}",
                kind_of(other)
            )))
        }
    };

    let customers: Vec<Customer> = entries
        .into_iter()
        .enumerate()
        .filter_map(|(index, raw)| {
            Customer::from_raw(raw, index)
                .map_err(|e| tracing::warn!(error = %e, "skipping customer record"))
                .ok()
        })
        .collect();

    tracing::debug!(kept = customers.len(), "normalized customer payload");
    Ok(customers)
}

/// Parses and normalizes a customer payload from JSON text.
pub fn parse_customers(json: &str) -> Result<Vec<Customer>, CatalogError> {
    let value: Value = serde_json::from_str(json)?;
    normalize_customers(&value)
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_bare_array() {
        let customers = normalize_customers(&json!([
            { "_id": "u1", "name": "Asha", "email": "asha@example.com", "phone": "99999", "role": "admin" },
            { "_id": "u2", "name": "Ravi", "email": "ravi@example.com" }
        ]))
        .unwrap();

        assert_eq!(customers.len(), 2);
        assert_eq!(customers[0].id.as_str(), "u1");
        assert_eq!(customers[0].phone.as_deref(), Some("99999"));
        assert_eq!(customers[0].role, "admin");
        assert_eq!(customers[1].phone, None);
        assert_eq!(customers[1].role, "customer");
    }

    #[test]
    fn test_single_user_wrapper() {
        let customers =
            normalize_customers(&json!({ "user": { "_id": "u1", "name": "Asha" } })).unwrap();
        assert_eq!(customers, vec![Customer::new("u1", "Asha")]);
    }

    #[test]
    fn test_data_wrapper() {
        let customers = normalize_customers(&json!({ "data": [
            { "_id": "u1", "name": "Asha", "role": "" },
            { "_id": "u2", "name": "Ravi" },
            { "_id": "u3", "name": "Mei" }
        ]}))
        .unwrap();
        assert_eq!(customers.len(), 3);
        assert!(customers.iter().all(|c| c.role == Customer::DEFAULT_ROLE));
    }

    #[test]
    fn test_user_takes_precedence_over_data() {
        let customers = normalize_customers(&json!({
            "user": { "_id": "u1", "name": "Asha" },
            "data": [{ "_id": "u2" }, { "_id": "u3" }]
        }))
        .unwrap();
        assert_eq!(customers.len(), 1);
        assert_eq!(customers[0].name, "Asha");
    }

    #[test]
    fn test_unknown_object_is_empty() {
        assert!(normalize_customers(&json!({ "message": "ok" })).unwrap().is_empty());
        assert!(normalize_customers(&json!({ "user": null })).unwrap().is_empty());
    }

    #[test]
    fn test_scalar_payload_is_rejected() {
        assert!(matches!(
            normalize_customers(&json!("nope")),
            Err(CatalogError::UnexpectedShape(_))
        ));
    }

    #[test]
    fn test_non_objects_are_skipped() {
        let customers = normalize_customers(&json!([{ "name": "A" }, 3, null])).unwrap();
        assert_eq!(customers.len(), 1);
    }

    #[test]
    fn test_parse_customers() {
        let customers = parse_customers(r#"{"user": {"_id": "u9", "email": "x@y.io"}}"#).unwrap();
        assert_eq!(customers[0].email, "x@y.io");
        assert!(parse_customers("<html>").is_err());
    }
}
