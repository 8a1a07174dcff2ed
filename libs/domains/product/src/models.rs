use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use uuid::Uuid;
use validator::Validate;

/// Business-rule flags and limits of a product.
///
/// This sub-record is the sole target of update merges; see [`crate::merge`].
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct Condition {
    /// Customer segment the product is aimed at
    #[serde(default)]
    pub customer_type_target: Option<String>,
    /// Whether the product charges a maintenance fee
    #[serde(default)]
    pub has_maintenance_fee: bool,
    /// Whether a monthly transaction cap applies
    #[serde(default)]
    pub has_monthly_transaction_limit: bool,
    /// Whether a daily cap applies within the monthly one
    #[serde(default)]
    pub has_daily_monthly_transaction_limit: bool,
    /// Maximum holdings of this product per natural person
    #[serde(default)]
    pub product_per_person_limit: Option<f64>,
    /// Maximum holdings of this product per business customer
    #[serde(default)]
    pub product_per_business_limit: Option<f64>,
}

/// Product entity as stored in MongoDB.
///
/// `product_name` is the business key, unique among live products; `id` is the
/// internal identifier assigned by the repository at insert time and is never
/// used for client-facing lookups. `id` is `None` only on synthetic fallback
/// values that were never persisted.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct Product {
    /// Unique identifier (stored as _id in MongoDB)
    #[serde(rename = "_id", alias = "id", default, skip_serializing_if = "Option::is_none")]
    pub id: Option<Uuid>,
    /// Business key, unique across live products
    pub product_name: String,
    /// Commercial product type; fallback values carry the error message here
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub product_type: Option<String>,
    /// Business conditions, always present
    #[serde(default)]
    pub condition: Condition,
    /// Creation timestamp
    pub created_at: DateTime<Utc>,
    /// Last update timestamp, refreshed by the repository on persist
    pub updated_at: DateTime<Utc>,
}

/// DTO for creating a new product
#[derive(Debug, Clone, Deserialize, Validate, ToSchema)]
pub struct CreateProduct {
    #[validate(length(min = 1, max = 200))]
    pub product_name: String,
    #[serde(default)]
    pub product_type: Option<String>,
    #[serde(default)]
    pub condition: Condition,
}

/// Partial update payload.
///
/// Only the condition sub-record is mutable through updates; name, type and id
/// are untouched, which this type makes structural.
#[derive(Debug, Clone, Default, Deserialize, ToSchema)]
pub struct UpdateProduct {
    #[serde(default)]
    pub condition: ConditionPatch,
}

/// Field-level patch for [`Condition`].
///
/// Optional fields are applied only when present; the three boolean flags are
/// always applied, so a flag omitted from the payload resets to `false`.
#[derive(Debug, Clone, Default, Deserialize, ToSchema)]
pub struct ConditionPatch {
    #[serde(default)]
    pub customer_type_target: Option<String>,
    #[serde(default)]
    pub has_maintenance_fee: bool,
    #[serde(default)]
    pub has_monthly_transaction_limit: bool,
    #[serde(default)]
    pub has_daily_monthly_transaction_limit: bool,
    #[serde(default)]
    pub product_per_person_limit: Option<f64>,
    #[serde(default)]
    pub product_per_business_limit: Option<f64>,
}

/// Operation result envelope used by the delete path and its fallback.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct Response {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub data: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl Product {
    /// Build a persistable product from the create DTO.
    ///
    /// Called by repository implementations at insert time; this is where the
    /// internal id is assigned.
    pub fn new(input: CreateProduct) -> Self {
        let now = Utc::now();
        Self {
            id: Some(Uuid::now_v7()),
            product_name: input.product_name,
            product_type: input.product_type,
            condition: input.condition,
            created_at: now,
            updated_at: now,
        }
    }

    /// Degraded-mode substitute for a single-product operation.
    ///
    /// Carries the requested name and the triggering error message in
    /// `product_type`; never persisted, `id` stays `None`.
    pub fn fallback(product_name: impl Into<String>, error: impl Into<String>) -> Self {
        let now = Utc::now();
        Self {
            id: None,
            product_name: product_name.into(),
            product_type: Some(error.into()),
            condition: Condition::default(),
            created_at: now,
            updated_at: now,
        }
    }

    /// Sentinel entry for the list fallback: the error message rides in
    /// `product_name` and every other field is empty.
    ///
    /// A list response consisting of exactly one such entry signals degraded
    /// mode, not data — callers must treat it as suspect.
    pub fn sentinel(error: impl Into<String>) -> Self {
        let now = Utc::now();
        Self {
            id: None,
            product_name: error.into(),
            product_type: None,
            condition: Condition::default(),
            created_at: now,
            updated_at: now,
        }
    }
}

impl Response {
    /// Successful outcome carrying a confirmation message.
    pub fn with_data(data: impl Into<String>) -> Self {
        Self {
            data: Some(data.into()),
            error: None,
        }
    }

    /// Degraded outcome: the request subject in `data`, the triggering error
    /// message in `error`.
    pub fn fallback(data: impl Into<String>, error: impl Into<String>) -> Self {
        Self {
            data: Some(data.into()),
            error: Some(error.into()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_assigns_id_and_timestamps() {
        let product = Product::new(CreateProduct {
            product_name: "Savings".to_string(),
            product_type: Some("passive".to_string()),
            condition: Condition::default(),
        });

        assert!(product.id.is_some());
        assert_eq!(product.product_name, "Savings");
        assert_eq!(product.created_at, product.updated_at);
    }

    #[test]
    fn test_fallback_carries_error_in_product_type() {
        let product = Product::fallback("Savings", "store unavailable");
        assert!(product.id.is_none());
        assert_eq!(product.product_name, "Savings");
        assert_eq!(product.product_type.as_deref(), Some("store unavailable"));
    }

    #[test]
    fn test_sentinel_carries_error_in_name() {
        let product = Product::sentinel("no products");
        assert!(product.id.is_none());
        assert_eq!(product.product_name, "no products");
        assert!(product.product_type.is_none());
    }

    #[test]
    fn test_create_product_rejects_empty_name() {
        let input = CreateProduct {
            product_name: String::new(),
            product_type: None,
            condition: Condition::default(),
        };
        assert!(input.validate().is_err());
    }

    #[test]
    fn test_entity_serializes_id_as_underscore_id() {
        let product = Product::new(CreateProduct {
            product_name: "Savings".to_string(),
            product_type: None,
            condition: Condition::default(),
        });

        let value = serde_json::to_value(&product).unwrap();
        assert!(value.get("_id").is_some());
        assert!(value.get("id").is_none());
    }

    #[test]
    fn test_condition_patch_booleans_default_to_false() {
        let patch: ConditionPatch = serde_json::from_str("{}").unwrap();
        assert!(!patch.has_maintenance_fee);
        assert!(!patch.has_monthly_transaction_limit);
        assert!(!patch.has_daily_monthly_transaction_limit);
        assert!(patch.customer_type_target.is_none());
    }
}
