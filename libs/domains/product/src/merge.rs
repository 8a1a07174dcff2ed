//! Field-level conditional merge of a partial payload into a stored product.

use crate::models::{Condition, ConditionPatch, Product, UpdateProduct};

/// Compute the updated product state from the stored record and a patch.
///
/// Pure: only the condition sub-record changes. Name, type, id and timestamps
/// pass through untouched (`updated_at` is refreshed by the repository on
/// persist, not here). Nothing is written until the caller persists the
/// returned value, so a cancelled request can never leave a partial merge
/// behind.
pub fn merge(existing: &Product, payload: &UpdateProduct) -> Product {
    let mut merged = existing.clone();
    merged.condition = merge_condition(&existing.condition, &payload.condition);
    merged
}

/// Apply the patch rules field by field:
/// optional fields overwrite only when present, boolean flags always overwrite.
fn merge_condition(existing: &Condition, patch: &ConditionPatch) -> Condition {
    Condition {
        customer_type_target: patch
            .customer_type_target
            .clone()
            .or_else(|| existing.customer_type_target.clone()),
        has_maintenance_fee: patch.has_maintenance_fee,
        has_monthly_transaction_limit: patch.has_monthly_transaction_limit,
        has_daily_monthly_transaction_limit: patch.has_daily_monthly_transaction_limit,
        product_per_person_limit: patch
            .product_per_person_limit
            .or(existing.product_per_person_limit),
        product_per_business_limit: patch
            .product_per_business_limit
            .or(existing.product_per_business_limit),
    }
}
