//! Ownership reconciliation across `ownership` extensions.

use serde_json::Value;

use super::rules::sub_extension;

/// Allowed distance, in percentage points, between the ownership total and 100.
pub const OWNERSHIP_TOLERANCE: f64 = 0.01;

// Absorbs binary rounding so that 99.99 and 100.01 sit inside the boundary.
const ROUNDING_SLACK: f64 = 1e-9;

/// `|total - 100| <= 0.01`, inclusive at both ends.
pub fn percentages_valid(total: f64) -> bool {
    (total - 100.0).abs() <= OWNERSHIP_TOLERANCE + ROUNDING_SLACK
}

/// Decimal carried by the `percentage` sub-extension, if any.
pub fn declared_percentage(ownership: &Value) -> Option<f64> {
    sub_extension(ownership, "percentage")?
        .get("valueDecimal")?
        .as_f64()
}

fn has_owner_reference(ownership: &Value) -> bool {
    sub_extension(ownership, "owner")
        .and_then(|owner| owner.get("valueReference"))
        .is_some_and(|reference| !reference.is_null())
}

/// Sum of declared percentages. Entries without a usable decimal count as 0.
pub fn ownership_total(ownerships: &[&Value]) -> f64 {
    ownerships
        .iter()
        .fold(0.0, |sum, ownership| sum + declared_percentage(ownership).unwrap_or(0.0))
}

/// Appends the aggregate check followed by the per-extension checks.
///
/// A malformed entry is reported by its own check and also counts as 0 in the
/// aggregate, so both errors can fire for the same extension.
pub fn check_ownership(ownerships: &[&Value], errors: &mut Vec<String>) {
    if ownerships.is_empty() {
        return;
    }

    let total = ownership_total(ownerships);
    if !percentages_valid(total) {
        errors.push(format!(
            "Ownership percentages must sum to 100% (±0.01%), got {total}%"
        ));
    }

    for (index, ownership) in ownerships.iter().enumerate() {
        let position = index + 1;

        if !has_owner_reference(ownership) {
            errors.push(format!(
                "Ownership extension {position} missing owner reference"
            ));
        }

        match declared_percentage(ownership) {
            None => errors.push(format!("Ownership extension {position} missing percentage")),
            Some(percentage) if !(0.0..=100.0).contains(&percentage) => errors.push(format!(
                "Ownership percentage {position} must be between 0 and 100"
            )),
            Some(_) => {}
        }
    }
}
