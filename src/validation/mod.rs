//! EQDS business-rule validation.
//!
//! Two presentations of the same rule set are offered:
//!
//! - [`validate_business_rules`] accumulates every failed check into an itemized
//!   [`ValidationReport`] and never fails.
//! - [`assert_eqds_patient`] short-circuits on structural problems and otherwise
//!   fails with all business-rule errors joined into one message.
//!   [`validate_eqds_patient`] wraps it into a report with at most one error.

pub mod ownership;
pub mod rules;

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::error::{EqdsError, Result};

pub use ownership::{OWNERSHIP_TOLERANCE, ownership_total, percentages_valid};
pub use rules::{declares_eqds_profile, is_horse_species, validate_business_rules};

/// Verdict of a validation run.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ValidationReport {
    /// True iff `errors` is empty.
    pub valid: bool,

    /// Human-readable messages in check order.
    pub errors: Vec<String>,
}

impl ValidationReport {
    pub fn from_errors(errors: Vec<String>) -> Self {
        Self {
            valid: errors.is_empty(),
            errors,
        }
    }

    pub fn success() -> Self {
        Self::from_errors(Vec::new())
    }

    pub fn error(message: impl Into<String>) -> Self {
        Self::from_errors(vec![message.into()])
    }
}

/// A way of turning an untyped record into a verdict.
pub trait ValidationEngine {
    fn validate_resource(&self, resource: &Value) -> ValidationReport;
}

/// Itemized business-rule validation.
#[derive(Debug, Default, Clone, Copy)]
pub struct BusinessRuleValidator;

impl ValidationEngine for BusinessRuleValidator {
    fn validate_resource(&self, resource: &Value) -> ValidationReport {
        validate_business_rules(resource)
    }
}

/// Strict validation collapsed into a single-message report.
#[derive(Debug, Default, Clone, Copy)]
pub struct StrictValidator;

impl ValidationEngine for StrictValidator {
    fn validate_resource(&self, resource: &Value) -> ValidationReport {
        validate_eqds_patient(resource)
    }
}

fn describe_resource_type(resource_type: Option<&Value>) -> String {
    match resource_type {
        None | Some(Value::Null) => "none".to_string(),
        Some(Value::String(name)) => name.clone(),
        Some(other) => other.to_string(),
    }
}

/// Fails unless `value` is an EQDS Patient.
///
/// Non-objects and non-Patient resources are rejected before any business rule runs.
pub fn assert_eqds_patient(value: &Value) -> Result<()> {
    let Some(resource) = value.as_object() else {
        return Err(EqdsError::validation("Object is not a valid FHIR resource"));
    };

    let resource_type = resource.get("resourceType");
    if resource_type.and_then(Value::as_str) != Some("Patient") {
        return Err(EqdsError::validation(format!(
            "Expected resourceType 'Patient', got '{}'",
            describe_resource_type(resource_type)
        )));
    }

    let report = validate_business_rules(value);
    if !report.valid {
        return Err(EqdsError::validation(format!(
            "EQDS validation failed: {}",
            report.errors.join(", ")
        )));
    }

    Ok(())
}

/// Non-failing form of [`assert_eqds_patient`].
pub fn validate_eqds_patient(value: &Value) -> ValidationReport {
    match assert_eqds_patient(value) {
        Ok(()) => ValidationReport::success(),
        Err(err) => ValidationReport::error(err.to_string()),
    }
}

/// Schema-level validation entry point. Currently the EQDS business rules.
pub fn validate_patient_schema(value: &Value) -> ValidationReport {
    validate_eqds_patient(value)
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_report_validity_follows_errors() {
        assert!(ValidationReport::success().valid);
        assert!(!ValidationReport::error("boom").valid);
        assert!(!ValidationReport::from_errors(vec!["a".into(), "b".into()]).valid);
    }

    #[test]
    fn test_report_wire_shape() {
        let report = ValidationReport::error("boom");
        assert_eq!(
            serde_json::to_value(&report).unwrap(),
            json!({"valid": false, "errors": ["boom"]})
        );
    }

    #[test]
    fn test_strict_rejects_non_objects() {
        for value in [json!(null), json!(42), json!("Patient"), json!([])] {
            let err = assert_eqds_patient(&value).unwrap_err();
            assert_eq!(err.to_string(), "Object is not a valid FHIR resource");
        }
    }

    #[test]
    fn test_strict_reports_found_resource_type() {
        let err = assert_eqds_patient(&json!({"resourceType": "Observation"})).unwrap_err();
        assert_eq!(
            err.to_string(),
            "Expected resourceType 'Patient', got 'Observation'"
        );

        let err = assert_eqds_patient(&json!({})).unwrap_err();
        assert_eq!(err.to_string(), "Expected resourceType 'Patient', got 'none'");
    }

    #[test]
    fn test_engines_differ_in_presentation() {
        let record = json!({"resourceType": "Patient"});
        let itemized = BusinessRuleValidator.validate_resource(&record);
        let strict = StrictValidator.validate_resource(&record);
        assert!(itemized.errors.len() > 1);
        assert_eq!(strict.errors.len(), 1);
        assert!(strict.errors[0].starts_with("EQDS validation failed: "));
    }
}
