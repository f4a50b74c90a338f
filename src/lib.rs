//! # EQDS FHIR
//!
//! Typed FHIR `Patient` resources for the Equine Data Standard (EQDS), the
//! EQDS business-rule validator, and a generator that turns EQDS profile
//! pages into JSON Schema documents.
//!
//! ## Features
//!
//! - **Validation**: itemized and strict checks of untyped JSON records against
//!   the EQDS rules (species, sex and breed codings, profile, ownership shares)
//! - **Construction**: build well-formed EQDS patients from plain parameters
//! - **Schema generation**: convert Jekyll-wrapped StructureDefinitions to JSON Schema
//!
//! ## Quick Start
//!
//! ```rust
//! use eqds_fhir::*;
//!
//! # fn example() -> Result<()> {
//! let patient = create_test_patient("horse-1", EquineSex::Mare, Some(BreedCode::Arabian))?;
//! let report = validate_business_rules(&patient.to_value()?);
//! assert!(report.valid);
//!
//! let report = validate_eqds_patient(&serde_json::json!({ "resourceType": "Patient" }));
//! assert!(!report.valid);
//! # Ok(())
//! # }
//! # example().unwrap();
//! ```

pub mod config;
pub mod converter;
pub mod error;
pub mod patient;
pub mod types;
pub mod validation;

pub use config::{GeneratorConfig, OutputFormat};
pub use converter::{
    FhirProfile, GenerationSummary, JsonSchema, SchemaGenerator, convert_to_json_schema,
    parse_jekyll,
};
pub use error::{EqdsError, Result};
pub use patient::*;
pub use types::*;
pub use validation::{
    BusinessRuleValidator, StrictValidator, ValidationEngine, ValidationReport,
    assert_eqds_patient, declares_eqds_profile, is_horse_species, percentages_valid,
    validate_business_rules, validate_eqds_patient, validate_patient_schema,
};
