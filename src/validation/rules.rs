//! EQDS business rules over untyped Patient records.

use serde_json::Value;

use super::ValidationReport;
use super::ownership::check_ownership;
use crate::types::{
    EQUINE_SEX_CODES, ExtensionKind, HORSE_SPECIES_CODE, HORSE_SPECIES_SYSTEM, urls,
};

/// The extensions the rules look at, located once per record.
struct ExtensionIndex<'a> {
    /// First animal extension by url.
    animal: Option<&'a Value>,
    ownership: Vec<&'a Value>,
}

impl<'a> ExtensionIndex<'a> {
    fn of(record: &'a Value) -> Self {
        let mut index = ExtensionIndex {
            animal: None,
            ownership: Vec::new(),
        };

        for extension in extensions(record) {
            match ExtensionKind::of(extension) {
                ExtensionKind::Animal => {
                    if index.animal.is_none() {
                        index.animal = Some(extension);
                    }
                }
                ExtensionKind::Ownership => index.ownership.push(extension),
                ExtensionKind::Color | ExtensionKind::Breeding | ExtensionKind::Other => {}
            }
        }

        index
    }
}

/// `extension` as a slice; anything that is not an array reads as empty.
fn extensions(record: &Value) -> &[Value] {
    record
        .get("extension")
        .and_then(Value::as_array)
        .map(Vec::as_slice)
        .unwrap_or(&[])
}

/// First nested extension whose `url` equals `url`.
pub(crate) fn sub_extension<'a>(extension: &'a Value, url: &str) -> Option<&'a Value> {
    extension
        .get("extension")?
        .as_array()?
        .iter()
        .find(|sub| sub.get("url").and_then(Value::as_str) == Some(url))
}

/// `valueCodeableConcept.coding[0]` of a sub-extension.
fn primary_coding(sub: &Value) -> Option<&Value> {
    sub.get("valueCodeableConcept")?
        .get("coding")?
        .as_array()?
        .first()
}

fn str_field<'a>(value: &'a Value, key: &str) -> Option<&'a str> {
    value.get(key).and_then(Value::as_str)
}

fn is_non_empty_array(value: Option<&Value>) -> bool {
    value
        .and_then(Value::as_array)
        .is_some_and(|items| !items.is_empty())
}

fn species_matches(animal: &Value) -> bool {
    let Some(coding) = sub_extension(animal, "species").and_then(primary_coding) else {
        return false;
    };
    str_field(coding, "system") == Some(HORSE_SPECIES_SYSTEM)
        && str_field(coding, "code") == Some(HORSE_SPECIES_CODE)
}

/// True when the first species coding of the animal extension is the SNOMED horse code.
pub fn is_horse_species(record: &Value) -> bool {
    ExtensionIndex::of(record)
        .animal
        .is_some_and(species_matches)
}

/// True when `meta.profile` lists the EQDS patient profile.
pub fn declares_eqds_profile(record: &Value) -> bool {
    record
        .get("meta")
        .and_then(|meta| meta.get("profile"))
        .and_then(Value::as_array)
        .is_some_and(|profiles| {
            profiles
                .iter()
                .any(|profile| profile.as_str() == Some(urls::PROFILE_PATIENT))
        })
}

fn check_animal(animal: &Value, errors: &mut Vec<String>) {
    match sub_extension(animal, "genderStatus") {
        None => errors.push("Animal extension must include genderStatus".to_string()),
        Some(gender_status) => {
            let coding = primary_coding(gender_status);

            if coding.and_then(|c| str_field(c, "system")) != Some(urls::CODESYSTEM_SEX) {
                errors.push("Gender status must use EQDS equine sex code system".to_string());
            }

            let code = coding.and_then(|c| str_field(c, "code"));
            if !code.is_some_and(|code| EQUINE_SEX_CODES.contains(&code)) {
                errors.push(format!(
                    "Invalid equine sex code: {}. Must be one of: {}",
                    code.unwrap_or("<missing>"),
                    EQUINE_SEX_CODES.join(", ")
                ));
            }
        }
    }

    if let Some(breed) = sub_extension(animal, "breed").and_then(primary_coding) {
        if str_field(breed, "system") != Some(urls::CODESYSTEM_BREED) {
            errors.push("Breed must use EQDS breed code system".to_string());
        }
    }
}

/// Runs every EQDS rule and collects one message per failed check, in rule order.
pub fn validate_business_rules(record: &Value) -> ValidationReport {
    let mut errors = Vec::new();

    if str_field(record, "resourceType") != Some("Patient") {
        errors.push("Resource must be of type 'Patient'".to_string());
    }

    if !declares_eqds_profile(record) {
        errors.push(format!(
            "Patient must declare EQDS profile: {}",
            urls::PROFILE_PATIENT
        ));
    }

    if !str_field(record, "id").is_some_and(|id| !id.is_empty()) {
        errors.push("Patient must have a valid id".to_string());
    }

    if !is_non_empty_array(record.get("identifier")) {
        errors.push("Patient must have at least one identifier".to_string());
    }

    if !is_non_empty_array(record.get("name")) {
        errors.push("Patient must have at least one name".to_string());
    }

    if !record.get("extension").is_some_and(Value::is_array) {
        errors.push("Patient must have extensions array".to_string());
    }

    let index = ExtensionIndex::of(record);

    if !index.animal.is_some_and(species_matches) {
        errors.push(format!("Species must be Horse (SNOMED: {HORSE_SPECIES_CODE})"));
    }

    match index.animal {
        None => errors.push("Patient must have animal extension".to_string()),
        Some(animal) => check_animal(animal, &mut errors),
    }

    check_ownership(&index.ownership, &mut errors);

    let report = ValidationReport::from_errors(errors);
    tracing::debug!(
        "EQDS business rules evaluated: valid={}, errors={}",
        report.valid,
        report.errors.len()
    );
    report
}
