mod common;

use common::*;
use eqds_fhir::*;
use pretty_assertions::assert_eq;
use serde_json::json;

const SEX_CODE_LIST: &str = "mare, stallion, gelding, colt, filly";

#[test]
fn test_valid_patient_with_two_owners() {
    let report = validate_business_rules(&valid_patient());
    assert_eq!(report, ValidationReport::success());
}

#[test]
fn test_ownership_short_of_100() {
    let report = validate_business_rules(&patient_with_owners(&[60.0, 25.0]));
    assert_eq!(
        report.errors,
        vec!["Ownership percentages must sum to 100% (±0.01%), got 85%"]
    );
    assert!(report.errors[0].contains("100%") && report.errors[0].contains("85"));
}

#[test]
fn test_empty_object_golden_errors() {
    let report = validate_business_rules(&json!({}));
    assert!(!report.valid);
    assert_eq!(
        report.errors,
        vec![
            "Resource must be of type 'Patient'",
            "Patient must declare EQDS profile: https://eqds.org/StructureDefinition/equine-patient",
            "Patient must have a valid id",
            "Patient must have at least one identifier",
            "Patient must have at least one name",
            "Patient must have extensions array",
            "Species must be Horse (SNOMED: 35354009)",
            "Patient must have animal extension",
        ]
    );
}

#[test]
fn test_errors_accumulate() {
    let mut record = valid_patient();
    record["resourceType"] = json!("Horse");
    record.as_object_mut().unwrap().remove("id");
    record.as_object_mut().unwrap().remove("name");

    let report = validate_business_rules(&record);
    assert_eq!(
        report.errors,
        vec![
            "Resource must be of type 'Patient'",
            "Patient must have a valid id",
            "Patient must have at least one name",
        ]
    );
}

#[test]
fn test_empty_id_is_invalid() {
    let mut record = valid_patient();
    record["id"] = json!("");
    assert_eq!(
        validate_business_rules(&record).errors,
        vec!["Patient must have a valid id"]
    );

    record["id"] = json!(42);
    assert_eq!(
        validate_business_rules(&record).errors,
        vec!["Patient must have a valid id"]
    );
}

#[test]
fn test_empty_identifier_and_name_arrays() {
    let mut record = valid_patient();
    record["identifier"] = json!([]);
    record["name"] = json!({"text": "not an array"});
    assert_eq!(
        validate_business_rules(&record).errors,
        vec![
            "Patient must have at least one identifier",
            "Patient must have at least one name",
        ]
    );
}

#[test]
fn test_gender_code_outside_enumeration() {
    for code in ["pony", "Mare", "", "male"] {
        let mut record = valid_patient();
        record["extension"][0] = animal_extension(vec![horse_coding()], code);

        let report = validate_business_rules(&record);
        assert_eq!(
            report.errors,
            vec![format!(
                "Invalid equine sex code: {code}. Must be one of: {SEX_CODE_LIST}"
            )]
        );
    }
}

#[test]
fn test_every_sex_code_is_accepted() {
    for code in EQUINE_SEX_CODES {
        let mut record = valid_patient();
        record["extension"][0] = animal_extension(vec![horse_coding()], code);
        assert!(validate_business_rules(&record).valid, "{code}");
    }
}

#[test]
fn test_gender_status_wrong_system() {
    let mut record = valid_patient();
    record["extension"][0]["extension"][1]["valueCodeableConcept"]["coding"][0]["system"] =
        json!("http://example.org/sex");
    assert_eq!(
        validate_business_rules(&record).errors,
        vec!["Gender status must use EQDS equine sex code system"]
    );
}

#[test]
fn test_missing_gender_status() {
    let mut record = valid_patient();
    record["extension"][0]["extension"]
        .as_array_mut()
        .unwrap()
        .remove(1);
    assert_eq!(
        validate_business_rules(&record).errors,
        vec!["Animal extension must include genderStatus"]
    );
}

#[test]
fn test_breed_wrong_system() {
    let mut record = valid_patient();
    record["extension"][0]["extension"]
        .as_array_mut()
        .unwrap()
        .push(json!({"url": "breed", "valueCodeableConcept": {"coding": [
            {"system": "http://example.org/breeds", "code": "QH", "display": "Quarter Horse"}
        ]}}));
    assert_eq!(
        validate_business_rules(&record).errors,
        vec!["Breed must use EQDS breed code system"]
    );
}

#[test]
fn test_species_horse_at_index_one_fails() {
    let mut record = valid_patient();
    let cat = json!({"system": "http://snomed.info/sct", "code": "448169003", "display": "Cat"});
    record["extension"][0] = animal_extension(vec![cat, horse_coding()], "mare");

    assert!(!is_horse_species(&record));
    assert_eq!(
        validate_business_rules(&record).errors,
        vec!["Species must be Horse (SNOMED: 35354009)"]
    );
}

#[test]
fn test_missing_species_is_reported_as_mismatch() {
    let mut record = valid_patient();
    record["extension"][0]["extension"]
        .as_array_mut()
        .unwrap()
        .remove(0);
    assert_eq!(
        validate_business_rules(&record).errors,
        vec!["Species must be Horse (SNOMED: 35354009)"]
    );
}

#[test]
fn test_no_ownership_extensions_is_valid() {
    let report = validate_business_rules(&patient_with_owners(&[]));
    assert!(report.valid);
}

#[test]
fn test_ownership_tolerance_boundaries() {
    assert!(validate_business_rules(&patient_with_owners(&[60.0, 39.99])).valid);
    assert!(validate_business_rules(&patient_with_owners(&[60.0, 40.01])).valid);
    assert!(!validate_business_rules(&patient_with_owners(&[60.0, 39.98])).valid);
    assert!(!validate_business_rules(&patient_with_owners(&[60.0, 40.02])).valid);
}

#[test]
fn test_malformed_ownership_is_reported_per_extension() {
    let mut record = patient_with_owners(&[100.0]);
    record["extension"]
        .as_array_mut()
        .unwrap()
        .push(json!({"url": urls::EXTENSION_OWNERSHIP, "extension": []}));

    assert_eq!(
        validate_business_rules(&record).errors,
        vec![
            "Ownership extension 2 missing owner reference",
            "Ownership extension 2 missing percentage",
        ]
    );
}

#[test]
fn test_out_of_range_percentage_skews_total() {
    let record = patient_with_owners(&[-20.0, 120.0]);
    assert_eq!(
        validate_business_rules(&record).errors,
        vec![
            "Ownership percentage 1 must be between 0 and 100",
            "Ownership percentage 2 must be between 0 and 100",
        ]
    );
}

#[test]
fn test_unknown_extensions_are_ignored() {
    let mut record = valid_patient();
    record["extension"]
        .as_array_mut()
        .unwrap()
        .push(json!({"url": "http://example.org/fhir/tattoo", "valueString": "A123"}));
    assert!(validate_business_rules(&record).valid);
}

#[test]
fn test_validation_is_idempotent() {
    let record = json!({"resourceType": "Patient", "extension": [{"url": urls::EXTENSION_OWNERSHIP}]});
    let first = validate_business_rules(&record);
    let second = validate_business_rules(&record);
    assert_eq!(first, second);
}

#[test]
fn test_strict_passes_valid_patient() {
    assert!(assert_eqds_patient(&valid_patient()).is_ok());
    assert_eq!(validate_eqds_patient(&valid_patient()), ValidationReport::success());
}

#[test]
fn test_strict_joins_business_errors() {
    let record = json!({
        "resourceType": "Patient",
        "id": "no-extensions",
        "identifier": [{"value": "test"}],
        "name": [{"text": "Test"}]
    });

    let report = validate_eqds_patient(&record);
    assert_eq!(
        report.errors,
        vec![
            "EQDS validation failed: \
             Patient must declare EQDS profile: https://eqds.org/StructureDefinition/equine-patient, \
             Patient must have extensions array, \
             Species must be Horse (SNOMED: 35354009), \
             Patient must have animal extension"
        ]
    );

    let itemized = validate_business_rules(&record);
    assert_eq!(itemized.errors.len(), 4);
    assert!(itemized.errors.contains(&"Patient must have extensions array".to_string()));
}

#[test]
fn test_strict_short_circuits_on_resource_type() {
    let report = validate_eqds_patient(&json!({"resourceType": "Observation", "id": ""}));
    assert_eq!(
        report.errors,
        vec!["Expected resourceType 'Patient', got 'Observation'"]
    );

    let report = validate_eqds_patient(&json!([valid_patient()]));
    assert_eq!(report.errors, vec!["Object is not a valid FHIR resource"]);
}

#[test]
fn test_schema_validation_delegates_to_strict() {
    let record = json!({"resourceType": "Patient"});
    assert_eq!(validate_patient_schema(&record), validate_eqds_patient(&record));
}

#[test]
fn test_profile_removed_from_built_patient() {
    let mut patient = create_test_patient("profile-test", EquineSex::Stallion, None)
        .unwrap()
        .to_value()
        .unwrap();
    patient["meta"]["profile"] = json!([]);

    let report = validate_eqds_patient(&patient);
    assert!(!report.valid);
    assert!(report.errors.iter().any(|e| e.contains("EQDS profile")));
}
