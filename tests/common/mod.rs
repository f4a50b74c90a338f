use eqds_fhir::urls;
use serde_json::{Value, json};

#[allow(dead_code)]
pub fn horse_coding() -> Value {
    json!({"system": "http://snomed.info/sct", "code": "35354009", "display": "Horse (organism)"})
}

#[allow(dead_code)]
pub fn animal_extension(species: Vec<Value>, gender_code: &str) -> Value {
    json!({
        "url": urls::EXTENSION_ANIMAL,
        "extension": [
            {"url": "species", "valueCodeableConcept": {"coding": species}},
            {"url": "genderStatus", "valueCodeableConcept": {"coding": [
                {"system": urls::CODESYSTEM_SEX, "code": gender_code, "display": "Mare"}
            ]}}
        ]
    })
}

#[allow(dead_code)]
pub fn ownership_extension(owner: &str, percentage: f64) -> Value {
    json!({
        "url": urls::EXTENSION_OWNERSHIP,
        "extension": [
            {"url": "owner", "valueReference": {"reference": owner}},
            {"url": "percentage", "valueDecimal": percentage}
        ]
    })
}

/// A valid record with the given ownership shares.
#[allow(dead_code)]
pub fn patient_with_owners(shares: &[f64]) -> Value {
    let mut extension = vec![animal_extension(vec![horse_coding()], "mare")];
    extension.extend(
        shares
            .iter()
            .enumerate()
            .map(|(i, share)| ownership_extension(&format!("RelatedPerson/owner-{i}"), *share)),
    );

    json!({
        "resourceType": "Patient",
        "id": "horse-1",
        "meta": {"profile": [urls::PROFILE_PATIENT]},
        "identifier": [{"system": "http://example-clinic.com/horses", "value": "EQ-1"}],
        "name": [{"use": "official", "text": "Test Mare"}],
        "extension": extension
    })
}

#[allow(dead_code)]
pub fn valid_patient() -> Value {
    patient_with_owners(&[60.0, 40.0])
}
