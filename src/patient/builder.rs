//! Construction of EQDS Patient resources from plain parameters.

use chrono::Datelike;
use serde::{Deserialize, Serialize};

use crate::error::{EqdsError, Result};
use crate::types::{
    AdministrativeGender, BreedCode, CodeableConcept, Coding, ColorCode, EqdsPatient, EquineSex,
    HumanName, Identifier, Meta, NameUse, Narrative, NarrativeStatus, PatientExtension, urls,
};
use crate::validation::percentages_valid;

pub const MEDICAL_RECORD_SYSTEM: &str = "http://example-clinic.com/horses";
const IDENTIFIER_TYPE_SYSTEM: &str = "http://terminology.hl7.org/CodeSystem/v2-0203";

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OwnerShare {
    pub reference: String,
    pub percentage: f64,
}

impl OwnerShare {
    pub fn new(reference: impl Into<String>, percentage: f64) -> Self {
        Self {
            reference: reference.into(),
            percentage,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct IdentifierParams {
    pub system: String,
    pub value: String,
    #[serde(rename = "type")]
    pub identifier_type: Option<String>,
}

impl IdentifierParams {
    pub fn new(system: impl Into<String>, value: impl Into<String>) -> Self {
        Self {
            system: system.into(),
            value: value.into(),
            identifier_type: None,
        }
    }

    pub fn with_type(mut self, identifier_type: impl Into<String>) -> Self {
        self.identifier_type = Some(identifier_type.into());
        self
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CreatePatientParams {
    pub id: String,
    pub name: String,
    pub barn_name: Option<String>,
    pub gender_status: EquineSex,
    pub breed: Option<BreedCode>,
    pub color: Option<ColorCode>,
    pub birth_date: Option<String>,
    #[serde(default)]
    pub owners: Vec<OwnerShare>,
    pub sire: Option<String>,
    pub dam: Option<String>,
    #[serde(default)]
    pub identifiers: Vec<IdentifierParams>,
}

impl CreatePatientParams {
    pub fn new(id: impl Into<String>, name: impl Into<String>, gender_status: EquineSex) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            barn_name: None,
            gender_status,
            breed: None,
            color: None,
            birth_date: None,
            owners: Vec::new(),
            sire: None,
            dam: None,
            identifiers: Vec::new(),
        }
    }

    pub fn with_barn_name(mut self, barn_name: impl Into<String>) -> Self {
        self.barn_name = Some(barn_name.into());
        self
    }

    pub fn with_breed(mut self, breed: BreedCode) -> Self {
        self.breed = Some(breed);
        self
    }

    pub fn with_color(mut self, color: ColorCode) -> Self {
        self.color = Some(color);
        self
    }

    pub fn with_birth_date(mut self, birth_date: impl Into<String>) -> Self {
        self.birth_date = Some(birth_date.into());
        self
    }

    pub fn with_owner(mut self, reference: impl Into<String>, percentage: f64) -> Self {
        self.owners.push(OwnerShare::new(reference, percentage));
        self
    }

    pub fn with_sire(mut self, sire: impl Into<String>) -> Self {
        self.sire = Some(sire.into());
        self
    }

    pub fn with_dam(mut self, dam: impl Into<String>) -> Self {
        self.dam = Some(dam.into());
        self
    }

    pub fn with_identifier(mut self, identifier: IdentifierParams) -> Self {
        self.identifiers.push(identifier);
        self
    }
}

fn medical_record_identifier(id: &str) -> Identifier {
    Identifier {
        identifier_type: Some(CodeableConcept::from_coding(Coding::new(
            IDENTIFIER_TYPE_SYSTEM,
            "MR",
            "Medical record number",
        ))),
        system: Some(MEDICAL_RECORD_SYSTEM.to_string()),
        value: format!("EQ-{}-{}", chrono::Local::now().year(), id),
    }
}

fn narrative(params: &CreatePatientParams) -> Narrative {
    let breed = params
        .breed
        .map(|breed| format!(", {}", breed.display()))
        .unwrap_or_default();
    Narrative {
        status: NarrativeStatus::Generated,
        div: format!(
            "<div xmlns='http://www.w3.org/1999/xhtml'>{} '{}'{}</div>",
            params.gender_status.display(),
            params.name,
            breed
        ),
    }
}

/// Builds an EQDS Patient, rejecting owner shares that do not sum to 100%.
pub fn create_eqds_patient(params: &CreatePatientParams) -> Result<EqdsPatient> {
    if !params.owners.is_empty() {
        let total: f64 = params.owners.iter().map(|owner| owner.percentage).sum();
        if !percentages_valid(total) {
            return Err(EqdsError::Ownership {
                message: format!(
                    "Ownership percentages must sum to approximately 100%, got {total}%"
                ),
            });
        }
    }

    let name = HumanName {
        name_use: Some(NameUse::Official),
        text: Some(params.name.clone()),
        given: params.barn_name.clone().map(|barn_name| vec![barn_name]),
    };

    let mut identifier = vec![medical_record_identifier(&params.id)];
    identifier.extend(params.identifiers.iter().map(|extra| Identifier {
        identifier_type: extra.identifier_type.clone().map(CodeableConcept::from_text),
        system: Some(extra.system.clone()),
        value: extra.value.clone(),
    }));

    let mut extension = vec![PatientExtension::animal(params.gender_status, params.breed)];
    if let Some(color) = params.color {
        extension.push(PatientExtension::color(color));
    }
    extension.extend(
        params
            .owners
            .iter()
            .map(|owner| PatientExtension::ownership(owner.reference.clone(), owner.percentage)),
    );
    if params.sire.is_some() || params.dam.is_some() {
        extension.push(PatientExtension::breeding_info(
            params.sire.clone(),
            params.dam.clone(),
        ));
    }

    tracing::debug!(
        "Built EQDS patient {} with {} extensions",
        params.id,
        extension.len()
    );

    Ok(EqdsPatient {
        resource_type: "Patient".to_string(),
        id: params.id.clone(),
        meta: Some(Meta {
            profile: vec![urls::PROFILE_PATIENT.to_string()],
        }),
        text: Some(narrative(params)),
        identifier,
        name: vec![name],
        gender: Some(AdministrativeGender::Unknown),
        birth_date: params.birth_date.clone(),
        extension,
        contact: None,
    })
}

/// The reference EQDS example horse.
pub fn create_patient_from_example() -> Result<EqdsPatient> {
    let params = CreatePatientParams::new("example-horse-01", "Smart Little Pepto", EquineSex::Stallion)
        .with_barn_name("Pepto")
        .with_breed(BreedCode::QuarterHorse)
        .with_color(ColorCode::Palomino)
        .with_birth_date("2018-04-15")
        .with_owner("RelatedPerson/owner-john-smith", 60.0)
        .with_owner("RelatedPerson/owner-jane-doe", 40.0)
        .with_sire("Peptoboonsmal")
        .with_dam("Smart Little Lena")
        .with_identifier(
            IdentifierParams::new("http://aqha.com/registration", "5742891")
                .with_type("AQHA Registration"),
        )
        .with_identifier(
            IdentifierParams::new("http://icar.org/microchip", "985141405208421")
                .with_type("Microchip"),
        );
    create_eqds_patient(&params)
}

/// A minimal patient with a single owner holding 100%.
pub fn create_test_patient(
    id: &str,
    gender_status: EquineSex,
    breed: Option<BreedCode>,
) -> Result<EqdsPatient> {
    let mut params = CreatePatientParams::new(id, format!("Test {gender_status}"), gender_status)
        .with_owner("RelatedPerson/test-owner", 100.0);
    params.breed = breed;
    create_eqds_patient(&params)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::validation::validate_business_rules;

    #[test]
    fn test_minimal_patient_shape() {
        let patient =
            create_eqds_patient(&CreatePatientParams::new("test-1", "Test Mare", EquineSex::Mare))
                .unwrap();

        assert_eq!(patient.resource_type, "Patient");
        assert_eq!(patient.name[0].text.as_deref(), Some("Test Mare"));
        assert_eq!(patient.name[0].given, None);
        assert_eq!(patient.gender, Some(AdministrativeGender::Unknown));
        assert_eq!(patient.extension.len(), 1);
        assert_eq!(
            patient.text.unwrap().div,
            "<div xmlns='http://www.w3.org/1999/xhtml'>Mare 'Test Mare'</div>"
        );
    }

    #[test]
    fn test_medical_record_identifier_uses_current_year() {
        let patient =
            create_eqds_patient(&CreatePatientParams::new("abc", "A", EquineSex::Colt)).unwrap();
        let expected = format!("EQ-{}-abc", chrono::Local::now().year());
        assert_eq!(patient.identifier[0].value, expected);
        assert_eq!(
            patient.identifier[0].system.as_deref(),
            Some(MEDICAL_RECORD_SYSTEM)
        );
    }

    #[test]
    fn test_extension_order() {
        let params = CreatePatientParams::new("order", "Order", EquineSex::Gelding)
            .with_breed(BreedCode::Arabian)
            .with_color(ColorCode::Gray)
            .with_owner("RelatedPerson/a", 50.0)
            .with_owner("RelatedPerson/b", 50.0)
            .with_dam("Dam");
        let patient = create_eqds_patient(&params).unwrap();
        let kinds: Vec<_> = patient.extension.iter().map(|ext| ext.kind()).collect();

        use crate::types::ExtensionKind::*;
        assert_eq!(kinds, vec![Animal, Color, Ownership, Ownership, Breeding]);
    }

    #[test]
    fn test_rejects_ownership_short_of_100() {
        let params = CreatePatientParams::new("bad", "Bad", EquineSex::Mare)
            .with_owner("RelatedPerson/a", 60.0)
            .with_owner("RelatedPerson/b", 25.0);
        let err = create_eqds_patient(&params).unwrap_err();
        assert!(matches!(err, EqdsError::Ownership { .. }));
        assert_eq!(
            err.to_string(),
            "Ownership percentages must sum to approximately 100%, got 85%"
        );
    }

    #[test]
    fn test_built_patients_pass_business_rules() {
        for sex in EquineSex::ALL {
            for breed in BreedCode::ALL {
                let patient = create_test_patient(&format!("t-{sex}-{breed}"), sex, Some(breed)).unwrap();
                let report = validate_business_rules(&patient.to_value().unwrap());
                assert!(report.valid, "{sex}/{breed}: {:?}", report.errors);
            }
        }
    }
}
