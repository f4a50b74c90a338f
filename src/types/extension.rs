//! EQDS Patient extensions, discriminated by their `url`.
//!
//! Typed records use [`PatientExtension`]; untyped JSON is classified with
//! [`ExtensionKind`] so that the validator can inspect records that do not
//! deserialize.

use serde::{Deserialize, Serialize};
use serde_json::Value;

use super::codes::{BreedCode, ColorCode, EquineSex, horse_species_coding, urls};
use super::{CodeableConcept, Reference};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ExtensionKind {
    Animal,
    Ownership,
    Color,
    Breeding,
    Other,
}

impl ExtensionKind {
    pub fn from_url(url: &str) -> Self {
        match url {
            urls::EXTENSION_ANIMAL => ExtensionKind::Animal,
            urls::EXTENSION_OWNERSHIP => ExtensionKind::Ownership,
            urls::EXTENSION_COLOR => ExtensionKind::Color,
            urls::EXTENSION_BREEDING => ExtensionKind::Breeding,
            _ => ExtensionKind::Other,
        }
    }

    /// Classify an untyped extension object. Anything without a string `url` is `Other`.
    pub fn of(extension: &Value) -> Self {
        extension
            .get("url")
            .and_then(Value::as_str)
            .map(Self::from_url)
            .unwrap_or(ExtensionKind::Other)
    }

    pub fn url(&self) -> Option<&'static str> {
        match self {
            ExtensionKind::Animal => Some(urls::EXTENSION_ANIMAL),
            ExtensionKind::Ownership => Some(urls::EXTENSION_OWNERSHIP),
            ExtensionKind::Color => Some(urls::EXTENSION_COLOR),
            ExtensionKind::Breeding => Some(urls::EXTENSION_BREEDING),
            ExtensionKind::Other => None,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(tag = "url")]
pub enum PatientExtension {
    #[serde(rename = "http://hl7.org/fhir/StructureDefinition/patient-animal")]
    Animal { extension: Vec<AnimalDetail> },

    #[serde(rename = "https://eqds.org/StructureDefinition/ownership")]
    Ownership { extension: Vec<OwnershipDetail> },

    #[serde(rename = "https://eqds.org/StructureDefinition/equine-color")]
    Color {
        #[serde(rename = "valueCodeableConcept")]
        value: CodeableConcept,
    },

    #[serde(rename = "https://eqds.org/StructureDefinition/breeding-info")]
    BreedingInfo { extension: Vec<BreedingDetail> },
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(tag = "url")]
pub enum AnimalDetail {
    #[serde(rename = "species")]
    Species {
        #[serde(rename = "valueCodeableConcept")]
        value: CodeableConcept,
    },
    #[serde(rename = "breed")]
    Breed {
        #[serde(rename = "valueCodeableConcept")]
        value: CodeableConcept,
    },
    #[serde(rename = "genderStatus")]
    GenderStatus {
        #[serde(rename = "valueCodeableConcept")]
        value: CodeableConcept,
    },
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(tag = "url")]
pub enum OwnershipDetail {
    #[serde(rename = "owner")]
    Owner {
        #[serde(rename = "valueReference")]
        value: Reference,
    },
    #[serde(rename = "percentage")]
    Percentage {
        #[serde(rename = "valueDecimal")]
        value: f64,
    },
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(tag = "url")]
pub enum BreedingDetail {
    #[serde(rename = "sire")]
    Sire {
        #[serde(rename = "valueString")]
        value: String,
    },
    #[serde(rename = "dam")]
    Dam {
        #[serde(rename = "valueString")]
        value: String,
    },
}

impl PatientExtension {
    /// Animal extension with the horse species, the given sex and an optional breed.
    pub fn animal(sex: EquineSex, breed: Option<BreedCode>) -> Self {
        let mut extension = vec![
            AnimalDetail::Species {
                value: CodeableConcept::from_coding(horse_species_coding()),
            },
            AnimalDetail::GenderStatus {
                value: CodeableConcept::from_coding(sex.coding()),
            },
        ];
        if let Some(breed) = breed {
            extension.push(AnimalDetail::Breed {
                value: CodeableConcept::from_coding(breed.coding()),
            });
        }
        PatientExtension::Animal { extension }
    }

    pub fn ownership(owner: impl Into<String>, percentage: f64) -> Self {
        PatientExtension::Ownership {
            extension: vec![
                OwnershipDetail::Owner {
                    value: Reference::new(owner),
                },
                OwnershipDetail::Percentage { value: percentage },
            ],
        }
    }

    pub fn color(color: ColorCode) -> Self {
        PatientExtension::Color {
            value: CodeableConcept::from_coding(color.coding()),
        }
    }

    pub fn breeding_info(sire: Option<String>, dam: Option<String>) -> Self {
        let extension = sire
            .map(|value| BreedingDetail::Sire { value })
            .into_iter()
            .chain(dam.map(|value| BreedingDetail::Dam { value }))
            .collect();
        PatientExtension::BreedingInfo { extension }
    }

    pub fn kind(&self) -> ExtensionKind {
        match self {
            PatientExtension::Animal { .. } => ExtensionKind::Animal,
            PatientExtension::Ownership { .. } => ExtensionKind::Ownership,
            PatientExtension::Color { .. } => ExtensionKind::Color,
            PatientExtension::BreedingInfo { .. } => ExtensionKind::Breeding,
        }
    }
}
