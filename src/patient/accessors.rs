//! Read helpers over typed EQDS patients.

use crate::types::{
    AnimalDetail, BreedingDetail, Coding, EqdsPatient, ExtensionKind, OwnershipDetail,
    PatientExtension,
};

use super::OwnerShare;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AnimalInfo<'a> {
    pub species: Option<&'a Coding>,
    pub breed: Option<&'a Coding>,
    pub gender_status: Option<&'a Coding>,
}

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct BreedingInfo {
    pub sire: Option<String>,
    pub dam: Option<String>,
}

fn ownership_details(patient: &EqdsPatient) -> impl Iterator<Item = &[OwnershipDetail]> {
    patient
        .extensions_of(ExtensionKind::Ownership)
        .filter_map(|ext| match ext {
            PatientExtension::Ownership { extension } => Some(extension.as_slice()),
            _ => None,
        })
}

fn percentage_of(details: &[OwnershipDetail]) -> Option<f64> {
    details.iter().find_map(|detail| match detail {
        OwnershipDetail::Percentage { value } => Some(*value),
        OwnershipDetail::Owner { .. } => None,
    })
}

/// Sum of ownership percentages; shares without a percentage count as 0.
pub fn ownership_total(patient: &EqdsPatient) -> f64 {
    ownership_details(patient)
        .map(|details| percentage_of(details).unwrap_or(0.0))
        .sum()
}

pub fn owners(patient: &EqdsPatient) -> Vec<OwnerShare> {
    ownership_details(patient)
        .map(|details| {
            let reference = details
                .iter()
                .find_map(|detail| match detail {
                    OwnershipDetail::Owner { value } => Some(value.reference.clone()),
                    OwnershipDetail::Percentage { .. } => None,
                })
                .unwrap_or_default();
            OwnerShare {
                reference,
                percentage: percentage_of(details).unwrap_or(0.0),
            }
        })
        .collect()
}

/// Primary codings of the first animal extension.
pub fn animal_info(patient: &EqdsPatient) -> Option<AnimalInfo<'_>> {
    let details = patient.extension.iter().find_map(|ext| match ext {
        PatientExtension::Animal { extension } => Some(extension),
        _ => None,
    })?;

    let mut info = AnimalInfo {
        species: None,
        breed: None,
        gender_status: None,
    };
    for detail in details {
        match detail {
            AnimalDetail::Species { value } if info.species.is_none() => {
                info.species = value.primary();
            }
            AnimalDetail::Breed { value } if info.breed.is_none() => {
                info.breed = value.primary();
            }
            AnimalDetail::GenderStatus { value } if info.gender_status.is_none() => {
                info.gender_status = value.primary();
            }
            _ => {}
        }
    }
    Some(info)
}

pub fn color_info(patient: &EqdsPatient) -> Option<&Coding> {
    patient.extension.iter().find_map(|ext| match ext {
        PatientExtension::Color { value } => value.primary(),
        _ => None,
    })
}

pub fn breeding_info(patient: &EqdsPatient) -> Option<BreedingInfo> {
    let details = patient.extension.iter().find_map(|ext| match ext {
        PatientExtension::BreedingInfo { extension } => Some(extension),
        _ => None,
    })?;

    let mut info = BreedingInfo::default();
    for detail in details {
        match detail {
            BreedingDetail::Sire { value } if info.sire.is_none() => info.sire = Some(value.clone()),
            BreedingDetail::Dam { value } if info.dam.is_none() => info.dam = Some(value.clone()),
            _ => {}
        }
    }
    Some(info)
}
