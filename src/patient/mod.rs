//! Building and reading EQDS Patient resources.

pub mod accessors;
pub mod builder;

pub use accessors::{
    AnimalInfo, BreedingInfo, animal_info, breeding_info, color_info, owners, ownership_total,
};
pub use builder::{
    CreatePatientParams, IdentifierParams, MEDICAL_RECORD_SYSTEM, OwnerShare,
    create_eqds_patient, create_patient_from_example, create_test_patient,
};
