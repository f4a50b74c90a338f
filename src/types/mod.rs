pub mod codes;
pub mod datatypes;
pub mod extension;
pub mod patient;

pub use codes::{
    BreedCode, ColorCode, EQUINE_SEX_CODES, EquineSex, HORSE_SPECIES_CODE, HORSE_SPECIES_DISPLAY,
    HORSE_SPECIES_SYSTEM, horse_species_coding, urls,
};
pub use datatypes::{
    CodeableConcept, Coding, ContactPoint, ContactPointSystem, HumanName, Identifier, NameUse,
    PatientContact, Reference,
};
pub use extension::{AnimalDetail, BreedingDetail, ExtensionKind, OwnershipDetail, PatientExtension};
pub use patient::{AdministrativeGender, EqdsPatient, Meta, Narrative, NarrativeStatus};
