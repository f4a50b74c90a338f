//! Frozen EQDS lookup tables: canonical URLs, code systems and code enumerations.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use super::Coding;
use crate::error::EqdsError;

/// Canonical URLs used by EQDS resources.
pub mod urls {
    pub const PROFILE_PATIENT: &str = "https://eqds.org/StructureDefinition/equine-patient";
    pub const EXTENSION_ANIMAL: &str = "http://hl7.org/fhir/StructureDefinition/patient-animal";
    pub const EXTENSION_OWNERSHIP: &str = "https://eqds.org/StructureDefinition/ownership";
    pub const EXTENSION_COLOR: &str = "https://eqds.org/StructureDefinition/equine-color";
    pub const EXTENSION_BREEDING: &str = "https://eqds.org/StructureDefinition/breeding-info";
    pub const CODESYSTEM_SEX: &str = "https://eqds.org/CodeSystem/equine-sex";
    pub const CODESYSTEM_BREED: &str = "https://eqds.org/CodeSystem/breed-codes";
    pub const CODESYSTEM_COLOR: &str = "https://eqds.org/CodeSystem/color-codes";
    pub const SNOMED: &str = "http://snomed.info/sct";
}

pub const HORSE_SPECIES_SYSTEM: &str = urls::SNOMED;
pub const HORSE_SPECIES_CODE: &str = "35354009";
pub const HORSE_SPECIES_DISPLAY: &str = "Horse (organism)";

/// The SNOMED coding every EQDS patient must carry as its species.
pub fn horse_species_coding() -> Coding {
    Coding::new(HORSE_SPECIES_SYSTEM, HORSE_SPECIES_CODE, HORSE_SPECIES_DISPLAY)
}

/// Codes accepted for `genderStatus`, in the order they are reported.
pub const EQUINE_SEX_CODES: [&str; 5] = ["mare", "stallion", "gelding", "colt", "filly"];

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum EquineSex {
    Mare,
    Stallion,
    Gelding,
    Colt,
    Filly,
}

impl EquineSex {
    pub const ALL: [EquineSex; 5] = [
        EquineSex::Mare,
        EquineSex::Stallion,
        EquineSex::Gelding,
        EquineSex::Colt,
        EquineSex::Filly,
    ];

    pub fn code(&self) -> &'static str {
        match self {
            EquineSex::Mare => "mare",
            EquineSex::Stallion => "stallion",
            EquineSex::Gelding => "gelding",
            EquineSex::Colt => "colt",
            EquineSex::Filly => "filly",
        }
    }

    pub fn display(&self) -> &'static str {
        match self {
            EquineSex::Mare => "Mare",
            EquineSex::Stallion => "Stallion",
            EquineSex::Gelding => "Gelding",
            EquineSex::Colt => "Colt",
            EquineSex::Filly => "Filly",
        }
    }

    pub fn definition(&self) -> &'static str {
        match self {
            EquineSex::Mare => "Adult female horse",
            EquineSex::Stallion => "Adult intact male horse",
            EquineSex::Gelding => "Castrated male horse",
            EquineSex::Colt => "Young male horse (typically under 4 years)",
            EquineSex::Filly => "Young female horse (typically under 4 years)",
        }
    }

    pub fn coding(&self) -> Coding {
        Coding::new(urls::CODESYSTEM_SEX, self.code(), self.display())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum BreedCode {
    #[serde(rename = "QH")]
    QuarterHorse,
    #[serde(rename = "TB")]
    Thoroughbred,
    #[serde(rename = "AR")]
    Arabian,
    #[serde(rename = "PT")]
    Paint,
    #[serde(rename = "AP")]
    Appaloosa,
    #[serde(rename = "WB")]
    Warmblood,
}

impl BreedCode {
    pub const ALL: [BreedCode; 6] = [
        BreedCode::QuarterHorse,
        BreedCode::Thoroughbred,
        BreedCode::Arabian,
        BreedCode::Paint,
        BreedCode::Appaloosa,
        BreedCode::Warmblood,
    ];

    pub fn code(&self) -> &'static str {
        match self {
            BreedCode::QuarterHorse => "QH",
            BreedCode::Thoroughbred => "TB",
            BreedCode::Arabian => "AR",
            BreedCode::Paint => "PT",
            BreedCode::Appaloosa => "AP",
            BreedCode::Warmblood => "WB",
        }
    }

    pub fn display(&self) -> &'static str {
        match self {
            BreedCode::QuarterHorse => "Quarter Horse",
            BreedCode::Thoroughbred => "Thoroughbred",
            BreedCode::Arabian => "Arabian",
            BreedCode::Paint => "Paint",
            BreedCode::Appaloosa => "Appaloosa",
            BreedCode::Warmblood => "Warmblood",
        }
    }

    pub fn definition(&self) -> &'static str {
        match self {
            BreedCode::QuarterHorse => "American Quarter Horse",
            BreedCode::Thoroughbred => "Thoroughbred",
            BreedCode::Arabian => "Arabian Horse",
            BreedCode::Paint => "American Paint Horse",
            BreedCode::Appaloosa => "Appaloosa",
            BreedCode::Warmblood => "Sport Horse/Warmblood",
        }
    }

    pub fn coding(&self) -> Coding {
        Coding::new(urls::CODESYSTEM_BREED, self.code(), self.display())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ColorCode {
    Bay,
    Chestnut,
    Black,
    Gray,
    #[serde(rename = "pal")]
    Palomino,
    #[serde(rename = "buck")]
    Buckskin,
    Pinto,
}

impl ColorCode {
    pub const ALL: [ColorCode; 7] = [
        ColorCode::Bay,
        ColorCode::Chestnut,
        ColorCode::Black,
        ColorCode::Gray,
        ColorCode::Palomino,
        ColorCode::Buckskin,
        ColorCode::Pinto,
    ];

    pub fn code(&self) -> &'static str {
        match self {
            ColorCode::Bay => "bay",
            ColorCode::Chestnut => "chestnut",
            ColorCode::Black => "black",
            ColorCode::Gray => "gray",
            ColorCode::Palomino => "pal",
            ColorCode::Buckskin => "buck",
            ColorCode::Pinto => "pinto",
        }
    }

    pub fn display(&self) -> &'static str {
        match self {
            ColorCode::Bay => "Bay",
            ColorCode::Chestnut => "Chestnut",
            ColorCode::Black => "Black",
            ColorCode::Gray => "Gray",
            ColorCode::Palomino => "Palomino",
            ColorCode::Buckskin => "Buckskin",
            ColorCode::Pinto => "Pinto",
        }
    }

    pub fn coding(&self) -> Coding {
        Coding::new(urls::CODESYSTEM_COLOR, self.code(), self.display())
    }
}

macro_rules! impl_code_traits {
    ($ty:ident, $label:literal) => {
        impl fmt::Display for $ty {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str(self.code())
            }
        }

        impl FromStr for $ty {
            type Err = EqdsError;

            fn from_str(s: &str) -> Result<Self, Self::Err> {
                $ty::ALL
                    .into_iter()
                    .find(|value| value.code() == s)
                    .ok_or_else(|| EqdsError::validation(format!("Unknown {} code: {}", $label, s)))
            }
        }
    };
}

impl_code_traits!(EquineSex, "equine sex");
impl_code_traits!(BreedCode, "breed");
impl_code_traits!(ColorCode, "color");
