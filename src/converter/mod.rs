//! Conversion of EQDS FHIR profiles into JSON Schema documents.
//!
//! Profiles are published as Jekyll pages: YAML front matter followed by the
//! StructureDefinition JSON. [`SchemaGenerator`] walks a directory of such
//! pages and writes one schema per profile.

mod generator;
mod jekyll;
mod json_schema;
mod structure_definition;

pub use generator::{GenerationSummary, SchemaGenerator};
pub use jekyll::{JekyllDocument, parse_jekyll};
pub use json_schema::{
    BIRTH_DATE_PATTERN, JSON_SCHEMA_DRAFT_07, JsonSchema, RESOURCE_ID_PATTERN,
    convert_to_json_schema, schema_id,
};
pub use structure_definition::{
    FhirProfile, ProfileDifferential, ProfileElement, ProfileElementBinding, ProfileElementType,
};
