//! FHIR profile to JSON Schema (draft-07) conversion.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value, json};

use super::FhirProfile;
use crate::types::{
    EquineSex, HORSE_SPECIES_CODE, HORSE_SPECIES_DISPLAY, HORSE_SPECIES_SYSTEM, urls,
};

pub const JSON_SCHEMA_DRAFT_07: &str = "http://json-schema.org/draft-07/schema#";
pub const RESOURCE_ID_PATTERN: &str = r"^[A-Za-z0-9\-\.]{1,64}$";
pub const BIRTH_DATE_PATTERN: &str = r"^([0-9]([0-9]([0-9][1-9]|[1-9]0)|[1-9]00)|[1-9]000)(-(0[1-9]|1[0-2])(-(0[1-9]|[1-2][0-9]|3[0-1]))?)?$";

const ANIMAL_ELEMENT: &str = "Patient.extension:animal";
const COLOR_ELEMENT: &str = "Patient.extension:color";
const ANIMAL_REF: &str = "#/definitions/animalExtension";
const COLOR_REF: &str = "#/definitions/colorExtension";

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct JsonSchema {
    #[serde(rename = "$schema")]
    pub schema: String,
    #[serde(rename = "$id")]
    pub id: String,
    pub title: String,
    pub description: String,
    #[serde(rename = "type")]
    pub schema_type: String,
    pub properties: Map<String, Value>,
    pub required: Vec<String>,
    #[serde(default)]
    pub definitions: Map<String, Value>,
}

/// `https://host/StructureDefinition/x` becomes `https://host/schemas/x.schema.json`.
pub fn schema_id(profile: &FhirProfile) -> String {
    format!(
        "{}.schema.json",
        profile
            .url
            .as_str()
            .replace("/StructureDefinition/", "/schemas/")
    )
}

fn coding_items(system: Value, code: Value, display: Value) -> Value {
    json!({
        "type": "object",
        "properties": {
            "coding": {
                "type": "array",
                "items": {
                    "type": "object",
                    "properties": {
                        "system": system,
                        "code": code,
                        "display": display
                    },
                    "required": ["system", "code", "display"]
                }
            }
        },
        "required": ["coding"]
    })
}

fn animal_detail(url: &str, concept: Value) -> Value {
    json!({
        "type": "object",
        "properties": {
            "url": { "const": url },
            "valueCodeableConcept": concept
        },
        "required": ["url", "valueCodeableConcept"]
    })
}

fn animal_extension_definition() -> Value {
    let sex_codes: Vec<&str> = EquineSex::ALL.iter().map(|sex| sex.code()).collect();

    json!({
        "type": "object",
        "properties": {
            "url": { "const": urls::EXTENSION_ANIMAL },
            "extension": {
                "type": "array",
                "items": {
                    "oneOf": [
                        animal_detail("species", coding_items(
                            json!({ "const": HORSE_SPECIES_SYSTEM }),
                            json!({ "const": HORSE_SPECIES_CODE }),
                            json!({ "const": HORSE_SPECIES_DISPLAY }),
                        )),
                        animal_detail("breed", coding_items(
                            json!({ "const": urls::CODESYSTEM_BREED }),
                            json!({ "type": "string" }),
                            json!({ "type": "string" }),
                        )),
                        animal_detail("genderStatus", coding_items(
                            json!({ "const": urls::CODESYSTEM_SEX }),
                            json!({ "type": "string", "enum": sex_codes }),
                            json!({ "type": "string" }),
                        )),
                    ]
                },
                "contains": [
                    { "properties": { "url": { "const": "species" } } },
                    { "properties": { "url": { "const": "breed" } } },
                    { "properties": { "url": { "const": "genderStatus" } } }
                ]
            }
        },
        "required": ["url", "extension"]
    })
}

fn color_extension_definition() -> Value {
    json!({
        "type": "object",
        "properties": {
            "url": { "const": urls::EXTENSION_COLOR },
            "valueCodeableConcept": coding_items(
                json!({ "const": urls::CODESYSTEM_COLOR }),
                json!({ "type": "string" }),
                json!({ "type": "string" }),
            )
        },
        "required": ["url", "valueCodeableConcept"]
    })
}

fn add_patient_properties(schema: &mut JsonSchema) {
    schema.properties.insert(
        "identifier".to_string(),
        json!({
            "type": "array",
            "minItems": 1,
            "items": {
                "type": "object",
                "properties": {
                    "type": {
                        "type": "object",
                        "properties": {
                            "coding": {
                                "type": "array",
                                "items": {
                                    "type": "object",
                                    "properties": {
                                        "system": { "type": "string" },
                                        "code": { "type": "string" },
                                        "display": { "type": "string" }
                                    }
                                }
                            },
                            "text": { "type": "string" }
                        }
                    },
                    "system": { "type": "string" },
                    "value": { "type": "string" }
                },
                "required": ["value"]
            }
        }),
    );

    schema.properties.insert(
        "name".to_string(),
        json!({
            "type": "array",
            "minItems": 1,
            "items": {
                "type": "object",
                "properties": {
                    "use": {
                        "type": "string",
                        "enum": ["usual", "official", "temp", "nickname", "anonymous", "old", "maiden"]
                    },
                    "text": { "type": "string" },
                    "given": { "type": "array", "items": { "type": "string" } }
                }
            }
        }),
    );

    schema.properties.insert(
        "gender".to_string(),
        json!({ "type": "string", "enum": ["male", "female", "other", "unknown"] }),
    );

    schema.properties.insert(
        "birthDate".to_string(),
        json!({ "type": "string", "pattern": BIRTH_DATE_PATTERN }),
    );

    schema
        .required
        .extend(["identifier".to_string(), "name".to_string()]);
}

/// Converts a profile into the fixed EQDS JSON Schema layout.
///
/// Only the animal and color extension slices of the differential are
/// interpreted; other differential elements are ignored.
pub fn convert_to_json_schema(profile: &FhirProfile) -> JsonSchema {
    let title = profile.display_title().to_string();

    let mut properties = Map::new();
    properties.insert(
        "resourceType".to_string(),
        json!({ "type": "string", "const": profile.type_name }),
    );
    properties.insert(
        "id".to_string(),
        json!({ "type": "string", "pattern": RESOURCE_ID_PATTERN }),
    );
    properties.insert(
        "meta".to_string(),
        json!({
            "type": "object",
            "properties": {
                "profile": {
                    "type": "array",
                    "items": { "type": "string" },
                    "contains": { "const": profile.url.as_str() }
                }
            }
        }),
    );

    let mut schema = JsonSchema {
        schema: JSON_SCHEMA_DRAFT_07.to_string(),
        id: schema_id(profile),
        description: format!("JSON Schema for {title}"),
        title,
        schema_type: "object".to_string(),
        properties,
        required: vec!["resourceType".to_string()],
        definitions: Map::new(),
    };

    if profile.type_name == "Patient" {
        add_patient_properties(&mut schema);
    }

    let mut extension_refs = Vec::new();
    let mut has_animal = false;
    let mut has_color = false;
    for element in &profile.differential.element {
        match element.id.as_str() {
            ANIMAL_ELEMENT => {
                has_animal = true;
                extension_refs.push(json!({ "$ref": ANIMAL_REF }));
            }
            COLOR_ELEMENT => {
                has_color = true;
                extension_refs.push(json!({ "$ref": COLOR_REF }));
            }
            _ => {}
        }
    }

    if !extension_refs.is_empty() {
        let mut extension = json!({
            "type": "array",
            "items": { "oneOf": extension_refs }
        });
        if has_animal {
            extension["contains"] = json!({ "$ref": ANIMAL_REF });
            schema.required.push("extension".to_string());
        }
        schema.properties.insert("extension".to_string(), extension);
    }

    if has_animal {
        schema
            .definitions
            .insert("animalExtension".to_string(), animal_extension_definition());
    }
    if has_color {
        schema
            .definitions
            .insert("colorExtension".to_string(), color_extension_definition());
    }

    schema
}
