use serde::{Deserialize, Serialize};
use url::Url;

/// The slice of a FHIR StructureDefinition profile the schema generator reads.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct FhirProfile {
    #[serde(rename = "resourceType")]
    pub resource_type: String,

    pub id: String,
    pub url: Url,
    pub name: String,
    pub title: Option<String>,

    #[serde(rename = "type")]
    pub type_name: String,

    #[serde(rename = "baseDefinition")]
    pub base_definition: Option<Url>,

    #[serde(default)]
    pub differential: ProfileDifferential,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct ProfileDifferential {
    #[serde(default)]
    pub element: Vec<ProfileElement>,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ProfileElement {
    pub id: String,
    pub path: String,

    #[serde(rename = "sliceName")]
    pub slice_name: Option<String>,

    pub min: Option<u32>,
    pub max: Option<String>,

    #[serde(rename = "type")]
    pub element_type: Option<Vec<ProfileElementType>>,

    pub binding: Option<ProfileElementBinding>,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ProfileElementType {
    pub code: String,
    pub profile: Option<Vec<String>>,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ProfileElementBinding {
    pub strength: String,
    #[serde(rename = "valueSet")]
    pub value_set: String,
}

impl FhirProfile {
    /// `title`, falling back to `name` for profiles that omit it.
    pub fn display_title(&self) -> &str {
        self.title.as_deref().unwrap_or(&self.name)
    }

    pub fn has_element(&self, element_id: &str) -> bool {
        self.differential
            .element
            .iter()
            .any(|element| element.id == element_id)
    }
}
