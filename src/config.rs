use serde::{Deserialize, Serialize};
use std::fmt;
use std::path::PathBuf;
use std::str::FromStr;

use crate::error::EqdsError;

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Default)]
#[cfg_attr(feature = "cli", derive(clap::ValueEnum))]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    #[default]
    Json,
    Yaml,
}

impl OutputFormat {
    /// File suffix appended to the profile id, e.g. `equine-patient.schema.json`.
    pub fn file_suffix(&self) -> &'static str {
        match self {
            OutputFormat::Json => "schema.json",
            OutputFormat::Yaml => "schema.yaml",
        }
    }
}

impl fmt::Display for OutputFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            OutputFormat::Json => f.write_str("json"),
            OutputFormat::Yaml => f.write_str("yaml"),
        }
    }
}

impl FromStr for OutputFormat {
    type Err = EqdsError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "json" => Ok(OutputFormat::Json),
            "yaml" | "yml" => Ok(OutputFormat::Yaml),
            _ => Err(EqdsError::conversion(format!(
                "Unsupported format: {s}. Use 'json' or 'yaml'"
            ))),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct GeneratorConfig {
    /// Directory holding Jekyll-wrapped StructureDefinition `*.json` files.
    pub profiles_dir: PathBuf,
    pub output_dir: PathBuf,
    pub format: OutputFormat,
}

impl Default for GeneratorConfig {
    fn default() -> Self {
        Self {
            profiles_dir: PathBuf::from("docs/profiles"),
            output_dir: PathBuf::from("tools/eqds-schemas/schemas"),
            format: OutputFormat::Json,
        }
    }
}

impl GeneratorConfig {
    pub fn with_profiles_dir(mut self, profiles_dir: impl Into<PathBuf>) -> Self {
        self.profiles_dir = profiles_dir.into();
        self
    }

    pub fn with_output_dir(mut self, output_dir: impl Into<PathBuf>) -> Self {
        self.output_dir = output_dir.into();
        self
    }

    pub fn with_format(mut self, format: OutputFormat) -> Self {
        self.format = format;
        self
    }
}
