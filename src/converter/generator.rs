//! Batch generation of JSON Schemas from a directory of profile pages.

use std::fs;
use std::path::{Path, PathBuf};

use super::{FhirProfile, JsonSchema, convert_to_json_schema, parse_jekyll};
use crate::config::{GeneratorConfig, OutputFormat};
use crate::error::{EqdsError, Result};

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct GenerationSummary {
    pub generated: Vec<PathBuf>,
    pub failed: Vec<(PathBuf, String)>,
}

impl GenerationSummary {
    pub fn is_complete(&self) -> bool {
        self.failed.is_empty()
    }
}

pub struct SchemaGenerator {
    config: GeneratorConfig,
}

impl SchemaGenerator {
    pub fn new(config: GeneratorConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &GeneratorConfig {
        &self.config
    }

    /// `*.json` files directly inside the profile directory, sorted by path.
    pub fn find_profile_files(&self) -> Result<Vec<PathBuf>> {
        let mut files = Vec::new();
        for entry in fs::read_dir(&self.config.profiles_dir)? {
            let path = entry?.path();
            if path.is_file() && path.extension().is_some_and(|ext| ext == "json") {
                files.push(path);
            }
        }
        files.sort();
        Ok(files)
    }

    /// Reads one Jekyll-wrapped profile page.
    pub fn load_profile(path: &Path) -> Result<FhirProfile> {
        let content = fs::read_to_string(path)?;
        let document = parse_jekyll(&path.display().to_string(), &content)?;
        Ok(serde_json::from_value(document.body)?)
    }

    fn render(&self, schema: &JsonSchema) -> Result<String> {
        Ok(match self.config.format {
            OutputFormat::Json => serde_json::to_string_pretty(schema)?,
            OutputFormat::Yaml => serde_yaml::to_string(schema)?,
        })
    }

    fn generate_one(&self, profile_path: &Path) -> Result<PathBuf> {
        let profile = Self::load_profile(profile_path)?;
        let schema = convert_to_json_schema(&profile);

        let output_path = self
            .config
            .output_dir
            .join(format!("{}.{}", profile.id, self.config.format.file_suffix()));
        fs::write(&output_path, self.render(&schema)?)?;

        Ok(output_path)
    }

    /// Converts every profile page. A failing page is logged and recorded without
    /// stopping the run; finding no pages at all is an error.
    pub fn generate(&self) -> Result<GenerationSummary> {
        let profile_files = self.find_profile_files()?;
        if profile_files.is_empty() {
            return Err(EqdsError::conversion(format!(
                "No FHIR profile files found in {}",
                self.config.profiles_dir.display()
            )));
        }

        fs::create_dir_all(&self.config.output_dir)?;

        let mut summary = GenerationSummary::default();
        for profile_path in profile_files {
            tracing::info!("Processing: {}", profile_path.display());
            match self.generate_one(&profile_path) {
                Ok(output_path) => {
                    tracing::info!("Generated: {}", output_path.display());
                    summary.generated.push(output_path);
                }
                Err(err) => {
                    tracing::warn!("Error processing {}: {}", profile_path.display(), err);
                    summary.failed.push((profile_path, err.to_string()));
                }
            }
        }

        Ok(summary)
    }
}
