//! # EQDS CLI
//!
//! Generates JSON Schemas from EQDS profile pages and validates Patient records.

use anyhow::{Context, Result};
use clap::{Args, Parser, Subcommand};
use eqds_fhir::{
    BusinessRuleValidator, GeneratorConfig, OutputFormat, SchemaGenerator, StrictValidator,
    ValidationEngine,
};
use std::fs;
use std::path::PathBuf;
use tracing::{Level, info};
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "eqds")]
#[command(about = "Tools for EQDS equine FHIR resources")]
#[command(version)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Enable verbose logging
    #[arg(short, long, global = true)]
    verbose: bool,
}

#[derive(Subcommand)]
enum Commands {
    /// Convert EQDS profile pages to JSON Schemas
    Generate(GenerateCommand),
    /// Validate Patient JSON files against the EQDS business rules
    Validate(ValidateCommand),
}

#[derive(Args)]
struct GenerateCommand {
    /// Directory of Jekyll-wrapped StructureDefinition files
    #[arg(short, long)]
    profiles: Option<PathBuf>,

    /// Output directory for generated schemas
    #[arg(short, long)]
    output: Option<PathBuf>,

    /// Output format
    #[arg(short, long, value_enum, default_value_t = OutputFormat::Json)]
    format: OutputFormat,
}

impl GenerateCommand {
    fn execute(&self) -> Result<()> {
        let mut config = GeneratorConfig::default().with_format(self.format);
        if let Some(profiles) = &self.profiles {
            config = config.with_profiles_dir(profiles);
        }
        if let Some(output) = &self.output {
            config = config.with_output_dir(output);
        }

        info!(
            "Converting profiles in {} to {} schemas",
            config.profiles_dir.display(),
            config.format
        );

        let summary = SchemaGenerator::new(config)
            .generate()
            .context("Schema generation failed")?;

        for path in &summary.generated {
            println!("✓ Generated: {}", path.display());
        }
        for (path, reason) in &summary.failed {
            eprintln!("✗ {}: {}", path.display(), reason);
        }
        println!(
            "Schema generation complete: {} generated, {} failed",
            summary.generated.len(),
            summary.failed.len()
        );

        Ok(())
    }
}

#[derive(Args)]
struct ValidateCommand {
    /// Patient JSON files
    #[arg(required = true)]
    files: Vec<PathBuf>,

    /// Report every business-rule error instead of a single strict message
    #[arg(long)]
    itemized: bool,
}

impl ValidateCommand {
    fn execute(&self) -> Result<()> {
        let engine: Box<dyn ValidationEngine> = if self.itemized {
            Box::new(BusinessRuleValidator)
        } else {
            Box::new(StrictValidator)
        };

        let mut invalid = 0;
        for path in &self.files {
            let content = fs::read_to_string(path)
                .with_context(|| format!("Failed to read input file: {}", path.display()))?;
            let record: serde_json::Value = serde_json::from_str(&content)
                .with_context(|| format!("Failed to parse JSON from: {}", path.display()))?;

            let report = engine.validate_resource(&record);
            if !report.valid {
                invalid += 1;
            }

            println!(
                "{}: {}",
                path.display(),
                serde_json::to_string(&report).context("Failed to serialize report")?
            );
        }

        if invalid > 0 {
            anyhow::bail!("{} of {} records failed validation", invalid, self.files.len());
        }
        Ok(())
    }
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    let level = if cli.verbose { Level::DEBUG } else { Level::INFO };
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(level.to_string()));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();

    match cli.command {
        Commands::Generate(cmd) => cmd.execute(),
        Commands::Validate(cmd) => cmd.execute(),
    }
}
