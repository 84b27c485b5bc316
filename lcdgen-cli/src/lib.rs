//! Command-line front end for the Grove RGB LCD code generator
//!
//! Reads a device configuration document, validates every registered
//! `display:` entry and renders the resulting wiring:
//!
//! ```bash
//! # C++ setup code on stdout
//! lcdgen device.yaml
//!
//! # instruction list as JSON, written to a file
//! lcdgen device.yaml --format json --output wiring.json
//!
//! # validate only
//! lcdgen device.yaml --check
//! ```

use std::fs;
use std::path::Path;

use anyhow::{Context, Result};
use clap::ValueEnum;
use codegen::{Backend, CppBackend, Generator, Instruction, JsonBackend, PlatformRegistry};
use lcd_grove_rgb::LcdGroveRgbPlatform;
use serde_yaml::Value;
use tracing::{debug, info};

/// Rendering of the generated instruction list.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    /// C++ globals and a `setup()` body
    #[default]
    Cpp,
    /// The raw instruction list
    Json,
}

#[derive(Debug, Clone)]
pub struct GenerateOptions {
    pub format: OutputFormat,
    /// Bus variable for devices that do not set `i2c_id`
    pub i2c_bus: String,
}

impl Default for GenerateOptions {
    fn default() -> Self {
        Self {
            format: OutputFormat::Cpp,
            i2c_bus: "i2c_bus".to_string(),
        }
    }
}

impl GenerateOptions {
    pub fn backend(&self) -> Box<dyn Backend> {
        match self.format {
            OutputFormat::Cpp => Box::new(CppBackend::new(self.i2c_bus.clone())),
            OutputFormat::Json => Box::new(JsonBackend::new(true)),
        }
    }
}

/// Generator with every platform this tool knows about.
///
/// # Errors
///
/// A platform name is registered twice.
pub fn build_generator() -> Result<Generator> {
    let mut registry = PlatformRegistry::new();
    registry.register(LcdGroveRgbPlatform::shared())?;
    for domain in registry.list_domains() {
        debug!(domain = %domain, platforms = ?registry.list_platforms(&domain), "platforms available");
    }
    Ok(Generator::new(registry))
}

/// Parse a configuration document.
///
/// # Errors
///
/// The file cannot be read or is not valid YAML.
pub fn load(path: &Path) -> Result<Value> {
    debug!(path = %path.display(), "loading configuration");
    let source = fs::read_to_string(path)
        .with_context(|| format!("failed to read {}", path.display()))?;
    serde_yaml::from_str(&source).with_context(|| format!("failed to parse {}", path.display()))
}

/// Validate the document and emit its instructions.
///
/// # Errors
///
/// Any validation failure, duplicate ID or unknown platform in the
/// document.
pub fn validate(generator: &Generator, document: &Value) -> Result<Vec<Instruction>> {
    let program = generator
        .generate_document(document)
        .context("invalid configuration")?;
    info!(instructions = program.len(), "configuration is valid");
    Ok(program)
}

/// Validate the document and render it with the chosen back end.
///
/// # Errors
///
/// Everything [`validate`] rejects, or a back end that cannot render.
pub fn generate(document: &Value, options: &GenerateOptions) -> Result<String> {
    let generator = build_generator()?;
    let program = validate(&generator, document)?;
    let backend = options.backend();
    let rendered = backend
        .render(&program)
        .with_context(|| format!("failed to render {} output", backend.name()))?;
    Ok(rendered)
}
