use config_schema::{validation, Id, ValidationError};
use serde_yaml::{Mapping, Value};
use tracing::{debug, info, warn};

use crate::error::{CodegenError, Result};
use crate::id::IdRegistry;
use crate::instruction::Instruction;
use crate::plugin::ComponentConfig;
use crate::registry::PlatformRegistry;
use crate::types::ClassRef;

pub const CONF_PLATFORM: &str = "platform";

/// Validated entry waiting for its variable name.
#[derive(Debug)]
struct Pending {
    platform: String,
    class: ClassRef,
    config: Box<dyn ComponentConfig>,
}

/// Drives configuration documents through validate-all, then emit-all.
///
/// Nothing is emitted until every entry has validated and every ID has
/// resolved, so a failure never leaves a partial instruction list.
pub struct Generator {
    registry: PlatformRegistry,
}

impl Generator {
    pub fn new(registry: PlatformRegistry) -> Self {
        Self { registry }
    }

    pub fn registry(&self) -> &PlatformRegistry {
        &self.registry
    }

    /// Generate every registered platform entry in a whole document.
    ///
    /// Sections with no registered platforms (e.g. `i2c:` or `wifi:`) belong
    /// to other tooling and are skipped.
    ///
    /// # Errors
    ///
    /// The first validation failure, a duplicate ID, or an unregistered
    /// `platform:` inside a known domain.
    pub fn generate_document(&self, document: &Value) -> Result<Vec<Instruction>> {
        let sections = match document {
            Value::Mapping(sections) => sections,
            Value::Null => return Ok(Vec::new()),
            other => {
                return Err(ValidationError::new(format!(
                    "configuration must be a dictionary, got {}",
                    validation::describe(other)
                ))
                .into())
            }
        };

        let mut pending = Vec::new();
        for (key, section) in sections {
            let domain = validation::describe(key);
            if !self.registry.has_domain(&domain) {
                debug!(section = %domain, "skipping section without registered platforms");
                continue;
            }
            for (index, entry) in validation::ensure_list(section).iter().enumerate() {
                let validated = self
                    .validate_entry(&domain, entry)
                    .map_err(|e| prefix(e, &[domain.as_str(), index.to_string().as_str()]))?;
                pending.push(validated);
            }
        }

        if pending.is_empty() {
            warn!("no components found in configuration");
        }
        emit_all(pending)
    }

    /// Generate a single entry whose `platform` is already known.
    ///
    /// # Errors
    ///
    /// The first validation failure or an unregistered platform.
    pub fn generate_component(
        &self,
        domain: &str,
        platform: &str,
        config: &Value,
    ) -> Result<Vec<Instruction>> {
        let target = self.registry.get(domain, platform)?;
        let validated = target.validate(config)?;
        emit_all(vec![Pending {
            platform: target.name().to_string(),
            class: target.class(),
            config: validated,
        }])
    }

    fn validate_entry(&self, domain: &str, entry: &Value) -> Result<Pending> {
        let Value::Mapping(entry) = entry else {
            return Err(ValidationError::new(format!(
                "expected a dictionary for [{domain}], got {}",
                validation::describe(entry)
            ))
            .into());
        };
        let mut entry: Mapping = entry.clone();
        let platform = match entry.remove(CONF_PLATFORM) {
            Some(value) => validation::string(&value).map_err(|e| e.at(CONF_PLATFORM))?,
            None => {
                return Err(ValidationError::new(format!(
                    "'{CONF_PLATFORM}' is a required option for [{domain}]"
                ))
                .into())
            }
        };
        let target = self.registry.get(domain, &platform)?;
        let config = target.validate(&Value::Mapping(entry))?;
        Ok(Pending {
            platform,
            class: target.class(),
            config,
        })
    }
}

/// Locate a validation error inside the document.
fn prefix(err: CodegenError, segments: &[&str]) -> CodegenError {
    match err {
        CodegenError::Validation(inner) => segments
            .iter()
            .rev()
            .fold(inner, |acc, segment| acc.at(*segment))
            .into(),
        other => other,
    }
}

fn emit_all(pending: Vec<Pending>) -> Result<Vec<Instruction>> {
    // Declared IDs first so generated names never take a user's name
    let mut ids = IdRegistry::new();
    let mut names: Vec<Option<String>> = Vec::with_capacity(pending.len());
    for entry in &pending {
        names.push(match entry.config.id() {
            Id::Declared(name) => Some(ids.declare(name)?),
            Id::Auto => None,
        });
    }

    let mut instructions = Vec::new();
    for (entry, name) in pending.iter().zip(names) {
        let var = name.unwrap_or_else(|| ids.generate(&entry.class));
        let emitted = entry.config.to_code(&var);
        info!(
            platform = %entry.platform,
            id = %var,
            instructions = emitted.len(),
            "generated component"
        );
        instructions.extend(emitted);
    }
    Ok(instructions)
}
