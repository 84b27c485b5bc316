use std::fmt;

use config_schema::Id;
use serde_yaml::Value;

use crate::instruction::Instruction;
use crate::types::ClassRef;

// ============================================================================
// COMPONENT PLATFORM TRAIT
// ============================================================================

/// Core trait every component platform implements.
///
/// A platform owns one `platform:` name inside a domain such as `display`.
/// It validates an entry into a [`ComponentConfig`], which later emits the
/// entry's initialization instructions.
pub trait ComponentPlatform: Send + Sync {
    /// Value of the `platform:` option, e.g. `lcd_grove_rgb`.
    fn name(&self) -> &str;

    /// Top-level section the platform lives under, e.g. `display`.
    fn domain(&self) -> &str;

    /// Class of the variable each entry generates.
    fn class(&self) -> ClassRef;

    /// Validate one entry; the `platform` key has already been removed.
    ///
    /// # Errors
    ///
    /// Returns the first validation failure. No instructions exist yet.
    fn validate(&self, config: &Value) -> config_schema::Result<Box<dyn ComponentConfig>>;
}

// ============================================================================
// VALIDATED CONFIGURATION
// ============================================================================

/// A validated entry, ready to emit code.
pub trait ComponentConfig: fmt::Debug + Send + Sync {
    fn id(&self) -> &Id;

    /// Initialization instructions for the variable named `var`, in order.
    fn to_code(&self, var: &str) -> Vec<Instruction>;
}
