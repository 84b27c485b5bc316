use std::collections::HashSet;

use tracing::debug;

use crate::error::{CodegenError, Result};
use crate::types::ClassRef;

/// Tracks the variable names already taken in one generated program.
#[derive(Debug, Default)]
pub struct IdRegistry {
    used: HashSet<String>,
}

impl IdRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Reserve a user-declared name.
    ///
    /// # Errors
    ///
    /// [`CodegenError::DuplicateId`] when the name is already taken.
    pub fn declare(&mut self, name: &str) -> Result<String> {
        if !self.used.insert(name.to_string()) {
            return Err(CodegenError::DuplicateId(name.to_string()));
        }
        Ok(name.to_string())
    }

    /// Derive an unused name from the class, e.g. `lcd_grove_rgb_lcdgrovergb`,
    /// then `..._1`, `..._2`.
    pub fn generate(&mut self, class: &ClassRef) -> String {
        let base = auto_id_base(class);
        let name = if self.used.contains(&base) {
            (1u32..)
                .map(|i| format!("{base}_{i}"))
                .find(|candidate| !self.used.contains(candidate))
                .unwrap_or_else(|| base.clone())
        } else {
            base
        };
        debug!(id = %name, class = %class, "generated id");
        self.used.insert(name.clone());
        name
    }

}

fn auto_id_base(class: &ClassRef) -> String {
    class
        .full_name()
        .replace("::", "_")
        .to_lowercase()
        .chars()
        .filter(|c| c.is_ascii_alphanumeric() || *c == '_')
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn class() -> ClassRef {
        ClassRef::new("lcd_grove_rgb", "LCDGroveRGB")
    }

    #[test]
    fn test_generated_ids_are_unique() {
        let mut ids = IdRegistry::new();
        assert_eq!(ids.generate(&class()), "lcd_grove_rgb_lcdgrovergb");
        assert_eq!(ids.generate(&class()), "lcd_grove_rgb_lcdgrovergb_1");
        assert_eq!(ids.generate(&class()), "lcd_grove_rgb_lcdgrovergb_2");
    }

    #[test]
    fn test_generated_id_skips_declared_name() {
        let mut ids = IdRegistry::new();
        ids.declare("lcd_grove_rgb_lcdgrovergb").unwrap();
        assert_eq!(ids.generate(&class()), "lcd_grove_rgb_lcdgrovergb_1");
    }

    #[test]
    fn test_duplicate_declaration() {
        let mut ids = IdRegistry::new();
        ids.declare("lcd").unwrap();
        let err = ids.declare("lcd").unwrap_err();
        assert_eq!(err.to_string(), "ID lcd redefined!");
        assert_eq!(ids.generate(&class()), "lcd_grove_rgb_lcdgrovergb");
    }
}
