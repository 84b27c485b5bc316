use std::fmt;

use serde::Serialize;

// ============================================================================
// C++ TYPES
// ============================================================================

/// A C++ class generated variables are instances of.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
pub struct ClassRef {
    pub namespace: String,
    pub name: String,
}

impl ClassRef {
    pub fn new(namespace: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            namespace: namespace.into(),
            name: name.into(),
        }
    }

    /// Qualified name, e.g. `lcd_grove_rgb::LCDGroveRGB`.
    pub fn full_name(&self) -> String {
        if self.namespace.is_empty() {
            self.name.clone()
        } else {
            format!("{}::{}", self.namespace, self.name)
        }
    }

    /// `T &`, the type lambdas receive their `it` argument as.
    pub fn reference(&self) -> CppType {
        CppType(format!("{} &", self.full_name()))
    }

    /// `T *`, the type of a generated variable.
    pub fn pointer(&self) -> CppType {
        CppType(format!("{} *", self.full_name()))
    }
}

impl fmt::Display for ClassRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.full_name())
    }
}

/// A C++ type spelled out as source text.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
#[serde(transparent)]
pub struct CppType(String);

impl CppType {
    pub fn void() -> Self {
        Self("void".to_string())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for CppType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_class_spellings() {
        let class = ClassRef::new("lcd_grove_rgb", "LCDGroveRGB");
        assert_eq!(class.full_name(), "lcd_grove_rgb::LCDGroveRGB");
        assert_eq!(class.reference().as_str(), "lcd_grove_rgb::LCDGroveRGB &");
        assert_eq!(class.pointer().as_str(), "lcd_grove_rgb::LCDGroveRGB *");
        assert_eq!(ClassRef::new("", "Component").full_name(), "Component");
    }
}
