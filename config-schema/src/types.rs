use std::fmt;

use serde::{Deserialize, Serialize};

// ============================================================================
// VALIDATED VALUE TYPES
// ============================================================================

/// Width and height of a display, both at least 1.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Dimensions {
    pub width: u32,
    pub height: u32,
}

impl Dimensions {
    pub const fn new(width: u32, height: u32) -> Self {
        Self { width, height }
    }
}

impl fmt::Display for Dimensions {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}x{}", self.width, self.height)
    }
}

/// 7-bit I2C device address.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct I2cAddress(u8);

impl I2cAddress {
    pub const MAX: u8 = 0x7F;

    /// Returns `None` for values outside the 7-bit range.
    pub const fn new(address: u8) -> Option<Self> {
        if address <= Self::MAX {
            Some(Self(address))
        } else {
            None
        }
    }

    /// Keeps the low 7 bits; for constants known to be in range.
    pub const fn from_7bit(address: u8) -> Self {
        Self(address & Self::MAX)
    }

    pub const fn value(self) -> u8 {
        self.0
    }
}

impl fmt::Display for I2cAddress {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "0x{:02X}", self.0)
    }
}

/// How often a polling component runs its update.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum UpdateInterval {
    Milliseconds(u32),
    Never,
}

impl UpdateInterval {
    /// Scheduler value meaning "never run".
    pub const NEVER_MILLIS: u32 = u32::MAX;

    pub const fn as_millis(self) -> u32 {
        match self {
            Self::Milliseconds(ms) => ms,
            Self::Never => Self::NEVER_MILLIS,
        }
    }
}

impl fmt::Display for UpdateInterval {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Milliseconds(ms) => write!(f, "{ms}ms"),
            Self::Never => f.write_str("never"),
        }
    }
}

/// Source text of a user lambda. Compiled later by the firmware toolchain,
/// never interpreted here.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Lambda(String);

impl Lambda {
    pub fn new(source: impl Into<String>) -> Self {
        Self(source.into())
    }

    pub fn source(&self) -> &str {
        &self.0
    }
}

/// Identifier of a generated variable.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Id {
    /// Written by the user under `id:`.
    Declared(String),
    /// Omitted; a unique name is derived from the variable's class.
    Auto,
}

impl Id {
    pub fn declared(&self) -> Option<&str> {
        match self {
            Self::Declared(name) => Some(name),
            Self::Auto => None,
        }
    }
}
