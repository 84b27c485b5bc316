use config_schema::{I2cAddress, UpdateInterval};
use serde::Serialize;

use crate::expression::Expression;
use crate::types::ClassRef;

/// One step of generated initialization code.
///
/// Components emit these as plain data; a [`crate::Backend`] decides how
/// they turn into source text.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "op", rename_all = "snake_case")]
pub enum Instruction {
    /// Construct the device object and bind it to `id`.
    NewVariable { id: String, class: ClassRef },

    /// Hand the object to the display subsystem, which also schedules its
    /// polling updates.
    RegisterDisplay {
        var: String,
        component: String,
        update_interval: UpdateInterval,
    },

    /// Attach the object to an I2C bus at `address`. `bus: None` is the
    /// default bus.
    RegisterI2cDevice {
        var: String,
        bus: Option<String>,
        address: I2cAddress,
    },

    /// `var->method(args...)`
    Call {
        var: String,
        method: String,
        args: Vec<Expression>,
    },
}

impl Instruction {
    pub fn call(var: &str, method: &str, args: Vec<Expression>) -> Self {
        Self::Call {
            var: var.to_string(),
            method: method.to_string(),
            args,
        }
    }

    pub fn is_registration(&self) -> bool {
        matches!(
            self,
            Self::RegisterDisplay { .. } | Self::RegisterI2cDevice { .. }
        )
    }

    /// Method name for [`Instruction::Call`].
    pub fn method(&self) -> Option<&str> {
        match self {
            Self::Call { method, .. } => Some(method),
            _ => None,
        }
    }
}
