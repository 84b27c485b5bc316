//! Schema fragments shared between components.
//!
//! A fragment reads its own options out of a [`crate::ConfigMap`] and hands
//! back a typed struct the owning component embeds.

pub mod display;
pub mod i2c;
pub mod polling;

pub use display::BasicDisplaySchema;
pub use i2c::I2cDeviceSchema;
pub use polling::PollingComponentSchema;

use crate::error::Result;
use crate::map::ConfigMap;
use crate::types::Id;
use crate::validation;

pub const CONF_ID: &str = "id";

/// The `id` option; omitted IDs are generated later from the class name.
///
/// # Errors
///
/// Fails when the declared ID is not a usable identifier.
pub fn generate_id(map: &mut ConfigMap) -> Result<Id> {
    map.optional_or(CONF_ID, Id::Auto, validation::id)
}
