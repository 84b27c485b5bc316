use serde_yaml::Value;

use crate::error::Result;
use crate::map::ConfigMap;

/// A component's complete configuration schema.
///
/// Schemas are composed statically: a component struct embeds the shared
/// fragments from [`crate::fragments`] and calls their `extract` functions
/// from its own [`ConfigSchema::extract`], all over the same [`ConfigMap`].
pub trait ConfigSchema: Sized {
    /// Name used in error messages, e.g. `lcd_grove_rgb`.
    const COMPONENT: &'static str;

    /// Pull every recognised option out of `map`.
    ///
    /// # Errors
    ///
    /// Returns the first option that fails validation.
    fn extract(map: &mut ConfigMap) -> Result<Self>;

    /// Validate a whole dictionary, rejecting unknown options.
    ///
    /// # Errors
    ///
    /// Returns the first validation failure.
    fn validate(value: &Value) -> Result<Self> {
        let mut map = ConfigMap::from_value(value, Self::COMPONENT)?;
        let config = Self::extract(&mut map)?;
        map.finish()?;
        Ok(config)
    }
}
