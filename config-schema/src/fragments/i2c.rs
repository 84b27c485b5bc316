use serde::Serialize;

use crate::error::Result;
use crate::map::ConfigMap;
use crate::types::I2cAddress;
use crate::validation;

pub const CONF_ADDRESS: &str = "address";
pub const CONF_I2C_ID: &str = "i2c_id";

/// Options of a device attached to an I2C bus.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct I2cDeviceSchema {
    /// Bus to attach to; `None` selects the default bus.
    pub bus: Option<String>,
    pub address: I2cAddress,
}

impl I2cDeviceSchema {
    /// `default_address` applies when `address` is omitted.
    ///
    /// # Errors
    ///
    /// Fails on an out-of-range address or an invalid bus ID.
    pub fn extract(map: &mut ConfigMap, default_address: I2cAddress) -> Result<Self> {
        let bus = map
            .optional(CONF_I2C_ID, validation::id)?
            .and_then(|id| id.declared().map(str::to_string));
        let address = map.optional_or(CONF_ADDRESS, default_address, validation::i2c_address)?;
        Ok(Self { bus, address })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn extract(src: &str) -> Result<I2cDeviceSchema> {
        let value = serde_yaml::from_str(src).unwrap();
        let mut map = ConfigMap::from_value(&value, "test").unwrap();
        I2cDeviceSchema::extract(&mut map, I2cAddress::from_7bit(0x3E))
    }

    #[test]
    fn test_defaults() {
        let i2c = extract("{}").unwrap();
        assert_eq!(i2c.address.value(), 0x3E);
        assert_eq!(i2c.bus, None);
    }

    #[test]
    fn test_bus_and_address() {
        let i2c = extract("{i2c_id: bus_b, address: 0x27}").unwrap();
        assert_eq!(i2c.address.value(), 0x27);
        assert_eq!(i2c.bus.as_deref(), Some("bus_b"));
    }

    #[test]
    fn test_out_of_range_address_has_path() {
        let err = extract("{address: 200}").unwrap_err();
        assert_eq!(err.path(), ["address"]);
    }
}
