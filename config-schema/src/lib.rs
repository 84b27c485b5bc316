//! Configuration schema toolkit for firmware component plugins
//!
//! This crate provides the building blocks a component uses to turn a raw
//! YAML dictionary into a typed, validated configuration record:
//! - **Primitives** ([`validation`]): integers, ranges, booleans, I2C
//!   addresses, `WIDTHxHEIGHT` dimensions, time periods, IDs and lambdas
//! - **Option cursor** ([`ConfigMap`]): required/optional lookup with
//!   defaults, error paths, and rejection of unknown options
//! - **Shared fragments** ([`fragments`]): basic display, polling component
//!   and I2C device options
//! - **Static composition** ([`ConfigSchema`]): a component embeds fragments
//!   in its own struct instead of merging dictionaries at runtime
//!
//! Every failure is a [`ValidationError`] carrying a human-readable message
//! and the option path it occurred at.
//!
//! # Example
//!
//! ```rust
//! use config_schema::{fragments, validation, ConfigMap, ConfigSchema, I2cAddress, Result};
//!
//! struct Backlight {
//!     on: bool,
//!     i2c: fragments::I2cDeviceSchema,
//! }
//!
//! impl ConfigSchema for Backlight {
//!     const COMPONENT: &'static str = "backlight";
//!
//!     fn extract(map: &mut ConfigMap) -> Result<Self> {
//!         Ok(Self {
//!             on: map.optional_or("on", true, validation::boolean)?,
//!             i2c: fragments::I2cDeviceSchema::extract(map, I2cAddress::from_7bit(0x62))?,
//!         })
//!     }
//! }
//!
//! let value = serde_yaml::from_str("{on: false, address: 0x30}").unwrap();
//! let backlight = Backlight::validate(&value).unwrap();
//! assert!(!backlight.on);
//! assert_eq!(backlight.i2c.address.value(), 0x30);
//! ```

pub mod error;
pub mod fragments;
pub mod map;
pub mod schema;
pub mod types;
pub mod validation;

pub use error::*;
pub use map::ConfigMap;
pub use schema::ConfigSchema;
pub use types::*;
