//! Grove RGB backlight LCD component
//!
//! Validates a `display:` entry with `platform: lcd_grove_rgb` and emits the
//! calls that configure the `lcd_grove_rgb::LCDGroveRGB` driver:
//!
//! ```yaml
//! display:
//!   - platform: lcd_grove_rgb
//!     id: lcd
//!     dimensions: 16x2
//!     backlight: 0x62
//!     user_characters:
//!       - position: 0
//!         data: [0, 10, 10, 0, 17, 14, 0, 0]
//!     lambda: |-
//!       it.print("Hello!");
//! ```
//!
//! The driver itself, its I2C traffic and the runtime scheduler live in the
//! firmware; this crate only checks the configuration and orders the wiring.
//!
//! # Example
//!
//! ```rust
//! use config_schema::ConfigSchema;
//! use lcd_grove_rgb::{to_code, LcdGroveRgbConfig};
//!
//! let value = serde_yaml::from_str("dimensions: 20x4").unwrap();
//! let config = LcdGroveRgbConfig::validate(&value).unwrap();
//! let program = to_code(&config, "lcd");
//! assert_eq!(program[3].method(), Some("set_dimensions"));
//! ```

pub mod platform;
pub mod schema;
pub mod to_code;

pub use platform::{LcdGroveRgbPlatform, DOMAIN, PLATFORM_NAME};
pub use schema::*;
pub use to_code::{lcd_class, to_code};
