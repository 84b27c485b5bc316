use std::sync::Arc;

use codegen::{ClassRef, ComponentConfig, ComponentPlatform, Instruction};
use config_schema::{ConfigSchema, Id};
use serde_yaml::Value;

use crate::schema::LcdGroveRgbConfig;
use crate::to_code::{lcd_class, to_code};

pub const PLATFORM_NAME: &str = "lcd_grove_rgb";
pub const DOMAIN: &str = "display";

/// `display:` platform entry point for the Grove RGB LCD.
#[derive(Debug, Clone, Copy, Default)]
pub struct LcdGroveRgbPlatform;

impl LcdGroveRgbPlatform {
    pub fn shared() -> Arc<dyn ComponentPlatform> {
        Arc::new(Self)
    }
}

impl ComponentPlatform for LcdGroveRgbPlatform {
    fn name(&self) -> &str {
        PLATFORM_NAME
    }

    fn domain(&self) -> &str {
        DOMAIN
    }

    fn class(&self) -> ClassRef {
        lcd_class()
    }

    fn validate(&self, config: &Value) -> config_schema::Result<Box<dyn ComponentConfig>> {
        Ok(Box::new(LcdGroveRgbConfig::validate(config)?))
    }
}

impl ComponentConfig for LcdGroveRgbConfig {
    fn id(&self) -> &Id {
        &self.id
    }

    fn to_code(&self, var: &str) -> Vec<Instruction> {
        to_code(self, var)
    }
}
