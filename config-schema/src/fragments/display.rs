use serde::Serialize;

use crate::error::Result;
use crate::map::ConfigMap;
use crate::types::Lambda;
use crate::validation;

pub const CONF_LAMBDA: &str = "lambda";

/// Options every display accepts.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct BasicDisplaySchema {
    /// Writer invoked on each update to draw the content.
    pub lambda: Option<Lambda>,
}

impl BasicDisplaySchema {
    /// # Errors
    ///
    /// Fails when `lambda` is not a string.
    pub fn extract(map: &mut ConfigMap) -> Result<Self> {
        Ok(Self {
            lambda: map.optional(CONF_LAMBDA, validation::lambda)?,
        })
    }
}
