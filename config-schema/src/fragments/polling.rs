use serde::Serialize;

use crate::error::Result;
use crate::map::ConfigMap;
use crate::types::UpdateInterval;
use crate::validation;

pub const CONF_UPDATE_INTERVAL: &str = "update_interval";

/// Options of a component the scheduler polls periodically.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct PollingComponentSchema {
    pub update_interval: UpdateInterval,
}

impl PollingComponentSchema {
    /// `default_interval` applies when `update_interval` is omitted.
    ///
    /// # Errors
    ///
    /// Fails when `update_interval` is not `never` or a valid time period.
    pub fn extract(map: &mut ConfigMap, default_interval: UpdateInterval) -> Result<Self> {
        Ok(Self {
            update_interval: map.optional_or(
                CONF_UPDATE_INTERVAL,
                default_interval,
                validation::update_interval,
            )?,
        })
    }
}
