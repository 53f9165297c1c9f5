//! Fitness-for-Service Level 1 screener
//!
//! Screens measured metal loss against the minimum required thickness,
//! projects remaining life and the next inspection interval, and recomputes
//! MAWP at the remaining thickness with the component's ASME formula.
//! Components below minimum thickness short-circuit to an immediate-action
//! result; local thin areas too large for Level 1 are referred to Level 2/3.

pub mod general;
pub mod local;

#[cfg(test)]
pub mod tests;

use crate::Result;
use crate::app::services::asme::AsmeEngine;
use crate::config::FfsConfig;

/// Level 1 screening against configurable limits
#[derive(Debug, Clone, Default)]
pub struct FfsScreener {
    config: FfsConfig,
    engine: AsmeEngine,
}

impl FfsScreener {
    pub fn new(config: FfsConfig, engine: AsmeEngine) -> Result<Self> {
        config.validate()?;
        Ok(Self { config, engine })
    }

    pub fn config(&self) -> &FfsConfig {
        &self.config
    }
}
