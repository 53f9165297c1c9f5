//! Corrosion rate and remaining-life calculator
//!
//! Rates are derived from two thickness records. Inputs that cannot yield a
//! meaningful rate (too short an interval, apparent metal growth) come back
//! flagged invalid with a warning instead of a clamped number.

pub mod life;
pub mod rate;

#[cfg(test)]
pub mod tests;

pub use life::{next_inspection_interval, remaining_life};
pub use rate::governing_rate;

use crate::Result;
use crate::app::models::RateUnit;
use crate::config::CorrosionConfig;

/// Derives corrosion rates under configurable validity gates
#[derive(Debug, Clone, Default)]
pub struct CorrosionCalculator {
    config: CorrosionConfig,
}

impl CorrosionCalculator {
    pub fn new(config: CorrosionConfig) -> Result<Self> {
        config.validate()?;
        Ok(Self { config })
    }

    /// Unit used when the caller does not choose one
    pub fn unit(&self) -> RateUnit {
        self.config.rate_unit
    }

    pub fn config(&self) -> &CorrosionConfig {
        &self.config
    }
}
