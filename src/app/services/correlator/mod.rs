//! Cross-inspection location correlator
//!
//! Matches the readings of a new inspection to locations already on record.
//! Scoring is additive over resolved geometry behind a hard component-group
//! gate; near ties are reported as conflicts for a human instead of being
//! broken by score order.
//!
//! A single [`LocationCorrelator::match_readings`] call consumes each existing
//! location at most once, so the loop over new readings runs sequentially.

pub mod batch;
pub mod matcher;
pub mod scoring;

#[cfg(test)]
pub mod tests;

pub use batch::{BatchResult, MatchedCorrosionRate};
pub use scoring::{ScoreBreakdown, angles_adjacent};

use crate::Result;
use crate::config::MatchOptions;

/// Correlates new readings against existing locations
#[derive(Debug, Clone, Default)]
pub struct LocationCorrelator {
    options: MatchOptions,
}

impl LocationCorrelator {
    /// Create a correlator, rejecting inconsistent options
    pub fn new(options: MatchOptions) -> Result<Self> {
        options.validate()?;
        Ok(Self { options })
    }

    pub fn options(&self) -> &MatchOptions {
        &self.options
    }
}
