//! Matching followed by corrosion rate derivation

use serde::{Deserialize, Serialize};
use tracing::{debug, info};

use crate::app::models::{
    CorrelationMapping, CorrosionRateResult, ExistingLocation, MatchResult, Reading,
};
use crate::app::services::corrosion::CorrosionCalculator;

use super::LocationCorrelator;

/// A valid corrosion rate for one accepted match
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MatchedCorrosionRate {
    pub existing_id: String,
    pub new_index: usize,
    #[serde(flatten)]
    pub rate: CorrosionRateResult,
}

/// Output of [`LocationCorrelator::process_batch`]
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct BatchResult {
    pub match_result: MatchResult,

    /// Valid rates only; invalid pairs are dropped
    pub corrosion_rates: Vec<MatchedCorrosionRate>,
}

impl LocationCorrelator {
    /// Match new readings, then derive a corrosion rate for every accepted
    /// match whose existing location carries a previous thickness
    pub fn process_batch(
        &self,
        calculator: &CorrosionCalculator,
        existing: &[ExistingLocation],
        new_readings: &[Reading],
        correlation_mappings: &[CorrelationMapping],
    ) -> BatchResult {
        let match_result = self.match_readings(existing, new_readings, correlation_mappings);

        let corrosion_rates: Vec<MatchedCorrosionRate> = match_result
            .matched
            .iter()
            .filter_map(|matched| {
                let previous = existing.get(matched.existing_index)?.last_reading?;
                let current = new_readings.get(matched.new_index)?.thickness_record();

                let rate = calculator.rate(&previous, &current, calculator.unit());
                if !rate.is_valid {
                    debug!(
                        "Skipping rate for {}: {}",
                        matched.existing_id,
                        rate.warning.as_deref().unwrap_or("invalid")
                    );
                    return None;
                }

                Some(MatchedCorrosionRate {
                    existing_id: matched.existing_id.clone(),
                    new_index: matched.new_index,
                    rate,
                })
            })
            .collect();

        info!(
            "Derived {} corrosion rates from {} matches",
            corrosion_rates.len(),
            match_result.matched.len()
        );

        BatchResult {
            match_result,
            corrosion_rates,
        }
    }
}
