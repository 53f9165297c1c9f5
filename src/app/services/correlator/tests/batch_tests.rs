//! Tests for matching followed by corrosion rates

use crate::app::models::{Location, RateUnit};
use crate::app::services::correlator::LocationCorrelator;
use crate::app::services::corrosion::CorrosionCalculator;

use super::{existing_at, existing_shell, last_reading, reading, shell_reading};

#[test]
fn test_process_batch_collects_valid_rates() {
    let correlator = LocationCorrelator::default();
    let calculator = CorrosionCalculator::default();
    let existing = vec![
        existing_shell("a", "1", 2, 0).with_last_reading(last_reading(0.500, 2014)),
        existing_shell("b", "2", 2, 180),
    ];
    // Readings are 0.480 in, taken in 2024
    let new = vec![shell_reading("1", 2, 0), shell_reading("2", 2, 180)];

    let batch = correlator.process_batch(&calculator, &existing, &new, &[]);

    assert_eq!(batch.match_result.matched.len(), 2);
    assert_eq!(batch.corrosion_rates.len(), 1);

    let rate = &batch.corrosion_rates[0];
    assert_eq!(rate.existing_id, "a");
    assert_eq!(rate.new_index, 0);
    assert!(rate.rate.is_valid);
    assert_eq!(rate.rate.unit, RateUnit::MilsPerYear);
    assert_eq!(rate.rate.rate, Some(2.0));
}

#[test]
fn test_process_batch_drops_invalid_rates() {
    let correlator = LocationCorrelator::default();
    let calculator = CorrosionCalculator::default();
    // Previous reading thinner than current: apparent growth
    let existing = vec![
        existing_at("a", Location::new("7", "Shell", "3-90"))
            .with_last_reading(last_reading(0.450, 2019)),
    ];
    let new = vec![reading(Location::new("7", "Shell", "3-90"))];

    let batch = correlator.process_batch(&calculator, &existing, &new, &[]);

    assert_eq!(batch.match_result.matched.len(), 1);
    assert!(batch.corrosion_rates.is_empty());
}

#[test]
fn test_process_batch_unmatched_readings_yield_no_rates() {
    let correlator = LocationCorrelator::default();
    let calculator = CorrosionCalculator::default();
    let existing = vec![
        existing_shell("a", "1", 2, 0).with_last_reading(last_reading(0.500, 2014)),
    ];
    let new = vec![reading(Location::new("X", "South Head", "center"))];

    let batch = correlator.process_batch(&calculator, &existing, &new, &[]);

    assert_eq!(batch.match_result.unmatched.len(), 1);
    assert!(batch.corrosion_rates.is_empty());
}

#[test]
fn test_process_batch_pairs_rate_with_matched_record_when_ids_repeat() {
    let correlator = LocationCorrelator::default();
    let calculator = CorrosionCalculator::default();
    let existing = vec![
        existing_shell("dup", "1", 2, 0).with_last_reading(last_reading(0.600, 2014)),
        existing_shell("dup", "2", 5, 90).with_last_reading(last_reading(0.500, 2014)),
    ];
    let new = vec![shell_reading("2", 5, 90)];

    let batch = correlator.process_batch(&calculator, &existing, &new, &[]);

    assert_eq!(batch.match_result.matched.len(), 1);
    assert_eq!(batch.match_result.matched[0].existing_index, 1);
    assert_eq!(batch.corrosion_rates.len(), 1);
    // 0.500 -> 0.480 over 10 years, not 0.600 -> 0.480
    assert_eq!(batch.corrosion_rates[0].rate.rate, Some(2.0));
}
