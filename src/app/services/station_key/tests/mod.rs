//! Test fixtures for station key resolution

use crate::app::models::{CorrelationMapping, Location};

mod classifier_tests;

/// Shell reading with explicit slice and angle
pub fn explicit_shell(id: &str, slice: u32, angle: u32) -> Location {
    Location::new(id, "Shell", "").with_slice_angle(slice, angle)
}

/// Mapping from an old CML number to a new one
pub fn mapping(baseline: &str, baseline_desc: &str, current: &str, current_desc: &str) -> CorrelationMapping {
    CorrelationMapping {
        baseline_cml: baseline.to_string(),
        baseline_description: baseline_desc.to_string(),
        current_cml: current.to_string(),
        current_description: current_desc.to_string(),
    }
}
