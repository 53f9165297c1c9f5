//! Test fixtures for the ASME engine

use crate::app::models::{DesignInput, MawpInput};

mod governing_tests;
mod heads_tests;

/// SA-516-70 at moderate temperature, 30 in inside radius, full RT
pub fn design(pressure: f64) -> DesignInput {
    DesignInput::new(pressure, 30.0, 20_000.0, 1.0)
}

pub fn at_thickness(actual_thickness: f64) -> MawpInput {
    MawpInput::new(actual_thickness, 30.0, 20_000.0, 1.0)
}

pub fn assert_close(actual: f64, expected: f64) {
    assert!(
        (actual - expected).abs() <= 1e-6 * expected.abs().max(1.0),
        "expected {expected}, got {actual}"
    );
}
