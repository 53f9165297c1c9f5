//! Test fixtures for FFS screening

use crate::app::models::{ComponentKind, FfsInput, LocalThinAreaInput};

mod general_tests;

/// Shell with 0.100 in of metal above minimum, corroding at 5 mpy
pub fn shell_input() -> FfsInput {
    FfsInput {
        component_type: ComponentKind::Shell,
        remaining_thickness: 0.480,
        minimum_required_thickness: 0.380,
        corrosion_rate: 0.005,
        future_corrosion_allowance: 0.020,
        operating_pressure: 150.0,
        inside_radius: 30.0,
        allowable_stress: 20_000.0,
        joint_efficiency: 1.0,
        crown_radius: None,
    }
}

pub fn thin_area(circumferential_length: f64, axial_length: f64) -> LocalThinAreaInput {
    LocalThinAreaInput {
        general: shell_input(),
        circumferential_length,
        axial_length,
    }
}
