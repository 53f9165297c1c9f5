//! Local thin area screening

use std::f64::consts::PI;

use tracing::debug;

use crate::app::models::{FfsResult, LocalThinAreaInput};

use super::FfsScreener;

/// Circumferential extent of a thin area in degrees of the shell circumference
pub fn circumferential_extent_deg(circumferential_length: f64, inside_radius: f64) -> f64 {
    circumferential_length / (2.0 * PI * inside_radius) * 360.0
}

impl FfsScreener {
    /// Level 1 local thin area assessment
    ///
    /// A thin area wider than the configured extent (180 degrees by default)
    /// is outside Level 1 and returns a zero life, zero MAWP result that
    /// requires a higher-level assessment. Otherwise the general metal loss
    /// screening applies, with thin-area warnings appended.
    pub fn assess_local_thin_area(&self, input: &LocalThinAreaInput) -> FfsResult {
        let general = &input.general;
        let extent = circumferential_extent_deg(input.circumferential_length, general.inside_radius);

        if extent > self.config.lta_max_extent_deg {
            debug!("Local thin area spans {:.1} degrees; Level 1 not applicable", extent);
            return FfsResult {
                acceptable: false,
                remaining_life_years: Some(0.0),
                next_inspection_years: 0.0,
                recalculated_mawp: 0.0,
                critical: false,
                requires_higher_level: true,
                recommendations: vec![
                    "Perform a Level 2 or Level 3 assessment for this local thin area".to_string(),
                ],
                warnings: vec![format!(
                    "Local thin area extends {:.1} degrees around the circumference, beyond the {} degree Level 1 limit",
                    extent, self.config.lta_max_extent_deg
                )],
            };
        }

        let mut result = self.assess_general_metal_loss(general);

        let diameter = 2.0 * general.inside_radius;
        if input.axial_length > diameter {
            result.warnings.push(format!(
                "Local thin area axial length {} in exceeds the shell diameter {} in",
                input.axial_length, diameter
            ));
        }

        result
    }
}
