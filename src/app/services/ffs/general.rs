//! General metal loss screening

use tracing::debug;

use crate::app::models::{ComponentKind, FfsInput, FfsResult, HeadType, MawpInput, RemainingLife};
use crate::app::services::corrosion::{next_inspection_interval, remaining_life};
use crate::config::TorisphericalMethod;
use crate::constants::ffs::LEVEL_1_REF;

use super::FfsScreener;

/// MAWP at the remaining thickness, or the reason it could not be computed
struct RecalculatedMawp {
    value: Option<f64>,
    warnings: Vec<String>,
}

impl FfsScreener {
    /// Level 1 general metal loss assessment
    ///
    /// Remaining thickness below the minimum required thickness returns a
    /// critical, non-acceptable, zero-life result without further arithmetic.
    pub fn assess_general_metal_loss(&self, input: &FfsInput) -> FfsResult {
        if input.remaining_thickness < input.minimum_required_thickness {
            debug!(
                "{} below minimum: {} < {}",
                input.component_type, input.remaining_thickness, input.minimum_required_thickness
            );
            return below_minimum(input);
        }

        let life = remaining_life(
            input.remaining_thickness,
            input.minimum_required_thickness,
            input.corrosion_rate,
        );
        let next_inspection_years = next_inspection_interval(
            life,
            self.config.interval_safety_factor,
            self.config.max_inspection_interval_years,
        );

        let mawp = self.recalculate_mawp(input);
        let recalculated_mawp = mawp.value.unwrap_or(0.0);

        let acceptable = input.remaining_thickness
            >= input.minimum_required_thickness + input.future_corrosion_allowance
            && !life.is_critical()
            && !life.is_invalid_rate();

        let mut warnings = mawp.warnings;
        let mut recommendations = Vec::new();
        let life_years = life.years();

        if let RemainingLife::InvalidRate { rate } = life {
            warnings.push(format!(
                "Corrosion rate {} in/yr is negative or not a number; remaining life cannot be determined",
                rate
            ));
            recommendations
                .push("Re-establish the corrosion rate from valid thickness readings".to_string());
        }

        if let Some(years) = life_years {
            if years < self.config.life_critical_years {
                warnings.push(format!(
                    "CRITICAL: remaining life {:.1} years is below {} years",
                    years, self.config.life_critical_years
                ));
                recommendations
                    .push("Plan repair or replacement at the next opportunity".to_string());
            } else if years < self.config.life_warning_years {
                warnings.push(format!(
                    "Remaining life {:.1} years is below {} years",
                    years, self.config.life_warning_years
                ));
                recommendations.push("Plan repair or replacement within remaining life".to_string());
            }
        }

        if let Some(value) = mawp.value {
            if input.operating_pressure > self.config.mawp_margin_ratio * value {
                warnings.push(format!(
                    "Operating pressure {} psig exceeds {:.0}% of recalculated MAWP {:.1} psig",
                    input.operating_pressure,
                    self.config.mawp_margin_ratio * 100.0,
                    value
                ));
            }
        }

        if acceptable {
            recommendations.push(format!(
                "Acceptable per {}; next inspection within {:.1} years",
                LEVEL_1_REF, next_inspection_years
            ));
        } else {
            recommendations.push(format!(
                "Not acceptable per {}; perform a Level 2 assessment or repair",
                LEVEL_1_REF
            ));
        }

        debug!(
            "{} screened: acceptable={}, life={:?}, interval={:.1}, mawp={:.1}",
            input.component_type, acceptable, life_years, next_inspection_years, recalculated_mawp
        );

        FfsResult {
            acceptable,
            remaining_life_years: life_years,
            next_inspection_years,
            recalculated_mawp,
            critical: life.is_critical()
                || life_years.is_some_and(|years| years < self.config.life_critical_years),
            requires_higher_level: false,
            recommendations,
            warnings,
        }
    }

    fn recalculate_mawp(&self, input: &FfsInput) -> RecalculatedMawp {
        let at_remaining = MawpInput::new(
            input.remaining_thickness,
            input.inside_radius,
            input.allowable_stress,
            input.joint_efficiency,
        )
        .with_corrosion_allowance(input.future_corrosion_allowance);

        let mut warnings = Vec::new();
        let result = match input.component_type {
            ComponentKind::Shell => self.engine.shell_mawp(&at_remaining),
            ComponentKind::Hemispherical => {
                self.engine.head_mawp(HeadType::Hemispherical, &at_remaining, None)
            }
            ComponentKind::Ellipsoidal => {
                self.engine.head_mawp(HeadType::Ellipsoidal, &at_remaining, None)
            }
            ComponentKind::Torispherical => match self.config.torispherical_method {
                TorisphericalMethod::EllipsoidalApproximation => {
                    warnings.push(
                        "Torispherical head MAWP uses the 2:1 ellipsoidal approximation".to_string(),
                    );
                    self.engine.head_mawp(HeadType::Ellipsoidal, &at_remaining, None)
                }
                TorisphericalMethod::Dedicated => self.engine.head_mawp(
                    HeadType::Torispherical,
                    &at_remaining,
                    input.crown_radius,
                ),
            },
        };

        warnings.extend(result.warnings.iter().cloned());
        if let Some(message) = &result.error_message {
            warnings.push(format!("MAWP could not be recalculated: {}", message));
        }

        RecalculatedMawp {
            value: result.value(),
            warnings,
        }
    }
}

fn below_minimum(input: &FfsInput) -> FfsResult {
    FfsResult {
        acceptable: false,
        remaining_life_years: Some(0.0),
        next_inspection_years: 0.0,
        recalculated_mawp: 0.0,
        critical: true,
        requires_higher_level: false,
        recommendations: vec![
            "IMMEDIATE ACTION REQUIRED: remove from service or reduce pressure pending engineering review"
                .to_string(),
            "Repair or replace the component, or perform a Level 2/3 assessment before continued operation"
                .to_string(),
        ],
        warnings: vec![format!(
            "CRITICAL: remaining thickness {:.4} in is below minimum required thickness {:.4} in",
            input.remaining_thickness, input.minimum_required_thickness
        )],
    }
}
