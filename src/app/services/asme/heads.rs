//! Formed heads under internal pressure, UG-32

use crate::app::models::{CalculationResult, CalculationType, DesignInput, HeadType, MawpInput};
use crate::constants::asme::{
    ELLIPSOIDAL_MAWP_REF, ELLIPSOIDAL_THICKNESS_REF, HEMISPHERICAL_MAWP_REF,
    HEMISPHERICAL_THICKNESS_REF, THICK_WALL_REF, TORISPHERICAL_COEFFICIENT,
    TORISPHERICAL_MAWP_REF, TORISPHERICAL_THICKNESS_REF,
};

use super::{
    AsmeEngine, CalculationBuilder, check_design_input, check_mawp_input, names,
    record_design_input, record_mawp_input,
};

/// Hemispherical: `t = P·R / (2·S·E − 0.2·P)`
pub(crate) fn hemispherical_thickness(p: f64, r: f64, s: f64, e: f64) -> f64 {
    p * r / (2.0 * s * e - 0.2 * p)
}

/// Hemispherical: `P = 2·S·E·t / (R + 0.2·t)`
pub(crate) fn hemispherical_mawp(t: f64, r: f64, s: f64, e: f64) -> f64 {
    2.0 * s * e * t / (r + 0.2 * t)
}

/// 2:1 ellipsoidal: `t = P·D / (2·S·E − 0.2·P)`
pub(crate) fn ellipsoidal_thickness(p: f64, d: f64, s: f64, e: f64) -> f64 {
    p * d / (2.0 * s * e - 0.2 * p)
}

/// 2:1 ellipsoidal: `P = S·E·t / (R + 0.1·t)`
pub(crate) fn ellipsoidal_mawp(t: f64, r: f64, s: f64, e: f64) -> f64 {
    s * e * t / (r + 0.1 * t)
}

/// Torispherical: `t = 0.885·P·L / (S·E − 0.1·P)`
pub(crate) fn torispherical_thickness(p: f64, l: f64, s: f64, e: f64) -> f64 {
    TORISPHERICAL_COEFFICIENT * p * l / (s * e - 0.1 * p)
}

/// Torispherical: `P = S·E·t / (0.885·L + 0.1·t)`
pub(crate) fn torispherical_mawp(t: f64, l: f64, s: f64, e: f64) -> f64 {
    s * e * t / (TORISPHERICAL_COEFFICIENT * l + 0.1 * t)
}

fn thickness_calculation(head: HeadType) -> CalculationBuilder {
    match head {
        HeadType::Hemispherical => CalculationBuilder::new(
            CalculationType::HemisphericalHeadRequiredThickness,
            HEMISPHERICAL_THICKNESS_REF,
        ),
        HeadType::Ellipsoidal => CalculationBuilder::new(
            CalculationType::EllipsoidalHeadRequiredThickness,
            ELLIPSOIDAL_THICKNESS_REF,
        ),
        HeadType::Torispherical => CalculationBuilder::new(
            CalculationType::TorisphericalHeadRequiredThickness,
            TORISPHERICAL_THICKNESS_REF,
        ),
    }
}

fn mawp_calculation(head: HeadType) -> CalculationBuilder {
    match head {
        HeadType::Hemispherical => {
            CalculationBuilder::new(CalculationType::HemisphericalHeadMawp, HEMISPHERICAL_MAWP_REF)
        }
        HeadType::Ellipsoidal => {
            CalculationBuilder::new(CalculationType::EllipsoidalHeadMawp, ELLIPSOIDAL_MAWP_REF)
        }
        HeadType::Torispherical => {
            CalculationBuilder::new(CalculationType::TorisphericalHeadMawp, TORISPHERICAL_MAWP_REF)
        }
    }
}

/// Crown radius for a torispherical head, defaulting to the inside radius
fn crown_radius(
    calc: &mut CalculationBuilder,
    crown_radius: Option<f64>,
    inside_radius: f64,
) -> Result<f64, String> {
    let l = crown_radius.unwrap_or(inside_radius);
    calc.record(names::CROWN_RADIUS, l);

    if !l.is_finite() || l <= 0.0 {
        return Err(format!("Crown radius must be a positive number, got {}", l));
    }
    if l > 2.0 * inside_radius {
        calc.warn(format!(
            "Crown radius {} in exceeds the head diameter {} in",
            l,
            2.0 * inside_radius
        ));
    }
    Ok(l)
}

impl AsmeEngine {
    /// Required head thickness including corrosion allowance
    ///
    /// `crown_radius` is only read for torispherical heads.
    pub fn head_required_thickness(
        &self,
        head: HeadType,
        input: &DesignInput,
        crown_radius_in: Option<f64>,
    ) -> CalculationResult {
        let mut calc = thickness_calculation(head);
        record_design_input(&mut calc, input);

        if let Err(message) = check_design_input(input) {
            return calc.fail(message);
        }

        let DesignInput {
            pressure: p,
            inside_radius: r,
            allowable_stress: s,
            joint_efficiency: e,
            corrosion_allowance: ca,
        } = *input;

        let (numerator, denominator, t_pressure) = match head {
            HeadType::Hemispherical => {
                let limit = self.config.hemispherical_thin_wall_ratio * s * e;
                calc.record(names::THIN_WALL_LIMIT, limit);
                if p > limit {
                    calc.warn(format!(
                        "P = {} psig exceeds {}·S·E = {:.1} psig; use a thick-wall method ({})",
                        p, self.config.hemispherical_thin_wall_ratio, limit, THICK_WALL_REF
                    ));
                    return calc.fail("Pressure exceeds thin-wall formula applicability");
                }
                (
                    p * r,
                    2.0 * s * e - 0.2 * p,
                    hemispherical_thickness(p, r, s, e),
                )
            }
            HeadType::Ellipsoidal => {
                let d = 2.0 * r;
                calc.record(names::DIAMETER, d);
                (p * d, 2.0 * s * e - 0.2 * p, ellipsoidal_thickness(p, d, s, e))
            }
            HeadType::Torispherical => {
                let l = match crown_radius(&mut calc, crown_radius_in, r) {
                    Ok(l) => l,
                    Err(message) => return calc.fail(message),
                };
                (
                    TORISPHERICAL_COEFFICIENT * p * l,
                    s * e - 0.1 * p,
                    torispherical_thickness(p, l, s, e),
                )
            }
        };

        calc.record(names::NUMERATOR, numerator)
            .record(names::DENOMINATOR, denominator);
        if denominator <= 0.0 {
            return calc.fail(format!(
                "Denominator {} is not positive: pressure exceeds material capability",
                denominator
            ));
        }

        let t_required = t_pressure + ca;
        calc.record(names::PRESSURE_THICKNESS, t_pressure)
            .record(names::REQUIRED_THICKNESS, t_required);

        self.plausibility_warnings(&mut calc, p, t_required, r);
        self.verified(calc.succeed(t_required))
    }

    /// Head MAWP at the corroded thickness `t_actual − CA`
    pub fn head_mawp(
        &self,
        head: HeadType,
        input: &MawpInput,
        crown_radius_in: Option<f64>,
    ) -> CalculationResult {
        let mut calc = mawp_calculation(head);
        record_mawp_input(&mut calc, input);

        if let Err(message) = check_mawp_input(input) {
            return calc.fail(message);
        }

        let r = input.inside_radius;
        let s = input.allowable_stress;
        let e = input.joint_efficiency;
        let t = input.actual_thickness - input.corrosion_allowance;
        calc.record(names::CORRODED_THICKNESS, t);

        let (numerator, denominator, value) = match head {
            HeadType::Hemispherical => (
                2.0 * s * e * t,
                r + 0.2 * t,
                hemispherical_mawp(t, r, s, e),
            ),
            HeadType::Ellipsoidal => {
                calc.record(names::DIAMETER, 2.0 * r);
                (s * e * t, r + 0.1 * t, ellipsoidal_mawp(t, r, s, e))
            }
            HeadType::Torispherical => {
                let l = match crown_radius(&mut calc, crown_radius_in, r) {
                    Ok(l) => l,
                    Err(message) => return calc.fail(message),
                };
                (
                    s * e * t,
                    TORISPHERICAL_COEFFICIENT * l + 0.1 * t,
                    torispherical_mawp(t, l, s, e),
                )
            }
        };

        calc.record(names::NUMERATOR, numerator)
            .record(names::DENOMINATOR, denominator)
            .record(names::MAWP, value);

        if value > self.config.high_pressure_warning_psi {
            calc.warn(format!(
                "MAWP {:.1} psig exceeds {} psig; verify inputs",
                value, self.config.high_pressure_warning_psi
            ));
        }

        self.verified(calc.succeed(value))
    }
}
