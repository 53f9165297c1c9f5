//! Cylindrical shell under internal pressure, UG-27(c)(1)

use crate::app::models::{CalculationResult, CalculationType, DesignInput, MawpInput};
use crate::constants::asme::{
    SHELL_MAWP_REF, SHELL_THICKNESS_REF, THICK_WALL_REF, THICKNESS_RADIUS_WARNING_RATIO,
};

use super::{
    AsmeEngine, CalculationBuilder, check_design_input, check_mawp_input, names,
    record_design_input, record_mawp_input,
};

/// `t = P·R / (S·E − 0.6·P)`
pub(crate) fn pressure_thickness(p: f64, r: f64, s: f64, e: f64) -> f64 {
    p * r / (s * e - 0.6 * p)
}

/// `P = S·E·t / (R + 0.6·t)`
pub(crate) fn mawp(t: f64, r: f64, s: f64, e: f64) -> f64 {
    s * e * t / (r + 0.6 * t)
}

impl AsmeEngine {
    /// Required shell thickness including corrosion allowance
    ///
    /// Fails when the inputs are not positive, when `P > 0.385·S·E` (thin-wall
    /// formula not applicable) or when `S·E − 0.6·P ≤ 0`.
    pub fn shell_required_thickness(&self, input: &DesignInput) -> CalculationResult {
        let mut calc =
            CalculationBuilder::new(CalculationType::ShellRequiredThickness, SHELL_THICKNESS_REF);
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

        let limit = self.config.shell_thin_wall_ratio * s * e;
        calc.record(names::THIN_WALL_LIMIT, limit);
        if p > limit {
            calc.warn(format!(
                "P = {} psig exceeds {}·S·E = {:.1} psig; use a thick-wall method ({})",
                p, self.config.shell_thin_wall_ratio, limit, THICK_WALL_REF
            ));
            return calc.fail("Pressure exceeds thin-wall formula applicability");
        }

        let numerator = p * r;
        let denominator = s * e - 0.6 * p;
        calc.record(names::NUMERATOR, numerator)
            .record(names::DENOMINATOR, denominator);
        if denominator <= 0.0 {
            return calc.fail(format!(
                "S·E − 0.6·P = {} is not positive: pressure exceeds material capability",
                denominator
            ));
        }

        let t_pressure = pressure_thickness(p, r, s, e);
        let t_required = t_pressure + ca;
        calc.record(names::PRESSURE_THICKNESS, t_pressure)
            .record(names::REQUIRED_THICKNESS, t_required);

        self.plausibility_warnings(&mut calc, p, t_required, r);
        self.verified(calc.succeed(t_required))
    }

    /// Shell MAWP at the corroded thickness `t_actual − CA`
    pub fn shell_mawp(&self, input: &MawpInput) -> CalculationResult {
        let mut calc = CalculationBuilder::new(CalculationType::ShellMawp, SHELL_MAWP_REF);
        record_mawp_input(&mut calc, input);

        if let Err(message) = check_mawp_input(input) {
            return calc.fail(message);
        }

        let r = input.inside_radius;
        let s = input.allowable_stress;
        let e = input.joint_efficiency;
        let t = input.actual_thickness - input.corrosion_allowance;

        let numerator = s * e * t;
        let denominator = r + 0.6 * t;
        calc.record(names::CORRODED_THICKNESS, t)
            .record(names::NUMERATOR, numerator)
            .record(names::DENOMINATOR, denominator);

        let value = mawp(t, r, s, e);
        calc.record(names::MAWP, value);

        if t > THICKNESS_RADIUS_WARNING_RATIO * r {
            calc.warn(format!(
                "Corroded thickness {:.4} in exceeds 0.5·R; thin-wall formula may not hold ({})",
                t, THICK_WALL_REF
            ));
        }
        if value > self.config.high_pressure_warning_psi {
            calc.warn(format!(
                "MAWP {:.1} psig exceeds {} psig; verify inputs",
                value, self.config.high_pressure_warning_psi
            ));
        }

        self.verified(calc.succeed(value))
    }

    /// Non-fatal plausibility checks on a required-thickness result
    pub(crate) fn plausibility_warnings(
        &self,
        calc: &mut CalculationBuilder,
        pressure: f64,
        thickness: f64,
        radius: f64,
    ) {
        if pressure > self.config.high_pressure_warning_psi {
            calc.warn(format!(
                "Design pressure {} psig exceeds {} psig; verify the value is plausible",
                pressure, self.config.high_pressure_warning_psi
            ));
        }
        if thickness > THICKNESS_RADIUS_WARNING_RATIO * radius {
            calc.warn(format!(
                "Required thickness {:.4} in exceeds 0.5·R = {:.4} in; thin-wall assumption may not hold",
                thickness,
                THICKNESS_RADIUS_WARNING_RATIO * radius
            ));
        }
    }
}
