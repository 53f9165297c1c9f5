//! ASME Section VIII Division 1 thickness and MAWP engine
//!
//! Each formula call returns a [`CalculationResult`] carrying every substituted
//! quantity, so the number can be re-derived by hand. Precondition violations
//! fail the calculation without a value; plausibility concerns are warnings on
//! an otherwise successful result. Before a success is returned the value is
//! recomputed from the recorded intermediates and must agree within the
//! configured tolerance.

pub mod governing;
pub mod heads;
pub mod shell;
pub mod verification;

#[cfg(test)]
pub mod tests;

pub use governing::{governing_mawp, thickness_margin};

use crate::Result;
use crate::app::models::{
    CalculationResult, CalculationType, DesignInput, IntermediateValue, MawpInput, ValidationStatus,
};
use crate::config::AsmeConfig;

/// Evaluates pressure-vessel formulas under configurable limits
#[derive(Debug, Clone, Default)]
pub struct AsmeEngine {
    config: AsmeConfig,
}

impl AsmeEngine {
    pub fn new(config: AsmeConfig) -> Result<Self> {
        config.validate()?;
        Ok(Self { config })
    }

    pub fn config(&self) -> &AsmeConfig {
        &self.config
    }

    /// Recompute a successful result from its intermediates; a mismatch turns
    /// it into a failure
    fn verified(&self, result: CalculationResult) -> CalculationResult {
        if !result.success {
            return result;
        }

        match verification::verify(&result, self.config.verification_tolerance) {
            Ok(()) => result,
            Err(message) => CalculationResult {
                success: false,
                result_value: None,
                validation_status: ValidationStatus::Error,
                error_message: Some(format!("Calculation verification failed: {}", message)),
                ..result
            },
        }
    }
}

/// Accumulates the audit trail of one formula evaluation
pub(crate) struct CalculationBuilder {
    calculation_type: CalculationType,
    code_reference: &'static str,
    intermediate_values: Vec<IntermediateValue>,
    warnings: Vec<String>,
}

impl CalculationBuilder {
    pub fn new(calculation_type: CalculationType, code_reference: &'static str) -> Self {
        Self {
            calculation_type,
            code_reference,
            intermediate_values: Vec::new(),
            warnings: Vec::new(),
        }
    }

    pub fn record(&mut self, name: &str, value: f64) -> &mut Self {
        self.intermediate_values.push(IntermediateValue {
            name: name.to_string(),
            value,
        });
        self
    }

    pub fn warn(&mut self, warning: impl Into<String>) -> &mut Self {
        self.warnings.push(warning.into());
        self
    }

    pub fn fail(self, message: impl Into<String>) -> CalculationResult {
        CalculationResult {
            success: false,
            calculation_type: self.calculation_type,
            result_value: None,
            code_reference: self.code_reference.to_string(),
            intermediate_values: self.intermediate_values,
            warnings: self.warnings,
            validation_status: ValidationStatus::Error,
            error_message: Some(message.into()),
        }
    }

    pub fn succeed(self, value: f64) -> CalculationResult {
        let validation_status = if self.warnings.is_empty() {
            ValidationStatus::Valid
        } else {
            ValidationStatus::Warning
        };

        CalculationResult {
            success: true,
            calculation_type: self.calculation_type,
            result_value: Some(value),
            code_reference: self.code_reference.to_string(),
            intermediate_values: self.intermediate_values,
            warnings: self.warnings,
            validation_status,
            error_message: None,
        }
    }
}

// Intermediate value names shared by the formulas and the verifier
pub(crate) mod names {
    pub const PRESSURE: &str = "P";
    pub const RADIUS: &str = "R";
    pub const DIAMETER: &str = "D";
    pub const CROWN_RADIUS: &str = "L";
    pub const STRESS: &str = "S";
    pub const JOINT_EFFICIENCY: &str = "E";
    pub const CORROSION_ALLOWANCE: &str = "CA";
    pub const ACTUAL_THICKNESS: &str = "t_actual";
    pub const CORRODED_THICKNESS: &str = "t_corroded";
    pub const NUMERATOR: &str = "numerator";
    pub const DENOMINATOR: &str = "denominator";
    pub const THIN_WALL_LIMIT: &str = "thin_wall_limit";
    pub const PRESSURE_THICKNESS: &str = "t_pressure";
    pub const REQUIRED_THICKNESS: &str = "t_required";
    pub const MAWP: &str = "MAWP";
}

fn positive(name: &str, value: f64) -> std::result::Result<(), String> {
    if value.is_finite() && value > 0.0 {
        Ok(())
    } else {
        Err(format!("{} must be a positive number, got {}", name, value))
    }
}

fn check_common(
    radius: f64,
    allowable_stress: f64,
    joint_efficiency: f64,
    corrosion_allowance: f64,
) -> std::result::Result<(), String> {
    positive("Inside radius", radius)?;
    positive("Allowable stress", allowable_stress)?;
    positive("Joint efficiency", joint_efficiency)?;
    if joint_efficiency > 1.0 {
        return Err(format!(
            "Joint efficiency must not exceed 1.0, got {}",
            joint_efficiency
        ));
    }
    if !corrosion_allowance.is_finite() || corrosion_allowance < 0.0 {
        return Err(format!(
            "Corrosion allowance must not be negative, got {}",
            corrosion_allowance
        ));
    }
    Ok(())
}

/// Input preconditions shared by every required-thickness formula
pub(crate) fn check_design_input(input: &DesignInput) -> std::result::Result<(), String> {
    positive("Design pressure", input.pressure)?;
    check_common(
        input.inside_radius,
        input.allowable_stress,
        input.joint_efficiency,
        input.corrosion_allowance,
    )
}

/// Input preconditions shared by every MAWP formula
pub(crate) fn check_mawp_input(input: &MawpInput) -> std::result::Result<(), String> {
    positive("Actual thickness", input.actual_thickness)?;
    check_common(
        input.inside_radius,
        input.allowable_stress,
        input.joint_efficiency,
        input.corrosion_allowance,
    )?;
    if input.actual_thickness <= input.corrosion_allowance {
        return Err(format!(
            "Actual thickness {} in does not exceed corrosion allowance {} in: \
             no metal left for pressure containment",
            input.actual_thickness, input.corrosion_allowance
        ));
    }
    Ok(())
}

pub(crate) fn record_design_input(calc: &mut CalculationBuilder, input: &DesignInput) {
    calc.record(names::PRESSURE, input.pressure)
        .record(names::RADIUS, input.inside_radius)
        .record(names::STRESS, input.allowable_stress)
        .record(names::JOINT_EFFICIENCY, input.joint_efficiency)
        .record(names::CORROSION_ALLOWANCE, input.corrosion_allowance);
}

pub(crate) fn record_mawp_input(calc: &mut CalculationBuilder, input: &MawpInput) {
    calc.record(names::ACTUAL_THICKNESS, input.actual_thickness)
        .record(names::RADIUS, input.inside_radius)
        .record(names::STRESS, input.allowable_stress)
        .record(names::JOINT_EFFICIENCY, input.joint_efficiency)
        .record(names::CORROSION_ALLOWANCE, input.corrosion_allowance);
}
