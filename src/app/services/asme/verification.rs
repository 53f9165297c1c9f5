//! Post-hoc self-check of formula results
//!
//! The value is re-derived from the intermediates recorded on the result, not
//! from the caller's inputs, so a result whose audit trail does not reproduce
//! its own number is never returned as a success.

use crate::app::models::{CalculationResult, CalculationType};

use super::{heads, names, shell};

/// Re-derive `result`'s value from its intermediates and compare within a
/// relative `tolerance`
pub fn verify(result: &CalculationResult, tolerance: f64) -> Result<(), String> {
    let Some(reported) = result.result_value else {
        return Err("no result value to verify".to_string());
    };

    let expected = recompute(result)?;
    let scale = expected.abs().max(f64::MIN_POSITIVE);
    let relative = (reported - expected).abs() / scale;

    if !relative.is_finite() || relative > tolerance {
        return Err(format!(
            "reported {} but intermediates give {} (relative difference {:.2e})",
            reported, expected, relative
        ));
    }
    Ok(())
}

fn recompute(result: &CalculationResult) -> Result<f64, String> {
    let get = |name: &str| {
        result
            .intermediate(name)
            .ok_or_else(|| format!("intermediate value {} not recorded", name))
    };

    let r = get(names::RADIUS)?;
    let s = get(names::STRESS)?;
    let e = get(names::JOINT_EFFICIENCY)?;
    let ca = get(names::CORROSION_ALLOWANCE)?;

    let corroded = || Ok::<f64, String>(get(names::ACTUAL_THICKNESS)? - ca);

    let value = match result.calculation_type {
        CalculationType::ShellRequiredThickness => {
            shell::pressure_thickness(get(names::PRESSURE)?, r, s, e) + ca
        }
        CalculationType::HemisphericalHeadRequiredThickness => {
            heads::hemispherical_thickness(get(names::PRESSURE)?, r, s, e) + ca
        }
        CalculationType::EllipsoidalHeadRequiredThickness => {
            heads::ellipsoidal_thickness(get(names::PRESSURE)?, get(names::DIAMETER)?, s, e) + ca
        }
        CalculationType::TorisphericalHeadRequiredThickness => {
            heads::torispherical_thickness(get(names::PRESSURE)?, get(names::CROWN_RADIUS)?, s, e)
                + ca
        }
        CalculationType::ShellMawp => shell::mawp(corroded()?, r, s, e),
        CalculationType::HemisphericalHeadMawp => heads::hemispherical_mawp(corroded()?, r, s, e),
        CalculationType::EllipsoidalHeadMawp => heads::ellipsoidal_mawp(corroded()?, r, s, e),
        CalculationType::TorisphericalHeadMawp => {
            heads::torispherical_mawp(corroded()?, get(names::CROWN_RADIUS)?, s, e)
        }
    };
    Ok(value)
}
