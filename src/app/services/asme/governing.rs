//! Vessel-level results derived from component calculations

use crate::app::models::{CalculationResult, ComponentMawp, GoverningMawp};

/// Thickness surplus (positive) or deficit (negative) against a successful
/// required-thickness result
pub fn thickness_margin(actual_thickness: f64, required: &CalculationResult) -> Option<f64> {
    if required.calculation_type.is_mawp() {
        return None;
    }
    required.value().map(|t_required| actual_thickness - t_required)
}

/// Vessel MAWP as the lowest successful component MAWP
///
/// Failed or non-MAWP component results are reported in `failed_components`
/// and never contribute a value. When a design pressure is given, a governing
/// MAWP below it flags the vessel for de-rating.
pub fn governing_mawp(components: &[ComponentMawp], design_pressure: Option<f64>) -> GoverningMawp {
    let mut failed_components = Vec::new();
    let mut warnings = Vec::new();
    let mut governing: Option<(&str, f64)> = None;

    for component in components {
        let value = component
            .result
            .value()
            .filter(|_| component.result.calculation_type.is_mawp());

        let Some(value) = value else {
            warnings.push(format!(
                "{}: {}",
                component.component,
                component
                    .result
                    .error_message
                    .as_deref()
                    .unwrap_or("no MAWP value")
            ));
            failed_components.push(component.component.clone());
            continue;
        };

        if governing.is_none_or(|(_, lowest)| value < lowest) {
            governing = Some((component.component.as_str(), value));
        }
    }

    let requires_derate = match (governing, design_pressure) {
        (Some((_, mawp)), Some(design)) => mawp < design,
        _ => false,
    };

    if let (true, Some((component, mawp)), Some(design)) = (requires_derate, governing, design_pressure)
    {
        warnings.push(format!(
            "Governing MAWP {:.1} psig ({}) is below design pressure {:.1} psig; vessel must be de-rated",
            mawp, component, design
        ));
    }

    GoverningMawp {
        mawp: governing.map(|(_, mawp)| mawp),
        governing_component: governing.map(|(component, _)| component.to_string()),
        design_pressure,
        requires_derate,
        failed_components,
        warnings,
    }
}
