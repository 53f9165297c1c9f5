//! Tests for general metal loss screening

use crate::app::models::{ComponentKind, FfsInput};
use crate::app::services::asme::AsmeEngine;
use crate::app::services::ffs::FfsScreener;
use crate::config::FfsConfig;

use super::shell_input;

fn close(a: f64, b: f64) -> bool {
    (a - b).abs() < 1e-6
}

#[test]
fn test_acceptable_shell() {
    let screener = FfsScreener::default();
    let result = screener.assess_general_metal_loss(&shell_input());

    assert!(result.acceptable);
    assert!(!result.critical);
    assert!(!result.requires_higher_level);
    // 0.100 in / 0.005 in/yr
    assert!(close(result.remaining_life_years.unwrap(), 20.0));
    assert!(close(result.next_inspection_years, 10.0));
    // 20000 · 0.460 / (30 + 0.276)
    assert!(close(result.recalculated_mawp, 9200.0 / 30.276));
    assert!(result.warnings.is_empty());
}

#[test]
fn test_interval_is_half_life_below_code_maximum() {
    let screener = FfsScreener::default();
    let input = FfsInput {
        corrosion_rate: 0.0125,
        ..shell_input()
    };

    let result = screener.assess_general_metal_loss(&input);
    // 8 years of life
    assert!(close(result.next_inspection_years, 4.0));
}

#[test]
fn test_below_minimum_short_circuits() {
    let screener = FfsScreener::default();
    for rate in [0.005, 0.0, -0.01, 1.0] {
        let input = FfsInput {
            remaining_thickness: 0.350,
            corrosion_rate: rate,
            ..shell_input()
        };

        let result = screener.assess_general_metal_loss(&input);
        assert!(!result.acceptable);
        assert_eq!(result.remaining_life_years, Some(0.0));
        assert!(result.critical);
        assert_eq!(result.recalculated_mawp, 0.0);
        assert!(result.recommendations[0].starts_with("IMMEDIATE ACTION"));
    }
}

#[test]
fn test_within_future_corrosion_allowance_is_not_acceptable() {
    let screener = FfsScreener::default();
    let input = FfsInput {
        remaining_thickness: 0.390,
        ..shell_input()
    };

    let result = screener.assess_general_metal_loss(&input);
    assert!(!result.acceptable);
    assert!(result.recommendations.iter().any(|r| r.contains("Level 2")));
}

#[test]
fn test_life_warnings_escalate() {
    let screener = FfsScreener::default();

    // 4 years
    let input = FfsInput {
        remaining_thickness: 0.420,
        corrosion_rate: 0.010,
        ..shell_input()
    };
    let result = screener.assess_general_metal_loss(&input);
    assert!(result.warnings.iter().any(|w| w.starts_with("Remaining life")));
    assert!(!result.critical);

    // 1 year
    let input = FfsInput {
        remaining_thickness: 0.420,
        corrosion_rate: 0.040,
        ..shell_input()
    };
    let result = screener.assess_general_metal_loss(&input);
    assert!(result.warnings.iter().any(|w| w.starts_with("CRITICAL")));
    assert!(result.critical);
}

#[test]
fn test_operating_pressure_near_mawp_warns() {
    let screener = FfsScreener::default();
    let input = FfsInput {
        operating_pressure: 290.0,
        ..shell_input()
    };

    let result = screener.assess_general_metal_loss(&input);
    assert!(result.warnings.iter().any(|w| w.contains("90%")));
}

#[test]
fn test_no_corrosion_means_unlimited_life() {
    let screener = FfsScreener::default();
    let input = FfsInput {
        corrosion_rate: 0.0,
        ..shell_input()
    };

    let result = screener.assess_general_metal_loss(&input);
    assert!(result.acceptable);
    assert_eq!(result.remaining_life_years, None);
    assert_eq!(result.next_inspection_years, 10.0);
}

#[test]
fn test_negative_or_nan_rate_is_not_acceptable() {
    let screener = FfsScreener::default();
    for rate in [-0.05, f64::NAN] {
        let input = FfsInput {
            corrosion_rate: rate,
            ..shell_input()
        };

        let result = screener.assess_general_metal_loss(&input);
        assert!(!result.acceptable);
        assert_eq!(result.remaining_life_years, None);
        assert_eq!(result.next_inspection_years, 0.0);
        assert!(
            result
                .warnings
                .iter()
                .any(|w| w.contains("remaining life cannot be determined"))
        );
        assert!(result.recommendations.iter().any(|r| r.contains("Not acceptable")));
    }
}

#[test]
fn test_torispherical_uses_named_approximation() {
    let screener = FfsScreener::default();
    let input = FfsInput {
        component_type: ComponentKind::Torispherical,
        ..shell_input()
    };

    let result = screener.assess_general_metal_loss(&input);
    assert!(result.warnings.iter().any(|w| w.contains("ellipsoidal approximation")));
    // 20000 · 0.460 / (30 + 0.046)
    assert!(close(result.recalculated_mawp, 9200.0 / 30.046));
}

#[test]
fn test_torispherical_dedicated_formula() {
    let config = FfsConfig::default().with_dedicated_torispherical();
    let screener = FfsScreener::new(config, AsmeEngine::default()).unwrap();
    let input = FfsInput {
        component_type: ComponentKind::Torispherical,
        crown_radius: Some(60.0),
        ..shell_input()
    };

    let result = screener.assess_general_metal_loss(&input);
    assert!(!result.warnings.iter().any(|w| w.contains("approximation")));
    // 20000 · 0.460 / (0.885 · 60 + 0.046)
    assert!(close(result.recalculated_mawp, 9200.0 / 53.146));
}

#[test]
fn test_head_formulas_by_component() {
    let screener = FfsScreener::default();

    let hemi = screener.assess_general_metal_loss(&FfsInput {
        component_type: ComponentKind::Hemispherical,
        ..shell_input()
    });
    let ellip = screener.assess_general_metal_loss(&FfsInput {
        component_type: ComponentKind::Ellipsoidal,
        ..shell_input()
    });

    assert!(hemi.recalculated_mawp > ellip.recalculated_mawp);
    assert!(close(ellip.recalculated_mawp, 9200.0 / 30.046));
}

#[test]
fn test_invalid_config_is_rejected() {
    let config = FfsConfig {
        interval_safety_factor: 0.0,
        ..FfsConfig::default()
    };
    assert!(FfsScreener::new(config, AsmeEngine::default()).is_err());
}
