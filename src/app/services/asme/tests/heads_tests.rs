//! Tests for formed head thickness and MAWP

use crate::app::models::{CalculationType, HeadType};
use crate::app::services::asme::AsmeEngine;
use crate::constants::asme::{ELLIPSOIDAL_THICKNESS_REF, THICK_WALL_REF};

use super::{assert_close, at_thickness, design};

#[test]
fn test_hemispherical_thickness_and_round_trip() {
    let engine = AsmeEngine::default();
    let result = engine.head_required_thickness(HeadType::Hemispherical, &design(250.0), None);

    assert!(result.success);
    assert_eq!(result.calculation_type, CalculationType::HemisphericalHeadRequiredThickness);
    // 250·30 / (40000 − 50)
    let t = result.value().unwrap();
    assert_close(t, 7500.0 / 39_950.0);

    let mawp = engine.head_mawp(HeadType::Hemispherical, &at_thickness(t), None);
    assert_close(mawp.value().unwrap(), 250.0);
}

#[test]
fn test_hemispherical_thin_wall_limit() {
    let engine = AsmeEngine::default();
    // 0.665 · 20000 = 13300
    let result = engine.head_required_thickness(HeadType::Hemispherical, &design(14_000.0), None);

    assert!(!result.success);
    assert!(result.warnings.iter().any(|w| w.contains(THICK_WALL_REF)));
}

#[test]
fn test_ellipsoidal_thickness_records_diameter() {
    let engine = AsmeEngine::default();
    let result = engine.head_required_thickness(
        HeadType::Ellipsoidal,
        &design(250.0).with_corrosion_allowance(0.125),
        None,
    );

    assert!(result.success);
    assert_eq!(result.code_reference, ELLIPSOIDAL_THICKNESS_REF);
    assert_eq!(result.intermediate("D"), Some(60.0));
    // 250·60 / (40000 − 50) + 0.125
    assert_close(result.value().unwrap(), 15_000.0 / 39_950.0 + 0.125);
}

#[test]
fn test_ellipsoidal_round_trip() {
    let engine = AsmeEngine::default();
    let t = engine
        .head_required_thickness(HeadType::Ellipsoidal, &design(400.0), None)
        .value()
        .unwrap();

    let mawp = engine.head_mawp(HeadType::Ellipsoidal, &at_thickness(t), None);
    assert_eq!(mawp.calculation_type, CalculationType::EllipsoidalHeadMawp);
    assert_close(mawp.value().unwrap(), 400.0);
}

#[test]
fn test_torispherical_crown_radius_defaults_to_radius() {
    let engine = AsmeEngine::default();
    let result = engine.head_required_thickness(HeadType::Torispherical, &design(250.0), None);

    assert!(result.success);
    assert_eq!(result.intermediate("L"), Some(30.0));
    // 0.885·250·30 / (20000 − 25)
    assert_close(result.value().unwrap(), 0.885 * 7500.0 / 19_975.0);
}

#[test]
fn test_torispherical_round_trip_with_crown_radius() {
    let engine = AsmeEngine::default();
    let t = engine
        .head_required_thickness(HeadType::Torispherical, &design(150.0), Some(54.0))
        .value()
        .unwrap();

    let mawp = engine.head_mawp(HeadType::Torispherical, &at_thickness(t), Some(54.0));
    assert_close(mawp.value().unwrap(), 150.0);
}

#[test]
fn test_torispherical_large_crown_radius_warns() {
    let engine = AsmeEngine::default();
    let result = engine.head_required_thickness(HeadType::Torispherical, &design(150.0), Some(72.0));

    assert!(result.success);
    assert!(result.warnings.iter().any(|w| w.contains("Crown radius")));
}

#[test]
fn test_torispherical_invalid_crown_radius_fails() {
    let engine = AsmeEngine::default();
    let result = engine.head_required_thickness(HeadType::Torispherical, &design(150.0), Some(0.0));
    assert!(!result.success);
}

#[test]
fn test_head_mawp_no_metal_left() {
    let engine = AsmeEngine::default();
    let input = at_thickness(0.1).with_corrosion_allowance(0.125);

    for head in [HeadType::Hemispherical, HeadType::Ellipsoidal, HeadType::Torispherical] {
        let result = engine.head_mawp(head, &input, None);
        assert!(!result.success);
        assert_eq!(result.result_value, None);
    }
}

#[test]
fn test_head_type_parsing() {
    assert_eq!("2:1".parse::<HeadType>().unwrap(), HeadType::Ellipsoidal);
    assert_eq!("F&D".parse::<HeadType>().unwrap(), HeadType::Torispherical);
    assert!("conical".parse::<HeadType>().is_err());
}
