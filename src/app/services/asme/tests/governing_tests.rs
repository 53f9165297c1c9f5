//! Tests for governing MAWP and thickness margin

use crate::app::models::{ComponentMawp, HeadType};
use crate::app::services::asme::{AsmeEngine, governing_mawp, thickness_margin};

use super::{assert_close, at_thickness, design};

#[test]
fn test_governing_mawp_picks_lowest_component() {
    let engine = AsmeEngine::default();
    let components = vec![
        ComponentMawp::new("Shell", engine.shell_mawp(&at_thickness(0.5))),
        ComponentMawp::new(
            "South Head",
            engine.head_mawp(HeadType::Ellipsoidal, &at_thickness(0.5), None),
        ),
    ];

    let governing = governing_mawp(&components, Some(250.0));

    // The shell is weaker than a 2:1 head of the same thickness
    assert_eq!(governing.governing_component.as_deref(), Some("Shell"));
    assert_close(governing.mawp.unwrap(), 10_000.0 / 30.3);
    assert!(!governing.requires_derate);
    assert!(governing.failed_components.is_empty());
}

#[test]
fn test_governing_mawp_flags_derate() {
    let engine = AsmeEngine::default();
    let components = vec![ComponentMawp::new("Shell", engine.shell_mawp(&at_thickness(0.3)))];

    let governing = governing_mawp(&components, Some(250.0));

    assert!(governing.requires_derate);
    assert!(governing.warnings.iter().any(|w| w.contains("de-rated")));
}

#[test]
fn test_governing_mawp_reports_failed_components() {
    let engine = AsmeEngine::default();
    let components = vec![
        ComponentMawp::new("Shell", engine.shell_mawp(&at_thickness(0.5))),
        ComponentMawp::new(
            "North Head",
            engine.head_mawp(
                HeadType::Hemispherical,
                &at_thickness(0.1).with_corrosion_allowance(0.125),
                None,
            ),
        ),
    ];

    let governing = governing_mawp(&components, None);

    assert_eq!(governing.failed_components, vec!["North Head".to_string()]);
    assert_eq!(governing.governing_component.as_deref(), Some("Shell"));
    assert!(!governing.requires_derate);
}

#[test]
fn test_governing_mawp_ignores_thickness_results() {
    let engine = AsmeEngine::default();
    let components = vec![ComponentMawp::new("Shell", engine.shell_required_thickness(&design(250.0)))];

    let governing = governing_mawp(&components, Some(250.0));
    assert_eq!(governing.mawp, None);
    assert_eq!(governing.failed_components.len(), 1);
}

#[test]
fn test_thickness_margin() {
    let engine = AsmeEngine::default();
    let required = engine.shell_required_thickness(&design(250.0));
    let t_required = required.value().unwrap();

    assert_close(thickness_margin(0.5, &required).unwrap(), 0.5 - t_required);
    assert!(thickness_margin(0.3, &required).unwrap() < 0.0);

    let mawp = engine.shell_mawp(&at_thickness(0.5));
    assert_eq!(thickness_margin(0.5, &mawp), None);
}
