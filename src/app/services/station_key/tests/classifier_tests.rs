//! Tests for component-group classification

use crate::app::models::ComponentGroup;

use super::super::classifier::classify;

#[test]
fn test_classify_shell() {
    assert_eq!(classify("Shell"), ComponentGroup::Shell);
    assert_eq!(classify("shell course 2"), ComponentGroup::Shell);
    assert_eq!(classify("Cylinder"), ComponentGroup::Shell);
}

#[test]
fn test_classify_compass_heads_are_distinct() {
    assert_eq!(classify("South Head"), ComponentGroup::SouthHead);
    assert_eq!(classify("North Head"), ComponentGroup::NorthHead);
    assert_eq!(classify("East Head"), ComponentGroup::EastHead);
    assert_eq!(classify("West Head"), ComponentGroup::WestHead);
    assert_ne!(classify("South Head"), classify("West Head"));
    assert_ne!(classify("North Head"), classify("East Head"));
}

#[test]
fn test_classify_nozzle_before_shell() {
    assert_eq!(classify("Nozzle N3"), ComponentGroup::Nozzle);
    assert_eq!(classify("N2 Shell"), ComponentGroup::Nozzle);
    assert_eq!(classify("noz"), ComponentGroup::Nozzle);
    assert_eq!(classify("N-1A"), ComponentGroup::Nozzle);
}

#[test]
fn test_classify_legacy_orientation_alias() {
    assert_eq!(classify("Top Head"), ComponentGroup::EastHead);
    assert_eq!(classify("Bottom Head"), ComponentGroup::WestHead);
    assert_eq!(classify("BTM HD"), ComponentGroup::WestHead);
}

#[test]
fn test_classify_compass_beats_legacy_alias() {
    assert_eq!(classify("South Head (top)"), ComponentGroup::SouthHead);
}

#[test]
fn test_classify_bare_head_is_other() {
    assert_eq!(classify("Head"), ComponentGroup::Other);
    assert_eq!(classify("2:1 Ellipsoidal Head"), ComponentGroup::Other);
}

#[test]
fn test_classify_empty_and_unknown() {
    assert_eq!(classify(""), ComponentGroup::Other);
    assert_eq!(classify("   "), ComponentGroup::Other);
    assert_eq!(classify("Boot"), ComponentGroup::Other);
}

#[test]
fn test_classify_ignores_case_and_spacing() {
    assert_eq!(classify("  sOuTh   HEAD "), ComponentGroup::SouthHead);
}
