//! Tests for remaining life and inspection intervals

use crate::app::models::RemainingLife;
use crate::app::services::corrosion::{next_inspection_interval, remaining_life};

#[test]
fn test_remaining_life_years() {
    let life = remaining_life(0.480, 0.380, 0.002);
    match life {
        RemainingLife::Years { years } => assert!((years - 50.0).abs() < 1e-9),
        other => panic!("expected years, got {:?}", other),
    }
    assert!(!life.is_critical());
}

#[test]
fn test_remaining_life_at_or_below_required_is_critical() {
    let at_minimum = remaining_life(0.380, 0.380, 0.002);
    assert!(at_minimum.is_critical());
    assert_eq!(at_minimum.years(), Some(0.0));

    let below = remaining_life(0.350, 0.380, 0.002);
    match below {
        RemainingLife::Critical { shortfall } => assert!((shortfall - 0.030).abs() < 1e-9),
        other => panic!("expected critical, got {:?}", other),
    }
}

#[test]
fn test_remaining_life_critical_regardless_of_rate() {
    assert!(remaining_life(0.350, 0.380, 0.0).is_critical());
    assert!(remaining_life(0.350, 0.380, -1.0).is_critical());
}

#[test]
fn test_remaining_life_without_corrosion_is_not_limited() {
    assert_eq!(remaining_life(0.480, 0.380, 0.0), RemainingLife::NotLimited);
    assert_eq!(RemainingLife::NotLimited.years(), None);
}

#[test]
fn test_remaining_life_negative_or_nan_rate_is_invalid() {
    assert_eq!(
        remaining_life(0.480, 0.380, -0.05),
        RemainingLife::InvalidRate { rate: -0.05 }
    );

    let nan = remaining_life(0.480, 0.380, f64::NAN);
    assert!(nan.is_invalid_rate());
    assert!(!nan.is_critical());
    assert_eq!(nan.years(), None);

    let infinite = remaining_life(0.480, 0.380, f64::INFINITY);
    assert!(infinite.is_invalid_rate());
}

#[test]
fn test_next_inspection_interval_invalid_rate_is_zero() {
    let life = RemainingLife::InvalidRate { rate: -0.05 };
    assert_eq!(next_inspection_interval(life, 2.0, 10.0), 0.0);
}

#[test]
fn test_next_inspection_interval_half_life() {
    let interval = next_inspection_interval(RemainingLife::Years { years: 8.0 }, 2.0, 10.0);
    assert_eq!(interval, 4.0);
}

#[test]
fn test_next_inspection_interval_code_maximum() {
    let interval = next_inspection_interval(RemainingLife::Years { years: 50.0 }, 2.0, 10.0);
    assert_eq!(interval, 10.0);
    assert_eq!(next_inspection_interval(RemainingLife::NotLimited, 2.0, 10.0), 10.0);
}

#[test]
fn test_next_inspection_interval_critical_is_zero() {
    let interval = next_inspection_interval(RemainingLife::Critical { shortfall: 0.01 }, 2.0, 10.0);
    assert_eq!(interval, 0.0);
}
