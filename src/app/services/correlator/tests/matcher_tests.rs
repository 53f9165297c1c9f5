//! Tests for batch matching decisions

use std::collections::HashSet;

use crate::app::models::{CorrelationMapping, Location, MatchType};
use crate::app::services::correlator::LocationCorrelator;
use crate::config::MatchOptions;

use super::{existing_at, existing_shell, reading, shell_reading};

#[test]
fn test_renumbered_reading_matches_exactly() {
    let correlator = LocationCorrelator::default();
    let existing = vec![existing_at(
        "loc-1",
        Location::new("166", "Shell", "27-0").with_slice_angle(27, 0),
    )];
    let new = vec![reading(Location::new("14", "Shell", "27-0"))];

    let result = correlator.match_readings(&existing, &new, &[]);

    assert_eq!(result.matched.len(), 1);
    let matched = &result.matched[0];
    assert_eq!(matched.existing_id, "loc-1");
    assert_eq!(matched.match_type, MatchType::Exact);
    assert_eq!(matched.confidence, 1.0);
    assert!(matched.identifier_changed);
    assert_eq!(matched.previous_identifier.as_deref(), Some("166"));
    assert_eq!(matched.current_identifier.as_deref(), Some("14"));
    assert_eq!(result.summary.exact, 1);
    assert!(result.is_balanced());
}

#[test]
fn test_unchanged_identifier_is_not_flagged() {
    let correlator = LocationCorrelator::default();
    let existing = vec![existing_shell("loc-1", "12", 3, 90)];
    let new = vec![shell_reading("12", 3, 90)];

    let result = correlator.match_readings(&existing, &new, &[]);
    let matched = &result.matched[0];
    assert!(!matched.identifier_changed);
    assert_eq!(matched.previous_identifier, None);
}

#[test]
fn test_location_based_and_fuzzy_classification() {
    let correlator = LocationCorrelator::default();

    // group + slice + angle, no description: 0.90
    let result = correlator.match_readings(
        &[existing_shell("a", "1", 4, 90)],
        &[shell_reading("2", 4, 90)],
        &[],
    );
    assert_eq!(result.matched[0].match_type, MatchType::LocationBased);

    // group + slice + adjacent angle: 0.75
    let result = correlator.match_readings(
        &[existing_shell("a", "1", 4, 90)],
        &[shell_reading("2", 4, 135)],
        &[],
    );
    assert_eq!(result.matched[0].match_type, MatchType::Fuzzy);
    assert_eq!(result.summary.fuzzy, 1);
}

#[test]
fn test_no_existing_location_matched_twice() {
    let correlator = LocationCorrelator::default();
    let existing = vec![existing_shell("a", "1", 4, 90)];
    let new = vec![shell_reading("1", 4, 90), shell_reading("1", 4, 90)];

    let result = correlator.match_readings(&existing, &new, &[]);

    // The second reading would match "a" too, but "a" is already consumed
    assert_eq!(result.matched.len(), 1);
    assert_eq!(result.unmatched.len(), 1);
    assert_eq!(result.unmatched[0].new_index, 1);
    assert!(result.is_balanced());
}

#[test]
fn test_existing_ids_unique_across_matches() {
    let correlator = LocationCorrelator::default();
    let existing: Vec<_> = (0..8)
        .map(|i| existing_shell(&format!("loc-{}", i), &i.to_string(), 1 + i / 4, (i % 4) * 90))
        .collect();
    let new: Vec<_> = (0..8)
        .map(|i| shell_reading(&(100 + i).to_string(), 1 + i / 4, (i % 4) * 90))
        .collect();

    let result = correlator.match_readings(&existing, &new, &[]);

    let ids: HashSet<_> = result.matched.iter().map(|m| m.existing_id.as_str()).collect();
    assert_eq!(ids.len(), result.matched.len());
    assert_eq!(result.matched.len(), 8);
}

#[test]
fn test_comparable_candidates_become_conflict() {
    let correlator = LocationCorrelator::default();
    // Both existing locations score 0.75 against the new reading at 45 degrees
    let existing = vec![existing_shell("a", "1", 6, 0), existing_shell("b", "2", 6, 90)];
    let new = vec![shell_reading("3", 6, 45)];

    let result = correlator.match_readings(&existing, &new, &[]);

    assert!(result.matched.is_empty());
    assert_eq!(result.conflicts.len(), 1);
    let conflict = &result.conflicts[0];
    assert_eq!(conflict.candidates.len(), 2);
    assert_eq!(conflict.candidates[0].existing_id, "a");
    assert_eq!(conflict.candidates[0].score, 0.75);
    assert_eq!(result.summary.conflicts, 1);
    assert!(result.is_balanced());
}

#[test]
fn test_conflict_keeps_top_three_candidates() {
    let correlator = LocationCorrelator::default();
    let existing: Vec<_> = (0..5)
        .map(|i| existing_at(&format!("k{}", i), Location::new(i.to_string(), "Head", "knuckle")))
        .collect();
    let new = vec![reading(Location::new("9", "Head", "knuckle"))];

    let result = correlator.match_readings(&existing, &new, &[]);

    // Every candidate scores 0.40 and is below the fuzzy threshold
    assert_eq!(result.unmatched.len(), 1);

    let options = MatchOptions::default().with_fuzzy_threshold(0.40);
    let correlator = LocationCorrelator::new(options).unwrap();
    let result = correlator.match_readings(&existing, &new, &[]);

    assert_eq!(result.conflicts.len(), 1);
    let ids: Vec<_> = result.conflicts[0]
        .candidates
        .iter()
        .map(|c| c.existing_id.as_str())
        .collect();
    assert_eq!(ids, vec!["k0", "k1", "k2"]);
}

#[test]
fn test_clear_gap_accepts_top_candidate() {
    let correlator = LocationCorrelator::default();
    // 0.90 vs 0.75: gap above the conflict margin
    let existing = vec![existing_shell("a", "1", 6, 0), existing_shell("b", "2", 6, 45)];
    let new = vec![shell_reading("3", 6, 0)];

    let result = correlator.match_readings(&existing, &new, &[]);
    assert_eq!(result.matched.len(), 1);
    assert_eq!(result.matched[0].existing_id, "a");
    assert!(result.conflicts.is_empty());
}

#[test]
fn test_gap_equal_to_margin_accepts_top_candidate() {
    let correlator = LocationCorrelator::default();
    // 0.85 vs 0.75: the gap sits exactly on the conflict margin
    let existing = vec![
        existing_at(
            "a",
            Location::new("1", "Shell", "NEAR MANWAY").with_slice_angle(27, 90),
        ),
        existing_shell("b", "2", 27, 0),
    ];
    let new = vec![reading(
        Location::new("3", "Shell", "NEAR MANWAY").with_slice_angle(27, 45),
    )];

    let result = correlator.match_readings(&existing, &new, &[]);
    assert!(result.conflicts.is_empty());
    assert_eq!(result.matched.len(), 1);
    assert_eq!(result.matched[0].existing_id, "a");
    assert_eq!(result.matched[0].existing_index, 0);
    assert_eq!(result.matched[0].match_type, MatchType::LocationBased);
}

#[test]
fn test_identifier_only_fallback() {
    let correlator = LocationCorrelator::default();
    let existing = vec![existing_at("n-1", Location::new("N3", "Other", "flange face"))];
    let new = vec![reading(Location::new("N3", "Boot", "weld"))];

    let result = correlator.match_readings(&existing, &new, &[]);

    assert_eq!(result.matched.len(), 1);
    assert_eq!(result.matched[0].match_type, MatchType::CmlNumberOnly);
    assert_eq!(result.matched[0].confidence, 0.5);
    assert_eq!(result.summary.cml_number_only, 1);
}

#[test]
fn test_identifier_only_can_be_disabled() {
    let options = MatchOptions::default().without_cml_only_match();
    let correlator = LocationCorrelator::new(options).unwrap();
    let existing = vec![existing_at("n-1", Location::new("N3", "Other", "flange face"))];
    let new = vec![reading(Location::new("N3", "Boot", "weld"))];

    let result = correlator.match_readings(&existing, &new, &[]);

    assert!(result.matched.is_empty());
    assert_eq!(result.unmatched.len(), 1);
    assert!(result.unmatched[0].reason.contains("0.70"));
}

#[test]
fn test_correlation_mapping_matches_before_scoring() {
    let correlator = LocationCorrelator::default();
    let existing = vec![
        existing_shell("a", "166", 27, 0),
        existing_shell("b", "167", 27, 45),
    ];
    let new = vec![reading(Location::new("14", "Shell", "CML 14"))];
    let mappings = vec![CorrelationMapping {
        baseline_cml: "166".to_string(),
        baseline_description: "27-0".to_string(),
        current_cml: "14".to_string(),
        current_description: "CML 14".to_string(),
    }];

    let result = correlator.match_readings(&existing, &new, &mappings);

    assert_eq!(result.matched.len(), 1);
    assert_eq!(result.matched[0].existing_id, "a");
    assert_eq!(result.matched[0].match_type, MatchType::CorrelationMapping);
    assert_eq!(result.summary.correlation_mapping, 1);
}

#[test]
fn test_empty_inputs() {
    let correlator = LocationCorrelator::default();
    let result = correlator.match_readings(&[], &[], &[]);
    assert_eq!(result.summary.total_new, 0);
    assert!(result.is_balanced());

    let result = correlator.match_readings(&[], &[shell_reading("1", 1, 0)], &[]);
    assert_eq!(result.unmatched.len(), 1);
}

#[test]
fn test_invalid_options_are_rejected() {
    let options = MatchOptions::default()
        .with_exact_threshold(0.6)
        .with_fuzzy_threshold(0.8);
    assert!(LocationCorrelator::new(options).is_err());
}
