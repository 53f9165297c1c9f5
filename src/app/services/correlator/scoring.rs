//! Pairwise similarity scoring

use crate::app::models::{ComponentGroup, Location, StationKeyResult};
use crate::app::services::location_parser::normalize;
use crate::app::services::station_key::resolve;
use crate::constants::matching::{
    ANGLE_ADJACENT_WEIGHT, ANGLE_EXACT_WEIGHT, COMPONENT_GROUP_WEIGHT, DESCRIPTION_EXACT_WEIGHT,
    DESCRIPTION_PARTIAL_WEIGHT, SLICE_WEIGHT,
};

use super::LocationCorrelator;

/// Score of one existing/new pair with the factors that contributed
#[derive(Debug, Clone, PartialEq)]
pub struct ScoreBreakdown {
    /// Similarity in [0, 1]
    pub score: f64,
    pub reason: String,
}

impl ScoreBreakdown {
    fn gated(existing: ComponentGroup, new: ComponentGroup) -> Self {
        Self {
            score: 0.0,
            reason: format!("component group mismatch: {} vs {}", existing, new),
        }
    }
}

/// A location prepared for scoring: resolved geometry plus normalized text
#[derive(Debug, Clone)]
pub(crate) struct ScoringView {
    pub key: StationKeyResult,
    pub description: String,
    pub identifier: String,
}

impl ScoringView {
    pub fn new(location: &Location) -> Self {
        Self {
            key: resolve(location),
            description: normalize(&location.location),
            identifier: normalize(&location.legacy_location_id),
        }
    }
}

/// Whether two angles are within `tolerance` degrees of each other, wrapping at 360
///
/// Identical angles are not adjacent; they are an exact match.
pub fn angles_adjacent(a: u32, b: u32, tolerance: u32) -> bool {
    let difference = a.abs_diff(b) % 360;
    difference != 0 && (difference <= tolerance || difference >= 360 - tolerance.min(360))
}

impl LocationCorrelator {
    /// Score a new location against an existing one
    ///
    /// Differing component groups short-circuit to zero regardless of any
    /// positional similarity.
    pub fn score(&self, existing: &Location, new: &Location) -> ScoreBreakdown {
        self.score_views(&ScoringView::new(existing), &ScoringView::new(new))
    }

    pub(crate) fn score_views(&self, existing: &ScoringView, new: &ScoringView) -> ScoreBreakdown {
        let existing_group = existing.key.component_group;
        let new_group = new.key.component_group;
        if existing_group != new_group {
            return ScoreBreakdown::gated(existing_group, new_group);
        }

        let mut score = COMPONENT_GROUP_WEIGHT;
        let mut reasons = vec![format!("component group {}", existing_group)];

        if let (Some(a), Some(b)) = (existing.key.slice_number, new.key.slice_number) {
            if a == b {
                score += SLICE_WEIGHT;
                reasons.push(format!("slice {}", a));
            }
        }

        if let (Some(a), Some(b)) = (existing.key.angle_deg, new.key.angle_deg) {
            if a == b {
                score += ANGLE_EXACT_WEIGHT;
                reasons.push(format!("angle {}", a));
            } else if angles_adjacent(a, b, self.options.adjacent_angle_tolerance_deg) {
                score += ANGLE_ADJACENT_WEIGHT;
                reasons.push(format!("adjacent angle {} ~ {}", a, b));
            }
        }

        let (a, b) = (&existing.description, &new.description);
        if !a.is_empty() && !b.is_empty() {
            if a == b {
                score += DESCRIPTION_EXACT_WEIGHT;
                reasons.push("description match".to_string());
            } else if a.contains(b.as_str()) || b.contains(a.as_str()) {
                score += DESCRIPTION_PARTIAL_WEIGHT;
                reasons.push("partial description match".to_string());
            }
        }

        ScoreBreakdown {
            score: round_score(score),
            reason: reasons.join(", "),
        }
    }
}

// Weights are decimal fractions; round so 0.30 + 0.35 + 0.25 + 0.05 compares as 0.95
pub(crate) fn round_score(score: f64) -> f64 {
    ((score * 10_000.0).round() / 10_000.0).clamp(0.0, 1.0)
}
