//! Batch matching of new readings to existing locations

use tracing::{debug, info};

use crate::app::models::{
    CorrelationMapping, ExistingLocation, LocationMatch, MatchCandidate, MatchConflict, MatchResult,
    MatchSummary, MatchType, Reading, ResolutionMethod, UnmatchedReading,
};
use crate::app::services::station_key::resolve_with_correlation;
use crate::constants::matching::{
    CML_ONLY_CONFIDENCE, CORRELATION_MAPPING_CONFIDENCE, LOCATION_BASED_THRESHOLD,
};

use super::LocationCorrelator;
use super::scoring::{ScoreBreakdown, ScoringView, round_score};

/// Candidate existing location for one new reading
#[derive(Debug, Clone)]
struct Candidate {
    index: usize,
    breakdown: ScoreBreakdown,
}

/// What to do with one new reading
enum Decision {
    Accept {
        index: usize,
        match_type: MatchType,
        confidence: f64,
        reason: String,
    },
    Conflict(Vec<Candidate>),
    Unmatched(String),
}

/// Mutable state of one matching run
struct MatchRun<'a> {
    existing: &'a [ExistingLocation],
    views: Vec<ScoringView>,
    consumed: Vec<bool>,
    result: MatchResult,
}

impl<'a> MatchRun<'a> {
    fn new(existing: &'a [ExistingLocation], total_new: usize) -> Self {
        Self {
            existing,
            views: existing
                .iter()
                .map(|location| ScoringView::new(&location.location))
                .collect(),
            consumed: vec![false; existing.len()],
            result: MatchResult {
                summary: MatchSummary {
                    total_new,
                    ..MatchSummary::default()
                },
                ..MatchResult::default()
            },
        }
    }

    fn available(&self) -> impl Iterator<Item = usize> + '_ {
        (0..self.existing.len()).filter(move |&index| !self.consumed[index])
    }

    fn record(&mut self, new_index: usize, reading: &Reading, decision: Decision) {
        let legacy_location_id = reading.location.legacy_location_id.clone();

        match decision {
            Decision::Accept {
                index,
                match_type,
                confidence,
                reason,
            } => {
                self.consumed[index] = true;

                let existing = &self.existing[index];
                let previous = existing.location.legacy_location_id.trim();
                let current = legacy_location_id.trim();
                let identifier_changed = previous != current;

                debug!(
                    "Reading {} ({}) matched {} as {} ({:.2}): {}",
                    new_index, current, existing.id, match_type, confidence, reason
                );

                let summary = &mut self.result.summary;
                summary.matched += 1;
                match match_type {
                    MatchType::Exact => summary.exact += 1,
                    MatchType::LocationBased => summary.location_based += 1,
                    MatchType::Fuzzy => summary.fuzzy += 1,
                    MatchType::CmlNumberOnly => summary.cml_number_only += 1,
                    MatchType::CorrelationMapping => summary.correlation_mapping += 1,
                }

                self.result.matched.push(LocationMatch {
                    existing_id: existing.id.clone(),
                    existing_index: index,
                    new_index,
                    match_type,
                    confidence,
                    reason,
                    identifier_changed,
                    previous_identifier: identifier_changed.then(|| previous.to_string()),
                    current_identifier: identifier_changed.then(|| current.to_string()),
                });
            }
            Decision::Conflict(candidates) => {
                debug!(
                    "Reading {} ({}) has {} comparable candidates; left for review",
                    new_index,
                    legacy_location_id,
                    candidates.len()
                );

                self.result.summary.conflicts += 1;
                self.result.conflicts.push(MatchConflict {
                    new_index,
                    legacy_location_id,
                    candidates: candidates
                        .into_iter()
                        .map(|candidate| MatchCandidate {
                            existing_id: self.existing[candidate.index].id.clone(),
                            score: candidate.breakdown.score,
                            reason: candidate.breakdown.reason,
                        })
                        .collect(),
                });
            }
            Decision::Unmatched(reason) => {
                debug!("Reading {} ({}) unmatched: {}", new_index, legacy_location_id, reason);

                self.result.summary.unmatched += 1;
                self.result.unmatched.push(UnmatchedReading {
                    new_index,
                    legacy_location_id,
                    reason,
                });
            }
        }
    }
}

impl LocationCorrelator {
    /// Match a batch of new readings to existing locations
    ///
    /// Every new reading ends up in exactly one of `matched`, `unmatched` or
    /// `conflicts`, and no existing location is matched twice. When
    /// `correlation_mappings` is non-empty, a reading whose mapped station key
    /// equals an available existing location's key is matched before scoring.
    pub fn match_readings(
        &self,
        existing: &[ExistingLocation],
        new_readings: &[Reading],
        correlation_mappings: &[CorrelationMapping],
    ) -> MatchResult {
        let mut run = MatchRun::new(existing, new_readings.len());

        for (new_index, reading) in new_readings.iter().enumerate() {
            let decision = self
                .mapped_match(&run, reading, correlation_mappings)
                .unwrap_or_else(|| self.decide(&run, reading));
            run.record(new_index, reading, decision);
        }

        let result = run.result;
        info!("Correlation complete: {}", result.summary.summary());
        result
    }

    fn mapped_match(
        &self,
        run: &MatchRun<'_>,
        reading: &Reading,
        correlation_mappings: &[CorrelationMapping],
    ) -> Option<Decision> {
        if correlation_mappings.is_empty() {
            return None;
        }

        let mapped = resolve_with_correlation(&reading.location, correlation_mappings);
        if mapped.method != ResolutionMethod::CorrelationMapping {
            return None;
        }

        let index = run
            .available()
            .find(|&index| run.views[index].key.station_key == mapped.station_key)?;

        Some(Decision::Accept {
            index,
            match_type: MatchType::CorrelationMapping,
            confidence: CORRELATION_MAPPING_CONFIDENCE,
            reason: format!("correlation mapping to station {}", mapped.station_key),
        })
    }

    fn decide(&self, run: &MatchRun<'_>, reading: &Reading) -> Decision {
        let view = ScoringView::new(&reading.location);
        let options = &self.options;

        let mut candidates: Vec<Candidate> = run
            .available()
            .map(|index| Candidate {
                index,
                breakdown: self.score_views(&run.views[index], &view),
            })
            .filter(|candidate| candidate.breakdown.score >= options.fuzzy_match_threshold)
            .collect();

        // Highest score first; ties keep existing order so runs are reproducible
        candidates.sort_by(|a, b| {
            b.breakdown
                .score
                .total_cmp(&a.breakdown.score)
                .then(a.index.cmp(&b.index))
        });

        let Some(top) = candidates.first() else {
            return self.identifier_only(run, &view);
        };

        let top_score = top.breakdown.score;
        let clear_winner = match candidates.get(1) {
            None => true,
            Some(_) if top_score >= options.exact_match_threshold => true,
            Some(second) => {
                round_score(top_score - second.breakdown.score) >= options.conflict_margin
            }
        };

        if clear_winner {
            let match_type = if top_score >= options.exact_match_threshold {
                MatchType::Exact
            } else if top_score >= LOCATION_BASED_THRESHOLD {
                MatchType::LocationBased
            } else {
                MatchType::Fuzzy
            };

            return Decision::Accept {
                index: top.index,
                match_type,
                confidence: top_score,
                reason: top.breakdown.reason.clone(),
            };
        }

        candidates.truncate(options.max_conflict_candidates);
        Decision::Conflict(candidates)
    }

    fn identifier_only(&self, run: &MatchRun<'_>, view: &ScoringView) -> Decision {
        if self.options.allow_cml_only_match && !view.identifier.is_empty() {
            if let Some(index) = run
                .available()
                .find(|&index| run.views[index].identifier == view.identifier)
            {
                return Decision::Accept {
                    index,
                    match_type: MatchType::CmlNumberOnly,
                    confidence: CML_ONLY_CONFIDENCE,
                    reason: format!("identifier {} only", view.identifier),
                };
            }
        }

        Decision::Unmatched(format!(
            "no candidate scored at or above {:.2}",
            self.options.fuzzy_match_threshold
        ))
    }
}
