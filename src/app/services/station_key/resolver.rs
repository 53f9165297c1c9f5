//! Station key resolver
//!
//! Folds the rule cascade in [`super::rules`] over one location to produce a
//! [`StationKeyResult`]. Resolution is total and deterministic.

use crate::app::models::{Confidence, CorrelationMapping, Location, ResolutionMethod, StationKeyResult};
use crate::app::services::location_parser::normalize;

use super::rules::{RULES, ResolutionContext, fallback_location};

/// Resolve a location to its canonical station key
///
/// # Examples
///
/// ```
/// use vessel_integrity::app::models::{Location, ResolutionMethod};
/// use vessel_integrity::resolve;
///
/// let location = Location::new("14", "Shell", "7-0");
/// let result = resolve(&location);
/// assert_eq!(result.station_key, "SHELL-SLICE-7-A0");
/// assert_eq!(result.method, ResolutionMethod::ParsedSliceAngle);
/// ```
pub fn resolve(input: &Location) -> StationKeyResult {
    let ctx = ResolutionContext::new(input);

    let resolution = RULES
        .iter()
        .find_map(|rule| rule(&ctx))
        .unwrap_or_else(|| fallback_location(&ctx));

    StationKeyResult {
        station_key: resolution.station_key,
        component_group: resolution.component_group,
        slice_number: resolution.slice_number,
        angle_deg: resolution.angle_deg,
        true_cml_id: input.true_cml_id.clone(),
        axial_position: ctx.axial_text(),
        confidence: resolution.confidence,
        method: resolution.method,
    }
}

/// Resolve a batch of locations, preserving input order
pub fn resolve_all(inputs: &[Location]) -> Vec<StationKeyResult> {
    inputs.iter().map(resolve).collect()
}

/// Resolve through an explicit baseline/current correlation table
///
/// When a mapping's current identifier or description matches the input
/// location text (exactly, or one containing the other), the input is resolved
/// as the mapping's baseline identifiers so historical and current readings
/// converge on one key. Exact matches are searched before containment. With no
/// hit, this is [`resolve`].
pub fn resolve_with_correlation(
    input: &Location,
    correlation_mappings: &[CorrelationMapping],
) -> StationKeyResult {
    let Some(mapping) = find_mapping(input, correlation_mappings) else {
        return resolve(input);
    };

    let baseline = Location {
        legacy_location_id: mapping.baseline_cml.clone(),
        component_type: input.component_type.clone(),
        location: mapping.baseline_description.clone(),
        slice_number: None,
        angle_deg: None,
        axial_position: None,
        distance_from_datum: input.distance_from_datum,
        true_cml_id: input.true_cml_id.clone(),
        service: input.service.clone(),
    };

    let mut result = resolve(&baseline);
    result.method = ResolutionMethod::CorrelationMapping;
    result.confidence = Confidence::High;
    result
}

/// Find the mapping whose current side refers to this input, if any
pub fn find_mapping<'m>(
    input: &Location,
    correlation_mappings: &'m [CorrelationMapping],
) -> Option<&'m CorrelationMapping> {
    let needle = [normalize(&input.location), normalize(&input.legacy_location_id)]
        .into_iter()
        .find(|text| !text.is_empty())?;

    let current_texts = |mapping: &CorrelationMapping| {
        [
            normalize(&mapping.current_cml),
            normalize(&mapping.current_description),
        ]
        .into_iter()
        .filter(|text| !text.is_empty())
        .collect::<Vec<_>>()
    };

    correlation_mappings
        .iter()
        .find(|mapping| current_texts(mapping).iter().any(|text| *text == needle))
        .or_else(|| {
            correlation_mappings.iter().find(|mapping| {
                current_texts(mapping)
                    .iter()
                    .any(|text| text.contains(needle.as_str()) || needle.contains(text.as_str()))
            })
        })
}
