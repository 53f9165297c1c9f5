//! Station key resolution rules
//!
//! Each rule is a total function from a [`ResolutionContext`] to an optional
//! [`Resolution`]. The resolver walks [`RULES`] in order and stops at the first
//! rule that produces a key; [`fallback_location`] always produces one.

use crate::app::models::{ComponentGroup, Confidence, Location, ResolutionMethod};
use crate::app::services::location_parser::{
    AxialPosition, AxialUnit, HeadName, normalize, parse_axial_position, parse_head_name,
    parse_head_position, parse_seam_head_ref, parse_slice_angle,
};
use crate::constants::station_keys;

use super::classifier::classify;

/// Everything a rule may look at, computed once per input
#[derive(Debug, Clone)]
pub struct ResolutionContext<'a> {
    pub input: &'a Location,
    pub group: ComponentGroup,
    pub normalized_location: String,
    pub normalized_id: String,
    pub axial: Option<AxialPosition>,
}

impl<'a> ResolutionContext<'a> {
    pub fn new(input: &'a Location) -> Self {
        // Axial parsing needs the raw text; foot/inch marks do not survive normalization
        let axial = parse_axial_position(&input.location).or_else(|| {
            input
                .axial_position
                .as_deref()
                .and_then(parse_axial_position)
        });

        Self {
            input,
            group: classify(&input.component_type),
            normalized_location: normalize(&input.location),
            normalized_id: normalize(&input.legacy_location_id),
            axial,
        }
    }

    /// Human-readable axial position kept on every result
    pub fn axial_text(&self) -> Option<String> {
        self.axial.map(|axial| axial.token()).or_else(|| {
            self.input
                .axial_position
                .as_deref()
                .map(str::trim)
                .filter(|text| !text.is_empty())
                .map(str::to_string)
        })
    }

    /// Keep a classified group; refine only an `OTHER` group from rule evidence
    fn refine_group(&self, evidence: ComponentGroup) -> ComponentGroup {
        if self.group == ComponentGroup::Other {
            evidence
        } else {
            self.group
        }
    }
}

/// Output of a single matching rule
#[derive(Debug, Clone, PartialEq)]
pub struct Resolution {
    pub station_key: String,
    pub component_group: ComponentGroup,
    pub slice_number: Option<u32>,
    pub angle_deg: Option<u32>,
    pub confidence: Confidence,
    pub method: ResolutionMethod,
}

pub type Rule = fn(&ResolutionContext<'_>) -> Option<Resolution>;

/// Rules in precedence order; first match wins
pub const RULES: &[Rule] = &[
    explicit_slice_angle,
    parsed_slice_angle,
    seam_adjacent,
    shell_axial_position,
    head_position,
    nozzle_id,
];

fn slice_key(slice: u32, angle: u32) -> String {
    format!("{}-{}-A{}", station_keys::SHELL_SLICE_PREFIX, slice, angle)
}

/// Rule 1: explicit slice number and angle both recorded
pub fn explicit_slice_angle(ctx: &ResolutionContext<'_>) -> Option<Resolution> {
    let slice = ctx.input.slice_number?;
    let angle = ctx.input.angle_deg?;

    Some(Resolution {
        station_key: slice_key(slice, angle),
        component_group: ctx.refine_group(ComponentGroup::Shell),
        slice_number: Some(slice),
        angle_deg: Some(angle),
        confidence: Confidence::High,
        method: ResolutionMethod::ExplicitSliceAngle,
    })
}

/// Rule 2: location text is exactly `{slice}-{angle}`
pub fn parsed_slice_angle(ctx: &ResolutionContext<'_>) -> Option<Resolution> {
    let parsed = parse_slice_angle(&ctx.normalized_location)?;

    Some(Resolution {
        station_key: slice_key(parsed.slice, parsed.angle),
        component_group: ctx.refine_group(ComponentGroup::Shell),
        slice_number: Some(parsed.slice),
        angle_deg: Some(parsed.angle),
        confidence: Confidence::High,
        method: ResolutionMethod::ParsedSliceAngle,
    })
}

/// Rule 3: inch offset from a seam, tagged shell or head side
pub fn seam_adjacent(ctx: &ResolutionContext<'_>) -> Option<Resolution> {
    let axial = ctx.axial.filter(AxialPosition::is_seam_adjacent)?;
    let head_ref = parse_seam_head_ref(&ctx.input.component_type, &ctx.input.location);

    let (reference, confidence) = match head_ref {
        Some(head) => (head.compass(), Confidence::High),
        None => (station_keys::UNKNOWN_HEAD_REF, Confidence::Medium),
    };

    Some(Resolution {
        station_key: format!(
            "{}-{}-{}",
            station_keys::SEAM_PREFIX,
            reference,
            axial.token()
        ),
        component_group: ctx.group,
        slice_number: None,
        angle_deg: None,
        confidence,
        method: ResolutionMethod::SeamAdjacent,
    })
}

/// Rule 4: feet offset on a shell component
pub fn shell_axial_position(ctx: &ResolutionContext<'_>) -> Option<Resolution> {
    let axial = ctx.axial.filter(|axial| axial.unit == AxialUnit::Feet)?;
    if ctx.group != ComponentGroup::Shell {
        return None;
    }

    Some(Resolution {
        station_key: format!("{}-{}", station_keys::SHELL_PREFIX, axial.token()),
        component_group: ComponentGroup::Shell,
        slice_number: None,
        angle_deg: None,
        confidence: Confidence::High,
        method: ResolutionMethod::ShellAxialPosition,
    })
}

fn head_group(head: HeadName) -> ComponentGroup {
    match head {
        HeadName::South => ComponentGroup::SouthHead,
        HeadName::North => ComponentGroup::NorthHead,
        HeadName::East => ComponentGroup::EastHead,
        HeadName::West => ComponentGroup::WestHead,
    }
}

/// Rule 5: named head with a clock position or centre
pub fn head_position(ctx: &ResolutionContext<'_>) -> Option<Resolution> {
    let head = parse_head_name(&ctx.input.component_type, &ctx.input.location)?;
    let position = parse_head_position(&ctx.normalized_location)?;

    Some(Resolution {
        station_key: format!("{}-{}", head.token(), position.token()),
        component_group: ctx.refine_group(head_group(head)),
        slice_number: None,
        angle_deg: None,
        confidence: Confidence::High,
        method: ResolutionMethod::HeadPosition,
    })
}

/// Rule 6: nozzle component or a nozzle service is recorded
pub fn nozzle_id(ctx: &ResolutionContext<'_>) -> Option<Resolution> {
    let has_service = ctx
        .input
        .service
        .as_deref()
        .is_some_and(|service| !service.trim().is_empty());

    if ctx.group != ComponentGroup::Nozzle && !has_service {
        return None;
    }

    let identifier = [&ctx.normalized_id, &ctx.normalized_location]
        .into_iter()
        .find(|text| !text.is_empty())
        .map(String::as_str)
        .unwrap_or(station_keys::UNIDENTIFIED);

    Some(Resolution {
        station_key: format!("{}-{}", station_keys::NOZZLE_PREFIX, identifier),
        component_group: ctx.refine_group(ComponentGroup::Nozzle),
        slice_number: None,
        angle_deg: None,
        confidence: Confidence::Medium,
        method: ResolutionMethod::NozzleId,
    })
}

/// Rule 7: always matches
pub fn fallback_location(ctx: &ResolutionContext<'_>) -> Resolution {
    let identifier = [&ctx.normalized_location, &ctx.normalized_id]
        .into_iter()
        .find(|text| !text.is_empty())
        .map(String::as_str)
        .unwrap_or(station_keys::UNIDENTIFIED);

    Resolution {
        station_key: format!("{}-{}", station_keys::LOCATION_PREFIX, identifier),
        component_group: ctx.group,
        slice_number: None,
        angle_deg: None,
        confidence: Confidence::Low,
        method: ResolutionMethod::FallbackLocation,
    }
}
