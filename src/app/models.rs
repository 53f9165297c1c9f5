//! Data models for vessel thickness monitoring
//!
//! This module contains the core data structures for representing measurement
//! locations, thickness readings, resolved station keys and cross-inspection
//! match results. Calculation outputs live in [`calculation`] and engine
//! inputs in [`vessel`].

use crate::{Error, Result};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

pub mod calculation;
pub mod vessel;

pub use calculation::{
    CalculationResult, CalculationType, ComponentMawp, CorrosionRateResult, FfsResult,
    GoverningMawp, GoverningRate, IntermediateValue, RateBasis, RemainingLife, ValidationStatus,
};
pub use vessel::{ComponentKind, DesignInput, FfsInput, HeadType, LocalThinAreaInput, MawpInput};

// =============================================================================
// Measurement Location
// =============================================================================

/// A physical measurement point on a vessel as recorded by an inspector
///
/// The raw identifier may be renumbered between inspections; identity over time
/// comes from the resolved station key, not from `legacy_location_id`.
#[derive(Debug, Clone, Default, PartialEq, Deserialize, Serialize)]
#[serde(default)]
pub struct Location {
    /// Identifier as written on the inspection record (CML/TML number)
    pub legacy_location_id: String,

    /// Free-text component type (e.g. "Shell", "South Head", "Nozzle N3")
    pub component_type: String,

    /// Free-text location description (e.g. "27-45", "3' from W seam")
    pub location: String,

    /// Explicit slice number, when the record carries one
    #[serde(skip_serializing_if = "Option::is_none")]
    pub slice_number: Option<u32>,

    /// Explicit circumferential angle in degrees (0, 45, ..., 315)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub angle_deg: Option<u32>,

    /// Axial position text, when recorded separately from the description
    #[serde(skip_serializing_if = "Option::is_none")]
    pub axial_position: Option<String>,

    /// Distance from the vessel datum line (inches)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub distance_from_datum: Option<f64>,

    /// Authoritative CML identifier carried through resolution untouched
    #[serde(skip_serializing_if = "Option::is_none")]
    pub true_cml_id: Option<String>,

    /// Nozzle service description (e.g. "Inlet", "PSV"); presence marks a nozzle
    #[serde(skip_serializing_if = "Option::is_none")]
    pub service: Option<String>,
}

impl Location {
    /// Create a location from the three free-text fields
    pub fn new(
        legacy_location_id: impl Into<String>,
        component_type: impl Into<String>,
        location: impl Into<String>,
    ) -> Self {
        Self {
            legacy_location_id: legacy_location_id.into(),
            component_type: component_type.into(),
            location: location.into(),
            ..Self::default()
        }
    }

    /// Attach an explicit slice number and angle
    pub fn with_slice_angle(mut self, slice_number: u32, angle_deg: u32) -> Self {
        self.slice_number = Some(slice_number);
        self.angle_deg = Some(angle_deg);
        self
    }

    /// Attach a nozzle service description
    pub fn with_service(mut self, service: impl Into<String>) -> Self {
        self.service = Some(service.into());
        self
    }

    /// Attach the authoritative CML identifier
    pub fn with_true_cml_id(mut self, id: impl Into<String>) -> Self {
        self.true_cml_id = Some(id.into());
        self
    }
}

// =============================================================================
// Thickness Reading
// =============================================================================

/// Unit a thickness value was recorded in
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ThicknessUnit {
    #[default]
    Inches,
    Millimeters,
}

impl ThicknessUnit {
    /// Convert a value in this unit to inches
    pub fn to_inches(self, value: f64) -> f64 {
        match self {
            ThicknessUnit::Inches => value,
            ThicknessUnit::Millimeters => value / 25.4,
        }
    }
}

/// A single thickness measurement at a location
///
/// Readings are immutable records; a new inspection produces new readings.
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
pub struct Reading {
    #[serde(flatten)]
    pub location: Location,

    /// Measured wall thickness
    pub thickness: f64,

    /// Unit of `thickness`
    #[serde(default)]
    pub unit: ThicknessUnit,

    /// When the measurement was taken
    pub measured_at: DateTime<Utc>,

    /// Measurement method (e.g. "UT", "UT-Scan")
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub method: Option<String>,

    /// Inspector name or certification number
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub inspector: Option<String>,
}

impl Reading {
    /// Create a new reading with validation
    pub fn new(
        location: Location,
        thickness: f64,
        unit: ThicknessUnit,
        measured_at: DateTime<Utc>,
    ) -> Result<Self> {
        let reading = Self {
            location,
            thickness,
            unit,
            measured_at,
            method: None,
            inspector: None,
        };

        reading.validate()?;
        Ok(reading)
    }

    /// Validate reading values
    pub fn validate(&self) -> Result<()> {
        if !self.thickness.is_finite() || self.thickness <= 0.0 {
            return Err(Error::data_validation(format!(
                "Reading at '{}' has invalid thickness {}: must be positive",
                self.location.legacy_location_id, self.thickness
            )));
        }
        Ok(())
    }

    /// Thickness converted to inches
    pub fn thickness_inches(&self) -> f64 {
        self.unit.to_inches(self.thickness)
    }

    /// Thickness and date as a record for rate calculations
    pub fn thickness_record(&self) -> ThicknessRecord {
        ThicknessRecord {
            thickness: self.thickness_inches(),
            date: self.measured_at,
        }
    }
}

/// A thickness (inches) at a point in time
#[derive(Debug, Clone, Copy, PartialEq, Deserialize, Serialize)]
pub struct ThicknessRecord {
    pub thickness: f64,
    pub date: DateTime<Utc>,
}

impl ThicknessRecord {
    pub fn new(thickness: f64, date: DateTime<Utc>) -> Self {
        Self { thickness, date }
    }
}

// =============================================================================
// Station Key Resolution
// =============================================================================

/// Physical zone of a vessel a location belongs to
///
/// Head identity is kept as written in source data; a South head and a West
/// head are never merged, whatever the vessel orientation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum ComponentGroup {
    Shell,
    SouthHead,
    NorthHead,
    EastHead,
    WestHead,
    Nozzle,
    Other,
}

impl ComponentGroup {
    /// True for the four compass head groups
    pub fn is_head(self) -> bool {
        matches!(
            self,
            ComponentGroup::SouthHead
                | ComponentGroup::NorthHead
                | ComponentGroup::EastHead
                | ComponentGroup::WestHead
        )
    }

    /// Canonical upper-case name
    pub fn as_str(self) -> &'static str {
        match self {
            ComponentGroup::Shell => "SHELL",
            ComponentGroup::SouthHead => "SOUTHHEAD",
            ComponentGroup::NorthHead => "NORTHHEAD",
            ComponentGroup::EastHead => "EASTHEAD",
            ComponentGroup::WestHead => "WESTHEAD",
            ComponentGroup::Nozzle => "NOZZLE",
            ComponentGroup::Other => "OTHER",
        }
    }

    /// All groups in declaration order
    pub fn all_values() -> [ComponentGroup; 7] {
        [
            ComponentGroup::Shell,
            ComponentGroup::SouthHead,
            ComponentGroup::NorthHead,
            ComponentGroup::EastHead,
            ComponentGroup::WestHead,
            ComponentGroup::Nozzle,
            ComponentGroup::Other,
        ]
    }
}

impl fmt::Display for ComponentGroup {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ComponentGroup {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        let upper = s.trim().to_uppercase();
        ComponentGroup::all_values()
            .into_iter()
            .find(|group| group.as_str() == upper)
            .ok_or_else(|| {
                Error::data_validation(format!("Invalid component group '{}'", s))
            })
    }
}

/// Confidence attached to a resolution
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Confidence {
    Low,
    Medium,
    High,
}

impl fmt::Display for Confidence {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Confidence::Low => "low",
            Confidence::Medium => "medium",
            Confidence::High => "high",
        };
        f.write_str(name)
    }
}

/// Which resolution rule produced a station key
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ResolutionMethod {
    ExplicitSliceAngle,
    ParsedSliceAngle,
    SeamAdjacent,
    ShellAxialPosition,
    HeadPosition,
    NozzleId,
    FallbackLocation,
    CorrelationMapping,
}

impl ResolutionMethod {
    pub fn as_str(self) -> &'static str {
        match self {
            ResolutionMethod::ExplicitSliceAngle => "explicit_slice_angle",
            ResolutionMethod::ParsedSliceAngle => "parsed_slice_angle",
            ResolutionMethod::SeamAdjacent => "seam_adjacent",
            ResolutionMethod::ShellAxialPosition => "shell_axial_position",
            ResolutionMethod::HeadPosition => "head_position",
            ResolutionMethod::NozzleId => "nozzle_id",
            ResolutionMethod::FallbackLocation => "fallback_location",
            ResolutionMethod::CorrelationMapping => "correlation_mapping",
        }
    }
}

impl fmt::Display for ResolutionMethod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Canonical identity derived for a location
///
/// Derived on demand and never stored as ground truth. Resolution is a pure
/// function of the input location.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct StationKeyResult {
    pub station_key: String,
    pub component_group: ComponentGroup,
    pub slice_number: Option<u32>,
    pub angle_deg: Option<u32>,
    pub true_cml_id: Option<String>,
    pub axial_position: Option<String>,
    pub confidence: Confidence,
    pub method: ResolutionMethod,
}

/// Explicit baseline-to-current identifier override supplied by the caller
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct CorrelationMapping {
    pub baseline_cml: String,
    pub baseline_description: String,
    pub current_cml: String,
    pub current_description: String,
}

// =============================================================================
// Cross-Inspection Matching
// =============================================================================

/// A location already on record, optionally with its last thickness
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
pub struct ExistingLocation {
    /// Storage identifier of the location
    pub id: String,

    #[serde(flatten)]
    pub location: Location,

    /// Most recent thickness on record, used for corrosion rates
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub last_reading: Option<ThicknessRecord>,
}

impl ExistingLocation {
    pub fn new(id: impl Into<String>, location: Location) -> Self {
        Self {
            id: id.into(),
            location,
            last_reading: None,
        }
    }

    /// Attach the last recorded thickness
    pub fn with_last_reading(mut self, record: ThicknessRecord) -> Self {
        self.last_reading = Some(record);
        self
    }
}

/// How a new reading was matched to an existing location
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MatchType {
    Exact,
    LocationBased,
    Fuzzy,
    CmlNumberOnly,
    CorrelationMapping,
}

impl fmt::Display for MatchType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            MatchType::Exact => "exact",
            MatchType::LocationBased => "location_based",
            MatchType::Fuzzy => "fuzzy",
            MatchType::CmlNumberOnly => "cml_number_only",
            MatchType::CorrelationMapping => "correlation_mapping",
        };
        f.write_str(name)
    }
}

/// Result of correlating one new reading to one existing location
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LocationMatch {
    pub existing_id: String,

    /// Position of the existing location in the input slice
    pub existing_index: usize,

    /// Position of the new reading in the input batch
    pub new_index: usize,

    pub match_type: MatchType,

    /// Confidence in [0, 1]
    pub confidence: f64,

    /// Human-readable justification
    pub reason: String,

    /// The raw identifier differs between the two inspections
    pub identifier_changed: bool,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub previous_identifier: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub current_identifier: Option<String>,
}

/// A scored candidate existing location
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MatchCandidate {
    pub existing_id: String,
    pub score: f64,
    pub reason: String,
}

/// A new reading with several comparable candidates, left for a human
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MatchConflict {
    pub new_index: usize,
    pub legacy_location_id: String,
    pub candidates: Vec<MatchCandidate>,
}

/// A new reading with no acceptable match
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct UnmatchedReading {
    pub new_index: usize,
    pub legacy_location_id: String,
    pub reason: String,
}

/// Counts for a correlation run
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct MatchSummary {
    pub total_new: usize,
    pub matched: usize,
    pub unmatched: usize,
    pub conflicts: usize,
    pub exact: usize,
    pub location_based: usize,
    pub fuzzy: usize,
    pub cml_number_only: usize,
    pub correlation_mapping: usize,
}

impl MatchSummary {
    /// Human-readable one-line summary
    pub fn summary(&self) -> String {
        format!(
            "{} new readings: {} matched ({} exact, {} location, {} fuzzy, {} CML only, {} mapped), {} unmatched, {} conflicts",
            self.total_new,
            self.matched,
            self.exact,
            self.location_based,
            self.fuzzy,
            self.cml_number_only,
            self.correlation_mapping,
            self.unmatched,
            self.conflicts
        )
    }
}

/// Batch output of the correlator
///
/// Every new reading lands in exactly one of the three lists.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct MatchResult {
    pub matched: Vec<LocationMatch>,
    pub unmatched: Vec<UnmatchedReading>,
    pub conflicts: Vec<MatchConflict>,
    pub summary: MatchSummary,
}

impl MatchResult {
    /// Check that every new reading was accounted for exactly once
    pub fn is_balanced(&self) -> bool {
        self.matched.len() + self.unmatched.len() + self.conflicts.len() == self.summary.total_new
    }
}

// =============================================================================
// Corrosion Rate Units
// =============================================================================

/// Unit a corrosion rate is reported in
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum RateUnit {
    /// Mils (0.001 in) per year
    #[default]
    #[serde(rename = "mpy")]
    MilsPerYear,
    /// Inches per year
    #[serde(rename = "ipy")]
    InchesPerYear,
}

impl RateUnit {
    /// Convert a rate in inches per year to this unit
    pub fn from_inches_per_year(self, rate: f64) -> f64 {
        match self {
            RateUnit::MilsPerYear => rate * crate::constants::corrosion::MILS_PER_INCH,
            RateUnit::InchesPerYear => rate,
        }
    }

    /// Convert a rate in this unit to inches per year
    pub fn to_inches_per_year(self, rate: f64) -> f64 {
        match self {
            RateUnit::MilsPerYear => rate / crate::constants::corrosion::MILS_PER_INCH,
            RateUnit::InchesPerYear => rate,
        }
    }
}

impl fmt::Display for RateUnit {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RateUnit::MilsPerYear => f.write_str("mpy"),
            RateUnit::InchesPerYear => f.write_str("ipy"),
        }
    }
}

impl FromStr for RateUnit {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_lowercase().as_str() {
            "mpy" | "mils" | "mils/year" => Ok(RateUnit::MilsPerYear),
            "ipy" | "in/yr" | "inches/year" => Ok(RateUnit::InchesPerYear),
            _ => Err(Error::data_validation(format!(
                "Invalid rate unit '{}': expected mpy or ipy",
                s
            ))),
        }
    }
}
