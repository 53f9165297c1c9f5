//! Data models for calculation outputs
//!
//! Every engineering number the engine produces is returned inside one of these
//! records. They are built fresh per call and never mutated afterwards, so a
//! persisted copy is a complete audit record of the calculation.

use super::RateUnit;
use serde::{Deserialize, Serialize};
use std::fmt;

// =============================================================================
// ASME Calculation Result
// =============================================================================

/// Which formula produced a [`CalculationResult`]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CalculationType {
    ShellRequiredThickness,
    ShellMawp,
    HemisphericalHeadRequiredThickness,
    HemisphericalHeadMawp,
    EllipsoidalHeadRequiredThickness,
    EllipsoidalHeadMawp,
    TorisphericalHeadRequiredThickness,
    TorisphericalHeadMawp,
}

impl CalculationType {
    /// True for MAWP calculations, false for required thickness
    pub fn is_mawp(self) -> bool {
        matches!(
            self,
            CalculationType::ShellMawp
                | CalculationType::HemisphericalHeadMawp
                | CalculationType::EllipsoidalHeadMawp
                | CalculationType::TorisphericalHeadMawp
        )
    }
}

impl fmt::Display for CalculationType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            CalculationType::ShellRequiredThickness => "shell_required_thickness",
            CalculationType::ShellMawp => "shell_mawp",
            CalculationType::HemisphericalHeadRequiredThickness => {
                "hemispherical_head_required_thickness"
            }
            CalculationType::HemisphericalHeadMawp => "hemispherical_head_mawp",
            CalculationType::EllipsoidalHeadRequiredThickness => {
                "ellipsoidal_head_required_thickness"
            }
            CalculationType::EllipsoidalHeadMawp => "ellipsoidal_head_mawp",
            CalculationType::TorisphericalHeadRequiredThickness => {
                "torispherical_head_required_thickness"
            }
            CalculationType::TorisphericalHeadMawp => "torispherical_head_mawp",
        };
        f.write_str(name)
    }
}

/// Overall validation state of a calculation
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ValidationStatus {
    Valid,
    Warning,
    Error,
}

/// One substituted quantity recorded for traceability
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct IntermediateValue {
    pub name: String,
    pub value: f64,
}

/// Immutable audit record of one ASME formula evaluation
///
/// `intermediate_values` keeps insertion order and holds every quantity the
/// formula used, so the number can be re-derived by hand.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CalculationResult {
    pub success: bool,
    pub calculation_type: CalculationType,
    pub result_value: Option<f64>,
    pub code_reference: String,
    pub intermediate_values: Vec<IntermediateValue>,
    pub warnings: Vec<String>,
    pub validation_status: ValidationStatus,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error_message: Option<String>,
}

impl CalculationResult {
    /// Look up a recorded intermediate value by name
    pub fn intermediate(&self, name: &str) -> Option<f64> {
        self.intermediate_values
            .iter()
            .find(|iv| iv.name == name)
            .map(|iv| iv.value)
    }

    /// Result value when the calculation succeeded
    pub fn value(&self) -> Option<f64> {
        if self.success { self.result_value } else { None }
    }

    pub fn has_warnings(&self) -> bool {
        !self.warnings.is_empty()
    }
}

// =============================================================================
// Corrosion Rate Result
// =============================================================================

/// Outcome of a corrosion rate derivation between two readings
///
/// `rate` is only present when `is_valid`; invalid inputs are reported with a
/// warning, never clamped to a plausible number.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CorrosionRateResult {
    /// Previous minus current thickness (inches); negative means growth
    pub thickness_loss: f64,

    /// Elapsed time between readings (years)
    pub time_span_years: f64,

    /// Rate in `unit`, rounded to three decimals
    pub rate: Option<f64>,

    pub unit: RateUnit,

    pub is_valid: bool,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub warning: Option<String>,
}

impl CorrosionRateResult {
    /// Rate converted to inches per year, when valid
    pub fn rate_inches_per_year(&self) -> Option<f64> {
        self.rate.map(|r| self.unit.to_inches_per_year(r))
    }
}

// =============================================================================
// Remaining Life
// =============================================================================

/// Remaining life outcome
///
/// A critical outcome is a distinct case rather than a small or negative number
/// so callers have to branch on it.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum RemainingLife {
    /// Positive remaining life in years
    Years { years: f64 },
    /// Actual thickness is at or below required thickness
    Critical { shortfall: f64 },
    /// No measurable corrosion; life is not limited by metal loss
    NotLimited,
    /// Negative or non-finite corrosion rate; life cannot be determined
    InvalidRate { rate: f64 },
}

impl RemainingLife {
    pub fn is_critical(&self) -> bool {
        matches!(self, RemainingLife::Critical { .. })
    }

    pub fn is_invalid_rate(&self) -> bool {
        matches!(self, RemainingLife::InvalidRate { .. })
    }

    /// Remaining years; `None` when not limited or undetermined, `Some(0.0)` when critical
    pub fn years(&self) -> Option<f64> {
        match self {
            RemainingLife::Years { years } => Some(*years),
            RemainingLife::Critical { .. } => Some(0.0),
            RemainingLife::NotLimited | RemainingLife::InvalidRate { .. } => None,
        }
    }
}

// =============================================================================
// Fitness-for-Service Result
// =============================================================================

/// Outcome of a Level-1 screening
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FfsResult {
    pub acceptable: bool,

    /// Remaining life in years; `None` when not limited by corrosion
    pub remaining_life_years: Option<f64>,

    /// Next inspection interval in years
    pub next_inspection_years: f64,

    /// MAWP recomputed at the remaining thickness (psig)
    pub recalculated_mawp: f64,

    /// Immediate action required
    pub critical: bool,

    /// Level 1 does not apply; a Level 2/3 assessment is needed
    pub requires_higher_level: bool,

    pub recommendations: Vec<String>,
    pub warnings: Vec<String>,
}

// =============================================================================
// Governing Values
// =============================================================================

/// Which rate series a governing corrosion rate came from
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RateBasis {
    LongTerm,
    ShortTerm,
}

/// The rate used for remaining life: the larger of the valid long-term and
/// short-term rates
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GoverningRate {
    /// Governing rate in inches per year; `None` when neither input is valid
    pub rate_ipy: Option<f64>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub basis: Option<RateBasis>,

    pub warnings: Vec<String>,
}

impl GoverningRate {
    pub fn is_valid(&self) -> bool {
        self.rate_ipy.is_some()
    }
}

/// A component MAWP calculation labelled with the component it belongs to
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ComponentMawp {
    pub component: String,
    pub result: CalculationResult,
}

impl ComponentMawp {
    pub fn new(component: impl Into<String>, result: CalculationResult) -> Self {
        Self {
            component: component.into(),
            result,
        }
    }
}

/// Vessel MAWP: the lowest successful component MAWP
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GoverningMawp {
    /// Lowest successful component MAWP (psig)
    pub mawp: Option<f64>,

    /// Component whose MAWP governs
    pub governing_component: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub design_pressure: Option<f64>,

    /// Governing MAWP is below the design pressure
    pub requires_derate: bool,

    /// Components whose MAWP calculation failed
    pub failed_components: Vec<String>,

    pub warnings: Vec<String>,
}
