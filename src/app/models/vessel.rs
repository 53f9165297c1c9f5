//! Vessel design and assessment inputs
//!
//! Plain parameter records assembled by the caller from stored design data.
//! Lengths are inches, pressures and stresses psi.

use crate::{Error, Result};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Inputs for a required-thickness calculation
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct DesignInput {
    /// Design pressure P (psig)
    pub pressure: f64,

    /// Inside radius R (in)
    pub inside_radius: f64,

    /// Allowable stress S at design temperature (psi)
    pub allowable_stress: f64,

    /// Joint efficiency E
    pub joint_efficiency: f64,

    /// Corrosion allowance CA (in)
    #[serde(default)]
    pub corrosion_allowance: f64,
}

impl DesignInput {
    pub fn new(pressure: f64, inside_radius: f64, allowable_stress: f64, joint_efficiency: f64) -> Self {
        Self {
            pressure,
            inside_radius,
            allowable_stress,
            joint_efficiency,
            corrosion_allowance: 0.0,
        }
    }

    pub fn with_corrosion_allowance(mut self, corrosion_allowance: f64) -> Self {
        self.corrosion_allowance = corrosion_allowance;
        self
    }
}

/// Inputs for a MAWP calculation at a measured thickness
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct MawpInput {
    /// Actual (measured) thickness t (in)
    pub actual_thickness: f64,

    pub inside_radius: f64,
    pub allowable_stress: f64,
    pub joint_efficiency: f64,

    #[serde(default)]
    pub corrosion_allowance: f64,
}

impl MawpInput {
    pub fn new(
        actual_thickness: f64,
        inside_radius: f64,
        allowable_stress: f64,
        joint_efficiency: f64,
    ) -> Self {
        Self {
            actual_thickness,
            inside_radius,
            allowable_stress,
            joint_efficiency,
            corrosion_allowance: 0.0,
        }
    }

    pub fn with_corrosion_allowance(mut self, corrosion_allowance: f64) -> Self {
        self.corrosion_allowance = corrosion_allowance;
        self
    }
}

/// Formed head geometry
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum HeadType {
    Hemispherical,
    /// 2:1 semi-ellipsoidal
    Ellipsoidal,
    Torispherical,
}

impl fmt::Display for HeadType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            HeadType::Hemispherical => f.write_str("hemispherical"),
            HeadType::Ellipsoidal => f.write_str("ellipsoidal"),
            HeadType::Torispherical => f.write_str("torispherical"),
        }
    }
}

impl FromStr for HeadType {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_lowercase().as_str() {
            "hemispherical" | "hemi" => Ok(HeadType::Hemispherical),
            "ellipsoidal" | "elliptical" | "2:1" => Ok(HeadType::Ellipsoidal),
            "torispherical" | "flanged_and_dished" | "f&d" => Ok(HeadType::Torispherical),
            _ => Err(Error::data_validation(format!(
                "Invalid head type '{}': expected hemispherical, ellipsoidal or torispherical",
                s
            ))),
        }
    }
}

/// Component geometry used to pick the MAWP formula during screening
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ComponentKind {
    Shell,
    Hemispherical,
    Ellipsoidal,
    Torispherical,
}

impl fmt::Display for ComponentKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ComponentKind::Shell => f.write_str("shell"),
            ComponentKind::Hemispherical => f.write_str("hemispherical"),
            ComponentKind::Ellipsoidal => f.write_str("ellipsoidal"),
            ComponentKind::Torispherical => f.write_str("torispherical"),
        }
    }
}

/// Inputs for a Level-1 general metal loss screening
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FfsInput {
    pub component_type: ComponentKind,

    /// Measured remaining thickness (in)
    pub remaining_thickness: f64,

    /// Minimum required thickness (in)
    pub minimum_required_thickness: f64,

    /// Corrosion rate (in/yr)
    pub corrosion_rate: f64,

    /// Future corrosion allowance (in)
    #[serde(default)]
    pub future_corrosion_allowance: f64,

    /// Operating pressure (psig)
    pub operating_pressure: f64,

    pub inside_radius: f64,
    pub allowable_stress: f64,
    pub joint_efficiency: f64,

    /// Torispherical crown radius L (in); defaults to the inside radius
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub crown_radius: Option<f64>,
}

/// Inputs for a Level-1 local thin area screening
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LocalThinAreaInput {
    #[serde(flatten)]
    pub general: FfsInput,

    /// Circumferential length of the thin area (in)
    pub circumferential_length: f64,

    /// Axial length of the thin area (in)
    pub axial_length: f64,
}
