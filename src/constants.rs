//! Engine constants for vessel integrity calculations
//!
//! This module contains all thresholds, default values, station key prefixes
//! and code references used throughout the engine. Values that a site may
//! legitimately tune are mirrored in [`crate::config`]; the constants here are
//! the defaults those sections start from.

// =============================================================================
// Station Key Construction
// =============================================================================

/// Prefixes and separators used when building canonical station keys
pub mod station_keys {
    /// Prefix for shell slice/angle keys (`SHELL-SLICE-{slice}-A{angle}`)
    pub const SHELL_SLICE_PREFIX: &str = "SHELL-SLICE";

    /// Prefix for shell axial keys (`SHELL-{axial}`)
    pub const SHELL_PREFIX: &str = "SHELL";

    /// Prefix for seam-adjacent keys (`SEAM-{headRef}-{axial}`)
    pub const SEAM_PREFIX: &str = "SEAM";

    /// Prefix for nozzle keys (`NOZZLE-{id}`)
    pub const NOZZLE_PREFIX: &str = "NOZZLE";

    /// Prefix for fallback keys (`LOCATION-{text}`)
    pub const LOCATION_PREFIX: &str = "LOCATION";

    /// Head reference used in seam keys when no head side can be identified
    pub const UNKNOWN_HEAD_REF: &str = "UNKNOWN";

    /// Placeholder used when a fallback key has neither location text nor id
    pub const UNIDENTIFIED: &str = "UNIDENTIFIED";

    /// Head position token for the crown/centre of a head
    pub const CENTER_POSITION: &str = "CENTER";
}

// =============================================================================
// Location Correlation Defaults
// =============================================================================

/// Scoring weights and decision thresholds for cross-inspection matching
pub mod matching {
    /// Score awarded when component groups agree (also the hard gate)
    pub const COMPONENT_GROUP_WEIGHT: f64 = 0.30;

    /// Score awarded for an exact slice number match
    pub const SLICE_WEIGHT: f64 = 0.35;

    /// Score awarded for an exact circumferential angle match
    pub const ANGLE_EXACT_WEIGHT: f64 = 0.25;

    /// Score awarded for an adjacent circumferential angle
    pub const ANGLE_ADJACENT_WEIGHT: f64 = 0.10;

    /// Score awarded for identical normalized location descriptions
    pub const DESCRIPTION_EXACT_WEIGHT: f64 = 0.10;

    /// Score awarded when one normalized description contains the other
    pub const DESCRIPTION_PARTIAL_WEIGHT: f64 = 0.05;

    /// Default score at or above which a candidate is an exact match
    pub const DEFAULT_EXACT_MATCH_THRESHOLD: f64 = 0.95;

    /// Default minimum score for a candidate to be considered at all
    pub const DEFAULT_FUZZY_MATCH_THRESHOLD: f64 = 0.70;

    /// Score at or above which a non-exact winner is classed as location based
    pub const LOCATION_BASED_THRESHOLD: f64 = 0.85;

    /// Confidence assigned to identifier-only matches
    pub const CML_ONLY_CONFIDENCE: f64 = 0.5;

    /// Confidence assigned to matches made through an explicit correlation mapping
    pub const CORRELATION_MAPPING_CONFIDENCE: f64 = 0.98;

    /// Default angular tolerance (degrees) for adjacent-angle credit
    pub const DEFAULT_ADJACENT_ANGLE_TOLERANCE_DEG: u32 = 45;

    /// Default score gap below which the top two candidates are a conflict
    pub const DEFAULT_CONFLICT_MARGIN: f64 = 0.10;

    /// Default number of candidates carried on a conflict
    pub const DEFAULT_MAX_CONFLICT_CANDIDATES: usize = 3;
}

// =============================================================================
// Corrosion Rate Defaults
// =============================================================================

/// Corrosion rate validity gates and anomaly thresholds
pub mod corrosion {
    /// Days per year used for elapsed-time conversion
    pub const DAYS_PER_YEAR: f64 = 365.25;

    /// Milliseconds per year (365.25-day year)
    pub const MILLIS_PER_YEAR: f64 = DAYS_PER_YEAR * 24.0 * 60.0 * 60.0 * 1000.0;

    /// Minimum elapsed time for a rate to be considered valid
    pub const MIN_TIME_SPAN_YEARS: f64 = 0.1;

    /// Rate above which a mils/year result carries an anomaly warning
    pub const ANOMALY_THRESHOLD_MPY: f64 = 50.0;

    /// Rate above which an inches/year result carries an anomaly warning
    pub const ANOMALY_THRESHOLD_IPY: f64 = 0.05;

    /// Mils per inch
    pub const MILS_PER_INCH: f64 = 1000.0;

    /// Decimal places reported on rates
    pub const RATE_DECIMALS: i32 = 3;
}

// =============================================================================
// ASME Section VIII Division 1
// =============================================================================

/// Code references and validity limits for the thickness/MAWP formulas
pub mod asme {
    /// Cylindrical shell, circumferential stress (longitudinal joints)
    pub const SHELL_THICKNESS_REF: &str = "ASME VIII-1 UG-27(c)(1)";
    pub const SHELL_MAWP_REF: &str = "ASME VIII-1 UG-27(c)(1), solved for P";

    /// Hemispherical head
    pub const HEMISPHERICAL_THICKNESS_REF: &str = "ASME VIII-1 UG-32(f)";
    pub const HEMISPHERICAL_MAWP_REF: &str = "ASME VIII-1 UG-32(f), solved for P";

    /// 2:1 ellipsoidal head
    pub const ELLIPSOIDAL_THICKNESS_REF: &str = "ASME VIII-1 UG-32(d)";
    pub const ELLIPSOIDAL_MAWP_REF: &str = "ASME VIII-1 UG-32(d), solved for P";

    /// Torispherical head (6% knuckle)
    pub const TORISPHERICAL_THICKNESS_REF: &str = "ASME VIII-1 UG-32(e)";
    pub const TORISPHERICAL_MAWP_REF: &str = "ASME VIII-1 UG-32(e), solved for P";

    /// Thick-wall method callers are directed to when thin-wall limits fail
    pub const THICK_WALL_REF: &str = "ASME VIII-1 Mandatory Appendix 1-2";

    /// Thin-wall applicability for cylindrical shells: P <= 0.385 S E
    pub const SHELL_THIN_WALL_RATIO: f64 = 0.385;

    /// Thin-wall applicability for hemispherical heads: P <= 0.665 S E
    pub const HEMISPHERICAL_THIN_WALL_RATIO: f64 = 0.665;

    /// Torispherical crown-radius coefficient
    pub const TORISPHERICAL_COEFFICIENT: f64 = 0.885;

    /// Pressure above which a plausibility warning is attached (psig)
    pub const HIGH_PRESSURE_WARNING_PSI: f64 = 5000.0;

    /// Ratio of thickness to radius above which thin-wall assumptions are questioned
    pub const THICKNESS_RADIUS_WARNING_RATIO: f64 = 0.5;

    /// Relative tolerance for the post-calculation verification step (0.01%)
    pub const VERIFICATION_TOLERANCE: f64 = 1.0e-4;
}

// =============================================================================
// Fitness-for-Service Level 1
// =============================================================================

/// Level-1 screening limits
pub mod ffs {
    /// Remaining life is divided by this factor to get the inspection interval
    pub const INTERVAL_SAFETY_FACTOR: f64 = 2.0;

    /// Code maximum inspection interval (years)
    pub const MAX_INSPECTION_INTERVAL_YEARS: f64 = 10.0;

    /// Remaining life below which a warning is raised (years)
    pub const LIFE_WARNING_YEARS: f64 = 5.0;

    /// Remaining life below which a critical warning is raised (years)
    pub const LIFE_CRITICAL_YEARS: f64 = 2.0;

    /// Operating pressure fraction of MAWP above which a warning is raised
    pub const MAWP_MARGIN_RATIO: f64 = 0.90;

    /// Circumferential extent (degrees) beyond which Level 1 does not apply
    pub const LTA_MAX_CIRCUMFERENTIAL_EXTENT_DEG: f64 = 180.0;

    /// Assessment reference attached to screening recommendations
    pub const LEVEL_1_REF: &str = "API 579-1/ASME FFS-1 Part 4/5 Level 1";
}

// =============================================================================
// Logging
// =============================================================================

/// Default log level when neither RUST_LOG nor a verbosity flag is given
pub const DEFAULT_LOG_LEVEL: &str = "info";

/// Directory name used under the platform config directory
pub const CONFIG_DIR_NAME: &str = "vessel-integrity";

/// Config file name looked up in [`CONFIG_DIR_NAME`]
pub const CONFIG_FILE_NAME: &str = "config.toml";
