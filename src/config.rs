//! Configuration management and validation.
//!
//! Provides configuration structures for location matching, corrosion rate
//! validity gates, ASME formula limits and Fitness-for-Service screening.
//! Every section defaults to the values in [`crate::constants`] and can be
//! partially overridden from a TOML file.

use crate::app::models::RateUnit;
use crate::constants::{self, asme, corrosion, ffs, matching};
use crate::{Error, Result};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use tracing::debug;

/// Options controlling cross-inspection location matching
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct MatchOptions {
    /// Score at or above which a candidate is accepted as an exact match
    pub exact_match_threshold: f64,

    /// Minimum score for a candidate to be considered
    pub fuzzy_match_threshold: f64,

    /// Fall back to matching on the raw identifier when no candidate qualifies
    pub allow_cml_only_match: bool,

    /// Angular difference (degrees, wraparound aware) that earns adjacency credit
    pub adjacent_angle_tolerance_deg: u32,

    /// Top-two score gap below which several candidates form a conflict
    pub conflict_margin: f64,

    /// Number of candidates carried on a conflict
    pub max_conflict_candidates: usize,
}

impl Default for MatchOptions {
    fn default() -> Self {
        Self {
            exact_match_threshold: matching::DEFAULT_EXACT_MATCH_THRESHOLD,
            fuzzy_match_threshold: matching::DEFAULT_FUZZY_MATCH_THRESHOLD,
            allow_cml_only_match: true,
            adjacent_angle_tolerance_deg: matching::DEFAULT_ADJACENT_ANGLE_TOLERANCE_DEG,
            conflict_margin: matching::DEFAULT_CONFLICT_MARGIN,
            max_conflict_candidates: matching::DEFAULT_MAX_CONFLICT_CANDIDATES,
        }
    }
}

impl MatchOptions {
    /// Set the exact match threshold
    pub fn with_exact_threshold(mut self, threshold: f64) -> Self {
        self.exact_match_threshold = threshold;
        self
    }

    /// Set the fuzzy match threshold
    pub fn with_fuzzy_threshold(mut self, threshold: f64) -> Self {
        self.fuzzy_match_threshold = threshold;
        self
    }

    /// Disable identifier-only fallback matching
    pub fn without_cml_only_match(mut self) -> Self {
        self.allow_cml_only_match = false;
        self
    }

    /// Set the adjacent angle tolerance in degrees
    pub fn with_adjacent_angle_tolerance(mut self, degrees: u32) -> Self {
        self.adjacent_angle_tolerance_deg = degrees;
        self
    }

    /// Set the conflict margin
    pub fn with_conflict_margin(mut self, margin: f64) -> Self {
        self.conflict_margin = margin;
        self
    }

    /// Validate option combinations
    pub fn validate(&self) -> Result<()> {
        for (name, value) in [
            ("exact_match_threshold", self.exact_match_threshold),
            ("fuzzy_match_threshold", self.fuzzy_match_threshold),
            ("conflict_margin", self.conflict_margin),
        ] {
            if !(0.0..=1.0).contains(&value) {
                return Err(Error::invalid_options(format!(
                    "{} must be between 0 and 1, got {}",
                    name, value
                )));
            }
        }

        if self.fuzzy_match_threshold > self.exact_match_threshold {
            return Err(Error::invalid_options(format!(
                "fuzzy_match_threshold ({}) cannot exceed exact_match_threshold ({})",
                self.fuzzy_match_threshold, self.exact_match_threshold
            )));
        }

        if self.adjacent_angle_tolerance_deg > 180 {
            return Err(Error::invalid_options(format!(
                "adjacent_angle_tolerance_deg must be at most 180, got {}",
                self.adjacent_angle_tolerance_deg
            )));
        }

        if self.max_conflict_candidates == 0 {
            return Err(Error::invalid_options(
                "max_conflict_candidates must be at least 1",
            ));
        }

        Ok(())
    }
}

/// Corrosion rate validity gates
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CorrosionConfig {
    /// Minimum elapsed years between readings for a valid rate
    pub min_time_span_years: f64,

    /// Anomaly warning threshold in mils per year
    pub anomaly_threshold_mpy: f64,

    /// Anomaly warning threshold in inches per year
    pub anomaly_threshold_ipy: f64,

    /// Unit used when the caller does not choose one
    pub rate_unit: RateUnit,
}

impl Default for CorrosionConfig {
    fn default() -> Self {
        Self {
            min_time_span_years: corrosion::MIN_TIME_SPAN_YEARS,
            anomaly_threshold_mpy: corrosion::ANOMALY_THRESHOLD_MPY,
            anomaly_threshold_ipy: corrosion::ANOMALY_THRESHOLD_IPY,
            rate_unit: RateUnit::MilsPerYear,
        }
    }
}

impl CorrosionConfig {
    /// Validate corrosion settings
    pub fn validate(&self) -> Result<()> {
        if self.min_time_span_years <= 0.0 {
            return Err(Error::configuration(format!(
                "min_time_span_years must be positive, got {}",
                self.min_time_span_years
            )));
        }
        if self.anomaly_threshold_mpy <= 0.0 || self.anomaly_threshold_ipy <= 0.0 {
            return Err(Error::configuration(
                "Corrosion anomaly thresholds must be positive",
            ));
        }
        Ok(())
    }
}

/// ASME formula limits
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AsmeConfig {
    /// Pressure above which a plausibility warning is attached (psig)
    pub high_pressure_warning_psi: f64,

    /// Shell thin-wall applicability ratio (P <= ratio * S * E)
    pub shell_thin_wall_ratio: f64,

    /// Hemispherical head thin-wall applicability ratio
    pub hemispherical_thin_wall_ratio: f64,

    /// Relative tolerance for verification against the recorded intermediates
    pub verification_tolerance: f64,
}

impl Default for AsmeConfig {
    fn default() -> Self {
        Self {
            high_pressure_warning_psi: asme::HIGH_PRESSURE_WARNING_PSI,
            shell_thin_wall_ratio: asme::SHELL_THIN_WALL_RATIO,
            hemispherical_thin_wall_ratio: asme::HEMISPHERICAL_THIN_WALL_RATIO,
            verification_tolerance: asme::VERIFICATION_TOLERANCE,
        }
    }
}

impl AsmeConfig {
    /// Validate formula limits
    pub fn validate(&self) -> Result<()> {
        if self.shell_thin_wall_ratio <= 0.0 || self.hemispherical_thin_wall_ratio <= 0.0 {
            return Err(Error::configuration("Thin-wall ratios must be positive"));
        }
        if self.verification_tolerance <= 0.0 {
            return Err(Error::configuration(
                "verification_tolerance must be positive",
            ));
        }
        Ok(())
    }
}

/// How torispherical heads are treated during FFS MAWP recalculation
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TorisphericalMethod {
    /// Use the 2:1 ellipsoidal formula and flag the result as an approximation
    EllipsoidalApproximation,
    /// Use the dedicated torispherical formula
    Dedicated,
}

/// Fitness-for-Service Level 1 screening limits
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FfsConfig {
    /// Remaining life divisor for the next inspection interval
    pub interval_safety_factor: f64,

    /// Code maximum inspection interval in years
    pub max_inspection_interval_years: f64,

    /// Remaining life warning threshold (years)
    pub life_warning_years: f64,

    /// Remaining life critical threshold (years)
    pub life_critical_years: f64,

    /// Operating pressure fraction of MAWP that raises a warning
    pub mawp_margin_ratio: f64,

    /// Circumferential extent limit for Level 1 local thin areas (degrees)
    pub lta_max_extent_deg: f64,

    /// Torispherical head treatment
    pub torispherical_method: TorisphericalMethod,
}

impl Default for FfsConfig {
    fn default() -> Self {
        Self {
            interval_safety_factor: ffs::INTERVAL_SAFETY_FACTOR,
            max_inspection_interval_years: ffs::MAX_INSPECTION_INTERVAL_YEARS,
            life_warning_years: ffs::LIFE_WARNING_YEARS,
            life_critical_years: ffs::LIFE_CRITICAL_YEARS,
            mawp_margin_ratio: ffs::MAWP_MARGIN_RATIO,
            lta_max_extent_deg: ffs::LTA_MAX_CIRCUMFERENTIAL_EXTENT_DEG,
            torispherical_method: TorisphericalMethod::EllipsoidalApproximation,
        }
    }
}

impl FfsConfig {
    /// Use the dedicated torispherical formula instead of the approximation
    pub fn with_dedicated_torispherical(mut self) -> Self {
        self.torispherical_method = TorisphericalMethod::Dedicated;
        self
    }

    /// Validate screening limits
    pub fn validate(&self) -> Result<()> {
        if self.interval_safety_factor <= 0.0 {
            return Err(Error::configuration(format!(
                "interval_safety_factor must be positive, got {}",
                self.interval_safety_factor
            )));
        }
        if self.max_inspection_interval_years <= 0.0 {
            return Err(Error::configuration(
                "max_inspection_interval_years must be positive",
            ));
        }
        if self.life_critical_years > self.life_warning_years {
            return Err(Error::configuration(format!(
                "life_critical_years ({}) cannot exceed life_warning_years ({})",
                self.life_critical_years, self.life_warning_years
            )));
        }
        if !(0.0..=360.0).contains(&self.lta_max_extent_deg) {
            return Err(Error::configuration(
                "lta_max_extent_deg must be between 0 and 360",
            ));
        }
        Ok(())
    }
}

/// Logging configuration used by the binary
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LoggingConfig {
    /// Default log level when RUST_LOG is not set
    pub level: String,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: constants::DEFAULT_LOG_LEVEL.to_string(),
        }
    }
}

/// Global configuration for the engine
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EngineConfig {
    pub matching: MatchOptions,
    pub corrosion: CorrosionConfig,
    pub asme: AsmeConfig,
    pub ffs: FfsConfig,
    pub logging: LoggingConfig,
}

impl EngineConfig {
    /// Replace the matching section
    pub fn with_matching(mut self, matching: MatchOptions) -> Self {
        self.matching = matching;
        self
    }

    /// Replace the corrosion section
    pub fn with_corrosion(mut self, corrosion: CorrosionConfig) -> Self {
        self.corrosion = corrosion;
        self
    }

    /// Replace the FFS section
    pub fn with_ffs(mut self, ffs: FfsConfig) -> Self {
        self.ffs = ffs;
        self
    }

    /// Default config file location (`<config dir>/vessel-integrity/config.toml`)
    pub fn default_config_path() -> Result<PathBuf> {
        dirs::config_dir()
            .map(|dir| {
                dir.join(constants::CONFIG_DIR_NAME)
                    .join(constants::CONFIG_FILE_NAME)
            })
            .ok_or_else(|| Error::configuration("Could not determine config directory"))
    }

    /// Load configuration from a TOML file
    pub fn load_from_file(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path).map_err(|e| {
            Error::io(format!("Failed to read config file {}", path.display()), e)
        })?;

        let config: Self = toml::from_str(&content).map_err(|e| {
            Error::config_parse(path.display().to_string(), e.to_string(), Some(e))
        })?;

        config.validate()?;
        debug!("Loaded configuration from {}", path.display());
        Ok(config)
    }

    /// Load from an explicit path, else the default path if it exists, else defaults
    pub fn load_or_default(path: Option<&Path>) -> Result<Self> {
        if let Some(path) = path {
            return Self::load_from_file(path);
        }

        match Self::default_config_path() {
            Ok(default_path) if default_path.exists() => Self::load_from_file(&default_path),
            _ => {
                debug!("No config file found, using defaults");
                Ok(Self::default())
            }
        }
    }

    /// Serialize to TOML (used to write a starter config)
    pub fn to_toml_string(&self) -> Result<String> {
        toml::to_string_pretty(self)
            .map_err(|e| Error::configuration(format!("Failed to serialize config: {}", e)))
    }

    /// Validate every section
    pub fn validate(&self) -> Result<()> {
        self.matching.validate()?;
        self.corrosion.validate()?;
        self.asme.validate()?;
        self.ffs.validate()?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    #[test]
    fn test_default_config_is_valid() {
        let config = EngineConfig::default();
        assert!(config.validate().is_ok());
        assert_eq!(config.matching.exact_match_threshold, 0.95);
        assert_eq!(config.matching.fuzzy_match_threshold, 0.70);
        assert!(config.matching.allow_cml_only_match);
    }

    #[test]
    fn test_fuzzy_above_exact_is_rejected() {
        let options = MatchOptions::default()
            .with_exact_threshold(0.6)
            .with_fuzzy_threshold(0.8);
        assert!(matches!(
            options.validate(),
            Err(Error::InvalidOptions { .. })
        ));
    }

    #[test]
    fn test_threshold_out_of_range_is_rejected() {
        let options = MatchOptions::default().with_exact_threshold(1.5);
        assert!(options.validate().is_err());
    }

    #[test]
    fn test_partial_toml_keeps_defaults() {
        let mut file = NamedTempFile::new().unwrap();
        writeln!(
            file,
            "[matching]\nfuzzy_match_threshold = 0.6\n\n[ffs]\ntorispherical_method = \"dedicated\""
        )
        .unwrap();

        let config = EngineConfig::load_from_file(file.path()).unwrap();
        assert_eq!(config.matching.fuzzy_match_threshold, 0.6);
        assert_eq!(config.matching.exact_match_threshold, 0.95);
        assert_eq!(
            config.ffs.torispherical_method,
            TorisphericalMethod::Dedicated
        );
        assert_eq!(config.corrosion, CorrosionConfig::default());
    }

    #[test]
    fn test_invalid_toml_reports_file() {
        let mut file = NamedTempFile::new().unwrap();
        writeln!(file, "[matching\nbroken").unwrap();

        let err = EngineConfig::load_from_file(file.path()).unwrap_err();
        assert!(matches!(err, Error::ConfigParse { .. }));
    }

    #[test]
    fn test_missing_explicit_file_is_an_error() {
        let result = EngineConfig::load_or_default(Some(Path::new("/nonexistent/config.toml")));
        assert!(matches!(result, Err(Error::Io { .. })));
    }

    #[test]
    fn test_toml_round_trip() {
        let config = EngineConfig::default().with_ffs(FfsConfig::default().with_dedicated_torispherical());
        let text = config.to_toml_string().unwrap();
        let parsed: EngineConfig = toml::from_str(&text).unwrap();
        assert_eq!(parsed, config);
    }
}
