//! Vessel Integrity Library
//!
//! A Rust library for tracking wall-thickness measurements on pressure vessels
//! across repeated inspections and turning them into regulatory engineering
//! numbers.
//!
//! This library provides tools for:
//! - Normalizing free-text measurement location descriptions
//! - Resolving every reading to a canonical station key with a confidence and method tag
//! - Correlating new readings to historical locations when numbering schemes drift
//! - Deriving corrosion rates, remaining life and inspection intervals
//! - ASME Section VIII Division 1 minimum thickness and MAWP formulas with audit trails
//! - Fitness-for-Service Level 1 screening for general metal loss and local thin areas
//!
//! All engine operations are pure functions over plain data. Data problems are
//! reported inside the returned result types; [`Error`] is reserved for malformed
//! options, configuration and input decoding.

pub mod config;
pub mod constants;

// Core application modules
pub mod app {
    pub mod models;
    pub mod services {
        pub mod asme;
        pub mod correlator;
        pub mod corrosion;
        pub mod ffs;
        pub mod location_parser;
        pub mod station_key;
    }
}

// CLI modules
pub mod cli {
    pub mod args;
    pub mod commands;
}

// Re-export commonly used types
pub use app::models::{
    CalculationResult, ComponentGroup, Confidence, CorrelationMapping, CorrosionRateResult,
    DesignInput, ExistingLocation, FfsInput, FfsResult, HeadType, LocalThinAreaInput, Location,
    LocationMatch, MatchResult, MatchType, MawpInput, Reading, RemainingLife, ResolutionMethod,
    StationKeyResult, ThicknessRecord, ThicknessUnit,
};
pub use app::services::asme::AsmeEngine;
pub use app::services::correlator::LocationCorrelator;
pub use app::services::corrosion::CorrosionCalculator;
pub use app::services::ffs::FfsScreener;
pub use app::services::station_key::{classify, resolve, resolve_all, resolve_with_correlation};
pub use config::EngineConfig;

/// Result type alias for the vessel integrity engine
pub type Result<T> = std::result::Result<T, Error>;

/// Error types for configuration, option validation and input decoding
#[derive(thiserror::Error, Debug)]
pub enum Error {
    /// I/O operation failed
    #[error("I/O error: {message}")]
    Io {
        message: String,
        #[source]
        source: std::io::Error,
    },

    /// Configuration error
    #[error("Configuration error: {message}")]
    Configuration { message: String },

    /// Configuration file could not be parsed
    #[error("Configuration parse error in '{file}': {message}")]
    ConfigParse {
        file: String,
        message: String,
        #[source]
        source: Option<toml::de::Error>,
    },

    /// Malformed option combination supplied by the caller
    #[error("Invalid options: {message}")]
    InvalidOptions { message: String },

    /// Input record failed validation
    #[error("Data validation error: {message}")]
    DataValidation { message: String },

    /// JSON input or output failed
    #[error("JSON error: {message}")]
    Json {
        message: String,
        #[source]
        source: serde_json::Error,
    },
}

impl Error {
    /// Create an I/O error with context
    pub fn io(message: impl Into<String>, source: std::io::Error) -> Self {
        Self::Io {
            message: message.into(),
            source,
        }
    }

    /// Create a configuration error
    pub fn configuration(message: impl Into<String>) -> Self {
        Self::Configuration {
            message: message.into(),
        }
    }

    /// Create a configuration parse error
    pub fn config_parse(
        file: impl Into<String>,
        message: impl Into<String>,
        source: Option<toml::de::Error>,
    ) -> Self {
        Self::ConfigParse {
            file: file.into(),
            message: message.into(),
            source,
        }
    }

    /// Create an invalid options error
    pub fn invalid_options(message: impl Into<String>) -> Self {
        Self::InvalidOptions {
            message: message.into(),
        }
    }

    /// Create a data validation error
    pub fn data_validation(message: impl Into<String>) -> Self {
        Self::DataValidation {
            message: message.into(),
        }
    }

    /// Create a JSON error with context
    pub fn json(message: impl Into<String>, source: serde_json::Error) -> Self {
        Self::Json {
            message: message.into(),
            source,
        }
    }
}

// Automatic conversions from common error types
impl From<std::io::Error> for Error {
    fn from(error: std::io::Error) -> Self {
        Self::Io {
            message: "I/O operation failed".to_string(),
            source: error,
        }
    }
}

impl From<toml::de::Error> for Error {
    fn from(error: toml::de::Error) -> Self {
        Self::ConfigParse {
            file: "unknown".to_string(),
            message: "TOML parsing failed".to_string(),
            source: Some(error),
        }
    }
}

impl From<serde_json::Error> for Error {
    fn from(error: serde_json::Error) -> Self {
        Self::Json {
            message: "JSON processing failed".to_string(),
            source: error,
        }
    }
}
