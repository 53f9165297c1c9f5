//! Command-line argument definitions for the vessel integrity engine
//!
//! Thin driver over the library: every subcommand reads JSON records or
//! numeric design inputs and prints the engine's result.

use crate::app::models::HeadType;
use crate::{Error, Result};
use clap::{Parser, Subcommand, ValueEnum};
use std::path::{Path, PathBuf};

/// CLI arguments for the vessel integrity engine
#[derive(Debug, Clone, Parser)]
#[command(
    name = "vessel-integrity",
    version,
    about = "Pressure vessel thickness monitoring: station keys, correlation, ASME and FFS checks",
    long_about = "Resolves canonical station keys for thickness monitoring locations, correlates \
                  readings across inspections, derives corrosion rates, evaluates ASME VIII-1 \
                  thickness and MAWP formulas, and runs API 579 Level 1 screening. Inputs are \
                  JSON files (or '-' for stdin); results are printed as text or JSON."
)]
pub struct Args {
    #[command(subcommand)]
    pub command: Commands,

    /// Path to configuration file
    ///
    /// TOML configuration file for thresholds and limits. If not specified,
    /// looks for <config dir>/vessel-integrity/config.toml and falls back to
    /// built-in defaults.
    #[arg(
        short = 'c',
        long = "config",
        value_name = "FILE",
        global = true,
        help = "Path to configuration file (TOML format)"
    )]
    pub config_file: Option<PathBuf>,

    /// Logging verbosity level
    #[arg(
        short = 'v',
        long = "verbose",
        action = clap::ArgAction::Count,
        global = true,
        help = "Increase logging verbosity (-v: info, -vv: debug, -vvv: trace)"
    )]
    pub verbose: u8,

    /// Suppress log output except errors
    #[arg(
        short = 'q',
        long = "quiet",
        global = true,
        conflicts_with = "verbose",
        help = "Suppress output except errors"
    )]
    pub quiet: bool,

    /// Output format for results
    #[arg(
        long = "format",
        value_enum,
        default_value = "text",
        global = true,
        help = "Output format for results"
    )]
    pub output_format: OutputFormat,
}

/// Available subcommands
#[derive(Debug, Clone, Subcommand)]
pub enum Commands {
    /// Resolve canonical station keys for a list of locations
    Resolve(ResolveArgs),
    /// Match new readings to existing locations and derive corrosion rates
    Correlate(CorrelateArgs),
    /// Shell required thickness, and MAWP when a thickness is given
    Shell(ShellArgs),
    /// Formed head required thickness, and MAWP when a thickness is given
    Head(HeadArgs),
    /// Level 1 fitness-for-service screening
    Ffs(FfsArgs),
    /// Print the effective configuration as TOML
    Config,
}

impl Commands {
    /// Subcommand name as typed on the command line
    pub fn name(&self) -> &'static str {
        match self {
            Commands::Resolve(_) => "resolve",
            Commands::Correlate(_) => "correlate",
            Commands::Shell(_) => "shell",
            Commands::Head(_) => "head",
            Commands::Ffs(_) => "ffs",
            Commands::Config => "config",
        }
    }
}

/// Arguments for the resolve command
#[derive(Debug, Clone, Parser)]
pub struct ResolveArgs {
    /// JSON array of locations ('-' for stdin)
    #[arg(value_name = "LOCATIONS")]
    pub input: PathBuf,

    /// JSON array of baseline/current correlation mappings
    #[arg(short = 'm', long = "mappings", value_name = "FILE")]
    pub mappings: Option<PathBuf>,
}

/// Arguments for the correlate command
#[derive(Debug, Clone, Parser)]
pub struct CorrelateArgs {
    /// JSON array of existing locations, optionally with last readings
    #[arg(short = 'e', long = "existing", value_name = "FILE")]
    pub existing: PathBuf,

    /// JSON array of new readings ('-' for stdin)
    #[arg(short = 'r', long = "readings", value_name = "FILE")]
    pub readings: PathBuf,

    /// JSON array of baseline/current correlation mappings
    #[arg(short = 'm', long = "mappings", value_name = "FILE")]
    pub mappings: Option<PathBuf>,

    /// Score at or above which a match is exact
    #[arg(long = "exact-threshold", value_name = "SCORE")]
    pub exact_threshold: Option<f64>,

    /// Minimum score for a candidate
    #[arg(long = "fuzzy-threshold", value_name = "SCORE")]
    pub fuzzy_threshold: Option<f64>,

    /// Do not fall back to identifier-only matches
    #[arg(long = "no-cml-only")]
    pub no_cml_only: bool,
}

/// Design inputs shared by the shell and head commands
#[derive(Debug, Clone, Parser)]
pub struct DesignArgs {
    /// Design pressure P (psig)
    #[arg(short = 'p', long = "pressure", value_name = "PSIG")]
    pub pressure: f64,

    /// Inside radius R (in)
    #[arg(short = 'r', long = "radius", value_name = "IN")]
    pub radius: f64,

    /// Allowable stress S (psi)
    #[arg(short = 's', long = "stress", value_name = "PSI")]
    pub stress: f64,

    /// Joint efficiency E
    #[arg(short = 'e', long = "efficiency", value_name = "E", default_value_t = 1.0)]
    pub efficiency: f64,

    /// Corrosion allowance CA (in)
    #[arg(long = "ca", value_name = "IN", default_value_t = 0.0)]
    pub corrosion_allowance: f64,

    /// Measured thickness (in); adds MAWP and thickness margin
    #[arg(short = 't', long = "thickness", value_name = "IN")]
    pub thickness: Option<f64>,
}

/// Arguments for the shell command
#[derive(Debug, Clone, Parser)]
pub struct ShellArgs {
    #[command(flatten)]
    pub design: DesignArgs,
}

/// Arguments for the head command
#[derive(Debug, Clone, Parser)]
pub struct HeadArgs {
    /// Head type: hemispherical, ellipsoidal or torispherical
    #[arg(long = "type", value_name = "TYPE", default_value = "ellipsoidal")]
    pub head_type: HeadType,

    /// Torispherical crown radius L (in); defaults to the inside radius
    #[arg(long = "crown-radius", value_name = "IN")]
    pub crown_radius: Option<f64>,

    #[command(flatten)]
    pub design: DesignArgs,
}

/// Arguments for the ffs command
#[derive(Debug, Clone, Parser)]
pub struct FfsArgs {
    /// JSON screening input ('-' for stdin)
    #[arg(value_name = "INPUT")]
    pub input: PathBuf,

    /// Treat the input as a local thin area
    #[arg(long = "local")]
    pub local: bool,
}

/// Output format options
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    /// Human-readable output
    Text,
    /// JSON for scripting
    Json,
}

impl Args {
    /// Log level from flags, falling back to the configured level
    pub fn get_log_level(&self, configured: &str) -> String {
        if self.quiet {
            return "error".to_string();
        }
        match self.verbose {
            0 => configured.to_string(),
            1 => "info".to_string(),
            2 => "debug".to_string(),
            _ => "trace".to_string(),
        }
    }

    /// Validate argument consistency before any work is done
    pub fn validate(&self) -> Result<()> {
        if let Some(config_file) = &self.config_file {
            if !config_file.exists() {
                return Err(Error::configuration(format!(
                    "Config file does not exist: {}",
                    config_file.display()
                )));
            }
        }

        match &self.command {
            Commands::Resolve(args) => {
                check_input(&args.input)?;
                check_optional(args.mappings.as_deref())
            }
            Commands::Correlate(args) => {
                check_input(&args.existing)?;
                check_input(&args.readings)?;
                check_optional(args.mappings.as_deref())
            }
            Commands::Shell(args) => args.design.validate(),
            Commands::Head(args) => args.design.validate(),
            Commands::Ffs(args) => check_input(&args.input),
            Commands::Config => Ok(()),
        }
    }
}

impl DesignArgs {
    /// Reject non-numeric values early; range checks belong to the engine
    pub fn validate(&self) -> Result<()> {
        let mut values = vec![
            ("pressure", self.pressure),
            ("radius", self.radius),
            ("stress", self.stress),
            ("efficiency", self.efficiency),
            ("ca", self.corrosion_allowance),
        ];
        values.extend(self.thickness.map(|t| ("thickness", t)));

        for (name, value) in values {
            if !value.is_finite() {
                return Err(Error::invalid_options(format!(
                    "--{} must be a finite number, got {}",
                    name, value
                )));
            }
        }
        Ok(())
    }
}

/// Whether a path names standard input
pub fn is_stdin(path: &Path) -> bool {
    path.as_os_str() == "-"
}

fn check_input(path: &Path) -> Result<()> {
    if is_stdin(path) || path.is_file() {
        Ok(())
    } else {
        Err(Error::configuration(format!(
            "Input file does not exist: {}",
            path.display()
        )))
    }
}

fn check_optional(path: Option<&Path>) -> Result<()> {
    path.map_or(Ok(()), check_input)
}
