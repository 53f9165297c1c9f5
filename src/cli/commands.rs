//! Command implementations for the vessel integrity CLI
//!
//! Each handler decodes its JSON or numeric inputs, calls one engine operation
//! and prints the result in the requested format. Engine results are never
//! turned into errors here; only unreadable input or invalid configuration
//! fails a command.

use crate::app::models::{
    CalculationResult, ComponentMawp, CorrelationMapping, DesignInput, ExistingLocation, FfsInput,
    FfsResult, HeadType, LocalThinAreaInput, Location, MawpInput, Reading, StationKeyResult,
};
use crate::app::services::asme::{governing_mawp, thickness_margin};
use crate::app::services::correlator::BatchResult;
use crate::app::services::station_key;
use crate::cli::args::{
    Args, Commands, CorrelateArgs, DesignArgs, FfsArgs, HeadArgs, OutputFormat, ResolveArgs,
    ShellArgs, is_stdin,
};
use crate::config::EngineConfig;
use crate::{AsmeEngine, CorrosionCalculator, Error, FfsScreener, LocationCorrelator, Result};
use colored::*;
use serde::Serialize;
use serde::de::DeserializeOwned;
use std::io::Read;
use std::path::Path;
use tracing::{debug, info};

/// Thickness and MAWP results for one component
#[derive(Debug, Clone, Serialize)]
pub struct DesignReport {
    pub required_thickness: CalculationResult,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub mawp: Option<CalculationResult>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub thickness_margin: Option<f64>,
}

/// Main command runner
///
/// Validates arguments, loads configuration, sets up logging and dispatches
/// to the subcommand handler.
pub fn run(args: Args) -> Result<()> {
    args.validate()?;

    let config = EngineConfig::load_or_default(args.config_file.as_deref())?;
    setup_logging(&args, &config.logging.level)?;
    debug!("Command line arguments: {:?}", args);
    debug!("Loaded configuration: {:?}", config);

    match &args.command {
        Commands::Resolve(resolve_args) => run_resolve(resolve_args, args.output_format),
        Commands::Correlate(correlate_args) => {
            run_correlate(correlate_args, &config, args.output_format)
        }
        Commands::Shell(shell_args) => run_shell(shell_args, &config, args.output_format),
        Commands::Head(head_args) => run_head(head_args, &config, args.output_format),
        Commands::Ffs(ffs_args) => run_ffs(ffs_args, &config, args.output_format),
        Commands::Config => {
            print!("{}", config.to_toml_string()?);
            Ok(())
        }
    }
}

/// Set up logging based on CLI arguments and the configured default level
fn setup_logging(args: &Args, configured_level: &str) -> Result<()> {
    use tracing_subscriber::{EnvFilter, fmt, layer::SubscriberExt, util::SubscriberInitExt};

    let log_level = args.get_log_level(configured_level);

    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(format!("vessel_integrity={}", log_level)));

    if args.quiet {
        tracing_subscriber::registry()
            .with(filter)
            .with(
                fmt::layer()
                    .with_target(false)
                    .with_level(true)
                    .with_writer(std::io::stderr)
                    .compact(),
            )
            .try_init()
            .map_err(|e| Error::configuration(format!("Failed to initialize logging: {}", e)))?;
    } else {
        tracing_subscriber::registry()
            .with(filter)
            .with(
                fmt::layer()
                    .with_target(false)
                    .with_level(true)
                    .with_timer(fmt::time::uptime())
                    .with_writer(std::io::stderr),
            )
            .try_init()
            .map_err(|e| Error::configuration(format!("Failed to initialize logging: {}", e)))?;
    }

    debug!("Logging initialized at level: {}", log_level);
    Ok(())
}

/// Read and decode a JSON document from a file, or stdin for `-`
pub fn read_json<T: DeserializeOwned>(path: &Path) -> Result<T> {
    let content = if is_stdin(path) {
        let mut buffer = String::new();
        std::io::stdin()
            .read_to_string(&mut buffer)
            .map_err(|e| Error::io("Failed to read standard input", e))?;
        buffer
    } else {
        std::fs::read_to_string(path)
            .map_err(|e| Error::io(format!("Failed to read {}", path.display()), e))?
    };

    serde_json::from_str(&content)
        .map_err(|e| Error::json(format!("Failed to decode {}", path.display()), e))
}

fn read_mappings(path: Option<&Path>) -> Result<Vec<CorrelationMapping>> {
    match path {
        Some(path) => {
            let mappings: Vec<CorrelationMapping> = read_json(path)?;
            info!("Loaded {} correlation mappings", mappings.len());
            Ok(mappings)
        }
        None => Ok(Vec::new()),
    }
}

fn print_json<T: Serialize>(value: &T) -> Result<()> {
    let rendered = serde_json::to_string_pretty(value)
        .map_err(|e| Error::json("Failed to encode result", e))?;
    println!("{}", rendered);
    Ok(())
}

fn run_resolve(args: &ResolveArgs, format: OutputFormat) -> Result<()> {
    let locations: Vec<Location> = read_json(&args.input)?;
    let mappings = read_mappings(args.mappings.as_deref())?;
    info!("Resolving {} locations", locations.len());

    let results: Vec<StationKeyResult> = if mappings.is_empty() {
        station_key::resolve_all(&locations)
    } else {
        locations
            .iter()
            .map(|location| station_key::resolve_with_correlation(location, &mappings))
            .collect()
    };

    match format {
        OutputFormat::Json => print_json(&results),
        OutputFormat::Text => {
            for (location, result) in locations.iter().zip(&results) {
                println!(
                    "{:<12} {:<28} {} ({}, {})",
                    location.legacy_location_id,
                    location.location,
                    result.station_key.bright_green().bold(),
                    result.confidence,
                    result.method
                );
            }
            Ok(())
        }
    }
}

fn run_correlate(args: &CorrelateArgs, config: &EngineConfig, format: OutputFormat) -> Result<()> {
    let existing: Vec<ExistingLocation> = read_json(&args.existing)?;
    let readings: Vec<Reading> = read_json(&args.readings)?;
    for reading in &readings {
        reading.validate()?;
    }
    let mappings = read_mappings(args.mappings.as_deref())?;

    let mut options = config.matching.clone();
    if let Some(threshold) = args.exact_threshold {
        options = options.with_exact_threshold(threshold);
    }
    if let Some(threshold) = args.fuzzy_threshold {
        options = options.with_fuzzy_threshold(threshold);
    }
    if args.no_cml_only {
        options = options.without_cml_only_match();
    }

    let correlator = LocationCorrelator::new(options)?;
    let calculator = CorrosionCalculator::new(config.corrosion.clone())?;
    let batch = correlator.process_batch(&calculator, &existing, &readings, &mappings);

    match format {
        OutputFormat::Json => print_json(&batch),
        OutputFormat::Text => {
            print_batch(&batch);
            Ok(())
        }
    }
}

fn print_batch(batch: &BatchResult) {
    let result = &batch.match_result;
    println!("{}", result.summary.summary().bright_green().bold());

    for matched in &result.matched {
        let renumbered = if matched.identifier_changed {
            format!(
                " [renumbered {} -> {}]",
                matched.previous_identifier.as_deref().unwrap_or("?"),
                matched.current_identifier.as_deref().unwrap_or("?")
            )
        } else {
            String::new()
        };
        println!(
            "  #{:<4} -> {:<12} {:<20} {:.2}  {}{}",
            matched.new_index,
            matched.existing_id,
            matched.match_type,
            matched.confidence,
            matched.reason,
            renumbered.yellow()
        );
    }

    for conflict in &result.conflicts {
        let candidates: Vec<String> = conflict
            .candidates
            .iter()
            .map(|candidate| format!("{} ({:.2})", candidate.existing_id, candidate.score))
            .collect();
        println!(
            "  {} #{} {}: {}",
            "CONFLICT".yellow().bold(),
            conflict.new_index,
            conflict.legacy_location_id,
            candidates.join(", ")
        );
    }

    for unmatched in &result.unmatched {
        println!(
            "  {} #{} {}: {}",
            "UNMATCHED".red(),
            unmatched.new_index,
            unmatched.legacy_location_id,
            unmatched.reason
        );
    }

    if !batch.corrosion_rates.is_empty() {
        println!("{}", "Corrosion rates".bright_green().bold());
        for rate in &batch.corrosion_rates {
            let value = rate.rate.rate.unwrap_or_default();
            let line = format!(
                "  {:<12} {:.3} {} over {:.2} yr",
                rate.existing_id, value, rate.rate.unit, rate.rate.time_span_years
            );
            match &rate.rate.warning {
                Some(warning) => println!("{}  {}", line, warning.yellow()),
                None => println!("{}", line),
            }
        }
    }
}

fn design_input(args: &DesignArgs) -> DesignInput {
    DesignInput::new(args.pressure, args.radius, args.stress, args.efficiency)
        .with_corrosion_allowance(args.corrosion_allowance)
}

fn mawp_input(args: &DesignArgs, thickness: f64) -> MawpInput {
    MawpInput::new(thickness, args.radius, args.stress, args.efficiency)
        .with_corrosion_allowance(args.corrosion_allowance)
}

fn run_shell(args: &ShellArgs, config: &EngineConfig, format: OutputFormat) -> Result<()> {
    let engine = AsmeEngine::new(config.asme.clone())?;
    let design = &args.design;

    let required = engine.shell_required_thickness(&design_input(design));
    let mawp = design
        .thickness
        .map(|t| engine.shell_mawp(&mawp_input(design, t)));

    print_design_report(build_report(required, mawp, design), design, format)
}

fn run_head(args: &HeadArgs, config: &EngineConfig, format: OutputFormat) -> Result<()> {
    let engine = AsmeEngine::new(config.asme.clone())?;
    let design = &args.design;
    let head: HeadType = args.head_type;

    let required = engine.head_required_thickness(head, &design_input(design), args.crown_radius);
    let mawp = design
        .thickness
        .map(|t| engine.head_mawp(head, &mawp_input(design, t), args.crown_radius));

    print_design_report(build_report(required, mawp, design), design, format)
}

fn build_report(
    required: CalculationResult,
    mawp: Option<CalculationResult>,
    design: &DesignArgs,
) -> DesignReport {
    let margin = design
        .thickness
        .and_then(|t| thickness_margin(t, &required));
    DesignReport {
        required_thickness: required,
        mawp,
        thickness_margin: margin,
    }
}

fn print_design_report(report: DesignReport, design: &DesignArgs, format: OutputFormat) -> Result<()> {
    if format == OutputFormat::Json {
        return print_json(&report);
    }

    print_calculation(&report.required_thickness, "in");
    if let Some(mawp) = &report.mawp {
        print_calculation(mawp, "psig");

        let governing = governing_mawp(
            &[ComponentMawp::new("component", mawp.clone())],
            Some(design.pressure),
        );
        for warning in &governing.warnings {
            println!("  {}", warning.yellow());
        }
    }
    if let Some(margin) = report.thickness_margin {
        let line = format!("Thickness margin: {:+.4} in", margin);
        if margin < 0.0 {
            println!("{}", line.red().bold());
        } else {
            println!("{}", line);
        }
    }
    Ok(())
}

fn print_calculation(result: &CalculationResult, unit: &str) {
    let title = format!("{} ({})", result.calculation_type, result.code_reference);
    match result.value() {
        Some(value) => println!("{}: {:.4} {}", title.bright_green().bold(), value, unit),
        None => println!(
            "{}: {}",
            title.red().bold(),
            result.error_message.as_deref().unwrap_or("failed")
        ),
    }
    for intermediate in &result.intermediate_values {
        println!("  {:<16} {}", intermediate.name, intermediate.value);
    }
    for warning in &result.warnings {
        println!("  {}", warning.yellow());
    }
}

fn run_ffs(args: &FfsArgs, config: &EngineConfig, format: OutputFormat) -> Result<()> {
    let engine = AsmeEngine::new(config.asme.clone())?;
    let screener = FfsScreener::new(config.ffs.clone(), engine)?;

    let result = if args.local {
        let input: LocalThinAreaInput = read_json(&args.input)?;
        screener.assess_local_thin_area(&input)
    } else {
        let input: FfsInput = read_json(&args.input)?;
        screener.assess_general_metal_loss(&input)
    };

    match format {
        OutputFormat::Json => print_json(&result),
        OutputFormat::Text => {
            print_ffs(&result);
            Ok(())
        }
    }
}

fn print_ffs(result: &FfsResult) {
    let verdict = if result.requires_higher_level {
        "LEVEL 2/3 REQUIRED".yellow().bold()
    } else if result.acceptable {
        "ACCEPTABLE".bright_green().bold()
    } else {
        "NOT ACCEPTABLE".red().bold()
    };
    println!("Level 1 screening: {}", verdict);

    match result.remaining_life_years {
        Some(years) => println!("  Remaining life:   {:.1} years", years),
        None => println!("  Remaining life:   not limited by corrosion"),
    }
    println!("  Next inspection:  {:.1} years", result.next_inspection_years);
    println!("  Recalculated MAWP: {:.1} psig", result.recalculated_mawp);

    for recommendation in &result.recommendations {
        println!("  - {}", recommendation);
    }
    for warning in &result.warnings {
        println!("  {}", warning.yellow());
    }
}
