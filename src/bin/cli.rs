// SPDX-License-Identifier: Apache-2.0
// Copyright (c) 2025 Polyframe Inc.

//! stepslice CLI

use anyhow::{anyhow, Context, Result};
use clap::{Parser, Subcommand};
use nalgebra::{Point3, Vector3};
use std::path::{Path, PathBuf};
use std::time::Instant;
use stepslice::cli::{Reporter, SliceJob, SliceRunner};
use stepslice::io::{self, Units};
use stepslice::profile::PlanePreset;
use stepslice::Settings;
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "stepslice")]
#[command(about = "Slice STEP parts with a cutting plane and export CNC-ready SVG", long_about = None)]
struct Cli {
    /// Verbose output
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Parse a STEP file and summarize its contents
    Inspect {
        /// Input STEP file
        input: PathBuf,

        /// Print the parsed file as JSON
        #[arg(long)]
        json: bool,
    },

    /// Extract cutting-plane profiles and write them as SVG
    Slice(SliceArgs),

    /// Show version information
    Version,
}

#[derive(clap::Args)]
struct SliceArgs {
    /// Input STEP file
    input: PathBuf,

    /// Output SVG file
    #[arg(short, long)]
    output: Option<PathBuf>,

    /// Plane preset (xy, xz, yz)
    #[arg(long)]
    plane: Option<String>,

    /// Custom plane normal as x,y,z
    #[arg(long, allow_hyphen_values = true)]
    normal: Option<String>,

    /// Plane origin as x,y,z
    #[arg(long, allow_hyphen_values = true)]
    origin: Option<String>,

    /// Offset along the normal; repeat for several profiles
    #[arg(short, long = "position", allow_hyphen_values = true)]
    positions: Vec<f64>,

    /// Weld and simplification tolerance
    #[arg(long)]
    tolerance: Option<f64>,

    /// Chaining distance, when it should differ from the tolerance
    #[arg(long)]
    chain_tolerance: Option<f64>,

    /// Keep collinear points
    #[arg(long)]
    no_simplify: bool,

    /// Output units (mm, inches)
    #[arg(long)]
    units: Option<String>,

    #[arg(long)]
    scale: Option<f64>,

    /// Decimal places in path data
    #[arg(long)]
    precision: Option<usize>,

    /// Stroke width in mm
    #[arg(long)]
    line_weight: Option<f64>,

    /// Omit the metadata block
    #[arg(long)]
    no_metadata: bool,

    /// Configuration file (defaults to ./stepslice.toml)
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Fail on unsupported STEP entity types
    #[arg(long)]
    strict: bool,

    /// Also write the approximate solid as STL
    #[arg(long)]
    mesh_out: Option<PathBuf>,
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    match &cli.command {
        Commands::Inspect { input, json } => {
            inspect_command(input, *json)?;
        }
        Commands::Slice(args) => {
            slice_command(args, cli.verbose)?;
        }
        Commands::Version => {
            println!("stepslice v{}", env!("CARGO_PKG_VERSION"));
        }
    }

    Ok(())
}

fn init_tracing(verbose: bool) {
    let filter = if verbose {
        EnvFilter::new("stepslice=debug")
    } else {
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("stepslice=info"))
    };

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

fn inspect_command(input: &Path, json: bool) -> Result<()> {
    if !input.exists() {
        Reporter::report_error(&format!("Input file not found: {}", input.display()));
        std::process::exit(1);
    }

    let start = Instant::now();
    let step = io::import_step_file(input)?;
    let duration = start.elapsed();

    if json {
        println!("{}", serde_json::to_string_pretty(&step)?);
    } else {
        Reporter::report_inspection(&step, &step.entity_validation(), duration);
    }

    Ok(())
}

fn slice_command(args: &SliceArgs, verbose: bool) -> Result<()> {
    if !args.input.exists() {
        Reporter::report_error(&format!("Input file not found: {}", args.input.display()));
        std::process::exit(1);
    }

    let mut settings = match &args.config {
        Some(path) => Settings::from_file(path)?,
        None => Settings::load()?,
    };
    apply_overrides(&mut settings, args)?;

    if verbose {
        Reporter::progress(&format!("Slicing {}", args.input.display()));
    }

    let job = SliceJob {
        input: args.input.clone(),
        positions: args.positions.clone(),
        output: args.output.clone(),
        mesh_output: args.mesh_out.clone(),
        strict: args.strict,
    };
    let outcome = SliceRunner::new(settings).run(&job)?;

    println!();
    for (index, (position, profile)) in outcome
        .positions
        .iter()
        .zip(&outcome.profiles)
        .enumerate()
    {
        Reporter::report_profile(index, *position, profile);
    }

    if outcome.profiles.iter().all(|p| p.curves.is_empty()) {
        Reporter::report_warning("No closed or open curves found at the requested positions");
    }

    Reporter::report_validation(&outcome.svg_path.display().to_string(), &outcome.validation);
    if let Some(mesh) = &args.mesh_out {
        Reporter::report_info(&format!("Mesh written to {}", mesh.display()));
    }
    Reporter::success(&format!(
        "Wrote {} in {}",
        outcome.svg_path.display(),
        Reporter::format_duration(outcome.duration)
    ));

    if !outcome.validation.valid {
        std::process::exit(1);
    }

    Ok(())
}

fn apply_overrides(settings: &mut Settings, args: &SliceArgs) -> Result<()> {
    let plane = &mut settings.plane;

    if let Some(name) = &args.plane {
        let preset = PlanePreset::from_str(name)
            .ok_or_else(|| anyhow!("Unknown plane: {}. Use xy, xz or yz", name))?;
        plane.plane_type = preset;
        if let Some(normal) = preset.normal() {
            plane.normal = normal;
        }
    }
    if let Some(normal) = &args.normal {
        plane.plane_type = PlanePreset::Custom;
        plane.normal = parse_triple(normal).map(|[x, y, z]| Vector3::new(x, y, z))?;
    }
    if let Some(origin) = &args.origin {
        plane.origin = parse_triple(origin).map(|[x, y, z]| Point3::new(x, y, z))?;
    }
    if let Some(tolerance) = args.tolerance {
        plane.tolerance = tolerance;
    }
    if args.chain_tolerance.is_some() {
        plane.chain_tolerance = args.chain_tolerance;
    }
    if args.no_simplify {
        plane.simplify = false;
    }

    let export = &mut settings.export;
    if let Some(units) = &args.units {
        export.units =
            Units::from_str(units).ok_or_else(|| anyhow!("Unknown units: {}. Use mm or inches", units))?;
    }
    if let Some(scale) = args.scale {
        export.scale = scale;
    }
    if let Some(precision) = args.precision {
        export.precision = precision;
    }
    if let Some(weight) = args.line_weight {
        export.line_weight = weight;
    }
    if args.no_metadata {
        export.include_metadata = false;
    }

    Ok(())
}

/// Parse `x,y,z`
fn parse_triple(text: &str) -> Result<[f64; 3]> {
    let values = text
        .split(',')
        .map(|part| part.trim().parse::<f64>())
        .collect::<std::result::Result<Vec<_>, _>>()
        .with_context(|| format!("Invalid vector: {}", text))?;

    match values.as_slice() {
        [x, y, z] => Ok([*x, *y, *z]),
        _ => Err(anyhow!("Expected three comma-separated values, got: {}", text)),
    }
}
