// SPDX-License-Identifier: Apache-2.0
// Copyright (c) 2025 Polyframe Inc.

//! Batch SVG validation CLI for stepslice

use anyhow::{anyhow, Result};
use clap::Parser;
use colored::Colorize;
use stepslice::validation::{validate_paths, ValidationConfig, ValidationReporter};
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "stepslice-validate")]
#[command(about = "Check SVG files against a CNC machine profile", long_about = None)]
struct Cli {
    /// SVG files or directories to validate
    #[arg(required = true)]
    paths: Vec<PathBuf>,

    /// Report format (terminal, json, markdown)
    #[arg(short, long, default_value = "terminal")]
    format: String,

    /// Output directory for json/markdown reports
    #[arg(short, long, default_value = "validation")]
    output: PathBuf,

    /// Minimum acceptable stroke width in mm
    #[arg(long)]
    min_stroke: Option<f64>,

    /// Maximum acceptable stroke width in mm
    #[arg(long)]
    max_stroke: Option<f64>,

    /// Worker threads (defaults to all cores)
    #[arg(short, long)]
    jobs: Option<usize>,

    /// Verbose output
    #[arg(short, long)]
    verbose: bool,
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    let filter = if cli.verbose {
        EnvFilter::new("stepslice=debug")
    } else {
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("stepslice=warn"))
    };
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();

    let mut config = ValidationConfig {
        parallelism: cli.jobs,
        output_dir: Some(cli.output.clone()),
        verbose: cli.verbose,
        ..ValidationConfig::default()
    };
    if let Some(min) = cli.min_stroke {
        config.machine.min_stroke_width = min;
    }
    if let Some(max) = cli.max_stroke {
        config.machine.max_stroke_width = max;
    }

    if cli.verbose {
        println!("{}", "Starting SVG validation...".bold());
        println!("  Machine: {}", config.machine.name);
        println!(
            "  Stroke range: {}-{}mm",
            config.machine.min_stroke_width, config.machine.max_stroke_width
        );
    }

    let summary = validate_paths(&cli.paths, &config)?;

    match cli.format.to_lowercase().as_str() {
        "terminal" | "term" => {
            ValidationReporter::print_summary_with_verbose(&summary, cli.verbose);
        }
        "json" => {
            std::fs::create_dir_all(&cli.output)?;
            let json_path = cli.output.join("validation_report.json");
            ValidationReporter::write_json(&summary, &json_path)?;
            println!("{} Generated JSON report: {}", "Success:".green(), json_path.display());
        }
        "markdown" | "md" => {
            std::fs::create_dir_all(&cli.output)?;
            let md_path = cli.output.join("validation_report.md");
            ValidationReporter::write_markdown(&summary, &md_path)?;
            println!("{} Generated Markdown report: {}", "Success:".green(), md_path.display());
        }
        _ => {
            return Err(anyhow!(
                "Unknown format: {}. Use json, markdown, or terminal",
                cli.format
            ));
        }
    }

    if summary.has_failures() {
        std::process::exit(1);
    }

    Ok(())
}
