// SPDX-License-Identifier: Apache-2.0
// Copyright (c) 2025 Polyframe Inc.

//! CLI output reporter with colored formatting

use crate::io::{EntityValidation, StepFile};
use crate::profile::ExtractedProfile;
use crate::validation::SvgValidationReport;
use colored::*;
use std::time::Duration;

/// CLI reporter for formatted output
pub struct Reporter;

impl Reporter {
    /// Report what was found in a STEP file
    pub fn report_inspection(step: &StepFile, entities: &EntityValidation, duration: Duration) {
        let bbox = &step.bounding_box;
        let (min, max, dims) = (bbox.min(), bbox.max(), bbox.dimensions());

        println!("\n{}", "━".repeat(80).bright_black());
        println!("{} {}", "File:".bold(), step.filename.cyan());
        println!("{}", "━".repeat(80).bright_black());
        println!(
            "  {} {}",
            "Size:".bright_black(),
            format!("{} bytes", step.size).cyan()
        );
        println!(
            "  {} {}",
            "Entities:".bright_black(),
            step.entities.len().to_string().cyan()
        );
        println!(
            "  {} {}",
            "Points:".bright_black(),
            step.points.len().to_string().cyan()
        );
        println!(
            "  {} ({:.3}, {:.3}, {:.3}) → ({:.3}, {:.3}, {:.3})",
            "Bounds:".bright_black(),
            min.x,
            min.y,
            min.z,
            max.x,
            max.y,
            max.z
        );
        println!(
            "  {} {:.3} × {:.3} × {:.3}",
            "Dimensions:".bright_black(),
            dims.x,
            dims.y,
            dims.z
        );

        if entities.valid {
            println!("\n{} {}", "✅".green(), "All entity types supported".green());
        } else {
            println!(
                "\n{} {} {}",
                "⚠️".yellow(),
                "Unsupported entity types:".yellow().bold(),
                entities.unsupported_entities.join(", ").yellow()
            );
        }

        println!(
            "\n  {} {}",
            "Time:".bright_black(),
            Self::format_duration(duration).yellow()
        );
        println!("{}", "━".repeat(80).bright_black());
    }

    /// Report one extracted profile
    pub fn report_profile(index: usize, position: f64, profile: &ExtractedProfile) {
        let status = if profile.curves.is_empty() {
            "∅".yellow()
        } else {
            "✓".green()
        };

        println!(
            "  {} {} {} {} {} {} {} {:.3} {} {:.3}",
            status,
            format!("profile-{}", index + 1).bold(),
            "@".bright_black(),
            format!("{:.3}", position).cyan(),
            "curves:".bright_black(),
            profile.curves.len().to_string().cyan(),
            "area:".bright_black(),
            profile.area,
            "length:".bright_black(),
            profile.length
        );

        let closed = profile.curves.iter().filter(|c| c.closed).count();
        if closed != profile.curves.len() {
            println!(
                "      {}",
                format!(
                    "{} closed, {} open",
                    closed,
                    profile.curves.len() - closed
                )
                .bright_black()
            );
        }
    }

    /// Report the machine check of a written SVG
    pub fn report_validation(file: &str, report: &SvgValidationReport) {
        println!("\n{} {}", "Validation:".bold(), file.cyan());
        if report.valid {
            println!("  {} {}", "✅".green(), "Compatible".green().bold());
        } else {
            println!("  {} {}", "❌".red(), "Not compatible".red().bold());
        }
        for err in &report.errors {
            println!("  {} {}", "✗".red(), err.red());
        }
        for warning in &report.warnings {
            println!("  {} {}", "!".yellow(), warning.yellow());
        }
    }

    /// Report error
    pub fn report_error(message: &str) {
        eprintln!("\n{} {}", "❌ Error:".red().bold(), message);
    }

    /// Report warning
    pub fn report_warning(message: &str) {
        println!("\n{} {}", "⚠️  Warning:".yellow().bold(), message);
    }

    /// Report info
    pub fn report_info(message: &str) {
        println!("{} {}", "ℹ️".bright_blue(), message);
    }

    /// Format duration for display
    pub fn format_duration(duration: Duration) -> String {
        let micros = duration.as_micros();

        if micros < 1_000 {
            format!("{}µs", micros)
        } else if micros < 1_000_000 {
            format!("{:.2}ms", micros as f64 / 1_000.0)
        } else {
            format!("{:.2}s", micros as f64 / 1_000_000.0)
        }
    }

    /// Print progress line
    pub fn progress(message: &str) {
        println!("{} {}...", "⏳".bright_blue(), message.bright_black());
    }

    /// Print success message
    pub fn success(message: &str) {
        println!("{} {}", "✅".green(), message.green());
    }
}
