// SPDX-License-Identifier: Apache-2.0
// Copyright (c) 2025 Polyframe Inc.

//! Batch validation report generator

use anyhow::{Context, Result};
use colored::Colorize;
use std::fs;
use std::path::Path;

use super::types::{FileStatus, FileValidation, ValidationSummary};

/// Writes batch summaries as JSON, Markdown or coloured terminal output
pub struct ValidationReporter;

impl ValidationReporter {
    /// Write JSON report
    pub fn write_json(summary: &ValidationSummary, path: impl AsRef<Path>) -> Result<()> {
        let json = serde_json::to_string_pretty(summary)?;
        fs::write(path.as_ref(), json)
            .with_context(|| format!("Failed to write report: {:?}", path.as_ref()))?;
        Ok(())
    }

    /// Markdown report as a string
    pub fn render_markdown(summary: &ValidationSummary) -> String {
        let mut md = String::new();

        md.push_str("# SVG Validation Report\n\n");
        md.push_str(&format!("**Generated:** {}\n\n", summary.timestamp));
        md.push_str(&format!("**Machine:** {}\n\n", summary.machine));
        md.push_str("---\n\n");

        md.push_str("## Summary\n\n");
        md.push_str(&format!("- **Files:** {}\n", summary.total_files));
        md.push_str(&format!(
            "- **Valid:** {} ({:.1}%)\n",
            summary.passed + summary.warned,
            summary.pass_rate()
        ));
        md.push_str(&format!("- **With warnings:** {}\n", summary.warned));
        md.push_str(&format!("- **Invalid:** {}\n", summary.failed));
        md.push_str(&format!("- **Unreadable:** {}\n", summary.errors));
        md.push_str(&format!(
            "- **Total Duration:** {:.2}s\n\n",
            summary.total_duration.as_secs_f64()
        ));
        md.push_str("---\n\n");

        md.push_str("## Files\n\n");
        md.push_str("| File | Status | Warnings | Errors |\n");
        md.push_str("|------|--------|----------|--------|\n");
        for file in &summary.files {
            let (warnings, errors) = file
                .report
                .as_ref()
                .map_or((0, 0), |r| (r.warnings.len(), r.errors.len()));
            md.push_str(&format!(
                "| `{}` | {} | {} | {} |\n",
                file.path.display(),
                file.status.as_str(),
                warnings,
                errors
            ));
        }
        md.push('\n');

        let flagged: Vec<_> = summary
            .files
            .iter()
            .filter(|f| f.status != FileStatus::Passed)
            .collect();
        if !flagged.is_empty() {
            md.push_str("## Findings\n\n");
            for file in flagged {
                md.push_str(&format!("### `{}`\n\n", file.path.display()));
                if let Some(ref err) = file.error {
                    md.push_str(&format!("- Read error: {}\n", err));
                }
                if let Some(ref report) = file.report {
                    for err in &report.errors {
                        md.push_str(&format!("- ❌ {}\n", err));
                    }
                    for warning in &report.warnings {
                        md.push_str(&format!("- ⚠️ {}\n", warning));
                    }
                }
                md.push('\n');
            }
        }

        md
    }

    /// Write Markdown report
    pub fn write_markdown(summary: &ValidationSummary, path: impl AsRef<Path>) -> Result<()> {
        fs::write(path.as_ref(), Self::render_markdown(summary))
            .with_context(|| format!("Failed to write report: {:?}", path.as_ref()))?;
        Ok(())
    }

    /// Print terminal summary
    pub fn print_summary(summary: &ValidationSummary) {
        Self::print_summary_with_verbose(summary, false)
    }

    /// Print terminal summary; verbose mode also lists warnings of clean files
    pub fn print_summary_with_verbose(summary: &ValidationSummary, verbose: bool) {
        println!("\n{}", "═".repeat(80).white());
        println!("{}", "SVG Validation Report".bold());
        println!("{}", "═".repeat(80).white());
        println!("  {} {}", "Timestamp:".white(), summary.timestamp.cyan());
        println!("  {} {}", "Machine:".white(), summary.machine.cyan());
        println!("  {} {}", "Files:".white(), summary.total_files.to_string().cyan());
        println!(
            "  {} {} ({:.1}%)",
            "Valid:".white(),
            (summary.passed + summary.warned).to_string().green(),
            summary.pass_rate()
        );
        println!(
            "  {} {}",
            "With warnings:".white(),
            summary.warned.to_string().yellow()
        );
        println!(
            "  {} {}",
            "Invalid:".white(),
            if summary.failed > 0 {
                summary.failed.to_string().red()
            } else {
                summary.failed.to_string().green()
            }
        );
        println!(
            "  {} {}",
            "Unreadable:".white(),
            if summary.errors > 0 {
                summary.errors.to_string().red()
            } else {
                summary.errors.to_string().green()
            }
        );
        println!(
            "  {} {:.2}s",
            "Duration:".white(),
            summary.total_duration.as_secs_f64()
        );

        println!("\n{}", "Files".bold());
        println!("{}", "─".repeat(80).white());

        for file in &summary.files {
            Self::print_file(file, verbose);
        }

        println!("{}", "═".repeat(80).white());
    }

    fn print_file(file: &FileValidation, verbose: bool) {
        let icon = match file.status {
            FileStatus::Passed => "✓".green(),
            FileStatus::Warned => "!".yellow(),
            FileStatus::Failed | FileStatus::Error => "✗".red(),
        };
        println!("  {} {}", icon, file.path.display().to_string().bold());

        if let Some(ref err) = file.error {
            println!("     {}: {}", "Error".red().bold(), err.white());
        }
        if let Some(ref report) = file.report {
            for err in &report.errors {
                println!("     {} {}", "❌".red(), err);
            }
            if verbose || file.status == FileStatus::Failed {
                for warning in &report.warnings {
                    println!("     {} {}", "⚠️".yellow(), warning);
                }
            } else if !report.warnings.is_empty() {
                println!(
                    "     {} {} warning(s)",
                    "⚠️".yellow(),
                    report.warnings.len()
                );
            }
        }
    }
}
