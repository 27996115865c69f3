// SPDX-License-Identifier: Apache-2.0
// Copyright (c) 2025 Polyframe Inc.

//! End-to-end slicing runs for the command line

use crate::config::Settings;
use crate::io::{self, output_filename};
use crate::kernel::Kernel;
use crate::profile::{CuttingPlaneConfig, ExtractedProfile};
use crate::validation::{validate_svg_with, SvgValidationReport};
use anyhow::{Context, Result};
use std::path::{Path, PathBuf};
use std::time::{Duration, Instant};

/// One invocation of `stepslice slice`
#[derive(Debug, Clone)]
pub struct SliceJob {
    pub input: PathBuf,
    /// Plane offsets; one profile per entry. Empty means the configured one.
    pub positions: Vec<f64>,
    /// SVG destination; defaults to `<stem>_profile.svg` next to the input
    pub output: Option<PathBuf>,
    pub mesh_output: Option<PathBuf>,
    pub strict: bool,
}

/// What a slicing run produced
pub struct SliceOutcome {
    pub positions: Vec<f64>,
    pub profiles: Vec<ExtractedProfile>,
    pub svg_path: PathBuf,
    pub validation: SvgValidationReport,
    pub duration: Duration,
}

/// Runs the load → slice → export → validate pipeline with fixed settings
pub struct SliceRunner {
    settings: Settings,
}

impl SliceRunner {
    pub fn new(settings: Settings) -> Self {
        Self { settings }
    }

    pub fn settings(&self) -> &Settings {
        &self.settings
    }

    /// Where the SVG for `input` goes when no output is given
    pub fn default_output(input: &Path) -> PathBuf {
        let name = input
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_default();
        input.with_file_name(output_filename(&name))
    }

    fn plane_at(&self, position: f64) -> CuttingPlaneConfig {
        CuttingPlaneConfig {
            position,
            ..self.settings.plane.clone()
        }
    }

    pub fn run(&self, job: &SliceJob) -> Result<SliceOutcome> {
        let start = Instant::now();
        let mut kernel = Kernel::init();

        let content = std::fs::read_to_string(&job.input)
            .with_context(|| format!("Failed to read STEP file: {}", job.input.display()))?;
        let filename = job
            .input
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_else(|| job.input.display().to_string());

        if job.strict {
            kernel.load_step_strict(&filename, &content)?;
        } else {
            kernel.load_step(&filename, &content)?;
        }

        if let (Some(path), Some(mesh)) = (&job.mesh_output, kernel.mesh()) {
            io::export_stl(mesh, path)
                .with_context(|| format!("Failed to export mesh: {}", path.display()))?;
        }

        let positions = if job.positions.is_empty() {
            vec![self.settings.plane.position]
        } else {
            job.positions.clone()
        };
        for &position in &positions {
            kernel.extract(&self.plane_at(position))?;
        }

        let svg = kernel
            .export_svg(&self.settings.export, Some(&filename))
            .context("Failed to export SVG")?;
        let svg_path = job
            .output
            .clone()
            .unwrap_or_else(|| Self::default_output(&job.input));
        std::fs::write(&svg_path, &svg)
            .with_context(|| format!("Failed to write SVG: {}", svg_path.display()))?;

        let validation = validate_svg_with(&svg, &self.settings.machine);

        Ok(SliceOutcome {
            positions,
            profiles: kernel.profiles().to_vec(),
            svg_path,
            validation,
            duration: start.elapsed(),
        })
    }
}
