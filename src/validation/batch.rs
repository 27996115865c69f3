// SPDX-License-Identifier: Apache-2.0
// Copyright (c) 2025 Polyframe Inc.

//! Parallel validation of SVG files and directories

use anyhow::{Context, Result};
use rayon::prelude::*;
use std::path::{Path, PathBuf};
use std::time::Instant;
use walkdir::WalkDir;

use super::config::{MachineProfile, ValidationConfig};
use super::rules::validate_svg_with;
use super::types::{FileValidation, ValidationSummary};

/// Expand the given paths into the files to check.
///
/// Files are taken as given; directories are walked recursively and filtered
/// by extension. The result is sorted and free of duplicates.
pub fn discover_files(paths: &[PathBuf], config: &ValidationConfig) -> Vec<PathBuf> {
    let mut files = Vec::new();

    for path in paths {
        if path.is_dir() {
            files.extend(
                WalkDir::new(path)
                    .into_iter()
                    .filter_map(|e| e.ok())
                    .filter(|e| e.file_type().is_file())
                    .filter(|e| config.matches_extension(e.path()))
                    .map(|e| e.into_path()),
            );
        } else {
            files.push(path.clone());
        }
    }

    files.sort();
    files.dedup();
    files
}

/// Read and validate a single file
pub fn validate_file(path: &Path, machine: &MachineProfile) -> FileValidation {
    let start = Instant::now();
    match std::fs::read_to_string(path) {
        Ok(svg) => {
            let report = validate_svg_with(&svg, machine);
            FileValidation::checked(path.to_path_buf(), report, start.elapsed())
        }
        Err(err) => {
            tracing::warn!(path = %path.display(), "cannot read svg: {}", err);
            FileValidation::unreadable(path.to_path_buf(), err.to_string(), start.elapsed())
        }
    }
}

/// Validate every file under `paths`, in parallel
pub fn validate_paths(paths: &[PathBuf], config: &ValidationConfig) -> Result<ValidationSummary> {
    let files = discover_files(paths, config);
    tracing::info!(files = files.len(), "validating svg files");

    let run = || -> Vec<FileValidation> {
        files
            .par_iter()
            .map(|path| validate_file(path, &config.machine))
            .collect()
    };

    let results = match config.parallelism {
        Some(threads) => rayon::ThreadPoolBuilder::new()
            .num_threads(threads)
            .build()
            .context("Failed to build validation thread pool")?
            .install(run),
        None => run(),
    };

    let mut summary = ValidationSummary::new(config.machine.name.clone());
    for result in results {
        summary.add_file(result);
    }
    Ok(summary)
}
