// SPDX-License-Identifier: Apache-2.0
// Copyright (c) 2025 Polyframe Inc.

//! Target machine constraints and batch options

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// Limits of the CNC machine the SVG is cut on
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct MachineProfile {
    pub name: String,
    /// Smallest recommended stroke width (mm)
    pub min_stroke_width: f64,
    /// Largest recommended stroke width (mm)
    pub max_stroke_width: f64,
}

impl Default for MachineProfile {
    fn default() -> Self {
        Self {
            name: "Shaper Origin".to_string(),
            min_stroke_width: 0.1,
            max_stroke_width: 2.0,
        }
    }
}

impl MachineProfile {
    pub fn stroke_in_range(&self, width: f64) -> bool {
        !(width < self.min_stroke_width || width > self.max_stroke_width)
    }
}

/// Options for validating many files at once
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ValidationConfig {
    pub machine: MachineProfile,
    /// Maximum parallel workers
    pub parallelism: Option<usize>,
    /// Output directory for reports
    pub output_dir: Option<PathBuf>,
    /// File extensions picked up when walking directories
    pub extensions: Vec<String>,
    pub verbose: bool,
}

impl Default for ValidationConfig {
    fn default() -> Self {
        Self {
            machine: MachineProfile::default(),
            parallelism: None, // Auto-detect
            output_dir: None,
            extensions: vec!["svg".to_string()],
            verbose: false,
        }
    }
}

impl ValidationConfig {
    /// Check if a walked file should be validated
    pub fn matches_extension(&self, path: &Path) -> bool {
        path.extension()
            .and_then(|ext| ext.to_str())
            .is_some_and(|ext| {
                self.extensions
                    .iter()
                    .any(|wanted| wanted.eq_ignore_ascii_case(ext))
            })
    }
}
