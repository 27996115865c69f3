// SPDX-License-Identifier: Apache-2.0
// Copyright (c) 2025 Polyframe Inc.

//! Layered configuration: defaults, `stepslice.toml`, environment

use crate::io::{SvgExportConfig, Units};
use crate::profile::CuttingPlaneConfig;
use crate::validation::MachineProfile;
use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// Configuration file looked up in the working directory
pub const CONFIG_FILE: &str = "stepslice.toml";

/// Everything a slicing run needs besides the input file
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    pub plane: CuttingPlaneConfig,
    pub export: SvgExportConfig,
    pub machine: MachineProfile,
}

impl Settings {
    /// Load configuration from file
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self> {
        let content = std::fs::read_to_string(path.as_ref())
            .with_context(|| format!("Failed to read config file: {:?}", path.as_ref()))?;
        let settings: Settings = toml::from_str(&content)
            .with_context(|| format!("Failed to parse config file: {:?}", path.as_ref()))?;
        Ok(settings)
    }

    /// Load `stepslice.toml` if present, then apply environment overrides
    pub fn load() -> Result<Self> {
        let mut settings = if PathBuf::from(CONFIG_FILE).exists() {
            Self::from_file(CONFIG_FILE)?
        } else {
            Self::default()
        };
        settings.apply_env(|key| std::env::var(key).ok())?;
        Ok(settings)
    }

    /// Apply `STEPSLICE_*` overrides read through `lookup`
    pub fn apply_env(&mut self, lookup: impl Fn(&str) -> Option<String>) -> Result<()> {
        if let Some(units) = lookup("STEPSLICE_UNITS") {
            self.export.units = Units::from_str(&units)
                .with_context(|| format!("Invalid STEPSLICE_UNITS: {}", units))?;
        }

        if let Some(scale) = lookup("STEPSLICE_SCALE") {
            self.export.scale = scale
                .parse()
                .with_context(|| format!("Invalid STEPSLICE_SCALE: {}", scale))?;
        }

        if let Some(precision) = lookup("STEPSLICE_PRECISION") {
            self.export.precision = precision
                .parse()
                .with_context(|| format!("Invalid STEPSLICE_PRECISION: {}", precision))?;
        }

        if let Some(weight) = lookup("STEPSLICE_LINE_WEIGHT") {
            self.export.line_weight = weight
                .parse()
                .with_context(|| format!("Invalid STEPSLICE_LINE_WEIGHT: {}", weight))?;
        }

        if let Some(tolerance) = lookup("STEPSLICE_TOLERANCE") {
            self.plane.tolerance = tolerance
                .parse()
                .with_context(|| format!("Invalid STEPSLICE_TOLERANCE: {}", tolerance))?;
        }

        Ok(())
    }

    /// Save configuration to file
    pub fn save(&self, path: impl AsRef<Path>) -> Result<()> {
        let content = toml::to_string_pretty(self).context("Failed to serialize config")?;
        std::fs::write(path.as_ref(), content)
            .with_context(|| format!("Failed to write config file: {:?}", path.as_ref()))?;
        Ok(())
    }
}
