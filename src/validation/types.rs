// SPDX-License-Identifier: Apache-2.0
// Copyright (c) 2025 Polyframe Inc.

//! SVG validation result types

use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::path::PathBuf;
use std::time::Duration;

// Custom serialization for Duration
fn serialize_duration<S>(duration: &Duration, serializer: S) -> Result<S::Ok, S::Error>
where
    S: Serializer,
{
    serializer.serialize_f64(duration.as_secs_f64())
}

fn deserialize_duration<'de, D>(deserializer: D) -> Result<Duration, D::Error>
where
    D: Deserializer<'de>,
{
    let secs = f64::deserialize(deserializer)?;
    Ok(Duration::from_secs_f64(secs))
}

/// Outcome of checking one SVG document against a machine profile.
///
/// Only `errors` make a document invalid; warnings are advisory.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SvgValidationReport {
    pub valid: bool,
    pub warnings: Vec<String>,
    pub errors: Vec<String>,
}

impl SvgValidationReport {
    pub(crate) fn from_findings(warnings: Vec<String>, errors: Vec<String>) -> Self {
        Self {
            valid: errors.is_empty(),
            warnings,
            errors,
        }
    }
}

/// File-level status in a batch run
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum FileStatus {
    Passed,
    Warned,
    Failed,
    /// The file could not be read
    Error,
}

impl FileStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            FileStatus::Passed => "passed",
            FileStatus::Warned => "warned",
            FileStatus::Failed => "failed",
            FileStatus::Error => "error",
        }
    }
}

/// Validation of one file on disk
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FileValidation {
    pub path: PathBuf,
    pub status: FileStatus,
    #[serde(serialize_with = "serialize_duration", deserialize_with = "deserialize_duration")]
    pub duration: Duration,
    pub report: Option<SvgValidationReport>,
    pub error: Option<String>,
}

impl FileValidation {
    pub fn checked(path: PathBuf, report: SvgValidationReport, duration: Duration) -> Self {
        let status = if !report.valid {
            FileStatus::Failed
        } else if !report.warnings.is_empty() {
            FileStatus::Warned
        } else {
            FileStatus::Passed
        };
        Self {
            path,
            status,
            duration,
            report: Some(report),
            error: None,
        }
    }

    pub fn unreadable(path: PathBuf, error: String, duration: Duration) -> Self {
        Self {
            path,
            status: FileStatus::Error,
            duration,
            report: None,
            error: Some(error),
        }
    }
}

/// Complete batch validation report
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ValidationSummary {
    pub timestamp: String,
    pub machine: String,
    pub total_files: usize,
    pub passed: usize,
    pub warned: usize,
    pub failed: usize,
    pub errors: usize,
    #[serde(serialize_with = "serialize_duration", deserialize_with = "deserialize_duration")]
    pub total_duration: Duration,
    pub files: Vec<FileValidation>,
}

impl ValidationSummary {
    pub fn new(machine: impl Into<String>) -> Self {
        Self {
            timestamp: chrono::Utc::now().format("%Y-%m-%d %H:%M:%S UTC").to_string(),
            machine: machine.into(),
            total_files: 0,
            passed: 0,
            warned: 0,
            failed: 0,
            errors: 0,
            total_duration: Duration::ZERO,
            files: Vec::new(),
        }
    }

    pub fn add_file(&mut self, file: FileValidation) {
        self.total_files += 1;
        match file.status {
            FileStatus::Passed => self.passed += 1,
            FileStatus::Warned => self.warned += 1,
            FileStatus::Failed => self.failed += 1,
            FileStatus::Error => self.errors += 1,
        }
        self.total_duration += file.duration;
        self.files.push(file);
    }

    /// Share of files without errors, warnings allowed
    pub fn pass_rate(&self) -> f32 {
        if self.total_files == 0 {
            0.0
        } else {
            ((self.passed + self.warned) as f32 / self.total_files as f32) * 100.0
        }
    }

    pub fn has_failures(&self) -> bool {
        self.failed > 0 || self.errors > 0
    }
}
