// SPDX-License-Identifier: Apache-2.0
// Copyright (c) 2025 Polyframe Inc.

//! SVG output validation against CNC machine constraints

pub mod batch;
pub mod config;
pub mod reporter;
pub mod rules;
pub mod types;

pub use batch::{discover_files, validate_file, validate_paths};
pub use config::{MachineProfile, ValidationConfig};
pub use reporter::ValidationReporter;
pub use rules::{validate_svg, validate_svg_with};
pub use types::{FileStatus, FileValidation, SvgValidationReport, ValidationSummary};
