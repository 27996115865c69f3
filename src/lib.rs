// SPDX-License-Identifier: Apache-2.0
// Copyright (c) 2025 Polyframe Inc.

//! stepslice
//!
//! Turns STEP parts into 2D cutting-plane profiles and writes them as SVG
//! that CNC routers accept. The pipeline is:
//!
//! 1. [`io::step`] scans the STEP text for entities and point coordinates.
//! 2. [`geometry::build_solid`] stands a box (or point hull) in for the part.
//! 3. [`profile::extract_profile`] intersects that solid with a plane and
//!    chains the hits into curves with area and length.
//! 4. [`io::svg::serialize`] classifies curves and emits the document.
//! 5. [`validation::validate_svg`] checks the result against a machine profile.
//!
//! [`Kernel`] wraps the whole flow as an explicit session.

pub mod cli;
pub mod config;
pub mod error;
pub mod geometry;
pub mod io;
pub mod kernel;
pub mod profile;
pub mod utils;
pub mod validation;

#[cfg(feature = "wasm")]
pub mod ffi;

pub use config::Settings;
pub use error::{Error, Result};
pub use geometry::{BoundingBox, BoundingBox2D, Mesh};
pub use io::{parse_step_file, serialize, StepFile, SvgExportConfig};
pub use kernel::Kernel;
pub use profile::{extract_profile, CuttingPlaneConfig, Curve2D, ExtractedProfile};
pub use validation::{validate_svg, SvgValidationReport};

/// Slice STEP text at one plane and return the SVG document
pub fn slice_to_svg(
    filename: &str,
    content: &str,
    plane: &CuttingPlaneConfig,
    export: &SvgExportConfig,
) -> Result<String> {
    let mut kernel = Kernel::init();
    kernel.load_step(filename, content)?;
    kernel.extract(plane)?;
    kernel.export_svg(export, None)
}
