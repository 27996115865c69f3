// SPDX-License-Identifier: Apache-2.0
// Copyright (c) 2025 Polyframe Inc.

//! I/O module - STEP scanning, importing, and exporting

mod importer;
mod mesh_export;
pub mod step;
pub mod svg;

pub use importer::import_step_file;
pub use mesh_export::export_stl;
pub use step::{
    bounding_box_of, extract_points, is_entity_supported, parse_entities, parse_step_file,
    validate_entities, validate_step, CartesianPoint, Entity, EntityValidation, StepFile,
};
pub use svg::{
    classify, curve_to_path, output_filename, serialize, write_svg, ClassificationThresholds,
    ColorMapping, CurveType, SvgExportConfig, Units,
};
