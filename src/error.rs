// SPDX-License-Identifier: Apache-2.0
// Copyright (c) 2025 Polyframe Inc.

//! Error kinds surfaced by the slicing pipeline

use thiserror::Error;

/// Result type for pipeline operations
pub type Result<T> = std::result::Result<T, Error>;

/// Errors that abort a pipeline stage.
///
/// Geometry stages never fail; only parsing, export and session misuse do.
#[derive(Error, Debug)]
pub enum Error {
    /// A required section keyword is missing from the STEP text
    #[error("Invalid STEP file format")]
    InvalidFormat,

    /// The serializer was handed zero profiles
    #[error("No profiles to export")]
    EmptyInput,

    /// Extraction requested before any model was loaded
    #[error("No STEP model loaded")]
    NoModelLoaded,

    /// Strict loading rejected entity types outside the supported set
    #[error("Unsupported STEP entities: {}", .0.join(", "))]
    UnsupportedEntities(Vec<String>),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("SVG writer error: {0}")]
    Xml(#[from] quick_xml::Error),
}
