// SPDX-License-Identifier: Apache-2.0
// Copyright (c) 2025 Polyframe Inc.

//! Profile extraction - slicing a mesh with a plane into 2D curves

mod chain;
mod intersect;
mod metrics;
mod plane;

pub use chain::{connect_points, simplify_curves};
pub use intersect::find_intersection_points;
pub use metrics::{bounding_box_of_curves, metrics_of, ProfileMetrics};
pub use plane::{CuttingPlane, CuttingPlaneConfig, PlanePreset};

use crate::geometry::{BoundingBox2D, Mesh};
use crate::utils::{polyline_length, shoelace_area};
use nalgebra::Point2;
use serde::{Deserialize, Serialize};
use std::sync::atomic::{AtomicU64, Ordering};

/// Geometric tag carried by a curve. Reconstructed curves are always
/// [`CurveKind::Line`]; the others are informational.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CurveKind {
    #[default]
    Line,
    Circle,
    Spline,
}

/// Planar polyline.
///
/// A closed curve does not repeat its first point; the closing edge is
/// implicit.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Curve2D {
    #[serde(rename = "type", default)]
    pub kind: CurveKind,
    #[serde(with = "crate::utils::coords::point2_vec")]
    pub points: Vec<Point2<f64>>,
    pub closed: bool,
}

impl Curve2D {
    pub fn open(points: Vec<Point2<f64>>) -> Self {
        Self {
            kind: CurveKind::Line,
            points,
            closed: false,
        }
    }

    pub fn closed(points: Vec<Point2<f64>>) -> Self {
        Self {
            kind: CurveKind::Line,
            points,
            closed: true,
        }
    }

    /// Enclosed area. Open curves and closed curves with fewer than three
    /// points enclose nothing.
    pub fn area(&self) -> f64 {
        if self.closed && self.points.len() > 2 {
            shoelace_area(&self.points)
        } else {
            0.0
        }
    }

    /// Length along the points, closing edge included for closed curves
    pub fn length(&self) -> f64 {
        polyline_length(&self.points, self.closed)
    }
}

/// Result of one slicing operation
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ExtractedProfile {
    pub id: String,
    pub curves: Vec<Curve2D>,
    pub bounding_box: BoundingBox2D,
    pub area: f64,
    pub length: f64,
}

static PROFILE_SEQUENCE: AtomicU64 = AtomicU64::new(0);

/// Millisecond timestamp plus a process-wide counter, unique within a run
fn next_profile_id() -> String {
    let seq = PROFILE_SEQUENCE.fetch_add(1, Ordering::Relaxed);
    format!("{}-{}", chrono::Utc::now().timestamp_millis(), seq)
}

/// Slice `mesh` with the plane described by `config`.
///
/// Never fails: a plane that misses the mesh yields a profile with no
/// curves, a zero bounding box and zero metrics.
pub fn extract_profile(mesh: &Mesh, config: &CuttingPlaneConfig) -> ExtractedProfile {
    extract_profile_with_id(mesh, config, next_profile_id())
}

/// [`extract_profile`] with a caller-chosen identifier
pub fn extract_profile_with_id(
    mesh: &Mesh,
    config: &CuttingPlaneConfig,
    id: impl Into<String>,
) -> ExtractedProfile {
    let plane = CuttingPlane::from_config(config);
    let points = find_intersection_points(mesh, &plane, config.tolerance);

    let mut curves = connect_points(&points, config.link_tolerance());
    if config.simplify {
        curves = simplify_curves(curves, config.tolerance);
    }

    let bounding_box = bounding_box_of_curves(&curves);
    let ProfileMetrics { area, length } = metrics_of(&curves);

    tracing::debug!(
        plane = config.plane_type.as_str(),
        position = config.position,
        points = points.len(),
        curves = curves.len(),
        area,
        length,
        "extracted profile"
    );

    ExtractedProfile {
        id: id.into(),
        curves,
        bounding_box,
        area,
        length,
    }
}
