// SPDX-License-Identifier: Apache-2.0
// Copyright (c) 2025 Polyframe Inc.

//! Approximate solid construction from a bounding volume

use super::{BoundingBox, Mesh, Primitive};
use nalgebra::{Point3, Vector3};
use serde::{Deserialize, Serialize};

/// Smallest edge length of the approximating box on any axis
pub const MIN_THICKNESS: f64 = 0.1;

/// Face-boundary counts gathered from the entity stream
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SolidHints {
    pub outer_loops: usize,
    pub inner_loops: usize,
}

impl SolidHints {
    /// Inner face loops indicate pockets or holes
    pub fn has_pockets(&self) -> bool {
        self.inner_loops > 0
    }
}

/// Build the renderable stand-in for an imported part.
///
/// The result is a box sized to `bbox` (each axis floored at
/// [`MIN_THICKNESS`]) and centered on it. When `hints` report inner loops
/// and the point cloud spans a volume, the convex hull of `points` is used
/// instead; any hull failure falls back to the box.
pub fn build_solid(bbox: &BoundingBox, hints: &SolidHints, points: &[Point3<f64>]) -> Mesh {
    if hints.has_pockets() {
        let hull = Primitive::hull(points.to_vec()).to_mesh();
        if !hull.is_empty() {
            tracing::debug!(
                triangles = hull.triangle_count(),
                "using point hull for pocketed solid"
            );
            return hull;
        }
    }

    let dims = bbox.dimensions();
    let size = Vector3::new(
        dims.x.max(MIN_THICKNESS),
        dims.y.max(MIN_THICKNESS),
        dims.z.max(MIN_THICKNESS),
    );
    Primitive::cuboid(size, bbox.center()).to_mesh()
}
