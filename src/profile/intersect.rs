// SPDX-License-Identifier: Apache-2.0
// Copyright (c) 2025 Polyframe Inc.

//! Plane / triangle-mesh intersection

use super::plane::CuttingPlane;
use crate::geometry::Mesh;
use nalgebra::Point2;

/// Planar points where `plane` crosses the edges of `mesh`.
///
/// Every triangle edge is tested; hits are projected into the plane's 2D
/// frame and dropped when an already collected point lies within `tolerance`
/// on both axes. Output order follows first discovery.
pub fn find_intersection_points(
    mesh: &Mesh,
    plane: &CuttingPlane,
    tolerance: f64,
) -> Vec<Point2<f64>> {
    let mut points: Vec<Point2<f64>> = Vec::new();

    for [v1, v2, v3] in mesh.faces() {
        for (start, end) in [(v1, v2), (v2, v3), (v3, v1)] {
            let Some(hit) = plane.intersect_segment(&start, &end) else {
                continue;
            };

            let projected = plane.project(&hit);
            if !is_near_duplicate(&points, &projected, tolerance) {
                points.push(projected);
            }
        }
    }

    tracing::debug!(count = points.len(), "plane intersection points");
    points
}

/// Chebyshev-style proximity: both axis deltas under `tolerance`
fn is_near_duplicate(points: &[Point2<f64>], candidate: &Point2<f64>, tolerance: f64) -> bool {
    points.iter().any(|p| {
        (p.x - candidate.x).abs() < tolerance && (p.y - candidate.y).abs() < tolerance
    })
}
