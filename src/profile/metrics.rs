// SPDX-License-Identifier: Apache-2.0
// Copyright (c) 2025 Polyframe Inc.

//! Profile bounds, area and perimeter

use super::Curve2D;
use crate::geometry::BoundingBox2D;
use serde::{Deserialize, Serialize};

/// Aggregate measurements of a set of curves
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct ProfileMetrics {
    /// Sum of enclosed areas of closed curves
    pub area: f64,
    /// Sum of all curve lengths, closing edges included
    pub length: f64,
}

/// Bounds over every point of every curve; all-zero when there are none
pub fn bounding_box_of_curves(curves: &[Curve2D]) -> BoundingBox2D {
    BoundingBox2D::from_points(curves.iter().flat_map(|c| c.points.iter()))
}

pub fn metrics_of(curves: &[Curve2D]) -> ProfileMetrics {
    curves.iter().fold(ProfileMetrics::default(), |acc, curve| ProfileMetrics {
        area: acc.area + curve.area(),
        length: acc.length + curve.length(),
    })
}
