// SPDX-License-Identifier: Apache-2.0
// Copyright (c) 2025 Polyframe Inc.

//! Bounding box utilities

use crate::utils::coords;
use nalgebra::{Point2, Point3, Vector2, Vector3};
use serde::{Deserialize, Serialize};

#[derive(Deserialize)]
struct Bounds3 {
    #[serde(with = "coords::point3")]
    min: Point3<f64>,
    #[serde(with = "coords::point3")]
    max: Point3<f64>,
}

/// Axis-aligned bounding box.
///
/// Center and dimensions are derived from the corners on construction and
/// cannot be set independently.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(from = "Bounds3")]
pub struct BoundingBox {
    #[serde(with = "coords::point3")]
    min: Point3<f64>,
    #[serde(with = "coords::point3")]
    max: Point3<f64>,
    #[serde(with = "coords::point3")]
    center: Point3<f64>,
    #[serde(with = "coords::vector3")]
    dimensions: Vector3<f64>,
}

impl From<Bounds3> for BoundingBox {
    fn from(raw: Bounds3) -> Self {
        Self::new(raw.min, raw.max)
    }
}

impl BoundingBox {
    pub fn new(min: Point3<f64>, max: Point3<f64>) -> Self {
        Self {
            min,
            max,
            center: Point3::from((min.coords + max.coords) / 2.0),
            dimensions: max - min,
        }
    }

    /// The all-zero degenerate box
    pub fn zero() -> Self {
        Self::new(Point3::origin(), Point3::origin())
    }

    /// Componentwise extent of a point set; empty input yields [`BoundingBox::zero`]
    pub fn from_points<'a, I>(points: I) -> Self
    where
        I: IntoIterator<Item = &'a Point3<f64>>,
    {
        let mut points = points.into_iter();
        let Some(first) = points.next() else {
            return Self::zero();
        };

        let (mut min, mut max) = (*first, *first);
        for point in points {
            min.x = min.x.min(point.x);
            min.y = min.y.min(point.y);
            min.z = min.z.min(point.z);

            max.x = max.x.max(point.x);
            max.y = max.y.max(point.y);
            max.z = max.z.max(point.z);
        }
        Self::new(min, max)
    }

    pub fn min(&self) -> Point3<f64> {
        self.min
    }

    pub fn max(&self) -> Point3<f64> {
        self.max
    }

    pub fn center(&self) -> Point3<f64> {
        self.center
    }

    pub fn dimensions(&self) -> Vector3<f64> {
        self.dimensions
    }
}

impl Default for BoundingBox {
    fn default() -> Self {
        Self::zero()
    }
}

#[derive(Deserialize)]
struct Bounds2 {
    #[serde(with = "coords::point2")]
    min: Point2<f64>,
    #[serde(with = "coords::point2")]
    max: Point2<f64>,
}

/// Planar axis-aligned bounding box of a profile
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(from = "Bounds2")]
pub struct BoundingBox2D {
    #[serde(with = "coords::point2")]
    min: Point2<f64>,
    #[serde(with = "coords::point2")]
    max: Point2<f64>,
    #[serde(with = "coords::point2")]
    center: Point2<f64>,
    #[serde(with = "coords::vector2")]
    dimensions: Vector2<f64>,
}

impl From<Bounds2> for BoundingBox2D {
    fn from(raw: Bounds2) -> Self {
        Self::new(raw.min, raw.max)
    }
}

impl BoundingBox2D {
    pub fn new(min: Point2<f64>, max: Point2<f64>) -> Self {
        Self {
            min,
            max,
            center: Point2::from((min.coords + max.coords) / 2.0),
            dimensions: max - min,
        }
    }

    pub fn zero() -> Self {
        Self::new(Point2::origin(), Point2::origin())
    }

    /// Componentwise extent of a point set; empty input yields [`BoundingBox2D::zero`]
    pub fn from_points<'a, I>(points: I) -> Self
    where
        I: IntoIterator<Item = &'a Point2<f64>>,
    {
        let mut points = points.into_iter();
        let Some(first) = points.next() else {
            return Self::zero();
        };

        let (mut min, mut max) = (*first, *first);
        for point in points {
            min.x = min.x.min(point.x);
            min.y = min.y.min(point.y);
            max.x = max.x.max(point.x);
            max.y = max.y.max(point.y);
        }
        Self::new(min, max)
    }

    /// Smallest box containing both boxes
    pub fn union(&self, other: &BoundingBox2D) -> Self {
        Self::new(
            Point2::new(self.min.x.min(other.min.x), self.min.y.min(other.min.y)),
            Point2::new(self.max.x.max(other.max.x), self.max.y.max(other.max.y)),
        )
    }

    pub fn min(&self) -> Point2<f64> {
        self.min
    }

    pub fn max(&self) -> Point2<f64> {
        self.max
    }

    pub fn center(&self) -> Point2<f64> {
        self.center
    }

    pub fn dimensions(&self) -> Vector2<f64> {
        self.dimensions
    }
}

impl Default for BoundingBox2D {
    fn default() -> Self {
        Self::zero()
    }
}
