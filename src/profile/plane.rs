// SPDX-License-Identifier: Apache-2.0
// Copyright (c) 2025 Polyframe Inc.

//! Cutting plane configuration and the plane's local 2D frame

use crate::utils::{coords, normalize_or_keep};
use nalgebra::{Point2, Point3, Vector3};
use serde::{Deserialize, Serialize};

/// Plane orientation presets offered to the user
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum PlanePreset {
    #[default]
    Xy,
    Xz,
    Yz,
    Custom,
}

impl PlanePreset {
    /// Normal for the axis-aligned presets; `None` for [`PlanePreset::Custom`]
    pub fn normal(&self) -> Option<Vector3<f64>> {
        match self {
            PlanePreset::Xy => Some(Vector3::new(0.0, 0.0, 1.0)),
            PlanePreset::Xz => Some(Vector3::new(0.0, 1.0, 0.0)),
            PlanePreset::Yz => Some(Vector3::new(1.0, 0.0, 0.0)),
            PlanePreset::Custom => None,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            PlanePreset::Xy => "XY",
            PlanePreset::Xz => "XZ",
            PlanePreset::Yz => "YZ",
            PlanePreset::Custom => "CUSTOM",
        }
    }

    pub fn from_str(s: &str) -> Option<Self> {
        match s.to_uppercase().as_str() {
            "XY" => Some(PlanePreset::Xy),
            "XZ" => Some(PlanePreset::Xz),
            "YZ" => Some(PlanePreset::Yz),
            "CUSTOM" => Some(PlanePreset::Custom),
            _ => None,
        }
    }
}

/// Where and how to slice.
///
/// The plane is `{p : n·(p - (origin + position·n)) = 0}` with `n` the
/// normalized `normal`. Serialized with the host application's camelCase
/// keys and `{x, y, z}` vectors.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct CuttingPlaneConfig {
    pub plane_type: PlanePreset,
    /// Need not be unit length
    #[serde(with = "coords::vector3")]
    pub normal: Vector3<f64>,
    #[serde(with = "coords::point3")]
    pub origin: Point3<f64>,
    /// Offset along the normal from `origin`
    pub position: f64,
    /// Weld distance for intersection points and simplification, also used
    /// for chaining unless `chain_tolerance` is set
    pub tolerance: f64,
    #[serde(rename = "simplification", alias = "simplify")]
    pub simplify: bool,
    pub chain_tolerance: Option<f64>,
}

impl Default for CuttingPlaneConfig {
    fn default() -> Self {
        Self {
            plane_type: PlanePreset::Xy,
            normal: Vector3::new(0.0, 0.0, 1.0),
            origin: Point3::origin(),
            position: 0.0,
            tolerance: 0.01,
            simplify: true,
            chain_tolerance: None,
        }
    }
}

impl CuttingPlaneConfig {
    /// Axis-aligned configuration; `Custom` keeps the default +Z normal
    pub fn from_preset(preset: PlanePreset, origin: Point3<f64>, position: f64) -> Self {
        Self {
            plane_type: preset,
            normal: preset.normal().unwrap_or_else(|| Vector3::new(0.0, 0.0, 1.0)),
            origin,
            position,
            ..Self::default()
        }
    }

    /// Custom normal
    pub fn with_normal(mut self, normal: Vector3<f64>) -> Self {
        self.plane_type = PlanePreset::Custom;
        self.normal = normal;
        self
    }

    /// Distance used to link intersection points into curves
    pub fn link_tolerance(&self) -> f64 {
        self.chain_tolerance.unwrap_or(self.tolerance)
    }
}

/// Infinite plane in Hessian normal form with a projection frame.
///
/// The frame's origin is the world origin, not the plane's reference
/// point: projected coordinates are `(p·u, p·v)` of the raw point.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CuttingPlane {
    normal: Vector3<f64>,
    constant: f64,
    u: Vector3<f64>,
    v: Vector3<f64>,
}

impl CuttingPlane {
    pub fn from_config(config: &CuttingPlaneConfig) -> Self {
        let normal = normalize_or_keep(config.normal);
        let point = config.origin + normal * config.position;
        let constant = -normal.dot(&point.coords);
        let (u, v) = projection_basis(&normal);
        Self {
            normal,
            constant,
            u,
            v,
        }
    }

    pub fn normal(&self) -> Vector3<f64> {
        self.normal
    }

    pub fn constant(&self) -> f64 {
        self.constant
    }

    /// In-plane axes `(u, v)`
    pub fn basis(&self) -> (Vector3<f64>, Vector3<f64>) {
        (self.u, self.v)
    }

    /// Signed distance along the normal
    pub fn distance_to_point(&self, point: &Point3<f64>) -> f64 {
        self.normal.dot(&point.coords) + self.constant
    }

    /// Point where the segment `start..=end` meets the plane.
    ///
    /// A segment parallel to the plane only reports its start point, and only
    /// when that point lies exactly on the plane.
    pub fn intersect_segment(&self, start: &Point3<f64>, end: &Point3<f64>) -> Option<Point3<f64>> {
        let direction = end - start;
        let denominator = self.normal.dot(&direction);

        if denominator == 0.0 {
            return (self.distance_to_point(start) == 0.0).then_some(*start);
        }

        let t = -(start.coords.dot(&self.normal) + self.constant) / denominator;
        if !(0.0..=1.0).contains(&t) {
            return None;
        }

        Some(start + direction * t)
    }

    /// Coordinates of `point` in the plane's 2D frame
    pub fn project(&self, point: &Point3<f64>) -> Point2<f64> {
        Point2::new(point.coords.dot(&self.u), point.coords.dot(&self.v))
    }
}

/// Orthonormal in-plane axes for a unit normal
fn projection_basis(normal: &Vector3<f64>) -> (Vector3<f64>, Vector3<f64>) {
    let seed = if normal.x.abs() < 0.9 {
        Vector3::x()
    } else {
        Vector3::y()
    };
    let v = normalize_or_keep(normal.cross(&seed));
    let u = normalize_or_keep(v.cross(normal));
    (u, v)
}
