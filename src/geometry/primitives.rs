// SPDX-License-Identifier: Apache-2.0
// Copyright (c) 2025 Polyframe Inc.

//! Geometric primitives generator

use super::{Mesh, Triangle, Vertex};
use nalgebra::{Point3, Vector3};
use parry3d::math::Point as HullPoint;
use parry3d::transformation::try_convex_hull;

/// Geometric primitives used to approximate imported solids
#[derive(Debug, Clone)]
pub enum Primitive {
    /// Axis-aligned box of `size` centered on `center`
    Cuboid { size: Vector3<f64>, center: Point3<f64> },
    /// Convex hull of a point cloud
    Hull { points: Vec<Point3<f64>> },
}

impl Primitive {
    pub fn cuboid(size: Vector3<f64>, center: Point3<f64>) -> Self {
        Self::Cuboid { size, center }
    }

    pub fn hull(points: Vec<Point3<f64>>) -> Self {
        Self::Hull { points }
    }

    /// Triangulate the primitive.
    ///
    /// A hull over degenerate input (fewer than four points, or all points
    /// coplanar) produces an empty mesh.
    pub fn to_mesh(&self) -> Mesh {
        match self {
            Self::Cuboid { size, center } => generate_cuboid_mesh(*size, *center),
            Self::Hull { points } => generate_hull_mesh(points),
        }
    }
}

fn generate_cuboid_mesh(size: Vector3<f64>, center: Point3<f64>) -> Mesh {
    let mut mesh = Mesh::with_capacity(36, 12);

    let half = size / 2.0;
    let (min_x, max_x) = (center.x - half.x, center.x + half.x);
    let (min_y, max_y) = (center.y - half.y, center.y + half.y);
    let (min_z, max_z) = (center.z - half.z, center.z + half.z);

    // 8 corners
    let positions = [
        Point3::new(min_x, min_y, min_z),
        Point3::new(max_x, min_y, min_z),
        Point3::new(max_x, max_y, min_z),
        Point3::new(min_x, max_y, min_z),
        Point3::new(min_x, min_y, max_z),
        Point3::new(max_x, min_y, max_z),
        Point3::new(max_x, max_y, max_z),
        Point3::new(min_x, max_y, max_z),
    ];

    // 6 faces, two triangles each
    let faces = [
        // z+
        ([4, 5, 6], Vector3::new(0.0, 0.0, 1.0)),
        ([4, 6, 7], Vector3::new(0.0, 0.0, 1.0)),
        // z-
        ([1, 0, 3], Vector3::new(0.0, 0.0, -1.0)),
        ([1, 3, 2], Vector3::new(0.0, 0.0, -1.0)),
        // x+
        ([5, 1, 2], Vector3::new(1.0, 0.0, 0.0)),
        ([5, 2, 6], Vector3::new(1.0, 0.0, 0.0)),
        // x-
        ([0, 4, 7], Vector3::new(-1.0, 0.0, 0.0)),
        ([0, 7, 3], Vector3::new(-1.0, 0.0, 0.0)),
        // y+
        ([7, 6, 2], Vector3::new(0.0, 1.0, 0.0)),
        ([7, 2, 3], Vector3::new(0.0, 1.0, 0.0)),
        // y-
        ([0, 1, 5], Vector3::new(0.0, -1.0, 0.0)),
        ([0, 5, 4], Vector3::new(0.0, -1.0, 0.0)),
    ];

    for (indices, normal) in faces {
        let v0 = mesh.add_vertex(Vertex::new(positions[indices[0]], normal));
        let v1 = mesh.add_vertex(Vertex::new(positions[indices[1]], normal));
        let v2 = mesh.add_vertex(Vertex::new(positions[indices[2]], normal));
        mesh.add_triangle(Triangle::new([v0, v1, v2]));
    }

    mesh
}

fn generate_hull_mesh(points: &[Point3<f64>]) -> Mesh {
    if points.len() < 4 {
        return Mesh::new();
    }

    let cloud: Vec<HullPoint<f32>> = points
        .iter()
        .map(|p| HullPoint::new(p.x as f32, p.y as f32, p.z as f32))
        .collect();

    let (hull_points, hull_faces) = match try_convex_hull(&cloud) {
        Ok(hull) => hull,
        Err(err) => {
            tracing::debug!("convex hull failed: {:?}", err);
            return Mesh::new();
        }
    };

    // A flat cloud collapses to a polygon that encloses no volume
    let enclosed: f64 = hull_faces
        .iter()
        .map(|f| {
            let [a, b, c] = f.map(|i| hull_points[i as usize].coords.cast::<f64>());
            a.dot(&b.cross(&c)) / 6.0
        })
        .sum();
    if hull_faces.len() < 4 || enclosed.abs() < 1e-9 {
        return Mesh::new();
    }

    let mut mesh = Mesh::with_capacity(hull_points.len(), hull_faces.len());
    for p in &hull_points {
        mesh.add_vertex(Vertex::at(Point3::new(p.x as f64, p.y as f64, p.z as f64)));
    }
    for face in &hull_faces {
        mesh.add_triangle(Triangle::new(face.map(|i| i as usize)));
    }
    for i in 0..mesh.triangles.len() {
        let normal = mesh.triangles[i].face_normal(&mesh);
        for index in mesh.triangles[i].indices {
            mesh.vertices[index].normal = normal;
        }
    }

    mesh
}
