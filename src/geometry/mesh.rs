// SPDX-License-Identifier: Apache-2.0
// Copyright (c) 2025 Polyframe Inc.

//! Mesh representation and utilities

use super::BoundingBox;
use crate::utils::coords;
use nalgebra::{Point3, Vector3};
use serde::{Deserialize, Serialize};

/// Vertex with position and normal
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct Vertex {
    #[serde(with = "coords::point3")]
    pub position: Point3<f64>,
    #[serde(with = "coords::vector3")]
    pub normal: Vector3<f64>,
}

impl Vertex {
    pub fn new(position: Point3<f64>, normal: Vector3<f64>) -> Self {
        Self { position, normal }
    }

    /// Vertex with no meaningful normal, as produced by raw triangle soups
    pub fn at(position: Point3<f64>) -> Self {
        Self::new(position, Vector3::zeros())
    }
}

/// Triangle defined by three vertex indices
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct Triangle {
    pub indices: [usize; 3],
}

impl Triangle {
    pub fn new(indices: [usize; 3]) -> Self {
        Self { indices }
    }

    /// Geometric normal from the winding of the referenced vertices
    pub fn face_normal(&self, mesh: &Mesh) -> Vector3<f64> {
        let p0 = mesh.vertices[self.indices[0]].position;
        let p1 = mesh.vertices[self.indices[1]].position;
        let p2 = mesh.vertices[self.indices[2]].position;
        (p1 - p0)
            .cross(&(p2 - p0))
            .try_normalize(f64::EPSILON)
            .unwrap_or_else(Vector3::zeros)
    }
}

/// Triangular mesh.
///
/// A mesh with an empty triangle list is read as an unindexed soup: every
/// consecutive triple of vertices forms one triangle.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Mesh {
    pub vertices: Vec<Vertex>,
    pub triangles: Vec<Triangle>,
}

impl Mesh {
    pub fn new() -> Self {
        Self {
            vertices: Vec::new(),
            triangles: Vec::new(),
        }
    }

    pub fn with_capacity(vertex_count: usize, triangle_count: usize) -> Self {
        Self {
            vertices: Vec::with_capacity(vertex_count),
            triangles: Vec::with_capacity(triangle_count),
        }
    }

    /// Build an unindexed mesh from a flat list of triangle corners
    pub fn from_soup(corners: impl IntoIterator<Item = Point3<f64>>) -> Self {
        Self {
            vertices: corners.into_iter().map(Vertex::at).collect(),
            triangles: Vec::new(),
        }
    }

    /// Add a vertex and return its index
    pub fn add_vertex(&mut self, vertex: Vertex) -> usize {
        let index = self.vertices.len();
        self.vertices.push(vertex);
        index
    }

    /// Add a triangle
    pub fn add_triangle(&mut self, triangle: Triangle) {
        self.triangles.push(triangle);
    }

    pub fn is_indexed(&self) -> bool {
        !self.triangles.is_empty()
    }

    /// Iterate triangle corner positions.
    ///
    /// Indexed meshes use their triangle list; unindexed meshes use consecutive
    /// vertex triples and ignore a trailing partial triple. Triangles referencing
    /// out-of-range vertices are skipped.
    pub fn faces(&self) -> Box<dyn Iterator<Item = [Point3<f64>; 3]> + '_> {
        if self.is_indexed() {
            Box::new(self.triangles.iter().filter_map(move |tri| {
                let [a, b, c] = tri.indices;
                Some([
                    self.vertices.get(a)?.position,
                    self.vertices.get(b)?.position,
                    self.vertices.get(c)?.position,
                ])
            }))
        } else {
            Box::new(
                self.vertices
                    .chunks_exact(3)
                    .map(|tri| [tri[0].position, tri[1].position, tri[2].position]),
            )
        }
    }

    /// Compute bounding box
    pub fn bounding_box(&self) -> BoundingBox {
        BoundingBox::from_points(self.vertices.iter().map(|v| &v.position))
    }

    /// Flat `[x, y, z, ...]` position buffer for GPU upload
    pub fn positions(&self) -> Vec<f32> {
        self.vertices
            .iter()
            .flat_map(|v| [v.position.x as f32, v.position.y as f32, v.position.z as f32])
            .collect()
    }

    /// Flat triangle index buffer; empty for unindexed meshes
    pub fn indices(&self) -> Vec<u32> {
        self.triangles
            .iter()
            .flat_map(|t| t.indices.map(|i| i as u32))
            .collect()
    }

    /// Get vertex count
    pub fn vertex_count(&self) -> usize {
        self.vertices.len()
    }

    /// Number of triangles, counting soup triples for unindexed meshes
    pub fn triangle_count(&self) -> usize {
        if self.is_indexed() {
            self.triangles.len()
        } else {
            self.vertices.len() / 3
        }
    }

    pub fn is_empty(&self) -> bool {
        self.triangle_count() == 0
    }
}
