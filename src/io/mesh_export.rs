// SPDX-License-Identifier: Apache-2.0
// Copyright (c) 2025 Polyframe Inc.

//! STL export of the approximate solid for external viewers

use crate::geometry::Mesh;
use anyhow::{Context, Result};
use nalgebra::Point3;
use std::fs::File;
use std::io::Write;
use std::path::Path;

/// Export mesh to STL: binary for `.stl` paths, ASCII otherwise
pub fn export_stl<P: AsRef<Path>>(mesh: &Mesh, path: P) -> Result<()> {
    let path = path.as_ref();
    let binary = path
        .extension()
        .is_some_and(|ext| ext.eq_ignore_ascii_case("stl"));

    if binary {
        export_stl_binary(mesh, path)
    } else {
        export_stl_ascii(mesh, path)
    }
}

fn facet_normal([a, b, c]: &[Point3<f64>; 3]) -> [f32; 3] {
    let n = (b - a)
        .cross(&(c - a))
        .try_normalize(f64::EPSILON)
        .unwrap_or_else(nalgebra::Vector3::zeros);
    [n.x as f32, n.y as f32, n.z as f32]
}

fn to_f32(p: &Point3<f64>) -> [f32; 3] {
    [p.x as f32, p.y as f32, p.z as f32]
}

fn export_stl_binary(mesh: &Mesh, path: &Path) -> Result<()> {
    use stl_io::{Normal, Triangle as StlTriangle, Vertex as StlVertex};

    let triangles: Vec<StlTriangle> = mesh
        .faces()
        .map(|face| StlTriangle {
            normal: Normal::new(facet_normal(&face)),
            vertices: face.map(|p| StlVertex::new(to_f32(&p))),
        })
        .collect();

    let mut file = File::create(path).context("Failed to create STL file")?;
    stl_io::write_stl(&mut file, triangles.iter()).context("Failed to write STL file")?;

    tracing::debug!(triangles = triangles.len(), path = %path.display(), "wrote binary STL");
    Ok(())
}

fn export_stl_ascii(mesh: &Mesh, path: &Path) -> Result<()> {
    let mut file = File::create(path).context("Failed to create STL file")?;

    writeln!(file, "solid stepslice")?;
    for face in mesh.faces() {
        let [nx, ny, nz] = facet_normal(&face);
        writeln!(file, "  facet normal {} {} {}", nx, ny, nz)?;
        writeln!(file, "    outer loop")?;
        for p in &face {
            writeln!(file, "      vertex {} {} {}", p.x, p.y, p.z)?;
        }
        writeln!(file, "    endloop")?;
        writeln!(file, "  endfacet")?;
    }
    writeln!(file, "endsolid stepslice")?;

    Ok(())
}
