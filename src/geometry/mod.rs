// SPDX-License-Identifier: Apache-2.0
// Copyright (c) 2025 Polyframe Inc.

//! Geometry module - mesh representation and solid approximation

mod bbox;
mod mesh;
mod primitives;
mod solid;

pub use bbox::{BoundingBox, BoundingBox2D};
pub use mesh::{Mesh, Triangle, Vertex};
pub use primitives::Primitive;
pub use solid::{build_solid, SolidHints, MIN_THICKNESS};
