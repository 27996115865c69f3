// SPDX-License-Identifier: Apache-2.0
// Copyright (c) 2025 Polyframe Inc.

//! Serde adapters that write nalgebra points and vectors as `{x, y}` and
//! `{x, y, z}` objects, for use with `#[serde(with = "...")]`

use serde::{Deserialize, Serialize};

#[derive(Serialize, Deserialize)]
struct Xy {
    x: f64,
    y: f64,
}

#[derive(Serialize, Deserialize)]
struct Xyz {
    x: f64,
    y: f64,
    z: f64,
}

pub mod point2 {
    use super::Xy;
    use nalgebra::Point2;
    use serde::{Deserialize, Deserializer, Serialize, Serializer};

    pub fn serialize<S>(point: &Point2<f64>, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        Xy { x: point.x, y: point.y }.serialize(serializer)
    }

    pub fn deserialize<'de, D>(deserializer: D) -> Result<Point2<f64>, D::Error>
    where
        D: Deserializer<'de>,
    {
        let Xy { x, y } = Xy::deserialize(deserializer)?;
        Ok(Point2::new(x, y))
    }
}

pub mod point2_vec {
    use super::Xy;
    use nalgebra::Point2;
    use serde::{Deserialize, Deserializer, Serializer};

    pub fn serialize<S>(points: &[Point2<f64>], serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.collect_seq(points.iter().map(|p| Xy { x: p.x, y: p.y }))
    }

    pub fn deserialize<'de, D>(deserializer: D) -> Result<Vec<Point2<f64>>, D::Error>
    where
        D: Deserializer<'de>,
    {
        let points = Vec::<Xy>::deserialize(deserializer)?;
        Ok(points.into_iter().map(|Xy { x, y }| Point2::new(x, y)).collect())
    }
}

pub mod vector2 {
    use super::Xy;
    use nalgebra::Vector2;
    use serde::{Deserialize, Deserializer, Serialize, Serializer};

    pub fn serialize<S>(vector: &Vector2<f64>, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        Xy { x: vector.x, y: vector.y }.serialize(serializer)
    }

    pub fn deserialize<'de, D>(deserializer: D) -> Result<Vector2<f64>, D::Error>
    where
        D: Deserializer<'de>,
    {
        let Xy { x, y } = Xy::deserialize(deserializer)?;
        Ok(Vector2::new(x, y))
    }
}

pub mod point3 {
    use super::Xyz;
    use nalgebra::Point3;
    use serde::{Deserialize, Deserializer, Serialize, Serializer};

    pub fn serialize<S>(point: &Point3<f64>, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        Xyz {
            x: point.x,
            y: point.y,
            z: point.z,
        }
        .serialize(serializer)
    }

    pub fn deserialize<'de, D>(deserializer: D) -> Result<Point3<f64>, D::Error>
    where
        D: Deserializer<'de>,
    {
        let Xyz { x, y, z } = Xyz::deserialize(deserializer)?;
        Ok(Point3::new(x, y, z))
    }
}

pub mod vector3 {
    use super::Xyz;
    use nalgebra::Vector3;
    use serde::{Deserialize, Deserializer, Serialize, Serializer};

    pub fn serialize<S>(vector: &Vector3<f64>, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        Xyz {
            x: vector.x,
            y: vector.y,
            z: vector.z,
        }
        .serialize(serializer)
    }

    pub fn deserialize<'de, D>(deserializer: D) -> Result<Vector3<f64>, D::Error>
    where
        D: Deserializer<'de>,
    {
        let Xyz { x, y, z } = Xyz::deserialize(deserializer)?;
        Ok(Vector3::new(x, y, z))
    }
}
