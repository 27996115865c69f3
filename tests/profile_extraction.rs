// SPDX-License-Identifier: Apache-2.0
// Copyright (c) 2025 Polyframe Inc.

//! Cutting-plane extraction tests over approximate solids

use approx::assert_relative_eq;
use nalgebra::{Point3, Vector3};
use stepslice::geometry::{Mesh, Primitive};
use stepslice::profile::{
    extract_profile, extract_profile_with_id, find_intersection_points, CuttingPlane,
    CuttingPlaneConfig, PlanePreset,
};

fn unit_block() -> Mesh {
    Primitive::cuboid(Vector3::new(10.0, 10.0, 10.0), Point3::new(5.0, 5.0, 5.0)).to_mesh()
}

fn preset(plane: PlanePreset, position: f64) -> CuttingPlaneConfig {
    CuttingPlaneConfig {
        chain_tolerance: Some(6.0),
        ..CuttingPlaneConfig::from_preset(plane, Point3::origin(), position)
    }
}

#[test]
fn test_every_preset_cuts_the_block() {
    let mesh = unit_block();

    for plane in [PlanePreset::Xy, PlanePreset::Xz, PlanePreset::Yz] {
        let profile = extract_profile(&mesh, &preset(plane, 5.0));
        assert!(
            !profile.curves.is_empty(),
            "{} section produced no curves",
            plane.as_str()
        );

        let bbox = &profile.bounding_box;
        for corner in [bbox.min(), bbox.max()] {
            assert!(corner.x.abs() <= 10.0 + 1e-9 && corner.y.abs() <= 10.0 + 1e-9);
        }
    }
}

#[test]
fn test_metrics_are_sums_over_curves() {
    let mesh = unit_block();
    let config = CuttingPlaneConfig {
        simplify: false,
        ..preset(PlanePreset::Xy, 2.0)
    };
    let profile = extract_profile(&mesh, &config);

    let area: f64 = profile.curves.iter().map(|c| c.area()).sum();
    let length: f64 = profile.curves.iter().map(|c| c.length()).sum();
    assert_relative_eq!(profile.area, area);
    assert_relative_eq!(profile.length, length);
    assert!(profile.area >= 0.0);
}

#[test]
fn test_intersection_points_are_welded() {
    let mesh = unit_block();
    let plane = CuttingPlane::from_config(&CuttingPlaneConfig {
        position: 5.0,
        ..CuttingPlaneConfig::default()
    });

    let tolerance = 0.5;
    let points = find_intersection_points(&mesh, &plane, tolerance);
    assert!(!points.is_empty());

    for (i, a) in points.iter().enumerate() {
        for b in &points[i + 1..] {
            let chebyshev = (a.x - b.x).abs().max((a.y - b.y).abs());
            assert!(chebyshev >= tolerance, "{:?} and {:?} not welded", a, b);
        }
    }
}

#[test]
fn test_non_unit_normal_is_normalized() {
    let mesh = unit_block();
    let unit = preset(PlanePreset::Xy, 5.0);
    let scaled = unit.clone().with_normal(Vector3::new(0.0, 0.0, 4.0));

    let a = extract_profile_with_id(&mesh, &unit, "a");
    let b = extract_profile_with_id(&mesh, &scaled, "a");
    assert_eq!(a, b);
}

#[test]
fn test_extraction_is_deterministic() {
    let mesh = unit_block();
    let config = CuttingPlaneConfig {
        normal: Vector3::new(1.0, 1.0, 0.0),
        plane_type: PlanePreset::Custom,
        origin: Point3::new(5.0, 5.0, 0.0),
        chain_tolerance: Some(8.0),
        ..CuttingPlaneConfig::default()
    };

    let first = extract_profile_with_id(&mesh, &config, "run");
    let second = extract_profile_with_id(&mesh, &config, "run");
    assert_eq!(first, second);
}

#[test]
fn test_plane_beyond_part_is_empty() {
    let mesh = unit_block();
    let profile = extract_profile(&mesh, &preset(PlanePreset::Yz, 25.0));

    assert!(profile.curves.is_empty());
    assert_eq!(profile.area, 0.0);
    assert_eq!(profile.length, 0.0);
    assert_eq!(profile.bounding_box.min(), nalgebra::Point2::origin());
}

#[test]
fn test_tight_tolerance_links_nothing() {
    // section points sit at least 5 apart, so the default weld distance
    // never links two of them
    let profile = extract_profile(&unit_block(), &CuttingPlaneConfig {
        position: 5.0,
        ..CuttingPlaneConfig::default()
    });
    assert!(profile.curves.is_empty());
}
