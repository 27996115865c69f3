// SPDX-License-Identifier: Apache-2.0
// Copyright (c) 2025 Polyframe Inc.

//! SVG serialization and machine validation tests

use anyhow::Result;
use nalgebra::Point2;
use stepslice::io::{self, CurveType, SvgExportConfig, Units};
use stepslice::profile::{bounding_box_of_curves, metrics_of, Curve2D, ExtractedProfile};
use stepslice::validation::{validate_svg, validate_svg_with, MachineProfile};
use tempfile::NamedTempFile;

fn pts(coords: &[(f64, f64)]) -> Vec<Point2<f64>> {
    coords.iter().map(|&(x, y)| Point2::new(x, y)).collect()
}

fn profile_of(id: &str, curves: Vec<Curve2D>) -> ExtractedProfile {
    let metrics = metrics_of(&curves);
    ExtractedProfile {
        id: id.to_string(),
        bounding_box: bounding_box_of_curves(&curves),
        area: metrics.area,
        length: metrics.length,
        curves,
    }
}

/// One curve of every machining class
fn mixed_profile() -> ExtractedProfile {
    profile_of(
        "mixed",
        vec![
            Curve2D::closed(pts(&[(0.0, 0.0), (40.0, 0.0), (40.0, 20.0), (0.0, 20.0)])),
            Curve2D::closed(pts(&[(5.0, 5.0), (7.0, 5.0), (7.0, 7.0)])),
            Curve2D::open(pts(&[(0.0, 25.0), (40.0, 25.0), (40.0, 40.0)])),
            Curve2D::open(pts(&[(10.0, 10.0), (12.0, 10.0)])),
        ],
    )
}

#[test]
fn test_curves_get_class_and_colour() -> Result<()> {
    let svg = io::serialize(&[mixed_profile()], &SvgExportConfig::default(), Some("part.step"))?;

    let expected = [
        ("profile-1-curve-1", CurveType::ThroughCut, "#FF0000"),
        ("profile-1-curve-2", CurveType::Pocket, "#0000FF"),
        ("profile-1-curve-3", CurveType::Engraving, "#00FF00"),
        ("profile-1-curve-4", CurveType::GuideLine, "#000000"),
    ];
    for (id, curve_type, colour) in expected {
        let start = svg
            .find(&format!("id=\"{}\"", id))
            .unwrap_or_else(|| panic!("missing path {}", id));
        let element = &svg[start..start + svg[start..].find("/>").unwrap_or(0)];
        assert!(element.contains(&format!("class=\"{}\"", curve_type.class_name())));
        assert!(element.contains(&format!("stroke=\"{}\"", colour)));
    }

    assert!(svg.contains("d=\"M 0.000 0.000 L 40.000 0.000 L 40.000 20.000 L 0.000 20.000 Z\""));
    assert!(svg.contains("d=\"M 10.000 10.000 L 12.000 10.000\""));
    assert!(svg.contains("viewBox=\"0.000 0.000 40.000 40.000\""));
    assert!(svg.contains("width=\"40.000mm\""));

    Ok(())
}

#[test]
fn test_exported_document_passes_validation() -> Result<()> {
    let svg = io::serialize(&[mixed_profile()], &SvgExportConfig::default(), None)?;
    let report = validate_svg(&svg);

    assert!(report.valid);
    assert!(report.errors.is_empty());
    // the XML declaration's "UTF-8" trips the path command scan
    assert_eq!(
        report.warnings,
        vec!["Contains potentially unsupported path commands".to_string()]
    );
    Ok(())
}

#[test]
fn test_heavy_line_weight_warns_per_path() -> Result<()> {
    let config = SvgExportConfig {
        line_weight: 5.0,
        ..SvgExportConfig::default()
    };
    let svg = io::serialize(&[mixed_profile()], &config, None)?;
    let report = validate_svg_with(&svg, &MachineProfile::default());

    let weight_warnings: Vec<_> = report
        .warnings
        .iter()
        .filter(|w| w.starts_with("Line weight 5 "))
        .collect();
    assert_eq!(weight_warnings.len(), 4);
    assert!(report.valid);
    Ok(())
}

#[test]
fn test_several_profiles_share_one_view_box() -> Result<()> {
    let left = profile_of(
        "left",
        vec![Curve2D::closed(pts(&[(-10.0, 0.0), (0.0, 0.0), (0.0, 10.0)]))],
    );
    let right = profile_of(
        "right",
        vec![Curve2D::open(pts(&[(20.0, 5.0), (30.0, 15.0)]))],
    );

    let config = SvgExportConfig {
        units: Units::Inches,
        scale: 2.54,
        precision: 2,
        include_metadata: false,
        ..SvgExportConfig::default()
    };
    let svg = io::serialize(&[left, right], &config, None)?;

    assert!(svg.contains("<g id=\"profile-1\" class=\"profile\">"));
    assert!(svg.contains("<g id=\"profile-2\" class=\"profile\">"));
    // 40 wide and 15 high, scaled by 2.54 then divided by 25.4
    assert!(svg.contains("viewBox=\"-1.00 0.00 4.00 1.50\""));
    assert!(svg.contains("width=\"4.00inches\""));
    assert!(!svg.contains("<metadata>"));
    Ok(())
}

#[test]
fn test_write_svg_to_disk() -> Result<()> {
    let file = NamedTempFile::with_suffix(".svg")?;
    io::write_svg(file.path(), &[mixed_profile()], &SvgExportConfig::default(), Some("part.stp"))?;

    let written = std::fs::read_to_string(file.path())?;
    assert!(written.starts_with("<?xml version=\"1.0\" encoding=\"UTF-8\"?>"));
    assert!(written.contains("Generated profiles from part.stp for Shaper Origin CNC"));
    assert!(written.trim_end().ends_with("</svg>"));
    Ok(())
}

#[test]
fn test_profile_json_shape() -> Result<()> {
    let json = serde_json::to_value(mixed_profile())?;

    assert_eq!(json["id"], "mixed");
    assert_eq!(json["curves"][0]["type"], "line");
    assert_eq!(json["curves"][0]["closed"], true);
    assert!(json["curves"][0]["points"][0]["x"].is_number());
    assert!(json["boundingBox"]["dimensions"]["y"].is_number());
    assert_eq!(json["area"], 802.0);
    Ok(())
}
