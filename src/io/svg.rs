// SPDX-License-Identifier: Apache-2.0
// Copyright (c) 2025 Polyframe Inc.

//! SVG exporter for CNC cutting profiles

use crate::error::{Error, Result};
use crate::geometry::BoundingBox2D;
use crate::profile::{Curve2D, ExtractedProfile};
use crate::utils::format_fixed;
use chrono::{SecondsFormat, Utc};
use quick_xml::events::{BytesCData, BytesDecl, BytesEnd, BytesStart, BytesText, Event};
use quick_xml::Writer;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::io::Cursor;
use std::path::Path;

const SVG_NAMESPACE: &str = "http://www.w3.org/2000/svg";
const MM_PER_INCH: f64 = 25.4;

/// Output length unit. Source coordinates are always millimetres.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Units {
    #[default]
    Mm,
    Inches,
}

impl Units {
    pub fn as_str(&self) -> &'static str {
        match self {
            Units::Mm => "mm",
            Units::Inches => "inches",
        }
    }

    pub fn from_str(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "mm" => Some(Units::Mm),
            "in" | "inch" | "inches" => Some(Units::Inches),
            _ => None,
        }
    }
}

impl fmt::Display for Units {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Machining operation a curve is exported as
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum CurveType {
    ThroughCut,
    Pocket,
    Engraving,
    GuideLine,
}

impl CurveType {
    pub const ALL: [CurveType; 4] = [
        CurveType::ThroughCut,
        CurveType::Pocket,
        CurveType::Engraving,
        CurveType::GuideLine,
    ];

    /// CSS class written on the path
    pub fn class_name(&self) -> &'static str {
        match self {
            CurveType::ThroughCut => "throughCut",
            CurveType::Pocket => "pocket",
            CurveType::Engraving => "engraving",
            CurveType::GuideLine => "guideLine",
        }
    }
}

/// Stroke colour per curve type
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ColorMapping {
    pub through_cut: String,
    pub pocket: String,
    pub engraving: String,
    pub guide_line: String,
}

impl Default for ColorMapping {
    fn default() -> Self {
        Self {
            through_cut: "#FF0000".to_string(),
            pocket: "#0000FF".to_string(),
            engraving: "#00FF00".to_string(),
            guide_line: "#000000".to_string(),
        }
    }
}

impl ColorMapping {
    pub fn color_for(&self, curve_type: CurveType) -> &str {
        match curve_type {
            CurveType::ThroughCut => &self.through_cut,
            CurveType::Pocket => &self.pocket,
            CurveType::Engraving => &self.engraving,
            CurveType::GuideLine => &self.guide_line,
        }
    }
}

/// Cut-off values for [`classify`], in raw curve units
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ClassificationThresholds {
    /// Closed curves enclosing more than this are through cuts, else pockets
    pub through_cut_area: f64,
    /// Open curves longer than this are engravings, else guide lines
    pub engraving_length: f64,
}

impl Default for ClassificationThresholds {
    fn default() -> Self {
        Self {
            through_cut_area: 10.0,
            engraving_length: 50.0,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct SvgExportConfig {
    pub units: Units,
    pub scale: f64,
    pub color_mapping: ColorMapping,
    /// Stroke width in millimetres
    pub line_weight: f64,
    /// Decimal places for every coordinate
    pub precision: usize,
    pub include_metadata: bool,
    pub thresholds: ClassificationThresholds,
}

impl Default for SvgExportConfig {
    fn default() -> Self {
        Self {
            units: Units::Mm,
            scale: 1.0,
            color_mapping: ColorMapping::default(),
            line_weight: 0.25,
            precision: 3,
            include_metadata: true,
            thresholds: ClassificationThresholds::default(),
        }
    }
}

impl SvgExportConfig {
    /// Map a source coordinate (mm) to an output coordinate
    pub fn convert(&self, value: f64) -> f64 {
        let scaled = value * self.scale;
        match self.units {
            Units::Mm => scaled,
            Units::Inches => scaled / MM_PER_INCH,
        }
    }
}

/// Pick the machining operation for a curve from its size
pub fn classify(curve: &Curve2D, thresholds: &ClassificationThresholds) -> CurveType {
    if curve.closed {
        if curve.area() > thresholds.through_cut_area {
            CurveType::ThroughCut
        } else {
            CurveType::Pocket
        }
    } else if curve.length() > thresholds.engraving_length {
        CurveType::Engraving
    } else {
        CurveType::GuideLine
    }
}

/// Path data for a curve in its own coordinates: `M x y`, then `L x y` per
/// point, then ` Z` when closed. Empty curves give an empty string.
pub fn curve_to_path(curve: &Curve2D, precision: usize) -> String {
    path_data(curve, precision, |v| v)
}

fn path_data(curve: &Curve2D, precision: usize, convert: impl Fn(f64) -> f64) -> String {
    let mut points = curve.points.iter();
    let Some(first) = points.next() else {
        return String::new();
    };

    let fmt = |v: f64| format_fixed(convert(v), precision);
    let mut data = format!("M {} {}", fmt(first.x), fmt(first.y));
    for point in points {
        data.push_str(&format!(" L {} {}", fmt(point.x), fmt(point.y)));
    }
    if curve.closed {
        data.push_str(" Z");
    }
    data
}

/// Union of the profiles' stored bounds
fn overall_bounds(profiles: &[ExtractedProfile]) -> BoundingBox2D {
    profiles
        .iter()
        .map(|p| p.bounding_box)
        .reduce(|acc, b| acc.union(&b))
        .unwrap_or_default()
}

/// Render profiles as an SVG document.
///
/// Coordinates are scaled, converted to the output unit and then fixed to
/// `precision` decimals. Each profile becomes a `<g id="profile-N">`, each
/// curve a `<path>` classed and stroked by its [`CurveType`].
pub fn serialize(
    profiles: &[ExtractedProfile],
    config: &SvgExportConfig,
    filename: Option<&str>,
) -> Result<String> {
    if profiles.is_empty() {
        return Err(Error::EmptyInput);
    }

    let bounds = overall_bounds(profiles);
    let fixed = |v: f64| format_fixed(v, config.precision);
    let width = fixed(config.convert(bounds.max().x - bounds.min().x));
    let height = fixed(config.convert(bounds.max().y - bounds.min().y));
    let min_x = fixed(config.convert(bounds.min().x));
    let min_y = fixed(config.convert(bounds.min().y));
    let line_weight = config.line_weight.to_string();

    let mut writer = Writer::new_with_indent(Cursor::new(Vec::new()), b' ', 2);
    writer.write_event(Event::Decl(BytesDecl::new("1.0", Some("UTF-8"), None)))?;

    let mut svg = BytesStart::new("svg");
    svg.push_attribute(("xmlns", SVG_NAMESPACE));
    svg.push_attribute(("width", format!("{}{}", width, config.units).as_str()));
    svg.push_attribute(("height", format!("{}{}", height, config.units).as_str()));
    svg.push_attribute((
        "viewBox",
        format!("{} {} {} {}", min_x, min_y, width, height).as_str(),
    ));
    svg.push_attribute(("version", "1.1"));
    writer.write_event(Event::Start(svg))?;

    if config.include_metadata {
        write_metadata(&mut writer, profiles.len(), config, filename)?;
    }

    for (profile_index, profile) in profiles.iter().enumerate() {
        let group_id = format!("profile-{}", profile_index + 1);
        let mut group = BytesStart::new("g");
        group.push_attribute(("id", group_id.as_str()));
        group.push_attribute(("class", "profile"));
        writer.write_event(Event::Start(group))?;

        for (curve_index, curve) in profile.curves.iter().enumerate() {
            let curve_type = classify(curve, &config.thresholds);
            let path_id = format!("{}-curve-{}", group_id, curve_index + 1);
            let d = path_data(curve, config.precision, |v| config.convert(v));

            let mut path = BytesStart::new("path");
            path.push_attribute(("id", path_id.as_str()));
            path.push_attribute(("class", curve_type.class_name()));
            path.push_attribute(("d", d.as_str()));
            path.push_attribute(("stroke", config.color_mapping.color_for(curve_type)));
            path.push_attribute(("stroke-width", line_weight.as_str()));
            path.push_attribute(("fill", "none"));
            path.push_attribute(("vector-effect", "non-scaling-stroke"));
            writer.write_event(Event::Empty(path))?;
        }

        writer.write_event(Event::End(BytesEnd::new("g")))?;
    }

    write_styles(&mut writer, config, &line_weight)?;
    writer.write_event(Event::End(BytesEnd::new("svg")))?;

    let document = String::from_utf8_lossy(&writer.into_inner().into_inner()).into_owned();
    tracing::debug!(
        profiles = profiles.len(),
        bytes = document.len(),
        "serialized svg"
    );
    Ok(document)
}

fn write_text_element(writer: &mut Writer<Cursor<Vec<u8>>>, name: &str, text: &str) -> Result<()> {
    writer.write_event(Event::Start(BytesStart::new(name)))?;
    writer.write_event(Event::Text(BytesText::new(text)))?;
    writer.write_event(Event::End(BytesEnd::new(name)))?;
    Ok(())
}

fn write_metadata(
    writer: &mut Writer<Cursor<Vec<u8>>>,
    profile_count: usize,
    config: &SvgExportConfig,
    filename: Option<&str>,
) -> Result<()> {
    let description = format!(
        "Generated profiles from {} for Shaper Origin CNC",
        filename.filter(|f| !f.is_empty()).unwrap_or("STEP file")
    );

    writer.write_event(Event::Start(BytesStart::new("metadata")))?;
    write_text_element(writer, "title", "STEP to SVG Profile Export")?;
    write_text_element(writer, "description", &description)?;
    write_text_element(writer, "creator", "STEP-to-SVG Converter")?;
    write_text_element(
        writer,
        "date",
        &Utc::now().to_rfc3339_opts(SecondsFormat::Millis, true),
    )?;
    write_text_element(writer, "profiles", &profile_count.to_string())?;
    write_text_element(writer, "units", config.units.as_str())?;
    write_text_element(writer, "scale", &config.scale.to_string())?;
    writer.write_event(Event::End(BytesEnd::new("metadata")))?;
    Ok(())
}

/// Class rules repeating the inline stroke colours
fn write_styles(
    writer: &mut Writer<Cursor<Vec<u8>>>,
    config: &SvgExportConfig,
    line_weight: &str,
) -> Result<()> {
    let mut rules = String::from("\n");
    for curve_type in CurveType::ALL {
        rules.push_str(&format!(
            "      .{} {{ stroke: {}; }}\n",
            curve_type.class_name(),
            config.color_mapping.color_for(curve_type)
        ));
    }
    rules.push_str(&format!(
        "      .profile {{ stroke-width: {}; fill: none; }}\n    ",
        line_weight
    ));

    writer.write_event(Event::Start(BytesStart::new("defs")))?;
    let mut style = BytesStart::new("style");
    style.push_attribute(("type", "text/css"));
    writer.write_event(Event::Start(style))?;
    writer.write_event(Event::CData(BytesCData::new(rules)))?;
    writer.write_event(Event::End(BytesEnd::new("style")))?;
    writer.write_event(Event::End(BytesEnd::new("defs")))?;
    Ok(())
}

/// Serialize and write the document to `path`
pub fn write_svg<P: AsRef<Path>>(
    path: P,
    profiles: &[ExtractedProfile],
    config: &SvgExportConfig,
    filename: Option<&str>,
) -> Result<()> {
    let document = serialize(profiles, config, filename)?;
    std::fs::write(path, document)?;
    Ok(())
}

/// Download name for the SVG of a STEP upload: `part.STEP` -> `part_profile.svg`
pub fn output_filename(step_filename: &str) -> String {
    let lower = step_filename.to_lowercase();
    let stem = [".step", ".stp"]
        .iter()
        .find(|ext| lower.ends_with(*ext))
        .map_or(step_filename, |ext| {
            &step_filename[..step_filename.len() - ext.len()]
        });
    format!("{}_profile.svg", stem)
}

#[cfg(test)]
mod tests {
    use super::*;
    use nalgebra::Point2;

    fn square_profile() -> ExtractedProfile {
        let curve = Curve2D::closed(vec![
            Point2::new(0.0, 0.0),
            Point2::new(10.0, 0.0),
            Point2::new(10.0, 10.0),
            Point2::new(0.0, 10.0),
        ]);
        ExtractedProfile {
            id: "square".to_string(),
            bounding_box: crate::profile::bounding_box_of_curves(std::slice::from_ref(&curve)),
            curves: vec![curve],
            area: 100.0,
            length: 40.0,
        }
    }

    fn view_box(svg: &str) -> &str {
        let start = svg.find("viewBox=\"").unwrap() + "viewBox=\"".len();
        let end = start + svg[start..].find('"').unwrap();
        &svg[start..end]
    }

    #[test]
    fn test_curve_to_path_open() {
        let curve = Curve2D::open(vec![
            Point2::new(0.0, 0.0),
            Point2::new(10.0, 5.0),
            Point2::new(20.0, 0.0),
        ]);
        assert_eq!(
            curve_to_path(&curve, 2),
            "M 0.00 0.00 L 10.00 5.00 L 20.00 0.00"
        );
    }

    #[test]
    fn test_curve_to_path_closed() {
        let curve = Curve2D::closed(vec![
            Point2::new(0.0, 0.0),
            Point2::new(10.0, 0.0),
            Point2::new(10.0, 10.0),
        ]);
        assert_eq!(curve_to_path(&curve, 1), "M 0.0 0.0 L 10.0 0.0 L 10.0 10.0 Z");
    }

    #[test]
    fn test_curve_to_path_rounds_halfway_coordinates_up() {
        let curve = Curve2D::open(vec![Point2::new(0.125, 2.5), Point2::new(0.375, 0.5)]);
        assert_eq!(curve_to_path(&curve, 2), "M 0.13 2.50 L 0.38 0.50");
        assert_eq!(curve_to_path(&curve, 0), "M 0 3 L 0 1");
    }

    #[test]
    fn test_curve_to_path_empty() {
        assert_eq!(curve_to_path(&Curve2D::closed(Vec::new()), 3), "");
    }

    #[test]
    fn test_classify_thresholds() {
        let thresholds = ClassificationThresholds::default();
        let big = square_profile().curves.remove(0);
        let small = Curve2D::closed(vec![
            Point2::new(0.0, 0.0),
            Point2::new(2.0, 0.0),
            Point2::new(2.0, 2.0),
        ]);
        let long = Curve2D::open(vec![Point2::new(0.0, 0.0), Point2::new(60.0, 0.0)]);
        let short = Curve2D::open(vec![Point2::new(0.0, 0.0), Point2::new(50.0, 0.0)]);

        assert_eq!(classify(&big, &thresholds), CurveType::ThroughCut);
        assert_eq!(classify(&small, &thresholds), CurveType::Pocket);
        assert_eq!(classify(&long, &thresholds), CurveType::Engraving);
        // exactly at the threshold is not "greater than"
        assert_eq!(classify(&short, &thresholds), CurveType::GuideLine);

        let strict = ClassificationThresholds {
            through_cut_area: 500.0,
            ..thresholds
        };
        assert_eq!(classify(&big, &strict), CurveType::Pocket);
    }

    #[test]
    fn test_empty_profiles_rejected() {
        let result = serialize(&[], &SvgExportConfig::default(), None);
        assert!(matches!(result, Err(Error::EmptyInput)));
    }

    #[test]
    fn test_document_structure() {
        let svg = serialize(&[square_profile()], &SvgExportConfig::default(), Some("part.step"))
            .unwrap();

        assert!(svg.starts_with("<?xml version=\"1.0\" encoding=\"UTF-8\"?>"));
        assert!(svg.contains("xmlns=\"http://www.w3.org/2000/svg\""));
        assert!(svg.contains("width=\"10.000mm\""));
        assert!(svg.contains("height=\"10.000mm\""));
        assert!(svg.contains("version=\"1.1\""));
        assert!(svg.contains("<g id=\"profile-1\" class=\"profile\">"));
        assert!(svg.contains("id=\"profile-1-curve-1\""));
        assert!(svg.contains("class=\"throughCut\""));
        assert!(svg.contains(
            "d=\"M 0.000 0.000 L 10.000 0.000 L 10.000 10.000 L 0.000 10.000 Z\""
        ));
        assert!(svg.contains("stroke=\"#FF0000\""));
        assert!(svg.contains("stroke-width=\"0.25\""));
        assert!(svg.contains("vector-effect=\"non-scaling-stroke\""));
        assert!(svg.contains("Generated profiles from part.step for Shaper Origin CNC"));
        assert!(svg.contains("<profiles>1</profiles>"));
        assert!(svg.contains("<![CDATA["));
        assert!(svg.contains(".pocket { stroke: #0000FF; }"));
        assert!(svg.contains(".profile { stroke-width: 0.25; fill: none; }"));
        assert!(svg.trim_end().ends_with("</svg>"));

        // styles come after the profile groups
        assert!(svg.find("<defs>").unwrap() > svg.find("profile-1-curve-1").unwrap());
    }

    #[test]
    fn test_scale_doubles_view_box() {
        let profiles = [square_profile()];
        let base = serialize(&profiles, &SvgExportConfig::default(), None).unwrap();
        let doubled = serialize(
            &profiles,
            &SvgExportConfig {
                scale: 2.0,
                ..SvgExportConfig::default()
            },
            None,
        )
        .unwrap();

        assert_eq!(view_box(&base), "0.000 0.000 10.000 10.000");
        assert_eq!(view_box(&doubled), "0.000 0.000 20.000 20.000");
        assert!(doubled.contains("L 20.000 20.000"));
    }

    #[test]
    fn test_inches_conversion() {
        let config = SvgExportConfig {
            units: Units::Inches,
            precision: 4,
            ..SvgExportConfig::default()
        };
        let svg = serialize(&[square_profile()], &config, None).unwrap();

        assert!(svg.contains("width=\"0.3937inches\""));
        assert_eq!(view_box(&svg), "0.0000 0.0000 0.3937 0.3937");
        assert!(svg.contains("<units>inches</units>"));
    }

    #[test]
    fn test_metadata_toggle() {
        let config = SvgExportConfig {
            include_metadata: false,
            ..SvgExportConfig::default()
        };
        let without = serialize(&[square_profile()], &config, None).unwrap();
        let with = serialize(&[square_profile()], &SvgExportConfig::default(), None).unwrap();

        assert!(!without.contains("<metadata>"));
        assert!(with.contains("<metadata>"));
        assert!(with.contains("Generated profiles from STEP file for Shaper Origin CNC"));
        assert!(with.contains("<scale>1</scale>"));
    }

    #[test]
    fn test_view_box_uses_union_of_stored_bounds() {
        let mut shifted = square_profile();
        shifted.bounding_box =
            BoundingBox2D::new(Point2::new(-5.0, 20.0), Point2::new(0.0, 30.0));

        let svg = serialize(
            &[square_profile(), shifted],
            &SvgExportConfig {
                precision: 1,
                ..SvgExportConfig::default()
            },
            None,
        )
        .unwrap();

        assert_eq!(view_box(&svg), "-5.0 0.0 15.0 30.0");
        assert!(svg.contains("<g id=\"profile-2\" class=\"profile\">"));
    }

    #[test]
    fn test_output_filename() {
        assert_eq!(output_filename("part.STEP"), "part_profile.svg");
        assert_eq!(output_filename("bracket.stp"), "bracket_profile.svg");
        assert_eq!(output_filename("drawing"), "drawing_profile.svg");
    }

    #[test]
    fn test_config_uses_camel_case_keys() {
        let json = r##"{"units":"inches","lineWeight":0.5,"colorMapping":{"throughCut":"#123456"}}"##;
        let config: SvgExportConfig = serde_json::from_str(json).unwrap();

        assert_eq!(config.units, Units::Inches);
        assert_eq!(config.line_weight, 0.5);
        assert_eq!(config.color_mapping.through_cut, "#123456");
        assert_eq!(config.color_mapping.pocket, "#0000FF");
        assert_eq!(config.precision, 3);
    }
}
