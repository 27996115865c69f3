// SPDX-License-Identifier: Apache-2.0
// Copyright (c) 2025 Polyframe Inc.

//! STEP record extraction using pest
//!
//! This is a record scanner, not a full ISO 10303-21 reader: parameters are
//! split on every comma, so nested lists and quoted strings containing commas
//! come back fragmented. Entity references are kept as raw ids and never
//! resolved into a graph.

use crate::error::{Error, Result};
use crate::geometry::{BoundingBox, SolidHints};
use crate::utils::coords;
use chrono::{DateTime, Utc};
use nalgebra::Point3;
use pest::Parser;
use pest_derive::Parser;
use serde::{Deserialize, Serialize};

#[derive(Parser)]
#[grammar = "io/step.pest"]
struct StepParser;

/// Keywords every STEP physical file must mention
pub const REQUIRED_SECTIONS: [&str; 7] = [
    "ISO-10303-21",
    "HEADER",
    "FILE_DESCRIPTION",
    "FILE_NAME",
    "FILE_SCHEMA",
    "ENDSEC",
    "DATA",
];

/// Entity types the downstream tooling knows how to handle
pub const SUPPORTED_ENTITIES: [&str; 12] = [
    "CARTESIAN_POINT",
    "CIRCLE",
    "LINE",
    "CYLINDRICAL_SURFACE",
    "PLANE",
    "CONICAL_SURFACE",
    "SPHERICAL_SURFACE",
    "B_SPLINE_SURFACE",
    "B_SPLINE_CURVE",
    "COMPOSITE_CURVE",
    "ADVANCED_BREP_SHAPE_REPRESENTATION",
    "MANIFOLD_SOLID_BREP",
];

/// One `#id = TYPE(...);` record
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Entity {
    pub id: u64,
    #[serde(rename = "type")]
    pub entity_type: String,
    pub parameters: Vec<String>,
    /// Referenced entity ids in order of appearance, duplicates kept
    pub references: Vec<u64>,
}

/// Coordinates of a `CARTESIAN_POINT` record
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct CartesianPoint {
    pub id: u64,
    #[serde(with = "coords::point3")]
    pub position: Point3<f64>,
}

/// Outcome of checking entity types against [`SUPPORTED_ENTITIES`]
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EntityValidation {
    pub valid: bool,
    pub unsupported_entities: Vec<String>,
}

/// A parsed STEP upload
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StepFile {
    pub id: String,
    pub filename: String,
    pub size: usize,
    pub upload_date: DateTime<Utc>,
    pub entities: Vec<Entity>,
    pub points: Vec<CartesianPoint>,
    pub bounding_box: BoundingBox,
}

impl StepFile {
    pub fn entity_validation(&self) -> EntityValidation {
        validate_entities(&self.entities)
    }

    pub fn solid_hints(&self) -> SolidHints {
        solid_hints(&self.entities)
    }

    pub fn positions(&self) -> Vec<Point3<f64>> {
        self.points.iter().map(|p| p.position).collect()
    }
}

/// Check that every required section keyword appears, ignoring case.
///
/// Order and structure are not checked.
pub fn validate_step(content: &str) -> bool {
    let upper = content.to_uppercase();
    REQUIRED_SECTIONS
        .iter()
        .all(|section| upper.contains(section))
}

/// Text between the first `DATA;` and the next `ENDSEC;`.
///
/// Without a `DATA;` marker the section is empty; without a closing
/// `ENDSEC;` it runs to the end of the content.
fn data_section(content: &str) -> &str {
    let Some(start) = content.find("DATA;") else {
        return "";
    };
    let body = &content[start + "DATA;".len()..];
    match body.find("ENDSEC;") {
        Some(end) => &body[..end],
        None => body,
    }
}

/// Collect every `#n` reference in `param`
fn collect_references(param: &str, out: &mut Vec<u64>) {
    let mut rest = param;
    while let Some(pos) = rest.find('#') {
        let tail = &rest[pos + 1..];
        let len = tail.bytes().take_while(u8::is_ascii_digit).count();
        if let Ok(id) = tail[..len].parse() {
            out.push(id);
        }
        rest = &tail[len..];
    }
}

/// Scan the DATA section for entity records
pub fn parse_entities(content: &str) -> Vec<Entity> {
    let section = data_section(content);
    let records = match StepParser::parse(Rule::records, section) {
        Ok(mut pairs) => pairs.next(),
        Err(err) => {
            tracing::warn!("STEP record scan failed: {}", err);
            None
        }
    };

    let mut entities = Vec::new();
    let Some(records) = records else {
        return entities;
    };

    for record in records.into_inner() {
        if record.as_rule() != Rule::entity {
            continue;
        }

        let mut inner = record.into_inner();
        let (Some(id), Some(keyword), Some(params)) = (inner.next(), inner.next(), inner.next())
        else {
            continue;
        };

        let Ok(id) = id.as_str().parse::<u64>() else {
            tracing::warn!("skipping entity with out-of-range id #{}", id.as_str());
            continue;
        };

        let parameters: Vec<String> = params
            .as_str()
            .split(',')
            .map(|p| p.trim().to_string())
            .collect();

        let mut references = Vec::new();
        for param in &parameters {
            collect_references(param, &mut references);
        }

        entities.push(Entity {
            id,
            entity_type: keyword.as_str().to_string(),
            parameters,
            references,
        });
    }

    tracing::debug!(count = entities.len(), "parsed STEP entities");
    entities
}

/// Non-numeric or non-finite coordinate tokens read as zero
fn coerce_coordinate(token: &str) -> f64 {
    token
        .trim()
        .parse::<f64>()
        .ok()
        .filter(|v| v.is_finite())
        .unwrap_or(0.0)
}

/// Scan the whole content for `CARTESIAN_POINT` coordinates
pub fn extract_points(content: &str) -> Vec<CartesianPoint> {
    let scan = match StepParser::parse(Rule::points, content) {
        Ok(mut pairs) => pairs.next(),
        Err(err) => {
            tracing::warn!("CARTESIAN_POINT scan failed: {}", err);
            None
        }
    };

    let Some(scan) = scan else {
        return Vec::new();
    };

    scan.into_inner()
        .filter(|pair| pair.as_rule() == Rule::point)
        .filter_map(|pair| {
            let mut id = None;
            let mut coords = Vec::with_capacity(3);
            for part in pair.into_inner() {
                match part.as_rule() {
                    Rule::digits => id = part.as_str().parse::<u64>().ok(),
                    Rule::coord => coords.push(coerce_coordinate(part.as_str())),
                    _ => {}
                }
            }
            match (id, coords.as_slice()) {
                (Some(id), [x, y, z]) => Some(CartesianPoint {
                    id,
                    position: Point3::new(*x, *y, *z),
                }),
                _ => None,
            }
        })
        .collect()
}

/// Bounding volume of extracted points; no points gives the zero box
pub fn bounding_box_of(points: &[CartesianPoint]) -> BoundingBox {
    BoundingBox::from_points(points.iter().map(|p| &p.position))
}

/// Case-insensitive membership in [`SUPPORTED_ENTITIES`]
pub fn is_entity_supported(entity_type: &str) -> bool {
    let upper = entity_type.to_uppercase();
    SUPPORTED_ENTITIES.contains(&upper.as_str())
}

/// List unsupported entity types, first occurrence order, without duplicates
pub fn validate_entities(entities: &[Entity]) -> EntityValidation {
    let mut unsupported_entities: Vec<String> = Vec::new();
    for entity in entities {
        if !is_entity_supported(&entity.entity_type)
            && !unsupported_entities.contains(&entity.entity_type)
        {
            unsupported_entities.push(entity.entity_type.clone());
        }
    }

    EntityValidation {
        valid: unsupported_entities.is_empty(),
        unsupported_entities,
    }
}

/// Count outer and inner face loops
pub fn solid_hints(entities: &[Entity]) -> SolidHints {
    entities
        .iter()
        .fold(SolidHints::default(), |mut hints, entity| {
            match entity.entity_type.as_str() {
                "FACE_OUTER_BOUND" => hints.outer_loops += 1,
                "FACE_BOUND" => hints.inner_loops += 1,
                _ => {}
            }
            hints
        })
}

/// Validate, scan and measure a STEP upload
pub fn parse_step_file(filename: &str, content: &str) -> Result<StepFile> {
    if !validate_step(content) {
        return Err(Error::InvalidFormat);
    }

    let entities = parse_entities(content);
    let points = extract_points(content);
    let bounding_box = bounding_box_of(&points);
    let upload_date = Utc::now();

    tracing::debug!(
        filename,
        entities = entities.len(),
        points = points.len(),
        "loaded STEP file"
    );

    Ok(StepFile {
        id: upload_date.timestamp_millis().to_string(),
        filename: filename.to_string(),
        size: content.len(),
        upload_date,
        entities,
        points,
        bounding_box,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    const MINIMAL: &str = "
        ISO-10303-21;
        HEADER;
        FILE_DESCRIPTION(('STEP file'),'2;1');
        FILE_NAME('test.step','2023-01-01',('',''),('',''),'','','');
        FILE_SCHEMA(('AUTOMOTIVE_DESIGN'));
        ENDSEC;
        DATA;
        #1 = CARTESIAN_POINT('',(0.0,0.0,0.0));
        ENDSEC;
        END-ISO-10303-21;
    ";

    #[test]
    fn test_validate_step() {
        assert!(validate_step(MINIMAL));
        assert!(validate_step(&MINIMAL.to_lowercase()));
        assert!(!validate_step("This is not a STEP file"));
        assert!(!validate_step(
            "ISO-10303-21;\nHEADER;\nFILE_DESCRIPTION(('STEP file'),'2;1');\nENDSEC;"
        ));
    }

    #[test]
    fn test_validate_step_ignores_order() {
        let shuffled = "data endsec file_schema file_name file_description header iso-10303-21";
        assert!(validate_step(shuffled));
    }

    #[test]
    fn test_parse_entities() {
        let content = "
            DATA;
            #1 = CARTESIAN_POINT('',(0.0,0.0,0.0));
            #2 = DIRECTION('',(1.0,0.0,0.0));
            #3 = LINE('',#1,#2);
            ENDSEC;
        ";
        let entities = parse_entities(content);

        assert_eq!(entities.len(), 3);
        assert_eq!(entities[0].id, 1);
        assert_eq!(entities[0].entity_type, "CARTESIAN_POINT");
        assert!(entities[0].references.is_empty());
        assert_eq!(entities[2].entity_type, "LINE");
        assert_eq!(entities[2].references, vec![1, 2]);
        assert_eq!(entities[2].parameters, vec!["''", "#1", "#2"]);
    }

    #[test]
    fn test_parse_entities_splits_nested_params_naively() {
        let content = "DATA;\n#1 = CARTESIAN_POINT('',(1.0,2.0,3.0));\nENDSEC;";
        let entities = parse_entities(content);
        assert_eq!(entities[0].parameters, vec!["''", "(1.0", "2.0", "3.0)"]);
    }

    #[test]
    fn test_duplicate_references_are_kept() {
        let content = "DATA;\n#9 = EDGE_LOOP('',(#4,#5,#4));\nENDSEC;";
        let entities = parse_entities(content);
        assert_eq!(entities[0].references, vec![4, 5, 4]);
    }

    #[test]
    fn test_empty_data_section() {
        assert!(parse_entities("DATA;\nENDSEC;").is_empty());
        assert!(parse_entities("no data marker at all").is_empty());
    }

    #[test]
    fn test_records_outside_data_section_are_ignored() {
        let content = "HEADER;\n#7 = FOO('x');\nENDSEC;\nDATA;\n#8 = BAR('y');\nENDSEC;";
        let entities = parse_entities(content);
        assert_eq!(entities.len(), 1);
        assert_eq!(entities[0].id, 8);
    }

    #[test]
    fn test_extract_points_coerces_bad_tokens() {
        let content = "#1 = CARTESIAN_POINT('a',(1.5,-2.,3.0E1));\n#2 = CARTESIAN_POINT('b', (abc,4.0,$));";
        let points = extract_points(content);

        assert_eq!(points.len(), 2);
        assert_eq!(points[0].position, Point3::new(1.5, -2.0, 30.0));
        assert_eq!(points[1].id, 2);
        assert_eq!(points[1].position, Point3::new(0.0, 4.0, 0.0));
    }

    #[test]
    fn test_bounding_box_of_points() {
        let content = "#1 = CARTESIAN_POINT('',(0.0,0.0,0.0));\n#2 = CARTESIAN_POINT('',(10.0,5.0,-2.0));";
        let bbox = bounding_box_of(&extract_points(content));
        assert_eq!(bbox.min(), Point3::new(0.0, 0.0, -2.0));
        assert_eq!(bbox.max(), Point3::new(10.0, 5.0, 0.0));

        assert_eq!(bounding_box_of(&[]), BoundingBox::zero());
    }

    #[test]
    fn test_entity_support() {
        assert!(is_entity_supported("CARTESIAN_POINT"));
        assert!(is_entity_supported("cartesian_point"));
        assert!(is_entity_supported("Circle"));
        assert!(!is_entity_supported("UNSUPPORTED_ENTITY"));
    }

    #[test]
    fn test_validate_entities_deduplicates() {
        let entity = |id, t: &str| Entity {
            id,
            entity_type: t.to_string(),
            parameters: Vec::new(),
            references: Vec::new(),
        };
        let result = validate_entities(&[
            entity(1, "UNSUPPORTED_TYPE"),
            entity(2, "CIRCLE"),
            entity(3, "UNSUPPORTED_TYPE"),
            entity(4, "ANOTHER_UNSUPPORTED"),
        ]);

        assert!(!result.valid);
        assert_eq!(
            result.unsupported_entities,
            vec!["UNSUPPORTED_TYPE", "ANOTHER_UNSUPPORTED"]
        );

        assert!(validate_entities(&[entity(1, "LINE")]).valid);
    }

    #[test]
    fn test_solid_hints() {
        let content = "DATA;\n#1 = FACE_OUTER_BOUND('',#2,.T.);\n#3 = FACE_BOUND('',#4,.T.);\nENDSEC;";
        let hints = solid_hints(&parse_entities(content));
        assert_eq!(hints.outer_loops, 1);
        assert_eq!(hints.inner_loops, 1);
        assert!(hints.has_pockets());
    }

    #[test]
    fn test_parse_step_file() {
        let step = parse_step_file("part.step", MINIMAL).unwrap();
        assert_eq!(step.filename, "part.step");
        assert_eq!(step.size, MINIMAL.len());
        assert_eq!(step.entities.len(), 1);
        assert_eq!(step.points.len(), 1);

        let err = parse_step_file("bad.step", "hello").unwrap_err();
        assert!(matches!(err, Error::InvalidFormat));
    }

    #[test]
    fn test_step_file_json_uses_host_keys() {
        let step = parse_step_file("part.step", MINIMAL).unwrap();
        let value = serde_json::to_value(&step).unwrap();

        assert!(value["uploadDate"].is_string());
        assert_eq!(value["boundingBox"]["max"], serde_json::json!({"x": 0.0, "y": 0.0, "z": 0.0}));
        assert_eq!(value["entities"][0]["type"], "CARTESIAN_POINT");
        assert_eq!(value["points"][0]["position"]["z"], 0.0);
        assert!(value.get("upload_date").is_none());

        let back: StepFile = serde_json::from_value(value).unwrap();
        assert_eq!(back.upload_date, step.upload_date);
        assert_eq!(back.bounding_box, step.bounding_box);

        let validation = serde_json::to_value(step.entity_validation()).unwrap();
        assert_eq!(validation["unsupportedEntities"], serde_json::json!([]));
    }
}
