// SPDX-License-Identifier: Apache-2.0
// Copyright (c) 2025 Polyframe Inc.

//! Machine compatibility checks for exported SVG text.
//!
//! The checks are textual scans of the whole document, not an XML parse:
//! a document that never went through the serializer is still checked the
//! same way.

use super::config::MachineProfile;
use super::types::SvgValidationReport;

const NAMESPACE_DECLARATION: &str = r#"xmlns="http://www.w3.org/2000/svg""#;
const STROKE_WIDTH_ATTRIBUTE: &str = r#"stroke-width=""#;

/// Letters of path commands the cutter may not support
const UNSUPPORTED_COMMANDS: [char; 6] = ['Q', 'S', 'T', 'A', 'H', 'V'];

/// Validate against the default machine profile
pub fn validate_svg(svg: &str) -> SvgValidationReport {
    validate_svg_with(svg, &MachineProfile::default())
}

pub fn validate_svg_with(svg: &str, machine: &MachineProfile) -> SvgValidationReport {
    let mut warnings = Vec::new();
    let mut errors = Vec::new();

    if !svg.contains(NAMESPACE_DECLARATION) {
        errors.push("Missing SVG namespace declaration".to_string());
    }

    if !svg.contains("viewBox=") {
        warnings.push("Missing viewBox attribute - may cause scaling issues".to_string());
    }

    // any occurrence counts, including text content
    if svg.contains(UNSUPPORTED_COMMANDS) {
        warnings.push("Contains potentially unsupported path commands".to_string());
    }

    if !contains_hex_color(svg) {
        warnings.push("No valid hex colors found".to_string());
    }

    for value in stroke_width_values(svg) {
        let Some(width) = parse_leading_float(value) else {
            continue;
        };
        if !machine.stroke_in_range(width) {
            warnings.push(format!(
                "Line weight {} may be outside optimal range ({:?}-{:?}mm)",
                width, machine.min_stroke_width, machine.max_stroke_width
            ));
        }
    }

    tracing::debug!(
        warnings = warnings.len(),
        errors = errors.len(),
        machine = %machine.name,
        "validated svg"
    );
    SvgValidationReport::from_findings(warnings, errors)
}

/// `#` followed by six hex digits anywhere in the text
fn contains_hex_color(svg: &str) -> bool {
    let bytes = svg.as_bytes();
    bytes.iter().enumerate().any(|(i, &b)| {
        b == b'#'
            && bytes
                .get(i + 1..i + 7)
                .is_some_and(|digits| digits.iter().all(u8::is_ascii_hexdigit))
    })
}

/// Non-empty values of every `stroke-width="..."` attribute, in order
fn stroke_width_values(svg: &str) -> Vec<&str> {
    let mut values = Vec::new();
    let mut rest = svg;

    while let Some(start) = rest.find(STROKE_WIDTH_ATTRIBUTE) {
        let after = &rest[start + STROKE_WIDTH_ATTRIBUTE.len()..];
        let Some(end) = after.find('"') else {
            break;
        };
        if end > 0 {
            values.push(&after[..end]);
            rest = &after[end + 1..];
        } else {
            // empty value: resume right after the opening quote
            rest = after;
        }
    }

    values
}

/// Longest numeric prefix of `value`, so `"0.5mm"` reads as 0.5
fn parse_leading_float(value: &str) -> Option<f64> {
    let trimmed = value.trim_start();
    let candidate_len = trimmed
        .char_indices()
        .take_while(|(_, c)| c.is_ascii_digit() || matches!(c, '.' | '-' | '+' | 'e' | 'E'))
        .last()
        .map_or(0, |(i, c)| i + c.len_utf8());

    (1..=candidate_len)
        .rev()
        .find_map(|len| trimmed[..len].parse::<f64>().ok())
}
