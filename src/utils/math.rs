// SPDX-License-Identifier: Apache-2.0
// Copyright (c) 2025 Polyframe Inc.

//! Math utilities

use nalgebra::{Point2, Vector3};

/// Euclidean distance between two planar points
pub fn distance_2d(a: &Point2<f64>, b: &Point2<f64>) -> f64 {
    ((b.x - a.x).powi(2) + (b.y - a.y).powi(2)).sqrt()
}

/// Sum of segment lengths along a polyline.
///
/// The closing segment (last back to first) is only counted for closed
/// polylines with more than two points.
pub fn polyline_length(points: &[Point2<f64>], closed: bool) -> f64 {
    let mut length: f64 = points
        .windows(2)
        .map(|pair| distance_2d(&pair[0], &pair[1]))
        .sum();

    if closed && points.len() > 2 {
        length += distance_2d(&points[points.len() - 1], &points[0]);
    }

    length
}

/// Unsigned polygon area by the shoelace formula.
///
/// Polygons with fewer than three vertices have zero area.
pub fn shoelace_area(points: &[Point2<f64>]) -> f64 {
    if points.len() < 3 {
        return 0.0;
    }

    let mut twice_area = 0.0;
    for i in 0..points.len() {
        let j = (i + 1) % points.len();
        twice_area += points[i].x * points[j].y;
        twice_area -= points[j].x * points[i].y;
    }
    twice_area.abs() / 2.0
}

/// Normalize a vector, leaving a zero-length vector untouched
pub fn normalize_or_keep(v: Vector3<f64>) -> Vector3<f64> {
    let length = v.norm();
    if length > 0.0 {
        v / length
    } else {
        v
    }
}

/// Fixed-point formatting with exactly `precision` decimals.
///
/// Rounds the exact binary value to the nearest decimal, and exact halfway
/// cases away from zero, so output matches `Number.prototype.toFixed`.
/// Negative zero prints as positive zero; small negatives keep their sign.
pub fn format_fixed(value: f64, precision: usize) -> String {
    if value.is_nan() {
        return "NaN".to_string();
    }
    if value.is_infinite() {
        return if value > 0.0 { "Infinity" } else { "-Infinity" }.to_string();
    }

    let magnitude = value.abs();
    let mut digits = format!("{:.*}", precision, magnitude);

    // A halfway case always shows a trailing 5 one digit further out
    if format!("{:.*}", precision + 1, magnitude).ends_with('5') {
        if let Some(rounded) = round_half_up(magnitude, precision) {
            digits = rounded;
        }
    }

    if value < 0.0 {
        digits.insert(0, '-');
    }
    digits
}

/// Round an exact halfway `magnitude` up at `precision` decimals.
///
/// Returns `None` when the value is not exactly halfway.
fn round_half_up(magnitude: f64, precision: usize) -> Option<String> {
    // f64 fractions terminate within 1074 decimal places
    let exact = format!("{:.1074}", magnitude);
    let (whole, fraction) = exact.split_once('.')?;
    if fraction.len() <= precision {
        return None;
    }

    let (kept, rest) = fraction.split_at(precision);
    let mut rest = rest.bytes();
    if rest.next() != Some(b'5') || rest.any(|d| d != b'0') {
        return None;
    }

    let mut digits: Vec<u8> = whole.bytes().collect();
    if precision > 0 {
        digits.push(b'.');
        digits.extend(kept.bytes());
    }

    let mut carry = true;
    for digit in digits.iter_mut().rev() {
        match *digit {
            b'.' => continue,
            b'9' => *digit = b'0',
            _ => {
                *digit += 1;
                carry = false;
                break;
            }
        }
    }
    if carry {
        digits.insert(0, b'1');
    }

    String::from_utf8(digits).ok()
}
