// SPDX-License-Identifier: Apache-2.0
// Copyright (c) 2025 Polyframe Inc.

//! Curve reconstruction from an unordered point set

use super::{Curve2D, CurveKind};
use crate::utils::distance_2d;
use nalgebra::Point2;

/// Chain points into polylines by greedy nearest-neighbour walks.
///
/// Each unused point seeds a curve that keeps absorbing the closest unused
/// point within `tolerance` of its tail. A curve with more than two points
/// whose ends meet within `tolerance` is closed and its duplicate tail point
/// dropped. Single-point curves are discarded.
///
/// The partition depends on input order but is deterministic for a given
/// order.
pub fn connect_points(points: &[Point2<f64>], tolerance: f64) -> Vec<Curve2D> {
    if points.len() < 2 {
        return Vec::new();
    }

    let mut curves = Vec::new();
    let mut used = vec![false; points.len()];

    for start in 0..points.len() {
        if used[start] {
            continue;
        }

        used[start] = true;
        let mut chain = vec![points[start]];
        let mut current = points[start];

        while let Some(next) = nearest_unused(points, &used, &current, tolerance) {
            used[next] = true;
            current = points[next];
            chain.push(current);
        }

        let mut closed = false;
        if chain.len() > 2 {
            let first = chain[0];
            let last = chain[chain.len() - 1];
            if distance_2d(&first, &last) < tolerance {
                closed = true;
                chain.pop();
            }
        }

        if chain.len() > 1 {
            curves.push(Curve2D {
                kind: CurveKind::Line,
                points: chain,
                closed,
            });
        }
    }

    tracing::debug!(
        points = points.len(),
        curves = curves.len(),
        "chained intersection points"
    );
    curves
}

/// Index of the closest unused point strictly within `tolerance`; ties keep
/// the lowest index
fn nearest_unused(
    points: &[Point2<f64>],
    used: &[bool],
    current: &Point2<f64>,
    tolerance: f64,
) -> Option<usize> {
    let mut nearest = None;
    let mut nearest_distance = f64::INFINITY;

    for (j, point) in points.iter().enumerate() {
        if used[j] {
            continue;
        }
        let distance = distance_2d(current, point);
        if distance < tolerance && distance < nearest_distance {
            nearest_distance = distance;
            nearest = Some(j);
        }
    }

    nearest
}

/// Drop interior points that sit on the line through their neighbours.
///
/// Single left-to-right pass: each interior point is tested against its
/// original predecessor and successor, not the last kept point. The first
/// point is always kept, the last only on open curves. Curves of two points
/// or fewer are returned unchanged.
pub fn simplify_curves(curves: Vec<Curve2D>, tolerance: f64) -> Vec<Curve2D> {
    curves
        .into_iter()
        .map(|curve| simplify_curve(curve, tolerance))
        .collect()
}

fn simplify_curve(curve: Curve2D, tolerance: f64) -> Curve2D {
    if curve.points.len() <= 2 {
        return curve;
    }

    let points = &curve.points;
    let mut simplified = vec![points[0]];

    for window in points.windows(3) {
        if !is_point_on_line(&window[0], &window[1], &window[2], tolerance) {
            simplified.push(window[1]);
        }
    }

    if !curve.closed {
        simplified.push(points[points.len() - 1]);
    }

    Curve2D {
        points: simplified,
        ..curve
    }
}

/// Whether `point` lies within `tolerance` of the line through `start` and
/// `end`. A degenerate (shorter than `tolerance`) line counts as collinear.
fn is_point_on_line(
    start: &Point2<f64>,
    point: &Point2<f64>,
    end: &Point2<f64>,
    tolerance: f64,
) -> bool {
    let line_length = distance_2d(start, end);
    if line_length < tolerance {
        return true;
    }

    let distance = ((end.y - start.y) * point.x - (end.x - start.x) * point.y + end.x * start.y
        - end.y * start.x)
        .abs()
        / line_length;

    distance < tolerance
}

#[cfg(test)]
mod tests {
    use super::*;

    fn p(x: f64, y: f64) -> Point2<f64> {
        Point2::new(x, y)
    }

    #[test]
    fn test_fewer_than_two_points() {
        assert!(connect_points(&[], 1.0).is_empty());
        assert!(connect_points(&[p(0.0, 0.0)], 1.0).is_empty());
    }

    #[test]
    fn test_square_ring_closes() {
        let ring = [
            p(0.0, 0.0),
            p(1.0, 0.0),
            p(2.0, 0.0),
            p(2.0, 1.0),
            p(2.0, 2.0),
            p(1.0, 2.0),
            p(0.0, 2.0),
            p(0.0, 1.0),
        ];

        let curves = connect_points(&ring, 1.5);

        assert_eq!(curves.len(), 1);
        assert!(curves[0].closed);
        // the tail (0,1) is within tolerance of the start and gets dropped
        assert_eq!(curves[0].points.len(), 7);
        assert_eq!(curves[0].points[0], p(0.0, 0.0));
        assert_eq!(curves[0].kind, CurveKind::Line);
    }

    #[test]
    fn test_open_run_and_isolated_point() {
        let points = [p(0.0, 0.0), p(1.0, 0.0), p(2.0, 0.0), p(50.0, 50.0)];

        let curves = connect_points(&points, 1.5);

        // the isolated point forms a one-point curve and is discarded
        assert_eq!(curves.len(), 1);
        assert!(!curves[0].closed);
        assert_eq!(curves[0].points, vec![p(0.0, 0.0), p(1.0, 0.0), p(2.0, 0.0)]);
    }

    #[test]
    fn test_two_points_never_close() {
        let curves = connect_points(&[p(0.0, 0.0), p(0.5, 0.0)], 1.0);
        assert_eq!(curves.len(), 1);
        assert!(!curves[0].closed);
        assert_eq!(curves[0].points.len(), 2);
    }

    #[test]
    fn test_distance_equal_to_tolerance_does_not_link() {
        assert!(connect_points(&[p(0.0, 0.0), p(1.0, 0.0)], 1.0).is_empty());
    }

    #[test]
    fn test_walk_picks_nearest_not_first() {
        let points = [p(0.0, 0.0), p(0.9, 0.0), p(0.3, 0.0)];
        let curves = connect_points(&points, 1.0);
        assert_eq!(curves[0].points, vec![p(0.0, 0.0), p(0.3, 0.0), p(0.9, 0.0)]);
    }

    #[test]
    fn test_chaining_is_deterministic() {
        let points: Vec<_> = (0..40)
            .map(|i| {
                let angle = i as f64 * std::f64::consts::TAU / 40.0;
                p(10.0 * angle.cos(), 10.0 * angle.sin())
            })
            .collect();

        let first = connect_points(&points, 2.0);
        let second = connect_points(&points, 2.0);
        assert_eq!(first, second);
    }

    #[test]
    fn test_simplify_drops_collinear_interior_points() {
        let curve = Curve2D::open(vec![p(0.0, 0.0), p(5.0, 0.0), p(10.0, 0.0), p(10.0, 10.0)]);

        let simplified = simplify_curves(vec![curve], 0.01);

        assert_eq!(
            simplified[0].points,
            vec![p(0.0, 0.0), p(10.0, 0.0), p(10.0, 10.0)]
        );
    }

    #[test]
    fn test_simplify_closed_drops_last_point() {
        let curve = Curve2D::closed(vec![p(0.0, 0.0), p(10.0, 0.0), p(10.0, 10.0), p(0.0, 10.0)]);

        let simplified = simplify_curves(vec![curve], 0.01);

        // the last point is never re-added for closed curves
        assert_eq!(
            simplified[0].points,
            vec![p(0.0, 0.0), p(10.0, 0.0), p(10.0, 10.0)]
        );
        assert!(simplified[0].closed);
    }

    #[test]
    fn test_simplify_single_pass_uses_original_neighbours() {
        // each interior point is tested against its original neighbours, so a
        // run of collinear points collapses in one pass
        let curve = Curve2D::open(vec![
            p(0.0, 0.0),
            p(1.0, 0.0),
            p(2.0, 0.0),
            p(3.0, 0.0),
            p(4.0, 0.0),
        ]);

        let simplified = simplify_curves(vec![curve], 0.01);
        assert_eq!(simplified[0].points, vec![p(0.0, 0.0), p(4.0, 0.0)]);
    }

    #[test]
    fn test_simplify_degenerate_neighbour_span() {
        // prev and next coincide: treated as collinear and the spike is dropped
        let curve = Curve2D::open(vec![p(0.0, 0.0), p(5.0, 5.0), p(0.0, 0.0)]);
        let simplified = simplify_curves(vec![curve], 0.01);
        assert_eq!(simplified[0].points, vec![p(0.0, 0.0), p(0.0, 0.0)]);
    }

    #[test]
    fn test_simplify_leaves_short_curves() {
        let curve = Curve2D::closed(vec![p(0.0, 0.0), p(1.0, 1.0)]);
        let simplified = simplify_curves(vec![curve.clone()], 0.01);
        assert_eq!(simplified[0], curve);
    }
}
