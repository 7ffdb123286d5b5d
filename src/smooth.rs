//! Rounds the corners of a polyline with quadratic curves.
//!
//! Every span between two kept points is shortened by [`CORNER_LENGTH`] at
//! both ends (never past its midpoint). Consecutive spans are then joined by
//! a quadratic whose control point is the original corner.

use crate::path::{distance, EdgePath};

pub const CORNER_LENGTH: f32 = 10.0;

fn corner_ratio(from: (f32, f32), to: (f32, f32)) -> f32 {
    let d = distance(from, to);
    if d == 0.0 {
        0.5
    } else {
        (CORNER_LENGTH / d).min(0.5)
    }
}

/// Point [`CORNER_LENGTH`] away from `from`, towards `to`.
pub fn span_start(from: (f32, f32), to: (f32, f32)) -> (f32, f32) {
    let rat = corner_ratio(from, to);
    (
        (1.0 - rat) * from.0 + rat * to.0,
        (1.0 - rat) * from.1 + rat * to.1,
    )
}

/// Point [`CORNER_LENGTH`] before `to`, coming from `from`.
pub fn span_end(from: (f32, f32), to: (f32, f32)) -> (f32, f32) {
    let rat = corner_ratio(from, to);
    (
        rat * from.0 + (1.0 - rat) * to.0,
        rat * from.1 + (1.0 - rat) * to.1,
    )
}

/// Drops points closer than `factor` to the previously kept point. The first
/// two and the last two inputs always survive.
pub fn collapse_points(factor: f32, points: &[(f32, f32)]) -> Vec<(f32, f32)> {
    let count = points.len();
    let mut kept: Vec<(f32, f32)> = Vec::with_capacity(count);
    for (i, &point) in points.iter().enumerate() {
        if let Some(&last) = kept.last() {
            if kept.len() > 1 && i + 2 < count && distance(last, point) < factor {
                continue;
            }
        }
        kept.push(point);
    }
    kept
}

/// Smoothed stroke through `points`.
///
/// With fewer than three points left after collapsing, the path is returned
/// untouched: it starts at the first point and has no segments. Otherwise it
/// holds `2 * (n - 1)` segments for `n` kept points and ends on the last one.
pub fn smoothed_path(factor: f32, points: &[(f32, f32)]) -> EdgePath {
    let Some(&first) = points.first() else {
        return EdgePath::new((0.0, 0.0));
    };
    let mut path = EdgePath::new(first);
    let kept = collapse_points(factor, points);
    if kept.len() < 3 {
        return path;
    }

    let last = kept.len() - 1;
    path.line_to(span_start(kept[0], kept[1]));
    for i in 1..last {
        path.line_to(span_end(kept[i - 1], kept[i]));
        path.quad_to(kept[i], span_start(kept[i], kept[i + 1]));
    }
    path.line_to(kept[last]);
    path
}
