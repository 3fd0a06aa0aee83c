//! Centerline generators shared by waveguide components.

use qgeom::path::dedup;
use qgeom::Point;

use crate::error::{ErrorSource, Result};

/// A meandered centerline from `start` to `end` with total length `length`.
///
/// The line runs straight along the axis from `start` to `end`, with `turns`
/// rectangular excursions alternating between the two sides. Each excursion
/// has the same depth, chosen so that the total length equals `length`.
/// With no turns, or no excess length, the line is straight.
pub fn meander(start: Point, end: Point, length: f64, turns: usize) -> Result<Vec<Point>> {
    let axis = end - start;
    let direct = axis.norm();
    let dir = axis.normalized().ok_or_else(|| {
        ErrorSource::InvalidOption(format!("meander endpoints coincide at {start}"))
    })?;
    if length + 1e-9 < direct {
        return Err(ErrorSource::InvalidOption(format!(
            "meander length {length} is shorter than its endpoint distance {direct}"
        ))
        .into());
    }
    let excess = length - direct;
    if turns == 0 || excess <= 1e-9 {
        return Ok(vec![start, end]);
    }

    let depth = excess / (2. * turns as f64);
    let pitch = direct / (turns as f64 + 1.);
    let tooth = pitch / 2.;
    let normal = dir.perp();

    let mut points = Vec::with_capacity(4 * turns + 2);
    points.push(start);
    for k in 1..=turns {
        let side = if k % 2 == 1 { 1. } else { -1. };
        let offset = normal * (depth * side);
        let s = pitch * k as f64;
        let a = start + dir * (s - tooth / 2.);
        let b = start + dir * (s + tooth / 2.);
        points.extend([a, a + offset, b + offset, b]);
    }
    points.push(end);
    Ok(dedup(&points))
}

/// A two-leg centerline from `start` to `end`, first vertical then horizontal.
pub fn elbow(start: Point, end: Point) -> Vec<Point> {
    dedup(&[start, Point::new(start.x, end.y), end])
}
