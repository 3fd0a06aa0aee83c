//! Open polylines with a conductor width, and their rounded-corner outlines.

use serde::{Deserialize, Serialize};

use super::bbox::{Bbox, BoundBox};
use super::transform::{Transform, Transformation};
use super::{Point, Polygon, EPSILON};

/// An open-ended geometric path with non-zero width.
///
/// Primarily consists of a series of ordered [`Point`]s.
#[derive(Debug, Default, Clone, Serialize, Deserialize, PartialEq)]
pub struct Path {
    pub points: Vec<Point>,
    pub width: f64,
}

impl Path {
    pub fn new(points: Vec<Point>, width: f64) -> Self {
        Self { points, width }
    }

    /// Iterates over the straight runs between consecutive vertices.
    pub fn segments(&self) -> impl Iterator<Item = (Point, Point)> + '_ {
        self.points.windows(2).map(|w| (w[0], w[1]))
    }

    /// Total centerline length.
    pub fn length(&self) -> f64 {
        self.segments().map(|(a, b)| a.distance(b)).sum()
    }

    /// Replaces each interior vertex with a circular arc of radius `radius`.
    ///
    /// Arcs are discretized so that no arc step exceeds `max_step` radians.
    /// When two neighboring segments are too short to host the full arc,
    /// the arc radius is reduced so that each arc consumes at most half of a segment.
    pub fn fillet(&self, radius: f64, max_step: f64) -> Vec<Point> {
        let pts = dedup(&self.points);
        if pts.len() < 3 || radius <= EPSILON {
            return pts;
        }
        let max_step = if max_step > EPSILON { max_step } else { 0.1 };
        let mut out = Vec::with_capacity(pts.len() * 8);
        out.push(pts[0]);
        for w in pts.windows(3) {
            let (prev, v, next) = (w[0], w[1], w[2]);
            let (a, b) = match ((v - prev).normalized(), (next - v).normalized()) {
                (Some(a), Some(b)) => (a, b),
                _ => {
                    out.push(v);
                    continue;
                }
            };
            let turn = a.cross(b).atan2(a.dot(b));
            let half_tan = (turn.abs() / 2.).tan();
            if turn.abs() < 1e-9 || !half_tan.is_finite() || half_tan > 1e6 {
                out.push(v);
                continue;
            }
            let max_t = v.distance(prev).min(v.distance(next)) / 2.;
            let t = (radius * half_tan).min(max_t);
            let r = t / half_tan;
            let start = v - a * t;
            let normal = if turn > 0. { a.perp() } else { -a.perp() };
            let center = start + normal * r;
            let from = start - center;
            let steps = (turn.abs() / max_step).ceil().max(1.) as usize;
            for k in 0..=steps {
                out.push(center + from.rotated_rad(turn * k as f64 / steps as f64));
            }
        }
        out.push(pts[pts.len() - 1]);
        dedup(&out)
    }

    /// The outline polygon of the path with bends rounded at `radius`.
    pub fn outline(&self, radius: f64, max_step: f64) -> Polygon {
        let center = self.fillet(radius, max_step);
        strip(&center, -self.width / 2., self.width / 2.)
    }
}

impl BoundBox for Path {
    fn bbox(&self) -> Bbox {
        let mut bbox = self.points.bbox();
        if !bbox.is_empty() {
            bbox.expand(self.width / 2.);
        }
        bbox
    }
}

impl Transform for Path {
    fn transform(&self, trans: Transformation) -> Self {
        Self {
            points: self.points.iter().map(|p| p.transform(trans)).collect(),
            width: self.width,
        }
    }
}

/// Removes consecutive (near) duplicate points.
pub fn dedup(points: &[Point]) -> Vec<Point> {
    let mut out: Vec<Point> = Vec::with_capacity(points.len());
    for p in points {
        match out.last() {
            Some(last) if last.approx_eq(*p, 1e-9) => {}
            _ => out.push(*p),
        }
    }
    out
}

/// Offsets a polyline sideways by `dist`; positive distances move to the left of travel.
///
/// Interior vertices use mitered joins. Zero-length polylines are returned unchanged.
pub fn offset_polyline(points: &[Point], dist: f64) -> Vec<Point> {
    let pts = dedup(points);
    if pts.len() < 2 {
        return pts;
    }
    let normals: Vec<Point> = pts
        .windows(2)
        .map(|w| (w[1] - w[0]).normalized().unwrap_or_default().perp())
        .collect();
    let last = normals.len() - 1;
    pts.iter()
        .enumerate()
        .map(|(i, p)| {
            let n = if i == 0 {
                normals[0]
            } else if i > last {
                normals[last]
            } else {
                let (n0, n1) = (normals[i - 1], normals[i]);
                match (n0 + n1).normalized() {
                    Some(m) => {
                        // Limit the miter on very sharp joins.
                        let cos = m.dot(n1).max(0.25);
                        return *p + m * (dist / cos);
                    }
                    None => n1,
                }
            };
            *p + n * dist
        })
        .collect()
}

/// The polygon between two sideways offsets `inner` and `outer` of a polyline.
pub fn strip(points: &[Point], inner: f64, outer: f64) -> Polygon {
    let mut poly = offset_polyline(points, outer);
    let mut back = offset_polyline(points, inner);
    back.reverse();
    poly.extend(back);
    Polygon::new(poly)
}

/// The interior angle at `v` between the edges towards `prev` and `next`, in radians.
///
/// A straight continuation has an interior angle of pi; a right-angle bend pi / 2.
pub fn interior_angle(prev: Point, v: Point, next: Point) -> Option<f64> {
    let a = (prev - v).normalized()?;
    let b = (next - v).normalized()?;
    Some(a.cross(b).abs().atan2(a.dot(b)))
}

#[cfg(test)]
mod tests {
    use std::f64::consts::{FRAC_PI_2, PI};

    use float_eq::assert_float_eq;

    use super::*;

    fn elbow() -> Path {
        Path::new(
            vec![
                Point::new(0., 0.),
                Point::new(0., 100.),
                Point::new(100., 100.),
            ],
            4.,
        )
    }

    #[test]
    fn test_fillet_right_angle() {
        let pts = elbow().fillet(16., PI / 32.);
        assert_eq!(pts[0], Point::new(0., 0.));
        assert!(pts.iter().any(|p| p.approx_eq(Point::new(0., 84.), 1e-9)));
        assert!(pts.last().unwrap().approx_eq(Point::new(100., 100.), 1e-9));
        // Every arc point is 16 from the arc center at (16, 84).
        let center = Point::new(16., 84.);
        for p in pts.iter().filter(|p| p.y > 84. && p.x < 16.) {
            assert_float_eq!(p.distance(center), 16., abs <= 1e-9);
        }
        // The arc midpoint lies on the bisector.
        let mid = center + Point::new(-1., 1.) * (16. / 2f64.sqrt());
        assert!(pts.iter().any(|p| p.approx_eq(mid, 1e-9)));
    }

    #[test]
    fn test_fillet_short_segments_shrink_radius() {
        let path = Path::new(
            vec![Point::new(0., 0.), Point::new(0., 10.), Point::new(10., 10.)],
            1.,
        );
        let pts = path.fillet(100., PI / 16.);
        // The arc may use at most half of each segment.
        assert!(pts.iter().any(|p| p.approx_eq(Point::new(0., 5.), 1e-9)));
        assert!(pts.iter().any(|p| p.approx_eq(Point::new(5., 10.), 1e-9)));
    }

    #[test]
    fn test_outline_contains_centerline() {
        let path = elbow();
        let outline = path.outline(16., PI / 32.);
        for p in path.fillet(16., PI / 32.) {
            assert!(outline.contains(p));
        }
        assert!(!outline.contains(Point::new(10., 50.)));
        assert_float_eq!(outline.distance_to(Point::new(10., 50.)), 8., abs <= 1e-9);
    }

    #[test]
    fn test_offset_straight() {
        let pts = offset_polyline(&[Point::new(0., 0.), Point::new(10., 0.)], 2.);
        assert_eq!(pts, vec![Point::new(0., 2.), Point::new(10., 2.)]);
    }

    #[test]
    fn test_interior_angle() {
        let right = interior_angle(Point::new(0., 0.), Point::new(0., 1.), Point::new(1., 1.));
        assert_float_eq!(right.unwrap(), FRAC_PI_2, abs <= 1e-12);
        let straight =
            interior_angle(Point::new(0., 0.), Point::new(0., 1.), Point::new(0., 2.));
        assert_float_eq!(straight.unwrap(), PI, abs <= 1e-12);
        assert!(interior_angle(Point::zero(), Point::zero(), Point::new(1., 0.)).is_none());
    }
}
