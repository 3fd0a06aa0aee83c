//! Segment orientation, intersection, and distance primitives.

use super::{Point, Polygon, EPSILON};

/// The turn direction of an ordered point triple.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Orientation {
    Collinear,
    Clockwise,
    CounterClockwise,
}

/// Computes the orientation of the ordered triple `(p, q, r)`.
pub fn orientation(p: Point, q: Point, r: Point) -> Orientation {
    let val = (q - p).cross(r - q);
    if val.abs() <= EPSILON {
        Orientation::Collinear
    } else if val > 0. {
        Orientation::CounterClockwise
    } else {
        Orientation::Clockwise
    }
}

/// Given collinear `p`, `q`, `r`, checks whether `q` lies on segment `pr`.
fn on_segment(p: Point, q: Point, r: Point) -> bool {
    q.x <= p.x.max(r.x) + EPSILON
        && q.x >= p.x.min(r.x) - EPSILON
        && q.y <= p.y.max(r.y) + EPSILON
        && q.y >= p.y.min(r.y) - EPSILON
}

/// Returns `true` if segment `p1q1` and segment `p2q2` intersect (including touching).
pub fn segments_intersect(p1: Point, q1: Point, p2: Point, q2: Point) -> bool {
    use Orientation::Collinear;

    let o1 = orientation(p1, q1, p2);
    let o2 = orientation(p1, q1, q2);
    let o3 = orientation(p2, q2, p1);
    let o4 = orientation(p2, q2, q1);

    if o1 != o2 && o3 != o4 {
        return true;
    }

    (o1 == Collinear && on_segment(p1, p2, q1))
        || (o2 == Collinear && on_segment(p1, q2, q1))
        || (o3 == Collinear && on_segment(p2, p1, q2))
        || (o4 == Collinear && on_segment(p2, q1, q2))
}

/// Computes the single crossing point of segments `a0a1` and `b0b1`.
///
/// Returns [`None`] for disjoint or parallel (including overlapping collinear) segments.
pub fn segment_intersection(a0: Point, a1: Point, b0: Point, b1: Point) -> Option<Point> {
    let r = a1 - a0;
    let s = b1 - b0;
    let denom = r.cross(s);
    if denom.abs() <= EPSILON {
        return None;
    }
    let qp = b0 - a0;
    let t = qp.cross(s) / denom;
    let u = qp.cross(r) / denom;
    let tol = 1e-12;
    if (-tol..=1. + tol).contains(&t) && (-tol..=1. + tol).contains(&u) {
        Some(a0 + r * t)
    } else {
        None
    }
}

/// Computes every crossing point between two polylines, in order along `a`.
pub fn polyline_intersections(a: &[Point], b: &[Point]) -> Vec<Point> {
    let mut out: Vec<Point> = Vec::new();
    for sa in a.windows(2) {
        for sb in b.windows(2) {
            if let Some(p) = segment_intersection(sa[0], sa[1], sb[0], sb[1]) {
                // A crossing exactly at a shared vertex is reported by two segment pairs.
                if !out.iter().any(|q| q.approx_eq(p, 1e-9)) {
                    out.push(p);
                }
            }
        }
    }
    out
}

/// Shortest distance from `pt` to the segment `ab`.
pub fn point_segment_distance(pt: Point, a: Point, b: Point) -> f64 {
    let ab = b - a;
    let len2 = ab.dot(ab);
    if len2 <= EPSILON * EPSILON {
        return pt.distance(a);
    }
    let t = ((pt - a).dot(ab) / len2).clamp(0., 1.);
    pt.distance(a + ab * t)
}

/// Returns `true` if two polygons overlap.
///
/// Checks every edge pair with the orientation test,
/// then full containment of one polygon by the other.
pub fn polygons_intersect(a: &Polygon, b: &Polygon) -> bool {
    for (p1, q1) in a.edges() {
        for (p2, q2) in b.edges() {
            if segments_intersect(p1, q1, p2, q2) {
                return true;
            }
        }
    }
    match (a.points.first(), b.points.first()) {
        (Some(pa), Some(pb)) => b.contains(*pa) || a.contains(*pb),
        _ => false,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::Rect;

    #[test]
    fn test_segments_cross() {
        let p = segment_intersection(
            Point::new(0., 0.),
            Point::new(10., 10.),
            Point::new(0., 10.),
            Point::new(10., 0.),
        )
        .unwrap();
        assert!(p.approx_eq(Point::new(5., 5.), 1e-12));
        assert!(segments_intersect(
            Point::new(0., 0.),
            Point::new(10., 10.),
            Point::new(0., 10.),
            Point::new(10., 0.),
        ));
    }

    #[test]
    fn test_segments_disjoint() {
        assert!(segment_intersection(
            Point::new(0., 0.),
            Point::new(1., 0.),
            Point::new(0., 1.),
            Point::new(1., 1.),
        )
        .is_none());
        assert!(!segments_intersect(
            Point::new(0., 0.),
            Point::new(1., 0.),
            Point::new(2., -1.),
            Point::new(2., 1.),
        ));
    }

    #[test]
    fn test_collinear_touching() {
        assert!(segments_intersect(
            Point::new(0., 0.),
            Point::new(2., 0.),
            Point::new(2., 0.),
            Point::new(4., 0.),
        ));
    }

    #[test]
    fn test_polyline_shared_vertex_reported_once() {
        let a = [Point::new(0., 5.), Point::new(5., 5.), Point::new(10., 5.)];
        let b = [Point::new(5., 0.), Point::new(5., 10.)];
        let hits = polyline_intersections(&a, &b);
        assert_eq!(hits.len(), 1);
        assert!(hits[0].approx_eq(Point::new(5., 5.), 1e-12));
    }

    #[test]
    fn test_polygons_intersect() {
        let a = Rect::new(Point::zero(), Point::new(4., 4.)).to_polygon();
        let b = Rect::new(Point::new(3., 3.), Point::new(6., 6.)).to_polygon();
        let c = Rect::new(Point::new(1., 1.), Point::new(2., 2.)).to_polygon();
        let d = Rect::new(Point::new(10., 10.), Point::new(11., 11.)).to_polygon();
        assert!(polygons_intersect(&a, &b));
        assert!(polygons_intersect(&a, &c));
        assert!(!polygons_intersect(&a, &d));
    }
}
