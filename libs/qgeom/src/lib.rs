//! Core geometric types and their operations/attributes.
//!
//! All coordinates are real-valued layout units (micrometers by convention).

use std::fmt::Display;
use std::str::FromStr;

use enum_dispatch::enum_dispatch;
use serde::{Deserialize, Serialize};
use thiserror::Error;
use transform::{Transform, Transformation};

use self::bbox::{Bbox, BoundBox};

pub mod bbox;
pub mod intersect;
pub mod path;
pub mod transform;

/// Tolerance used for degenerate-geometry and on-boundary checks.
pub const EPSILON: f64 = 1e-9;

/// A point in two-dimensional layout-space.
///
/// Serializes as an `(x, y)` pair.
#[derive(Debug, Copy, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(from = "(f64, f64)", into = "(f64, f64)")]
pub struct Point {
    pub x: f64,
    pub y: f64,
}

impl Point {
    /// Creates a new [`Point`] from (x,y) coordinates.
    #[inline]
    pub const fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    /// Returns the origin, (0, 0).
    #[inline]
    pub const fn zero() -> Self {
        Self { x: 0., y: 0. }
    }

    /// The Euclidean length of the vector from the origin to this point.
    #[inline]
    pub fn norm(&self) -> f64 {
        self.x.hypot(self.y)
    }

    #[inline]
    pub fn dot(&self, other: Point) -> f64 {
        self.x * other.x + self.y * other.y
    }

    /// The z-component of the cross product of `self` and `other`.
    #[inline]
    pub fn cross(&self, other: Point) -> f64 {
        self.x * other.y - self.y * other.x
    }

    /// Euclidean distance between two points.
    #[inline]
    pub fn distance(&self, other: Point) -> f64 {
        (*self - other).norm()
    }

    /// Returns a unit vector in the direction of `self`,
    /// or [`None`] if `self` has (near) zero length.
    pub fn normalized(&self) -> Option<Self> {
        let n = self.norm();
        if n < EPSILON {
            None
        } else {
            Some(Self::new(self.x / n, self.y / n))
        }
    }

    /// The vector rotated 90 degrees counter-clockwise.
    #[inline]
    pub fn perp(&self) -> Self {
        Self::new(-self.y, self.x)
    }

    /// Rotates the vector counter-clockwise about the origin by `angle` radians.
    pub fn rotated_rad(&self, angle: f64) -> Self {
        let (sin, cos) = angle.sin_cos();
        Self::new(self.x * cos - self.y * sin, self.x * sin + self.y * cos)
    }

    /// Rotates the vector counter-clockwise about the origin by `angle` degrees.
    #[inline]
    pub fn rotated(&self, angle: f64) -> Self {
        self.rotated_rad(angle.to_radians())
    }

    /// Rotates the point counter-clockwise about `center` by `angle` degrees.
    pub fn rotated_about(&self, center: Point, angle: f64) -> Self {
        center + (*self - center).rotated(angle)
    }

    /// The angle of this vector from the positive x-axis, in degrees.
    #[inline]
    pub fn angle(&self) -> f64 {
        self.y.atan2(self.x).to_degrees()
    }

    /// Returns `true` if both coordinates are within `tol` of `other`'s.
    pub fn approx_eq(&self, other: Point, tol: f64) -> bool {
        (self.x - other.x).abs() <= tol && (self.y - other.y).abs() <= tol
    }

    /// Returns `true` if both coordinates are finite.
    pub fn is_finite(&self) -> bool {
        self.x.is_finite() && self.y.is_finite()
    }
}

impl std::ops::Add<Point> for Point {
    type Output = Self;
    fn add(self, rhs: Point) -> Self::Output {
        Self::new(self.x + rhs.x, self.y + rhs.y)
    }
}

impl std::ops::AddAssign<Point> for Point {
    fn add_assign(&mut self, rhs: Point) {
        self.x += rhs.x;
        self.y += rhs.y;
    }
}

impl std::ops::Sub<Point> for Point {
    type Output = Self;
    fn sub(self, rhs: Point) -> Self::Output {
        Self::new(self.x - rhs.x, self.y - rhs.y)
    }
}

impl std::ops::SubAssign<Point> for Point {
    fn sub_assign(&mut self, rhs: Point) {
        self.x -= rhs.x;
        self.y -= rhs.y;
    }
}

impl std::ops::Mul<f64> for Point {
    type Output = Self;
    fn mul(self, rhs: f64) -> Self::Output {
        Self::new(self.x * rhs, self.y * rhs)
    }
}

impl std::ops::Neg for Point {
    type Output = Self;
    fn neg(self) -> Self::Output {
        Self::new(-self.x, -self.y)
    }
}

impl From<(f64, f64)> for Point {
    fn from(value: (f64, f64)) -> Self {
        Self {
            x: value.0,
            y: value.1,
        }
    }
}

impl From<Point> for (f64, f64) {
    fn from(value: Point) -> Self {
        (value.x, value.y)
    }
}

impl Display for Point {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "({}, {})", self.x, self.y)
    }
}

/// An enumeration of compass sides.
///
/// Used both for the sides of an axis-aligned rectangle and for the relative
/// position of two neighbors on an integer grid.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, Hash, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum Side {
    Top,
    Right,
    Bot,
    Left,
}

impl Side {
    /// Returns the opposite side.
    pub fn other(&self) -> Self {
        match self {
            Side::Top => Side::Bot,
            Side::Right => Side::Left,
            Side::Bot => Side::Top,
            Side::Left => Side::Right,
        }
    }

    /// The unit vector pointing towards this side.
    pub fn unit(&self) -> Point {
        match self {
            Side::Top => Point::new(0., 1.),
            Side::Right => Point::new(1., 0.),
            Side::Bot => Point::new(0., -1.),
            Side::Left => Point::new(-1., 0.),
        }
    }

    /// Returns the side as a lowercase string.
    pub fn as_str(&self) -> &'static str {
        match self {
            Side::Top => "top",
            Side::Right => "right",
            Side::Bot => "bot",
            Side::Left => "left",
        }
    }
}

impl std::ops::Not for Side {
    type Output = Self;
    /// Exclamation Operator returns the opposite side
    fn not(self) -> Self::Output {
        self.other()
    }
}

impl Display for Side {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

#[derive(Debug, Clone, Eq, PartialEq, Error)]
#[error("error parsing side `{original}`; expected one of left, right, top, bot")]
pub struct SideParseError {
    original: String,
}

impl FromStr for Side {
    type Err = SideParseError;
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "top" | "t" => Ok(Self::Top),
            "right" | "r" => Ok(Self::Right),
            "bot" | "bottom" | "b" => Ok(Self::Bot),
            "left" | "l" => Ok(Self::Left),
            _ => Err(SideParseError {
                original: s.to_string(),
            }),
        }
    }
}

/// An axis-aligned rectangle, specified by lower-left and upper-right corners.
#[derive(Debug, Default, Copy, Clone, Serialize, Deserialize, PartialEq)]
pub struct Rect {
    /// The lower-left corner.
    pub p0: Point,
    /// The upper-right corner.
    pub p1: Point,
}

impl Rect {
    /// Creates a new rectangle from two opposite corners.
    pub fn new(p0: Point, p1: Point) -> Self {
        Self {
            p0: Point::new(p0.x.min(p1.x), p0.y.min(p1.y)),
            p1: Point::new(p0.x.max(p1.x), p0.y.max(p1.y)),
        }
    }

    /// Creates a rectangle of the given dimensions centered on `center`.
    pub fn from_center_dims(center: Point, width: f64, height: f64) -> Self {
        let half = Point::new(width.abs() / 2., height.abs() / 2.);
        Self::new(center - half, center + half)
    }

    /// Returns the center point of the rectangle.
    pub fn center(&self) -> Point {
        Point::new((self.p0.x + self.p1.x) / 2., (self.p0.y + self.p1.y) / 2.)
    }

    #[inline]
    pub fn width(&self) -> f64 {
        self.p1.x - self.p0.x
    }

    #[inline]
    pub fn height(&self) -> f64 {
        self.p1.y - self.p0.y
    }

    /// Returns `true` if the point lies inside or on the boundary of the rectangle.
    pub fn contains(&self, pt: Point) -> bool {
        self.p0.x <= pt.x && pt.x <= self.p1.x && self.p0.y <= pt.y && pt.y <= self.p1.y
    }

    /// The four corners, counter-clockwise from the lower-left.
    pub fn corners(&self) -> [Point; 4] {
        [
            self.p0,
            Point::new(self.p1.x, self.p0.y),
            self.p1,
            Point::new(self.p0.x, self.p1.y),
        ]
    }

    pub fn to_polygon(&self) -> Polygon {
        Polygon::new(self.corners().to_vec())
    }
}

impl BoundBox for Rect {
    fn bbox(&self) -> Bbox {
        Bbox::new(self.p0, self.p1)
    }
}

/// A closed n-sided polygon with arbitrary number of vertices.
///
/// Closure from the last point back to the first is implied;
/// the initial point need not be repeated at the end.
#[derive(Debug, Default, Clone, Serialize, Deserialize, PartialEq)]
pub struct Polygon {
    pub points: Vec<Point>,
}

impl Polygon {
    pub fn new(points: Vec<Point>) -> Self {
        Self { points }
    }

    /// Iterates over the closed edges of the polygon.
    pub fn edges(&self) -> impl Iterator<Item = (Point, Point)> + '_ {
        let n = self.points.len();
        (0..n).map(move |i| (self.points[i], self.points[(i + 1) % n]))
    }

    /// The signed area of the polygon; positive for counter-clockwise winding.
    pub fn signed_area(&self) -> f64 {
        self.edges().map(|(a, b)| a.cross(b)).sum::<f64>() / 2.
    }

    #[inline]
    pub fn area(&self) -> f64 {
        self.signed_area().abs()
    }

    /// Returns `true` if the point lies inside or on the boundary of the polygon.
    ///
    /// Uses the winding-number test: a non-zero winding number means the point is enclosed.
    pub fn contains(&self, pt: Point) -> bool {
        if self.points.is_empty() {
            return false;
        }
        if self
            .edges()
            .any(|(a, b)| intersect::point_segment_distance(pt, a, b) <= EPSILON)
        {
            return true;
        }
        let mut winding_num = 0i64;
        for (a, b) in self.edges() {
            let side = (b - a).cross(pt - a);
            if a.y <= pt.y {
                if b.y > pt.y && side > 0. {
                    winding_num += 1;
                }
            } else if b.y <= pt.y && side < 0. {
                winding_num -= 1;
            }
        }
        winding_num != 0
    }

    /// Distance from `pt` to the polygon; zero if the point is enclosed.
    pub fn distance_to(&self, pt: Point) -> f64 {
        if self.contains(pt) {
            return 0.;
        }
        self.edges()
            .map(|(a, b)| intersect::point_segment_distance(pt, a, b))
            .fold(f64::INFINITY, f64::min)
    }

    /// Returns `true` if the polygon encloses no area.
    pub fn is_degenerate(&self) -> bool {
        self.points.len() < 3 || self.area() < EPSILON
    }
}

impl BoundBox for Polygon {
    fn bbox(&self) -> Bbox {
        self.points
            .iter()
            .fold(Bbox::empty(), |bbox, pt| bbox.union_point(*pt))
    }
}

impl Transform for Polygon {
    fn transform(&self, trans: Transformation) -> Self {
        Self {
            points: self.points.iter().map(|p| p.transform(trans)).collect(),
        }
    }
}

/// An enumeration of geometric shapes.
#[enum_dispatch(BoundBox)]
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub enum Shape {
    Rect(Rect),
    Polygon(Polygon),
}

impl Shape {
    /// Converts the shape into a [`Polygon`].
    pub fn to_polygon(&self) -> Polygon {
        match self {
            Shape::Rect(r) => r.to_polygon(),
            Shape::Polygon(p) => p.clone(),
        }
    }
}

impl Transform for Shape {
    /// Rectangles become polygons, since an arbitrary rotation
    /// does not preserve axis alignment.
    fn transform(&self, trans: Transformation) -> Self {
        Shape::Polygon(self.to_polygon().transform(trans))
    }
}

#[cfg(test)]
pub mod tests {
    use float_eq::assert_float_eq;

    use super::*;

    #[test]
    fn test_polygon_contains() {
        // Create a right triangle at the origin
        let triangle = Polygon::new(vec![
            Point::new(0., 0.),
            Point::new(2., 0.),
            Point::new(0., 2.),
        ]);
        assert!(triangle.contains(Point::new(0., 0.)));
        assert!(triangle.contains(Point::new(1., 0.)));
        assert!(triangle.contains(Point::new(1., 1.)));
        assert!(triangle.contains(Point::new(0.5, 0.5)));
        assert!(!triangle.contains(Point::new(2., 2.)));

        // A U-shaped polygon inside a 10x10 square
        let u = Polygon::new(vec![
            Point::new(0., 0.),
            Point::new(0., 10.),
            Point::new(2., 10.),
            Point::new(2., 2.),
            Point::new(8., 2.),
            Point::new(8., 10.),
            Point::new(10., 10.),
            Point::new(10., 0.),
        ]);
        for pt in &u.points {
            assert!(u.contains(*pt));
        }
        assert!(u.contains(Point::new(1., 1.)));
        assert!(u.contains(Point::new(9., 9.)));
        // Points "inside" the u-part, i.e. "outside" the polygon
        assert!(!u.contains(Point::new(3., 3.)));
        assert!(!u.contains(Point::new(7., 9.)));
    }

    #[test]
    fn test_polygon_distance() {
        let square = Rect::new(Point::zero(), Point::new(10., 10.)).to_polygon();
        assert_float_eq!(square.distance_to(Point::new(5., 5.)), 0., abs <= 1e-12);
        assert_float_eq!(square.distance_to(Point::new(15., 5.)), 5., abs <= 1e-12);
        assert_float_eq!(square.distance_to(Point::new(13., 14.)), 5., abs <= 1e-12);
    }

    #[test]
    fn test_point_rotation() {
        let p = Point::new(-16., 0.).rotated(-90.);
        assert!(p.approx_eq(Point::new(0., 16.), 1e-9));
        let q = Point::new(1., 0.).rotated_about(Point::new(1., 1.), 90.);
        assert!(q.approx_eq(Point::new(2., 1.), 1e-9));
    }

    #[test]
    fn test_side_parse_and_opposite() {
        assert_eq!("left".parse::<Side>().unwrap(), Side::Left);
        assert_eq!("bottom".parse::<Side>().unwrap(), Side::Bot);
        assert!("up".parse::<Side>().is_err());
        for side in [Side::Top, Side::Right, Side::Bot, Side::Left] {
            assert_eq!(!!side, side);
            assert_ne!(!side, side);
        }
    }

    #[test]
    fn test_degenerate_polygon() {
        let collapsed = Rect::from_center_dims(Point::new(3., 3.), 0., 0.).to_polygon();
        assert!(collapsed.is_degenerate());
        assert!(!Rect::new(Point::zero(), Point::new(1., 1.))
            .to_polygon()
            .is_degenerate());
    }
}
