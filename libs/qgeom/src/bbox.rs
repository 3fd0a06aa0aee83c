//! Rectangular bounding boxes and associated trait implementations.

use enum_dispatch::enum_dispatch;
use serde::{Deserialize, Serialize};

use super::{Point, Rect};

/// An axis-aligned rectangular bounding box.
///
/// Points `p0` and `p1` represent opposite corners of a bounding rectangle.
/// `p0` is always closest to negative-infinity, in both x and y,
/// and `p1` is always closest to positive-infinity.
///
/// This differs from [`Rect`] in that it could be empty, meaning that `p0`
/// is to the upper right of `p1`.
#[derive(Debug, Copy, Clone, Deserialize, Serialize, PartialEq)]
pub struct Bbox {
    pub p0: Point,
    pub p1: Point,
}

impl Default for Bbox {
    fn default() -> Self {
        Self::empty()
    }
}

impl Bbox {
    /// Create a new [`Bbox`] from two [`Point`]s.
    #[inline]
    pub fn new(p0: Point, p1: Point) -> Self {
        Self {
            p0: Point::new(p0.x.min(p1.x), p0.y.min(p1.y)),
            p1: Point::new(p0.x.max(p1.x), p0.y.max(p1.y)),
        }
    }
    /// Creates an empty, otherwise invalid bounding box.
    pub fn empty() -> Self {
        Self {
            p0: Point::new(f64::INFINITY, f64::INFINITY),
            p1: Point::new(f64::NEG_INFINITY, f64::NEG_INFINITY),
        }
    }
    /// Returns `true` if the bounding box is empty.
    pub fn is_empty(&self) -> bool {
        self.p0.x > self.p1.x || self.p0.y > self.p1.y
    }
    /// Finds the width of the bounding box in the x-direction.
    ///
    /// Empty boxes have zero width.
    #[inline]
    pub fn width(&self) -> f64 {
        if self.is_empty() {
            0.
        } else {
            self.p1.x - self.p0.x
        }
    }
    /// Finds the height of the bounding box in the y-direction.
    ///
    /// Empty boxes have zero height.
    #[inline]
    pub fn height(&self) -> f64 {
        if self.is_empty() {
            0.
        } else {
            self.p1.y - self.p0.y
        }
    }
    /// Returns `true` if the box is empty or collapses to a line or point.
    pub fn is_degenerate(&self) -> bool {
        self.width() <= crate::EPSILON || self.height() <= crate::EPSILON
    }
    /// Returns true if [`Point`] `pt` lies inside the bounding box.
    pub fn contains(&self, pt: Point) -> bool {
        self.p0.x <= pt.x && self.p1.x >= pt.x && self.p0.y <= pt.y && self.p1.y >= pt.y
    }
    /// Expands an existing [`Bbox`] in all directions by `delta`.
    pub fn expand(&mut self, delta: f64) {
        self.p0.x -= delta;
        self.p0.y -= delta;
        self.p1.x += delta;
        self.p1.y += delta;
    }
    /// Returns the bounding box's center.
    pub fn center(&self) -> Point {
        Point::new((self.p0.x + self.p1.x) / 2., (self.p0.y + self.p1.y) / 2.)
    }
    /// Creates a new [`Bbox`] that also encloses `pt`.
    pub fn union_point(self, pt: Point) -> Self {
        Self {
            p0: Point::new(self.p0.x.min(pt.x), self.p0.y.min(pt.y)),
            p1: Point::new(self.p1.x.max(pt.x), self.p1.y.max(pt.y)),
        }
    }
    /// Creates the smallest [`Bbox`] enclosing both `self` and `other`.
    pub fn union(self, other: Self) -> Self {
        if other.is_empty() {
            return self;
        }
        if self.is_empty() {
            return other;
        }
        self.union_point(other.p0).union_point(other.p1)
    }
}

impl From<Rect> for Bbox {
    fn from(r: Rect) -> Self {
        Self::new(r.p0, r.p1)
    }
}

/// A trait representing functions available for objects with a bounding box.
#[enum_dispatch]
pub trait BoundBox {
    /// Compute a rectangular bounding box around the implementing type.
    fn bbox(&self) -> Bbox;
}

impl BoundBox for Point {
    fn bbox(&self) -> Bbox {
        Bbox::new(*self, *self)
    }
}

impl<T: BoundBox> BoundBox for [T] {
    fn bbox(&self) -> Bbox {
        self.iter()
            .fold(Bbox::empty(), |acc, item| acc.union(item.bbox()))
    }
}

impl<T: BoundBox> BoundBox for Vec<T> {
    fn bbox(&self) -> Bbox {
        self.as_slice().bbox()
    }
}
