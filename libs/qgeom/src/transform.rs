//! Rigid placement transforms for component-local geometry.

use serde::{Deserialize, Serialize};

use super::Point;

/// A rotation about the origin followed by a translation.
///
/// Components draw in a local frame centered on their anchor and are placed
/// with [`Transformation::with_loc_and_angle`].
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Transformation {
    cos: f64,
    sin: f64,
    offset: Point,
}

impl Default for Transformation {
    fn default() -> Self {
        Self::identity()
    }
}

impl Transformation {
    pub fn identity() -> Self {
        Self {
            cos: 1.,
            sin: 0.,
            offset: Point::zero(),
        }
    }

    pub fn translate(x: f64, y: f64) -> Self {
        Self {
            offset: Point::new(x, y),
            ..Self::identity()
        }
    }

    /// A counter-clockwise rotation by `angle` degrees.
    pub fn rotate(angle: f64) -> Self {
        let (sin, cos) = angle.to_radians().sin_cos();
        Self {
            cos,
            sin,
            offset: Point::zero(),
        }
    }

    /// Rotates by `angle` degrees about the origin, then moves the origin to `loc`.
    pub fn with_loc_and_angle(loc: Point, angle: f64) -> Self {
        Self {
            offset: loc,
            ..Self::rotate(angle)
        }
    }

    /// Applies `self` first, then `outer`.
    pub fn then(self, outer: Transformation) -> Self {
        Self {
            cos: outer.cos * self.cos - outer.sin * self.sin,
            sin: outer.sin * self.cos + outer.cos * self.sin,
            offset: self.offset.transform(outer),
        }
    }

    /// The image of the local origin.
    #[inline]
    pub fn offset_point(&self) -> Point {
        self.offset
    }

    /// The rotation angle in degrees, in `(-180, 180]`.
    pub fn angle(&self) -> f64 {
        self.sin.atan2(self.cos).to_degrees()
    }
}

/// Geometry that can be moved by a [`Transformation`].
pub trait Transform {
    /// Returns a transformed copy.
    fn transform(&self, trans: Transformation) -> Self;
}

impl Transform for Point {
    fn transform(&self, trans: Transformation) -> Self {
        Point::new(
            trans.cos * self.x - trans.sin * self.y + trans.offset.x,
            trans.sin * self.x + trans.cos * self.y + trans.offset.y,
        )
    }
}
