//! Derivation of auxiliary geometry from existing paths and polygons.
//!
//! Placement routines are pure: they take geometry and parameters and return
//! the positions of new elements. Turning placements into component bags is
//! left to the [branches](crate::branch).

use qgeom::Point;

pub mod air_bridge;
pub mod crossover;
pub mod indium_bump;
mod support;

pub use air_bridge::place_air_bridges;
pub use crossover::{place_crossovers, Crossing};
pub use indium_bump::{place_indium_bumps, BumpParams};

/// The position and orientation of one placed element.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Placement {
    pub position: Point,
    /// Direction of the underlying path at the element, in degrees.
    pub rotation: f64,
}

impl Placement {
    #[inline]
    pub fn new(position: Point, rotation: f64) -> Self {
        Self { position, rotation }
    }
}
