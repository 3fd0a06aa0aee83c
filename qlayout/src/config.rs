//! Tunable constants for layout generation and auxiliary geometry placement.

use std::f64::consts::PI;
use std::path::Path;

use derive_builder::Builder;
use serde::{Deserialize, Serialize};

use crate::error::Result;
use crate::io::read_to_string;

/// Corner offset factor for a right-angle bend.
///
/// Places a corner element close to the midpoint of the filleted arc.
pub const OFFSET_FACTOR_90: f64 = 0.29;
/// How strongly the corner offset shrinks as a bend opens past 90 degrees.
pub const OBTUSE_SCALE: f64 = 0.5;
/// How strongly the corner offset grows as a bend closes below 90 degrees.
pub const ACUTE_SCALE: f64 = 0.5;

/// Parameters of the auxiliary geometry placement algorithms.
#[derive(Debug, Clone, PartialEq, Builder, Serialize, Deserialize)]
#[serde(default)]
pub struct PlacementConfig {
    /// Distance tolerance when testing candidates against a path outline.
    #[builder(default = "1e-6")]
    pub epsilon: f64,
    #[builder(default = "OFFSET_FACTOR_90")]
    pub offset_factor_90: f64,
    #[builder(default = "OBTUSE_SCALE")]
    pub obtuse_scale: f64,
    #[builder(default = "ACUTE_SCALE")]
    pub acute_scale: f64,
    /// Extent of an element's support rectangle along the path tangent.
    #[builder(default = "10.")]
    pub support_length: f64,
    /// Extent of an element's support rectangle across the path.
    #[builder(default = "40.")]
    pub support_width: f64,
    /// Maximum angular step, in radians, when discretizing filleted bends.
    #[builder(default = "PI / 32.")]
    pub arc_tolerance: f64,
}

impl Default for PlacementConfig {
    fn default() -> Self {
        Self {
            epsilon: 1e-6,
            offset_factor_90: OFFSET_FACTOR_90,
            obtuse_scale: OBTUSE_SCALE,
            acute_scale: ACUTE_SCALE,
            support_length: 10.,
            support_width: 40.,
            arc_tolerance: PI / 32.,
        }
    }
}

impl PlacementConfig {
    #[inline]
    pub fn builder() -> PlacementConfigBuilder {
        PlacementConfigBuilder::default()
    }

    /// The bend offset factor for a corner with the given interior angle, in degrees.
    ///
    /// Right angles use [`OFFSET_FACTOR_90`]. Obtuse corners scale it down and acute
    /// corners scale it up, linearly in the distance from 90 degrees.
    pub fn offset_factor(&self, interior_deg: f64) -> f64 {
        if interior_deg >= 90. {
            self.offset_factor_90 * (1. - self.obtuse_scale * (interior_deg - 90.) / 90.)
        } else {
            self.offset_factor_90 * (1. + self.acute_scale * (90. - interior_deg) / 90.)
        }
    }
}

/// Parameters of layout rendering and export.
#[derive(Debug, Clone, PartialEq, Builder, Serialize, Deserialize)]
#[serde(default)]
pub struct LayoutConfig {
    /// Size of one layout user unit, in meters.
    #[builder(default = "1e-6")]
    pub user_unit: f64,
    /// Size of one database unit, in meters.
    #[builder(default = "1e-9")]
    pub db_unit: f64,
    /// Smallest layer number a chip may be assigned.
    #[builder(default = "1")]
    pub layer_min: i16,
    /// Largest layer number a chip may be assigned.
    #[builder(default = "255")]
    pub layer_max: i16,
    /// Number of segments used to discretize a full circle.
    #[builder(default = "64")]
    pub arc_segments: usize,
    /// Maximum angular step, in radians, when discretizing filleted bends.
    #[builder(default = "PI / 32.")]
    pub arc_step: f64,
}

impl Default for LayoutConfig {
    fn default() -> Self {
        Self {
            user_unit: 1e-6,
            db_unit: 1e-9,
            layer_min: 1,
            layer_max: 255,
            arc_segments: 64,
            arc_step: PI / 32.,
        }
    }
}

impl LayoutConfig {
    #[inline]
    pub fn builder() -> LayoutConfigBuilder {
        LayoutConfigBuilder::default()
    }

    /// The number of database units per user unit.
    #[inline]
    pub fn db_per_user(&self) -> f64 {
        self.user_unit / self.db_unit
    }

    pub fn from_toml(input: &str) -> Result<Self> {
        let value = toml::from_str(input)?;
        Ok(value)
    }

    pub fn from_toml_file(path: impl AsRef<Path>) -> Result<Self> {
        let input = read_to_string(path)?;
        Self::from_toml(&input)
    }
}

impl PlacementConfig {
    pub fn from_toml(input: &str) -> Result<Self> {
        let value = toml::from_str(input)?;
        Ok(value)
    }

    pub fn from_toml_file(path: impl AsRef<Path>) -> Result<Self> {
        let input = read_to_string(path)?;
        Self::from_toml(&input)
    }
}
