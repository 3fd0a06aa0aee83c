//! Indium-bump generation over a chip region.

use arcstr::ArcStr;
use qgeom::{Point, Polygon, Rect};
use serde::Deserialize;

use super::{keyed, payload, unmatched, Branch};
use crate::bag;
use crate::error::Result;
use crate::options::OptionBag;
use crate::placement::{place_indium_bumps, BumpParams};

#[derive(Debug, Clone, PartialEq)]
pub enum IndiumBumpsRequest {
    OnGrid { chip: ArcStr, params: BumpParams },
}

#[derive(Deserialize)]
struct OnGrid {
    chip: ArcStr,
    region: (Point, Point),
    step: f64,
    min_distance_points: f64,
    min_distance_polygons: f64,
}

impl Branch for IndiumBumpsRequest {
    const NAME: &'static str = "indium_bumps";
    const SIGNATURES: &'static [&'static str] =
        &["chip__min_distance_points__min_distance_polygons__region__step"];

    fn from_signature(signature: &str, bag: &OptionBag) -> Result<Self> {
        match signature {
            "chip__min_distance_points__min_distance_polygons__region__step" => {
                let p: OnGrid = payload(bag)?;
                Ok(Self::OnGrid {
                    chip: p.chip,
                    params: BumpParams {
                        region: Rect::new(p.region.0, p.region.1),
                        step: p.step,
                        min_distance_points: p.min_distance_points,
                        min_distance_polygons: p.min_distance_polygons,
                    },
                })
            }
            _ => Err(unmatched(Self::NAME, signature)),
        }
    }
}

impl IndiumBumpsRequest {
    /// The chip whose existing polygons constrain the placement.
    pub fn chip(&self) -> &ArcStr {
        let Self::OnGrid { chip, .. } = self;
        chip
    }

    /// Generates the indium bumps collection bag, keeping clear of `obstacles`.
    pub fn generate(&self, obstacles: &[Polygon]) -> Result<OptionBag> {
        let Self::OnGrid { chip, params } = self;
        let points = place_indium_bumps(params, obstacles)?;
        keyed(points.into_iter().enumerate().map(|(i, p)| {
            bag! {
                "name" => ArcStr::from(format!("{chip}_ib{i}")),
                "type" => "IndiumBump",
                "chip" => chip,
                "position" => p,
            }
        }))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::branch::resolve;
    use crate::options::OptionValue;

    #[test]
    fn test_bumps_avoid_obstacles() {
        let req: IndiumBumpsRequest = resolve(&bag! {
            "chip" => "chip0",
            "region" => OptionValue::Tuple(vec![Point::zero().into(), Point::new(100., 0.).into()]),
            "step" => 10.,
            "min_distance_points" => 0.,
            "min_distance_polygons" => 5.,
        })
        .unwrap();
        let obstacle = Rect::new(Point::new(40., -10.), Point::new(60., 10.)).to_polygon();
        let bumps = req.generate(&[obstacle]).unwrap();
        // Grid points at x = 40, 50 and 60 fall inside the obstacle.
        assert_eq!(bumps.len(), 8);
        assert_eq!(
            bumps.require_bag("chip0_ib0").unwrap().require_point("position").unwrap(),
            Point::zero()
        );
    }
}
