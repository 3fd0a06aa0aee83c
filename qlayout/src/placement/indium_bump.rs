//! Indium-bump placement on a grid, subject to minimum distances.

use derive_builder::Builder;
use kiddo::{KdTree, SquaredEuclidean};
use qgeom::bbox::{Bbox, BoundBox};
use qgeom::{Point, Polygon, Rect};

use crate::error::{ErrorSource, Result};
use crate::log::{debug, trace};

/// Parameters of an indium-bump placement run.
#[derive(Debug, Clone, PartialEq, Builder)]
pub struct BumpParams {
    /// The rectangle that is rasterized for candidates.
    pub region: Rect,
    /// Grid pitch.
    pub step: f64,
    /// Minimum distance between two accepted bumps.
    #[builder(default = "0.")]
    pub min_distance_points: f64,
    /// Minimum distance between a bump and any existing polygon.
    #[builder(default = "0.")]
    pub min_distance_polygons: f64,
}

impl BumpParams {
    #[inline]
    pub fn builder() -> BumpParamsBuilder {
        BumpParamsBuilder::default()
    }
}

/// Irrational turn of the index frame, in radians.
const INDEX_ROTATION: f64 = 0.5 * std::f64::consts::SQRT_2;

/// Nearest-neighbor index over accepted bumps, grown as bumps are accepted.
///
/// Points are stored in a rotated frame. Grid points share coordinates along
/// whole rows and columns, and kd-tree buckets cannot split items that are
/// equal on the split axis; rotation keeps distances unchanged.
struct BumpIndex {
    tree: KdTree<f64, 2>,
    radius: f64,
}

impl BumpIndex {
    fn new(radius: f64) -> Self {
        Self {
            tree: KdTree::new(),
            radius,
        }
    }

    fn key(p: Point) -> [f64; 2] {
        let q = p.rotated_rad(INDEX_ROTATION);
        [q.x, q.y]
    }

    fn insert(&mut self, p: Point, item: usize) {
        self.tree.add(&Self::key(p), item as u64);
    }

    /// Returns `true` if some indexed bump is strictly closer than the radius.
    fn any_too_close(&self, p: Point) -> bool {
        let r2 = self.radius * self.radius;
        self.tree
            .within_unsorted::<SquaredEuclidean>(&Self::key(p), r2)
            .iter()
            // Bumps exactly at the radius stay allowed despite rotation rounding.
            .any(|neighbor| neighbor.distance < r2 * (1. - 1e-12))
    }
}

/// Rasterizes the region and keeps every grid point that respects both minimum distances.
///
/// Grid points are visited row by row from the lower-left corner of the region.
pub fn place_indium_bumps(params: &BumpParams, obstacles: &[Polygon]) -> Result<Vec<Point>> {
    if !(params.step > 0.) {
        return Err(ErrorSource::InvalidOption(format!(
            "indium bump step must be positive, got {}",
            params.step
        ))
        .into());
    }
    let mdp = params.min_distance_points;
    let mdpoly = params.min_distance_polygons;
    let nearby: Vec<(Bbox, &Polygon)> = obstacles
        .iter()
        .map(|poly| {
            let mut bbox = poly.bbox();
            bbox.expand(mdpoly);
            (bbox, poly)
        })
        .collect();
    let blocked = |p: Point| {
        nearby.iter().any(|(bbox, poly)| {
            bbox.contains(p) && (poly.contains(p) || poly.distance_to(p) < mdpoly)
        })
    };

    let mut index = (mdp > 0.).then(|| BumpIndex::new(mdp));
    let mut accepted = Vec::new();
    let Rect { p0, p1 } = params.region;
    let rows = ((p1.y - p0.y) / params.step + 1e-9).floor() as usize;
    let cols = ((p1.x - p0.x) / params.step + 1e-9).floor() as usize;
    for j in 0..=rows {
        for i in 0..=cols {
            let p = p0 + Point::new(i as f64, j as f64) * params.step;
            if blocked(p) {
                trace!("indium bump at {p} is too close to a polygon");
                continue;
            }
            if let Some(index) = index.as_mut() {
                if index.any_too_close(p) {
                    trace!("indium bump at {p} is too close to another bump");
                    continue;
                }
                index.insert(p, accepted.len());
            }
            accepted.push(p);
        }
    }
    debug!("placed {} indium bumps", accepted.len());
    Ok(accepted)
}

#[cfg(test)]
mod tests {
    use itertools::Itertools;

    use super::*;

    #[test]
    fn test_grid_without_constraints() {
        let params = BumpParams::builder()
            .region(Rect::new(Point::zero(), Point::new(100., 50.)))
            .step(25.)
            .build()
            .unwrap();
        let pts = place_indium_bumps(&params, &[]).unwrap();
        assert_eq!(pts.len(), 5 * 3);
        assert_eq!(pts[0], Point::zero());
        assert_eq!(pts[1], Point::new(25., 0.));
        assert_eq!(*pts.last().unwrap(), Point::new(100., 50.));
    }

    #[test]
    fn test_min_distances() {
        let obstacle = Rect::new(Point::new(40., 40.), Point::new(60., 60.)).to_polygon();
        let params = BumpParams::builder()
            .region(Rect::new(Point::zero(), Point::new(200., 200.)))
            .step(10.)
            .min_distance_points(25.)
            .min_distance_polygons(15.)
            .build()
            .unwrap();
        let pts = place_indium_bumps(&params, &[obstacle.clone()]).unwrap();
        assert!(!pts.is_empty());
        for (a, b) in pts.iter().tuple_combinations() {
            assert!(a.distance(*b) >= 25.);
        }
        for p in pts.iter() {
            assert!(obstacle.distance_to(*p) >= 15.);
        }
    }

    #[test]
    fn test_spacing_equal_to_step() {
        // Long rows and columns of equal coordinates, all exactly at the minimum distance.
        let params = BumpParams::builder()
            .region(Rect::new(Point::zero(), Point::new(500., 500.)))
            .step(10.)
            .min_distance_points(10.)
            .build()
            .unwrap();
        let pts = place_indium_bumps(&params, &[]).unwrap();
        assert_eq!(pts.len(), 51 * 51);

        let params = BumpParams::builder()
            .region(Rect::new(Point::zero(), Point::new(500., 500.)))
            .step(10.)
            .min_distance_points(15.)
            .build()
            .unwrap();
        let pts = place_indium_bumps(&params, &[]).unwrap();
        assert_eq!(pts.len(), 26 * 26);
        for (a, b) in pts.iter().tuple_combinations() {
            assert!(a.distance(*b) >= 15.);
        }
    }

    #[test]
    fn test_invalid_step() {
        let params = BumpParams::builder()
            .region(Rect::new(Point::zero(), Point::new(1., 1.)))
            .step(0.)
            .build()
            .unwrap();
        assert!(place_indium_bumps(&params, &[]).is_err());
    }
}
