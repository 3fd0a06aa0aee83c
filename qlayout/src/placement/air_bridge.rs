//! Air-bridge placement along a routed path.
//!
//! Candidates come from two sources, visited in path order:
//!
//! * Straight runs: each run reserves the bend radius at both ends. The rest is
//!   split into `ceil(usable / spacing)` equal parts, and a candidate sits at every
//!   interior division point.
//! * Bends: a candidate sits on the bisector of the two edges, offset from the
//!   vertex towards the filleted arc.
//!
//! A candidate is rejected if its center is not on the conductor. An accepted
//! candidate evicts every earlier element whose support rectangle it overlaps,
//! so the accepted supports are pairwise disjoint.

use itertools::Itertools;
use qgeom::path::{dedup, interior_angle, Path};
use qgeom::{Point, Polygon};

use super::support::Support;
use super::Placement;
use crate::config::PlacementConfig;
use crate::error::{ErrorSource, Result};
use crate::log::{trace, warn};

/// Places air bridges along `path`, whose bends are filleted with `radius`.
pub fn place_air_bridges(
    path: &Path,
    radius: f64,
    spacing: f64,
    cfg: &PlacementConfig,
) -> Result<Vec<Placement>> {
    if !(spacing > 0.) {
        return Err(ErrorSource::InvalidOption(format!(
            "air bridge spacing must be positive, got {spacing}"
        ))
        .into());
    }
    let points = dedup(&path.points);
    if points.len() < 2 {
        return Ok(Vec::new());
    }

    let mut placer = Placer {
        outline: path.outline(radius, cfg.arc_tolerance),
        tolerance: path.width / 2. + cfg.epsilon,
        cfg,
        accepted: Vec::new(),
    };
    for (i, (a, b)) in points.iter().copied().tuple_windows().enumerate() {
        for candidate in segment_candidates(a, b, radius, spacing) {
            placer.offer(candidate);
        }
        if let Some(&next) = points.get(i + 2) {
            if let Some(candidate) = corner_candidate(a, b, next, radius, cfg) {
                placer.offer(candidate);
            }
        }
    }
    Ok(placer.accepted.into_iter().map(|s| s.placement).collect())
}

struct Placer<'a> {
    outline: Polygon,
    tolerance: f64,
    cfg: &'a PlacementConfig,
    accepted: Vec<Support>,
}

impl Placer<'_> {
    fn offer(&mut self, candidate: Placement) {
        let dist = self.outline.distance_to(candidate.position);
        if dist > self.tolerance {
            trace!(
                "rejecting air bridge at {}: {dist} off the conductor",
                candidate.position
            );
            return;
        }
        let support = Support::new(candidate, self.cfg);
        // Earlier elements on the other leg of a sharp bend can conflict too,
        // so every accepted support is checked, not only the latest.
        self.accepted.retain(|other| {
            let conflict = support.conflicts_with(other);
            if conflict {
                warn!(
                    "air bridge at {} overlaps the one at {}; evicting the latter",
                    candidate.position, other.placement.position
                );
            }
            !conflict
        });
        trace!("placing air bridge at {}", candidate.position);
        self.accepted.push(support);
    }
}

/// Evenly spaced candidates strictly inside the usable part of the run `a -> b`.
///
/// Non-positive or non-finite spacings give no candidates.
pub fn segment_candidates(a: Point, b: Point, radius: f64, spacing: f64) -> Vec<Placement> {
    let usable = a.distance(b) - 2. * radius;
    let dir = match (b - a).normalized() {
        Some(dir) if usable > 0. && spacing > 0. && spacing.is_finite() => dir,
        _ => return Vec::new(),
    };
    let n = (usable / spacing).ceil() as usize;
    let pitch = usable / n as f64;
    (1..n)
        .map(|k| Placement::new(a + dir * (radius + pitch * k as f64), dir.angle()))
        .collect()
}

/// The candidate for the bend at `v`, or [`None`] if the path does not turn there.
///
/// The offset from the vertex is `radius / sin(theta / 2)` scaled by the
/// configured offset factor for the interior angle `theta`.
pub fn corner_candidate(
    prev: Point,
    v: Point,
    next: Point,
    radius: f64,
    cfg: &PlacementConfig,
) -> Option<Placement> {
    let a = (v - prev).normalized()?;
    let b = (next - v).normalized()?;
    let bisector = (b - a).normalized()?;
    let theta = interior_angle(prev, v, next)?;
    let half_sin = (theta / 2.).sin();
    if half_sin < 1e-9 {
        return None;
    }
    let offset = radius / half_sin * cfg.offset_factor(theta.to_degrees());
    Some(Placement::new(v + bisector * offset, bisector.angle() + 90.))
}

#[cfg(test)]
mod tests {
    use float_eq::assert_float_eq;

    use super::*;
    use crate::config::OFFSET_FACTOR_90;

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
    fn test_elbow() {
        let cfg = PlacementConfig::default();
        let placed = place_air_bridges(&elbow(), 16., 50., &cfg).unwrap();
        assert_eq!(placed.len(), 3);

        assert!(placed[0].position.approx_eq(Point::new(0., 50.), 1e-9));
        assert_float_eq!(placed[0].rotation, 90., abs <= 1e-9);

        let corner = placed[1];
        // 16 / sin(45deg) along the diagonal bisector.
        let offset = 16. * OFFSET_FACTOR_90;
        assert!(corner
            .position
            .approx_eq(Point::new(offset, 100. - offset), 1e-9));
        assert!(corner.position.distance(Point::new(0., 100.)) < 16.);
        assert_float_eq!(corner.rotation, 45., abs <= 1e-9);

        assert!(placed[2].position.approx_eq(Point::new(50., 100.), 1e-9));
        assert_float_eq!(placed[2].rotation, 0., abs <= 1e-9);
    }

    #[test]
    fn test_segment_count_and_spacing() {
        let (len, r, s) = (1000., 16., 50.);
        let cands = segment_candidates(Point::zero(), Point::new(len, 0.), r, s);
        let expected = ((len - 2. * r) / s).ceil() as usize - 1;
        assert_eq!(cands.len(), expected);
        for (p, q) in cands.iter().tuple_windows() {
            assert!(p.position.distance(q.position) >= s / 2.);
        }
        assert!(segment_candidates(Point::zero(), Point::new(20., 0.), 16., 50.).is_empty());
    }

    fn assert_disjoint(placed: &[Placement], cfg: &PlacementConfig) {
        let supports: Vec<_> = placed.iter().map(|p| Support::new(*p, cfg)).collect();
        for (a, b) in supports.iter().tuple_combinations() {
            assert!(
                !a.conflicts_with(b),
                "{} overlaps {}",
                a.placement.position,
                b.placement.position
            );
        }
    }

    #[test]
    fn test_conflicts_are_evicted() {
        let cfg = PlacementConfig::default();
        let path = Path::new(vec![Point::zero(), Point::new(100., 0.)], 4.);
        let placed = place_air_bridges(&path, 0., 8., &cfg).unwrap();
        assert!(!placed.is_empty());
        assert!(placed.len() < segment_candidates(Point::zero(), Point::new(100., 0.), 0., 8.).len());
        assert_disjoint(&placed, &cfg);
    }

    #[test]
    fn test_sharp_bends_never_overlap() {
        let cfg = PlacementConfig::default();
        let turns = [
            Point::new(30., 60.),
            Point::new(10., 20.),
            Point::new(60., 30.),
            Point::new(100., 100.),
            Point::new(-40., 70.),
            Point::new(50., 140.),
        ];
        for next in turns {
            let path = Path::new(vec![Point::zero(), Point::new(0., 100.), next], 4.);
            for r in [0., 8., 16., 30.] {
                for s in 9..=25 {
                    let placed = place_air_bridges(&path, r, s as f64, &cfg).unwrap();
                    assert_disjoint(&placed, &cfg);
                }
            }
        }
    }

    #[test]
    fn test_acute_bend_keeps_one_side() {
        let cfg = PlacementConfig::default();
        let path = Path::new(
            vec![Point::zero(), Point::new(0., 100.), Point::new(30., 60.)],
            4.,
        );
        let placed = place_air_bridges(&path, 8., 11., &cfg).unwrap();
        assert!(!placed
            .iter()
            .any(|p| p.position.approx_eq(Point::new(0., 60.5), 1e-6)));
        assert_disjoint(&placed, &cfg);
    }

    #[test]
    fn test_straight_vertex_has_no_corner() {
        let cfg = PlacementConfig::default();
        assert!(corner_candidate(
            Point::zero(),
            Point::new(0., 1.),
            Point::new(0., 2.),
            16.,
            &cfg
        )
        .is_none());
    }

    #[test]
    fn test_invalid_spacing() {
        let cfg = PlacementConfig::default();
        assert!(place_air_bridges(&elbow(), 16., 0., &cfg).is_err());
        let run = (Point::zero(), Point::new(100., 0.));
        assert!(segment_candidates(run.0, run.1, 0., 0.).is_empty());
        assert!(segment_candidates(run.0, run.1, 0., -5.).is_empty());
        assert!(segment_candidates(run.0, run.1, 0., f64::NAN).is_empty());
    }
}
