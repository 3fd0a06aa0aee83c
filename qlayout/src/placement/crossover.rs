//! Insulating-sheet placement at coupling-line / transmission-line crossings.

use arcstr::ArcStr;
use itertools::Itertools;
use qgeom::intersect::polyline_intersections;

use super::Placement;
use crate::component::coupling_line::CouplingLineType;
use crate::component::{Collection, Component, CouplingLine, TransmissionLine};
use crate::error::{ErrorSource, Result};
use crate::log::debug;

/// One crossing between a coupling line and a transmission line.
#[derive(Debug, Clone, PartialEq)]
pub struct Crossing {
    pub coupler: ArcStr,
    pub line: ArcStr,
    /// The chip of the coupling line.
    pub chip: ArcStr,
    /// Centered on the crossing, aligned with the coupling line.
    pub placement: Placement,
}

/// Finds every crossing between the given coupling lines and transmission lines.
///
/// Only straight coupling lines are supported. Fails if there is not a single crossing.
pub fn place_crossovers(
    couplers: &Collection<CouplingLine>,
    lines: &Collection<TransmissionLine>,
) -> Result<Vec<Crossing>> {
    let mut crossings = Vec::new();
    for coupler in couplers.values() {
        if coupler.kind != CouplingLineType::CouplerBase {
            return Err(ErrorSource::UnsupportedShape {
                component: coupler.name.clone(),
                type_name: ArcStr::from(coupler.type_name()),
            }
            .into());
        }
        let centerline = [coupler.start_pos, coupler.end_pos];
        let rotation = (coupler.end_pos - coupler.start_pos).angle();
        for line in lines.values() {
            for position in polyline_intersections(&centerline, &line.path) {
                debug!("{} crosses {} at {position}", coupler.name, line.name);
                crossings.push(Crossing {
                    coupler: coupler.name.clone(),
                    line: line.name.clone(),
                    chip: coupler.chip.clone(),
                    placement: Placement::new(position, rotation),
                });
            }
        }
    }
    if crossings.is_empty() {
        return Err(ErrorSource::IntersectionExpectedButNotFound {
            a: ArcStr::from(couplers.keys().join(", ")),
            b: ArcStr::from(lines.keys().join(", ")),
        }
        .into());
    }
    Ok(crossings)
}

#[cfg(test)]
mod tests {
    use qgeom::Point;

    use super::*;
    use crate::bag;
    use crate::component::complete_collection;
    use crate::config::LayoutConfig;

    fn couplers(kind: &str) -> Collection<CouplingLine> {
        complete_collection(
            &bag! {
                "c0" => bag! {
                    "type" => kind,
                    "start_pos" => Point::new(0., 0.),
                    "end_pos" => Point::new(200., 0.),
                    "length" => 400.,
                },
            },
            &LayoutConfig::default(),
        )
        .unwrap()
    }

    fn lines(path: Vec<Point>) -> Collection<TransmissionLine> {
        complete_collection(
            &bag! { "t0" => bag! { "type" => "TransmissionPath", "path" => path } },
            &LayoutConfig::default(),
        )
        .unwrap()
    }

    #[test]
    fn test_crossings() {
        let path = vec![
            Point::new(50., -100.),
            Point::new(50., 100.),
            Point::new(150., 100.),
            Point::new(150., -100.),
        ];
        let found = place_crossovers(&couplers("CouplerBase"), &lines(path)).unwrap();
        assert_eq!(found.len(), 2);
        assert!(found[0].placement.position.approx_eq(Point::new(50., 0.), 1e-9));
        assert!(found[1].placement.position.approx_eq(Point::new(150., 0.), 1e-9));
        assert_eq!(found[0].placement.rotation, 0.);
        assert_eq!(found[1].line, "t0");
    }

    #[test]
    fn test_no_crossing() {
        let path = vec![Point::new(0., 50.), Point::new(200., 50.)];
        let err = place_crossovers(&couplers("CouplerBase"), &lines(path)).unwrap_err();
        assert!(matches!(
            err.source(),
            ErrorSource::IntersectionExpectedButNotFound { .. }
        ));
    }

    #[test]
    fn test_meandered_coupler_unsupported() {
        let path = vec![Point::new(50., -100.), Point::new(50., 100.)];
        let err = place_crossovers(&couplers("CouplingCavity"), &lines(path)).unwrap_err();
        assert!(matches!(err.source(), ErrorSource::UnsupportedShape { .. }));
    }
}
