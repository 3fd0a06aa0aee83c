//! Grid topology of qubits and coupling-line endpoint inference.

use arcstr::ArcStr;
use indexmap::IndexMap;
use qgeom::{Point, Side};
use serde::{Deserialize, Serialize};

use crate::bag;
use crate::component::coupling_line::CouplingLineType;
use crate::component::{Collection, Qubit};
use crate::error::{with_err_context, ErrorContext, ErrorSource, Result};
use crate::log::debug;
use crate::options::OptionBag;

/// Integer grid positions of qubits and the edges coupling them.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Topology {
    pub positions: IndexMap<ArcStr, (i64, i64)>,
    #[serde(default)]
    pub edges: Vec<(ArcStr, ArcStr)>,
}

impl Topology {
    /// A `rows` by `cols` grid of qubits named `q0`, `q1`, ... in row-major order,
    /// with an edge between every pair of grid neighbors.
    pub fn grid(rows: usize, cols: usize) -> Self {
        let name = |r: usize, c: usize| ArcStr::from(format!("q{}", r * cols + c));
        let mut topo = Self::default();
        for r in 0..rows {
            for c in 0..cols {
                topo.positions.insert(name(r, c), (c as i64, r as i64));
                if c + 1 < cols {
                    topo.edges.push((name(r, c), name(r, c + 1)));
                }
                if r + 1 < rows {
                    topo.edges.push((name(r, c), name(r + 1, c)));
                }
            }
        }
        topo
    }

    /// Builds a topology from explicit positions and edges.
    ///
    /// Every edge must join two known, unit-adjacent positions.
    pub fn new(
        positions: IndexMap<ArcStr, (i64, i64)>,
        edges: Vec<(ArcStr, ArcStr)>,
    ) -> Result<Self> {
        let topo = Self { positions, edges };
        for (a, b) in topo.edges.iter() {
            topo.edge_direction(a, b)?;
        }
        Ok(topo)
    }

    pub fn position(&self, name: &str) -> Result<(i64, i64)> {
        self.positions
            .get(name)
            .copied()
            .ok_or_else(|| ErrorSource::NotFound(ArcStr::from(name)).into())
    }

    /// The side of `a` relative to `b` for the edge `(a, b)`.
    pub fn edge_direction(&self, a: &str, b: &str) -> Result<Side> {
        direction(self.position(a)?, self.position(b)?)
    }

    pub fn is_empty(&self) -> bool {
        self.positions.is_empty() && self.edges.is_empty()
    }
}

/// The side of grid position `a` relative to `b`.
///
/// `a` and `b` must differ by exactly one unit along exactly one axis.
/// Grid `y` grows upwards, so `(0, 1)` is on top of `(0, 0)`.
pub fn direction(a: (i64, i64), b: (i64, i64)) -> Result<Side> {
    let side = match (a.0 - b.0, a.1 - b.1) {
        (-1, 0) => Side::Left,
        (1, 0) => Side::Right,
        (0, 1) => Side::Top,
        (0, -1) => Side::Bot,
        _ => return Err(ErrorSource::NotAdjacent { a, b }.into()),
    };
    Ok(side)
}

/// Selects the pin facing a partner.
///
/// `side` is the side of the pin's owner relative to its partner; the pin that
/// is extreme towards the partner is returned. Ties keep the first pin.
pub fn select_pin(pins: &[Point], side: Side) -> Option<Point> {
    let towards = side.other().unit();
    pins.iter().copied().fold(None, |best: Option<Point>, p| match best {
        Some(b) if b.dot(towards) >= p.dot(towards) => Some(b),
        _ => Some(p),
    })
}

/// Emits one coupling-line bag per topology edge, keyed by line name.
///
/// Each line runs from the facing coupling pin of the edge's first qubit to the
/// facing coupling pin of its second qubit. Cavities get a length of 1.5 times
/// the pin distance.
pub fn infer_coupling_lines(
    topology: &Topology,
    qubits: &Collection<Qubit>,
    kind: CouplingLineType,
) -> Result<OptionBag> {
    let mut lines = OptionBag::with_capacity(topology.edges.len());
    for (a, b) in topology.edges.iter() {
        let inner = || -> Result<(ArcStr, OptionBag)> {
            let side = topology.edge_direction(a, b)?;
            let qa = find_qubit(qubits, a)?;
            let qb = find_qubit(qubits, b)?;
            let start = facing_pin(qa, side)?;
            let end = facing_pin(qb, side.other())?;
            let name = ArcStr::from(format!("{a}_{b}"));
            let mut line = bag! {
                "name" => &name,
                "type" => kind.as_str(),
                "chip" => &qa.chip,
                "qubits" => vec![a.clone(), b.clone()],
                "start_pos" => start,
                "end_pos" => end,
            };
            if kind == CouplingLineType::CouplingCavity {
                line.insert("length", 1.5 * start.distance(end));
            }
            debug!("inferred coupling line {name} ({a} is {side} of {b})");
            Ok((name, line))
        };
        let (name, line) = with_err_context(inner(), || {
            ErrorContext::Task(ArcStr::from(format!("inferring coupling line for edge {a}-{b}")))
        })?;
        lines.insert(name, line);
    }
    Ok(lines)
}

fn find_qubit<'a>(qubits: &'a Collection<Qubit>, name: &ArcStr) -> Result<&'a Qubit> {
    qubits
        .get(name)
        .ok_or_else(|| ErrorSource::NotFound(name.clone()).into())
}

fn facing_pin(qubit: &Qubit, side: Side) -> Result<Point> {
    select_pin(&qubit.coupling_pins, side).ok_or_else(|| {
        ErrorSource::MissingField {
            component: qubit.name.clone(),
            field: arcstr::literal!("coupling_pins"),
        }
        .into()
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::component::complete_collection;
    use crate::config::LayoutConfig;

    #[test]
    fn test_direction() {
        assert_eq!(direction((0, 0), (1, 0)).unwrap(), Side::Left);
        assert_eq!(direction((1, 0), (0, 0)).unwrap(), Side::Right);
        assert_eq!(direction((0, 1), (0, 0)).unwrap(), Side::Top);
        assert_eq!(direction((0, 0), (0, 1)).unwrap(), Side::Bot);
        for b in [(0, 0), (1, 1), (2, 0), (-3, 5)] {
            let err = direction((0, 0), b).unwrap_err();
            assert!(matches!(err.source(), ErrorSource::NotAdjacent { .. }));
        }
    }

    #[test]
    fn test_select_pin() {
        let pins = [
            Point::new(-1., 0.),
            Point::new(1., 0.),
            Point::new(0., 1.),
            Point::new(0., -1.),
        ];
        assert_eq!(select_pin(&pins, Side::Left), Some(Point::new(1., 0.)));
        assert_eq!(select_pin(&pins, Side::Right), Some(Point::new(-1., 0.)));
        assert_eq!(select_pin(&pins, Side::Top), Some(Point::new(0., -1.)));
        assert_eq!(select_pin(&pins, Side::Bot), Some(Point::new(0., 1.)));
        assert_eq!(select_pin(&[], Side::Bot), None);
    }

    #[test]
    fn test_grid() {
        let topo = Topology::grid(2, 3);
        assert_eq!(topo.positions.len(), 6);
        assert_eq!(topo.positions["q4"], (1, 1));
        // 2 rows of 2 horizontal edges, plus 3 vertical edges.
        assert_eq!(topo.edges.len(), 7);
        assert!(Topology::new(topo.positions.clone(), topo.edges.clone()).is_ok());

        let bad = vec![(ArcStr::from("q0"), ArcStr::from("q4"))];
        assert!(Topology::new(topo.positions, bad).is_err());
    }

    #[test]
    fn test_infer_coupling_lines() {
        let cfg = LayoutConfig::default();
        let qubits: Collection<Qubit> = complete_collection(
            &bag! {
                "q0" => bag! { "type" => "Transmon", "gds_pos" => Point::new(0., 0.) },
                "q1" => bag! { "type" => "Transmon", "gds_pos" => Point::new(1000., 0.) },
            },
            &cfg,
        )
        .unwrap();
        let topo = Topology::grid(1, 2);
        let lines = infer_coupling_lines(&topo, &qubits, CouplingLineType::CouplerBase).unwrap();
        let line = lines.get_bag("q0_q1").unwrap();
        assert_eq!(line.require_point("start_pos").unwrap(), Point::new(230., 0.));
        assert_eq!(line.require_point("end_pos").unwrap(), Point::new(770., 0.));

        let mut bare = qubits.clone();
        bare.get_mut("q1").unwrap().coupling_pins.clear();
        let err = infer_coupling_lines(&topo, &bare, CouplingLineType::CouplerBase).unwrap_err();
        assert!(matches!(err.source(), ErrorSource::MissingField { .. }));
    }
}
