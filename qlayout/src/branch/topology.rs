//! Topology generation.

use arcstr::ArcStr;
use indexmap::IndexMap;
use serde::Deserialize;

use super::{payload, unmatched, Branch};
use crate::error::Result;
use crate::options::OptionBag;
use crate::topology::Topology;

#[derive(Debug, Clone, PartialEq)]
pub enum TopologyRequest {
    /// A full grid with nearest-neighbor edges.
    Grid { rows: usize, cols: usize },
    /// Explicit positions and edges.
    Explicit(Topology),
}

#[derive(Deserialize)]
struct Grid {
    row_num: usize,
    col_num: usize,
}

#[derive(Deserialize)]
struct Explicit {
    positions: IndexMap<ArcStr, (i64, i64)>,
    edges: Vec<(ArcStr, ArcStr)>,
}

impl Branch for TopologyRequest {
    const NAME: &'static str = "topology";
    const SIGNATURES: &'static [&'static str] = &["col_num__row_num", "edges__positions"];

    fn from_signature(signature: &str, bag: &OptionBag) -> Result<Self> {
        match signature {
            "col_num__row_num" => {
                let p: Grid = payload(bag)?;
                Ok(Self::Grid {
                    rows: p.row_num,
                    cols: p.col_num,
                })
            }
            "edges__positions" => {
                let p: Explicit = payload(bag)?;
                Ok(Self::Explicit(Topology::new(p.positions, p.edges)?))
            }
            _ => Err(unmatched(Self::NAME, signature)),
        }
    }
}

impl TopologyRequest {
    pub fn generate(&self) -> Topology {
        match self {
            Self::Grid { rows, cols } => Topology::grid(*rows, *cols),
            Self::Explicit(topo) => topo.clone(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::bag;
    use crate::branch::resolve;
    use crate::error::ErrorSource;
    use crate::options::OptionValue;

    #[test]
    fn test_grid_request() {
        let req: TopologyRequest = resolve(&bag! { "row_num" => 2, "col_num" => 2 }).unwrap();
        let topo = req.generate();
        assert_eq!(topo.positions.len(), 4);
        assert_eq!(topo.edges.len(), 4);
    }

    #[test]
    fn test_explicit_request_checks_adjacency() {
        let positions = bag! { "a" => (0i64, 0i64), "b" => (1i64, 1i64) };
        let edges = vec![OptionValue::from(vec!["a", "b"])];
        let err = resolve::<TopologyRequest>(&bag! { "positions" => positions, "edges" => edges })
            .unwrap_err();
        assert!(matches!(err.source(), ErrorSource::NotAdjacent { .. }));
    }
}
