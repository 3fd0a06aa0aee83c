//! Qubit generation from topology positions.

use arcstr::ArcStr;
use indexmap::IndexMap;
use qgeom::Point;
use serde::Deserialize;

use super::{keyed, payload, unmatched, Branch};
use crate::bag;
use crate::component::qubit::QubitType;
use crate::error::Result;
use crate::options::OptionBag;

#[derive(Debug, Clone, PartialEq)]
pub enum QubitsRequest {
    /// One qubit per topology position, spaced `dist` apart.
    FromPositions {
        positions: IndexMap<ArcStr, (i64, i64)>,
        dist: f64,
        kind: QubitType,
    },
}

#[derive(Deserialize)]
struct FromPositions {
    topo_positions: IndexMap<ArcStr, (i64, i64)>,
    dist: f64,
    #[serde(default = "default_type")]
    qubits_type: QubitType,
}

fn default_type() -> QubitType {
    QubitType::Transmon
}

impl Branch for QubitsRequest {
    const NAME: &'static str = "qubits";
    const SIGNATURES: &'static [&'static str] =
        &["dist__topo_positions", "dist__qubits_type__topo_positions"];

    fn from_signature(signature: &str, bag: &OptionBag) -> Result<Self> {
        match signature {
            "dist__topo_positions" | "dist__qubits_type__topo_positions" => {
                let p: FromPositions = payload(bag)?;
                Ok(Self::FromPositions {
                    positions: p.topo_positions,
                    dist: p.dist,
                    kind: p.qubits_type,
                })
            }
            _ => Err(unmatched(Self::NAME, signature)),
        }
    }
}

impl QubitsRequest {
    /// Generates the qubits collection bag.
    pub fn generate(&self) -> Result<OptionBag> {
        let Self::FromPositions {
            positions,
            dist,
            kind,
        } = self;
        keyed(positions.iter().map(|(name, &(x, y))| {
            bag! {
                "name" => name,
                "type" => kind.as_str(),
                "topo_pos" => (x, y),
                "gds_pos" => Point::new(x as f64 * dist, y as f64 * dist),
            }
        }))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::branch::resolve;

    #[test]
    fn test_qubits_from_positions() {
        let req: QubitsRequest = resolve(&bag! {
            "topo_positions" => bag! { "q0" => (0i64, 0i64), "q1" => (1i64, 2i64) },
            "dist" => 1500.,
            "qubits_type" => "Xmon",
        })
        .unwrap();
        let qubits = req.generate().unwrap();
        let q1 = qubits.require_bag("q1").unwrap();
        assert_eq!(q1.require_point("gds_pos").unwrap(), Point::new(1500., 3000.));
        assert_eq!(q1.require_str("type").unwrap(), "Xmon");
        assert!(resolve::<QubitsRequest>(&bag! { "dist" => 1. }).is_err());
    }
}
