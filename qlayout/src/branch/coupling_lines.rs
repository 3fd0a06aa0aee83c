//! Coupling-line generation from the topology.

use serde::Deserialize;

use super::{payload, unmatched, Branch};
use crate::component::coupling_line::CouplingLineType;
use crate::component::{complete_collection, Qubit};
use crate::config::LayoutConfig;
use crate::error::Result;
use crate::options::OptionBag;
use crate::topology::{infer_coupling_lines, Topology};

#[derive(Debug, Clone, PartialEq)]
pub enum CouplingLinesRequest {
    /// One line per topology edge, between the facing coupling pins.
    Infer {
        qubits: OptionBag,
        topology: Topology,
        kind: CouplingLineType,
    },
}

#[derive(Deserialize)]
struct Infer {
    qubits_ops: OptionBag,
    topo_ops: Topology,
    #[serde(default = "default_type")]
    cp_type: CouplingLineType,
}

fn default_type() -> CouplingLineType {
    CouplingLineType::CouplerBase
}

impl Branch for CouplingLinesRequest {
    const NAME: &'static str = "coupling_lines";
    const SIGNATURES: &'static [&'static str] =
        &["qubits_ops__topo_ops", "cp_type__qubits_ops__topo_ops"];

    fn from_signature(signature: &str, bag: &OptionBag) -> Result<Self> {
        match signature {
            "qubits_ops__topo_ops" | "cp_type__qubits_ops__topo_ops" => {
                let p: Infer = payload(bag)?;
                Ok(Self::Infer {
                    qubits: p.qubits_ops,
                    topology: p.topo_ops,
                    kind: p.cp_type,
                })
            }
            _ => Err(unmatched(Self::NAME, signature)),
        }
    }
}

impl CouplingLinesRequest {
    /// Generates the coupling lines collection bag.
    pub fn generate(&self, cfg: &LayoutConfig) -> Result<OptionBag> {
        let Self::Infer {
            qubits,
            topology,
            kind,
        } = self;
        let qubits = complete_collection::<Qubit>(qubits, cfg)?;
        infer_coupling_lines(topology, &qubits, *kind)
    }
}
