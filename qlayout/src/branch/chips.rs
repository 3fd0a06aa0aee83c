//! Chip generation.

use arcstr::ArcStr;
use indexmap::IndexMap;
use qgeom::bbox::Bbox;
use qgeom::Point;
use serde::Deserialize;

use super::{keyed, payload, unmatched, Branch};
use crate::bag;
use crate::component::{complete_collection, Qubit};
use crate::config::LayoutConfig;
use crate::error::Result;
use crate::options::OptionBag;

/// Clearance between the qubits and the chip edge when none is given.
pub const DEFAULT_MARGIN: f64 = 500.;

#[derive(Debug, Clone, PartialEq)]
pub enum ChipsRequest {
    /// One chip per chip name used by the qubits, enclosing them with a margin.
    FromQubits { qubits: OptionBag, margin: f64 },
    /// A single chip with explicit corners.
    Explicit {
        name: ArcStr,
        start: Point,
        end: Point,
    },
}

#[derive(Deserialize)]
struct FromQubits {
    qubits_ops: OptionBag,
    #[serde(default = "default_margin")]
    margin: f64,
}

fn default_margin() -> f64 {
    DEFAULT_MARGIN
}

#[derive(Deserialize)]
struct Explicit {
    chip_name: ArcStr,
    start_pos: Point,
    end_pos: Point,
}

impl Branch for ChipsRequest {
    const NAME: &'static str = "chips";
    const SIGNATURES: &'static [&'static str] = &[
        "qubits_ops",
        "margin__qubits_ops",
        "chip_name__end_pos__start_pos",
    ];

    fn from_signature(signature: &str, bag: &OptionBag) -> Result<Self> {
        match signature {
            "qubits_ops" | "margin__qubits_ops" => {
                let p: FromQubits = payload(bag)?;
                Ok(Self::FromQubits {
                    qubits: p.qubits_ops,
                    margin: p.margin,
                })
            }
            "chip_name__end_pos__start_pos" => {
                let p: Explicit = payload(bag)?;
                Ok(Self::Explicit {
                    name: p.chip_name,
                    start: p.start_pos,
                    end: p.end_pos,
                })
            }
            _ => Err(unmatched(Self::NAME, signature)),
        }
    }
}

fn chip_bag(name: &ArcStr, start: Point, end: Point) -> OptionBag {
    bag! {
        "name" => name,
        "type" => "RecChip",
        "start_pos" => start,
        "end_pos" => end,
    }
}

impl ChipsRequest {
    /// Generates the chips collection bag.
    pub fn generate(&self, cfg: &LayoutConfig) -> Result<OptionBag> {
        match self {
            Self::FromQubits { qubits, margin } => {
                let qubits = complete_collection::<Qubit>(qubits, cfg)?;
                let mut extents: IndexMap<ArcStr, Bbox> = IndexMap::new();
                for qubit in qubits.values() {
                    let bbox = extents.entry(qubit.chip.clone()).or_default();
                    *bbox = bbox.union(qubit.extent());
                }
                keyed(extents.into_iter().filter(|(_, b)| !b.is_empty()).map(
                    |(chip, mut bbox)| {
                        bbox.expand(*margin);
                        chip_bag(&chip, bbox.p0, bbox.p1)
                    },
                ))
            }
            Self::Explicit { name, start, end } => keyed([chip_bag(name, *start, *end)]),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::branch::resolve;

    #[test]
    fn test_chips_enclose_qubits() {
        let req: ChipsRequest = resolve(&bag! {
            "qubits_ops" => bag! {
                "q0" => bag! { "type" => "Transmon", "gds_pos" => Point::new(0., 0.) },
                "q1" => bag! { "type" => "Transmon", "gds_pos" => Point::new(1000., 0.) },
                "q2" => bag! { "type" => "Transmon", "chip" => "chip1" },
            },
            "margin" => 100.,
        })
        .unwrap();
        let chips = req.generate(&LayoutConfig::default()).unwrap();
        assert_eq!(chips.len(), 2);
        let chip0 = chips.require_bag("chip0").unwrap();
        assert_eq!(chip0.require_point("start_pos").unwrap(), Point::new(-330., -280.));
        assert_eq!(chip0.require_point("end_pos").unwrap(), Point::new(1330., 280.));
        assert!(chips.contains_key("chip1"));
    }

    #[test]
    fn test_explicit_chip() {
        let req: ChipsRequest = resolve(&bag! {
            "chip_name" => "chip3",
            "start_pos" => Point::zero(),
            "end_pos" => Point::new(10., 10.),
        })
        .unwrap();
        let chips = req.generate(&LayoutConfig::default()).unwrap();
        assert_eq!(chips.require_bag("chip3").unwrap().require_str("type").unwrap(), "RecChip");
    }
}
