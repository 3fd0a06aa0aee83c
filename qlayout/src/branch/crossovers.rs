//! Insulating-sheet generation at line crossings.

use arcstr::ArcStr;
use serde::Deserialize;

use super::{keyed, payload, unmatched, Branch};
use crate::bag;
use crate::component::{complete_collection, CouplingLine, TransmissionLine};
use crate::config::LayoutConfig;
use crate::error::Result;
use crate::options::OptionBag;
use crate::placement::place_crossovers;

#[derive(Debug, Clone, PartialEq)]
pub enum CrossoversRequest {
    /// A sheet at every crossing of a coupling line with a transmission line.
    AtCrossings {
        coupling_lines: OptionBag,
        transmission_lines: OptionBag,
    },
}

#[derive(Deserialize)]
struct AtCrossings {
    coupling_lines_ops: OptionBag,
    transmission_lines_ops: OptionBag,
}

impl Branch for CrossoversRequest {
    const NAME: &'static str = "crossovers";
    const SIGNATURES: &'static [&'static str] = &["coupling_lines_ops__transmission_lines_ops"];

    fn from_signature(signature: &str, bag: &OptionBag) -> Result<Self> {
        match signature {
            "coupling_lines_ops__transmission_lines_ops" => {
                let p: AtCrossings = payload(bag)?;
                Ok(Self::AtCrossings {
                    coupling_lines: p.coupling_lines_ops,
                    transmission_lines: p.transmission_lines_ops,
                })
            }
            _ => Err(unmatched(Self::NAME, signature)),
        }
    }
}

impl CrossoversRequest {
    /// Generates the crossovers collection bag.
    ///
    /// Sheets are placed on the coupling line's chip.
    pub fn generate(&self, cfg: &LayoutConfig) -> Result<OptionBag> {
        let Self::AtCrossings {
            coupling_lines,
            transmission_lines,
        } = self;
        let couplers = complete_collection::<CouplingLine>(coupling_lines, cfg)?;
        let lines = complete_collection::<TransmissionLine>(transmission_lines, cfg)?;
        let crossings = place_crossovers(&couplers, &lines)?;
        keyed(crossings.iter().enumerate().map(|(i, c)| {
            bag! {
                "name" => ArcStr::from(format!("{}_{}_co{i}", c.coupler, c.line)),
                "type" => "InsulatingSheet",
                "chip" => &c.chip,
                "position" => c.placement.position,
                "rotation" => c.placement.rotation,
            }
        }))
    }
}
