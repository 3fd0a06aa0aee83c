//! Readout-line generation, one resonator per qubit.

use arcstr::ArcStr;
use qgeom::Point;
use serde::Deserialize;

use super::{keyed, payload, unmatched, Branch};
use crate::bag;
use crate::component::{complete_collection, Qubit};
use crate::config::LayoutConfig;
use crate::error::{ErrorSource, Result};
use crate::options::OptionBag;

/// Straight-line distance between a readout resonator's two ends.
pub const READOUT_SPAN: f64 = 300.;

#[derive(Debug, Clone, PartialEq)]
pub enum ReadoutLinesRequest {
    /// A resonator leaving each qubit's first readout pin, pointing away from the qubit.
    FromQubits {
        qubits: OptionBag,
        length: Option<f64>,
    },
}

#[derive(Deserialize)]
struct FromQubits {
    qubits_ops: OptionBag,
    #[serde(default)]
    rd_length: Option<f64>,
}

impl Branch for ReadoutLinesRequest {
    const NAME: &'static str = "readout_lines";
    const SIGNATURES: &'static [&'static str] = &["qubits_ops", "qubits_ops__rd_length"];

    fn from_signature(signature: &str, bag: &OptionBag) -> Result<Self> {
        match signature {
            "qubits_ops" | "qubits_ops__rd_length" => {
                let p: FromQubits = payload(bag)?;
                Ok(Self::FromQubits {
                    qubits: p.qubits_ops,
                    length: p.rd_length,
                })
            }
            _ => Err(unmatched(Self::NAME, signature)),
        }
    }
}

impl ReadoutLinesRequest {
    /// Generates the readout lines collection bag.
    pub fn generate(&self, cfg: &LayoutConfig) -> Result<OptionBag> {
        let Self::FromQubits { qubits, length } = self;
        let qubits = complete_collection::<Qubit>(qubits, cfg)?;
        let lines = qubits
            .values()
            .map(|qubit| {
                let start = *qubit.readout_pins.first().ok_or_else(|| ErrorSource::MissingField {
                    component: qubit.name.clone(),
                    field: arcstr::literal!("readout_pins"),
                })?;
                let dir = (start - qubit.gds_pos)
                    .normalized()
                    .unwrap_or(Point::new(0., 1.));
                let mut line = bag! {
                    "name" => ArcStr::from(format!("{}_readout", qubit.name)),
                    "type" => "ReadoutCavity",
                    "chip" => &qubit.chip,
                    "qubit" => &qubit.name,
                    "start_pos" => start,
                    "end_pos" => start + dir * READOUT_SPAN,
                };
                if let Some(length) = length {
                    line.insert("length", *length);
                }
                Ok(line)
            })
            .collect::<Result<Vec<_>>>()?;
        keyed(lines)
    }
}

#[cfg(test)]
mod tests {
    use float_eq::assert_float_eq;

    use super::*;
    use crate::branch::resolve;

    #[test]
    fn test_readout_leaves_qubit() {
        let req: ReadoutLinesRequest = resolve(&bag! {
            "qubits_ops" => bag! { "q0" => bag! { "type" => "Transmon" } },
            "rd_length" => 2500.,
        })
        .unwrap();
        let lines = req.generate(&LayoutConfig::default()).unwrap();
        let line = lines.require_bag("q0_readout").unwrap();
        let start = line.require_point("start_pos").unwrap();
        let end = line.require_point("end_pos").unwrap();
        assert_eq!(start, Point::new(230., 180.));
        assert_float_eq!(start.distance(end), READOUT_SPAN, abs <= 1e-9);
        assert!(end.norm() > start.norm());
        assert_eq!(line.require_f64("length").unwrap(), 2500.);
    }

    #[test]
    fn test_custom_qubit_without_pins() {
        let req: ReadoutLinesRequest = resolve(&bag! {
            "qubits_ops" => bag! { "q0" => bag! { "type" => "Custom" } },
        })
        .unwrap();
        let err = req.generate(&LayoutConfig::default()).unwrap_err();
        assert!(matches!(err.source(), ErrorSource::MissingField { .. }));
    }
}
