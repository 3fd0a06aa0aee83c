//! Coupling lines between pairs of qubits.

use arcstr::ArcStr;
use indexmap::IndexMap;
use qgeom::Point;
use serde::{Deserialize, Serialize};

use super::cpw::meander;
use super::{unknown_type, Category, Component, DEFAULT_CHIP};
use crate::bag;
use crate::config::LayoutConfig;
use crate::error::Result;
use crate::layout::context::LayoutCtx;
use crate::options::{OptionBag, OptionValue};

#[derive(Debug, Copy, Clone, Eq, PartialEq, Hash, Serialize, Deserialize)]
pub enum CouplingLineType {
    /// A straight line between the two pins.
    CouplerBase,
    /// A meandered resonator between the two pins.
    CouplingCavity,
}

impl CouplingLineType {
    pub fn as_str(&self) -> &'static str {
        match self {
            CouplingLineType::CouplerBase => "CouplerBase",
            CouplingLineType::CouplingCavity => "CouplingCavity",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CouplingLine {
    pub name: ArcStr,
    #[serde(rename = "type")]
    pub kind: CouplingLineType,
    pub chip: ArcStr,
    /// Names of the coupled qubits.
    #[serde(default)]
    pub qubits: Vec<ArcStr>,
    pub start_pos: Point,
    pub end_pos: Point,
    pub width: f64,
    pub gap: f64,
    pub corner_radius: f64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub length: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub turns: Option<usize>,
    /// The centerline, derived from the endpoints.
    #[serde(default)]
    pub path: Vec<Point>,
    #[serde(flatten)]
    pub extra: IndexMap<ArcStr, OptionValue>,
}

impl Component for CouplingLine {
    const CATEGORY: Category = Category::CouplingLines;

    fn defaults(type_name: &str) -> Result<OptionBag> {
        let bag = match type_name {
            "CouplerBase" => bag! {
                "type" => "CouplerBase",
                "chip" => DEFAULT_CHIP,
                "width" => 10.,
                "gap" => 6.,
                "corner_radius" => 0.,
            },
            "CouplingCavity" => bag! {
                "type" => "CouplingCavity",
                "chip" => DEFAULT_CHIP,
                "width" => 10.,
                "gap" => 6.,
                "corner_radius" => 20.,
                "turns" => 4usize,
            },
            _ => return Err(unknown_type(Self::CATEGORY, type_name).into()),
        };
        Ok(bag)
    }

    fn required(type_name: &str) -> &'static [&'static str] {
        match type_name {
            "CouplingCavity" => &["start_pos", "end_pos", "length"],
            _ => &["start_pos", "end_pos"],
        }
    }

    fn name(&self) -> &ArcStr {
        &self.name
    }

    fn chip(&self) -> &ArcStr {
        &self.chip
    }

    fn type_name(&self) -> &'static str {
        self.kind.as_str()
    }

    fn derive(&mut self, _cfg: &LayoutConfig) -> Result<()> {
        self.path = match self.kind {
            CouplingLineType::CouplerBase => vec![self.start_pos, self.end_pos],
            CouplingLineType::CouplingCavity => meander(
                self.start_pos,
                self.end_pos,
                self.length.unwrap_or_else(|| self.start_pos.distance(self.end_pos)),
                self.turns.unwrap_or(0),
            )?,
        };
        Ok(())
    }

    fn layout(&self, ctx: &mut LayoutCtx) -> Result<()> {
        ctx.draw_cpw(&self.path, self.width, self.gap, self.corner_radius);
        Ok(())
    }
}
