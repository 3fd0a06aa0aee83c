//! Charge and flux control lines.

use arcstr::ArcStr;
use indexmap::IndexMap;
use qgeom::Point;
use serde::{Deserialize, Serialize};

use super::cpw::elbow;
use super::{unknown_type, Category, Component, DEFAULT_CHIP};
use crate::bag;
use crate::config::LayoutConfig;
use crate::error::Result;
use crate::layout::context::LayoutCtx;
use crate::options::{OptionBag, OptionValue};

#[derive(Debug, Copy, Clone, Eq, PartialEq, Hash, Serialize, Deserialize)]
pub enum ControlLineType {
    /// A straight line capacitively coupled to the qubit island.
    ChargeLine,
    /// A line that bends once before ending near the qubit's loop.
    FluxLine,
}

impl ControlLineType {
    pub fn as_str(&self) -> &'static str {
        match self {
            ControlLineType::ChargeLine => "ChargeLine",
            ControlLineType::FluxLine => "FluxLine",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ControlLine {
    pub name: ArcStr,
    #[serde(rename = "type")]
    pub kind: ControlLineType,
    pub chip: ArcStr,
    #[serde(default)]
    pub qubit: ArcStr,
    pub start_pos: Point,
    pub end_pos: Point,
    pub width: f64,
    pub gap: f64,
    pub corner_radius: f64,
    #[serde(default)]
    pub path: Vec<Point>,
    #[serde(flatten)]
    pub extra: IndexMap<ArcStr, OptionValue>,
}

impl Component for ControlLine {
    const CATEGORY: Category = Category::ControlLines;

    fn defaults(type_name: &str) -> Result<OptionBag> {
        let kind = match type_name {
            "ChargeLine" | "FluxLine" => type_name,
            _ => return Err(unknown_type(Self::CATEGORY, type_name).into()),
        };
        Ok(bag! {
            "type" => kind,
            "chip" => DEFAULT_CHIP,
            "qubit" => "",
            "width" => 10.,
            "gap" => 6.,
            "corner_radius" => 30.,
        })
    }

    fn required(_type_name: &str) -> &'static [&'static str] {
        &["start_pos", "end_pos"]
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
            ControlLineType::ChargeLine => vec![self.start_pos, self.end_pos],
            ControlLineType::FluxLine => elbow(self.start_pos, self.end_pos),
        };
        Ok(())
    }

    fn layout(&self, ctx: &mut LayoutCtx) -> Result<()> {
        ctx.draw_cpw(&self.path, self.width, self.gap, self.corner_radius);
        Ok(())
    }
}
