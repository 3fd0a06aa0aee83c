//! Readout resonators.

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
pub enum ReadoutLineType {
    ReadoutCavity,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ReadoutLine {
    pub name: ArcStr,
    #[serde(rename = "type")]
    pub kind: ReadoutLineType,
    pub chip: ArcStr,
    /// The qubit read out by this resonator.
    #[serde(default)]
    pub qubit: ArcStr,
    pub start_pos: Point,
    pub end_pos: Point,
    /// Total resonator length.
    pub length: f64,
    pub turns: usize,
    pub width: f64,
    pub gap: f64,
    pub corner_radius: f64,
    #[serde(default)]
    pub path: Vec<Point>,
    #[serde(flatten)]
    pub extra: IndexMap<ArcStr, OptionValue>,
}

impl Component for ReadoutLine {
    const CATEGORY: Category = Category::ReadoutLines;

    fn defaults(type_name: &str) -> Result<OptionBag> {
        match type_name {
            "ReadoutCavity" => Ok(bag! {
                "type" => "ReadoutCavity",
                "chip" => DEFAULT_CHIP,
                "qubit" => "",
                "length" => 3000.,
                "turns" => 6usize,
                "width" => 10.,
                "gap" => 6.,
                "corner_radius" => 20.,
            }),
            _ => Err(unknown_type(Self::CATEGORY, type_name).into()),
        }
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
        "ReadoutCavity"
    }

    fn derive(&mut self, _cfg: &LayoutConfig) -> Result<()> {
        self.path = meander(self.start_pos, self.end_pos, self.length, self.turns)?;
        Ok(())
    }

    fn layout(&self, ctx: &mut LayoutCtx) -> Result<()> {
        ctx.draw_cpw(&self.path, self.width, self.gap, self.corner_radius);
        Ok(())
    }
}
