//! Chips: named rectangular regions, each drawn on its own layer.

use arcstr::ArcStr;
use indexmap::IndexMap;
use qgeom::{Point, Rect};
use serde::{Deserialize, Serialize};

use super::{unknown_type, Category, Component};
use crate::bag;
use crate::config::LayoutConfig;
use crate::error::Result;
use crate::layout::context::LayoutCtx;
use crate::layout::layers::chip_layer;
use crate::options::{OptionBag, OptionValue};

#[derive(Debug, Copy, Clone, Eq, PartialEq, Hash, Serialize, Deserialize)]
pub enum ChipType {
    RecChip,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Chip {
    pub name: ArcStr,
    #[serde(rename = "type")]
    pub kind: ChipType,
    pub start_pos: Point,
    pub end_pos: Point,
    /// The layer all of this chip's geometry is flattened onto.
    #[serde(default)]
    pub layer: i16,
    #[serde(flatten)]
    pub extra: IndexMap<ArcStr, OptionValue>,
}

impl Chip {
    pub fn rect(&self) -> Rect {
        Rect::new(self.start_pos, self.end_pos)
    }
}

impl Component for Chip {
    const CATEGORY: Category = Category::Chips;

    fn defaults(type_name: &str) -> Result<OptionBag> {
        match type_name {
            "RecChip" => Ok(bag! { "type" => "RecChip" }),
            _ => Err(unknown_type(Self::CATEGORY, type_name).into()),
        }
    }

    fn required(_type_name: &str) -> &'static [&'static str] {
        &["start_pos", "end_pos"]
    }

    fn name(&self) -> &ArcStr {
        &self.name
    }

    /// A chip is drawn on itself.
    fn chip(&self) -> &ArcStr {
        &self.name
    }

    fn type_name(&self) -> &'static str {
        "RecChip"
    }

    fn derive(&mut self, cfg: &LayoutConfig) -> Result<()> {
        self.layer = chip_layer(&self.name, cfg);
        Ok(())
    }

    /// Chips only declare a region; they carry no geometry of their own.
    fn layout(&self, _ctx: &mut LayoutCtx) -> Result<()> {
        Ok(())
    }
}
