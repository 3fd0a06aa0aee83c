//! Indium bumps for flip-chip bonding.

use arcstr::ArcStr;
use indexmap::IndexMap;
use qgeom::Point;
use serde::{Deserialize, Serialize};

use super::{unknown_type, Category, Component, DEFAULT_CHIP};
use crate::bag;
use crate::error::Result;
use crate::layout::context::LayoutCtx;
use crate::options::{OptionBag, OptionValue};

#[derive(Debug, Copy, Clone, Eq, PartialEq, Hash, Serialize, Deserialize)]
pub enum IndiumBumpType {
    IndiumBump,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct IndiumBump {
    pub name: ArcStr,
    #[serde(rename = "type")]
    pub kind: IndiumBumpType,
    pub chip: ArcStr,
    pub position: Point,
    pub radius: f64,
    #[serde(flatten)]
    pub extra: IndexMap<ArcStr, OptionValue>,
}

impl Component for IndiumBump {
    const CATEGORY: Category = Category::IndiumBumps;

    fn defaults(type_name: &str) -> Result<OptionBag> {
        match type_name {
            "IndiumBump" => Ok(bag! {
                "type" => "IndiumBump",
                "chip" => DEFAULT_CHIP,
                "radius" => 10.,
            }),
            _ => Err(unknown_type(Self::CATEGORY, type_name).into()),
        }
    }

    fn required(_type_name: &str) -> &'static [&'static str] {
        &["position"]
    }

    fn name(&self) -> &ArcStr {
        &self.name
    }

    fn chip(&self) -> &ArcStr {
        &self.chip
    }

    fn type_name(&self) -> &'static str {
        "IndiumBump"
    }

    fn layout(&self, ctx: &mut LayoutCtx) -> Result<()> {
        ctx.draw_circle(self.position, self.radius);
        Ok(())
    }
}
