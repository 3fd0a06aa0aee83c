//! Insulating sheets placed where two lines cross.

use arcstr::ArcStr;
use indexmap::IndexMap;
use qgeom::transform::Transformation;
use qgeom::{Point, Rect};
use serde::{Deserialize, Serialize};

use super::{unknown_type, Category, Component, DEFAULT_CHIP};
use crate::bag;
use crate::error::Result;
use crate::layout::context::LayoutCtx;
use crate::options::{OptionBag, OptionValue};

#[derive(Debug, Copy, Clone, Eq, PartialEq, Hash, Serialize, Deserialize)]
pub enum CrossOverType {
    InsulatingSheet,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CrossOver {
    pub name: ArcStr,
    #[serde(rename = "type")]
    pub kind: CrossOverType,
    pub chip: ArcStr,
    pub position: Point,
    /// Counter-clockwise rotation, in degrees.
    pub rotation: f64,
    pub width: f64,
    pub height: f64,
    #[serde(flatten)]
    pub extra: IndexMap<ArcStr, OptionValue>,
}

impl Component for CrossOver {
    const CATEGORY: Category = Category::Crossovers;

    fn defaults(type_name: &str) -> Result<OptionBag> {
        match type_name {
            "InsulatingSheet" => Ok(bag! {
                "type" => "InsulatingSheet",
                "chip" => DEFAULT_CHIP,
                "rotation" => 0.,
                "width" => 40.,
                "height" => 40.,
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
        "InsulatingSheet"
    }

    fn layout(&self, ctx: &mut LayoutCtx) -> Result<()> {
        ctx.draw_rect_with(
            Rect::from_center_dims(Point::zero(), self.width, self.height),
            Transformation::with_loc_and_angle(self.position, self.rotation),
        );
        Ok(())
    }
}
