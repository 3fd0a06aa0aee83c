//! Air bridges spanning a line.

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
pub enum AirBridgeType {
    AirBridge,
}

/// An air bridge.
///
/// In the bridge's local frame the spanned line runs along x;
/// the bridge crosses it along y, landing on a pad at each end.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AirBridge {
    pub name: ArcStr,
    #[serde(rename = "type")]
    pub kind: AirBridgeType,
    pub chip: ArcStr,
    pub position: Point,
    /// Direction of the spanned line, in degrees.
    pub rotation: f64,
    /// Distance between the pad centers.
    pub length: f64,
    /// Width of the bridge strip.
    pub width: f64,
    pub pad_width: f64,
    pub pad_length: f64,
    #[serde(flatten)]
    pub extra: IndexMap<ArcStr, OptionValue>,
}

impl Component for AirBridge {
    const CATEGORY: Category = Category::AirBridges;

    fn defaults(type_name: &str) -> Result<OptionBag> {
        match type_name {
            "AirBridge" => Ok(bag! {
                "type" => "AirBridge",
                "chip" => DEFAULT_CHIP,
                "rotation" => 0.,
                "length" => 40.,
                "width" => 10.,
                "pad_width" => 20.,
                "pad_length" => 14.,
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
        "AirBridge"
    }

    fn layout(&self, ctx: &mut LayoutCtx) -> Result<()> {
        let trans = Transformation::with_loc_and_angle(self.position, self.rotation);
        let half = self.length / 2.;
        ctx.draw_rect_with(
            Rect::from_center_dims(Point::zero(), self.width, self.length),
            trans,
        );
        for y in [-half, half] {
            ctx.draw_rect_with(
                Rect::from_center_dims(Point::new(0., y), self.pad_width, self.pad_length),
                trans,
            );
        }
        Ok(())
    }
}
