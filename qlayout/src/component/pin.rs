//! Launch pads at the chip edge.

use arcstr::ArcStr;
use indexmap::IndexMap;
use qgeom::transform::{Transform, Transformation};
use qgeom::Point;
use serde::{Deserialize, Serialize};

use super::{unknown_type, Category, Component, DEFAULT_CHIP};
use crate::bag;
use crate::config::LayoutConfig;
use crate::error::Result;
use crate::layout::context::LayoutCtx;
use crate::options::{OptionBag, OptionValue};

#[derive(Debug, Copy, Clone, Eq, PartialEq, Hash, Serialize, Deserialize)]
pub enum PinType {
    LaunchPad,
}

/// A bonding pad tapering down to a line.
///
/// In the local frame the pad is centered on the origin and the taper points along +x.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Pin {
    pub name: ArcStr,
    #[serde(rename = "type")]
    pub kind: PinType,
    pub chip: ArcStr,
    pub position: Point,
    pub rotation: f64,
    pub pad_width: f64,
    pub pad_length: f64,
    pub taper_length: f64,
    /// Conductor width at the end of the taper.
    pub width: f64,
    pub gap: f64,
    /// Where a line attaches to the end of the taper. Derived.
    #[serde(default)]
    pub line_pos: Point,
    #[serde(flatten)]
    pub extra: IndexMap<ArcStr, OptionValue>,
}

impl Pin {
    fn transformation(&self) -> Transformation {
        Transformation::with_loc_and_angle(self.position, self.rotation)
    }
}

impl Component for Pin {
    const CATEGORY: Category = Category::Pins;

    fn defaults(type_name: &str) -> Result<OptionBag> {
        match type_name {
            "LaunchPad" => Ok(bag! {
                "type" => "LaunchPad",
                "chip" => DEFAULT_CHIP,
                "rotation" => 0.,
                "pad_width" => 250.,
                "pad_length" => 250.,
                "taper_length" => 200.,
                "width" => 10.,
                "gap" => 6.,
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
        "LaunchPad"
    }

    fn derive(&mut self, _cfg: &LayoutConfig) -> Result<()> {
        self.line_pos =
            Point::new(self.pad_length / 2. + self.taper_length, 0.).transform(self.transformation());
        Ok(())
    }

    fn layout(&self, ctx: &mut LayoutCtx) -> Result<()> {
        let g = self.gap;
        let (pl, pw) = (self.pad_length / 2., self.pad_width / 2.);
        let end = pl + self.taper_length;
        let w = self.width / 2.;
        ctx.draw_polygon_with(
            vec![
                Point::new(-pl - g, -pw - g),
                Point::new(pl, -pw - g),
                Point::new(end, -w - g),
                Point::new(end, w + g),
                Point::new(pl, pw + g),
                Point::new(-pl - g, pw + g),
            ],
            self.transformation(),
        );
        Ok(())
    }
}
