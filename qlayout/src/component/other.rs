//! Free-form polygons.

use arcstr::ArcStr;
use indexmap::IndexMap;
use qgeom::{Point, Polygon};
use serde::{Deserialize, Serialize};

use super::{unknown_type, Category, Component, DEFAULT_CHIP};
use crate::bag;
use crate::error::Result;
use crate::layout::context::LayoutCtx;
use crate::options::{OptionBag, OptionValue};

#[derive(Debug, Copy, Clone, Eq, PartialEq, Hash, Serialize, Deserialize)]
pub enum OtherType {
    Polygons,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Other {
    pub name: ArcStr,
    #[serde(rename = "type")]
    pub kind: OtherType,
    pub chip: ArcStr,
    /// Polygon vertex lists, in layout coordinates.
    pub polygons: Vec<Vec<Point>>,
    #[serde(flatten)]
    pub extra: IndexMap<ArcStr, OptionValue>,
}

impl Component for Other {
    const CATEGORY: Category = Category::Others;

    fn defaults(type_name: &str) -> Result<OptionBag> {
        match type_name {
            "Polygons" => Ok(bag! {
                "type" => "Polygons",
                "chip" => DEFAULT_CHIP,
            }),
            _ => Err(unknown_type(Self::CATEGORY, type_name).into()),
        }
    }

    fn required(_type_name: &str) -> &'static [&'static str] {
        &["polygons"]
    }

    fn name(&self) -> &ArcStr {
        &self.name
    }

    fn chip(&self) -> &ArcStr {
        &self.chip
    }

    fn type_name(&self) -> &'static str {
        "Polygons"
    }

    fn layout(&self, ctx: &mut LayoutCtx) -> Result<()> {
        for points in self.polygons.iter().filter(|p| p.len() >= 3) {
            ctx.draw(Polygon::new(points.clone()));
        }
        Ok(())
    }
}
