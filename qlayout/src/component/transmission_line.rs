//! Transmission lines routed along explicit paths.

use arcstr::ArcStr;
use indexmap::IndexMap;
use qgeom::path::{dedup, Path};
use qgeom::Point;
use serde::{Deserialize, Serialize};

use super::{unknown_type, Category, Component, DEFAULT_CHIP};
use crate::bag;
use crate::config::LayoutConfig;
use crate::error::{ErrorSource, Result};
use crate::layout::context::LayoutCtx;
use crate::options::{OptionBag, OptionValue};

#[derive(Debug, Copy, Clone, Eq, PartialEq, Hash, Serialize, Deserialize)]
pub enum TransmissionLineType {
    TransmissionPath,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TransmissionLine {
    pub name: ArcStr,
    #[serde(rename = "type")]
    pub kind: TransmissionLineType,
    pub chip: ArcStr,
    /// The centerline vertices.
    pub path: Vec<Point>,
    pub width: f64,
    pub gap: f64,
    pub corner_radius: f64,
    #[serde(flatten)]
    pub extra: IndexMap<ArcStr, OptionValue>,
}

impl TransmissionLine {
    /// The centerline as a [`Path`] of the conductor width.
    pub fn centerline(&self) -> Path {
        Path::new(self.path.clone(), self.width)
    }
}

impl Component for TransmissionLine {
    const CATEGORY: Category = Category::TransmissionLines;

    fn defaults(type_name: &str) -> Result<OptionBag> {
        match type_name {
            "TransmissionPath" => Ok(bag! {
                "type" => "TransmissionPath",
                "chip" => DEFAULT_CHIP,
                "width" => 10.,
                "gap" => 6.,
                "corner_radius" => 30.,
            }),
            _ => Err(unknown_type(Self::CATEGORY, type_name).into()),
        }
    }

    fn required(_type_name: &str) -> &'static [&'static str] {
        &["path"]
    }

    fn name(&self) -> &ArcStr {
        &self.name
    }

    fn chip(&self) -> &ArcStr {
        &self.chip
    }

    fn type_name(&self) -> &'static str {
        "TransmissionPath"
    }

    fn derive(&mut self, _cfg: &LayoutConfig) -> Result<()> {
        self.path = dedup(&self.path);
        if self.path.len() < 2 {
            return Err(ErrorSource::InvalidOption(format!(
                "transmission line {} needs at least two distinct path points",
                self.name
            ))
            .into());
        }
        Ok(())
    }

    fn layout(&self, ctx: &mut LayoutCtx) -> Result<()> {
        ctx.draw_cpw(&self.path, self.width, self.gap, self.corner_radius);
        Ok(())
    }
}
