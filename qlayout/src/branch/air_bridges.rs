//! Air-bridge generation along routed lines.

use arcstr::ArcStr;
use indexmap::IndexMap;
use qgeom::path::Path;
use qgeom::Point;
use serde::Deserialize;

use super::{keyed, payload, unmatched, Branch};
use crate::bag;
use crate::component::DEFAULT_CHIP;
use crate::config::PlacementConfig;
use crate::error::{with_err_context, ErrorContext, Result};
use crate::log::info;
use crate::options::OptionBag;
use crate::placement::place_air_bridges;

/// The geometry of one line to place bridges along.
///
/// Completed line bags carry these fields, so a line collection can be passed as is.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct PathOp {
    pub path: Vec<Point>,
    pub width: f64,
    #[serde(default)]
    pub corner_radius: f64,
    #[serde(default)]
    pub chip: Option<ArcStr>,
}

#[derive(Debug, Clone, PartialEq)]
pub enum AirBridgesRequest {
    AlongPaths {
        paths: IndexMap<ArcStr, PathOp>,
        spacing: f64,
        /// Overrides the chip of every line.
        chip: Option<ArcStr>,
    },
}

#[derive(Deserialize)]
struct AlongPaths {
    path_ops: IndexMap<ArcStr, PathOp>,
    spacing: f64,
    #[serde(default)]
    chip: Option<ArcStr>,
}

impl Branch for AirBridgesRequest {
    const NAME: &'static str = "air_bridges";
    const SIGNATURES: &'static [&'static str] =
        &["path_ops__spacing", "chip__path_ops__spacing"];

    fn from_signature(signature: &str, bag: &OptionBag) -> Result<Self> {
        match signature {
            "path_ops__spacing" | "chip__path_ops__spacing" => {
                let p: AlongPaths = payload(bag)?;
                Ok(Self::AlongPaths {
                    paths: p.path_ops,
                    spacing: p.spacing,
                    chip: p.chip,
                })
            }
            _ => Err(unmatched(Self::NAME, signature)),
        }
    }
}

impl AirBridgesRequest {
    /// Generates the air bridges collection bag.
    ///
    /// Bridges along line `l` are named `l_ab0`, `l_ab1`, ... in path order.
    pub fn generate(&self, cfg: &PlacementConfig) -> Result<OptionBag> {
        let Self::AlongPaths {
            paths,
            spacing,
            chip,
        } = self;
        let mut bags = Vec::new();
        for (line, op) in paths {
            let path = Path::new(op.path.clone(), op.width);
            let placed = with_err_context(
                place_air_bridges(&path, op.corner_radius, *spacing, cfg),
                || ErrorContext::Task(ArcStr::from(format!("placing air bridges along {line}"))),
            )?;
            info!("placed {} air bridges along {line}", placed.len());
            let chip = chip
                .clone()
                .or_else(|| op.chip.clone())
                .unwrap_or_else(|| ArcStr::from(DEFAULT_CHIP));
            bags.extend(placed.into_iter().enumerate().map(|(i, p)| {
                bag! {
                    "name" => ArcStr::from(format!("{line}_ab{i}")),
                    "type" => "AirBridge",
                    "chip" => &chip,
                    "position" => p.position,
                    "rotation" => p.rotation,
                }
            }));
        }
        keyed(bags)
    }
}
