//! Qubits.

use arcstr::ArcStr;
use indexmap::IndexMap;
use qgeom::bbox::{Bbox, BoundBox};
use qgeom::transform::{Transform, Transformation};
use qgeom::{Point, Rect};
use serde::{Deserialize, Serialize};

use super::{unknown_type, Category, Component, DEFAULT_CHIP};
use crate::bag;
use crate::config::LayoutConfig;
use crate::error::Result;
use crate::layout::context::LayoutCtx;
use crate::options::{OptionBag, OptionValue};

#[derive(Debug, Copy, Clone, Eq, PartialEq, Hash, Serialize, Deserialize)]
pub enum QubitType {
    /// Two pads split by a junction slot, inside a rectangular gap ring.
    Transmon,
    /// A cross-shaped island.
    Xmon,
    /// A user-supplied outline with user-supplied pins.
    Custom,
}

impl QubitType {
    pub fn as_str(&self) -> &'static str {
        match self {
            QubitType::Transmon => "Transmon",
            QubitType::Xmon => "Xmon",
            QubitType::Custom => "Custom",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Qubit {
    pub name: ArcStr,
    #[serde(rename = "type")]
    pub kind: QubitType,
    pub chip: ArcStr,
    /// Layout position of the qubit center.
    pub gds_pos: Point,
    /// Position on the integer topology grid.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub topo_pos: Option<(i64, i64)>,
    /// Counter-clockwise rotation about the center, in degrees.
    #[serde(default)]
    pub rotation: f64,
    /// Island width.
    #[serde(default)]
    pub width: f64,
    /// Island height.
    #[serde(default)]
    pub height: f64,
    /// Clearance between island and ground plane.
    #[serde(default)]
    pub gap: f64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub arm_width: Option<f64>,
    /// Outline in the qubit's local frame. Only drawn for custom qubits.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub outline: Vec<Point>,
    #[serde(default)]
    pub coupling_pins: Vec<Point>,
    #[serde(default)]
    pub readout_pins: Vec<Point>,
    #[serde(default)]
    pub control_pins: Vec<Point>,
    #[serde(flatten)]
    pub extra: IndexMap<ArcStr, OptionValue>,
}

impl Qubit {
    /// The transform from the qubit's local frame to layout coordinates.
    #[inline]
    pub fn transformation(&self) -> Transformation {
        Transformation::with_loc_and_angle(self.gds_pos, self.rotation)
    }

    /// Half-extents of the gap ring in the local frame.
    fn half_extents(&self) -> (f64, f64) {
        (self.width / 2. + self.gap, self.height / 2. + self.gap)
    }

    fn local_outline(&self) -> Vec<Point> {
        let (hx, hy) = self.half_extents();
        match self.kind {
            QubitType::Transmon => Rect::new(Point::new(-hx, -hy), Point::new(hx, hy))
                .corners()
                .to_vec(),
            QubitType::Xmon => {
                let ha = self.arm_width.unwrap_or(0.) / 2. + self.gap;
                vec![
                    Point::new(hx, -ha),
                    Point::new(hx, ha),
                    Point::new(ha, ha),
                    Point::new(ha, hy),
                    Point::new(-ha, hy),
                    Point::new(-ha, ha),
                    Point::new(-hx, ha),
                    Point::new(-hx, -ha),
                    Point::new(-ha, -ha),
                    Point::new(-ha, -hy),
                    Point::new(ha, -hy),
                    Point::new(ha, -ha),
                ]
            }
            QubitType::Custom => self.outline.clone(),
        }
    }

    /// The footprint of the qubit, including its pins.
    pub fn extent(&self) -> Bbox {
        let trans = self.transformation();
        let outline: Vec<Point> = self
            .local_outline()
            .iter()
            .map(|p| p.transform(trans))
            .collect();
        [
            outline.bbox(),
            self.gds_pos.bbox(),
            self.coupling_pins.bbox(),
            self.readout_pins.bbox(),
            self.control_pins.bbox(),
        ]
        .into_iter()
        .fold(Bbox::empty(), Bbox::union)
    }
}

impl Component for Qubit {
    const CATEGORY: Category = Category::Qubits;

    fn defaults(type_name: &str) -> Result<OptionBag> {
        let bag = match type_name {
            "Transmon" => bag! {
                "type" => "Transmon",
                "chip" => DEFAULT_CHIP,
                "gds_pos" => Point::zero(),
                "rotation" => 0.,
                "width" => 400.,
                "height" => 300.,
                "gap" => 30.,
            },
            "Xmon" => bag! {
                "type" => "Xmon",
                "chip" => DEFAULT_CHIP,
                "gds_pos" => Point::zero(),
                "rotation" => 0.,
                "width" => 300.,
                "height" => 300.,
                "gap" => 24.,
                "arm_width" => 24.,
            },
            "Custom" => bag! {
                "type" => "Custom",
                "chip" => DEFAULT_CHIP,
                "gds_pos" => Point::zero(),
                "rotation" => 0.,
            },
            _ => return Err(unknown_type(Self::CATEGORY, type_name).into()),
        };
        Ok(bag)
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

    /// Places coupling pins at the midpoints of the gap ring's sides,
    /// a readout pin at its upper-right corner, and a control pin at its lower-left corner.
    ///
    /// Custom qubits keep their supplied pins.
    fn derive(&mut self, _cfg: &LayoutConfig) -> Result<()> {
        if self.kind == QubitType::Custom {
            return Ok(());
        }
        let (hx, hy) = self.half_extents();
        let trans = self.transformation();
        let place = |pts: &[(f64, f64)]| -> Vec<Point> {
            pts.iter()
                .map(|&(x, y)| Point::new(x, y).transform(trans))
                .collect()
        };
        self.coupling_pins = place(&[(-hx, 0.), (hx, 0.), (0., hy), (0., -hy)]);
        self.readout_pins = place(&[(hx, hy)]);
        self.control_pins = place(&[(-hx, -hy)]);
        Ok(())
    }

    fn layout(&self, ctx: &mut LayoutCtx) -> Result<()> {
        let trans = self.transformation();
        let (hx, hy) = self.half_extents();
        let (w, h) = (self.width / 2., self.height / 2.);
        match self.kind {
            QubitType::Transmon => {
                let ring = [
                    Rect::new(Point::new(-hx, -hy), Point::new(hx, -h)),
                    Rect::new(Point::new(-hx, h), Point::new(hx, hy)),
                    Rect::new(Point::new(-hx, -h), Point::new(-w, h)),
                    Rect::new(Point::new(w, -h), Point::new(hx, h)),
                    // Junction slot between the two pads.
                    Rect::new(Point::new(-w, -self.gap / 2.), Point::new(w, self.gap / 2.)),
                ];
                for rect in ring {
                    ctx.draw_rect_with(rect, trans);
                }
            }
            QubitType::Xmon | QubitType::Custom => {
                let outline = self.local_outline();
                if outline.len() >= 3 {
                    ctx.draw_polygon_with(outline, trans);
                }
            }
        }
        Ok(())
    }
}
