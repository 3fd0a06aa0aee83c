//! A rendered multi-chip layout.

use arcstr::ArcStr;
use indexmap::IndexMap;
use qgeom::bbox::{Bbox, BoundBox};
use qgeom::Point;

use super::cell::{Cell, Instance};
use super::layers::chip_layer_spec;
use crate::config::LayoutConfig;
use crate::error::{ErrorSource, Result};

/// A set of flattened chip cells under one top cell.
///
/// Each chip cell holds all geometry of that chip on the chip's layer.
/// The top cell holds one instance per chip cell and no geometry of its own.
#[derive(Debug, Clone, PartialEq)]
pub struct Library {
    pub(crate) chips: IndexMap<ArcStr, Cell>,
    pub(crate) top: Cell,
}

impl Library {
    pub fn new(top: impl Into<ArcStr>) -> Self {
        Self {
            chips: IndexMap::new(),
            top: Cell::new(top),
        }
    }

    #[inline]
    pub fn top(&self) -> &Cell {
        &self.top
    }

    pub fn chip(&self, name: &str) -> Option<&Cell> {
        self.chips.get(name)
    }

    pub fn chips(&self) -> impl Iterator<Item = &Cell> {
        self.chips.values()
    }

    /// Adds a chip cell and references it from the top cell.
    pub fn add_chip(&mut self, cell: Cell) -> Result<()> {
        let name = cell.name().clone();
        if self.chips.contains_key(&name) || name == *self.top.name() {
            return Err(ErrorSource::InvalidOption(format!("cell {name} already exists")).into());
        }
        self.top.add_inst(Instance {
            name: name.clone(),
            cell: name.clone(),
            loc: Point::zero(),
        });
        self.chips.insert(name, cell);
        Ok(())
    }

    /// Copies the geometry of chip `old` into a new chip named `new`.
    ///
    /// The copy is placed on the layer assigned to `new`.
    pub fn copy_chip(&mut self, old: &str, new: &str, cfg: &LayoutConfig) -> Result<()> {
        let mut cell = self
            .chips
            .get(old)
            .ok_or_else(|| ErrorSource::NotFound(ArcStr::from(old)))?
            .clone();
        cell.set_name(new);
        cell.flatten_onto(chip_layer_spec(new, cfg));
        self.add_chip(cell)
    }

    /// The bounding box of all chip cells.
    pub fn bbox(&self) -> Bbox {
        self.chips
            .values()
            .fold(Bbox::empty(), |bbox, cell| bbox.union(cell.bbox()))
    }
}
