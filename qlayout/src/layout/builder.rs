//! Composition of component cells into per-chip cells.

use arcstr::ArcStr;
use indexmap::IndexMap;

use super::cell::Cell;
use super::layers::chip_layer_spec;
use super::library::Library;
use crate::config::LayoutConfig;
use crate::error::Result;
use crate::log::debug;

/// Accumulates component cells for a single draw.
///
/// A builder is created at the start of a draw and consumed by [`LayoutBuilder::finish`],
/// so no state survives between draws.
pub struct LayoutBuilder<'a> {
    config: &'a LayoutConfig,
    chips: IndexMap<ArcStr, Cell>,
}

impl<'a> LayoutBuilder<'a> {
    pub fn new(config: &'a LayoutConfig) -> Self {
        Self {
            config,
            chips: IndexMap::new(),
        }
    }

    /// Declares a chip, creating an empty cell for it if needed.
    pub fn add_chip(&mut self, name: &ArcStr) -> &mut Cell {
        self.chips
            .entry(name.clone())
            .or_insert_with(|| Cell::new(name.clone()))
    }

    /// Merges a component cell into the cell of `chip`, on that chip's layer.
    pub fn add_component(&mut self, chip: &ArcStr, cell: Cell) {
        let layer = chip_layer_spec(chip, self.config);
        debug!(
            "merging {} into chip {chip} on layer {}",
            cell.name(),
            layer.layer
        );
        self.add_chip(chip).absorb(cell, layer);
    }

    /// Builds a library whose top cell is named `top`.
    pub fn finish(self, top: impl Into<ArcStr>) -> Result<Library> {
        let mut lib = Library::new(top);
        for (_, cell) in self.chips {
            lib.add_chip(cell)?;
        }
        Ok(lib)
    }
}

#[cfg(test)]
mod tests {
    use qgeom::{Point, Rect};

    use super::*;
    use crate::layout::layers::chip_layer;

    #[test]
    fn test_components_merge_per_chip() {
        let cfg = LayoutConfig::default();
        let mut builder = LayoutBuilder::new(&cfg);
        let chip0 = ArcStr::from("chip0");
        let chip1 = ArcStr::from("chip1");
        for (i, chip) in [&chip0, &chip1, &chip0].into_iter().enumerate() {
            let mut ctx = crate::layout::context::LayoutCtx::new(format!("c{i}"), &cfg);
            ctx.draw(Rect::new(Point::zero(), Point::new(1. + i as f64, 1.)));
            builder.add_component(chip, ctx.into_cell());
        }
        let lib = builder.finish("design").unwrap();
        assert_eq!(lib.chips().count(), 2);
        let cell = lib.chip("chip0").unwrap();
        assert_eq!(cell.elems().count(), 2);
        assert!(cell
            .elems()
            .all(|e| e.layer.layer == chip_layer("chip0", &cfg) && e.layer.datatype == 0));
        assert_eq!(lib.top().name(), "design");
    }
}
