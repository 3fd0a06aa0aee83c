//! Cells: named collections of layered shapes and references to other cells.

use arcstr::ArcStr;
use qgeom::bbox::{Bbox, BoundBox};
use qgeom::{Point, Shape};
use serde::{Deserialize, Serialize};

use super::layers::LayerSpec;

/// A primitive geometric element.
///
/// Combines a geometric [`Shape`] with a [`LayerSpec`].
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Element {
    /// The layer spec where the element is located.
    pub layer: LayerSpec,
    /// The element's shape.
    pub inner: Shape,
}

impl Element {
    pub fn new(layer: LayerSpec, shape: impl Into<Shape>) -> Self {
        Self {
            layer,
            inner: shape.into(),
        }
    }

    pub fn into_inner(self) -> Shape {
        self.inner
    }
}

impl BoundBox for Element {
    fn bbox(&self) -> Bbox {
        self.inner.bbox()
    }
}

/// A placement of one cell inside another, by name.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Instance {
    /// The instance name.
    pub name: ArcStr,
    /// The name of the referenced cell.
    pub cell: ArcStr,
    /// The location of the referenced cell's origin.
    pub loc: Point,
}

/// The layout view of a cell.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct Cell {
    name: ArcStr,
    elems: Vec<Element>,
    insts: Vec<Instance>,
}

impl Cell {
    pub fn new(name: impl Into<ArcStr>) -> Self {
        Self {
            name: name.into(),
            elems: Vec::new(),
            insts: Vec::new(),
        }
    }

    #[inline]
    pub fn name(&self) -> &ArcStr {
        &self.name
    }

    #[inline]
    pub fn set_name(&mut self, name: impl Into<ArcStr>) {
        self.name = name.into();
    }

    #[inline]
    pub fn elems(&self) -> impl Iterator<Item = &Element> {
        self.elems.iter()
    }

    #[inline]
    pub fn insts(&self) -> impl Iterator<Item = &Instance> {
        self.insts.iter()
    }

    #[inline]
    pub fn add_element(&mut self, elem: Element) {
        self.elems.push(elem);
    }

    pub fn add_inst(&mut self, inst: Instance) {
        self.insts.push(inst);
    }

    /// Moves every element of `other` into this cell, placing them on `layer`.
    pub fn absorb(&mut self, other: Cell, layer: LayerSpec) {
        self.elems.extend(other.elems.into_iter().map(|mut e| {
            e.layer = layer;
            e
        }));
    }

    /// Places every element on `layer`.
    pub fn flatten_onto(&mut self, layer: LayerSpec) {
        for elem in self.elems.iter_mut() {
            elem.layer = layer;
        }
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.elems.is_empty() && self.insts.is_empty()
    }
}

impl BoundBox for Cell {
    /// The bounding box of the cell's own elements.
    ///
    /// Instances are resolved by the [`Library`](super::library::Library).
    fn bbox(&self) -> Bbox {
        self.elems
            .iter()
            .fold(Bbox::empty(), |bbox, elem| bbox.union(elem.bbox()))
    }
}
