//! The per-category component collections of a design.

use qgeom::Polygon;

use crate::component::{
    collection_to_bag, complete_collection, draw_component, AirBridge, Category, Chip, Collection,
    Component, ControlLine, CouplingLine, CrossOver, IndiumBump, Other, Pin, Qubit, ReadoutLine,
    TransmissionLine,
};
use crate::config::LayoutConfig;
use crate::error::{ErrorSource, Result};
use crate::layout::builder::LayoutBuilder;
use crate::options::OptionBag;

/// One typed collection per component category.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Collections {
    pub chips: Collection<Chip>,
    pub qubits: Collection<Qubit>,
    pub coupling_lines: Collection<CouplingLine>,
    pub readout_lines: Collection<ReadoutLine>,
    pub control_lines: Collection<ControlLine>,
    pub transmission_lines: Collection<TransmissionLine>,
    pub crossovers: Collection<CrossOver>,
    pub air_bridges: Collection<AirBridge>,
    pub indium_bumps: Collection<IndiumBump>,
    pub pins: Collection<Pin>,
    pub others: Collection<Other>,
}

fn replace<C: Component>(
    slot: &mut Collection<C>,
    bag: &OptionBag,
    cfg: &LayoutConfig,
) -> Result<()> {
    *slot = complete_collection(bag, cfg)?;
    Ok(())
}

fn draw_all<C: Component>(
    collection: &Collection<C>,
    builder: &mut LayoutBuilder,
    cfg: &LayoutConfig,
) -> Result<()> {
    for component in collection.values() {
        let cell = draw_component(component, cfg)?;
        builder.add_component(component.chip(), cell);
    }
    Ok(())
}

impl Collections {
    /// Replaces the collection of `category` with the completed entries of `bag`.
    pub fn replace(&mut self, category: Category, bag: &OptionBag, cfg: &LayoutConfig) -> Result<()> {
        match category {
            Category::Chips => replace(&mut self.chips, bag, cfg),
            Category::Qubits => replace(&mut self.qubits, bag, cfg),
            Category::CouplingLines => replace(&mut self.coupling_lines, bag, cfg),
            Category::ReadoutLines => replace(&mut self.readout_lines, bag, cfg),
            Category::ControlLines => replace(&mut self.control_lines, bag, cfg),
            Category::TransmissionLines => replace(&mut self.transmission_lines, bag, cfg),
            Category::Crossovers => replace(&mut self.crossovers, bag, cfg),
            Category::AirBridges => replace(&mut self.air_bridges, bag, cfg),
            Category::IndiumBumps => replace(&mut self.indium_bumps, bag, cfg),
            Category::Pins => replace(&mut self.pins, bag, cfg),
            Category::Others => replace(&mut self.others, bag, cfg),
        }
    }

    /// The collection of `category` as a collection bag.
    pub fn to_bag(&self, category: Category) -> Result<OptionBag> {
        match category {
            Category::Chips => collection_to_bag(&self.chips),
            Category::Qubits => collection_to_bag(&self.qubits),
            Category::CouplingLines => collection_to_bag(&self.coupling_lines),
            Category::ReadoutLines => collection_to_bag(&self.readout_lines),
            Category::ControlLines => collection_to_bag(&self.control_lines),
            Category::TransmissionLines => collection_to_bag(&self.transmission_lines),
            Category::Crossovers => collection_to_bag(&self.crossovers),
            Category::AirBridges => collection_to_bag(&self.air_bridges),
            Category::IndiumBumps => collection_to_bag(&self.indium_bumps),
            Category::Pins => collection_to_bag(&self.pins),
            Category::Others => collection_to_bag(&self.others),
        }
    }

    /// The completed bag of one component.
    pub fn component(&self, category: Category, name: &str) -> Result<OptionBag> {
        self.to_bag(category)?
            .get_bag(name)
            .cloned()
            .ok_or_else(|| ErrorSource::NotFound(arcstr::format!("{category} entry {name}")).into())
    }

    /// Draws every component, in category order, into `builder`.
    pub fn draw(&self, builder: &mut LayoutBuilder, cfg: &LayoutConfig) -> Result<()> {
        for chip in self.chips.keys() {
            builder.add_chip(chip);
        }
        draw_all(&self.chips, builder, cfg)?;
        draw_all(&self.qubits, builder, cfg)?;
        draw_all(&self.coupling_lines, builder, cfg)?;
        draw_all(&self.readout_lines, builder, cfg)?;
        draw_all(&self.control_lines, builder, cfg)?;
        draw_all(&self.transmission_lines, builder, cfg)?;
        draw_all(&self.crossovers, builder, cfg)?;
        draw_all(&self.air_bridges, builder, cfg)?;
        draw_all(&self.indium_bumps, builder, cfg)?;
        draw_all(&self.pins, builder, cfg)?;
        draw_all(&self.others, builder, cfg)
    }

    /// Total number of components across all categories.
    pub fn len(&self) -> usize {
        self.chips.len()
            + self.qubits.len()
            + self.coupling_lines.len()
            + self.readout_lines.len()
            + self.control_lines.len()
            + self.transmission_lines.len()
            + self.crossovers.len()
            + self.air_bridges.len()
            + self.indium_bumps.len()
            + self.pins.len()
            + self.others.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

/// Every polygon of a drawn cell.
pub(crate) fn cell_polygons(cell: &crate::layout::cell::Cell) -> Vec<Polygon> {
    cell.elems().map(|e| e.inner.to_polygon()).collect()
}
