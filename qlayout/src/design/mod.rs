//! The design: every component collection of a multi-chip layout.
//!
//! A [`Design`] owns one typed collection per [`Category`] plus the qubit
//! [`Topology`]. Its whole state round-trips through a single nested
//! [`OptionBag`] via [`Design::extract`] and [`Design::inject`].
//! [`Design::draw`] renders the collections into a [`Library`] of
//! per-chip cells, which can be saved as GDS or SVG.

use std::path::Path;

use arcstr::ArcStr;
use convert_case::{Case, Casing};
use qgeom::bbox::Bbox;

use crate::branch::{
    resolve, AirBridgesRequest, ChipsRequest, CouplingLinesRequest, CrossoversRequest,
    IndiumBumpsRequest, QubitsRequest, ReadoutLinesRequest, TopologyRequest,
};
use crate::component::Category;
use crate::config::{LayoutConfig, PlacementConfig};
use crate::error::{with_err_context, ErrorContext, ErrorSource, Result};
use crate::io::{read_to_string, write_string};
use crate::layout::builder::LayoutBuilder;
use crate::layout::cell::Cell;
use crate::layout::library::Library;
use crate::log::{debug, info};
use crate::options::{OptionBag, OptionValue};
use crate::topology::Topology;

pub mod collections;
pub mod history;
pub mod store;

pub use collections::Collections;
pub use history::History;
pub use store::{DesignKey, DesignStore};

/// The key of the topology in an extracted design tree.
pub const TOPOLOGY_KEY: &str = "topology";

#[derive(Debug, Clone)]
pub struct Design {
    layout_config: LayoutConfig,
    placement_config: PlacementConfig,
    collections: Collections,
    topology: Topology,
    layout: Option<Library>,
    history: History,
}

impl Default for Design {
    fn default() -> Self {
        Self::new()
    }
}

impl Design {
    pub fn new() -> Self {
        Self::with_config(LayoutConfig::default(), PlacementConfig::default())
    }

    pub fn with_config(layout_config: LayoutConfig, placement_config: PlacementConfig) -> Self {
        Self {
            layout_config,
            placement_config,
            collections: Collections::default(),
            topology: Topology::default(),
            layout: None,
            history: History::new(),
        }
    }

    #[inline]
    pub fn layout_config(&self) -> &LayoutConfig {
        &self.layout_config
    }

    #[inline]
    pub fn placement_config(&self) -> &PlacementConfig {
        &self.placement_config
    }

    #[inline]
    pub fn collections(&self) -> &Collections {
        &self.collections
    }

    #[inline]
    pub fn topology(&self) -> &Topology {
        &self.topology
    }

    /// Replaces the topology after checking that every edge joins two known neighbors.
    pub fn set_topology(&mut self, topology: Topology) -> Result<()> {
        self.topology = Topology::new(topology.positions, topology.edges)?;
        self.layout = None;
        Ok(())
    }

    /// The most recently drawn layout, if it is still current.
    #[inline]
    pub fn layout(&self) -> Option<&Library> {
        self.layout.as_ref()
    }

    /// The name of the top cell of drawn layouts.
    pub fn top_name() -> ArcStr {
        let type_name = std::any::type_name::<Self>();
        let short = type_name.rsplit("::").next().unwrap_or(type_name);
        ArcStr::from(short.to_case(Case::Snake))
    }

    /// Exports the whole design as a tree keyed by category name.
    pub fn extract(&self) -> Result<OptionBag> {
        let mut tree = OptionBag::with_capacity(Category::ALL.len() + 1);
        for category in Category::ALL {
            tree.insert(category.as_str(), self.collections.to_bag(category)?);
        }
        tree.insert(TOPOLOGY_KEY, OptionBag::from_typed(&self.topology)?);
        Ok(tree)
    }

    /// Replaces the whole design with the contents of `tree`.
    ///
    /// Categories missing from the tree become empty. On error the design is unchanged.
    pub fn inject(&mut self, tree: &OptionBag) -> Result<()> {
        let mut staged = Collections::default();
        let mut topology = Topology::default();
        for (key, value) in tree.iter() {
            let staged_entry =
                Self::stage_entry(key, value, &mut staged, &mut topology, &self.layout_config);
            with_err_context(staged_entry, || ErrorContext::InjectCategory(key.clone()))?;
        }
        info!("injected design with {} components", staged.len());
        self.collections = staged;
        self.topology = topology;
        self.layout = None;
        Ok(())
    }

    fn stage_entry(
        key: &ArcStr,
        value: &OptionValue,
        staged: &mut Collections,
        topology: &mut Topology,
        cfg: &LayoutConfig,
    ) -> Result<()> {
        let bag = value
            .as_bag()
            .ok_or_else(|| ErrorSource::InvalidOption(format!("`{key}` must be a dict")))?;
        if key.as_str() == TOPOLOGY_KEY {
            let decoded: Topology = bag.to_typed()?;
            *topology = Topology::new(decoded.positions, decoded.edges)?;
        } else {
            let category: Category = key.parse()?;
            staged.replace(category, bag, cfg)?;
        }
        Ok(())
    }

    /// Replaces one collection with the completed entries of `bag`.
    pub fn inject_category(&mut self, category: Category, bag: &OptionBag) -> Result<()> {
        with_err_context(
            self.collections
                .replace(category, bag, &self.layout_config),
            || ErrorContext::InjectCategory(ArcStr::from(category.as_str())),
        )?;
        debug!("injected {} {category} entries", bag.len());
        self.layout = None;
        Ok(())
    }

    /// The completed bag of the `category` entry named `name`.
    pub fn component(&self, category: Category, name: &str) -> Result<OptionBag> {
        self.collections.component(category, name)
    }

    /// Saves the current state so that a later [`Design::undo`] returns to it.
    pub fn checkpoint(&mut self) -> Result<()> {
        let snapshot = self.extract()?;
        self.history.record(snapshot);
        Ok(())
    }

    /// Restores the last checkpoint. Returns `false` if there is none.
    pub fn undo(&mut self) -> Result<bool> {
        let current = self.extract()?;
        match self.history.undo(current) {
            Some(prev) => self.inject(&prev).map(|_| true),
            None => Ok(false),
        }
    }

    /// Reapplies the last undone state. Returns `false` if there is none.
    pub fn redo(&mut self) -> Result<bool> {
        let current = self.extract()?;
        match self.history.redo(current) {
            Some(next) => self.inject(&next).map(|_| true),
            None => Ok(false),
        }
    }

    /// Renders every component into a fresh layout.
    ///
    /// Any previously drawn layout is discarded first.
    pub fn draw(&mut self) -> Result<&Library> {
        self.layout = None;
        let mut builder = LayoutBuilder::new(&self.layout_config);
        self.collections.draw(&mut builder, &self.layout_config)?;
        let lib = builder.finish(Self::top_name())?;
        info!("drew design with {} chips", lib.chips().count());
        let lib: &Library = self.layout.insert(lib);
        Ok(lib)
    }

    fn drawn(&mut self) -> Result<&mut Library> {
        if self.layout.is_none() {
            self.draw()?;
        }
        self.layout
            .as_mut()
            .ok_or_else(|| ErrorSource::NotFound(arcstr::literal!("drawn layout")).into())
    }

    /// The bounding box of the drawn layout, drawing it first if needed.
    pub fn bounding_box(&mut self) -> Result<Bbox> {
        Ok(self.drawn()?.bbox())
    }

    /// Adds a chip cell to the drawn layout.
    ///
    /// The cell is dropped by the next [`Design::draw`].
    pub fn add_chip(&mut self, cell: Cell) -> Result<()> {
        self.drawn()?.add_chip(cell)
    }

    /// Copies the geometry of chip `old` in the drawn layout into a new chip `new`.
    ///
    /// The copy is dropped by the next [`Design::draw`].
    pub fn copy_chip(&mut self, old: &str, new: &str) -> Result<()> {
        let cfg = self.layout_config.clone();
        self.drawn()?.copy_chip(old, new, &cfg)
    }

    /// Draws the design and checks that it has a non-degenerate extent.
    fn draw_checked(&mut self) -> Result<&Library> {
        let lib = self.draw()?;
        let bbox = lib.bbox();
        if bbox.is_degenerate() {
            return Err(ErrorSource::GeometryDegenerate {
                width: bbox.width(),
                height: bbox.height(),
            }
            .into());
        }
        Ok(lib)
    }

    /// Draws the design and writes it as GDS to `path`.
    ///
    /// Nothing is written if the layout is degenerate.
    pub fn save_gds(&mut self, path: impl AsRef<Path>) -> Result<()> {
        let cfg = self.layout_config.clone();
        self.draw_checked()?.save_gds(path.as_ref(), &cfg)?;
        info!("saved GDS to {:?}", path.as_ref());
        Ok(())
    }

    /// Draws the design and writes it as SVG to `path`, `width` user units wide.
    ///
    /// Nothing is written if the layout is degenerate.
    pub fn save_svg(&mut self, path: impl AsRef<Path>, width: f64) -> Result<()> {
        self.draw_checked()?.save_svg(path.as_ref(), width)?;
        info!("saved SVG to {:?}", path.as_ref());
        Ok(())
    }

    /// Writes the extracted design tree as literal text.
    pub fn save_design(&self, path: impl AsRef<Path>) -> Result<()> {
        let text = self.extract()?.to_string();
        write_string(path, &text)
    }

    /// Replaces the design with a tree saved by [`Design::save_design`].
    pub fn load_design(&mut self, path: impl AsRef<Path>) -> Result<()> {
        let text = read_to_string(path)?;
        let tree = OptionBag::parse(&text)?;
        self.inject(&tree)
    }

    /// Generates chips from a `chips` request and replaces the chips collection.
    pub fn generate_chips(&mut self, request: &OptionBag) -> Result<()> {
        let bag = resolve::<ChipsRequest>(request)?.generate(&self.layout_config)?;
        self.inject_category(Category::Chips, &bag)
    }

    /// Generates qubits from a `qubits` request and replaces the qubits collection.
    pub fn generate_qubits(&mut self, request: &OptionBag) -> Result<()> {
        let bag = resolve::<QubitsRequest>(request)?.generate()?;
        self.inject_category(Category::Qubits, &bag)
    }

    /// Generates a topology from a `topology` request and replaces the topology.
    pub fn generate_topology(&mut self, request: &OptionBag) -> Result<()> {
        let topology = resolve::<TopologyRequest>(request)?.generate();
        self.set_topology(topology)
    }

    /// Generates coupling lines and replaces the coupling lines collection.
    pub fn generate_coupling_lines(&mut self, request: &OptionBag) -> Result<()> {
        let bag = resolve::<CouplingLinesRequest>(request)?.generate(&self.layout_config)?;
        self.inject_category(Category::CouplingLines, &bag)
    }

    /// Generates readout lines and replaces the readout lines collection.
    pub fn generate_readout_lines(&mut self, request: &OptionBag) -> Result<()> {
        let bag = resolve::<ReadoutLinesRequest>(request)?.generate(&self.layout_config)?;
        self.inject_category(Category::ReadoutLines, &bag)
    }

    /// Generates air bridges and replaces the air bridges collection.
    pub fn generate_air_bridges(&mut self, request: &OptionBag) -> Result<()> {
        let bag = resolve::<AirBridgesRequest>(request)?.generate(&self.placement_config)?;
        self.inject_category(Category::AirBridges, &bag)
    }

    /// Generates insulating sheets and replaces the crossovers collection.
    pub fn generate_crossovers(&mut self, request: &OptionBag) -> Result<()> {
        let bag = resolve::<CrossoversRequest>(request)?.generate(&self.layout_config)?;
        self.inject_category(Category::Crossovers, &bag)
    }

    /// Generates indium bumps and replaces the indium bumps collection.
    ///
    /// The bumps keep clear of everything else drawn on the requested chip.
    /// Existing bumps are not obstacles, since they are replaced.
    pub fn generate_indium_bumps(&mut self, request: &OptionBag) -> Result<()> {
        let request = resolve::<IndiumBumpsRequest>(request)?;
        let mut rest = self.collections.clone();
        rest.indium_bumps.clear();
        let mut builder = LayoutBuilder::new(&self.layout_config);
        rest.draw(&mut builder, &self.layout_config)?;
        let lib = builder.finish(Self::top_name())?;
        let obstacles = lib
            .chip(request.chip())
            .map(collections::cell_polygons)
            .unwrap_or_default();
        let bag = request.generate(&obstacles)?;
        self.inject_category(Category::IndiumBumps, &bag)
    }
}

#[cfg(test)]
mod tests {
    use qgeom::Point;

    use super::*;
    use crate::bag;

    fn design() -> Design {
        let mut design = Design::new();
        design
            .generate_topology(&bag! { "row_num" => 1, "col_num" => 2 })
            .unwrap();
        let positions: OptionBag = design
            .topology()
            .positions
            .iter()
            .map(|(k, v)| (k.clone(), *v))
            .collect();
        design
            .generate_qubits(&bag! { "topo_positions" => positions, "dist" => 1500. })
            .unwrap();
        design
    }

    #[test]
    fn test_top_name() {
        assert_eq!(Design::top_name(), "design");
    }

    #[test]
    fn test_extract_inject_round_trip() {
        let design = design();
        let tree = design.extract().unwrap();
        let mut copy = Design::new();
        copy.inject(&tree).unwrap();
        assert_eq!(copy.extract().unwrap(), tree);
        assert_eq!(copy.topology(), design.topology());
    }

    #[test]
    fn test_failed_inject_keeps_state() {
        let mut design = design();
        let before = design.extract().unwrap();
        let bad = bag! {
            "qubits" => bag! {},
            "pins" => bag! { "p0" => bag! { "type" => "LaunchPad" } },
        };
        let err = design.inject(&bad).unwrap_err();
        assert!(matches!(err.source(), ErrorSource::MissingField { .. }));
        assert_eq!(design.extract().unwrap(), before);
        assert!(design.inject(&bag! { "bridges" => bag! {} }).is_err());
    }

    #[test]
    fn test_inject_checks_topology() {
        let mut design = design();
        let before = design.extract().unwrap();
        let far = bag! {
            "topology" => bag! {
                "positions" => bag! { "a" => (0i64, 0i64), "b" => (5i64, 7i64) },
                "edges" => vec![OptionValue::Tuple(into_pair("a", "b"))],
            },
        };
        let err = design.inject(&far).unwrap_err();
        assert!(matches!(err.source(), ErrorSource::NotAdjacent { .. }));
        assert_eq!(design.extract().unwrap(), before);

        let unknown = bag! {
            "topology" => bag! {
                "positions" => bag! { "a" => (0i64, 0i64), "b" => (1i64, 0i64) },
                "edges" => vec![OptionValue::Tuple(into_pair("a", "zz"))],
            },
        };
        let err = design.inject(&unknown).unwrap_err();
        assert!(matches!(err.source(), ErrorSource::NotFound(_)));
        assert_eq!(design.extract().unwrap(), before);

        let mut topology = Topology::default();
        topology.positions.insert(arcstr::literal!("a"), (0, 0));
        topology.positions.insert(arcstr::literal!("b"), (5, 7));
        topology
            .edges
            .push((arcstr::literal!("a"), arcstr::literal!("b")));
        assert!(design.set_topology(topology).is_err());
        assert_eq!(design.extract().unwrap(), before);
    }

    fn into_pair(a: &str, b: &str) -> Vec<OptionValue> {
        vec![OptionValue::from(a), OptionValue::from(b)]
    }

    #[test]
    fn test_undo_redo() {
        let mut design = design();
        design.checkpoint().unwrap();
        design
            .inject_category(Category::Qubits, &OptionBag::new())
            .unwrap();
        assert!(design.collections().qubits.is_empty());
        assert!(design.undo().unwrap());
        assert_eq!(design.collections().qubits.len(), 2);
        assert!(design.redo().unwrap());
        assert!(design.collections().qubits.is_empty());
        assert!(!design.redo().unwrap());
    }

    #[test]
    fn test_draw_merges_chips() {
        let mut design = design();
        let lib = design.draw().unwrap();
        assert_eq!(lib.chips().count(), 1);
        assert_eq!(lib.top().name(), "design");
        let bbox = design.bounding_box().unwrap();
        assert!(bbox.contains(Point::new(0., 0.)));
        assert!(bbox.contains(Point::new(1500., 0.)));

        design.copy_chip("chip0", "chip1").unwrap();
        assert_eq!(design.layout().unwrap().chips().count(), 2);
        design.draw().unwrap();
        assert_eq!(design.layout().unwrap().chips().count(), 1);
    }

    #[test]
    fn test_component_snapshot() {
        let design = design();
        let q0 = design.component(Category::Qubits, "q0").unwrap();
        assert_eq!(q0.require_point("gds_pos").unwrap(), Point::zero());
        assert!(design.component(Category::Qubits, "q9").is_err());
    }
}
