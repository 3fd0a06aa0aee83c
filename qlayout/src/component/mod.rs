//! Typed components and their option completion.
//!
//! Each component category has a typed option struct implementing [`Component`].
//! [`complete`] turns a partial [`OptionBag`] into a fully resolved one: it lays
//! the bag over its type's defaults, checks required fields, decodes the typed
//! struct, derives computed fields, and encodes the result back into a bag.

use std::fmt::Display;
use std::str::FromStr;

use arcstr::ArcStr;
use indexmap::IndexMap;
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};

use crate::config::LayoutConfig;
use crate::error::{with_err_context, ErrorContext, ErrorSource, Result};
use crate::layout::context::LayoutCtx;
use crate::log::debug;
use crate::options::{OptionBag, OptionValue};

pub mod air_bridge;
pub mod chip;
pub mod control_line;
pub mod coupling_line;
pub mod crossover;
pub mod cpw;
pub mod indium_bump;
pub mod other;
pub mod pin;
pub mod qubit;
pub mod readout_line;
pub mod transmission_line;

#[cfg(test)]
mod tests;

pub use air_bridge::AirBridge;
pub use chip::Chip;
pub use control_line::ControlLine;
pub use coupling_line::CouplingLine;
pub use crossover::CrossOver;
pub use indium_bump::IndiumBump;
pub use other::Other;
pub use pin::Pin;
pub use qubit::Qubit;
pub use readout_line::ReadoutLine;
pub use transmission_line::TransmissionLine;

/// The chip that components are placed on when none is given.
pub const DEFAULT_CHIP: &str = "chip0";

/// A named collection of one component category, in insertion order.
pub type Collection<T> = IndexMap<ArcStr, T>;

/// A component category.
///
/// Every design owns exactly one collection per category.
#[derive(Debug, Copy, Clone, Eq, PartialEq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Category {
    Chips,
    Qubits,
    CouplingLines,
    ReadoutLines,
    ControlLines,
    TransmissionLines,
    Crossovers,
    AirBridges,
    IndiumBumps,
    Pins,
    Others,
}

impl Category {
    /// All categories, in drawing order.
    pub const ALL: [Category; 11] = [
        Category::Chips,
        Category::Qubits,
        Category::CouplingLines,
        Category::ReadoutLines,
        Category::ControlLines,
        Category::TransmissionLines,
        Category::Crossovers,
        Category::AirBridges,
        Category::IndiumBumps,
        Category::Pins,
        Category::Others,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Category::Chips => "chips",
            Category::Qubits => "qubits",
            Category::CouplingLines => "coupling_lines",
            Category::ReadoutLines => "readout_lines",
            Category::ControlLines => "control_lines",
            Category::TransmissionLines => "transmission_lines",
            Category::Crossovers => "crossovers",
            Category::AirBridges => "air_bridges",
            Category::IndiumBumps => "indium_bumps",
            Category::Pins => "pins",
            Category::Others => "others",
        }
    }
}

impl Display for Category {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for Category {
    type Err = ErrorSource;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        Category::ALL
            .into_iter()
            .find(|c| c.as_str() == s)
            .ok_or_else(|| ErrorSource::InvalidOption(format!("unknown category `{s}`")))
    }
}

/// The trait that all typed components implement.
pub trait Component: Serialize + DeserializeOwned + Clone {
    /// The category this component belongs to.
    const CATEGORY: Category;

    /// The default options for the component type named `type_name`.
    ///
    /// Fails if the category has no such type.
    fn defaults(type_name: &str) -> Result<OptionBag>;

    /// Fields that must be present and non-empty after defaults are applied.
    #[allow(unused_variables)]
    fn required(type_name: &str) -> &'static [&'static str] {
        &[]
    }

    fn name(&self) -> &ArcStr;

    /// The name of the chip this component is drawn on.
    fn chip(&self) -> &ArcStr;

    fn type_name(&self) -> &'static str;

    /// Computes derived fields from the supplied ones.
    ///
    /// Must be idempotent: deriving twice gives the same result as deriving once.
    #[allow(unused_variables)]
    fn derive(&mut self, cfg: &LayoutConfig) -> Result<()> {
        Ok(())
    }

    /// Creates the layout view of this component.
    fn layout(&self, ctx: &mut LayoutCtx) -> Result<()>;
}

/// Fields every component bag must carry.
const BASE_REQUIRED: [&str; 2] = ["name", "type"];

/// The error for a type name that `category` does not define.
pub(crate) fn unknown_type(category: Category, type_name: &str) -> ErrorSource {
    ErrorSource::InvalidOption(format!("unknown {category} type `{type_name}`"))
}

fn check_required(bag: &OptionBag, name: &ArcStr, fields: &[&str]) -> Result<()> {
    for field in fields {
        if bag.get(field).map_or(true, OptionValue::is_empty) {
            return Err(ErrorSource::MissingField {
                component: name.clone(),
                field: ArcStr::from(*field),
            }
            .into());
        }
    }
    Ok(())
}

/// Completes a partial bag into a typed component.
pub fn complete_typed<C: Component>(partial: &OptionBag, cfg: &LayoutConfig) -> Result<C> {
    let name = partial
        .get_str("name")
        .cloned()
        .unwrap_or_else(|| arcstr::literal!("<unnamed>"));
    let inner = || -> Result<C> {
        let type_name = partial
            .get_str("type")
            .ok_or_else(|| ErrorSource::MissingField {
                component: name.clone(),
                field: arcstr::literal!("type"),
            })?;
        let merged = partial.merged_over(&C::defaults(type_name)?);
        check_required(&merged, &name, &BASE_REQUIRED)?;
        check_required(&merged, &name, C::required(type_name))?;
        let mut component: C = merged.to_typed()?;
        component.derive(cfg)?;
        Ok(component)
    };
    with_err_context(inner(), || ErrorContext::CompleteComponent {
        category: C::CATEGORY,
        name: name.clone(),
    })
}

/// Completes a partial bag of component type `C`, returning the completed bag.
///
/// The input bag is never modified.
pub fn complete_as<C: Component>(partial: &OptionBag, cfg: &LayoutConfig) -> Result<OptionBag> {
    let component: C = complete_typed(partial, cfg)?;
    OptionBag::from_typed(&component)
}

/// Completes a partial bag of a component in `category`.
pub fn complete(category: Category, partial: &OptionBag, cfg: &LayoutConfig) -> Result<OptionBag> {
    match category {
        Category::Chips => complete_as::<Chip>(partial, cfg),
        Category::Qubits => complete_as::<Qubit>(partial, cfg),
        Category::CouplingLines => complete_as::<CouplingLine>(partial, cfg),
        Category::ReadoutLines => complete_as::<ReadoutLine>(partial, cfg),
        Category::ControlLines => complete_as::<ControlLine>(partial, cfg),
        Category::TransmissionLines => complete_as::<TransmissionLine>(partial, cfg),
        Category::Crossovers => complete_as::<CrossOver>(partial, cfg),
        Category::AirBridges => complete_as::<AirBridge>(partial, cfg),
        Category::IndiumBumps => complete_as::<IndiumBump>(partial, cfg),
        Category::Pins => complete_as::<Pin>(partial, cfg),
        Category::Others => complete_as::<Other>(partial, cfg),
    }
}

/// Completes every entry of a collection bag into typed components.
///
/// Entries without a `name` take their key as name. Fails with
/// [`ErrorSource::DuplicateName`] if two entries resolve to the same name.
pub fn complete_collection<C: Component>(
    collection: &OptionBag,
    cfg: &LayoutConfig,
) -> Result<Collection<C>> {
    let mut out = Collection::with_capacity(collection.len());
    for (key, value) in collection.iter() {
        let entry = value.as_bag().ok_or_else(|| {
            ErrorSource::InvalidOption(format!(
                "{} entry `{key}` must be a dict of options",
                C::CATEGORY
            ))
        })?;
        let component: C = if entry.contains_key("name") {
            complete_typed(entry, cfg)?
        } else {
            let mut named = entry.clone();
            named.insert("name", key.clone());
            complete_typed(&named, cfg)?
        };
        let name = component.name().clone();
        if out.contains_key(&name) {
            return Err(ErrorSource::DuplicateName {
                category: C::CATEGORY,
                name,
            }
            .into());
        }
        debug!("completed {} entry {name}", C::CATEGORY);
        out.insert(name, component);
    }
    Ok(out)
}

/// Encodes a typed collection as a collection bag keyed by name.
pub fn collection_to_bag<C: Component>(collection: &Collection<C>) -> Result<OptionBag> {
    let mut bag = OptionBag::with_capacity(collection.len());
    for (name, component) in collection {
        bag.insert(name.clone(), OptionBag::from_typed(component)?);
    }
    Ok(bag)
}

/// Completes every entry of a collection bag of `category`.
pub fn complete_many(
    category: Category,
    collection: &OptionBag,
    cfg: &LayoutConfig,
) -> Result<OptionBag> {
    fn run<C: Component>(collection: &OptionBag, cfg: &LayoutConfig) -> Result<OptionBag> {
        collection_to_bag(&complete_collection::<C>(collection, cfg)?)
    }
    match category {
        Category::Chips => run::<Chip>(collection, cfg),
        Category::Qubits => run::<Qubit>(collection, cfg),
        Category::CouplingLines => run::<CouplingLine>(collection, cfg),
        Category::ReadoutLines => run::<ReadoutLine>(collection, cfg),
        Category::ControlLines => run::<ControlLine>(collection, cfg),
        Category::TransmissionLines => run::<TransmissionLine>(collection, cfg),
        Category::Crossovers => run::<CrossOver>(collection, cfg),
        Category::AirBridges => run::<AirBridge>(collection, cfg),
        Category::IndiumBumps => run::<IndiumBump>(collection, cfg),
        Category::Pins => run::<Pin>(collection, cfg),
        Category::Others => run::<Other>(collection, cfg),
    }
}

/// Draws one component into a fresh cell named after it.
pub fn draw_component<C: Component>(
    component: &C,
    cfg: &LayoutConfig,
) -> Result<crate::layout::cell::Cell> {
    let mut ctx = LayoutCtx::new(component.name().clone(), cfg);
    with_err_context(component.layout(&mut ctx), || ErrorContext::DrawComponent {
        category: C::CATEGORY,
        name: component.name().clone(),
    })?;
    Ok(ctx.into_cell())
}
