//! Layout data model and rendering.
//!
//! Components draw into a [`LayoutCtx`](context::LayoutCtx). A
//! [`LayoutBuilder`](builder::LayoutBuilder) owned by one draw call merges the
//! resulting cells into per-chip cells, producing a [`Library`](library::Library).

pub mod builder;
pub mod cell;
pub mod context;
pub mod convert;
pub mod layers;
pub mod library;
