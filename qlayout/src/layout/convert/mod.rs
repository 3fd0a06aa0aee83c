//! Export of rendered layouts.

pub mod gds;
pub mod svg;
