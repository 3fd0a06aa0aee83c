pub mod branch;
pub mod component;
pub mod config;
pub mod design;
pub mod error;
pub mod io;
pub mod layout;
pub mod macros;
pub mod options;
pub mod placement;
pub mod topology;
pub use qgeom;

pub(crate) mod log;

pub use design::{Design, DesignKey, DesignStore};
pub use error::{QlayoutError, Result};
