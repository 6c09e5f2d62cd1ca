//! Compute module - Grid data model and the pure transformations over it.

mod grid;
mod randomize;
mod resize;
mod transition;

pub use grid::*;
pub use randomize::*;
pub use resize::*;
pub use transition::*;
