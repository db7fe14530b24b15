//! Concrete widgets: layout containers and simple leaves.

/// Absolute-position container.
mod absolute;
/// Single-child color fill.
mod background;
/// Sparse grid container.
mod grid;
/// Solid leaf.
mod rectangle;
/// Clipping scroll container.
mod scroll;
/// Root-only stack of overlapping layers.
mod stack;
/// Linear weighted container.
mod stacked;

pub use absolute::Absolute;
pub use background::Background;
pub use grid::Grid;
pub use rectangle::Rectangle;
pub use scroll::ScrollArea;
pub use stack::Stack;
pub use stacked::Stacked;
