//! Transform and clip composition for hit-testing and drawing.

/// The draw-time canvas.
mod canvas;
/// Clip region stack.
mod clip;
/// Translation stack.
mod transform;

pub use canvas::Canvas;
pub use clip::ClipStack;
pub use transform::TransformStack;
