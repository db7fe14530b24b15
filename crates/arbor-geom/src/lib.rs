//! Geometry primitives used across arbor.
//!
//! All coordinates are `f32` in a bottom-left-origin space: `y` grows upward.
//! Pixel-aligned values (clip bounds) are expressed as [`PixelRect`].

/// Error types for geometry operations.
mod error;
/// Four-sided margins.
mod margins;
/// Integer pixel rectangles.
mod pixel;
/// Point helpers.
mod point;
/// Layout rectangles.
mod rect;
/// Width/height size type.
mod size;
/// Translation transforms.
mod transform;

pub use error::{Error, Result};
pub use margins::Margins;
pub use pixel::PixelRect;
pub use point::Point;
pub use rect::Rect;
pub use size::Size;
pub use transform::Transform;

/// A layout axis.
#[derive(Debug, Clone, Copy, Hash, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub enum Axis {
    /// The x axis.
    Horizontal,
    /// The y axis.
    Vertical,
}

impl Axis {
    /// The perpendicular axis.
    pub fn cross(self) -> Self {
        match self {
            Self::Horizontal => Self::Vertical,
            Self::Vertical => Self::Horizontal,
        }
    }
}

/// Round to the nearest integer, ties to even.
///
/// Every pixel conversion in arbor goes through this so that layout snapping and clip bounds agree.
pub fn round_px(v: f32) -> f32 {
    v.round_ties_even()
}
