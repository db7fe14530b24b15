use serde::{Deserialize, Serialize};

use crate::{Point, round_px};

/// An integer pixel rectangle given by its min and max corners.
///
/// Max edges are exclusive. A rect with `max <= min` on either axis is empty.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub struct PixelRect {
    /// Minimum x.
    pub x1: i32,
    /// Minimum y.
    pub y1: i32,
    /// Maximum x.
    pub x2: i32,
    /// Maximum y.
    pub y2: i32,
}

impl PixelRect {
    /// Construct from min and max corners.
    pub const fn new(x1: i32, y1: i32, x2: i32, y2: i32) -> Self {
        Self { x1, y1, x2, y2 }
    }

    /// Resolve two arbitrary corners into normalized, rounded pixel bounds.
    pub fn from_corners(a: Point, b: Point) -> Self {
        let lo = a.min(b);
        let hi = a.max(b);
        Self::new(
            round_px(lo.x) as i32,
            round_px(lo.y) as i32,
            round_px(hi.x) as i32,
            round_px(hi.y) as i32,
        )
    }

    /// Intersect with an enclosing rect: max of mins, min of maxes.
    pub fn intersect(&self, other: &Self) -> Self {
        Self::new(
            self.x1.max(other.x1),
            self.y1.max(other.y1),
            self.x2.min(other.x2),
            self.y2.min(other.y2),
        )
    }

    /// Width, never negative.
    pub fn width(&self) -> i32 {
        (self.x2 - self.x1).max(0)
    }

    /// Height, never negative.
    pub fn height(&self) -> i32 {
        (self.y2 - self.y1).max(0)
    }

    /// Does the rect cover no pixels?
    pub fn is_empty(&self) -> bool {
        self.width() == 0 || self.height() == 0
    }
}
