//! Pure layout engines and placement resolution.
//!
//! The engines here know nothing about widgets: entries carry a size, an optional weight and a
//! caller-chosen key, and a pass hands each key its resolved rect. Widget containers build an
//! engine from their children on every pass.

/// Sparse grid distribution.
mod grid;
/// Linear stacked distribution.
mod stacked;

use serde::{Deserialize, Serialize};

pub use grid::GridLayout;
pub use stacked::StackedLayout;

use crate::geom::{Point, Rect, Size, round_px};

/// Horizontal placement of a widget within its slot.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum HPlace {
    /// Take the full slot width.
    #[default]
    Fill,
    /// Align to the slot's left edge.
    Left,
    /// Center in the slot.
    Center,
    /// Align to the slot's right edge.
    Right,
}

/// Vertical placement of a widget within its slot.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum VPlace {
    /// Take the full slot height.
    #[default]
    Fill,
    /// Align to the slot's top edge.
    Top,
    /// Center in the slot.
    Middle,
    /// Align to the slot's bottom edge.
    Bottom,
}

/// Placement of a widget within a slot, per axis.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct Place {
    /// Horizontal placement.
    pub h: HPlace,
    /// Vertical placement.
    pub v: VPlace,
}

impl Place {
    /// Fill the slot on both axes.
    pub const FILL: Self = Self::new(HPlace::Fill, VPlace::Fill);
    /// Center on both axes at the desired size.
    pub const CENTER: Self = Self::new(HPlace::Center, VPlace::Middle);
    /// Anchor the bottom-left corner at the desired size.
    pub const BOTTOM_LEFT: Self = Self::new(HPlace::Left, VPlace::Bottom);

    /// Combine per-axis placements.
    pub const fn new(h: HPlace, v: VPlace) -> Self {
        Self { h, v }
    }

    /// Resolve the rect of a sized widget with `desired` size inside `slot`.
    ///
    /// `Fill` forces the slot extent; every other placement keeps the desired extent.
    pub fn resolve(self, slot: Rect, desired: Size) -> Rect {
        let Rect { pos, size } = slot;
        let (x, w) = match self.h {
            HPlace::Fill => (pos.x, size.w),
            HPlace::Left => (pos.x, desired.w),
            HPlace::Center => (pos.x + (size.w - desired.w) * 0.5, desired.w),
            HPlace::Right => (pos.x + size.w - desired.w, desired.w),
        };
        let (y, h) = match self.v {
            VPlace::Fill => (pos.y, size.h),
            VPlace::Bottom => (pos.y, desired.h),
            VPlace::Middle => (pos.y + (size.h - desired.h) * 0.5, desired.h),
            VPlace::Top => (pos.y + size.h - desired.h, desired.h),
        };
        Rect::new(x, y, w, h)
    }

    /// Resolve the anchor point of a position-only widget inside `slot`.
    ///
    /// `Fill` behaves like centering.
    pub fn anchor(self, slot: Rect) -> Point {
        let Rect { pos, size } = slot;
        let x = match self.h {
            HPlace::Fill | HPlace::Center => pos.x + size.w * 0.5,
            HPlace::Left => pos.x,
            HPlace::Right => pos.x + size.w,
        };
        let y = match self.v {
            VPlace::Fill | VPlace::Middle => pos.y + size.h * 0.5,
            VPlace::Bottom => pos.y,
            VPlace::Top => pos.y + size.h,
        };
        Point::new(x, y)
    }
}

/// Snap a run of sizes to whole pixels.
///
/// Cumulative offsets are rounded and the sizes rebuilt from their differences, so the total moves
/// by at most half a pixel and no gaps open between neighbours.
pub fn snap_sizes(sizes: &[f32]) -> Vec<f32> {
    let mut offset = 0.0;
    let mut prev = 0.0;
    sizes
        .iter()
        .map(|s| {
            offset += s;
            let snapped = round_px(offset);
            let size = snapped - prev;
            prev = snapped;
            size
        })
        .collect()
}

/// Total weight with the zero fallback applied.
fn weight_total(weights: impl Iterator<Item = f32>) -> f32 {
    let total: f32 = weights.sum();
    if total == 0.0 { 1.0 } else { total }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::Result;

    #[test]
    fn sized_placement() -> Result<()> {
        let slot = Rect::new(10.0, 20.0, 100.0, 50.0);
        let desired = Size::new(20.0, 10.0);
        assert_eq!(Place::FILL.resolve(slot, desired), slot);
        assert_eq!(
            Place::CENTER.resolve(slot, desired),
            Rect::new(50.0, 40.0, 20.0, 10.0)
        );
        assert_eq!(
            Place::new(HPlace::Right, VPlace::Top).resolve(slot, desired),
            Rect::new(90.0, 60.0, 20.0, 10.0)
        );
        assert_eq!(
            Place::new(HPlace::Left, VPlace::Fill).resolve(slot, desired),
            Rect::new(10.0, 20.0, 20.0, 50.0)
        );
        Ok(())
    }

    #[test]
    fn anchor_placement() -> Result<()> {
        let slot = Rect::new(0.0, 0.0, 10.0, 20.0);
        assert_eq!(Place::FILL.anchor(slot), Point::new(5.0, 10.0));
        assert_eq!(Place::BOTTOM_LEFT.anchor(slot), Point::new(0.0, 0.0));
        assert_eq!(
            Place::new(HPlace::Right, VPlace::Top).anchor(slot),
            Point::new(10.0, 20.0)
        );
        Ok(())
    }

    #[test]
    fn snapping_preserves_total() -> Result<()> {
        assert_eq!(snap_sizes(&[10.4, 10.4, 10.4]), vec![10.0, 11.0, 10.0]);
        assert_eq!(snap_sizes(&[0.5, 0.5, 0.5, 0.5]), vec![0.0, 1.0, 1.0, 0.0]);
        assert!(snap_sizes(&[]).is_empty());
        Ok(())
    }
}
