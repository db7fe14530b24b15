use serde::{Deserialize, Serialize};

use crate::{Axis, Point, Size};

/// A position and size, produced by layout passes.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Rect {
    /// Bottom-left corner.
    pub pos: Point,
    /// Extent.
    pub size: Size,
}

impl Rect {
    /// Construct a rect from its bottom-left corner and extent.
    pub const fn new(x: f32, y: f32, w: f32, h: f32) -> Self {
        Self {
            pos: Point::new(x, y),
            size: Size::new(w, h),
        }
    }

    /// Construct a rect at the origin.
    pub const fn from_size(size: Size) -> Self {
        Self {
            pos: Point::zero(),
            size,
        }
    }

    /// Start coordinate along an axis.
    pub fn start(&self, axis: Axis) -> f32 {
        match axis {
            Axis::Horizontal => self.pos.x,
            Axis::Vertical => self.pos.y,
        }
    }

    /// Top-right corner.
    pub fn max(&self) -> Point {
        Point::new(self.pos.x + self.size.w, self.pos.y + self.size.h)
    }

    /// Build a rect from start/extent pairs along `axis` and its cross axis.
    pub fn from_axes(axis: Axis, main: (f32, f32), cross: (f32, f32)) -> Self {
        match axis {
            Axis::Horizontal => Self::new(main.0, cross.0, main.1, cross.1),
            Axis::Vertical => Self::new(cross.0, main.0, cross.1, main.1),
        }
    }

    /// Does this rect contain `p`? Min edges are inclusive and max edges exclusive.
    pub fn contains(&self, p: Point) -> bool {
        let max = self.max();
        p.x >= self.pos.x && p.y >= self.pos.y && p.x < max.x && p.y < max.y
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::Result;

    #[test]
    fn contains_is_half_open() -> Result<()> {
        let r = Rect::new(0.0, 0.0, 10.0, 5.0);
        assert!(r.contains(Point::new(0.0, 0.0)));
        assert!(r.contains(Point::new(9.9, 4.9)));
        assert!(!r.contains(Point::new(10.0, 1.0)));
        assert!(!r.contains(Point::new(1.0, 5.0)));
        assert!(!r.contains(Point::new(-0.1, 1.0)));
        Ok(())
    }

    #[test]
    fn axes() -> Result<()> {
        let r = Rect::from_axes(Axis::Vertical, (2.0, 3.0), (4.0, 5.0));
        assert_eq!(r, Rect::new(4.0, 2.0, 5.0, 3.0));
        assert_eq!(r.start(Axis::Vertical), 2.0);
        assert_eq!(r.max(), Point::new(9.0, 5.0));
        Ok(())
    }
}
