use serde::{Deserialize, Serialize};

use crate::Axis;

/// A width and height.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Size {
    /// Extent along the x axis.
    pub w: f32,
    /// Extent along the y axis.
    pub h: f32,
}

impl Size {
    /// Construct a size.
    pub const fn new(w: f32, h: f32) -> Self {
        Self { w, h }
    }

    /// The empty size.
    pub const fn zero() -> Self {
        Self { w: 0.0, h: 0.0 }
    }

    /// Extent along an axis.
    pub fn along(&self, axis: Axis) -> f32 {
        match axis {
            Axis::Horizontal => self.w,
            Axis::Vertical => self.h,
        }
    }

    /// Build a size from main and cross extents relative to `axis`.
    pub fn from_axes(axis: Axis, main: f32, cross: f32) -> Self {
        match axis {
            Axis::Horizontal => Self::new(main, cross),
            Axis::Vertical => Self::new(cross, main),
        }
    }

    /// Component-wise maximum.
    pub fn max(self, other: Self) -> Self {
        Self::new(self.w.max(other.w), self.h.max(other.h))
    }
}

impl From<(f32, f32)> for Size {
    #[inline]
    fn from(v: (f32, f32)) -> Self {
        Self::new(v.0, v.1)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::Result;

    #[test]
    fn axes() -> Result<()> {
        let s = Size::new(3.0, 7.0);
        assert_eq!(s.along(Axis::Horizontal), 3.0);
        assert_eq!(s.along(Axis::Vertical), 7.0);
        assert_eq!(Size::from_axes(Axis::Vertical, 7.0, 3.0), s);
        assert_eq!(Size::from_axes(Axis::Horizontal, 3.0, 7.0), s);
        Ok(())
    }
}
