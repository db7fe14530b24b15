use serde::{Deserialize, Serialize};

use crate::{Axis, Error, Result};

/// Margins around a layout, in `(left, bottom, right, top)` order.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Margins {
    /// Left margin.
    pub left: f32,
    /// Bottom margin.
    pub bottom: f32,
    /// Right margin.
    pub right: f32,
    /// Top margin.
    pub top: f32,
}

impl Margins {
    /// Construct margins from all four sides.
    pub const fn new(left: f32, bottom: f32, right: f32, top: f32) -> Self {
        Self {
            left,
            bottom,
            right,
            top,
        }
    }

    /// The same margin on every side.
    pub const fn uniform(v: f32) -> Self {
        Self::new(v, v, v, v)
    }

    /// Leading and trailing margins along an axis. Leading is left or bottom.
    pub fn along(&self, axis: Axis) -> (f32, f32) {
        match axis {
            Axis::Horizontal => (self.left, self.right),
            Axis::Vertical => (self.bottom, self.top),
        }
    }

    /// Sum of both margins along an axis.
    pub fn total(&self, axis: Axis) -> f32 {
        let (a, b) = self.along(axis);
        a + b
    }
}

impl From<f32> for Margins {
    fn from(v: f32) -> Self {
        Self::uniform(v)
    }
}

impl TryFrom<&[f32]> for Margins {
    type Error = Error;

    /// Accepts either one value for all sides or four values in `(left, bottom, right, top)` order.
    fn try_from(v: &[f32]) -> Result<Self> {
        match *v {
            [m] => Ok(Self::uniform(m)),
            [l, b, r, t] => Ok(Self::new(l, b, r, t)),
            _ => Err(Error::Geometry(format!(
                "margins need 1 or 4 values, got {}",
                v.len()
            ))),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn from_slice() -> Result<()> {
        assert_eq!(Margins::try_from(&[2.0][..])?, Margins::uniform(2.0));
        let m = Margins::try_from(&[1.0, 2.0, 3.0, 4.0][..])?;
        assert_eq!(m.along(Axis::Horizontal), (1.0, 3.0));
        assert_eq!(m.along(Axis::Vertical), (2.0, 4.0));
        assert_eq!(m.total(Axis::Vertical), 6.0);
        assert!(Margins::try_from(&[1.0, 2.0][..]).is_err());
        Ok(())
    }
}
