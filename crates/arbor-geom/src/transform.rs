use std::ops::Mul;

use serde::{Deserialize, Serialize};

use crate::Point;

/// A 2D translation.
///
/// Composition is `parent * child`: a point is offset by the child first and then by the parent.
/// Since transforms are pure translations the product is associative and commutative.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Transform {
    /// Horizontal offset.
    pub x: f32,
    /// Vertical offset.
    pub y: f32,
}

impl Transform {
    /// The identity transform.
    pub const IDENTITY: Self = Self { x: 0.0, y: 0.0 };

    /// A translation by `(x, y)`.
    pub const fn translate(x: f32, y: f32) -> Self {
        Self { x, y }
    }

    /// Map a local point into the parent space.
    pub fn transform_point(&self, p: Point) -> Point {
        Point::new(p.x + self.x, p.y + self.y)
    }

    /// The transform that undoes this one.
    pub fn inverse(&self) -> Self {
        Self::translate(-self.x, -self.y)
    }
}

impl Mul for Transform {
    type Output = Self;

    fn mul(self, child: Self) -> Self {
        Self::translate(self.x + child.x, self.y + child.y)
    }
}

impl From<Point> for Transform {
    fn from(p: Point) -> Self {
        Self::translate(p.x, p.y)
    }
}

#[cfg(test)]
mod tests {
    use proptest::prelude::*;

    use super::*;
    use crate::Result;

    #[test]
    fn compose() -> Result<()> {
        let parent = Transform::translate(10.0, 20.0);
        let child = Transform::translate(1.0, 2.0);
        let p = Point::new(0.5, 0.5);
        assert_eq!(
            (parent * child).transform_point(p),
            parent.transform_point(child.transform_point(p))
        );
        assert_eq!((parent * child).inverse().transform_point(Point::new(11.5, 22.5)), p);
        assert_eq!(Transform::IDENTITY * parent, parent);
        Ok(())
    }

    proptest! {
        #[test]
        fn inverse_round_trips(
            x in -1000i32..1000, y in -1000i32..1000, px in -1000i32..1000, py in -1000i32..1000
        ) {
            let t = Transform::translate(x as f32, y as f32);
            let p = Point::new(px as f32, py as f32);
            prop_assert_eq!(t.inverse().transform_point(t.transform_point(p)), p);
        }

        #[test]
        fn composition_is_associative(
            a in -100i32..100, b in -100i32..100, c in -100i32..100, d in -100i32..100
        ) {
            let t1 = Transform::translate(a as f32, b as f32);
            let t2 = Transform::translate(c as f32, d as f32);
            let t3 = Transform::translate(b as f32, c as f32);
            prop_assert_eq!((t1 * t2) * t3, t1 * (t2 * t3));
        }
    }
}
