use crate::geom::{Point, Transform};

/// A stack of composed translations.
///
/// Each entry holds the product of everything pushed before it, so [`current`](Self::current) is
/// constant time.
#[derive(Debug, Clone, Default)]
pub struct TransformStack {
    /// Composed transforms, innermost last.
    stack: Vec<Transform>,
}

impl TransformStack {
    /// An empty stack, equivalent to the identity.
    pub fn new() -> Self {
        Self::default()
    }

    /// The composition of every entered transform.
    pub fn current(&self) -> Transform {
        self.stack.last().copied().unwrap_or(Transform::IDENTITY)
    }

    /// Enter a child transform.
    pub fn push(&mut self, t: Transform) {
        let composed = self.current() * t;
        self.stack.push(composed);
    }

    /// Leave the innermost transform.
    pub fn pop(&mut self) -> Option<Transform> {
        self.stack.pop()
    }

    /// Nesting depth.
    pub fn depth(&self) -> usize {
        self.stack.len()
    }

    /// Map a local point to global space.
    pub fn to_global(&self, p: Point) -> Point {
        self.current().transform_point(p)
    }

    /// Map a global point to local space.
    pub fn to_local(&self, p: Point) -> Point {
        self.current().inverse().transform_point(p)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::Result;

    #[test]
    fn nesting_composes_and_unwinds() -> Result<()> {
        let mut s = TransformStack::new();
        s.push(Transform::translate(10.0, 5.0));
        s.push(Transform::translate(-2.0, 1.0));
        assert_eq!(s.current(), Transform::translate(8.0, 6.0));
        assert_eq!(s.to_global(Point::new(1.0, 1.0)), Point::new(9.0, 7.0));
        assert_eq!(s.to_local(Point::new(9.0, 7.0)), Point::new(1.0, 1.0));
        s.pop();
        assert_eq!(s.current(), Transform::translate(10.0, 5.0));
        s.pop();
        assert_eq!(s.current(), Transform::IDENTITY);
        assert_eq!(s.depth(), 0);
        Ok(())
    }
}
