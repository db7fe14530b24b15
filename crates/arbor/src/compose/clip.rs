use crate::geom::PixelRect;

/// A stack of clip states.
///
/// Each entry is the effective clip for its scope: `Some` bounds, or `None` for a cleared scope
/// that draws unclipped.
#[derive(Debug, Clone, Default)]
pub struct ClipStack {
    /// Effective clips, innermost last.
    stack: Vec<Option<PixelRect>>,
}

impl ClipStack {
    /// An empty stack: no clipping.
    pub fn new() -> Self {
        Self::default()
    }

    /// The clip in effect.
    pub fn current(&self) -> Option<PixelRect> {
        self.stack.last().copied().flatten()
    }

    /// Enter a clip scope and return the effective clip.
    ///
    /// With `merge` set and an enclosing clip active, the new bounds are intersected with it.
    pub fn push(&mut self, bounds: PixelRect, merge: bool) -> Option<PixelRect> {
        let effective = match self.current() {
            Some(outer) if merge => bounds.intersect(&outer),
            _ => bounds,
        };
        self.stack.push(Some(effective));
        Some(effective)
    }

    /// Enter a scope with clipping disabled.
    pub fn push_cleared(&mut self) {
        self.stack.push(None);
    }

    /// Leave the innermost scope and return the clip that is in effect again.
    pub fn pop(&mut self) -> Option<PixelRect> {
        self.stack.pop();
        self.current()
    }

    /// Nesting depth.
    pub fn depth(&self) -> usize {
        self.stack.len()
    }
}
