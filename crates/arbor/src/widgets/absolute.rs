use crate::{
    error::Result,
    geom::{Rect, Size},
    id::WidgetId,
    layout::Place,
    widget::{Ctx, ReadCtx, Widget},
};

/// A container whose children keep their own positions.
///
/// Each pass lays a child out at its current position with its desired size.
#[derive(Debug, Default)]
pub struct Absolute {
    /// Size requested from the parent.
    pub desired: Size,
}

impl Absolute {
    /// An absolute container requesting `desired`.
    pub fn new(desired: Size) -> Self {
        Self { desired }
    }

    /// Attach a child at `index`, or on top.
    pub fn add_child(&self, cx: &mut Ctx<'_>, child: WidgetId, index: Option<usize>) -> Result<()> {
        cx.attach(child, index)
    }

    /// Detach a child without destroying it.
    pub fn remove_child(&self, cx: &mut Ctx<'_>, child: WidgetId) -> Result<()> {
        cx.detach(child)
    }

    /// Detach the child at `index`. Out-of-range indices are ignored.
    pub fn remove_child_at(&self, cx: &mut Ctx<'_>, index: usize) -> Result<()> {
        match cx.children()?.get(index) {
            Some(child) => cx.detach(*child),
            None => Ok(()),
        }
    }

    /// Detach every child.
    pub fn clear_children(&self, cx: &mut Ctx<'_>) -> Result<()> {
        for child in cx.children()? {
            cx.detach(child)?;
        }
        Ok(())
    }
}

impl Widget for Absolute {
    fn accepts_children(&self) -> bool {
        true
    }

    fn desired_size(&self, _cx: &ReadCtx<'_>) -> Result<Size> {
        Ok(self.desired)
    }

    fn layout_children(&mut self, cx: &mut Ctx<'_>) -> Result<()> {
        for child in cx.children()? {
            let pos = cx.ui().position(child)?;
            let size = cx.desired_size(child)?;
            cx.layout_widget(child, Rect { pos, size }, Place::BOTTOM_LEFT)?;
        }
        Ok(())
    }
}
