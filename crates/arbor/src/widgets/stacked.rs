use crate::{
    error::Result,
    geom::{Axis, Margins, Rect, Size},
    id::WidgetId,
    layout::{Place, StackedLayout},
    widget::{Ctx, ReadCtx, Widget},
};

/// One entry in a stacked container.
#[derive(Debug, Clone, Copy)]
enum Entry {
    /// A child widget.
    Child {
        /// The child.
        id: WidgetId,
        /// Share of the leftover space.
        weight: f32,
        /// Placement within the child's slot.
        place: Place,
    },
    /// Empty space along the main axis.
    Padding {
        /// Fixed size.
        size: f32,
        /// Share of the leftover space.
        weight: f32,
    },
}

/// A container that distributes its children along one axis.
///
/// In vertical mode the first child is at the top.
#[derive(Debug)]
pub struct Stacked {
    /// Distribution axis.
    axis: Axis,
    /// Children and padding in insertion order.
    entries: Vec<Entry>,
    /// Replaces the computed desired width when set.
    pub desired_width: Option<f32>,
    /// Replaces the computed desired height when set.
    pub desired_height: Option<f32>,
    /// Space kept clear around the children.
    pub margins: Margins,
}

impl Stacked {
    /// An empty container along `axis`.
    pub fn new(axis: Axis) -> Self {
        Self {
            axis,
            entries: Vec::new(),
            desired_width: None,
            desired_height: None,
            margins: Margins::default(),
        }
    }

    /// Children left to right.
    pub fn horizontal() -> Self {
        Self::new(Axis::Horizontal)
    }

    /// Children top to bottom.
    pub fn vertical() -> Self {
        Self::new(Axis::Vertical)
    }

    /// Set the margins.
    pub fn with_margins(mut self, margins: Margins) -> Self {
        self.margins = margins;
        self
    }

    /// Distribution axis.
    pub fn axis(&self) -> Axis {
        self.axis
    }

    /// Attach a child at the end.
    pub fn add_child(
        &mut self,
        cx: &mut Ctx<'_>,
        child: WidgetId,
        weight: f32,
        place: Place,
    ) -> Result<()> {
        cx.attach(child, None)?;
        self.entries.push(Entry::Child {
            id: child,
            weight,
            place,
        });
        Ok(())
    }

    /// Add empty space at the end.
    pub fn add_padding(&mut self, size: f32, weight: f32) {
        self.entries.push(Entry::Padding { size, weight });
    }

    /// Detach a child without destroying it.
    pub fn remove_child(&mut self, cx: &mut Ctx<'_>, child: WidgetId) -> Result<()> {
        self.forget(child);
        cx.detach(child)
    }

    /// Detach every child and drop all padding. Children are not destroyed.
    pub fn clear_children(&mut self, cx: &mut Ctx<'_>) -> Result<()> {
        self.entries.clear();
        for child in cx.children()? {
            cx.detach(child)?;
        }
        Ok(())
    }

    /// Drop a child's entry.
    fn forget(&mut self, child: WidgetId) {
        self.entries
            .retain(|e| !matches!(e, Entry::Child { id, .. } if *id == child));
    }

    /// Build a layout pass from the current entries.
    fn build(
        &self,
        snap: bool,
        desired: impl Fn(WidgetId) -> Result<Size>,
    ) -> Result<StackedLayout<(WidgetId, Place)>> {
        let mut layout = StackedLayout::new(self.axis, self.margins).snap(snap);
        for entry in &self.entries {
            match *entry {
                Entry::Child { id, weight, place } => {
                    layout.add_entry(desired(id)?, weight, (id, place));
                }
                Entry::Padding { size, weight } => layout.add_padding(size, weight),
            }
        }
        Ok(layout)
    }
}

impl Widget for Stacked {
    fn accepts_children(&self) -> bool {
        true
    }

    fn desired_size(&self, cx: &ReadCtx<'_>) -> Result<Size> {
        let snap = cx.ui().config().snap_to_pixels;
        let computed = self
            .build(snap, |id| cx.desired_size(id))?
            .compute_desired_size();
        Ok(Size::new(
            self.desired_width.unwrap_or(computed.w),
            self.desired_height.unwrap_or(computed.h),
        ))
    }

    fn layout_children(&mut self, cx: &mut Ctx<'_>) -> Result<()> {
        let snap = cx.ui().config().snap_to_pixels;
        let layout = self.build(snap, |id| cx.desired_size(id))?;
        let bounds = Rect::from_size(cx.size()?);
        layout.compute_layout(bounds, |(id, place), slot| {
            cx.layout_widget(*id, slot, *place)
        })
    }

    fn on_child_detached(&mut self, child: WidgetId) {
        self.forget(child);
    }
}
