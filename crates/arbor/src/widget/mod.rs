//! Widget trait and event outcome types.

/// Contexts handed to widget methods.
mod ctx;
/// Arena node storage.
pub(crate) mod node;

use std::any::{Any, type_name};

pub use ctx::{Ctx, ReadCtx};

use crate::{
    anim::Animator,
    compose::Canvas,
    error::Result,
    event::Event,
    geom::{Rect, Size},
    id::WidgetId,
};

/// The result of an event handler.
#[derive(Debug, PartialEq, Eq, Clone, Copy)]
pub enum EventOutcome {
    /// The event was processed and propagation stops.
    Consume,
    /// The event was not handled and bubbles to the parent, if propagation is on.
    Ignore,
}

impl From<bool> for EventOutcome {
    fn from(consumed: bool) -> Self {
        if consumed { Self::Consume } else { Self::Ignore }
    }
}

/// How a widget takes part in hit-testing.
#[derive(Debug, PartialEq, Eq, Clone, Copy)]
pub enum HitTest {
    /// Hit when the point falls within the widget's bounds; children are tested first, topmost
    /// first.
    Bounds,
    /// Only the last child is tested and the widget itself is never a target.
    TopChild,
    /// Never a target, and children are not tested.
    Never,
}

/// Widgets are the behavior attached to nodes in the [`Ui`](crate::Ui) arena.
///
/// Position, size, visibility and the child list live in the arena; a widget only carries what is
/// specific to its kind. Static properties (`sized`, `accepts_children`, `root_only`, `hit_test`)
/// are read once when the widget is added.
pub trait Widget: Any {
    /// Name used in logs.
    fn name(&self) -> &'static str {
        let name = type_name::<Self>();
        name.rsplit("::").next().unwrap_or(name)
    }

    /// Does this widget have a width and height? Position-only widgets are anchored at a point and
    /// never hit.
    fn sized(&self) -> bool {
        true
    }

    /// May children be attached to this widget?
    fn accepts_children(&self) -> bool {
        false
    }

    /// May this widget only be used as the tree root?
    fn root_only(&self) -> bool {
        false
    }

    /// Hit-test policy.
    fn hit_test(&self) -> HitTest {
        HitTest::Bounds
    }

    /// Size this widget would like to be given.
    fn desired_size(&self, _cx: &ReadCtx<'_>) -> Result<Size> {
        Ok(Size::zero())
    }

    /// Lay out children inside this widget's current size.
    fn layout_children(&mut self, _cx: &mut Ctx<'_>) -> Result<()> {
        Ok(())
    }

    /// Draw this widget's own content in local coordinates. Children are drawn afterwards by the
    /// engine.
    fn draw(&self, _cx: &ReadCtx<'_>, _canvas: &mut Canvas<'_>) -> Result<()> {
        Ok(())
    }

    /// A local rect to clip children to, merged with any enclosing clip.
    fn clip_children(&self, _cx: &ReadCtx<'_>) -> Option<Rect> {
        None
    }

    /// Handle an event.
    fn on_event(&mut self, _event: &Event, _cx: &mut Ctx<'_>) -> Result<EventOutcome> {
        Ok(EventOutcome::Ignore)
    }

    /// A child was detached from this widget.
    ///
    /// Called after the tree has changed, and possibly for a child the widget itself detached, so
    /// implementations must tolerate children they no longer track.
    fn on_child_detached(&mut self, _child: WidgetId) {}

    /// The widget is being destroyed. Release parameters it created.
    fn on_destroy(&mut self, _animator: &mut Animator) {}
}

/// Convert widgets into boxed trait objects.
impl<W> From<W> for Box<dyn Widget>
where
    W: Widget + 'static,
{
    fn from(widget: W) -> Self {
        Box::new(widget)
    }
}
