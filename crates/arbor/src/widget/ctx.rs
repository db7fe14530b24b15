use crate::{
    Ui,
    anim::{Animator, Lerp, Param},
    compose::Canvas,
    error::Result,
    geom::{Point, Rect, Size},
    id::WidgetId,
    layout::Place,
    timer::Timers,
};

/// Read-only context for desired-size queries and drawing.
pub struct ReadCtx<'a> {
    /// The engine.
    ui: &'a Ui,
    /// The widget being called.
    id: WidgetId,
}

impl<'a> ReadCtx<'a> {
    /// Context for a call on `id`.
    pub(crate) fn new(ui: &'a Ui, id: WidgetId) -> Self {
        Self { ui, id }
    }

    /// The widget being called.
    pub fn id(&self) -> WidgetId {
        self.id
    }

    /// The engine.
    pub fn ui(&self) -> &'a Ui {
        self.ui
    }

    /// The parameter registry.
    pub fn animator(&self) -> &'a Animator {
        self.ui.animator()
    }

    /// Current value of a parameter.
    pub fn get<T: Lerp>(&self, param: Param<T>) -> Result<T> {
        self.ui.animator().get(param)
    }

    /// This widget's size.
    pub fn size(&self) -> Result<Size> {
        self.ui.size(self.id)
    }

    /// This widget's children in draw order.
    pub fn children(&self) -> Result<&'a [WidgetId]> {
        self.ui.children(self.id)
    }

    /// Desired size of another widget, usually a child.
    pub fn desired_size(&self, id: WidgetId) -> Result<Size> {
        self.ui.desired_size(id)
    }

    /// Queue a draw callback to run once after the tree has been drawn.
    pub fn add_overlay(&self, f: impl FnOnce(&mut Canvas<'_>) -> Result<()> + 'static) {
        self.ui.add_overlay(f);
    }
}

/// Mutable context for layout and event handling.
///
/// The widget being called is taken out of the arena for the duration of the call, so the whole
/// [`Ui`] is available through [`ui`](Self::ui). Calls that need the widget itself again fail
/// with [`Error::WidgetBusy`](crate::Error::WidgetBusy); events sent to it are deferred.
pub struct Ctx<'a> {
    /// The engine.
    ui: &'a mut Ui,
    /// The widget being called.
    id: WidgetId,
}

impl<'a> Ctx<'a> {
    /// Context for a call on `id`.
    pub(crate) fn new(ui: &'a mut Ui, id: WidgetId) -> Self {
        Self { ui, id }
    }

    /// The widget being called.
    pub fn id(&self) -> WidgetId {
        self.id
    }

    /// The engine.
    pub fn ui(&mut self) -> &mut Ui {
        self.ui
    }

    /// The parameter registry.
    pub fn animator(&mut self) -> &mut Animator {
        self.ui.animator_mut()
    }

    /// The timer registry.
    pub fn timers(&mut self) -> &mut Timers {
        self.ui.timers_mut()
    }

    /// Current value of a parameter.
    pub fn get<T: Lerp>(&self, param: Param<T>) -> Result<T> {
        self.ui.animator().get(param)
    }

    /// Set a parameter, cancelling any transition on it.
    pub fn set<T: Lerp>(&mut self, param: Param<T>, value: T) -> Result<()> {
        self.ui.animator_mut().set(param, value)
    }

    /// This widget's size.
    pub fn size(&self) -> Result<Size> {
        self.ui.size(self.id)
    }

    /// This widget's position in its parent.
    pub fn position(&self) -> Result<Point> {
        self.ui.position(self.id)
    }

    /// This widget's children in draw order.
    pub fn children(&self) -> Result<Vec<WidgetId>> {
        Ok(self.ui.children(self.id)?.to_vec())
    }

    /// Desired size of another widget, usually a child.
    pub fn desired_size(&self, id: WidgetId) -> Result<Size> {
        self.ui.desired_size(id)
    }

    /// Lay out a child into `slot`, in this widget's local coordinates.
    pub fn layout_widget(&mut self, child: WidgetId, slot: Rect, place: Place) -> Result<()> {
        self.ui.layout_widget(child, slot, place)
    }

    /// Attach a child at `index`, or at the end.
    pub fn attach(&mut self, child: WidgetId, index: Option<usize>) -> Result<()> {
        self.ui.attach(self.id, child, index)
    }

    /// Detach a child without destroying it.
    pub fn detach(&mut self, child: WidgetId) -> Result<()> {
        if self.ui.parent(child)? == Some(self.id) {
            self.ui.detach(child)?;
        }
        Ok(())
    }

    /// Route all pointer events to this widget.
    pub fn capture(&mut self) -> Result<()> {
        self.ui.capture(self.id)
    }

    /// Release the pointer if this widget holds it.
    pub fn release_capture(&mut self) {
        self.ui.release_capture(self.id);
    }

    /// Is this widget capturing the pointer?
    pub fn is_captured(&self) -> bool {
        self.ui.captured() == Some(self.id)
    }

    /// Take keyboard focus.
    pub fn focus(&mut self) -> Result<()> {
        self.ui.focus(self.id)
    }

    /// Release keyboard focus if this widget holds it.
    pub fn release_focus(&mut self) -> Result<()> {
        self.ui.release_focus(Some(self.id))
    }

    /// Does this widget hold keyboard focus?
    pub fn is_focused(&self) -> bool {
        self.ui.focused() == Some(self.id)
    }

    /// Is this widget under the pointer?
    pub fn is_hovered(&self) -> bool {
        self.ui.hovered() == Some(self.id)
    }
}
