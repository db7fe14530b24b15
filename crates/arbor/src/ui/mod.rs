//! The engine context: widget arena, parameter and timer registries, and the event router.

/// Pointer, capture and focus routing.
mod router;

use std::{
    any::{Any, type_name},
    cell::RefCell,
    mem,
};

use slotmap::SlotMap;

use self::router::Router;
use crate::{
    anim::{Animator, Param},
    backend::DrawBackend,
    compose::{Canvas, TransformStack},
    config::EngineConfig,
    error::{Error, Result},
    event::{Event, HostEvent},
    geom::{Point, Rect, Size, Transform},
    id::{TypedId, WidgetId},
    layout::Place,
    timer::Timers,
    widget::{Ctx, EventOutcome, HitTest, ReadCtx, Widget, node::Node},
};

/// A draw callback queued for the end of the current draw pass.
pub type OverlayFn = Box<dyn FnOnce(&mut Canvas<'_>) -> Result<()>>;

/// The engine.
///
/// A `Ui` owns every widget, the [`Animator`] holding all animatable parameters, the [`Timers`]
/// registry and the router state. Nothing is global: tests can run any number of engines side by
/// side.
pub struct Ui {
    /// Engine configuration.
    config: EngineConfig,
    /// Widget arena.
    nodes: SlotMap<WidgetId, Node>,
    /// Tree root.
    root: Option<WidgetId>,
    /// Parameter registry.
    animator: Animator,
    /// Timer registry.
    pub(crate) timers: Timers,
    /// Pointer, capture and focus state.
    router: Router,
    /// Draw callbacks queued during the current draw pass.
    overlays: RefCell<Vec<OverlayFn>>,
    /// Events addressed to widgets that were taken out at the time.
    deferred: Vec<(WidgetId, Event)>,
}

impl Ui {
    /// Construct an empty engine.
    pub fn new(config: EngineConfig) -> Self {
        Self {
            config,
            nodes: SlotMap::with_key(),
            root: None,
            animator: Animator::new(),
            timers: Timers::new(),
            router: Router::default(),
            overlays: RefCell::new(Vec::new()),
            deferred: Vec::new(),
        }
    }

    /// Engine configuration.
    pub fn config(&self) -> &EngineConfig {
        &self.config
    }

    /// Display size.
    pub fn display_size(&self) -> Size {
        self.config.display_size()
    }

    /// The parameter registry.
    pub fn animator(&self) -> &Animator {
        &self.animator
    }

    /// The parameter registry, mutably.
    pub fn animator_mut(&mut self) -> &mut Animator {
        &mut self.animator
    }

    /// The timer registry.
    pub fn timers(&self) -> &Timers {
        &self.timers
    }

    /// The timer registry, mutably.
    pub fn timers_mut(&mut self) -> &mut Timers {
        &mut self.timers
    }

    // Tree

    /// Add a detached widget to the arena.
    pub fn add(&mut self, widget: impl Widget) -> WidgetId {
        let node = Node::new(Box::new(widget), &mut self.animator);
        self.nodes.insert(node)
    }

    /// Add a detached widget and return a typed id.
    pub fn add_typed<W: Widget>(&mut self, widget: W) -> TypedId<W> {
        TypedId::new(self.add(widget))
    }

    /// Build a widget that needs the parameter registry, then add it.
    pub fn build<W: Widget>(&mut self, f: impl FnOnce(&mut Animator) -> W) -> TypedId<W> {
        let widget = f(&mut self.animator);
        self.add_typed(widget)
    }

    /// Is the id live?
    pub fn contains(&self, id: impl Into<WidgetId>) -> bool {
        self.nodes.contains_key(id.into())
    }

    /// Number of live widgets.
    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    /// Is the arena empty?
    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    /// Look up a node.
    fn node(&self, id: WidgetId) -> Result<&Node> {
        self.nodes.get(id).ok_or(Error::WidgetNotFound(id))
    }

    /// Look up a node mutably.
    fn node_mut(&mut self, id: WidgetId) -> Result<&mut Node> {
        self.nodes.get_mut(id).ok_or(Error::WidgetNotFound(id))
    }

    /// The tree root.
    pub fn root(&self) -> Option<WidgetId> {
        self.root
    }

    /// Make a detached widget the tree root.
    pub fn set_root(&mut self, id: impl Into<WidgetId>) -> Result<()> {
        let id = id.into();
        if self.node(id)?.parent.is_some() {
            return Err(Error::AlreadyAttached(id));
        }
        self.root = Some(id);
        self.router.stale = true;
        Ok(())
    }

    /// Name of a widget's kind.
    pub fn name(&self, id: impl Into<WidgetId>) -> Result<&'static str> {
        Ok(self.node(id.into())?.name)
    }

    /// A widget's parent.
    pub fn parent(&self, id: impl Into<WidgetId>) -> Result<Option<WidgetId>> {
        Ok(self.node(id.into())?.parent)
    }

    /// A widget's children in draw order.
    pub fn children(&self, id: impl Into<WidgetId>) -> Result<&[WidgetId]> {
        Ok(&self.node(id.into())?.children)
    }

    /// Is `a` an ancestor of `b`, or `b` itself?
    pub fn is_ancestor(&self, a: WidgetId, b: WidgetId) -> bool {
        let mut current = Some(b);
        while let Some(id) = current {
            if id == a {
                return true;
            }
            current = self.nodes.get(id).and_then(|n| n.parent);
        }
        false
    }

    /// Attach `child` under `parent` at `index`, or at the end.
    pub fn attach(
        &mut self,
        parent: impl Into<WidgetId>,
        child: impl Into<WidgetId>,
        index: Option<usize>,
    ) -> Result<()> {
        let (parent, child) = (parent.into(), child.into());
        if !self.node(parent)?.container {
            return Err(Error::NotAContainer(parent));
        }
        if self.node(child)?.parent.is_some() || self.root == Some(child) {
            return Err(Error::AlreadyAttached(child));
        }
        if self.is_ancestor(child, parent) {
            return Err(Error::WouldCreateCycle { parent, child });
        }
        let p = self.node_mut(parent)?;
        let index = index.unwrap_or(p.children.len()).min(p.children.len());
        p.children.insert(index, child);
        self.node_mut(child)?.parent = Some(parent);
        self.router.stale = true;
        Ok(())
    }

    /// Detach a widget from its parent without destroying it. Detached widgets are a no-op.
    ///
    /// The parent is told through [`Widget::on_child_detached`].
    pub fn detach(&mut self, child: impl Into<WidgetId>) -> Result<()> {
        let child = child.into();
        let Some(parent) = self.node_mut(child)?.parent.take() else {
            return Ok(());
        };
        self.router.stale = true;
        let p = self.node_mut(parent)?;
        p.children.retain(|c| *c != child);
        match p.widget.as_mut() {
            Some(w) => w.on_child_detached(child),
            None => p.detached.push(child),
        }
        Ok(())
    }

    /// Destroy a widget and, recursively, everything it owns.
    ///
    /// The router forgets every destroyed widget before its node is removed. Destroying a stale
    /// id is an error.
    pub fn destroy(&mut self, id: impl Into<WidgetId>) -> Result<()> {
        let id = id.into();
        let node = self.node(id).inspect_err(|e| {
            tracing::error!("destroy failed: {e}");
        })?;
        tracing::debug!("destroy {} {id:?}", node.name);
        self.detach(id)?;
        if self.root == Some(id) {
            self.root = None;
        }

        let mut doomed = vec![id];
        let mut i = 0;
        while let Some(next) = doomed.get(i).copied() {
            doomed.extend(self.node(next)?.children.iter().copied());
            i += 1;
        }
        for id in &doomed {
            self.router.forget(*id, &mut self.timers);
        }
        for id in doomed {
            if let Some(node) = self.nodes.remove(id) {
                node.release_params(&mut self.animator);
                if let Some(mut w) = node.widget {
                    w.on_destroy(&mut self.animator);
                }
            }
        }
        self.router.stale = true;
        Ok(())
    }

    /// Is the widget visible?
    pub fn visible(&self, id: impl Into<WidgetId>) -> Result<bool> {
        Ok(self.node(id.into())?.visible)
    }

    /// Show or hide a widget. Hidden widgets are neither drawn nor hit.
    pub fn set_visible(&mut self, id: impl Into<WidgetId>, visible: bool) -> Result<()> {
        let node = self.node_mut(id.into())?;
        if node.visible != visible {
            node.visible = visible;
            self.router.stale = true;
        }
        Ok(())
    }

    // Widget access

    /// Borrow a widget immutably.
    pub fn widget(&self, id: impl Into<WidgetId>) -> Result<&dyn Widget> {
        let id = id.into();
        self.node(id)?
            .widget
            .as_deref()
            .ok_or(Error::WidgetBusy(id))
    }

    /// Borrow a widget of a known type.
    pub fn widget_ref<W: Widget>(&self, id: impl Into<WidgetId>) -> Result<&W> {
        let any: &dyn Any = self.widget(id)?;
        any.downcast_ref::<W>().ok_or(Error::TypeMismatch {
            expected: type_name::<W>(),
        })
    }

    /// Take a widget out of the arena for one call.
    ///
    /// While `f` runs the whole engine is available through the context. If `f` destroys the
    /// widget, it is dropped once `f` returns.
    pub fn with_widget_mut<R>(
        &mut self,
        id: impl Into<WidgetId>,
        f: impl FnOnce(&mut dyn Widget, &mut Ctx<'_>) -> Result<R>,
    ) -> Result<R> {
        let id = id.into();
        let mut widget = self.node_mut(id)?.widget.take().ok_or(Error::WidgetBusy(id))?;
        let result = f(widget.as_mut(), &mut Ctx::new(self, id));
        self.restore(id, widget);
        result
    }

    /// Take a widget of type `W` out of the arena for one call.
    pub fn with_widget<W: Widget, R>(
        &mut self,
        id: WidgetId,
        f: impl FnOnce(&mut W, &mut Ctx<'_>) -> Result<R>,
    ) -> Result<R> {
        self.with_widget_mut(id, |w, cx| {
            let any = w as &mut dyn Any;
            let w = any.downcast_mut::<W>().ok_or(Error::TypeMismatch {
                expected: type_name::<W>(),
            })?;
            f(w, cx)
        })
    }

    /// Take a widget out of the arena for one call, using a typed id.
    pub fn with_typed<W: Widget, R>(
        &mut self,
        id: TypedId<W>,
        f: impl FnOnce(&mut W, &mut Ctx<'_>) -> Result<R>,
    ) -> Result<R> {
        self.with_widget(id.into(), f)
    }

    /// Put a widget back, reporting children detached while it was out.
    fn restore(&mut self, id: WidgetId, mut widget: Box<dyn Widget>) {
        match self.nodes.get_mut(id) {
            Some(node) => {
                for child in node.detached.drain(..) {
                    widget.on_child_detached(child);
                }
                node.widget = Some(widget);
            }
            None => widget.on_destroy(&mut self.animator),
        }
    }

    // Geometry

    /// Position in the parent's space.
    pub fn position(&self, id: impl Into<WidgetId>) -> Result<Point> {
        Ok(self.node(id.into())?.position(&self.animator))
    }

    /// Current size. Position-only widgets report zero.
    pub fn size(&self, id: impl Into<WidgetId>) -> Result<Size> {
        Ok(self.node(id.into())?.size(&self.animator))
    }

    /// Position and size in the parent's space.
    pub fn rect(&self, id: impl Into<WidgetId>) -> Result<Rect> {
        let id = id.into();
        Ok(Rect {
            pos: self.position(id)?,
            size: self.size(id)?,
        })
    }

    /// The animatable x and y parameters.
    pub fn position_params(&self, id: impl Into<WidgetId>) -> Result<(Param<f32>, Param<f32>)> {
        let node = self.node(id.into())?;
        Ok((node.x, node.y))
    }

    /// The animatable width and height parameters, for sized widgets.
    pub fn size_params(&self, id: impl Into<WidgetId>) -> Result<Option<(Param<f32>, Param<f32>)>> {
        Ok(self.node(id.into())?.size)
    }

    /// Move a widget within its parent.
    pub fn set_position(&mut self, id: impl Into<WidgetId>, p: Point) -> Result<()> {
        let (x, y) = self.position_params(id)?;
        self.animator.set(x, p.x)?;
        self.animator.set(y, p.y)
    }

    /// Resize a sized widget. Position-only widgets ignore this.
    pub fn set_size(&mut self, id: impl Into<WidgetId>, size: Size) -> Result<()> {
        if let Some((w, h)) = self.size_params(id)? {
            self.animator.set(w, size.w)?;
            self.animator.set(h, size.h)?;
        }
        Ok(())
    }

    /// Composition of the transforms from the root down to and including `id`.
    pub fn global_transform(&self, id: impl Into<WidgetId>) -> Result<Transform> {
        let mut t = Transform::IDENTITY;
        let mut current = Some(id.into());
        while let Some(id) = current {
            let node = self.node(id)?;
            t = Transform::from(node.position(&self.animator)) * t;
            current = node.parent;
        }
        Ok(t)
    }

    // Layout

    /// The size a widget would like.
    pub fn desired_size(&self, id: impl Into<WidgetId>) -> Result<Size> {
        let id = id.into();
        self.widget(id)?.desired_size(&ReadCtx::new(self, id))
    }

    /// Place a widget inside `slot`, given in its parent's space.
    ///
    /// Position-only widgets are anchored at a point of the slot. Sized widgets get their desired
    /// size unless a placement is `Fill`, and containers then lay out their children.
    pub fn layout_widget(&mut self, id: impl Into<WidgetId>, slot: Rect, place: Place) -> Result<()> {
        let id = id.into();
        let node = self.node(id)?;
        if node.root_only {
            tracing::error!("layout requested for root-only widget {id:?}");
            return Err(Error::RootOnly(id));
        }
        let (x, y, size, container) = (node.x, node.y, node.size, node.container);
        match size {
            None => {
                let p = place.anchor(slot);
                self.animator.set(x, p.x)?;
                self.animator.set(y, p.y)?;
            }
            Some((w, h)) => {
                let r = place.resolve(slot, self.desired_size(id)?);
                self.animator.set(x, r.pos.x)?;
                self.animator.set(y, r.pos.y)?;
                self.animator.set(w, r.size.w)?;
                self.animator.set(h, r.size.h)?;
                if container {
                    self.layout_children(id)?;
                }
            }
        }
        Ok(())
    }

    /// Lay out a widget's children inside its current size.
    pub fn layout_children(&mut self, id: impl Into<WidgetId>) -> Result<()> {
        self.with_widget_mut(id, |w, cx| w.layout_children(cx))
    }

    /// Lay the root out over the whole display.
    ///
    /// A root-only root is sized to the display directly and lays out its own children.
    pub fn layout_root(&mut self) -> Result<()> {
        let Some(root) = self.root else {
            return Ok(());
        };
        let display = Rect::from_size(self.display_size());
        if self.node(root)?.root_only {
            self.set_position(root, Point::zero())?;
            self.set_size(root, display.size)?;
            self.layout_children(root)
        } else {
            self.layout_widget(root, display, Place::FILL)
        }
    }

    /// Change the display size and lay the root out again.
    pub fn resize(&mut self, size: Size) -> Result<()> {
        self.config.display_width = size.w;
        self.config.display_height = size.h;
        self.layout_root()
    }

    // Hit-testing and drawing

    /// The deepest widget under a display-space point.
    pub fn hit_test(&self, p: Point) -> Option<WidgetId> {
        let root = self.root?;
        self.hit_node(root, p, &mut TransformStack::new())
    }

    /// Hit-test a subtree. `transforms` holds the transforms of every ancestor of `id`.
    fn hit_node(&self, id: WidgetId, p: Point, transforms: &mut TransformStack) -> Option<WidgetId> {
        let node = self.nodes.get(id)?;
        if !node.visible || node.hit_test == HitTest::Never {
            return None;
        }
        transforms.push(node.position(&self.animator).into());
        let hit = match node.hit_test {
            HitTest::TopChild => node
                .children
                .last()
                .and_then(|c| self.hit_node(*c, p, transforms)),
            _ => {
                let local = transforms.to_local(p);
                if Rect::from_size(node.size(&self.animator)).contains(local) {
                    node.children
                        .iter()
                        .rev()
                        .find_map(|c| self.hit_node(*c, p, transforms))
                        .or(Some(id))
                } else {
                    None
                }
            }
        };
        transforms.pop();
        hit
    }

    /// Queue a draw callback to run once after the tree has been drawn.
    pub fn add_overlay(&self, f: impl FnOnce(&mut Canvas<'_>) -> Result<()> + 'static) {
        self.overlays.borrow_mut().push(Box::new(f));
    }

    /// Draw the tree, then any overlays queued while drawing.
    pub fn draw(&self, backend: &mut dyn DrawBackend) -> Result<()> {
        backend.begin_frame(self.display_size())?;
        {
            let mut canvas = Canvas::new(backend);
            let tree = match self.root {
                Some(root) => self.draw_node(root, &mut canvas),
                None => Ok(()),
            };
            let overlays = mem::take(&mut *self.overlays.borrow_mut());
            tree?;
            for f in overlays {
                f(&mut canvas)?;
            }
        }
        backend.end_frame()
    }

    /// Draw a visible subtree.
    fn draw_node(&self, id: WidgetId, canvas: &mut Canvas<'_>) -> Result<()> {
        let node = self.node(id)?;
        if !node.visible {
            return Ok(());
        }
        let widget = node.widget.as_deref().ok_or(Error::WidgetBusy(id))?;
        canvas.with_transform(node.position(&self.animator).into(), |canvas| {
            let cx = ReadCtx::new(self, id);
            widget.draw(&cx, canvas)?;
            match widget.clip_children(&cx) {
                Some(clip) => canvas.with_clip(clip, true, |canvas| {
                    self.draw_children(&node.children, canvas)
                }),
                None => self.draw_children(&node.children, canvas),
            }
        })
    }

    /// Draw children in order.
    fn draw_children(&self, children: &[WidgetId], canvas: &mut Canvas<'_>) -> Result<()> {
        for child in children {
            self.draw_node(*child, canvas)?;
        }
        Ok(())
    }

    // Routing

    /// The widget under the pointer.
    pub fn hovered(&self) -> Option<WidgetId> {
        self.router.hovered
    }

    /// The widget capturing the pointer.
    pub fn captured(&self) -> Option<WidgetId> {
        self.router.captured
    }

    /// The widget holding keyboard focus.
    pub fn focused(&self) -> Option<WidgetId> {
        self.router.focused
    }

    /// Last pointer position in display space.
    pub fn pointer(&self) -> Option<Point> {
        self.router.pointer
    }

    /// Is a long-press pending for this widget?
    pub fn long_press_pending(&self, id: impl Into<WidgetId>) -> bool {
        self.router.long_press_pending(id.into())
    }

    /// Route every pointer event to `id` until released.
    pub fn capture(&mut self, id: impl Into<WidgetId>) -> Result<()> {
        let id = id.into();
        self.node(id)?;
        tracing::debug!("capture {id:?}");
        self.router.captured = Some(id);
        Ok(())
    }

    /// Release the capture if `id` holds it.
    pub fn release_capture(&mut self, id: impl Into<WidgetId>) {
        let id = id.into();
        if self.router.captured == Some(id) {
            tracing::debug!("release capture {id:?}");
            self.router.captured = None;
        }
    }

    /// Give `id` keyboard focus. The previous holder gets FOCUS_LOST.
    pub fn focus(&mut self, id: impl Into<WidgetId>) -> Result<()> {
        let id = id.into();
        self.node(id)?;
        let previous = self.router.focused.replace(id);
        tracing::debug!("focus {id:?}");
        if let Some(prev) = previous
            && prev != id
            && self.contains(prev)
        {
            self.send_event(prev, &Event::FocusLost, false)?;
        }
        Ok(())
    }

    /// Release focus held by `id`, or by anyone when `id` is `None`.
    pub fn release_focus(&mut self, id: Option<WidgetId>) -> Result<()> {
        if id.is_some() && self.router.focused != id {
            return Ok(());
        }
        if let Some(prev) = self.router.focused.take() {
            tracing::debug!("release focus {prev:?}");
            if self.contains(prev) {
                self.send_event(prev, &Event::FocusLost, false)?;
            }
        }
        Ok(())
    }

    /// Deliver an event to `id`, bubbling to parents while unhandled if `propagate` is set.
    ///
    /// Returns the widget that consumed the event. An event for a widget that is taken out is
    /// queued and delivered, without propagation, once dispatch unwinds.
    pub fn send_event(
        &mut self,
        id: impl Into<WidgetId>,
        event: &Event,
        propagate: bool,
    ) -> Result<Option<WidgetId>> {
        let mut target = Some(id.into());
        while let Some(id) = target {
            let Some(node) = self.nodes.get(id) else {
                return Ok(None);
            };
            if node.widget.is_none() {
                tracing::trace!("deferring event for busy widget {id:?}");
                self.deferred.push((id, event.clone()));
                return Ok(None);
            }
            let outcome = self.with_widget_mut(id, |w, cx| w.on_event(event, cx))?;
            if outcome == EventOutcome::Consume {
                return Ok(Some(id));
            }
            target = if propagate {
                self.nodes.get(id).and_then(|n| n.parent)
            } else {
                None
            };
        }
        Ok(None)
    }

    /// Deliver events deferred while their targets were busy.
    fn flush_deferred(&mut self) -> Result<()> {
        for (id, event) in mem::take(&mut self.deferred) {
            self.send_event(id, &event, false)?;
        }
        Ok(())
    }

    /// Prepare for a batch of input: if widgets may have moved under a known pointer, recompute
    /// hover and send enter/leave.
    pub fn begin_process_events(&mut self) -> Result<()> {
        if self.root.is_none() {
            return Ok(());
        }
        if self.animator.take_placement_dirty() {
            self.router.stale = true;
        }
        if self.router.stale && self.router.pointer.is_some() {
            self.router.stale = false;
            Router::update_hover(self)?;
            self.flush_deferred()?;
        }
        Ok(())
    }

    /// Route one host event.
    pub fn process_event(&mut self, event: HostEvent) -> Result<()> {
        if self.root.is_none() {
            return Ok(());
        }
        Router::process(self, event)?;
        self.flush_deferred()
    }

    /// Advance animations and timers, then run frame hooks.
    pub fn update(&mut self, dt: f32) -> Result<()> {
        self.animator.update_all(dt)?;
        Timers::advance(self, dt)?;
        Timers::run_hooks(self)?;
        self.flush_deferred()
    }

    /// Run one frame: advance animations, advance timers, route `events`, run frame hooks, draw.
    pub fn frame(
        &mut self,
        dt: f32,
        events: impl IntoIterator<Item = HostEvent>,
        backend: &mut dyn DrawBackend,
    ) -> Result<()> {
        self.animator.update_all(dt)?;
        Timers::advance(self, dt)?;
        self.flush_deferred()?;
        self.begin_process_events()?;
        for event in events {
            self.process_event(event)?;
        }
        Timers::run_hooks(self)?;
        self.flush_deferred()?;
        self.draw(backend)
    }
}
