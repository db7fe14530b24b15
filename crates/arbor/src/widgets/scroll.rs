use std::{cell::Cell, rc::Rc};

use crate::{
    error::Result,
    event::{Event, MouseButton, MouseEventKind},
    geom::{Rect, Size},
    id::{TimerId, WidgetId},
    layout::Place,
    widget::{Ctx, EventOutcome, ReadCtx, Widget},
};

/// Pixels moved per wheel notch.
const WHEEL_STEP: f32 = 40.0;

/// A single-child viewport that clips its child to its own bounds.
///
/// On a scrolling axis the child keeps its desired extent and is offset by the scroll position; on a
/// fixed axis it fills the viewport. Scroll positions are fractions of the overflow, with `(0, 0)`
/// showing the top-left of the child. A child shorter than the viewport stays pinned to the top.
///
/// The child is laid out again whenever its desired size changes, checked once per frame.
#[derive(Debug)]
pub struct ScrollArea {
    /// Size requested from the parent.
    pub desired: Size,
    /// Scroll horizontally.
    scroll_x: bool,
    /// Scroll vertically.
    scroll_y: bool,
    /// Scroll position as fractions of the overflow.
    fraction: (f32, f32),
    /// Child desired size at the last layout pass.
    laid_out: Option<Size>,
    /// Frame hook watching the child's desired size.
    watch: Option<TimerId>,
}

impl ScrollArea {
    /// A viewport requesting `desired`, scrolling on the enabled axes.
    pub fn new(desired: Size, scroll_x: bool, scroll_y: bool) -> Self {
        Self {
            desired,
            scroll_x,
            scroll_y,
            fraction: (0.0, 0.0),
            laid_out: None,
            watch: None,
        }
    }

    /// A viewport that scrolls vertically only.
    pub fn vertical(desired: Size) -> Self {
        Self::new(desired, false, true)
    }

    /// Current scroll fractions.
    pub fn fraction(&self) -> (f32, f32) {
        self.fraction
    }

    /// Replace the child. The previous child is detached, not destroyed.
    pub fn set_child(&mut self, cx: &mut Ctx<'_>, child: Option<WidgetId>) -> Result<()> {
        for old in cx.children()? {
            cx.detach(old)?;
        }
        self.fraction = (0.0, 0.0);
        self.laid_out = None;
        if let Some(child) = child {
            cx.attach(child, None)?;
            self.layout_children(cx)?;
            if self.watch.is_none() {
                self.watch = Some(Self::watch_child(cx));
            }
        }
        Ok(())
    }

    /// Install a frame hook that re-lays out the child when its desired size changes. The hook
    /// cancels itself once this viewport is destroyed.
    fn watch_child(cx: &mut Ctx<'_>) -> TimerId {
        let me = cx.id();
        let slot: Rc<Cell<Option<TimerId>>> = Rc::default();
        let own = slot.clone();
        let hook = cx.timers().add_frame_hook(move |ui| {
            if !ui.contains(me) {
                if let Some(t) = own.take() {
                    ui.timers_mut().cancel(t);
                }
                return Ok(());
            }
            ui.with_widget::<Self, _>(me, |w, cx| w.follow_child(cx))
        });
        slot.set(Some(hook));
        hook
    }

    /// Lay the child out again if its desired size moved since the last pass.
    fn follow_child(&mut self, cx: &mut Ctx<'_>) -> Result<()> {
        let Some(child) = cx.children()?.first().copied() else {
            return Ok(());
        };
        if self.laid_out != Some(cx.desired_size(child)?) {
            tracing::trace!("scroll child {child:?} resized");
            self.layout_children(cx)?;
        }
        Ok(())
    }

    /// Scroll to fractions of the overflow, clamped to `0..=1`.
    pub fn scroll_to(&mut self, cx: &mut Ctx<'_>, fx: f32, fy: f32) -> Result<()> {
        self.fraction = (fx.clamp(0.0, 1.0), fy.clamp(0.0, 1.0));
        self.layout_children(cx)
    }

    /// Scroll by a pixel distance. Positive `dy` moves toward the bottom of the child.
    pub fn scroll_by(&mut self, cx: &mut Ctx<'_>, dx: f32, dy: f32) -> Result<()> {
        let Some(child) = cx.children()?.first().copied() else {
            return Ok(());
        };
        let (ox, oy) = overflow(cx.size()?, cx.ui().size(child)?);
        let (fx, fy) = self.fraction;
        let fx = if ox > 0.0 { fx + dx / ox } else { fx };
        let fy = if oy > 0.0 { fy + dy / oy } else { fy };
        self.scroll_to(cx, fx, fy)
    }
}

/// How far a child of size `content` overflows a viewport of size `view`.
fn overflow(view: Size, content: Size) -> (f32, f32) {
    (
        (content.w - view.w).max(0.0),
        (content.h - view.h).max(0.0),
    )
}

impl Widget for ScrollArea {
    fn accepts_children(&self) -> bool {
        true
    }

    fn desired_size(&self, _cx: &ReadCtx<'_>) -> Result<Size> {
        Ok(self.desired)
    }

    fn layout_children(&mut self, cx: &mut Ctx<'_>) -> Result<()> {
        let Some(child) = cx.children()?.first().copied() else {
            return Ok(());
        };
        let view = cx.size()?;
        let desired = cx.desired_size(child)?;
        self.laid_out = Some(desired);
        let content = Size::new(
            if self.scroll_x { desired.w } else { view.w },
            if self.scroll_y { desired.h } else { view.h },
        );
        let (ox, oy) = overflow(view, content);
        let (fx, fy) = self.fraction;
        let x = -ox * fx;
        let y = view.h - content.h + oy * fy;
        cx.layout_widget(child, Rect::new(x, y, content.w, content.h), Place::FILL)
    }

    fn clip_children(&self, cx: &ReadCtx<'_>) -> Option<Rect> {
        cx.size().ok().map(Rect::from_size)
    }

    fn on_event(&mut self, event: &Event, cx: &mut Ctx<'_>) -> Result<EventOutcome> {
        let Some(m) = event.mouse() else {
            return Ok(EventOutcome::Ignore);
        };
        if !self.scroll_y || m.kind != MouseEventKind::Press {
            return Ok(EventOutcome::Ignore);
        }
        let dy = match m.button {
            Some(MouseButton::ScrollUp) => -WHEEL_STEP,
            Some(MouseButton::ScrollDown) => WHEEL_STEP,
            _ => return Ok(EventOutcome::Ignore),
        };
        self.scroll_by(cx, 0.0, dy)?;
        Ok(EventOutcome::Consume)
    }
}
