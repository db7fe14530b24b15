use std::rc::Rc;

use arbor::{
    Ctx, EventOutcome, ReadCtx, Result, Ui, Widget,
    anim::{Animator, Param, Rgba},
    compose::Canvas,
    event::{Event, KeyCode, KeyEvent, KeyEventKind, MouseButton, MouseEventKind},
    geom::{Rect, Size},
};

/// Seconds taken to fade between palette entries.
pub const FADE_TIME: f32 = 0.3;
/// Width of the hover outline, in pixels.
const OUTLINE: f32 = 2.0;
/// Hover outline color.
const OUTLINE_COLOR: Rgba = [1.0, 1.0, 1.0, 1.0];

/// Callback run when a swatch is activated.
pub type Action = Rc<dyn Fn(&mut Ui) -> Result<()>>;

/// A colored block that cycles through a palette.
///
/// A left press takes focus and fades to the next palette entry, as does Space or Return while
/// focused. A long press snaps back to the first entry. A double-click runs the swatch's action
/// on the next timer pass, outside the event handler.
pub struct Swatch {
    /// Size requested from the parent.
    pub desired: Size,
    /// Colors to cycle through. Never empty.
    palette: Vec<Rgba>,
    /// Index of the current palette target.
    index: usize,
    /// Fill color.
    color: Param<Rgba>,
    /// Run on double-click.
    action: Option<Action>,
}

impl Swatch {
    /// A swatch of `desired` size starting at the first palette entry. An empty palette becomes a
    /// single black entry.
    pub fn new(animator: &mut Animator, desired: Size, palette: &[Rgba]) -> Self {
        let palette = if palette.is_empty() {
            vec![[0.0, 0.0, 0.0, 1.0]]
        } else {
            palette.to_vec()
        };
        Self {
            desired,
            color: animator.param(palette[0]),
            palette,
            index: 0,
            action: None,
        }
    }

    /// Run `action` on double-click.
    pub fn with_action(mut self, action: impl Fn(&mut Ui) -> Result<()> + 'static) -> Self {
        self.action = Some(Rc::new(action));
        self
    }

    /// The color parameter.
    pub fn color(&self) -> Param<Rgba> {
        self.color
    }

    /// Index of the palette entry the swatch is showing or fading toward.
    pub fn index(&self) -> usize {
        self.index
    }

    /// Fade to the next palette entry.
    fn advance(&mut self, cx: &mut Ctx<'_>) -> Result<()> {
        self.index = (self.index + 1) % self.palette.len();
        let target = self.palette[self.index];
        cx.animator()
            .transition(self.color)?
            .target(target)
            .duration(FADE_TIME)
            .ease_in_ease_out();
        Ok(())
    }

    /// Snap back to the first palette entry.
    fn reset(&mut self, cx: &mut Ctx<'_>) -> Result<()> {
        self.index = 0;
        cx.set(self.color, self.palette[0])
    }
}

impl Widget for Swatch {
    fn desired_size(&self, _cx: &ReadCtx<'_>) -> Result<Size> {
        Ok(self.desired)
    }

    fn draw(&self, cx: &ReadCtx<'_>, canvas: &mut Canvas<'_>) -> Result<()> {
        let size = cx.size()?;
        canvas.fill_rect(Rect::from_size(size), cx.get(self.color)?)?;
        if cx.ui().hovered() == Some(cx.id()) {
            let t = OUTLINE.min(size.w).min(size.h);
            for edge in [
                Rect::new(0.0, 0.0, size.w, t),
                Rect::new(0.0, size.h - t, size.w, t),
                Rect::new(0.0, 0.0, t, size.h),
                Rect::new(size.w - t, 0.0, t, size.h),
            ] {
                canvas.fill_rect(edge, OUTLINE_COLOR)?;
            }
        }
        Ok(())
    }

    fn on_event(&mut self, event: &Event, cx: &mut Ctx<'_>) -> Result<EventOutcome> {
        match event {
            Event::Mouse(m) if m.is(MouseEventKind::Press, MouseButton::Left) => {
                cx.focus()?;
                self.advance(cx)?;
            }
            Event::Mouse(m) if m.is(MouseEventKind::LongPress, MouseButton::Left) => {
                self.reset(cx)?;
            }
            Event::Mouse(m) if m.is(MouseEventKind::DoubleClick, MouseButton::Left) => {
                if let Some(action) = self.action.clone() {
                    cx.timers().add_timer(0.0, move |ui| action(ui));
                }
            }
            Event::Key(KeyEvent {
                kind: KeyEventKind::Press,
                key: Some(KeyCode::Space | KeyCode::Return),
                ..
            }) => self.advance(cx)?,
            _ => return Ok(EventOutcome::Ignore),
        }
        Ok(EventOutcome::Consume)
    }

    fn on_destroy(&mut self, animator: &mut Animator) {
        animator.remove(self.color);
    }
}
