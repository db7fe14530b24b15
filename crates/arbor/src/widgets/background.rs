use crate::{
    anim::{Animator, Param, Rgba},
    compose::Canvas,
    error::Result,
    geom::{Rect, Size},
    id::WidgetId,
    layout::Place,
    widget::{Ctx, ReadCtx, Widget},
};

/// Fills its rect with a color and lays a single child out over it.
#[derive(Debug)]
pub struct Background {
    /// Fill color.
    color: Param<Rgba>,
}

impl Background {
    /// A background registering its color parameter.
    pub fn new(animator: &mut Animator, color: Rgba) -> Self {
        Self {
            color: animator.param(color),
        }
    }

    /// The color parameter, for animation.
    pub fn color(&self) -> Param<Rgba> {
        self.color
    }

    /// Replace the child. The previous child is detached, not destroyed.
    pub fn set_child(&self, cx: &mut Ctx<'_>, child: Option<WidgetId>) -> Result<()> {
        for old in cx.children()? {
            cx.detach(old)?;
        }
        if let Some(child) = child {
            cx.attach(child, None)?;
        }
        Ok(())
    }
}

impl Widget for Background {
    fn accepts_children(&self) -> bool {
        true
    }

    fn desired_size(&self, cx: &ReadCtx<'_>) -> Result<Size> {
        match cx.children()?.first() {
            Some(child) => cx.desired_size(*child),
            None => Ok(Size::zero()),
        }
    }

    fn layout_children(&mut self, cx: &mut Ctx<'_>) -> Result<()> {
        let bounds = Rect::from_size(cx.size()?);
        if let Some(child) = cx.children()?.first() {
            cx.layout_widget(*child, bounds, Place::FILL)?;
        }
        Ok(())
    }

    fn draw(&self, cx: &ReadCtx<'_>, canvas: &mut Canvas<'_>) -> Result<()> {
        let color = cx.get(self.color)?;
        canvas.fill_rect(Rect::from_size(cx.size()?), color)
    }

    fn on_destroy(&mut self, animator: &mut Animator) {
        animator.remove(self.color);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{EngineConfig, Ui, backend::record::RecordingBackend, widgets::Rectangle};

    #[test]
    fn child_fills_the_background() -> Result<()> {
        let mut ui = Ui::new(EngineConfig {
            display_width: 40.0,
            display_height: 30.0,
            ..Default::default()
        });
        let bg = ui.build(|a| Background::new(a, [0.0, 0.0, 0.0, 1.0]));
        let child = ui.build(|a| Rectangle::new(a, Size::new(12.0, 8.0), [1.0; 4]));
        ui.with_typed(bg, |w, cx| w.set_child(cx, Some(child.id())))?;
        assert_eq!(ui.desired_size(bg)?, Size::new(12.0, 8.0));

        ui.layout_widget(bg, Rect::new(0.0, 0.0, 40.0, 30.0), Place::CENTER)?;
        assert_eq!(ui.rect(bg)?, Rect::new(14.0, 11.0, 12.0, 8.0));
        assert_eq!(ui.rect(child)?, Rect::new(0.0, 0.0, 12.0, 8.0));

        ui.set_root(bg)?;
        let mut backend = RecordingBackend::default();
        ui.draw(&mut backend)?;
        assert_eq!(
            backend.fills(),
            vec![
                (Rect::new(14.0, 11.0, 12.0, 8.0), [0.0, 0.0, 0.0, 1.0]),
                (Rect::new(14.0, 11.0, 12.0, 8.0), [1.0; 4]),
            ]
        );
        Ok(())
    }
}
