use crate::{
    anim::{Animator, Param, Rgba},
    compose::Canvas,
    error::Result,
    geom::{Rect, Size},
    widget::{ReadCtx, Widget},
};

/// A solid rectangle with an animatable color.
#[derive(Debug)]
pub struct Rectangle {
    /// Size requested from the parent.
    pub desired: Size,
    /// Fill color.
    color: Param<Rgba>,
}

impl Rectangle {
    /// A rectangle of `desired` size, registering its color parameter.
    pub fn new(animator: &mut Animator, desired: Size, color: Rgba) -> Self {
        Self {
            desired,
            color: animator.param(color),
        }
    }

    /// The color parameter, for animation.
    pub fn color(&self) -> Param<Rgba> {
        self.color
    }
}

impl Widget for Rectangle {
    fn desired_size(&self, _cx: &ReadCtx<'_>) -> Result<Size> {
        Ok(self.desired)
    }

    fn draw(&self, cx: &ReadCtx<'_>, canvas: &mut Canvas<'_>) -> Result<()> {
        let color = cx.get(self.color)?;
        canvas.fill_rect(Rect::from_size(cx.size()?), color)
    }

    fn on_destroy(&mut self, animator: &mut Animator) {
        animator.remove(self.color);
    }
}
