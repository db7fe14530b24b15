use scopeguard::guard;

use super::{ClipStack, TransformStack};
use crate::{
    anim::Rgba,
    backend::DrawBackend,
    error::Result,
    geom::{PixelRect, Rect, Transform},
};

/// The drawing surface handed to widgets during a draw pass.
///
/// Coordinates passed to a canvas are local to the innermost transform. Scopes are entered with
/// closures and unwound on every exit path, including `?` returns and panics.
pub struct Canvas<'a> {
    /// Destination for draw calls.
    backend: &'a mut dyn DrawBackend,
    /// Entered transforms.
    transforms: TransformStack,
    /// Entered clip scopes.
    clips: ClipStack,
}

impl<'a> Canvas<'a> {
    /// Wrap a backend with empty transform and clip stacks.
    pub fn new(backend: &'a mut dyn DrawBackend) -> Self {
        Self {
            backend,
            transforms: TransformStack::new(),
            clips: ClipStack::new(),
        }
    }

    /// The composed transform in effect.
    pub fn transform(&self) -> Transform {
        self.transforms.current()
    }

    /// The clip in effect.
    pub fn clip(&self) -> Option<PixelRect> {
        self.clips.current()
    }

    /// Run `f` with `t` composed onto the current transform.
    pub fn with_transform<R>(
        &mut self,
        t: Transform,
        f: impl FnOnce(&mut Self) -> Result<R>,
    ) -> Result<R> {
        self.transforms.push(t);
        let mut canvas = guard(self, |c| {
            c.transforms.pop();
        });
        f(&mut **canvas)
    }

    /// Run `f` clipped to `rect`, given in local coordinates.
    ///
    /// With `merge` the clip is intersected with the enclosing one. The backend receives exactly
    /// one clip call on entry and one on exit.
    pub fn with_clip<R>(
        &mut self,
        rect: Rect,
        merge: bool,
        f: impl FnOnce(&mut Self) -> Result<R>,
    ) -> Result<R> {
        let t = self.transforms.current();
        let bounds = PixelRect::from_corners(t.transform_point(rect.pos), t.transform_point(rect.max()));
        let effective = self.clips.push(bounds, merge);
        self.backend.set_clip(effective);
        self.scoped_clip(f)
    }

    /// Run `f` with clipping disabled.
    pub fn without_clip<R>(&mut self, f: impl FnOnce(&mut Self) -> Result<R>) -> Result<R> {
        self.clips.push_cleared();
        self.backend.set_clip(None);
        self.scoped_clip(f)
    }

    /// Run `f` and restore the enclosing clip afterwards.
    fn scoped_clip<R>(&mut self, f: impl FnOnce(&mut Self) -> Result<R>) -> Result<R> {
        let mut canvas = guard(self, |c| {
            let restored = c.clips.pop();
            c.backend.set_clip(restored);
        });
        f(&mut **canvas)
    }

    /// Fill a local rectangle.
    pub fn fill_rect(&mut self, rect: Rect, color: Rgba) -> Result<()> {
        let pos = self.transforms.to_global(rect.pos);
        self.backend
            .fill_rect(Rect::new(pos.x, pos.y, rect.size.w, rect.size.h), color)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{
        Error,
        backend::record::{DrawOp, RecordingBackend},
    };

    #[test]
    fn transforms_apply_to_fills() -> Result<()> {
        let (log, mut backend) = RecordingBackend::create();
        let mut c = Canvas::new(&mut backend);
        c.with_transform(Transform::translate(10.0, 20.0), |c| {
            c.with_transform(Transform::translate(1.0, 2.0), |c| {
                c.fill_rect(Rect::new(0.0, 0.0, 5.0, 5.0), [1.0; 4])
            })
        })?;
        assert_eq!(c.transform(), Transform::IDENTITY);
        assert_eq!(
            log.lock().unwrap().fills(),
            vec![(Rect::new(11.0, 22.0, 5.0, 5.0), [1.0; 4])]
        );
        Ok(())
    }

    #[test]
    fn clip_scopes_restore_on_error() -> Result<()> {
        let (log, mut backend) = RecordingBackend::create();
        let mut c = Canvas::new(&mut backend);
        let r = c.with_clip(Rect::new(0.0, 0.0, 100.0, 100.0), true, |c| {
            c.with_clip(Rect::new(50.0, 50.0, 100.0, 100.0), true, |c| -> Result<()> {
                assert_eq!(c.clip(), Some(PixelRect::new(50, 50, 100, 100)));
                Err(Error::Invalid("boom".into()))
            })
        });
        assert!(r.is_err());
        assert_eq!(c.clip(), None);
        assert_eq!(
            log.lock().unwrap().ops,
            vec![
                DrawOp::Clip {
                    clip: Some(PixelRect::new(0, 0, 100, 100))
                },
                DrawOp::Clip {
                    clip: Some(PixelRect::new(50, 50, 100, 100))
                },
                DrawOp::Clip {
                    clip: Some(PixelRect::new(0, 0, 100, 100))
                },
                DrawOp::Clip { clip: None },
            ]
        );
        Ok(())
    }

    #[test]
    fn cleared_scope_and_transformed_clip() -> Result<()> {
        let (log, mut backend) = RecordingBackend::create();
        let mut c = Canvas::new(&mut backend);
        c.with_transform(Transform::translate(10.0, 10.0), |c| {
            c.with_clip(Rect::new(0.0, 0.0, 5.5, 5.5), true, |c| {
                c.without_clip(|c| {
                    assert_eq!(c.clip(), None);
                    Ok(())
                })
            })
        })?;
        assert_eq!(
            log.lock().unwrap().clips(),
            vec![
                Some(PixelRect::new(10, 10, 16, 16)),
                None,
                Some(PixelRect::new(10, 10, 16, 16)),
                None,
            ]
        );
        Ok(())
    }
}
