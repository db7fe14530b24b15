//! The drawing collaborator interface.

/// A backend that records draw calls.
pub mod record;

use crate::{
    anim::Rgba,
    error::Result,
    geom::{PixelRect, Rect, Size},
};

/// Receives draw calls from a draw pass.
///
/// Coordinates are in display space with a bottom-left origin. Transforms have already been
/// applied by the [`Canvas`](crate::compose::Canvas); the backend only sees absolute geometry.
pub trait DrawBackend {
    /// Restrict subsequent drawing to `clip`, or lift the restriction with `None`.
    fn set_clip(&mut self, clip: Option<PixelRect>);

    /// Fill a rectangle.
    fn fill_rect(&mut self, rect: Rect, color: Rgba) -> Result<()>;

    /// Called once before a draw pass.
    fn begin_frame(&mut self, _size: Size) -> Result<()> {
        Ok(())
    }

    /// Called once after a draw pass, including overlays.
    fn end_frame(&mut self) -> Result<()> {
        Ok(())
    }
}
