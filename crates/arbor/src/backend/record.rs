use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

use serde::Serialize;

use super::DrawBackend;
use crate::{
    anim::Rgba,
    error::{Error, Result},
    geom::{PixelRect, Rect, Size},
};

/// One recorded backend call.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "op", rename_all = "snake_case")]
pub enum DrawOp {
    /// A draw pass started.
    BeginFrame {
        /// Display size for the pass.
        size: Size,
    },
    /// The clip region changed.
    Clip {
        /// New clip, or `None` for unclipped.
        clip: Option<PixelRect>,
    },
    /// A rectangle fill.
    Fill {
        /// Display-space rectangle.
        rect: Rect,
        /// Fill color.
        color: Rgba,
    },
    /// A draw pass finished.
    EndFrame,
}

/// Shared log of recorded calls.
#[derive(Debug, Default)]
pub struct DrawLog {
    /// Calls in the order they were made.
    pub ops: Vec<DrawOp>,
}

impl DrawLog {
    /// All fills, in draw order.
    pub fn fills(&self) -> Vec<(Rect, Rgba)> {
        self.ops
            .iter()
            .filter_map(|op| match op {
                DrawOp::Fill { rect, color } => Some((*rect, *color)),
                _ => None,
            })
            .collect()
    }

    /// All clip changes, in order.
    pub fn clips(&self) -> Vec<Option<PixelRect>> {
        self.ops
            .iter()
            .filter_map(|op| match op {
                DrawOp::Clip { clip } => Some(*clip),
                _ => None,
            })
            .collect()
    }
}

/// A backend that records every call, for tests and headless runs.
#[derive(Debug, Clone, Default)]
pub struct RecordingBackend {
    /// Shared log of calls.
    log: Arc<Mutex<DrawLog>>,
}

impl RecordingBackend {
    /// Create a backend along with a handle to its log.
    pub fn create() -> (Arc<Mutex<DrawLog>>, Self) {
        let log = Arc::new(Mutex::new(DrawLog::default()));
        (log.clone(), Self { log })
    }

    /// Lock the log.
    fn lock(&self) -> MutexGuard<'_, DrawLog> {
        self.log.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// Snapshot the recorded calls.
    pub fn ops(&self) -> Vec<DrawOp> {
        self.lock().ops.clone()
    }

    /// All fills recorded so far, in draw order.
    pub fn fills(&self) -> Vec<(Rect, Rgba)> {
        self.lock().fills()
    }

    /// Drop everything recorded so far.
    pub fn clear(&self) {
        self.lock().ops.clear();
    }
}

impl DrawBackend for RecordingBackend {
    fn set_clip(&mut self, clip: Option<PixelRect>) {
        self.lock().ops.push(DrawOp::Clip { clip });
    }

    fn fill_rect(&mut self, rect: Rect, color: Rgba) -> Result<()> {
        self.log
            .lock()
            .map_err(|e| Error::Backend(e.to_string()))?
            .ops
            .push(DrawOp::Fill { rect, color });
        Ok(())
    }

    fn begin_frame(&mut self, size: Size) -> Result<()> {
        self.lock().ops.push(DrawOp::BeginFrame { size });
        Ok(())
    }

    fn end_frame(&mut self) -> Result<()> {
        self.lock().ops.push(DrawOp::EndFrame);
        Ok(())
    }
}
