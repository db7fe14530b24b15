use crate::{
    EngineConfig, Ui,
    backend::record::{DrawOp, RecordingBackend},
    error::Result,
    event::{HostEvent, KeyCode, MouseButton},
    geom::{Point, Size},
};

/// Drives a [`Ui`] with host input expressed in display coordinates, and records what it draws.
pub struct Harness {
    /// The engine under test.
    pub ui: Ui,
    /// Records draw calls.
    pub backend: RecordingBackend,
}

impl Harness {
    /// A harness around a fresh engine.
    pub fn new(config: EngineConfig) -> Self {
        Self {
            ui: Ui::new(config),
            backend: RecordingBackend::default(),
        }
    }

    /// A harness with a display of `size` and otherwise default configuration.
    pub fn with_size(size: Size) -> Self {
        Self::new(EngineConfig {
            display_width: size.w,
            display_height: size.h,
            ..Default::default()
        })
    }

    /// Route one host event, recomputing hover first if widgets moved.
    pub fn send(&mut self, event: HostEvent) -> Result<()> {
        self.ui.begin_process_events()?;
        self.ui.process_event(event)
    }

    /// Move the pointer to a display-space point.
    pub fn move_to(&mut self, p: Point) -> Result<()> {
        let h = self.ui.display_size().h;
        self.send(HostEvent::PointerMoved {
            x: p.x,
            y: h - p.y - 1.0,
        })
    }

    /// Press a button.
    pub fn press(&mut self, button: MouseButton) -> Result<()> {
        self.send(HostEvent::PointerPressed {
            button: button.number(),
        })
    }

    /// Release a button.
    pub fn release(&mut self, button: MouseButton) -> Result<()> {
        self.send(HostEvent::PointerReleased {
            button: button.number(),
        })
    }

    /// Press and release a button.
    pub fn click(&mut self, button: MouseButton) -> Result<()> {
        self.press(button)?;
        self.release(button)
    }

    /// Press a key.
    pub fn key(&mut self, key: KeyCode) -> Result<()> {
        self.send(HostEvent::KeyPressed {
            key: Some(key),
            text: None,
        })
    }

    /// Advance animations and timers without input or drawing.
    pub fn tick(&mut self, dt: f32) -> Result<()> {
        self.ui.update(dt)
    }

    /// Run one full frame.
    pub fn frame(&mut self, dt: f32, events: impl IntoIterator<Item = HostEvent>) -> Result<()> {
        self.ui.frame(dt, events, &mut self.backend)
    }

    /// Draw once and return the calls made.
    pub fn render(&mut self) -> Result<Vec<DrawOp>> {
        self.backend.clear();
        self.ui.draw(&mut self.backend)?;
        Ok(self.backend.ops())
    }
}
