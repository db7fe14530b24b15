//! Events delivered to widgets, and the host input they are translated from.

/// Host input events.
pub mod host;
/// Keyboard events.
pub mod key;
/// Pointer events.
pub mod mouse;

pub use host::HostEvent;
pub use key::{KeyCode, KeyEvent, KeyEventKind};
pub use mouse::{MouseButton, MouseEvent, MouseEventKind};

/// An event delivered to a widget's `on_event`.
#[derive(Debug, Clone, PartialEq)]
pub enum Event {
    /// A pointer action, positioned in display space.
    Mouse(MouseEvent),
    /// The pointer moved onto this widget.
    MouseEnter,
    /// The pointer moved off this widget.
    MouseLeave,
    /// This widget lost keyboard focus.
    FocusLost,
    /// A keystroke.
    Key(KeyEvent),
}

impl Event {
    /// The pointer event, if this is one.
    pub fn mouse(&self) -> Option<&MouseEvent> {
        match self {
            Self::Mouse(m) => Some(m),
            _ => None,
        }
    }
}

impl From<MouseEvent> for Event {
    fn from(m: MouseEvent) -> Self {
        Self::Mouse(m)
    }
}

impl From<KeyEvent> for Event {
    fn from(k: KeyEvent) -> Self {
        Self::Key(k)
    }
}
