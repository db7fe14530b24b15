use serde::{Deserialize, Serialize};

use crate::geom::Point;

/// Pointer action kinds.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum MouseEventKind {
    /// The pointer moved.
    Move,
    /// A button went down.
    Press,
    /// A button has been held past the long-press duration.
    LongPress,
    /// A button went up.
    Release,
    /// A second press landed within the double-click window.
    DoubleClick,
}

/// Pointer buttons. Scroll wheel steps arrive as presses of the scroll buttons.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum MouseButton {
    /// Primary button.
    Left,
    /// Wheel button.
    Middle,
    /// Secondary button.
    Right,
    /// Wheel scrolled up.
    ScrollUp,
    /// Wheel scrolled down.
    ScrollDown,
}

impl MouseButton {
    /// Map a host button number, 1 to 5.
    pub fn from_number(n: u8) -> Option<Self> {
        match n {
            1 => Some(Self::Left),
            2 => Some(Self::Middle),
            3 => Some(Self::Right),
            4 => Some(Self::ScrollUp),
            5 => Some(Self::ScrollDown),
            _ => None,
        }
    }

    /// The host button number.
    pub fn number(self) -> u8 {
        match self {
            Self::Left => 1,
            Self::Middle => 2,
            Self::Right => 3,
            Self::ScrollUp => 4,
            Self::ScrollDown => 5,
        }
    }
}

/// A pointer event in bottom-left-origin display space.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MouseEvent {
    /// What happened.
    pub kind: MouseEventKind,
    /// The button involved. `None` for moves.
    pub button: Option<MouseButton>,
    /// Pointer position in display coordinates.
    pub position: Point,
}

impl MouseEvent {
    /// Construct an event.
    pub fn new(kind: MouseEventKind, button: Option<MouseButton>, position: Point) -> Self {
        Self {
            kind,
            button,
            position,
        }
    }

    /// Is this a `kind` event for `button`?
    pub fn is(&self, kind: MouseEventKind, button: MouseButton) -> bool {
        self.kind == kind && self.button == Some(button)
    }
}
