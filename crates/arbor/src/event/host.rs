use serde::{Deserialize, Serialize};

use super::{KeyCode, MouseButton};
use crate::error::{Error, Result};

/// Raw input from the host window system.
///
/// Pointer coordinates are in top-left-origin host space; the router flips them into display
/// space. Buttons are host numbers, 1 to 5.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum HostEvent {
    /// The pointer moved.
    PointerMoved {
        /// Host x.
        x: f32,
        /// Host y, growing downward.
        y: f32,
    },
    /// A pointer button went down.
    PointerPressed {
        /// Host button number.
        button: u8,
    },
    /// A pointer button went up.
    PointerReleased {
        /// Host button number.
        button: u8,
    },
    /// A key went down.
    KeyPressed {
        /// The named key, if mapped.
        key: Option<KeyCode>,
        /// Text produced by the key.
        text: Option<String>,
    },
    /// A key went up.
    KeyReleased {
        /// The named key, if mapped.
        key: Option<KeyCode>,
    },
}

impl HostEvent {
    /// Parse a JSON array of events, as written in input scripts.
    pub fn from_script(json: &str) -> Result<Vec<Self>> {
        serde_json::from_str(json).map_err(|e| Error::Invalid(format!("bad event script: {e}")))
    }
}

/// Resolve a host button number.
pub(crate) fn button(n: u8) -> Result<MouseButton> {
    MouseButton::from_number(n).ok_or_else(|| Error::Invalid(format!("unknown mouse button {n}")))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn script_form() -> Result<()> {
        let events = HostEvent::from_script(
            r#"[
                {"type": "pointer_moved", "x": 10.0, "y": 20.0},
                {"type": "pointer_pressed", "button": 1},
                {"type": "key_pressed", "key": "A", "text": "a"},
                {"type": "key_released", "key": null}
            ]"#,
        )?;
        assert_eq!(events[0], HostEvent::PointerMoved { x: 10.0, y: 20.0 });
        assert_eq!(
            events[2],
            HostEvent::KeyPressed {
                key: Some(KeyCode::A),
                text: Some("a".into())
            }
        );
        assert_eq!(events[3], HostEvent::KeyReleased { key: None });
        assert_eq!(button(5)?, MouseButton::ScrollDown);
        assert!(button(6).is_err());
        assert!(matches!(
            HostEvent::from_script(r#"[{"type": "teleport"}]"#),
            Err(Error::Invalid(_))
        ));
        Ok(())
    }
}
