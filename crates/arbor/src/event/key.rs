use serde::{Deserialize, Serialize};

/// Key press or release.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum KeyEventKind {
    /// The key went down, or auto-repeated.
    Press,
    /// The key went up.
    Release,
}

/// Keys the engine names.
///
/// Hosts map their own key codes onto this vocabulary. Keys with no mapping arrive with
/// [`KeyEvent::key`] set to `None`, so text input still flows through [`KeyEvent::text`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum KeyCode {
    /// Backspace
    Backspace,
    /// Tab
    Tab,
    /// Clear
    Clear,
    /// Return
    Return,
    /// Pause
    Pause,
    /// Escape
    Escape,
    /// Space
    Space,
    /// `!`
    Exclaim,
    /// `"`
    QuoteDbl,
    /// `#`
    Hash,
    /// `$`
    Dollar,
    /// `&`
    Ampersand,
    /// `'`
    Quote,
    /// `(`
    LeftParen,
    /// `)`
    RightParen,
    /// `*`
    Asterisk,
    /// `+`
    Plus,
    /// `,`
    Comma,
    /// `-`
    Minus,
    /// `.`
    Period,
    /// `/`
    Slash,
    /// Digit 0
    Num0,
    /// Digit 1
    Num1,
    /// Digit 2
    Num2,
    /// Digit 3
    Num3,
    /// Digit 4
    Num4,
    /// Digit 5
    Num5,
    /// Digit 6
    Num6,
    /// Digit 7
    Num7,
    /// Digit 8
    Num8,
    /// Digit 9
    Num9,
    /// `:`
    Colon,
    /// `;`
    Semicolon,
    /// `<`
    Less,
    /// `=`
    Equals,
    /// `>`
    Greater,
    /// `?`
    Question,
    /// `@`
    At,
    /// `[`
    LeftBracket,
    /// `\`
    Backslash,
    /// `]`
    RightBracket,
    /// `^`
    Caret,
    /// `_`
    Underscore,
    /// `` ` ``
    Backquote,
    /// Letter A
    A,
    /// Letter B
    B,
    /// Letter C
    C,
    /// Letter D
    D,
    /// Letter E
    E,
    /// Letter F
    F,
    /// Letter G
    G,
    /// Letter H
    H,
    /// Letter I
    I,
    /// Letter J
    J,
    /// Letter K
    K,
    /// Letter L
    L,
    /// Letter M
    M,
    /// Letter N
    N,
    /// Letter O
    O,
    /// Letter P
    P,
    /// Letter Q
    Q,
    /// Letter R
    R,
    /// Letter S
    S,
    /// Letter T
    T,
    /// Letter U
    U,
    /// Letter V
    V,
    /// Letter W
    W,
    /// Letter X
    X,
    /// Letter Y
    Y,
    /// Letter Z
    Z,
    /// Delete
    Delete,
    /// Keypad 0
    Kp0,
    /// Keypad 1
    Kp1,
    /// Keypad 2
    Kp2,
    /// Keypad 3
    Kp3,
    /// Keypad 4
    Kp4,
    /// Keypad 5
    Kp5,
    /// Keypad 6
    Kp6,
    /// Keypad 7
    Kp7,
    /// Keypad 8
    Kp8,
    /// Keypad 9
    Kp9,
    /// Keypad `.`
    KpPeriod,
    /// Keypad `/`
    KpDivide,
    /// Keypad `*`
    KpMultiply,
    /// Keypad `-`
    KpMinus,
    /// Keypad `+`
    KpPlus,
    /// Keypad enter
    KpEnter,
    /// Keypad `=`
    KpEquals,
    /// Up arrow
    Up,
    /// Down arrow
    Down,
    /// Right arrow
    Right,
    /// Left arrow
    Left,
    /// Insert
    Insert,
    /// Home
    Home,
    /// End
    End,
    /// Page up
    PageUp,
    /// Page down
    PageDown,
    /// Function key 1
    F1,
    /// Function key 2
    F2,
    /// Function key 3
    F3,
    /// Function key 4
    F4,
    /// Function key 5
    F5,
    /// Function key 6
    F6,
    /// Function key 7
    F7,
    /// Function key 8
    F8,
    /// Function key 9
    F9,
    /// Function key 10
    F10,
    /// Function key 11
    F11,
    /// Function key 12
    F12,
    /// Function key 13
    F13,
    /// Function key 14
    F14,
    /// Function key 15
    F15,
    /// Num lock
    NumLock,
    /// Caps lock
    CapsLock,
    /// Scroll lock
    ScrollLock,
    /// Right shift
    RShift,
    /// Left shift
    LShift,
    /// Right control
    RCtrl,
    /// Left control
    LCtrl,
    /// Right alt
    RAlt,
    /// Left alt
    LAlt,
    /// Right meta
    RMeta,
    /// Left meta
    LMeta,
    /// Left super
    LSuper,
    /// Right super
    RSuper,
    /// Mode switch
    Mode,
    /// Help
    Help,
    /// Print screen
    Print,
    /// System request
    SysReq,
    /// Break
    Break,
    /// Menu
    Menu,
    /// Power
    Power,
    /// Euro sign
    Euro,
}

impl KeyCode {
    /// Is this one of the shift, control, alt, meta or super keys?
    pub fn is_modifier(self) -> bool {
        matches!(
            self,
            Self::RShift
                | Self::LShift
                | Self::RCtrl
                | Self::LCtrl
                | Self::RAlt
                | Self::LAlt
                | Self::RMeta
                | Self::LMeta
                | Self::LSuper
                | Self::RSuper
        )
    }
}

/// A keystroke delivered to the focused widget.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct KeyEvent {
    /// Press or release.
    pub kind: KeyEventKind,
    /// The named key, if the host key has a mapping.
    pub key: Option<KeyCode>,
    /// Text produced by the keystroke. Always `None` on release.
    pub text: Option<String>,
}

impl KeyEvent {
    /// A key press producing `text`.
    pub fn press(key: Option<KeyCode>, text: Option<String>) -> Self {
        Self {
            kind: KeyEventKind::Press,
            key,
            text,
        }
    }

    /// A key release.
    pub fn release(key: Option<KeyCode>) -> Self {
        Self {
            kind: KeyEventKind::Release,
            key,
            text: None,
        }
    }
}
