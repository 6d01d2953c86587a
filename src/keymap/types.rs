//! Core key type: DOM-style key names reported by the popup's keyup events

use std::fmt;

/// A key code as reported by a `KeyboardEvent.key` value
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum KeyCode {
    /// A printable character key
    Char(char),

    // Named keys
    Enter,
    Escape,
    Tab,
    Backspace,
    Delete,
    Space,

    // Arrow keys
    ArrowUp,
    ArrowDown,
    ArrowLeft,
    ArrowRight,

    // Navigation
    Home,
    End,
    PageUp,
    PageDown,

    // Modifiers (reported on their own keyup)
    Shift,
    Control,
    Alt,
    Meta,

    // Function keys
    F(u8), // F1-F24

    /// Anything the popup does not distinguish
    Unidentified,
}

impl KeyCode {
    /// Parse a `KeyboardEvent.key` value such as `"ArrowDown"`, `"F22"` or `"a"`
    pub fn from_name(name: &str) -> KeyCode {
        match name {
            "Enter" => KeyCode::Enter,
            "Escape" | "Esc" => KeyCode::Escape,
            "Tab" => KeyCode::Tab,
            "Backspace" => KeyCode::Backspace,
            "Delete" => KeyCode::Delete,
            " " | "Space" => KeyCode::Space,
            "ArrowUp" | "Up" => KeyCode::ArrowUp,
            "ArrowDown" | "Down" => KeyCode::ArrowDown,
            "ArrowLeft" | "Left" => KeyCode::ArrowLeft,
            "ArrowRight" | "Right" => KeyCode::ArrowRight,
            "Home" => KeyCode::Home,
            "End" => KeyCode::End,
            "PageUp" => KeyCode::PageUp,
            "PageDown" => KeyCode::PageDown,
            "Shift" => KeyCode::Shift,
            "Control" => KeyCode::Control,
            "Alt" => KeyCode::Alt,
            "Meta" => KeyCode::Meta,
            _ => {
                if let Some(n) = name
                    .strip_prefix('F')
                    .and_then(|rest| rest.parse::<u8>().ok())
                    .filter(|n| (1..=24).contains(n))
                {
                    return KeyCode::F(n);
                }
                let mut chars = name.chars();
                match (chars.next(), chars.next()) {
                    (Some(c), None) => KeyCode::Char(c),
                    _ => KeyCode::Unidentified,
                }
            }
        }
    }

    /// Arrow keys and Enter drive the highlight, not the filter text
    #[inline]
    pub const fn is_navigation(self) -> bool {
        matches!(
            self,
            KeyCode::ArrowUp
                | KeyCode::ArrowDown
                | KeyCode::ArrowLeft
                | KeyCode::ArrowRight
                | KeyCode::Enter
        )
    }

    /// Keys a touchpad "middle click" emits alongside the click
    #[inline]
    pub const fn is_modifier_artifact(self) -> bool {
        matches!(
            self,
            KeyCode::F(22) | KeyCode::Shift | KeyCode::Control | KeyCode::Meta
        )
    }
}

impl fmt::Display for KeyCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            KeyCode::Char(c) => write!(f, "{}", c),
            KeyCode::Enter => write!(f, "Enter"),
            KeyCode::Escape => write!(f, "Escape"),
            KeyCode::Tab => write!(f, "Tab"),
            KeyCode::Backspace => write!(f, "Backspace"),
            KeyCode::Delete => write!(f, "Delete"),
            KeyCode::Space => write!(f, "Space"),
            KeyCode::ArrowUp => write!(f, "ArrowUp"),
            KeyCode::ArrowDown => write!(f, "ArrowDown"),
            KeyCode::ArrowLeft => write!(f, "ArrowLeft"),
            KeyCode::ArrowRight => write!(f, "ArrowRight"),
            KeyCode::Home => write!(f, "Home"),
            KeyCode::End => write!(f, "End"),
            KeyCode::PageUp => write!(f, "PageUp"),
            KeyCode::PageDown => write!(f, "PageDown"),
            KeyCode::Shift => write!(f, "Shift"),
            KeyCode::Control => write!(f, "Control"),
            KeyCode::Alt => write!(f, "Alt"),
            KeyCode::Meta => write!(f, "Meta"),
            KeyCode::F(n) => write!(f, "F{}", n),
            KeyCode::Unidentified => write!(f, "Unidentified"),
        }
    }
}
