//! Keyboard handling for the popup
//!
//! Two listeners see keys: the filter box (text entry, see [`crate::filter`])
//! and the popup body, where arrows and Enter drive the highlight.
//!
//! ```text
//! KeyboardEvent.key → KeyCode::from_name() → body_key_msg() → Msg
//! ```

mod types;

pub use types::KeyCode;

use crate::messages::{Msg, NavMsg};

/// Map a key released anywhere in the popup body to a navigation message
pub fn body_key_msg(key: KeyCode) -> Option<Msg> {
    let msg = match key {
        KeyCode::ArrowDown => NavMsg::Next,
        KeyCode::ArrowUp => NavMsg::Previous,
        KeyCode::Enter => NavMsg::ActivateHighlighted,
        _ => return None,
    };
    Some(Msg::Nav(msg))
}
