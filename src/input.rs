//! Default input bindings
//!
//! Platform layers translate their own key events into [`Key`] and forward
//! the resulting [`InputAction`] to the engine.

use crate::sim::InputAction;

/// Keys the game reacts to
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Key {
    Space,
    ArrowUp,
    W,
    Enter,
    Escape,
    P,
    R,
    M,
    Other,
}

impl Key {
    /// Parse a DOM-style key code ("Space", "KeyW", ...)
    pub fn from_code(code: &str) -> Self {
        match code {
            "Space" => Key::Space,
            "ArrowUp" => Key::ArrowUp,
            "KeyW" => Key::W,
            "Enter" => Key::Enter,
            "Escape" => Key::Escape,
            "KeyP" => Key::P,
            "KeyR" => Key::R,
            "KeyM" => Key::M,
            _ => Key::Other,
        }
    }
}

/// Action bound to a key press. Auto-repeat presses are ignored.
pub fn action_for_key(key: Key, repeat: bool) -> Option<InputAction> {
    if repeat {
        return None;
    }
    match key {
        Key::Space | Key::ArrowUp | Key::W | Key::Enter => Some(InputAction::Flap),
        Key::Escape | Key::P => Some(InputAction::TogglePause),
        Key::R => Some(InputAction::Restart),
        Key::M => Some(InputAction::ToggleAudio),
        Key::Other => None,
    }
}

/// Action for a pointer press anywhere on the playfield
pub fn action_for_pointer() -> InputAction {
    InputAction::Flap
}

/// Action for a window visibility change
pub fn action_for_visibility(visible: bool) -> InputAction {
    if visible {
        InputAction::VisibilityVisible
    } else {
        InputAction::VisibilityHidden
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_flap_keys() {
        for code in ["Space", "ArrowUp", "KeyW", "Enter"] {
            assert_eq!(action_for_key(Key::from_code(code), false), Some(InputAction::Flap));
        }
    }

    #[test]
    fn test_other_bindings() {
        assert_eq!(action_for_key(Key::Escape, false), Some(InputAction::TogglePause));
        assert_eq!(action_for_key(Key::P, false), Some(InputAction::TogglePause));
        assert_eq!(action_for_key(Key::R, false), Some(InputAction::Restart));
        assert_eq!(action_for_key(Key::M, false), Some(InputAction::ToggleAudio));
        assert_eq!(action_for_key(Key::from_code("KeyZ"), false), None);
    }

    #[test]
    fn test_repeat_ignored() {
        assert_eq!(action_for_key(Key::Space, true), None);
    }

    #[test]
    fn test_pointer_and_visibility() {
        assert_eq!(action_for_pointer(), InputAction::Flap);
        assert_eq!(action_for_visibility(false), InputAction::VisibilityHidden);
        assert_eq!(action_for_visibility(true), InputAction::VisibilityVisible);
    }
}
