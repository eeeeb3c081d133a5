//! Input mapping from raw events to semantic actions
//!
//! Maps keyboard input to high-level actions like Exit or TogglePause.
//! Mouse drag and wheel input is NOT mapped here - it goes directly to OrbitControls.

use winit::event::ElementState;
use winit::keyboard::KeyCode;

/// Actions triggered by keyboard shortcuts
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InputAction {
    /// Exit application (Escape)
    Exit,
    /// Return the camera to its configured start (R key)
    ResetCamera,
    /// Toggle fullscreen mode (F key)
    ToggleFullscreen,
    /// Pause or resume the ball animation (P key)
    TogglePause,
}

/// Maps raw key events to semantic actions
pub struct InputMapper;

impl InputMapper {
    /// Map keyboard input to an action
    ///
    /// Returns `None` for releases and unbound keys
    pub fn map_keyboard(key: KeyCode, state: ElementState) -> Option<InputAction> {
        if state != ElementState::Pressed {
            return None;
        }

        match key {
            KeyCode::Escape => Some(InputAction::Exit),
            KeyCode::KeyR => Some(InputAction::ResetCamera),
            KeyCode::KeyF => Some(InputAction::ToggleFullscreen),
            KeyCode::KeyP => Some(InputAction::TogglePause),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_escape_exits() {
        assert_eq!(
            InputMapper::map_keyboard(KeyCode::Escape, ElementState::Pressed),
            Some(InputAction::Exit)
        );
    }

    #[test]
    fn test_key_release_ignored() {
        for key in [KeyCode::Escape, KeyCode::KeyP, KeyCode::KeyR] {
            assert_eq!(InputMapper::map_keyboard(key, ElementState::Released), None);
        }
    }

    #[test]
    fn test_unbound_keys_not_mapped() {
        for key in [KeyCode::KeyW, KeyCode::KeyA, KeyCode::Space, KeyCode::Enter] {
            let action = InputMapper::map_keyboard(key, ElementState::Pressed);
            assert_eq!(action, None, "Key {:?} should not be mapped", key);
        }
    }

    #[test]
    fn test_special_keys() {
        assert_eq!(
            InputMapper::map_keyboard(KeyCode::KeyR, ElementState::Pressed),
            Some(InputAction::ResetCamera)
        );
        assert_eq!(
            InputMapper::map_keyboard(KeyCode::KeyF, ElementState::Pressed),
            Some(InputAction::ToggleFullscreen)
        );
        assert_eq!(
            InputMapper::map_keyboard(KeyCode::KeyP, ElementState::Pressed),
            Some(InputAction::TogglePause)
        );
    }
}
