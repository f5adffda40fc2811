//! Mapping from keys to game controls

use serde::{Deserialize, Serialize};

use super::keys::Key;
use super::state::InputState;
use crate::sim::Controls;

/// Keys bound to each control; any key in a list triggers it
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct KeyBindings {
    /// Held to jump (re-jumps on every landing)
    pub jump: Vec<Key>,
    /// Held to sprint
    pub sprint: Vec<Key>,
    /// Pressed to go back or quit
    pub back: Vec<Key>,
    /// Pressed to show or hide the debug overlay
    pub debug_overlay: Vec<Key>,
}

impl Default for KeyBindings {
    fn default() -> Self {
        Self {
            jump: vec![Key::Space],
            sprint: vec![Key::ShiftLeft, Key::ShiftRight],
            back: vec![Key::Escape],
            debug_overlay: vec![Key::Backquote],
        }
    }
}

impl KeyBindings {
    /// Samples the controls for this frame
    pub fn controls(&self, state: &InputState) -> Controls {
        Controls {
            jump: self.jump.iter().any(|&k| state.is_down(k)),
            sprint: self.sprint.iter().any(|&k| state.is_down(k)),
            back: self.back.iter().any(|&k| state.is_just_pressed(k)),
        }
    }

    /// True on the frame the debug overlay key goes down
    pub fn debug_overlay_pressed(&self, state: &InputState) -> bool {
        self.debug_overlay.iter().any(|&k| state.is_just_pressed(k))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_controls() {
        let bindings = KeyBindings::default();
        let mut state = InputState::new();

        state.press(Key::Space);
        state.press(Key::ShiftRight);
        let controls = bindings.controls(&state);
        assert!(controls.jump);
        assert!(controls.sprint);
        assert!(!controls.back);
    }

    #[test]
    fn test_jump_is_level_triggered() {
        let bindings = KeyBindings::default();
        let mut state = InputState::new();
        state.press(Key::Space);
        state.advance_frame();
        state.advance_frame();
        assert!(bindings.controls(&state).jump);
    }

    #[test]
    fn test_back_is_edge_triggered() {
        let bindings = KeyBindings::default();
        let mut state = InputState::new();
        state.press(Key::Escape);
        assert!(bindings.controls(&state).back);

        state.advance_frame();
        assert!(!bindings.controls(&state).back);
    }

    #[test]
    fn test_debug_overlay_key() {
        let bindings = KeyBindings::default();
        let mut state = InputState::new();
        assert!(!bindings.debug_overlay_pressed(&state));
        state.press(Key::Backquote);
        assert!(bindings.debug_overlay_pressed(&state));
    }
}
