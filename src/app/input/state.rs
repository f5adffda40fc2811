//! Raw input state

use std::collections::{HashMap, HashSet};

use super::keys::Key;

/// Button press state with edge detection
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ButtonState {
    #[default]
    Released,
    /// Pressed this frame (edge)
    JustPressed,
    /// Held down (multiple frames)
    Pressed,
    /// Released this frame (edge)
    JustReleased,
}

impl ButtonState {
    /// Advance state for next frame (transitions edges to steady states)
    pub fn advance(self) -> Self {
        match self {
            Self::JustPressed => Self::Pressed,
            Self::JustReleased => Self::Released,
            state => state,
        }
    }

    /// Returns true if button is currently down (just pressed or held)
    pub fn is_down(self) -> bool {
        matches!(self, Self::JustPressed | Self::Pressed)
    }

    /// Returns true if button was just pressed this frame
    pub fn is_just_pressed(self) -> bool {
        matches!(self, Self::JustPressed)
    }
}

/// Keyboard input state for a single frame
#[derive(Debug, Clone, Default)]
pub struct InputState {
    keys: HashMap<Key, ButtonState>,
    /// Keys pressed and released within the same frame
    tapped: HashSet<Key>,
}

impl InputState {
    /// Creates a new empty input state
    pub fn new() -> Self {
        Self::default()
    }

    /// State of a single key
    pub fn key(&self, key: Key) -> ButtonState {
        self.keys.get(&key).copied().unwrap_or_default()
    }

    pub fn is_down(&self, key: Key) -> bool {
        self.key(key).is_down()
    }

    pub fn is_just_pressed(&self, key: Key) -> bool {
        self.key(key).is_just_pressed()
    }

    /// Records a key press; repeats of a held key are ignored
    pub fn press(&mut self, key: Key) {
        if !self.is_down(key) {
            self.keys.insert(key, ButtonState::JustPressed);
        }
    }

    /// Records a key release
    ///
    /// A key released in the frame it was pressed stays pressed for that frame
    /// and is released when the frame advances, so short taps are not lost.
    pub fn release(&mut self, key: Key) {
        match self.key(key) {
            ButtonState::JustPressed => {
                self.tapped.insert(key);
            }
            ButtonState::Pressed => {
                self.keys.insert(key, ButtonState::JustReleased);
            }
            _ => {}
        }
    }

    /// Releases every held key, e.g. when the window loses focus
    pub fn release_all(&mut self) {
        let held: Vec<Key> = self
            .keys
            .iter()
            .filter(|(_, state)| state.is_down())
            .map(|(key, _)| *key)
            .collect();
        for key in held {
            self.release(key);
        }
    }

    /// Advance all key states for next frame
    pub fn advance_frame(&mut self) {
        for state in self.keys.values_mut() {
            *state = state.advance();
        }
        for key in self.tapped.drain() {
            self.keys.insert(key, ButtonState::JustReleased);
        }
        self.keys.retain(|_, state| *state != ButtonState::Released);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_press_hold_release() {
        let mut state = InputState::new();
        state.press(Key::Space);
        assert!(state.is_just_pressed(Key::Space));

        state.advance_frame();
        assert_eq!(state.key(Key::Space), ButtonState::Pressed);

        // OS key repeat must not re-trigger the edge
        state.press(Key::Space);
        assert_eq!(state.key(Key::Space), ButtonState::Pressed);

        state.release(Key::Space);
        assert_eq!(state.key(Key::Space), ButtonState::JustReleased);
        state.advance_frame();
        assert_eq!(state.key(Key::Space), ButtonState::Released);
    }

    #[test]
    fn test_tap_within_one_frame() {
        let mut state = InputState::new();
        state.press(Key::Escape);
        state.release(Key::Escape);
        assert!(state.is_just_pressed(Key::Escape));

        state.advance_frame();
        assert_eq!(state.key(Key::Escape), ButtonState::JustReleased);
        state.advance_frame();
        assert!(!state.is_down(Key::Escape));
    }

    #[test]
    fn test_release_all() {
        let mut state = InputState::new();
        state.press(Key::ShiftLeft);
        state.advance_frame();
        state.release_all();
        assert!(!state.is_down(Key::ShiftLeft));
    }
}
