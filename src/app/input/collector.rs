//! Raw input collection from winit events

use winit::event::{ElementState, WindowEvent};
use winit::keyboard::PhysicalKey;

use super::keys::Key;
use super::state::InputState;

/// Collects raw input from winit events and maintains InputState
#[derive(Default)]
pub struct InputCollector {
    state: InputState,
}

impl InputCollector {
    /// Creates a new input collector
    pub fn new() -> Self {
        Self::default()
    }

    /// Handle a winit window event
    pub fn handle_window_event(&mut self, event: &WindowEvent) {
        match event {
            WindowEvent::KeyboardInput { event, .. } => {
                let PhysicalKey::Code(code) = event.physical_key else {
                    return;
                };
                let key = Key::from(code);
                if key == Key::Other {
                    return;
                }

                match event.state {
                    ElementState::Pressed => self.state.press(key),
                    ElementState::Released => self.state.release(key),
                }
            }

            // Releases never arrive for keys held while focus moves away
            WindowEvent::Focused(false) => self.state.release_all(),

            _ => {}
        }
    }

    /// Advance to next frame (transitions edge states to steady states)
    pub fn advance_frame(&mut self) {
        self.state.advance_frame();
    }

    /// Get current input state
    pub fn state(&self) -> &InputState {
        &self.state
    }
}
