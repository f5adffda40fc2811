//! Keyboard input polling
//!
//! # Architecture
//!
//! ```text
//! Raw Input (winit) → InputCollector → InputState
//!                                          ↓
//!                                    KeyBindings
//!                                          ↓
//!                                   sim::Controls
//! ```
//!
//! The collector is fed every window event. Once per frame the runner samples
//! [`KeyBindings::controls`], then calls [`InputCollector::advance_frame`] so
//! edge states (`JustPressed`) last exactly one frame.

mod bindings;
mod collector;
mod keys;
mod state;

pub use bindings::KeyBindings;
pub use collector::InputCollector;
pub use keys::Key;
pub use state::{ButtonState, InputState};
