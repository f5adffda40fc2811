//! Audio output health check

use crate::app::{Audio, AudioConfig};
use crate::health::check::{CheckResult, SystemCheck};

/// Checks that the default audio output can be opened
///
/// The game runs silently without one, so failure only warns.
pub struct AudioDeviceCheck;

impl AudioDeviceCheck {
    pub fn new() -> Self {
        Self
    }
}

impl Default for AudioDeviceCheck {
    fn default() -> Self {
        Self::new()
    }
}

impl SystemCheck for AudioDeviceCheck {
    fn name(&self) -> &'static str {
        "Audio Device"
    }

    fn description(&self) -> Option<&'static str> {
        Some("Opens the default audio output stream")
    }

    fn check(&self) -> CheckResult {
        match Audio::new(AudioConfig::default()) {
            Ok(audio) => {
                let details = format!("  Device output: {}", audio.output_format());
                CheckResult::pass("Default output stream opened").with_details(details)
            }
            Err(e) => CheckResult::warn("No audio output; the game will run silently")
                .with_details(format!("  {e}")),
        }
    }
}
