//! Application configuration
//!
//! Supports multiple profiles (debug, release) with different settings.

use std::path::{Path, PathBuf};

use config::{Config, ConfigError, Environment, File};
use serde::{Deserialize, Serialize};

use super::input::KeyBindings;
use crate::sim::GameConfig;

/// Window configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WindowConfig {
    /// Window title
    pub title: String,
    /// Window width
    pub width: f64,
    /// Window height
    pub height: f64,
    /// Whether the window should be fullscreen
    pub fullscreen: bool,
    /// Whether the window should be resizable
    pub resizable: bool,
    /// Whether the window should be decorated (has title bar, borders, etc.)
    pub decorated: bool,
    /// Whether to enable vsync
    pub vsync: bool,
}

impl Default for WindowConfig {
    fn default() -> Self {
        Self {
            title: "Rooftop Run".to_string(),
            width: 1280.0,
            height: 720.0,
            fullscreen: false,
            resizable: true,
            decorated: true,
            vsync: true,
        }
    }
}

/// Audio configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AudioConfig {
    /// Whether sound starts enabled
    pub enabled: bool,
    pub music_volume: f32,
    pub effects_volume: f32,
}

impl Default for AudioConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            music_volume: 0.25,
            effects_volume: 0.5,
        }
    }
}

/// Application configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AppConfig {
    /// The active profile (debug, release, etc.)
    pub profile: String,
    /// Window configuration
    #[serde(default)]
    pub window: WindowConfig,
    /// Gameplay tuning
    #[serde(default)]
    pub game: GameConfig,
    #[serde(default)]
    pub audio: AudioConfig,
    /// Key bindings
    #[serde(default)]
    pub input: KeyBindings,
}

impl AppConfig {
    /// Loads configuration based on the specified profile
    ///
    /// Profiles are loaded from config files in the following order:
    /// 1. config/{profile}.toml (profile-specific configuration)
    /// 2. Environment variables with prefix APP_ (e.g., APP_GAME__GRAVITY=0.25)
    ///
    /// Config files are searched for in:
    /// 1. Next to the executable (target/debug/config or target/release/config)
    /// 2. In the current directory (./config)
    pub fn load(profile: &str) -> Result<Self, ConfigError> {
        Self::load_from(Self::find_config_dir().as_deref(), profile)
    }

    /// Loads configuration for `profile` from an explicit config directory
    pub fn load_from(config_dir: Option<&Path>, profile: &str) -> Result<Self, ConfigError> {
        let mut builder = Config::builder();

        // Add profile-specific configuration
        if let Some(dir) = config_dir {
            let profile_path = dir.join(profile);
            builder = builder.add_source(File::from(profile_path.as_path()).required(false));
        } else {
            builder =
                builder.add_source(File::with_name(&format!("config/{}", profile)).required(false));
        }

        // Use __ as separator for nested fields (e.g., APP_WINDOW__WIDTH)
        builder = builder.add_source(
            Environment::with_prefix("APP")
                .separator("__")
                .try_parsing(true),
        );

        let config = builder.set_override("profile", profile)?.build()?;

        config.try_deserialize()
    }

    /// Finds the config directory by searching in multiple locations
    fn find_config_dir() -> Option<PathBuf> {
        if let Ok(exe_path) = std::env::current_exe()
            && let Some(exe_dir) = exe_path.parent()
        {
            let config_dir = exe_dir.join("config");
            if config_dir.exists() {
                return Some(config_dir);
            }
        }

        let cwd_config = PathBuf::from("config");
        if cwd_config.exists() {
            return Some(cwd_config);
        }

        None
    }

    /// Loads configuration using the APP_PROFILE environment variable,
    /// defaulting to "release"
    pub fn load_from_env() -> Result<Self, ConfigError> {
        Self::load(&Self::profile_from_env())
    }

    /// Profile named by APP_PROFILE, or "release"
    pub fn profile_from_env() -> String {
        std::env::var("APP_PROFILE").unwrap_or_else(|_| "release".to_string())
    }

    /// Built-in configuration used when nothing can be loaded
    pub fn builtin(profile: &str) -> Self {
        Self {
            profile: profile.to_string(),
            window: WindowConfig::default(),
            game: GameConfig::default(),
            audio: AudioConfig::default(),
            input: KeyBindings::default(),
        }
    }
}

impl Default for AppConfig {
    fn default() -> Self {
        Self::load("release").unwrap_or_else(|_| Self::builtin("release"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::app::input::Key;
    use std::fs;

    #[test]
    fn test_missing_file_uses_defaults() {
        let dir = tempfile::tempdir().expect("tempdir");
        let config = AppConfig::load_from(Some(dir.path()), "nowhere").expect("load");

        assert_eq!(config.profile, "nowhere");
        assert_eq!(config.game, GameConfig::default());
        assert_eq!(config.audio, AudioConfig::default());
        assert_eq!(config.window.width, 1280.0);
    }

    #[test]
    fn test_partial_game_section() {
        let dir = tempfile::tempdir().expect("tempdir");
        fs::write(
            dir.path().join("custom.toml"),
            "[game]\ngravity = 0.5\nseed = 42\n\n[audio]\nenabled = false\n",
        )
        .expect("write config");

        let config = AppConfig::load_from(Some(dir.path()), "custom").expect("load");

        assert_eq!(config.game.gravity, 0.5);
        assert_eq!(config.game.seed, Some(42));
        assert_eq!(config.game.gap, 400.0);
        assert!(!config.audio.enabled);
        assert_eq!(config.audio.music_volume, 0.25);
    }

    #[test]
    fn test_key_bindings_from_file() {
        let dir = tempfile::tempdir().expect("tempdir");
        fs::write(
            dir.path().join("keys.toml"),
            "[input]\njump = [\"Up\", \"W\"]\n",
        )
        .expect("write config");

        let config = AppConfig::load_from(Some(dir.path()), "keys").expect("load");

        assert_eq!(config.input.jump, vec![Key::Up, Key::W]);
        assert_eq!(config.input.back, KeyBindings::default().back);
    }

    #[test]
    fn test_builtin() {
        let config = AppConfig::builtin("debug");
        assert_eq!(config.profile, "debug");
        assert_eq!(config.window.title, "Rooftop Run");
    }
}
