//! Tunable game constants
//!
//! Loaded as the `[game]` section of the application configuration. Every
//! field has a default, so config files only need to list what they change.

use serde::{Deserialize, Serialize};
use tracing::warn;

/// Physics, layout and pacing constants for a run
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GameConfig {
    /// Visible field width in field units
    pub field_width: f32,
    /// Visible field height; falling to this y ends the run
    pub field_height: f32,
    /// Downward velocity added per tick
    pub gravity: f32,
    /// Upward velocity applied by a jump
    pub jump_strength: f32,
    /// Base horizontal scroll speed in field units per second
    pub scroll_speed: f32,
    /// Scroll multiplier while sprint is held
    pub sprint_multiplier: f32,
    /// Horizontal gap between consecutive buildings
    pub gap: f32,
    pub building_width: f32,
    pub building_height: f32,
    /// Number of buildings in the recycling ring
    pub building_count: usize,
    /// Maximum vertical jitter of a building top around mid-field
    pub height_jitter: f32,
    /// Probability that a recycled building carries an obstacle
    pub obstacle_chance: f64,
    pub obstacle_size: [f32; 2],
    pub player_size: [f32; 2],
    pub player_spawn: [f32; 2],
    /// Seconds between animation frames
    pub frame_interval: f32,
    /// Width of the repeating background layer
    pub background_width: f32,
    /// Background scrolls at `scroll_speed / background_scroll_divisor`
    pub background_scroll_divisor: f32,
    /// Score grows by `dt * scroll_speed / score_divisor`
    pub score_divisor: f32,
    /// Upper bound for a single frame delta, in seconds
    pub max_frame_delta: f32,
    /// Fixed simulation steps per second
    pub tick_rate: f32,
    /// RNG seed for building layout; random when unset
    pub seed: Option<u64>,
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            field_width: 1280.0,
            field_height: 720.0,
            gravity: 0.3,
            jump_strength: 12.0,
            scroll_speed: 1200.0,
            sprint_multiplier: 2.0,
            gap: 400.0,
            building_width: 2400.0,
            building_height: 992.0,
            building_count: 2,
            height_jitter: 150.0,
            obstacle_chance: 0.3,
            obstacle_size: [64.0, 138.0],
            player_size: [60.0, 41.0],
            player_spawn: [160.0, 90.0],
            frame_interval: 0.04,
            background_width: 2880.0,
            background_scroll_divisor: 4.0,
            score_divisor: 32.0,
            max_frame_delta: 0.25,
            tick_rate: 60.0,
            seed: None,
        }
    }
}

impl GameConfig {
    /// Builder method to pin the RNG seed
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }

    /// Duration of one fixed simulation step in seconds
    pub fn fixed_step(&self) -> f32 {
        1.0 / self.tick_rate.max(1.0)
    }

    /// Sanitises a frame delta: non-finite or negative becomes 0, large values are capped
    pub fn clamp_delta(&self, dt: f32) -> f32 {
        if !dt.is_finite() {
            return 0.0;
        }
        dt.clamp(0.0, self.max_frame_delta)
    }

    /// Lists values that would make a run unplayable; empty when the tuning is usable
    pub fn problems(&self) -> Vec<String> {
        let mut problems = Vec::new();
        let mut positive = |name: &str, value: f32| {
            if !(value.is_finite() && value > 0.0) {
                problems.push(format!("{name} must be positive, got {value}"));
            }
        };

        positive("field_width", self.field_width);
        positive("field_height", self.field_height);
        positive("gravity", self.gravity);
        positive("scroll_speed", self.scroll_speed);
        positive("building_width", self.building_width);
        positive("background_width", self.background_width);
        positive("background_scroll_divisor", self.background_scroll_divisor);
        positive("score_divisor", self.score_divisor);
        positive("max_frame_delta", self.max_frame_delta);
        positive("tick_rate", self.tick_rate);
        positive("frame_interval", self.frame_interval);

        if self.building_count == 0 {
            problems.push("building_count must be at least 1".to_string());
        }
        if !(0.0..=1.0).contains(&self.obstacle_chance) {
            problems.push(format!(
                "obstacle_chance must lie in [0, 1], got {}",
                self.obstacle_chance
            ));
        }
        for (name, value) in [("gap", self.gap), ("height_jitter", self.height_jitter)] {
            if !(value.is_finite() && value >= 0.0) {
                problems.push(format!("{name} must be finite and not negative, got {value}"));
            }
        }
        if !(self.sprint_multiplier.is_finite() && self.sprint_multiplier >= 1.0) {
            problems.push(format!(
                "sprint_multiplier below 1 slows the run, got {}",
                self.sprint_multiplier
            ));
        }

        problems
    }

    /// Returns this tuning if it is playable, otherwise the defaults with the same seed
    pub fn or_default_if_unplayable(self) -> Self {
        let problems = self.problems();
        if problems.is_empty() {
            return self;
        }

        for problem in &problems {
            warn!(%problem, "Unplayable game tuning");
        }
        warn!(count = problems.len(), "Falling back to default game tuning");
        Self {
            seed: self.seed,
            ..Self::default()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_tuning() {
        let config = GameConfig::default();
        assert_eq!(config.gravity, 0.3);
        assert_eq!(config.jump_strength, 12.0);
        assert_eq!(config.gap, 400.0);
        assert_eq!(config.building_count, 2);
        assert_eq!(config.obstacle_size, [64.0, 138.0]);
        assert_eq!(config.player_size, [60.0, 41.0]);
    }

    #[test]
    fn test_clamp_delta() {
        let config = GameConfig::default();
        assert_eq!(config.clamp_delta(0.016), 0.016);
        assert_eq!(config.clamp_delta(-1.0), 0.0);
        assert_eq!(config.clamp_delta(f32::NAN), 0.0);
        assert_eq!(config.clamp_delta(f32::INFINITY), 0.0);
        assert_eq!(config.clamp_delta(10.0), config.max_frame_delta);
    }

    #[test]
    fn test_problems() {
        assert!(GameConfig::default().problems().is_empty());

        let broken = GameConfig {
            gravity: 0.0,
            building_count: 0,
            obstacle_chance: 1.5,
            ..GameConfig::default()
        };
        let problems = broken.problems();
        assert_eq!(problems.len(), 3);
        assert!(problems[0].starts_with("gravity"));
    }

    #[test]
    fn test_non_finite_values_are_problems() {
        let infinite_jitter = GameConfig {
            height_jitter: f32::INFINITY,
            ..GameConfig::default()
        };
        assert_eq!(infinite_jitter.problems().len(), 1);

        let nan_gap = GameConfig {
            gap: f32::NAN,
            ..GameConfig::default()
        };
        assert!(nan_gap.problems()[0].starts_with("gap"));

        let nan_chance = GameConfig {
            obstacle_chance: f64::NAN,
            ..GameConfig::default()
        };
        assert_eq!(nan_chance.problems().len(), 1);
    }

    #[test]
    fn test_unplayable_tuning_falls_back_to_defaults() {
        let broken = GameConfig {
            height_jitter: f32::INFINITY,
            obstacle_chance: f64::NAN,
            ..GameConfig::default().with_seed(9)
        };
        let config = broken.or_default_if_unplayable();
        assert_eq!(config, GameConfig::default().with_seed(9));

        let tuned = GameConfig {
            gravity: 0.5,
            ..GameConfig::default()
        };
        assert_eq!(tuned.clone().or_default_if_unplayable(), tuned);
    }

    #[test]
    fn test_fixed_step() {
        let config = GameConfig::default();
        assert!((config.fixed_step() - 1.0 / 60.0).abs() < f32::EPSILON);
    }
}
