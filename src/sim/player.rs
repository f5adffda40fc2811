//! Player physics and animation state machine
//!
//! Gravity is applied once per update call, so the caller is expected to step
//! the player at a fixed rate. The landing test uses the current downward
//! velocity as its tolerance: the player lands when its bottom edge has sunk
//! into a building by no more than one tick of fall distance.

use enum_map::{Enum, EnumMap, enum_map};
use serde::{Deserialize, Serialize};
use tracing::trace;

use super::building::Building;
use super::config::GameConfig;
use super::geometry::Rect;
use super::snapshot::SpriteId;

/// Animation the hero is playing
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Enum)]
pub enum Animation {
    Running,
    Jumping,
}

static RUN_FRAMES: [SpriteId; 10] = [
    SpriteId::Hero(Animation::Running, 0),
    SpriteId::Hero(Animation::Running, 1),
    SpriteId::Hero(Animation::Running, 2),
    SpriteId::Hero(Animation::Running, 3),
    SpriteId::Hero(Animation::Running, 4),
    SpriteId::Hero(Animation::Running, 5),
    SpriteId::Hero(Animation::Running, 6),
    SpriteId::Hero(Animation::Running, 7),
    SpriteId::Hero(Animation::Running, 8),
    SpriteId::Hero(Animation::Running, 9),
];

static JUMP_FRAMES: [SpriteId; 8] = [
    SpriteId::Hero(Animation::Jumping, 0),
    SpriteId::Hero(Animation::Jumping, 1),
    SpriteId::Hero(Animation::Jumping, 2),
    SpriteId::Hero(Animation::Jumping, 3),
    SpriteId::Hero(Animation::Jumping, 4),
    SpriteId::Hero(Animation::Jumping, 5),
    SpriteId::Hero(Animation::Jumping, 6),
    SpriteId::Hero(Animation::Jumping, 7),
];

/// Result of a physics update
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PlayerStatus {
    Alive,
    /// The player dropped below the visible field
    FellOut,
}

/// The runner
#[derive(Debug, Clone)]
pub struct Player {
    rect: Rect,
    vertical_velocity: f32,
    grounded: bool,
    animation: Animation,
    frame_index: usize,
    frame_timer: f32,
    frames: EnumMap<Animation, &'static [SpriteId]>,
}

impl Player {
    /// Creates a player at the configured spawn point, airborne and at rest
    pub fn new(config: &GameConfig) -> Self {
        Self {
            rect: Rect::new(
                config.player_spawn[0],
                config.player_spawn[1],
                config.player_size[0],
                config.player_size[1],
            ),
            vertical_velocity: 0.0,
            grounded: false,
            animation: Animation::Jumping,
            frame_index: 0,
            frame_timer: 0.0,
            frames: enum_map! {
                Animation::Running => &RUN_FRAMES[..],
                Animation::Jumping => &JUMP_FRAMES[..],
            },
        }
    }

    /// Builder method to place the player's top-left corner
    pub fn with_position(mut self, x: f32, y: f32) -> Self {
        self.rect.x = x;
        self.rect.y = y;
        self
    }

    /// Builder method to set the vertical velocity
    pub fn with_velocity(mut self, vertical_velocity: f32) -> Self {
        self.vertical_velocity = vertical_velocity;
        self.grounded = false;
        self
    }

    /// Starts a jump if the player is standing on a building
    ///
    /// Returns false, leaving all state untouched, while airborne.
    pub fn jump(&mut self, jump_strength: f32) -> bool {
        if !self.grounded {
            return false;
        }

        self.vertical_velocity = -jump_strength;
        self.grounded = false;
        self.animation = Animation::Jumping;
        self.frame_index = 0;
        true
    }

    /// Advances animation and physics by one tick
    pub fn update(&mut self, dt: f32, buildings: &[Building], config: &GameConfig) -> PlayerStatus {
        self.advance_animation(dt, config.frame_interval);

        self.vertical_velocity += config.gravity;
        self.rect.y += self.vertical_velocity;

        // Grounded only holds for a tick in which the player actually landed
        self.grounded = false;
        let mut touching = false;
        for building in buildings {
            let platform = building.rect();
            if !self.rect.intersects(&platform) {
                continue;
            }
            touching = true;

            if self.vertical_velocity > 0.0
                && self.rect.bottom() <= platform.top() + self.vertical_velocity
            {
                self.rect.y = platform.top() - self.rect.h;
                self.vertical_velocity = 0.0;
                self.grounded = true;
                self.animation = Animation::Running;
                trace!(top = platform.top(), "Landed");
            }
        }

        if !touching {
            self.animation = Animation::Jumping;
        }

        if self.rect.y >= config.field_height {
            return PlayerStatus::FellOut;
        }

        if self.vertical_velocity != 0.0 {
            self.animation = Animation::Jumping;
        }

        PlayerStatus::Alive
    }

    fn advance_animation(&mut self, dt: f32, frame_interval: f32) {
        self.frame_timer += dt;
        if self.frame_timer >= frame_interval {
            self.frame_timer = 0.0;
            self.frame_index = (self.frame_index + 1) % self.frame_count(self.animation);
        }
    }

    /// Number of frames in an animation
    pub fn frame_count(&self, animation: Animation) -> usize {
        self.frames[animation].len()
    }

    /// Sprite for the current frame
    ///
    /// The frame index is wrapped into the current animation, since switching
    /// from the longer run cycle can leave it past the end of the jump cycle.
    pub fn sprite(&self) -> SpriteId {
        let frames = self.frames[self.animation];
        frames[self.frame_index % frames.len()]
    }

    pub fn rect(&self) -> Rect {
        self.rect
    }

    pub fn vertical_velocity(&self) -> f32 {
        self.vertical_velocity
    }

    pub fn is_grounded(&self) -> bool {
        self.grounded
    }

    pub fn animation(&self) -> Animation {
        self.animation
    }

    pub fn frame_index(&self) -> usize {
        self.frame_index
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const TICK: f32 = 1.0 / 60.0;

    fn config() -> GameConfig {
        GameConfig::default()
    }

    fn platform_at(top: f32) -> Building {
        Building::new(Rect::new(0.0, top, 2400.0, 992.0), false, [64.0, 138.0])
    }

    /// Drops a player onto a platform and lets it settle
    fn landed_player(config: &GameConfig, platforms: &[Building]) -> Player {
        let mut player =
            Player::new(config).with_position(160.0, platforms[0].rect().top() - 100.0);
        for _ in 0..120 {
            player.update(TICK, platforms, config);
            if player.is_grounded() {
                break;
            }
        }
        assert!(player.is_grounded(), "player never landed");
        player
    }

    #[test]
    fn test_initial_state() {
        let player = Player::new(&config());
        assert_eq!(player.rect(), Rect::new(160.0, 90.0, 60.0, 41.0));
        assert_eq!(player.vertical_velocity(), 0.0);
        assert!(!player.is_grounded());
        assert_eq!(player.animation(), Animation::Jumping);
    }

    #[test]
    fn test_frame_counts() {
        let player = Player::new(&config());
        assert_eq!(player.frame_count(Animation::Running), 10);
        assert_eq!(player.frame_count(Animation::Jumping), 8);
    }

    #[test]
    fn test_gravity_integration_is_deterministic() {
        let config = config();
        let mut player = Player::new(&config).with_velocity(-12.0);

        for _ in 0..40 {
            assert_eq!(player.update(TICK, &[], &config), PlayerStatus::Alive);
        }

        assert!(player.vertical_velocity().abs() < 1e-4);
    }

    #[test]
    fn test_lands_on_building() {
        let config = config();
        let platforms = [platform_at(400.0)];
        let player = landed_player(&config, &platforms);

        assert_eq!(player.rect().bottom(), 400.0);
        assert_eq!(player.vertical_velocity(), 0.0);
        assert_eq!(player.animation(), Animation::Running);
    }

    #[test]
    fn test_stays_grounded_while_resting() {
        let config = config();
        let platforms = [platform_at(360.0)];
        let mut player = landed_player(&config, &platforms);

        for _ in 0..300 {
            player.update(TICK, &platforms, &config);
            assert!(player.is_grounded());
            assert_eq!(player.vertical_velocity(), 0.0);
            assert_eq!(player.rect().bottom(), 360.0);
        }
    }

    #[test]
    fn test_grounded_implies_zero_velocity() {
        let config = config();
        let platforms = [platform_at(420.0)];
        let mut player = Player::new(&config).with_position(160.0, 100.0);

        for i in 0..600 {
            if i % 50 == 0 {
                player.jump(config.jump_strength);
            }
            player.update(TICK, &platforms, &config);
            if player.is_grounded() {
                assert_eq!(player.vertical_velocity(), 0.0);
            }
        }
    }

    #[test]
    fn test_jump_from_ground() {
        let config = config();
        let platforms = [platform_at(400.0)];
        let mut player = landed_player(&config, &platforms);

        assert!(player.jump(config.jump_strength));
        assert_eq!(player.vertical_velocity(), -12.0);
        assert!(!player.is_grounded());
        assert_eq!(player.animation(), Animation::Jumping);
        assert_eq!(player.frame_index(), 0);
    }

    #[test]
    fn test_jump_while_airborne_is_noop() {
        let config = config();
        let mut player = Player::new(&config).with_velocity(3.5);
        player.update(TICK, &[], &config);
        let velocity = player.vertical_velocity();
        let frame = player.frame_index();

        assert!(!player.jump(config.jump_strength));
        assert_eq!(player.vertical_velocity(), velocity);
        assert_eq!(player.frame_index(), frame);
        assert!(!player.is_grounded());
    }

    #[test]
    fn test_does_not_land_when_rising() {
        let config = config();
        let platforms = [platform_at(400.0)];
        // Inside the building, moving up
        let mut player = Player::new(&config)
            .with_position(160.0, 420.0)
            .with_velocity(-5.0);

        player.update(TICK, &platforms, &config);
        assert!(!player.is_grounded());
        assert_eq!(player.animation(), Animation::Jumping);
    }

    #[test]
    fn test_deep_overlap_does_not_land() {
        let config = config();
        let platforms = [platform_at(400.0)];
        // Bottom already 30 units below the top while falling slowly
        let mut player = Player::new(&config)
            .with_position(160.0, 400.0 - 41.0 + 30.0)
            .with_velocity(1.0);

        player.update(TICK, &platforms, &config);
        assert!(!player.is_grounded());
        assert!(player.vertical_velocity() > 0.0);
    }

    #[test]
    fn test_falls_out_of_field() {
        let config = config();
        let mut player = Player::new(&config).with_position(160.0, 715.0).with_velocity(5.0);
        assert_eq!(player.update(TICK, &[], &config), PlayerStatus::FellOut);
    }

    #[test]
    fn test_walking_off_edge_switches_to_jumping() {
        let config = config();
        let mut platforms = [platform_at(400.0)];
        let mut player = landed_player(&config, &platforms);
        assert_eq!(player.animation(), Animation::Running);

        // Building scrolls away entirely
        platforms[0] = Building::new(
            Rect::new(-3000.0, 400.0, 2400.0, 992.0),
            false,
            [64.0, 138.0],
        );
        player.update(TICK, &platforms, &config);

        assert!(!player.is_grounded());
        assert_eq!(player.animation(), Animation::Jumping);
    }

    #[test]
    fn test_animation_advances_on_interval() {
        let config = config();
        let mut player = Player::new(&config);
        assert_eq!(player.frame_index(), 0);

        player.update(0.02, &[], &config);
        assert_eq!(player.frame_index(), 0);

        player.update(0.02, &[], &config);
        assert_eq!(player.frame_index(), 1);
    }

    #[test]
    fn test_jump_animation_wraps_at_eight() {
        let config = config();
        let mut player = Player::new(&config);
        for _ in 0..8 {
            player.update(config.frame_interval, &[], &config);
        }
        assert_eq!(player.frame_index(), 0);
    }

    #[test]
    fn test_run_animation_wraps_at_ten() {
        let config = config();
        let platforms = [Building::new(
            Rect::new(0.0, 400.0, 2400.0, 992.0),
            false,
            [64.0, 138.0],
        )];
        let mut player = landed_player(&config, &platforms);
        let start = player.frame_index();

        let mut seen = Vec::new();
        for _ in 0..10 {
            player.update(config.frame_interval, &platforms, &config);
            assert_eq!(player.animation(), Animation::Running);
            seen.push(player.frame_index());
        }

        assert_eq!(player.frame_index(), start);
        assert!(seen.contains(&0));
        assert_eq!(seen.iter().max(), Some(&9));
    }

    #[test]
    fn test_sprite_matches_state() {
        let config = config();
        let platforms = [platform_at(400.0)];
        let player = landed_player(&config, &platforms);
        match player.sprite() {
            SpriteId::Hero(Animation::Running, frame) => assert!((frame as usize) < 10),
            other => panic!("unexpected sprite {other:?}"),
        }
    }
}
