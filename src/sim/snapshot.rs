//! Read-only view of a frame, handed to the renderer
//!
//! The render pass never touches [`Session`](super::Session) directly; it gets a
//! snapshot after the update pass so drawing cannot observe half-updated state.

use serde::{Deserialize, Serialize};

use super::geometry::Rect;
use super::player::Animation;
use super::session::GameState;

/// Identifies what to draw for an entity
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum SpriteId {
    /// Hero animation frame (zero-based)
    Hero(Animation, u8),
    Building,
    Barrel,
    City,
}

/// A building as the renderer sees it
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct BuildingView {
    pub rect: Rect,
    pub sprite: SpriteId,
    /// Obstacle rect and sprite, present only when the building carries one
    pub obstacle: Option<(Rect, SpriteId)>,
}

/// The player as the renderer sees it
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PlayerView {
    pub rect: Rect,
    pub sprite: SpriteId,
    pub animation: Animation,
    pub grounded: bool,
    pub vertical_velocity: f32,
}

/// Everything needed to draw one frame
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FrameSnapshot {
    pub state: GameState,
    pub score: f64,
    pub sound_enabled: bool,
    /// Field size in field units
    pub field: [f32; 2],
    /// Background layer x offset, in `(-background_width, 0]`
    pub background_offset: f32,
    pub background_width: f32,
    pub buildings: Vec<BuildingView>,
    pub player: PlayerView,
}

impl FrameSnapshot {
    /// Score as shown to the player
    pub fn distance(&self) -> u64 {
        self.score.max(0.0) as u64
    }

    /// The two x positions the background layer is drawn at
    pub fn background_tiles(&self) -> [f32; 2] {
        [
            self.background_offset,
            self.background_offset + self.background_width,
        ]
    }
}
