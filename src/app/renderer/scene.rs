//! Turns a frame snapshot into draw commands
//!
//! Sprites are stand-in colours: the city layer is a procedural skyline and
//! the hero's colour steps through a palette with its animation frame.

use crate::app::line_renderer::Line;
use crate::app::rect_renderer::FilledRect;
use crate::sim::{Animation, FrameSnapshot, GameState, Rect, SpriteId};

const SKY: [f32; 4] = [0.05, 0.06, 0.12, 1.0];
const SKYLINE: [f32; 4] = [0.14, 0.16, 0.26, 1.0];
const BUILDING: [f32; 4] = [0.32, 0.30, 0.34, 1.0];
const ROOF: [f32; 4] = [0.55, 0.52, 0.50, 1.0];
const BARREL: [f32; 4] = [0.85, 0.42, 0.12, 1.0];
const HITBOX: [f32; 4] = [0.1, 1.0, 0.3, 1.0];
const OBSTACLE_HITBOX: [f32; 4] = [1.0, 0.2, 0.2, 1.0];

const RUN_PALETTE: [[f32; 4]; 5] = [
    [0.95, 0.85, 0.30, 1.0],
    [0.98, 0.78, 0.28, 1.0],
    [1.00, 0.70, 0.26, 1.0],
    [0.98, 0.78, 0.28, 1.0],
    [0.95, 0.85, 0.30, 1.0],
];
const JUMP_PALETTE: [[f32; 4]; 4] = [
    [0.40, 0.85, 0.95, 1.0],
    [0.45, 0.75, 1.00, 1.0],
    [0.50, 0.65, 1.00, 1.0],
    [0.45, 0.75, 1.00, 1.0],
];

/// Roof trim thickness in field units
const ROOF_TRIM: f32 = 8.0;
const HITBOX_THICKNESS: f32 = 2.0;
/// Width of one skyline block
const SKYLINE_BLOCK: f32 = 96.0;

/// Everything the scene pass draws for one frame
#[derive(Debug, Default)]
pub struct Scene {
    pub clear_color: [f32; 4],
    pub rects: Vec<FilledRect>,
    pub lines: Vec<Line>,
}

/// Builds scenes; holds the precomputed skyline tile
pub struct SceneBuilder {
    skyline: Vec<Rect>,
}

impl SceneBuilder {
    /// Generates one skyline tile spanning `background_width`
    pub fn new(background_width: f32, field_height: f32) -> Self {
        let count = (background_width / SKYLINE_BLOCK).ceil().max(0.0) as usize;
        let skyline = (0..count)
            .map(|i| {
                // Cheap integer hash so the skyline is fixed without an RNG
                let h = (i as u32).wrapping_mul(2_654_435_761) >> 24;
                let height = field_height * (0.2 + 0.4 * (h as f32 / 255.0));
                let x = i as f32 * SKYLINE_BLOCK;
                let w = SKYLINE_BLOCK.min(background_width - x);
                Rect::new(x, field_height - height, w, height)
            })
            .collect();

        Self { skyline }
    }

    /// Draw commands for a snapshot
    ///
    /// Only a running game draws the world; menu and game over screens are a
    /// black backdrop for the egui widgets.
    pub fn build(&self, snapshot: &FrameSnapshot, show_hitboxes: bool) -> Scene {
        if snapshot.state != GameState::Playing {
            return Scene {
                clear_color: [0.0, 0.0, 0.0, 1.0],
                ..Scene::default()
            };
        }

        let mut scene = Scene {
            clear_color: SKY,
            ..Scene::default()
        };

        // City layer, twice so the wrap is seamless
        for tile_x in snapshot.background_tiles() {
            for block in &self.skyline {
                let rect = Rect::new(block.x + tile_x, block.y, block.w, block.h);
                scene.rects.push(FilledRect::new(rect, sprite_color(SpriteId::City)));
            }
        }

        for building in &snapshot.buildings {
            scene
                .rects
                .push(FilledRect::new(building.rect, sprite_color(building.sprite)));
            let trim = Rect::new(building.rect.x, building.rect.y, building.rect.w, ROOF_TRIM);
            scene.rects.push(FilledRect::new(trim, ROOF));

            if let Some((obstacle, sprite)) = building.obstacle {
                scene
                    .rects
                    .push(FilledRect::new(obstacle, sprite_color(sprite)));
            }
        }

        let player = &snapshot.player;
        scene
            .rects
            .push(FilledRect::new(player.rect, sprite_color(player.sprite)));

        if show_hitboxes {
            outline(&mut scene.lines, &player.rect, HITBOX);
            for building in &snapshot.buildings {
                outline(&mut scene.lines, &building.rect, HITBOX);
                if let Some((obstacle, _)) = building.obstacle {
                    outline(&mut scene.lines, &obstacle, OBSTACLE_HITBOX);
                }
            }
        }

        scene
    }
}

fn outline(lines: &mut Vec<Line>, rect: &Rect, color: [f32; 4]) {
    for (from, to) in rect.outline() {
        lines.push(Line::new(from, to, HITBOX_THICKNESS, color));
    }
}

/// Stand-in colour for a sprite
pub fn sprite_color(sprite: SpriteId) -> [f32; 4] {
    match sprite {
        SpriteId::Hero(Animation::Running, frame) => {
            RUN_PALETTE[frame as usize % RUN_PALETTE.len()]
        }
        SpriteId::Hero(Animation::Jumping, frame) => {
            JUMP_PALETTE[frame as usize % JUMP_PALETTE.len()]
        }
        SpriteId::Building => BUILDING,
        SpriteId::Barrel => BARREL,
        SpriteId::City => SKYLINE,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sim::{GameConfig, Session};

    fn playing_snapshot() -> FrameSnapshot {
        let mut session = Session::new(GameConfig::default().with_seed(5));
        session.transition_to(GameState::Playing);
        session.snapshot()
    }

    #[test]
    fn test_skyline_spans_tile() {
        let builder = SceneBuilder::new(2880.0, 720.0);
        let right = builder
            .skyline
            .iter()
            .map(|r| r.right())
            .fold(0.0, f32::max);
        assert_eq!(right, 2880.0);
        assert!(builder.skyline.iter().all(|r| (r.bottom() - 720.0).abs() < 1e-3));
    }

    #[test]
    fn test_menu_draws_nothing() {
        let session = Session::new(GameConfig::default().with_seed(5));
        let scene = SceneBuilder::new(2880.0, 720.0).build(&session.snapshot(), true);
        assert!(scene.rects.is_empty());
        assert!(scene.lines.is_empty());
    }

    #[test]
    fn test_playing_scene_contents() {
        let builder = SceneBuilder::new(2880.0, 720.0);
        let snapshot = playing_snapshot();
        let scene = builder.build(&snapshot, false);

        // Two skyline tiles, body and trim per building, then the hero on top
        let expected = 2 * builder.skyline.len() + 2 * snapshot.buildings.len() + 1;
        assert_eq!(scene.rects.len(), expected);
        assert_eq!(scene.rects.last().map(|r| r.rect), Some(snapshot.player.rect));
        assert!(scene.lines.is_empty());
    }

    #[test]
    fn test_hitboxes_outline_every_entity() {
        let snapshot = playing_snapshot();
        let scene = SceneBuilder::new(2880.0, 720.0).build(&snapshot, true);
        // Opening layout has no obstacles
        assert_eq!(scene.lines.len(), 4 * (snapshot.buildings.len() + 1));
    }

    #[test]
    fn test_hero_colour_follows_frame() {
        let a = sprite_color(SpriteId::Hero(Animation::Running, 0));
        let b = sprite_color(SpriteId::Hero(Animation::Running, 2));
        assert_ne!(a, b);
        assert_ne!(a, sprite_color(SpriteId::Hero(Animation::Jumping, 0)));
    }
}
