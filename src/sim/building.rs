//! Scrolling buildings and the obstacle spawn cycle
//!
//! Buildings are never created or destroyed during a run. Once a building has
//! scrolled fully past the left edge it is moved to the right of the rightmost
//! building, given a new height and a fresh obstacle roll.
//!
//! Recycling is processed in index order within a frame, and each recycle reads
//! the positions left by the buildings processed before it. A later building in
//! the ring has therefore not yet scrolled when an earlier one is placed behind
//! it, so the gap can only come out wider than configured, never narrower.

use rand::Rng;
use rand::rngs::StdRng;
use tracing::debug;

use super::config::GameConfig;
use super::geometry::Rect;

/// A platform segment with an optional obstacle on its roof
#[derive(Debug, Clone, PartialEq)]
pub struct Building {
    rect: Rect,
    has_obstacle: bool,
    obstacle_size: [f32; 2],
}

impl Building {
    pub fn new(rect: Rect, has_obstacle: bool, obstacle_size: [f32; 2]) -> Self {
        Self {
            rect,
            has_obstacle,
            obstacle_size,
        }
    }

    pub fn rect(&self) -> Rect {
        self.rect
    }

    pub fn has_obstacle(&self) -> bool {
        self.has_obstacle
    }

    /// Obstacle hitbox, centred on the roof; `None` when the building has no obstacle
    pub fn obstacle(&self) -> Option<Rect> {
        self.has_obstacle
            .then(|| self.rect.centered_on_top(self.obstacle_size))
    }

    /// True once the right edge has reached the left side of the field
    pub fn is_off_screen(&self) -> bool {
        self.rect.right() <= 0.0
    }
}

/// Record of a single recycle, for logging and verification
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Recycled {
    pub index: usize,
    /// Rightmost edge across the ring when the recycle happened
    pub previous_max_right: f32,
    pub new_x: f32,
    pub new_y: f32,
    pub has_obstacle: bool,
}

/// What happened during one [`BuildingRing::advance`]
#[derive(Debug, Clone, Default, PartialEq)]
pub struct AdvanceReport {
    pub recycled: Vec<Recycled>,
    /// Index of the building whose obstacle the player hit; processing stops there
    pub obstacle_hit: Option<usize>,
}

/// Fixed-size ring of buildings that recycles off-screen members
#[derive(Debug, Clone)]
pub struct BuildingRing {
    buildings: Vec<Building>,
    rng: StdRng,
    gap: f32,
    field_height: f32,
    height_jitter: f32,
    obstacle_chance: f64,
}

impl BuildingRing {
    /// Lays out `building_count` buildings side by side, starting at x = 0
    ///
    /// The opening layout never carries obstacles.
    pub fn new(config: &GameConfig, rng: StdRng) -> Self {
        let mut ring = Self::from_buildings(Vec::new(), config, rng);

        for i in 0..config.building_count {
            let x = i as f32 * (config.building_width + config.gap);
            let y = ring.random_top();
            ring.buildings.push(Building::new(
                Rect::new(x, y, config.building_width, config.building_height),
                false,
                config.obstacle_size,
            ));
        }

        ring
    }

    /// Creates a ring from an explicit layout
    ///
    /// Out-of-range randomness settings are pulled back to usable values: a
    /// non-finite obstacle chance uses the default and a non-finite jitter is
    /// treated as none.
    pub fn from_buildings(buildings: Vec<Building>, config: &GameConfig, rng: StdRng) -> Self {
        let obstacle_chance = if config.obstacle_chance.is_finite() {
            config.obstacle_chance
        } else {
            GameConfig::default().obstacle_chance
        };
        let height_jitter = if config.height_jitter.is_finite() {
            config.height_jitter.max(0.0)
        } else {
            0.0
        };

        Self {
            buildings,
            rng,
            gap: config.gap,
            field_height: config.field_height,
            height_jitter,
            obstacle_chance: obstacle_chance.clamp(0.0, 1.0),
        }
    }

    pub fn buildings(&self) -> &[Building] {
        &self.buildings
    }

    pub fn len(&self) -> usize {
        self.buildings.len()
    }

    pub fn is_empty(&self) -> bool {
        self.buildings.is_empty()
    }

    /// Rightmost edge across all buildings
    pub fn max_right(&self) -> f32 {
        self.buildings
            .iter()
            .map(|b| b.rect.right())
            .fold(f32::NEG_INFINITY, f32::max)
    }

    /// Scrolls every building left by `dt * scroll_speed`, checking obstacles and recycling
    ///
    /// Per building, in index order: move, test the obstacle against `player`,
    /// then recycle if off-screen. An obstacle hit stops the pass immediately.
    pub fn advance(&mut self, dt: f32, scroll_speed: f32, player: &Rect) -> AdvanceReport {
        let mut report = AdvanceReport::default();
        let shift = dt * scroll_speed;

        for index in 0..self.buildings.len() {
            self.buildings[index].rect.x -= shift;

            if let Some(obstacle) = self.buildings[index].obstacle()
                && player.intersects(&obstacle)
            {
                report.obstacle_hit = Some(index);
                return report;
            }

            if self.buildings[index].is_off_screen() {
                report.recycled.push(self.recycle(index));
            }
        }

        report
    }

    fn recycle(&mut self, index: usize) -> Recycled {
        let previous_max_right = self.max_right();
        let new_x = previous_max_right + self.gap;
        let new_y = self.random_top();
        let has_obstacle = self.rng.random_bool(self.obstacle_chance);

        let building = &mut self.buildings[index];
        building.rect.x = new_x;
        building.rect.y = new_y;
        building.has_obstacle = has_obstacle;

        debug!(index, x = new_x, y = new_y, has_obstacle, "Recycled building");

        Recycled {
            index,
            previous_max_right,
            new_x,
            new_y,
            has_obstacle,
        }
    }

    /// Mid-field height moved up or down by up to `height_jitter`, on a whole pixel
    fn random_top(&mut self) -> f32 {
        let magnitude = if self.height_jitter > 0.0 {
            self.rng.random_range(0.0..self.height_jitter)
        } else {
            0.0
        };
        let offset = if self.rng.random_bool(0.5) {
            -magnitude
        } else {
            magnitude
        };
        (self.field_height / 2.0 - offset).floor()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;

    fn rng() -> StdRng {
        StdRng::seed_from_u64(7)
    }

    fn building(x: f32, w: f32, has_obstacle: bool) -> Building {
        Building::new(Rect::new(x, 400.0, w, 992.0), has_obstacle, [64.0, 138.0])
    }

    /// A player rect far away from every roof
    fn nowhere() -> Rect {
        Rect::new(-10_000.0, -10_000.0, 60.0, 41.0)
    }

    #[test]
    fn test_initial_layout() {
        let config = GameConfig::default();
        let ring = BuildingRing::new(&config, rng());

        assert_eq!(ring.len(), 2);
        assert_eq!(ring.buildings()[0].rect().x, 0.0);
        assert_eq!(ring.buildings()[1].rect().x, 2400.0 + 400.0);
        for b in ring.buildings() {
            assert!(!b.has_obstacle());
            assert_eq!(b.rect().w, 2400.0);
            assert_eq!(b.rect().h, 992.0);
        }
    }

    #[test]
    fn test_heights_stay_within_jitter() {
        let config = GameConfig::default();
        let mut ring = BuildingRing::new(&config, rng());
        let (mut above, mut below) = (0, 0);
        for _ in 0..500 {
            let top = ring.random_top();
            assert!(top > 360.0 - 151.0 && top <= 360.0 + 150.0, "top {top}");
            assert_eq!(top, top.floor());
            if top < 360.0 {
                above += 1;
            } else if top > 360.0 {
                below += 1;
            }
        }
        // Both signs of the offset get drawn
        assert!(above > 100 && below > 100, "above {above}, below {below}");
    }

    #[test]
    fn test_non_finite_randomness_settings_do_not_panic() {
        let config = GameConfig {
            height_jitter: f32::INFINITY,
            obstacle_chance: f64::NAN,
            ..GameConfig::default()
        };
        let mut ring = BuildingRing::new(&config, rng());
        for b in ring.buildings() {
            assert_eq!(b.rect().y, 360.0);
        }

        ring.buildings[0].rect.x = -5000.0;
        let report = ring.advance(0.0, 0.0, &nowhere());
        assert_eq!(report.recycled.len(), 1);
        assert_eq!(ring.obstacle_chance, 0.3);
    }

    #[test]
    fn test_scroll_moves_every_building() {
        let config = GameConfig::default();
        let mut ring = BuildingRing::new(&config, rng());
        let before: Vec<f32> = ring.buildings().iter().map(|b| b.rect().x).collect();

        let report = ring.advance(0.01, 1000.0, &nowhere());

        assert!(report.recycled.is_empty());
        for (b, x) in ring.buildings().iter().zip(before) {
            assert_eq!(b.rect().x, x - 10.0);
        }
    }

    #[test]
    fn test_recycle_places_after_rightmost() {
        let config = GameConfig::default();
        let mut ring = BuildingRing::from_buildings(
            vec![building(100.0, 200.0, false), building(2600.0, 200.0, false)],
            &config,
            rng(),
        );

        // Shift of 500 pushes the first building's right edge to -200
        let report = ring.advance(0.5, 1000.0, &nowhere());

        assert_eq!(report.recycled.len(), 1);
        let recycled = report.recycled[0];
        assert_eq!(recycled.index, 0);
        assert_eq!(recycled.previous_max_right, 2800.0);
        assert_eq!(recycled.new_x, 3200.0);
        assert_eq!(ring.buildings()[0].rect().x, 3200.0);
    }

    #[test]
    fn test_recycle_exactly_at_left_edge() {
        let config = GameConfig::default();
        let mut ring = BuildingRing::from_buildings(
            vec![building(-190.0, 200.0, false), building(1000.0, 200.0, false)],
            &config,
            rng(),
        );

        let report = ring.advance(0.01, 1000.0, &nowhere());

        assert_eq!(report.recycled.len(), 1);
        assert_eq!(report.recycled[0].new_x, 1200.0 + 400.0);
    }

    #[test]
    fn test_same_frame_recycles_never_overlap() {
        let config = GameConfig::default();
        let mut ring = BuildingRing::from_buildings(
            vec![
                building(-150.0, 100.0, false),
                building(-120.0, 100.0, false),
                building(500.0, 100.0, false),
            ],
            &config,
            rng(),
        );

        let report = ring.advance(0.1, 1000.0, &nowhere());
        assert_eq!(report.recycled.len(), 2);

        let mut spans: Vec<(f32, f32)> = ring
            .buildings()
            .iter()
            .map(|b| (b.rect().left(), b.rect().right()))
            .collect();
        spans.sort_by(|a, b| a.0.total_cmp(&b.0));
        for pair in spans.windows(2) {
            assert!(pair[0].1 + config.gap <= pair[1].0, "overlap in {spans:?}");
        }
    }

    #[test]
    fn test_obstacle_rect_derived_from_building() {
        let b = building(100.0, 2400.0, true);
        let obstacle = b.obstacle().expect("obstacle");
        assert_eq!(obstacle, Rect::new(100.0 + 1168.0, 400.0 - 138.0, 64.0, 138.0));

        assert!(building(100.0, 2400.0, false).obstacle().is_none());
    }

    #[test]
    fn test_obstacle_hit_stops_processing() {
        let config = GameConfig::default();
        let mut ring = BuildingRing::from_buildings(
            vec![building(0.0, 2400.0, true), building(-500.0, 100.0, false)],
            &config,
            rng(),
        );
        let obstacle = ring.buildings()[0].obstacle().expect("obstacle");
        let player = Rect::new(obstacle.x - 10.0, obstacle.y + 10.0, 60.0, 41.0);

        let report = ring.advance(0.001, 1000.0, &player);

        assert_eq!(report.obstacle_hit, Some(0));
        assert!(report.recycled.is_empty());
        // Second building was not scrolled
        assert_eq!(ring.buildings()[1].rect().x, -500.0);
    }

    #[test]
    fn test_obstacle_chance_bounds() {
        let always = GameConfig {
            obstacle_chance: 1.0,
            ..GameConfig::default()
        };
        let never = GameConfig {
            obstacle_chance: 0.0,
            ..GameConfig::default()
        };

        for (config, expected) in [(always, true), (never, false)] {
            let mut ring = BuildingRing::from_buildings(
                vec![building(-500.0, 100.0, false), building(0.0, 100.0, false)],
                &config,
                rng(),
            );
            let report = ring.advance(0.0, 0.0, &nowhere());
            assert_eq!(report.recycled[0].has_obstacle, expected);
        }
    }

    #[test]
    fn test_obstacle_frequency_near_thirty_percent() {
        let config = GameConfig::default();
        let mut ring = BuildingRing::from_buildings(
            vec![building(0.0, 100.0, false)],
            &config,
            rng(),
        );

        let mut with_obstacle = 0;
        let rolls = 5000;
        for _ in 0..rolls {
            // Push it off-screen so it recycles every pass
            ring.buildings[0].rect.x = -1000.0;
            let report = ring.advance(0.0, 0.0, &nowhere());
            if report.recycled[0].has_obstacle {
                with_obstacle += 1;
            }
        }

        let ratio = with_obstacle as f64 / rolls as f64;
        assert!((ratio - 0.3).abs() < 0.03, "ratio {ratio}");
    }
}
