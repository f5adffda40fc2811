//! One play-through: game state, score, background scroll and the entities
//!
//! The session owns the player and the building ring and is the only place
//! where game-state transitions happen. Side effects the core cannot perform
//! itself (sounds, quitting) are queued as [`SessionEvent`]s for the caller.

use rand::SeedableRng;
use rand::rngs::StdRng;
use serde::{Deserialize, Serialize};
use tracing::{debug, info};

use super::building::BuildingRing;
use super::config::GameConfig;
use super::player::{Player, PlayerStatus};
use super::snapshot::{BuildingView, FrameSnapshot, PlayerView, SpriteId};

/// Top-level game state
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum GameState {
    Menu,
    Playing,
    GameOver,
}

/// Actions raised by menu and game-over widgets
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MenuAction {
    StartGame,
    ToggleSound,
    ReturnToMenu,
    Exit,
}

/// Why a run ended
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RunEndCause {
    FellOff,
    HitObstacle,
}

/// Sounds the audio collaborator should play; only emitted while sound is enabled
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SoundCue {
    Jump,
    MusicStart,
    MusicStop,
}

/// Side effects produced by the session
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum SessionEvent {
    StateChanged { from: GameState, to: GameState },
    RunEnded { cause: RunEndCause, score: f64 },
    Sound(SoundCue),
    ExitRequested,
}

/// Input sampled once per frame
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Controls {
    pub jump: bool,
    pub sprint: bool,
    /// Back/quit, edge-triggered
    pub back: bool,
}

impl Controls {
    /// Combines two samples, keeping any input that was active in either
    pub fn merge(self, other: Controls) -> Controls {
        Controls {
            jump: self.jump || other.jump,
            sprint: self.sprint || other.sprint,
            back: self.back || other.back,
        }
    }

    /// The held inputs only, with edge-triggered input cleared
    pub fn held(self) -> Controls {
        Controls {
            back: false,
            ..self
        }
    }
}

/// Mutable state of the game across runs
pub struct Session {
    config: GameConfig,
    state: GameState,
    score: f64,
    background_offset: f32,
    sound_enabled: bool,
    player: Player,
    buildings: BuildingRing,
    rng_seed: u64,
    runs_started: u32,
    events: Vec<SessionEvent>,
}

impl Session {
    /// Creates a session in the menu, with the first layout already built
    pub fn new(config: GameConfig) -> Self {
        let rng_seed = config.seed.unwrap_or_else(rand::random);
        let rng = StdRng::seed_from_u64(rng_seed);
        info!(seed = rng_seed, "Creating session");

        Self {
            player: Player::new(&config),
            buildings: BuildingRing::new(&config, rng),
            config,
            state: GameState::Menu,
            score: 0.0,
            background_offset: 0.0,
            sound_enabled: true,
            rng_seed,
            runs_started: 0,
            events: Vec::new(),
        }
    }

    /// Moves to `state`; entering `Playing` starts a fresh run
    pub fn transition_to(&mut self, state: GameState) {
        if self.state == state {
            return;
        }

        let from = self.state;
        if state == GameState::Playing {
            self.start_run();
        }
        self.state = state;

        info!(?from, to = ?state, "Game state changed");
        self.events.push(SessionEvent::StateChanged { from, to: state });
    }

    /// Resets score, scroll and entities; buildings continue the seeded sequence
    fn start_run(&mut self) {
        self.score = 0.0;
        self.background_offset = 0.0;
        self.player = Player::new(&self.config);
        let rng = StdRng::seed_from_u64(self.rng_seed.wrapping_add(self.runs_started as u64));
        self.buildings = BuildingRing::new(&self.config, rng);
        self.runs_started += 1;
    }

    fn end_run(&mut self, cause: RunEndCause) {
        info!(?cause, score = self.score, "Run ended");
        self.events.push(SessionEvent::RunEnded {
            cause,
            score: self.score,
        });
        self.transition_to(GameState::GameOver);
    }

    /// Applies a menu or game-over widget action
    pub fn dispatch(&mut self, action: MenuAction) {
        debug!(?action, "Menu action");
        match action {
            MenuAction::StartGame => self.transition_to(GameState::Playing),
            MenuAction::ToggleSound => self.set_sound_enabled(!self.sound_enabled),
            MenuAction::ReturnToMenu => self.transition_to(GameState::Menu),
            MenuAction::Exit => self.events.push(SessionEvent::ExitRequested),
        }
    }

    /// Enables or disables sound, queueing the matching music cue
    pub fn set_sound_enabled(&mut self, enabled: bool) {
        if self.sound_enabled == enabled {
            return;
        }
        self.sound_enabled = enabled;
        info!(enabled, "Sound toggled");

        // Stop is queued even though sound is now off: it is what turns it off
        let cue = if enabled {
            SoundCue::MusicStart
        } else {
            SoundCue::MusicStop
        };
        self.events.push(SessionEvent::Sound(cue));
    }

    /// Current horizontal scroll speed
    pub fn scroll_speed(&self, sprint: bool) -> f32 {
        if sprint {
            self.config.scroll_speed * self.config.sprint_multiplier
        } else {
            self.config.scroll_speed
        }
    }

    /// Runs one update pass
    ///
    /// `dt` is sanitised first: non-finite or negative values count as zero and
    /// large values are capped at `max_frame_delta`.
    pub fn update(&mut self, dt: f32, controls: Controls) {
        let dt = self.config.clamp_delta(dt);

        match self.state {
            GameState::Menu => {
                if controls.back {
                    self.events.push(SessionEvent::ExitRequested);
                }
                return;
            }
            GameState::GameOver => {
                if controls.back {
                    self.transition_to(GameState::Menu);
                }
                return;
            }
            GameState::Playing => {}
        }

        if controls.back {
            self.transition_to(GameState::Menu);
            return;
        }

        let scroll = self.scroll_speed(controls.sprint);

        self.background_offset -= dt * scroll / self.config.background_scroll_divisor;
        if self.background_offset <= -self.config.background_width {
            self.background_offset = 0.0;
        }
        self.score += f64::from(dt) * f64::from(scroll) / f64::from(self.config.score_divisor);

        if controls.jump && self.player.jump(self.config.jump_strength) && self.sound_enabled {
            self.events.push(SessionEvent::Sound(SoundCue::Jump));
        }

        if self.player.update(dt, self.buildings.buildings(), &self.config) == PlayerStatus::FellOut
        {
            self.end_run(RunEndCause::FellOff);
            return;
        }

        let report = self.buildings.advance(dt, scroll, &self.player.rect());
        if let Some(index) = report.obstacle_hit {
            debug!(index, "Obstacle hit");
            self.end_run(RunEndCause::HitObstacle);
        }
    }

    /// Takes all queued events
    pub fn drain_events(&mut self) -> Vec<SessionEvent> {
        std::mem::take(&mut self.events)
    }

    /// Read-only view of the current frame
    pub fn snapshot(&self) -> FrameSnapshot {
        let buildings = self
            .buildings
            .buildings()
            .iter()
            .map(|b| BuildingView {
                rect: b.rect(),
                sprite: SpriteId::Building,
                obstacle: b.obstacle().map(|rect| (rect, SpriteId::Barrel)),
            })
            .collect();

        FrameSnapshot {
            state: self.state,
            score: self.score,
            sound_enabled: self.sound_enabled,
            field: [self.config.field_width, self.config.field_height],
            background_offset: self.background_offset,
            background_width: self.config.background_width,
            buildings,
            player: PlayerView {
                rect: self.player.rect(),
                sprite: self.player.sprite(),
                animation: self.player.animation(),
                grounded: self.player.is_grounded(),
                vertical_velocity: self.player.vertical_velocity(),
            },
        }
    }

    pub fn state(&self) -> GameState {
        self.state
    }

    pub fn score(&self) -> f64 {
        self.score
    }

    pub fn background_offset(&self) -> f32 {
        self.background_offset
    }

    pub fn sound_enabled(&self) -> bool {
        self.sound_enabled
    }

    pub fn player(&self) -> &Player {
        &self.player
    }

    /// Replaces the player, e.g. to stage a scenario
    pub fn set_player(&mut self, player: Player) {
        self.player = player;
    }

    pub fn buildings(&self) -> &BuildingRing {
        &self.buildings
    }

    /// Replaces the building ring, e.g. to stage a scenario
    pub fn set_buildings(&mut self, buildings: BuildingRing) {
        self.buildings = buildings;
    }

    pub fn config(&self) -> &GameConfig {
        &self.config
    }

    pub fn rng_seed(&self) -> u64 {
        self.rng_seed
    }

    pub fn runs_started(&self) -> u32 {
        self.runs_started
    }
}
