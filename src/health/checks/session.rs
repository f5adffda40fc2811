//! Simulation smoke test

use rand::SeedableRng;
use rand::rngs::StdRng;

use crate::health::check::{CheckResult, CheckStatus, Findings, SystemCheck};
use crate::sim::{
    BuildingRing, Controls, GameConfig, GameState, MenuAction, Rect, RunEndCause, Session,
    SessionEvent, World,
};

const STEP: f32 = 1.0 / 60.0;
const RUN_FRAMES: usize = 600;
const FALL_LIMIT: usize = 1_000;

/// Plays a seeded session headlessly and checks the core invariants
pub struct SessionCheck {
    seed: u64,
}

impl SessionCheck {
    pub fn new() -> Self {
        Self { seed: 7 }
    }

    pub fn with_seed(seed: u64) -> Self {
        Self { seed }
    }

    fn config(&self) -> GameConfig {
        GameConfig::default().with_seed(self.seed)
    }

    /// Holds jump for ten seconds of frames, checking score and landings
    fn check_run(&self, findings: &mut Findings) {
        let config = GameConfig {
            obstacle_chance: 0.0,
            ..self.config()
        };
        let mut world = World::new(config);

        if !findings.require(
            world.tick_count() == 0 && world.session().state() == GameState::Menu,
            "World starts idle in the menu",
        ) {
            return;
        }

        world.session_mut().dispatch(MenuAction::StartGame);
        if !findings.require(
            world.session().state() == GameState::Playing,
            "StartGame enters Playing",
        ) {
            return;
        }

        let controls = Controls {
            jump: true,
            ..Controls::default()
        };
        let mut last_score = 0.0;
        let mut score_ok = true;
        let mut grounded_ok = true;
        let mut frames = 0;

        while frames < RUN_FRAMES && world.session().state() == GameState::Playing {
            world.tick(STEP, controls);
            frames += 1;

            let session = world.session();
            score_ok &= session.score() >= last_score;
            last_score = session.score();

            let player = session.player();
            if player.is_grounded() {
                let bottom = player.rect().bottom();
                grounded_ok &= player.vertical_velocity() == 0.0
                    && session
                        .buildings()
                        .buildings()
                        .iter()
                        .any(|b| (b.rect().top() - bottom).abs() < 1e-3);
            }
        }

        findings.note(format!(
            "Ran {frames} frames over {} ticks, score {:.1}",
            world.tick_count(),
            last_score
        ));
        findings.require(score_ok, "Score never decreases");
        findings.require(grounded_ok, "Grounded player rests on a building top");
    }

    /// Scrolls a ring past a distant player and checks every recycle position
    fn check_recycling(&self, findings: &mut Findings) {
        let config = self.config();
        let mut ring = BuildingRing::new(&config, StdRng::seed_from_u64(self.seed));
        let far_away = Rect::new(-10_000.0, -10_000.0, 1.0, 1.0);

        let mut recycles = Vec::new();
        for _ in 0..RUN_FRAMES {
            recycles.extend(ring.advance(STEP, config.scroll_speed, &far_away).recycled);
        }

        if recycles.is_empty() {
            findings.record(CheckStatus::Fail, "No building was recycled");
            return;
        }

        let gaps_ok = recycles
            .iter()
            .all(|r| (r.new_x - (r.previous_max_right + config.gap)).abs() < 1e-3);
        findings.require(
            gaps_ok,
            format!(
                "{} recycles placed one gap past the rightmost building",
                recycles.len()
            ),
        );
    }

    /// Removes every building and checks the run ends by falling
    fn check_fall_off(&self, findings: &mut Findings) {
        let config = self.config();
        let mut session = Session::new(config.clone());
        session.transition_to(GameState::Playing);
        session.set_buildings(BuildingRing::from_buildings(
            Vec::new(),
            &config,
            StdRng::seed_from_u64(self.seed),
        ));

        let mut steps = 0;
        while session.state() == GameState::Playing && steps < FALL_LIMIT {
            session.update(STEP, Controls::default());
            steps += 1;
        }

        let fell = session.drain_events().iter().any(|e| {
            matches!(
                e,
                SessionEvent::RunEnded {
                    cause: RunEndCause::FellOff,
                    ..
                }
            )
        });
        findings.require(
            fell && session.state() == GameState::GameOver,
            format!("Falling off the field ends the run after {steps} steps"),
        );
    }
}

impl Default for SessionCheck {
    fn default() -> Self {
        Self::new()
    }
}

impl SystemCheck for SessionCheck {
    fn name(&self) -> &'static str {
        "Session/Simulation"
    }

    fn description(&self) -> Option<&'static str> {
        Some("Runs a seeded session and checks scoring, landing, recycling and game over")
    }

    fn check(&self) -> CheckResult {
        let mut findings = Findings::new();
        findings.note(format!("Seed: {}", self.seed));

        self.check_run(&mut findings);
        self.check_recycling(&mut findings);
        self.check_fall_off(&mut findings);

        findings.finish(
            "Simulation invariants hold",
            "Simulation ran with warnings",
            "Simulation invariant violated",
        )
    }
}
