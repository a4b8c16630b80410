//! Brick Breaker entry point
//!
//! Native build runs a headless demo: the autopilot plays a few games on
//! the arcade stand-in and the outcome of each is logged. Set `RUST_LOG` for
//! detail and `BRICK_TUNING` to a JSON file to override the balance sheet.

use anyhow::{Context, Result};

use brick_breaker::consts::*;
use brick_breaker::sim::{
    ArcadeWorld, Autopilot, Command, GamePhase, GameSession, Outcome, handle_event, tick,
};
use brick_breaker::{Hud, Tuning};

/// Games to play before exiting
const DEMO_GAMES: u32 = 3;
/// Give up on a game after ten simulated minutes
const MAX_GAME_TICKS: u64 = 10 * 60 * 60;
/// Frame time fed to the accumulator (a 30 fps host)
const FRAME_DT: f32 = 1.0 / 30.0;
const DEMO_SEED: u64 = 12345;

/// Game instance holding all state
struct Game {
    session: GameSession,
    world: ArcadeWorld,
    pilot: Autopilot,
    hud: Hud,
    accumulator: f32,
    /// Outcome reported by the last `EndGame`, cleared on restart
    outcome: Option<Outcome>,
}

impl Game {
    fn new(tuning: Tuning, seed: u64) -> Self {
        let hud = Hud::new(&tuning);
        Self {
            session: GameSession::new(tuning),
            world: ArcadeWorld::new(),
            pilot: Autopilot::new(seed),
            hud,
            accumulator: 0.0,
            outcome: None,
        }
    }

    /// Run simulation ticks for one host frame
    fn update(&mut self, dt: f32) {
        let dt = dt.min(0.1);
        self.accumulator += dt;

        let mut substeps = 0;
        while self.accumulator >= SIM_DT && substeps < MAX_SUBSTEPS {
            self.step();
            self.accumulator -= SIM_DT;
            substeps += 1;
            if self.outcome.is_some() {
                break;
            }
        }
    }

    fn step(&mut self) {
        let (input, press) = self.pilot.next_input(&self.session);
        if let Some(event) = press {
            handle_event(&mut self.session, event);
        }
        tick(&mut self.session, &input, SIM_DT);

        for event in self.world.step(&mut self.session, SIM_DT) {
            self.pilot.observe(&event);
            handle_event(&mut self.session, event);
        }

        for command in self.session.drain_commands() {
            self.hud.apply(&command);
            if let Command::EndGame { outcome, message } = &command {
                log::info!("{}", message);
                self.outcome = Some(*outcome);
            }
        }
    }

    /// Reload the initial state, like a page reload after the end-of-game alert
    fn restart(&mut self) {
        self.session.restart();
        self.world = ArcadeWorld::new();
        self.hud = Hud::new(&self.session.tuning);
        self.accumulator = 0.0;
        self.outcome = None;
    }
}

fn load_tuning() -> Result<Tuning> {
    let Ok(path) = std::env::var("BRICK_TUNING") else {
        return Ok(Tuning::default());
    };
    let json = std::fs::read_to_string(&path)
        .with_context(|| format!("reading tuning file {path}"))?;
    let tuning = Tuning::from_json(&json).with_context(|| format!("loading tuning file {path}"))?;
    log::info!("Loaded tuning from {}", path);
    Ok(tuning)
}

fn main() -> Result<()> {
    env_logger::init();
    log::info!("Brick Breaker (headless demo) starting...");

    let tuning = load_tuning()?;
    let mut game = Game::new(tuning, DEMO_SEED);

    for round in 1..=DEMO_GAMES {
        let mut frames = 0u64;
        while game.outcome.is_none() && game.session.time_ticks < MAX_GAME_TICKS {
            game.update(FRAME_DT);
            frames += 1;
        }

        let session = &game.session;
        let result = match game.outcome {
            Some(outcome) => format!("{:?}", outcome),
            None if session.phase == GamePhase::Playing => "Timed out".to_string(),
            None => format!("Stopped in {:?}", session.phase),
        };
        println!(
            "Game {}: {} | {} | {} | {} bricks | {} frames",
            round,
            result,
            game.hud.score.text,
            game.hud.lives.text,
            session.bricks_destroyed(),
            frames
        );

        game.restart();
    }

    Ok(())
}
