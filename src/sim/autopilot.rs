//! Demo autopilot
//!
//! Plays the game by steering the pointer under the ball. A seeded aim
//! error, re-rolled on every paddle contact, keeps returns angled and makes
//! the autopilot miss now and then. Same seed, same game.

use rand::{Rng, SeedableRng};
use rand_pcg::Pcg32;

use super::event::GameEvent;
use super::state::{GamePhase, GameSession};
use super::tick::TickInput;

/// Ticks to wait on the start screen / life-lost prompt before pressing
const PRESS_DELAY_TICKS: u32 = 30;

#[derive(Debug, Clone)]
pub struct Autopilot {
    rng: Pcg32,
    /// Max horizontal aim error in pixels
    pub spread: f32,
    aim_offset: f32,
    wait_ticks: u32,
}

impl Autopilot {
    pub fn new(seed: u64) -> Self {
        Self {
            rng: Pcg32::seed_from_u64(seed),
            spread: 40.0,
            aim_offset: 0.0,
            wait_ticks: 0,
        }
    }

    /// Pointer position for this tick, plus a press when one is due
    pub fn next_input(&mut self, session: &GameSession) -> (TickInput, Option<GameEvent>) {
        let press = match session.phase {
            GamePhase::Idle => self.press_after_delay(GameEvent::StartPressed),
            GamePhase::LifeLost => self.press_after_delay(GameEvent::ResumePressed),
            _ => {
                self.wait_ticks = 0;
                None
            }
        };

        let input = TickInput {
            pointer_x: Some(session.ball.pos.x + self.aim_offset),
        };
        (input, press)
    }

    /// Feed back events so the aim error can be re-rolled on contact
    pub fn observe(&mut self, event: &GameEvent) {
        if *event == GameEvent::PaddleHit {
            self.aim_offset = self.rng.random_range(-self.spread..=self.spread);
        }
    }

    fn press_after_delay(&mut self, event: GameEvent) -> Option<GameEvent> {
        self.wait_ticks += 1;
        if self.wait_ticks >= PRESS_DELAY_TICKS {
            self.wait_ticks = 0;
            Some(event)
        } else {
            None
        }
    }
}
