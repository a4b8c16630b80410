//! Session state and core gameplay types
//!
//! A [`GameSession`] is plain owned data: no globals, no engine handles.
//! Several sessions can live side by side.

use glam::Vec2;
use serde::{Deserialize, Serialize};

use super::event::Command;
use super::grid::BrickGrid;
use crate::Aabb;
use crate::tuning::Tuning;

/// Current phase of gameplay
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum GamePhase {
    /// Start control visible, ball at rest
    Idle,
    /// Ball moving, paddle follows input
    Playing,
    /// Ball and paddle reset, waiting for a press to relaunch
    LifeLost,
    /// Every brick destroyed
    Won,
    /// Out of lives
    Lost,
}

impl GamePhase {
    pub fn is_terminal(&self) -> bool {
        matches!(self, GamePhase::Won | GamePhase::Lost)
    }
}

/// The ball. Bounce is perfectly elastic; only the bottom edge is open.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Ball {
    /// Centre position
    pub pos: Vec2,
    pub vel: Vec2,
    pub size: f32,
}

impl Ball {
    pub fn new(pos: Vec2, size: f32) -> Self {
        Self {
            pos,
            vel: Vec2::ZERO,
            size,
        }
    }

    pub fn aabb(&self) -> Aabb {
        Aabb::new(self.pos, Vec2::splat(self.size))
    }

    /// Reposition without recreating; the ball stops
    pub fn reset(&mut self, pos: Vec2) {
        self.pos = pos;
        self.vel = Vec2::ZERO;
    }

    pub fn is_moving(&self) -> bool {
        self.vel != Vec2::ZERO
    }
}

/// The player's paddle. Immovable for physics; `pos` is the bottom-centre anchor.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Paddle {
    pub pos: Vec2,
    pub width: f32,
    pub height: f32,
}

impl Paddle {
    pub fn new(pos: Vec2, width: f32, height: f32) -> Self {
        Self { pos, width, height }
    }

    pub fn aabb(&self) -> Aabb {
        Aabb::new(
            Vec2::new(self.pos.x, self.pos.y - self.height * 0.5),
            Vec2::new(self.width, self.height),
        )
    }

    pub fn reset(&mut self, pos: Vec2) {
        self.pos = pos;
    }

    /// Follow a pointer, keeping the paddle body inside the world
    pub fn follow(&mut self, target_x: f32, world_width: f32) {
        let half = self.width * 0.5;
        self.pos.x = target_x.clamp(half, (world_width - half).max(half));
    }
}

/// Complete session state
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GameSession {
    pub tuning: Tuning,
    pub phase: GamePhase,
    /// True from start until a terminal state
    pub playing: bool,
    pub score: u64,
    pub lives: u8,
    pub ball: Ball,
    pub paddle: Paddle,
    pub grid: BrickGrid,
    /// Start control still on screen
    pub start_visible: bool,
    /// One-shot resume subscription is armed
    pub resume_armed: bool,
    pub life_lost_visible: bool,
    /// Simulation tick counter
    pub time_ticks: u64,
    /// Commands queued for the engine since the last drain
    #[serde(skip)]
    commands: Vec<Command>,
}

impl Default for GameSession {
    fn default() -> Self {
        Self::new(Tuning::default())
    }
}

impl GameSession {
    /// Create a session in `Idle` with a fully populated grid.
    ///
    /// `tuning` is expected to have passed [`Tuning::validate`].
    pub fn new(tuning: Tuning) -> Self {
        let ball = Ball::new(tuning.ball_reset_pos(), tuning.ball_size);
        let paddle = Paddle::new(
            tuning.paddle_reset_pos(),
            tuning.paddle_width,
            tuning.paddle_height,
        );
        let grid = BrickGrid::new(tuning.bricks.clone());
        Self {
            phase: GamePhase::Idle,
            playing: false,
            score: 0,
            lives: tuning.starting_lives,
            ball,
            paddle,
            grid,
            start_visible: true,
            resume_armed: false,
            life_lost_visible: false,
            time_ticks: 0,
            commands: Vec::new(),
            tuning,
        }
    }

    /// Reload the initial state with the same tuning
    pub fn restart(&mut self) {
        log::info!("Session restart");
        *self = Self::new(self.tuning.clone());
    }

    pub fn push(&mut self, command: Command) {
        self.commands.push(command);
    }

    /// Queued commands, oldest first
    pub fn commands(&self) -> &[Command] {
        &self.commands
    }

    pub fn drain_commands(&mut self) -> Vec<Command> {
        std::mem::take(&mut self.commands)
    }

    /// Bricks destroyed (scored) so far
    pub fn bricks_destroyed(&self) -> usize {
        self.grid.total() - self.grid.unscored()
    }

    /// Whether the paddle tracks input this tick
    pub fn paddle_active(&self) -> bool {
        self.playing && self.phase == GamePhase::Playing
    }
}
