//! Brick Breaker - A single-screen brick-breaking arcade game
//!
//! Core modules:
//! - `sim`: Deterministic gameplay rules (session state machine, brick grid, events)
//! - `hud`: Text overlays derived from session state
//! - `tuning`: Data-driven game balance
//!
//! Rendering, asset loading and real input polling belong to whatever engine
//! drives a [`sim::GameSession`]. The session only consumes [`sim::GameEvent`]s
//! and emits [`sim::Command`]s.

pub mod hud;
pub mod sim;
pub mod tuning;

pub use hud::Hud;
pub use tuning::{BrickLayout, Tuning, TuningError};

use glam::Vec2;

/// Game configuration constants
pub mod consts {
    /// Fixed simulation timestep (60 Hz, matches the browser frame loop)
    pub const SIM_DT: f32 = 1.0 / 60.0;
    /// Maximum substeps per frame to prevent spiral of death
    pub const MAX_SUBSTEPS: u32 = 8;

    /// World (canvas) dimensions in logical pixels
    pub const WORLD_WIDTH: f32 = 800.0;
    pub const WORLD_HEIGHT: f32 = 600.0;
    /// Canvas clear colour (#eee)
    pub const BACKGROUND_RGB: [u8; 3] = [0xee, 0xee, 0xee];

    /// Ball defaults (wobble frames are 20x20)
    pub const BALL_SIZE: f32 = 20.0;
    /// Distance of the ball's centre above the bottom edge on reset
    pub const BALL_RESET_LIFT: f32 = 25.0;
    /// Launch and relaunch velocity (pixels/s)
    pub const LAUNCH_VELOCITY: (f32, f32) = (150.0, -150.0);

    /// Paddle defaults - anchored at horizontal centre / bottom edge
    pub const PADDLE_WIDTH: f32 = 104.0;
    pub const PADDLE_HEIGHT: f32 = 10.0;
    /// Distance of the paddle's bottom edge above the world bottom on reset
    pub const PADDLE_RESET_LIFT: f32 = 5.0;
    /// Horizontal deflection per pixel of paddle/ball centre offset
    pub const PADDLE_DEFLECTION: f32 = 5.0;

    /// Brick grid layout
    pub const BRICK_WIDTH: f32 = 50.0;
    pub const BRICK_HEIGHT: f32 = 20.0;
    pub const BRICK_ROWS: u32 = 3;
    pub const BRICK_COLS: u32 = 7;
    pub const BRICK_OFFSET_TOP: f32 = 50.0;
    pub const BRICK_OFFSET_LEFT: f32 = 60.0;
    pub const BRICK_PADDING: f32 = 10.0;
    /// Brick shrink-to-zero duration before it leaves play
    pub const BRICK_KILL_MS: u32 = 200;

    /// Scoring / lives
    pub const SCORE_PER_BRICK: u64 = 10;
    pub const STARTING_LIVES: u8 = 3;

    /// Ball wobble animation (played on paddle contact)
    pub const WOBBLE_FRAMES: [u8; 9] = [0, 1, 0, 2, 0, 1, 0, 2, 0];
    pub const WOBBLE_FPS: u32 = 24;

    /// Start control sprite-sheet frames and size
    pub const BUTTON_FRAME_OVER: u8 = 1;
    pub const BUTTON_FRAME_OUT: u8 = 0;
    pub const BUTTON_FRAME_DOWN: u8 = 2;
    pub const BUTTON_SIZE: (f32, f32) = (120.0, 40.0);

    /// Asset keys an engine adapter is expected to load
    pub const ASSET_BALL: &str = "ball";
    pub const ASSET_PADDLE: &str = "paddle";
    pub const ASSET_BRICK: &str = "brick";
    pub const ASSET_BUTTON: &str = "button";
}

/// Axis-aligned rectangle given by its centre and half extents
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Aabb {
    pub center: Vec2,
    pub half: Vec2,
}

impl Aabb {
    #[inline]
    pub fn new(center: Vec2, size: Vec2) -> Self {
        Self {
            center,
            half: size * 0.5,
        }
    }

    #[inline]
    pub fn min(&self) -> Vec2 {
        self.center - self.half
    }

    #[inline]
    pub fn max(&self) -> Vec2 {
        self.center + self.half
    }

    /// Strict overlap test (touching edges do not count)
    pub fn overlaps(&self, other: &Aabb) -> bool {
        let d = (self.center - other.center).abs();
        let reach = self.half + other.half;
        d.x < reach.x && d.y < reach.y
    }

    /// Penetration along each axis (positive when overlapping)
    pub fn penetration(&self, other: &Aabb) -> Vec2 {
        (self.half + other.half) - (self.center - other.center).abs()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_aabb_touching_is_not_overlap() {
        let a = Aabb::new(Vec2::new(0.0, 0.0), Vec2::new(10.0, 10.0));
        let b = Aabb::new(Vec2::new(10.0, 0.0), Vec2::new(10.0, 10.0));
        assert!(!a.overlaps(&b));

        let c = Aabb::new(Vec2::new(9.0, 0.0), Vec2::new(10.0, 10.0));
        assert!(a.overlaps(&c));
        assert_eq!(a.penetration(&c), Vec2::new(1.0, 10.0));
    }
}
