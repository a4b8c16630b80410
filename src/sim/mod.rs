//! Deterministic gameplay module
//!
//! All gameplay rules live here. This module must stay engine-free:
//! - Fixed timestep only
//! - Seeded RNG only (autopilot)
//! - Stable iteration order (by brick id)
//! - No rendering or platform dependencies

pub mod arcade;
pub mod autopilot;
pub mod event;
pub mod grid;
pub mod state;
pub mod tick;
pub mod tween;

pub use arcade::ArcadeWorld;
pub use autopilot::Autopilot;
pub use event::{Command, GameEvent, Outcome};
pub use grid::{Brick, BrickGrid, BrickId, BrickLife, HitOutcome};
pub use state::{Ball, GamePhase, GameSession, Paddle};
pub use tick::{TickInput, handle_event, tick};
pub use tween::ScaleTween;
