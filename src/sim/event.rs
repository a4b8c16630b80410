//! Events the session consumes and commands it emits
//!
//! An engine adapter translates its collision callbacks, out-of-bounds
//! signals and input presses into [`GameEvent`]s, feeds them to
//! [`super::handle_event`], then applies the queued [`Command`]s to its
//! sprites and text objects.

use glam::Vec2;
use serde::{Deserialize, Serialize};

use super::grid::BrickId;

/// Something that happened in the engine this tick
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum GameEvent {
    /// Start control activated
    StartPressed,
    /// Any pointer press; consumed by the one-shot resume after a lost life
    ResumePressed,
    /// Ball collided with the paddle
    PaddleHit,
    /// Ball collided with a brick
    BrickHit(BrickId),
    /// Ball crossed the open bottom edge
    BallOutOfBounds,
}

/// Terminal result of a session
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Outcome {
    Won,
    Lost,
}

impl Outcome {
    pub fn message(&self) -> &'static str {
        match self {
            Outcome::Won => "You won the game, congratulations!",
            Outcome::Lost => "You lost, game over!",
        }
    }
}

/// Instruction for the engine
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum Command {
    /// Remove the start control for good
    DestroyStartButton,
    SetBallVelocity(Vec2),
    /// Move the ball to a position and stop it
    ResetBall(Vec2),
    /// Move the paddle (bottom-centre anchor) to a position
    ResetPaddle(Vec2),
    MovePaddle(f32),
    /// Play the ball wobble animation
    PlayWobble { frames: Vec<u8>, fps: u32 },
    /// Begin shrinking a brick to zero scale
    StartBrickKill { id: BrickId, duration_ms: u32 },
    /// Shrink finished; remove the brick from play
    KillBrick(BrickId),
    SetScoreText(String),
    SetLivesText(String),
    ShowLifeLost(bool),
    /// Show the blocking end-of-game message
    EndGame { outcome: Outcome, message: String },
    /// Reload the session from its initial state
    Restart,
}
