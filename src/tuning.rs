//! Data-driven game balance
//!
//! Every field defaults to the classic layout in [`crate::consts`], so a
//! partial JSON document only overrides what it names.

use glam::Vec2;
use serde::{Deserialize, Serialize};

use crate::consts::*;

/// Errors raised while loading or validating a [`Tuning`].
#[derive(Debug)]
pub enum TuningError {
    /// The document is not valid JSON for this schema
    Parse(String),
    /// A field holds a value the game cannot run with
    Invalid { field: &'static str, reason: String },
}

impl std::fmt::Display for TuningError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            TuningError::Parse(msg) => write!(f, "Invalid tuning document: {msg}"),
            TuningError::Invalid { field, reason } => {
                write!(f, "Invalid tuning value for `{field}`: {reason}")
            }
        }
    }
}

impl std::error::Error for TuningError {}

fn invalid(field: &'static str, reason: impl Into<String>) -> TuningError {
    TuningError::Invalid {
        field,
        reason: reason.into(),
    }
}

/// Brick wall layout. Positions are brick centres.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct BrickLayout {
    pub width: f32,
    pub height: f32,
    pub rows: u32,
    pub cols: u32,
    pub offset_top: f32,
    pub offset_left: f32,
    pub padding: f32,
}

impl Default for BrickLayout {
    fn default() -> Self {
        Self {
            width: BRICK_WIDTH,
            height: BRICK_HEIGHT,
            rows: BRICK_ROWS,
            cols: BRICK_COLS,
            offset_top: BRICK_OFFSET_TOP,
            offset_left: BRICK_OFFSET_LEFT,
            padding: BRICK_PADDING,
        }
    }
}

impl BrickLayout {
    /// Number of bricks in a fully populated grid
    pub fn count(&self) -> u32 {
        self.rows * self.cols
    }

    /// Centre of the brick at (row, col)
    pub fn center(&self, row: u32, col: u32) -> Vec2 {
        Vec2::new(
            col as f32 * (self.width + self.padding) + self.offset_left,
            row as f32 * (self.height + self.padding) + self.offset_top,
        )
    }

    pub fn size(&self) -> Vec2 {
        Vec2::new(self.width, self.height)
    }
}

/// Complete balance sheet for a session
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Tuning {
    pub world_width: f32,
    pub world_height: f32,
    pub ball_size: f32,
    pub paddle_width: f32,
    pub paddle_height: f32,
    /// Velocity given to the ball on start and after every lost life
    pub launch_velocity: Vec2,
    /// `vx = -deflection * (paddle.x - ball.x)` on paddle contact
    pub paddle_deflection: f32,
    pub score_per_brick: u64,
    pub starting_lives: u8,
    pub brick_kill_ms: u32,
    pub bricks: BrickLayout,
}

impl Default for Tuning {
    fn default() -> Self {
        Self {
            world_width: WORLD_WIDTH,
            world_height: WORLD_HEIGHT,
            ball_size: BALL_SIZE,
            paddle_width: PADDLE_WIDTH,
            paddle_height: PADDLE_HEIGHT,
            launch_velocity: Vec2::new(LAUNCH_VELOCITY.0, LAUNCH_VELOCITY.1),
            paddle_deflection: PADDLE_DEFLECTION,
            score_per_brick: SCORE_PER_BRICK,
            starting_lives: STARTING_LIVES,
            brick_kill_ms: BRICK_KILL_MS,
            bricks: BrickLayout::default(),
        }
    }
}

impl Tuning {
    /// Parse and validate a JSON tuning document
    pub fn from_json(json: &str) -> Result<Self, TuningError> {
        let tuning: Tuning =
            serde_json::from_str(json).map_err(|e| TuningError::Parse(e.to_string()))?;
        tuning.validate()?;
        Ok(tuning)
    }

    pub fn to_json(&self) -> Result<String, TuningError> {
        serde_json::to_string_pretty(self).map_err(|e| TuningError::Parse(e.to_string()))
    }

    /// Total score available from a full grid
    pub fn max_score(&self) -> u64 {
        self.score_per_brick * self.bricks.count() as u64
    }

    /// Ball rest position: horizontal centre, just above the bottom edge
    pub fn ball_reset_pos(&self) -> Vec2 {
        Vec2::new(self.world_width * 0.5, self.world_height - BALL_RESET_LIFT)
    }

    /// Paddle rest position (bottom-centre anchor)
    pub fn paddle_reset_pos(&self) -> Vec2 {
        Vec2::new(self.world_width * 0.5, self.world_height - PADDLE_RESET_LIFT)
    }

    /// Reject values the session cannot run with
    pub fn validate(&self) -> Result<(), TuningError> {
        if self.world_width <= 0.0 || self.world_height <= 0.0 {
            return Err(invalid("world", "dimensions must be positive"));
        }
        if self.ball_size <= 0.0 {
            return Err(invalid("ball_size", "must be positive"));
        }
        if self.paddle_width <= 0.0 || self.paddle_height <= 0.0 {
            return Err(invalid("paddle", "dimensions must be positive"));
        }
        if self.paddle_width > self.world_width {
            return Err(invalid("paddle_width", "wider than the world"));
        }
        if self.starting_lives == 0 {
            return Err(invalid("starting_lives", "must be at least 1"));
        }
        if self.score_per_brick == 0 {
            return Err(invalid("score_per_brick", "must be at least 1"));
        }
        if self.launch_velocity == Vec2::ZERO {
            return Err(invalid("launch_velocity", "ball would never move"));
        }

        let b = &self.bricks;
        if b.rows == 0 || b.cols == 0 {
            return Err(invalid("bricks", "grid needs at least one row and column"));
        }
        if b.width <= 0.0 || b.height <= 0.0 || b.padding < 0.0 {
            return Err(invalid("bricks", "brick size must be positive"));
        }
        let half = b.size() * 0.5;
        let first = b.center(0, 0) - half;
        let last = b.center(b.rows - 1, b.cols - 1) + half;
        if first.x < 0.0 || first.y < 0.0 {
            return Err(invalid("bricks", "grid starts outside the world"));
        }
        if last.x > self.world_width || last.y > self.world_height - BALL_RESET_LIFT - self.ball_size {
            return Err(invalid(
                "bricks",
                format!("grid extends to ({}, {}), outside the play area", last.x, last.y),
            ));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_is_valid() {
        let tuning = Tuning::default();
        assert!(tuning.validate().is_ok());
        assert_eq!(tuning.bricks.count(), 21);
        assert_eq!(tuning.max_score(), 210);
        assert_eq!(tuning.ball_reset_pos(), Vec2::new(400.0, 575.0));
        assert_eq!(tuning.paddle_reset_pos(), Vec2::new(400.0, 595.0));
    }

    #[test]
    fn test_brick_centers() {
        let layout = BrickLayout::default();
        assert_eq!(layout.center(0, 0), Vec2::new(60.0, 50.0));
        assert_eq!(layout.center(2, 6), Vec2::new(420.0, 110.0));
    }

    #[test]
    fn test_partial_json_keeps_defaults() {
        let tuning = Tuning::from_json(r#"{ "starting_lives": 5, "bricks": { "rows": 2 } }"#)
            .unwrap();
        assert_eq!(tuning.starting_lives, 5);
        assert_eq!(tuning.bricks.rows, 2);
        assert_eq!(tuning.bricks.cols, BRICK_COLS);
        assert_eq!(tuning.score_per_brick, SCORE_PER_BRICK);
    }

    #[test]
    fn test_json_roundtrip_default() {
        let json = Tuning::default().to_json().unwrap();
        assert_eq!(Tuning::from_json(&json).unwrap(), Tuning::default());
    }

    #[test]
    fn test_rejects_bad_values() {
        let err = Tuning::from_json(r#"{ "starting_lives": 0 }"#).unwrap_err();
        assert!(matches!(err, TuningError::Invalid { field: "starting_lives", .. }));

        let err = Tuning::from_json(r#"{ "bricks": { "cols": 0 } }"#).unwrap_err();
        assert!(matches!(err, TuningError::Invalid { field: "bricks", .. }));

        // 20 columns at 60px pitch cannot fit in 800px
        let err = Tuning::from_json(r#"{ "bricks": { "cols": 20 } }"#).unwrap_err();
        assert!(err.to_string().contains("outside the play area"));
    }

    #[test]
    fn test_rejects_malformed_json() {
        let err = Tuning::from_json("{ not json").unwrap_err();
        assert!(matches!(err, TuningError::Parse(_)));
    }
}
