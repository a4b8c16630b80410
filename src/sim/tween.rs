//! Time-based scale tween
//!
//! Linear interpolation from full size to zero, reporting completion exactly
//! once. Used for the brick shrink before a brick leaves play.

use serde::{Deserialize, Serialize};

/// Slack for float accumulation over many fixed steps
const EPSILON_MS: f32 = 1e-3;

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ScaleTween {
    pub duration_ms: u32,
    pub elapsed_ms: f32,
    done: bool,
}

impl ScaleTween {
    pub fn new(duration_ms: u32) -> Self {
        Self {
            duration_ms,
            elapsed_ms: 0.0,
            done: false,
        }
    }

    /// Linear progress in [0, 1]
    pub fn progress(&self) -> f32 {
        if self.duration_ms == 0 {
            return 1.0;
        }
        (self.elapsed_ms / self.duration_ms as f32).clamp(0.0, 1.0)
    }

    /// Current scale factor (1 -> 0)
    pub fn scale(&self) -> f32 {
        1.0 - self.progress()
    }

    pub fn is_complete(&self) -> bool {
        self.done
    }

    /// Advance by `dt` seconds. Returns true on the step that completes the tween.
    pub fn advance(&mut self, dt: f32) -> bool {
        if self.done {
            return false;
        }
        self.elapsed_ms += dt * 1000.0;
        if self.elapsed_ms + EPSILON_MS >= self.duration_ms as f32 {
            self.elapsed_ms = self.duration_ms as f32;
            self.done = true;
            return true;
        }
        false
    }
}
