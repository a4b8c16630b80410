//! Minimal arcade-physics stand-in
//!
//! Just enough of the arcade contract to drive a session without an engine:
//! velocity integration, world-bounds containment with an open bottom edge,
//! and AABB separation against the immovable paddle and bricks. Collisions
//! come back as [`GameEvent`]s for [`super::handle_event`].

use glam::Vec2;

use super::event::GameEvent;
use super::state::{Ball, GameSession};
use crate::Aabb;

#[derive(Debug, Clone)]
pub struct ArcadeWorld {
    /// Fraction of speed kept along the bounce normal
    pub bounce: f32,
    /// Out-of-bounds already reported for the current excursion
    out_reported: bool,
}

impl Default for ArcadeWorld {
    fn default() -> Self {
        Self::new()
    }
}

impl ArcadeWorld {
    pub fn new() -> Self {
        Self {
            bounce: 1.0,
            out_reported: false,
        }
    }

    /// Integrate one step and report collisions in engine order:
    /// paddle first, then bricks by id, then the bottom edge.
    pub fn step(&mut self, session: &mut GameSession, dt: f32) -> Vec<GameEvent> {
        let mut events = Vec::new();
        if session.phase.is_terminal() {
            return events;
        }

        let world = Vec2::new(session.tuning.world_width, session.tuning.world_height);
        let ball = &mut session.ball;
        ball.pos += ball.vel * dt;
        contain(ball, world, self.bounce);

        if separate(ball, session.paddle.aabb(), self.bounce).is_some() {
            events.push(GameEvent::PaddleHit);
        }

        for brick in session.grid.collidable() {
            if separate(ball, brick.aabb(), self.bounce).is_some() {
                events.push(GameEvent::BrickHit(brick.id));
            }
        }

        if ball.aabb().min().y > world.y {
            if !self.out_reported {
                self.out_reported = true;
                events.push(GameEvent::BallOutOfBounds);
            }
        } else {
            self.out_reported = false;
        }

        events
    }
}

/// Keep the ball inside the left, right and top edges
fn contain(ball: &mut Ball, world: Vec2, bounce: f32) {
    let half = ball.size * 0.5;
    if ball.pos.x - half < 0.0 {
        ball.pos.x = half;
        ball.vel.x = ball.vel.x.abs() * bounce;
    } else if ball.pos.x + half > world.x {
        ball.pos.x = world.x - half;
        ball.vel.x = -ball.vel.x.abs() * bounce;
    }
    if ball.pos.y - half < 0.0 {
        ball.pos.y = half;
        ball.vel.y = ball.vel.y.abs() * bounce;
    }
}

/// Push the ball out of an immovable body along the axis of least
/// penetration. Returns the contact normal (pointing at the ball).
fn separate(ball: &mut Ball, body: Aabb, bounce: f32) -> Option<Vec2> {
    let ball_box = ball.aabb();
    if !ball_box.overlaps(&body) {
        return None;
    }
    let pen = ball_box.penetration(&body);
    let delta = ball_box.center - body.center;

    if pen.x < pen.y {
        let sign = if delta.x < 0.0 { -1.0 } else { 1.0 };
        ball.pos.x += sign * pen.x;
        ball.vel.x = sign * ball.vel.x.abs() * bounce;
        Some(Vec2::new(sign, 0.0))
    } else {
        let sign = if delta.y < 0.0 { -1.0 } else { 1.0 };
        ball.pos.y += sign * pen.y;
        ball.vel.y = sign * ball.vel.y.abs() * bounce;
        Some(Vec2::new(0.0, sign))
    }
}
