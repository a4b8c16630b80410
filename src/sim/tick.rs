//! Event dispatch and fixed timestep tick
//!
//! `handle_event` is the whole state machine: every collision, out-of-bounds
//! signal and press goes through it. `tick` covers what happens every frame
//! regardless of events (paddle tracking, kill tween progress).

use glam::Vec2;

use super::event::{Command, GameEvent, Outcome};
use super::grid::{BrickId, HitOutcome};
use super::state::{GamePhase, GameSession};
use crate::consts::{WOBBLE_FPS, WOBBLE_FRAMES};
use crate::hud;

/// Input sampled for a single tick
#[derive(Debug, Clone, Default)]
pub struct TickInput {
    /// Current pointer/touch X, if the pointer is over the canvas
    pub pointer_x: Option<f32>,
}

/// Advance per-frame state by one fixed timestep
pub fn tick(session: &mut GameSession, input: &TickInput, dt: f32) {
    session.time_ticks += 1;

    if session.paddle_active() {
        let target = input
            .pointer_x
            .unwrap_or(session.tuning.world_width * 0.5);
        let before = session.paddle.pos.x;
        session.paddle.follow(target, session.tuning.world_width);
        if session.paddle.pos.x != before {
            let x = session.paddle.pos.x;
            session.push(Command::MovePaddle(x));
        }
    }

    for id in session.grid.advance(dt) {
        log::debug!("Brick {:?} removed from play", id);
        session.push(Command::KillBrick(id));
    }
}

/// Apply one engine event to the session
pub fn handle_event(session: &mut GameSession, event: GameEvent) {
    if session.phase.is_terminal() {
        log::debug!("Ignoring {:?} after {:?}", event, session.phase);
        return;
    }

    match event {
        GameEvent::StartPressed => start(session),
        GameEvent::ResumePressed => resume(session),
        GameEvent::PaddleHit => paddle_hit(session),
        GameEvent::BrickHit(id) => brick_hit(session, id),
        GameEvent::BallOutOfBounds => ball_lost(session),
    }
}

fn start(session: &mut GameSession) {
    if session.phase != GamePhase::Idle {
        log::warn!("Start pressed while {:?}", session.phase);
        return;
    }
    session.start_visible = false;
    session.push(Command::DestroyStartButton);
    launch(session);
    session.playing = true;
    session.phase = GamePhase::Playing;
    log::info!("Game started");
}

fn resume(session: &mut GameSession) {
    // Presses outside the life-lost pause are routine; only the armed one matters
    if session.phase != GamePhase::LifeLost || !session.resume_armed {
        return;
    }
    session.resume_armed = false;
    session.life_lost_visible = false;
    session.push(Command::ShowLifeLost(false));
    launch(session);
    session.phase = GamePhase::Playing;
    log::info!("Resumed with {} lives", session.lives);
}

fn launch(session: &mut GameSession) {
    let vel = session.tuning.launch_velocity;
    session.ball.vel = vel;
    session.push(Command::SetBallVelocity(vel));
}

/// Angled return based on where the paddle struck the ball
fn paddle_hit(session: &mut GameSession) {
    let offset = session.paddle.pos.x - session.ball.pos.x;
    let vx = -session.tuning.paddle_deflection * offset;
    session.ball.vel.x = vx;
    session.push(Command::PlayWobble {
        frames: WOBBLE_FRAMES.to_vec(),
        fps: WOBBLE_FPS,
    });
    session.push(Command::SetBallVelocity(session.ball.vel));
    log::debug!("Paddle hit: offset {:.1}, vx {:.1}", offset, vx);
}

fn brick_hit(session: &mut GameSession, id: BrickId) {
    let kill_ms = session.tuning.brick_kill_ms;
    match session.grid.hit(id, kill_ms) {
        HitOutcome::Scored => {}
        HitOutcome::AlreadyDying => {
            log::debug!("Brick {:?} hit again while shrinking", id);
            return;
        }
        HitOutcome::Dead | HitOutcome::Unknown => {
            log::warn!("Stale hit on brick {:?}", id);
            return;
        }
    }

    session.push(Command::StartBrickKill {
        id,
        duration_ms: kill_ms,
    });
    session.score += session.tuning.score_per_brick;
    let text = hud::score_text(session.score);
    session.push(Command::SetScoreText(text));
    log::debug!("Brick {:?} destroyed, score {}", id, session.score);

    if session.grid.unscored() == 0 {
        debug_assert_eq!(session.score, session.tuning.max_score());
        finish(session, Outcome::Won);
    }
}

fn ball_lost(session: &mut GameSession) {
    if session.phase != GamePhase::Playing {
        log::warn!("Out-of-bounds report while {:?}", session.phase);
        return;
    }

    session.lives = session.lives.saturating_sub(1);
    if session.lives == 0 {
        session.playing = false;
        finish(session, Outcome::Lost);
        return;
    }

    let lives_text = hud::lives_text(session.lives);
    session.push(Command::SetLivesText(lives_text));
    session.life_lost_visible = true;
    session.push(Command::ShowLifeLost(true));

    let ball_pos = session.tuning.ball_reset_pos();
    let paddle_pos = session.tuning.paddle_reset_pos();
    session.ball.reset(ball_pos);
    session.paddle.reset(paddle_pos);
    session.push(Command::ResetBall(ball_pos));
    session.push(Command::ResetPaddle(paddle_pos));

    session.resume_armed = true;
    session.phase = GamePhase::LifeLost;
    log::info!("Life lost, {} remaining", session.lives);
}

fn finish(session: &mut GameSession, outcome: Outcome) {
    session.playing = false;
    session.phase = match outcome {
        Outcome::Won => GamePhase::Won,
        Outcome::Lost => GamePhase::Lost,
    };
    session.ball.vel = Vec2::ZERO;
    session.push(Command::EndGame {
        outcome,
        message: outcome.message().to_string(),
    });
    session.push(Command::Restart);
    log::info!("{:?} with score {}", outcome, session.score);
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::consts::SIM_DT;

    fn playing_session() -> GameSession {
        let mut session = GameSession::default();
        handle_event(&mut session, GameEvent::StartPressed);
        session.drain_commands();
        session
    }

    #[test]
    fn test_start_launches_ball() {
        let mut session = GameSession::default();
        handle_event(&mut session, GameEvent::StartPressed);

        assert_eq!(session.phase, GamePhase::Playing);
        assert!(session.playing);
        assert!(!session.start_visible);
        assert_eq!(session.ball.vel, Vec2::new(150.0, -150.0));
        assert_eq!(
            session.commands(),
            &[
                Command::DestroyStartButton,
                Command::SetBallVelocity(Vec2::new(150.0, -150.0)),
            ]
        );
    }

    #[test]
    fn test_start_only_once() {
        let mut session = playing_session();
        session.ball.vel = Vec2::new(10.0, 10.0);
        handle_event(&mut session, GameEvent::StartPressed);
        assert_eq!(session.ball.vel, Vec2::new(10.0, 10.0));
        assert!(session.commands().is_empty());
    }

    #[test]
    fn test_paddle_frozen_while_idle() {
        let mut session = GameSession::default();
        let input = TickInput {
            pointer_x: Some(100.0),
        };
        tick(&mut session, &input, SIM_DT);
        assert_eq!(session.paddle.pos.x, 400.0);
    }

    #[test]
    fn test_paddle_follows_pointer_while_playing() {
        let mut session = playing_session();
        let input = TickInput {
            pointer_x: Some(250.0),
        };
        tick(&mut session, &input, SIM_DT);
        assert_eq!(session.paddle.pos.x, 250.0);
        assert_eq!(session.commands(), &[Command::MovePaddle(250.0)]);

        // No pointer snaps back to centre
        tick(&mut session, &TickInput::default(), SIM_DT);
        assert_eq!(session.paddle.pos.x, 400.0);
    }

    #[test]
    fn test_paddle_hit_deflection() {
        let mut session = playing_session();
        session.paddle.pos.x = 400.0;
        session.ball.pos.x = 390.0;
        session.ball.vel = Vec2::new(150.0, -150.0);
        handle_event(&mut session, GameEvent::PaddleHit);
        assert_eq!(session.ball.vel, Vec2::new(-50.0, -150.0));
        assert!(matches!(
            session.commands()[0],
            Command::PlayWobble { fps: 24, .. }
        ));
    }

    #[test]
    fn test_brick_hit_scores_once() {
        let mut session = playing_session();
        handle_event(&mut session, GameEvent::BrickHit(BrickId(0)));
        assert_eq!(session.score, 10);
        handle_event(&mut session, GameEvent::BrickHit(BrickId(0)));
        assert_eq!(session.score, 10);

        let commands = session.drain_commands();
        assert_eq!(
            commands,
            vec![
                Command::StartBrickKill {
                    id: BrickId(0),
                    duration_ms: 200,
                },
                Command::SetScoreText("Points: 10".to_string()),
            ]
        );

        // Kill lands after the tween, not before
        for _ in 0..11 {
            tick(&mut session, &TickInput::default(), SIM_DT);
        }
        assert!(session.commands().is_empty());
        tick(&mut session, &TickInput::default(), SIM_DT);
        assert_eq!(session.commands(), &[Command::KillBrick(BrickId(0))]);

        // Dead brick is worth nothing
        handle_event(&mut session, GameEvent::BrickHit(BrickId(0)));
        assert_eq!(session.score, 10);
    }

    #[test]
    fn test_life_lost_and_resume() {
        let mut session = playing_session();
        session.ball.pos = Vec2::new(120.0, 640.0);
        session.paddle.pos.x = 90.0;

        handle_event(&mut session, GameEvent::BallOutOfBounds);
        assert_eq!(session.phase, GamePhase::LifeLost);
        assert_eq!(session.lives, 2);
        assert!(session.playing);
        assert!(session.resume_armed);
        assert!(session.life_lost_visible);
        assert_eq!(session.ball.pos, Vec2::new(400.0, 575.0));
        assert_eq!(session.ball.vel, Vec2::ZERO);
        assert_eq!(session.paddle.pos, Vec2::new(400.0, 595.0));
        assert!(session
            .commands()
            .contains(&Command::SetLivesText("Lives: 2".to_string())));

        // Paddle does not track input while waiting
        tick(
            &mut session,
            &TickInput {
                pointer_x: Some(100.0),
            },
            SIM_DT,
        );
        assert_eq!(session.paddle.pos.x, 400.0);

        handle_event(&mut session, GameEvent::ResumePressed);
        assert_eq!(session.phase, GamePhase::Playing);
        assert_eq!(session.ball.vel, Vec2::new(150.0, -150.0));
        assert!(!session.life_lost_visible);
        assert!(!session.resume_armed);

        // One-shot: a second press changes nothing
        session.ball.vel = Vec2::new(1.0, 1.0);
        handle_event(&mut session, GameEvent::ResumePressed);
        assert_eq!(session.ball.vel, Vec2::new(1.0, 1.0));
    }

    #[test]
    fn test_last_life_loses() {
        let mut session = playing_session();
        session.lives = 1;
        handle_event(&mut session, GameEvent::BallOutOfBounds);
        assert_eq!(session.phase, GamePhase::Lost);
        assert_eq!(session.lives, 0);
        assert!(!session.playing);
        assert_eq!(
            session.commands(),
            &[
                Command::EndGame {
                    outcome: Outcome::Lost,
                    message: "You lost, game over!".to_string(),
                },
                Command::Restart,
            ]
        );

        // Terminal: nothing else gets through
        session.drain_commands();
        handle_event(&mut session, GameEvent::BrickHit(BrickId(3)));
        handle_event(&mut session, GameEvent::BallOutOfBounds);
        assert_eq!(session.score, 0);
        assert_eq!(session.lives, 0);
        assert!(session.commands().is_empty());
    }

    #[test]
    fn test_out_of_bounds_ignored_when_not_playing() {
        let mut session = GameSession::default();
        handle_event(&mut session, GameEvent::BallOutOfBounds);
        assert_eq!(session.lives, 3);
        assert_eq!(session.phase, GamePhase::Idle);
    }

    #[test]
    fn test_resume_ignored_while_idle() {
        let mut session = GameSession::default();
        handle_event(&mut session, GameEvent::ResumePressed);
        assert_eq!(session.phase, GamePhase::Idle);
        assert_eq!(session.ball.vel, Vec2::ZERO);
    }
}
