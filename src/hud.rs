//! Text overlays
//!
//! Mirrors what the engine should draw on top of the play field. Kept in
//! sync by feeding it the same [`Command`]s the engine receives.

use glam::Vec2;
use serde::{Deserialize, Serialize};

use crate::sim::{Command, GameSession, Outcome};
use crate::tuning::Tuning;

pub const TEXT_FONT: &str = "18px Arial";
pub const TEXT_COLOR: &str = "#0095DD";
pub const LIFE_LOST_TEXT: &str = "Life lost, click to continue";
/// Inset of the score/lives text from the top corners
const HUD_MARGIN: f32 = 5.0;

pub fn score_text(score: u64) -> String {
    format!("Points: {}", score)
}

pub fn lives_text(lives: u8) -> String {
    format!("Lives: {}", lives)
}

/// A positioned text object. `anchor` is normalised (0,0 top-left, 1,1 bottom-right).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TextOverlay {
    pub text: String,
    pub pos: Vec2,
    pub anchor: Vec2,
    pub visible: bool,
}

impl TextOverlay {
    fn new(text: impl Into<String>, pos: Vec2, anchor: Vec2) -> Self {
        Self {
            text: text.into(),
            pos,
            anchor,
            visible: true,
        }
    }
}

/// All on-screen text for one session
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Hud {
    pub score: TextOverlay,
    pub lives: TextOverlay,
    pub life_lost: TextOverlay,
    /// Blocking end-of-game message, if one is up
    pub modal: Option<(Outcome, String)>,
}

impl Hud {
    pub fn new(tuning: &Tuning) -> Self {
        let centre = Vec2::new(tuning.world_width, tuning.world_height) * 0.5;
        let mut life_lost = TextOverlay::new(LIFE_LOST_TEXT, centre, Vec2::splat(0.5));
        life_lost.visible = false;
        Self {
            score: TextOverlay::new(score_text(0), Vec2::splat(HUD_MARGIN), Vec2::ZERO),
            lives: TextOverlay::new(
                lives_text(tuning.starting_lives),
                Vec2::new(tuning.world_width - HUD_MARGIN, HUD_MARGIN),
                Vec2::new(1.0, 0.0),
            ),
            life_lost,
            modal: None,
        }
    }

    /// Rebuild from a session snapshot
    pub fn from_session(session: &GameSession) -> Self {
        let mut hud = Self::new(&session.tuning);
        hud.score.text = score_text(session.score);
        hud.lives.text = lives_text(session.lives);
        hud.life_lost.visible = session.life_lost_visible;
        hud
    }

    /// Apply the text-related part of a command; everything else is ignored
    pub fn apply(&mut self, command: &Command) {
        match command {
            Command::SetScoreText(text) => self.score.text = text.clone(),
            Command::SetLivesText(text) => self.lives.text = text.clone(),
            Command::ShowLifeLost(visible) => self.life_lost.visible = *visible,
            Command::EndGame { outcome, message } => {
                self.modal = Some((*outcome, message.clone()));
            }
            _ => {}
        }
    }
}
