//! Brick wall
//!
//! The grid is populated exactly once per session and never grows or shrinks;
//! only brick liveness changes, and only forward:
//! `Alive -> Dying -> Dead`.

use std::collections::BTreeSet;

use glam::Vec2;
use serde::{Deserialize, Serialize};

use super::tween::ScaleTween;
use crate::Aabb;
use crate::tuning::BrickLayout;

/// Stable brick identifier (creation order, column-major)
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct BrickId(pub u32);

/// Liveness of a brick
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum BrickLife {
    /// Untouched, worth points
    Alive,
    /// Scored, shrinking; still in the collision set until the tween ends
    Dying(ScaleTween),
    /// Out of play for good
    Dead,
}

/// A single brick
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Brick {
    pub id: BrickId,
    pub row: u32,
    pub col: u32,
    /// Centre position
    pub pos: Vec2,
    pub size: Vec2,
    pub life: BrickLife,
}

impl Brick {
    pub fn aabb(&self) -> Aabb {
        Aabb::new(self.pos, self.size)
    }

    /// Takes part in collisions (alive or still shrinking)
    pub fn is_collidable(&self) -> bool {
        !matches!(self.life, BrickLife::Dead)
    }

    /// Visual scale for rendering
    pub fn scale(&self) -> f32 {
        match self.life {
            BrickLife::Alive => 1.0,
            BrickLife::Dying(tween) => tween.scale(),
            BrickLife::Dead => 0.0,
        }
    }
}

/// What a reported hit did to the grid
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HitOutcome {
    /// First hit: brick starts dying and is worth points
    Scored,
    /// Brick was already scored and is still shrinking
    AlreadyDying,
    /// Brick is dead (stale report)
    Dead,
    /// No such brick
    Unknown,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BrickGrid {
    pub layout: BrickLayout,
    bricks: Vec<Brick>,
    /// Bricks whose kill tween is running
    pending_removal: BTreeSet<BrickId>,
}

impl BrickGrid {
    /// Build the full wall. Column outer loop, row inner loop.
    pub fn new(layout: BrickLayout) -> Self {
        let mut bricks = Vec::with_capacity(layout.count() as usize);
        for col in 0..layout.cols {
            for row in 0..layout.rows {
                bricks.push(Brick {
                    id: BrickId(bricks.len() as u32),
                    row,
                    col,
                    pos: layout.center(row, col),
                    size: layout.size(),
                    life: BrickLife::Alive,
                });
            }
        }
        log::info!(
            "Brick grid: {}x{} = {} bricks",
            layout.rows,
            layout.cols,
            bricks.len()
        );
        Self {
            layout,
            bricks,
            pending_removal: BTreeSet::new(),
        }
    }

    pub fn total(&self) -> usize {
        self.bricks.len()
    }

    pub fn bricks(&self) -> &[Brick] {
        &self.bricks
    }

    pub fn get(&self, id: BrickId) -> Option<&Brick> {
        self.bricks.get(id.0 as usize)
    }

    /// Bricks still worth points
    pub fn unscored(&self) -> usize {
        self.bricks
            .iter()
            .filter(|b| b.life == BrickLife::Alive)
            .count()
    }

    /// Bricks that are not dead yet
    pub fn live_count(&self) -> usize {
        self.bricks.iter().filter(|b| b.is_collidable()).count()
    }

    pub fn collidable(&self) -> impl Iterator<Item = &Brick> {
        self.bricks.iter().filter(|b| b.is_collidable())
    }

    pub fn pending_removal(&self) -> &BTreeSet<BrickId> {
        &self.pending_removal
    }

    /// Register a ball hit on `id`, starting its kill tween on first contact
    pub fn hit(&mut self, id: BrickId, kill_ms: u32) -> HitOutcome {
        let Some(brick) = self.bricks.get_mut(id.0 as usize) else {
            return HitOutcome::Unknown;
        };
        match brick.life {
            BrickLife::Alive => {
                brick.life = BrickLife::Dying(ScaleTween::new(kill_ms));
                self.pending_removal.insert(id);
                HitOutcome::Scored
            }
            BrickLife::Dying(_) => HitOutcome::AlreadyDying,
            BrickLife::Dead => HitOutcome::Dead,
        }
    }

    /// Advance kill tweens and drain finished bricks. Returns the ids that died this step.
    pub fn advance(&mut self, dt: f32) -> Vec<BrickId> {
        let mut finished = Vec::new();
        for &id in &self.pending_removal {
            let brick = &mut self.bricks[id.0 as usize];
            if let BrickLife::Dying(ref mut tween) = brick.life {
                if tween.advance(dt) {
                    finished.push(id);
                }
            }
        }
        for id in &finished {
            self.bricks[id.0 as usize].life = BrickLife::Dead;
            self.pending_removal.remove(id);
        }
        finished
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_full_population() {
        let grid = BrickGrid::new(BrickLayout::default());
        assert_eq!(grid.total(), 21);
        assert_eq!(grid.unscored(), 21);
        assert_eq!(grid.live_count(), 21);

        // Column-major ordering
        let second = grid.get(BrickId(1)).unwrap();
        assert_eq!((second.row, second.col), (1, 0));
        assert_eq!(second.pos, Vec2::new(60.0, 80.0));

        let fourth = grid.get(BrickId(3)).unwrap();
        assert_eq!((fourth.row, fourth.col), (0, 1));
        assert_eq!(fourth.pos, Vec2::new(120.0, 50.0));
    }

    #[test]
    fn test_two_phase_removal() {
        let mut grid = BrickGrid::new(BrickLayout::default());
        let id = BrickId(4);

        assert_eq!(grid.hit(id, 200), HitOutcome::Scored);
        assert_eq!(grid.unscored(), 20);
        // Still collidable while shrinking
        assert_eq!(grid.live_count(), 21);
        assert!(grid.pending_removal().contains(&id));
        assert_eq!(grid.hit(id, 200), HitOutcome::AlreadyDying);

        assert!(grid.advance(0.1).is_empty());
        assert_eq!(grid.advance(0.1), vec![id]);
        assert_eq!(grid.live_count(), 20);
        assert!(grid.pending_removal().is_empty());
        assert_eq!(grid.get(id).unwrap().life, BrickLife::Dead);

        // Dead bricks never come back
        assert_eq!(grid.hit(id, 200), HitOutcome::Dead);
        assert_eq!(grid.get(id).unwrap().life, BrickLife::Dead);
        assert_eq!(grid.total(), 21);
    }

    #[test]
    fn test_unknown_brick() {
        let mut grid = BrickGrid::new(BrickLayout::default());
        assert_eq!(grid.hit(BrickId(99), 200), HitOutcome::Unknown);
        assert_eq!(grid.unscored(), 21);
    }

    #[test]
    fn test_collidable_skips_dead() {
        let mut grid = BrickGrid::new(BrickLayout::default());
        grid.hit(BrickId(0), 0);
        grid.advance(0.0);
        assert!(grid.collidable().all(|b| b.id != BrickId(0)));
        assert_eq!(grid.collidable().count(), 20);
    }
}
