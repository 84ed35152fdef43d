//! Collision detection and combat resolution
//!
//! Resolution order within a frame is fixed: body self-intersection (during the
//! snake step), then projectile vs enemy, then enemy vs head. A kill shot
//! removes the enemy before the head check can see it.

use std::collections::HashSet;

use glam::Vec2;
use serde::{Deserialize, Serialize};

use super::state::{GameEvent, GameOverCause, GameState};
use crate::consts::{ENEMY_SHRINK, HEAD_INSET};

/// Axis-aligned rectangle in pixels
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Aabb {
    /// Top-left corner
    pub min: Vec2,
    pub size: Vec2,
}

impl Aabb {
    pub fn new(min: Vec2, size: Vec2) -> Self {
        Self { min, size }
    }

    pub fn from_center(center: Vec2, side: f32) -> Self {
        Self {
            min: center - Vec2::splat(side / 2.0),
            size: Vec2::splat(side),
        }
    }

    #[inline]
    pub fn max(&self) -> Vec2 {
        self.min + self.size
    }

    /// Half-open containment: the right and bottom edges are outside
    pub fn contains_point(&self, p: Vec2) -> bool {
        let max = self.max();
        p.x >= self.min.x && p.x < max.x && p.y >= self.min.y && p.y < max.y
    }

    /// Strict overlap: touching edges do not count
    pub fn overlaps(&self, other: &Aabb) -> bool {
        let a = self.max();
        let b = other.max();
        self.min.x < b.x && other.min.x < a.x && self.min.y < b.y && other.min.y < a.y
    }
}

/// Head footprint: the interpolated cell, inset on each side
pub fn head_footprint(state: &GameState) -> Aabb {
    let size = state.grid.size;
    Aabb::new(
        state.snake.head_origin(&state.grid) + Vec2::splat(HEAD_INSET),
        Vec2::splat(size - 2.0 * HEAD_INSET),
    )
}

/// Enemy footprint centered on its continuous position
pub fn enemy_footprint(pos: Vec2, cell_size: f32) -> Aabb {
    Aabb::from_center(pos, cell_size - ENEMY_SHRINK)
}

/// Projectile vs enemy. Each flying projectile scores at most one hit; enemies
/// that drop to zero hp are removed after the scan and ignored for the rest
/// of it.
pub fn resolve_projectile_hits(state: &mut GameState) {
    let cell_size = state.grid.size;
    let mut dead: HashSet<u32> = HashSet::new();

    for projectile in state.projectiles.iter_mut() {
        if projectile.is_hit() {
            continue;
        }

        let target = state.enemies.iter_mut().find(|e| {
            !dead.contains(&e.id) && enemy_footprint(e.pos, cell_size).contains_point(projectile.pos)
        });
        let Some(enemy) = target else {
            continue;
        };

        enemy.hp = enemy.hp.saturating_sub(1);
        if enemy.hp == 0 {
            dead.insert(enemy.id);
            state.events.push(GameEvent::EnemyKilled {
                id: enemy.id,
                kind: enemy.kind,
            });
        } else {
            state.events.push(GameEvent::EnemyHit {
                id: enemy.id,
                hp_left: enemy.hp,
            });
        }
        projectile.mark_hit();
    }

    if !dead.is_empty() {
        state.enemies.retain(|e| !dead.contains(&e.id));
    }
}

/// Enemy vs head. Any overlap ends the run.
pub fn resolve_head_contact(state: &mut GameState) {
    let head = head_footprint(state);
    let cell_size = state.grid.size;
    let hit = state
        .enemies
        .iter()
        .find(|e| enemy_footprint(e.pos, cell_size).overlaps(&head))
        .map(|e| e.id);

    if let Some(enemy_id) = hit {
        state.end(GameOverCause::EnemyContact { enemy_id });
    }
}

/// Run both combat passes in order
pub fn resolve(state: &mut GameState) {
    resolve_projectile_hits(state);
    resolve_head_contact(state);
}
